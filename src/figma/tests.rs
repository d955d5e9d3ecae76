//! Tests for raw input parsing and color conversion.

#[cfg(test)]
mod tests {
    use crate::figma::api_types::{RawColor, RawNode};
    use crate::figma::{load_raw_tree, parse_raw_tree, RawFormat};
    use crate::D2cError;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn test_raw_color_to_hex() {
        let color = RawColor {
            r: 1.0,
            g: 0.5,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(color.to_hex(), "#ff8000");
    }

    #[test]
    fn test_raw_color_to_hex_black() {
        let color = RawColor {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        };
        assert_eq!(color.to_css(None), "#000000");
    }

    #[test]
    fn translucent_color_uses_rgba() {
        let color = RawColor {
            r: 1.0,
            g: 1.0,
            b: 1.0,
            a: 1.0,
        };
        assert_eq!(color.to_css(Some(0.5)), "rgba(255, 255, 255, 0.5)");
    }

    #[test]
    fn parse_json_defaults_visibility_and_children() {
        let node = parse_raw_tree(
            r#"{"id":"1:23","type":"TEXT","characters":"Hello"}"#,
            RawFormat::Json,
        )
        .expect("parse");
        assert!(node.visible);
        assert!(node.children.is_empty());
        assert_eq!(node.characters.as_deref(), Some("Hello"));
        assert!(node.name.is_empty());
    }

    #[test]
    fn parse_unwraps_document_envelope() {
        let node = parse_raw_tree(
            r#"{"document":{"id":"0:1","name":"Page","type":"FRAME","children":[]}}"#,
            RawFormat::Json,
        )
        .expect("parse");
        assert_eq!(node.id, "0:1");
        assert_eq!(node.node_type, "FRAME");
    }

    #[test]
    fn parse_yaml_tree() {
        let yaml = r#"
id: "1:1"
name: Card
type: FRAME
absoluteBoundingBox: { x: 0, y: 0, width: 100, height: 40 }
children:
  - id: "1:2"
    type: TEXT
    characters: Hi
"#;
        let node: RawNode = parse_raw_tree(yaml, RawFormat::Yaml).expect("parse yaml");
        assert_eq!(node.children.len(), 1);
        assert_eq!(node.first_text(), Some("Hi"));
        assert_eq!(node.absolute_bounding_box.map(|b| b.width), Some(100.0));
    }

    #[test]
    fn malformed_child_keeps_its_identity() {
        let node = parse_raw_tree(
            r#"{"id":"1:0","type":"FRAME","children":[
                {"id":"1:2","name":"Hero","type":"RECTANGLE","visible":false,"absoluteBoundingBox":{"x":0,"y":0}},
                {"id":"1:1","type":"TEXT","characters":"Hi"}
            ]}"#,
            RawFormat::Json,
        )
        .expect("siblings of a malformed child still parse");
        assert_eq!(node.children.len(), 2);

        let broken = &node.children[0];
        assert_eq!(broken.id, "1:2");
        assert_eq!(broken.name, "Hero");
        assert_eq!(broken.node_type, "RECTANGLE");
        assert!(!broken.visible);
        assert!(broken.schema_error.as_deref().unwrap().contains("width"));
        assert!(node.children[1].schema_error.is_none());
    }

    #[test]
    fn malformed_root_is_an_error() {
        let err = parse_raw_tree(r#"{"id":"1:0","children":[]}"#, RawFormat::Json).unwrap_err();
        assert!(matches!(err, D2cError::Serialization(_)));
    }

    #[test]
    fn unsupported_extension_is_config_error() {
        let err = RawFormat::from_path(Path::new("design.fig")).unwrap_err();
        assert!(matches!(err, D2cError::Config(_)));
    }

    #[test]
    fn load_raw_tree_reads_file() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("tree.json");
        std::fs::write(&path, r#"{"id":"5:1","type":"RECTANGLE"}"#).expect("write");
        let node = load_raw_tree(&path).expect("load");
        assert_eq!(node.id, "5:1");
    }
}
