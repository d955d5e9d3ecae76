use d2c_lib::inspect::names;
use d2c_lib::{
    parse_raw_tree, render_module, resolve_findings, transform_document, BoundaryMode,
    ComponentMapping, Config, D2CInspect, D2cError, Diagnostics, GenerationHooks, HookRegistry,
    InlineStyleEmitter, InspectType, NodeContent, RawFormat, TemplateBinding, TemplateRenderer,
    TransformMode, TreeNode,
};
use serde_json::json;

const LANDING: &str = include_str!("fixtures/landing.json");
const BROKEN: &str = include_str!("fixtures/broken.yaml");

fn semi_config() -> Config {
    Config {
        components: vec![ComponentMapping::new("Button", "@douyinfe/semi-ui")],
        ..Config::default()
    }
}

#[test]
fn transform_render_round_trip_through_the_library() {
    let raw = parse_raw_tree(LANDING, RawFormat::Json).expect("landing fixture");
    let output = transform_document(&raw, &semi_config()).expect("transform");

    assert_eq!(output.setting.transform_mode, TransformMode::JsxScss);
    let button = output.tree.find("1:3").expect("button node");
    assert_eq!(button.tag, "Button");
    assert_eq!(button.text(), Some("Start"));
    assert_eq!(button.package_name.as_deref(), Some("@douyinfe/semi-ui"));
    assert!(output.tree.find("1:5").is_none());

    let tree = output.tree.freeze().expect("valid tree");
    let registry = HookRegistry::new();
    let renderer = TemplateRenderer::new(&registry, &InlineStyleEmitter);
    let module = render_module(&renderer, &tree, &output.imports, "Landing");

    assert!(module
        .source
        .starts_with("import { Button } from '@douyinfe/semi-ui';"));
    assert!(module.source.contains("<Button type=\"primary\""));
    assert!(module.source.contains(">Start</Button>"));
    assert!(module.diagnostics.is_empty());
}

#[test]
fn hooks_override_transformed_nodes() {
    let raw = parse_raw_tree(LANDING, RawFormat::Json).expect("landing fixture");
    let mut output = transform_document(&raw, &semi_config()).expect("transform");

    let mut registry = HookRegistry::new();
    let handle = registry.register(
        "lazy-image",
        |node: &TreeNode, hooks: &dyn GenerationHooks| -> Result<String, String> {
            let inner = hooks.generate_template(node);
            Ok(inner.replacen("<img ", "<img loading=\"lazy\" ", 1))
        },
    );
    if let NodeContent::Children(children) = &mut output.tree.content {
        for child in children.iter_mut().filter(|c| c.tag == "img") {
            child.template = TemplateBinding::Override(handle.clone());
        }
    }

    let tree = output.tree.freeze().expect("valid tree");
    let renderer = TemplateRenderer::new(&registry, &InlineStyleEmitter);
    let rendered = renderer.render(&tree);
    assert!(rendered.markup.contains("<img loading=\"lazy\" src="));
    assert!(rendered.diagnostics.is_empty());
}

#[test]
fn yaml_input_reports_schema_violations_as_findings() {
    let raw = parse_raw_tree(BROKEN, RawFormat::Yaml).expect("broken fixture");
    let output = transform_document(&raw, &Config::default()).expect("content problems never fail");

    assert!(output.diagnostics.has_errors());
    let finding = output.diagnostics.iter().next().expect("one finding");
    assert_eq!(finding.inspect_name, names::SCHEMA_VIOLATION);
    assert_eq!(finding.node_ids, vec!["2:1"]);

    let placeholder = output.tree.find("2:1").expect("placeholder kept");
    assert_eq!(placeholder.tag, "div");
    assert_eq!(placeholder.name, "Floating");
    assert!(placeholder.children().is_empty());
}

#[test]
fn strict_boundary_rejects_dangling_findings() {
    let tree = TreeNode::element("div", "Page", "FRAME").with_id("0:1");
    let mut findings = Diagnostics::new();
    findings.push(D2CInspect::new(
        "custom",
        InspectType::Info,
        "9:9",
        "Orphan",
        "refers to a node that was never emitted",
    ));

    let lenient = resolve_findings(findings.clone(), &tree, BoundaryMode::Lenient).unwrap();
    assert!(lenient.is_empty());

    let err = resolve_findings(findings, &tree, BoundaryMode::Strict).unwrap_err();
    assert!(matches!(
        err,
        D2cError::UnresolvedFinding { ref missing, .. } if missing == &vec!["9:9".to_string()]
    ));
}

#[test]
fn tree_json_round_trips_with_node_props() {
    let tree = TreeNode::element("Tooltip", "Hint", "INSTANCE")
        .with_id("3:1")
        .with_component("@douyinfe/semi-ui", false)
        .with_prop(
            "content",
            TreeNode::element("span", "Body", "TEXT")
                .with_id("3:2")
                .with_text("More info"),
        )
        .with_prop("position", json!("top"))
        .with_text("?");

    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(value["props"]["content"]["kind"], "node");
    assert_eq!(value["props"]["position"]["kind"], "data");

    let back: TreeNode = serde_json::from_value(value).unwrap();
    assert_eq!(back, tree);
    assert_eq!(back.ids(), vec!["3:1", "3:2"]);
}

#[test]
fn error_display_includes_message() {
    let err = D2cError::Config("missing mapping".to_string());
    assert_eq!(format!("{}", err), "Configuration error: missing mapping");

    let io_err = std::io::Error::other("disk full");
    let err: D2cError = io_err.into();
    let rendered = format!("{}", err);
    assert!(rendered.starts_with("IO error: "));
    assert!(rendered.contains("disk full"));

    let err = D2cError::UnresolvedFinding {
        inspect_name: "hookFailure".to_string(),
        missing: vec!["1:1".to_string(), "1:2".to_string()],
    };
    assert_eq!(
        err.to_string(),
        "Finding 'hookFailure' references unresolved node ids: 1:1, 1:2"
    );
}
