use clap::{Parser, Subcommand, ValueEnum};
use d2c_lib::{SandboxTemplate, TransformMode};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "d2c")]
#[command(
    version,
    about = "Design-to-code - turn design node trees into a generated-code IR",
    long_about = "Design-to-code (D2C)\n\nModes:\n- transform: map a raw design tree (JSON/YAML) into the IR and report imports and findings.\n- render: serialize the IR into a JSX module.\n- export: package the rendered module as online sandbox parameters.\n\nUse --help on any subcommand for details."
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, help = "Enable verbose (debug) logging on stderr")]
    pub verbose: bool,

    #[arg(
        long,
        global = true,
        value_name = "PATH",
        help = "Optional config file (TOML) for transform mode, component mappings and sandbox defaults; CLI flags override config"
    )]
    pub config: Option<PathBuf>,
}

/// Flags shared by every subcommand that reads a design tree.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    #[arg(long, short, value_name = "FILE", help = "Design tree file (.json, .yaml or .yml)")]
    pub input: PathBuf,

    #[arg(long, help = "Transform mode (jsx+scss, jsx+tailwind, jsx+emotion)")]
    pub mode: Option<TransformMode>,

    #[arg(long, help = "Keep nodes marked invisible in the design")]
    pub keep_invisible: bool,

    #[arg(long, help = "Transform sibling subtrees in parallel")]
    pub parallel: bool,

    #[arg(long, help = "Fail when a finding references a node missing from the tree")]
    pub strict: bool,

    #[arg(long, value_enum, default_value = "json", help = "Output format")]
    pub format: OutputFormat,

    #[arg(long, short, help = "Output file path (stdout if omitted)")]
    pub output: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Transform a design tree into the IR
    Transform {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Render the IR as a JSX module
    Render {
        #[command(flatten)]
        input: InputArgs,

        #[arg(
            long,
            default_value = "App",
            help = "Name of the exported React component"
        )]
        component: String,

        #[arg(long, value_name = "FILE", help = "Also write the module source to this file")]
        out: Option<PathBuf>,
    },

    /// Export sandbox parameters for the rendered module
    Export {
        #[command(flatten)]
        input: InputArgs,

        #[arg(long, help = "Sandbox template id (e.g. create-react-app, parcel, static)")]
        template: Option<SandboxTemplate>,

        #[arg(long, help = "Sandbox title")]
        title: Option<String>,

        #[arg(long, value_name = "FILE", help = "Write the sandbox parameters JSON here")]
        out: Option<PathBuf>,

        #[arg(
            long,
            value_name = "DIR",
            help = "Write the sandbox text files into this directory"
        )]
        dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Pretty,
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::{Cli, Commands, OutputFormat};
    use clap::Parser;
    use d2c_lib::{SandboxTemplate, TransformMode};

    #[test]
    fn transform_command_uses_defaults() {
        let cli = Cli::parse_from(["d2c", "transform", "--input", "design.json"]);

        assert!(!cli.verbose);
        assert!(cli.config.is_none());

        match cli.command {
            Commands::Transform { input } => {
                assert_eq!(input.input, std::path::Path::new("design.json"));
                assert!(input.mode.is_none());
                assert!(!input.keep_invisible);
                assert!(!input.parallel);
                assert!(!input.strict);
                assert!(matches!(input.format, OutputFormat::Json));
                assert!(input.output.is_none());
            }
            _ => panic!("expected transform command"),
        }
    }

    #[test]
    fn render_command_respects_overrides() {
        let cli = Cli::parse_from([
            "d2c",
            "--verbose",
            "render",
            "--input",
            "design.yaml",
            "--mode",
            "jsx+tailwind",
            "--component",
            "Landing",
            "--format",
            "pretty",
            "--out",
            "Landing.jsx",
            "--config",
            "d2c.toml",
        ]);

        assert!(cli.verbose);
        assert_eq!(
            cli.config.as_deref(),
            Some(std::path::Path::new("d2c.toml"))
        );
        match cli.command {
            Commands::Render {
                input,
                component,
                out,
            } => {
                assert_eq!(input.mode, Some(TransformMode::JsxTailwind));
                assert!(matches!(input.format, OutputFormat::Pretty));
                assert_eq!(component, "Landing");
                assert_eq!(out.as_deref(), Some(std::path::Path::new("Landing.jsx")));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn export_command_parses_template() {
        let cli = Cli::parse_from([
            "d2c",
            "export",
            "--input",
            "design.json",
            "--template",
            "parcel",
            "--dir",
            "sandbox",
        ]);

        match cli.command {
            Commands::Export {
                template,
                dir,
                out,
                title,
                ..
            } => {
                assert_eq!(template, Some(SandboxTemplate::Parcel));
                assert_eq!(dir.as_deref(), Some(std::path::Path::new("sandbox")));
                assert!(out.is_none());
                assert!(title.is_none());
            }
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn unknown_mode_is_rejected() {
        let result = Cli::try_parse_from([
            "d2c",
            "transform",
            "--input",
            "design.json",
            "--mode",
            "vue+less",
        ]);
        assert!(result.is_err());
    }
}
