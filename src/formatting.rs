use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use d2c_lib::{D2cError, D2cOutput, Diagnostics, ErrorReport, FindingCounts, InspectType};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &D2cOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), D2cError> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: D2cError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    log::debug!("command failed: {err}");
    let payload = D2cOutput::Error(ErrorReport::new(err.to_payload()));

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    // 2 is fatal; 1 means the run finished with error-level findings.
    ExitCode::from(2)
}

fn write_json_output(body: &D2cOutput, output: Option<&Path>) -> Result<(), D2cError> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_pretty_output(body: &D2cOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body, true);
        println!("{content}");
        return Ok(());
    }

    // Files and pipes keep the JSON shape.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &D2cOutput, colorize: bool) -> String {
    match body {
        D2cOutput::Transform(out) => {
            let mut buf = String::new();
            let header = color("[TRANSFORM]", "36", colorize);
            writeln!(
                buf,
                "{} {} ({}, {} nodes)",
                header,
                out.input.display(),
                out.setting.transform_mode,
                out.node_count
            )
            .ok();
            writeln!(buf, "Root: <{}> {}", out.tree.tag, out.tree.name).ok();
            if !out.imports.is_empty() {
                writeln!(buf, "Imports:").ok();
                for (package, specs) in &out.imports {
                    let names: Vec<&str> =
                        specs.iter().map(|s| s.name.as_str()).collect();
                    writeln!(buf, "- {:24} {}", package, names.join(", ")).ok();
                }
            }
            write_findings(&mut buf, &out.counts, &out.findings, colorize);
            buf
        }
        D2cOutput::Render(out) => {
            let mut buf = String::new();
            let header = color("[RENDER]", "32", colorize);
            writeln!(
                buf,
                "{} {} ({})",
                header,
                out.input.display(),
                out.setting.transform_mode
            )
            .ok();
            if let Some(path) = &out.output_path {
                writeln!(buf, "Written to {}", path.display()).ok();
            }
            writeln!(buf).ok();
            buf.push_str(&out.source);
            write_findings(&mut buf, &out.counts, &out.findings, colorize);
            buf
        }
        D2cOutput::Export(out) => {
            let mut buf = String::new();
            let header = color("[EXPORT]", "34", colorize);
            let template = out
                .template
                .map(|t| t.to_string())
                .unwrap_or_else(|| "default".to_string());
            writeln!(
                buf,
                "{} {} ({} files, template {})",
                header,
                out.input.display(),
                out.file_count,
                template
            )
            .ok();
            if let Some(path) = &out.output_path {
                writeln!(buf, "Params: {}", path.display()).ok();
            }
            if !out.written.is_empty() {
                writeln!(buf, "Files:").ok();
                for path in &out.written {
                    writeln!(buf, "- {}", path.display()).ok();
                }
            }
            write_findings(&mut buf, &FindingCounts::from(&out.findings), &out.findings, colorize);
            buf
        }
        D2cOutput::Error(out) => {
            let mut buf = String::new();
            let header = color("[ERROR]", "31", colorize);
            writeln!(buf, "{} {}", header, out.error.message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "Hint: {}", remediation).ok();
            }
            buf
        }
    }
}

fn write_findings(buf: &mut String, counts: &FindingCounts, findings: &Diagnostics, colorize: bool) {
    if findings.is_empty() {
        return;
    }
    writeln!(
        buf,
        "Findings: {} error(s), {} warning(s), {} info",
        counts.error, counts.warning, counts.info
    )
    .ok();
    for finding in findings.iter() {
        let label = color(
            &format!("[{}]", finding.inspect_type),
            severity_color_code(finding.inspect_type),
            colorize,
        );
        writeln!(
            buf,
            "- {} {} ({}): {}",
            label,
            finding.inspect_title,
            finding.node_ids.join(", "),
            finding.inspect_message
        )
        .ok();
    }
}

/// Apply ANSI color codes when enabled.
fn color(text: &str, code: &str, colorize: bool) -> String {
    if colorize {
        format!("\x1b[{}m{}\x1b[0m", code, text)
    } else {
        text.to_string()
    }
}

fn severity_color_code(inspect_type: InspectType) -> &'static str {
    match inspect_type {
        InspectType::Info => "36",
        InspectType::Warning => "33",
        InspectType::Error => "31",
    }
}

/// Exit code for a finished run.
pub fn exit_code_for_findings(findings: &Diagnostics) -> ExitCode {
    if findings.has_errors() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use d2c_lib::output::{RenderReport, TransformReport, D2C_OUTPUT_VERSION};
    use d2c_lib::{
        D2CInspect, ErrorCategory, ErrorPayload, GlobalSetting, ImportSpec, ImportsType, TreeNode,
    };

    #[test]
    fn exit_code_tracks_error_findings() {
        let mut findings = Diagnostics::new();
        assert_eq!(exit_code_for_findings(&findings), ExitCode::SUCCESS);
        findings.push(D2CInspect::new("w", InspectType::Warning, "1:1", "t", "m"));
        assert_eq!(exit_code_for_findings(&findings), ExitCode::SUCCESS);
        findings.push(D2CInspect::schema_violation("1:2", "missing absoluteBoundingBox"));
        assert_eq!(exit_code_for_findings(&findings), ExitCode::from(1));
    }

    #[test]
    fn render_error_always_returns_fatal_exit_code() {
        let code = render_error(
            D2cError::Config("boom".to_string()),
            OutputFormat::Json,
            None,
        );
        assert_eq!(code, ExitCode::from(2));
    }

    #[test]
    fn format_pretty_lists_imports_and_findings() {
        let mut findings = Diagnostics::new();
        findings.push(D2CInspect::new(
            "dependencyConflict",
            InspectType::Warning,
            "2:1",
            "Conflicting import",
            "Button imported twice",
        ));
        let mut imports = ImportsType::new();
        imports.insert(
            "@ui/kit".to_string(),
            vec![ImportSpec {
                name: "Button".to_string(),
                default_module: false,
            }],
        );
        let tree = TreeNode::element("div", "Page", "FRAME").with_id("1:1");
        let output = D2cOutput::Transform(TransformReport {
            version: D2C_OUTPUT_VERSION.to_string(),
            input: PathBuf::from("page.json"),
            setting: GlobalSetting::default(),
            node_count: tree.node_count(),
            counts: FindingCounts::from(&findings),
            tree,
            imports,
            findings,
        });

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[TRANSFORM] page.json (jsx+scss, 1 nodes)"));
        assert!(pretty.contains("Root: <div> Page"));
        assert!(pretty.contains("@ui/kit") && pretty.contains("Button"));
        assert!(pretty.contains("Findings: 0 error(s), 1 warning(s), 0 info"));
        assert!(pretty.contains("- [warning] Conflicting import (2:1): Button imported twice"));
    }

    #[test]
    fn format_pretty_prints_rendered_source() {
        let findings = Diagnostics::new();
        let output = D2cOutput::Render(RenderReport {
            version: D2C_OUTPUT_VERSION.to_string(),
            input: PathBuf::from("page.json"),
            setting: GlobalSetting::default(),
            counts: FindingCounts::from(&findings),
            source: "export default function App() {}\n".to_string(),
            output_path: None,
            findings,
        });
        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[RENDER] page.json"));
        assert!(pretty.contains("export default function App() {}"));
        assert!(!pretty.contains("Findings:"));
    }

    #[test]
    fn format_pretty_handles_errors() {
        let output = D2cOutput::Error(ErrorReport::new(ErrorPayload {
            category: ErrorCategory::Config,
            message: "bad input".to_string(),
            remediation: Some("check flags".to_string()),
        }));

        let pretty = format_pretty(&output, false);
        assert!(pretty.contains("[ERROR] bad input"));
        assert!(pretty.contains("Hint: check flags"));
    }
}
