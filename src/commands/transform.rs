use std::path::PathBuf;
use std::process::ExitCode;

use d2c_lib::{D2cError, D2cOutput, FindingCounts, TransformReport, D2C_OUTPUT_VERSION};

use crate::cli::InputArgs;
use crate::formatting::{exit_code_for_findings, render_error, write_output};

/// Run the transform command.
pub fn run_transform(config_path: Option<PathBuf>, args: InputArgs) -> ExitCode {
    let report = match transform_report(config_path, &args) {
        Ok(report) => report,
        Err(err) => return render_error(err, args.format, args.output),
    };
    let code = exit_code_for_findings(&report.findings);
    let body = D2cOutput::Transform(report);
    if let Err(err) = write_output(&body, args.format, args.output.clone()) {
        return render_error(err, args.format, args.output);
    }
    code
}

fn transform_report(
    config_path: Option<PathBuf>,
    args: &InputArgs,
) -> Result<TransformReport, D2cError> {
    let (_, output) = super::prepare(config_path.as_deref(), args)?;
    Ok(TransformReport {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: args.input.clone(),
        setting: output.setting,
        node_count: output.tree.node_count(),
        counts: FindingCounts::from(&output.diagnostics),
        tree: output.tree,
        imports: output.imports,
        findings: output.diagnostics,
    })
}
