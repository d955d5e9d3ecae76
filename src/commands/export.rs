use std::path::{Path, PathBuf};
use std::process::ExitCode;

use d2c_lib::{
    render_module, D2cError, D2cOutput, ExportReport, HookRegistry, InlineStyleEmitter,
    SandboxBuilder, SandboxTemplate, TemplateRenderer, D2C_OUTPUT_VERSION,
};

use crate::cli::InputArgs;
use crate::formatting::{exit_code_for_findings, render_error, write_output};

/// Where the sandbox parameters go.
pub struct ExportTargets {
    pub template: Option<SandboxTemplate>,
    pub title: Option<String>,
    pub out: Option<PathBuf>,
    pub dir: Option<PathBuf>,
}

/// Run the export command.
pub async fn run_export(
    config_path: Option<PathBuf>,
    args: InputArgs,
    targets: ExportTargets,
) -> ExitCode {
    let report = match export_report(config_path.as_deref(), &args, targets).await {
        Ok(report) => report,
        Err(err) => return render_error(err, args.format, args.output),
    };
    let code = exit_code_for_findings(&report.findings);
    let body = D2cOutput::Export(report);
    if let Err(err) = write_output(&body, args.format, args.output.clone()) {
        return render_error(err, args.format, args.output);
    }
    code
}

async fn export_report(
    config_path: Option<&Path>,
    args: &InputArgs,
    targets: ExportTargets,
) -> Result<ExportReport, D2cError> {
    let (config, output) = super::prepare(config_path, args)?;
    let tree = output.tree.freeze()?;

    let registry = HookRegistry::new();
    let renderer = TemplateRenderer::new(&registry, &InlineStyleEmitter);
    let module = render_module(&renderer, &tree, &output.imports, "App");

    let mut builder = SandboxBuilder::from_config(config.transform_mode, &config.sandbox)?;
    if let Some(template) = targets.template {
        builder = builder.template(template);
    }
    if let Some(title) = targets.title {
        builder = builder.title(title);
    }
    let params = builder.build(&module, &output.imports, &tree)?;

    if let Some(path) = &targets.out {
        params.write_json(path).await?;
    }
    let written = match &targets.dir {
        Some(dir) => params.materialize(dir).await?,
        None => Vec::new(),
    };

    let mut findings = output.diagnostics;
    findings.merge(module.diagnostics);
    Ok(ExportReport {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: args.input.clone(),
        setting: output.setting,
        template: params.template,
        file_count: params.files.len(),
        output_path: targets.out.clone(),
        written,
        params: if targets.out.is_none() {
            Some(params)
        } else {
            None
        },
        findings,
    })
}
