use std::path::{Path, PathBuf};
use std::process::ExitCode;

use d2c_lib::{
    render_module, D2cError, D2cOutput, FindingCounts, HookRegistry, InlineStyleEmitter,
    RenderReport, TemplateRenderer, D2C_OUTPUT_VERSION,
};

use crate::cli::InputArgs;
use crate::formatting::{exit_code_for_findings, render_error, write_output};

/// Run the render command.
pub fn run_render(
    config_path: Option<PathBuf>,
    args: InputArgs,
    component: String,
    out: Option<PathBuf>,
) -> ExitCode {
    let report = match render_report(config_path.as_deref(), &args, &component, out) {
        Ok(report) => report,
        Err(err) => return render_error(err, args.format, args.output),
    };
    let code = exit_code_for_findings(&report.findings);
    let body = D2cOutput::Render(report);
    if let Err(err) = write_output(&body, args.format, args.output.clone()) {
        return render_error(err, args.format, args.output);
    }
    code
}

fn render_report(
    config_path: Option<&Path>,
    args: &InputArgs,
    component: &str,
    out: Option<PathBuf>,
) -> Result<RenderReport, D2cError> {
    if !is_component_name(component) {
        return Err(D2cError::config(format!(
            "'{}' is not a valid React component name (expected an identifier starting with an uppercase letter)",
            component
        )));
    }
    let (_, output) = super::prepare(config_path, args)?;
    let tree = output.tree.freeze()?;

    let registry = HookRegistry::new();
    let renderer = TemplateRenderer::new(&registry, &InlineStyleEmitter);
    let module = render_module(&renderer, &tree, &output.imports, component);

    if let Some(path) = &out {
        std::fs::write(path, &module.source)?;
        log::debug!("wrote module source to {}", path.display());
    }

    let mut findings = output.diagnostics;
    findings.merge(module.diagnostics);
    Ok(RenderReport {
        version: D2C_OUTPUT_VERSION.to_string(),
        input: args.input.clone(),
        setting: output.setting,
        counts: FindingCounts::from(&findings),
        source: module.source,
        output_path: out,
        findings,
    })
}

fn is_component_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::is_component_name;

    #[test]
    fn component_names_are_pascal_identifiers() {
        assert!(is_component_name("App"));
        assert!(is_component_name("Landing_2"));
        assert!(!is_component_name("app"));
        assert!(!is_component_name("My-App"));
        assert!(!is_component_name(""));
    }
}
