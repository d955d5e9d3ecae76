mod export;
mod render;
mod transform;

pub use export::{run_export, ExportTargets};
pub use render::run_render;
pub use transform::run_transform;

use std::path::Path;

use d2c_lib::{load_raw_tree, transform_document, Config, D2cError, TransformOutput};

use crate::cli::InputArgs;
use crate::settings::{load_config, log_effective_config, resolve_config, TransformOverrides};

/// Loads the effective config and transforms the input file.
pub(crate) fn prepare(
    config_path: Option<&Path>,
    args: &InputArgs,
) -> Result<(Config, TransformOutput), D2cError> {
    let config = resolve_config(load_config(config_path)?, &TransformOverrides::from(args));
    log_effective_config(config_path, &config);

    let raw = load_raw_tree(&args.input)?;
    let output = transform_document(&raw, &config)?;
    log::debug!(
        "transformed {} into {} nodes with {} finding(s)",
        args.input.display(),
        output.tree.node_count(),
        output.diagnostics.len()
    );
    Ok((config, output))
}
