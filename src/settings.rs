use std::path::Path;

use d2c_lib::{BoundaryMode, Config, D2cError, TransformMode};

use crate::cli::InputArgs;

/// Transform-related flags taken from the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TransformOverrides {
    pub mode: Option<TransformMode>,
    pub keep_invisible: bool,
    pub parallel: bool,
    pub strict: bool,
}

impl From<&InputArgs> for TransformOverrides {
    fn from(args: &InputArgs) -> Self {
        Self {
            mode: args.mode,
            keep_invisible: args.keep_invisible,
            parallel: args.parallel,
            strict: args.strict,
        }
    }
}

/// Merge CLI flags into the loaded config. Flags only ever switch a
/// behavior on, so an absent flag leaves the config value in place.
pub fn resolve_config(mut config: Config, overrides: &TransformOverrides) -> Config {
    if let Some(mode) = overrides.mode {
        config.transform_mode = mode;
    }
    if overrides.keep_invisible {
        config.drop_invisible = false;
    }
    if overrides.parallel {
        config.parallel = true;
    }
    if overrides.strict {
        config.boundary = BoundaryMode::Strict;
    }
    config
}

/// Load config from a TOML file, central config, or return defaults.
/// Priority: explicit path > ~/.config/d2c/config.toml > defaults
pub fn load_config(path: Option<&Path>) -> Result<Config, D2cError> {
    let cfg = Config::load(path).map_err(|e| {
        let loc = path
            .map(|p| p.display().to_string())
            .or_else(|| Config::central_config_path().map(|p| p.display().to_string()))
            .unwrap_or_else(|| "defaults".to_string());
        match e {
            D2cError::Io(io) => D2cError::Io(io),
            other => D2cError::Config(format!("Failed to read config {}: {}", loc, other)),
        }
    })?;

    cfg.validate().map_err(|e| {
        let prefix = path
            .map(|p| format!("Invalid config ({}): {}", p.display(), e))
            .unwrap_or_else(|| format!("Invalid config: {}", e));
        D2cError::Config(prefix)
    })?;
    Ok(cfg)
}

/// Log the effective config (visible with --verbose).
pub fn log_effective_config(config_path: Option<&Path>, config: &Config) {
    let source = config_path
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "defaults/built-in".to_string());
    log::debug!(
        "effective config (source: {}): mode {}, drop_invisible {}, parallel {}, boundary {:?}, {} component mapping(s), sandbox template {}",
        source,
        config.transform_mode,
        config.drop_invisible,
        config.parallel,
        config.boundary,
        config.components.len(),
        config.sandbox.template.as_deref().unwrap_or("create-react-app"),
    );
}
