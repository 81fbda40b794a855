//! Merge rules: defaults, override order, conflict handling.

use crate::pm::DEFAULT_META_DIR;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Environment variable prefix for overrides (`SOURCEMINT_DEFAULT_PM=git`).
pub const ENV_PREFIX: &str = "SOURCEMINT";

/// Create a Config builder with merge policy defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<config::builder::DefaultState>, ConfigError>
{
    Config::builder()
        .set_default("meta_dir_name", DEFAULT_META_DIR)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.output", "stderr")
}

/// Environment source; always added last so it overrides every file.
pub fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
