use serde_json::{json, Value};

/// Module name, used for log tagging and the log file name.
pub const MODULE_NAME: &str = "vite-path-aliases";

/// Name of the IDE configuration file the generator maintains, without extension.
pub const IDE_CONFIG_NAME: &str = "tsconfig.app";

/// Whether the generator runs for a one-shot build or a long-lived
/// development session with filesystem watching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Build,
    Serve,
}

/// Generator configuration. Defaults are applied at construction and the
/// struct is read-only afterwards; all derived state lives in the alias store.
#[derive(Debug, Clone)]
pub struct Options {
    /// Source directory name, relative to `root`
    pub dir: String,
    /// Alias prefix symbol
    pub prefix: String,
    /// Whether to scan subdirectories
    pub deep: bool,
    /// Subdirectory scan depth
    pub depth: usize,
    /// Emit one alias for the source root itself
    pub create_global_alias: bool,
    /// Write a JSON snapshot of the aliases after every change
    pub create_log: bool,
    /// Directory the log file is written to
    pub log_path: String,
    /// Camel-case-disambiguate colliding alias keys
    pub adjust_duplicates: bool,
    /// Persist absolute paths instead of paths relative to `dir`
    pub use_absolute: bool,
    /// Maintain the IDE configuration file
    pub use_config: bool,
    /// Overwrite the IDE config paths instead of merging
    pub ovr_config: bool,
    /// Store bare alias keys instead of `alias/*` wildcards
    pub use_indexes: bool,
    /// TypeScript support; auto-detected when the package is installed
    pub dts: bool,
    /// Suppress informational console output
    pub silent: bool,
    /// Project root path
    pub root: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dir: "src".to_string(),
            prefix: "@".to_string(),
            deep: true,
            depth: 1,
            create_global_alias: true,
            create_log: false,
            log_path: "src/logs".to_string(),
            adjust_duplicates: false,
            use_absolute: false,
            use_config: true,
            ovr_config: false,
            use_indexes: false,
            dts: false,
            silent: true,
            root: std::env::current_dir()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_else(|_| ".".to_string()),
        }
    }
}

/// Minimal skeleton substituted when the IDE config file is missing or has
/// no usable `compilerOptions`.
pub fn ide_config_skeleton() -> Value {
    json!({
        "compilerOptions": {
            "baseUrl": ".",
            "paths": {}
        }
    })
}
