use crate::options::Options;
use clap::Parser;

/// path-aliases - derive import-path aliases from a project's directory tree
#[derive(Parser, Debug)]
#[command(name = "path-aliases")]
#[command(about = "Scans a source tree, derives import-path aliases and keeps the IDE config in sync", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Project root path (default: current directory)
    #[arg(long)]
    pub root: Option<String>,

    /// Source directory name, relative to the root
    #[arg(short, long, default_value = "src")]
    pub dir: String,

    /// Alias prefix symbol
    #[arg(short, long, default_value = "@")]
    pub prefix: String,

    /// Only scan the direct children of the source directory
    #[arg(long)]
    pub shallow: bool,

    /// Subdirectory scan depth
    #[arg(long, default_value_t = 1)]
    pub depth: usize,

    /// Skip the source-root global alias
    #[arg(long)]
    pub no_global_alias: bool,

    /// Write a JSON snapshot of the aliases after every change
    #[arg(long)]
    pub create_log: bool,

    /// Directory the log file is written to
    #[arg(long, default_value = "src/logs")]
    pub log_path: String,

    /// Camel-case-disambiguate colliding alias names
    #[arg(long)]
    pub adjust_duplicates: bool,

    /// Persist absolute paths instead of source-relative ones
    #[arg(long)]
    pub use_absolute: bool,

    /// Do not touch the IDE config file
    #[arg(long)]
    pub no_config: bool,

    /// Overwrite the IDE config paths instead of merging
    #[arg(long)]
    pub ovr_config: bool,

    /// Store bare alias keys instead of wildcard entries
    #[arg(long)]
    pub use_indexes: bool,

    /// Force TypeScript handling on (auto-detected otherwise)
    #[arg(long)]
    pub dts: bool,

    /// Suppress informational output
    #[arg(short, long)]
    pub silent: bool,

    /// Keep running and watch for directory changes
    #[arg(short, long)]
    pub watch: bool,
}

impl Cli {
    pub fn to_options(&self) -> Options {
        let defaults = Options::default();
        Options {
            dir: self.dir.clone(),
            prefix: self.prefix.clone(),
            deep: !self.shallow,
            depth: self.depth,
            create_global_alias: !self.no_global_alias,
            create_log: self.create_log,
            log_path: self.log_path.clone(),
            adjust_duplicates: self.adjust_duplicates,
            use_absolute: self.use_absolute,
            use_config: !self.no_config,
            ovr_config: self.ovr_config,
            use_indexes: self.use_indexes,
            dts: self.dts,
            silent: self.silent,
            root: self.root.clone().unwrap_or(defaults.root),
        }
    }
}
