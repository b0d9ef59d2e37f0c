// Core functionality
pub mod error;
pub mod options;
pub mod paths;

// Directory pipeline
pub mod scan;
pub mod store;
pub mod watch;

// Persistence
pub mod persist {
    pub mod ide_config;
    pub mod json;
    pub mod log;
}

// Orchestration & UI
pub mod cli;
pub mod generator;

// Re-export commonly used types
pub use cli::Cli;
pub use error::{Error, Result};
pub use generator::Generator;
pub use options::{Options, SessionMode, MODULE_NAME};
pub use scan::scan_directories;
pub use store::{AliasMapping, AliasStore, Snapshot};
pub use watch::{DirEvent, DirectoryWatcher};
