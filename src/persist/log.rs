use crate::options::{Options, MODULE_NAME};
use crate::persist::json::{write_json, DEFAULT_INDENTATION};
use crate::store::AliasMapping;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Dump the current alias snapshot to `<log_path>/<module>.json`.
///
/// Purely observational and best-effort: the file is never read back, and a
/// failed write leaves the in-memory alias set authoritative, so failures
/// are logged and swallowed.
pub fn write_log(aliases: &[AliasMapping], options: &Options) {
    if !options.create_log {
        return;
    }

    let folder = resolve_log_dir(options);
    let file = folder.join(format!("{MODULE_NAME}.json"));

    if let Err(err) = fs::create_dir_all(&folder) {
        warn!(
            "[{}] - Could not create log directory {}: {}",
            MODULE_NAME,
            folder.display(),
            err
        );
        return;
    }

    if let Err(err) = write_json(&file, &aliases, DEFAULT_INDENTATION) {
        warn!(
            "[{}] - Could not write log file {}: {}",
            MODULE_NAME,
            file.display(),
            err
        );
    }
}

/// A relative `log_path` is anchored at the project root.
fn resolve_log_dir(options: &Options) -> PathBuf {
    let path = Path::new(&options.log_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        Path::new(&options.root).join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_log_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let options = Options {
            create_log: true,
            log_path: "src/logs".to_string(),
            root: temp_dir.path().to_string_lossy().into_owned(),
            ..Options::default()
        };
        let aliases = vec![AliasMapping {
            find: "@utils".to_string(),
            replacement: "/proj/src/utils".to_string(),
        }];

        write_log(&aliases, &options);

        let file = temp_dir.path().join("src/logs").join(format!("{MODULE_NAME}.json"));
        let content = std::fs::read_to_string(file).unwrap();
        let parsed: Vec<AliasMapping> = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, aliases);
    }

    #[test]
    fn test_write_log_disabled_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let options = Options {
            create_log: false,
            log_path: "logs".to_string(),
            root: temp_dir.path().to_string_lossy().into_owned(),
            ..Options::default()
        };

        write_log(&[], &options);
        assert!(!temp_dir.path().join("logs").exists());
    }
}
