use crate::error::{Error, Result};
use crate::options::{ide_config_skeleton, Options, IDE_CONFIG_NAME, MODULE_NAME};
use crate::persist::json::{interpret_file_indentation, read_jsonc, write_json};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::error;

/// Which lifecycle step triggered the write. Only a remove pass filters
/// stale generator-owned entries out of the existing config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Init,
    Add,
    Remove,
}

/// Project the generator's path entries into the IDE config file.
///
/// The file on disk is only a projection of the in-memory store: it is
/// re-read before every write so unrelated settings and the original
/// indentation style survive, and the whole current snapshot is written in
/// one call. A failed write is the one fatal path in the subsystem; a
/// half-written IDE config is worse than none.
pub fn write_config(
    gen_paths: &BTreeMap<String, Vec<String>>,
    options: &Options,
    pass: Pass,
) -> Result<()> {
    if !options.use_config {
        return Ok(());
    }

    let file = config_file(options);
    let indentation = interpret_file_indentation(&file);

    let mut json = match read_jsonc(&file) {
        Some(value) if has_compiler_options(&value) => value,
        _ => ide_config_skeleton(),
    };

    let existing = json
        .get("compilerOptions")
        .and_then(|c| c.get("paths"))
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let existing = if pass == Pass::Remove {
        filter_removed(existing, gen_paths, &options.dir)
    } else {
        existing
    };

    let mut merged = if options.ovr_config {
        Map::new()
    } else {
        existing
    };
    for (key, value) in gen_paths {
        merged.insert(
            key.clone(),
            Value::Array(value.iter().map(|v| Value::String(v.clone())).collect()),
        );
    }

    if let Some(compiler_options) = json.get_mut("compilerOptions").and_then(Value::as_object_mut) {
        compiler_options.insert("paths".to_string(), Value::Object(merged));
    }

    write_json(&file, &json, indentation).map_err(|err| {
        error!(
            "[{}] - Cannot write Config {}: {}",
            MODULE_NAME,
            file.display(),
            err
        );
        Error::Config(format!("Cannot write Config: {}", file.display()))
    })
}

pub fn config_file(options: &Options) -> PathBuf {
    PathBuf::from(&options.root).join(format!("{IDE_CONFIG_NAME}.json"))
}

fn has_compiler_options(value: &Value) -> bool {
    value
        .get("compilerOptions")
        .and_then(Value::as_object)
        .map(|c| !c.is_empty())
        .unwrap_or(false)
}

/// Drop entries that point under the managed source directory but are no
/// longer part of the generator's current value set. Entries outside the
/// source directory are hand-written and always preserved verbatim.
fn filter_removed(
    existing: Map<String, Value>,
    gen_paths: &BTreeMap<String, Vec<String>>,
    dir: &str,
) -> Map<String, Value> {
    let managed: Vec<&String> = gen_paths.values().flatten().collect();

    existing
        .into_iter()
        .filter(|(_, value)| {
            let target = value
                .as_array()
                .and_then(|a| a.first())
                .and_then(Value::as_str);
            match target {
                Some(t) if t.contains(dir) => managed.iter().any(|m| m.as_str() == t),
                // malformed or unmanaged entries are preserved
                _ => true,
            }
        })
        .collect()
}
