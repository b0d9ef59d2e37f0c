use crate::error::Result;
use crate::options::MODULE_NAME;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Indentation style of a JSON config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indentation {
    Spaces(usize),
    Tabs,
}

pub const DEFAULT_INDENTATION: Indentation = Indentation::Spaces(4);

impl Indentation {
    fn as_str(&self) -> String {
        match self {
            Indentation::Tabs => "\t".to_string(),
            Indentation::Spaces(n) => " ".repeat(*n),
        }
    }
}

/// Read a JSON file tolerant of comments and trailing commas.
///
/// A missing or unparseable file is recovered locally: the caller gets
/// `None` and substitutes its default skeleton.
pub fn read_jsonc(path: &Path) -> Option<Value> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!("[{}] - File {} could not be read: {}", MODULE_NAME, path.display(), err);
            return None;
        }
    };

    match jsonc_parser::parse_to_serde_value(&text, &Default::default()) {
        Ok(value) => value,
        Err(err) => {
            warn!("[{}] - File {} could not be parsed: {}", MODULE_NAME, path.display(), err);
            None
        }
    }
}

/// Infer a file's indentation from its second line: a leading tab wins,
/// otherwise the count of leading spaces. Falls back to 4 spaces when the
/// file is unreadable or the line gives nothing to go on.
pub fn interpret_file_indentation(path: &Path) -> Indentation {
    match fs::read_to_string(path) {
        Ok(content) => detect_indentation(&content),
        Err(_) => DEFAULT_INDENTATION,
    }
}

pub fn detect_indentation(content: &str) -> Indentation {
    let second_line = match content.lines().nth(1) {
        Some(line) => line,
        None => return DEFAULT_INDENTATION,
    };

    if second_line.starts_with('\t') {
        return Indentation::Tabs;
    }

    let spaces = second_line.chars().take_while(|c| *c == ' ').count();
    if spaces == 0 || spaces == second_line.len() {
        return DEFAULT_INDENTATION;
    }
    Indentation::Spaces(spaces)
}

/// Serialize `data` with the given indentation and write it in one call.
pub fn write_json<T: Serialize>(path: &Path, data: &T, indentation: Indentation) -> Result<()> {
    let indent = indentation.as_str();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
    let mut buf = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    data.serialize(&mut serializer)?;
    buf.push(b'\n');
    fs::write(path, buf)?;

    let name = path.file_name().map(|n| n.to_string_lossy().into_owned());
    info!(
        "[{}] - File {} written",
        MODULE_NAME,
        name.unwrap_or_else(|| path.display().to_string())
    );
    Ok(())
}
