use std::path::Path;

/// Normalize a filesystem path to a forward-slash string without a
/// trailing separator. All paths held by the generator go through this,
/// so the store's collections agree on one representation.
pub fn normalize_path(path: &Path) -> String {
    normalize_str(&path.to_string_lossy())
}

/// Normalize an already-stringified path.
pub fn normalize_str(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    let trimmed = normalized.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split a normalized path into its non-empty segments.
pub fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Convert an arbitrary string to camelCase, collapsing `-`, `_` and
/// whitespace runs.
pub fn to_camel_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut upper_next = false;
    for c in s.trim().chars() {
        if c == '-' || c == '_' || c.is_whitespace() {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Convert an absolute path to a `./`-prefixed path relative to the first
/// occurrence of the directory name `dir` within it. Falls back to the
/// normalized input when `dir` does not occur in the path.
pub fn to_relative(path: &str, dir: &str) -> String {
    let folders = segments(&normalize_str(path));
    let dir_segments = segments(&normalize_str(dir));

    if dir_segments.is_empty() {
        return normalize_str(path);
    }

    let start = folders
        .windows(dir_segments.len())
        .position(|window| window == dir_segments.as_slice());

    match start {
        Some(i) => format!("./{}", folders[i..].join("/")),
        None => normalize_str(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_str() {
        assert_eq!(normalize_str("/home/user/src/"), "/home/user/src");
        assert_eq!(normalize_str("C:\\dev\\app\\src"), "C:/dev/app/src");
        assert_eq!(normalize_str("/"), "/");
    }

    #[test]
    fn test_to_camel_case() {
        assert_eq!(to_camel_case("modules-user-components"), "modulesUserComponents");
        assert_eq!(to_camel_case("snake_case_name"), "snakeCaseName");
        assert_eq!(to_camel_case(" spaced out "), "spacedOut");
        assert_eq!(to_camel_case("plain"), "plain");
    }

    #[test]
    fn test_to_relative() {
        assert_eq!(
            to_relative("/home/user/project/src/components", "src"),
            "./src/components"
        );
        assert_eq!(to_relative("/home/user/project/src", "src"), "./src");
        // dir not present in the path: returned unchanged
        assert_eq!(to_relative("/home/user/other", "src"), "/home/user/other");
    }

    #[test]
    fn test_to_relative_nested_dir() {
        assert_eq!(
            to_relative("/project/src/app/widgets", "src/app"),
            "./src/app/widgets"
        );
    }
}
