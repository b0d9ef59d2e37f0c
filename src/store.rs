use crate::options::{Options, MODULE_NAME};
use crate::paths::{normalize_str, segments, to_camel_case, to_relative};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// A single build-tool resolution alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasMapping {
    pub find: String,
    pub replacement: String,
}

/// Owned copy of the store's persisted state, taken under one lock hold so
/// persistence always writes a consistent view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub aliases: Vec<AliasMapping>,
    pub paths: BTreeMap<String, Vec<String>>,
}

/// In-memory source of truth for the generator: the working set of
/// discovered directories and their derived alias mappings.
///
/// `directories`, `aliases` and `paths` are kept mutually consistent by
/// every `add`/`remove`; the raw collections are never handed out.
#[derive(Debug)]
pub struct AliasStore {
    options: Options,
    full_path: String,
    directories: BTreeSet<String>,
    aliases: Vec<AliasMapping>,
    paths: BTreeMap<String, Vec<String>>,
}

impl AliasStore {
    pub fn new(options: Options, full_path: String) -> Self {
        Self {
            options,
            full_path,
            directories: BTreeSet::new(),
            aliases: Vec::new(),
            paths: BTreeMap::new(),
        }
    }

    /// Derive an alias for a directory path and record it.
    ///
    /// Adding a path that is already tracked is a no-op; this is what makes
    /// watcher events arriving before the initial scan completes safe.
    pub fn add(&mut self, path: &str) {
        let corrected = normalize_str(path);
        if self.directories.contains(&corrected) {
            return;
        }

        let folders = self.source_relative_segments(&corrected);
        let last = match folders.last() {
            Some(last) => last.clone(),
            None => return,
        };
        let mut key = format!("{}{}", self.options.prefix, last);

        self.check_for_duplicates(&corrected, &folders);

        if self.aliases.iter().any(|a| a.find == key) {
            warn!(
                "[{}] - Duplicate alias '{}'. Fix the folder structure or enable adjust_duplicates.",
                MODULE_NAME, key
            );

            if self.options.adjust_duplicates && self.options.depth > 1 {
                let dir_segments = segments(&normalize_str(&self.options.dir));
                let name = folders
                    .iter()
                    .filter(|f| !dir_segments.contains(*f))
                    .cloned()
                    .collect::<Vec<_>>()
                    .join("-");
                key = format!("{}{}", self.options.prefix, to_camel_case(&name));
            }
        }

        // The source root itself gets the bare prefix, for `import "@/..."`
        if corrected == self.full_path && self.options.create_global_alias {
            key = self.options.prefix.clone();
        }

        self.directories.insert(corrected.clone());
        self.aliases.push(AliasMapping {
            find: key.clone(),
            replacement: corrected.clone(),
        });

        let config_path = self.config_path(&corrected);
        if self.options.use_indexes {
            self.paths.insert(key, vec![config_path]);
        } else {
            self.paths
                .insert(format!("{key}/*"), vec![format!("{config_path}/*")]);
        }
    }

    /// Batch form of [`add`](Self::add); paths are applied one at a time
    /// against live state, so within-batch key collisions are handled the
    /// same way as collisions with earlier sessions.
    pub fn add_all<I, S>(&mut self, paths: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for path in paths {
            self.add(path.as_ref());
        }
    }

    /// Remove a tracked directory and everything derived from it.
    /// Removing an unknown path is a no-op, not an error.
    pub fn remove(&mut self, path: &str) {
        let corrected = normalize_str(path);
        if !self.directories.remove(&corrected) {
            return;
        }

        self.aliases.retain(|a| a.replacement != corrected);

        // Match path entries by the exact value `add` produced for this
        // directory, respecting the wildcard vs index convention.
        let config_path = self.config_path(&corrected);
        let target = if self.options.use_indexes {
            config_path
        } else {
            format!("{config_path}/*")
        };
        self.paths
            .retain(|_, value| value.first().map(|v| v != &target).unwrap_or(true));
    }

    pub fn is_tracked(&self, path: &str) -> bool {
        self.directories.contains(&normalize_str(path))
    }

    pub fn aliases(&self) -> &[AliasMapping] {
        &self.aliases
    }

    pub fn paths(&self) -> &BTreeMap<String, Vec<String>> {
        &self.paths
    }

    pub fn directory_count(&self) -> usize {
        self.directories.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            aliases: self.aliases.clone(),
            paths: self.paths.clone(),
        }
    }

    /// Path segments relative to the source directory: everything up to and
    /// including the project root is replaced by the configured `dir` name.
    fn source_relative_segments(&self, corrected: &str) -> Vec<String> {
        let relative = match corrected.strip_prefix(&self.full_path) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => {
                format!("{}{}", self.options.dir, rest)
            }
            _ => corrected.to_string(),
        };
        segments(&normalize_str(&relative))
    }

    /// Repeated folder names in one path are a data-quality signal about
    /// the user's layout, independent of alias-key collisions.
    fn check_for_duplicates(&self, initial_path: &str, folders: &[String]) {
        let unique: BTreeSet<&String> = folders.iter().collect();
        if folders.len() != unique.len() {
            let mut sorted = folders.to_vec();
            sorted.sort();
            let duplicates: Vec<String> = sorted
                .windows(2)
                .filter(|w| w[0] == w[1])
                .map(|w| w[0].clone())
                .collect();
            warn!(
                "[{}] - Path '{}' contains multiple folders with the same name: {}",
                MODULE_NAME,
                initial_path,
                duplicates.join(", ")
            );
        }
    }

    fn config_path(&self, corrected: &str) -> String {
        if self.options.use_absolute {
            corrected.to_string()
        } else {
            to_relative(corrected, &self.options.dir)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(adjust: impl FnOnce(&mut Options)) -> AliasStore {
        let mut options = Options {
            root: "/proj".to_string(),
            ..Options::default()
        };
        adjust(&mut options);
        AliasStore::new(options, "/proj/src".to_string())
    }

    #[test]
    fn test_basic_aliases_and_global_alias() {
        let mut s = store(|_| {});
        s.add("/proj/src/components");
        s.add("/proj/src/utils");
        s.add("/proj/src");

        let aliases = s.aliases();
        assert_eq!(
            aliases,
            &[
                AliasMapping {
                    find: "@components".to_string(),
                    replacement: "/proj/src/components".to_string()
                },
                AliasMapping {
                    find: "@utils".to_string(),
                    replacement: "/proj/src/utils".to_string()
                },
                AliasMapping {
                    find: "@".to_string(),
                    replacement: "/proj/src".to_string()
                },
            ]
        );

        assert_eq!(
            s.paths().get("@components/*"),
            Some(&vec!["./src/components/*".to_string()])
        );
        assert_eq!(s.paths().get("@/*"), Some(&vec!["./src/*".to_string()]));
    }

    #[test]
    fn test_single_global_alias_regardless_of_subdirectories() {
        let mut s = store(|_| {});
        s.add("/proj/src/a");
        s.add("/proj/src/b");
        s.add("/proj/src");
        s.add("/proj/src"); // repeated add is a no-op

        let global: Vec<_> = s.aliases().iter().filter(|a| a.find == "@").collect();
        assert_eq!(global.len(), 1);
        assert_eq!(global[0].replacement, "/proj/src");
    }

    #[test]
    fn test_collision_adjusted_to_structure_derived_keys() {
        let mut s = store(|o| {
            o.adjust_duplicates = true;
            o.depth = 2;
        });
        s.add("/proj/src/modules/user/components");
        s.add("/proj/src/modules/order/components");

        let finds: Vec<&str> = s.aliases().iter().map(|a| a.find.as_str()).collect();
        assert_eq!(finds, vec!["@components", "@modulesOrderComponents"]);
        assert_eq!(s.aliases().len(), 2);

        // keys stay unique
        let mut unique = finds.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), finds.len());
    }

    #[test]
    fn test_collision_without_adjustment_keeps_both_mappings() {
        let mut s = store(|o| o.depth = 2);
        s.add("/proj/src/modules/user/components");
        s.add("/proj/src/modules/order/components");

        // accepted footgun: both mappings coexist on the same key
        let same: Vec<_> = s
            .aliases()
            .iter()
            .filter(|a| a.find == "@components")
            .collect();
        assert_eq!(same.len(), 2);
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut s = store(|_| {});
        s.add("/proj/src/components");
        let before = s.snapshot();
        let dirs_before = s.directory_count();

        s.add("/proj/src/utils");
        s.remove("/proj/src/utils");

        assert_eq!(s.snapshot(), before);
        assert_eq!(s.directory_count(), dirs_before);
    }

    #[test]
    fn test_remove_unknown_path_is_noop() {
        let mut s = store(|_| {});
        s.add("/proj/src/components");
        let before = s.snapshot();

        s.remove("/proj/src/never-added");

        assert_eq!(s.snapshot(), before);
    }

    #[test]
    fn test_use_indexes_and_absolute_paths() {
        let mut s = store(|o| {
            o.use_indexes = true;
            o.use_absolute = true;
        });
        s.add("/proj/src/components");

        assert_eq!(
            s.paths().get("@components"),
            Some(&vec!["/proj/src/components".to_string()])
        );

        s.remove("/proj/src/components");
        assert!(s.paths().is_empty());
        assert!(s.aliases().is_empty());
    }

    #[test]
    fn test_duplicate_segment_path_still_gets_alias() {
        let mut s = store(|o| o.depth = 3);
        s.add("/proj/src/shared/utils/shared");
        assert_eq!(s.aliases().len(), 1);
        assert_eq!(s.aliases()[0].find, "@shared");
    }

    #[test]
    fn test_path_outside_source_root_uses_own_segments() {
        let mut s = store(|_| {});
        s.add("/elsewhere/lib");
        assert_eq!(s.aliases()[0].find, "@lib");
        assert_eq!(s.aliases()[0].replacement, "/elsewhere/lib");
    }
}
