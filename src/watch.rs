use crate::error::{Error, Result};
use crate::options::MODULE_NAME;
use crate::paths::{normalize_path, normalize_str, segments};
use notify_debouncer_full::{
    new_debouncer,
    notify::{
        event::{ModifyKind, RenameMode},
        EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    },
    DebounceEventResult, DebouncedEvent, Debouncer, FileIdMap,
};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;
use tracing::warn;

const DEBOUNCE: Duration = Duration::from_millis(500);

/// A discrete directory change observed after the initial scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirEvent {
    Added(String),
    Removed(String),
}

/// Long-lived filesystem subscription for a development session.
///
/// Raw notify events are classified into [`DirEvent`]s and pushed into a
/// single-consumer channel; the consumer is the only store mutator, so one
/// event is fully processed before the next. The handle is never explicitly
/// closed; its lifetime is tied to the session.
pub struct DirectoryWatcher {
    _debouncer: Debouncer<RecommendedWatcher, FileIdMap>,
}

impl DirectoryWatcher {
    pub fn start(full_path: &Path, deep: bool, depth: usize) -> Result<(Self, Receiver<DirEvent>)> {
        let (tx, rx) = mpsc::channel();
        let root = normalize_path(full_path);
        let max_depth = if deep { depth } else { 1 };

        let mut debouncer = new_debouncer(
            DEBOUNCE,
            None,
            move |result: DebounceEventResult| match result {
                Ok(events) => {
                    for event in route_events(&events, &root, max_depth) {
                        let _ = tx.send(event);
                    }
                }
                Err(errors) => {
                    for error in errors {
                        warn!("[{}] - Watch error: {}", MODULE_NAME, error);
                    }
                }
            },
        )
        .map_err(|e| Error::Watch(format!("Failed to create watcher: {e}")))?;

        let mode = if deep {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer
            .watcher()
            .watch(full_path, mode)
            .map_err(|e| Error::Watch(format!("Failed to watch {}: {e}", full_path.display())))?;

        Ok((Self { _debouncer: debouncer }, rx))
    }
}

/// Classify debounced notify events into directory add/remove events.
///
/// Creations are only forwarded when the path is still a directory on disk;
/// removals are forwarded unconditionally and rely on the store treating
/// untracked paths as a no-op. Renames count as remove + add.
fn route_events(events: &[DebouncedEvent], root: &str, max_depth: usize) -> Vec<DirEvent> {
    let mut out = Vec::new();

    for event in events {
        match event.kind {
            EventKind::Create(_) => {
                for path in &event.paths {
                    push_added(&mut out, path, root, max_depth);
                }
            }
            EventKind::Remove(_) => {
                for path in &event.paths {
                    push_removed(&mut out, path, root, max_depth);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                if let [from, to] = event.paths.as_slice() {
                    push_removed(&mut out, from, root, max_depth);
                    push_added(&mut out, to, root, max_depth);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                for path in &event.paths {
                    push_removed(&mut out, path, root, max_depth);
                }
            }
            EventKind::Modify(ModifyKind::Name(RenameMode::To)) => {
                for path in &event.paths {
                    push_added(&mut out, path, root, max_depth);
                }
            }
            _ => {}
        }
    }

    out
}

fn push_added(out: &mut Vec<DirEvent>, path: &Path, root: &str, max_depth: usize) {
    let normalized = normalize_path(path);
    if path.is_dir() && within_depth(&normalized, root, max_depth) {
        out.push(DirEvent::Added(normalized));
    }
}

fn push_removed(out: &mut Vec<DirEvent>, path: &Path, root: &str, max_depth: usize) {
    let normalized = normalize_path(path);
    if within_depth(&normalized, root, max_depth) {
        out.push(DirEvent::Removed(normalized));
    }
}

/// A path is in scope when it sits at most `max_depth` levels below the
/// watched source root.
fn within_depth(path: &str, root: &str, max_depth: usize) -> bool {
    let normalized = normalize_str(path);
    match normalized.strip_prefix(root) {
        Some(rest) if rest.is_empty() => true,
        Some(rest) if rest.starts_with('/') => segments(rest).len() <= max_depth,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_depth() {
        assert!(within_depth("/proj/src", "/proj/src", 1));
        assert!(within_depth("/proj/src/components", "/proj/src", 1));
        assert!(!within_depth("/proj/src/a/b", "/proj/src", 1));
        assert!(within_depth("/proj/src/a/b", "/proj/src", 2));
        assert!(!within_depth("/proj/other/a", "/proj/src", 3));
        // prefix must end on a path boundary
        assert!(!within_depth("/proj/srcx/a", "/proj/src", 3));
    }
}
