use crate::error::Result;
use crate::options::{Options, SessionMode, MODULE_NAME};
use crate::paths::normalize_path;
use crate::persist::ide_config::{write_config, Pass};
use crate::persist::log::write_log;
use crate::scan::scan_directories;
use crate::store::{AliasMapping, AliasStore, Snapshot};
use crate::watch::{DirEvent, DirectoryWatcher};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread;
use tracing::{error, info};

/// Owns the configuration, the alias store and the watch session, and
/// exposes the lifecycle the host build tool drives: construct, `init()`,
/// then synchronous snapshot reads of `aliases()`.
pub struct Generator {
    options: Options,
    full_path: PathBuf,
    full_path_str: String,
    store: Arc<Mutex<AliasStore>>,
    searched: bool,
    // lives until process exit; never joined
    _watch_thread: Option<thread::JoinHandle<()>>,
}

impl Generator {
    /// Build a generator for the given session. In a serve session the
    /// watcher starts immediately, before `init()`; directory events that
    /// arrive ahead of the initial scan are safe because store adds are
    /// idempotent.
    pub fn new(mode: SessionMode, options: Options) -> Result<Self> {
        let mut options = options;
        detect_typescript(&mut options);

        let full_path = Path::new(&options.root).join(&options.dir);
        let full_path_str = normalize_path(&full_path);

        let store = Arc::new(Mutex::new(AliasStore::new(
            options.clone(),
            full_path_str.clone(),
        )));

        let mut generator = Self {
            options,
            full_path,
            full_path_str,
            store,
            searched: false,
            _watch_thread: None,
        };

        if mode == SessionMode::Serve {
            generator.observe()?;
        }

        Ok(generator)
    }

    /// One-shot scan, store seeding and initial persistence. Idempotent: a
    /// guard flag makes repeated calls no-ops.
    pub fn init(&mut self) -> Result<()> {
        if self.searched {
            return Ok(());
        }

        let directories = scan_directories(&self.full_path, self.options.deep, self.options.depth)?;

        let snapshot = {
            let mut store = self.lock_store();
            store.add_all(&directories);
            if self.options.create_global_alias {
                store.add(&self.full_path_str);
            }
            store.snapshot()
        };

        write_log(&snapshot.aliases, &self.options);
        write_config(&snapshot.paths, &self.options, Pass::Init)?;

        self.searched = true;
        info!(
            "[{}] - {} aliases generated under {}",
            MODULE_NAME,
            snapshot.aliases.len(),
            self.full_path_str
        );
        Ok(())
    }

    /// Current alias list, host-facing snapshot.
    pub fn aliases(&self) -> Vec<AliasMapping> {
        self.lock_store().aliases().to_vec()
    }

    /// Merge with aliases the host already configured; the host's own
    /// entries take precedence by being listed first.
    pub fn merged_aliases(&self, host_aliases: &[AliasMapping]) -> Vec<AliasMapping> {
        let mut merged = host_aliases.to_vec();
        merged.extend(self.aliases());
        merged
    }

    pub fn snapshot(&self) -> Snapshot {
        self.lock_store().snapshot()
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Subscribe to directory add/remove events and route them through the
    /// store, re-persisting after every mutation. The consumer thread is
    /// the only mutator; one event is fully processed before the next.
    fn observe(&mut self) -> Result<()> {
        let (watcher, rx) =
            DirectoryWatcher::start(&self.full_path, self.options.deep, self.options.depth)?;
        let store = Arc::clone(&self.store);
        let options = self.options.clone();

        let handle = thread::spawn(move || {
            // keeps the filesystem subscription alive for the session
            let _watcher = watcher;

            for event in rx {
                let (pass, path) = match &event {
                    DirEvent::Added(path) => (Pass::Add, path.clone()),
                    DirEvent::Removed(path) => (Pass::Remove, path.clone()),
                };

                let snapshot = {
                    let mut store = match store.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => poisoned.into_inner(),
                    };
                    match &event {
                        DirEvent::Added(path) => store.add(path),
                        DirEvent::Removed(path) => store.remove(path),
                    }
                    store.snapshot()
                };

                write_log(&snapshot.aliases, &options);
                if let Err(err) = write_config(&snapshot.paths, &options, pass) {
                    // an inconsistent IDE config is worse than a dead session
                    error!("[{}] - {}", MODULE_NAME, err);
                    std::process::exit(1);
                }

                match pass {
                    Pass::Remove => info!("[{}] - Removed path: {}", MODULE_NAME, path),
                    _ => info!("[{}] - Generated new path: {}", MODULE_NAME, path),
                }
            }
        });

        self._watch_thread = Some(handle);
        Ok(())
    }

    fn lock_store(&self) -> MutexGuard<'_, AliasStore> {
        match self.store.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

/// `dts` defaults on when the project carries a TypeScript install.
fn detect_typescript(options: &mut Options) {
    if !options.dts {
        options.dts = Path::new(&options.root)
            .join("node_modules")
            .join("typescript")
            .exists();
    }
    info!(
        "[{}] - {}",
        MODULE_NAME,
        if options.dts {
            "TypeScript detected"
        } else {
            "TypeScript not found, JS only"
        }
    );
}
