use std::ffi::OsString;
use std::path::Path;
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// Watches the user directory file so the editor host can refresh its snapshot.
pub struct DirectoryWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl DirectoryWatcher {
    /// Start watching `file`.
    ///
    /// The parent directory is watched rather than the file itself, because
    /// editors and sync tools usually replace files instead of writing in place.
    pub fn start(file: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let file_name: Option<OsString> = file.file_name().map(|n| n.to_os_string());
        let parent = match file.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => Path::new(".").to_path_buf(),
        };

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let Ok(event) = result else {
                    return;
                };
                if !matches!(
                    event.kind,
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                ) {
                    return;
                }
                let touches_file = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == file_name);
                if touches_file {
                    let _ = tx.send(());
                }
            },
            Config::default(),
        )?;

        watcher.watch(&parent, RecursiveMode::NonRecursive)?;
        Ok(DirectoryWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking: true if the file changed since the last poll.
    /// Bursts of events collapse into one.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}
