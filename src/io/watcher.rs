// Watches the content override directory and reports page changes

use crate::error::WatchError;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use tracing::{debug, warn};

pub enum WatchEvent {
    Changed(PathBuf),
    Error(String),
}

pub struct ContentWatcher {
    // dropping the watcher stops the notify thread
    _watcher: RecommendedWatcher,
    events: Receiver<WatchEvent>,
}

impl ContentWatcher {
    /// Start watching `dir`. `wake` runs on the notify thread after each
    /// relevant event, typically to request a repaint.
    pub fn spawn<F>(dir: &Path, wake: F) -> Result<Self, WatchError>
    where
        F: Fn() + Send + 'static,
    {
        if !dir.is_dir() {
            return Err(WatchError::MissingDir(dir.to_path_buf()));
        }

        let (tx, rx) = channel();
        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => match changed_page(&event) {
                    Some(path) => WatchEvent::Changed(path),
                    None => return,
                },
                Err(e) => WatchEvent::Error(e.to_string()),
            };
            if tx.send(event).is_ok() {
                wake();
            }
        })?;
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
        debug!("Watching {}", dir.display());

        Ok(Self {
            _watcher: watcher,
            events: rx,
        })
    }

    /// Drain pending events; returns true if any page changed
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;
        for event in self.events.try_iter() {
            match event {
                WatchEvent::Changed(path) => {
                    debug!("Page changed: {}", path.display());
                    changed = true;
                }
                WatchEvent::Error(e) => warn!("File watcher error: {}", e),
            }
        }
        changed
    }
}

/// The Markdown file an event touched, ignoring reads and other files
fn changed_page(event: &Event) -> Option<PathBuf> {
    if matches!(event.kind, EventKind::Access(_)) {
        return None;
    }
    event
        .paths
        .iter()
        .find(|path| path.extension().is_some_and(|ext| ext == "md"))
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_markdown_changes_are_reported() {
        let modified = event(EventKind::Modify(ModifyKind::Any), "/pages/contact.md");
        assert_eq!(changed_page(&modified), Some(PathBuf::from("/pages/contact.md")));

        let created = event(EventKind::Create(CreateKind::File), "/pages/app-info.md");
        assert!(changed_page(&created).is_some());
    }

    #[test]
    fn test_other_files_and_reads_are_ignored() {
        let swap = event(EventKind::Modify(ModifyKind::Any), "/pages/.contact.md.swp");
        assert_eq!(changed_page(&swap), None);

        let read = event(EventKind::Access(AccessKind::Any), "/pages/contact.md");
        assert_eq!(changed_page(&read), None);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let result = ContentWatcher::spawn(Path::new("/nonexistent/guide/pages"), || {});
        assert!(matches!(result, Err(WatchError::MissingDir(_))));
    }
}
