mod watcher;

pub use watcher::ContentWatcher;
