pub mod config_io;
pub mod directory;
pub mod watcher;

pub use directory::{DirectoryError, UserDirectory};
