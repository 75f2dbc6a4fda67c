pub mod config_io;
pub mod journal;
pub mod persist;
pub mod storage;
pub mod watcher;
