pub mod backend;
pub mod watched;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use watched::{WatchedStore, WATCHED_KEY};
