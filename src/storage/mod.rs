pub mod file;
pub mod memory;
pub mod traits;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use traits::{KeyValueStore, KeyValueStoreExt, StoreError};
