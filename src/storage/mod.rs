pub mod engine;
pub mod memory;
pub mod persistence;
pub mod table;

pub use engine::EntityStore;
pub use memory::MemoryStore;
pub use persistence::{CatalogSnapshot, SnapshotManager};
pub use table::Table;
