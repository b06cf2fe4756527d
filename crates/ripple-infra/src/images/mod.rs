//! Image store implementations.

mod memory;

pub use memory::InMemoryImageStore;
