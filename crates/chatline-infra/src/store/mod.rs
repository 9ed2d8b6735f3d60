//! Message store implementations.

pub mod memory;

pub use memory::InMemoryMessageStore;
