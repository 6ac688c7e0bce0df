//! # ringside-store
//!
//! Reference implementation of the [`ExchangeStore`](ringside_types::ExchangeStore)
//! port, kept entirely in memory.
//!
//! - [`MemoryStore`]: committed state plus [`MemoryStore::begin`], which opens a
//!   [`MemoryTx`] working on a private snapshot. `commit()` publishes it;
//!   dropping the handle rolls back.
//! - [`SharedStore`]: a `Mutex`-guarded store whose
//!   [`transaction`](SharedStore::transaction) helper runs one closure at a
//!   time, giving serial execution across threads.

pub mod memory;
pub mod shared;

pub use memory::{MemoryStore, MemoryTx};
pub use shared::SharedStore;
