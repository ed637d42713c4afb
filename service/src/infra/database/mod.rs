//! [`Database`]-related implementations.

#[cfg(feature = "memory")]
pub mod memory;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Database operation.
pub use common::Handler as Database;

/// [`Database`] error.
#[derive(Clone, Copy, Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "memory")]
    /// [`Memory`] error.
    #[display("`Memory` database error: {_0}")]
    Memory(memory::Error),
}
