//! Convenience re-exports for common types.
//!
//! A single import brings the whole working set into scope:
//!
//! ```rust
//! use fxnum::prelude::*;
//! ```

pub use crate::error::{FxError, Result};
pub use crate::family::FxFamily;
pub use crate::format::BinaryRadix;
pub use crate::number::FxNum;
