//! Asset handles
//!
//! Reference-counted handles for assets shared between entities.

mod handle;

pub use handle::AssetHandle;
