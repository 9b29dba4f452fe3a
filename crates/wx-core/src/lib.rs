#![deny(missing_docs)]
#![doc = "Shared primitives for the weather chain workspace: the structured error type, the seedable RNG handle and canonical JSON helpers."]

pub mod errors;
pub mod rng;
/// Canonical JSON encoding helpers.
pub mod serde;

pub use errors::{ErrorInfo, WxError};
pub use rng::{derive_substream_seed, entropy_seed, RngHandle};
pub use crate::serde::to_canonical_json_pretty;
