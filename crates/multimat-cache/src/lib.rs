//! multimat Group Cache
//!
//! Keeps per-member auxiliary objects in step with a group that may be
//! resized, reordered or re-populated between interaction cycles.
//!
//! # Core Concepts
//!
//! - [`GroupCache`]: One auxiliary per non-empty slot, Valid or Invalid
//! - [`AuxiliaryFactory`]: Builds an auxiliary for a member
//! - [`GroupShape`] / [`ShapeFingerprint`]: Cheap group change detection
//! - [`ShaderNameCache`]: Filtered, read-through list of selectable shaders
//!
//! # Example
//!
//! ```rust,ignore
//! use multimat_cache::GroupCache;
//!
//! let mut cache = GroupCache::new();
//! if !cache.validate(&slots) {
//!     cache.rebuild(&slots, &mut factory);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod group_cache;
mod shader_names;
mod shape;

pub use group_cache::{AuxiliaryFactory, CacheError, CacheState, GroupCache};
pub use shader_names::{is_selectable, ShaderCatalog, ShaderNameCache};
pub use shape::{GroupShape, ShapeFingerprint};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
