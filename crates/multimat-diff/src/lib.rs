//! multimat Diff Engine
//!
//! Computes which properties must change on group members to match a control.
//!
//! # Core Concepts
//!
//! - [`DiffEngine`]: Control-versus-reference comparison
//! - [`DiffMode`]: Delta (only differing values) or sync-all (full snapshot)
//! - [`ChangeSet`]: Immutable path → value mapping to propagate
//! - [`select_reference`]: Reference member selection policy
//!
//! # Example
//!
//! ```rust,ignore
//! use multimat_diff::{select_reference, DiffEngine, DiffMode};
//!
//! let reference = select_reference(&slots, control_id, |_| false)?;
//! let control = store.open(control_id)?;
//! let reference = store.open(reference)?;
//!
//! let changes = DiffEngine::default().compute(&control, Some(&reference), DiffMode::Delta)?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod change_set;
mod engine;
mod reference;

pub use change_set::ChangeSet;
pub use engine::{DiffEngine, DiffError, DiffMode};
pub use reference::select_reference;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
