//! multimat Propagation Engine
//!
//! Applies change sets to every member of a group.
//!
//! # Core Concepts
//!
//! - [`PropagationEngine`]: Identity sync, then batch staging and batch commit
//! - [`Exclusion`]: Sentinel members that are never written
//! - [`PropagationReport`]: Skipped pairs and failed members, for host warnings
//!
//! # Example
//!
//! ```rust,ignore
//! use multimat_propagate::{Exclusion, PropagationEngine, PropagationReport};
//!
//! let exclusion = Exclusion::none().with(default_material);
//! let engine = PropagationEngine::new("m_Shader".parse()?, exclusion);
//!
//! let mut report = PropagationReport::new();
//! engine.sync_identity(&control_bag, group.slots(), &store, &mut report);
//! let changes = diff.compute(&control_bag, Some(&store.open(reference)?), DiffMode::Delta)?;
//! engine.apply(&changes, &control_bag, group.slots(), &store, &mut report);
//!
//! for failure in &report.failed {
//!     eprintln!("{} was not updated: {}", failure.member, failure.error);
//! }
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod engine;
mod exclusion;
mod report;

pub use engine::{PropagateError, PropagationEngine, DEFAULT_IDENTITY_PATH};
pub use exclusion::Exclusion;
pub use report::{FailedMember, PropagationReport, SkippedProperty};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
