//! multimat Core - bulk editing for groups of similar records
//!
//! Wires the property, diff, propagation and cache crates into a per-group
//! session a host view drives once per interaction cycle:
//! - Tracks an ordered, possibly sparse group of members
//! - Keeps per-member auxiliaries in step with the group
//! - Pushes edits made on one member to the rest of the group
//! - Loads configuration and installs logging
//!
//! # Example
//!
//! ```rust,ignore
//! use multimat_core::{EngineConfig, FramePhase, Group, GroupSession};
//!
//! let config = EngineConfig::from_path("multimat.toml")?;
//! multimat_core::logging::init(&config.log_filter)?;
//!
//! let mut session = GroupSession::new(config);
//! if session.prepare(&group, FramePhase::Layout, &mut editors) {
//!     // host draws editors, user changes the control...
//!     let report = session.control_edited(control, &group, &store)?;
//!     for failed in &report.failed {
//!         tracing::warn!(member = %failed.member, "not updated");
//!     }
//! }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod group;
pub mod logging;
pub mod session;

pub use config::EngineConfig;
pub use error::{ConfigError, EngineError};
pub use group::Group;
pub use session::{FramePhase, GroupSession};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a session
    pub use crate::{EngineConfig, EngineError, FramePhase, Group, GroupSession};
    pub use multimat_cache::{AuxiliaryFactory, CacheError};
    pub use multimat_propagate::PropagationReport;
    pub use multimat_property::{MemberId, PropertySource, PropertyValue, RecordStore};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
