//! multimat Property System
//!
//! Typed, path-addressed properties of group members, with staged
//! all-or-nothing writes.
//!
//! # Core Concepts
//!
//! - [`PropertyValue`]: Closed set of supported value kinds
//! - [`PropertyPath`]: Dot-separated addressing within a record
//! - [`PropertyBag`]: Staging handle over one member (`get`/`set`/`commit`)
//! - [`PropertySource`]: Opens bags for members
//! - [`RecordStore`]: In-memory source backed by [`PropertyRecord`]s
//! - [`ReferenceFilter`]: Which asset references may propagate
//!
//! # Example
//!
//! ```rust,ignore
//! use multimat_property::{PropertyBag, PropertyRecord, PropertySource, RecordStore};
//!
//! let store = RecordStore::new();
//! let member = store.insert(PropertyRecord::new().with("_Glossiness".parse()?, 0.5f32));
//!
//! let mut bag = store.open(member)?;
//! bag.set(&"_Glossiness".parse()?, 0.8f32.into())?;
//! bag.commit()?;
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod bag;
mod filter;
mod member;
mod path;
mod store;
mod value;

pub use bag::{PropertyBag, PropertyError, PropertySource};
pub use filter::{KindFilter, ReferenceFilter, TextureFilter};
pub use member::{AssetId, AssetKind, AssetRef, MemberId};
pub use path::{PathError, PropertyPath};
pub use store::{PropertyRecord, RecordStore, StagedBag};
pub use value::{Bounds, Curve, Keyframe, OpaqueKind, PropertyKind, PropertyValue, Rect, WrapMode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
