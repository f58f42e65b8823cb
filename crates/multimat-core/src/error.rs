//! Error types for multimat Core
//!
//! Every lower-level error converts into [`EngineError`], so hosts can use a
//! single `?` chain around a session.

use multimat_cache::CacheError;
use multimat_diff::DiffError;
use multimat_propagate::PropagateError;
use multimat_property::{MemberId, PropertyError};
use std::path::PathBuf;

/// Main engine error type
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Property access on the control or reference failed
    #[error("property error: {0}")]
    Property(#[from] PropertyError),

    /// Change set could not be computed
    #[error("diff failed: {0}")]
    Diff(#[from] DiffError),

    /// Identity retarget failed
    #[error("propagation failed: {0}")]
    Propagate(#[from] PropagateError),

    /// Auxiliary construction failed
    #[error("cache error: {0}")]
    Cache(#[from] CacheError),

    /// The edited control is a sentinel and must not drive propagation
    #[error("control {0} is excluded from editing")]
    ExcludedControl(MemberId),
}

impl EngineError {
    /// Whether the error came from caller input rather than member data
    #[inline]
    #[must_use]
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::Diff(DiffError::InvalidArgument(_))
                | Self::Propagate(PropagateError::Excluded(_))
                | Self::ExcludedControl(_)
        )
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Contents are not a valid configuration
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// Configuration has no TOML form
    #[error("cannot serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// Log subscriber could not be installed
    #[error("cannot install log subscriber: {0}")]
    Logging(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_error_display() {
        let member = MemberId::new();
        let err = EngineError::ExcludedControl(member);
        assert!(err.to_string().contains(&member.to_string()));
    }

    #[test]
    fn lower_errors_convert() {
        let member = MemberId::new();
        let err: EngineError = CacheError::construction_failure(member, "gone").into();
        assert!(matches!(err, EngineError::Cache(_)));
        assert!(!err.is_caller_error());

        let err: EngineError = PropagateError::Excluded(member).into();
        assert!(err.is_caller_error());

        let err: EngineError = DiffError::InvalidArgument("no reference".into()).into();
        assert!(err.is_caller_error());

        let err: EngineError = PropertyError::NotFound(member).into();
        assert!(err.to_string().starts_with("property error"));
    }

    #[test]
    fn io_error_names_path() {
        let err = ConfigError::Io {
            path: PathBuf::from("/nowhere/multimat.toml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/nowhere/multimat.toml"));
    }
}
