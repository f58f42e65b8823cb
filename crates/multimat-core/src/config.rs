//! Engine configuration
//!
//! Loaded from TOML:
//!
//! ```toml
//! identity_path = "m_Shader"
//! sentinels = ["6f1c1d0e-3c39-4e0c-9a57-0c3f3a4a1b2c"]
//! reference_kinds = ["texture", "texture_2d", "cubemap"]
//! log_filter = "multimat=debug"
//! ```

use crate::error::ConfigError;
use multimat_diff::DiffEngine;
use multimat_propagate::{Exclusion, PropagationEngine, DEFAULT_IDENTITY_PATH};
use multimat_property::{AssetKind, KindFilter, MemberId, PropertyPath};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Engine-wide settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Property holding the member's identity (its shader)
    pub identity_path: PropertyPath,
    /// Members never written, e.g. the host's default material
    pub sentinels: Vec<MemberId>,
    /// Asset kinds whose references may propagate
    pub reference_kinds: Vec<AssetKind>,
    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_filter: String,
}

impl EngineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With identity property path
    #[inline]
    #[must_use]
    pub fn with_identity_path(mut self, path: PropertyPath) -> Self {
        self.identity_path = path;
        self
    }

    /// With an additional sentinel member
    #[inline]
    #[must_use]
    pub fn with_sentinel(mut self, member: MemberId) -> Self {
        if !self.sentinels.contains(&member) {
            self.sentinels.push(member);
        }
        self
    }

    /// With accepted reference kinds
    #[inline]
    #[must_use]
    pub fn with_reference_kinds(mut self, kinds: impl IntoIterator<Item = AssetKind>) -> Self {
        self.reference_kinds = kinds.into_iter().collect();
        self
    }

    /// With log filter
    #[inline]
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] on malformed TOML or unknown values.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// - [`ConfigError::Io`] if the file cannot be read
    /// - [`ConfigError::Parse`] on malformed contents
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "loaded engine config");
        Ok(config)
    }

    /// Render as TOML
    ///
    /// # Errors
    /// Returns [`ConfigError::Serialize`] if a value has no TOML form.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }

    /// Diff engine honoring `reference_kinds`
    #[must_use]
    pub fn diff_engine(&self) -> DiffEngine {
        DiffEngine::new(Arc::new(KindFilter::new(self.reference_kinds.iter().cloned())))
    }

    /// Propagation engine honoring `identity_path` and `sentinels`
    #[must_use]
    pub fn propagation_engine(&self) -> PropagationEngine {
        PropagationEngine::new(
            self.identity_path.clone(),
            self.sentinels.iter().copied().collect::<Exclusion>(),
        )
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            identity_path: PropertyPath::single(DEFAULT_IDENTITY_PATH),
            sentinels: Vec::new(),
            reference_kinds: vec![
                AssetKind::Texture,
                AssetKind::Texture2D,
                AssetKind::Texture3D,
                AssetKind::Texture2DArray,
                AssetKind::Cubemap,
                AssetKind::RenderTexture,
            ],
            log_filter: "info".to_string(),
        }
    }
}
