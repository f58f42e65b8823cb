//! Identities for group members and the assets their properties reference

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one member of a group
///
/// Members are owned by the host; equality of two ids is equality of the
/// underlying objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MemberId(pub Uuid);

impl MemberId {
    /// Generate new member ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Raw bytes of the identity
    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for MemberId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MemberId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of an external resource (texture, shader, mesh, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(pub Uuid);

impl AssetId {
    /// Generate new asset ID
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AssetId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Concrete kind of a referenced asset
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Generic texture
    Texture,
    /// 2D texture
    #[serde(rename = "texture_2d")]
    Texture2D,
    /// Volume texture
    #[serde(rename = "texture_3d")]
    Texture3D,
    /// Layered 2D texture
    #[serde(rename = "texture_2d_array")]
    Texture2DArray,
    /// Cube map
    Cubemap,
    /// Render target
    RenderTexture,
    /// Shader program
    Shader,
    /// Material
    Material,
    /// Mesh
    Mesh,
    /// Anything else, by type name
    Other(String),
}

impl AssetKind {
    /// Whether this kind is a texture or one of its sub-kinds
    #[inline]
    #[must_use]
    pub fn is_texture(&self) -> bool {
        matches!(
            self,
            Self::Texture
                | Self::Texture2D
                | Self::Texture3D
                | Self::Texture2DArray
                | Self::Cubemap
                | Self::RenderTexture
        )
    }
}

/// Non-null reference to an external asset
///
/// Two references are equal iff they point at the same asset; the kind is
/// carried along so filters can decide what may propagate.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct AssetRef {
    /// Referenced asset
    pub id: AssetId,
    /// Kind of the referenced asset
    pub kind: AssetKind,
}

impl AssetRef {
    /// Create reference to an asset of the given kind
    #[inline]
    #[must_use]
    pub fn new(id: AssetId, kind: AssetKind) -> Self {
        Self { id, kind }
    }

    /// Reference to a freshly identified asset
    #[inline]
    #[must_use]
    pub fn fresh(kind: AssetKind) -> Self {
        Self::new(AssetId::new(), kind)
    }
}

impl PartialEq for AssetRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl std::hash::Hash for AssetRef {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
