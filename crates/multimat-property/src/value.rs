//! Typed property values
//!
//! [`PropertyValue`] is the closed set of value kinds a record can hold.
//! Equality is defined once per kind here and reused by diffing and staging.

use crate::member::AssetRef;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned bounding box (center + extents)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub center: [f32; 3],
    pub extents: [f32; 3],
}

/// Wrap behaviour of a curve outside its key range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    #[default]
    Clamp,
    Loop,
    PingPong,
}

/// Single key of an animation curve
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
    pub in_tangent: f32,
    pub out_tangent: f32,
}

impl Keyframe {
    /// Key with flat tangents
    #[inline]
    #[must_use]
    pub fn new(time: f32, value: f32) -> Self {
        Self {
            time,
            value,
            ..Self::default()
        }
    }
}

/// Animation curve; compared structurally (keys and wrap modes)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Curve {
    pub keys: Vec<Keyframe>,
    pub pre_wrap: WrapMode,
    pub post_wrap: WrapMode,
}

impl Curve {
    /// Curve through the given keys with clamped wrapping
    #[inline]
    #[must_use]
    pub fn new(keys: Vec<Keyframe>) -> Self {
        Self {
            keys,
            ..Self::default()
        }
    }
}

/// Kinds the bag can store but never diffs or propagates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpaqueKind {
    Generic,
    Gradient,
    LayerMask,
    FixedBufferSize,
    Character,
}

/// Tag of a [`PropertyValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Boolean,
    Integer,
    Float,
    String,
    Color,
    Vector2,
    Vector3,
    Vector4,
    Rect,
    Bounds,
    Quaternion,
    AnimationCurve,
    AssetReference,
    ExposedReference,
    Enum,
    ArraySize,
    Opaque(OpaqueKind),
}

impl PropertyKind {
    /// Whether values of this kind take part in diffing and propagation
    #[inline]
    #[must_use]
    pub fn is_diffable(self) -> bool {
        !matches!(self, Self::Opaque(_))
    }

    /// Whether values of this kind point at external assets
    #[inline]
    #[must_use]
    pub fn is_reference(self) -> bool {
        matches!(self, Self::AssetReference | Self::ExposedReference)
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Opaque(inner) => write!(f, "opaque({inner:?})"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// Value of a single property
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum PropertyValue {
    Boolean(bool),
    Integer(i64),
    Float(f32),
    String(String),
    /// RGBA
    Color([f32; 4]),
    Vector2([f32; 2]),
    Vector3([f32; 3]),
    Vector4([f32; 4]),
    Rect(Rect),
    Bounds(Bounds),
    /// x, y, z, w
    Quaternion([f32; 4]),
    AnimationCurve(Curve),
    /// Nullable reference to an asset (textures, shaders, ...)
    AssetReference(Option<AssetRef>),
    /// Nullable reference resolved through the host's exposed-reference table
    ExposedReference(Option<AssetRef>),
    /// Index into the property's enum options
    Enum(i32),
    /// Element count of an array property
    ArraySize(usize),
    /// Value the engine does not model
    Opaque(OpaqueKind),
}

impl PropertyValue {
    /// Tag of this value
    #[must_use]
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Boolean(_) => PropertyKind::Boolean,
            Self::Integer(_) => PropertyKind::Integer,
            Self::Float(_) => PropertyKind::Float,
            Self::String(_) => PropertyKind::String,
            Self::Color(_) => PropertyKind::Color,
            Self::Vector2(_) => PropertyKind::Vector2,
            Self::Vector3(_) => PropertyKind::Vector3,
            Self::Vector4(_) => PropertyKind::Vector4,
            Self::Rect(_) => PropertyKind::Rect,
            Self::Bounds(_) => PropertyKind::Bounds,
            Self::Quaternion(_) => PropertyKind::Quaternion,
            Self::AnimationCurve(_) => PropertyKind::AnimationCurve,
            Self::AssetReference(_) => PropertyKind::AssetReference,
            Self::ExposedReference(_) => PropertyKind::ExposedReference,
            Self::Enum(_) => PropertyKind::Enum,
            Self::ArraySize(_) => PropertyKind::ArraySize,
            Self::Opaque(inner) => PropertyKind::Opaque(*inner),
        }
    }

    /// Whether this value takes part in diffing
    #[inline]
    #[must_use]
    pub fn is_diffable(&self) -> bool {
        self.kind().is_diffable()
    }

    /// Referenced asset, for reference kinds holding a non-null value
    #[inline]
    #[must_use]
    pub fn asset_ref(&self) -> Option<&AssetRef> {
        match self {
            Self::AssetReference(r) | Self::ExposedReference(r) => r.as_ref(),
            _ => None,
        }
    }

    /// Convenience constructor for a texture-like reference slot
    #[inline]
    #[must_use]
    pub fn reference(asset: AssetRef) -> Self {
        Self::AssetReference(Some(asset))
    }

    /// Change-detection equality
    ///
    /// Same as `==` except that a NaN component matches a NaN component, so a
    /// value read back unchanged never counts as an edit.
    #[must_use]
    pub fn same_as(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => same_float(*a, *b),
            (Self::Vector2(a), Self::Vector2(b)) => same_floats(a, b),
            (Self::Vector3(a), Self::Vector3(b)) => same_floats(a, b),
            (Self::Color(a), Self::Color(b))
            | (Self::Vector4(a), Self::Vector4(b))
            | (Self::Quaternion(a), Self::Quaternion(b)) => same_floats(a, b),
            (Self::Rect(a), Self::Rect(b)) => same_floats(
                &[a.x, a.y, a.width, a.height],
                &[b.x, b.y, b.width, b.height],
            ),
            (Self::Bounds(a), Self::Bounds(b)) => {
                same_floats(&a.center, &b.center) && same_floats(&a.extents, &b.extents)
            }
            (Self::AnimationCurve(a), Self::AnimationCurve(b)) => {
                a.pre_wrap == b.pre_wrap
                    && a.post_wrap == b.post_wrap
                    && a.keys.len() == b.keys.len()
                    && a.keys.iter().zip(&b.keys).all(|(x, y)| {
                        same_floats(
                            &[x.time, x.value, x.in_tangent, x.out_tangent],
                            &[y.time, y.value, y.in_tangent, y.out_tangent],
                        )
                    })
            }
            _ => self == other,
        }
    }
}

#[inline]
#[allow(clippy::float_cmp)]
fn same_float(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn same_floats(a: &[f32], b: &[f32]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_float(*x, *y))
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f32> for PropertyValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}
