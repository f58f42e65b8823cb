//! Testing utilities for multimat workspace
//!
//! Material-shaped records used across the workspace tests.

#![allow(missing_docs)]
#![allow(clippy::missing_panics_doc)]

use multimat_property::{
    AssetKind, AssetRef, Curve, Keyframe, MemberId, OpaqueKind, PropertyPath, PropertyRecord,
    PropertyValue, RecordStore,
};

pub const SHADER: &str = "m_Shader";
pub const NAME: &str = "m_Name";
pub const GLOSSINESS: &str = "_Glossiness";
pub const METALLIC: &str = "_Metallic";
pub const COLOR: &str = "_Color";
pub const MAIN_TEX: &str = "_MainTex";
pub const BUMP_MAP: &str = "_BumpMap";
pub const CULL: &str = "_Cull";
pub const QUEUE: &str = "m_CustomRenderQueue";
pub const EMISSION: &str = "_EmissionEnabled";
pub const TILING: &str = "_MainTex_ST";
pub const FADE: &str = "_FadeCurve";
pub const TEX_COUNT: &str = "m_SavedProperties.m_TexEnvs.Array.size";
pub const GRADIENT: &str = "_RampGradient";

/// Parse a path literal
#[must_use]
pub fn path(s: &str) -> PropertyPath {
    s.parse().expect("fixture path literal")
}

/// Shared assets for a family of material records
#[derive(Debug, Clone)]
pub struct MaterialFixture {
    pub shader: AssetRef,
    pub main_tex: AssetRef,
}

impl Default for MaterialFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl MaterialFixture {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shader: AssetRef::fresh(AssetKind::Shader),
            main_tex: AssetRef::fresh(AssetKind::Texture2D),
        }
    }

    /// Record with the standard material schema
    #[must_use]
    pub fn record(&self) -> PropertyRecord {
        PropertyRecord::new()
            .with(path(SHADER), PropertyValue::reference(self.shader.clone()))
            .with(path(NAME), "material")
            .with(path(GLOSSINESS), 0.5f32)
            .with(path(METALLIC), 0.0f32)
            .with(path(COLOR), PropertyValue::Color([1.0, 1.0, 1.0, 1.0]))
            .with(path(MAIN_TEX), PropertyValue::reference(self.main_tex.clone()))
            .with(path(BUMP_MAP), PropertyValue::AssetReference(None))
            .with(path(CULL), PropertyValue::Enum(2))
            .with(path(QUEUE), PropertyValue::Integer(-1))
            .with(path(EMISSION), false)
            .with(path(TILING), PropertyValue::Vector4([1.0, 1.0, 0.0, 0.0]))
            .with(
                path(FADE),
                PropertyValue::AnimationCurve(Curve::new(vec![
                    Keyframe::new(0.0, 1.0),
                    Keyframe::new(1.0, 0.0),
                ])),
            )
            .with(path(TEX_COUNT), PropertyValue::ArraySize(2))
            .with(path(GRADIENT), PropertyValue::Opaque(OpaqueKind::Gradient))
    }

    /// Standard record with some properties overridden
    #[must_use]
    pub fn record_with(&self, overrides: &[(&str, PropertyValue)]) -> PropertyRecord {
        let mut record = self.record();
        for (p, value) in overrides {
            record.insert(path(p), value.clone());
        }
        record
    }

    /// Insert `count` standard records into `store`
    pub fn populate(&self, store: &RecordStore, count: usize) -> Vec<MemberId> {
        (0..count).map(|_| store.insert(self.record())).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_records_share_schema() {
        let fixture = MaterialFixture::new();
        let a = fixture.record();
        let b = fixture.record_with(&[(GLOSSINESS, PropertyValue::Float(0.2))]);
        assert_eq!(
            a.paths().collect::<Vec<_>>(),
            b.paths().collect::<Vec<_>>()
        );
        assert_ne!(a, b);
    }
}
