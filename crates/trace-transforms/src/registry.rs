//! Transform registry.
//!
//! Maps the `type` key of a transform spec to the module that knows how to
//! resolve its options and build it.

use serde_json::Value;

use trace_core::{
    error::{TransformError, TransformResult},
    traits::TraceTransform,
};

use crate::attributes::AttributeSpec;
use crate::pct_change::{PctChangeTransform, PCT_CHANGE, PCT_CHANGE_ATTRIBUTES};

/// A registered transform type.
#[derive(Clone, Copy)]
pub struct TransformModule {
    /// Value of the spec's `type` key.
    pub name: &'static str,
    /// Accepted options.
    pub attributes: &'static [AttributeSpec],
    /// Resolve raw options and build the transform.
    pub build: fn(&Value) -> Box<dyn TraceTransform>,
}

impl core::fmt::Debug for TransformModule {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransformModule")
            .field("name", &self.name)
            .field("attributes", &self.attributes.len())
            .finish()
    }
}

fn build_pct_change(raw: &Value) -> Box<dyn TraceTransform> {
    Box::new(PctChangeTransform::from_raw(raw))
}

/// All transform types known to the pipeline.
pub const TRANSFORM_MODULES: &[TransformModule] = &[TransformModule {
    name: PCT_CHANGE,
    attributes: PCT_CHANGE_ATTRIBUTES,
    build: build_pct_change,
}];

/// Look up a registered module by type name.
#[must_use]
pub fn find_module(name: &str) -> Option<&'static TransformModule> {
    TRANSFORM_MODULES.iter().find(|module| module.name == name)
}

/// Read the `type` key of a transform spec.
///
/// # Errors
///
/// Returns an error if the spec is not an object or has no string `type`.
pub fn transform_type(spec: &Value) -> TransformResult<&str> {
    let object = spec
        .as_object()
        .ok_or_else(|| TransformError::MalformedSpec(format!("expected an object, got {spec}")))?;

    object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| TransformError::MalformedSpec("missing string 'type'".to_string()))
}

/// Build a transform from its spec.
///
/// # Errors
///
/// Returns an error if the spec is malformed or its type is not registered.
pub fn build_transform(spec: &Value) -> TransformResult<Box<dyn TraceTransform>> {
    let kind = transform_type(spec)?;
    let module =
        find_module(kind).ok_or_else(|| TransformError::UnknownTransform(kind.to_string()))?;
    Ok((module.build)(spec))
}
