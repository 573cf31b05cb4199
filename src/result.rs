//! Feature vector output.
//!
//! The order of [`FEATURE_NAMES`] is the input layout the downstream
//! classifier was trained on. Append only; never reorder.

use serde::{Deserialize, Serialize};

/// Feature names, in vector order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "kbytes",
    "is_frame",
    "is_meta_redirect",
    "is_meta_base64_redirect",
    "is_form",
    "is_input_submit",
    "is_button_submit",
    "same_extern_domain_script_rate",
    "script_block_rate",
    "style_block_rate",
    "external_a_tag_same_domain",
    "null_a_tag",
    "same_external_domain_link_rate",
    "same_external_domain_img_rate",
    "title_feature",
];

/// Length of every feature vector.
pub const FEATURE_COUNT: usize = 15;

/// One named feature value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Feature {
    /// Feature name from [`FEATURE_NAMES`].
    pub name: &'static str,
    /// Feature value. Flags are 0.0 or 1.0.
    pub value: f64,
}

/// Ordered, fixed-length feature values for one page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Wrap values given in [`FEATURE_NAMES`] order.
    #[must_use]
    pub fn new(values: [f64; FEATURE_COUNT]) -> Self {
        Self { values }
    }

    /// Feature names, in order.
    #[must_use]
    pub fn names() -> &'static [&'static str] {
        &FEATURE_NAMES
    }

    /// Values, in order.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Value of the named feature.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i])
    }

    /// Named values, in order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        FEATURE_NAMES
            .iter()
            .zip(self.values.iter())
            .map(|(&name, &value)| Feature { name, value })
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        FEATURE_COUNT
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl From<FeatureVector> for Vec<f64> {
    fn from(v: FeatureVector) -> Self {
        v.values.to_vec()
    }
}

/// Flag value for a boolean feature.
#[inline]
#[must_use]
pub fn flag(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}
