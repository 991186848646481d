//! Sampling configuration, loadable from JSON.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sampler::{CurveSampler, SingleSamplePolicy};

/// Decimal places kept on every coordinate unless configured otherwise.
pub const DEFAULT_PRECISION: u32 = 2;

/// How a curve is cut into segments.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GradientPathConfig {
    /// Number of independently colored segments
    pub segments: usize,

    /// Samples per segment, including the one shared with the next segment
    pub samples: usize,

    /// Decimal places kept on coordinates; `null` or 0 disables rounding
    #[serde(default = "default_precision")]
    pub precision: Option<u32>,

    /// What to do when `samples` is 1
    #[serde(default)]
    pub single_sample: SingleSamplePolicy,

    /// Overrides whether the curve is treated as closed when filling.
    /// Left out, the curve decides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed: Option<bool>,
}

fn default_precision() -> Option<u32> {
    Some(DEFAULT_PRECISION)
}

impl GradientPathConfig {
    pub fn new(segments: usize, samples: usize) -> Self {
        Self {
            segments,
            samples,
            precision: default_precision(),
            single_sample: SingleSamplePolicy::default(),
            closed: None,
        }
    }

    /// Builder method for the coordinate precision.
    pub fn with_precision(mut self, precision: Option<u32>) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method for the single-sample policy.
    pub fn with_single_sample(mut self, policy: SingleSamplePolicy) -> Self {
        self.single_sample = policy;
        self
    }

    /// Builder method forcing the curve to be treated as open or closed.
    pub fn with_closed(mut self, closed: bool) -> Self {
        self.closed = Some(closed);
        self
    }

    pub fn sampler(&self) -> CurveSampler {
        CurveSampler::new(self.segments, self.samples)
            .with_precision(self.precision)
            .with_single_sample(self.single_sample)
    }

    pub fn validate(&self) -> Result<()> {
        self.sampler().validate()
    }

    /// Parse and validate a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
