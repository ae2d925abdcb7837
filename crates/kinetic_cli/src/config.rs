//! Scene file handling
//!
//! A scene file (TOML) declares named scalar properties and one animation
//! tree that drives them.

use anyhow::{Context, Result};
use kinetic_animation::interpolator::{DEFAULT_LAMBDA, DEFAULT_OVERFLOW, DEFAULT_POWER};
use kinetic_animation::{Interpolator, Time};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Top-level scene configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneConfig {
    pub scene: SceneHeader,
    #[serde(default)]
    pub properties: Vec<PropertyConfig>,
    pub root: NodeConfig,
}

/// Scene metadata and playback settings
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SceneHeader {
    pub name: String,
    /// Simulated time between two polls
    #[serde(default = "default_frame_ms")]
    pub frame_ms: Time,
    /// Stop the tree after this many polls
    #[serde(default)]
    pub max_frames: Option<u64>,
}

fn default_frame_ms() -> Time {
    16
}

/// A named scalar the tree can animate
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PropertyConfig {
    pub name: String,
    #[serde(default)]
    pub value: f64,
}

/// One node of the animation tree
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeConfig {
    Sequential {
        #[serde(default)]
        children: Vec<NodeConfig>,
    },
    Parallel {
        #[serde(default)]
        children: Vec<NodeConfig>,
    },
    Property {
        target: String,
        /// Defaults to the property's value when the tree is built
        #[serde(default)]
        from: Option<f64>,
        to: f64,
        duration: Time,
        #[serde(default)]
        interpolator: InterpolatorConfig,
    },
}

/// Serializable form of [`Interpolator`]
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum InterpolatorConfig {
    #[default]
    Linear,
    Power {
        #[serde(default = "default_power")]
        power: f64,
    },
    Back {
        #[serde(default = "default_overflow")]
        overflow: f64,
        #[serde(default = "default_power")]
        power: f64,
    },
    Sine,
    Exponential {
        #[serde(default = "default_lambda")]
        lambda: f64,
    },
    Inverse {
        inner: Box<InterpolatorConfig>,
    },
}

fn default_power() -> f64 {
    DEFAULT_POWER
}

fn default_overflow() -> f64 {
    DEFAULT_OVERFLOW
}

fn default_lambda() -> f64 {
    DEFAULT_LAMBDA
}

impl From<&InterpolatorConfig> for Interpolator {
    fn from(config: &InterpolatorConfig) -> Self {
        match config {
            InterpolatorConfig::Linear => Interpolator::Linear,
            InterpolatorConfig::Power { power } => Interpolator::with_power(*power),
            InterpolatorConfig::Back { overflow, power } => {
                Interpolator::with_back(*overflow, *power)
            }
            InterpolatorConfig::Sine => Interpolator::Sine,
            InterpolatorConfig::Exponential { lambda } => Interpolator::with_lambda(*lambda),
            InterpolatorConfig::Inverse { inner } => Interpolator::from(inner.as_ref()).inverse(),
        }
    }
}

impl InterpolatorConfig {
    pub fn power() -> Self {
        InterpolatorConfig::Power {
            power: default_power(),
        }
    }

    pub fn back() -> Self {
        InterpolatorConfig::Back {
            overflow: default_overflow(),
            power: default_power(),
        }
    }

    pub fn exponential() -> Self {
        InterpolatorConfig::Exponential {
            lambda: default_lambda(),
        }
    }

    pub fn inverse(self) -> Self {
        InterpolatorConfig::Inverse {
            inner: Box::new(self),
        }
    }
}

impl SceneConfig {
    /// Load a scene from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize scene")
    }

    /// Six bars driven first one after another, then all at once
    ///
    /// Each bar rises from -0.8 to 0.8 over two seconds with a different
    /// curve: linear, power, inverse back, back, sine, exponential.
    pub fn demo() -> Self {
        const BARS: usize = 6;
        const BOTTOM: f64 = -0.8;
        const TOP: f64 = 0.8;
        const DURATION: Time = 2000;

        let curves = [
            InterpolatorConfig::Linear,
            InterpolatorConfig::power(),
            InterpolatorConfig::back().inverse(),
            InterpolatorConfig::back(),
            InterpolatorConfig::Sine,
            InterpolatorConfig::exponential(),
        ];

        let stage = || -> Vec<NodeConfig> {
            curves
                .iter()
                .enumerate()
                .map(|(i, curve)| NodeConfig::Property {
                    target: format!("bar{i}"),
                    from: Some(BOTTOM),
                    to: TOP,
                    duration: DURATION,
                    interpolator: curve.clone(),
                })
                .collect()
        };

        Self {
            scene: SceneHeader {
                name: "demo".to_string(),
                frame_ms: 100,
                max_frames: None,
            },
            properties: (0..BARS)
                .map(|i| PropertyConfig {
                    name: format!("bar{i}"),
                    value: BOTTOM,
                })
                .collect(),
            root: NodeConfig::Sequential {
                children: vec![
                    NodeConfig::Sequential { children: stage() },
                    NodeConfig::Parallel { children: stage() },
                ],
            },
        }
    }
}
