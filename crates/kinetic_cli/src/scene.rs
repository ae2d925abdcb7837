//! Building animation trees from scene configuration

use indexmap::IndexMap;
use kinetic_animation::{
    Animation, AnimationError, AnimationGroup, BoxedAnimation, Interpolator,
    ParallelAnimationGroup, PropertyAnimation, SequentialAnimationGroup, Time,
};
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;

use crate::config::{NodeConfig, SceneConfig};

/// Shared handle to one scene property
pub type PropertyCell = Rc<Cell<f64>>;

/// Scene validation errors
#[derive(Error, Debug, PartialEq)]
pub enum SceneError {
    #[error("property `{0}` is declared more than once")]
    DuplicateProperty(String),

    #[error("animation targets unknown property `{0}`")]
    UnknownProperty(String),

    #[error("frame_ms must be positive, got {0}")]
    InvalidFrame(Time),

    #[error("invalid animation for `{target}`: {source}")]
    Animation {
        target: String,
        #[source]
        source: AnimationError,
    },
}

/// A built scene, ready to be played
pub struct Scene {
    pub name: String,
    pub frame_ms: Time,
    pub max_frames: Option<u64>,
    /// Properties in declaration order
    pub properties: IndexMap<String, PropertyCell>,
    pub root: BoxedAnimation<'static>,
}

impl Scene {
    pub fn build(config: &SceneConfig) -> Result<Self, SceneError> {
        if config.scene.frame_ms <= 0 {
            return Err(SceneError::InvalidFrame(config.scene.frame_ms));
        }

        let mut properties = IndexMap::new();
        for property in &config.properties {
            let cell = Rc::new(Cell::new(property.value));
            if properties.insert(property.name.clone(), cell).is_some() {
                return Err(SceneError::DuplicateProperty(property.name.clone()));
            }
        }

        let root = build_node(&config.root, &properties)?;
        tracing::debug!(
            scene = %config.scene.name,
            properties = properties.len(),
            duration = root.duration(),
            "scene built"
        );

        Ok(Self {
            name: config.scene.name.clone(),
            frame_ms: config.scene.frame_ms,
            max_frames: config.scene.max_frames,
            properties,
            root,
        })
    }
}

fn build_node(
    node: &NodeConfig,
    properties: &IndexMap<String, PropertyCell>,
) -> Result<BoxedAnimation<'static>, SceneError> {
    match node {
        NodeConfig::Sequential { children } => {
            let mut group = SequentialAnimationGroup::new();
            for child in children {
                group.add(build_node(child, properties)?);
            }
            Ok(Box::new(group))
        }
        NodeConfig::Parallel { children } => {
            let mut group = ParallelAnimationGroup::new();
            for child in children {
                group.add(build_node(child, properties)?);
            }
            Ok(Box::new(group))
        }
        NodeConfig::Property {
            target,
            from,
            to,
            duration,
            interpolator,
        } => {
            let cell = properties
                .get(target)
                .ok_or_else(|| SceneError::UnknownProperty(target.clone()))?;
            let start = from.unwrap_or_else(|| cell.get());
            let animation = PropertyAnimation::try_new(
                Rc::clone(cell),
                start,
                *to,
                *duration,
                Interpolator::from(interpolator),
            )
            .map_err(|source| SceneError::Animation {
                target: target.clone(),
                source,
            })?;
            Ok(Box::new(animation))
        }
    }
}
