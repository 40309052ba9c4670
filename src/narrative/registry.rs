//! Focusable scene objects and their idle animation
//!
//! Orbiting objects are children of a single group that slowly turns about the world
//! origin while nothing is focused. Each object also spins about its own vertical axis.
//! The [`IdleAnimator`] advances both regimes once per frame; the registry only stores
//! state and answers world-position queries through [`WorldPositions`].

use std::collections::HashMap;
use std::f32::consts::TAU;

use cgmath::{Matrix3, Matrix4, Rad, Vector3};

use super::error::NarrativeError;
use super::section::HOME;

/// Default angular rate of the group orbit, in radians per second
pub const DEFAULT_GROUP_RATE: f32 = 0.05;

/// Capability for resolving an object's live world position
///
/// The camera rig only ever sees this trait, never the registry itself.
pub trait WorldPositions {
    fn world_position(&self, identifier: &str) -> Option<Vector3<f32>>;
}

/// Where an object sits in the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    /// Child of the rotating group; its world position follows the group orbit
    Orbiting,
    /// Placed directly in world space; spins but never orbits
    Fixed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    identifier: String,
    base_position: Vector3<f32>,
    rotation_speed: f32,
    spin: f32,
    attachment: Attachment,
}

impl SceneObject {
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn base_position(&self) -> Vector3<f32> {
        self.base_position
    }

    /// Own-axis rotation rate in radians per second
    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    /// Current own-axis rotation, in `[0, 2π)`
    pub fn spin(&self) -> f32 {
        self.spin
    }

    pub fn attachment(&self) -> Attachment {
        self.attachment
    }
}

/// World transform of one object for the current frame
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectTransform {
    pub identifier: String,
    pub world_position: Vector3<f32>,
    /// Group rotation, translation and own spin; scale is left to the renderer
    pub matrix: Matrix4<f32>,
}

/// Fixed set of scene objects plus the shared group rotation
#[derive(Debug, Clone, Default)]
pub struct SceneObjectRegistry {
    objects: Vec<SceneObject>,
    lookup: HashMap<String, usize>,
    group_rotation: f32,
}

impl SceneObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an object that orbits with the group
    pub fn register_object(
        &mut self,
        identifier: impl Into<String>,
        base_position: Vector3<f32>,
        rotation_speed: f32,
    ) -> Result<(), NarrativeError> {
        self.register(
            identifier.into(),
            base_position,
            rotation_speed,
            Attachment::Orbiting,
        )
    }

    /// Registers an object placed in world space, outside the orbiting group
    pub fn register_fixed(
        &mut self,
        identifier: impl Into<String>,
        base_position: Vector3<f32>,
        rotation_speed: f32,
    ) -> Result<(), NarrativeError> {
        self.register(
            identifier.into(),
            base_position,
            rotation_speed,
            Attachment::Fixed,
        )
    }

    fn register(
        &mut self,
        identifier: String,
        base_position: Vector3<f32>,
        rotation_speed: f32,
        attachment: Attachment,
    ) -> Result<(), NarrativeError> {
        if identifier.is_empty() {
            return Err(NarrativeError::EmptyObjectId);
        }
        if identifier == HOME {
            return Err(NarrativeError::ReservedObjectId(identifier));
        }
        if self.lookup.contains_key(&identifier) {
            return Err(NarrativeError::DuplicateObject(identifier));
        }
        if !rotation_speed.is_finite() {
            return Err(NarrativeError::InvalidRotationSpeed(identifier));
        }
        if !(base_position.x.is_finite()
            && base_position.y.is_finite()
            && base_position.z.is_finite())
        {
            return Err(NarrativeError::InvalidPosition(identifier));
        }

        self.lookup.insert(identifier.clone(), self.objects.len());
        self.objects.push(SceneObject {
            identifier,
            base_position,
            rotation_speed,
            spin: 0.0,
            attachment,
        });
        Ok(())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.lookup.contains_key(identifier)
    }

    pub fn get(&self, identifier: &str) -> Option<&SceneObject> {
        self.lookup.get(identifier).map(|&index| &self.objects[index])
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Current group rotation about the world vertical axis, in `[0, 2π)`
    pub fn group_rotation(&self) -> f32 {
        self.group_rotation
    }

    /// World transforms of every object, in registration order
    pub fn transforms(&self) -> Vec<ObjectTransform> {
        self.objects
            .iter()
            .map(|object| {
                let local = Matrix4::from_translation(object.base_position)
                    * Matrix4::from_angle_y(Rad(object.spin));
                let matrix = match object.attachment {
                    Attachment::Orbiting => {
                        Matrix4::from_angle_y(Rad(self.group_rotation)) * local
                    }
                    Attachment::Fixed => local,
                };
                ObjectTransform {
                    identifier: object.identifier.clone(),
                    world_position: self.position_of(object),
                    matrix,
                }
            })
            .collect()
    }

    fn position_of(&self, object: &SceneObject) -> Vector3<f32> {
        match object.attachment {
            Attachment::Orbiting => {
                Matrix3::from_angle_y(Rad(self.group_rotation)) * object.base_position
            }
            Attachment::Fixed => object.base_position,
        }
    }
}

impl WorldPositions for SceneObjectRegistry {
    fn world_position(&self, identifier: &str) -> Option<Vector3<f32>> {
        self.get(identifier).map(|object| self.position_of(object))
    }
}

/// Advances idle rotation for unfocused objects and the group orbit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleAnimator {
    group_rate: f32,
}

impl IdleAnimator {
    /// Creates an animator turning the group at `group_rate` radians per second
    ///
    /// # Arguments
    /// * `group_rate` - Group orbit rate while nothing is focused; negative turns the
    ///   other way
    ///
    /// # Returns
    /// [`NarrativeError::InvalidGroupRate`] if the rate is NaN or infinite
    pub fn new(group_rate: f32) -> Result<Self, NarrativeError> {
        if group_rate.is_finite() {
            Ok(Self { group_rate })
        } else {
            Err(NarrativeError::InvalidGroupRate(group_rate))
        }
    }

    pub fn with_group_rate(self, group_rate: f32) -> Result<Self, NarrativeError> {
        Self::new(group_rate)
    }

    /// Group orbit rate in radians per second
    pub fn group_rate(&self) -> f32 {
        self.group_rate
    }

    /// Advances one frame of `delta_time` seconds
    ///
    /// The focused object's spin and the group rotation hold their current values while
    /// `focused` is set; they are never reset.
    pub fn tick(
        &self,
        registry: &mut SceneObjectRegistry,
        delta_time: f32,
        focused: Option<&str>,
    ) {
        if !(delta_time.is_finite() && delta_time > 0.0) {
            return;
        }

        for object in registry.objects.iter_mut() {
            if focused == Some(object.identifier.as_str()) {
                continue;
            }
            object.spin = wrap_angle(object.spin + object.rotation_speed * delta_time);
        }

        if focused.is_none() {
            registry.group_rotation =
                wrap_angle(registry.group_rotation + self.group_rate * delta_time);
        }
    }
}

impl Default for IdleAnimator {
    fn default() -> Self {
        Self {
            group_rate: DEFAULT_GROUP_RATE,
        }
    }
}

fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}
