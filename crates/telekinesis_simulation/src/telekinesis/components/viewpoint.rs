//! Viewpoint (камера), pose и anchors телекинеза
//!
//! Intended pose и anchors прикреплены к камере: храним их в локальном frame viewpoint'а
//! (forward = -Z, как у Bevy), в world переводим на каждом запросе.

use bevy::prelude::*;

/// Позиция + ориентация камеры, приходит от хоста каждый тик
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Viewpoint {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Viewpoint {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    /// Viewpoint, смотрящий вдоль `forward` (roll выбирается по кратчайшей дуге от -Z)
    pub fn looking_along(position: Vec3, forward: Vec3) -> Self {
        let rotation = match forward.try_normalize() {
            Some(direction) => Quat::from_rotation_arc(Vec3::NEG_Z, direction),
            None => Quat::IDENTITY,
        };
        Self { position, rotation }
    }

    pub fn from_global_transform(transform: &GlobalTransform) -> Self {
        Self {
            position: transform.translation(),
            rotation: transform.rotation(),
        }
    }

    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn to_world(&self, local: Pose) -> Pose {
        Pose {
            position: self.position + self.rotation * local.position,
            rotation: self.rotation * local.rotation,
        }
    }

    pub fn to_local(&self, world: Pose) -> Pose {
        let inverse = self.rotation.inverse();
        Pose {
            position: inverse * (world.position - self.position),
            rotation: inverse * world.rotation,
        }
    }
}

/// Position + orientation
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }
}

/// Near/far anchors в локальном frame камеры: на 0 и `max_length` вдоль forward
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct Anchors {
    pub near: Vec3,
    pub far: Vec3,
}

impl Anchors {
    pub fn new(max_length: f32) -> Self {
        Self {
            near: Vec3::ZERO,
            far: Vec3::NEG_Z * max_length,
        }
    }

    /// Anchors в world (пересчёт при каждом движении камеры)
    pub fn world(&self, viewpoint: &Viewpoint) -> (Vec3, Vec3) {
        (
            viewpoint.position + viewpoint.rotation * self.near,
            viewpoint.position + viewpoint.rotation * self.far,
        )
    }
}

/// Сдвигает `current` к `anchor` на `step` (линейная интерполяция).
///
/// alpha = step / distance; alpha ≥ 1 → ровно anchor, без overshoot.
/// Нулевая дистанция → `current` без изменений.
pub fn step_towards(current: Vec3, anchor: Vec3, step: f32) -> Vec3 {
    let distance = current.distance(anchor);
    if distance <= 0.0 {
        return current;
    }

    let alpha = step / distance;
    if alpha < 1.0 {
        current.lerp(anchor, alpha)
    } else {
        anchor
    }
}
