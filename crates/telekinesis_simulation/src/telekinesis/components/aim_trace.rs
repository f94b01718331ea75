//! Aim trace: результат forward ray cast камеры за текущий кадр
//!
//! `refresh_aim_traces` заполняет его из Rapier до обработки input, контроллер читает
//! через `RaySource`: ray cast остаётся синхронным в пределах кадра.

use bevy::prelude::*;

use crate::telekinesis::backend::{RayHit, RaySource};

#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct AimTrace {
    pub origin: Vec3,
    pub hit: Option<RayHit>,
}

impl AimTrace {
    pub fn new(origin: Vec3, hit: Option<RayHit>) -> Self {
        Self { origin, hit }
    }
}

impl RaySource for AimTrace {
    fn cast_ray(&self, origin: Vec3, _direction: Vec3, max_distance: f32) -> Option<RayHit> {
        let hit = self.hit?;
        // Trace снимается с той же камеры; отсекаем только то, что дальше запрошенной длины
        if hit.position.distance(origin) <= max_distance {
            Some(hit)
        } else {
            None
        }
    }
}
