//! Physics handle: пружинный constraint «тело → target pose»
//!
//! Хранит только состояние (какое тело, куда тянуть). Движение делает
//! `drive_physics_handles` через Rapier `Velocity` каждый кадр.

use bevy::prelude::*;

#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct PhysicsHandle {
    /// Схваченное тело (non-owning)
    pub grabbed: Option<Entity>,
    /// Точка захвата в локальном frame тела
    pub local_grab_point: Vec3,
    /// Rotation тела относительно rotation захвата (сохраняем ориентацию при удержании)
    pub rotation_offset: Quat,
    pub target_position: Vec3,
    pub target_rotation: Quat,
    /// Доля оставшегося расстояния, закрываемая за секунду
    pub interpolation_speed: f32,
    /// То же для вращения (рад/с на радиан ошибки)
    pub angular_speed: f32,
    pub max_linear_speed: f32,
}

impl Default for PhysicsHandle {
    fn default() -> Self {
        Self {
            grabbed: None,
            local_grab_point: Vec3::ZERO,
            rotation_offset: Quat::IDENTITY,
            target_position: Vec3::ZERO,
            target_rotation: Quat::IDENTITY,
            interpolation_speed: 5.0,
            angular_speed: 5.0,
            max_linear_speed: 5000.0,
        }
    }
}

impl PhysicsHandle {
    /// Захват тела с world pose `body_pose` в точке `grab_point` с ориентацией `rotation`
    pub fn grab(&mut self, body: Entity, body_pose: (Vec3, Quat), grab_point: Vec3, rotation: Quat) {
        let (body_position, body_rotation) = body_pose;

        self.grabbed = Some(body);
        self.local_grab_point = body_rotation.inverse() * (grab_point - body_position);
        self.rotation_offset = rotation.inverse() * body_rotation;
        self.target_position = grab_point;
        self.target_rotation = rotation;
    }

    pub fn set_target(&mut self, position: Vec3, rotation: Quat) {
        self.target_position = position;
        self.target_rotation = rotation;
    }

    pub fn release(&mut self) {
        self.grabbed = None;
        self.local_grab_point = Vec3::ZERO;
        self.rotation_offset = Quat::IDENTITY;
    }

    /// Скорости, которые ведут тело к target (linvel, angvel)
    pub fn drive_velocities(&self, body_position: Vec3, body_rotation: Quat) -> (Vec3, Vec3) {
        let grab_point = body_position + body_rotation * self.local_grab_point;
        let linvel = ((self.target_position - grab_point) * self.interpolation_speed)
            .clamp_length_max(self.max_linear_speed);

        let desired_rotation = self.target_rotation * self.rotation_offset;
        let mut delta = desired_rotation * body_rotation.inverse();
        // Кратчайший путь
        if delta.w < 0.0 {
            delta = -delta;
        }
        let (axis, angle) = delta.to_axis_angle();
        let angvel = if angle.is_finite() && axis.is_finite() {
            axis * angle * self.angular_speed
        } else {
            Vec3::ZERO
        };

        (linvel, angvel)
    }
}

/// Маркер: тело подсвечено (outline рисует presentation слой)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Highlighted;
