//! Capability traits: что контроллер телекинеза требует от движка.
//!
//! Контроллер не знает про Rapier, аудио и рендер. Хост (ECS adapter, mock в тестах)
//! реализует четыре маленьких trait'а:
//! - `RaySource`: ray cast против физического мира
//! - `ConstraintSink`: physics handle (одно тело за раз)
//! - `BodyAccess`: операции над rigid body (позиция, импульс, подсветка)
//! - `FeedbackSink`: звук, анимация, эффекты (косметика)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Подвижность тела, в которое попал луч
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Mobility {
    /// Dynamic rigid body (симулируется физикой): можно схватить
    Movable,
    /// Kinematic body: двигается кодом, физике не подчиняется
    Kinematic,
    /// Static геометрия (или коллайдер без rigid body)
    Static,
}

/// Результат ray cast (первый blocking hit)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct RayHit {
    pub position: Vec3,
    pub normal: Vec3,
    pub body: Entity,
    pub mobility: Mobility,
}

impl RayHit {
    pub fn is_movable(&self) -> bool {
        self.mobility == Mobility::Movable
    }
}

/// Ключ звукового ассета (резолвится presentation слоем)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct SoundId(pub String);

/// Ключ анимации (fire montage)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct AnimationId(pub String);

/// Ключ прототипа эффекта (spawn при броске)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub struct EffectId(pub String);

/// Handle на заспавненный attached звук (hold sound)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct AudioHandle(pub u64);

pub trait RaySource {
    /// Первый blocking hit на отрезке `origin + direction * [0, max_distance]`.
    /// `direction` нормализован.
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit>;
}

pub trait ConstraintSink {
    fn attach(&mut self, body: Entity, grab_point: Vec3, rotation: Quat);
    fn set_target(&mut self, position: Vec3, rotation: Quat);
    fn detach(&mut self);
    /// Тело под handle'ом. `None` если handle пуст или тело уже не существует.
    fn current_body(&self) -> Option<Entity>;
}

pub trait BodyAccess {
    /// World pose тела (origin + rotation), `None` если тело исчезло
    fn body_pose(&self, body: Entity) -> Option<(Vec3, Quat)>;
    /// Velocity-change импульс (не зависит от массы)
    fn apply_impulse(&mut self, body: Entity, impulse: Vec3);
    fn set_highlight(&mut self, body: Entity, enabled: bool);
}

pub trait FeedbackSink {
    fn play_attached(&mut self, sound: &SoundId, volume: f32) -> Option<AudioHandle>;
    fn set_paused(&mut self, handle: AudioHandle, paused: bool);
    fn play_2d(&mut self, sound: &SoundId, volume: f32);
    fn play_at(&mut self, sound: &SoundId, position: Vec3);
    fn play_animation(&mut self, animation: &AnimationId);
    fn spawn_effect(&mut self, prototype: &EffectId, position: Vec3, rotation: Quat);
}

/// Всё, что нужно контроллеру за один вызов
pub trait TelekinesisHost: RaySource + ConstraintSink + BodyAccess + FeedbackSink {}

impl<T: RaySource + ConstraintSink + BodyAccess + FeedbackSink> TelekinesisHost for T {}
