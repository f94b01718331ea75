//! Recording mock host для unit тестов контроллера

use bevy::prelude::*;
use std::collections::HashMap;

use crate::telekinesis::backend::{
    AnimationId, AudioHandle, BodyAccess, ConstraintSink, EffectId, FeedbackSink, Mobility, RayHit,
    RaySource, SoundId,
};

/// Вызовы, которые контроллер сделал в хост
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Attach { body: Entity, grab_point: Vec3 },
    SetTarget { position: Vec3 },
    Detach,
    Impulse { body: Entity, impulse: Vec3 },
    Highlight { body: Entity, enabled: bool },
    PlayAttached { sound: SoundId },
    SetPaused { handle: AudioHandle, paused: bool },
    Play2d { sound: SoundId },
    PlayAt { sound: SoundId },
    Animation { animation: AnimationId },
    SpawnEffect { prototype: EffectId, position: Vec3 },
}

#[derive(Default)]
pub struct MockHost {
    /// Что вернёт следующий ray cast (с учётом max_distance)
    pub hit: Option<RayHit>,
    pub bodies: HashMap<Entity, Vec3>,
    pub attached: Option<Entity>,
    pub calls: Vec<Call>,
}

impl MockHost {
    /// Хост с одним телом, в которое попадает луч
    pub fn with_body(body: Entity, position: Vec3, mobility: Mobility) -> Self {
        let mut host = Self::default();
        host.bodies.insert(body, position);
        host.hit = Some(RayHit {
            position,
            normal: Vec3::NEG_X,
            body,
            mobility,
        });
        host
    }

    pub fn move_body(&mut self, body: Entity, position: Vec3) {
        self.bodies.insert(body, position);
    }

    pub fn despawn_body(&mut self, body: Entity) {
        self.bodies.remove(&body);
    }

    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }

    pub fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.iter().filter(|call| predicate(call)).count()
    }

    pub fn constraint_calls(&self) -> usize {
        self.count(|call| {
            matches!(
                call,
                Call::Attach { .. } | Call::SetTarget { .. } | Call::Detach
            )
        })
    }

    pub fn last_target(&self) -> Option<Vec3> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::SetTarget { position } => Some(*position),
            _ => None,
        })
    }
}

impl RaySource for MockHost {
    fn cast_ray(&self, origin: Vec3, _direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.hit
            .filter(|hit| hit.position.distance(origin) <= max_distance)
    }
}

impl ConstraintSink for MockHost {
    fn attach(&mut self, body: Entity, grab_point: Vec3, _rotation: Quat) {
        self.attached = Some(body);
        self.calls.push(Call::Attach { body, grab_point });
    }

    fn set_target(&mut self, position: Vec3, _rotation: Quat) {
        self.calls.push(Call::SetTarget { position });
    }

    fn detach(&mut self) {
        self.attached = None;
        self.calls.push(Call::Detach);
    }

    fn current_body(&self) -> Option<Entity> {
        self.attached.filter(|body| self.bodies.contains_key(body))
    }
}

impl BodyAccess for MockHost {
    fn body_pose(&self, body: Entity) -> Option<(Vec3, Quat)> {
        self.bodies.get(&body).map(|position| (*position, Quat::IDENTITY))
    }

    fn apply_impulse(&mut self, body: Entity, impulse: Vec3) {
        self.calls.push(Call::Impulse { body, impulse });
    }

    fn set_highlight(&mut self, body: Entity, enabled: bool) {
        self.calls.push(Call::Highlight { body, enabled });
    }
}

impl FeedbackSink for MockHost {
    fn play_attached(&mut self, sound: &SoundId, _volume: f32) -> Option<AudioHandle> {
        self.calls.push(Call::PlayAttached {
            sound: sound.clone(),
        });
        Some(AudioHandle(1))
    }

    fn set_paused(&mut self, handle: AudioHandle, paused: bool) {
        self.calls.push(Call::SetPaused { handle, paused });
    }

    fn play_2d(&mut self, sound: &SoundId, _volume: f32) {
        self.calls.push(Call::Play2d {
            sound: sound.clone(),
        });
    }

    fn play_at(&mut self, sound: &SoundId, _position: Vec3) {
        self.calls.push(Call::PlayAt {
            sound: sound.clone(),
        });
    }

    fn play_animation(&mut self, animation: &AnimationId) {
        self.calls.push(Call::Animation {
            animation: animation.clone(),
        });
    }

    fn spawn_effect(&mut self, prototype: &EffectId, position: Vec3, _rotation: Quat) {
        self.calls.push(Call::SpawnEffect {
            prototype: prototype.clone(),
            position,
        });
    }
}
