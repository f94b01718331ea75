//! ECS adapter: реализует capability traits контроллера поверх Bevy/Rapier
//!
//! Контроллер вызывается внутри системы, поэтому мутации мира (Velocity, Highlighted,
//! spawn эффектов, events) копим в `HostEffects` и применяем после вызова через
//! `TelekinesisBackend::flush`. Чтения (pose тела) идут напрямую в Query.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::telekinesis::backend::{
    AnimationId, AudioHandle, BodyAccess, ConstraintSink, EffectId, FeedbackSink, RayHit,
    RaySource, SoundId,
};
use crate::telekinesis::components::{AimTrace, Highlighted, PhysicsHandle, ThrowEffect};
use crate::telekinesis::controller::TelekinesisController;
use crate::telekinesis::events::TelekinesisFeedback;

pub type BodyData = (&'static Transform, Option<&'static mut Velocity>);
pub type BodyFilter = Without<TelekinesisController>;

/// Аллокатор audio handles (один счётчик на мир)
#[derive(Resource, Debug, Default)]
pub struct FeedbackHandles {
    next: u64,
}

impl FeedbackHandles {
    pub fn allocate(&mut self) -> AudioHandle {
        self.next += 1;
        AudioHandle(self.next)
    }
}

/// Отложенная мутация тела / мира
#[derive(Debug, Clone, PartialEq)]
pub enum BodyCommand {
    Impulse { body: Entity, impulse: Vec3 },
    Highlight { body: Entity, enabled: bool },
    SpawnEffect { prototype: EffectId, position: Vec3, rotation: Quat },
}

#[derive(Debug, Default)]
pub struct HostEffects {
    pub body_commands: Vec<BodyCommand>,
    pub feedback: Vec<TelekinesisFeedback>,
}

/// FeedbackSink без доступа к физике (hold sound при спавне контроллера)
pub struct FeedbackRecorder<'a> {
    caster: Entity,
    handles: &'a mut FeedbackHandles,
    effects: HostEffects,
}

impl<'a> FeedbackRecorder<'a> {
    pub fn new(caster: Entity, handles: &'a mut FeedbackHandles) -> Self {
        Self {
            caster,
            handles,
            effects: HostEffects::default(),
        }
    }

    pub fn into_effects(self) -> HostEffects {
        self.effects
    }
}

impl FeedbackSink for FeedbackRecorder<'_> {
    fn play_attached(&mut self, sound: &SoundId, volume: f32) -> Option<AudioHandle> {
        let handle = self.handles.allocate();
        self.effects.feedback.push(TelekinesisFeedback::HoldSoundSpawned {
            caster: self.caster,
            handle,
            sound: sound.clone(),
            volume,
        });
        Some(handle)
    }

    fn set_paused(&mut self, handle: AudioHandle, paused: bool) {
        self.effects
            .feedback
            .push(TelekinesisFeedback::SoundPaused { handle, paused });
    }

    fn play_2d(&mut self, sound: &SoundId, volume: f32) {
        self.effects.feedback.push(TelekinesisFeedback::Sound2d {
            caster: self.caster,
            sound: sound.clone(),
            volume,
        });
    }

    fn play_at(&mut self, sound: &SoundId, position: Vec3) {
        self.effects.feedback.push(TelekinesisFeedback::SoundAt {
            sound: sound.clone(),
            position,
        });
    }

    fn play_animation(&mut self, animation: &AnimationId) {
        self.effects.feedback.push(TelekinesisFeedback::Animation {
            caster: self.caster,
            animation: animation.clone(),
        });
    }

    fn spawn_effect(&mut self, prototype: &EffectId, position: Vec3, rotation: Quat) {
        self.effects.body_commands.push(BodyCommand::SpawnEffect {
            prototype: prototype.clone(),
            position,
            rotation,
        });
    }
}

/// Host для одного caster'а на время одного вызова контроллера
pub struct EcsHost<'a, 'w, 's> {
    handle: &'a mut PhysicsHandle,
    trace: &'a AimTrace,
    bodies: &'a Query<'w, 's, BodyData, BodyFilter>,
    recorder: FeedbackRecorder<'a>,
}

impl EcsHost<'_, '_, '_> {
    pub fn into_effects(self) -> HostEffects {
        self.recorder.into_effects()
    }
}

impl RaySource for EcsHost<'_, '_, '_> {
    fn cast_ray(&self, origin: Vec3, direction: Vec3, max_distance: f32) -> Option<RayHit> {
        self.trace.cast_ray(origin, direction, max_distance)
    }
}

impl ConstraintSink for EcsHost<'_, '_, '_> {
    fn attach(&mut self, body: Entity, grab_point: Vec3, rotation: Quat) {
        let Some(pose) = self.body_pose(body) else {
            crate::logger::log_warning(&format!(
                "Telekinesis: attach to {:?} ignored, body has no Transform",
                body
            ));
            return;
        };
        self.handle.grab(body, pose, grab_point, rotation);
    }

    fn set_target(&mut self, position: Vec3, rotation: Quat) {
        self.handle.set_target(position, rotation);
    }

    fn detach(&mut self) {
        self.handle.release();
    }

    fn current_body(&self) -> Option<Entity> {
        self.handle
            .grabbed
            .filter(|body| self.bodies.contains(*body))
    }
}

impl BodyAccess for EcsHost<'_, '_, '_> {
    fn body_pose(&self, body: Entity) -> Option<(Vec3, Quat)> {
        self.bodies
            .get(body)
            .ok()
            .map(|(transform, _)| (transform.translation, transform.rotation))
    }

    fn apply_impulse(&mut self, body: Entity, impulse: Vec3) {
        self.recorder
            .effects
            .body_commands
            .push(BodyCommand::Impulse { body, impulse });
    }

    fn set_highlight(&mut self, body: Entity, enabled: bool) {
        self.recorder
            .effects
            .body_commands
            .push(BodyCommand::Highlight { body, enabled });
    }
}

impl FeedbackSink for EcsHost<'_, '_, '_> {
    fn play_attached(&mut self, sound: &SoundId, volume: f32) -> Option<AudioHandle> {
        self.recorder.play_attached(sound, volume)
    }

    fn set_paused(&mut self, handle: AudioHandle, paused: bool) {
        self.recorder.set_paused(handle, paused);
    }

    fn play_2d(&mut self, sound: &SoundId, volume: f32) {
        self.recorder.play_2d(sound, volume);
    }

    fn play_at(&mut self, sound: &SoundId, position: Vec3) {
        self.recorder.play_at(sound, position);
    }

    fn play_animation(&mut self, animation: &AnimationId) {
        self.recorder.play_animation(animation);
    }

    fn spawn_effect(&mut self, prototype: &EffectId, position: Vec3, rotation: Quat) {
        self.recorder.spawn_effect(prototype, position, rotation);
    }
}

/// Доступ систем телекинеза к миру: тела, commands, audio handles, feedback events
#[derive(SystemParam)]
pub struct TelekinesisBackend<'w, 's> {
    bodies: Query<'w, 's, BodyData, BodyFilter>,
    commands: Commands<'w, 's>,
    handles: ResMut<'w, FeedbackHandles>,
    feedback: EventWriter<'w, TelekinesisFeedback>,
}

impl<'w, 's> TelekinesisBackend<'w, 's> {
    pub fn host<'a>(
        &'a mut self,
        caster: Entity,
        handle: &'a mut PhysicsHandle,
        trace: &'a AimTrace,
    ) -> EcsHost<'a, 'w, 's> {
        EcsHost {
            handle,
            trace,
            bodies: &self.bodies,
            recorder: FeedbackRecorder::new(caster, &mut self.handles),
        }
    }

    pub fn recorder(&mut self, caster: Entity) -> FeedbackRecorder<'_> {
        FeedbackRecorder::new(caster, &mut self.handles)
    }

    /// Применяет отложенные мутации после вызова контроллера
    pub fn flush(&mut self, effects: HostEffects, effect_lifetime: f32) {
        for command in effects.body_commands {
            match command {
                BodyCommand::Impulse { body, impulse } => self.apply_impulse(body, impulse),
                BodyCommand::Highlight { body, enabled } => {
                    if !self.bodies.contains(body) {
                        continue;
                    }
                    if enabled {
                        self.commands.entity(body).insert(Highlighted);
                    } else {
                        self.commands.entity(body).remove::<Highlighted>();
                    }
                }
                BodyCommand::SpawnEffect {
                    prototype,
                    position,
                    rotation,
                } => {
                    self.commands.spawn((
                        ThrowEffect::new(prototype, effect_lifetime),
                        Transform::from_translation(position).with_rotation(rotation),
                    ));
                }
            }
        }

        for event in effects.feedback {
            self.feedback.write(event);
        }
    }

    // Velocity change: импульс не зависит от массы тела
    fn apply_impulse(&mut self, body: Entity, impulse: Vec3) {
        match self.bodies.get_mut(body) {
            Ok((_, Some(mut velocity))) => velocity.linvel += impulse,
            Ok((_, None)) => {
                self.commands.entity(body).insert(Velocity::linear(impulse));
            }
            Err(_) => {}
        }
    }
}
