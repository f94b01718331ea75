//! Telekinesis events
//!
//! Input: `TelekinesisInput`: пишет input слой хоста (мышь, геймпад, AI, тесты).
//! Output: `TelekinesisFeedback` (звук/анимация для presentation слоя),
//! `ObjectGrabbed` / `ObjectReleased` (gameplay, HUD).

use bevy::prelude::*;

use crate::telekinesis::backend::{AnimationId, AudioHandle, SoundId};

/// Действие игрока (без payload)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum TelekinesisAction {
    GrabPressed,
    GrabReleased,
    ThrowPressed,
    StepNearPressed,
    StepFarPressed,
}

/// Event: input для конкретного caster'а (entity с TelekinesisController)
#[derive(Event, Debug, Clone)]
pub struct TelekinesisInput {
    pub caster: Entity,
    pub action: TelekinesisAction,
}

impl TelekinesisInput {
    pub fn new(caster: Entity, action: TelekinesisAction) -> Self {
        Self { caster, action }
    }
}

/// Event: аудио/анимация, которые должен проиграть presentation слой
#[derive(Event, Debug, Clone, PartialEq)]
pub enum TelekinesisFeedback {
    /// Attached hold sound создан (handle для последующих пауз)
    HoldSoundSpawned {
        caster: Entity,
        handle: AudioHandle,
        sound: SoundId,
        volume: f32,
    },
    SoundPaused {
        handle: AudioHandle,
        paused: bool,
    },
    Sound2d {
        caster: Entity,
        sound: SoundId,
        volume: f32,
    },
    SoundAt {
        sound: SoundId,
        position: Vec3,
    },
    Animation {
        caster: Entity,
        animation: AnimationId,
    },
}

/// Event: тело схвачено
#[derive(Event, Debug, Clone)]
pub struct ObjectGrabbed {
    pub caster: Entity,
    pub body: Entity,
}

/// Почему тело отпущено
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum ReleaseReason {
    /// Игрок отпустил кнопку
    Released,
    Thrown,
    /// Тело оторвалось дальше fail_distance
    Overstretched,
    /// Тело исчезло (despawn) во время удержания
    BodyLost,
}

/// Event: тело отпущено (любой путь)
#[derive(Event, Debug, Clone)]
pub struct ObjectReleased {
    pub caster: Entity,
    pub body: Option<Entity>,
    pub reason: ReleaseReason,
}
