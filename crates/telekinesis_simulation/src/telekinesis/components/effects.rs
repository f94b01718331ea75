//! Эффект броска (одноразовый, косметика)

use bevy::prelude::*;

use crate::telekinesis::backend::EffectId;

/// Заспавненный эффект броска. Presentation слой рисует его по `prototype` + Transform.
///
/// Despawn: после `remaining` секунд (`expire_throw_effects`).
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct ThrowEffect {
    pub prototype: EffectId,
    pub remaining: f32,
}

impl ThrowEffect {
    pub fn new(prototype: EffectId, lifetime: f32) -> Self {
        Self {
            prototype,
            remaining: lifetime,
        }
    }

    /// Уменьшает таймер, возвращает true когда эффект пора удалить
    pub fn tick(&mut self, delta: f32) -> bool {
        self.remaining -= delta;
        self.remaining <= 0.0
    }
}
