//! Throw emitter: импульс вдоль взгляда + отпускание + косметика

use bevy::prelude::*;

use super::{GrabState, TelekinesisController};
use crate::telekinesis::backend::TelekinesisHost;
use crate::telekinesis::components::Viewpoint;

/// Результат `throw`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowOutcome {
    Thrown(Entity),
    /// Держали, но тело исчезло: handle отпущен без броска
    BodyLost,
    /// Ничего не держим, no-op
    NotHolding,
}

impl TelekinesisController {
    /// Бросок удерживаемого тела. Вне Holding: no-op.
    pub fn throw(&mut self, viewpoint: &Viewpoint, host: &mut impl TelekinesisHost) -> ThrowOutcome {
        let GrabState::Holding { .. } = self.state else {
            return ThrowOutcome::NotHolding;
        };

        let Some(body) = host.current_body() else {
            // Тело пропало: бросать нечего, просто чистим handle
            self.release(host);
            return ThrowOutcome::BodyLost;
        };

        let impulse = viewpoint.forward() * self.config.impulse_strength;
        host.apply_impulse(body, impulse);
        self.set_hold_sound_playing(host, false);

        match self.assets.throw_sound.as_ref() {
            Some(sound) => host.play_2d(sound, self.config.throw_volume),
            None => crate::logger::log_warning("Telekinesis: throw_sound not set, skipping"),
        }

        match (self.assets.throw_effect.as_ref(), host.body_pose(body)) {
            (Some(prototype), Some((position, rotation))) => {
                host.spawn_effect(prototype, position, rotation);
            }
            (None, _) => crate::logger::log_warning("Telekinesis: throw_effect not set, skipping"),
            (Some(_), None) => {}
        }

        if self.config.affect_highlight {
            host.set_highlight(body, false);
        }
        host.detach();
        self.clear_hold();

        crate::logger::log_info(&format!(
            "Telekinesis: threw {:?} with impulse {:?}",
            body, impulse
        ));
        ThrowOutcome::Thrown(body)
    }
}
