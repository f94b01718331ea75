//! Grab controller: state machine телекинеза (Idle ↔ Holding)
//!
//! Операции:
//! - `try_grab` / `release` (этот файл)
//! - `tick`, `step_near`, `step_far`: удержание (hold.rs)
//! - `throw`: бросок (throw.rs)
//!
//! Все операции best-effort: неверный переход состояния = тихий no-op, отсутствующий
//! ассет = пропуск косметики. Ошибок наружу не отдаём.

use bevy::prelude::*;

use crate::telekinesis::backend::{AudioHandle, FeedbackSink, RayHit, TelekinesisHost};
use crate::telekinesis::components::{
    AimTrace, Anchors, PhysicsHandle, Pose, TelekinesisAssets, TelekinesisConfig, Viewpoint,
};

pub mod acquisition;
mod hold;
mod throw;

#[cfg(test)]
pub(crate) mod mock_host;

#[cfg(test)]
mod controller_tests;

pub use acquisition::acquire;
pub use hold::HoldStatus;
pub use throw::ThrowOutcome;

/// Состояние захвата
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum GrabState {
    #[default]
    Idle,
    /// Тело под physics handle (non-owning)
    Holding { body: Entity },
}

/// Результат `try_grab`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrabOutcome {
    Grabbed(Entity),
    /// Луч попал в static/kinematic тело
    NotMovable(Entity),
    NoTarget,
    /// Уже держим тело: no-op
    AlreadyHolding,
}

/// Контроллер телекинеза (один на камеру персонажа)
///
/// Автоматически добавляет PhysicsHandle и AimTrace через Required Components.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(PhysicsHandle, AimTrace)]
pub struct TelekinesisController {
    config: TelekinesisConfig,
    assets: TelekinesisAssets,
    anchors: Anchors,
    state: GrabState,
    /// Intended pose в frame камеры (None вне Holding)
    intended: Option<Pose>,
    hold_sound: Option<AudioHandle>,
    hold_sound_spawned: bool,
    hold_duration: f32,
}

impl Default for TelekinesisController {
    fn default() -> Self {
        Self::new(TelekinesisConfig::default(), TelekinesisAssets::default())
    }
}

impl TelekinesisController {
    pub fn new(config: TelekinesisConfig, assets: TelekinesisAssets) -> Self {
        let config = config.validated();
        Self {
            anchors: Anchors::new(config.max_length),
            config,
            assets,
            state: GrabState::Idle,
            intended: None,
            hold_sound: None,
            hold_sound_spawned: false,
            hold_duration: 0.0,
        }
    }

    pub fn config(&self) -> &TelekinesisConfig {
        &self.config
    }

    pub fn assets(&self) -> &TelekinesisAssets {
        &self.assets
    }

    pub fn anchors(&self) -> &Anchors {
        &self.anchors
    }

    pub fn state(&self) -> GrabState {
        self.state
    }

    pub fn is_holding(&self) -> bool {
        matches!(self.state, GrabState::Holding { .. })
    }

    pub fn held_body(&self) -> Option<Entity> {
        match self.state {
            GrabState::Holding { body } => Some(body),
            GrabState::Idle => None,
        }
    }

    /// Intended pose в world для текущей камеры
    pub fn intended_pose(&self, viewpoint: &Viewpoint) -> Option<Pose> {
        self.intended.map(|local| viewpoint.to_world(local))
    }

    pub fn intended_local(&self) -> Option<Pose> {
        self.intended
    }

    pub fn hold_sound(&self) -> Option<AudioHandle> {
        self.hold_sound
    }

    /// Сколько секунд держим текущее тело (0 вне Holding)
    pub fn hold_duration(&self) -> f32 {
        self.hold_duration
    }

    /// Спавн attached hold sound (один раз за жизнь контроллера)
    pub fn spawn_hold_sound(&mut self, feedback: &mut impl FeedbackSink) {
        if self.hold_sound_spawned {
            return;
        }
        self.hold_sound_spawned = true;

        if !self.config.play_hold_sound {
            return;
        }

        let Some(sound) = self.assets.hold_sound.as_ref() else {
            crate::logger::log_warning("Telekinesis: play_hold_sound enabled but hold_sound is not set");
            return;
        };

        self.hold_sound = feedback.play_attached(sound, self.config.hold_volume);
        if let Some(handle) = self.hold_sound {
            feedback.set_paused(handle, self.config.pause_sound_on_spawn);
        }
    }

    /// Попытка схватить тело под прицелом.
    ///
    /// Fire sound/animation играют и при промахе (feedback on miss).
    pub fn try_grab(&mut self, viewpoint: &Viewpoint, host: &mut impl TelekinesisHost) -> GrabOutcome {
        if self.is_holding() {
            return GrabOutcome::AlreadyHolding;
        }

        let outcome = match acquire(viewpoint, &self.anchors, &*host) {
            Some(hit) if hit.is_movable() => {
                self.grab(viewpoint, hit, host);
                GrabOutcome::Grabbed(hit.body)
            }
            Some(hit) => GrabOutcome::NotMovable(hit.body),
            None => GrabOutcome::NoTarget,
        };

        self.play_fire_feedback(viewpoint, host);
        outcome
    }

    fn grab(&mut self, viewpoint: &Viewpoint, hit: RayHit, host: &mut impl TelekinesisHost) {
        // Ориентация захвата: вдоль направления камера → точка попадания
        let rotation = Viewpoint::looking_along(viewpoint.position, hit.position - viewpoint.position)
            .rotation;
        let target = Pose::new(hit.position, rotation);

        host.attach(hit.body, hit.position, rotation);
        self.intended = Some(viewpoint.to_local(target));
        host.set_target(target.position, target.rotation);

        self.state = GrabState::Holding { body: hit.body };
        self.hold_duration = 0.0;

        if self.config.affect_highlight {
            host.set_highlight(hit.body, true);
        }
        self.set_hold_sound_playing(host, true);

        crate::logger::log(&format!(
            "Telekinesis: grabbed {:?} at {:?}",
            hit.body, hit.position
        ));
    }

    /// Отпустить тело (кнопка отпущена). Безопасно из любого состояния.
    pub fn release(&mut self, host: &mut impl TelekinesisHost) {
        let was_holding = self.is_holding();
        self.clear_hold();

        match host.current_body() {
            Some(body) => {
                if self.config.affect_highlight {
                    host.set_highlight(body, false);
                }
                host.detach();
                self.set_hold_sound_playing(host, false);
                crate::logger::log(&format!("Telekinesis: released {:?}", body));
            }
            // Тело исчезло под handle'ом: считаем уже отпущенным, чистим handle
            None if was_holding => {
                host.detach();
                self.set_hold_sound_playing(host, false);
            }
            None => {}
        }
    }

    fn clear_hold(&mut self) {
        self.state = GrabState::Idle;
        self.intended = None;
        self.hold_duration = 0.0;
    }

    fn set_hold_sound_playing(&self, feedback: &mut impl FeedbackSink, playing: bool) {
        if let Some(handle) = self.hold_sound {
            feedback.set_paused(handle, !playing);
        }
    }

    fn play_fire_feedback(&self, viewpoint: &Viewpoint, feedback: &mut impl FeedbackSink) {
        if let Some(sound) = self.assets.fire_sound.as_ref() {
            feedback.play_at(sound, viewpoint.position);
        }
        if let Some(animation) = self.assets.fire_animation.as_ref() {
            feedback.play_animation(animation);
        }
    }
}
