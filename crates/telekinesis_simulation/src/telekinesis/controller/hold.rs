//! Hold tracker (per tick) + step adjust (near/far anchors)

use bevy::prelude::*;

use super::{GrabState, TelekinesisController};
use crate::telekinesis::backend::TelekinesisHost;
use crate::telekinesis::components::{step_towards, Viewpoint};

/// Результат тика удержания
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoldStatus {
    /// Ничего не держим: тик ничего не делал
    Idle,
    /// Тело в пределах `fail_distance`, target handle'а обновлён
    Tracking { distance: f32 },
    /// Тело оторвалось дальше `fail_distance` → forced detach
    Overstretched { distance: f32 },
    /// Тело исчезло под handle'ом → forced detach
    BodyLost,
}

impl HoldStatus {
    pub fn is_forced_release(&self) -> bool {
        matches!(self, HoldStatus::Overstretched { .. } | HoldStatus::BodyLost)
    }
}

impl TelekinesisController {
    /// Тик удержания. Вызывается каждый кадр ДО обработки input.
    ///
    /// distance(тело, intended) < fail_distance → обновляем target handle'а,
    /// иначе (включая равенство) → forced detach.
    pub fn tick(
        &mut self,
        viewpoint: &Viewpoint,
        delta_secs: f32,
        host: &mut impl TelekinesisHost,
    ) -> HoldStatus {
        let GrabState::Holding { .. } = self.state else {
            return HoldStatus::Idle;
        };

        let held = host
            .current_body()
            .and_then(|body| host.body_pose(body).map(|(position, _)| (body, position)));
        let (Some((body, position)), Some(target)) = (held, self.intended_pose(viewpoint)) else {
            self.force_detach(None, host);
            crate::logger::log_warning("Telekinesis: held body vanished, handle released");
            return HoldStatus::BodyLost;
        };

        let distance = position.distance(target.position);
        if distance < self.config.fail_distance {
            host.set_target(target.position, target.rotation);
            self.hold_duration += delta_secs;
            HoldStatus::Tracking { distance }
        } else {
            self.force_detach(Some(body), host);
            crate::logger::log_warning(&format!(
                "Telekinesis: {:?} overstretched ({:.1} >= {:.1}), forced detach",
                body, distance, self.config.fail_distance
            ));
            HoldStatus::Overstretched { distance }
        }
    }

    fn force_detach(&mut self, body: Option<Entity>, host: &mut impl TelekinesisHost) {
        if let (true, Some(body)) = (self.config.affect_highlight, body) {
            host.set_highlight(body, false);
        }
        host.detach();
        self.clear_hold();
        self.set_hold_sound_playing(host, false);
    }

    /// Шаг intended pose к near anchor (к камере). true если pose сдвинулась.
    pub fn step_near(&mut self) -> bool {
        let anchor = self.anchors.near;
        self.step_to(anchor)
    }

    /// Шаг intended pose к far anchor (от камеры). true если pose сдвинулась.
    pub fn step_far(&mut self) -> bool {
        let anchor = self.anchors.far;
        self.step_to(anchor)
    }

    // Anchors и intended оба в frame камеры: шаг не зависит от текущего viewpoint
    fn step_to(&mut self, anchor: Vec3) -> bool {
        if !self.is_holding() {
            return false;
        }
        let step = self.config.step_distance;
        let Some(pose) = self.intended.as_mut() else {
            return false;
        };

        let next = step_towards(pose.position, anchor, step);
        let moved = next != pose.position;
        pose.position = next;
        moved
    }
}
