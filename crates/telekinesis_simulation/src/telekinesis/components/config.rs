//! Конфигурация телекинеза (дальность, прочность удержания, бросок, звук)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::telekinesis::backend::{AnimationId, EffectId, SoundId};

/// Нижняя граница `fail_distance`: меньше: пружина handle'а рвётся на обычных рывках
pub const MIN_FAIL_DISTANCE: f32 = 200.0;

/// Параметры телекинеза (world units = единицы движка)
#[derive(Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct TelekinesisConfig {
    /// Длина луча и расстояние до far anchor
    pub max_length: f32,
    /// Макс. отклонение тела от intended pose до forced detach
    pub fail_distance: f32,
    /// Сила броска (velocity change)
    pub impulse_strength: f32,
    /// Шаг перемещения intended pose к near/far anchor за одно нажатие
    pub step_distance: f32,
    pub hold_volume: f32,
    pub throw_volume: f32,
    /// Спавнить attached hold sound при старте
    pub play_hold_sound: bool,
    /// Hold sound спавнится на паузе (играет только во время удержания)
    pub pause_sound_on_spawn: bool,
    /// Подсвечивать схваченное тело
    pub affect_highlight: bool,
    /// Время жизни эффекта броска (секунды)
    pub effect_lifetime: f32,
}

impl Default for TelekinesisConfig {
    fn default() -> Self {
        Self {
            max_length: 2000.0,
            fail_distance: 1000.0,
            impulse_strength: 4000.0,
            step_distance: 150.0,
            hold_volume: 1.0,
            throw_volume: 1.0,
            play_hold_sound: true,
            pause_sound_on_spawn: true,
            affect_highlight: true,
            effect_lifetime: 2.0,
        }
    }
}

impl TelekinesisConfig {
    /// Применяет ограничения (ClampMin) и логирует каждую правку
    pub fn validated(mut self) -> Self {
        clamp_min(&mut self.max_length, 0.0, "max_length");
        clamp_min(&mut self.fail_distance, MIN_FAIL_DISTANCE, "fail_distance");
        clamp_min(&mut self.impulse_strength, 0.0, "impulse_strength");
        clamp_min(&mut self.step_distance, 0.0, "step_distance");
        clamp_min(&mut self.hold_volume, 0.0, "hold_volume");
        clamp_min(&mut self.throw_volume, 0.0, "throw_volume");
        clamp_min(&mut self.effect_lifetime, 0.0, "effect_lifetime");
        self
    }

    /// Парсит JSON (недостающие поля: default) и валидирует
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.validated())
    }
}

fn clamp_min(value: &mut f32, min: f32, name: &str) {
    // NaN тоже сюда: !(NaN >= min)
    if !(*value >= min) {
        crate::logger::log_warning(&format!(
            "TelekinesisConfig: {} = {} below minimum, clamped to {}",
            name, value, min
        ));
        *value = min;
    }
}

/// Опциональные ассеты. Отсутствующий ассет = пропуск косметики (+ warning), механика работает.
#[derive(Debug, Clone, Default, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct TelekinesisAssets {
    pub hold_sound: Option<SoundId>,
    pub throw_sound: Option<SoundId>,
    pub fire_sound: Option<SoundId>,
    pub fire_animation: Option<AnimationId>,
    pub throw_effect: Option<EffectId>,
}
