//! Telekinesis Simulation Core
//!
//! Bevy 0.16 ECS + Rapier: grab-and-hold constraint controller для first-person персонажа.
//! - telekinesis: контроллер, capability traits, ECS системы
//! - logger: pluggable логгер (ConsoleLogger по умолчанию)
//!
//! Движение персонажа, input mapping, рендер и ассеты: снаружи (хост).

use bevy::prelude::*;

// Публичные модули
pub mod logger;
pub mod telekinesis;

// Re-export основных типов для удобства
pub use telekinesis::{
    spawn_telekinesis_caster, GrabOutcome, GrabState, HoldStatus, ObjectGrabbed, ObjectReleased,
    ReleaseReason, TelekinesisAction, TelekinesisAssets, TelekinesisConfig, TelekinesisController,
    TelekinesisFeedback, TelekinesisInput, TelekinesisPlugin, ThrowOutcome, Viewpoint,
};

/// Главный plugin симуляции
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TelekinesisPlugin);
    }
}

/// Создаёт minimal Bevy App для headless симуляции (тесты, demo)
///
/// Без Rapier: физику хост добавляет сам (`RapierPhysicsPlugin`).
pub fn create_headless_app() -> App {
    let mut app = App::new();
    logger::init_logger();
    app.add_plugins((MinimalPlugins, bevy::transform::TransformPlugin))
        .add_plugins(SimulationPlugin);

    app
}
