//! Telekinesis: grab / hold / throw физических тел с камеры персонажа
//!
//! Ядро: `TelekinesisController` (state machine Idle ↔ Holding), generic по capability
//! traits из `backend`. ECS слой (`systems`) реализует их поверх Rapier и events.
//!
//! Порядок в кадре (Update, `.chain()`):
//! 1. init_hold_sounds: hold sound для новых контроллеров
//! 2. refresh_aim_traces: forward ray cast камеры (Rapier)
//! 3. track_held_bodies: hold tracker (может сделать forced detach)
//! 4. process_telekinesis_input: grab/release/throw/step
//! 5. drive_physics_handles: velocity spring к target pose
//! 6. expire_throw_effects: lifetime эффектов
//!
//! Rapier step идёт после, в PostUpdate.

use bevy::prelude::*;

pub mod backend;
pub mod components;
pub mod controller;
pub mod events;
pub mod systems;

pub use backend::{
    AnimationId, AudioHandle, BodyAccess, ConstraintSink, EffectId, FeedbackSink, Mobility,
    RayHit, RaySource, SoundId, TelekinesisHost,
};
pub use components::{
    AimTrace, Anchors, Highlighted, PhysicsHandle, Pose, TelekinesisAssets, TelekinesisConfig,
    ThrowEffect, Viewpoint,
};
pub use controller::{GrabOutcome, GrabState, HoldStatus, TelekinesisController, ThrowOutcome};
pub use events::{
    ObjectGrabbed, ObjectReleased, ReleaseReason, TelekinesisAction, TelekinesisFeedback,
    TelekinesisInput,
};
pub use systems::FeedbackHandles;

/// Telekinesis Plugin
///
/// Rapier plugin добавляет хост: без него aim trace не обновляется (headless тесты
/// заполняют AimTrace сами).
pub struct TelekinesisPlugin;

impl Plugin for TelekinesisPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TelekinesisInput>()
            .add_event::<TelekinesisFeedback>()
            .add_event::<ObjectGrabbed>()
            .add_event::<ObjectReleased>()
            .init_resource::<FeedbackHandles>()
            .register_type::<TelekinesisController>()
            .register_type::<PhysicsHandle>()
            .register_type::<AimTrace>()
            .register_type::<Highlighted>()
            .register_type::<ThrowEffect>();

        app.add_systems(
            Update,
            (
                systems::init_hold_sounds,
                systems::refresh_aim_traces,
                systems::track_held_bodies,
                systems::process_telekinesis_input,
                systems::drive_physics_handles,
                systems::expire_throw_effects,
            )
                .chain(), // Hold check строго до input
        );
    }
}

/// Spawn helper: камера-caster с контроллером телекинеза
///
/// PhysicsHandle и AimTrace добавляются через Required Components.
pub fn spawn_telekinesis_caster(
    commands: &mut Commands,
    transform: Transform,
    config: TelekinesisConfig,
    assets: TelekinesisAssets,
) -> Entity {
    commands
        .spawn((
            TelekinesisController::new(config, assets),
            transform,
            GlobalTransform::from(transform),
        ))
        .id()
}
