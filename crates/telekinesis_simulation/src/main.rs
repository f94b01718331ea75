//! Headless demo телекинеза
//!
//! Rapier + камера-caster + ящик: grab → отдаляем → бросаем, события пишем в лог.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use telekinesis_simulation::{
    create_headless_app, logger, spawn_telekinesis_caster, ObjectGrabbed, ObjectReleased,
    TelekinesisAction, TelekinesisAssets, TelekinesisConfig, TelekinesisController,
    TelekinesisInput,
};

/// Единицы мира: сантиметры (max_length 2000 = 20 м)
const LENGTH_UNIT: f32 = 100.0;

fn log_telekinesis_events(
    mut grabbed: EventReader<ObjectGrabbed>,
    mut released: EventReader<ObjectReleased>,
) {
    for event in grabbed.read() {
        logger::log_info(&format!("Grabbed {:?} (caster {:?})", event.body, event.caster));
    }
    for event in released.read() {
        logger::log_info(&format!(
            "Released {:?} (caster {:?}): {:?}",
            event.body, event.caster, event.reason
        ));
    }
}

fn main() {
    let mut app = create_headless_app();
    app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default().with_length_unit(LENGTH_UNIT))
        .add_systems(PostUpdate, log_telekinesis_events);

    let world = app.world_mut();

    world.spawn((
        RigidBody::Fixed,
        Collider::cuboid(5000.0, 10.0, 5000.0),
        Transform::from_xyz(0.0, -10.0, 0.0),
    ));

    let crate_body = world
        .spawn((
            RigidBody::Dynamic,
            Collider::cuboid(25.0, 25.0, 25.0),
            Velocity::default(),
            Transform::from_xyz(0.0, 25.0, -600.0),
        ))
        .id();

    let caster = spawn_telekinesis_caster(
        &mut world.commands(),
        Transform::from_xyz(0.0, 25.0, 0.0),
        TelekinesisConfig::default(),
        TelekinesisAssets::default(),
    );
    world.flush();

    logger::log_info(&format!(
        "Starting telekinesis demo: caster {:?}, crate {:?}",
        caster, crate_body
    ));

    // Первый кадр: Rapier создаёт коллайдеры, aim trace начинает видеть ящик
    for _ in 0..2 {
        app.update();
    }

    let script = [
        (0, TelekinesisAction::GrabPressed),
        (60, TelekinesisAction::StepFarPressed),
        (61, TelekinesisAction::StepFarPressed),
        (62, TelekinesisAction::StepFarPressed),
        (120, TelekinesisAction::StepNearPressed),
        (180, TelekinesisAction::ThrowPressed),
    ];

    for tick in 0..300 {
        for (_, action) in script.iter().filter(|(at, _)| *at == tick) {
            app.world_mut().send_event(TelekinesisInput::new(caster, *action));
        }

        app.update();

        if tick % 60 == 0 {
            let world = app.world();
            let holding = world
                .get::<TelekinesisController>(caster)
                .map(|controller| controller.is_holding())
                .unwrap_or(false);
            let position = world
                .get::<Transform>(crate_body)
                .map(|transform| transform.translation)
                .unwrap_or_default();
            logger::log_info(&format!(
                "Tick {}: holding={} crate at {:?}",
                tick, holding, position
            ));
        }
    }

    logger::log_info("Telekinesis demo complete!");
}
