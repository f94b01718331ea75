//! Per-frame системы: hold sound при спавне, aim trace, hold tracking

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::host::TelekinesisBackend;
use crate::telekinesis::backend::{Mobility, RayHit};
use crate::telekinesis::components::{AimTrace, PhysicsHandle, Viewpoint};
use crate::telekinesis::controller::{HoldStatus, TelekinesisController};
use crate::telekinesis::events::{ObjectReleased, ReleaseReason};

/// System: спавн attached hold sound для новых контроллеров (BeginPlay)
pub fn init_hold_sounds(
    mut casters: Query<(Entity, &mut TelekinesisController), Added<TelekinesisController>>,
    mut backend: TelekinesisBackend,
) {
    for (caster, mut controller) in casters.iter_mut() {
        let mut recorder = backend.recorder(caster);
        controller.spawn_hold_sound(&mut recorder);
        let effects = recorder.into_effects();
        backend.flush(effects, controller.config().effect_lifetime);
    }
}

/// System: forward ray cast камеры через Rapier → AimTrace
///
/// Без Rapier контекста (headless тесты) trace не трогаем.
pub fn refresh_aim_traces(
    rapier_context: ReadRapierContext,
    mut casters: Query<(
        Entity,
        &GlobalTransform,
        &TelekinesisController,
        Option<&ChildOf>,
        &mut AimTrace,
    )>,
    bodies: Query<(Option<&RigidBody>, Option<&ChildOf>)>,
) {
    let Ok(context) = rapier_context.single() else {
        return;
    };

    for (caster, transform, controller, parent, mut trace) in casters.iter_mut() {
        let viewpoint = Viewpoint::from_global_transform(transform);

        // Не попадаем в самого себя (камера и тело персонажа)
        let mut filter = QueryFilter::default()
            .exclude_sensors()
            .exclude_collider(caster)
            .exclude_rigid_body(caster);
        if let Some(parent) = parent {
            filter = filter
                .exclude_collider(parent.parent())
                .exclude_rigid_body(parent.parent());
        }

        let hit = context
            .cast_ray_and_get_normal(
                viewpoint.position,
                viewpoint.forward(),
                controller.config().max_length,
                true,
                filter,
            )
            .map(|(entity, intersection)| {
                let (body, mobility) = resolve_body(entity, &bodies);
                RayHit {
                    position: intersection.point,
                    normal: intersection.normal,
                    body,
                    mobility,
                }
            });

        *trace = AimTrace::new(viewpoint.position, hit);
    }
}

/// Коллайдер может висеть на child entity: rigid body ищем у него или у parent
fn resolve_body(
    entity: Entity,
    bodies: &Query<(Option<&RigidBody>, Option<&ChildOf>)>,
) -> (Entity, Mobility) {
    let Ok((rigid_body, parent)) = bodies.get(entity) else {
        return (entity, Mobility::Static);
    };

    if let Some(rigid_body) = rigid_body {
        return (entity, mobility_of(rigid_body));
    }

    parent
        .and_then(|parent| {
            let owner = parent.parent();
            bodies
                .get(owner)
                .ok()
                .and_then(|(rigid_body, _)| rigid_body)
                .map(|rigid_body| (owner, mobility_of(rigid_body)))
        })
        .unwrap_or((entity, Mobility::Static))
}

pub fn mobility_of(rigid_body: &RigidBody) -> Mobility {
    match rigid_body {
        RigidBody::Dynamic => Mobility::Movable,
        RigidBody::KinematicPositionBased | RigidBody::KinematicVelocityBased => Mobility::Kinematic,
        RigidBody::Fixed => Mobility::Static,
    }
}

/// System: hold tracker для всех caster'ов
///
/// Запускается ДО `process_telekinesis_input`: forced detach этого кадра виден input'у.
pub fn track_held_bodies(
    time: Res<Time>,
    mut casters: Query<(
        Entity,
        &GlobalTransform,
        &mut TelekinesisController,
        &mut PhysicsHandle,
        &AimTrace,
    )>,
    mut backend: TelekinesisBackend,
    mut released_events: EventWriter<ObjectReleased>,
) {
    let delta = time.delta_secs();

    for (caster, transform, mut controller, mut handle, trace) in casters.iter_mut() {
        if !controller.is_holding() {
            continue;
        }

        let viewpoint = Viewpoint::from_global_transform(transform);
        let body = controller.held_body();

        let mut host = backend.host(caster, &mut handle, trace);
        let status = controller.tick(&viewpoint, delta, &mut host);
        let effects = host.into_effects();
        backend.flush(effects, controller.config().effect_lifetime);

        let reason = match status {
            HoldStatus::Overstretched { .. } => ReleaseReason::Overstretched,
            HoldStatus::BodyLost => ReleaseReason::BodyLost,
            HoldStatus::Idle | HoldStatus::Tracking { .. } => continue,
        };

        released_events.write(ObjectReleased {
            caster,
            body,
            reason,
        });
    }
}
