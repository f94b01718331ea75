//! System: TelekinesisInput → операции контроллера

use bevy::prelude::*;

use super::host::TelekinesisBackend;
use crate::telekinesis::components::{AimTrace, PhysicsHandle, Viewpoint};
use crate::telekinesis::controller::{GrabOutcome, TelekinesisController, ThrowOutcome};
use crate::telekinesis::events::{
    ObjectGrabbed, ObjectReleased, ReleaseReason, TelekinesisAction, TelekinesisInput,
};

/// System: обработка input событий (grab/release/throw/step)
///
/// Неверный caster или неверное состояние: тихий no-op.
pub fn process_telekinesis_input(
    mut input_events: EventReader<TelekinesisInput>,
    mut casters: Query<(
        &GlobalTransform,
        &mut TelekinesisController,
        &mut PhysicsHandle,
        &AimTrace,
    )>,
    mut backend: TelekinesisBackend,
    mut grabbed_events: EventWriter<ObjectGrabbed>,
    mut released_events: EventWriter<ObjectReleased>,
) {
    for input in input_events.read() {
        let Ok((transform, mut controller, mut handle, trace)) = casters.get_mut(input.caster) else {
            continue;
        };

        let viewpoint = Viewpoint::from_global_transform(transform);
        let held_before = controller.held_body();

        let mut host = backend.host(input.caster, &mut handle, trace);
        let reason = match input.action {
            TelekinesisAction::GrabPressed => {
                if let GrabOutcome::Grabbed(body) = controller.try_grab(&viewpoint, &mut host) {
                    grabbed_events.write(ObjectGrabbed {
                        caster: input.caster,
                        body,
                    });
                }
                None
            }
            TelekinesisAction::GrabReleased => {
                controller.release(&mut host);
                Some(ReleaseReason::Released)
            }
            TelekinesisAction::ThrowPressed => match controller.throw(&viewpoint, &mut host) {
                ThrowOutcome::Thrown(_) => Some(ReleaseReason::Thrown),
                ThrowOutcome::BodyLost => Some(ReleaseReason::BodyLost),
                ThrowOutcome::NotHolding => None,
            },
            TelekinesisAction::StepNearPressed => {
                controller.step_near();
                None
            }
            TelekinesisAction::StepFarPressed => {
                controller.step_far();
                None
            }
        };

        // ObjectReleased только если до input реально держали тело
        if let (Some(reason), Some(_)) = (reason, held_before) {
            released_events.write(ObjectReleased {
                caster: input.caster,
                body: held_before,
                reason,
            });
        }

        let effects = host.into_effects();
        backend.flush(effects, controller.config().effect_lifetime);
    }
}
