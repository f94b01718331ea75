//! Physics handle drive + lifetime эффектов броска

use bevy::prelude::*;
use bevy_rapier3d::prelude::Velocity;

use crate::telekinesis::components::{PhysicsHandle, ThrowEffect};

/// System: ведёт схваченные тела к target pose handle'а (velocity spring)
///
/// Запускается после input, до Rapier step (PostUpdate).
/// Тело без Velocity или уже despawn'нутое пропускаем: hold tracker разберётся.
pub fn drive_physics_handles(
    handles: Query<&PhysicsHandle>,
    mut bodies: Query<(&Transform, &mut Velocity), Without<PhysicsHandle>>,
) {
    for handle in handles.iter() {
        let Some(body) = handle.grabbed else {
            continue;
        };
        let Ok((transform, mut velocity)) = bodies.get_mut(body) else {
            continue;
        };

        let (linvel, angvel) = handle.drive_velocities(transform.translation, transform.rotation);
        velocity.linvel = linvel;
        velocity.angvel = angvel;
    }
}

/// System: despawn эффектов броска по таймеру
pub fn expire_throw_effects(
    mut commands: Commands,
    mut effects: Query<(Entity, &mut ThrowEffect)>,
    time: Res<Time>,
) {
    let delta = time.delta_secs();

    for (entity, mut effect) in effects.iter_mut() {
        if effect.tick(delta) {
            commands.entity(entity).despawn();
        }
    }
}
