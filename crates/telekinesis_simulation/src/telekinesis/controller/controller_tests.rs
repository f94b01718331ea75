//! Tests for grab / release / throw.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use super::super::mock_host::{Call, MockHost};
    use super::super::{GrabOutcome, GrabState, TelekinesisController, ThrowOutcome};
    use crate::telekinesis::backend::{AnimationId, EffectId, Mobility, SoundId};
    use crate::telekinesis::components::{TelekinesisAssets, TelekinesisConfig, Viewpoint};

    fn full_assets() -> TelekinesisAssets {
        TelekinesisAssets {
            hold_sound: Some(SoundId("hold".into())),
            throw_sound: Some(SoundId("throw".into())),
            fire_sound: Some(SoundId("fire".into())),
            fire_animation: Some(AnimationId("fire_montage".into())),
            throw_effect: Some(EffectId("sparks".into())),
        }
    }

    fn facing_x() -> Viewpoint {
        Viewpoint::looking_along(Vec3::ZERO, Vec3::X)
    }

    fn body() -> Entity {
        Entity::from_raw(42)
    }

    #[test]
    fn test_grab_movable_body() {
        let mut controller = TelekinesisController::default();
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);

        let outcome = controller.try_grab(&facing_x(), &mut host);

        assert_eq!(outcome, GrabOutcome::Grabbed(body()));
        assert_eq!(controller.state(), GrabState::Holding { body: body() });
        let intended = controller.intended_pose(&facing_x()).expect("intended pose");
        assert!(intended.position.abs_diff_eq(Vec3::new(500.0, 0.0, 0.0), 1e-3));

        assert_eq!(host.attached, Some(body()));
        assert!(host.calls.contains(&Call::Attach {
            body: body(),
            grab_point: Vec3::new(500.0, 0.0, 0.0),
        }));
        let target = host.last_target().expect("target issued on grab");
        assert!(target.abs_diff_eq(Vec3::new(500.0, 0.0, 0.0), 1e-3));
        assert!(host.calls.contains(&Call::Highlight {
            body: body(),
            enabled: true,
        }));
    }

    #[test]
    fn test_grab_static_body_rejected() {
        let mut controller = TelekinesisController::new(TelekinesisConfig::default(), full_assets());
        let mut host = MockHost::with_body(body(), Vec3::new(300.0, 0.0, 0.0), Mobility::Static);

        let outcome = controller.try_grab(&facing_x(), &mut host);

        assert_eq!(outcome, GrabOutcome::NotMovable(body()));
        assert!(!controller.is_holding());
        assert_eq!(host.constraint_calls(), 0);
        // Fire feedback всё равно играет
        assert_eq!(host.count(|call| matches!(call, Call::PlayAt { .. })), 1);
    }

    #[test]
    fn test_miss_still_fires_cosmetics() {
        let mut controller = TelekinesisController::new(TelekinesisConfig::default(), full_assets());
        let mut host = MockHost::default();

        let outcome = controller.try_grab(&facing_x(), &mut host);

        assert_eq!(outcome, GrabOutcome::NoTarget);
        assert!(!controller.is_holding());
        assert!(host.calls.contains(&Call::PlayAt {
            sound: SoundId("fire".into()),
        }));
        assert!(host.calls.contains(&Call::Animation {
            animation: AnimationId("fire_montage".into()),
        }));
    }

    #[test]
    fn test_target_beyond_reach_is_miss() {
        let config = TelekinesisConfig {
            max_length: 400.0,
            ..Default::default()
        };
        let mut controller = TelekinesisController::new(config, TelekinesisAssets::default());
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);

        assert_eq!(controller.try_grab(&facing_x(), &mut host), GrabOutcome::NoTarget);
        assert!(!controller.is_holding());
    }

    #[test]
    fn test_grab_while_holding_is_noop() {
        let mut controller = TelekinesisController::new(TelekinesisConfig::default(), full_assets());
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);
        controller.try_grab(&facing_x(), &mut host);
        host.clear_calls();

        let outcome = controller.try_grab(&facing_x(), &mut host);

        assert_eq!(outcome, GrabOutcome::AlreadyHolding);
        assert!(host.calls.is_empty());
        assert!(controller.is_holding());
    }

    #[test]
    fn test_grab_then_release() {
        let mut controller = TelekinesisController::default();
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);

        controller.try_grab(&facing_x(), &mut host);
        controller.release(&mut host);

        assert!(!controller.is_holding());
        assert!(controller.intended_local().is_none());
        assert!(host.attached.is_none());
        assert!(host.calls.contains(&Call::Highlight {
            body: body(),
            enabled: false,
        }));
    }

    #[test]
    fn test_release_when_idle_is_noop() {
        let mut controller = TelekinesisController::default();
        let mut host = MockHost::default();

        controller.release(&mut host);
        controller.release(&mut host);

        assert!(host.calls.is_empty());
        assert_eq!(controller.state(), GrabState::Idle);
    }

    #[test]
    fn test_release_after_body_vanished() {
        let mut controller = TelekinesisController::default();
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);
        controller.try_grab(&facing_x(), &mut host);
        host.despawn_body(body());
        host.clear_calls();

        controller.release(&mut host);

        assert!(!controller.is_holding());
        assert_eq!(host.calls, vec![Call::Detach]);
    }

    #[test]
    fn test_highlight_disabled() {
        let config = TelekinesisConfig {
            affect_highlight: false,
            ..Default::default()
        };
        let mut controller = TelekinesisController::new(config, TelekinesisAssets::default());
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);

        controller.try_grab(&facing_x(), &mut host);
        controller.release(&mut host);

        assert_eq!(host.count(|call| matches!(call, Call::Highlight { .. })), 0);
    }

    #[test]
    fn test_throw_when_idle_is_noop() {
        let mut controller = TelekinesisController::new(TelekinesisConfig::default(), full_assets());
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);

        assert_eq!(
            controller.throw(&facing_x(), &mut host),
            ThrowOutcome::NotHolding
        );

        assert_eq!(controller.state(), GrabState::Idle);
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_throw_held_body() {
        let mut controller = TelekinesisController::new(TelekinesisConfig::default(), full_assets());
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);
        controller.spawn_hold_sound(&mut host);
        controller.try_grab(&facing_x(), &mut host);
        host.clear_calls();

        assert_eq!(
            controller.throw(&facing_x(), &mut host),
            ThrowOutcome::Thrown(body())
        );

        assert!(!controller.is_holding());
        assert!(host.attached.is_none());

        let impulse = host.calls.iter().find_map(|call| match call {
            Call::Impulse { body, impulse } => Some((*body, *impulse)),
            _ => None,
        });
        let (thrown, impulse) = impulse.expect("impulse applied");
        assert_eq!(thrown, body());
        assert!(impulse.abs_diff_eq(Vec3::new(4000.0, 0.0, 0.0), 1e-2));

        assert!(host.calls.contains(&Call::Play2d {
            sound: SoundId("throw".into()),
        }));
        assert!(host.calls.contains(&Call::SpawnEffect {
            prototype: EffectId("sparks".into()),
            position: Vec3::new(500.0, 0.0, 0.0),
        }));
        assert!(host.calls.contains(&Call::SetPaused {
            handle: crate::telekinesis::backend::AudioHandle(1),
            paused: true,
        }));
        assert_eq!(host.calls.last(), Some(&Call::Detach));
    }

    #[test]
    fn test_throw_after_body_vanished_releases() {
        let mut controller = TelekinesisController::new(TelekinesisConfig::default(), full_assets());
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);
        controller.try_grab(&facing_x(), &mut host);
        host.despawn_body(body());
        host.clear_calls();

        assert_eq!(
            controller.throw(&facing_x(), &mut host),
            ThrowOutcome::BodyLost
        );

        assert!(!controller.is_holding());
        assert_eq!(host.count(|call| matches!(call, Call::Impulse { .. })), 0);
        assert_eq!(host.count(|call| matches!(call, Call::Play2d { .. })), 0);
        assert!(host.calls.contains(&Call::Detach));
    }

    #[test]
    fn test_throw_without_assets_still_throws() {
        let mut controller = TelekinesisController::default();
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);
        controller.try_grab(&facing_x(), &mut host);

        assert_eq!(
            controller.throw(&facing_x(), &mut host),
            ThrowOutcome::Thrown(body())
        );

        assert_eq!(host.count(|call| matches!(call, Call::Impulse { .. })), 1);
        assert_eq!(host.count(|call| matches!(call, Call::SpawnEffect { .. })), 0);
        assert_eq!(host.count(|call| matches!(call, Call::Play2d { .. })), 0);
    }

    #[test]
    fn test_hold_sound_lifecycle() {
        let mut controller = TelekinesisController::new(TelekinesisConfig::default(), full_assets());
        let mut host = MockHost::with_body(body(), Vec3::new(500.0, 0.0, 0.0), Mobility::Movable);

        controller.spawn_hold_sound(&mut host);
        controller.spawn_hold_sound(&mut host);
        assert_eq!(host.count(|call| matches!(call, Call::PlayAttached { .. })), 1);
        // Спавн на паузе
        assert_eq!(
            host.calls.last(),
            Some(&Call::SetPaused {
                handle: crate::telekinesis::backend::AudioHandle(1),
                paused: true,
            })
        );

        host.clear_calls();
        controller.try_grab(&facing_x(), &mut host);
        assert!(host.calls.contains(&Call::SetPaused {
            handle: crate::telekinesis::backend::AudioHandle(1),
            paused: false,
        }));
    }

    #[test]
    fn test_hold_sound_missing_asset() {
        let mut controller = TelekinesisController::default();
        let mut host = MockHost::default();

        controller.spawn_hold_sound(&mut host);

        assert!(controller.hold_sound().is_none());
        assert!(host.calls.is_empty());
    }
}
