//! ECS компоненты телекинеза
//!
//! - aim_trace: AimTrace (forward ray cast камеры за кадр)
//! - config: TelekinesisConfig, TelekinesisAssets
//! - viewpoint: Viewpoint, Pose, Anchors (frame камеры)
//! - physics_handle: PhysicsHandle (constraint state), Highlighted
//! - effects: ThrowEffect

pub mod aim_trace;
pub mod config;
pub mod effects;
pub mod physics_handle;
pub mod viewpoint;


pub use aim_trace::AimTrace;
pub use config::{TelekinesisAssets, TelekinesisConfig, MIN_FAIL_DISTANCE};
pub use effects::ThrowEffect;
pub use physics_handle::{Highlighted, PhysicsHandle};
pub use viewpoint::{step_towards, Anchors, Pose, Viewpoint};
