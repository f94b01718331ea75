//! Telekinesis systems (ECS integration)

pub mod host;
pub mod input;
pub mod physics;
pub mod tracking;

pub use host::{EcsHost, FeedbackHandles, TelekinesisBackend};
pub use input::process_telekinesis_input;
pub use physics::{drive_physics_handles, expire_throw_effects};
pub use tracking::{init_hold_sounds, mobility_of, refresh_aim_traces, track_held_bodies};
