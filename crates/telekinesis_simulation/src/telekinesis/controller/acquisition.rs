//! Target acquisition: forward ray от камеры до far anchor

use crate::telekinesis::backend::{RayHit, RaySource};
use crate::telekinesis::components::{Anchors, Viewpoint};

/// Ray cast от viewpoint вдоль forward.
///
/// Длина = расстояние до far anchor, поэтому reach всегда совпадает с `max_length`.
/// Возвращает любой blocking hit (включая static/kinematic): годность для захвата
/// проверяет вызывающий через `RayHit::is_movable`.
pub fn acquire(viewpoint: &Viewpoint, anchors: &Anchors, rays: &impl RaySource) -> Option<RayHit> {
    let (_, far) = anchors.world(viewpoint);
    let length = viewpoint.position.distance(far);

    rays.cast_ray(viewpoint.position, viewpoint.forward(), length)
}
