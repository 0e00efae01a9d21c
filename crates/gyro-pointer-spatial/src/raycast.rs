//! Ray / axis-aligned box intersection (slab method).

use crate::Vector3D;

/// Direction components smaller than this are treated as parallel to the slab
const PARALLEL_EPSILON: f64 = 1e-8;

/// Intersect a ray with an axis-aligned box.
///
/// `direction` is normalized internally. Returns the first point where the ray
/// enters the box, or where it leaves the box when `origin` is already inside.
/// `None` means the ray misses: that is an ordinary outcome, not an error.
///
/// # Arguments
/// * `origin` - Ray origin, usually the user's position in the venue
/// * `direction` - Pointing direction (any non-zero length)
/// * `box_min` - Minimum corner of the box
/// * `box_max` - Maximum corner of the box
pub fn intersect(
    origin: Vector3D,
    direction: Vector3D,
    box_min: Vector3D,
    box_max: Vector3D,
) -> Option<Vector3D> {
    let direction = direction.normalize();

    let mut t_near = f64::NEG_INFINITY;
    let mut t_far = f64::INFINITY;

    for i in 0..3 {
        let o = origin.axis(i);
        let d = direction.axis(i);
        let lo = box_min.axis(i);
        let hi = box_max.axis(i);

        if d.abs() < PARALLEL_EPSILON {
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let mut t1 = (lo - o) / d;
        let mut t2 = (hi - o) / d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        t_near = t_near.max(t1);
        t_far = t_far.min(t2);

        if t_near > t_far {
            return None;
        }
    }

    // Box entirely behind the origin
    if t_far < 0.0 {
        return None;
    }

    let t = if t_near >= 0.0 { t_near } else { t_far };
    Some(origin + direction * t)
}
