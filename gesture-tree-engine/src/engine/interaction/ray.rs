use bevy::prelude::*;

/// Normalised cursor (origin top left, y down) to normalised device
/// coordinates (origin centre, y up).
pub fn cursor_to_ndc(cursor: Vec2) -> Vec2 {
    Vec2::new(cursor.x * 2.0 - 1.0, -(cursor.y * 2.0 - 1.0))
}

/// World-space ray through the cursor for a perspective camera. `fov` is the
/// vertical field of view in radians.
pub fn pointer_ray(cursor: Vec2, camera: &Transform, fov: f32, aspect: f32) -> Option<Ray3d> {
    let ndc = cursor_to_ndc(cursor);
    let half_height = (fov * 0.5).tan();
    let view_dir = Vec3::new(ndc.x * half_height * aspect, ndc.y * half_height, -1.0);
    let direction = Dir3::new(camera.rotation * view_dir).ok()?;
    Some(Ray3d::new(camera.translation, direction))
}

/// Distance along `ray` to a box of `size` centred on `xf`, in world units.
pub fn ray_hits_obb(ray: &Ray3d, xf: &Transform, size: Vec3) -> Option<f32> {
    let to_local = xf.compute_matrix().inverse();
    let origin = to_local.transform_point3(ray.origin);
    let direction = to_local.transform_vector3(ray.direction.as_vec3());
    let half = size * 0.5;

    // Local direction is scaled with the box, so rescale t back to world units.
    let t_local = ray_aabb_hit_t(origin, direction, -half, half)?;
    let world_hit = xf.compute_matrix().transform_point3(origin + direction * t_local);
    Some(world_hit.distance(ray.origin))
}

/// Slab-method ray against an axis-aligned box. Returns the entry distance,
/// or the exit distance when the origin is inside.
pub fn ray_aabb_hit_t(origin: Vec3, direction: Vec3, min: Vec3, max: Vec3) -> Option<f32> {
    let mut t_enter = f32::NEG_INFINITY;
    let mut t_exit = f32::INFINITY;

    for axis in 0..3 {
        let (o, d) = (origin[axis], direction[axis]);
        if d == 0.0 {
            if o < min[axis] || o > max[axis] {
                return None;
            }
            continue;
        }

        let inv = 1.0 / d;
        let (mut near, mut far) = ((min[axis] - o) * inv, (max[axis] - o) * inv);
        if near > far {
            std::mem::swap(&mut near, &mut far);
        }
        t_enter = t_enter.max(near);
        t_exit = t_exit.min(far);
        if t_enter > t_exit {
            return None;
        }
    }

    if t_exit < 0.0 {
        return None;
    }
    Some(if t_enter >= 0.0 { t_enter } else { t_exit })
}
