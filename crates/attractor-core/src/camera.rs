//! Screen to world projection of pointer input.

use glam::{Mat4, Vec2, Vec3};

/// Camera orientation and lens, as needed to unproject pointer input.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraBasis {
    pub position: Vec3,
    /// Look-at point. Its distance from `position` sets the focal plane.
    pub target: Vec3,
    pub up: Vec3,
    pub right: Vec3,
    /// Vertical field of view in radians.
    pub fovy: f32,
    pub aspect_ratio: f32,
}

impl CameraBasis {
    /// Derive an orthonormal basis for a camera at `position` looking at `target`.
    pub fn look_at(position: Vec3, target: Vec3, world_up: Vec3, fovy: f32, aspect_ratio: f32) -> Self {
        let forward = (target - position).normalize_or_zero();
        let right = forward.cross(world_up).normalize_or_zero();
        let up = right.cross(forward);
        Self {
            position,
            target,
            up,
            right,
            fovy,
            aspect_ratio,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self, near: f32, far: f32) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy, self.aspect_ratio, near, far)
    }
}

impl Default for CameraBasis {
    fn default() -> Self {
        CameraBasis::look_at(
            Vec3::new(50.0, 50.0, 10.0),
            Vec3::new(50.0, 50.0, 0.0),
            Vec3::Y,
            45f32.to_radians(),
            1.0,
        )
    }
}

/// Pixel coordinates to normalized device coordinates, y up.
pub fn pointer_to_ndc(px: f32, py: f32, width: f32, height: f32) -> Vec2 {
    Vec2::new(2.0 * px / width - 1.0, 1.0 - 2.0 * py / height)
}

/// Point on the camera's focal plane under `ndc`.
///
/// Returns the zero vector when there is no pointer input yet (`None` or
/// non-finite coordinates). Callers treat that as "no target set".
pub fn screen_to_world(ndc: Option<Vec2>, camera: &CameraBasis) -> Vec3 {
    let Some(ndc) = ndc.filter(|v| v.is_finite()) else {
        return Vec3::ZERO;
    };
    let len = (camera.position - camera.target).length();
    let half = (camera.fovy * 0.5).tan();
    let v = camera.up * (len * half);
    let h = camera.right * (len * camera.aspect_ratio * half);
    camera.target + h * ndc.x + v * ndc.y
}

/// Matrix-inverse variant of [`screen_to_world`].
///
/// Unprojects the far-plane point through `(P·V)⁻¹`, walks the focal
/// distance along that ray from the camera and drops the result onto z = 0.
/// Less stable than the basis method at grazing angles.
pub fn screen_to_world_inverse(ndc: Option<Vec2>, camera: &CameraBasis, near: f32, far: f32) -> Vec3 {
    let Some(ndc) = ndc.filter(|v| v.is_finite()) else {
        return Vec3::ZERO;
    };
    let inv_view_proj = (camera.projection_matrix(near, far) * camera.view_matrix()).inverse();
    let far_point = inv_view_proj.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
    let ray = (far_point - camera.position).normalize_or_zero();
    let focal = camera.position.distance(camera.target);
    let mut world = camera.position + ray * focal;
    world.z = 0.0;
    world
}
