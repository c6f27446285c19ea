//! The camera turns pixel positions into primary rays.
//!
//! It is described by an eye point and a single matrix `M` that takes
//! normalized device coordinates `(u, v, -1, 1)` to a world space
//! point on the view plane. Building `M` is the caller's business;
//! `look_at` is provided for the common case.

// crate
use crate::core::common::{radians, Float};
use crate::core::geometry::{vec3_cross_vec3, Point2f, Point3f, Ray, Vector3f};
use crate::core::transform::Matrix4x4;

#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Camera {
    pub eye: Point3f,
    /// maps `(u, v, -1, 1)` to a point on the view plane
    pub scale_view_inv: Matrix4x4,
}

impl Camera {
    pub fn new(eye: Point3f, scale_view_inv: Matrix4x4) -> Self {
        Camera {
            eye,
            scale_view_inv,
        }
    }
    /// Pinhole camera at `eye` looking at `target`. `fov_y` is the
    /// vertical field of view in degrees, `aspect` is width / height.
    pub fn look_at(eye: Point3f, target: Point3f, up: Vector3f, fov_y: Float, aspect: Float) -> Self {
        let forward: Vector3f = (target - eye).normalize();
        let right: Vector3f = vec3_cross_vec3(&forward, &up).normalize();
        let true_up: Vector3f = vec3_cross_vec3(&right, &forward);
        let sy: Float = (radians(fov_y) * 0.5 as Float).tan();
        let sx: Float = sy * aspect;
        let x: Vector3f = right * sx;
        let y: Vector3f = true_up * sy;
        let scale_view_inv: Matrix4x4 = Matrix4x4::from_cols([
            [x.x, x.y, x.z, 0.0],
            [y.x, y.y, y.z, 0.0],
            [-forward.x, -forward.y, -forward.z, 0.0],
            [eye.x, eye.y, eye.z, 1.0],
        ]);
        Camera::new(eye, scale_view_inv)
    }
    /// World space point on the view plane for NDC `(u, v)`.
    pub fn view_plane_point(&self, u: Float, v: Float) -> Point3f {
        let p: [Float; 4] = self.scale_view_inv.mul_vec4(&[u, v, -1.0, 1.0]);
        if p[3] != 0.0 as Float && p[3] != 1.0 as Float {
            let inv_w: Float = 1.0 as Float / p[3];
            Point3f::new(p[0] * inv_w, p[1] * inv_w, p[2] * inv_w)
        } else {
            Point3f::new(p[0], p[1], p[2])
        }
    }
    /// Primary ray through pixel `(x, y)` of a `width` x `height`
    /// image, offset inside the pixel by `jitter` in `[0, 1)^2`. Row 0
    /// is the top of the image.
    pub fn generate_ray(
        &self,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        jitter: &Point2f,
    ) -> Ray {
        let u: Float = 2.0 as Float * (x as Float + jitter.x) / width as Float - 1.0 as Float;
        let v: Float = 1.0 as Float - 2.0 as Float * (y as Float + jitter.y) / height as Float;
        let target: Point3f = self.view_plane_point(u, v);
        Ray::new(self.eye, target - self.eye)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn identity_camera_looks_down_negative_z() {
        let camera = Camera::default();
        let r = camera.generate_ray(1, 1, 3, 3, &Point2f { x: 0.5, y: 0.5 });
        assert!(r.is_valid);
        assert!(r.d.x.abs() < 1e-6 && r.d.y.abs() < 1e-6);
        assert!(r.d.z < 0.0);
    }

    #[test]
    fn top_row_points_up() {
        let camera = Camera::default();
        let top = camera.generate_ray(0, 0, 4, 4, &Point2f { x: 0.5, y: 0.5 });
        let bottom = camera.generate_ray(0, 3, 4, 4, &Point2f { x: 0.5, y: 0.5 });
        assert!(top.d.y > 0.0);
        assert!(bottom.d.y < 0.0);
        assert!(top.d.x < 0.0);
    }

    #[test]
    fn look_at_centre_ray_hits_target() {
        let eye = Point3f::new(0.0, 0.0, 4.5);
        let target = Point3f::new(0.0, 0.0, -1.5);
        let camera = Camera::look_at(eye, target, Vector3f::new(0.0, 1.0, 0.0), 60.0, 4.0 / 3.0);
        let p = camera.view_plane_point(0.0, 0.0);
        assert!((p.z - 3.5).abs() < 1e-5, "{:?}", p);
        // the top edge of the view plane sits at tan(30 degrees)
        let top = camera.view_plane_point(0.0, 1.0);
        assert!((top.y - (30.0 as Float).to_radians().tan()).abs() < 1e-5);
        let right = camera.view_plane_point(1.0, 0.0);
        assert!(right.x > 0.0);
    }
}
