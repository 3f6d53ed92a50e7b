//! Camera and viewport-to-world conversion.
//!
//! All tile placement is done in world units. The visible world rectangle at
//! the camera's focal plane (z = 0) is derived from the vertical field of view
//! and the window aspect ratio.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z};
use glam::{Mat4, Vec3};

/// Window size in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelSize {
    pub width: f32,
    pub height: f32,
}

impl PixelSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    #[inline]
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

/// Element bounds in client pixels (`getBoundingClientRect`).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Visible world-space extent at z = 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportSize {
    /// Scale a pixel rect into world units relative to the window.
    pub fn world_extent(&self, window: PixelSize, px_width: f32, px_height: f32) -> (f32, f32) {
        (
            px_width / window.width * self.width,
            px_height / window.height * self.height,
        )
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CameraParams {
    pub fov_deg: f32,
    pub distance: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraParams {
    fn default() -> Self {
        Self {
            fov_deg: CAMERA_FOV_DEG,
            distance: CAMERA_Z,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

/// Perspective camera looking down -Z at the origin.
#[derive(Clone, Debug)]
pub struct Camera {
    pub params: CameraParams,
    pub aspect: f32,
}

impl Camera {
    pub fn new(params: CameraParams) -> Self {
        Self {
            params,
            aspect: 1.0,
        }
    }

    #[inline]
    pub fn fovy_radians(&self) -> f32 {
        self.params.fov_deg.to_radians()
    }

    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.params.distance)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fovy_radians(),
            self.aspect,
            self.params.near,
            self.params.far,
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), Vec3::ZERO, Vec3::Y)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Update the aspect ratio for a new window and return the world extent.
    pub fn resize(&mut self, window: PixelSize) -> ViewportSize {
        self.aspect = window.aspect();
        viewport_size(self.params.fov_deg, self.aspect, self.params.distance)
    }
}

/// `height = 2·tan(fov/2)·distance`, `width = height·aspect`.
pub fn viewport_size(fov_deg: f32, aspect: f32, distance: f32) -> ViewportSize {
    let height = 2.0 * (fov_deg.to_radians() / 2.0).tan() * distance;
    ViewportSize {
        height,
        width: height * aspect,
    }
}
