//! One GPU plane bound to one DOM media element.

use crate::error::TileError;
use crate::fade::Fade;
use crate::viewport::{PixelSize, Rect, ViewportSize};
use glam::{Mat4, Quat, Vec2, Vec3};

/// Weak handle to the DOM element a tile mirrors: its position within the
/// scene's media selector, plus the collection it belongs to when the
/// markup carries one (`data-index`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MediaRef {
    pub index: usize,
    pub collection: Option<usize>,
}

/// Measured DOM state for one media element.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MediaLayout {
    pub media: MediaRef,
    pub bounds: Rect,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TileStatus {
    /// Image not decoded yet; the renderer is asked again next frame.
    Pending,
    Ready,
    Failed(TileError),
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Mesh {
    pub position: Vec3,
    pub scale: Vec2,
    pub rotation_z: f32,
}

impl Mesh {
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        self.scale * 0.5
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(self.scale.x, self.scale.y, 1.0),
            Quat::from_rotation_z(self.rotation_z),
            self.position,
        )
    }
}

#[derive(Clone, Debug)]
pub struct MediaTile {
    pub media: MediaRef,
    pub bounds: Rect,
    pub mesh: Mesh,
    /// Accumulated toroidal offset in world units.
    pub extra: Vec2,
    /// Element width / height.
    pub size_ratio: f32,
    pub status: TileStatus,
    opacity: Fade,
    viewport: ViewportSize,
    window: PixelSize,
}

impl MediaTile {
    pub fn new(layout: MediaLayout, viewport: ViewportSize, window: PixelSize) -> Self {
        let mut tile = Self {
            media: layout.media,
            bounds: layout.bounds,
            mesh: Mesh::default(),
            extra: Vec2::ZERO,
            size_ratio: 1.0,
            status: TileStatus::Pending,
            opacity: Fade::hidden(),
            viewport,
            window,
        };
        tile.on_resize(layout.bounds, viewport, window);
        tile
    }

    /// Re-measure against a new viewport. Wrap offsets start over.
    pub fn on_resize(&mut self, bounds: Rect, viewport: ViewportSize, window: PixelSize) {
        self.bounds = bounds;
        self.viewport = viewport;
        self.window = window;
        self.extra = Vec2::ZERO;
        self.size_ratio = if bounds.height > 0.0 {
            bounds.width / bounds.height
        } else {
            1.0
        };
        let (sx, sy) = viewport.world_extent(window, bounds.width, bounds.height);
        self.mesh.scale = Vec2::new(sx, sy);
        self.update(Vec2::ZERO);
    }

    /// Place the mesh for a scroll offset given in pixels.
    pub fn update(&mut self, scroll: Vec2) {
        let vp = self.viewport;
        let win = self.window;
        let half = self.mesh.half_extent();
        self.mesh.position.x = -vp.width / 2.0
            + half.x
            + ((self.bounds.left + scroll.x) / win.width) * vp.width
            + self.extra.x;
        self.mesh.position.y = vp.height / 2.0
            - half.y
            - ((self.bounds.top + scroll.y) / win.height) * vp.height
            + self.extra.y;
    }

    /// Shift by a whole number of grid extents, keeping position continuous.
    pub fn wrap_by(&mut self, offset: Vec2) {
        self.extra += offset;
        self.mesh.position.x += offset.x;
        self.mesh.position.y += offset.y;
    }

    pub fn show(&mut self) {
        self.opacity.fade_in();
    }

    pub fn hide(&mut self) {
        self.opacity.fade_out();
    }

    pub fn advance(&mut self, dt: f32) {
        self.opacity.advance(dt);
    }

    #[inline]
    pub fn opacity(&self) -> f32 {
        self.opacity.value()
    }

    #[inline]
    pub fn is_drawable(&self) -> bool {
        self.status == TileStatus::Ready && self.opacity() > 0.0
    }

    pub fn fail(&mut self, err: TileError) {
        log::warn!("[tile] media {} disabled: {}", self.media.index, err);
        self.status = TileStatus::Failed(err);
    }
}
