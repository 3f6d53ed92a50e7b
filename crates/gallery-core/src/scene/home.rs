//! Infinite two-axis gallery.
//!
//! Tiles that leave the viewport in the direction of travel are pushed back
//! onto the opposite edge by whole gallery extents, so the grid never runs
//! out. Wheel deltas scroll both axes; drags move the grid under the pointer.

use super::{build_tiles, resize_tiles, FrameInput, Scene, SceneContext, SceneEvents};
use crate::constants::{SPEED_LERP, WRAP_JITTER_RAD, WRAP_MARGIN};
use crate::input::{DragTracker, WheelDelta};
use crate::scroll::{Damped, Direction, ScrollAxis, ScrollRange};
use crate::template::TemplateId;
use crate::tile::MediaTile;
use crate::viewport::ViewportSize;
use glam::Vec2;
use rand::prelude::*;

pub struct HomeScene {
    template: TemplateId,
    tiles: Vec<MediaTile>,
    x: ScrollAxis,
    y: ScrollAxis,
    speed: Damped,
    /// Scroll position when the current drag started.
    anchor: Vec2,
    /// One full gallery in world units; the wrap step.
    extent: Vec2,
    viewport: ViewportSize,
    rng: StdRng,
}

impl HomeScene {
    pub fn new(ctx: &SceneContext<'_>, seed: u64) -> Self {
        let mut scene = Self {
            template: TemplateId::from(TemplateId::HOME),
            tiles: build_tiles(ctx, (0.0, 0.0)),
            x: ScrollAxis::new(ScrollRange::Unbounded),
            y: ScrollAxis::new(ScrollRange::Unbounded),
            speed: Damped::new(SPEED_LERP),
            anchor: Vec2::ZERO,
            extent: Vec2::ZERO,
            viewport: ctx.viewport,
            rng: StdRng::seed_from_u64(seed),
        };
        scene.measure(ctx);
        scene.show();
        scene
    }

    fn measure(&mut self, ctx: &SceneContext<'_>) {
        let gallery = ctx.layout.gallery;
        let (w, h) = ctx
            .viewport
            .world_extent(ctx.window, gallery.width, gallery.height);
        self.extent = Vec2::new(w, h);
        self.viewport = ctx.viewport;
    }

    pub fn extent(&self) -> Vec2 {
        self.extent
    }

    /// Damped scroll position in pixels.
    pub fn scroll(&self) -> Vec2 {
        Vec2::new(self.x.current, self.y.current)
    }

    pub fn directions(&self) -> (Direction, Direction) {
        (self.x.direction, self.y.direction)
    }

    /// Bounds past which a tile's trailing edge triggers a wrap.
    pub fn wrap_bounds(&self) -> Vec2 {
        Vec2::new(
            self.viewport.width * WRAP_MARGIN,
            self.viewport.height * WRAP_MARGIN,
        )
    }

    fn jitter(&mut self) -> f32 {
        self.rng.gen_range(-WRAP_JITTER_RAD..=WRAP_JITTER_RAD)
    }

    fn wrap_tiles(&mut self) {
        let bound = self.wrap_bounds();
        let extent = self.extent;
        let (dir_x, dir_y) = (self.x.direction, self.y.direction);

        for i in 0..self.tiles.len() {
            let mut shift = Vec2::ZERO;
            {
                let tile = &self.tiles[i];
                let half = tile.mesh.half_extent();
                let pos = tile.mesh.position;

                if extent.x > 0.0 {
                    shift.x = match dir_x {
                        Direction::Negative => {
                            whole_extents(-bound.x - (pos.x + half.x), extent.x)
                        }
                        Direction::Positive => {
                            -whole_extents((pos.x - half.x) - bound.x, extent.x)
                        }
                        Direction::None => 0.0,
                    };
                }
                if extent.y > 0.0 {
                    shift.y = match dir_y {
                        Direction::Positive => {
                            whole_extents(-bound.y - (pos.y + half.y), extent.y)
                        }
                        Direction::Negative => {
                            -whole_extents((pos.y - half.y) - bound.y, extent.y)
                        }
                        Direction::None => 0.0,
                    };
                }
            }
            if shift != Vec2::ZERO {
                let rotation = self.jitter();
                let tile = &mut self.tiles[i];
                tile.wrap_by(shift);
                tile.mesh.rotation_z = rotation;
            }
        }
    }
}

/// Whole extents needed to cancel a positive overshoot, else zero.
#[inline]
fn whole_extents(overshoot: f32, extent: f32) -> f32 {
    if overshoot > 0.0 {
        (overshoot / extent).ceil() * extent
    } else {
        0.0
    }
}

impl Scene for HomeScene {
    fn template(&self) -> &TemplateId {
        &self.template
    }

    fn show(&mut self) {
        self.tiles.iter_mut().for_each(MediaTile::show);
    }

    fn hide(&mut self) {
        self.tiles.iter_mut().for_each(MediaTile::hide);
    }

    fn on_resize(&mut self, ctx: &SceneContext<'_>) {
        self.measure(ctx);
        self.x.reset();
        self.y.reset();
        self.anchor = Vec2::ZERO;
        resize_tiles(&mut self.tiles, ctx, (0.0, 0.0));
    }

    fn on_pointer_down(&mut self, _drag: &DragTracker) {
        self.anchor = self.scroll();
        self.speed.target = 1.0;
    }

    fn on_pointer_move(&mut self, drag: &DragTracker) {
        let distance = drag.distance();
        self.x.target = self.anchor.x - distance.x;
        self.y.target = self.anchor.y - distance.y;
    }

    fn on_pointer_up(&mut self, _drag: &DragTracker) {
        self.speed.target = 0.0;
    }

    fn on_wheel(&mut self, delta: WheelDelta) {
        self.x.apply_delta(delta.pixel_x);
        self.y.apply_delta(delta.pixel_y);
    }

    fn update(&mut self, frame: &FrameInput) -> SceneEvents {
        self.speed.update();
        self.x.update();
        self.y.update();

        let scroll = self.scroll();
        for tile in self.tiles.iter_mut() {
            tile.update(scroll);
        }
        self.wrap_tiles();
        for tile in self.tiles.iter_mut() {
            tile.advance(frame.dt);
        }
        SceneEvents::new()
    }

    fn tiles(&self) -> &[MediaTile] {
        &self.tiles
    }

    fn tiles_mut(&mut self) -> &mut [MediaTile] {
        &mut self.tiles
    }

    fn speed(&self) -> f32 {
        self.speed.current
    }
}
