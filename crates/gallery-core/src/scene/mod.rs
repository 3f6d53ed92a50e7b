//! Per-template WebGL scenes.
//!
//! A scene owns the tiles for one page template plus its own scroll state.
//! It lives exactly as long as the template is mounted on the canvas.

mod about;
mod collections;
mod home;

pub use about::AboutScene;
pub use collections::CollectionsScene;
pub use home::HomeScene;

use crate::input::{DragTracker, WheelDelta};
use crate::template::TemplateId;
use crate::tile::{MediaLayout, MediaTile};
use crate::viewport::{PixelSize, Rect, ViewportSize};
use smallvec::SmallVec;

/// DOM measurements a scene is built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SceneLayout {
    /// Bounds of the gallery container in client pixels.
    pub gallery: Rect,
    pub media: Vec<MediaLayout>,
}

impl SceneLayout {
    /// Bounds for the tile mirroring `index`, if the element is still there.
    pub fn bounds_of(&self, index: usize) -> Option<Rect> {
        self.media
            .iter()
            .find(|m| m.media.index == index)
            .map(|m| m.bounds)
    }
}

/// Everything a scene needs to (re)lay itself out.
#[derive(Clone, Copy, Debug)]
pub struct SceneContext<'a> {
    pub viewport: ViewportSize,
    pub window: PixelSize,
    pub layout: &'a SceneLayout,
    /// Damped DOM page scroll at measurement time.
    pub page_scroll: f32,
}

/// Per-frame inputs shared by all scenes.
#[derive(Clone, Copy, Debug, Default)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Damped DOM page scroll (`current`).
    pub page_scroll: f32,
}

/// Output of a scene's update that the DOM layer may act on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SceneEvent {
    /// Horizontal track offset in pixels for the DOM gallery strip.
    TrackMoved(f32),
    /// Fired only when the active gallery entry actually changes.
    ActiveIndexChanged { index: usize, collection: usize },
}

pub type SceneEvents = SmallVec<[SceneEvent; 2]>;

pub trait Scene {
    fn template(&self) -> &TemplateId;

    /// Fade tiles in.
    fn show(&mut self);
    /// Fade tiles out; the scene stays mounted until unmounted.
    fn hide(&mut self);

    fn on_resize(&mut self, ctx: &SceneContext<'_>);

    fn on_pointer_down(&mut self, _drag: &DragTracker) {}
    fn on_pointer_move(&mut self, _drag: &DragTracker) {}
    fn on_pointer_up(&mut self, _drag: &DragTracker) {}
    fn on_wheel(&mut self, _delta: WheelDelta) {}

    fn update(&mut self, frame: &FrameInput) -> SceneEvents;

    fn tiles(&self) -> &[MediaTile];
    fn tiles_mut(&mut self) -> &mut [MediaTile];

    /// Distortion factor handed to the tile shader; purely visual.
    fn speed(&self) -> f32 {
        0.0
    }
}

/// Build the scene for a template, or `None` when the template has no canvas
/// content.
pub fn create_scene(
    template: &TemplateId,
    ctx: &SceneContext<'_>,
    seed: u64,
) -> Option<Box<dyn Scene>> {
    match template.as_str() {
        TemplateId::HOME => Some(Box::new(HomeScene::new(ctx, seed))),
        TemplateId::COLLECTIONS => Some(Box::new(CollectionsScene::new(ctx))),
        TemplateId::ABOUT => Some(Box::new(AboutScene::new(ctx))),
        _ => None,
    }
}

/// Tiles in layout order, one per measured media element. `shift` undoes any
/// DOM translation that was live when the bounds were measured.
pub(crate) fn build_tiles(ctx: &SceneContext<'_>, shift: (f32, f32)) -> Vec<MediaTile> {
    ctx.layout
        .media
        .iter()
        .map(|m| {
            let mut layout = *m;
            layout.bounds = shifted(layout.bounds, shift);
            MediaTile::new(layout, ctx.viewport, ctx.window)
        })
        .collect()
}

/// Re-measure existing tiles. Elements that disappeared keep their old bounds.
pub(crate) fn resize_tiles(tiles: &mut [MediaTile], ctx: &SceneContext<'_>, shift: (f32, f32)) {
    for tile in tiles.iter_mut() {
        let bounds = ctx
            .layout
            .bounds_of(tile.media.index)
            .map(|b| shifted(b, shift))
            .unwrap_or(tile.bounds);
        tile.on_resize(bounds, ctx.viewport, ctx.window);
    }
}

#[inline]
fn shifted(mut bounds: Rect, shift: (f32, f32)) -> Rect {
    bounds.left += shift.0;
    bounds.top += shift.1;
    bounds
}
