//! Horizontal gallery with a discrete active entry.

use super::{
    build_tiles, resize_tiles, FrameInput, Scene, SceneContext, SceneEvent, SceneEvents,
};
use crate::input::{DragTracker, WheelDelta};
use crate::scroll::{ScrollAxis, ScrollRange};
use crate::template::TemplateId;
use crate::tile::MediaTile;
use glam::Vec2;

pub struct CollectionsScene {
    template: TemplateId,
    tiles: Vec<MediaTile>,
    scroll: ScrollAxis,
    /// Scroll position when the current drag started.
    anchor: f32,
    index: Option<usize>,
}

impl CollectionsScene {
    pub fn new(ctx: &SceneContext<'_>) -> Self {
        let mut scene = Self {
            template: TemplateId::from(TemplateId::COLLECTIONS),
            tiles: build_tiles(ctx, (0.0, 0.0)),
            scroll: ScrollAxis::new(ScrollRange::Reverse),
            anchor: 0.0,
            index: None,
        };
        scene.scroll.set_limit(scroll_limit(ctx));
        scene.show();
        scene
    }

    pub fn scroll(&self) -> &ScrollAxis {
        &self.scroll
    }

    pub fn active_index(&self) -> Option<usize> {
        self.index
    }

    /// `floor(|current / limit| * count)`, kept inside the tile list.
    pub fn index_for(current: f32, limit: f32, count: usize) -> usize {
        if count == 0 || limit <= 0.0 {
            return 0;
        }
        let raw = ((current / limit).abs() * count as f32).floor() as usize;
        raw.min(count - 1)
    }
}

/// Track travel: gallery width minus one media element.
fn scroll_limit(ctx: &SceneContext<'_>) -> f32 {
    let first = ctx.layout.media.first().map(|m| m.bounds.width).unwrap_or(0.0);
    (ctx.layout.gallery.width - first).max(0.0)
}

impl Scene for CollectionsScene {
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
        // The DOM track is translated by `current` while we measure.
        let live = self.scroll.current;
        resize_tiles(&mut self.tiles, ctx, (-live, 0.0));
        self.scroll.set_limit(scroll_limit(ctx));
        self.scroll.target = 0.0;
        self.anchor = 0.0;
    }

    fn on_pointer_down(&mut self, _drag: &DragTracker) {
        self.anchor = self.scroll.current;
    }

    fn on_pointer_move(&mut self, drag: &DragTracker) {
        self.scroll.target = self.anchor - drag.distance().x;
    }

    fn on_wheel(&mut self, delta: WheelDelta) {
        self.scroll.apply_delta(-delta.pixel_y);
    }

    fn update(&mut self, frame: &FrameInput) -> SceneEvents {
        self.scroll.update();
        let current = self.scroll.current;

        let mut events = SceneEvents::new();
        events.push(SceneEvent::TrackMoved(current));

        for tile in self.tiles.iter_mut() {
            tile.update(Vec2::new(current, 0.0));
            tile.advance(frame.dt);
        }

        if !self.tiles.is_empty() {
            let index = Self::index_for(current, self.scroll.limit, self.tiles.len());
            if self.index != Some(index) {
                self.index = Some(index);
                let collection = self.tiles[index].media.collection.unwrap_or(index);
                log::debug!("[collections] active {} (collection {})", index, collection);
                events.push(SceneEvent::ActiveIndexChanged { index, collection });
            }
        }
        events
    }

    fn tiles(&self) -> &[MediaTile] {
        &self.tiles
    }

    fn tiles_mut(&mut self) -> &mut [MediaTile] {
        &mut self.tiles
    }
}
