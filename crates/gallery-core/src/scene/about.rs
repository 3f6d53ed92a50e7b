//! Tiles pinned to their DOM images while the page scrolls.

use super::{build_tiles, resize_tiles, FrameInput, Scene, SceneContext, SceneEvents};
use crate::template::TemplateId;
use crate::tile::MediaTile;
use glam::Vec2;

pub struct AboutScene {
    template: TemplateId,
    tiles: Vec<MediaTile>,
}

impl AboutScene {
    pub fn new(ctx: &SceneContext<'_>) -> Self {
        let mut scene = Self {
            template: TemplateId::from(TemplateId::ABOUT),
            tiles: build_tiles(ctx, (0.0, ctx.page_scroll)),
        };
        scene.show();
        scene
    }
}

impl Scene for AboutScene {
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
        // Measured bounds already include the page's translateY(-scroll).
        resize_tiles(&mut self.tiles, ctx, (0.0, ctx.page_scroll));
    }

    fn update(&mut self, frame: &FrameInput) -> SceneEvents {
        let scroll = Vec2::new(0.0, -frame.page_scroll);
        for tile in self.tiles.iter_mut() {
            tile.update(scroll);
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
}
