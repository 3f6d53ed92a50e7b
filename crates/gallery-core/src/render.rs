//! Port between the canvas orchestrator and whatever owns the GPU.
//!
//! The orchestrator decides what is drawn; implementations own every GPU
//! resource and must drop a scene's resources when `release_scene` is called.

use crate::error::{Result, TileError};
use crate::template::TemplateId;
use crate::tile::MediaRef;
use crate::viewport::PixelSize;
use glam::Mat4;

/// Generation number of one scene mount.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneKey(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub scene: SceneKey,
    pub media: MediaRef,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileLoad {
    Ready,
    /// The source image has not finished loading; ask again next frame.
    Pending,
}

/// One textured plane to draw this frame.
#[derive(Clone, Copy, Debug)]
pub struct TileDraw {
    pub key: TileKey,
    pub model: Mat4,
    pub opacity: f32,
    /// Drag speed, used as a bend factor in the vertex stage.
    pub speed: f32,
}

pub struct DrawFrame<'a> {
    pub view_projection: Mat4,
    pub tiles: &'a [TileDraw],
}

pub trait Renderer {
    fn resize(&mut self, window: PixelSize);

    /// Make the texture for one tile available. Called every frame until it
    /// returns `Ready` or an error.
    fn prepare_tile(
        &mut self,
        template: &TemplateId,
        key: TileKey,
    ) -> std::result::Result<TileLoad, TileError>;

    /// Drop every GPU resource created for `scene`.
    fn release_scene(&mut self, scene: SceneKey);

    /// Stack the canvas above (`Some`) or back among (`None`) the DOM layers.
    fn set_layer(&mut self, _z_index: Option<i32>) {}

    /// The single draw call for the whole scene graph.
    fn draw(&mut self, frame: &DrawFrame<'_>) -> Result<()>;
}
