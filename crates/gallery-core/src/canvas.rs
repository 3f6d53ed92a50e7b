//! Canvas orchestrator: camera, viewport and the single mounted scene.

use crate::document::LayoutSource;
use crate::input::{DragTracker, PointerInput, WheelDelta};
use crate::render::{DrawFrame, Renderer, SceneKey, TileDraw, TileKey, TileLoad};
use crate::scene::{create_scene, FrameInput, Scene, SceneContext, SceneEvents};
use crate::template::TemplateId;
use crate::tile::TileStatus;
use crate::viewport::{Camera, CameraParams, PixelSize, ViewportSize};

/// Collections draws above the DOM so its gallery can be dragged directly.
const COLLECTIONS_LAYER: i32 = 1000;

struct Mounted {
    key: SceneKey,
    scene: Box<dyn Scene>,
    hidden: bool,
}

pub struct CanvasOrchestrator<R: Renderer> {
    renderer: R,
    camera: Camera,
    viewport: ViewportSize,
    window: PixelSize,
    drag: DragTracker,
    mounted: Option<Mounted>,
    next_key: u64,
    seed: u64,
    draws: Vec<TileDraw>,
}

impl<R: Renderer> CanvasOrchestrator<R> {
    pub fn new(renderer: R, params: CameraParams, window: PixelSize, seed: u64) -> Self {
        let mut camera = Camera::new(params);
        let viewport = camera.resize(window);
        Self {
            renderer,
            camera,
            viewport,
            window,
            drag: DragTracker::default(),
            mounted: None,
            next_key: 0,
            seed,
            draws: Vec::new(),
        }
    }

    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn mounted_template(&self) -> Option<&TemplateId> {
        self.mounted.as_ref().map(|m| m.scene.template())
    }

    pub fn mounted_key(&self) -> Option<SceneKey> {
        self.mounted.as_ref().map(|m| m.key)
    }

    pub fn scene(&self) -> Option<&dyn Scene> {
        self.mounted.as_ref().map(|m| m.scene.as_ref())
    }

    pub fn scene_mut(&mut self) -> Option<&mut (dyn Scene + 'static)> {
        self.mounted.as_mut().map(|m| m.scene.as_mut())
    }

    /// Recompute the world viewport from the window and re-lay out the scene.
    pub fn on_resize<L: LayoutSource + ?Sized>(&mut self, layout: &L, page_scroll: f32) {
        self.window = layout.window_size();
        self.viewport = self.camera.resize(self.window);
        self.renderer.resize(self.window);
        log::debug!(
            "[canvas] viewport {:.3}x{:.3} for {}x{}",
            self.viewport.width,
            self.viewport.height,
            self.window.width,
            self.window.height
        );
        if let Some(m) = self.mounted.as_mut() {
            let scene_layout = layout.measure_scene(m.scene.template());
            let ctx = SceneContext {
                viewport: self.viewport,
                window: self.window,
                layout: &scene_layout,
                page_scroll,
            };
            m.scene.on_resize(&ctx);
        }
    }

    /// Fade the mounted scene out as `template` starts leaving. The scene
    /// stays mounted until `on_change_end`.
    pub fn on_change_start(&mut self, template: &TemplateId) {
        if let Some(m) = self.mounted.as_mut() {
            log::info!("[canvas] hide {} (page {} leaving)", m.scene.template(), template);
            m.scene.hide();
            m.hidden = true;
        }
    }

    /// A transition was abandoned; bring the mounted scene back.
    pub fn on_change_abort(&mut self) {
        if let Some(m) = self.mounted.as_mut() {
            if m.hidden {
                m.scene.show();
                m.hidden = false;
            }
        }
    }

    /// Make `template` the mounted scene. Any other scene is destroyed and
    /// its GPU resources released before the new one is built.
    pub fn on_change_end<L: LayoutSource + ?Sized>(
        &mut self,
        template: &TemplateId,
        layout: &L,
        page_scroll: f32,
    ) {
        if let Some(m) = self.mounted.as_mut() {
            if m.scene.template() == template {
                if m.hidden {
                    m.scene.show();
                    m.hidden = false;
                }
                return;
            }
        }
        self.unmount();

        let scene_layout = layout.measure_scene(template);
        let ctx = SceneContext {
            viewport: self.viewport,
            window: self.window,
            layout: &scene_layout,
            page_scroll,
        };
        let seed = self.seed.wrapping_add(self.next_key);
        if let Some(scene) = create_scene(template, &ctx, seed) {
            let key = SceneKey(self.next_key);
            self.next_key += 1;
            log::info!(
                "[canvas] mount {} as scene {} ({} tiles)",
                template,
                key.0,
                scene.tiles().len()
            );
            if template.is(TemplateId::COLLECTIONS) {
                self.renderer.set_layer(Some(COLLECTIONS_LAYER));
            }
            self.mounted = Some(Mounted {
                key,
                scene,
                hidden: false,
            });
        } else {
            log::info!("[canvas] {} has no scene", template);
        }
    }

    /// The document content was swapped. Rebuild the scene even when the
    /// template is unchanged, since its tiles and state describe the old DOM.
    pub fn on_content_replaced<L: LayoutSource + ?Sized>(
        &mut self,
        template: &TemplateId,
        layout: &L,
        page_scroll: f32,
    ) {
        self.unmount();
        self.on_change_end(template, layout, page_scroll);
    }

    fn unmount(&mut self) {
        if let Some(m) = self.mounted.take() {
            log::info!("[canvas] unmount {} (scene {})", m.scene.template(), m.key.0);
            if m.scene.template().is(TemplateId::COLLECTIONS) {
                self.renderer.set_layer(None);
            }
            self.renderer.release_scene(m.key);
        }
    }

    pub fn on_pointer(&mut self, input: PointerInput) {
        match input {
            PointerInput::Down(at) => {
                self.drag.down(at);
                if let Some(m) = self.mounted.as_mut() {
                    m.scene.on_pointer_down(&self.drag);
                }
            }
            PointerInput::Move(at) => {
                if !self.drag.moved(at) {
                    return;
                }
                if let Some(m) = self.mounted.as_mut() {
                    m.scene.on_pointer_move(&self.drag);
                }
            }
            PointerInput::Up(at) => {
                self.drag.up(at);
                if let Some(m) = self.mounted.as_mut() {
                    m.scene.on_pointer_up(&self.drag);
                }
            }
        }
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) {
        if let Some(m) = self.mounted.as_mut() {
            m.scene.on_wheel(delta);
        }
    }

    /// Advance the mounted scene, then issue one draw for everything visible.
    pub fn update(&mut self, frame: &FrameInput) -> SceneEvents {
        self.draws.clear();
        let mut events = SceneEvents::new();

        if let Some(m) = self.mounted.as_mut() {
            events = m.scene.update(frame);
            let speed = m.scene.speed();
            let key = m.key;
            let template = m.scene.template().clone();

            for tile in m.scene.tiles_mut() {
                if tile.status == TileStatus::Pending {
                    let tile_key = TileKey {
                        scene: key,
                        media: tile.media,
                    };
                    match self.renderer.prepare_tile(&template, tile_key) {
                        Ok(TileLoad::Ready) => tile.status = TileStatus::Ready,
                        Ok(TileLoad::Pending) => {}
                        Err(e) => tile.fail(e),
                    }
                }
                if tile.is_drawable() {
                    self.draws.push(TileDraw {
                        key: TileKey {
                            scene: key,
                            media: tile.media,
                        },
                        model: tile.mesh.model_matrix(),
                        opacity: tile.opacity(),
                        speed,
                    });
                }
            }
        }

        let draw = DrawFrame {
            view_projection: self.camera.view_projection(),
            tiles: &self.draws,
        };
        if let Err(e) = self.renderer.draw(&draw) {
            log::error!("[canvas] draw failed: {}", e);
        }
        events
    }
}
