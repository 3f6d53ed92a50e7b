// Fake platform ports shared by the host-side tests.
// The main crate is wasm-only, so tests drive gallery-core directly.

#![allow(dead_code)]

use gallery_core::error::TileError;
use gallery_core::{
    App, Attachment, CameraParams, ContentFragment, DeviceContext, DocumentPort, DrawFrame,
    LayoutSource, MediaLayout, MediaRef, NavigationConfig, PageFrame, PageMetrics, PixelSize,
    Rect, Renderer, SceneEvent, SceneKey, SceneLayout, TemplateId, TileKey, TileLoad,
};
use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

pub const DT: f32 = 1.0 / 60.0;
/// Comfortably longer than one show/hide fade.
pub const SETTLE_FRAMES: usize = 45;

#[derive(Default)]
pub struct FakeRenderer {
    pub draws: usize,
    pub last_draw: Vec<TileKey>,
    pub released: Vec<SceneKey>,
    pub layer: Option<i32>,
    pub resizes: usize,
    /// Media indices whose decode fails.
    pub failing: HashSet<usize>,
    /// Frames a tile stays `Pending` before it is ready.
    pub pending_frames: u32,
    pub pending: HashMap<TileKey, u32>,
}

impl Renderer for FakeRenderer {
    fn resize(&mut self, _window: PixelSize) {
        self.resizes += 1;
    }

    fn prepare_tile(
        &mut self,
        _template: &TemplateId,
        key: TileKey,
    ) -> Result<TileLoad, TileError> {
        assert!(
            !self.released.contains(&key.scene),
            "prepare_tile for released scene {:?}",
            key.scene
        );
        if self.failing.contains(&key.media.index) {
            return Err(TileError::Decode {
                index: key.media.index,
                reason: "corrupt".to_string(),
            });
        }
        let seen = self.pending.entry(key).or_insert(0);
        if *seen < self.pending_frames {
            *seen += 1;
            return Ok(TileLoad::Pending);
        }
        Ok(TileLoad::Ready)
    }

    fn release_scene(&mut self, scene: SceneKey) {
        self.released.push(scene);
        self.pending.retain(|k, _| k.scene != scene);
    }

    fn set_layer(&mut self, z_index: Option<i32>) {
        self.layer = z_index;
    }

    fn draw(&mut self, frame: &DrawFrame<'_>) -> gallery_core::Result<()> {
        for tile in frame.tiles {
            assert!(
                !self.released.contains(&tile.key.scene),
                "draw references released scene {:?}",
                tile.key.scene
            );
        }
        self.draws += 1;
        self.last_draw = frame.tiles.iter().map(|t| t.key).collect();
        Ok(())
    }
}

/// Counts live attachments; dropping one decrements the counter.
pub struct Tracked {
    live: Rc<Cell<usize>>,
}

impl Tracked {
    pub fn new(live: &Rc<Cell<usize>>) -> Self {
        live.set(live.get() + 1);
        Self { live: live.clone() }
    }
}

impl Attachment for Tracked {}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.live.set(self.live.get() - 1);
    }
}

pub struct FakeDocument {
    pub window: PixelSize,
    pub template: Option<TemplateId>,
    pub html: String,
    pub layouts: HashMap<String, SceneLayout>,
    pub metrics: HashMap<String, PageMetrics>,
    pub history: Vec<String>,
    pub replaced: usize,
    pub link_binds: usize,
    pub nav_visible: bool,
    pub attachments_per_page: usize,
    pub live_attachments: Rc<Cell<usize>>,
    pub last_frame: Option<PageFrame>,
    pub scene_events: Vec<SceneEvent>,
    pub colors_applied: Vec<TemplateId>,
}

impl FakeDocument {
    pub fn new(template: &str) -> Self {
        let mut layouts = HashMap::new();
        layouts.insert(TemplateId::HOME.to_string(), home_layout());
        layouts.insert(TemplateId::COLLECTIONS.to_string(), collections_layout(6));
        layouts.insert(TemplateId::ABOUT.to_string(), about_layout());
        let mut metrics = HashMap::new();
        metrics.insert(
            TemplateId::ABOUT.to_string(),
            PageMetrics {
                wrapper_height: Some(2900.0),
            },
        );
        Self {
            window: PixelSize::new(1600.0, 900.0),
            template: Some(TemplateId::new(template)),
            html: format!("<{}>", template),
            layouts,
            metrics,
            history: Vec::new(),
            replaced: 0,
            link_binds: 0,
            nav_visible: true,
            attachments_per_page: 3,
            live_attachments: Rc::new(Cell::new(0)),
            last_frame: None,
            scene_events: Vec::new(),
            colors_applied: Vec::new(),
        }
    }

    pub fn active_changes(&self) -> Vec<(usize, usize)> {
        self.scene_events
            .iter()
            .filter_map(|e| match *e {
                SceneEvent::ActiveIndexChanged { index, collection } => Some((index, collection)),
                _ => None,
            })
            .collect()
    }
}

impl LayoutSource for FakeDocument {
    fn window_size(&self) -> PixelSize {
        self.window
    }

    fn measure_scene(&self, template: &TemplateId) -> SceneLayout {
        self.layouts
            .get(template.as_str())
            .cloned()
            .unwrap_or_default()
    }

    fn measure_page(&self, template: &TemplateId) -> PageMetrics {
        self.metrics
            .get(template.as_str())
            .copied()
            .unwrap_or_default()
    }
}

impl DocumentPort for FakeDocument {
    fn current_template(&self) -> Option<TemplateId> {
        self.template.clone()
    }

    /// Markup is `data-template="<id>"` followed by arbitrary content.
    fn extract_content(&self, html: &str) -> Result<ContentFragment, String> {
        const MARK: &str = "data-template=\"";
        let start = html
            .find(MARK)
            .ok_or_else(|| "no content root".to_string())?
            + MARK.len();
        let end = html[start..]
            .find('"')
            .ok_or_else(|| "unterminated template attribute".to_string())?;
        let id = &html[start..start + end];
        if id.is_empty() {
            return Err("empty template id".to_string());
        }
        Ok(ContentFragment {
            template: TemplateId::new(id),
            html: html.to_string(),
        })
    }

    fn replace_content(&mut self, fragment: &ContentFragment) {
        self.template = Some(fragment.template.clone());
        self.html = fragment.html.clone();
        self.replaced += 1;
    }

    fn push_history(&mut self, url: &str) {
        self.history.push(url.to_string());
    }

    fn bind_links(&mut self) {
        self.link_binds += 1;
    }

    fn attach(&mut self, _template: &TemplateId) -> Vec<Box<dyn Attachment>> {
        (0..self.attachments_per_page)
            .map(|_| Box::new(Tracked::new(&self.live_attachments)) as Box<dyn Attachment>)
            .collect()
    }

    fn apply_page_frame(&mut self, _template: &TemplateId, frame: &PageFrame) {
        self.last_frame = Some(*frame);
    }

    fn apply_scene_event(&mut self, event: &SceneEvent) {
        self.scene_events.push(*event);
    }

    fn set_navigation_visible(&mut self, visible: bool) {
        self.nav_visible = visible;
    }

    fn apply_page_colors(&mut self, template: &TemplateId) {
        self.colors_applied.push(template.clone());
    }
}

fn media(index: usize, collection: Option<usize>, bounds: Rect) -> MediaLayout {
    MediaLayout {
        media: MediaRef { index, collection },
        bounds,
    }
}

/// 4 x 3 grid of 400 x 600 images on a 3200 x 2700 gallery.
pub fn home_layout() -> SceneLayout {
    let mut tiles = Vec::new();
    for row in 0..3 {
        for col in 0..4 {
            let left = 200.0 + 800.0 * col as f32;
            let top = 150.0 + 900.0 * row as f32;
            tiles.push(media(tiles.len(), None, Rect::new(left, top, 400.0, 600.0)));
        }
    }
    SceneLayout {
        gallery: Rect::new(0.0, 0.0, 3200.0, 2700.0),
        media: tiles,
    }
}

/// `count` images 300 px wide, 400 px apart, two per collection.
pub fn collections_layout(count: usize) -> SceneLayout {
    let tiles = (0..count)
        .map(|i| {
            media(
                i,
                Some(i / 2),
                Rect::new(650.0 + 400.0 * i as f32, 250.0, 300.0, 400.0),
            )
        })
        .collect();
    SceneLayout {
        gallery: Rect::new(650.0, 250.0, 400.0 * count as f32, 400.0),
        media: tiles,
    }
}

pub fn about_layout() -> SceneLayout {
    SceneLayout {
        gallery: Rect::new(0.0, 900.0, 1600.0, 600.0),
        media: vec![
            media(0, None, Rect::new(100.0, 1000.0, 500.0, 400.0)),
            media(1, None, Rect::new(900.0, 1100.0, 500.0, 400.0)),
        ],
    }
}

pub type TestApp = App<FakeRenderer, FakeDocument>;

pub fn app_on(template: &str) -> TestApp {
    app_with(FakeDocument::new(template), FakeRenderer::default())
}

pub fn app_with(document: FakeDocument, renderer: FakeRenderer) -> TestApp {
    match App::new(
        document,
        renderer,
        DeviceContext::default(),
        NavigationConfig::default(),
        CameraParams::default(),
        7,
    ) {
        Ok(app) => app,
        Err(e) => panic!("app construction failed: {}", e),
    }
}

pub fn run_frames(app: &mut TestApp, frames: usize) {
    for _ in 0..frames {
        app.frame(DT);
    }
}

pub fn page_html(template: &str) -> String {
    format!(
        r#"<html><body><div class="content" data-template="{}"><p>{}</p></div></body></html>"#,
        template, template
    )
}
