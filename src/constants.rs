// Declarative content contract: selectors and attributes the server markup carries

use fnv::FnvHashMap;
use gallery_core::TemplateId;

pub static TILE_WGSL: &str = include_str!("../shaders/tile.wgsl");

pub const CANVAS_ID: &str = "gallery-canvas";

// Upper bound on frame dt (seconds) after a stalled or backgrounded tab
pub const MAX_FRAME_DT: f32 = 0.1;

// Content root swapped on navigation; carries the template id
pub const CONTENT_SELECTOR: &str = ".content";
pub const TEMPLATE_ATTR: &str = "data-template";

pub const NAVIGATION_SELECTOR: &str = ".navigation";

// Lazily loaded media and entrance-animation targets
pub const LAZY_SRC_ATTR: &str = "data-src";
pub const LAZY_SELECTOR: &str = "[data-src]";
pub const LOADED_CLASS: &str = "loaded";
pub const ANIMATION_SELECTOR: &str = "[data-animation]";
pub const VISIBLE_CLASS: &str = "is-visible";

// Collection a gallery media belongs to
pub const COLLECTION_ATTR: &str = "data-index";

// Page colours applied to <body> on show
pub const BACKGROUND_ATTR: &str = "data-background";
pub const COLOR_ATTR: &str = "data-color";

// Collections DOM driven by scene events
pub const COLLECTIONS_TRACK_SELECTOR: &str = ".collections__gallery";
pub const COLLECTIONS_ARTICLE_SELECTOR: &str = ".collections__article";
pub const COLLECTIONS_ARTICLE_ACTIVE: &str = "collections__article--active";
pub const COLLECTIONS_TITLES_SELECTOR: &str = ".collections__titles";

/// Class added to `<html>` when WebGPU is unavailable.
pub const NO_WEBGPU_CLASS: &str = "no-webgpu";

/// Where each template keeps its scrolling wrapper and canvas media.
#[derive(Clone, Copy, Debug)]
pub struct PageSpec {
    pub wrapper: Option<&'static str>,
    /// Element whose bounds define the scene's gallery extent.
    pub gallery: Option<&'static str>,
    /// Media mirrored by canvas tiles, in document order.
    pub media: Option<&'static str>,
}

const EMPTY: PageSpec = PageSpec {
    wrapper: None,
    gallery: None,
    media: None,
};

pub fn page_registry() -> FnvHashMap<&'static str, PageSpec> {
    let mut pages = FnvHashMap::default();
    pages.insert(
        TemplateId::HOME,
        PageSpec {
            wrapper: None,
            gallery: Some(".home__gallery"),
            media: Some(".home__gallery__media__image"),
        },
    );
    pages.insert(
        TemplateId::COLLECTIONS,
        PageSpec {
            wrapper: None,
            gallery: Some(".collections__gallery__wrapper"),
            media: Some(".collections__gallery__media"),
        },
    );
    pages.insert(
        TemplateId::ABOUT,
        PageSpec {
            wrapper: Some(".about__wrapper"),
            gallery: Some(".about__gallery"),
            media: Some(".about__gallery__media__image"),
        },
    );
    pages.insert(
        TemplateId::DETAIL,
        PageSpec {
            wrapper: Some(".detail__wrapper"),
            ..EMPTY
        },
    );
    pages
}

/// Registry lookup; unknown templates have no wrapper and no scene.
pub fn page_spec(pages: &FnvHashMap<&'static str, PageSpec>, template: &TemplateId) -> PageSpec {
    pages.get(template.as_str()).copied().unwrap_or(EMPTY)
}
