//! `DocumentPort` over the live browser DOM.

use crate::constants::*;
use crate::dom;
use crate::links::{self, LinkBindings, NavInbox};
use crate::visibility;
use fnv::FnvHashMap;
use gallery_core::{
    Attachment, ContentFragment, DocumentPort, LayoutSource, MediaLayout, MediaRef, PageFrame,
    PageMetrics, PixelSize, SceneEvent, SceneLayout, TemplateId,
};
use wasm_bindgen::JsValue;
use web_sys as web;

pub struct WebDocument {
    window: web::Window,
    document: web::Document,
    pages: FnvHashMap<&'static str, PageSpec>,
    inbox: NavInbox,
    links: Option<LinkBindings>,
}

impl WebDocument {
    pub fn new(window: web::Window, document: web::Document, inbox: NavInbox) -> Self {
        Self {
            window,
            document,
            pages: page_registry(),
            inbox,
            links: None,
        }
    }

    fn spec(&self, template: &TemplateId) -> PageSpec {
        page_spec(&self.pages, template)
    }

    fn content(&self) -> Option<web::Element> {
        self.document.query_selector(CONTENT_SELECTOR).ok().flatten()
    }

    fn root(&self) -> Option<web::Element> {
        self.document.document_element()
    }

    fn select(&self, selector: &str) -> Option<web::Element> {
        self.root().and_then(|r| dom::query(&r, selector))
    }

    fn select_all(&self, selector: &str) -> Vec<web::Element> {
        self.root()
            .map(|r| dom::query_all(&r, selector))
            .unwrap_or_default()
    }
}

impl LayoutSource for WebDocument {
    fn window_size(&self) -> PixelSize {
        let w = self
            .window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0);
        let h = self
            .window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(1.0);
        PixelSize::new(w as f32, h as f32)
    }

    fn measure_scene(&self, template: &TemplateId) -> SceneLayout {
        let spec = self.spec(template);
        let gallery = spec
            .gallery
            .and_then(|s| self.select(s))
            .map(|el| dom::rect_of(&el))
            .unwrap_or_default();
        let media = spec
            .media
            .map(|s| self.select_all(s))
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, el)| MediaLayout {
                media: MediaRef {
                    index,
                    collection: el
                        .get_attribute(COLLECTION_ATTR)
                        .and_then(|v| v.trim().parse().ok()),
                },
                bounds: dom::rect_of(el),
            })
            .collect();
        SceneLayout { gallery, media }
    }

    fn measure_page(&self, template: &TemplateId) -> PageMetrics {
        let wrapper_height = self
            .spec(template)
            .wrapper
            .and_then(|s| self.select(s))
            .map(|el| el.client_height() as f32);
        PageMetrics { wrapper_height }
    }
}

impl DocumentPort for WebDocument {
    fn current_template(&self) -> Option<TemplateId> {
        self.content()
            .and_then(|el| el.get_attribute(TEMPLATE_ATTR))
            .map(TemplateId::new)
    }

    fn extract_content(&self, html: &str) -> Result<ContentFragment, String> {
        let parser = web::DomParser::new().map_err(|e| format!("{:?}", e))?;
        let parsed = parser
            .parse_from_string(html, web::SupportedType::TextHtml)
            .map_err(|e| format!("{:?}", e))?;
        let content = parsed
            .query_selector(CONTENT_SELECTOR)
            .ok()
            .flatten()
            .ok_or_else(|| format!("no {} element", CONTENT_SELECTOR))?;
        let template = content
            .get_attribute(TEMPLATE_ATTR)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| format!("content root has no {}", TEMPLATE_ATTR))?;
        Ok(ContentFragment {
            template: TemplateId::new(template),
            html: content.inner_html(),
        })
    }

    fn replace_content(&mut self, fragment: &ContentFragment) {
        if let Some(content) = self.content() {
            _ = content.set_attribute(TEMPLATE_ATTR, fragment.template.as_str());
            content.set_inner_html(&fragment.html);
        }
    }

    fn push_history(&mut self, url: &str) {
        if let Ok(history) = self.window.history() {
            if let Err(e) = history.push_state_with_url(&JsValue::NULL, "", Some(url)) {
                log::warn!("[nav] pushState failed: {:?}", e);
            }
        }
    }

    fn bind_links(&mut self) {
        self.links = None;
        self.links = Some(links::bind(&self.document, &self.inbox));
    }

    fn attach(&mut self, _template: &TemplateId) -> Vec<Box<dyn Attachment>> {
        self.content()
            .map(|root| visibility::attach_all(&root))
            .unwrap_or_default()
    }

    fn apply_page_frame(&mut self, template: &TemplateId, frame: &PageFrame) {
        if let Some(content) = self.content() {
            dom::set_style(&content, "opacity", &format!("{:.3}", frame.opacity));
        }
        if let Some(wrapper) = self.spec(template).wrapper.and_then(|s| self.select(s)) {
            dom::set_style(
                &wrapper,
                "transform",
                &format!("translateY(-{}px)", frame.translate_y),
            );
        }
    }

    fn apply_scene_event(&mut self, event: &SceneEvent) {
        match *event {
            SceneEvent::TrackMoved(px) => {
                if let Some(track) = self.select(COLLECTIONS_TRACK_SELECTOR) {
                    dom::set_style(&track, "transform", &format!("translateX({}px)", px));
                }
            }
            SceneEvent::ActiveIndexChanged { index, collection } => {
                log::debug!("[page] active media {} (collection {})", index, collection);
                for (i, article) in self
                    .select_all(COLLECTIONS_ARTICLE_SELECTOR)
                    .iter()
                    .enumerate()
                {
                    dom::toggle_class(article, COLLECTIONS_ARTICLE_ACTIVE, i == collection);
                }
                if let Some(titles) = self.select(COLLECTIONS_TITLES_SELECTOR) {
                    let step = gallery_core::constants::TITLE_TRACK_STEP_PERCENT;
                    dom::set_style(
                        &titles,
                        "transform",
                        &format!(
                            "translateY(-{}%) translate(-50%, -50%) rotate(90deg)",
                            step * collection as f32
                        ),
                    );
                }
            }
        }
    }

    fn set_navigation_visible(&mut self, visible: bool) {
        if let Some(nav) = self.select(NAVIGATION_SELECTOR) {
            dom::set_style(&nav, "display", if visible { "block" } else { "none" });
        }
    }

    fn apply_page_colors(&mut self, _template: &TemplateId) {
        let (Some(content), Some(body)) = (self.content(), self.document.body()) else {
            return;
        };
        if let Some(background) = content.get_attribute(BACKGROUND_ATTR) {
            _ = body.style().set_property("background-color", &background);
        }
        if let Some(color) = content.get_attribute(COLOR_ATTR) {
            _ = body.style().set_property("color", &color);
        }
    }
}
