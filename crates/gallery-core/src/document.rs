//! Port to the DOM side of the app: measurements in, content swaps and
//! style writes out.

use crate::page::{Attachment, PageFrame};
use crate::scene::{SceneEvent, SceneLayout};
use crate::template::TemplateId;
use crate::viewport::PixelSize;

/// Page-level DOM measurements.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageMetrics {
    /// Height of the page's scrolling wrapper, when it has one.
    pub wrapper_height: Option<f32>,
}

/// Replacement markup extracted from a fetched document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentFragment {
    pub template: TemplateId,
    pub html: String,
}

/// Read-only geometry queries.
pub trait LayoutSource {
    fn window_size(&self) -> PixelSize;
    fn measure_scene(&self, template: &TemplateId) -> SceneLayout;
    fn measure_page(&self, template: &TemplateId) -> PageMetrics;
}

pub trait DocumentPort: LayoutSource {
    /// Template id carried by the live content root.
    fn current_template(&self) -> Option<TemplateId>;

    /// Pull the content root and its template id out of a full HTML document.
    /// `Err` carries the reason the markup was rejected.
    fn extract_content(&self, html: &str) -> Result<ContentFragment, String>;

    fn replace_content(&mut self, fragment: &ContentFragment);

    fn push_history(&mut self, url: &str);

    /// Drop the previous link bindings and intercept the links now present.
    fn bind_links(&mut self);

    /// Visibility-driven helpers (entrance animations, lazy media) for the
    /// page's elements. Dropping a handle unsubscribes it.
    fn attach(&mut self, template: &TemplateId) -> Vec<Box<dyn Attachment>>;

    fn apply_page_frame(&mut self, template: &TemplateId, frame: &PageFrame);

    fn apply_scene_event(&mut self, event: &SceneEvent);

    fn set_navigation_visible(&mut self, visible: bool);

    /// Page colours from the content root's data attributes.
    fn apply_page_colors(&mut self, _template: &TemplateId) {}
}
