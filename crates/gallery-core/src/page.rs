//! DOM-side page controller.
//!
//! A page owns the vertical scroll of its content wrapper and the
//! visibility-driven helpers attached to its elements. `show` and `hide` are
//! asynchronous in effect: they start a fade, and the frame on which the fade
//! completes reports `PageEvent::Shown` or `PageEvent::Hidden` from
//! `update`.

use crate::constants::KEYBOARD_SCROLL_STEP;
use crate::document::PageMetrics;
use crate::fade::Fade;
use crate::input::{page_drag_distance, DeviceContext, DragTracker, PointerInput, WheelDelta};
use crate::scroll::{ScrollAxis, ScrollRange};
use crate::template::TemplateId;
use crate::viewport::PixelSize;

/// A helper bound to one element of the page, such as an entrance animation
/// or a lazy image loader. The page only holds it; dropping it must release
/// its observers and listeners.
pub trait Attachment {}

/// Entrance animations react to their element entering or leaving view.
pub trait Entrance {
    fn on_visibility_change(&mut self, visible: bool);
}

/// Capability surface every page template satisfies.
pub trait PageLifecycle {
    fn create(&mut self, attachments: Vec<Box<dyn Attachment>>);
    fn show(&mut self);
    fn hide(&mut self);
    fn on_resize(&mut self, metrics: PageMetrics, window: PixelSize);
    fn update(&mut self, dt: f32) -> PageFrame;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageEvent {
    Shown,
    Hidden,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagePhase {
    Created,
    Showing,
    Shown,
    Hiding,
    Hidden,
}

/// Style output for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageFrame {
    /// Applied as `translateY(-{translate_y}px)` on the wrapper.
    pub translate_y: f32,
    pub opacity: f32,
    pub event: Option<PageEvent>,
}

/// Everything the app knows about the current page.
pub struct PageDescriptor {
    pub template: TemplateId,
    pub scroll: ScrollAxis,
    pub attachments: Vec<Box<dyn Attachment>>,
}

pub struct PageController {
    descriptor: PageDescriptor,
    device: DeviceContext,
    drag: DragTracker,
    /// Scroll position when the current touch drag started.
    anchor: f32,
    opacity: Fade,
    phase: PagePhase,
}

impl PageController {
    pub fn new(template: TemplateId, device: DeviceContext) -> Self {
        Self {
            descriptor: PageDescriptor {
                template,
                scroll: ScrollAxis::new(ScrollRange::Forward),
                attachments: Vec::new(),
            },
            device,
            drag: DragTracker::default(),
            anchor: 0.0,
            opacity: Fade::hidden(),
            phase: PagePhase::Created,
        }
    }

    pub fn template(&self) -> &TemplateId {
        &self.descriptor.template
    }

    pub fn scroll(&self) -> &ScrollAxis {
        &self.descriptor.scroll
    }

    pub fn scroll_mut(&mut self) -> &mut ScrollAxis {
        &mut self.descriptor.scroll
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn attachment_count(&self) -> usize {
        self.descriptor.attachments.len()
    }

    /// Input reaches the page only while it is fully shown.
    #[inline]
    pub fn is_interactive(&self) -> bool {
        self.phase == PagePhase::Shown
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) {
        if self.is_interactive() {
            self.descriptor.scroll.apply_delta(delta.pixel_y);
        }
    }

    pub fn on_pointer(&mut self, input: PointerInput) {
        if !self.device.touch_primary || !self.is_interactive() {
            return;
        }
        match input {
            PointerInput::Down(at) => {
                self.drag.down(at);
                self.anchor = self.descriptor.scroll.current;
            }
            PointerInput::Move(at) => {
                if self.drag.moved(at) {
                    if let Some(distance) = page_drag_distance(self.device, &self.drag) {
                        self.descriptor.scroll.target = self.anchor + distance;
                    }
                }
            }
            PointerInput::Up(at) => self.drag.up(at),
        }
    }

    /// Arrow-key nudges; returns true when the key was consumed.
    pub fn on_key(&mut self, key: &str) -> bool {
        if !self.is_interactive() {
            return false;
        }
        match key {
            "ArrowDown" => self.descriptor.scroll.apply_delta(KEYBOARD_SCROLL_STEP),
            "ArrowUp" => self.descriptor.scroll.apply_delta(-KEYBOARD_SCROLL_STEP),
            _ => return false,
        }
        true
    }

    /// Replace the attachments without touching scroll state. Used when an
    /// aborted transition brings the page back.
    pub fn attach(&mut self, attachments: Vec<Box<dyn Attachment>>) {
        self.destroy();
        self.descriptor.attachments = attachments;
    }

    /// Drop every attachment, releasing its observers.
    fn destroy(&mut self) {
        let n = self.descriptor.attachments.len();
        self.descriptor.attachments.clear();
        if n > 0 {
            log::debug!("[page] {} released {} attachments", self.template(), n);
        }
    }
}

impl PageLifecycle for PageController {
    fn create(&mut self, attachments: Vec<Box<dyn Attachment>>) {
        self.attach(attachments);
        self.descriptor.scroll.reset();
        self.phase = PagePhase::Created;
    }

    fn show(&mut self) {
        log::info!("[page] show {}", self.template());
        self.opacity.fade_in();
        self.phase = PagePhase::Showing;
    }

    fn hide(&mut self) {
        log::info!("[page] hide {}", self.template());
        self.destroy();
        self.drag.is_down = false;
        self.opacity.fade_out();
        self.phase = PagePhase::Hiding;
    }

    fn on_resize(&mut self, metrics: PageMetrics, window: PixelSize) {
        if let Some(height) = metrics.wrapper_height {
            self.descriptor.scroll.set_limit(height - window.height);
        }
    }

    fn update(&mut self, dt: f32) -> PageFrame {
        self.descriptor.scroll.update();

        let mut event = None;
        if self.opacity.advance(dt) {
            match self.phase {
                PagePhase::Showing => {
                    self.phase = PagePhase::Shown;
                    event = Some(PageEvent::Shown);
                }
                PagePhase::Hiding => {
                    self.phase = PagePhase::Hidden;
                    event = Some(PageEvent::Hidden);
                }
                _ => {}
            }
        }

        PageFrame {
            translate_y: self.descriptor.scroll.current,
            opacity: self.opacity.value(),
            event,
        }
    }
}
