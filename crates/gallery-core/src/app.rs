//! Top-level orchestration: one page, one canvas, one navigation machine.
//!
//! `frame` is the single per-frame entry point. It updates the page first and
//! the canvas second, so scenes that follow the page scroll always read this
//! frame's value.

use crate::canvas::CanvasOrchestrator;
use crate::document::{ContentFragment, DocumentPort};
use crate::error::{Error, Result};
use crate::input::{normalize_wheel, DeviceContext, PointerInput, RawWheel};
use crate::navigation::{
    Admission, FetchRequest, FetchTicket, NavigationConfig, NavigationRequest, Navigator,
    TransitionState,
};
use crate::page::{PageController, PageEvent, PageLifecycle};
use crate::render::Renderer;
use crate::scene::FrameInput;
use crate::template::TemplateId;
use crate::viewport::CameraParams;

/// Raw result of an HTTP GET.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchResponse {
    pub status: u16,
    pub body: String,
}

pub struct App<R: Renderer, D: DocumentPort> {
    document: D,
    canvas: CanvasOrchestrator<R>,
    page: PageController,
    nav: Navigator,
    device: DeviceContext,
    template: TemplateId,
    pending_fetch: Option<FetchRequest>,
}

impl<R: Renderer, D: DocumentPort> App<R, D> {
    pub fn new(
        document: D,
        renderer: R,
        device: DeviceContext,
        config: NavigationConfig,
        camera: CameraParams,
        seed: u64,
    ) -> Result<Self> {
        let template = document
            .current_template()
            .ok_or_else(|| Error::MalformedResponse {
                url: "initial document".to_string(),
                reason: "no content root with a template id".to_string(),
            })?;
        log::info!("[app] starting on {}", template);

        let mut canvas = CanvasOrchestrator::new(renderer, camera, document.window_size(), seed);
        canvas.on_change_end(&template, &document, 0.0);

        let mut app = Self {
            page: PageController::new(template.clone(), device),
            document,
            canvas,
            nav: Navigator::new(config),
            device,
            template,
            pending_fetch: None,
        };
        let attachments = app.document.attach(&app.template);
        app.page.create(attachments);
        app.on_resize();
        app.document.apply_page_colors(&app.template);
        app.page.show();
        app.document.bind_links();
        Ok(app)
    }

    pub fn template(&self) -> &TemplateId {
        &self.template
    }

    pub fn state(&self) -> TransitionState {
        self.nav.state()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.nav
    }

    pub fn page(&self) -> &PageController {
        &self.page
    }

    pub fn canvas(&self) -> &CanvasOrchestrator<R> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasOrchestrator<R> {
        &mut self.canvas
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Fetch the app is waiting on, handed out once.
    pub fn take_fetch(&mut self) -> Option<FetchRequest> {
        self.pending_fetch.take()
    }

    pub fn navigate(&mut self, request: NavigationRequest) -> Admission {
        let admission = self.nav.begin(request);
        if admission == Admission::Started {
            self.document.set_navigation_visible(false);
            self.page.hide();
            self.canvas.on_change_start(&self.template);
        }
        admission
    }

    /// One tick of the render loop.
    pub fn frame(&mut self, dt: f32) {
        let frame = self.page.update(dt);
        self.document.apply_page_frame(&self.template, &frame);

        match frame.event {
            Some(PageEvent::Hidden) => {
                if let Some(fetch) = self.nav.hidden() {
                    log::debug!("[app] fetch {} ({})", fetch.url, fetch.ticket.0);
                    self.pending_fetch = Some(fetch);
                }
            }
            Some(PageEvent::Shown) => {
                let replay = self.nav.shown().or_else(|| self.nav.take_queued());
                if let Some(request) = replay {
                    log::info!("[app] replaying {}", request.url);
                    self.navigate(request);
                }
            }
            None => {}
        }

        let input = FrameInput {
            dt,
            page_scroll: self.page.scroll().current,
        };
        for event in self.canvas.update(&input).iter() {
            self.document.apply_scene_event(event);
        }
    }

    /// Deliver the result of the fetch issued for `ticket`.
    ///
    /// Failures abort back to `Idle` with the current page restored and are
    /// returned for logging. Results for stale tickets are ignored.
    pub fn on_fetch_complete(
        &mut self,
        ticket: FetchTicket,
        response: Result<FetchResponse>,
    ) -> Result<()> {
        if !self.nav.is_current(ticket) {
            log::warn!("[app] dropping result of stale fetch {}", ticket.0);
            return Ok(());
        }
        let url = self
            .nav
            .active()
            .map(|r| r.url.clone())
            .unwrap_or_default();

        let fragment = response
            .and_then(|r| {
                if r.status == 200 {
                    Ok(r.body)
                } else {
                    Err(Error::NavigationFetchFailure {
                        url: url.clone(),
                        status: Some(r.status),
                    })
                }
            })
            .and_then(|body| {
                self.document
                    .extract_content(&body)
                    .map_err(|reason| Error::MalformedResponse {
                        url: url.clone(),
                        reason,
                    })
            });

        match fragment {
            Ok(fragment) => {
                if let Some(request) = self.nav.fetched(ticket) {
                    self.mount(&request, fragment);
                }
                Ok(())
            }
            Err(err) => {
                log::warn!("[app] {}", err);
                if self.nav.failed(ticket) {
                    self.restore();
                }
                Err(err)
            }
        }
    }

    /// Swap in the fetched content. Runs entirely inside `Mounting`.
    fn mount(&mut self, request: &NavigationRequest, fragment: ContentFragment) {
        if request.pushes_history() {
            self.document.push_history(&request.url);
        }
        self.template = fragment.template.clone();
        self.document.replace_content(&fragment);
        self.canvas.on_content_replaced(&self.template, &self.document, 0.0);

        self.page = PageController::new(self.template.clone(), self.device);
        let attachments = self.document.attach(&self.template);
        self.page.create(attachments);
        self.on_resize();

        self.document.set_navigation_visible(true);
        self.document.apply_page_colors(&self.template);
        self.page.show();
        self.document.bind_links();
        self.nav.mounted();
    }

    /// Bring back the page and scene an aborted transition started hiding.
    fn restore(&mut self) {
        self.canvas.on_change_abort();
        let attachments = self.document.attach(&self.template);
        self.page.attach(attachments);
        self.page.show();
        self.document.set_navigation_visible(true);
    }

    pub fn on_resize(&mut self) {
        let window = self.document.window_size();
        let metrics = self.document.measure_page(&self.template);
        self.page.on_resize(metrics, window);
        self.canvas
            .on_resize(&self.document, self.page.scroll().current);
    }

    pub fn on_wheel(&mut self, raw: RawWheel) {
        let delta = normalize_wheel(raw);
        self.page.on_wheel(delta);
        self.canvas.on_wheel(delta);
    }

    pub fn on_pointer(&mut self, input: PointerInput) {
        self.page.on_pointer(input);
        self.canvas.on_pointer(input);
    }

    /// Returns true when the key scrolled the page.
    pub fn on_key(&mut self, key: &str) -> bool {
        self.page.on_key(key)
    }
}
