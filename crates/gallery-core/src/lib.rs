//! Platform-free core of the gallery front end.
//!
//! Scroll state, input normalisation, viewport math, media tiles, per-template
//! scenes, the canvas orchestrator, the page controller and the navigation
//! state machine. The browser is reached only through the [`Renderer`] and
//! [`DocumentPort`] traits, so everything here runs in host tests.

pub mod app;
pub mod canvas;
pub mod constants;
pub mod document;
pub mod error;
pub mod fade;
pub mod input;
pub mod navigation;
pub mod page;
pub mod render;
pub mod scene;
pub mod scroll;
pub mod template;
pub mod tile;
pub mod viewport;

pub use app::{App, FetchResponse};
pub use canvas::CanvasOrchestrator;
pub use document::{ContentFragment, DocumentPort, LayoutSource, PageMetrics};
pub use error::{Error, Result, TileError};
pub use input::{DeviceContext, PointerInput, RawWheel, WheelDelta};
pub use navigation::{
    is_same_origin, Admission, BusyPolicy, FetchRequest, FetchTicket, NavigationConfig,
    NavigationRequest, TransitionState,
};
pub use page::{Attachment, Entrance, PageController, PageEvent, PageFrame, PageLifecycle};
pub use render::{DrawFrame, Renderer, SceneKey, TileDraw, TileKey, TileLoad};
pub use scene::{FrameInput, Scene, SceneEvent, SceneLayout};
pub use scroll::{Direction, ScrollAxis, ScrollRange};
pub use template::TemplateId;
pub use tile::{MediaLayout, MediaRef, MediaTile, TileStatus};
pub use viewport::{CameraParams, PixelSize, Rect, ViewportSize};
