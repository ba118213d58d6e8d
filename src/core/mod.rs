//! Application loop, frame pacing and input dispatch

mod application;
mod events;
mod frame_pacer;
mod handle;
mod overlay;

pub use application::{
    AppOptions, AppState, Application, DisplayStats, FrameStats, GlobalHandler,
};
pub use events::{ChannelEvents, EventSource, ScriptedEvents};
pub use frame_pacer::FramePacer;
pub use handle::AppHandle;
pub use overlay::{fps_role, FpsOverlay};
