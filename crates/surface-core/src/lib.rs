// File: crates/surface-core/src/lib.rs
// Summary: Lifecycle core for a GPU drawing surface rendered from a dedicated worker thread.
//
// Hosts call the `SurfaceHandle` notifications from any thread; a single
// worker thread calls `Renderer::run`, the only place the graphics backend is
// touched. Drawing contexts are cached per worker thread and shared by every
// renderer that runs there.

pub mod backend;
pub mod config;
pub mod context_cache;
pub mod error;
mod frame;
pub mod platform;
pub mod renderer;
pub mod state;
pub mod surface;
pub mod thread_bound;

pub use backend::{DrawFn, GraphicsBackend};
pub use config::{ContextConfig, SurfaceSize};
pub use context_cache::{SharedContext, ThreadContextCache};
pub use error::{FrameError, InitError};
pub use platform::{CanvasRenderer, DefaultPlatform, PlatformContext};
pub use renderer::{ReleaseCallback, Renderer, SurfaceHandle};
pub use state::{RenderState, RunOutcome};
pub use surface::SurfaceBinding;
pub use thread_bound::ThreadBound;
