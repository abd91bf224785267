// File: crates/surface-core/src/backend.rs
// Summary: Capability trait the lifecycle core drives; the only path to the graphics API.

use std::fmt;

use crate::config::{ContextConfig, SurfaceSize};
use crate::error::{FrameError, InitError};

/// Content callback handed the backend's canvas for the duration of one frame.
/// The canvas reference must not escape the call.
pub type DrawFn<'a, C> = dyn FnMut(&C) -> anyhow::Result<()> + 'a;

/// Graphics API glue supplied by the embedder.
///
/// Every method is called from the renderer's worker thread only, and a
/// context is only ever passed back to the backend on the thread that built it.
pub trait GraphicsBackend {
    /// Weak reference to a host-owned native window. Compared to detect that
    /// the host swapped windows.
    type Window: Clone + PartialEq + Send + fmt::Debug;
    /// Per-thread drawing context: API connection, display, negotiated config,
    /// and the shared GPU backend context.
    type Context;
    /// Presentable surface plus the render target describing it.
    type Surface;
    type Canvas: ?Sized;

    /// Connects to the API, negotiates a config, and creates the context
    /// against an offscreen placeholder target.
    fn build_context(&self, config: &ContextConfig) -> Result<Self::Context, InitError>;

    /// Creates a presentable surface for `window` at `size`, leaving `context`
    /// current against it.
    fn bind_surface(
        &self,
        context: &Self::Context,
        window: &Self::Window,
        size: SurfaceSize,
    ) -> Result<Self::Surface, InitError>;

    /// Destroys the render target and presentable surface.
    fn release_surface(&self, context: &Self::Context, surface: Self::Surface);

    /// Makes the surface current, runs `draw` against its canvas, flushes GPU
    /// work, and presents.
    fn present(
        &self,
        context: &Self::Context,
        surface: &mut Self::Surface,
        draw: &mut DrawFn<'_, Self::Canvas>,
    ) -> Result<(), FrameError>;
}
