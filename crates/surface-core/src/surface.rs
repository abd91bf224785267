// File: crates/surface-core/src/surface.rs
// Summary: Presentable surface bound to one native window at one size.

use std::fmt;

use crate::backend::GraphicsBackend;
use crate::config::SurfaceSize;
use crate::error::InitError;

/// A backend surface plus the window and geometry it was built for.
///
/// A binding is never resized in place: when the window or size changes the
/// owner releases it and binds a new one. `generation` is the window
/// generation it was built in; a later generation never reuses it, even for
/// an equal handle.
pub struct SurfaceBinding<B: GraphicsBackend> {
    window: B::Window,
    generation: u64,
    size: SurfaceSize,
    surface: B::Surface,
}

impl<B: GraphicsBackend> SurfaceBinding<B> {
    /// Builds a surface for `window`; the context is left current against it.
    pub fn bind(
        backend: &B,
        context: &B::Context,
        window: &B::Window,
        generation: u64,
        size: SurfaceSize,
    ) -> Result<Self, InitError> {
        let surface = backend.bind_surface(context, window, size)?;
        log::debug!("bound surface {}x{} to {window:?} (gen {generation})", size.width(), size.height());
        Ok(Self { window: window.clone(), generation, size, surface })
    }

    /// Destroys the render target and presentable surface.
    pub fn release(self, backend: &B, context: &B::Context) {
        log::debug!(
            "releasing surface {}x{} on {:?}",
            self.size.width(),
            self.size.height(),
            self.window
        );
        backend.release_surface(context, self.surface);
    }

    /// True when this binding can serve a frame for `window` of `generation`
    /// at `size`.
    pub fn matches(&self, window: &B::Window, generation: u64, size: SurfaceSize) -> bool {
        self.generation == generation && self.window == *window && self.size == size
    }

    pub fn window(&self) -> &B::Window { &self.window }

    pub fn generation(&self) -> u64 { self.generation }

    pub fn size(&self) -> SurfaceSize { self.size }

    pub(crate) fn surface_mut(&mut self) -> &mut B::Surface { &mut self.surface }
}

impl<B: GraphicsBackend> fmt::Debug for SurfaceBinding<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceBinding")
            .field("window", &self.window)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
