// File: crates/surface-skia-gl/src/lib.rs
// Summary: Skia-on-GLES backend for surface-core: EGL contexts via glutin, Skia GPU surfaces per window.

use std::sync::{Arc, OnceLock};

use skia_safe as skia;
use surface_core::{
    ContextConfig, DrawFn, FrameError, GraphicsBackend, InitError, PlatformContext, Renderer,
    SurfaceHandle, SurfaceSize, ThreadContextCache,
};

pub mod config_match;
pub mod context;
pub mod handles;
pub mod surface;

pub use config_match::ConfigTraits;
pub use context::GlDrawingContext;
pub use handles::{NativeDisplay, NativeWindow};
pub use surface::GlSurfaceTarget;

/// Renders with Skia's Ganesh GL backend onto EGL window surfaces.
///
/// Targets EGL platforms (Linux, Android). CGL has no pbuffer placeholder, so
/// context creation on macOS reports `NoMatchingConfig`.
#[derive(Clone, Copy, Debug)]
pub struct SkiaGlBackend {
    display: NativeDisplay,
}

impl SkiaGlBackend {
    pub fn new(display: NativeDisplay) -> Self { Self { display } }
}

impl GraphicsBackend for SkiaGlBackend {
    type Window = NativeWindow;
    type Context = GlDrawingContext;
    type Surface = GlSurfaceTarget;
    type Canvas = skia::Canvas;

    fn build_context(&self, config: &ContextConfig) -> Result<GlDrawingContext, InitError> {
        context::build(self.display, config)
    }

    fn bind_surface(
        &self,
        context: &GlDrawingContext,
        window: &NativeWindow,
        size: SurfaceSize,
    ) -> Result<GlSurfaceTarget, InitError> {
        surface::bind(context, window, size)
    }

    fn release_surface(&self, context: &GlDrawingContext, surface: GlSurfaceTarget) {
        surface::release(context, surface)
    }

    fn present(
        &self,
        context: &GlDrawingContext,
        surface: &mut GlSurfaceTarget,
        draw: &mut DrawFn<'_, skia::Canvas>,
    ) -> Result<(), FrameError> {
        surface::present(context, surface, draw)
    }
}

/// Process-wide context table, created on first use. Entries are never
/// evicted unless a worker calls `evict_current_thread` before exiting.
pub fn shared_cache() -> Arc<ThreadContextCache<GlDrawingContext>> {
    static CACHE: OnceLock<Arc<ThreadContextCache<GlDrawingContext>>> = OnceLock::new();
    Arc::clone(CACHE.get_or_init(|| Arc::new(ThreadContextCache::new())))
}

/// A renderer on the shared cache. Create it on the worker thread that will run it.
pub fn new_renderer(
    display: NativeDisplay,
    platform: Arc<dyn PlatformContext>,
    release: impl FnOnce() + Send + 'static,
) -> (Renderer<SkiaGlBackend>, SurfaceHandle<NativeWindow>) {
    Renderer::new(SkiaGlBackend::new(display), shared_cache(), platform, release)
}
