// File: crates/surface-core/src/renderer.rs
// Summary: Render-state machine. Notifications from any thread, all graphics work in `run` on the worker.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread;

use crate::backend::{DrawFn, GraphicsBackend};
use crate::config::{ContextConfig, SurfaceSize};
use crate::context_cache::{context_for, SharedContext, ThreadContextCache};
use crate::error::FrameError;
use crate::frame::render_frame;
use crate::platform::{CanvasRenderer, PlatformContext};
use crate::state::{Lifecycle, RenderState, RunOutcome};
use crate::surface::SurfaceBinding;

/// Fired once when the renderer reaches [`RenderState::Done`].
pub type ReleaseCallback = Box<dyn FnOnce() + Send>;

type SharedLifecycle<W> = Arc<Mutex<Lifecycle<W>>>;

fn lock<W>(shared: &Mutex<Lifecycle<W>>) -> MutexGuard<'_, Lifecycle<W>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Notification side of a renderer. Cheap to clone, safe to use from any
/// thread, and never touches the graphics API.
///
/// Notifications between two `run` calls coalesce: the last window and size
/// win, and teardown cannot be undone.
pub struct SurfaceHandle<W> {
    shared: SharedLifecycle<W>,
}

impl<W> Clone for SurfaceHandle<W> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<W: Clone + fmt::Debug> SurfaceHandle<W> {
    /// Records the native window and its size for the next `run`. Ignored
    /// once teardown has been requested.
    pub fn surface_available(&self, window: W, width: i32, height: i32) {
        let result = lock(&self.shared).surface_available(window, SurfaceSize::from_signed(width, height));
        if let Err(ignored) = result {
            log::debug!("{ignored}");
        }
    }

    /// Forgets the native window. The context stays warm; the stale surface is
    /// released on the next `run`.
    pub fn surface_destroyed(&self) {
        lock(&self.shared).surface_destroyed();
    }

    /// Records new geometry; the surface is rebuilt lazily by the next `run`.
    pub fn surface_size_changed(&self, width: i32, height: i32) {
        let result = lock(&self.shared).surface_size_changed(SurfaceSize::from_signed(width, height));
        if let Err(ignored) = result {
            log::debug!("{ignored}");
        }
    }

    /// Requests teardown. At least one more `run` on the worker thread must
    /// follow for resources to be released and the release callback to fire.
    pub fn teardown(&self) {
        if lock(&self.shared).teardown() {
            log::debug!("teardown requested");
        }
    }

    pub fn state(&self) -> RenderState {
        lock(&self.shared).state
    }
}

impl<W> fmt::Debug for SurfaceHandle<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SurfaceHandle").field("state", &lock(&self.shared).state).finish()
    }
}

/// Worker side of a renderer. Owns the surface binding and a reference to the
/// worker thread's drawing context. Must stay on one thread for its lifetime;
/// the first `run` that obtains a context pins it.
pub struct Renderer<B: GraphicsBackend> {
    backend: B,
    config: ContextConfig,
    cache: Arc<ThreadContextCache<B::Context>>,
    platform: Arc<dyn PlatformContext>,
    shared: SharedLifecycle<B::Window>,
    context: Option<SharedContext<B::Context>>,
    binding: Option<SurfaceBinding<B>>,
    release: Option<ReleaseCallback>,
}

impl<B: GraphicsBackend> Renderer<B> {
    pub fn new(
        backend: B,
        cache: Arc<ThreadContextCache<B::Context>>,
        platform: Arc<dyn PlatformContext>,
        release: impl FnOnce() + Send + 'static,
    ) -> (Self, SurfaceHandle<B::Window>) {
        let shared = Arc::new(Mutex::new(Lifecycle::new()));
        let handle = SurfaceHandle { shared: Arc::clone(&shared) };
        let renderer = Self {
            backend,
            config: ContextConfig::default(),
            cache,
            platform,
            shared,
            context: None,
            binding: None,
            release: Some(Box::new(release)),
        };
        (renderer, handle)
    }

    /// Config used if this renderer is the first on its thread to need a
    /// context. Later renderers on the same thread share the existing one.
    pub fn with_config(mut self, config: ContextConfig) -> Self {
        self.config = config;
        self
    }

    /// Drives the lifecycle one step and, when possible, renders a frame at
    /// `width`x`height`. Non-positive sizes fall back to the last notified
    /// geometry.
    ///
    /// Context and surface failures are absorbed and reported as
    /// [`RunOutcome::NotReady`]; only frame failures are returned as errors.
    pub fn run<F>(&mut self, mut draw: F, width: i32, height: i32) -> Result<RunOutcome, FrameError>
    where
        F: FnMut(&B::Canvas) -> anyhow::Result<()>,
    {
        self.step(&mut draw, SurfaceSize::from_signed(width, height))
    }

    fn step(
        &mut self,
        draw: &mut DrawFn<'_, B::Canvas>,
        requested: Option<SurfaceSize>,
    ) -> Result<RunOutcome, FrameError> {
        let snapshot = lock(&self.shared).snapshot();
        if snapshot.state == RenderState::Done {
            return Ok(RunOutcome::Idle);
        }
        self.check_thread()?;

        match snapshot.state {
            RenderState::Done => Ok(RunOutcome::Idle),
            RenderState::Finishing => {
                self.finish();
                Ok(RunOutcome::Finished)
            }
            RenderState::Initializing | RenderState::Rendering => {
                let size = requested.or(snapshot.size);
                let window = snapshot.window.as_ref();
                let Some(context) = self.ensure_surface(window, snapshot.generation, size) else {
                    return Ok(RunOutcome::NotReady);
                };
                if snapshot.state == RenderState::Initializing
                    && !lock(&self.shared).advance(RenderState::Rendering)
                {
                    // Teardown landed mid-initialization; the next run releases.
                    return Ok(RunOutcome::NotReady);
                }
                self.draw_frame(&context, draw)
            }
        }
    }

    fn check_thread(&self) -> Result<(), FrameError> {
        match &self.context {
            Some(context) if !context.is_owner() => Err(FrameError::ForeignThread {
                bound: context.owner(),
                current: thread::current().id(),
            }),
            _ => Ok(()),
        }
    }

    /// Makes sure a context exists and a binding matches `window` of
    /// `generation` at `size`. Returns the context when a frame can be drawn.
    fn ensure_surface(
        &mut self,
        window: Option<&B::Window>,
        generation: u64,
        size: Option<SurfaceSize>,
    ) -> Option<SharedContext<B::Context>> {
        let shared = match self.context.clone() {
            Some(existing) => existing,
            None => match context_for(&self.cache, &self.backend, &self.config) {
                Ok(created) => {
                    self.context = Some(Arc::clone(&created));
                    created
                }
                Err(e) => {
                    log::warn!("drawing context not ready: {e}");
                    return None;
                }
            },
        };
        let context = shared.get()?;

        let Some(window) = window else {
            if let Some(stale) = self.binding.take() {
                log::debug!("window destroyed; dropping its surface");
                stale.release(&self.backend, context);
            }
            return None;
        };
        let size = size?;

        let ready = self.rebind(context, window, generation, size);
        ready.then_some(shared)
    }

    /// Replaces the binding unless it already fits. The old binding is always
    /// released before the new one is built.
    fn rebind(
        &mut self,
        context: &B::Context,
        window: &B::Window,
        generation: u64,
        size: SurfaceSize,
    ) -> bool {
        if self.binding.as_ref().is_some_and(|b| b.matches(window, generation, size)) {
            return true;
        }
        if let Some(old) = self.binding.take() {
            old.release(&self.backend, context);
        }
        match SurfaceBinding::bind(&self.backend, context, window, generation, size) {
            Ok(binding) => {
                self.binding = Some(binding);
                true
            }
            Err(e) => {
                log::warn!("surface not ready: {e}");
                false
            }
        }
    }

    fn draw_frame(
        &mut self,
        shared: &SharedContext<B::Context>,
        draw: &mut DrawFn<'_, B::Canvas>,
    ) -> Result<RunOutcome, FrameError> {
        let (Some(context), Some(binding)) = (shared.get(), self.binding.as_mut()) else {
            return Ok(RunOutcome::NotReady);
        };
        render_frame(&self.backend, context, binding, draw)?;
        Ok(RunOutcome::Rendered)
    }

    /// Finishing -> Done: release the binding, drop our context reference
    /// (the cache keeps the context), then fire the release callback.
    fn finish(&mut self) {
        if let Some(binding) = self.binding.take() {
            match self.context.as_ref().and_then(|c| c.get()) {
                Some(context) => binding.release(&self.backend, context),
                None => {
                    log::warn!("surface released off its worker thread; leaking it");
                    std::mem::forget(binding);
                }
            }
        }
        self.context = None;
        lock(&self.shared).advance(RenderState::Done);
        if let Some(release) = self.release.take() {
            release();
        }
        log::info!("renderer torn down");
    }

    pub fn state(&self) -> RenderState {
        lock(&self.shared).state
    }

    /// Another notification handle for this renderer.
    pub fn handle(&self) -> SurfaceHandle<B::Window> {
        SurfaceHandle { shared: Arc::clone(&self.shared) }
    }

    /// Size of the current binding, if any.
    pub fn bound_size(&self) -> Option<SurfaceSize> {
        self.binding.as_ref().map(SurfaceBinding::size)
    }

    pub fn binding(&self) -> Option<&SurfaceBinding<B>> {
        self.binding.as_ref()
    }

    pub fn pixel_density(&self) -> f32 {
        self.platform.pixel_density()
    }

    pub fn context_cache(&self) -> &Arc<ThreadContextCache<B::Context>> {
        &self.cache
    }
}

impl<B: GraphicsBackend> CanvasRenderer for Renderer<B> {
    type Canvas = B::Canvas;

    fn scaled_width(&self) -> f32 {
        lock(&self.shared).size.map_or(0.0, |s| s.width() as f32)
    }

    fn scaled_height(&self) -> f32 {
        lock(&self.shared).size.map_or(0.0, |s| s.height() as f32)
    }

    fn render_to_canvas(&mut self, draw: &mut DrawFn<'_, B::Canvas>) -> Result<RunOutcome, FrameError> {
        self.step(draw, None)
    }
}

impl<B: GraphicsBackend> Drop for Renderer<B> {
    fn drop(&mut self) {
        let state = self.state();
        if state != RenderState::Done {
            log::warn!("renderer dropped in state {state:?}; tearing down now");
            lock(&self.shared).teardown();
            self.finish();
        }
    }
}

impl<B: GraphicsBackend> fmt::Debug for Renderer<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Renderer")
            .field("state", &self.state())
            .field("binding", &self.binding)
            .field("has_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}
