// File: crates/surface-core/tests/common/mod.rs
// Purpose: Recording mock backend shared by the lifecycle and cache tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

use surface_core::{
    ContextConfig, DefaultPlatform, DrawFn, FrameError, GraphicsBackend, InitError, Renderer,
    SurfaceHandle, SurfaceSize, ThreadContextCache,
};

/// One backend call, in the order the renderer made it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    BuildContext { context: usize },
    Bind { context: usize, surface: usize, window: u32, width: u32, height: u32 },
    Release { surface: usize },
    Present { surface: usize },
}

#[derive(Debug)]
pub struct MockContext {
    pub id: usize,
    pub thread: ThreadId,
}

#[derive(Debug)]
pub struct MockSurface {
    pub id: usize,
    pub window: u32,
    pub size: SurfaceSize,
}

/// What the content callback sees.
#[derive(Debug)]
pub struct MockCanvas {
    pub surface: usize,
    pub width: u32,
    pub height: u32,
}

#[derive(Default)]
struct Recorder {
    calls: Mutex<Vec<Call>>,
    next_id: AtomicUsize,
    fail_builds: AtomicUsize,
    fail_binds: AtomicUsize,
    fail_present: AtomicBool,
    on_bind: Mutex<Option<Box<dyn Fn() + Send>>>,
}

#[derive(Clone, Default)]
pub struct MockBackend {
    recorder: Arc<Recorder>,
}

impl MockBackend {
    pub fn new() -> Self { Self::default() }

    pub fn calls(&self) -> Vec<Call> {
        self.recorder.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorder.calls.lock().unwrap().len()
    }

    pub fn builds(&self) -> usize {
        self.calls().iter().filter(|c| matches!(c, Call::BuildContext { .. })).count()
    }

    pub fn binds(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| matches!(c, Call::Bind { .. })).collect()
    }

    /// The next `n` context builds fail.
    pub fn fail_next_builds(&self, n: usize) {
        self.recorder.fail_builds.store(n, Ordering::SeqCst);
    }

    /// The next `n` surface binds fail.
    pub fn fail_next_binds(&self, n: usize) {
        self.recorder.fail_binds.store(n, Ordering::SeqCst);
    }

    pub fn set_fail_present(&self, fail: bool) {
        self.recorder.fail_present.store(fail, Ordering::SeqCst);
    }

    /// Runs `hook` inside every successful bind, while the worker is mid-run.
    pub fn on_bind(&self, hook: impl Fn() + Send + 'static) {
        *self.recorder.on_bind.lock().unwrap() = Some(Box::new(hook));
    }

    fn record(&self, call: Call) {
        self.recorder.calls.lock().unwrap().push(call);
    }

    fn next_id(&self) -> usize {
        self.recorder.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn take_failure(counter: &AtomicUsize) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

impl GraphicsBackend for MockBackend {
    type Window = u32;
    type Context = MockContext;
    type Surface = MockSurface;
    type Canvas = MockCanvas;

    fn build_context(&self, _config: &ContextConfig) -> Result<MockContext, InitError> {
        if Self::take_failure(&self.recorder.fail_builds) {
            return Err(InitError::ContextRejected("injected".into()));
        }
        let id = self.next_id();
        self.record(Call::BuildContext { context: id });
        Ok(MockContext { id, thread: thread::current().id() })
    }

    fn bind_surface(
        &self,
        context: &MockContext,
        window: &u32,
        size: SurfaceSize,
    ) -> Result<MockSurface, InitError> {
        assert_eq!(context.thread, thread::current().id(), "context used off its thread");
        if Self::take_failure(&self.recorder.fail_binds) {
            return Err(InitError::SurfaceGone);
        }
        let id = self.next_id();
        self.record(Call::Bind {
            context: context.id,
            surface: id,
            window: *window,
            width: size.width(),
            height: size.height(),
        });
        if let Some(hook) = self.recorder.on_bind.lock().unwrap().as_ref() {
            hook();
        }
        Ok(MockSurface { id, window: *window, size })
    }

    fn release_surface(&self, context: &MockContext, surface: MockSurface) {
        assert_eq!(context.thread, thread::current().id(), "context used off its thread");
        self.record(Call::Release { surface: surface.id });
    }

    fn present(
        &self,
        context: &MockContext,
        surface: &mut MockSurface,
        draw: &mut DrawFn<'_, MockCanvas>,
    ) -> Result<(), FrameError> {
        assert_eq!(context.thread, thread::current().id(), "context used off its thread");
        let canvas = MockCanvas {
            surface: surface.id,
            width: surface.size.width(),
            height: surface.size.height(),
        };
        draw(&canvas)?;
        if self.recorder.fail_present.load(Ordering::SeqCst) {
            return Err(FrameError::Present("injected".into()));
        }
        self.record(Call::Present { surface: surface.id });
        Ok(())
    }
}

pub struct Harness {
    pub renderer: Renderer<MockBackend>,
    pub handle: SurfaceHandle<u32>,
    pub releases: Arc<AtomicUsize>,
}

impl Harness {
    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }
}

pub fn harness(backend: &MockBackend, cache: &Arc<ThreadContextCache<MockContext>>) -> Harness {
    let releases = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&releases);
    let (renderer, handle) = Renderer::new(
        backend.clone(),
        Arc::clone(cache),
        Arc::new(DefaultPlatform),
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );
    Harness { renderer, handle, releases }
}

pub fn new_cache() -> Arc<ThreadContextCache<MockContext>> {
    Arc::new(ThreadContextCache::new())
}

/// Content callback that draws nothing and succeeds.
pub fn noop(_canvas: &MockCanvas) -> anyhow::Result<()> {
    Ok(())
}

/// One frame at the last notified geometry, the way a content producer drives it.
pub fn frame(renderer: &mut Renderer<MockBackend>) -> Result<surface_core::RunOutcome, FrameError> {
    use surface_core::CanvasRenderer;
    renderer.render_to_canvas(&mut |_canvas: &MockCanvas| -> anyhow::Result<()> { Ok(()) })
}
