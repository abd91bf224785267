// File: crates/surface-demo/src/main.rs
// Summary: Windowed demo; winit UI thread forwards surface lifecycle events, a render worker thread drives the renderer.

mod scene;

use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};
use surface_core::{
    CanvasRenderer, ContextConfig, FrameError, PlatformContext, RunOutcome, SurfaceHandle,
};
use surface_skia_gl::{NativeDisplay, NativeWindow};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoopBuilder, EventLoopProxy};
use winit::window::WindowBuilder;

#[derive(Debug)]
enum DemoEvent {
    /// The renderer reached Done; the window may go.
    Released,
}

struct WindowPlatform {
    scale: f32,
}

impl PlatformContext for WindowPlatform {
    fn pixel_density(&self) -> f32 { self.scale }
}

fn context_config() -> ContextConfig {
    let samples = std::env::var("SURFACE_DEMO_SAMPLES")
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .unwrap_or(0);
    ContextConfig::default().with_samples(samples)
}

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, PartialEq, Eq)]
enum Pace {
    Next,
    Wait,
    Stop,
}

/// What the worker does after a `run`. Failures back off like an unready
/// surface so a persistent present error cannot spin the thread.
fn pace(outcome: &Result<RunOutcome, FrameError>) -> Pace {
    match outcome {
        // swap_buffers paces us to the display
        Ok(RunOutcome::Rendered) => Pace::Next,
        Ok(RunOutcome::NotReady) => Pace::Wait,
        Ok(RunOutcome::Finished) | Ok(RunOutcome::Idle) => Pace::Stop,
        Err(e) => {
            log::warn!("frame dropped: {e}");
            Pace::Wait
        }
    }
}

/// Body of the render worker. Every graphics call happens on this thread.
fn render_loop(
    display: NativeDisplay,
    scale: f32,
    proxy: EventLoopProxy<DemoEvent>,
    handle_tx: mpsc::Sender<SurfaceHandle<NativeWindow>>,
) {
    let (renderer, handle) = surface_skia_gl::new_renderer(
        display,
        Arc::new(WindowPlatform { scale }),
        move || {
            let _ = proxy.send_event(DemoEvent::Released);
        },
    );
    let mut renderer = renderer.with_config(context_config());
    if handle_tx.send(handle).is_err() {
        return;
    }

    let started = Instant::now();
    let density = renderer.pixel_density();
    loop {
        let seconds = started.elapsed().as_secs_f32();
        let outcome = renderer.render_to_canvas(&mut |canvas: &skia_safe::Canvas| -> anyhow::Result<()> {
            scene::draw(canvas, seconds, density);
            Ok(())
        });
        match pace(&outcome) {
            Pace::Next => {}
            Pace::Wait => thread::sleep(FRAME_INTERVAL),
            Pace::Stop => break,
        }
    }
    surface_skia_gl::shared_cache().evict_current_thread();
    log::info!("render worker exiting");
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let event_loop = EventLoopBuilder::<DemoEvent>::with_user_event().build();
    let window = WindowBuilder::new()
        .with_title("skia-surface demo")
        .with_inner_size(LogicalSize::new(1024.0, 640.0))
        .build(&event_loop)
        .context("failed to create window")?;

    // SAFETY: the event loop (and its display connection) outlives the worker,
    // which is joined before the loop is destroyed.
    let display = unsafe { NativeDisplay::new(event_loop.raw_display_handle()) };
    let scale = window.scale_factor() as f32;
    let proxy = event_loop.create_proxy();
    let (handle_tx, handle_rx) = mpsc::channel();
    let worker = thread::Builder::new()
        .name("render".into())
        .spawn(move || render_loop(display, scale, proxy, handle_tx))
        .context("failed to spawn render thread")?;
    let handle = handle_rx.recv().context("render thread exited early")?;
    let mut worker = Some(worker);

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        match event {
            Event::Resumed => {
                let size = window.inner_size();
                // SAFETY: the window lives in this closure until the release
                // callback has fired.
                let native = unsafe { NativeWindow::new(window.raw_window_handle()) };
                handle.surface_available(native, size.width as i32, size.height as i32);
            }
            Event::Suspended => handle.surface_destroyed(),
            Event::WindowEvent { event: WindowEvent::Resized(size), .. } => {
                handle.surface_size_changed(size.width as i32, size.height as i32);
            }
            Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
                log::info!("close requested; tearing down renderer");
                handle.teardown();
            }
            Event::UserEvent(DemoEvent::Released) => {
                *control_flow = ControlFlow::Exit;
            }
            Event::LoopDestroyed => {
                if let Some(worker) = worker.take() {
                    if worker.join().is_err() {
                        log::error!("render thread panicked");
                    }
                }
            }
            _ => {}
        }
    })
}
