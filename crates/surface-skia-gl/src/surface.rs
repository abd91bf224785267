// File: crates/surface-skia-gl/src/surface.rs
// Summary: Window surface + Skia render target bound to one native window at one size, and per-frame present.

use std::num::NonZeroU32;

use glutin::error::ErrorKind;
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, WindowSurface};
use skia_safe::{self as skia, gpu};
use surface_core::{DrawFn, FrameError, InitError, SurfaceSize};

use crate::context::GlDrawingContext;
use crate::handles::NativeWindow;

/// Presentable surface for one window. Fields drop Skia-first.
pub struct GlSurfaceTarget {
    sk_surface: skia::Surface,
    render_target: gpu::BackendRenderTarget,
    gl_surface: Surface<WindowSurface>,
}

/// Default framebuffer of a window surface.
pub fn framebuffer_info() -> gpu::gl::FramebufferInfo {
    gpu::gl::FramebufferInfo {
        fboid: 0,
        format: gpu::gl::Format::RGBA8.into(),
        protected: gpu::Protected::No,
    }
}

fn surface_error(e: glutin::error::Error) -> InitError {
    match e.error_kind() {
        ErrorKind::BadNativeWindow | ErrorKind::BadSurface => InitError::SurfaceGone,
        _ => InitError::SurfaceRejected(e.to_string()),
    }
}

pub(crate) fn bind(
    ctx: &GlDrawingContext,
    window: &NativeWindow,
    size: SurfaceSize,
) -> Result<GlSurfaceTarget, InitError> {
    let zero = || InitError::SurfaceRejected("zero-sized surface".into());
    let width = NonZeroU32::new(size.width()).ok_or_else(zero)?;
    let height = NonZeroU32::new(size.height()).ok_or_else(zero)?;

    let attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(window.raw(), width, height);
    // SAFETY: the host keeps the window alive per NativeWindow's contract.
    let gl_surface = unsafe { ctx.display.create_window_surface(&ctx.config, &attributes) }
        .map_err(surface_error)?;
    ctx.gl_context.make_current(&gl_surface).map_err(surface_error)?;

    let traits = ctx.traits();
    let render_target = gpu::backend_render_targets::make_gl(
        (size.width() as i32, size.height() as i32),
        traits.samples as usize,
        traits.stencil as usize,
        framebuffer_info(),
    );
    let mut direct = ctx.direct.clone();
    let sk_surface = gpu::surfaces::wrap_backend_render_target(
        &mut direct,
        &render_target,
        gpu::SurfaceOrigin::BottomLeft,
        skia::ColorType::RGBA8888,
        None,
        None,
    )
    .ok_or_else(|| InitError::SurfaceRejected("Skia GPU surface creation failed".into()))?;

    Ok(GlSurfaceTarget { sk_surface, render_target, gl_surface })
}

pub(crate) fn release(ctx: &GlDrawingContext, target: GlSurfaceTarget) {
    let GlSurfaceTarget { sk_surface, render_target, gl_surface } = target;
    ctx.direct.clone().flush_and_submit();
    drop(sk_surface);
    drop(render_target);
    // The window surface must not be current when it is destroyed.
    ctx.park();
    drop(gl_surface);
}

pub(crate) fn present(
    ctx: &GlDrawingContext,
    target: &mut GlSurfaceTarget,
    draw: &mut DrawFn<'_, skia::Canvas>,
) -> Result<(), FrameError> {
    if !ctx.gl_context.is_current() || !target.gl_surface.is_current(&ctx.gl_context) {
        ctx.gl_context
            .make_current(&target.gl_surface)
            .map_err(|e| FrameError::Present(e.to_string()))?;
    }

    // The context is shared by every renderer on this thread; forget any GL
    // state tracked against another renderer's surface.
    ctx.direct.clone().reset(None);

    let canvas = target.sk_surface.canvas();
    canvas.clear(skia::Color::TRANSPARENT);
    let depth = canvas.save();
    let drawn = draw(canvas);
    canvas.restore_to_count(depth);
    drawn?;

    ctx.direct.clone().flush_and_submit();
    target
        .gl_surface
        .swap_buffers(&ctx.gl_context)
        .map_err(|e| FrameError::Present(e.to_string()))
}
