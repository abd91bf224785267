// File: crates/surface-skia-gl/src/context.rs
// Summary: Per-thread EGL/GLES context plus the Skia DirectContext shared by every surface on that thread.

use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::Config;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{PbufferSurface, Surface, SurfaceAttributesBuilder};
use skia_safe::gpu;
use surface_core::{ContextConfig, InitError};

use crate::config_match::{self, ConfigTraits};
use crate::handles::NativeDisplay;

/// API connection, negotiated config, GL context, and the Skia backend
/// context. Lives on the worker thread that built it.
pub struct GlDrawingContext {
    // Dropped first, while the GL context still exists.
    pub(crate) direct: gpu::DirectContext,
    pub(crate) placeholder: Surface<PbufferSurface>,
    pub(crate) gl_context: PossiblyCurrentContext,
    pub(crate) config: Config,
    pub(crate) traits: ConfigTraits,
    pub(crate) display: Display,
}

impl GlDrawingContext {
    /// Framebuffer layout that was actually negotiated.
    pub fn traits(&self) -> ConfigTraits { self.traits }

    /// Makes the 1x1 placeholder current so no window surface stays bound.
    pub(crate) fn park(&self) {
        if let Err(e) = self.gl_context.make_current(&self.placeholder) {
            log::warn!("could not park GL context on placeholder: {e}");
        }
    }
}

impl Drop for GlDrawingContext {
    fn drop(&mut self) {
        // Skia frees its GL objects as `direct` drops, which needs a current context.
        self.park();
    }
}

#[cfg(target_os = "windows")]
fn display_preference() -> DisplayApiPreference { DisplayApiPreference::WglThenEgl(None) }

#[cfg(target_os = "macos")]
fn display_preference() -> DisplayApiPreference { DisplayApiPreference::Cgl }

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn display_preference() -> DisplayApiPreference { DisplayApiPreference::Egl }

/// Connects to the display, negotiates a config, creates a GLES context
/// current on a 1x1 pbuffer, and wraps it in a Skia DirectContext.
pub(crate) fn build(display: NativeDisplay, want: &ContextConfig) -> Result<GlDrawingContext, InitError> {
    // SAFETY: NativeDisplay's constructor contract keeps the handle valid.
    let gl_display = unsafe { Display::new(display.raw(), display_preference()) }
        .map_err(|e| InitError::NoDisplay(e.to_string()))?;

    let candidates = unsafe { gl_display.find_configs(config_match::template(want)) }
        .map_err(|e| InitError::NoDisplay(e.to_string()))?;
    let config = config_match::pick(candidates, want).ok_or(InitError::NoMatchingConfig)?;
    let traits = ConfigTraits::of(&config).ok_or(InitError::NoMatchingConfig)?;
    log::debug!("negotiated GL config {traits:?}");

    let (major, minor) = want.api_version;
    let attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(Version::new(major, minor))))
        .build(None);
    let not_current = unsafe { gl_display.create_context(&config, &attributes) }
        .map_err(|e| InitError::ContextRejected(e.to_string()))?;

    let one = NonZeroU32::MIN;
    let pbuffer = SurfaceAttributesBuilder::<PbufferSurface>::new().build(one, one);
    let placeholder = unsafe { gl_display.create_pbuffer_surface(&config, &pbuffer) }
        .map_err(|e| InitError::ContextRejected(e.to_string()))?;
    let gl_context = not_current
        .make_current(&placeholder)
        .map_err(|e| InitError::ContextRejected(e.to_string()))?;

    let interface = gpu::gl::Interface::new_load_with(|name| match CString::new(name) {
        Ok(name) => gl_display.get_proc_address(&name),
        Err(_) => std::ptr::null(),
    })
    .ok_or_else(|| InitError::BackendContext("Skia GL interface creation failed".into()))?;
    let direct = gpu::direct_contexts::make_gl(interface, None)
        .ok_or_else(|| InitError::BackendContext("Skia DirectContext creation failed".into()))?;

    Ok(GlDrawingContext { direct, placeholder, gl_context, config, traits, display: gl_display })
}
