// File: crates/surface-skia-gl/src/handles.rs
// Summary: Sendable wrappers for host-owned native window and display handles.

use raw_window_handle::{RawDisplayHandle, RawWindowHandle};

/// Weak reference to a host-owned native window.
///
/// The host keeps the window alive from `surface_available` until the
/// renderer has run once after `surface_destroyed` (or reached Done).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeWindow(RawWindowHandle);

// SAFETY: the handle is an opaque pointer that is only dereferenced by the
// graphics driver on the render worker thread, within the lifetime contract above.
unsafe impl Send for NativeWindow {}
unsafe impl Sync for NativeWindow {}

impl NativeWindow {
    /// # Safety
    /// `handle` must stay valid for the lifetime contract documented on the type.
    pub unsafe fn new(handle: RawWindowHandle) -> Self { Self(handle) }

    pub fn raw(&self) -> RawWindowHandle { self.0 }
}

/// Connection to the windowing system's display, used to create contexts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NativeDisplay(RawDisplayHandle);

// SAFETY: as for `NativeWindow`; the display outlives every renderer.
unsafe impl Send for NativeDisplay {}
unsafe impl Sync for NativeDisplay {}

impl NativeDisplay {
    /// # Safety
    /// `handle` must stay valid for as long as any context built from it exists.
    pub unsafe fn new(handle: RawDisplayHandle) -> Self { Self(handle) }

    pub fn raw(&self) -> RawDisplayHandle { self.0 }
}
