// File: crates/surface-core/src/frame.rs
// Summary: One frame: hand the canvas to the content callback, flush, present.

use crate::backend::{DrawFn, GraphicsBackend};
use crate::error::FrameError;
use crate::surface::SurfaceBinding;

/// Renders a single frame onto an established binding. No retries: a failed
/// draw or present is reported for this frame only.
pub(crate) fn render_frame<B: GraphicsBackend>(
    backend: &B,
    context: &B::Context,
    binding: &mut SurfaceBinding<B>,
    draw: &mut DrawFn<'_, B::Canvas>,
) -> Result<(), FrameError> {
    let size = binding.size();
    backend.present(context, binding.surface_mut(), draw).map_err(|e| {
        log::debug!("frame at {}x{} failed: {e}", size.width(), size.height());
        e
    })
}
