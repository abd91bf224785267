// File: crates/surface-core/src/platform.rs
// Summary: Narrow traits at the host boundary: environment queries and the per-frame render entry point.

use crate::backend::DrawFn;
use crate::error::FrameError;
use crate::state::RunOutcome;

/// Environment facilities supplied by the host view layer. Opaque to the core.
pub trait PlatformContext: Send + Sync {
    /// Physical pixels per logical pixel.
    fn pixel_density(&self) -> f32 { 1.0 }
}

/// Platform with no density scaling.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultPlatform;

impl PlatformContext for DefaultPlatform {}

/// What a content producer needs from a renderer: its drawable size and a
/// way to draw one frame.
pub trait CanvasRenderer {
    type Canvas: ?Sized;

    fn scaled_width(&self) -> f32;
    fn scaled_height(&self) -> f32;

    /// Draws one frame at the most recently notified geometry. The canvas is
    /// only valid for the duration of `draw`.
    fn render_to_canvas(&mut self, draw: &mut DrawFn<'_, Self::Canvas>) -> Result<RunOutcome, FrameError>;
}
