// File: crates/surface-core/src/error.rs
// Summary: Error taxonomy for context/surface initialization and per-frame failures.

use std::thread::ThreadId;

use thiserror::Error;

use crate::state::RenderState;

/// Context or surface creation failed. Always recoverable: `run` absorbs it
/// and retries on the next frame.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("no display connection: {0}")]
    NoDisplay(String),

    #[error("no config matches the requested color/alpha/depth/stencil layout")]
    NoMatchingConfig,

    #[error("context creation rejected: {0}")]
    ContextRejected(String),

    #[error("native window is gone")]
    SurfaceGone,

    #[error("surface creation rejected: {0}")]
    SurfaceRejected(String),

    #[error("backend context creation failed: {0}")]
    BackendContext(String),
}

/// A single frame failed. Returned to the caller of `run`; the render state
/// is left as it was.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("draw callback failed: {0}")]
    Draw(#[from] anyhow::Error),

    #[error("present failed: {0}")]
    Present(String),

    #[error("renderer is bound to thread {bound:?}, run called from {current:?}")]
    ForeignThread { bound: ThreadId, current: ThreadId },
}

/// A notification arrived after the renderer stopped accepting them.
/// Only ever logged, never handed to callers.
#[derive(Debug, Error)]
#[error("{operation} ignored in state {state:?}")]
pub(crate) struct InvalidState {
    pub operation: &'static str,
    pub state: RenderState,
}
