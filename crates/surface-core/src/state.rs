// File: crates/surface-core/src/state.rs
// Summary: Render lifecycle states and the cross-thread lifecycle record.

use crate::config::SurfaceSize;
use crate::error::InvalidState;

/// Lifecycle phase of one renderer. Only ever moves forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RenderState {
    Initializing,
    Rendering,
    Finishing,
    Done,
}

impl RenderState {
    /// True once teardown has been requested.
    pub fn is_shutting_down(self) -> bool { self >= RenderState::Finishing }
}

/// What a single `run` call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    /// Context, window, or surface not available yet; nothing drawn.
    NotReady,
    /// A frame was drawn and presented.
    Rendered,
    /// Resources released and the release callback fired.
    Finished,
    /// Already done; nothing touched.
    Idle,
}

/// State, window, and geometry as one unit, written by notifying threads and
/// read by the worker. Always accessed under a single lock so the worker never
/// sees a window from one notification paired with a size from another.
#[derive(Debug)]
pub(crate) struct Lifecycle<W> {
    pub state: RenderState,
    pub window: Option<W>,
    pub size: Option<SurfaceSize>,
    /// Bumped whenever a window is handed over or destroyed. Handle values
    /// can be reused by the host, so a binding is only valid for the
    /// generation it was built in.
    pub generation: u64,
}

/// Worker-side copy of the lifecycle record taken at the start of `run`.
#[derive(Debug)]
pub(crate) struct Snapshot<W> {
    pub state: RenderState,
    pub window: Option<W>,
    pub size: Option<SurfaceSize>,
    pub generation: u64,
}

impl<W: Clone> Lifecycle<W> {
    pub fn new() -> Self {
        Self { state: RenderState::Initializing, window: None, size: None, generation: 0 }
    }

    pub fn snapshot(&self) -> Snapshot<W> {
        Snapshot {
            state: self.state,
            window: self.window.clone(),
            size: self.size,
            generation: self.generation,
        }
    }

    /// Moves to `to` if that is forward; returns whether the state changed.
    pub fn advance(&mut self, to: RenderState) -> bool {
        if to > self.state {
            log::debug!("render state {:?} -> {:?}", self.state, to);
            self.state = to;
            true
        } else {
            false
        }
    }

    fn accepting(&self, operation: &'static str) -> Result<(), InvalidState> {
        if self.state.is_shutting_down() {
            Err(InvalidState { operation, state: self.state })
        } else {
            Ok(())
        }
    }

    /// Zero-sized geometry keeps the previous size.
    pub fn surface_available(&mut self, window: W, size: Option<SurfaceSize>) -> Result<(), InvalidState> {
        self.accepting("surface_available")?;
        self.window = Some(window);
        self.generation += 1;
        if size.is_some() {
            self.size = size;
        }
        Ok(())
    }

    pub fn surface_destroyed(&mut self) {
        self.window = None;
        self.generation += 1;
    }

    pub fn surface_size_changed(&mut self, size: Option<SurfaceSize>) -> Result<(), InvalidState> {
        self.accepting("surface_size_changed")?;
        if size.is_some() {
            self.size = size;
        }
        Ok(())
    }

    pub fn teardown(&mut self) -> bool {
        self.advance(RenderState::Finishing)
    }
}
