use std::time::{Duration, Instant};

use crate::viewport::Viewport;

/// How long the pointer counts as moving after its last motion event.
pub const MOVE_HOLD: Duration = Duration::from_millis(100);

/// Pointer coordinates in viewport space, as seen by one tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerState {
    pub x: f32,
    pub y: f32,
}

impl PointerState {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn centered(viewport: Viewport) -> Self {
        let (x, y) = viewport.center();
        Self { x, y }
    }
}

/// Last-write-wins pointer source. Motion events overwrite the position; the
/// simulation reads whatever is current at the next tick.
#[derive(Clone, Debug)]
pub struct PointerTracker {
    state: PointerState,
    last_move: Option<Instant>,
}

impl PointerTracker {
    /// Starts at the viewport centre until the first motion event arrives.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            state: PointerState::centered(viewport),
            last_move: None,
        }
    }

    pub fn state(&self) -> PointerState {
        self.state
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        self.move_to_at(x, y, Instant::now());
    }

    pub fn move_to_at(&mut self, x: f32, y: f32, now: Instant) {
        self.state = PointerState { x, y };
        self.last_move = Some(now);
    }

    /// Follow a resized viewport's centre until the first motion event.
    /// Returns true if the position changed.
    pub fn recenter(&mut self, viewport: Viewport) -> bool {
        if self.last_move.is_some() {
            return false;
        }
        self.state = PointerState::centered(viewport);
        true
    }

    pub fn is_moving(&self) -> bool {
        self.is_moving_at(Instant::now())
    }

    pub fn is_moving_at(&self, now: Instant) -> bool {
        self.last_move
            .is_some_and(|last| now.saturating_duration_since(last) < MOVE_HOLD)
    }
}
