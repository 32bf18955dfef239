//! Frame loop driver
//!
//! Owns the session, the drawing surface and at most one pending frame
//! request. While Playing, every fired frame runs one tick, paints, and asks
//! for the next frame. Any way out of Playing cancels the outstanding
//! request, so a stale callback can never tick a finished or paused game.

use std::fmt;

use rand_pcg::Pcg32;

use crate::renderer::{Canvas, draw_frame};
use crate::sim::{EntropySource, GameEvent, GamePhase, GameState, tick};

/// Something that can call back once per display refresh
pub trait FrameScheduler {
    type Handle: Copy + Eq + fmt::Debug;

    /// Ask for one callback on the next refresh; `None` if the platform
    /// refused
    fn request_frame(&mut self) -> Option<Self::Handle>;

    /// Withdraw a request that has not fired yet
    fn cancel_frame(&mut self, handle: Self::Handle);
}

/// Scheduler whose frames are fired by the caller (headless runs, tests)
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    queue: Vec<u64>,
    /// Lifetime totals
    pub requested: usize,
    pub cancelled: usize,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests still waiting to fire
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Fire the oldest request, as a display refresh would
    pub fn fire_next(&mut self) -> Option<u64> {
        if self.queue.is_empty() {
            None
        } else {
            Some(self.queue.remove(0))
        }
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = u64;

    fn request_frame(&mut self) -> Option<u64> {
        self.next_id += 1;
        self.requested += 1;
        self.queue.push(self.next_id);
        Some(self.next_id)
    }

    fn cancel_frame(&mut self, handle: u64) {
        let before = self.queue.len();
        self.queue.retain(|&id| id != handle);
        if self.queue.len() != before {
            self.cancelled += 1;
        }
    }
}

/// A running game: session state plus the loop that advances it
pub struct Game<S: FrameScheduler, C, R = Pcg32> {
    state: GameState<R>,
    scheduler: S,
    surface: Option<C>,
    pending: Option<S::Handle>,
}

impl<S: FrameScheduler, C: Canvas, R: EntropySource> Game<S, C, R> {
    /// Lay out a fresh board in Ready and paint it
    pub fn new(scheduler: S, surface: Option<C>, rng: R) -> Self {
        let mut game = Self {
            state: GameState::new(rng),
            scheduler,
            surface,
            pending: None,
        };
        game.paint();
        game
    }

    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    pub fn surface(&self) -> Option<&C> {
        self.surface.as_ref()
    }

    /// Install (or replace) the drawing surface and show the current frame
    pub fn attach_surface(&mut self, surface: C) {
        self.surface = Some(surface);
        self.paint();
    }

    /// Is a frame request outstanding?
    pub fn is_scheduled(&self) -> bool {
        self.pending.is_some()
    }

    /// Start or restart: fresh board, full lives, Playing
    pub fn start(&mut self) {
        self.stop_loop();
        let from = self.state.phase;
        self.state.reset(GamePhase::Playing);
        log::info!("Game started (from {:?})", from);
        self.paint();
        self.schedule();
    }

    /// Playing -> Paused. Returns whether the phase changed.
    pub fn pause(&mut self) -> bool {
        if self.state.phase != GamePhase::Playing {
            return false;
        }
        self.state.phase = GamePhase::Paused;
        self.stop_loop();
        self.paint();
        log::info!("Paused");
        true
    }

    /// Paused -> Playing, keeping the board as it was
    pub fn resume(&mut self) -> bool {
        if self.state.phase != GamePhase::Paused {
            return false;
        }
        self.state.phase = GamePhase::Playing;
        log::info!("Resumed");
        self.schedule();
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.state.phase {
            GamePhase::Playing => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// The overlay button: resume a paused game, otherwise (re)start
    pub fn primary_action(&mut self) {
        if !self.resume() {
            self.start();
        }
    }

    /// Pointer moved to canvas-relative `x` (logical units)
    pub fn pointer_moved(&mut self, x: f32) {
        if self.state.phase == GamePhase::Playing {
            self.state.paddle.follow_pointer(x);
        }
    }

    /// A scheduled frame fired: tick, paint, and keep the loop going.
    ///
    /// Callbacks with no outstanding request are stale and do nothing.
    pub fn on_frame(&mut self) -> Vec<GameEvent> {
        if self.pending.take().is_none() {
            log::trace!("Stale frame callback ignored");
            return Vec::new();
        }
        if self.state.phase != GamePhase::Playing {
            return Vec::new();
        }

        let events = tick(&mut self.state);
        self.paint();

        if self.state.phase == GamePhase::Playing {
            self.schedule();
        } else {
            log::info!(
                "Loop stopped in {:?} with score {}",
                self.state.phase,
                self.state.score
            );
        }
        events
    }

    /// Keep one frame outstanding. If the platform refuses, the game drops
    /// to Paused so the overlay offers a retry instead of freezing.
    fn schedule(&mut self) {
        if self.pending.is_some() {
            return;
        }
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() && self.state.phase == GamePhase::Playing {
            log::error!("Frame request refused, pausing");
            self.state.phase = GamePhase::Paused;
            self.paint();
        }
    }

    /// Cancel the outstanding frame, if any. Safe to call repeatedly.
    fn stop_loop(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn paint(&mut self) {
        match self.surface.as_mut() {
            Some(canvas) => draw_frame(canvas, &self.state),
            None => log::debug!("No drawing surface, frame skipped"),
        }
    }
}
