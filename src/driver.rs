//! Render loop driver: time + parameters -> uniforms -> draw -> reschedule.

use crate::clock::FrameClock;
use crate::params::WaterParams;
use crate::uniforms::UniformSet;

/// Something that can draw one frame from a uniform set
pub trait Renderer {
    type Error: std::error::Error;

    fn draw(&mut self, uniforms: &UniformSet) -> Result<(), Self::Error>;
}

/// Host facility that arranges for the next tick to run
pub trait FrameScheduler {
    fn request_frame(&self);
}

impl FrameScheduler for winit::window::Window {
    fn request_frame(&self) {
        self.request_redraw();
    }
}

/// Loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    /// Constructed, first frame not yet requested, or stopped by a draw
    /// failure
    Idle,
    /// Steady per-frame cycle
    Running,
}

/// Summary of one completed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStats {
    /// Zero-based index of the frame just drawn
    pub frame: u64,
    /// Seconds since start, as written to `uTime`
    pub elapsed_s: f32,
    /// Seconds since the previous frame (0 on the first)
    pub delta_s: f32,
}

/// Drives the per-frame uniform update and draw
pub struct RenderDriver<C: FrameClock> {
    clock: C,
    state: LoopState,
    frame: u64,
    last_elapsed_s: f32,
}

impl<C: FrameClock> RenderDriver<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            state: LoopState::Idle,
            frame: 0,
            last_elapsed_s: 0.0,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Number of frames drawn so far
    pub fn frames_drawn(&self) -> u64 {
        self.frame
    }

    #[cfg(test)]
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    /// Idle -> Running; requests the first frame. Later calls do nothing.
    pub fn start(&mut self, scheduler: &impl FrameScheduler) {
        if self.state == LoopState::Idle {
            self.state = LoopState::Running;
            scheduler.request_frame();
        }
    }

    /// Run one iteration of the loop.
    ///
    /// Returns `Ok(None)` while idle. A draw error is returned as-is, the
    /// next frame is not requested and the driver drops back to Idle, so any
    /// redraw already queued by the host draws nothing.
    pub fn tick<R: Renderer>(
        &mut self,
        params: &WaterParams,
        renderer: &mut R,
        scheduler: &impl FrameScheduler,
    ) -> Result<Option<FrameStats>, R::Error> {
        if self.state != LoopState::Running {
            return Ok(None);
        }

        // Clamp so uTime never runs backwards
        let elapsed_s = self.clock.elapsed_s().max(self.last_elapsed_s);
        let delta_s = if self.frame == 0 {
            0.0
        } else {
            elapsed_s - self.last_elapsed_s
        };

        let uniforms = UniformSet::capture(params, elapsed_s);
        if let Err(e) = renderer.draw(&uniforms) {
            self.state = LoopState::Idle;
            return Err(e);
        }

        scheduler.request_frame();

        let stats = FrameStats {
            frame: self.frame,
            elapsed_s,
            delta_s,
        };
        self.frame += 1;
        self.last_elapsed_s = elapsed_s;
        Ok(Some(stats))
    }
}
