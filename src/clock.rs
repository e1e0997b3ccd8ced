//! Intro sweep followed by a viewer-controlled free-run phase.

use crate::config::ClockConfig;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationState {
    pub frame_counter: u32,
    pub has_intro_run: bool,
    pub is_free_running: bool,
    /// Seconds since session start, as last published to the shader.
    pub elapsed_time: f64,
}

pub struct AnimationClock {
    state: AnimationState,
    intro_frames: u32,
}

impl AnimationClock {
    pub fn new(config: ClockConfig) -> Self {
        Self {
            state: AnimationState {
                frame_counter: 0,
                has_intro_run: false,
                is_free_running: false,
                elapsed_time: 0.0,
            },
            intro_frames: config.intro_frames,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn elapsed_time(&self) -> f64 {
        self.state.elapsed_time
    }

    /// Advance one frame. `now_secs` is wall-clock time since session start.
    ///
    /// During the intro time always follows the wall clock; afterwards it only
    /// does so while free-running, otherwise it stays frozen.
    pub fn tick(&mut self, now_secs: f64) {
        let s = &mut self.state;
        if !s.has_intro_run {
            s.frame_counter += 1;
            s.elapsed_time = now_secs;
            if s.frame_counter >= self.intro_frames {
                s.has_intro_run = true;
                tracing::debug!(frames = s.frame_counter, "intro settled");
            }
        } else if s.is_free_running {
            s.elapsed_time = now_secs;
        }
    }

    /// Flip free-run. Returns `false` (and does nothing) until the intro is over.
    pub fn toggle_free_run(&mut self) -> bool {
        if !self.state.has_intro_run {
            return false;
        }
        self.state.is_free_running = !self.state.is_free_running;
        true
    }
}
