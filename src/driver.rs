use crate::error::{Error, Result};
use crate::state::KinematicState;

/// Parameters of one animation run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriverConfig {
    /// Number of ticks to produce
    pub frames: usize,
    /// Integration step passed to every `advance`
    pub dt: f64,
    /// Constant forcing passed to every `advance`
    pub thrust: f64,
    /// Stop with an error once the state is no longer finite
    pub halt_on_divergence: bool,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            frames: 100,
            dt: 1e-2,
            thrust: 3.0,
            halt_on_divergence: false,
        }
    }
}

/// What the sink wants the driver to do after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// Outcome of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    /// Frames pushed to the sink
    pub frames: usize,
    /// Highest `py` seen
    pub peak_height: f64,
    /// The sink asked to stop before the last frame
    pub quit_early: bool,
}

/// Destination for the animation frames
pub trait RenderSink {
    /// Receives the static reference curve once, before the first frame
    fn draw_reference(&mut self, curve: &[[f64; 2]]) -> Result<()>;

    /// Receives the state after frame `frame` was integrated
    fn update_marker(&mut self, frame: usize, state: &KinematicState) -> Result<Control>;

    /// Called once after the last frame
    fn finish(&mut self, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }
}

/// Drives `config.frames` ticks: advance the state, then hand it to the sink.
///
/// Frames are produced strictly in order. The sink may end the run early by
/// returning [`Control::Quit`]; `finish` is still called.
pub fn run<S: RenderSink + ?Sized>(
    config: &DriverConfig,
    curve: &[[f64; 2]],
    state: &mut KinematicState,
    sink: &mut S,
) -> Result<RunSummary> {
    log::info!(
        "running {} frames with thrust = {}, dt = {}",
        config.frames,
        config.thrust,
        config.dt
    );
    sink.draw_reference(curve)?;

    let mut summary = RunSummary {
        frames: 0,
        peak_height: state.py,
        quit_early: false,
    };

    for frame in 0..config.frames {
        state.advance(config.thrust, config.dt);
        log::debug!(
            "frame {frame}: px = {}, py = {}, vx = {}",
            state.px,
            state.py,
            state.vx
        );

        if config.halt_on_divergence && !state.is_finite() {
            log::warn!("state diverged at frame {frame}");
            return Err(Error::Diverged {
                frame,
                px: state.px,
                vx: state.vx,
            });
        }

        summary.peak_height = summary.peak_height.max(state.py);
        summary.frames += 1;

        if sink.update_marker(frame, state)? == Control::Quit {
            summary.quit_early = frame + 1 < config.frames;
            break;
        }
    }

    log::info!(
        "finished after {} frames, peak height {:.4}",
        summary.frames,
        summary.peak_height
    );
    sink.finish(&summary)?;
    Ok(summary)
}
