use clap::Parser;
use parabola_cart::math::reference_curve;
use parabola_cart::trace::TraceSink;
use parabola_cart::widget::{terminal_size, PlotWidget, TerminalSession};
use parabola_cart::{run, DriverConfig, KinematicState, Result};
use std::io;
use std::time::Duration;

/// Animate a cart riding the parabola y = x^2
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Number of frames to animate
    #[arg(long, default_value_t = 100, value_parser = parse_frame_count)]
    frames: usize,

    /// Delay between frames in milliseconds
    #[arg(long, default_value_t = 10)]
    interval: u64,

    /// Integration time step per frame
    #[arg(long, default_value_t = 1e-2, value_parser = parse_time_step)]
    dt: f64,

    /// Constant thrust along the track
    #[arg(long, default_value_t = 3.0, value_parser = parse_finite, allow_negative_numbers = true)]
    thrust: f64,

    /// Print the trajectory as CSV instead of animating
    #[arg(long)]
    trace: bool,

    /// Stop with an error if the state stops being finite
    #[arg(long)]
    halt_on_divergence: bool,

    /// Start with the debug overlay shown
    #[arg(long)]
    debug: bool,

    /// Exit right after the last frame
    #[arg(long)]
    no_hold: bool,
}

impl Args {
    fn driver_config(&self) -> DriverConfig {
        DriverConfig {
            frames: self.frames,
            dt: self.dt,
            thrust: self.thrust,
            halt_on_divergence: self.halt_on_divergence,
        }
    }
}

fn parse_finite(s: &str) -> std::result::Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("{s} is not a finite number"))
    }
}

fn parse_frame_count(s: &str) -> std::result::Result<usize, String> {
    let value: usize = s.parse().map_err(|e| format!("{e}"))?;
    if value >= 1 {
        Ok(value)
    } else {
        Err("frame count must be at least 1".to_string())
    }
}

fn parse_time_step(s: &str) -> std::result::Result<f64, String> {
    let value = parse_finite(s)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(format!("time step must be positive, got {s}"))
    }
}

fn animate(args: &Args, state: &mut KinematicState) -> Result<()> {
    let config = args.driver_config();
    let curve = reference_curve();

    if args.trace {
        let mut sink = TraceSink::new(io::stdout().lock());
        run(&config, &curve, state, &mut sink)?;
        return Ok(());
    }

    let size = terminal_size();
    log::debug!("terminal size {}x{}", size.0, size.1);

    // restored when dropped, including on error
    let _session = TerminalSession::enter()?;
    let mut widget = PlotWidget::new(
        io::stdout(),
        size,
        Duration::from_millis(args.interval),
        !args.no_hold,
        args.debug,
    );
    run(&config, &curve, state, &mut widget)?;
    Ok(())
}

/// Main function
fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::info!("{} {} starting", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let mut state = KinematicState::new();
    animate(&args, &mut state)?;

    log::info!(
        "final state: px = {}, py = {}, vx = {}",
        state.px,
        state.py,
        state.vx
    );
    Ok(())
}
