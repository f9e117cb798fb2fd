use crate::driver::{Control, RenderSink, RunSummary};
use crate::error::Result;
use crate::graphics::{draw_line, draw_marker, draw_polyline, Canvas};
use crate::math::{grid_ticks, Viewport};
use crate::state::{AppState, KinematicState};
use crate::vertex::Vertex;
use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Print;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::{execute, queue};
use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Fraction of the curve extent left blank around the plot
const PLOT_MARGIN: f64 = 0.05;
/// Spacing of grid lines in world units
const GRID_STEP: f64 = 0.5;
/// Event poll period while nothing is animating
const IDLE_POLL: Duration = Duration::from_millis(100);

const CURVE_CHAR: char = '*';
const MARKER_CHAR: char = 'O';
const GRID_CHAR: char = '.';

/// Current terminal size as (columns, rows), 80x24 when it cannot be queried
pub fn terminal_size() -> (usize, usize) {
    termsize::get()
        .map(|size| (size.cols as usize, size.rows as usize))
        .unwrap_or((80, 24))
}

/// Raw mode and alternate screen for the lifetime of the value
pub struct TerminalSession;

impl TerminalSession {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen, Hide) {
            let _ = disable_raw_mode();
            return Err(e.into());
        }
        Ok(TerminalSession)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = execute!(io::stdout(), Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Result of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Ignored,
    Repaint,
    Quit,
}

/// Terminal plot of the cart riding the parabola
pub struct PlotWidget<W: Write> {
    out: W,
    data: AppState,
    curve: Vec<[f64; 2]>,
    vertices: Vec<Vertex>,
    viewport: Viewport,
    /// Delay between frames
    interval: Duration,
    /// Keep the last frame on screen until the user quits
    hold: bool,
    quit_requested: bool,
    frames_since_last_update: usize,
    last_fps_calculation: Instant,
    fps: f64,
}

impl<W: Write> PlotWidget<W> {
    pub fn new(out: W, size: (usize, usize), interval: Duration, hold: bool, debug: bool) -> Self {
        let mut widget = PlotWidget {
            out,
            data: AppState {
                debug,
                ..Default::default()
            },
            curve: Vec::new(),
            vertices: Vec::new(),
            viewport: Viewport::fit(&[], PLOT_MARGIN, size.0, size.1),
            interval,
            hold,
            quit_requested: false,
            frames_since_last_update: 0,
            last_fps_calculation: Instant::now(),
            fps: 0.0,
        };
        widget.resize(size.0, size.1);
        widget
    }

    /// Refits the plot to a new terminal size
    pub fn resize(&mut self, width: usize, height: usize) {
        self.viewport = Viewport::fit(&self.curve, PLOT_MARGIN, width, height);
        self.vertices = self.viewport.project(&self.curve);
    }

    /// Stores the state pushed for `frame`
    pub fn record_frame(&mut self, frame: usize, state: &KinematicState) {
        self.data.frame = frame;
        self.data.cart = *state;
        self.data.peak_height = self.data.peak_height.max(state.py);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind != KeyEventKind::Press {
            return KeyAction::Ignored;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => KeyAction::Quit,
            KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => KeyAction::Quit,
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.data.debug = !self.data.debug;
                KeyAction::Repaint
            }
            KeyCode::Char('g') | KeyCode::Char('G') => {
                self.data.grid = !self.data.grid;
                KeyAction::Repaint
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                if self.data.finished {
                    return KeyAction::Ignored;
                }
                self.data.paused = !self.data.paused;
                KeyAction::Repaint
            }
            _ => KeyAction::Ignored,
        }
    }

    /// Draws the current view into a fresh canvas
    pub fn compose(&self) -> Canvas {
        let mut canvas = Canvas::new(self.viewport.width, self.viewport.height);

        if self.data.grid {
            let (w, h) = (self.viewport.width as f64, self.viewport.height as f64);
            for x in grid_ticks(self.viewport.x_min, self.viewport.x_max, GRID_STEP) {
                let [sx, _] = self.viewport.to_screen([x, 0.0]);
                draw_line(sx, 0.0, sx, h - 1.0, &mut canvas, GRID_CHAR);
            }
            for y in grid_ticks(self.viewport.y_min, self.viewport.y_max, GRID_STEP) {
                let [_, sy] = self.viewport.to_screen([0.0, y]);
                draw_line(0.0, sy, w - 1.0, sy, &mut canvas, GRID_CHAR);
            }
        }

        draw_polyline(&self.vertices, &mut canvas, CURVE_CHAR);

        let cart = self.data.cart;
        draw_marker(self.viewport.to_screen([cart.px, cart.py]), &mut canvas, MARKER_CHAR);

        if self.data.debug {
            let lines = [
                format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
                format!("Frame: {}", self.data.frame),
                format!("Position: ({:.4}, {:.4})", cart.px, cart.py),
                format!("Velocity: {:.4}", cart.vx),
                format!("Peak height: {:.4}", self.data.peak_height),
                format!("FPS: {:.2}", self.fps),
                "d debug  g grid  p pause  q quit".to_string(),
            ];
            for (row, line) in lines.iter().enumerate() {
                canvas.draw_text(1, row, line);
            }
        }

        if self.data.paused {
            let text = "Paused";
            let x = canvas.width().saturating_sub(text.len()) / 2;
            canvas.draw_text(x, canvas.height() / 2, text);
        }

        if self.data.finished {
            let text = "Finished, press q to quit";
            let x = canvas.width().saturating_sub(text.len()) / 2;
            canvas.draw_text(x, canvas.height().saturating_sub(1), text);
        }

        canvas
    }

    /// Writes the composed view to the output
    pub fn paint(&mut self) -> io::Result<()> {
        // Update FPS calculation
        self.frames_since_last_update += 1;
        let now = Instant::now();
        let duration = now.duration_since(self.last_fps_calculation);
        if duration.as_secs_f64() >= 1.0 {
            self.fps = self.frames_since_last_update as f64 / duration.as_secs_f64();
            self.frames_since_last_update = 0;
            self.last_fps_calculation = now;
        }

        let canvas = self.compose();
        for (row, line) in canvas.rows().enumerate() {
            queue!(self.out, MoveTo(0, row as u16), Print(line))?;
        }
        self.out.flush()
    }

    fn handle_event(&mut self, event: Event) -> Result<Control> {
        match event {
            Event::Key(key) => match self.handle_key(key) {
                KeyAction::Quit => {
                    self.quit_requested = true;
                    return Ok(Control::Quit);
                }
                KeyAction::Repaint => self.paint()?,
                KeyAction::Ignored => {}
            },
            Event::Resize(cols, rows) => {
                self.resize(cols as usize, rows as usize);
                self.paint()?;
            }
            _ => {}
        }
        Ok(Control::Continue)
    }

    /// Blocks until the next frame is due, handling input meanwhile
    fn wait_for_next_frame(&mut self) -> Result<Control> {
        let deadline = Instant::now() + self.interval;
        loop {
            let timeout = if self.data.paused {
                IDLE_POLL
            } else {
                deadline.saturating_duration_since(Instant::now())
            };
            if event::poll(timeout)? && self.handle_event(event::read()?)? == Control::Quit {
                return Ok(Control::Quit);
            }
            if !self.data.paused && Instant::now() >= deadline {
                return Ok(Control::Continue);
            }
        }
    }
}

impl<W: Write> RenderSink for PlotWidget<W> {
    fn draw_reference(&mut self, curve: &[[f64; 2]]) -> Result<()> {
        self.curve = curve.to_vec();
        self.resize(self.viewport.width, self.viewport.height);
        self.paint()?;
        Ok(())
    }

    fn update_marker(&mut self, frame: usize, state: &KinematicState) -> Result<Control> {
        self.record_frame(frame, state);
        self.paint()?;
        self.wait_for_next_frame()
    }

    fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        if !self.hold || summary.quit_early || self.quit_requested {
            return Ok(());
        }
        self.data.finished = true;
        self.data.paused = false;
        self.paint()?;
        loop {
            if event::poll(IDLE_POLL)? && self.handle_event(event::read()?)? == Control::Quit {
                return Ok(());
            }
        }
    }
}
