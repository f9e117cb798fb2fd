use crate::driver::{Control, RenderSink, RunSummary};
use crate::error::Result;
use crate::state::KinematicState;
use std::io::Write;

/// Writes the trajectory as CSV instead of animating it
pub struct TraceSink<W: Write> {
    out: W,
}

impl<W: Write> TraceSink<W> {
    pub fn new(out: W) -> Self {
        TraceSink { out }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for TraceSink<W> {
    fn draw_reference(&mut self, _curve: &[[f64; 2]]) -> Result<()> {
        writeln!(self.out, "frame,px,py,vx")?;
        Ok(())
    }

    fn update_marker(&mut self, frame: usize, state: &KinematicState) -> Result<Control> {
        writeln!(self.out, "{},{},{},{}", frame, state.px, state.py, state.vx)?;
        Ok(Control::Continue)
    }

    fn finish(&mut self, _summary: &RunSummary) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::{run, DriverConfig};
    use crate::math::reference_curve;

    #[test]
    fn test_trace_has_header_and_one_line_per_frame() {
        let mut state = KinematicState::new();
        let mut sink = TraceSink::new(Vec::new());
        let config = DriverConfig {
            frames: 3,
            ..Default::default()
        };
        run(&config, &reference_curve(), &mut state, &mut sink).unwrap();

        let text = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "frame,px,py,vx");
        assert!(lines[1].starts_with("0,0,0,0.0"));
        assert!(lines[3].starts_with("2,"));
    }

    #[test]
    fn test_trace_values_parse_back() {
        let mut state = KinematicState::new();
        state.advance(3.0, 0.01);
        state.advance(3.0, 0.01);

        let mut sink = TraceSink::new(Vec::new());
        sink.update_marker(1, &state).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();

        let fields: Vec<f64> = text
            .trim()
            .split(',')
            .map(|f| f.parse().unwrap())
            .collect();
        assert_eq!(fields[0], 1.0);
        assert_eq!(fields[1], state.px);
        assert_eq!(fields[2], state.py);
        assert_eq!(fields[3], state.vx);
    }
}
