use crate::vertex::Vertex;

/// Character cell buffer the plot is drawn into
#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Sets a cell, ignoring coordinates outside the canvas
    pub fn set(&mut self, x: isize, y: isize, ch: char) {
        if x >= 0 && (x as usize) < self.width && y >= 0 && (y as usize) < self.height {
            self.cells[y as usize * self.width + x as usize] = ch;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Writes text starting at (x, y), clipped at the right edge
    pub fn draw_text(&mut self, x: usize, y: usize, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.set((x + i) as isize, y as isize, ch);
        }
    }

    /// Yields each row as a string
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells
            .chunks(self.width.max(1))
            .map(|row| row.iter().collect())
    }
}

/// Draws a line between two points on the canvas using Bresenham's algorithm
pub fn draw_line(x0: f64, y0: f64, x1: f64, y1: f64, canvas: &mut Canvas, ch: char) {
    let (mut x0, mut y0, x1, y1) = (
        x0.round() as isize,
        y0.round() as isize,
        x1.round() as isize,
        y1.round() as isize,
    );
    let dx = (x1 - x0).abs();
    let dy = -(y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error value e_xy

    loop {
        canvas.set(x0, y0, ch);

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Connects consecutive vertices with line segments
pub fn draw_polyline(vertices: &[Vertex], canvas: &mut Canvas, ch: char) {
    for pair in vertices.windows(2) {
        let [x0, y0] = pair[0].screen_position;
        let [x1, y1] = pair[1].screen_position;
        draw_line(x0, y0, x1, y1, canvas, ch);
    }
}

/// Places a single-cell marker; non-finite positions are not drawn
pub fn draw_marker(screen_position: [f64; 2], canvas: &mut Canvas, ch: char) {
    let [x, y] = screen_position;
    if !x.is_finite() || !y.is_finite() {
        return;
    }
    let (x, y) = (x.round(), y.round());
    if x < 0.0 || y < 0.0 || x >= canvas.width() as f64 || y >= canvas.height() as f64 {
        return;
    }
    canvas.set(x as isize, y as isize, ch);
}
