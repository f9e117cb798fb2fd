use crate::vertex::Vertex;

/// Left end of the sampled reference curve
pub const CURVE_X_MIN: f64 = -1.5;
/// Right end of the sampled reference curve
pub const CURVE_X_MAX: f64 = 1.5;
/// Number of samples along the reference curve
pub const CURVE_SAMPLES: usize = 22;

/// Evenly spaced values from `start` to `end`, both ends included
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Multiples of `step` inside `[min, max]`
pub fn grid_ticks(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() {
        return Vec::new();
    }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|i| i as f64 * step).collect()
}

/// Samples the track `y = x^2` in world coordinates
pub fn reference_curve() -> Vec<[f64; 2]> {
    linspace(CURVE_X_MIN, CURVE_X_MAX, CURVE_SAMPLES)
        .into_iter()
        .map(|x| [x, x * x])
        .collect()
}

/// Maps world coordinates onto a grid of terminal cells
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub width: usize,
    pub height: usize,
}

impl Viewport {
    /// Fits the bounding box of `points`, padded by `margin` of its extent on every side
    pub fn fit(points: &[[f64; 2]], margin: f64, width: usize, height: usize) -> Self {
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            x_min = x_min.min(p[0]);
            x_max = x_max.max(p[0]);
            y_min = y_min.min(p[1]);
            y_max = y_max.max(p[1]);
        }
        if !(x_min < x_max) {
            x_min = -1.0;
            x_max = 1.0;
        }
        if !(y_min < y_max) {
            y_min = -1.0;
            y_max = 1.0;
        }

        let pad_x = (x_max - x_min) * margin;
        let pad_y = (y_max - y_min) * margin;
        Viewport {
            x_min: x_min - pad_x,
            x_max: x_max + pad_x,
            y_min: y_min - pad_y,
            y_max: y_max + pad_y,
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Converts a world point to fractional cell coordinates (column, row)
    pub fn to_screen(&self, point: [f64; 2]) -> [f64; 2] {
        let sx = (point[0] - self.x_min) / (self.x_max - self.x_min) * (self.width - 1) as f64;
        // rows grow downward
        let sy = (self.y_max - point[1]) / (self.y_max - self.y_min) * (self.height - 1) as f64;
        [sx, sy]
    }

    /// Projects world points into vertices carrying both coordinates
    pub fn project(&self, points: &[[f64; 2]]) -> Vec<Vertex> {
        points
            .iter()
            .map(|&position| Vertex {
                position,
                screen_position: self.to_screen(position),
            })
            .collect()
    }
}
