/// Gravitational acceleration
pub const GRAVITY: f64 = 9.81;
/// Quadratic drag coefficient
pub const DRAG_COEFF: f64 = 1e-1;

/// Position and velocity of the cart on the track `y = x^2`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct KinematicState {
    /// Horizontal position
    pub px: f64,
    /// Vertical position, always `px * px`
    pub py: f64,
    /// Horizontal velocity
    pub vx: f64,
}

impl KinematicState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances the state by one explicit Euler step
    pub fn advance(&mut self, thrust: f64, dt: f64) {
        let beta = (2.0 * self.px).atan();
        let (sin_b, cos_b) = beta.sin_cos();

        let acc = thrust - GRAVITY * sin_b - DRAG_COEFF * self.vx.abs() * self.vx;
        let acc_x = acc * cos_b;

        // position uses the velocity from before this step
        self.px += self.vx * dt;
        self.vx += acc_x * dt;

        self.py = self.px * self.px;
    }

    pub fn is_finite(&self) -> bool {
        self.px.is_finite() && self.py.is_finite() && self.vx.is_finite()
    }
}

/// View state for the terminal animation
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Enable debug mode
    pub debug: bool,
    /// Animation paused
    pub paused: bool,
    /// Grid lines shown
    pub grid: bool,
    /// All frames have been drawn
    pub finished: bool,
    /// Index of the last frame drawn
    pub frame: usize,
    /// Latest cart state pushed by the driver
    pub cart: KinematicState,
    /// Highest point reached so far
    pub peak_height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_new_state_is_at_origin() {
        let state = KinematicState::new();
        assert_eq!(state.px, 0.0);
        assert_eq!(state.py, 0.0);
        assert_eq!(state.vx, 0.0);
    }

    #[test]
    fn test_first_step_from_rest() {
        let mut state = KinematicState::new();
        state.advance(3.0, 0.01);

        assert_eq!(state.px, 0.0);
        assert_eq!(state.py, 0.0);
        assert!((state.vx - 0.03).abs() < 1e-15);
    }

    #[test]
    fn test_second_step_moves_with_previous_velocity() {
        let mut state = KinematicState::new();
        state.advance(3.0, 0.01);
        let vx_before = state.vx;
        state.advance(3.0, 0.01);

        assert_eq!(state.px, vx_before * 0.01);
        assert!((state.px - 0.0003).abs() < 1e-15);
        assert!((state.py - 9e-8).abs() < 1e-18);

        // slope is still flat because px was zero at the start of the step
        let expected_vx = vx_before + (3.0 - DRAG_COEFF * vx_before * vx_before) * 0.01;
        assert_eq!(state.vx, expected_vx);
    }

    #[test]
    fn test_zero_thrust_stays_at_origin() {
        let mut state = KinematicState::new();
        for _ in 0..500 {
            state.advance(0.0, 0.05);
        }
        assert_eq!(state, KinematicState::default());
    }

    #[test]
    fn test_drag_opposes_motion() {
        let mut state = KinematicState {
            px: 0.0,
            py: 0.0,
            vx: -2.0,
        };
        state.advance(0.0, 0.01);
        // flat slope, so only drag acts and it pushes back toward zero
        assert!(state.vx > -2.0);
        assert!(state.px < 0.0);
    }

    #[test]
    fn test_gravity_pulls_toward_bottom() {
        let mut state = KinematicState {
            px: 1.0,
            py: 1.0,
            vx: 0.0,
        };
        state.advance(0.0, 0.01);
        assert!(state.vx < 0.0);

        let mut state = KinematicState {
            px: -1.0,
            py: 1.0,
            vx: 0.0,
        };
        state.advance(0.0, 0.01);
        assert!(state.vx > 0.0);
    }

    #[test]
    fn test_non_finite_detected() {
        let state = KinematicState {
            px: f64::NAN,
            py: f64::NAN,
            vx: 0.0,
        };
        assert!(!state.is_finite());
        assert!(KinematicState::new().is_finite());

        // px squared can overflow while px itself is still finite
        let state = KinematicState {
            px: 3e200,
            py: f64::INFINITY,
            vx: -9e299,
        };
        assert!(!state.is_finite());
    }

    proptest! {
        #[test]
        fn prop_height_tracks_position(
            thrust in -50.0f64..50.0,
            dt in 1e-4f64..0.1,
            steps in 1usize..200,
        ) {
            let mut state = KinematicState::new();
            for _ in 0..steps {
                state.advance(thrust, dt);
                prop_assert_eq!(state.py.to_bits(), (state.px * state.px).to_bits());
            }
        }

        #[test]
        fn prop_advance_is_deterministic(
            thrust in -50.0f64..50.0,
            dt in 1e-4f64..0.1,
            steps in 1usize..100,
        ) {
            let mut a = KinematicState::new();
            let mut b = KinematicState::new();
            for _ in 0..steps {
                a.advance(thrust, dt);
                b.advance(thrust, dt);
                prop_assert_eq!(a.px.to_bits(), b.px.to_bits());
                prop_assert_eq!(a.vx.to_bits(), b.vx.to_bits());
                prop_assert_eq!(a.py.to_bits(), b.py.to_bits());
            }
        }
    }
}
