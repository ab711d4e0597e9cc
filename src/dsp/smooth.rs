//! One-pole smoothing.

/*
One-Pole Lowpass as a Parameter Smoother
========================================

Jumping a gain from 0.2 to 0.8 between two samples produces a step, and a
step is heard as a click. Running the control value through a one-pole
lowpass turns the step into an exponential glide:

    y[n] = x[n] · (1 − p) + y[n−1] · p

The pole `p` sits in [0, 1). p = 0 passes the input straight through; values
near 1 glide slowly.

Choosing p from a time constant
-------------------------------

For a time constant τ (seconds) the output covers ~63% of a step after τ
seconds, ~95% after 3τ, ~99% after 5τ:

    p = e^(−1 / (τ · sr))

A τ of 20 ms is the usual "de-zipper" setting: fast enough to feel
immediate, slow enough that no click survives.
*/

/// Pole for a one-pole smoother with time constant `tau` seconds.
///
/// Non-positive `tau` yields 0.0 (no smoothing).
#[inline]
pub fn tau_to_pole(tau: f32, sample_rate: f32) -> f32 {
    if tau <= 0.0 || sample_rate <= 0.0 {
        return 0.0;
    }
    (-1.0 / (tau * sample_rate)).exp()
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OnePole {
    state: f32,
}

impl OnePole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    #[inline]
    pub fn tick(&mut self, input: f32, pole: f32) -> f32 {
        let p = pole.clamp(0.0, 0.999_999);
        self.state = input * (1.0 - p) + self.state * p;
        self.state
    }

    /// Smooth `input` with a per-sample pole.
    pub fn render(&mut self, pole: &[f32], input: &[f32], out: &mut [f32]) {
        debug_assert_eq!(pole.len(), input.len());
        debug_assert_eq!(input.len(), out.len());

        for ((o, &p), &x) in out.iter_mut().zip(pole.iter()).zip(input.iter()) {
            *o = self.tick(x, p);
        }
    }
}
