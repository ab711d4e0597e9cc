//! Phase accumulators and band-limited sawtooth.

/*
Phase and PolyBLEP
==================

Both oscillators here are driven by a phase accumulator: a value in [0, 1)
that advances by `frequency / sample_rate` each sample and wraps around.
The phasor outputs that ramp directly; it is the raw material for windows,
LFO shapes and wavetable lookups.

A naive sawtooth (2·phase − 1) has an instantaneous jump every cycle. The
jump contains energy at every harmonic, far above Nyquist, and those
harmonics fold back into the audible range as inharmonic aliasing.

PolyBLEP (polynomial band-limited step) subtracts a small two-sample
polynomial correction around each discontinuity. It is cheap (a couple of
multiplies near the wrap, nothing elsewhere) and removes most of the audible
aliasing for typical synth frequencies.

    dt = freq / sr

    t < dt        →  correction = 2t' − t'² − 1,  t' = t / dt
    t > 1 − dt    →  correction = t'² + 2t' + 1,  t' = (t − 1) / dt
    otherwise     →  0

    saw = (2·phase − 1) − correction
*/

/// Phase accumulator producing a ramp in [0, 1).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Phasor {
    phase: f32,
}

impl Phasor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Return the current phase then advance by `increment` (freq / sr).
    #[inline]
    pub fn tick(&mut self, increment: f32) -> f32 {
        let out = self.phase;
        self.phase = wrap_unit(self.phase + increment);
        out
    }

    pub fn render(&mut self, frequency: &[f32], sample_rate: f32, out: &mut [f32]) {
        debug_assert_eq!(frequency.len(), out.len());
        let inv_sr = 1.0 / sample_rate;

        for (o, &f) in out.iter_mut().zip(frequency.iter()) {
            *o = self.tick(f * inv_sr);
        }
    }
}

/// Wrap any finite value into [0, 1); non-finite input resets to 0.
#[inline]
fn wrap_unit(x: f32) -> f32 {
    if !x.is_finite() {
        return 0.0;
    }
    let wrapped = x - x.floor();
    // x - floor(x) can round up to exactly 1.0 for tiny negative x
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

#[inline]
fn poly_blep(t: f32, dt: f32) -> f32 {
    if dt <= 0.0 {
        0.0
    } else if t < dt {
        let t = t / dt;
        t + t - t * t - 1.0
    } else if t > 1.0 - dt {
        let t = (t - 1.0) / dt;
        t * t + t + t + 1.0
    } else {
        0.0
    }
}

/// PolyBLEP sawtooth in [-1, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BlepSaw {
    phasor: Phasor,
}

impl BlepSaw {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> f32 {
        self.phasor.phase()
    }

    pub fn reset(&mut self) {
        self.phasor.reset();
    }

    pub fn render(&mut self, frequency: &[f32], sample_rate: f32, out: &mut [f32]) {
        debug_assert_eq!(frequency.len(), out.len());
        let inv_sr = 1.0 / sample_rate;

        for (o, &f) in out.iter_mut().zip(frequency.iter()) {
            let dt = (f * inv_sr).abs().min(0.5);
            let t = self.phasor.tick(f * inv_sr);
            *o = (2.0 * t - 1.0) - poly_blep(t, dt);
        }
    }
}
