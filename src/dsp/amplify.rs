//! Sample-by-sample arithmetic kernels.

/*
Combining Signals
=================

Every arithmetic node in a graph boils down to one of these loops. They are
stateless: each output sample depends only on the input samples at the same
index, so a block can be computed in any order and no memory is carried
between blocks.

  multiply      out[i] = a[i] × b[i]
                Gain, envelopes, tremolo and ring modulation are all this.
                A control signal in [0, 1] multiplied into an audio signal
                attenuates it.

  add           out[i] = a[i] + b[i]
                Mixing. Two full-scale signals summed can reach ±2.0, so
                layered oscillators are usually scaled by 1/N afterwards.

  subtract      out[i] = a[i] − b[i]

  divide        out[i] = a[i] / b[i]
                A zero divisor yields 0.0 instead of ±inf/NaN. A single
                non-finite sample would otherwise poison every stateful node
                downstream (smoothers never recover from NaN).

  min / max     Clipping. clamp(x, lo, hi) = min(max(x, lo), hi).


Attenuation in Decibels
-----------------------

    dB = 20 × log₁₀(amplitude_ratio)

    ×1.0   =   0 dB  (unity)
    ×0.5   =  -6 dB
    ×0.1   = -20 dB
    ×0.01  = -40 dB
*/

#[inline]
fn zip_with(a: &[f32], b: &[f32], out: &mut [f32], f: impl Fn(f32, f32) -> f32) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), out.len());

    for ((o, &x), &y) in out.iter_mut().zip(a.iter()).zip(b.iter()) {
        *o = f(x, y);
    }
}

/// Multiply two signal buffers sample-by-sample.
///
/// This is the core operation for amplitude control (envelope × oscillator),
/// tremolo (LFO × audio), and ring modulation (audio × audio).
#[inline]
pub fn multiply(signal: &[f32], modulator: &[f32], out: &mut [f32]) {
    zip_with(signal, modulator, out, |s, m| s * m);
}

/// Add a second signal into `signal` (in-place).
#[inline]
pub fn add_in_place(signal: &mut [f32], other: &[f32]) {
    debug_assert_eq!(signal.len(), other.len());

    for (s, &o) in signal.iter_mut().zip(other.iter()) {
        *s += o;
    }
}

#[inline]
pub fn subtract(a: &[f32], b: &[f32], out: &mut [f32]) {
    zip_with(a, b, out, |x, y| x - y);
}

/// Divide `a` by `b`; a zero divisor produces silence.
#[inline]
pub fn divide(a: &[f32], b: &[f32], out: &mut [f32]) {
    zip_with(a, b, out, |x, y| if y == 0.0 { 0.0 } else { x / y });
}

#[inline]
pub fn minimum(a: &[f32], b: &[f32], out: &mut [f32]) {
    zip_with(a, b, out, f32::min);
}

#[inline]
pub fn maximum(a: &[f32], b: &[f32], out: &mut [f32]) {
    zip_with(a, b, out, f32::max);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_basic() {
        let signal = [1.0, 0.5, -0.5, -1.0];
        let modulator = [1.0, 0.5, 0.5, 0.0];
        let mut out = [0.0; 4];

        multiply(&signal, &modulator, &mut out);

        assert_eq!(out, [1.0, 0.25, -0.25, 0.0]);
    }

    #[test]
    fn test_add_in_place() {
        let mut signal = [1.0, 0.5, -0.5];
        add_in_place(&mut signal, &[0.5, 0.5, 0.5]);
        assert_eq!(signal, [1.5, 1.0, 0.0]);
    }

    #[test]
    fn test_divide_by_zero_is_silent() {
        let mut out = [1.0; 3];
        divide(&[1.0, -2.0, 3.0], &[0.0, 2.0, 0.0], &mut out);
        assert_eq!(out, [0.0, -1.0, 0.0]);
    }

    #[test]
    fn test_min_max_clip() {
        let x = [-2.0, -0.5, 0.5, 2.0];
        let mut lo = [0.0; 4];
        let mut out = [0.0; 4];
        maximum(&x, &[-1.0; 4], &mut lo);
        minimum(&lo, &[1.0; 4], &mut out);
        assert_eq!(out, [-1.0, -0.5, 0.5, 1.0]);
    }

    #[test]
    fn test_subtract() {
        let mut out = [0.0; 2];
        subtract(&[1.0, 0.25], &[0.5, 0.5], &mut out);
        assert_eq!(out, [0.5, -0.25]);
    }
}
