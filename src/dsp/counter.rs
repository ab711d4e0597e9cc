//! Gated sample counter.

/// Gate values above this are "high".
pub const GATE_THRESHOLD: f32 = 0.5;

/// Counts samples elapsed since the gate last went high.
///
/// Emits 0 on the first high sample, then 1, 2, ... and emits 0 (and
/// resets) while the gate is low.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GateCounter {
    count: f32,
}

impl GateCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.count = 0.0;
    }

    #[inline]
    pub fn tick(&mut self, gate: f32) -> f32 {
        if gate > GATE_THRESHOLD {
            let out = self.count;
            self.count += 1.0;
            out
        } else {
            self.count = 0.0;
            0.0
        }
    }

    pub fn render(&mut self, gate: &[f32], out: &mut [f32]) {
        debug_assert_eq!(gate.len(), out.len());

        for (o, &g) in out.iter_mut().zip(gate.iter()) {
            *o = self.tick(g);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_while_high_and_resets_when_low() {
        let mut counter = GateCounter::new();
        let gate = [0.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0];
        let mut out = [0.0; 7];
        counter.render(&gate, &mut out);
        assert_eq!(out, [0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn count_continues_across_blocks() {
        let mut counter = GateCounter::new();
        let mut out = [0.0; 4];
        counter.render(&[1.0; 4], &mut out);
        counter.render(&[1.0; 4], &mut out);
        assert_eq!(out, [4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut counter = GateCounter::new();
        assert_eq!(counter.tick(GATE_THRESHOLD), 0.0);
        assert_eq!(counter.tick(GATE_THRESHOLD), 0.0);
        assert_eq!(counter.tick(0.51), 0.0);
        assert_eq!(counter.tick(0.51), 1.0);
    }
}
