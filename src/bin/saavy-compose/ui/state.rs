//! Live patch controls edited from the keyboard.

/// Values the user can change while the scope runs.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Controls {
    /// Output gain (0.0-1.0), fed to the attenuator through a keyed constant
    pub gain: f32,
    /// Whether the grain gate is held
    pub gate: bool,
    /// Detune of the saw pair in cents (0-100)
    pub detune_cents: f32,
}

impl Controls {
    pub fn new(gain: f32, detune_cents: f32) -> Self {
        Self {
            gain: gain.clamp(0.0, 1.0),
            gate: true,
            detune_cents: detune_cents.clamp(0.0, 100.0),
        }
    }

    pub fn nudge_gain(&mut self, delta: f32) {
        self.gain = (self.gain + delta).clamp(0.0, 1.0);
    }

    pub fn nudge_detune(&mut self, delta: f32) {
        self.detune_cents = (self.detune_cents + delta).clamp(0.0, 100.0);
    }

    pub fn toggle_gate(&mut self) {
        self.gate = !self.gate;
    }

    pub fn gate_value(&self) -> f32 {
        if self.gate {
            1.0
        } else {
            0.0
        }
    }
}
