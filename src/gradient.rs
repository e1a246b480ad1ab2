use crate::error::ModelError;

/// Gradient-factor schedule: GF_low at the first stop tightening linearly
/// to GF_high at the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Gradient {
    gf_low: f64,
    gf_high: f64,
    first_stop_depth: Option<f64>,
    current_gf: f64,
}

impl Gradient {
    /// `gf_low` and `gf_high` are fractions in `(0, 1]` with
    /// `gf_low <= gf_high`. `current_gf` starts at `gf_high` (no first
    /// stop identified yet).
    pub fn new(gf_low: f64, gf_high: f64) -> Result<Self, ModelError> {
        if !(gf_low > 0.0 && gf_low <= 1.0) || !(gf_high > 0.0 && gf_high <= 1.0) {
            return Err(ModelError::ModelState {
                reason: "gf_low and gf_high must be in (0, 1]",
            });
        }
        if gf_low > gf_high {
            return Err(ModelError::ModelState {
                reason: "gf_low must be <= gf_high",
            });
        }
        Ok(Self {
            gf_low,
            gf_high,
            first_stop_depth: None,
            current_gf: gf_high,
        })
    }

    pub fn gf_low(&self) -> f64 {
        self.gf_low
    }

    pub fn gf_high(&self) -> f64 {
        self.gf_high
    }

    pub fn first_stop_depth(&self) -> Option<f64> {
        self.first_stop_depth
    }

    pub fn current_gf(&self) -> f64 {
        self.current_gf
    }

    /// Called when the first decompression stop is identified; fixes the
    /// slope's deep end and moves `current_gf` to `gf_low`.
    pub fn set_gf_at_depth(&mut self, depth_bar: f64) {
        self.first_stop_depth = Some(depth_bar);
        self.current_gf = self.gf_low;
    }

    /// Recompute `current_gf` for the diver's present depth: a linear
    /// interpolation between `gf_low` at the first stop and `gf_high` at
    /// the surface, clamped to `[gf_low, gf_high]`.
    pub fn update_gf_at_depth(&mut self, depth_bar: f64) {
        let Some(first_stop_depth) = self.first_stop_depth else {
            self.current_gf = self.gf_high;
            return;
        };

        if first_stop_depth <= 0.0 || depth_bar <= 0.0 {
            self.current_gf = self.gf_high;
            return;
        }

        let interpolated =
            self.gf_high + (self.gf_low - self.gf_high) * depth_bar / first_stop_depth;
        self.current_gf = interpolated.clamp(self.gf_low, self.gf_high);
    }
}
