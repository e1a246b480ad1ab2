use crate::cns_table::coeffs_for;
use crate::error::ModelError;
use crate::math_utils::powf;

const CNS_ELIMINATION_HALF_TIME_SEC: f64 = 90.0 * 60.0;
/// CNS accrual rate above the NOAA table's 1.6 bar ceiling: reach 100%
/// after 400 seconds of continuous exposure.
const CNS_LIMIT_OVER_MAX_PPO2_SEC: f64 = 400.0;

const OTU_PPO2_FLOOR: f64 = 0.5;
const OTU_PPO2_CEILING: f64 = 3.0;

/// Accumulated oxygen-toxicity exposure: OTU (whole-body) and CNS%
/// (central-nervous-system, fraction of the NOAA single-exposure limit).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OxTox {
    otu: f64,
    cns: f64,
}

impl OxTox {
    pub fn otu(&self) -> f64 {
        self.otu
    }

    pub fn cns(&self) -> f64 {
        self.cns
    }

    /// Accumulate OTU and CNS% for `delta_t_sec` seconds of exposure at
    /// `pp_o2` bar.
    pub fn add_o2(&mut self, delta_t_sec: f64, pp_o2: f64, strict: bool) -> Result<(), ModelError> {
        if strict && pp_o2 > OTU_PPO2_CEILING {
            return Err(ModelError::InvalidO2Exposure { pp_o2 });
        }

        self.otu += otu_delta(delta_t_sec, pp_o2);
        self.cns += cns_delta(delta_t_sec, pp_o2);
        self.cns = self.cns.min(100.0);
        Ok(())
    }

    /// Decay CNS% over a surface interval (90 minute half-life). OTU does
    /// not decay within a dive.
    pub fn remove_o2(&mut self, delta_t_sec: f64) {
        self.cns /= powf(2.0, delta_t_sec / CNS_ELIMINATION_HALF_TIME_SEC);
    }
}

/// Hamilton/Repex OTU integral, zero below the 0.5 bar floor.
fn otu_delta(delta_t_sec: f64, pp_o2: f64) -> f64 {
    if pp_o2 <= OTU_PPO2_FLOOR {
        return 0.0;
    }
    let otu_per_min = powf(0.5 / (pp_o2 - 0.5), -5.0 / 6.0);
    otu_per_min * (delta_t_sec / 60.0)
}

/// NOAA piecewise-linear CNS% slope table, saturating above 1.6 bar.
fn cns_delta(delta_t_sec: f64, pp_o2: f64) -> f64 {
    if let Some((_, slope, intercept)) = coeffs_for(pp_o2) {
        let t_lim_min = (slope as f64) * pp_o2 + (intercept as f64);
        (delta_t_sec / (t_lim_min * 60.0)) * 100.0
    } else if pp_o2 > 1.6 {
        (delta_t_sec / CNS_LIMIT_OVER_MAX_PPO2_SEC) * 100.0
    } else {
        0.0
    }
}
