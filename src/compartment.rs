use crate::coefficients::ZhlParams;
use crate::error::ModelError;
use crate::math_utils::exp;

/// One ZH-L16 tissue compartment: its current He/N2 inert-gas load and the
/// half-time/M-value coefficients that drive its integration.
///
/// Invariants (checked by [`Compartment::set_coefficients`] and
/// [`Compartment::set_pressures`], re-checked by
/// [`crate::validator::check_invariants`] after deserialisation):
/// `pp_he >= 0`, `pp_n2 > 0`, all `k`/`b` coefficients strictly positive,
/// `a_he`/`a_n2` strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Compartment {
    pub pp_he: f64,
    pub pp_n2: f64,
    k_he: f64,
    k_n2: f64,
    a_he: f64,
    b_he: f64,
    a_n2: f64,
    b_n2: f64,
}

impl Compartment {
    /// Build a compartment from normalised `(tau_he, tau_n2, a_he, b_he,
    /// a_n2, b_n2)` coefficients and initial inert-gas pressures.
    pub fn new(coefficients: ZhlParams, pp_he: f64, pp_n2: f64) -> Result<Self, ModelError> {
        let mut comp = Self {
            pp_he: 0.0,
            pp_n2: f64::MIN_POSITIVE,
            k_he: 1.0,
            k_n2: 1.0,
            a_he: 1.0,
            b_he: 1.0,
            a_n2: 1.0,
            b_n2: 1.0,
        };
        comp.set_coefficients(coefficients)?;
        comp.set_pressures(pp_he, pp_n2)?;
        Ok(comp)
    }

    /// Store half-times (minutes) and M-value coefficients, deriving
    /// `k = ln(2) / (60 * tau)` for each inert gas.
    pub fn set_coefficients(&mut self, coefficients: ZhlParams) -> Result<(), ModelError> {
        let (tau_he, tau_n2, a_he, b_he, a_n2, b_n2) = coefficients;
        for (field, value) in [
            ("tau_he", tau_he),
            ("tau_n2", tau_n2),
            ("a_he", a_he),
            ("b_he", b_he),
            ("a_n2", a_n2),
            ("b_n2", b_n2),
        ] {
            if value <= 0.0 {
                return Err(ModelError::InvalidCoefficient { field, value });
            }
        }

        const LN2: f64 = core::f64::consts::LN_2;
        self.k_he = LN2 / (60.0 * tau_he);
        self.k_n2 = LN2 / (60.0 * tau_n2);
        self.a_he = a_he;
        self.b_he = b_he;
        self.a_n2 = a_n2;
        self.b_n2 = b_n2;
        Ok(())
    }

    /// Assign inert-gas partial pressures directly (bar).
    pub fn set_pressures(&mut self, pp_he: f64, pp_n2: f64) -> Result<(), ModelError> {
        if pp_n2 <= 0.0 || pp_he < 0.0 {
            return Err(ModelError::InvalidPressure { pp_he, pp_n2 });
        }
        self.pp_he = pp_he;
        self.pp_n2 = pp_n2;
        Ok(())
    }

    /// `k_he`, `k_n2` derived from the stored half-times, in 1/second.
    pub fn k_values(&self) -> (f64, f64) {
        (self.k_he, self.k_n2)
    }

    /// `a_he, b_he, a_n2, b_n2` as stored (bar-unit, already normalised).
    pub fn zhl_coefficients(&self) -> (f64, f64, f64, f64) {
        (self.a_he, self.b_he, self.a_n2, self.b_n2)
    }

    /// Haldane exponential integration at constant inspired pressure.
    pub fn const_depth(
        &mut self,
        pp_he_insp: f64,
        pp_n2_insp: f64,
        delta_t_sec: f64,
    ) -> Result<(), ModelError> {
        if delta_t_sec < 0.0 || pp_he_insp < 0.0 || pp_n2_insp < 0.0 {
            return Err(ModelError::ModelState {
                reason: "const_depth requires delta_t >= 0 and non-negative inspired pressures",
            });
        }

        self.pp_he = haldane(pp_he_insp, self.pp_he, self.k_he, delta_t_sec);
        self.pp_n2 = haldane(pp_n2_insp, self.pp_n2, self.k_n2, delta_t_sec);
        Ok(())
    }

    /// Schreiner integration for a linearly changing inspired pressure.
    pub fn asc_desc(
        &mut self,
        pp_he_insp_start: f64,
        pp_n2_insp_start: f64,
        rate_he: f64,
        rate_n2: f64,
        delta_t_sec: f64,
    ) -> Result<(), ModelError> {
        if delta_t_sec <= 0.0 || pp_he_insp_start < 0.0 || pp_n2_insp_start < 0.0 {
            return Err(ModelError::ModelState {
                reason: "asc_desc requires delta_t > 0 and non-negative inspired pressures",
            });
        }

        self.pp_he = schreiner(pp_he_insp_start, rate_he, self.pp_he, self.k_he, delta_t_sec);
        self.pp_n2 = schreiner(pp_n2_insp_start, rate_n2, self.pp_n2, self.k_n2, delta_t_sec);
        Ok(())
    }

    /// Mixed-gas M-value (bar) at the given ambient pressure: `a`/`b`
    /// linearly blended by the current He/N2 fractions. Returns the
    /// surface N2 `a` coefficient when the compartment carries no
    /// inert-gas load at all (the 100%-N2-fraction limit).
    pub fn m_value_at(&self, p_amb: f64) -> f64 {
        let total = self.pp_he + self.pp_n2;
        if total <= 0.0 {
            return self.a_n2;
        }
        let (a_mix, b_mix) = self.weighted_coefficients(total);
        a_mix + p_amb / b_mix
    }

    /// Tolerated ambient pressure for a given gradient factor: the depth
    /// at which total inert pressure equals the gf-scaled M-value. May be
    /// negative ("surface-clear"); callers clamp to surface pressure.
    pub fn max_amb(&self, gf: f64) -> f64 {
        let total = self.pp_he + self.pp_n2;
        let (a_mix, b_mix) = self.weighted_coefficients(total);
        (total - a_mix * gf) / (gf / b_mix - gf + 1.0)
    }

    /// Supersaturation ratio `(pp_he + pp_n2) / m_value_at(p_amb)`.
    pub fn mv(&self, p_amb: f64) -> f64 {
        (self.pp_he + self.pp_n2) / self.m_value_at(p_amb)
    }

    fn weighted_coefficients(&self, total: f64) -> (f64, f64) {
        let a_mix = (self.pp_he * self.a_he + self.pp_n2 * self.a_n2) / total;
        let b_mix = (self.pp_he * self.b_he + self.pp_n2 * self.b_n2) / total;
        (a_mix, b_mix)
    }

    /// Test-only: zero the derived `k` coefficients without touching `a`/`b`,
    /// simulating a deserialised compartment whose `k` was never persisted
    /// (see `crate::validator::reconstruct_coefficients`).
    #[cfg(test)]
    pub(crate) fn zero_k_for_test(&mut self) {
        self.k_he = 0.0;
        self.k_n2 = 0.0;
    }
}

/// `pp_new = pp_insp + (pp_old - pp_insp) * exp(-k * dt)`
fn haldane(pp_insp: f64, pp_old: f64, k: f64, delta_t_sec: f64) -> f64 {
    pp_insp + (pp_old - pp_insp) * exp(-k * delta_t_sec)
}

/// `pp_new = pp_insp + rate*(dt - 1/k) - (pp_insp - pp_old - rate/k) * exp(-k*dt)`
fn schreiner(pp_insp: f64, rate: f64, pp_old: f64, k: f64, delta_t_sec: f64) -> f64 {
    pp_insp + rate * (delta_t_sec - 1.0 / k) - (pp_insp - pp_old - rate / k) * exp(-k * delta_t_sec)
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMP0_1B: ZhlParams = (1.88, 5.0, 1.6189, 0.4770, 1.1696, 0.5578);

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() < tol,
            "expected {expected}, got {actual} (tolerance {tol})"
        );
    }

    #[test]
    fn test_k_derivation() {
        let comp = Compartment::new(COMP0_1B, 0.0, 0.79).unwrap();
        let (k_he, k_n2) = comp.k_values();
        assert_close(k_he, 0.00614492181347, 1e-14);
        assert_close(k_n2, 0.00231049060187, 1e-14);
    }

    #[test]
    fn test_invalid_coefficient_rejected() {
        let err = Compartment::new((0.0, 5.0, 1.0, 1.0, 1.0, 1.0), 0.0, 0.79);
        assert!(matches!(err, Err(ModelError::InvalidCoefficient { field: "tau_he", .. })));
    }

    #[test]
    fn test_invalid_pressures_rejected() {
        assert!(Compartment::new(COMP0_1B, 0.0, 0.0).is_err());
        assert!(Compartment::new(COMP0_1B, -0.1, 0.79).is_err());
    }

    #[test]
    fn test_const_depth_scenario() {
        let mut comp = Compartment::new(COMP0_1B, 1.5, 2.45).unwrap();
        comp.const_depth(0.3 * 4.5, 0.49 * 4.5, 12.0 * 60.0).unwrap();
        assert_close(comp.pp_he, 1.35179731087, 1e-10);
        assert_close(comp.pp_n2, 2.25141881985, 1e-10);
    }

    #[test]
    fn test_asc_desc_scenario() {
        let mut comp = Compartment::new(COMP0_1B, 1.5, 2.45).unwrap();
        comp.asc_desc(0.2997, 0.48951, 0.1, 0.163333333333, 9.0).unwrap();
        assert_close(comp.pp_he, 1.45985489718, 1e-9);
        assert_close(comp.pp_n2, 2.42483220311, 1e-9);
    }

    #[test]
    fn test_schreiner_reduces_to_haldane_at_zero_rate() {
        let mut a = Compartment::new(COMP0_1B, 1.5, 2.45).unwrap();
        let mut b = a;
        a.const_depth(1.2, 2.1, 300.0).unwrap();
        b.asc_desc(1.2, 2.1, 0.0, 0.0, 300.0).unwrap();
        assert_close(a.pp_he, b.pp_he, 1e-12);
        assert_close(a.pp_n2, b.pp_n2, 1e-12);
    }

    #[test]
    fn test_haldane_fixpoint_at_large_dt() {
        let mut comp = Compartment::new(COMP0_1B, 1.5, 2.45).unwrap();
        comp.const_depth(0.9, 1.1, 1_000_000.0).unwrap();
        assert_close(comp.pp_he, 0.9, 1e-6);
        assert_close(comp.pp_n2, 1.1, 1e-6);
    }

    #[test]
    fn test_monotonicity_ongassing_and_offgassing() {
        let mut up = Compartment::new(COMP0_1B, 1.5, 2.45).unwrap();
        let mut down = Compartment::new(COMP0_1B, 1.5, 2.45).unwrap();
        let before_up = up.pp_n2;
        let before_down = down.pp_n2;
        up.const_depth(0.5, 4.0, 60.0).unwrap();
        down.const_depth(0.5, 0.5, 60.0).unwrap();
        assert!(up.pp_n2 > before_up);
        assert!(down.pp_n2 < before_down);
    }

    #[test]
    fn test_m_value_at_surface_and_depth() {
        let comp = Compartment::new((70.69, 187.0, 0.5333, 0.8997, 1.1696, 0.5578), 0.0, 3.16).unwrap();
        assert_eq!(comp.m_value_at(0.0), 1.1696);
        assert_close(comp.m_value_at(1.0), 2.96235726067, 1e-10);
    }

    #[test]
    fn test_max_amb_and_mv() {
        let comp = Compartment::new((70.69, 187.0, 0.5333, 0.8997, 1.1696, 0.5578), 0.0, 3.16).unwrap();
        assert_close(comp.max_amb(0.8), 1.36110151389, 1e-10);
        assert_close(comp.mv(1.0), 1.06671806333, 1e-10);
    }
}
