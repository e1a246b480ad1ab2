use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::coefficients::rows;
use crate::compartment::Compartment;
use crate::config::Config;
use crate::error::ModelError;
use crate::gradient::Gradient;
use crate::math_utils::abs;
use crate::ox_tox::OxTox;
use crate::validator::{check_invariants, reconstruct_coefficients};

/// Published depth-to-pressure conversion used throughout: 1 metre of
/// seawater is taken as 0.0998 bar.
const BAR_PER_METER: f64 = 0.0998;

fn metres_to_bar(metres: f64) -> f64 {
    metres * BAR_PER_METER
}

fn bar_to_metres(bar: f64) -> f64 {
    bar / BAR_PER_METER
}

/// Sixteen ZH-L16 tissue compartments plus oxygen-toxicity and
/// gradient-factor bookkeeping for a single dive.
///
/// Every segment operation (`const_depth`, `asc_desc`) is applied
/// atomically: it computes the next state of all sixteen compartments and
/// of `OxTox` on copies first, and only commits them once every
/// sub-operation has succeeded. A failed segment leaves the model
/// untouched.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    compartments: Vec<Compartment>,
    ox_tox: OxTox,
    gradient: Gradient,
    pp_h2o: f64,
    config: Config,
    metadata: String,
}

impl Model {
    /// Build a fresh `Model` at surface equilibrium: `pp_he = 0`,
    /// `pp_n2 = f_n2_air * (P_surface - pp_h2o)` for every compartment.
    pub fn new(config: &Config) -> Result<Self, ModelError> {
        config
            .validate()
            .map_err(|err| ModelError::ModelState { reason: err.reason })?;

        let pp_h2o = config.pp_h2o();
        let surface_n2 = config.default_air_f_inert_gas * (config.ambient_pressure_surface - pp_h2o);

        let table = rows(config.deco_model, config.buhlmann_values);
        let mut compartments = Vec::with_capacity(16);
        for coefficients in table.iter() {
            compartments.push(Compartment::new(*coefficients, 0.0, surface_n2)?);
        }

        let gradient = Gradient::new(config.gf_low, config.gf_high)?;
        let metadata = format!("ZH-L16{:?}/{:?}", config.deco_model, config.buhlmann_values);

        Ok(Self {
            compartments,
            ox_tox: OxTox::default(),
            gradient,
            pp_h2o,
            config: *config,
            metadata,
        })
    }

    pub fn compartments(&self) -> &[Compartment] {
        &self.compartments
    }

    pub fn ox_tox(&self) -> &OxTox {
        &self.ox_tox
    }

    pub fn gradient(&self) -> &Gradient {
        &self.gradient
    }

    pub fn gradient_mut(&mut self) -> &mut Gradient {
        &mut self.gradient
    }

    pub fn pp_h2o(&self) -> f64 {
        self.pp_h2o
    }

    pub fn metadata(&self) -> &str {
        &self.metadata
    }

    /// Breathe a fixed gas mix at constant depth for `seconds`.
    pub fn const_depth(
        &mut self,
        p_bar_gauge: f64,
        seconds: f64,
        f_he: f64,
        f_n2: f64,
        pp_o2_setpoint_bar: f64,
    ) -> Result<(), ModelError> {
        let p_abs = p_bar_gauge + self.config.ambient_pressure_surface;
        let (pp_he_insp, pp_n2_insp, pp_o2) =
            self.inspired_pressures(p_abs, f_he, f_n2, pp_o2_setpoint_bar);

        let mut next_compartments = self.compartments.clone();
        for compartment in next_compartments.iter_mut() {
            compartment.const_depth(pp_he_insp, pp_n2_insp, seconds)?;
        }

        let mut next_ox_tox = self.ox_tox;
        if pp_o2_setpoint_bar <= 0.0 && p_bar_gauge <= 0.0 {
            next_ox_tox.remove_o2(seconds);
        } else {
            next_ox_tox.add_o2(seconds, pp_o2, self.config.strict_o2_limits)?;
        }

        self.compartments = next_compartments;
        self.ox_tox = next_ox_tox;
        Ok(())
    }

    /// Breathe a fixed gas mix while changing depth at `rate_m_per_s`
    /// from `p_start_gauge` to `p_finish_gauge`.
    pub fn asc_desc(
        &mut self,
        p_start_gauge: f64,
        p_finish_gauge: f64,
        rate_m_per_s: f64,
        f_he: f64,
        f_n2: f64,
        pp_o2_setpoint_bar: f64,
    ) -> Result<(), ModelError> {
        let p_abs_start = p_start_gauge + self.config.ambient_pressure_surface;
        let p_abs_finish = p_finish_gauge + self.config.ambient_pressure_surface;

        let direction = if p_abs_finish >= p_abs_start { 1.0 } else { -1.0 };
        let rate_bar = direction * abs(rate_m_per_s) * BAR_PER_METER;
        if rate_bar == 0.0 {
            return Err(ModelError::ModelState {
                reason: "asc_desc requires a non-zero rate",
            });
        }
        let delta_t_sec = abs(p_abs_finish - p_abs_start) / abs(rate_bar);
        if delta_t_sec <= 0.0 {
            return Err(ModelError::ModelState {
                reason: "asc_desc requires delta_t > 0",
            });
        }

        let (mut pp_he_insp_start, mut pp_n2_insp_start, pp_o2_start) =
            self.inspired_pressures(p_abs_start, f_he, f_n2, pp_o2_setpoint_bar);
        let (pp_he_insp_finish, pp_n2_insp_finish, pp_o2_finish) =
            self.inspired_pressures(p_abs_finish, f_he, f_n2, pp_o2_setpoint_bar);

        let (rate_he, rate_n2, pp_o2_avg) = if pp_o2_setpoint_bar > 0.0 {
            (
                (pp_he_insp_finish - pp_he_insp_start) / delta_t_sec,
                (pp_n2_insp_finish - pp_n2_insp_start) / delta_t_sec,
                pp_o2_setpoint_bar,
            )
        } else {
            if self.config.legacy_asc_desc_h2o_bug {
                // Mirrors the original source's omission of pp_h2o in this
                // branch: start pps computed directly from absolute
                // pressure rather than via `inspired_pressures`.
                pp_he_insp_start = p_abs_start * f_he;
                pp_n2_insp_start = p_abs_start * f_n2;
            }
            (rate_bar * f_he, rate_bar * f_n2, (pp_o2_start + pp_o2_finish) / 2.0)
        };

        let mut next_compartments = self.compartments.clone();
        for compartment in next_compartments.iter_mut() {
            compartment.asc_desc(pp_he_insp_start, pp_n2_insp_start, rate_he, rate_n2, delta_t_sec)?;
        }

        let mut next_ox_tox = self.ox_tox;
        next_ox_tox.add_o2(delta_t_sec, pp_o2_avg, self.config.strict_o2_limits)?;

        self.compartments = next_compartments;
        self.ox_tox = next_ox_tox;
        Ok(())
    }

    /// Shallowest depth (metres) that keeps every compartment within its
    /// gradient-factor-scaled M-value. Clamped to 0.
    pub fn ceiling(&self) -> f64 {
        let ceiling_bar = (self.ceiling_abs() - self.config.ambient_pressure_surface).max(0.0);
        bar_to_metres(ceiling_bar)
    }

    /// As [`Model::ceiling`] but absolute pressure in bar, unclamped.
    pub fn ceiling_abs(&self) -> f64 {
        let gf = self.gradient.current_gf();
        self.compartments
            .iter()
            .map(|c| c.max_amb(gf))
            .fold(f64::MIN, f64::max)
    }

    /// Maximum supersaturation ratio across all compartments at
    /// `depth_gauge_bar`.
    pub fn m_value(&self, depth_gauge_bar: f64) -> f64 {
        let p_abs = depth_gauge_bar + self.config.ambient_pressure_surface;
        self.compartments
            .iter()
            .map(|c| c.mv(p_abs))
            .fold(f64::MIN, f64::max)
    }

    /// 1-based index of the compartment with the greatest `max_amb` at
    /// the current gradient factor. Ties favour the lowest index.
    pub fn control_compartment(&self) -> usize {
        let gf = self.gradient.current_gf();
        let mut best_idx = 0;
        let mut best_val = self.compartments[0].max_amb(gf);
        for (i, compartment) in self.compartments.iter().enumerate().skip(1) {
            let val = compartment.max_amb(gf);
            if val > best_val {
                best_val = val;
                best_idx = i;
            }
        }
        best_idx + 1
    }

    /// Reconstruct any zeroed `k` coefficients (post-deserialisation) and
    /// re-check every compartment's data-contract invariants.
    pub fn validate(&mut self) -> Result<(), ModelError> {
        let needs_reconstruction = self.compartments.iter().any(|c| {
            let (k_he, k_n2) = c.k_values();
            k_he == 0.0 || k_n2 == 0.0
        });
        if needs_reconstruction {
            reconstruct_coefficients(
                &mut self.compartments,
                self.config.deco_model,
                self.config.buhlmann_values,
            )?;
        }
        check_invariants(&self.compartments)
    }

    /// Split an ambient pressure + gas mix + CCR setpoint into inspired
    /// He/N2 partial pressures plus the effective pp_o2 to feed `OxTox`.
    fn inspired_pressures(
        &self,
        p_abs: f64,
        f_he: f64,
        f_n2: f64,
        pp_o2_setpoint_bar: f64,
    ) -> (f64, f64, f64) {
        if pp_o2_setpoint_bar <= 0.0 {
            let p_inert_total = p_abs - self.pp_h2o;
            let pp_he_insp = p_inert_total * f_he;
            let pp_n2_insp = p_inert_total * f_n2;
            let pp_o2 = p_inert_total * (1.0 - f_he - f_n2);
            (pp_he_insp, pp_n2_insp, pp_o2)
        } else {
            let p_inert = (p_abs - pp_o2_setpoint_bar - self.pp_h2o).max(0.0);
            let (pp_he_insp, pp_n2_insp) = if f_he + f_n2 > 0.0 {
                (p_inert * f_he / (f_he + f_n2), p_inert * f_n2 / (f_he + f_n2))
            } else {
                (0.0, 0.0)
            };
            let pp_o2 = if pp_o2_setpoint_bar <= p_abs && p_inert > 0.0 {
                pp_o2_setpoint_bar
            } else {
                p_abs - self.pp_h2o
            };
            (pp_he_insp, pp_n2_insp, pp_o2)
        }
    }
}
