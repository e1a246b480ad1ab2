use crate::coefficients::{DecoModelVariant, HeliumVariant};
use crate::error::ConfigValidationErr;

/// Alveolar water-vapour partial pressure, bar, at body temperature
/// (47 mmHg @ 37 degC — Buhlmann's convention). Fixed rather than derived
/// from `surface_temp`: alveolar gas exchange happens at body temperature
/// regardless of ambient water temperature.
pub const ALVEOLI_WATER_VAPOUR_PRESSURE: f64 = 0.0627;

const GF_RANGE_ERR_MSG: &str = "gf_low and gf_high must be in (0, 1]";
const GF_ORDER_ERR_MSG: &str = "gf_low must be <= gf_high";
const SURFACE_PRESSURE_ERR_MSG: &str = "ambient_pressure_surface must be in a plausible 0.5-1.5 bar range";
const INERT_FRACTION_ERR_MSG: &str = "default_air_f_inert_gas must be in 0..=1";

/// Immutable configuration bundle consumed once at [`crate::Model::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    pub deco_model: DecoModelVariant,
    pub buhlmann_values: HeliumVariant,
    pub gf_low: f64,
    pub gf_high: f64,
    pub surface_temp: f64,
    pub ambient_pressure_surface: f64,
    pub default_air_f_inert_gas: f64,
    /// When set, [`crate::OxTox::add_o2`] rejects `pp_o2 > 3.0` bar
    /// instead of silently saturating CNS at 100%.
    pub strict_o2_limits: bool,
    /// When set, `Model::asc_desc`'s open-circuit branch omits water-vapour
    /// pressure the way the original tool's source does, instead of
    /// mirroring `const_depth`'s treatment (the default). See DESIGN.md.
    pub legacy_asc_desc_h2o_bug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            deco_model: DecoModelVariant::ZHL16C,
            buhlmann_values: HeliumVariant::OneB,
            gf_low: 1.0,
            gf_high: 1.0,
            surface_temp: 20.0,
            ambient_pressure_surface: 1.01325,
            default_air_f_inert_gas: 0.7902,
            strict_o2_limits: false,
            legacy_asc_desc_h2o_bug: false,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_deco_model(mut self, deco_model: DecoModelVariant) -> Self {
        self.deco_model = deco_model;
        self
    }

    pub fn with_buhlmann_values(mut self, buhlmann_values: HeliumVariant) -> Self {
        self.buhlmann_values = buhlmann_values;
        self
    }

    pub fn with_gradient_factors(mut self, gf_low: f64, gf_high: f64) -> Self {
        self.gf_low = gf_low;
        self.gf_high = gf_high;
        self
    }

    pub fn with_surface_temp(mut self, surface_temp: f64) -> Self {
        self.surface_temp = surface_temp;
        self
    }

    pub fn with_ambient_pressure_surface(mut self, ambient_pressure_surface: f64) -> Self {
        self.ambient_pressure_surface = ambient_pressure_surface;
        self
    }

    pub fn with_default_air_f_inert_gas(mut self, default_air_f_inert_gas: f64) -> Self {
        self.default_air_f_inert_gas = default_air_f_inert_gas;
        self
    }

    pub fn with_strict_o2_limits(mut self, strict: bool) -> Self {
        self.strict_o2_limits = strict;
        self
    }

    pub fn with_legacy_asc_desc_h2o_bug(mut self, legacy: bool) -> Self {
        self.legacy_asc_desc_h2o_bug = legacy;
        self
    }

    /// Alveolar water-vapour pressure used by `Model` (see
    /// [`ALVEOLI_WATER_VAPOUR_PRESSURE`]).
    pub fn pp_h2o(&self) -> f64 {
        ALVEOLI_WATER_VAPOUR_PRESSURE
    }

    pub fn validate(&self) -> Result<(), ConfigValidationErr> {
        self.validate_gradient_factors()?;
        self.validate_surface_pressure()?;
        self.validate_inert_fraction()?;
        Ok(())
    }

    fn validate_gradient_factors(&self) -> Result<(), ConfigValidationErr> {
        let gf_range = 0.0..=1.0;
        if self.gf_low <= 0.0 || !gf_range.contains(&self.gf_low) || !gf_range.contains(&self.gf_high)
        {
            return Err(ConfigValidationErr::new("gf", GF_RANGE_ERR_MSG));
        }
        if self.gf_low > self.gf_high {
            return Err(ConfigValidationErr::new("gf", GF_ORDER_ERR_MSG));
        }
        Ok(())
    }

    fn validate_surface_pressure(&self) -> Result<(), ConfigValidationErr> {
        let range = 0.5..=1.5;
        if !range.contains(&self.ambient_pressure_surface) {
            return Err(ConfigValidationErr::new(
                "ambient_pressure_surface",
                SURFACE_PRESSURE_ERR_MSG,
            ));
        }
        Ok(())
    }

    fn validate_inert_fraction(&self) -> Result<(), ConfigValidationErr> {
        let range = 0.0..=1.0;
        if !range.contains(&self.default_air_f_inert_gas) {
            return Err(ConfigValidationErr::new(
                "default_air_f_inert_gas",
                INERT_FRACTION_ERR_MSG,
            ));
        }
        Ok(())
    }
}
