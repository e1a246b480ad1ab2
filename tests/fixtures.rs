use zhl16_deco_core::{Config, DecoModelVariant, HeliumVariant, Model};

pub fn model_default() -> Model {
    let config = Config::new().with_gradient_factors(1.0, 1.0);
    Model::new(&config).unwrap()
}

pub fn model_gf(gf_low: f64, gf_high: f64) -> Model {
    let config = Config::new().with_gradient_factors(gf_low, gf_high);
    Model::new(&config).unwrap()
}

pub fn model_variant(deco_model: DecoModelVariant, buhlmann_values: HeliumVariant) -> Model {
    let config = Config::new()
        .with_deco_model(deco_model)
        .with_buhlmann_values(buhlmann_values)
        .with_gradient_factors(1.0, 1.0);
    Model::new(&config).unwrap()
}

#[macro_export]
macro_rules! assert_close_to_abs {
    ($a:expr, $b:expr, $tolerance:expr) => {
        if ($a - $b).abs() > $tolerance {
            panic!("{} is not close to {} with tolerance of {}", $a, $b, $tolerance);
        }
    };
}

#[macro_export]
macro_rules! assert_close_to_percent {
    ($a:expr, $b:expr, $tolerance_percent:expr) => {
        let tolerance = $b * ($tolerance_percent / 100.0);
        if ($a - $b).abs() > tolerance {
            panic!(
                "{} is not close to {} within {} percent tolerance ({})",
                $a, $b, $tolerance_percent, tolerance
            );
        }
    };
}
