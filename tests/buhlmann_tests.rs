mod fixtures;

use fixtures::model_default;
use zhl16_deco_core::{Config, Model};

#[test]
fn test_fresh_model_is_surface_clear() {
    let model = model_default();
    assert_eq!(model.ceiling(), 0.0);
    assert_eq!(model.m_value(0.0), model.m_value(0.0));
}

#[test]
fn test_const_depth_raises_ceiling_after_deep_square_profile() {
    let mut model = model_default();
    model.const_depth(45.0, 30.0 * 60.0, 0.0, 0.79, 0.0).unwrap();
    model.gradient_mut().set_gf_at_depth(10.0);
    assert!(model.ceiling() > 0.0);
}

#[test]
fn test_deep_exposure_then_ascent_control_compartment_in_range() {
    let mut model = model_default();
    model.const_depth(40.0, 40.0 * 60.0, 0.0, 0.79, 0.0).unwrap();
    let idx = model.control_compartment();
    assert!((1..=16).contains(&idx));
}

#[test]
fn test_clone_is_independent_of_original() {
    let model = model_default();
    let mut clone = model.clone();
    clone.const_depth(30.0, 600.0, 0.0, 0.79, 0.0).unwrap();
    for (orig, cloned) in model.compartments().iter().zip(clone.compartments().iter()) {
        assert_ne!(orig.pp_n2, cloned.pp_n2);
    }
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let config = Config::new().with_gradient_factors(0.9, 0.2);
    assert!(Model::new(&config).is_err());
}

#[test]
fn test_validate_is_a_no_op_on_a_healthy_model() {
    let mut model = model_default();
    model.const_depth(30.0, 600.0, 0.0, 0.79, 0.0).unwrap();
    let pp_n2_before: f64 = model.compartments().iter().map(|c| c.pp_n2).sum();
    model.validate().unwrap();
    let pp_n2_after: f64 = model.compartments().iter().map(|c| c.pp_n2).sum();
    assert_eq!(pp_n2_before, pp_n2_after);
}
