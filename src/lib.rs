#![cfg_attr(feature = "no-std", no_std)]
extern crate alloc;

mod coefficients;
mod compartment;
mod config;
mod cns_table;
mod error;
mod gradient;
mod math_utils;
mod model;
mod ox_tox;
mod validator;

pub use coefficients::{DecoModelVariant, HeliumVariant, RawZhlRow, ZhlParams};
pub use compartment::Compartment;
pub use config::Config;
pub use error::{ConfigValidationErr, ModelError};
pub use gradient::Gradient;
pub use model::Model;
pub use ox_tox::OxTox;
pub use validator::{check_invariants, reconstruct_coefficients};

pub use coefficients::rows as coefficient_rows;
