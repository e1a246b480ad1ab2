//! Free-standing invariant checks and coefficient reconstruction, factored
//! out of `Model` so they can run standalone after deserialisation (a
//! `Model` loaded from storage carries its compartments but not the
//! `Config` that produced them).

use crate::coefficients::{rows, DecoModelVariant, HeliumVariant};
use crate::compartment::Compartment;
use crate::error::ModelError;

/// Re-derive each compartment's `k`/`a`/`b` coefficients from
/// `(variant, fast_he)`, leaving its current `pp_he`/`pp_n2` load
/// untouched. Used to repair a `Model` whose coefficients were zeroed or
/// corrupted (e.g. by a faulty deserialisation) without losing its
/// accumulated inert-gas state.
pub fn reconstruct_coefficients(
    compartments: &mut [Compartment],
    variant: DecoModelVariant,
    fast_he: HeliumVariant,
) -> Result<(), ModelError> {
    let table = rows(variant, fast_he);
    for (compartment, coefficients) in compartments.iter_mut().zip(table.iter()) {
        compartment.set_coefficients(*coefficients)?;
    }
    Ok(())
}

/// Re-check every compartment's data-contract invariants: mirrors what
/// [`Compartment::set_pressures`]/[`Compartment::set_coefficients`] enforce
/// at construction time (`pp_n2 > 0`, `pp_he >= 0`, all `k`/`a`/`b`
/// coefficients strictly positive). No cross-compartment invariant is
/// checked here; `validate()` only ever certifies a single compartment's
/// own state against its own constructor's rules.
pub fn check_invariants(compartments: &[Compartment]) -> Result<(), ModelError> {
    for compartment in compartments.iter() {
        if compartment.pp_n2 <= 0.0 || compartment.pp_he < 0.0 {
            return Err(ModelError::ModelValidation {
                reason: "a compartment holds pp_n2 <= 0 or pp_he < 0",
            });
        }
        let (a_he, b_he, a_n2, b_n2) = compartment.zhl_coefficients();
        if a_he <= 0.0 || b_he <= 0.0 || a_n2 <= 0.0 || b_n2 <= 0.0 {
            return Err(ModelError::ModelValidation {
                reason: "a compartment holds a non-positive M-value coefficient",
            });
        }
        let (k_he, k_n2) = compartment.k_values();
        if k_he <= 0.0 || k_n2 <= 0.0 {
            return Err(ModelError::ModelValidation {
                reason: "a compartment holds a non-positive k",
            });
        }
    }

    Ok(())
}
