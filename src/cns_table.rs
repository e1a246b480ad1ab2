//! NOAA CNS% oxygen-toxicity slope table.
//!
//! Each row gives the linear (slope, intercept) pair used to compute the
//! single-pp_o2 CNS time limit: `t_lim_min = slope * pp_o2 + intercept`,
//! valid over the row's ppO2 range in bar.

use core::ops::RangeInclusive;

pub type CnsCoeffRow = (RangeInclusive<f64>, i32, i32);

pub const CNS_COEFFICIENTS: [CnsCoeffRow; 7] = [
    (0.5..=0.6, -1800, 1800),
    (0.6..=0.7, -1500, 1620),
    (0.7..=0.8, -1200, 1410),
    (0.8..=0.9, -900, 1170),
    (0.9..=1.1, -600, 900),
    (1.1..=1.5, -300, 570),
    (1.5..=1.6, -750, 1245),
];

/// Find the NOAA coefficient row applicable to `pp_o2`, if any (table is
/// only defined over `0.5..=1.6` bar; callers handle the below/above cases).
pub fn coeffs_for(pp_o2: f64) -> Option<CnsCoeffRow> {
    for row in CNS_COEFFICIENTS.into_iter() {
        let row_range = row.0.clone();
        // row boundaries overlap (e.g. 0.6 closes one row and opens the
        // next); treat the *start* of a row as exclusive so each pp_o2
        // maps to exactly one row, matching the NOAA table's intent.
        let in_range_start_exclusive = pp_o2 != *row_range.start() && row_range.contains(&pp_o2);
        if in_range_start_exclusive {
            return Some(row);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coeffs_for_in_range() {
        assert!(coeffs_for(0.55).is_some());
        assert!(coeffs_for(1.6).is_some());
    }

    #[test]
    fn test_coeffs_for_out_of_range() {
        assert!(coeffs_for(0.3).is_none());
        assert!(coeffs_for(1.7).is_none());
    }
}
