//! Static ZH-L16 coefficient tables.
//!
//! Selectable by ([`DecoModelVariant`], [`HeliumVariant`]); each pair maps
//! to 16 rows of `(tau_he, tau_n2, a_he, b_he, a_n2, b_n2)`. Variant `c`
//! differs from `b` only in the N2 `a` coefficients of the mid/slow
//! compartments (looser profile); variant `a` differs from `b` in the N2
//! `a` coefficients of a different (more conservative) subset. The
//! `fast_he` selector only ever changes compartment 0.
//!
//! The repository historically stores `a` coefficients multiplied by ten
//! (a convention inherited from the XML dive-table format this model was
//! ported from); the raw tables below preserve that encoding so the
//! on-disk shape is visible, and [`rows`] is the single normalisation
//! point that divides them back down to bar-units before compartments
//! ever see them.

/// `(tau_he_min, tau_n2_min, a_he_x10, b_he, a_n2_x10, b_n2)` — raw,
/// ten-fold `a`-coefficient encoding as stored historically.
pub type RawZhlRow = (f64, f64, f64, f64, f64, f64);

/// `(tau_he_min, tau_n2_min, a_he, b_he, a_n2, b_n2)` — normalised,
/// bar-unit coefficients ready for [`crate::Compartment::set_coefficients`].
pub type ZhlParams = (f64, f64, f64, f64, f64, f64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DecoModelVariant {
    ZHL16A,
    ZHL16B,
    ZHL16C,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HeliumVariant {
    /// Original Buhlmann "1a" fast-compartment constants.
    OneA,
    /// Revised "1b" fast-compartment constants (most implementations'
    /// default).
    OneB,
}

const HE_1A_ROW: RawZhlRow = (1.51, 4.0, 17.424, 0.4245, 12.599, 0.5050);
const HE_1B_ROW: RawZhlRow = (1.88, 5.0, 16.189, 0.4770, 11.696, 0.5578);

// Compartments 2..16, shared across all three variants except where noted.
const ZHL16B_TAIL: [RawZhlRow; 15] = [
    (3.02, 8.0, 13.830, 0.5747, 10.000, 0.6514),
    (4.72, 12.5, 11.919, 0.6527, 8.618, 0.7222),
    (6.99, 18.5, 10.458, 0.7223, 7.562, 0.7825),
    (10.21, 27.0, 9.220, 0.7582, 6.667, 0.8126),
    (14.48, 38.3, 8.205, 0.7957, 5.600, 0.8434),
    (20.53, 54.3, 7.305, 0.8279, 4.947, 0.8693),
    (29.11, 77.0, 6.502, 0.8553, 4.500, 0.8910),
    (41.20, 109.0, 5.950, 0.8757, 4.187, 0.9092),
    (55.19, 146.0, 5.545, 0.8903, 3.798, 0.9222),
    (70.69, 187.0, 5.333, 0.8997, 3.497, 0.9319),
    (90.34, 239.0, 5.189, 0.9073, 3.223, 0.9403),
    (115.29, 305.0, 5.181, 0.9122, 2.850, 0.9477),
    (147.42, 390.0, 5.176, 0.9171, 2.737, 0.9544),
    (188.24, 498.0, 5.172, 0.9217, 2.523, 0.9602),
    (240.03, 635.0, 5.119, 0.9267, 2.327, 0.9653),
];

const ZHL16C_TAIL: [RawZhlRow; 15] = [
    (3.02, 8.0, 13.830, 0.5747, 10.000, 0.6514),
    (4.72, 12.5, 11.919, 0.6527, 8.618, 0.7222),
    (6.99, 18.5, 10.458, 0.7223, 7.562, 0.7825),
    (10.21, 27.0, 9.220, 0.7582, 6.200, 0.8126),
    (14.48, 38.3, 8.205, 0.7957, 5.043, 0.8434),
    (20.53, 54.3, 7.305, 0.8279, 4.410, 0.8693),
    (29.11, 77.0, 6.502, 0.8553, 4.000, 0.8910),
    (41.20, 109.0, 5.950, 0.8757, 3.750, 0.9092),
    (55.19, 146.0, 5.545, 0.8903, 3.500, 0.9222),
    (70.69, 187.0, 5.333, 0.8997, 3.295, 0.9319),
    (90.34, 239.0, 5.189, 0.9073, 3.065, 0.9403),
    (115.29, 305.0, 5.181, 0.9122, 2.835, 0.9477),
    (147.42, 390.0, 5.176, 0.9171, 2.610, 0.9544),
    (188.24, 498.0, 5.172, 0.9217, 2.480, 0.9602),
    (240.03, 635.0, 5.119, 0.9267, 2.327, 0.9653),
];

const ZHL16A_TAIL: [RawZhlRow; 15] = [
    (3.02, 8.0, 13.830, 0.5747, 10.000, 0.6514),
    (4.72, 12.5, 11.919, 0.6527, 8.618, 0.7222),
    (6.99, 18.5, 10.458, 0.7223, 7.562, 0.7825),
    (10.21, 27.0, 9.220, 0.7582, 6.667, 0.8126),
    (14.48, 38.3, 8.205, 0.7957, 5.933, 0.8434),
    (20.53, 54.3, 7.305, 0.8279, 5.282, 0.8693),
    (29.11, 77.0, 6.502, 0.8553, 4.710, 0.8910),
    (41.20, 109.0, 5.950, 0.8757, 4.187, 0.9092),
    (55.19, 146.0, 5.545, 0.8903, 3.798, 0.9222),
    (70.69, 187.0, 5.333, 0.8997, 3.497, 0.9319),
    (90.34, 239.0, 5.189, 0.9073, 3.223, 0.9403),
    (115.29, 305.0, 5.181, 0.9122, 2.971, 0.9477),
    (147.42, 390.0, 5.176, 0.9171, 2.737, 0.9544),
    (188.24, 498.0, 5.172, 0.9217, 2.523, 0.9602),
    (240.03, 635.0, 5.119, 0.9267, 2.327, 0.9653),
];

fn raw_rows(variant: DecoModelVariant, fast_he: HeliumVariant) -> [RawZhlRow; 16] {
    let row0 = match fast_he {
        HeliumVariant::OneA => HE_1A_ROW,
        HeliumVariant::OneB => HE_1B_ROW,
    };
    let tail = match variant {
        DecoModelVariant::ZHL16A => ZHL16A_TAIL,
        DecoModelVariant::ZHL16B => ZHL16B_TAIL,
        DecoModelVariant::ZHL16C => ZHL16C_TAIL,
    };
    let mut rows = [row0; 16];
    rows[1..].copy_from_slice(&tail);
    rows
}

/// Normalised coefficient rows for `(variant, fast_he)`, with `a`
/// coefficients divided back down from their ten-fold on-disk encoding.
pub fn rows(variant: DecoModelVariant, fast_he: HeliumVariant) -> [ZhlParams; 16] {
    raw_rows(variant, fast_he).map(|(tau_he, tau_n2, a_he_x10, b_he, a_n2_x10, b_n2)| {
        (tau_he, tau_n2, a_he_x10 / 10.0, b_he, a_n2_x10 / 10.0, b_n2)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compartment0_1b_normalised() {
        let table = rows(DecoModelVariant::ZHL16B, HeliumVariant::OneB);
        let (tau_he, tau_n2, a_he, b_he, a_n2, b_n2) = table[0];
        assert_eq!(tau_he, 1.88);
        assert_eq!(tau_n2, 5.0);
        assert_eq!(a_he, 1.6189);
        assert_eq!(b_he, 0.4770);
        assert_eq!(a_n2, 1.1696);
        assert_eq!(b_n2, 0.5578);
    }

    #[test]
    fn test_compartment0_1a_normalised() {
        let table = rows(DecoModelVariant::ZHL16C, HeliumVariant::OneA);
        let (tau_he, _, a_he, _, a_n2, _) = table[0];
        assert_eq!(tau_he, 1.51);
        assert_eq!(a_he, 1.7424);
        assert_eq!(a_n2, 1.2599);
    }

    #[test]
    fn test_variant_b_c_differ_only_in_mid_slow_n2_a() {
        let b = rows(DecoModelVariant::ZHL16B, HeliumVariant::OneB);
        let c = rows(DecoModelVariant::ZHL16C, HeliumVariant::OneB);
        for i in 0..16 {
            let (tau_he_b, tau_n2_b, a_he_b, b_he_b, a_n2_b, b_n2_b) = b[i];
            let (tau_he_c, tau_n2_c, a_he_c, b_he_c, a_n2_c, b_n2_c) = c[i];
            assert_eq!(tau_he_b, tau_he_c);
            assert_eq!(tau_n2_b, tau_n2_c);
            assert_eq!(a_he_b, a_he_c);
            assert_eq!(b_he_b, b_he_c);
            assert_eq!(b_n2_b, b_n2_c);
            if i == 0 || i == 15 {
                assert_eq!(a_n2_b, a_n2_c, "compartment {i} should match");
            } else {
                assert_ne!(a_n2_b, a_n2_c, "compartment {i} should diverge");
            }
        }
    }

    #[test]
    fn test_all_coefficients_positive() {
        for variant in [
            DecoModelVariant::ZHL16A,
            DecoModelVariant::ZHL16B,
            DecoModelVariant::ZHL16C,
        ] {
            for fast_he in [HeliumVariant::OneA, HeliumVariant::OneB] {
                for (tau_he, tau_n2, a_he, b_he, a_n2, b_n2) in rows(variant, fast_he) {
                    assert!(tau_he > 0.0);
                    assert!(tau_n2 > 0.0);
                    assert!(a_he > 0.0);
                    assert!(b_he > 0.0);
                    assert!(a_n2 > 0.0);
                    assert!(b_n2 > 0.0);
                }
            }
        }
    }
}
