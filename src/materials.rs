//! Sellmeier dispersion data for common optical materials.
//!
//! Each entry evaluates the three-term Sellmeier equation
//!
//! ```text
//! n² = A + B₁λ²/(λ² − C₁) + B₂λ²/(λ² − C₂) + B₃λ²/(λ² − C₃)
//! ```
//!
//! with λ in micrometers, the customary unit for published coefficients.
//! Uniaxial crystals carry an ordinary and an extraordinary index; isotropic
//! glasses carry one. Evaluating outside a material's fitted range is not an
//! error, but it logs a warning since the polynomial extrapolates poorly.

use tracing::warn;

use crate::errors::MaterialError;
use crate::math::Scalar;

/// Coefficients of one three-term Sellmeier fit, λ in µm.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SellmeierCoefficients {
    /// Constant offset A.
    pub a: Scalar,
    /// First oscillator strength B₁.
    pub b1: Scalar,
    /// First resonance C₁ (µm²).
    pub c1: Scalar,
    /// Second oscillator strength B₂.
    pub b2: Scalar,
    /// Second resonance C₂ (µm²).
    pub c2: Scalar,
    /// Third oscillator strength B₃.
    pub b3: Scalar,
    /// Third resonance C₃ (µm²).
    pub c3: Scalar,
}

impl SellmeierCoefficients {
    /// Evaluates n² at the given vacuum wavelength in µm.
    #[must_use]
    pub fn index_squared(&self, wavelength_um: Scalar) -> Scalar {
        let l2 = wavelength_um * wavelength_um;
        let term = |b: Scalar, c: Scalar| {
            if b == 0.0 {
                0.0
            } else {
                b * l2 / (l2 - c)
            }
        };
        self.a + term(self.b1, self.c1) + term(self.b2, self.c2) + term(self.b3, self.c3)
    }

    /// Evaluates n at the given vacuum wavelength in µm.
    #[must_use]
    pub fn index(&self, wavelength_um: Scalar) -> Scalar {
        self.index_squared(wavelength_um).sqrt()
    }
}

/// Crystal symmetry class, which fixes how many indices a material has.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symmetry {
    /// One index.
    Isotropic,
    /// Ordinary and extraordinary indices.
    Uniaxial,
}

/// A cataloged optical material with its dispersion fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    name: &'static str,
    symmetry: Symmetry,
    ordinary: SellmeierCoefficients,
    extraordinary: SellmeierCoefficients,
    valid_range_um: (Scalar, Scalar),
    reference: &'static str,
}

/// Congruent lithium niobate (LiNbO₃), negative uniaxial.
pub const LITHIUM_NIOBATE: Material = Material {
    name: "LiNbO3",
    symmetry: Symmetry::Uniaxial,
    ordinary: SellmeierCoefficients {
        a: 2.23920,
        b1: 2.5112,
        c1: 0.047089,
        b2: 7.1333,
        c2: 272.316,
        b3: 0.0,
        c3: 0.0,
    },
    extraordinary: SellmeierCoefficients {
        a: 2.3247,
        b1: 2.2565,
        c1: 0.0441,
        b2: 14.503,
        c2: 671.58,
        b3: 0.0,
        c3: 0.0,
    },
    valid_range_um: (0.4, 3.1),
    reference: "Saleh & Teich, Fundamentals of Photonics 2e, p. 180",
};

/// Beta barium borate (β-BaB₂O₄), negative uniaxial.
pub const BBO: Material = Material {
    name: "BBO",
    symmetry: Symmetry::Uniaxial,
    ordinary: SellmeierCoefficients {
        a: 1.46357,
        b1: 1.26172,
        c1: 0.01628,
        b2: 0.00166,
        c2: 30.0,
        b3: 0.0,
        c3: 0.0,
    },
    extraordinary: SellmeierCoefficients {
        a: 1.40567,
        b1: 0.95869,
        c1: 0.01431,
        b2: 0.01644,
        c2: 30.0,
        b3: 0.0,
        c3: 0.0,
    },
    valid_range_um: (0.26, 1.06),
    reference: "Eimerl et al., Applied Optics 28(2), 1989, pp. 202-203",
};

const N_BAF10_FIT: SellmeierCoefficients = SellmeierCoefficients {
    a: 1.0,
    b1: 1.585_149_5,
    c1: 0.009_266_812_82,
    b2: 0.143_559_385,
    c2: 0.042_448_980_5,
    b3: 1.085_212_69,
    c3: 105.613_573,
};

/// Schott N-BAF10 barium crown glass, isotropic.
pub const N_BAF10: Material = Material {
    name: "N-BAF10",
    symmetry: Symmetry::Isotropic,
    ordinary: N_BAF10_FIT,
    extraordinary: N_BAF10_FIT,
    valid_range_um: (0.35, 2.5),
    reference: "RefractiveIndex.info (Schott catalog fit)",
};

/// Every material in the catalog.
pub const CATALOG: [Material; 3] = [LITHIUM_NIOBATE, BBO, N_BAF10];

impl Material {
    /// Looks up a catalog material by its name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`MaterialError::UnknownMaterial`] when the name matches no
    /// catalog entry; the message lists the available names.
    pub fn find(name: &str) -> Result<Self, MaterialError> {
        CATALOG
            .iter()
            .find(|material| material.name.eq_ignore_ascii_case(name))
            .copied()
            .ok_or_else(|| MaterialError::UnknownMaterial(name.to_owned()))
    }

    /// Catalog name of the material.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Symmetry class, which determines how many distinct indices exist.
    #[must_use]
    pub const fn symmetry(&self) -> Symmetry {
        self.symmetry
    }

    /// Wavelength range of the fit in µm.
    #[must_use]
    pub const fn valid_range_um(&self) -> (Scalar, Scalar) {
        self.valid_range_um
    }

    /// Literature source for the coefficients.
    #[must_use]
    pub const fn reference(&self) -> &'static str {
        self.reference
    }

    /// Ordinary refractive index at a vacuum wavelength in µm. For
    /// isotropic materials this is the only index.
    #[must_use]
    pub fn ordinary_index(&self, wavelength_um: Scalar) -> Scalar {
        self.check_range(wavelength_um);
        self.ordinary.index(wavelength_um)
    }

    /// Extraordinary refractive index at a vacuum wavelength in µm. Equal
    /// to the ordinary index for isotropic materials.
    #[must_use]
    pub fn extraordinary_index(&self, wavelength_um: Scalar) -> Scalar {
        self.check_range(wavelength_um);
        self.extraordinary.index(wavelength_um)
    }

    fn check_range(&self, wavelength_um: Scalar) {
        let (low, high) = self.valid_range_um;
        if wavelength_um < low || wavelength_um > high {
            warn!(
                material = self.name,
                wavelength_um,
                low,
                high,
                "wavelength outside the fitted Sellmeier range; extrapolating"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn n_baf10_reproduces_the_catalog_d_line_index() {
        // Schott quotes n_d = 1.67003 at the helium d line.
        assert_relative_eq!(
            N_BAF10.ordinary_index(0.5876),
            1.67003,
            max_relative = 1e-5
        );
    }

    #[test]
    fn isotropic_materials_have_one_index() {
        assert_eq!(N_BAF10.symmetry(), Symmetry::Isotropic);
        assert_eq!(
            N_BAF10.ordinary_index(1.0),
            N_BAF10.extraordinary_index(1.0)
        );
    }

    #[test]
    fn bbo_is_negative_uniaxial() {
        let n_o = BBO.ordinary_index(0.6);
        let n_e = BBO.extraordinary_index(0.6);
        assert_relative_eq!(n_o, 1.6688409, max_relative = 1e-6);
        assert_relative_eq!(n_e, 1.5504341, max_relative = 1e-6);
        assert!(n_e < n_o);
    }

    #[test]
    fn lithium_niobate_matches_the_published_fit() {
        assert_relative_eq!(
            LITHIUM_NIOBATE.ordinary_index(1.0),
            2.2018633,
            max_relative = 1e-6
        );
        assert_relative_eq!(
            LITHIUM_NIOBATE.extraordinary_index(1.0),
            2.1595544,
            max_relative = 1e-6
        );
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let material = Material::find("linbo3").unwrap();
        assert_eq!(material.name(), "LiNbO3");
    }

    #[test]
    fn unknown_materials_are_rejected_by_name() {
        let err = Material::find("unobtainium").expect_err("not in the catalog");
        assert!(matches!(err, MaterialError::UnknownMaterial(name) if name == "unobtainium"));
    }

    #[test]
    fn index_rises_toward_the_ultraviolet() {
        // Normal dispersion throughout the fitted range.
        assert!(N_BAF10.ordinary_index(0.4) > N_BAF10.ordinary_index(0.7));
        assert!(BBO.ordinary_index(0.3) > BBO.ordinary_index(1.0));
    }
}
