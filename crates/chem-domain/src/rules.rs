//! Reglas empíricas de drug-likeness y clasificadores de absorción.
//!
//! Cada regla es una tabla de criterios (`Criterion`) sobre el vector de
//! descriptores. Los umbrales son los publicados por cada autor y viven sólo
//! aquí. Los conteos de violaciones suman criterios incumplidos sin
//! ponderación ni corte temprano.
use std::fmt;

use crate::descriptors::DescriptorVector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descriptor {
    MolecularWeight,
    LogP,
    HDonors,
    HAcceptors,
    Tpsa,
    RotatableBonds,
    AtomCount,
    MolarRefractivity,
    Rings,
    CarbonCount,
    HeteroatomCount,
}

impl Descriptor {
    pub fn value(self, d: &DescriptorVector) -> f64 {
        match self {
            Descriptor::MolecularWeight => d.molecular_weight,
            Descriptor::LogP => d.logp,
            Descriptor::HDonors => d.h_donors as f64,
            Descriptor::HAcceptors => d.h_acceptors as f64,
            Descriptor::Tpsa => d.tpsa,
            Descriptor::RotatableBonds => d.rotatable_bonds as f64,
            Descriptor::AtomCount => d.atom_count as f64,
            Descriptor::MolarRefractivity => d.molar_refractivity,
            Descriptor::Rings => d.rings as f64,
            Descriptor::CarbonCount => d.carbon_count as f64,
            Descriptor::HeteroatomCount => d.heteroatom_count as f64,
        }
    }
}

/// Región aceptable de un descriptor. Los rangos `Within` son cerrados.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    AtMost(f64),
    Below(f64),
    AtLeast(f64),
    Within(f64, f64),
}

impl Bound {
    pub fn holds(self, value: f64) -> bool {
        match self {
            Bound::AtMost(max) => value <= max,
            Bound::Below(limit) => value < limit,
            Bound::AtLeast(min) => value >= min,
            Bound::Within(lo, hi) => (lo..=hi).contains(&value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criterion {
    pub descriptor: Descriptor,
    pub bound: Bound,
}

impl Criterion {
    pub const fn new(descriptor: Descriptor, bound: Bound) -> Self {
        Self { descriptor, bound }
    }

    pub fn holds(&self, d: &DescriptorVector) -> bool {
        self.bound.holds(self.descriptor.value(d))
    }
}

/// Regla que reporta cuántos de sus criterios se incumplen.
#[derive(Debug, Clone, Copy)]
pub struct RuleSet {
    pub name: &'static str,
    pub criteria: &'static [Criterion],
}

impl RuleSet {
    pub fn violations(&self, d: &DescriptorVector) -> u32 {
        self.criteria.iter().filter(|c| !c.holds(d)).count() as u32
    }
}

/// Clasificador binario: etiqueta positiva sólo si se cumplen todos los
/// criterios.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<L: 'static> {
    pub name: &'static str,
    pub criteria: &'static [Criterion],
    pub positive: L,
    pub negative: L,
}

impl<L: Copy> Classifier<L> {
    pub fn classify(&self, d: &DescriptorVector) -> L {
        if self.criteria.iter().all(|c| c.holds(d)) {
            self.positive
        } else {
            self.negative
        }
    }
}

use Bound::{AtLeast, AtMost, Below, Within};
use Descriptor::*;

pub const LIPINSKI: RuleSet = RuleSet { name: "Lipinski",
                                        criteria: &[Criterion::new(MolecularWeight, AtMost(500.0)),
                                                    Criterion::new(LogP, AtMost(5.0)),
                                                    Criterion::new(HDonors, AtMost(5.0)),
                                                    Criterion::new(HAcceptors, AtMost(10.0))] };

pub const GHOSE: RuleSet = RuleSet { name: "Ghose",
                                     criteria: &[Criterion::new(MolecularWeight, Within(160.0, 480.0)),
                                                 Criterion::new(LogP, Within(-0.4, 5.6)),
                                                 Criterion::new(AtomCount, Within(20.0, 70.0)),
                                                 Criterion::new(MolarRefractivity, Within(40.0, 130.0))] };

pub const VEBER: RuleSet = RuleSet { name: "Veber",
                                     criteria: &[Criterion::new(RotatableBonds, AtMost(10.0)),
                                                 Criterion::new(Tpsa, AtMost(140.0))] };

pub const EGAN: RuleSet = RuleSet { name: "Egan",
                                    criteria: &[Criterion::new(Tpsa, AtMost(132.0)),
                                                Criterion::new(LogP, Within(-1.0, 6.0))] };

pub const MUEGGE: RuleSet = RuleSet { name: "Muegge",
                                      criteria: &[Criterion::new(MolecularWeight, Within(200.0, 600.0)),
                                                  Criterion::new(LogP, Within(-2.0, 5.0)),
                                                  Criterion::new(Tpsa, AtLeast(75.0)),
                                                  Criterion::new(Rings, AtLeast(1.0)),
                                                  Criterion::new(CarbonCount, AtLeast(7.0)),
                                                  Criterion::new(HeteroatomCount, AtLeast(2.0)),
                                                  Criterion::new(RotatableBonds, AtMost(15.0))] };

pub const GI_ABSORPTION: Classifier<GiAbsorption> =
    Classifier { name: "Absorción GI",
                 criteria: &[Criterion::new(Tpsa, AtMost(140.0)),
                             Criterion::new(RotatableBonds, AtMost(10.0)),
                             Criterion::new(MolecularWeight, AtMost(500.0)),
                             Criterion::new(LogP, Within(-0.4, 5.6))],
                 positive: GiAbsorption::High,
                 negative: GiAbsorption::Low };

pub const BBB_PERMEATION: Classifier<BbbPermeation> =
    Classifier { name: "Permeable a BBB",
                 criteria: &[Criterion::new(Tpsa, Below(90.0)),
                             Criterion::new(MolecularWeight, Below(400.0)),
                             Criterion::new(LogP, Below(5.0)),
                             Criterion::new(HDonors, AtMost(3.0))],
                 positive: BbbPermeation::Yes,
                 negative: BbbPermeation::No };

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiAbsorption {
    High,
    Low,
}

impl fmt::Display for GiAbsorption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        GiAbsorption::High => "Alta",
                        GiAbsorption::Low => "Baja",
                    })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BbbPermeation {
    Yes,
    No,
}

impl fmt::Display for BbbPermeation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
                        BbbPermeation::Yes => "Sí",
                        BbbPermeation::No => "No",
                    })
    }
}

/// Resultado de las siete reglas para una molécula.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleEvaluation {
    pub gi_absorption: GiAbsorption,
    pub bbb_permeant: BbbPermeation,
    pub lipinski_violations: u32,
    pub ghose_violations: u32,
    pub veber_violations: u32,
    pub egan_violations: u32,
    pub muegge_violations: u32,
}

pub fn evaluate(d: &DescriptorVector) -> RuleEvaluation {
    RuleEvaluation { gi_absorption: GI_ABSORPTION.classify(d),
                     bbb_permeant: BBB_PERMEATION.classify(d),
                     lipinski_violations: LIPINSKI.violations(d),
                     ghose_violations: GHOSE.violations(d),
                     veber_violations: VEBER.violations(d),
                     egan_violations: EGAN.violations(d),
                     muegge_violations: MUEGGE.violations(d) }
}

impl fmt::Display for RuleEvaluation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}, {}={}", GI_ABSORPTION.name, self.gi_absorption, BBB_PERMEATION.name, self.bbb_permeant)?;
        for (rule, count) in [(LIPINSKI, self.lipinski_violations),
                              (GHOSE, self.ghose_violations),
                              (VEBER, self.veber_violations),
                              (EGAN, self.egan_violations),
                              (MUEGGE, self.muegge_violations)]
        {
            write!(f, ", {}={}", rule.name, count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Molécula que cumple todas las reglas y ambos clasificadores.
    fn compliant() -> DescriptorVector {
        DescriptorVector { molecular_weight: 350.0,
                           logp: 2.5,
                           h_donors: 2,
                           h_acceptors: 5,
                           tpsa: 80.0,
                           rotatable_bonds: 5,
                           qed: 0.7,
                           rings: 2,
                           aromatic_rings: 1,
                           molar_refractivity: 90.0,
                           atom_count: 25,
                           carbon_count: 18,
                           heteroatom_count: 6,
                           fraction_csp3: 0.4,
                           formula: "C18H22N2O4".into() }
    }

    #[test]
    fn test_compliant_molecule_has_no_violations() {
        let e = evaluate(&compliant());
        assert_eq!(e.gi_absorption, GiAbsorption::High);
        assert_eq!(e.bbb_permeant, BbbPermeation::Yes);
        assert_eq!((e.lipinski_violations, e.ghose_violations, e.veber_violations, e.egan_violations, e.muegge_violations),
                   (0, 0, 0, 0, 0));
    }

    #[test]
    fn test_bounds_inclusive_and_strict() {
        assert!(AtMost(500.0).holds(500.0));
        assert!(!AtMost(500.0).holds(500.01));
        assert!(!Below(90.0).holds(90.0));
        assert!(Below(90.0).holds(89.99));
        assert!(AtLeast(75.0).holds(75.0));
        assert!(Within(-0.4, 5.6).holds(-0.4));
        assert!(Within(-0.4, 5.6).holds(5.6));
        assert!(!Within(-0.4, 5.6).holds(5.61));
    }

    #[test]
    fn test_lipinski_weight_adds_exactly_one() {
        let mut d = compliant();
        d.molecular_weight = 500.0;
        assert_eq!(LIPINSKI.violations(&d), 0);
        for mw in [500.5, 650.0, 1200.0] {
            d.molecular_weight = mw;
            assert_eq!(LIPINSKI.violations(&d), 1, "MW={mw}");
        }
    }

    #[test]
    fn test_lipinski_all_four() {
        let mut d = compliant();
        d.molecular_weight = 720.0;
        d.logp = 6.2;
        d.h_donors = 6;
        d.h_acceptors = 11;
        assert_eq!(LIPINSKI.violations(&d), 4);
    }

    #[test]
    fn test_ghose_ranges_both_sides() {
        let mut d = compliant();
        d.molecular_weight = 159.9;
        assert_eq!(GHOSE.violations(&d), 1);
        d.molecular_weight = 480.1;
        assert_eq!(GHOSE.violations(&d), 1);
        d.atom_count = 19;
        assert_eq!(GHOSE.violations(&d), 2);
        d.atom_count = 71;
        d.molar_refractivity = 39.0;
        d.logp = -0.5;
        assert_eq!(GHOSE.violations(&d), 4);
    }

    #[test]
    fn test_veber_and_egan() {
        let mut d = compliant();
        d.rotatable_bonds = 11;
        assert_eq!(VEBER.violations(&d), 1);
        d.tpsa = 135.0;
        assert_eq!(VEBER.violations(&d), 1);
        assert_eq!(EGAN.violations(&d), 1);
        d.tpsa = 141.0;
        assert_eq!(VEBER.violations(&d), 2);
        d.logp = -1.5;
        assert_eq!(EGAN.violations(&d), 2);
    }

    #[test]
    fn test_muegge_counts_each_check() {
        let mut d = compliant();
        d.tpsa = 74.9;
        assert_eq!(MUEGGE.violations(&d), 1);
        d.rings = 0;
        d.carbon_count = 6;
        d.heteroatom_count = 1;
        d.rotatable_bonds = 16;
        assert_eq!(MUEGGE.violations(&d), 5);
        d.molecular_weight = 610.0;
        d.logp = 5.1;
        assert_eq!(MUEGGE.violations(&d), 7);
    }

    #[test]
    fn test_violations_monotonic_in_logp() {
        let mut d = compliant();
        let mut previous = [0u32; 4];
        for step in 0..40 {
            d.logp = 2.5 + step as f64 * 0.25;
            let current = [LIPINSKI.violations(&d), GHOSE.violations(&d), EGAN.violations(&d), MUEGGE.violations(&d)];
            for (now, before) in current.iter().zip(previous.iter()) {
                assert!(now >= before, "logP={}", d.logp);
            }
            previous = current;
        }
        assert_eq!(previous, [1, 1, 1, 1]);
    }

    #[test]
    fn test_gi_absorption_boundaries() {
        let mut d = compliant();
        d.tpsa = 140.0;
        d.rotatable_bonds = 10;
        d.molecular_weight = 500.0;
        d.logp = -0.4;
        assert_eq!(GI_ABSORPTION.classify(&d), GiAbsorption::High);
        d.logp = -0.41;
        assert_eq!(GI_ABSORPTION.classify(&d), GiAbsorption::Low);
    }

    #[test]
    fn test_bbb_boundaries_are_strict() {
        let mut d = compliant();
        d.tpsa = 90.0;
        assert_eq!(BBB_PERMEATION.classify(&d), BbbPermeation::No);
        d.tpsa = 89.9;
        d.h_donors = 3;
        assert_eq!(BBB_PERMEATION.classify(&d), BbbPermeation::Yes);
        d.h_donors = 4;
        assert_eq!(BBB_PERMEATION.classify(&d), BbbPermeation::No);
        d.h_donors = 3;
        d.molecular_weight = 400.0;
        assert_eq!(BBB_PERMEATION.classify(&d), BbbPermeation::No);
        d.molecular_weight = 399.0;
        d.logp = 5.0;
        assert_eq!(BBB_PERMEATION.classify(&d), BbbPermeation::No);
    }

    #[test]
    fn test_labels_display() {
        assert_eq!(GiAbsorption::High.to_string(), "Alta");
        assert_eq!(GiAbsorption::Low.to_string(), "Baja");
        assert_eq!(BbbPermeation::Yes.to_string(), "Sí");
        assert_eq!(BbbPermeation::No.to_string(), "No");
    }

    #[test]
    fn test_evaluation_display_names_every_rule() {
        let e = RuleEvaluation { gi_absorption: GiAbsorption::High,
                                 bbb_permeant: BbbPermeation::No,
                                 lipinski_violations: 0,
                                 ghose_violations: 2,
                                 veber_violations: 0,
                                 egan_violations: 1,
                                 muegge_violations: 3 };
        assert_eq!(e.to_string(),
                   "Absorción GI=Alta, Permeable a BBB=No, Lipinski=0, Ghose=2, Veber=0, Egan=1, Muegge=3");
    }
}
