//! Extracción del vector de descriptores elementales.
//!
//! Todos los valores provienen del toolkit; aquí sólo se derivan los conteos
//! por elemento y la fracción de carbonos sp3.
use chemengine::{AtomInfo, Hybridization, MolecularToolkit};

use crate::DomainError;

#[derive(Debug, Clone, PartialEq)]
pub struct DescriptorVector {
    pub molecular_weight: f64,
    pub logp: f64,
    pub h_donors: u32,
    pub h_acceptors: u32,
    pub tpsa: f64,
    pub rotatable_bonds: u32,
    pub qed: f64,
    pub rings: u32,
    pub aromatic_rings: u32,
    pub molar_refractivity: f64,
    pub atom_count: u32,
    pub carbon_count: u32,
    pub heteroatom_count: u32,
    pub fraction_csp3: f64,
    pub formula: String,
}

/// Lee los descriptores de una estructura ya parseada.
pub fn extract_descriptors<T: MolecularToolkit>(toolkit: &T, mol: &T::Structure) -> Result<DescriptorVector, DomainError> {
    let atoms = toolkit.atoms(mol)?;
    let descriptors = DescriptorVector { molecular_weight: toolkit.exact_weight(mol)?,
                                         logp: toolkit.logp(mol)?,
                                         h_donors: toolkit.h_donor_count(mol)?,
                                         h_acceptors: toolkit.h_acceptor_count(mol)?,
                                         tpsa: toolkit.tpsa(mol)?,
                                         rotatable_bonds: toolkit.rotatable_bond_count(mol)?,
                                         qed: toolkit.qed(mol)?,
                                         rings: toolkit.ring_count(mol)?,
                                         aromatic_rings: toolkit.aromatic_ring_count(mol)?,
                                         molar_refractivity: toolkit.molar_refractivity(mol)?,
                                         atom_count: atoms.len() as u32,
                                         carbon_count: atoms.iter().filter(|a| a.is_carbon()).count() as u32,
                                         heteroatom_count: atoms.iter().filter(|a| a.is_heteroatom()).count() as u32,
                                         fraction_csp3: fraction_csp3(&atoms),
                                         formula: toolkit.formula(mol)? };
    descriptors.ensure_finite()?;
    Ok(descriptors)
}

/// Carbonos sp3 sobre carbonos totales; 0.0 si no hay carbonos.
pub fn fraction_csp3(atoms: &[AtomInfo]) -> f64 {
    let carbons = atoms.iter().filter(|a| a.is_carbon()).count();
    if carbons == 0 {
        return 0.0;
    }
    let sp3 = atoms.iter()
                   .filter(|a| a.is_carbon() && a.hybridization == Hybridization::Sp3)
                   .count();
    sp3 as f64 / carbons as f64
}

impl DescriptorVector {
    fn ensure_finite(&self) -> Result<(), DomainError> {
        let values = [("ExactMolWt", self.molecular_weight),
                      ("MolLogP", self.logp),
                      ("TPSA", self.tpsa),
                      ("qed", self.qed),
                      ("MolMR", self.molar_refractivity)];
        match values.into_iter().find(|(_, v)| !v.is_finite()) {
            Some((descriptor, value)) => Err(DomainError::NonFiniteDescriptor { descriptor, value }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chemengine::FixtureToolkit;

    fn atom(atomic_number: u8, hybridization: Hybridization) -> AtomInfo {
        AtomInfo { atomic_number, hybridization }
    }

    #[test]
    fn test_fraction_csp3_without_carbons_is_zero() {
        assert_eq!(fraction_csp3(&[]), 0.0);
        assert_eq!(fraction_csp3(&[atom(8, Hybridization::Sp3), atom(7, Hybridization::Sp3)]), 0.0);
    }

    #[test]
    fn test_fraction_csp3_ignores_sp3_heteroatoms() {
        // Etanol: el oxígeno sp3 no cuenta en el numerador
        let atoms = [atom(6, Hybridization::Sp3), atom(6, Hybridization::Sp3), atom(8, Hybridization::Sp3)];
        assert_eq!(fraction_csp3(&atoms), 1.0);
        let atoms = [atom(6, Hybridization::Sp3), atom(6, Hybridization::Sp2), atom(6, Hybridization::Sp2), atom(8, Hybridization::Sp3)];
        assert!((fraction_csp3(&atoms) - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_extract_ethanol() {
        let toolkit = FixtureToolkit::reference().unwrap();
        let mol = toolkit.parse("CCO").unwrap().unwrap();
        let d = extract_descriptors(&toolkit, &mol).unwrap();
        assert_eq!(d.atom_count, 3);
        assert_eq!(d.carbon_count, 2);
        assert_eq!(d.heteroatom_count, 1);
        assert_eq!(d.h_donors, 1);
        assert_eq!(d.formula, "C2H6O");
        assert_eq!(d.fraction_csp3, 1.0);
    }

    #[test]
    fn test_extract_caffeine_counts() {
        let toolkit = FixtureToolkit::reference().unwrap();
        let mol = toolkit.parse("CN1C=NC2=C1C(=O)N(C(=O)N2C)C").unwrap().unwrap();
        let d = extract_descriptors(&toolkit, &mol).unwrap();
        assert_eq!(d.atom_count, 14);
        assert_eq!(d.carbon_count, 8);
        assert_eq!(d.heteroatom_count, 6);
        assert_eq!(d.aromatic_rings, 2);
        assert!((d.fraction_csp3 - 0.375).abs() < 1e-12);
    }

    #[test]
    fn test_extract_rejects_nan() {
        let mut fixture = FixtureToolkit::reference().unwrap().get("CCO").unwrap().clone();
        fixture.logp = f64::NAN;
        let toolkit = FixtureToolkit::new(vec![fixture]);
        let mol = toolkit.parse("CCO").unwrap().unwrap();
        let err = extract_descriptors(&toolkit, &mol).unwrap_err();
        assert!(matches!(err, DomainError::NonFiniteDescriptor { descriptor: "MolLogP", .. }));
    }
}
