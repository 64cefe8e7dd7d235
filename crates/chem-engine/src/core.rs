use pyo3::prelude::*;
use pyo3::types::PyModule;

use crate::toolkit::{AtomInfo, Hybridization, MolecularToolkit};
use crate::EngineError;

/// Toolkit respaldado por RDKit. Los módulos de Python se importan una sola
/// vez en `init` y se guardan en la propia instancia.
pub struct RdkitToolkit {
    chem: Py<PyModule>,
    descriptors: Py<PyModule>,
    crippen: Py<PyModule>,
    qed: Py<PyModule>,
    rd_mol_descriptors: Py<PyModule>,
}

impl RdkitToolkit {
    pub fn init() -> Result<Self, EngineError> {
        Python::attach(|py| {
            let import = |name: &str| {
                py.import(name)
                  .map(Bound::unbind)
                  .map_err(|e| EngineError::Init(format!("{name}: {e}")))
            };
            Ok(Self { chem: import("rdkit.Chem")?,
                      descriptors: import("rdkit.Chem.Descriptors")?,
                      crippen: import("rdkit.Chem.Crippen")?,
                      qed: import("rdkit.Chem.QED")?,
                      rd_mol_descriptors: import("rdkit.Chem.rdMolDescriptors")? })
        })
    }

    fn call<T>(&self, module: &Py<PyModule>, function: &'static str, mol: &Py<PyAny>) -> Result<T, EngineError>
        where T: for<'py> FromPyObject<'py>
    {
        Python::attach(|py| {
            module.bind(py)
                  .getattr(function)
                  .and_then(|f| f.call1((mol.bind(py),)))
                  .and_then(|value| value.extract::<T>())
                  .map_err(|e| descriptor_error(function, e))
        })
    }
}

fn descriptor_error(descriptor: &'static str, err: PyErr) -> EngineError {
    EngineError::Descriptor { descriptor,
                              message: err.to_string() }
}

impl MolecularToolkit for RdkitToolkit {
    type Structure = Py<PyAny>;

    fn name(&self) -> &str {
        "rdkit"
    }

    fn parse(&self, smiles: &str) -> Result<Option<Py<PyAny>>, EngineError> {
        Python::attach(|py| -> PyResult<Option<Py<PyAny>>> {
            let mol = self.chem.bind(py).getattr("MolFromSmiles")?.call1((smiles,))?;
            Ok(if mol.is_none() { None } else { Some(mol.unbind()) })
        }).map_err(|e| descriptor_error("MolFromSmiles", e))
    }

    fn exact_weight(&self, mol: &Py<PyAny>) -> Result<f64, EngineError> {
        self.call(&self.descriptors, "ExactMolWt", mol)
    }

    fn logp(&self, mol: &Py<PyAny>) -> Result<f64, EngineError> {
        self.call(&self.descriptors, "MolLogP", mol)
    }

    fn h_donor_count(&self, mol: &Py<PyAny>) -> Result<u32, EngineError> {
        self.call(&self.descriptors, "NumHDonors", mol)
    }

    fn h_acceptor_count(&self, mol: &Py<PyAny>) -> Result<u32, EngineError> {
        self.call(&self.descriptors, "NumHAcceptors", mol)
    }

    fn tpsa(&self, mol: &Py<PyAny>) -> Result<f64, EngineError> {
        self.call(&self.descriptors, "TPSA", mol)
    }

    fn rotatable_bond_count(&self, mol: &Py<PyAny>) -> Result<u32, EngineError> {
        self.call(&self.descriptors, "NumRotatableBonds", mol)
    }

    fn qed(&self, mol: &Py<PyAny>) -> Result<f64, EngineError> {
        self.call(&self.qed, "qed", mol)
    }

    fn molar_refractivity(&self, mol: &Py<PyAny>) -> Result<f64, EngineError> {
        self.call(&self.crippen, "MolMR", mol)
    }

    fn ring_count(&self, mol: &Py<PyAny>) -> Result<u32, EngineError> {
        self.call(&self.rd_mol_descriptors, "CalcNumRings", mol)
    }

    fn aromatic_ring_count(&self, mol: &Py<PyAny>) -> Result<u32, EngineError> {
        self.call(&self.rd_mol_descriptors, "CalcNumAromaticRings", mol)
    }

    fn formula(&self, mol: &Py<PyAny>) -> Result<String, EngineError> {
        self.call(&self.rd_mol_descriptors, "CalcMolFormula", mol)
    }

    fn atoms(&self, mol: &Py<PyAny>) -> Result<Vec<AtomInfo>, EngineError> {
        Python::attach(|py| -> PyResult<Vec<AtomInfo>> {
            let mut atoms = Vec::new();
            for atom in mol.bind(py).call_method0("GetAtoms")?.try_iter()? {
                let atom = atom?;
                let atomic_number: u8 = atom.call_method0("GetAtomicNum")?.extract()?;
                let hybridization = atom.call_method0("GetHybridization")?.str()?.to_string();
                atoms.push(AtomInfo { atomic_number,
                                      hybridization: Hybridization::from_rdkit_name(&hybridization) });
            }
            Ok(atoms)
        }).map_err(|e| descriptor_error("GetAtoms", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[ignore = "requiere Python con RDKit instalado"]
    fn test_rdkit_ethanol() {
        let toolkit = RdkitToolkit::init().expect("Fallo al inicializar Python/RDKit");
        let mol = toolkit.parse("CCO").unwrap().expect("etanol debe parsear");
        assert!((toolkit.exact_weight(&mol).unwrap() - 46.04).abs() < 0.01);
        assert_eq!(toolkit.h_donor_count(&mol).unwrap(), 1);
        assert_eq!(toolkit.formula(&mol).unwrap(), "C2H6O");
        let atoms = toolkit.atoms(&mol).unwrap();
        assert_eq!(atoms.len(), 3);
        assert!(atoms.iter().all(|a| a.hybridization == Hybridization::Sp3));
    }

    #[test]
    #[ignore = "requiere Python con RDKit instalado"]
    fn test_rdkit_rejects_garbage() {
        let toolkit = RdkitToolkit::init().expect("Fallo al inicializar Python/RDKit");
        assert!(toolkit.parse("not_a_smiles").unwrap().is_none());
    }
}
