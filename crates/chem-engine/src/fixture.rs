//! Toolkit en memoria con descriptores precalculados.
//!
//! Cada `MoleculeFixture` guarda los valores que RDKit reporta para un SMILES
//! concreto. Un SMILES ausente del mapa se trata como estructura inválida, y
//! un fixture con `failure` simula un fallo del toolkit al calcular
//! descriptores.
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

use crate::toolkit::{AtomInfo, MolecularToolkit};
use crate::EngineError;

const REFERENCE_FIXTURES: &str = include_str!("../fixtures/reference.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoleculeFixture {
    pub smiles: String,
    pub exact_weight: f64,
    pub logp: f64,
    pub h_donors: u32,
    pub h_acceptors: u32,
    pub tpsa: f64,
    pub rotatable_bonds: u32,
    pub qed: f64,
    pub molar_refractivity: f64,
    pub rings: u32,
    pub aromatic_rings: u32,
    pub formula: String,
    pub atoms: Vec<AtomInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct FixtureToolkit {
    molecules: HashMap<String, MoleculeFixture>,
}

impl FixtureToolkit {
    pub fn new(fixtures: impl IntoIterator<Item = MoleculeFixture>) -> Self {
        Self { molecules: fixtures.into_iter().map(|f| (f.smiles.clone(), f)).collect() }
    }

    /// Conjunto de referencia embebido: etanol, aspirina, cafeína y un
    /// alcano lineal C46.
    pub fn reference() -> Result<Self, EngineError> {
        Self::from_json_str(REFERENCE_FIXTURES)
    }

    /// Espera un arreglo JSON de fixtures.
    pub fn from_json_str(json: &str) -> Result<Self, EngineError> {
        let fixtures: Vec<MoleculeFixture> = serde_json::from_str(json)?;
        Ok(Self::new(fixtures))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn insert(&mut self, fixture: MoleculeFixture) {
        self.molecules.insert(fixture.smiles.clone(), fixture);
    }

    pub fn get(&self, smiles: &str) -> Option<&MoleculeFixture> {
        self.molecules.get(smiles)
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }

    fn checked<'a>(&self, mol: &'a MoleculeFixture, descriptor: &'static str) -> Result<&'a MoleculeFixture, EngineError> {
        match &mol.failure {
            Some(message) => Err(EngineError::Descriptor { descriptor,
                                                           message: message.clone() }),
            None => Ok(mol),
        }
    }
}

impl MolecularToolkit for FixtureToolkit {
    type Structure = MoleculeFixture;

    fn name(&self) -> &str {
        "fixtures"
    }

    fn parse(&self, smiles: &str) -> Result<Option<MoleculeFixture>, EngineError> {
        Ok(self.molecules.get(smiles).cloned())
    }

    fn exact_weight(&self, mol: &MoleculeFixture) -> Result<f64, EngineError> {
        Ok(self.checked(mol, "ExactMolWt")?.exact_weight)
    }

    fn logp(&self, mol: &MoleculeFixture) -> Result<f64, EngineError> {
        Ok(self.checked(mol, "MolLogP")?.logp)
    }

    fn h_donor_count(&self, mol: &MoleculeFixture) -> Result<u32, EngineError> {
        Ok(self.checked(mol, "NumHDonors")?.h_donors)
    }

    fn h_acceptor_count(&self, mol: &MoleculeFixture) -> Result<u32, EngineError> {
        Ok(self.checked(mol, "NumHAcceptors")?.h_acceptors)
    }

    fn tpsa(&self, mol: &MoleculeFixture) -> Result<f64, EngineError> {
        Ok(self.checked(mol, "TPSA")?.tpsa)
    }

    fn rotatable_bond_count(&self, mol: &MoleculeFixture) -> Result<u32, EngineError> {
        Ok(self.checked(mol, "NumRotatableBonds")?.rotatable_bonds)
    }

    fn qed(&self, mol: &MoleculeFixture) -> Result<f64, EngineError> {
        Ok(self.checked(mol, "qed")?.qed)
    }

    fn molar_refractivity(&self, mol: &MoleculeFixture) -> Result<f64, EngineError> {
        Ok(self.checked(mol, "MolMR")?.molar_refractivity)
    }

    fn ring_count(&self, mol: &MoleculeFixture) -> Result<u32, EngineError> {
        Ok(self.checked(mol, "CalcNumRings")?.rings)
    }

    fn aromatic_ring_count(&self, mol: &MoleculeFixture) -> Result<u32, EngineError> {
        Ok(self.checked(mol, "CalcNumAromaticRings")?.aromatic_rings)
    }

    fn formula(&self, mol: &MoleculeFixture) -> Result<String, EngineError> {
        Ok(self.checked(mol, "CalcMolFormula")?.formula.clone())
    }

    fn atoms(&self, mol: &MoleculeFixture) -> Result<Vec<AtomInfo>, EngineError> {
        Ok(self.checked(mol, "GetAtoms")?.atoms.clone())
    }
}
