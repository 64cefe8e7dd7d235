//! Contrato del toolkit de estructuras.
//!
//! Todas las operaciones son funciones puras de la estructura parseada. Un
//! `Ok(None)` en `parse` significa que el texto no describe una molécula
//! válida; un `Err` indica un fallo del propio toolkit.
use serde::{Deserialize, Serialize};

use crate::EngineError;

/// Estado de hibridación de un átomo tal como lo reporta el toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Hybridization {
    Unspecified,
    S,
    Sp,
    Sp2,
    Sp3,
    Sp3d,
    Sp3d2,
    Other,
}

impl Hybridization {
    /// Traduce el nombre textual de RDKit (`"SP3"`, `"SP2"`, ...). Nombres no
    /// reconocidos se reportan como `Other`.
    pub fn from_rdkit_name(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "UNSPECIFIED" => Hybridization::Unspecified,
            "S" => Hybridization::S,
            "SP" => Hybridization::Sp,
            "SP2" => Hybridization::Sp2,
            "SP3" => Hybridization::Sp3,
            "SP3D" => Hybridization::Sp3d,
            "SP3D2" => Hybridization::Sp3d2,
            _ => Hybridization::Other,
        }
    }
}

/// Vista mínima de un átomo: número atómico e hibridación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtomInfo {
    pub atomic_number: u8,
    pub hybridization: Hybridization,
}

impl AtomInfo {
    pub const CARBON: u8 = 6;
    pub const HYDROGEN: u8 = 1;

    pub fn is_carbon(&self) -> bool {
        self.atomic_number == Self::CARBON
    }

    /// Cualquier elemento distinto de H y C.
    pub fn is_heteroatom(&self) -> bool {
        self.atomic_number != Self::HYDROGEN && self.atomic_number != Self::CARBON
    }
}

pub trait MolecularToolkit {
    /// Estructura parseada; vive sólo durante el procesamiento de una molécula.
    type Structure;

    fn name(&self) -> &str;
    fn parse(&self, smiles: &str) -> Result<Option<Self::Structure>, EngineError>;

    fn exact_weight(&self, mol: &Self::Structure) -> Result<f64, EngineError>;
    fn logp(&self, mol: &Self::Structure) -> Result<f64, EngineError>;
    fn h_donor_count(&self, mol: &Self::Structure) -> Result<u32, EngineError>;
    fn h_acceptor_count(&self, mol: &Self::Structure) -> Result<u32, EngineError>;
    fn tpsa(&self, mol: &Self::Structure) -> Result<f64, EngineError>;
    fn rotatable_bond_count(&self, mol: &Self::Structure) -> Result<u32, EngineError>;
    fn qed(&self, mol: &Self::Structure) -> Result<f64, EngineError>;
    fn molar_refractivity(&self, mol: &Self::Structure) -> Result<f64, EngineError>;
    fn ring_count(&self, mol: &Self::Structure) -> Result<u32, EngineError>;
    fn aromatic_ring_count(&self, mol: &Self::Structure) -> Result<u32, EngineError>;
    fn formula(&self, mol: &Self::Structure) -> Result<String, EngineError>;
    /// Átomos de la estructura en el orden del toolkit (sin hidrógenos
    /// implícitos).
    fn atoms(&self, mol: &Self::Structure) -> Result<Vec<AtomInfo>, EngineError>;
}
