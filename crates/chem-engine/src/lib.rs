//! chemengine: puente con el toolkit de estructuras moleculares.
//!
//! - `MolecularToolkit`: contrato que consume el resto del workspace
//!   (parseo de SMILES y descriptores elementales).
//! - `RdkitToolkit` (feature `rdkit`): implementación sobre RDKit embebido
//!   vía pyo3.
//! - `FixtureToolkit`: implementación en memoria con valores precalculados,
//!   usada en tests y en corridas sin Python.
use thiserror::Error;

#[cfg(feature = "rdkit")]
pub mod core;
pub mod fixture;
pub mod toolkit;

#[cfg(feature = "rdkit")]
pub use core::RdkitToolkit;
pub use fixture::{FixtureToolkit, MoleculeFixture};
pub use toolkit::{AtomInfo, Hybridization, MolecularToolkit};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Error inicializando Python/RDKit: {0}")]
    Init(String),
    #[error("Error calculando '{descriptor}': {message}")]
    Descriptor { descriptor: &'static str, message: String },
    #[error("Error leyendo fixtures: {0}")]
    Fixtures(#[from] serde_json::Error),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_error_format() {
        let err = EngineError::Descriptor { descriptor: "TPSA",
                                            message: "boom".into() };
        assert_eq!(err.to_string(), "Error calculando 'TPSA': boom");
    }

    #[test]
    fn test_init_error_format() {
        let err = EngineError::Init("rdkit.Chem no disponible".into());
        assert_eq!(err.to_string(), "Error inicializando Python/RDKit: rdkit.Chem no disponible");
    }
}
