use chemengine::MolecularToolkit;
use log::debug;

use crate::descriptors::extract_descriptors;
use crate::record::{AdmeOutcome, AdmeProfile, PropertyRecord};
use crate::rules::evaluate;
use crate::DomainError;

/// Calculadora ADME sobre un toolkit de estructuras. No guarda estado entre
/// moléculas: dos llamadas con el mismo SMILES devuelven el mismo resultado.
pub struct AdmeCalculator<T: MolecularToolkit> {
    toolkit: T,
}

impl<T: MolecularToolkit> AdmeCalculator<T> {
    pub fn new(toolkit: T) -> Self {
        Self { toolkit }
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// `Ok(AdmeOutcome::Invalid)` si el SMILES no parsea; `Err` si el toolkit
    /// falla calculando algún descriptor.
    pub fn calculate(&self, smiles: &str) -> Result<AdmeOutcome, DomainError> {
        let Some(mol) = self.toolkit.parse(smiles)? else {
            return Ok(AdmeOutcome::Invalid { smiles: smiles.to_string() });
        };
        let descriptors = extract_descriptors(&self.toolkit, &mol)?;
        let evaluation = evaluate(&descriptors);
        debug!("{} [{}]: {}", smiles, self.toolkit.name(), evaluation);
        Ok(AdmeOutcome::Computed(AdmeProfile { smiles: smiles.to_string(),
                                               descriptors,
                                               evaluation }))
    }

    pub fn calculate_record(&self, smiles: &str) -> Result<PropertyRecord, DomainError> {
        Ok(self.calculate(smiles)?.to_record())
    }
}
