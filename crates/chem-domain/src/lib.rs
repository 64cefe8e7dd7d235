//! chem-domain: núcleo ADME.
//!
//! Descriptores elementales → siete reglas → registro plano de propiedades.
pub mod calculator;
pub mod descriptors;
pub mod error;
pub mod record;
pub mod rules;

pub use calculator::AdmeCalculator;
pub use descriptors::{extract_descriptors, fraction_csp3, DescriptorVector};
pub use error::DomainError;
pub use record::{AdmeOutcome, AdmeProfile, PropertyRecord, PropertyValue, INVALID_SENTINEL, PROPERTY_NAMES, SMILES_KEY};
pub use rules::{evaluate, BbbPermeation, GiAbsorption, RuleEvaluation};
