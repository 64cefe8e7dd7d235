//! chemflow-adme: cálculo por lotes de propiedades ADME.
//!
//! Este crate ensambla los crates del workspace en una aplicación:
//! - `chemengine`: acceso al toolkit químico (RDKit o fixtures JSON).
//! - `chem-domain`: descriptores, reglas de drug-likeness y registro de 19
//!   propiedades.
//! - `chem-adapters`: E/S tabular y driver de lotes.
pub mod cli;
pub mod config;
pub mod errors;
pub mod logging;

pub use cli::Cli;
pub use config::AppConfig;
pub use errors::core_error::CoreError;

use chem_adapters::{BatchSession, BatchSummary};
use chem_domain::AdmeCalculator;
use chemengine::{FixtureToolkit, MolecularToolkit};
use log::info;

/// Ejecuta una corrida completa eligiendo el toolkit según la configuración.
pub fn run(config: &AppConfig) -> Result<BatchSummary, CoreError> {
    match &config.fixtures {
        Some(path) => {
            let toolkit = FixtureToolkit::from_path(path)?;
            info!("Usando {} moléculas precalculadas de {}", toolkit.len(), path.display());
            run_with(toolkit, config)
        }
        None => run_with_default_toolkit(config),
    }
}

#[cfg(feature = "rdkit")]
fn run_with_default_toolkit(config: &AppConfig) -> Result<BatchSummary, CoreError> {
    let toolkit = chemengine::RdkitToolkit::init()?;
    run_with(toolkit, config)
}

#[cfg(not(feature = "rdkit"))]
fn run_with_default_toolkit(_config: &AppConfig) -> Result<BatchSummary, CoreError> {
    Err(CoreError::Config("compilado sin la feature `rdkit`: indique --fixtures".into()))
}

/// Ejecuta la corrida con un toolkit ya construido.
pub fn run_with<T: MolecularToolkit>(toolkit: T, config: &AppConfig) -> Result<BatchSummary, CoreError> {
    info!("Toolkit: {}", toolkit.name());
    let calculator = AdmeCalculator::new(toolkit);
    let mut session = BatchSession::new(&calculator, config.batch.clone());
    Ok(session.run(&config.input, &config.output)?)
}
