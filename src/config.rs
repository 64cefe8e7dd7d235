//! Configuración de una corrida.
//! Se arma a partir de la CLI (que a su vez toma valores por defecto de las
//! variables `ADME_*` y de un `.env` si existe) y se valida antes de tocar
//! archivos.
use chem_adapters::BatchOptions;
use std::path::{Component, Path, PathBuf};

use crate::cli::Cli;
use crate::CoreError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub batch: BatchOptions,
    /// Si está presente se usa `FixtureToolkit` en lugar de RDKit.
    pub fixtures: Option<PathBuf>,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, CoreError> {
        if cli.progress_every == 0 {
            return Err(CoreError::Config("progress-every debe ser mayor que 0".into()));
        }
        if cli.smiles_column.trim().is_empty() {
            return Err(CoreError::Config("el nombre de la columna SMILES no puede estar vacío".into()));
        }
        if normalized(&cli.input) == normalized(&cli.output) {
            return Err(CoreError::Config(format!("la salida sobrescribiría la entrada: {}", cli.input.display())));
        }
        Ok(Self { input: cli.input,
                  output: cli.output,
                  batch: BatchOptions { smiles_column: cli.smiles_column,
                                        progress_every: cli.progress_every },
                  fixtures: cli.fixtures })
    }
}

/// Ruta absoluta sin componentes `.`/`..`; resuelve enlaces si el archivo
/// existe.
fn normalized(path: &Path) -> PathBuf {
    if let Ok(real) = path.canonicalize() {
        return real;
    }
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_cli_defaults() {
        let config = AppConfig::from_cli(Cli::try_parse_from(["adme"]).unwrap()).unwrap();
        assert_eq!(config.batch, BatchOptions::default());
        assert_eq!(config.input, PathBuf::from("Moleculas.xlsx"));
    }

    #[test]
    fn test_zero_progress_is_rejected() {
        let cli = Cli::try_parse_from(["adme", "--progress-every", "0"]).unwrap();
        assert!(matches!(AppConfig::from_cli(cli), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_same_input_and_output_is_rejected() {
        let cli = Cli::try_parse_from(["adme", "-i", "x.csv", "-o", "x.csv"]).unwrap();
        assert!(matches!(AppConfig::from_cli(cli), Err(CoreError::Config(_))));
    }

    #[test]
    fn test_blank_column_is_rejected() {
        let cli = Cli::try_parse_from(["adme", "-c", " "]).unwrap();
        assert!(AppConfig::from_cli(cli).is_err());
    }

    #[test]
    fn test_equivalent_paths_are_rejected() {
        for (input, output) in [("./x.csv", "x.csv"), ("datos/../x.csv", "x.csv"), ("x.csv", "./datos/./../x.csv")] {
            let cli = Cli::try_parse_from(["adme", "-i", input, "-o", output]).unwrap();
            assert!(matches!(AppConfig::from_cli(cli), Err(CoreError::Config(_))), "{input} vs {output}");
        }
    }

    #[test]
    fn test_distinct_paths_are_accepted() {
        let cli = Cli::try_parse_from(["adme", "-i", "./x.csv", "-o", "x.xlsx"]).unwrap();
        assert!(AppConfig::from_cli(cli).is_ok());
    }
}
