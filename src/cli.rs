use clap::{ArgAction, Parser};
use std::path::PathBuf;

pub const DEFAULT_INPUT: &str = "Moleculas.xlsx";
pub const DEFAULT_OUTPUT: &str = "propiedades_adme.xlsx";

/// Calcula propiedades ADME (Lipinski, Ghose, Veber, Egan, Muegge, absorción
/// GI y permeabilidad BBB) para cada SMILES de una tabla.
#[derive(Parser, Debug)]
#[command(name = "adme", version, about)]
pub struct Cli {
    /// Tabla de entrada (.xlsx, .csv, .tsv o .jsonl)
    #[arg(short, long, env = "ADME_INPUT", default_value = DEFAULT_INPUT, value_name = "PATH")]
    pub input: PathBuf,

    /// Tabla de salida (.xlsx, .csv, .tsv o .jsonl)
    #[arg(short, long, env = "ADME_OUTPUT", default_value = DEFAULT_OUTPUT, value_name = "PATH")]
    pub output: PathBuf,

    /// Columna con los SMILES
    #[arg(short = 'c', long, env = "ADME_SMILES_COLUMN", default_value = "SMILES", value_name = "NOMBRE")]
    pub smiles_column: String,

    /// Cada cuántas filas se reporta progreso
    #[arg(long, env = "ADME_PROGRESS_EVERY", default_value_t = 100, value_name = "N")]
    pub progress_every: usize,

    /// Descriptores precalculados en JSON en lugar de RDKit
    #[arg(long, env = "ADME_FIXTURES", value_name = "PATH")]
    pub fixtures: Option<PathBuf>,

    /// Más detalle en el log (-v DEBUG, -vv TRACE)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Sólo errores
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["adme"]).unwrap();
        assert_eq!(cli.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(cli.output, PathBuf::from(DEFAULT_OUTPUT));
        assert_eq!(cli.smiles_column, "SMILES");
        assert_eq!(cli.progress_every, 100);
        assert!(cli.fixtures.is_none());
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["adme", "-i", "a.tsv", "-o", "b.jsonl", "-c", "smiles", "--progress-every", "10", "-vv"]).unwrap();
        assert_eq!(cli.input, PathBuf::from("a.tsv"));
        assert_eq!(cli.output, PathBuf::from("b.jsonl"));
        assert_eq!(cli.smiles_column, "smiles");
        assert_eq!(cli.progress_every, 10);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["adme", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
