//! Driver de lotes.
//!
//! Una `BatchSession` procesa una tabla fila a fila, combina cada fila de
//! entrada con su registro de propiedades y lleva los contadores del lote.
//! Los fallos por molécula se registran y no interrumpen el lote; los fallos
//! de preparación (archivo o columna inexistente) abortan sin escribir salida.
use chem_domain::{AdmeCalculator, AdmeOutcome, PROPERTY_NAMES, SMILES_KEY};
use chemengine::MolecularToolkit;
use log::{error, info, warn};
use std::path::{Path, PathBuf};

use crate::table::{read_table, write_table, Row, Table, TableFormat};
use crate::AdapterError;

pub const DEFAULT_SMILES_COLUMN: &str = "SMILES";
pub const DEFAULT_PROGRESS_EVERY: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchCounters {
    /// Moléculas con propiedades calculadas.
    pub processed: usize,
    /// SMILES que el toolkit no pudo parsear.
    pub invalid: usize,
    /// Moléculas descartadas por un error inesperado al calcular.
    pub failed: usize,
    /// Filas sin identificador.
    pub skipped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOptions {
    pub smiles_column: String,
    pub progress_every: usize,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self { smiles_column: DEFAULT_SMILES_COLUMN.to_string(),
               progress_every: DEFAULT_PROGRESS_EVERY }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub counters: BatchCounters,
    pub rows_written: usize,
    pub output: PathBuf,
}

pub struct BatchSession<'a, T: MolecularToolkit> {
    calculator: &'a AdmeCalculator<T>,
    options: BatchOptions,
    counters: BatchCounters,
}

impl<'a, T: MolecularToolkit> BatchSession<'a, T> {
    pub fn new(calculator: &'a AdmeCalculator<T>, options: BatchOptions) -> Self {
        Self { calculator,
               options,
               counters: BatchCounters::default() }
    }

    pub fn counters(&self) -> BatchCounters {
        self.counters
    }

    pub fn options(&self) -> &BatchOptions {
        &self.options
    }

    /// Devuelve la fila de entrada combinada con sus propiedades (las
    /// propiedades ganan en colisión de claves), o `None` si la fila no
    /// tiene SMILES o falló el cálculo.
    pub fn process_row(&mut self, row: &Row) -> Option<Row> {
        let smiles = match row.get(&self.options.smiles_column) {
            Some(value) => value.to_string(),
            None => String::new(),
        };
        if smiles.trim().is_empty() {
            self.counters.skipped += 1;
            return None;
        }
        match self.calculator.calculate(&smiles) {
            Ok(outcome) => {
                if let AdmeOutcome::Invalid { .. } = outcome {
                    self.counters.invalid += 1;
                    warn!("SMILES inválido: {}", smiles);
                } else {
                    self.counters.processed += 1;
                }
                let mut merged = row.clone();
                merged.extend(outcome.to_record().into_row());
                Some(merged)
            }
            Err(e) => {
                self.counters.failed += 1;
                error!("Error al procesar SMILES {}: {}", smiles, e);
                None
            }
        }
    }

    pub fn process_table(&mut self, table: &Table) -> Vec<Row> {
        let total = table.len();
        let every = self.options.progress_every.max(1);
        let mut results = Vec::with_capacity(total);
        for (idx, row) in table.rows.iter().enumerate() {
            if idx % every == 0 {
                info!("Procesando molécula {}/{}", idx + 1, total);
            }
            if let Some(merged) = self.process_row(row) {
                results.push(merged);
            }
        }
        results
    }

    /// Procesa `input` completo y escribe `output`.
    pub fn run(&mut self, input: &Path, output: &Path) -> Result<BatchSummary, AdapterError> {
        self.run_inner(input, output).inspect_err(|e| error!("Error al procesar el archivo: {}", e))
    }

    fn run_inner(&mut self, input: &Path, output: &Path) -> Result<BatchSummary, AdapterError> {
        // formato de salida validado antes de calcular nada
        TableFormat::from_path(output)?;
        let table = read_table(input)?;
        if !table.has_column(&self.options.smiles_column) {
            return Err(AdapterError::MissingColumn(self.options.smiles_column.clone()));
        }
        let rows = self.process_table(&table);
        write_table(output, &output_columns(&table.columns), &rows)?;

        let counters = self.counters;
        info!("Procesamiento completado:");
        info!("- Total de moléculas procesadas: {}", counters.processed);
        info!("- SMILES inválidos encontrados: {}", counters.invalid);
        if counters.failed > 0 {
            info!("- Moléculas descartadas por error: {}", counters.failed);
        }
        if counters.skipped > 0 {
            info!("- Filas sin SMILES omitidas: {}", counters.skipped);
        }
        info!("- Resultados guardados en: {}", output.display());
        Ok(BatchSummary { counters,
                          rows_written: rows.len(),
                          output: output.to_path_buf() })
    }
}

/// Columnas originales primero; luego `SMILES` y las 19 propiedades que no
/// estuvieran ya presentes.
pub fn output_columns(input_columns: &[String]) -> Vec<String> {
    let mut columns = input_columns.to_vec();
    for key in std::iter::once(SMILES_KEY).chain(PROPERTY_NAMES) {
        if !columns.iter().any(|c| c == key) {
            columns.push(key.to_string());
        }
    }
    columns
}
