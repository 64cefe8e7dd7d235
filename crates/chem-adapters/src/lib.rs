//! chem-adapters: E/S tabular y driver de lotes ADME.
//!
//! - `table`: lectura/escritura de CSV, TSV y JSON Lines.
//! - `batch`: `BatchSession`, que recorre una tabla, invoca la calculadora de
//!   `chem-domain` por fila y acumula las filas combinadas y los contadores.
pub mod batch;
pub mod error;
pub mod table;

pub use batch::{output_columns, BatchCounters, BatchOptions, BatchSession, BatchSummary};
pub use error::AdapterError;
pub use table::{read_table, write_table, Row, Table, TableFormat};
