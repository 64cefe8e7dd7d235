//! Lectura y escritura de tablas planas.
//!
//! El formato se deduce de la extensión: `.xlsx`, `.csv`, `.tsv`/`.tab` o
//! `.jsonl`/`.ndjson`. Las celdas de entrada delimitadas se conservan como
//! texto tal cual llegan; la salida se arma completa en memoria y se escribe
//! de una vez.
use calamine::{open_workbook_auto, Data, Reader};
use chem_domain::PropertyValue;
use indexmap::IndexMap;
use rust_xlsxwriter::{Workbook, XlsxError};
use serde_json::Value;
use std::path::Path;

use crate::AdapterError;

pub type Row = IndexMap<String, PropertyValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableFormat {
    Xlsx,
    Csv,
    Tsv,
    JsonLines,
}

impl TableFormat {
    pub fn from_path(path: &Path) -> Result<Self, AdapterError> {
        let ext = path.extension()
                      .and_then(|e| e.to_str())
                      .map(str::to_ascii_lowercase)
                      .unwrap_or_default();
        match ext.as_str() {
            "xlsx" => Ok(TableFormat::Xlsx),
            "csv" => Ok(TableFormat::Csv),
            "tsv" | "tab" => Ok(TableFormat::Tsv),
            "jsonl" | "ndjson" => Ok(TableFormat::JsonLines),
            _ => Err(AdapterError::UnsupportedFormat(path.to_path_buf())),
        }
    }

    fn delimiter(self) -> u8 {
        match self {
            TableFormat::Tsv => b'\t',
            _ => b',',
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub fn read_table(path: &Path) -> Result<Table, AdapterError> {
    if !path.exists() {
        return Err(AdapterError::InputNotFound(path.to_path_buf()));
    }
    match TableFormat::from_path(path)? {
        TableFormat::Xlsx => read_xlsx(path),
        TableFormat::JsonLines => read_json_lines(path),
        format => read_delimited(path, format.delimiter()),
    }
}

/// Primera hoja del libro; la primera fila es el encabezado.
fn read_xlsx(path: &Path) -> Result<Table, AdapterError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook.worksheet_range_at(0)
                        .ok_or_else(|| AdapterError::EmptyWorkbook(path.to_path_buf()))??;
    let mut cells = range.rows();
    let Some(header) = cells.next() else {
        return Ok(Table::default());
    };
    let columns: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();
    let mut rows = Vec::new();
    for line in cells {
        let row: Row = columns.iter()
                              .enumerate()
                              .map(|(i, c)| (c.clone(), line.get(i).map(cell_to_value).unwrap_or_else(|| PropertyValue::from(""))))
                              .collect();
        rows.push(row);
    }
    Ok(Table { columns, rows })
}

fn cell_to_value(cell: &Data) -> PropertyValue {
    match cell {
        Data::Empty => PropertyValue::from(""),
        Data::String(s) if s.trim().is_empty() => PropertyValue::from(""),
        Data::String(s) => PropertyValue::Text(s.clone()),
        Data::Int(i) => PropertyValue::Integer(*i),
        // Excel guarda todo número como f64
        Data::Float(x) if x.fract() == 0.0 && x.abs() < 9.0e15 => PropertyValue::Integer(*x as i64),
        Data::Float(x) => PropertyValue::Float(*x),
        other => PropertyValue::Text(other.to_string()),
    }
}

fn read_delimited(path: &Path, delimiter: u8) -> Result<Table, AdapterError> {
    let mut reader = csv::ReaderBuilder::new().delimiter(delimiter)
                                              .flexible(true)
                                              .from_path(path)?;
    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        // celdas faltantes en filas cortas quedan vacías
        let row: Row = columns.iter()
                              .enumerate()
                              .map(|(i, c)| (c.clone(), PropertyValue::from(record.get(i).unwrap_or(""))))
                              .collect();
        rows.push(row);
    }
    Ok(Table { columns, rows })
}

fn read_json_lines(path: &Path) -> Result<Table, AdapterError> {
    let content = std::fs::read_to_string(path)?;
    let mut table = Table::default();
    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let object: serde_json::Map<String, Value> =
            serde_json::from_str(line).map_err(|source| AdapterError::JsonLine { line: i + 1, source })?;
        let row: Row = object.into_iter().map(|(k, v)| (k, json_to_value(v))).collect();
        for key in row.keys() {
            if !table.has_column(key) {
                table.columns.push(key.clone());
            }
        }
        table.rows.push(row);
    }
    Ok(table)
}

fn json_to_value(value: Value) -> PropertyValue {
    match value {
        Value::Null => PropertyValue::from(""),
        Value::String(s) => PropertyValue::Text(s),
        Value::Number(n) => match n.as_i64() {
            Some(i) => PropertyValue::Integer(i),
            None => PropertyValue::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        other => PropertyValue::Text(other.to_string()),
    }
}

/// Escribe `rows` con las columnas dadas (en ese orden). Celdas ausentes se
/// escriben vacías en formatos delimitados y se omiten en JSON Lines.
pub fn write_table(path: &Path, columns: &[String], rows: &[Row]) -> Result<(), AdapterError> {
    let bytes = match TableFormat::from_path(path)? {
        TableFormat::Xlsx => render_xlsx(columns, rows)?,
        TableFormat::JsonLines => render_json_lines(rows)?,
        format => render_delimited(columns, rows, format.delimiter())?,
    };
    std::fs::write(path, bytes)?;
    Ok(())
}

fn render_delimited(columns: &[String], rows: &[Row], delimiter: u8) -> Result<Vec<u8>, AdapterError> {
    let mut writer = csv::WriterBuilder::new().delimiter(delimiter).from_writer(Vec::new());
    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(columns.iter()
                                   .map(|c| row.get(c).map(|v| v.to_string()).unwrap_or_default()))?;
    }
    writer.into_inner().map_err(|e| AdapterError::Io(e.into_error()))
}

fn render_xlsx(columns: &[String], rows: &[Row]) -> Result<Vec<u8>, AdapterError> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (c, name) in columns.iter().enumerate() {
        sheet.write_string(0, column_index(c)?, name)?;
    }
    for (r, row) in rows.iter().enumerate() {
        let r = u32::try_from(r + 1).map_err(|_| XlsxError::RowColumnLimitError)?;
        for (c, name) in columns.iter().enumerate() {
            let c = column_index(c)?;
            match row.get(name) {
                Some(PropertyValue::Text(s)) if !s.is_empty() => {
                    sheet.write_string(r, c, s)?;
                }
                Some(PropertyValue::Integer(i)) => {
                    sheet.write_number(r, c, *i as f64)?;
                }
                Some(PropertyValue::Float(x)) => {
                    sheet.write_number(r, c, *x)?;
                }
                _ => {}
            }
        }
    }
    Ok(workbook.save_to_buffer()?)
}

fn column_index(c: usize) -> Result<u16, XlsxError> {
    u16::try_from(c).map_err(|_| XlsxError::RowColumnLimitError)
}

fn render_json_lines(rows: &[Row]) -> Result<Vec<u8>, AdapterError> {
    let mut out = Vec::new();
    for row in rows {
        serde_json::to_writer(&mut out, row)?;
        out.push(b'\n');
    }
    Ok(out)
}
