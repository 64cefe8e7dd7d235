use std::path::PathBuf;
use thiserror::Error;

/// Errores de preparación y E/S de un lote. Todos son fatales: el lote se
/// aborta sin escribir salida.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("Archivo de entrada no encontrado: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Columna '{0}' no encontrada en el archivo de entrada")]
    MissingColumn(String),

    #[error("Formato de archivo no soportado: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("El libro no contiene hojas: {}", .0.display())]
    EmptyWorkbook(PathBuf),

    #[error("Error leyendo hoja de cálculo: {0}")]
    XlsxRead(#[from] calamine::Error),

    #[error("Error escribiendo hoja de cálculo: {0}")]
    XlsxWrite(#[from] rust_xlsxwriter::XlsxError),

    #[error("Error en CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON inválido en la línea {line}: {source}")]
    JsonLine {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error de serialización: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
}
