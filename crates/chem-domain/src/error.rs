use chemengine::EngineError;
use thiserror::Error;

/// Errores del cálculo de propiedades de una molécula. Ninguno es fatal para
/// un lote: el driver los registra y descarta la molécula.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Error externo: {0}")]
    Engine(#[from] EngineError),

    #[error("Descriptor no finito '{descriptor}': {value}")]
    NonFiniteDescriptor { descriptor: &'static str, value: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_variant_from() {
        let err: DomainError = EngineError::Init("sin rdkit".into()).into();
        assert_eq!(err.to_string(), "Error externo: Error inicializando Python/RDKit: sin rdkit");
    }

    #[test]
    fn test_non_finite_variant_format() {
        let err = DomainError::NonFiniteDescriptor { descriptor: "LogP",
                                                     value: f64::NAN };
        assert_eq!(err.to_string(), "Descriptor no finito 'LogP': NaN");
    }
}
