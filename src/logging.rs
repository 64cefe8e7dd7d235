use tracing_subscriber::EnvFilter;

use crate::CoreError;

/// Instala el subscriber global. Los crates del workspace registran con
/// `log`; el puente de `tracing-subscriber` los reenvía. `RUST_LOG`, si
/// está definido, tiene prioridad sobre `-v`/`-q`.
pub fn setup_logging(verbosity: u8, quiet: bool) -> Result<(), CoreError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)));
    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .with_target(false)
                             .try_init()
                             .map_err(|e| CoreError::Logging(e.to_string()))
}

fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_for() {
        assert_eq!(level_for(0, false), "info");
        assert_eq!(level_for(1, false), "debug");
        assert_eq!(level_for(5, false), "trace");
        assert_eq!(level_for(3, true), "error");
    }
}
