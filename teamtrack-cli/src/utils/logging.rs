use flexi_logger::{FlexiLoggerError, Logger, LoggerHandle};

/// Start logging to stderr. Only warnings show unless `verbose` is set.
///
/// The returned handle must stay alive for the rest of the process.
pub fn init(verbose: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(level_spec(verbose))?
        .format(flexi_logger::default_format)
        .start()
}

fn level_spec(verbose: bool) -> &'static str {
    if verbose {
        "warn, teamtrack=debug, teamtrack_core=debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_only_our_crates() {
        assert_eq!(level_spec(false), "warn");
        assert!(level_spec(true).contains("teamtrack_core=debug"));
        assert!(level_spec(true).starts_with("warn"));
    }
}
