use flexi_logger::{DeferredNow, FlexiLoggerError, Logger, LoggerHandle};
use log::Record;

const FALLBACK_NAME: &str = "rss-link-dl";

/// Name this process was invoked as, used to prefix every line of output.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .map(|arg| arg.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}

pub fn log_spec(verbose: bool) -> &'static str {
    if verbose {
        "info"
    } else {
        "warn"
    }
}

fn prefixed_format(
    w: &mut dyn std::io::Write,
    _now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    write!(w, "{}: {}", program_name(), record.args())
}

/// Event log on stdout, one `<prog>: <message>` line per event.
/// Keep the handle alive for the whole run.
pub fn init_log(verbose: bool) -> Result<LoggerHandle, FlexiLoggerError> {
    Logger::try_with_str(log_spec(verbose))?
        .log_to_stdout()
        .format(prefixed_format)
        .start()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spec_follows_verbosity() {
        assert_eq!(log_spec(true), "info");
        assert_eq!(log_spec(false), "warn");
    }

    #[test]
    fn program_name_not_empty() {
        assert!(!program_name().is_empty());
    }
}
