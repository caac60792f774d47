use anyhow::Result;
use chrono::Local;
use std::io::{self, IsTerminal};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{
        FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    registry::LookupSpan,
};

/// Level used when neither `--log-level`, the config file nor `RUST_LOG`
/// says otherwise. Reports go to stdout; only warnings reach stderr.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

// --- Formatter ---

struct LocalFmt;

impl<S, N> FormatEvent<S, N> for LocalFmt
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let ansi = writer.has_ansi_escapes();

        let timestamp = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
        if ansi {
            write!(writer, "\x1b[2m{timestamp}\x1b[0m ")?;
        } else {
            write!(writer, "{timestamp} ")?;
        }

        let colour = match *meta.level() {
            Level::ERROR => "\x1b[1;31m",
            Level::WARN => "\x1b[1;33m",
            Level::INFO => "\x1b[1;32m",
            Level::DEBUG => "\x1b[1;34m",
            Level::TRACE => "\x1b[1;35m",
        };
        if ansi {
            write!(writer, "{colour}{:>5}\x1b[0m ", meta.level())?;
        } else {
            write!(writer, "{:>5} ", meta.level())?;
        }

        // Crate-relative target, e.g. `calc_core::calculations::progressive`.
        write!(writer, "{}: ", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the event filter.
///
/// An explicit `level` (from `--log-level` or the config file) wins over
/// `RUST_LOG`. Accepts a bare level ("warn", "debug") or any full EnvFilter
/// directive such as `"warn,calc_core=debug"`.
pub fn make_filter(level: Option<&str>) -> Result<EnvFilter> {
    match level {
        Some(level) => EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid log level '{level}': {e}")),
        None => Ok(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))),
    }
}

/// Initializes logging to stderr. Call once at startup.
///
/// Colored when stderr is a terminal, plain when redirected.
pub fn init_logging(level: Option<&str>) -> Result<()> {
    let filter = make_filter(level)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(io::stderr().is_terminal())
        .event_format(LocalFmt)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("logging already initialized: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_level_is_accepted() {
        assert!(make_filter(Some("debug")).is_ok());
        assert!(make_filter(Some("warn,calc_core=trace")).is_ok());
    }

    #[test]
    fn garbage_level_is_rejected() {
        let err = make_filter(Some("calc_core=loud")).unwrap_err();

        assert!(err.to_string().contains("invalid log level"), "got: {err}");
    }
}
