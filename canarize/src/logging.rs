//! Progress output.
//!
//! Every event is rendered as one or more `# ` prefixed lines so progress written to stdout stays a
//! valid YAML comment next to the manifests.

use std::fmt::{self, Write as _};

use anyhow::anyhow;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter,
    fmt::{FmtContext, FormatEvent, FormatFields, format},
    registry::LookupSpan,
};

/// Formats events as YAML comments, prefixing anything that is not `INFO` with its level.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommentFormat;

impl<S, N> FormatEvent<S, N> for CommentFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut message = String::new();
        let level = *event.metadata().level();
        if level != Level::INFO {
            write!(message, "{level}: ")?;
        }
        ctx.field_format()
            .format_fields(format::Writer::new(&mut message), event)?;

        for line in message.lines() {
            writeln!(writer, "# {line}")?;
        }

        Ok(())
    }
}

/// Installs the global subscriber writing to stdout. `RUST_LOG` takes precedence over `debug`.
pub fn init(debug: bool) -> anyhow::Result<()> {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|err| anyhow!("failed to configure log level: {err}"))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .event_format(CommentFormat)
        .try_init()
        .map_err(|err| anyhow!("failed to initialize logging: {err}"))
}
