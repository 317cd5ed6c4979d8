use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use time::{OffsetDateTime, UtcOffset};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    fmt::{format, FmtContext, FormatEvent, FormatFields},
    registry::LookupSpan,
    FmtSubscriber,
};

/// Initialize the logging system.
///
/// Logs go to stderr, leaving stdout to the transcripts.
/// Must be called before any thread is spawned for the local time offset to be known.
pub fn init_logging(level: Level) -> Result<()> {
    // Fails when other threads are already running, fall back to UTC then
    let local_offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);

    let subscriber = FmtSubscriber::builder()
        .event_format(LineFormatter::new(local_offset))
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .into_diagnostic()
        .wrap_err("Setting default subscriber failed")
}

/// One line per event: `<local time> <level> <thread> <fields>`.
///
/// The thread name identifies the video being processed by batch workers.
struct LineFormatter {
    offset: UtcOffset,
}

impl LineFormatter {
    fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }
}

impl<S, N> FormatEvent<S, N> for LineFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let level = *event.metadata().level();

        let now = OffsetDateTime::now_utc().to_offset(self.offset).time();
        let clock = format!(
            "{:02}:{:02}:{:02}",
            now.hour(),
            now.minute(),
            now.second()
        );

        let thread = std::thread::current();
        let thread_name = thread.name().unwrap_or("worker");

        if writer.has_ansi_escapes() {
            let level = match level {
                Level::ERROR => level.red().to_string(),
                Level::WARN => level.yellow().to_string(),
                Level::DEBUG | Level::TRACE => level.blue().to_string(),
                _ => level.green().to_string(),
            };

            write!(
                &mut writer,
                "{} {:>5} {} ",
                clock.dimmed(),
                level,
                thread_name.yellow(),
            )?;
        } else {
            write!(&mut writer, "{clock} {level:>5} {thread_name} ")?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
