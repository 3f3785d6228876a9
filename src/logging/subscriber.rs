//! `tracing` subscriber: the console formatter and the persistent log file.
use std::fs::{self, File};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Target marking a task's stage header.
pub(super) const STAGE_TARGET: &str = "rpl_sync::stage";
/// Target marking a change a dry run would have made.
pub(super) const DRY_RUN_TARGET: &str = "rpl_sync::dry_run";

/// How an event is rendered, from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    fn of(event: &Event<'_>) -> Self {
        let metadata = event.metadata();
        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    /// Prefix written before the message in the log file.
    const fn file_tag(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::DryRun => "    [dry run] ",
            Self::Error => "    [error] ",
            Self::Warn => "    [warn] ",
            Self::Info => "    ",
            Self::Debug => "    [debug] ",
        }
    }
}

/// Collects the `message` field of an event.
#[derive(Debug, Default)]
struct Message(String);

impl Visit for Message {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0 = format!("{value:?}");
        }
    }
}

fn message(event: &Event<'_>) -> String {
    let mut message = Message::default();
    event.record(&mut message);
    message.0
}

/// Remove SGR colour sequences (`ESC [ ... m`), the only escapes the
/// console formatter and summary emit.
fn strip_sgr(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some((before, escape)) = rest.split_once("\x1b[") {
        out.push_str(before);
        rest = escape.split_once('m').map_or("", |(_, after)| after);
    }
    out.push_str(rest);
    out
}

/// `$XDG_CACHE_HOME/rpl-arduino-sync/sync.log`, falling back to
/// `~/.cache`.  The directory is created on demand.
pub(super) fn log_file_path() -> Option<PathBuf> {
    let cache = std::env::var_os("XDG_CACHE_HOME")
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME")
                .or_else(|| std::env::var_os("USERPROFILE"))
                .map(|home| PathBuf::from(home).join(".cache"))
        })?;
    let dir = cache.join("rpl-arduino-sync");
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join("sync.log"))
}

/// Layer writing every event to the sync log, timestamped and uncoloured.
///
/// The file is truncated at startup so it always holds the latest run.
#[derive(Debug)]
struct FileLayer {
    file: Mutex<File>,
}

impl FileLayer {
    fn create(path: &Path) -> Option<Self> {
        let version = option_env!("RPL_SYNC_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
        let mut file = File::create(path).ok()?;
        writeln!(
            file,
            "# rpl-arduino-sync {version}: package sync started {} UTC",
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S")
        )
        .ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: Subscriber> Layer<S> for FileLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let line = format!(
            "[{}] {}{}",
            chrono::Utc::now().format("%H:%M:%S"),
            Kind::of(event).file_tag(),
            strip_sgr(&message(event))
        );
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

/// Console formatter: bold `==>` task headers, indented progress, and
/// coloured warnings and errors.
#[derive(Debug)]
struct SyncFormatter;

impl<S, N> FormatEvent<S, N> for SyncFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let msg = message(event);
        match Kind::of(event) {
            Kind::Stage => writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Kind::DryRun => writeln!(writer, "  \x1b[33m[dry run]\x1b[0m {msg}"),
            Kind::Error => writeln!(writer, "\x1b[31merror:\x1b[0m {msg}"),
            Kind::Warn => writeln!(writer, "\x1b[33mwarning:\x1b[0m {msg}"),
            Kind::Info => writeln!(writer, "  {msg}"),
            Kind::Debug => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Install the global subscriber.
///
/// The console shows `info` and above (`debug` too when `verbose`), with
/// warnings and errors on stderr.  The sync log records everything from
/// `debug` up.  Call once, before anything is logged.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::layer::SubscriberExt as _;
    use tracing_subscriber::util::SubscriberInitExt as _;

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let console_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));
    let console = tracing_subscriber::fmt::layer()
        .event_format(SyncFormatter)
        .with_writer(console_writer)
        .with_filter(console_level);

    let file = log_file_path()
        .and_then(|path| FileLayer::create(&path))
        .map(|layer| layer.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .init();
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use tracing_subscriber::layer::SubscriberExt as _;

    #[test]
    fn strip_sgr_removes_colours() {
        assert_eq!(strip_sgr("\x1b[31merror:\x1b[0m bad"), "error: bad");
        assert_eq!(
            strip_sgr("\x1b[1;34m==>\x1b[0m \x1b[1mSync dependencies\x1b[0m"),
            "==> Sync dependencies"
        );
        assert_eq!(strip_sgr("plain"), "plain");
    }

    #[test]
    fn strip_sgr_drops_unterminated_sequence() {
        assert_eq!(strip_sgr("done\x1b[3"), "done");
    }

    #[test]
    fn file_layer_tags_each_kind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sync.log");
        let layer = FileLayer::create(&path).unwrap();
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: STAGE_TARGET, "Sync dependencies");
            tracing::info!(target: DRY_RUN_TARGET, "would fetch frozen");
            tracing::warn!("\x1b[33mfrozen: no sha256 pinned\x1b[0m");
            tracing::debug!("downloaded 1024 bytes");
        });

        let log = fs::read_to_string(&path).unwrap();
        let mut lines = log.lines();
        assert!(
            lines
                .next()
                .unwrap()
                .starts_with("# rpl-arduino-sync ")
        );
        let body: Vec<&str> = lines.map(|l| l.split_once("] ").unwrap().1).collect();
        assert_eq!(
            body,
            [
                "==> Sync dependencies",
                "    [dry run] would fetch frozen",
                "    [warn] frozen: no sha256 pinned",
                "    [debug] downloaded 1024 bytes",
            ]
        );
    }
}
