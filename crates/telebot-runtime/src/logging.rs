//! Logging setup built on `tracing-subscriber`.
//!
//! Most bots call [`init_from_config`] with the `logging` section of their
//! configuration:
//!
//! ```rust,ignore
//! let config = telebot_runtime::config::load_config()?;
//! telebot_runtime::logging::init_from_config(&config.logging);
//! ```
//!
//! [`LoggingBuilder`] covers the same settings in code:
//!
//! ```rust,ignore
//! LoggingBuilder::new()
//!     .directive("telebot_core=trace")
//!     .span_events(SpanEvents::LIFECYCLE)
//!     .init();
//! ```
//!
//! `RUST_LOG`, when set, replaces the base level. Directives always apply
//! on top of it.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use tracing::{Level, warn};
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::Registry;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Layer, fmt};

use crate::config::{LogFormat, LogOutput, LogRotation, LoggingConfig, SpanEventConfig};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Which span lifecycle events become log lines.
///
/// Every API call runs in its own span, so `LIFECYCLE` reports how long
/// each call took when its span closes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpanEvents {
    pub new: bool,
    pub enter: bool,
    pub exit: bool,
    pub close: bool,
}

impl SpanEvents {
    pub const NONE: Self = Self::with(false, false);
    /// Span creation and close.
    pub const LIFECYCLE: Self = Self::with(true, false);
    pub const FULL: Self = Self::with(true, true);

    const fn with(edges: bool, activity: bool) -> Self {
        Self {
            new: edges,
            enter: activity,
            exit: activity,
            close: edges,
        }
    }

    fn fmt_span(self) -> FmtSpan {
        [
            (self.new, FmtSpan::NEW),
            (self.enter, FmtSpan::ENTER),
            (self.exit, FmtSpan::EXIT),
            (self.close, FmtSpan::CLOSE),
        ]
        .into_iter()
        .filter(|(on, _)| *on)
        .fold(FmtSpan::NONE, |acc, (_, event)| acc | event)
    }
}

impl From<&SpanEventConfig> for SpanEvents {
    fn from(config: &SpanEventConfig) -> Self {
        Self {
            new: config.new,
            enter: config.enter,
            exit: config.exit,
            close: config.close,
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// A subscriber installed earlier wins; this call then does nothing.
pub fn init_from_config(config: &LoggingConfig) {
    LoggingBuilder::from_config(config).init();
}

/// Builds and installs the global `tracing` subscriber.
#[derive(Debug)]
pub struct LoggingBuilder {
    level: Level,
    directives: Vec<String>,
    span_events: SpanEvents,
    format: LogFormat,
    output: LogOutput,
    file: Option<PathBuf>,
    rotation: LogRotation,
    target: bool,
    thread_ids: bool,
    location: bool,
}

impl Default for LoggingBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingBuilder {
    /// Info level, compact lines on stdout, with targets.
    pub fn new() -> Self {
        Self {
            level: Level::INFO,
            directives: Vec::new(),
            span_events: SpanEvents::NONE,
            format: LogFormat::default(),
            output: LogOutput::default(),
            file: None,
            rotation: LogRotation::default(),
            target: true,
            thread_ids: false,
            location: false,
        }
    }

    /// Takes every setting from the `logging` section.
    pub fn from_config(config: &LoggingConfig) -> Self {
        let directives = config
            .filters
            .iter()
            .map(|(module, level)| format!("{module}={level}"))
            .collect();

        Self {
            level: config.level.to_tracing_level(),
            directives,
            span_events: SpanEvents::from(&config.span_events),
            format: config.format,
            output: config.output,
            file: config.file_path.clone(),
            rotation: config.rotation,
            thread_ids: config.thread_ids,
            location: config.file_location,
            ..Self::new()
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Adds a filter directive such as `"telebot_transport=trace"`.
    pub fn directive(mut self, directive: impl Into<String>) -> Self {
        self.directives.push(directive.into());
        self
    }

    pub fn span_events(mut self, events: SpanEvents) -> Self {
        self.span_events = events;
        self
    }

    pub fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn output(mut self, output: LogOutput) -> Self {
        self.output = output;
        self
    }

    /// Shows the module path of each event.
    pub fn with_target(mut self, enabled: bool) -> Self {
        self.target = enabled;
        self
    }

    pub fn with_thread_ids(mut self, enabled: bool) -> Self {
        self.thread_ids = enabled;
        self
    }

    /// Shows the source file and line of each event.
    pub fn with_file_location(mut self, enabled: bool) -> Self {
        self.location = enabled;
        self
    }

    /// Writes to `path`, starting a new file as `rotation` says.
    pub fn file(mut self, path: impl Into<PathBuf>, rotation: LogRotation) -> Self {
        self.output = LogOutput::File;
        self.file = Some(path.into());
        self.rotation = rotation;
        self
    }

    /// Installs the subscriber unless one is already set.
    pub fn init(self) {
        // An existing global subscriber keeps precedence.
        let _ = self.try_init();
    }

    /// Installs the subscriber, failing if one is already set.
    pub fn try_init(self) -> Result<(), TryInitError> {
        let (writer, missing_file) = self.writer();
        let filter = self.filter();

        tracing_subscriber::registry()
            .with(self.layer(writer))
            .with(filter)
            .try_init()?;

        if missing_file {
            warn!("Log output is `file` but no file path is set, writing to stdout");
        }
        for directive in &self.directives {
            if let Err(e) = directive.parse::<Directive>() {
                warn!(directive = %directive, error = %e, "Ignoring invalid log directive");
            }
        }
        #[cfg(not(feature = "json-log"))]
        if self.format == LogFormat::Json {
            warn!("JSON log lines need the `json-log` feature, using the full format");
        }
        Ok(())
    }

    fn filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level.as_str().to_lowercase()));

        for directive in self.directives.iter().filter_map(|d| d.parse::<Directive>().ok()) {
            filter = filter.add_directive(directive);
        }
        filter
    }

    /// Picks the sink. The flag is set when file output has no path.
    fn writer(&self) -> (BoxMakeWriter, bool) {
        match (self.output, &self.file) {
            (LogOutput::Stdout, _) => (BoxMakeWriter::new(std::io::stdout), false),
            (LogOutput::Stderr, _) => (BoxMakeWriter::new(std::io::stderr), false),
            (LogOutput::File, Some(path)) => {
                (BoxMakeWriter::new(appender(path, self.rotation)), false)
            }
            (LogOutput::File, None) => (BoxMakeWriter::new(std::io::stdout), true),
        }
    }

    fn layer(&self, writer: BoxMakeWriter) -> BoxedLayer {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_span_events(self.span_events.fmt_span())
            .with_target(self.target)
            .with_thread_ids(self.thread_ids)
            .with_file(self.location)
            .with_line_number(self.location);

        match self.format {
            LogFormat::Compact => layer.compact().boxed(),
            LogFormat::Pretty => layer.pretty().boxed(),
            #[cfg(feature = "json-log")]
            LogFormat::Json => layer.json().boxed(),
            _ => layer.boxed(),
        }
    }
}

fn appender(path: &Path, rotation: LogRotation) -> RollingFileAppender {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let name = path.file_name().unwrap_or_else(|| OsStr::new("telebot.log"));
    match rotation {
        LogRotation::Never => rolling::never(dir, name),
        LogRotation::Hourly => rolling::hourly(dir, name),
        LogRotation::Daily => rolling::daily(dir, name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogLevel;

    #[test]
    fn test_span_events() {
        let config = SpanEventConfig {
            new: true,
            close: true,
            ..Default::default()
        };
        assert_eq!(SpanEvents::from(&config), SpanEvents::LIFECYCLE);
        assert_eq!(SpanEvents::default(), SpanEvents::NONE);
        assert_eq!(SpanEvents::NONE.fmt_span(), FmtSpan::NONE);
        assert_eq!(SpanEvents::LIFECYCLE.fmt_span(), FmtSpan::NEW | FmtSpan::CLOSE);
        assert_eq!(SpanEvents::FULL.fmt_span(), FmtSpan::FULL);
    }

    #[test]
    fn test_builder_from_config() {
        let mut config = LoggingConfig {
            level: LogLevel::Warn,
            file_location: true,
            ..Default::default()
        };
        config.filters.insert("telebot_core".into(), LogLevel::Trace);

        let builder = LoggingBuilder::from_config(&config);
        assert_eq!(builder.level, Level::WARN);
        assert_eq!(builder.directives, vec!["telebot_core=trace".to_owned()]);
        assert!(builder.target);
        assert!(builder.location);
        assert_eq!(builder.output, LogOutput::Stdout);
    }

    #[test]
    fn test_file_output() {
        let builder = LoggingBuilder::new().file("logs/bot.log", LogRotation::Daily);
        assert_eq!(builder.output, LogOutput::File);
        assert_eq!(builder.rotation, LogRotation::Daily);
        assert_eq!(builder.file, Some(PathBuf::from("logs/bot.log")));

        let builder = LoggingBuilder::new().output(LogOutput::File);
        assert!(builder.writer().1);
    }
}
