mod pretty_list;

use std::{fmt::Write as FmtWrite, sync::OnceLock};

use anyhow::Result;
use flexi_logger::{DeferredNow, Logger, LoggerHandle, Record};
use regex::Regex;
use textwrap::{termwidth, Options};

pub use self::pretty_list::PrettyList;

/// Keeps the logger alive for the life of the process.
static LOGGER_HANDLE: OnceLock<LoggerHandle> = OnceLock::new();

/// Matches the last wrapped line of a record so it can be closed with `┗`.
static LAST_LINE_MATCHER: OnceLock<Regex> = OnceLock::new();

/// Setup pretty console logging for the simulation.
///
/// Safe to call more than once, only the first call installs the logger.
pub fn setup() -> Result<()> {
    if LOGGER_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = Logger::try_with_env_or_str("info")?
        .format(multiline_format)
        .start()?;
    let _ = LOGGER_HANDLE.set(handle);

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );

    Ok(())
}

/// A multiline log format for flexi_logger.
///
/// Records are wrapped at terminal width and framed with box-drawing
/// characters so long records (kernel tables, the config dump) read as one
/// block. The header names the thread, which tells the frame loop apart from
/// the compute pool.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let wrap_options = Options::new(termwidth().min(74))
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");

    let thread = std::thread::current();
    let mut record_text = String::new();
    writeln!(
        record_text,
        "{} [{}] [{}] [{}:{}]",
        record.level(),
        now.now().format("%H:%M:%S%.6f"),
        thread.name().unwrap_or("<unnamed>"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    )
    .expect("unable to format the record header");
    write!(record_text, "{}", record.args())
        .expect("unable to format the record body");

    let wrapped = textwrap::fill(&record_text, wrap_options);
    let matcher = LAST_LINE_MATCHER.get_or_init(|| {
        Regex::new(r"(┃)(.*)$").expect("the last-line pattern is valid")
    });
    let formatted = matcher.replace(&wrapped, "┗$2");

    writeln!(w, "{}", formatted)
}
