mod pretty_list;

use {
    anyhow::Result,
    flexi_logger::{DeferredNow, Logger, LoggerHandle, Record},
    regex::Regex,
    std::{fmt::Write as FmtWrite, sync::OnceLock},
    textwrap::{termwidth, Options},
};

pub use self::pretty_list::PrettyList;

/// Matches the continuation marker on the final line of a wrapped record.
static LAST_LINE_MATCHER: OnceLock<Regex> = OnceLock::new();

/// Setup console logging for this application.
///
/// Records go to stderr. The level is read from RUST_LOG and defaults to
/// `info`. The returned handle must be kept alive for as long as the
/// application logs.
pub fn setup() -> Result<LoggerHandle> {
    let handle = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .format(multiline_format)
        .start()?;

    log::info!(
        "Adjust the log level by setting RUST_LOG. By default RUST_LOG=info"
    );

    Ok(handle)
}

/// A multiline log format for flexi_logger.
///
/// Logs are wrapped at terminal width and prefixed with box drawing
/// characters so it's easy to tell where a big record begins and ends.
pub fn multiline_format(
    w: &mut dyn std::io::Write,
    now: &mut DeferredNow,
    record: &Record,
) -> Result<(), std::io::Error> {
    let mut full_line = String::new();
    writeln!(
        full_line,
        "{} [{}] [{}:{}]",
        record.level(),
        now.format("%H:%M:%S%.6f"),
        record.file().unwrap_or("<unnamed>"),
        record.line().unwrap_or(0),
    )
    .expect("unable to format first log line");

    write!(&mut full_line, "{}", &record.args())
        .expect("unable to format log!");

    writeln!(w, "{}", wrap_record(&full_line, termwidth().min(74)))
}

/// Wrap a full log record to the given width and mark the last line.
fn wrap_record(full_line: &str, width: usize) -> String {
    let wrap_options = Options::new(width)
        .initial_indent("┏ ")
        .subsequent_indent("┃ ");
    let wrapped = textwrap::fill(full_line, wrap_options);
    LAST_LINE_MATCHER
        .get_or_init(|| Regex::new(r"(┃)(.*)$").expect("valid regex"))
        .replace(&wrapped, "┗$2")
        .into_owned()
}

#[cfg(test)]
mod test {
    use super::wrap_record;

    #[test]
    fn wrapped_records_are_closed_on_the_last_line() {
        let wrapped = wrap_record("INFO [time] [file:1]\nfirst\nsecond", 74);
        let lines: Vec<&str> = wrapped.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("┏ INFO"));
        assert_eq!(lines[1], "┃ first");
        assert_eq!(lines[2], "┗ second");
    }

    #[test]
    fn single_line_records_only_have_an_opening_marker() {
        let wrapped = wrap_record("INFO short", 74);
        assert_eq!(wrapped, "┏ INFO short");
    }
}
