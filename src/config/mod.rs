mod present_mode;

use {clap::Parser, std::time::Duration};

pub use self::present_mode::PresentMode;

/// Render a rotating triangle into a Wayland toplevel with Vulkan.
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
pub struct Args {
    /// Buffer swap delay in microseconds
    #[arg(short = 'd', value_name = "US", default_value_t = 0)]
    pub delay: u64,

    /// Presentation mode: 0/immediate, 1/mailbox, 2/fifo, 3/fifo-relaxed
    #[arg(short = 'p', value_name = "MODE", default_value_t = PresentMode::Fifo)]
    pub present_mode: PresentMode,

    /// Run in fullscreen mode
    #[arg(short = 'f')]
    pub fullscreen: bool,

    /// Use fixed width/height ratio when run in fullscreen mode
    #[arg(short = 'r')]
    pub fixed_ratio: bool,

    /// Run in maximized mode
    #[arg(short = 'm')]
    pub maximized: bool,

    /// Create an opaque surface
    #[arg(short = 'o')]
    pub opaque: bool,

    /// Enable tearing via the tearing_control protocol
    #[arg(short = 't')]
    pub tearing: bool,

    /// Enable and periodically toggle tearing via the tearing_control
    /// protocol
    #[arg(short = 'T')]
    pub toggle_tearing: bool,
}

/// Immutable application settings derived from the command line.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Config {
    pub swap_delay: Duration,
    pub present_mode: PresentMode,
    pub fullscreen: bool,
    pub fixed_ratio: bool,
    pub maximized: bool,
    pub opaque: bool,
    pub tearing: bool,
    pub toggle_tearing: bool,
}

impl Config {
    /// Parse the process arguments. Exits with usage on invalid input.
    pub fn from_env() -> Self {
        Args::parse().into()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            swap_delay: Duration::ZERO,
            present_mode: PresentMode::Fifo,
            fullscreen: false,
            fixed_ratio: false,
            maximized: false,
            opaque: false,
            tearing: false,
            toggle_tearing: false,
        }
    }
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            swap_delay: Duration::from_micros(args.delay),
            present_mode: args.present_mode,
            fullscreen: args.fullscreen,
            fixed_ratio: args.fixed_ratio,
            maximized: args.maximized,
            opaque: args.opaque,
            tearing: args.tearing || args.toggle_tearing,
            toggle_tearing: args.toggle_tearing,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Args::try_parse_from(
            std::iter::once("wayland-triangle").chain(args.iter().copied()),
        )
        .unwrap()
        .into()
    }

    #[test]
    fn no_flags_gives_the_defaults() {
        assert_eq!(parse(&[]), Config::default());
    }

    #[test]
    fn all_flags_are_recognized() {
        let config =
            parse(&["-f", "-r", "-m", "-o", "-t", "-d", "1500", "-p", "1"]);
        assert!(config.fullscreen);
        assert!(config.fixed_ratio);
        assert!(config.maximized);
        assert!(config.opaque);
        assert!(config.tearing);
        assert!(!config.toggle_tearing);
        assert_eq!(config.swap_delay, Duration::from_micros(1500));
        assert_eq!(config.present_mode, PresentMode::Mailbox);
    }

    #[test]
    fn toggling_tearing_implies_tearing() {
        let config = parse(&["-T"]);
        assert!(config.tearing);
        assert!(config.toggle_tearing);
    }

    #[test]
    fn invalid_present_modes_are_rejected() {
        assert!(Args::try_parse_from(["wayland-triangle", "-p", "7"]).is_err());
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Args::try_parse_from(["wayland-triangle", "-x"]).is_err());
    }
}
