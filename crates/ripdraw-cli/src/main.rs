//! `ripdraw`: drive a RipDraw display from the command line.

mod error;
mod scene;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use ripdraw_protocol::{SerialChannel, Session, VersionType};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::error::Result;
use crate::scene::{load_scene, SceneFile};

#[derive(Debug, Parser)]
#[command(name = "ripdraw", version, about = "Drive a RipDraw display over its serial link")]
struct Cli {
    /// Serial device, e.g. /dev/ttyACM0 or COM3.
    #[arg(short, long)]
    port: Option<String>,

    /// Baud rate.
    #[arg(short, long)]
    baud: Option<u32>,

    /// YAML file with `serial` and `session` settings.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-vv dumps frames, -vvv traces resynchronization).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a version string.
    Info {
        /// devapp, hardware or os.
        #[arg(long, default_value = "devapp")]
        kind: VersionType,
    },
    /// Send text and print the echo.
    Echo { text: String },
    /// Restart the display.
    Reset,
    /// Drain and print pending events.
    Events,
    /// Show or set the backlight brightness.
    Backlight {
        #[arg(long)]
        set: Option<u16>,
    },
    /// Reset the display and draw the images listed in a scene file.
    Load { scene: PathBuf },
}

/// Default filter for a session verbosity level.
fn default_level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "info",
        1 | 2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Config file settings with command-line overrides applied.
fn load_settings(cli: &Cli) -> Result<SceneFile> {
    let mut settings = match &cli.config {
        Some(path) => SceneFile::load(path)?,
        None => SceneFile::default(),
    };
    if let Some(port) = &cli.port {
        settings.serial.port = port.clone();
    }
    if let Some(baud) = cli.baud {
        settings.serial.baud_rate = baud;
    }
    if cli.verbose > 0 {
        settings.session.verbosity = cli.verbose;
    }
    Ok(settings)
}

fn run(settings: SceneFile, command: Command) -> Result<()> {
    let mut session = Session::open(&settings.serial, settings.session)?;
    let result = execute(&mut session, command);
    match &result {
        Err(e) if e.is_connection_fatal() => warn!("link lost, not flushing"),
        _ => session.close()?,
    }
    result
}

fn execute(session: &mut Session<SerialChannel>, command: Command) -> Result<()> {
    match command {
        Command::Info { kind } => {
            println!("{}", session.system_info(kind)?);
        }
        Command::Echo { text } => {
            println!("{}", session.test_echo(&text)?);
        }
        Command::Reset => {
            session.reset()?;
            info!("display reset");
        }
        Command::Events => loop {
            let events = session.event_message()?;
            for event in &events {
                println!("{:?} {:02X?}", event.event_type, event.data);
            }
            if !events.first().is_some_and(|e| e.has_more) {
                break;
            }
        },
        Command::Backlight { set: Some(level) } => {
            let max = session.get_max_backlight_brightness()?;
            if level > max {
                warn!(level, max, "brightness above device maximum");
            }
            session.set_backlight_brightness(level)?;
        }
        Command::Backlight { set: None } => {
            let level = session.get_backlight_brightness()?;
            let max = session.get_max_backlight_brightness()?;
            println!("{}/{}", level, max);
        }
        Command::Load { scene } => {
            let scene = SceneFile::load(&scene)?;
            load_scene(session, &scene.images)?;
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let settings = load_settings(&cli);
    let verbosity = settings
        .as_ref()
        .map_or(cli.verbose, |s| s.session.verbosity);
    init_logging(verbosity);

    match settings.and_then(|settings| run(settings, cli.command)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_default_level() {
        assert_eq!(default_level(0), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(3), "trace");
    }

    #[test]
    fn test_config_verbosity_sets_log_level() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("ripdraw.yaml");
        std::fs::write(&path, "session:\n  verbosity: 2\n").unwrap();

        let cli = parse(&["ripdraw", "-c", path.to_str().unwrap(), "reset"]);
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.session.verbosity, 2);
        assert_eq!(default_level(settings.session.verbosity), "debug");

        let cli = parse(&["ripdraw", "-vvv", "-c", path.to_str().unwrap(), "reset"]);
        assert_eq!(load_settings(&cli).unwrap().session.verbosity, 3);
    }

    #[test]
    fn test_flags_override_config() {
        let cli = parse(&["ripdraw", "-p", "/dev/ttyUSB1", "-b", "9600", "reset"]);
        let settings = load_settings(&cli).unwrap();
        assert_eq!(settings.serial.port, "/dev/ttyUSB1");
        assert_eq!(settings.serial.baud_rate, 9600);
        assert_eq!(settings.session.verbosity, 0);
    }
}
