use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Error;
use crate::packet::Direction;

/// The command line interface for serial tap.
#[derive(Parser)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to a configuration file
    pub config: Option<PathBuf>,

    /// The host-facing port, e.g. /dev/ttyUSB0 or COM12
    #[arg(short = 'p', long)]
    pub host_port: Option<String>,

    /// The device-facing port
    #[arg(short = 'd', long)]
    pub device_port: Option<String>,

    /// Baud rate on the host side
    #[arg(long)]
    pub host_baud: Option<u32>,

    /// Baud rate on the device side
    #[arg(long)]
    pub device_baud: Option<u32>,

    /// Maximum allowed silence inside one packet, in seconds
    #[arg(short = 'm', long)]
    pub max_delay: Option<f64>,

    /// Only print packets travelling this direction
    /// (host-to-device/request or device-to-host/response)
    #[arg(long)]
    pub only: Option<Direction>,

    /// Also log into a daily-rolling file in this directory
    #[arg(long)]
    pub log_dir: Option<PathBuf>,

    /// Subcommands
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Commands available in the command line interface.
#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Examples for user convenience.
    #[clap(subcommand)]
    Examples(Examples),
}

/// Helpful examples for users.
#[derive(Subcommand, Clone)]
pub enum Examples {
    /// Show an example of a configuration file's contents.
    Config,
}

/// Print the requested example.
pub fn handle_command(command: Commands) {
    match command {
        Commands::Examples(Examples::Config) => {
            println!("{}", Config::example().serialize_pretty());
        }
    }
}

impl Cli {
    /// The configuration for this invocation: the config file (or defaults)
    /// with command line overrides applied, validated.
    pub fn resolve_config(&self) -> Result<Config, Error> {
        let mut config = match &self.config {
            Some(path) => Config::new_from_path(path)?,
            None => Config::default(),
        };

        if let Some(path) = &self.host_port {
            config.host.path = path.clone();
        }
        if let Some(path) = &self.device_port {
            config.device.path = path.clone();
        }
        if let Some(baud) = self.host_baud {
            config.host.baud = baud;
        }
        if let Some(baud) = self.device_baud {
            config.device.baud = baud;
        }
        if let Some(max_delay) = self.max_delay {
            config.max_delay = max_delay;
        }

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("serial-tap").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn flags_alone_make_a_config() {
        let cli = parse(&["-p", "/dev/ttyUSB0", "-d", "/dev/ttyUSB1", "-m", "0.01"]);

        let config = cli.resolve_config().unwrap();

        assert_eq!(config.host.path, "/dev/ttyUSB0");
        assert_eq!(config.device.path, "/dev/ttyUSB1");
        assert_eq!(config.host.baud, 9600);
        assert_eq!(config.max_delay, 0.01);
    }

    #[test]
    fn missing_ports_are_rejected_before_running() {
        let cli = parse(&["-p", "/dev/ttyUSB0"]);

        assert!(matches!(
            cli.resolve_config().unwrap_err(),
            Error::BadConfig(_)
        ));
    }

    #[test]
    fn only_accepts_both_spellings() {
        let cli = parse(&["--only", "request"]);
        assert_eq!(cli.only, Some(Direction::HostToDevice));

        let cli = parse(&["--only", "device-to-host"]);
        assert_eq!(cli.only, Some(Direction::DeviceToHost));
    }

    #[test]
    fn bad_direction_does_not_parse() {
        let result =
            Cli::try_parse_from(["serial-tap", "--only", "upwards"]);

        assert!(result.is_err());
    }
}
