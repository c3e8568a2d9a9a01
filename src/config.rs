//! Server configuration parsed from the command line.

use crate::{DEFAULT_BACKLOG, DEFAULT_HOST, DEFAULT_PORT};
use clap::Parser;

/// Server configuration
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hyperq",
    version,
    about = "HyperQ - a minimal in-memory message queue broker"
)]
pub struct Config {
    /// Port to listen on (1-65535)
    #[arg(
        short,
        long,
        default_value_t = DEFAULT_PORT,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub port: u16,

    /// Interface to bind to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Pending connections the OS may queue before refusing new ones
    #[arg(long, default_value_t = DEFAULT_BACKLOG)]
    pub backlog: u32,

    /// Show trace-level diagnostics
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Returns the address to bind to
    pub fn bind_address(&self) -> (&str, u16) {
        (&self.host, self.port)
    }

    /// Default log filter when `RUST_LOG` is not set
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "trace"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["hyperq"]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.backlog, 5);
        assert!(!config.verbose);
        assert_eq!(config.log_filter(), "info");
        assert_eq!(config.bind_address(), ("0.0.0.0", 5000));
    }

    #[test]
    fn test_port_and_verbose() {
        let config = Config::try_parse_from(["hyperq", "--port", "6000", "--verbose"]).unwrap();
        assert_eq!(config.port, 6000);
        assert!(config.verbose);
        assert_eq!(config.log_filter(), "trace");

        let config = Config::try_parse_from(["hyperq", "-p", "65535", "-v"]).unwrap();
        assert_eq!(config.port, 65535);
        assert!(config.verbose);
    }

    #[test]
    fn test_port_out_of_range() {
        assert!(Config::try_parse_from(["hyperq", "--port", "0"]).is_err());
        assert!(Config::try_parse_from(["hyperq", "--port", "65536"]).is_err());
        assert!(Config::try_parse_from(["hyperq", "--port", "70000"]).is_err());
        assert!(Config::try_parse_from(["hyperq", "--port", "-1"]).is_err());
        assert!(Config::try_parse_from(["hyperq", "--port", "abc"]).is_err());
    }

    #[test]
    fn test_host_and_backlog() {
        let config =
            Config::try_parse_from(["hyperq", "--host", "127.0.0.1", "--backlog", "128"]).unwrap();
        assert_eq!(config.bind_address(), ("127.0.0.1", 5000));
        assert_eq!(config.backlog, 128);
    }
}
