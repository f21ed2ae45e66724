//! Linear CLI Binary
//!
//! Parses arguments, loads configuration, runs one command and prints its
//! response envelope on stdout. Exit status is 1 whenever the envelope is
//! an error.

use clap::Parser;
use linear_cli::classify::Failure;
use linear_cli::cli::{map_error, render_outcome, Cli, RunContext};
use linear_cli::config::{ConfigLoader, CredentialStore, LinearConfig};
use linear_cli::logging::{init_logging, requested_by_env, LoggingConfig};
use linear_cli::render::{colors, render, OutputFormat, RenderOptions};
use std::process;
use tracing::{debug, error};

fn main() {
    let cli = Cli::parse();

    if cli.no_color {
        colors::disable();
    }

    let loader = match &cli.config {
        Some(path) => ConfigLoader::new().with_path(path),
        None => ConfigLoader::new(),
    };
    let (config, config_path) = match loader.load().and_then(|c| Ok((c, loader.config_path()?))) {
        Ok(loaded) => loaded,
        Err(e) => fail(map_error(&Failure::from(e)), cli.format),
    };

    let logging_config = build_logging_config(&cli, &config);
    if let Err(e) = init_logging(&logging_config) {
        fail(map_error(&Failure::from(e)), cli.format);
    }
    debug!(config_path = %config_path.display(), "linear starting");

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => fail(map_error(&Failure::from(anyhow::Error::from(e))), cli.format),
    };

    let context = RunContext::new(config, CredentialStore::new(config_path));
    let format = cli.format;
    let command = cli.command;
    let outcome = runtime.block_on(async move {
        // A panicking command becomes an opaque failure instead of a crash.
        tokio::spawn(async move { context.execute(&command).await })
            .await
            .unwrap_or_else(|join_error| {
                error!(error = %join_error, "command task aborted");
                Err(Failure::Opaque)
            })
    });

    let (text, ok) = render_outcome(outcome, format);
    println!("{}", text);
    if !ok {
        process::exit(1);
    }
}

/// Print an error envelope and exit with status 1.
fn fail(envelope: linear_cli::envelope::ResponseEnvelope, format: OutputFormat) -> ! {
    let text = render(&envelope, format, &RenderOptions::default())
        .unwrap_or_else(|_| envelope.to_pretty_json().unwrap_or_default());
    println!("{}", text);
    process::exit(1);
}

/// Logging config from the config file and CLI flags.
/// Precedence: CLI flags override config file override defaults. Logging is
/// off unless a flag or `LINEAR_LOG` asks for it.
fn build_logging_config(cli: &Cli, config: &LinearConfig) -> LoggingConfig {
    let mut logging = config.logging.clone();

    let requested = cli.verbose || cli.log_level.is_some() || requested_by_env();
    if !requested {
        logging.level = "off".to_string();
    }
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        logging.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        logging.file = Some(file.clone());
    }
    if cli.no_color {
        logging.color = false;
    }
    logging
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["linear"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_logging_off_by_default() {
        if requested_by_env() {
            return;
        }
        let config = build_logging_config(&parse(&["me"]), &LinearConfig::default());
        assert_eq!(config.level, "off");
    }

    #[test]
    fn test_verbose_enables_debug() {
        let config = build_logging_config(&parse(&["--verbose", "me"]), &LinearConfig::default());
        assert_eq!(config.level, "debug");
    }

    #[test]
    fn test_explicit_flags_override_config() {
        let cli = parse(&[
            "--log-level",
            "trace",
            "--log-format",
            "json",
            "--log-output",
            "file",
            "--log-file",
            "/tmp/linear.log",
            "--no-color",
            "me",
        ]);
        let config = build_logging_config(&cli, &LinearConfig::default());
        assert_eq!(config.level, "trace");
        assert_eq!(config.format, "json");
        assert_eq!(config.output, "file");
        assert_eq!(config.file, Some(std::path::PathBuf::from("/tmp/linear.log")));
        assert!(!config.color);
    }
}
