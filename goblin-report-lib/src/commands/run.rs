//! Command dispatch logic for goblin-report

use super::{InitArgs, ReportArgs, ValidateArgs, init_config, process_report, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "goblin-report", version, author, long_about = None)]
#[command(about = "Report vulnerability and freshness metrics for a project's direct dependencies")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: GoblinSubcommand,
}

#[derive(Subcommand, Debug)]
enum GoblinSubcommand {
    /// Fetch metrics for artifacts and generate reports
    Report(Box<ReportArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// This function parses the command-line arguments and executes the corresponding
/// subcommand. It's designed to be called from main.rs with the program arguments.
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        GoblinSubcommand::Report(report_args) => process_report(host, report_args).await,
        GoblinSubcommand::Init(init_args) => init_config(host, init_args),
        GoblinSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_report_arguments() {
        let cli = Cli::parse_from([
            "goblin-report",
            "report",
            "org.a:lib1:1.0",
            "org.a:lib2:2.0:test",
            "--metric",
            "freshness",
            "--metric",
            "cve_aggregated",
            "--csv",
            "out.csv",
        ]);

        let GoblinSubcommand::Report(args) = cli.command else {
            panic!("expected the report subcommand");
        };

        assert_eq!(args.artifacts.len(), 2);
        assert_eq!(args.artifacts[1].scope(), "test");
        assert_eq!(args.metrics, vec!["freshness".to_string(), "cve_aggregated".to_string()]);
        assert_eq!(args.csv.as_deref().map(camino::Utf8Path::as_str), Some("out.csv"));
        assert!(!args.console);
    }

    #[test]
    fn test_parse_rejects_bad_artifact() {
        let result = Cli::try_parse_from(["goblin-report", "report", "org.a:lib1"]);
        assert!(result.is_err());

        let result = Cli::try_parse_from(["goblin-report", "report", "org.a::1.0"]);
        assert!(result.is_err());
    }
}
