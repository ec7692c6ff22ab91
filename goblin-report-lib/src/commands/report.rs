use super::common::{ColorMode, LogLevel, init_logging};
use super::config::Config;
use super::input::ReportInput;
use super::{Host, ProgressReporter};
use crate::Result;
use crate::facts::{Artifact, LinkResolver, Metric, MetricsClient, ReportAssembler, ReportRow};
use crate::reports::{Report, generate_console, generate_csv, generate_html, generate_json, report_title};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::Parser;
use core::time::Duration;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;
use url::Url;

const LOG_TARGET: &str = "    report";

#[derive(Parser, Debug)]
pub struct ReportArgs {
    /// Artifacts to report on (format: `GROUP:ARTIFACT:VERSION[:SCOPE]`)
    #[arg(value_name = "ARTIFACT")]
    pub artifacts: Vec<Artifact>,

    /// JSON file listing the project and its direct dependencies
    #[arg(long, value_name = "PATH")]
    pub artifacts_file: Option<Utf8PathBuf>,

    /// Project name shown in the report title
    #[arg(long, value_name = "NAME")]
    pub project_name: Option<String>,

    /// Project version shown in the report title
    #[arg(long, value_name = "VERSION")]
    pub project_version: Option<String>,

    /// Base URL of the metrics service, overriding the configuration file
    #[arg(long, value_name = "URL", env = "GOBLIN_API_URL")]
    pub api_url: Option<Url>,

    /// Metric to request, overriding the configured list (repeatable)
    #[arg(long = "metric", value_name = "NAME")]
    pub metrics: Vec<String>,

    /// Path to configuration file (default is `goblin.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LogLevel,

    /// Output the report to an HTML file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub html: Option<Utf8PathBuf>,

    /// Output the report to a CSV file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Output the report to a JSON file
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Stamp the HTML report with the time it was generated
    #[arg(long, help_heading = "Report Output")]
    pub html_timestamp: bool,

    /// Output the report to the console. If omitted, console output is shown only when no other reports are generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

impl ReportArgs {
    const fn generating_files(&self) -> bool {
        self.html.is_some() || self.csv.is_some() || self.json.is_some()
    }
}

/// Fetch metrics for every requested artifact and emit the requested reports.
///
/// # Errors
///
/// Returns an error for unusable configuration or input, or when a report
/// file cannot be written. Metric lookups that fail only leave gaps in the report.
pub async fn process_report<H: Host>(host: &mut H, args: &ReportArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = effective_config(args)?;
    let metrics = config.requested_metrics();
    warn_unknown_metrics(&metrics);

    let input = ReportInput::gather(
        args.artifacts_file.as_deref(),
        &args.artifacts,
        args.project_name.as_deref(),
        args.project_version.as_deref(),
    )?;

    let rows = assemble(&config, &input.artifacts, &metrics, args).await?;

    let title = report_title(&input.project.label());
    let report = Report::new(&title, &metrics, &rows);
    emit_reports(host, args, &report)
}

/// The configuration file with command-line overrides applied, validated as a whole.
fn effective_config(args: &ReportArgs) -> Result<Config> {
    let mut config = Config::load(Utf8Path::new("."), args.config.as_ref())?;

    if let Some(api_url) = &args.api_url {
        config.api_url = api_url.clone();
    }

    if !args.metrics.is_empty() {
        config.metrics.clone_from(&args.metrics);
    }

    config.validate()?;
    Ok(config)
}

fn warn_unknown_metrics(metrics: &[Metric]) {
    for metric in metrics.iter().filter(|metric| !metric.is_known()) {
        log::warn!(target: LOG_TARGET, "Unknown metric '{metric}': it will be requested but always reported as unresolved");
    }
}

async fn assemble(config: &Config, artifacts: &[Artifact], metrics: &[Metric], args: &ReportArgs) -> Result<Vec<ReportRow>> {
    let metrics_client = MetricsClient::new(&config.api_url, config.request_timeout())?;
    let link_resolver = LinkResolver::new(config.link_base_url.clone());

    // with logging on, log lines and the bar would interleave, so the bar stays hidden
    let delay = if args.log_level == LogLevel::None {
        Duration::from_millis(300)
    } else {
        Duration::from_secs(365 * 24 * 60 * 60)
    };

    let use_colors_for_progress = {
        use std::io::{IsTerminal, stderr};
        args.color.enabled(stderr().is_terminal())
    };

    let progress = ProgressReporter::new(delay, use_colors_for_progress);
    let assembler = ReportAssembler::new(metrics_client, link_resolver, config.max_concurrent_requests, progress);

    log::info!(
        target: LOG_TARGET,
        "Querying {} for {} artifact(s) and {} metric(s)",
        config.api_url,
        artifacts.len(),
        metrics.len()
    );

    Ok(assembler.assemble(artifacts, metrics).await)
}

fn emit_reports<H: Host>(host: &mut H, args: &ReportArgs, report: &Report<'_>) -> Result<()> {
    if args.console || !args.generating_files() {
        let use_colors = {
            use std::io::{IsTerminal, stdout};
            args.color.enabled(stdout().is_terminal())
        };

        let mut console_output = String::new();
        generate_console(report, use_colors, &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if let Some(filename) = &args.html {
        let mut html = String::new();
        generate_html(report, args.html_timestamp.then(Local::now), &mut html)?;
        fs::write(filename, html).into_app_err_with(|| format!("writing HTML report to '{filename}'"))?;
    }

    if let Some(filename) = &args.csv {
        let mut csv_output = String::new();
        generate_csv(report, &mut csv_output)?;
        fs::write(filename, csv_output).into_app_err_with(|| format!("writing CSV report to '{filename}'"))?;
    }

    if let Some(filename) = &args.json {
        let mut json_output = String::new();
        generate_json(report, &mut json_output)?;
        fs::write(filename, json_output).into_app_err_with(|| format!("writing JSON report to '{filename}'"))?;
    }

    Ok(())
}
