//! CLI entrypoint for glp1-advisor
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use advisor_application::{
    ApiError, AssessmentProgress, DiagnosisApi, ExchangeLogger, NoExchangeLogger, NoProgress,
    ResultExporter, RunAssessmentUseCase, reference_scenarios,
};
use advisor_domain::{AssessmentReport, OutputFormat, PatientProfile, ResultBundle, Severity};
use advisor_infrastructure::{
    ConfigLoader, EndlessMedicalClient, FileConfig, JsonBundleExporter, JsonlExchangeLogger,
    MockDiagnosisApi,
};
use advisor_presentation::{
    AssessArgs, Cli, Command, ConsoleFormatter, ProgressReporter, medication_info,
};
use anyhow::{Context, Result, bail};
use clap::{CommandFactory, Parser};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered log lines reach the file
    let _log_guard = init_logging(&cli)?;

    info!("Starting glp1-advisor");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = load_config(&cli)?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let Some(command) = &cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Command::Assess(args) => run_assess(&cli, &config, args).await,
        Command::Scenarios => run_scenarios(&cli, &config).await,
        Command::CheckApi => check_api(&config).await,
        Command::Info => {
            println!("{}", medication_info());
            Ok(())
        }
    }
}

/// Initialize logging based on verbosity level
fn init_logging(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match &cli.log_file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("--log-file {} has no file name", path.display()))?;
            std::fs::create_dir_all(directory)?;

            let appender = tracing_appender::rolling::never(directory, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };

    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Error => eprintln!("config error: {}", issue.message),
            Severity::Warning => warn!("{}", issue.message),
        }
    }
    if issues.iter().any(|i| i.is_error()) {
        bail!("Invalid configuration");
    }

    Ok(config)
}

/// Wire the diagnosis backends, the fallback and the exchange log
fn build_use_case(cli: &Cli, config: &FileConfig) -> Result<RunAssessmentUseCase> {
    let logger: Arc<dyn ExchangeLogger> = match &cli.exchange_log {
        Some(path) => match JsonlExchangeLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoExchangeLogger),
        },
        None => Arc::new(NoExchangeLogger),
    };

    if cli.demo || config.fallback.force_mock {
        info!("Demo mode: the diagnosis service will not be contacted");
        return Ok(RunAssessmentUseCase::new(Box::new(MockDiagnosisApi::new())).with_logger(logger));
    }

    let client = EndlessMedicalClient::new(config.api.to_client_config())
        .context("Failed to initialize HTTP client")?;
    let mut use_case = RunAssessmentUseCase::new(Box::new(client)).with_logger(logger);
    if config.fallback.enabled && !cli.no_fallback {
        use_case = use_case.with_fallback(Box::new(MockDiagnosisApi::new()));
    }
    Ok(use_case)
}

fn read_profile(path: &Path) -> Result<PatientProfile> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    let profile: PatientProfile = serde_json::from_str(&text)
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    profile
        .validate()
        .with_context(|| format!("Invalid profile {}", path.display()))?;
    Ok(profile)
}

async fn run_one(
    use_case: &mut RunAssessmentUseCase,
    profile: PatientProfile,
    quiet: bool,
) -> Result<AssessmentReport> {
    let reporter;
    let progress: &dyn AssessmentProgress = if quiet {
        &NoProgress
    } else {
        reporter = ProgressReporter::new();
        &reporter
    };
    Ok(use_case.execute_with_progress(profile, progress).await?)
}

fn print_report(cli: &Cli, config: &FileConfig, report: &AssessmentReport) {
    let format = cli.output.map(OutputFormat::from).unwrap_or(config.output.format);
    let output = match format {
        OutputFormat::Full => ConsoleFormatter::format(report),
        OutputFormat::Summary => ConsoleFormatter::format_summary(report),
        OutputFormat::Json => ConsoleFormatter::format_json(&ResultBundle::from_report(report)),
    };
    println!("{}", output);
}

async fn run_assess(cli: &Cli, config: &FileConfig, args: &AssessArgs) -> Result<()> {
    let profile = match &args.profile {
        Some(path) => read_profile(path)?,
        None => args.to_profile(),
    };

    let mut use_case = build_use_case(cli, config)?;
    let report = run_one(&mut use_case, profile, cli.quiet).await?;
    print_report(cli, config, &report);

    if let Some(target) = &args.export {
        let exporter = match target {
            Some(path) => JsonBundleExporter::to_file(path),
            None => JsonBundleExporter::new(&config.export.directory),
        };
        let path = exporter
            .export(&ResultBundle::from_report(&report))
            .context("Failed to export results")?;
        println!("Results saved to {}", path.display());
    }

    Ok(())
}

async fn run_scenarios(cli: &Cli, config: &FileConfig) -> Result<()> {
    let mut use_case = build_use_case(cli, config)?;

    for scenario in reference_scenarios() {
        println!("\n>>> {}", scenario.title);
        let report = run_one(&mut use_case, scenario.profile, cli.quiet).await?;
        print_report(cli, config, &report);
    }

    Ok(())
}

async fn check_api(config: &FileConfig) -> Result<()> {
    let mut client = EndlessMedicalClient::new(config.api.to_client_config())
        .context("Failed to initialize HTTP client")?;

    match client.check_connection().await {
        Ok(()) => {
            println!("API connection successful");
            Ok(())
        }
        Err(ApiError::Status(code)) => bail!("API returned status {}", code),
        Err(ApiError::Timeout) => bail!("Connection timeout - demo mode would be used"),
        Err(ApiError::Connection) => bail!("Connection error - demo mode would be used"),
        Err(e) => bail!("Error: {} - demo mode would be used", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use advisor_domain::{Condition, DomainError, Gender};
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn profile_file(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_profile_accepts_valid_file() {
        let file = profile_file(
            r#"{"demographics":{"age":52,"gender":"female","bmi":33.5,"weight":95.0},
                "conditions":{"Diabetes":true}}"#,
        );

        let profile = read_profile(file.path()).unwrap();

        assert_eq!(profile.demographics.age, 52);
        assert_eq!(profile.demographics.gender, Gender::Female);
        assert!(profile.conditions.has(Condition::Diabetes));
    }

    #[test]
    fn test_read_profile_rejects_out_of_range_age() {
        let file = profile_file(
            r#"{"demographics":{"age":150,"gender":"male","bmi":25.0,"weight":70.0}}"#,
        );

        let err = read_profile(file.path()).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<DomainError>(),
            Some(DomainError::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_read_profile_rejects_out_of_range_bmi() {
        let file = profile_file(
            r#"{"demographics":{"age":40,"gender":"male","bmi":95.0,"weight":70.0}}"#,
        );

        let err = read_profile(file.path()).unwrap_err();
        assert!(
            err.downcast_ref::<DomainError>()
                .is_some_and(DomainError::is_invalid_profile)
        );
    }

    #[test]
    fn test_read_profile_rejects_unknown_field() {
        let file = profile_file(
            r#"{"demographics":{"age":40,"gender":"male","bmi":25.0,"weight":70.0},
                "notes":"x"}"#,
        );

        assert!(read_profile(file.path()).is_err());
    }

    #[tokio::test]
    async fn test_invalid_profile_file_fails_before_any_backend_call() {
        let file = profile_file(
            r#"{"demographics":{"age":150,"gender":"male","bmi":25.0,"weight":70.0}}"#,
        );
        let cli = Cli::try_parse_from([
            "glp1-advisor",
            "--no-config",
            "--quiet",
            "assess",
            "--profile",
            file.path().to_str().unwrap(),
        ])
        .unwrap();
        let Some(Command::Assess(args)) = &cli.command else {
            panic!("expected assess");
        };

        // Nothing listens here; a backend call would fail with a connection error
        let mut config = FileConfig::default();
        config.api.base_url = "http://127.0.0.1:9/v1/dx".to_string();
        config.fallback.enabled = false;

        let err = run_assess(&cli, &config, args).await.unwrap_err();
        assert!(
            err.downcast_ref::<DomainError>()
                .is_some_and(DomainError::is_invalid_profile)
        );
    }
}
