//! CLI command definitions

use advisor_domain::{
    AGE_RANGE, BMI_RANGE, Condition, Demographics, Gender, PatientProfile, Symptom, WEIGHT_RANGE,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::str::FromStr;

/// Output format for assessment results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Metrics, verdict, remote candidates and disclaimer
    Full,
    /// Only the suitability verdict
    Summary,
    /// The exportable JSON bundle
    Json,
}

impl From<OutputFormat> for advisor_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => advisor_domain::OutputFormat::Full,
            OutputFormat::Summary => advisor_domain::OutputFormat::Summary,
            OutputFormat::Json => advisor_domain::OutputFormat::Json,
        }
    }
}

/// CLI arguments for glp1-advisor
#[derive(Parser, Debug)]
#[command(name = "glp1-advisor")]
#[command(author, version, about = "GLP-1 medication suitability screening (educational)")]
#[command(long_about = r#"
glp1-advisor collects a short health questionnaire, submits it to the
EndlessMedical diagnostic service, and combines the returned candidate
conditions with a local GLP-1 suitability heuristic.

When the service is unreachable, deterministic demo results are used
instead unless --no-fallback is given.

Configuration files are loaded from (in priority order):
1. GLP1_ADVISOR_<SECTION>__<KEY>      Environment variables
2. --config <path>                    Explicit config file
3. ./glp1-advisor.toml                Project-level config
4. ~/.config/glp1-advisor/config.toml Global config

This tool is for education only and is not medical advice.

Example:
  glp1-advisor assess --age 52 --gender female --bmi 33.5 --condition obesity
  glp1-advisor assess --profile patient.json --export
  glp1-advisor --demo scenarios
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format (overrides the configured one)
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,

    /// Use demo results without contacting the service
    #[arg(long, global = true)]
    pub demo: bool,

    /// Report service failures instead of falling back to demo results
    #[arg(long, global = true)]
    pub no_fallback: bool,

    /// Write diagnostic logs to this file instead of stderr
    #[arg(long, value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Record every service exchange as JSON lines in this file
    #[arg(long, value_name = "PATH", global = true)]
    pub exchange_log: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Answer the questionnaire and run an assessment
    Assess(AssessArgs),
    /// Run the reference scenarios against the service
    Scenarios,
    /// Check that the diagnosis service is reachable
    CheckApi,
    /// Print GLP-1 medication reference information
    Info,
}

/// Questionnaire answers
#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Age in years
    #[arg(long, default_value_t = 45, value_parser = parse_age)]
    pub age: u32,

    #[arg(long, default_value = "male", value_parser = parse_gender)]
    pub gender: Gender,

    /// Body mass index
    #[arg(long, default_value_t = 25.0, value_parser = parse_bmi)]
    pub bmi: f64,

    /// Weight in kilograms
    #[arg(long, default_value_t = 70.0, value_parser = parse_weight)]
    pub weight: f64,

    /// Diagnosed condition (repeatable), e.g. diabetes, highbloodsugar
    #[arg(long = "condition", value_name = "NAME", value_parser = parse_condition)]
    pub conditions: Vec<Condition>,

    /// Current symptom (repeatable), e.g. fatigue, increasedthirst
    #[arg(long = "symptom", value_name = "NAME", value_parser = parse_symptom)]
    pub symptoms: Vec<Symptom>,

    /// Read the whole profile from a JSON file instead of flags
    #[arg(
        long,
        value_name = "PATH",
        conflicts_with_all = ["age", "gender", "bmi", "weight", "conditions", "symptoms"]
    )]
    pub profile: Option<PathBuf>,

    /// Save the result bundle; without a path it goes to the export directory
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,
}

impl AssessArgs {
    /// Profile described by the flags
    pub fn to_profile(&self) -> PatientProfile {
        let mut profile = PatientProfile::new(Demographics {
            age: self.age,
            gender: self.gender,
            bmi: self.bmi,
            weight: self.weight,
        });
        for condition in &self.conditions {
            profile.conditions.set(*condition, true);
        }
        for symptom in &self.symptoms {
            profile.symptoms.set(*symptom, true);
        }
        profile
    }
}

fn parse_age(s: &str) -> Result<u32, String> {
    let age: u32 = s.parse().map_err(|_| format!("'{}' is not a whole number", s))?;
    if AGE_RANGE.contains(&age) {
        Ok(age)
    } else {
        Err(format!(
            "must be between {} and {}",
            AGE_RANGE.start(),
            AGE_RANGE.end()
        ))
    }
}

fn parse_bounded(s: &str, range: &std::ops::RangeInclusive<f64>) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{}' is not a number", s))?;
    if range.contains(&value) {
        Ok(value)
    } else {
        Err(format!("must be between {} and {}", range.start(), range.end()))
    }
}

fn parse_bmi(s: &str) -> Result<f64, String> {
    parse_bounded(s, &BMI_RANGE)
}

fn parse_weight(s: &str) -> Result<f64, String> {
    parse_bounded(s, &WEIGHT_RANGE)
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    Gender::from_str(s).map_err(|e| e.to_string())
}

fn parse_condition(s: &str) -> Result<Condition, String> {
    Condition::from_str(s).map_err(|e| e.to_string())
}

fn parse_symptom(s: &str) -> Result<Symptom, String> {
    Symptom::from_str(s).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("glp1-advisor").chain(args.iter().copied())).unwrap()
    }

    fn assess_args(cli: Cli) -> AssessArgs {
        match cli.command {
            Some(Command::Assess(args)) => args,
            other => panic!("expected assess, got {:?}", other),
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_assess_defaults() {
        let args = assess_args(parse(&["assess"]));
        let profile = args.to_profile();
        assert_eq!(profile, PatientProfile::default());
        assert!(args.export.is_none());
    }

    #[test]
    fn test_assess_flags_build_profile() {
        let args = assess_args(parse(&[
            "assess",
            "--age",
            "52",
            "--gender",
            "Female",
            "--bmi",
            "33.5",
            "--condition",
            "obesity",
            "--condition",
            "HighBloodSugar",
            "--symptom",
            "fatigue",
        ]));
        let profile = args.to_profile();

        assert_eq!(profile.demographics.age, 52);
        assert_eq!(profile.demographics.gender, Gender::Female);
        assert!(profile.conditions.has(Condition::Obesity));
        assert!(profile.conditions.has(Condition::HighBloodSugar));
        assert!(profile.symptoms.has(Symptom::Fatigue));
        assert_eq!(profile.flagged_count(), 3);
    }

    #[test]
    fn test_out_of_range_values_rejected() {
        for args in [
            ["assess", "--age", "17"],
            ["assess", "--bmi", "71"],
            ["assess", "--weight", "29.5"],
        ] {
            let result =
                Cli::try_parse_from(std::iter::once("glp1-advisor").chain(args.iter().copied()));
            assert!(result.is_err(), "{:?} should be rejected", args);
        }
    }

    #[test]
    fn test_unknown_condition_rejected() {
        let result = Cli::try_parse_from(["glp1-advisor", "assess", "--condition", "flu"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_profile_file_alone_parses() {
        let args = assess_args(parse(&["assess", "--profile", "p.json"]));
        assert_eq!(args.profile, Some(PathBuf::from("p.json")));
    }

    #[test]
    fn test_profile_file_conflicts_with_questionnaire_flags() {
        for flag in [
            ["--age", "50"],
            ["--gender", "female"],
            ["--bmi", "31"],
            ["--weight", "90"],
            ["--condition", "diabetes"],
            ["--symptom", "fatigue"],
        ] {
            let result = Cli::try_parse_from(
                ["glp1-advisor", "assess", "--profile", "p.json"]
                    .into_iter()
                    .chain(flag),
            );
            assert!(result.is_err(), "{:?} should conflict with --profile", flag);
        }
    }

    #[test]
    fn test_export_with_and_without_path() {
        let args = assess_args(parse(&["assess", "--export"]));
        assert_eq!(args.export, Some(None));

        let args = assess_args(parse(&["assess", "--export", "out.json"]));
        assert_eq!(args.export, Some(Some(PathBuf::from("out.json"))));
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["scenarios", "--demo", "-o", "summary", "-vv"]);
        assert!(cli.demo);
        assert_eq!(cli.output, Some(OutputFormat::Summary));
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Some(Command::Scenarios)));
    }
}
