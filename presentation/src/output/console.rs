//! Console output formatter for assessment results

use advisor_domain::{AssessmentReport, RemoteAnalysis, ResultBundle, SuitabilityLevel};
use colored::{ColoredString, Colorize};

pub const DISCLAIMER: &str =
    "Disclaimer: Educational purposes only. Consult healthcare providers for medical advice.";

pub const DATA_SOURCE: &str = "Data Source: EndlessMedical API (https://www.endlessmedical.com)";

const DEMO_NOTICE: &str = "Demo Mode - Showing sample analysis (API unavailable)";

/// Formats assessment results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete assessment report
    pub fn format(report: &AssessmentReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("GLP-1 Assessment Results"));
        output.push('\n');

        if report.source.is_demo() {
            output.push_str(&format!("\n{}\n", DEMO_NOTICE.yellow()));
        }

        output.push_str(&format!(
            "\n{} {}   {} {}   {} {:.1}\n",
            "Features Analyzed:".cyan().bold(),
            report.features_analyzed,
            "Age:".cyan().bold(),
            report.profile.demographics.age,
            "BMI:".cyan().bold(),
            report.profile.demographics.bmi
        ));

        output.push_str(&Self::section_header("GLP-1 Medication Suitability"));
        output.push_str(&Self::verdict(report));

        output.push_str(&Self::section_header("Diagnostic Analysis"));
        match &report.remote {
            RemoteAnalysis::Completed(analysis) if analysis.is_empty() => {
                output.push_str("\nNo candidate conditions returned.\n");
            }
            RemoteAnalysis::Completed(analysis) => {
                output.push('\n');
                for condition in &analysis.conditions {
                    output.push_str(&format!(
                        "  {:>2}. {:<32} {:>5.1}%  {}\n",
                        condition.ranking,
                        condition.name,
                        condition.percent(),
                        condition.icd.as_deref().unwrap_or("-").dimmed()
                    ));
                }
                if let Some(triage) = &analysis.triage_level {
                    output.push_str(&format!("\n{} {}\n", "Triage level:".bold(), triage));
                }
            }
            RemoteAnalysis::Failed { error } => {
                output.push_str(&format!(
                    "\n{} {}\n",
                    "Analysis failed:".red().bold(),
                    error
                ));
            }
        }

        output.push_str(&format!("\n{}\n", DISCLAIMER.yellow()));
        output.push_str(&Self::footer());

        output
    }

    /// Verdict headline and risk factors only
    pub fn format_summary(report: &AssessmentReport) -> String {
        let mut output = format!("{}\n", "=== GLP-1 Suitability ===".cyan().bold());
        output.push_str(&Self::verdict(report));
        output
    }

    /// Format the exportable bundle as JSON
    pub fn format_json(bundle: &ResultBundle) -> String {
        serde_json::to_string_pretty(bundle).unwrap_or_else(|_| "{}".to_string())
    }

    fn verdict(report: &AssessmentReport) -> String {
        let mut output = format!(
            "\n{}\n",
            Self::level_colored(report.verdict.level, &report.verdict.level.headline())
        );

        if !report.verdict.risk_factors.is_empty() {
            output.push_str(&format!("\n{}\n", "Risk Factors Identified:".bold()));
            for description in report.verdict.descriptions() {
                output.push_str(&format!("  * {}\n", description));
            }
        }

        output
    }

    fn level_colored(level: SuitabilityLevel, text: &str) -> ColoredString {
        match level {
            SuitabilityLevel::High => text.green().bold(),
            SuitabilityLevel::Moderate => text.yellow().bold(),
            SuitabilityLevel::Low => text.blue().bold(),
            SuitabilityLevel::NotIndicated => text.red().bold(),
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}
