//! Progress reporting for assessment runs

use advisor_application::{AssessmentProgress, AssessmentStep};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::Mutex;

/// Reports progress during an assessment with a percentage bar
pub struct ProgressReporter {
    bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            bar: Mutex::new(None),
        }
    }

    fn style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(mut guard) = self.bar.lock() {
            let bar = guard.get_or_insert_with(|| {
                let bar = ProgressBar::new(100);
                bar.set_style(Self::style());
                bar
            });
            f(bar);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl AssessmentProgress for ProgressReporter {
    fn on_step(&self, step: AssessmentStep) {
        self.with_bar(|bar| {
            bar.set_position(u64::from(step.percent()));
            bar.set_message(step.label());
        });
    }

    fn on_fallback(&self, reason: &str) {
        self.with_bar(|bar| {
            bar.println(format!(
                "{} API unavailable ({}) - switching to demo mode",
                "!".yellow().bold(),
                reason
            ));
        });
    }

    fn on_finished(&self) {
        if let Ok(mut guard) = self.bar.lock()
            && let Some(bar) = guard.take()
        {
            bar.finish_and_clear();
        }
    }
}
