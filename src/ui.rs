// UI layer: console output of the test client.
// A spinner runs while a step talks to the server; once the step is done its
// notes and a coloured verdict are printed.

use std::time::Duration;

use anyhow::Result;
use crossterm::style::Stylize;
use dialoguer::{Input, Password};
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::TestClientConfig;
use crate::scenario::{ScenarioObserver, ScenarioReport, Step, StepReport, StepStatus};

/// Prints scenario progress to stdout.
#[derive(Default)]
pub struct ConsoleReporter {
    spinner: Option<ProgressBar>,
}

impl ConsoleReporter {
    pub fn new() -> Self {
        ConsoleReporter::default()
    }
}

impl ScenarioObserver for ConsoleReporter {
    fn step_started(&mut self, step: &Step) {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(format!("{step}..."));
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn step_finished(&mut self, report: &StepReport) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
        let verdict = match &report.status {
            StepStatus::Passed => "PASS".green().bold(),
            StepStatus::Skipped(_) => "SKIP".yellow().bold(),
            StepStatus::Failed(_) => "FAIL".red().bold(),
        };
        println!("[{verdict}] {}", report.step);
        for note in &report.notes {
            println!("{note}");
        }
        match &report.status {
            StepStatus::Passed => {}
            StepStatus::Skipped(reason) => println!("{}", format!("  skipped: {reason}").dark_grey()),
            StepStatus::Failed(error) => println!("{}", format!("  {error}").red()),
        }
    }
}

pub fn print_summary(report: &ScenarioReport) {
    println!();
    let line = format!(
        "{} passed, {} skipped, {} failed",
        report.passed(),
        report.skipped(),
        report.failed()
    );
    if report.is_success() {
        println!("{}", line.green().bold());
    } else {
        println!("{}", line.red().bold());
    }
}

/// Ask for whatever credentials the configuration left open.
pub fn prompt_credentials(config: &TestClientConfig) -> Result<(String, String)> {
    let user_name = match &config.username {
        Some(user) => user.clone(),
        None => Input::new().with_prompt("User name").interact_text()?,
    };
    // `Password` hides input in the terminal.
    let password = match &config.password {
        Some(password) => password.clone(),
        None => Password::new()
            .with_prompt(format!("Password for {user_name}"))
            .interact()?,
    };
    Ok((user_name, password))
}
