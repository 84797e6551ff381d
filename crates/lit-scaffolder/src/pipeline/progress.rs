//! User-facing progress reporting

use colored::Colorize;
use std::fmt;

/// Position and label of a pipeline step, for reporting only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipelineStep {
    pub ordinal: usize,
    pub label: &'static str,
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.- {}", self.ordinal, self.label)
    }
}

/// Receives a notification before each step runs, plus any recovered failure
pub trait Progress {
    fn step(&mut self, step: &PipelineStep);

    fn warn(&mut self, step: &PipelineStep, message: &str);
}

/// Prints `N.- label` lines to the terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn step(&mut self, step: &PipelineStep) {
        println!("{}.- {}", step.ordinal.to_string().blue(), step.label);
    }

    fn warn(&mut self, step: &PipelineStep, message: &str) {
        eprintln!(
            "{} {} ({})",
            "Warning:".yellow(),
            message,
            step.label.dimmed()
        );
    }
}

/// Keeps every notification in memory
#[derive(Debug, Clone, Default)]
pub struct RecordedProgress {
    pub steps: Vec<PipelineStep>,
    pub warnings: Vec<(PipelineStep, String)>,
}

impl Progress for RecordedProgress {
    fn step(&mut self, step: &PipelineStep) {
        self.steps.push(*step);
    }

    fn warn(&mut self, step: &PipelineStep, message: &str) {
        self.warnings.push((*step, message.to_string()));
    }
}
