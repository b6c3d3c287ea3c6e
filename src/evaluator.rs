//! Evaluators turn a sampled parameter value into an outcome
//!
//! The optimizer never looks at the value it samples; it only needs to know
//! whether that value won, lost or drew. Implement [`Evaluator`] for anything
//! that can answer that question, or use one of the adapters here.

use std::process::Command;

use log::{debug, warn};

use crate::outcome::Outcome;

/// Trait for anything that can score a sampled parameter value
///
/// Calls are blocking and strictly sequential; the optimizer waits for each
/// answer before starting the next iteration.
pub trait Evaluator {
    /// Evaluates `parameter = value` and reports the outcome
    fn evaluate(&mut self, parameter: &str, value: f64) -> Outcome;

    /// Number of evaluations so far that failed and were recovered from
    ///
    /// Evaluators that cannot fail keep the default of zero.
    fn failures(&self) -> usize {
        0
    }
}

impl<E: Evaluator + ?Sized> Evaluator for Box<E> {
    fn evaluate(&mut self, parameter: &str, value: f64) -> Outcome {
        (**self).evaluate(parameter, value)
    }

    fn failures(&self) -> usize {
        (**self).failures()
    }
}

impl<E: Evaluator + ?Sized> Evaluator for &mut E {
    fn evaluate(&mut self, parameter: &str, value: f64) -> Outcome {
        (**self).evaluate(parameter, value)
    }

    fn failures(&self) -> usize {
        (**self).failures()
    }
}

/// Evaluator backed by a closure
///
/// The closure may carry state, e.g. to script a sequence of outcomes.
#[derive(Debug, Clone)]
pub struct FnEvaluator<F>
where
    F: FnMut(&str, f64) -> Outcome,
{
    evaluate: F,
}

impl<F> FnEvaluator<F>
where
    F: FnMut(&str, f64) -> Outcome,
{
    /// Creates a new evaluator from the given function
    pub fn new(evaluate: F) -> Self {
        FnEvaluator { evaluate }
    }
}

impl<F> Evaluator for FnEvaluator<F>
where
    F: FnMut(&str, f64) -> Outcome,
{
    fn evaluate(&mut self, parameter: &str, value: f64) -> Outcome {
        (self.evaluate)(parameter, value)
    }
}

/// Evaluator that runs an external program once per sample
///
/// The program is invoked as `program [args..] <parameter> <value>`, with the
/// value printed to five decimals, and must print `W`, `L` or `D` as the first
/// token of its standard output.
///
/// A program that exits abnormally is not fatal: whatever it printed is still
/// used as the outcome. If it cannot be started, or prints nothing usable, the
/// sample is recorded as a loss. Both cases are logged and counted in
/// [`Evaluator::failures`].
#[derive(Debug, Clone)]
pub struct CommandEvaluator {
    program: String,
    args: Vec<String>,
    failures: usize,
}

impl CommandEvaluator {
    /// Creates an evaluator that runs `program`
    pub fn new(program: impl Into<String>) -> Self {
        CommandEvaluator {
            program: program.into(),
            args: Vec::new(),
            failures: 0,
        }
    }

    /// Adds an argument placed before the parameter name and value
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds several arguments placed before the parameter name and value
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

/// Reads the outcome token from a program's standard output
fn parse_output(stdout: &[u8]) -> crate::Result<Outcome> {
    let text = String::from_utf8_lossy(stdout);
    text.split_whitespace().next().unwrap_or("").parse()
}

impl Evaluator for CommandEvaluator {
    fn evaluate(&mut self, parameter: &str, value: f64) -> Outcome {
        let output = Command::new(&self.program)
            .args(&self.args)
            .arg(parameter)
            .arg(format!("{:.5}", value))
            .output();

        let output = match output {
            Ok(output) => output,
            Err(err) => {
                self.failures += 1;
                warn!(
                    "failed to run {}: {}, counting the sample as a loss",
                    self.program, err
                );
                return Outcome::Loss;
            }
        };

        let mut failed = !output.status.success();
        if failed {
            warn!(
                "{} exited with {}, using its output anyway",
                self.program, output.status
            );
        }

        let outcome = match parse_output(&output.stdout) {
            Ok(outcome) => outcome,
            Err(err) => {
                failed = true;
                warn!("{}: {}, counting the sample as a loss", self.program, err);
                Outcome::Loss
            }
        };

        if failed {
            self.failures += 1;
        }
        debug!("{} {} {:.5} -> {}", self.program, parameter, value, outcome);
        outcome
    }

    /// Number of evaluations where the program failed or its output was unusable
    fn failures(&self) -> usize {
        self.failures
    }
}
