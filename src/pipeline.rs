//! Per-line processing pipeline

use crate::Result;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tiny_checker::{InferenceContext, InferenceResult, Type};
use tiny_eval::{Evaluator, Value};
use tiny_parser::{Expr, Parser};
use tracing::debug;

/// Pipeline stages, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    Parse,
    TypeCheck,
    Evaluate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Evaluate the expression once it type checks. Expressions with free
    /// variables are never evaluated.
    pub evaluate: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self { evaluate: true }
    }
}

/// Time spent in each stage that ran
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub parse: Duration,
    pub type_check: Duration,
    pub evaluate: Option<Duration>,
}

impl StageTimings {
    pub fn total(&self) -> Duration {
        self.parse + self.type_check + self.evaluate.unwrap_or_default()
    }
}

/// Everything a successful line produced
#[derive(Debug, Clone)]
pub struct LineOutput {
    /// The parsed tree, numbered by inference
    pub expr: Expr,
    pub inference: InferenceResult,
    pub value: Option<Value>,
    pub timings: StageTimings,
}

impl LineOutput {
    pub fn expression_type(&self) -> Type {
        self.inference.expression_type
    }

    /// `<name> :: <TYPE>` for every free variable, in first-occurrence order
    pub fn report_lines(&self) -> Vec<String> {
        self.inference
            .free_variables()
            .map(|binding| format!("{} :: {}", binding.name, binding.ty))
            .collect()
    }

    /// `Got <TYPE> value: <value>` when the line was evaluated
    pub fn value_line(&self) -> Option<String> {
        self.value
            .map(|value| format!("Got {} value: {}", value.type_name(), value))
    }
}

/// Runs lexing, parsing, inference and evaluation over single lines
#[derive(Debug, Default)]
pub struct Pipeline {
    options: PipelineOptions,
    inference: InferenceContext,
}

impl Pipeline {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            options,
            inference: InferenceContext::new(),
        }
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Run every enabled stage over `line`. Nothing partial is returned on
    /// failure.
    pub fn run(&mut self, line: &str) -> Result<LineOutput> {
        let mut timings = StageTimings::default();

        let start = Instant::now();
        let mut expr = Parser::from_source(line)?.parse()?;
        timings.parse = start.elapsed();
        self.finish_stage(PipelineStage::Parse, timings.parse);

        let start = Instant::now();
        let inference = self.inference.infer(&mut expr)?;
        timings.type_check = start.elapsed();
        self.finish_stage(PipelineStage::TypeCheck, timings.type_check);

        let closed = inference.free_variables().next().is_none();
        let value = if !self.options.evaluate {
            None
        } else if !closed {
            debug!("open expression, skipping evaluation");
            None
        } else {
            let start = Instant::now();
            let value = Evaluator::new().evaluate(&expr)?;
            let elapsed = start.elapsed();
            timings.evaluate = Some(elapsed);
            self.finish_stage(PipelineStage::Evaluate, elapsed);
            Some(value)
        };

        Ok(LineOutput {
            expr,
            inference,
            value,
            timings,
        })
    }

    fn finish_stage(&self, stage: PipelineStage, elapsed: Duration) {
        debug!(?stage, ?elapsed, "stage finished");
    }
}
