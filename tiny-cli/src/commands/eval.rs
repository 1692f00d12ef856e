//! Evaluation command

use crate::format::{binding_line, value_line, Diagnostic};
use anyhow::{bail, Result};
use tiny_lang::{Pipeline, PipelineOptions};

pub fn eval_command(source: &str) -> Result<()> {
    let mut pipeline = Pipeline::new(PipelineOptions { evaluate: true });
    let output = pipeline
        .run(source)
        .map_err(|error| Diagnostic::new(source, &error))?;

    for binding in output.inference.free_variables() {
        println!("{}", binding_line(binding));
    }

    match output.value {
        Some(value) => {
            println!("{}", value_line(value));
            Ok(())
        }
        None => bail!("cannot evaluate an expression with free variables"),
    }
}
