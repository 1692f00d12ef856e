//! Type checking commands

use crate::format::{binding_line, type_label, Diagnostic};
use crate::utils::{format_duration, print_subheader};
use anyhow::Result;
use colored::*;
use tiny_lang::{Pipeline, PipelineOptions};

pub fn check_command(source: &str, detailed: bool) -> Result<()> {
    let mut pipeline = Pipeline::new(PipelineOptions { evaluate: false });
    let output = pipeline
        .run(source)
        .map_err(|error| Diagnostic::new(source, &error))?;

    for binding in output.inference.free_variables() {
        println!("{}", binding_line(binding));
    }

    if detailed {
        print_subheader("Type Information:");
        println!("  expression :: {}", type_label(output.expression_type()));
        println!("  {} type variables", output.inference.var_count.to_string().cyan());
        println!("  {} constraints solved", output.inference.constraint_count.to_string().cyan());
        println!("  checked in {}", format_duration(output.timings.total()));
    }

    Ok(())
}
