//! AST display command

use crate::format::{render_tree, Diagnostic, TreeFormat};
use anyhow::Result;
use tiny_lang::PipelineError;
use tiny_parser::parse_source;

pub fn parse_command(source: &str, format: TreeFormat) -> Result<()> {
    let expr = parse_source(source)
        .map_err(|error| Diagnostic::new(source, &PipelineError::from(error)))?;

    print!("{}", render_tree(&expr, format)?);
    if format != TreeFormat::Pretty {
        println!();
    }
    Ok(())
}
