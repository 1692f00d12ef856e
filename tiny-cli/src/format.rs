//! Terminal rendering of reports, values, diagnostics and trees

use anyhow::Result;
use clap::ValueEnum;
use colored::*;
use std::fmt::Write;
use thiserror::Error;
use tiny_checker::{Type, VarBinding};
use tiny_eval::Value;
use tiny_lang::PipelineError;
use tiny_parser::{format_span_context, Expr, ExprKind};

/// AST display formats for `tiny parse`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TreeFormat {
    /// Indented node tree with spans
    Pretty,
    /// serde JSON
    Json,
    /// Rust debug representation
    Debug,
}

/// A failed line together with the source it failed on
#[derive(Debug, Error)]
#[error("{message}\n{context}")]
pub struct Diagnostic {
    pub message: String,
    pub context: String,
}

impl Diagnostic {
    pub fn new(source: &str, error: &PipelineError) -> Self {
        Self {
            message: error.to_string(),
            context: format_span_context(source, error.span()),
        }
    }
}

pub fn type_label(ty: Type) -> ColoredString {
    let label = ty.to_string();
    match ty {
        Type::Generic(_) => label.yellow(),
        _ => label.cyan(),
    }
}

/// `<name> :: <TYPE>`
pub fn binding_line(binding: &VarBinding) -> String {
    format!("{} :: {}", binding.name, type_label(binding.ty))
}

/// `Got <TYPE> value: <value>`
pub fn value_line(value: Value) -> String {
    let ty = match value {
        Value::Int(_) => Type::INT,
        Value::Bool(_) => Type::BOOL,
    };
    format!("Got {} value: {}", type_label(ty), value.to_string().bold())
}

/// Single-line diagnostic
pub fn diagnostic_line(error: &PipelineError) -> String {
    error.to_string().red().bold().to_string()
}

/// Diagnostic followed by the source line with a caret under the error
pub fn diagnostic(source: &str, error: &PipelineError) -> String {
    format!(
        "{}\n{}",
        diagnostic_line(error),
        format_span_context(source, error.span()).dimmed()
    )
}

pub fn render_tree(expr: &Expr, format: TreeFormat) -> Result<String> {
    match format {
        TreeFormat::Pretty => {
            let mut out = String::new();
            write_node(expr, 0, &mut out)?;
            Ok(out)
        }
        TreeFormat::Json => Ok(serde_json::to_string_pretty(expr)?),
        TreeFormat::Debug => Ok(format!("{:#?}", expr)),
    }
}

fn write_node(expr: &Expr, depth: usize, out: &mut String) -> std::fmt::Result {
    let label = match &expr.kind {
        ExprKind::Var(name) => format!("Var {}", name),
        ExprKind::Int(value) => format!("Int {}", value),
        ExprKind::Bool(value) => format!("Bool {}", value),
        ExprKind::Binary { op, .. } => format!("Binary {}", op.symbol()),
        ExprKind::Not(_) => "Not".to_string(),
        ExprKind::If { .. } => "If".to_string(),
        ExprKind::Let { .. } => "Let".to_string(),
    };
    writeln!(out, "{}{} {}", "  ".repeat(depth), label, expr.span.to_string().dimmed())?;

    for child in expr.children() {
        write_node(child, depth + 1, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_lang::{process_line, PipelineOptions};
    use tiny_parser::parse_source;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_report_lines() {
        plain();
        let output = process_line("(let y = 2 in (< x y))", &PipelineOptions::default()).unwrap();
        let lines: Vec<String> = output.inference.free_variables().map(binding_line).collect();
        assert_eq!(lines, vec!["x :: INT"]);
        assert_eq!(value_line(Value::Bool(false)), "Got BOOL value: false");
        assert_eq!(value_line(Value::Int(-4)), "Got INT value: -4");
    }

    #[test]
    fn test_diagnostic_points_at_error() {
        plain();
        let source = "(if x then 1 2)";
        let error = process_line(source, &PipelineOptions::default()).unwrap_err();
        assert_eq!(
            diagnostic(source, &error),
            "Syntax error: expected 'else' after the then branch, found '2'\n  (if x then 1 2)\n               ^"
        );
        assert_eq!(
            Diagnostic::new(source, &error).to_string(),
            diagnostic(source, &error)
        );
    }

    #[test]
    fn test_pretty_tree() {
        plain();
        let expr = parse_source("(! (< a 1))").unwrap();
        let rendered = render_tree(&expr, TreeFormat::Pretty).unwrap();
        assert_eq!(
            rendered,
            "Not 0..11\n  Binary < 3..10\n    Var a 6..7\n    Int 1 8..9\n"
        );
    }

    #[test]
    fn test_json_tree_parses_back() {
        let expr = parse_source("(let x = 1 in x)").unwrap();
        let rendered = render_tree(&expr, TreeFormat::Json).unwrap();
        let parsed: Expr = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, expr);
    }
}
