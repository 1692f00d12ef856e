//! Interactive read-check-evaluate loop

use crate::config::CliConfig;
use crate::format::{binding_line, diagnostic, diagnostic_line, type_label, value_line};
use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, BufRead, Write};
use tiny_lang::{Pipeline, PipelineOptions};
use tracing::{debug, warn};

/// Per-session state shared by the interactive and plain loops
pub struct Session {
    pipeline: Pipeline,
    show_expression_type: bool,
    /// Render the source line with a caret under each error
    show_context: bool,
}

impl Session {
    pub fn new(config: &CliConfig, show_context: bool) -> Self {
        Self {
            pipeline: Pipeline::new(PipelineOptions {
                evaluate: config.evaluate,
            }),
            show_expression_type: config.show_expression_type,
            show_context,
        }
    }

    /// Handle one input line. Returns whether the line succeeded; blank
    /// lines count as success and print nothing.
    pub fn respond(&mut self, line: &str, out: &mut impl Write, err: &mut impl Write) -> io::Result<bool> {
        if line.trim().is_empty() {
            return Ok(true);
        }

        match self.pipeline.run(line) {
            Ok(output) => {
                for binding in output.inference.free_variables() {
                    writeln!(out, "{}", binding_line(binding))?;
                }
                if self.show_expression_type {
                    writeln!(out, "it :: {}", type_label(output.expression_type()))?;
                }
                if let Some(value) = output.value {
                    writeln!(out, "{}", value_line(value))?;
                }
                Ok(true)
            }
            Err(error) => {
                debug!(kind = ?error.kind(), "line rejected");
                let rendered = if self.show_context {
                    diagnostic(line, &error)
                } else {
                    diagnostic_line(&error)
                };
                writeln!(err, "{}", rendered)?;
                Ok(false)
            }
        }
    }
}

pub fn repl_command(config: &CliConfig, plain: bool) -> Result<()> {
    if plain {
        let stdin = io::stdin();
        let failed = run_plain(
            &mut Session::new(config, false),
            stdin.lock(),
            &mut io::stdout(),
            &mut io::stderr(),
        )?;
        debug!(failed, "input exhausted");
        Ok(())
    } else {
        run_interactive(&mut Session::new(config, true), config)
    }
}

/// Read lines until end of input. Returns the number of failed lines.
pub fn run_plain(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
) -> Result<usize> {
    let mut failed = 0;
    for line in input.lines() {
        let line = line.context("Failed to read input line")?;
        if !session.respond(&line, &mut *out, &mut *err)? {
            failed += 1;
        }
    }
    out.flush()?;
    Ok(failed)
}

fn run_interactive(session: &mut Session, config: &CliConfig) -> Result<()> {
    let mut editor = DefaultEditor::new().context("Failed to start line editor")?;

    if let Some(path) = &config.history_file {
        if editor.load_history(path).is_err() {
            debug!(path = %path.display(), "no previous history");
        }
    }

    let mut stdout = io::stdout();
    let mut stderr = io::stderr();

    loop {
        match editor.readline(&config.prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = editor.add_history_entry(line.as_str());
                }
                session.respond(&line, &mut stdout, &mut stderr)?;
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => break,
            Err(error) => return Err(error).context("Failed to read line"),
        }
    }

    if let Some(path) = &config.history_file {
        if let Err(error) = editor.save_history(path) {
            warn!(path = %path.display(), %error, "could not save history");
        }
    }

    Ok(())
}
