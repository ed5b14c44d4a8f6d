//! `eval` and `repl` commands.
//!
//! Both take their input and output streams as parameters so they can be
//! driven from tests.

use std::io::{self, BufRead, Write};

use duel_eval::{Session, SessionError, TrackedRender};
use duel_heap::demo::demo;
use duel_heap::Heap;
use duel_parse::ParseError;
use tracing::debug;

/// Session settings for `duel repl`.
#[derive(Clone, Debug)]
pub struct ReplOptions {
    /// Cap on results shown per tracked query.
    pub max_results: Option<usize>,
    /// Start each submitted query with an empty alias table.
    pub fresh_bindings: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        ReplOptions {
            max_results: Some(50),
            fresh_bindings: true,
        }
    }
}

/// Session over the demo program.
pub fn demo_session(options: &ReplOptions) -> Session<Heap> {
    Session::builder(demo())
        .max_results(options.max_results)
        .fresh_bindings(options.fresh_bindings)
        .build()
}

/// Source line with a caret under `range`, then the message.
fn caret(source: &str, range: std::ops::Range<usize>, message: &str) -> String {
    let start = range.start.min(source.len());
    let width = range.len().max(1);
    format!(
        "{source}\n{}{}\nerror: {message}",
        " ".repeat(start),
        "^".repeat(width)
    )
}

fn parse_error(source: &str, err: &ParseError) -> String {
    err.render(source)
}

/// Error text for a failed query, pointing into `source` when possible.
pub fn render_error(source: &str, err: &SessionError) -> String {
    match err {
        SessionError::Parse(err) => parse_error(source, err),
        SessionError::Eval(err) => match err.span {
            Some(span) => caret(source, span.to_range(), &err.message),
            None => format!("error: {}", err.message),
        },
        SessionError::NoSuchExpression(_) => format!("error: {err}"),
    }
}

/// Evaluate `query` and write `label = value` lines; errors go to `err`.
pub fn eval_query(
    session: &Session<Heap>,
    query: &str,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    match session.collect(query) {
        Ok(results) => {
            for (label, value) in results {
                writeln!(out, "{label} = {value}")?;
            }
            Ok(true)
        }
        Err(error) => {
            writeln!(err, "{}", render_error(query, &error))?;
            Ok(false)
        }
    }
}

/// `duel eval`: every query in order. False if any failed.
pub fn eval_queries(queries: &[String], out: &mut impl Write, err: &mut impl Write) -> bool {
    let session = demo_session(&ReplOptions {
        max_results: None,
        ..ReplOptions::default()
    });
    let mut ok = true;
    for query in queries {
        match eval_query(&session, query, out, err) {
            Ok(true) => {}
            Ok(false) | Err(_) => ok = false,
        }
    }
    ok
}

fn write_tracked(rendered: &[TrackedRender], out: &mut impl Write) -> io::Result<()> {
    if rendered.is_empty() {
        return writeln!(out, "no tracked expressions");
    }
    for render in rendered {
        writeln!(out, "{}: {}", render.number, render.text)?;
        for (label, value) in &render.results {
            writeln!(out, "    {label} = {value}")?;
        }
        if render.truncated {
            writeln!(out, "    ...")?;
        }
        if let Some(error) = &render.error {
            writeln!(out, "    error: {error}")?;
        }
    }
    Ok(())
}

const REPL_HELP: &str = "\
add <expr>   track a query
del <n>      stop tracking query n
show         evaluate every tracked query
help         show this message
quit         leave
anything else is evaluated once";

/// `duel repl`: read commands until `quit` or end of input.
pub fn run_repl(
    options: &ReplOptions,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut session = demo_session(options);
    let mut line = String::new();
    loop {
        write!(out, "(duel) ")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        let line = line.trim();
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let rest = rest.trim();
        debug!(command, "repl command");
        match command {
            "" => {}
            "quit" | "exit" => return Ok(()),
            "help" => writeln!(out, "{REPL_HELP}")?,
            "show" => write_tracked(&session.render_tracked(), out)?,
            "add" => match session.add(rest) {
                Ok(number) => writeln!(out, "added expression {number}")?,
                Err(err) => writeln!(out, "{}", render_error(rest, &err))?,
            },
            "del" => {
                let removed = rest
                    .parse()
                    .map_err(|_| format!("error: '{rest}' is not an expression number"))
                    .and_then(|number| {
                        session
                            .remove(number)
                            .map_err(|err| render_error(rest, &err))
                    });
                if let Err(message) = removed {
                    writeln!(out, "{message}")?;
                }
            }
            _ => {
                let mut errors = Vec::new();
                eval_query(&session, line, out, &mut errors)?;
                out.write_all(&errors)?;
            }
        }
    }
}

#[cfg(test)]
mod tests;
