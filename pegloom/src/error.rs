// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Types for different kinds of parsing failures.

use std::fmt;

use thiserror::Error;

use crate::env::Env;
use crate::input::Input;
use crate::position::{Location, Position};
use crate::result::{Failure, FailureJson};

/// An unrecoverable error raised by grammar code.
///
/// Unlike a [`Failure`], an abort is never caught by an enclosing choice; it
/// travels straight out of the top-level match.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("{message} (at {})", .location.start)]
pub struct Abort {
    pub message: String,
    pub location: Location,
}

impl Abort {
    pub fn new(message: impl Into<String>, location: Location) -> Abort {
        Abort {
            message: message.into(),
            location,
        }
    }
}

/// Error returned by a top-level parse.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    /// The input does not match the grammar.
    #[error("{0}")]
    Failed(Box<SyntaxError>),
    /// Grammar code aborted the parse.
    #[error(transparent)]
    Aborted(#[from] Abort),
    /// The requested start rule does not exist.
    #[error("unknown start rule {0:?}")]
    UnknownStartRule(String),
}

impl ParseError {
    /// Offset the error points at.
    pub fn offset(&self) -> Option<usize> {
        match self {
            ParseError::Failed(error) => Some(error.position.offset),
            ParseError::Aborted(abort) => Some(abort.location.start.offset),
            ParseError::UnknownStartRule(_) => None,
        }
    }
}

/// A rendered matching failure.
#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxError {
    /// `expected ... but found ...`
    pub message: String,
    /// Rendered expectations at the furthest offset reached.
    pub expected: Vec<String>,
    /// What was found there instead.
    pub found: String,
    pub position: Position,
    /// The source line holding `position`, for string inputs.
    pub line: Option<String>,
    /// The whole failure tree.
    pub failure: FailureJson,
}

impl SyntaxError {
    pub(crate) fn new<I: Input + ?Sized, V>(
        failure: &Failure<I, V>,
        input: &I,
        env: &Env<V>,
    ) -> SyntaxError {
        let (offset, expected) = failure.expectations();
        let found = input.describe_at(offset);
        let index = env.line_index(input);

        SyntaxError {
            message: parsing_error_message(&expected, &found),
            expected,
            found,
            position: index.position(input, offset),
            line: input.line_text(index.line_start(offset)),
            failure: failure.to_json(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let line = match &self.line {
            Some(line) => line,
            None => return write!(f, "{} (at offset {})", self.message, self.position.offset),
        };

        let number = self.position.line.to_string();
        let spacing = " ".repeat(number.len());

        writeln!(f, "{}--> {}", spacing, self.position)?;
        writeln!(f, "{} |", spacing)?;
        writeln!(f, "{} | {}", number, line)?;
        writeln!(
            f,
            "{} | {}^---",
            spacing,
            " ".repeat(self.position.column.saturating_sub(1))
        )?;
        writeln!(f, "{} |", spacing)?;
        write!(f, "{} = {}", spacing, self.message)
    }
}

fn parsing_error_message(expected: &[String], found: &str) -> String {
    if expected.is_empty() {
        format!("unexpected {}", found)
    } else {
        format!("expected {} but found {}", enumerate(expected), found)
    }
}

fn enumerate(items: &[String]) -> String {
    match items.len() {
        1 => items[0].clone(),
        2 => format!("{} or {}", items[0], items[1]),
        l => {
            let separated = items[..l - 1].join(", ");
            format!("{}, or {}", separated, items[l - 1])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn enumerations() {
        assert_eq!(enumerate(&strings(&["a"])), "a");
        assert_eq!(enumerate(&strings(&["a", "b"])), "a or b");
        assert_eq!(enumerate(&strings(&["a", "b", "c"])), "a, b, or c");
    }

    #[test]
    fn messages() {
        assert_eq!(
            parsing_error_message(&strings(&["\"+\""]), "\"x\""),
            "expected \"+\" but found \"x\""
        );
        assert_eq!(parsing_error_message(&[], "\"x\""), "unexpected \"x\"");
    }

    #[test]
    fn display() {
        let error = SyntaxError {
            message: "expected \"+\" but found \"x\"".to_owned(),
            expected: strings(&["\"+\""]),
            found: "\"x\"".to_owned(),
            position: Position {
                offset: 1,
                line: 1,
                column: 2,
            },
            line: Some("1x".to_owned()),
            failure: FailureJson {
                ok: false,
                offset: 0,
                expected: "sum".to_owned(),
                prev_fail: None,
            },
        };

        assert_eq!(
            format!("{}", error),
            [
                " --> 1:2",
                "  |",
                "1 | 1x",
                "  |  ^---",
                "  |",
                "  = expected \"+\" but found \"x\"",
            ]
            .join("\n")
        );
    }
}
