// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Offset to line/column translation.
//!
//! Inspired by rust-analyzer's `LineIndex`:
//! https://github.com/rust-lang/rust/blob/1.67.0/src/tools/rust-analyzer/crates/ide-db/src/line_index.rs

use crate::input::Input;
use crate::position::Position;

/// Sorted table of line starts for one input.
#[derive(Clone, Debug)]
pub struct LineIndex {
    /// Offset of the beginning of each line, zero-based
    line_offsets: Vec<usize>,
}

impl LineIndex {
    pub fn new<I: Input + ?Sized>(input: &I) -> LineIndex {
        LineIndex {
            line_offsets: input.line_starts(),
        }
    }

    /// Resolves `offset` against `input`, the same input the index was built from.
    pub fn position<I: Input + ?Sized>(&self, input: &I, offset: usize) -> Position {
        let line = self.line_offsets.partition_point(|&it| it <= offset) - 1;
        let line_start = self.line_offsets[line];

        Position {
            offset,
            line: line + 1,
            column: input.column(line_start, offset),
        }
    }

    /// Offset at which the line containing `offset` starts.
    pub fn line_start(&self, offset: usize) -> usize {
        let line = self.line_offsets.partition_point(|&it| it <= offset) - 1;
        self.line_offsets[line]
    }
}

/// Resolves `offset` in `input` without caching the line table.
///
/// Parses keep a cached [`LineIndex`] in their [`Env`](crate::Env); this is the
/// standalone form for callers holding only the input.
///
/// ```
/// let position = pegloom::position("ab\ncd", 4);
/// assert_eq!((position.line, position.column), (2, 2));
/// ```
pub fn position<I: Input + ?Sized>(input: &I, offset: usize) -> Position {
    LineIndex::new(input).position(input, offset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_index() {
        let text = "hello\nworld";
        let table = [
            (00, 1, 1),
            (01, 1, 2),
            (05, 1, 6),
            (06, 2, 1),
            (07, 2, 2),
            (08, 2, 3),
            (10, 2, 5),
            (11, 2, 6),
        ];

        let index = LineIndex::new(text);
        for &(offset, line, column) in &table {
            let position = index.position(text, offset);
            assert_eq!((position.line, position.column), (line, column));
        }
    }

    #[test]
    fn crlf_and_lone_cr() {
        let text = "a\r\nb\rc";
        let index = LineIndex::new(text);

        assert_eq!(index.position(text, 3).line, 2);
        assert_eq!(index.position(text, 5).line, 3);
        assert_eq!(index.position(text, 5).column, 1);
    }

    #[test]
    fn columns_count_chars() {
        let text = "ăș=x";
        let position = position(text, "ăș".len());

        assert_eq!(position.column, 3);
    }

    #[test]
    fn tokens_are_one_line() {
        let tokens = [1, 2, 3, 4];
        let position = position(&tokens[..], 3);

        assert_eq!((position.line, position.column), (1, 4));
    }
}
