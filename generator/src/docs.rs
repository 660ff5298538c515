// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::collections::HashMap;

use pegloom_meta::ast::{Comment, Grammar};

#[derive(Debug, Default)]
pub(crate) struct DocComment {
    /// Multi-line grammar doc, joined with `\n`.
    pub grammar_doc: String,

    /// Rule name to its doc comment.
    pub line_docs: HashMap<String, String>,
}

/// Collects `//!` and `///` comments from a grammar parsed with comment
/// collection on.
///
/// ```ignore
/// //! This is a grammar doc
/// /// line doc 1
/// /// line doc 2
/// foo = "foo"
///
/// /// line doc 3
/// bar = "bar"
/// ```
///
/// gives:
///
/// ```ignore
/// grammar_doc = "This is a grammar doc"
/// line_docs = { "foo": "line doc 1\nline doc 2", "bar": "line doc 3" }
/// ```
///
/// A line doc belongs to the rule on the line right after it.
pub(crate) fn consume(grammar: &Grammar) -> DocComment {
    let comments = match &grammar.comments {
        Some(comments) => comments,
        None => return DocComment::default(),
    };

    let grammar_doc = comments
        .values()
        .filter_map(|comment| doc_text(comment, '!'))
        .collect::<Vec<_>>()
        .join("\n");

    let mut line_docs = HashMap::new();

    for rule in &grammar.rules {
        let mut line = rule.location.start.line;
        let mut docs = vec![];

        for comment in comments.range(..rule.location.start.offset).rev().map(|(_, c)| c) {
            match doc_text(comment, '/') {
                Some(text) if comment.location.start.line + 1 == line => {
                    docs.push(text);
                    line -= 1;
                }
                _ => break,
            }
        }

        if !docs.is_empty() {
            docs.reverse();
            line_docs.insert(rule.name.clone(), docs.join("\n"));
        }
    }

    DocComment {
        grammar_doc,
        line_docs,
    }
}

fn doc_text(comment: &Comment, marker: char) -> Option<&str> {
    if comment.multiline {
        return None;
    }

    let text = comment.text.strip_prefix(marker)?;
    Some(text.strip_prefix(' ').unwrap_or(text))
}
