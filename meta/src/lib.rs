// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! # pegloom_meta
//!
//! Reads grammars written in the pegloom grammar language: a PEG dialect
//! with labels, picks, semantic predicates and Rust code blocks.
//!
//! ```
//! let grammar = pegloom_meta::compile(r#"
//!     sum = left:number "+" right:number
//!     number "number" = $[0-9]+
//! "#).unwrap();
//!
//! assert_eq!(grammar.rules.len(), 2);
//! assert_eq!(grammar.rules[1].display_name.as_deref(), Some("number"));
//! ```
//!
//! The parser in [`parser`] is itself a `pegloom` rule graph.

#![doc(html_root_url = "https://docs.rs/pegloom_meta")]
#![warn(rust_2018_idioms, unused_qualifications)]

use std::fmt::Display;

pub mod ast;
mod error;
pub mod parser;
pub mod validator;

pub use crate::error::GrammarError;
pub use crate::parser::{parse_grammar, parse_grammar_with, MetaOptions};

/// Parses and validates `source`.
pub fn compile(source: &str) -> Result<ast::Grammar, Vec<GrammarError>> {
    compile_with(source, &MetaOptions::default())
}

/// Like [`compile`], with explicit parser options.
pub fn compile_with(
    source: &str,
    options: &MetaOptions,
) -> Result<ast::Grammar, Vec<GrammarError>> {
    let grammar = parse_grammar_with(source, options).map_err(|error| vec![error.into()])?;
    validator::validate(&grammar)?;

    Ok(grammar)
}

pub fn unwrap_or_report<T, E>(res: Result<T, E>) -> T
where
    E: IntoIterator,
    E::Item: Display,
{
    res.unwrap_or_else(|e| {
        panic!(
            "{}",
            "grammar error\n\n".to_owned()
                + &e.into_iter()
                    .map(|error| format!("{}", error))
                    .collect::<Vec<_>>()
                    .join("\n\n")
        )
    })
}
