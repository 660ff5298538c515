// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! # pegloom derive
//!
//! This crate works in conjunction with the [`pegloom` crate](https://docs.rs/pegloom) by
//! deriving a parser from a grammar written in the pegloom grammar language.
//!
//! ```ignore
//! use pegloom::{Options, Parser, Value};
//! use pegloom_derive::Parser;
//!
//! #[derive(Parser)]
//! #[grammar_inline = r#"
//!     sum = left:$[0-9]+ "+" right:$[0-9]+ {
//!         Value::Int(left.as_int().unwrap_or_default() + right.as_int().unwrap_or_default())
//!     }
//! "#]
//! struct SumParser;
//!
//! assert_eq!(SumParser::parse("1+1", &Options::default()), Ok(Value::Int(2)));
//! ```
//!
//! ## Grammar files
//!
//! `#[grammar = "path"]` reads a grammar relative to `CARGO_MANIFEST_DIR`, falling back to its
//! `src` directory; `#[grammar_inline = "..."]` takes the grammar itself. Several attributes are
//! concatenated in order. The derive emits an `include_str!` of every grammar file so Cargo
//! rebuilds the parser when one changes.
//!
//! ## Grammar
//!
//! A grammar is an optional initializer followed by rules. Rules end at a `;`, at the end of a
//! line or at the end of the grammar:
//!
//! ```ignore
//! {
//!     fn twice(value: Value) -> Value {
//!         Value::Int(value.as_int().unwrap_or_default() * 2)
//!     }
//! }
//!
//! double "doubled number" = n:$[0-9]+ { twice(n) }
//! ```
//!
//! The initializer is a list of Rust items placed next to the generated rules, so action code
//! can call them. A string after the rule name is its display name: errors report `expected
//! doubled number` instead of the rule's contents.
//!
//! Comments are `// ...` and `/* ... */`. A `///` comment right above a rule documents its
//! `Rule` variant and `//!` comments document the `Rule` enum.
//!
//! ### Expressions
//!
//! | Expression     | Usage                                                        |
//! |----------------|--------------------------------------------------------------|
//! | `"a"`, `'a'`   | matches the exact string `a`                                 |
//! | `"a"i`         | matches `a` case insensitively                               |
//! | `[a-z_]`       | matches one character of the class                           |
//! | `[^a-z]i`      | negated, case-insensitive class                              |
//! | `.`            | matches any one character                                    |
//! | `a`            | matches rule `a`                                             |
//! | `(e)`          | matches `e`                                                  |
//! | `e1 e2`        | matches the sequence `e1` `e2`                               |
//! | `e1 / e2`      | matches `e1`, or `e2` if `e1` failed                         |
//! | `e?` `e*` `e+` | optional and repeated `e`                                    |
//! | `&e` `!e`      | looks ahead for `e` (or its absence) without consuming       |
//! | `$e`           | matches `e`, its value being the matched text                |
//! | `x:e`          | binds the value of `e` to `x`                                |
//! | `@e` `@x:e`    | picks `e`: the sequence's value is made of picked elements   |
//! | `e { code }`   | replaces the value of `e` by the value of `code`             |
//! | `&{ code }`    | succeeds if `code` is `true`                                 |
//! | `!{ code }`    | succeeds if `code` is `false`                                |
//!
//! Strings follow JavaScript escapes (`\n`, `\x41`, `\u0041`, `\u{1F600}`, ...).
//!
//! ## Values
//!
//! Every rule produces a value, `pegloom::Value` unless `#[value = "path::Type"]` names another
//! type implementing `pegloom::MatchValue<str>`. Literals, classes and `$e` produce text, a
//! sequence produces the list of its elements (or of its picked elements, or the single one),
//! repetitions produce lists and a missing `e?` produces the absent value.
//!
//! ## Code blocks
//!
//! Action code is a Rust block evaluating to a value. Labels in scope are bound to local
//! variables and `ctx`, a `pegloom::ActionContext`, gives the matched text, its location and
//! the parse options. `return Err(ctx.error("..."))` aborts the whole parse:
//!
//! ```ignore
//! byte = digits:$[0-9]+ {
//!     match digits.as_int() {
//!         Some(n) if n < 256 => Value::Int(n),
//!         _ => return Err(ctx.error("byte out of range")),
//!     }
//! }
//! ```
//!
//! Predicate code evaluates to a `bool`.
//!
//! A code block ends at the brace balancing its opening one. Braces inside string and char
//! literals are skipped; braces inside comments and raw strings are counted.
//!
//! ## `Rule`
//!
//! Every rule of the grammar populates a generated `enum` called `Rule`. This implements
//! `pegloom`'s `RuleType`, and `Parser::parse_rule` starts parsing from any of its variants.

#![doc(html_root_url = "https://docs.rs/pegloom_derive")]
#![warn(rust_2018_idioms, unused_qualifications)]

use proc_macro::TokenStream;

/// The main method that's called by the proc macro
/// (a wrapper around `pegloom_generator::derive_parser`)
#[proc_macro_derive(Parser, attributes(grammar, grammar_inline, value))]
pub fn derive_parser(input: TokenStream) -> TokenStream {
    pegloom_generator::derive_parser(input.into(), true).into()
}
