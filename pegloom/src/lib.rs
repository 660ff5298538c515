// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! # pegloom. PEG rule combinators
//!
//! pegloom builds recursive-descent parsers out of [`Rule`]s: composable
//! parsing-expression-grammar primitives that match strings or token slices,
//! bind named captures, run actions and report every reason a position
//! failed to parse as a tree of [`Failure`]s.
//!
//! ```
//! use pegloom::rules::*;
//! use pegloom::{Options, Rule, Value};
//!
//! let number: Rule<str, Value> = as_slice(one_or_more(char_class(
//!     vec![ClassPart::Range('0', '9')],
//!     false,
//!     false,
//! )));
//! let sum = action(
//!     seq([label("left", number.clone()), omit(seq_equal("+")), label("right", number)]),
//!     |ctx| {
//!         let left = ctx.capture("left").as_int().unwrap_or_default();
//!         let right = ctx.capture("right").as_int().unwrap_or_default();
//!         Ok(Value::Int(left + right))
//!     },
//! );
//!
//! assert_eq!(pegloom::parse(&sum, "1+1", Options::default()), Ok(Value::Int(2)));
//! ```
//!
//! Grammars written in the pegloom grammar language are turned into rule
//! graphs by `pegloom_derive`, or interpreted at runtime by `pegloom_vm`.
//!
//! ## Matching
//!
//! Every rule is matched with [`Rule::match_at`], which returns a
//! [`MatchResult`] or an [`Abort`]. A failure is data, and an enclosing
//! choice may try another alternative; an abort is raised by grammar code and
//! ends the parse. Captures live in an [`Env`], a persistent list that grows
//! as a sequence advances and is simply dropped when it backtracks.

#![doc(html_root_url = "https://docs.rs/pegloom")]
#![warn(rust_2018_idioms, unused_qualifications)]

#[doc(hidden)]
pub extern crate once_cell;

pub use crate::action::{ActionContext, RecoverContext};
pub use crate::context::{MatchContext, MatchObserver};
pub use crate::env::{Captures, Env, Options};
pub use crate::error::{Abort, ParseError, SyntaxError};
pub use crate::input::Input;
pub use crate::line_index::{position, LineIndex};
pub use crate::parser::{parse, parse_env, parse_with_state, Parser, RuleType};
pub use crate::position::{Location, Position};
pub use crate::result::{Failure, FailureJson, MatchResult, PrevFail, PrevFailJson, Success};
pub use crate::rule::{Element, Matcher, Rule, DEFAULT_RENDER_DEPTH};
pub use crate::value::{MatchValue, Value};

mod action;
mod context;
mod env;
mod error;
mod input;
mod line_index;
#[macro_use]
mod macros;
mod parser;
mod position;
mod result;
mod rule;
pub mod rules;
mod value;
