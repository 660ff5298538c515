// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! # pegloom_vm
//!
//! Runs a grammar without generating code: every grammar rule is turned into
//! a `pegloom` rule at runtime.
//!
//! Code blocks cannot be compiled here, so actions and semantic predicates
//! are handed to an [`ActionHandler`] along with their source text.
//!
//! ```
//! use pegloom::{Options, Value};
//! use pegloom_vm::Vm;
//!
//! let vm = Vm::compile(r#"
//!     pair = @key:$[a-z]+ "=" @value:$[0-9]+
//! "#).unwrap();
//!
//! assert_eq!(
//!     vm.parse("pair", "x=1", &Options::default()),
//!     Ok(Value::List(vec![Value::Str("x".to_owned()), Value::Str("1".to_owned())]))
//! );
//! ```

#![doc(html_root_url = "https://docs.rs/pegloom_vm")]
#![warn(rust_2018_idioms, unused_qualifications)]

use std::collections::HashMap;
use std::sync::{Arc, Weak};

use log::debug;
use once_cell::sync::OnceCell;

use pegloom::rules::*;
use pegloom::{Abort, ActionContext, Options, ParseError, Value};
use pegloom_meta::ast::{Expr, ExprKind, Grammar};
use pegloom_meta::{validator, GrammarError};

type Rule = pegloom::Rule<str, Value>;

/// Runs the code blocks of a grammar.
pub trait ActionHandler: Send + Sync {
    /// The value of the action `code`. Passes the inner value through by
    /// default.
    fn action(&self, code: &str, ctx: &ActionContext<'_, str, Value>) -> Result<Value, Abort> {
        let _ = code;
        Ok(ctx.value())
    }

    /// The outcome of the predicate `code`. Always `true` by default.
    fn predicate(&self, code: &str, ctx: &ActionContext<'_, str, Value>) -> Result<bool, Abort> {
        let _ = (code, ctx);
        Ok(true)
    }
}

/// Ignores code blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassThrough;

impl ActionHandler for PassThrough {}

struct Table {
    rules: Vec<OnceCell<Rule>>,
}

/// A grammar ready to parse.
///
/// Rule references go through a weak handle on the rule table, so a rule
/// kept past its `Vm` fails wherever it refers to another rule.
pub struct Vm {
    table: Arc<Table>,
    names: HashMap<String, usize>,
    order: Vec<String>,
}

impl Vm {
    /// Builds `grammar` with code blocks ignored.
    pub fn new(grammar: &Grammar) -> Result<Vm, Vec<GrammarError>> {
        Vm::with_handler(grammar, Arc::new(PassThrough))
    }

    /// Builds `grammar`, running its code blocks with `handler`.
    pub fn with_handler(
        grammar: &Grammar,
        handler: Arc<dyn ActionHandler>,
    ) -> Result<Vm, Vec<GrammarError>> {
        validator::validate(grammar)?;

        let order: Vec<String> = grammar.rules.iter().map(|rule| rule.name.clone()).collect();
        let names: HashMap<String, usize> = order
            .iter()
            .enumerate()
            .map(|(index, name)| (name.clone(), index))
            .collect();

        let table = Arc::new(Table {
            rules: grammar.rules.iter().map(|_| OnceCell::new()).collect(),
        });

        let builder = Builder {
            table: Arc::downgrade(&table),
            names: &names,
            handler,
        };

        for (cell, rule) in table.rules.iter().zip(&grammar.rules) {
            let built = builder.build(&rule.expr).map_err(|error| vec![error])?;
            let built = match &rule.display_name {
                Some(display_name) => named(built, display_name.clone()),
                None => built,
            };

            let fresh = cell.set(built).is_ok();
            debug_assert!(fresh, "rule {} built twice", rule.name);
        }

        debug!("built {} rules", order.len());

        Ok(Vm {
            table,
            names,
            order,
        })
    }

    /// Parses and builds `source` with code blocks ignored.
    pub fn compile(source: &str) -> Result<Vm, Vec<GrammarError>> {
        Vm::new(&pegloom_meta::compile(source)?)
    }

    /// Names of the grammar's rules, in grammar order.
    pub fn rule_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Parses `input` starting from the rule `rule`; the whole input must
    /// match.
    pub fn parse(&self, rule: &str, input: &str, options: &Options) -> Result<Value, ParseError> {
        let start = self
            .names
            .get(rule)
            .and_then(|&index| self.table.rules[index].get())
            .ok_or_else(|| ParseError::UnknownStartRule(rule.to_owned()))?;

        pegloom::parse(start, input, options.clone())
    }

    /// Parses `input` starting from `options.start_rule`, or from the
    /// grammar's first rule when none is given.
    pub fn parse_default(&self, input: &str, options: &Options) -> Result<Value, ParseError> {
        let rule = match options.start_rule.as_deref() {
            Some(rule) => rule,
            None => self.order.first().map(String::as_str).unwrap_or_default(),
        };

        self.parse(rule, input, options)
    }
}

struct Builder<'a> {
    table: Weak<Table>,
    names: &'a HashMap<String, usize>,
    handler: Arc<dyn ActionHandler>,
}

impl Builder<'_> {
    fn build(&self, expr: &Expr) -> Result<Rule, GrammarError> {
        Ok(match &expr.kind {
            ExprKind::Choice { alternatives } => choice(
                alternatives
                    .iter()
                    .map(|alternative| self.build(alternative))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            ExprKind::Action { expr, code } => {
                let handler = Arc::clone(&self.handler);
                let code = code.code.clone();

                action(self.build(expr)?, move |ctx| handler.action(&code, ctx))
            }
            ExprKind::Sequence { elements } => self.build_sequence(elements)?,
            ExprKind::Labeled { .. } => self.build_sequence(std::slice::from_ref(expr))?,
            ExprKind::Text { expr } => as_slice(self.build(expr)?),
            ExprKind::SimpleAnd { expr } => next_is(self.build(expr)?),
            ExprKind::SimpleNot { expr } => next_is_not(self.build(expr)?),
            ExprKind::Optional { expr } => zero_or_one(self.build(expr)?),
            ExprKind::ZeroOrMore { expr } => zero_or_more(self.build(expr)?),
            ExprKind::OneOrMore { expr } => one_or_more(self.build(expr)?),
            ExprKind::Group { expr } => self.build(expr)?,
            ExprKind::SemanticAnd { code } => {
                let handler = Arc::clone(&self.handler);
                let code = code.code.clone();

                assert(move |ctx| handler.predicate(&code, ctx))
            }
            ExprKind::SemanticNot { code } => {
                let handler = Arc::clone(&self.handler);
                let code = code.code.clone();

                assert_not(move |ctx| handler.predicate(&code, ctx))
            }
            ExprKind::RuleRef { name } => {
                let index = *self.names.get(name).ok_or_else(|| GrammarError::Undefined {
                    name: name.clone(),
                    location: expr.location,
                })?;
                let table = Weak::clone(&self.table);
                let target = name.clone();

                // Once the Vm is gone its rules have nothing left to call and
                // never match.
                dynamic_reference(name.clone(), move || {
                    match table.upgrade().and_then(|table| table.rules[index].get().cloned()) {
                        Some(rule) => rule,
                        None => named(assert_not(|_| Ok(true)), target.clone()),
                    }
                })
            }
            ExprKind::Literal { value, ignore_case } => {
                if *ignore_case {
                    literal_ci(value)
                } else {
                    seq_equal(value.as_str())
                }
            }
            ExprKind::Class {
                parts,
                inverted,
                ignore_case,
            } => char_class(parts.clone(), *inverted, *ignore_case),
            ExprKind::Any => any_one(),
        })
    }

    fn build_sequence(&self, elements: &[Expr]) -> Result<Rule, GrammarError> {
        let picks = elements
            .iter()
            .any(|element| matches!(element.kind, ExprKind::Labeled { pick: true, .. }));

        let elements = elements
            .iter()
            .map(|element| match &element.kind {
                ExprKind::Labeled { label, pick, expr } => {
                    let rule = self.build(expr)?;
                    let element = match label {
                        Some(label) => pegloom::rules::label(label.name.as_str(), rule),
                        None => elem(rule),
                    };

                    Ok(if picks && !pick {
                        element.omitted()
                    } else {
                        element
                    })
                }
                _ => {
                    let rule = self.build(element)?;
                    Ok(if picks { omit(rule) } else { elem(rule) })
                }
            })
            .collect::<Result<Vec<_>, GrammarError>>()?;

        Ok(seq(elements))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(text: &str) -> Value {
        Value::Str(text.to_owned())
    }

    #[test]
    fn values() {
        let vm = Vm::compile(
            "text = $('a' 'b')\n\
             list = 'a' 'b'\n\
             pick = 'a' @'b'\n\
             maybe = 'a'?\n\
             many = 'a'*\n\
             ref = pick",
        )
        .unwrap();
        let parse = |rule: &str, input: &str| vm.parse(rule, input, &Options::default());

        assert_eq!(parse("text", "ab"), Ok(s("ab")));
        assert_eq!(parse("list", "ab"), Ok(Value::List(vec![s("a"), s("b")])));
        assert_eq!(parse("pick", "ab"), Ok(s("b")));
        assert_eq!(parse("maybe", ""), Ok(Value::Absent));
        assert_eq!(parse("many", "aa"), Ok(Value::List(vec![s("a"), s("a")])));
        assert_eq!(parse("ref", "ab"), Ok(s("b")));
    }

    #[test]
    fn default_start() {
        let vm = Vm::compile("a = 'a' b\nb = 'b'").unwrap();

        assert_eq!(vm.rule_names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(vm.parse_default("ab", &Options::default()).is_ok());
        assert!(vm
            .parse_default("b", &Options::new().with_start_rule("b"))
            .is_ok());
        assert_eq!(
            vm.parse_default("b", &Options::new().with_start_rule("c")),
            Err(ParseError::UnknownStartRule("c".to_owned()))
        );
    }

    #[test]
    fn references_fail_once_the_vm_is_dropped() {
        let vm = Vm::compile("a = 'a' b\nb = 'b'").unwrap();
        let a = vm.table.rules[0].get().cloned().unwrap();

        assert!(pegloom::parse(&a, "ab", Options::default()).is_ok());
        drop(vm);

        match pegloom::parse(&a, "ab", Options::default()) {
            Err(ParseError::Failed(error)) => {
                assert_eq!(error.position.offset, 1);
                assert_eq!(error.expected, vec!["b".to_owned()]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn invalid_grammars_are_refused() {
        let grammar = pegloom_meta::parse_grammar("a = b").unwrap();

        match Vm::new(&grammar) {
            Err(errors) => assert_eq!(errors[0].to_string(), "rule b is undefined (at 1:5)"),
            Ok(_) => panic!("undefined rule accepted"),
        }
    }
}
