// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::any::Any;
use std::fmt::Debug;
use std::hash::Hash;
use std::rc::Rc;

use log::debug;

use crate::env::{Env, Options};
use crate::error::{ParseError, SyntaxError};
use crate::input::Input;
use crate::result::{Failure, MatchResult, PrevFail};
use crate::rule::Rule;
use crate::rules;
use crate::value::MatchValue;

/// The rule enum of a generated parser.
pub trait RuleType: Copy + Debug + Eq + Hash + Ord + Send + Sync + 'static {
    /// The grammar's name for the rule.
    fn name(&self) -> &'static str;

    /// Looks a rule up by its grammar name.
    fn from_name(name: &str) -> Option<Self>;

    /// The rule parsing starts from when no start rule is given.
    fn default_start() -> Self;
}

/// A parser generated from a grammar.
pub trait Parser<R: RuleType> {
    /// The value a successful parse produces.
    type Value;

    /// Parses `input` starting from `rule`; the whole input must match.
    fn parse_rule(rule: R, input: &str, options: &Options) -> Result<Self::Value, ParseError>;

    /// Parses `input` starting from `options.start_rule`, or from the
    /// grammar's first rule when none is given.
    fn parse(input: &str, options: &Options) -> Result<Self::Value, ParseError> {
        let rule = match options.start_rule.as_deref() {
            Some(name) => {
                R::from_name(name).ok_or_else(|| ParseError::UnknownStartRule(name.to_owned()))?
            }
            None => R::default_start(),
        };

        Self::parse_rule(rule, input, options)
    }
}

/// Matches `rule` against the whole of `input`.
///
/// ```
/// # use pegloom::{rules, Options, ParseError, Rule, Value};
/// let rule: Rule<str, Value> = rules::seq_equal("ab");
///
/// assert_eq!(pegloom::parse(&rule, "ab", Options::default()), Ok(Value::Str("ab".to_owned())));
///
/// let error = pegloom::parse(&rule, "abc", Options::default()).unwrap_err();
/// assert_eq!(error.to_string().lines().last(), Some(r#"  = expected end of input but found "c""#));
/// ```
pub fn parse<I, V>(rule: &Rule<I, V>, input: &I, options: Options) -> Result<V, ParseError>
where
    I: Input + ?Sized,
    V: MatchValue<I>,
{
    parse_env(rule, input, &Env::new(options))
}

/// Like [`parse`], installing `state` for grammar code to read back with
/// [`ActionContext::state`](crate::ActionContext::state).
pub fn parse_with_state<I, V>(
    rule: &Rule<I, V>,
    input: &I,
    options: Options,
    state: Option<Rc<dyn Any>>,
) -> Result<V, ParseError>
where
    I: Input + ?Sized,
    V: MatchValue<I>,
{
    parse_env(rule, input, &Env::with_state(options, state))
}

/// Matches `rule` from offset 0 in `env`, requiring the whole input to be
/// consumed.
pub fn parse_env<I, V>(rule: &Rule<I, V>, input: &I, env: &Env<V>) -> Result<V, ParseError>
where
    I: Input + ?Sized,
    V: MatchValue<I>,
{
    debug!("parsing {} items with {}", input.len(), rule);

    let failure = match rule.matches(0, input, env) {
        Ok(MatchResult::Success(success)) if success.next == input.len() => {
            debug!("parse succeeded");
            return Ok(success.value);
        }
        Ok(MatchResult::Success(success)) => {
            let leftover = Failure::leaf(success.next, rules::end_of_input());

            // A repetition that stopped further in explains the leftover
            // input better than the end of input alone.
            match success.prev {
                Some(prev) if prev.deepest_offset() > success.next => Failure {
                    offset: 0,
                    expected: rule.clone(),
                    prev: PrevFail::Many(vec![*prev, leftover]),
                },
                _ => leftover,
            }
        }
        Ok(MatchResult::Failure(failure)) => failure,
        Err(abort) => {
            debug!("parse aborted: {}", abort);
            return Err(abort.into());
        }
    };

    let error = SyntaxError::new(&failure, input, env);
    debug!("parse failed: {}", error.message);

    Err(ParseError::Failed(Box::new(error)))
}
