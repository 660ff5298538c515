// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! What grammar code sees when it runs.

use std::any::Any;
use std::ops::Range;

use crate::env::{Env, Options};
use crate::error::Abort;
use crate::input::Input;
use crate::position::Location;
use crate::result::{Failure, MatchResult, PrevFail, Success};
use crate::rule::Rule;
use crate::value::MatchValue;

/// Context handed to actions and semantic predicates.
///
/// Gives access to the captures in scope and to the span the inner rule
/// consumed. Predicates see an empty span at the current offset.
pub struct ActionContext<'a, I: Input + ?Sized, V> {
    input: &'a I,
    text: &'a I,
    range: Range<usize>,
    value: Option<&'a V>,
    env: &'a Env<V>,
}

impl<'a, I: Input + ?Sized, V: MatchValue<I>> ActionContext<'a, I, V> {
    /// `None` when `range` does not delimit a slice of `input`.
    pub(crate) fn new(
        input: &'a I,
        range: Range<usize>,
        value: Option<&'a V>,
        env: &'a Env<V>,
    ) -> Option<ActionContext<'a, I, V>> {
        Some(ActionContext {
            input,
            text: input.slice(range.clone())?,
            range,
            value,
            env,
        })
    }

    /// The value bound to `name`, or the absent value if nothing is.
    pub fn capture(&self, name: &str) -> V {
        self.env.get(name).cloned().unwrap_or_else(V::absent)
    }

    /// The value bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&'a V> {
        self.env.get(name)
    }

    /// The inner rule's value; absent inside predicates.
    pub fn value(&self) -> V {
        self.value.cloned().unwrap_or_else(V::absent)
    }

    /// Offset the inner rule started at.
    #[inline]
    pub fn offset(&self) -> usize {
        self.range.start
    }

    /// Offsets consumed by the inner rule.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Resolved location of [`range`](ActionContext::range).
    pub fn location(&self) -> Location {
        Location {
            start: self.env.position(self.input, self.range.start),
            end: self.env.position(self.input, self.range.end),
        }
    }

    /// The consumed input.
    pub fn text(&self) -> &'a I {
        self.text
    }

    pub fn input(&self) -> &'a I {
        self.input
    }

    pub fn env(&self) -> &'a Env<V> {
        self.env
    }

    pub fn options(&self) -> &'a Options {
        self.env.options()
    }

    /// User state installed for this parse.
    pub fn state<S: Any>(&self) -> Option<&'a S> {
        self.env.state()
    }

    /// An abort with `message` located at the consumed span.
    ///
    /// ```
    /// # use pegloom::{rules, Env, Value};
    /// let rule = rules::action(rules::seq_equal::<str, Value>("x"), |ctx| {
    ///     Err(ctx.error("no x allowed"))
    /// });
    /// let abort = rule.matches(0, "x", &Env::default()).unwrap_err();
    ///
    /// assert_eq!(abort.message, "no x allowed");
    /// assert_eq!(abort.location.end.column, 2);
    /// ```
    pub fn error(&self, message: impl Into<String>) -> Abort {
        Abort::new(message, self.location())
    }

    /// An abort reading `expected <description> but found <...>`.
    pub fn expected(&self, description: &str) -> Abort {
        Abort::new(
            format!(
                "expected {} but found {}",
                description,
                self.input.describe_at(self.range.start)
            ),
            self.location(),
        )
    }
}

/// Context handed to an action's recovery function when its rule fails.
pub struct RecoverContext<'a, I: Input + ?Sized, V> {
    /// The inner rule's failure.
    pub failure: Failure<I, V>,
    /// The environment the action was matched in.
    pub env: &'a Env<V>,
    pub input: &'a I,
    pub offset: usize,
    /// The action rule itself.
    pub rule: &'a Rule<I, V>,
}

impl<'a, I: Input + ?Sized, V: MatchValue<I>> RecoverContext<'a, I, V> {
    /// Furthest offset the failed rule reached.
    pub fn deepest_offset(&self) -> usize {
        self.failure.deepest_offset()
    }

    /// Turns the failure into a success producing `value` that ends where the
    /// inner rule gave up.
    pub fn recover_with(&self, value: V) -> MatchResult<I, V> {
        MatchResult::Success(Success {
            next: self.deepest_offset(),
            value,
            env: self.env.clone(),
            prev: None,
        })
    }

    /// Succeeds at `next` with `value`.
    pub fn succeed(&self, next: usize, value: V) -> MatchResult<I, V> {
        MatchResult::Success(Success {
            next,
            value,
            env: self.env.clone(),
            prev: None,
        })
    }

    /// The failure the action reports without a recovery function.
    pub fn fail(self) -> MatchResult<I, V> {
        MatchResult::Failure(Failure {
            offset: self.offset,
            expected: self.rule.clone(),
            prev: PrevFail::Single(Box::new(self.failure)),
        })
    }

    /// An abort located at the failed span.
    pub fn error(&self, message: impl Into<String>) -> Abort {
        Abort::new(
            message,
            Location {
                start: self.env.position(self.input, self.offset),
                end: self.env.position(self.input, self.deepest_offset()),
            },
        )
    }
}
