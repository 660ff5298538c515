// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Match outcomes and failure trees.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::env::Env;
use crate::input::Input;
use crate::rule::Rule;

/// The outcome of matching a rule at an offset.
pub enum MatchResult<I: Input + ?Sized, V> {
    Success(Success<I, V>),
    Failure(Failure<I, V>),
}

/// A successful match.
pub struct Success<I: Input + ?Sized, V> {
    /// Offset right after the consumed input.
    pub next: usize,
    pub value: V,
    /// The environment after the match; a superset of the one given.
    pub env: Env<V>,
    /// The furthest failure that ended a repetition or an optional match
    /// inside this one, kept while it reaches at least `next`.
    pub prev: Option<Box<Failure<I, V>>>,
}

/// A failed match.
///
/// `expected` is the rule that failed, kept live so that rendering it only
/// happens when a message is asked for.
pub struct Failure<I: Input + ?Sized, V> {
    pub offset: usize,
    pub expected: Rule<I, V>,
    pub prev: PrevFail<I, V>,
}

/// Why a [`Failure`] happened.
pub enum PrevFail<I: Input + ?Sized, V> {
    /// Leaf failure.
    None,
    /// A single child failed.
    Single(Box<Failure<I, V>>),
    /// Every alternative of an ordered choice failed, in order.
    Many(Vec<Failure<I, V>>),
}

impl<I: Input + ?Sized, V> MatchResult<I, V> {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, MatchResult::Success(_))
    }

    #[inline]
    pub fn success(self) -> Option<Success<I, V>> {
        match self {
            MatchResult::Success(success) => Some(success),
            MatchResult::Failure(_) => None,
        }
    }

    #[inline]
    pub fn failure(self) -> Option<Failure<I, V>> {
        match self {
            MatchResult::Success(_) => None,
            MatchResult::Failure(failure) => Some(failure),
        }
    }

    /// JSON form of the result: `{ok: true, next}` or the failure tree.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            MatchResult::Success(success) => serde_json::json!({
                "ok": true,
                "nextOffset": success.next,
            }),
            MatchResult::Failure(failure) => {
                serde_json::to_value(failure.to_json()).unwrap_or(serde_json::Value::Null)
            }
        }
    }
}

impl<I: Input + ?Sized, V> Failure<I, V> {
    /// A failure with no children.
    pub fn leaf(offset: usize, expected: Rule<I, V>) -> Failure<I, V> {
        Failure {
            offset,
            expected,
            prev: PrevFail::None,
        }
    }

    /// Children of this failure, in order.
    pub fn children(&self) -> &[Failure<I, V>] {
        match &self.prev {
            PrevFail::None => &[],
            PrevFail::Single(child) => std::slice::from_ref(&**child),
            PrevFail::Many(children) => children,
        }
    }

    /// Maximum offset reached anywhere in the failure tree.
    ///
    /// ```
    /// # use pegloom::{rules, Env, Value};
    /// let rule = rules::seq::<str, Value, _>([
    ///     rules::elem(rules::seq_equal("ab")),
    ///     rules::elem(rules::seq_equal("c")),
    /// ]);
    /// let failure = rule.matches(0, "abx", &Env::default()).unwrap().failure().unwrap();
    ///
    /// assert_eq!(failure.offset, 0);
    /// assert_eq!(failure.deepest_offset(), 2);
    /// ```
    pub fn deepest_offset(&self) -> usize {
        self.children()
            .iter()
            .map(Failure::deepest_offset)
            .fold(self.offset, usize::max)
    }

    /// Rendered expectations at the furthest offset, with that offset.
    ///
    /// Rules with an explicit display name summarize their subtree and are
    /// reported at their own offset. Duplicates are dropped; order follows
    /// the failure tree.
    pub fn expectations(&self) -> (usize, Vec<String>) {
        let mut found = Vec::new();
        self.collect_expectations(&mut found);

        let offset = found
            .iter()
            .map(|(offset, _)| *offset)
            .max()
            .unwrap_or(self.offset);

        let mut expected: Vec<String> = Vec::new();
        for (o, description) in found {
            if o == offset && !expected.contains(&description) {
                expected.push(description);
            }
        }

        (offset, expected)
    }

    fn collect_expectations(&self, found: &mut Vec<(usize, String)>) {
        if self.expected.display_name().is_some() || matches!(self.prev, PrevFail::None) {
            found.push((self.offset, self.expected.to_string()));
            return;
        }

        for child in self.children() {
            child.collect_expectations(found);
        }
    }

    /// The JSON form of the failure tree.
    pub fn to_json(&self) -> FailureJson {
        FailureJson {
            ok: false,
            offset: self.offset,
            expected: self.expected.to_string(),
            prev_fail: match &self.prev {
                PrevFail::None => None,
                PrevFail::Single(child) => Some(PrevFailJson::Single(Box::new(child.to_json()))),
                PrevFail::Many(children) => Some(PrevFailJson::Many(
                    children.iter().map(Failure::to_json).collect(),
                )),
            },
        }
    }
}

impl<I: Input + ?Sized, V> Clone for Failure<I, V> {
    fn clone(&self) -> Self {
        Failure {
            offset: self.offset,
            expected: self.expected.clone(),
            prev: self.prev.clone(),
        }
    }
}

impl<I: Input + ?Sized, V> Clone for PrevFail<I, V> {
    fn clone(&self) -> Self {
        match self {
            PrevFail::None => PrevFail::None,
            PrevFail::Single(child) => PrevFail::Single(child.clone()),
            PrevFail::Many(children) => PrevFail::Many(children.clone()),
        }
    }
}

impl<I: Input + ?Sized, V: Clone> Clone for Success<I, V> {
    fn clone(&self) -> Self {
        Success {
            next: self.next,
            value: self.value.clone(),
            env: self.env.clone(),
            prev: self.prev.clone(),
        }
    }
}

impl<I: Input + ?Sized, V> fmt::Debug for Failure<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Failure")
            .field("offset", &self.offset)
            .field("expected", &self.expected.to_string())
            .field("prev", &self.children())
            .finish()
    }
}

impl<I: Input + ?Sized, V: fmt::Debug> fmt::Debug for Success<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Success")
            .field("next", &self.next)
            .field("value", &self.value)
            .field("env", &self.env)
            .field("prev", &self.prev)
            .finish()
    }
}

impl<I: Input + ?Sized, V: fmt::Debug> fmt::Debug for MatchResult<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchResult::Success(success) => success.fmt(f),
            MatchResult::Failure(failure) => failure.fmt(f),
        }
    }
}

/// Serializable form of a [`Failure`].
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureJson {
    pub ok: bool,
    pub offset: usize,
    pub expected: String,
    pub prev_fail: Option<PrevFailJson>,
}

/// Serializable form of [`PrevFail`]; absent children serialize as `null`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PrevFailJson {
    Single(Box<FailureJson>),
    Many(Vec<FailureJson>),
}
