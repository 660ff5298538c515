// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use crate::input::Input;
use crate::result::Failure;
use crate::rule::Rule;

/// Receives diagnostic events while rules are matched.
pub trait MatchObserver<I: Input + ?Sized, V> {
    /// Called with every failure a rule returns, before its caller sees it.
    fn on_match_fail(&self, _failure: &Failure<I, V>, _context: &MatchContext<'_, I, V>) {}
}

/// The chain of rules currently being matched, innermost first.
///
/// Lives on the stack for the duration of one top-level match; nothing
/// keeps it afterwards.
pub struct MatchContext<'c, I: Input + ?Sized, V> {
    rule: Option<&'c Rule<I, V>>,
    offset: usize,
    parent: Option<&'c MatchContext<'c, I, V>>,
    observer: Option<&'c dyn MatchObserver<I, V>>,
}

impl<'c, I: Input + ?Sized, V> MatchContext<'c, I, V> {
    /// An empty context for a top-level match.
    pub fn root() -> MatchContext<'c, I, V> {
        MatchContext {
            rule: None,
            offset: 0,
            parent: None,
            observer: None,
        }
    }

    /// An empty context reporting failures to `observer`.
    pub fn observed(observer: &'c dyn MatchObserver<I, V>) -> MatchContext<'c, I, V> {
        MatchContext {
            rule: None,
            offset: 0,
            parent: None,
            observer: Some(observer),
        }
    }

    /// Context for matching `rule` at `offset` from within `self`.
    #[inline]
    pub fn push<'a>(&'a self, rule: &'a Rule<I, V>, offset: usize) -> MatchContext<'a, I, V>
    where
        'c: 'a,
    {
        MatchContext {
            rule: Some(rule),
            offset,
            parent: Some(self),
            observer: self.observer,
        }
    }

    /// The rule being matched; `None` for the root.
    pub fn rule(&self) -> Option<&'c Rule<I, V>> {
        self.rule
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn parent(&self) -> Option<&'c MatchContext<'c, I, V>> {
        self.parent
    }

    pub fn observer(&self) -> Option<&'c dyn MatchObserver<I, V>> {
        self.observer
    }

    /// Number of rules on the chain.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = Some(self);
        while let Some(context) = current {
            if context.rule.is_some() {
                depth += 1;
            }
            current = context.parent;
        }
        depth
    }
}
