// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! The rule graph and its matching semantics.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use log::trace;
use once_cell::sync::OnceCell;

use crate::action::{ActionContext, RecoverContext};
use crate::context::MatchContext;
use crate::env::Env;
use crate::error::Abort;
use crate::input::Input;
use crate::result::{Failure, MatchResult, PrevFail, Success};
use crate::value::MatchValue;

/// Depth used by `Display`; deeper structure renders as `…`.
pub const DEFAULT_RENDER_DEPTH: usize = 12;

pub(crate) type ItemFn<I, V> = Arc<dyn Fn(&<I as Input>::Item) -> Option<V> + Send + Sync>;
pub(crate) type ActionFn<I, V> =
    Arc<dyn Fn(&ActionContext<'_, I, V>) -> Result<V, Abort> + Send + Sync>;
pub(crate) type PredicateFn<I, V> =
    Arc<dyn Fn(&ActionContext<'_, I, V>) -> Result<bool, Abort> + Send + Sync>;
pub(crate) type RecoverFn<I, V> =
    Arc<dyn Fn(RecoverContext<'_, I, V>) -> Result<MatchResult<I, V>, Abort> + Send + Sync>;

/// A leaf matcher that inspects the input directly.
///
/// Implement this to plug matchers that are not expressible with the built-in
/// combinators into a rule graph; see [`rules::custom`](crate::rules::custom).
pub trait Matcher<I: Input + ?Sized, V>: Send + Sync {
    /// Returns the offset after the match and its value.
    fn match_at(&self, offset: usize, input: &I) -> Option<(usize, V)>;

    /// How the matcher renders in diagnostics.
    fn describe(&self) -> String;
}

/// A node of a rule graph.
///
/// Cloning is cheap: clones share the node. Rules are immutable once built,
/// apart from lazy rules caching their target on first use, and can live in
/// statics.
pub struct Rule<I: Input + ?Sized, V> {
    node: Arc<RuleNode<I, V>>,
}

struct RuleNode<I: Input + ?Sized, V> {
    kind: RuleKind<I, V>,
    name: Option<Cow<'static, str>>,
}

pub(crate) enum RuleKind<I: Input + ?Sized, V> {
    SeqEqual(Arc<I>),
    AnyOne,
    OneOf(Arc<I>),
    OneMatch(ItemFn<I, V>),
    Custom(Arc<dyn Matcher<I, V>>),
    Sequence(Vec<Element<I, V>>),
    Choice(Vec<Rule<I, V>>),
    ZeroOrOne(Rule<I, V>),
    ZeroOrMore(Rule<I, V>),
    OneOrMore(Rule<I, V>),
    NextIs(Rule<I, V>),
    NextIsNot(Rule<I, V>),
    Peek(Rule<I, V>),
    AsSlice(Rule<I, V>),
    Lazy(Arc<LazyRule<I, V>>),
    Action {
        rule: Rule<I, V>,
        action: ActionFn<I, V>,
        recover: Option<RecoverFn<I, V>>,
    },
    Assert(PredicateFn<I, V>),
    AssertNot(PredicateFn<I, V>),
}

pub(crate) struct LazyRule<I: Input + ?Sized, V> {
    resolve: Box<dyn Fn() -> Rule<I, V> + Send + Sync>,
    rule: OnceCell<Rule<I, V>>,
    /// Set for named references, which render as the name and keep their
    /// target's captures to themselves.
    reference: Option<Cow<'static, str>>,
    cached: bool,
}

impl<I: Input + ?Sized, V> LazyRule<I, V> {
    pub(crate) fn new(
        resolve: Box<dyn Fn() -> Rule<I, V> + Send + Sync>,
        reference: Option<Cow<'static, str>>,
        cached: bool,
    ) -> LazyRule<I, V> {
        LazyRule {
            resolve,
            rule: OnceCell::new(),
            reference,
            cached,
        }
    }

    fn get(&self) -> Cow<'_, Rule<I, V>> {
        if !self.cached {
            return Cow::Owned((self.resolve)());
        }

        Cow::Borrowed(self.rule.get_or_init(|| {
            if let Some(name) = &self.reference {
                trace!("resolving reference to {}", name);
            }
            (self.resolve)()
        }))
    }
}

/// One element of a sequence.
pub struct Element<I: Input + ?Sized, V> {
    pub(crate) rule: Rule<I, V>,
    pub(crate) label: Option<Arc<str>>,
    pub(crate) omit: bool,
}

impl<I: Input + ?Sized, V> Element<I, V> {
    /// Binds the element's value to `name` for the rest of the sequence.
    #[must_use]
    pub fn labeled(mut self, name: impl Into<Arc<str>>) -> Self {
        self.label = Some(name.into());
        self
    }

    /// Leaves the element's value out of the sequence's value.
    #[must_use]
    pub fn omitted(mut self) -> Self {
        self.omit = true;
        self
    }

    pub fn rule(&self) -> &Rule<I, V> {
        &self.rule
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn is_omitted(&self) -> bool {
        self.omit
    }
}

impl<I: Input + ?Sized, V> From<Rule<I, V>> for Element<I, V> {
    fn from(rule: Rule<I, V>) -> Self {
        Element {
            rule,
            label: None,
            omit: false,
        }
    }
}

impl<I: Input + ?Sized, V> Clone for Element<I, V> {
    fn clone(&self) -> Self {
        Element {
            rule: self.rule.clone(),
            label: self.label.clone(),
            omit: self.omit,
        }
    }
}

impl<I: Input + ?Sized, V> Rule<I, V> {
    pub(crate) fn new(kind: RuleKind<I, V>) -> Rule<I, V> {
        Rule {
            node: Arc::new(RuleNode { kind, name: None }),
        }
    }

    /// A copy of this rule's node carrying `name` as its display name.
    pub(crate) fn with_name(&self, name: Cow<'static, str>) -> Rule<I, V> {
        Rule {
            node: Arc::new(RuleNode {
                kind: self.node.kind.clone(),
                name: Some(name),
            }),
        }
    }

    /// Explicit display name given with [`rules::named`](crate::rules::named).
    pub fn display_name(&self) -> Option<&str> {
        self.node.name.as_deref()
    }

    /// Name of a reference rule created with
    /// [`rules::reference`](crate::rules::reference).
    pub fn reference_name(&self) -> Option<&str> {
        match &self.node.kind {
            RuleKind::Lazy(lazy) => lazy.reference.as_deref(),
            _ => None,
        }
    }

    /// Whether both handles point to the same node.
    pub fn ptr_eq(&self, other: &Rule<I, V>) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    /// Renders the rule for diagnostics, printing `…` below `depth` levels.
    ///
    /// ```
    /// # use pegloom::{rules, Rule, Value};
    /// let rule: Rule<str, Value> = rules::choice([
    ///     rules::seq_equal("a"),
    ///     rules::zero_or_more(rules::seq_equal("b")),
    /// ]);
    ///
    /// assert_eq!(rule.render(8), r#""a" / "b"*"#);
    /// assert_eq!(rule.render(1), "… / …");
    /// ```
    pub fn render(&self, depth: usize) -> String {
        let mut out = String::new();
        self.write(&mut out, depth);
        out
    }

    fn write(&self, out: &mut String, depth: usize) {
        if let Some(name) = &self.node.name {
            out.push_str(name);
            return;
        }

        if depth == 0 {
            out.push('…');
            return;
        }

        let depth = depth - 1;
        match &self.node.kind {
            RuleKind::SeqEqual(pattern) => out.push_str(&pattern.fmt_literal()),
            RuleKind::AnyOne => out.push('.'),
            RuleKind::OneOf(set) => out.push_str(&set.fmt_set()),
            RuleKind::OneMatch(_) => out.push_str("<item>"),
            RuleKind::Custom(matcher) => out.push_str(&matcher.describe()),
            RuleKind::Sequence(elements) => {
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    element.rule.write_operand(out, depth);
                }
            }
            RuleKind::Choice(rules) => {
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        out.push_str(" / ");
                    }
                    rule.write(out, depth);
                }
            }
            RuleKind::ZeroOrOne(rule) => rule.write_suffixed(out, depth, '?'),
            RuleKind::ZeroOrMore(rule) => rule.write_suffixed(out, depth, '*'),
            RuleKind::OneOrMore(rule) => rule.write_suffixed(out, depth, '+'),
            RuleKind::NextIs(rule) => rule.write_prefixed(out, depth, '&'),
            RuleKind::Peek(rule) => {
                out.push_str("peek(");
                rule.write(out, depth);
                out.push(')');
            }
            RuleKind::NextIsNot(rule) => rule.write_prefixed(out, depth, '!'),
            RuleKind::AsSlice(rule) => rule.write_prefixed(out, depth, '$'),
            RuleKind::Lazy(lazy) => match &lazy.reference {
                Some(name) => out.push_str(name),
                None => lazy.get().write(out, depth),
            },
            RuleKind::Action { rule, .. } => rule.write(out, depth),
            RuleKind::Assert(_) => out.push_str("&{…}"),
            RuleKind::AssertNot(_) => out.push_str("!{…}"),
        }
    }

    fn write_operand(&self, out: &mut String, depth: usize) {
        if self.is_compound() {
            out.push('(');
            self.write(out, depth);
            out.push(')');
        } else {
            self.write(out, depth);
        }
    }

    fn write_suffixed(&self, out: &mut String, depth: usize, suffix: char) {
        self.write_operand(out, depth);
        out.push(suffix);
    }

    fn write_prefixed(&self, out: &mut String, depth: usize, prefix: char) {
        out.push(prefix);
        self.write_operand(out, depth);
    }

    fn is_compound(&self) -> bool {
        if self.node.name.is_some() {
            return false;
        }

        match &self.node.kind {
            RuleKind::Sequence(elements) => elements.len() > 1,
            RuleKind::Choice(rules) => rules.len() > 1,
            RuleKind::Action { rule, .. } => rule.is_compound(),
            _ => false,
        }
    }
}

impl<I: Input + ?Sized, V: MatchValue<I>> Rule<I, V> {
    /// Matches the rule at `offset` as a top-level call.
    ///
    /// ```
    /// # use pegloom::{rules, Env, MatchResult, Value};
    /// let rule = rules::seq_equal::<str, Value>("abc");
    ///
    /// match rule.matches(0, "abcdef", &Env::default()).unwrap() {
    ///     MatchResult::Success(success) => {
    ///         assert_eq!(success.next, 3);
    ///         assert_eq!(success.value, Value::Str("abc".to_owned()));
    ///     }
    ///     MatchResult::Failure(_) => unreachable!(),
    /// }
    /// ```
    pub fn matches(
        &self,
        offset: usize,
        input: &I,
        env: &Env<V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        self.match_at(offset, input, env, &MatchContext::root())
    }

    /// Matches the rule at `offset` from within `context`.
    ///
    /// `Err` is the abort channel: it is never a backtrackable failure and
    /// passes through every enclosing rule.
    pub fn match_at(
        &self,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        let context = context.push(self, offset);
        let mut result = self.match_kind(offset, input, env, &context)?;

        // A named rule summarizes its subtree, including what it swallowed.
        if let (MatchResult::Success(success), Some(_)) = (&mut result, &self.node.name) {
            success.prev = None;
        }

        if let (MatchResult::Failure(failure), Some(observer)) = (&result, context.observer()) {
            observer.on_match_fail(failure, &context);
        }

        Ok(result)
    }

    // Kinds with children match in functions of their own, so a level of
    // recursion only holds the locals of the kind it is matching.
    fn match_kind(
        &self,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        match &self.node.kind {
            RuleKind::SeqEqual(_)
            | RuleKind::AnyOne
            | RuleKind::OneOf(_)
            | RuleKind::OneMatch(_)
            | RuleKind::Custom(_) => Ok(match self.match_item(offset, input) {
                Some((next, value)) => succeed(next, value, env.clone()),
                None => self.leaf(offset),
            }),
            RuleKind::Sequence(elements) => {
                self.match_sequence(elements, offset, input, env, context)
            }
            RuleKind::Choice(rules) => self.match_choice(rules, offset, input, env, context),
            RuleKind::ZeroOrOne(rule) => self.match_zero_or_one(rule, offset, input, env, context),
            RuleKind::ZeroOrMore(rule) => {
                self.match_zero_or_more(rule, offset, input, env, context)
            }
            RuleKind::OneOrMore(rule) => self.match_one_or_more(rule, offset, input, env, context),
            RuleKind::NextIs(rule) => self.match_next_is(rule, true, offset, input, env, context),
            RuleKind::NextIsNot(rule) => {
                self.match_next_is(rule, false, offset, input, env, context)
            }
            RuleKind::Peek(rule) => self.match_peek(rule, offset, input, env, context),
            RuleKind::AsSlice(rule) => self.match_as_slice(rule, offset, input, env, context),
            RuleKind::Lazy(lazy) => self.match_lazy(lazy, offset, input, env, context),
            RuleKind::Action {
                rule,
                action,
                recover,
            } => self.match_action(rule, action, recover.as_ref(), offset, input, env, context),
            RuleKind::Assert(predicate) => self.match_assert(predicate, true, offset, input, env),
            RuleKind::AssertNot(predicate) => {
                self.match_assert(predicate, false, offset, input, env)
            }
        }
    }

    /// Matches a leaf kind; `None` on a mismatch or for kinds with children.
    fn match_item(&self, offset: usize, input: &I) -> Option<(usize, V)> {
        match &self.node.kind {
            RuleKind::SeqEqual(pattern) => {
                if !input.starts_with_at(offset, pattern) {
                    return None;
                }

                let next = offset + Input::len(&**pattern);
                Some((next, V::slice(input.slice(offset..next)?)))
            }
            RuleKind::AnyOne => input.item_at(offset).map(|(item, next)| (next, V::item(item))),
            RuleKind::OneOf(set) => input
                .item_at(offset)
                .filter(|(item, _)| set.contains_item(item))
                .map(|(item, next)| (next, V::item(item))),
            RuleKind::OneMatch(test) => input
                .item_at(offset)
                .and_then(|(item, next)| test(&item).map(|value| (next, value))),
            // Matchers are foreign code: an end that is not a valid slice
            // end counts as a mismatch.
            RuleKind::Custom(matcher) => matcher
                .match_at(offset, input)
                .filter(|(next, _)| input.slice(offset..*next).is_some()),
            _ => None,
        }
    }

    fn match_sequence(
        &self,
        elements: &[Element<I, V>],
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        let mut env = env.clone();
        let mut next = offset;
        let mut values = Vec::new();
        let mut prev = None;

        for element in elements {
            let success = match element.rule.match_at(next, input, &env, context)? {
                MatchResult::Success(success) => success,
                MatchResult::Failure(failure) => return Ok(self.fail_past(offset, failure, prev)),
            };

            next = success.next;
            prev = self.furthest(offset, prev, success.prev);
            env = match &element.label {
                Some(label) => success.env.bind(Arc::clone(label), success.value.clone()),
                None => success.env,
            };
            if !element.omit {
                values.push(success.value);
            }
        }

        let value = match values.len() {
            0 => V::absent(),
            1 => values.pop().unwrap_or_else(V::absent),
            _ => V::list(values),
        };
        Ok(succeed_past(next, value, env, prev))
    }

    fn match_choice(
        &self,
        rules: &[Rule<I, V>],
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        let mut failures = Vec::with_capacity(rules.len());

        for rule in rules {
            match rule.match_at(offset, input, env, context)? {
                MatchResult::Success(success) => return Ok(MatchResult::Success(success)),
                MatchResult::Failure(failure) => failures.push(failure),
            }
        }

        Ok(MatchResult::Failure(Failure {
            offset,
            expected: self.clone(),
            prev: PrevFail::Many(failures),
        }))
    }

    fn match_zero_or_one(
        &self,
        rule: &Rule<I, V>,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        Ok(match rule.match_at(offset, input, env, context)? {
            MatchResult::Success(success) => MatchResult::Success(success),
            MatchResult::Failure(failure) => {
                succeed_past(offset, V::absent(), env.clone(), Some(Box::new(failure)))
            }
        })
    }

    fn match_zero_or_more(
        &self,
        rule: &Rule<I, V>,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        let mut values = Vec::new();
        let (next, env, prev) =
            self.repeat(rule, offset, input, env.clone(), None, context, &mut values)?;

        Ok(succeed_past(next, V::list(values), env, prev))
    }

    fn match_one_or_more(
        &self,
        rule: &Rule<I, V>,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        let first = match rule.match_at(offset, input, env, context)? {
            MatchResult::Success(first) => first,
            MatchResult::Failure(failure) => return Ok(self.wrap(offset, failure)),
        };

        let mut values = vec![first.value];
        let (next, env, prev) = if first.next != offset {
            self.repeat(rule, first.next, input, first.env, first.prev, context, &mut values)?
        } else {
            (first.next, first.env, first.prev)
        };

        Ok(succeed_past(next, V::list(values), env, prev))
    }

    /// Greedily matches `rule` from `offset`, pushing every value. Stops at the
    /// first failure, which joins `prev`, or at a match that consumes nothing.
    #[allow(clippy::too_many_arguments)]
    fn repeat(
        &self,
        rule: &Rule<I, V>,
        mut offset: usize,
        input: &I,
        mut env: Env<V>,
        mut prev: Option<Box<Failure<I, V>>>,
        context: &MatchContext<'_, I, V>,
        values: &mut Vec<V>,
    ) -> Result<(usize, Env<V>, Option<Box<Failure<I, V>>>), Abort> {
        let start = offset;

        loop {
            match rule.match_at(offset, input, &env, context)? {
                MatchResult::Success(success) => {
                    let progressed = success.next != offset;

                    offset = success.next;
                    env = success.env;
                    prev = prev.filter(|failure| failure.deepest_offset() >= offset);
                    prev = self.furthest(start, prev, success.prev);
                    values.push(success.value);

                    if !progressed {
                        break;
                    }
                }
                MatchResult::Failure(failure) => {
                    prev = self.furthest(start, prev, Some(Box::new(failure)));
                    break;
                }
            }
        }

        Ok((offset, env, prev))
    }

    fn match_next_is(
        &self,
        rule: &Rule<I, V>,
        positive: bool,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        Ok(match (rule.match_at(offset, input, env, context)?, positive) {
            (MatchResult::Success(_), true) | (MatchResult::Failure(_), false) => {
                succeed(offset, V::absent(), env.clone())
            }
            (MatchResult::Failure(failure), true) => self.wrap(offset, failure),
            (MatchResult::Success(_), false) => self.leaf(offset),
        })
    }

    fn match_peek(
        &self,
        rule: &Rule<I, V>,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        Ok(match rule.match_at(offset, input, env, context)? {
            MatchResult::Success(success) => succeed(offset, success.value, success.env),
            MatchResult::Failure(failure) => self.wrap(offset, failure),
        })
    }

    fn match_as_slice(
        &self,
        rule: &Rule<I, V>,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        Ok(match rule.match_at(offset, input, env, context)? {
            MatchResult::Success(success) => match input.slice(offset..success.next) {
                Some(slice) => {
                    succeed_past(success.next, V::slice(slice), success.env, success.prev)
                }
                None => self.leaf(offset),
            },
            MatchResult::Failure(failure) => self.wrap(offset, failure),
        })
    }

    fn match_lazy(
        &self,
        lazy: &LazyRule<I, V>,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        Ok(match lazy.get().match_at(offset, input, env, context)? {
            MatchResult::Success(success) if lazy.reference.is_some() => {
                succeed_past(success.next, success.value, env.clone(), success.prev)
            }
            result => result,
        })
    }

    #[allow(clippy::too_many_arguments)]
    fn match_action(
        &self,
        rule: &Rule<I, V>,
        action: &ActionFn<I, V>,
        recover: Option<&RecoverFn<I, V>>,
        offset: usize,
        input: &I,
        env: &Env<V>,
        context: &MatchContext<'_, I, V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        match rule.match_at(offset, input, env, context)? {
            MatchResult::Success(success) => {
                let value = match ActionContext::new(
                    input,
                    offset..success.next,
                    Some(&success.value),
                    &success.env,
                ) {
                    Some(ctx) => action(&ctx)?,
                    None => return Ok(self.leaf(offset)),
                };

                Ok(succeed_past(success.next, value, success.env, success.prev))
            }
            MatchResult::Failure(failure) => match recover {
                Some(recover) => recover(RecoverContext {
                    failure,
                    env,
                    input,
                    offset,
                    rule: self,
                }),
                None => Ok(self.wrap(offset, failure)),
            },
        }
    }

    fn match_assert(
        &self,
        predicate: &PredicateFn<I, V>,
        expected: bool,
        offset: usize,
        input: &I,
        env: &Env<V>,
    ) -> Result<MatchResult<I, V>, Abort> {
        let holds = match ActionContext::new(input, offset..offset, None, env) {
            Some(ctx) => predicate(&ctx)?,
            None => return Ok(self.leaf(offset)),
        };

        Ok(if holds == expected {
            succeed(offset, V::absent(), env.clone())
        } else {
            self.leaf(offset)
        })
    }

    #[inline]
    fn leaf(&self, offset: usize) -> MatchResult<I, V> {
        MatchResult::Failure(Failure::leaf(offset, self.clone()))
    }

    #[inline]
    fn wrap(&self, offset: usize, failure: Failure<I, V>) -> MatchResult<I, V> {
        MatchResult::Failure(Failure {
            offset,
            expected: self.clone(),
            prev: PrevFail::Single(Box::new(failure)),
        })
    }

    /// Wraps `failure`, together with the swallowed `prev` when that one got
    /// further into the input.
    fn fail_past(
        &self,
        offset: usize,
        failure: Failure<I, V>,
        prev: Option<Box<Failure<I, V>>>,
    ) -> MatchResult<I, V> {
        match prev {
            Some(prev) if prev.deepest_offset() > failure.deepest_offset() => {
                MatchResult::Failure(Failure {
                    offset,
                    expected: self.clone(),
                    prev: PrevFail::Many(vec![*prev, failure]),
                })
            }
            _ => self.wrap(offset, failure),
        }
    }

    /// Whichever swallowed failure reached further, or both under this rule
    /// when they reached equally far.
    fn furthest(
        &self,
        offset: usize,
        a: Option<Box<Failure<I, V>>>,
        b: Option<Box<Failure<I, V>>>,
    ) -> Option<Box<Failure<I, V>>> {
        match (a, b) {
            (Some(a), Some(b)) => Some(match a.deepest_offset().cmp(&b.deepest_offset()) {
                Ordering::Greater => a,
                Ordering::Less => b,
                Ordering::Equal => Box::new(Failure {
                    offset,
                    expected: self.clone(),
                    prev: PrevFail::Many(vec![*a, *b]),
                }),
            }),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

#[inline]
fn succeed<I: Input + ?Sized, V>(next: usize, value: V, env: Env<V>) -> MatchResult<I, V> {
    MatchResult::Success(Success {
        next,
        value,
        env,
        prev: None,
    })
}

/// A success carrying `prev` as long as it reaches `next`.
fn succeed_past<I: Input + ?Sized, V>(
    next: usize,
    value: V,
    env: Env<V>,
    prev: Option<Box<Failure<I, V>>>,
) -> MatchResult<I, V> {
    MatchResult::Success(Success {
        next,
        value,
        env,
        prev: prev.filter(|failure| failure.deepest_offset() >= next),
    })
}

impl<I: Input + ?Sized, V> Clone for Rule<I, V> {
    fn clone(&self) -> Self {
        Rule {
            node: Arc::clone(&self.node),
        }
    }
}

impl<I: Input + ?Sized, V> Clone for RuleKind<I, V> {
    fn clone(&self) -> Self {
        match self {
            RuleKind::SeqEqual(pattern) => RuleKind::SeqEqual(Arc::clone(pattern)),
            RuleKind::AnyOne => RuleKind::AnyOne,
            RuleKind::OneOf(set) => RuleKind::OneOf(Arc::clone(set)),
            RuleKind::OneMatch(test) => RuleKind::OneMatch(Arc::clone(test)),
            RuleKind::Custom(matcher) => RuleKind::Custom(Arc::clone(matcher)),
            RuleKind::Sequence(elements) => RuleKind::Sequence(elements.clone()),
            RuleKind::Choice(rules) => RuleKind::Choice(rules.clone()),
            RuleKind::ZeroOrOne(rule) => RuleKind::ZeroOrOne(rule.clone()),
            RuleKind::ZeroOrMore(rule) => RuleKind::ZeroOrMore(rule.clone()),
            RuleKind::OneOrMore(rule) => RuleKind::OneOrMore(rule.clone()),
            RuleKind::NextIs(rule) => RuleKind::NextIs(rule.clone()),
            RuleKind::NextIsNot(rule) => RuleKind::NextIsNot(rule.clone()),
            RuleKind::Peek(rule) => RuleKind::Peek(rule.clone()),
            RuleKind::AsSlice(rule) => RuleKind::AsSlice(rule.clone()),
            RuleKind::Lazy(lazy) => RuleKind::Lazy(Arc::clone(lazy)),
            RuleKind::Action {
                rule,
                action,
                recover,
            } => RuleKind::Action {
                rule: rule.clone(),
                action: Arc::clone(action),
                recover: recover.clone(),
            },
            RuleKind::Assert(predicate) => RuleKind::Assert(Arc::clone(predicate)),
            RuleKind::AssertNot(predicate) => RuleKind::AssertNot(Arc::clone(predicate)),
        }
    }
}

impl<I: Input + ?Sized, V> fmt::Display for Rule<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_RENDER_DEPTH))
    }
}

impl<I: Input + ?Sized, V> fmt::Debug for Rule<I, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Rule").field(&self.to_string()).finish()
    }
}
