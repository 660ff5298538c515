// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Constructors for every kind of rule.
//!
//! ```
//! use pegloom::rules::*;
//! use pegloom::{Env, Rule, Value};
//!
//! let digits: Rule<str, Value> = as_slice(one_or_more(char_class(
//!     vec![ClassPart::Range('0', '9')],
//!     false,
//!     false,
//! )));
//! let sum = seq([
//!     label("left", digits.clone()),
//!     elem(seq_equal("+")).omitted(),
//!     label("right", digits),
//! ]);
//!
//! let success = sum.matches(0, "12+3", &Env::default()).unwrap().success().unwrap();
//! assert_eq!(success.next, 4);
//! assert_eq!(success.env.get("right"), Some(&Value::Str("3".to_owned())));
//! ```

use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::Arc;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::action::{ActionContext, RecoverContext};
use crate::error::Abort;
use crate::input::Input;
use crate::result::MatchResult;
use crate::rule::{Element, LazyRule, Matcher, Rule, RuleKind};
use crate::value::MatchValue;

/// Matches `pattern` item by item.
///
/// Fails at the starting offset when any item differs, never at the point
/// of mismatch.
pub fn seq_equal<I: Input + ?Sized, V>(pattern: &I) -> Rule<I, V> {
    Rule::new(RuleKind::SeqEqual(pattern.to_shared()))
}

/// Matches any single item.
pub fn any_one<I: Input + ?Sized, V>() -> Rule<I, V> {
    Rule::new(RuleKind::AnyOne)
}

/// Matches one item contained in `set`.
pub fn one_of<I: Input + ?Sized, V>(set: &I) -> Rule<I, V> {
    Rule::new(RuleKind::OneOf(set.to_shared()))
}

/// Matches one item that `test` maps to a value; the mapped value, not the
/// item, is the match value.
pub fn one_match<I, V, F>(test: F) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn(&I::Item) -> Option<V> + Send + Sync + 'static,
{
    Rule::new(RuleKind::OneMatch(Arc::new(test)))
}

/// Wraps a user [`Matcher`].
pub fn custom<I, V, M>(matcher: M) -> Rule<I, V>
where
    I: Input + ?Sized,
    M: Matcher<I, V> + 'static,
{
    Rule::new(RuleKind::Custom(Arc::new(matcher)))
}

/// A plain sequence element.
pub fn elem<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Element<I, V> {
    Element::from(rule)
}

/// A sequence element whose value is bound to `name`.
pub fn label<I: Input + ?Sized, V>(name: impl Into<Arc<str>>, rule: Rule<I, V>) -> Element<I, V> {
    Element::from(rule).labeled(name)
}

/// A sequence element left out of the sequence's value.
pub fn omit<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Element<I, V> {
    Element::from(rule).omitted()
}

/// Matches every element in order.
///
/// The value is absent with no kept elements, the kept element's value with
/// one, and a list otherwise. Labels are visible to the elements after them.
pub fn seq<I, V, E>(elements: E) -> Rule<I, V>
where
    I: Input + ?Sized,
    E: IntoIterator<Item = Element<I, V>>,
{
    Rule::new(RuleKind::Sequence(elements.into_iter().collect()))
}

/// Tries every rule in order; the first success wins.
pub fn choice<I, V, R>(rules: R) -> Rule<I, V>
where
    I: Input + ?Sized,
    R: IntoIterator<Item = Rule<I, V>>,
{
    Rule::new(RuleKind::Choice(rules.into_iter().collect()))
}

/// Matches `rule` or nothing.
pub fn zero_or_one<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Rule<I, V> {
    Rule::new(RuleKind::ZeroOrOne(rule))
}

/// Matches `rule` as many times as possible; never fails.
pub fn zero_or_more<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Rule<I, V> {
    Rule::new(RuleKind::ZeroOrMore(rule))
}

/// Matches `rule` at least once, then as many times as possible.
pub fn one_or_more<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Rule<I, V> {
    Rule::new(RuleKind::OneOrMore(rule))
}

/// Succeeds without consuming when `rule` matches.
pub fn next_is<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Rule<I, V> {
    Rule::new(RuleKind::NextIs(rule))
}

/// Succeeds without consuming when `rule` does not match.
pub fn next_is_not<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Rule<I, V> {
    Rule::new(RuleKind::NextIsNot(rule))
}

/// Matches `rule` but rewinds the offset, keeping its value and captures.
pub fn peek<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Rule<I, V> {
    Rule::new(RuleKind::Peek(rule))
}

/// Replaces `rule`'s value by the input slice it consumed.
pub fn as_slice<I: Input + ?Sized, V>(rule: Rule<I, V>) -> Rule<I, V> {
    Rule::new(RuleKind::AsSlice(rule))
}

/// A rule built by `resolve` on first use and cached from then on.
///
/// Lets rules refer to each other before they exist. The match is fully
/// transparent: value, captures and failures are the target's own.
pub fn lazy<I, V, F>(resolve: F) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn() -> Rule<I, V> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Lazy(Arc::new(LazyRule::new(
        Box::new(resolve),
        None,
        true,
    ))))
}

/// A lazy reference to the grammar rule `name`.
///
/// Renders as `name` instead of expanding its target, and returns the
/// environment it was given: captures made inside the referenced rule stay
/// there.
pub fn reference<I, V, F>(name: impl Into<Cow<'static, str>>, resolve: F) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn() -> Rule<I, V> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Lazy(Arc::new(LazyRule::new(
        Box::new(resolve),
        Some(name.into()),
        true,
    ))))
}

/// Like [`reference`], but calls `resolve` on every match instead of caching
/// its target.
///
/// The node never owns the rule it refers to.
pub fn dynamic_reference<I, V, F>(name: impl Into<Cow<'static, str>>, resolve: F) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn() -> Rule<I, V> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Lazy(Arc::new(LazyRule::new(
        Box::new(resolve),
        Some(name.into()),
        false,
    ))))
}

/// Replaces `rule`'s value by the result of `action`.
///
/// A failure of `rule` is reported with this rule as the expectation.
pub fn action<I, V, F>(rule: Rule<I, V>, action: F) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn(&ActionContext<'_, I, V>) -> Result<V, Abort> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Action {
        rule,
        action: Arc::new(action),
        recover: None,
    })
}

/// Like [`action`], but a failure of `rule` is handed to `recover`, whose
/// result replaces it.
pub fn action_with_recovery<I, V, F, R>(rule: Rule<I, V>, action: F, recover: R) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn(&ActionContext<'_, I, V>) -> Result<V, Abort> + Send + Sync + 'static,
    R: Fn(RecoverContext<'_, I, V>) -> Result<MatchResult<I, V>, Abort> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Action {
        rule,
        action: Arc::new(action),
        recover: Some(Arc::new(recover)),
    })
}

/// Zero-width; succeeds when `predicate` returns `true`.
pub fn assert<I, V, F>(predicate: F) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn(&ActionContext<'_, I, V>) -> Result<bool, Abort> + Send + Sync + 'static,
{
    Rule::new(RuleKind::Assert(Arc::new(predicate)))
}

/// Zero-width; succeeds when `predicate` returns `false`.
pub fn assert_not<I, V, F>(predicate: F) -> Rule<I, V>
where
    I: Input + ?Sized,
    F: Fn(&ActionContext<'_, I, V>) -> Result<bool, Abort> + Send + Sync + 'static,
{
    Rule::new(RuleKind::AssertNot(Arc::new(predicate)))
}

/// Gives `rule` a display name.
///
/// Diagnostics print the name instead of the structure and report the rule
/// as a single expectation at the offset it started at.
pub fn named<I: Input + ?Sized, V>(rule: Rule<I, V>, name: impl Into<Cow<'static, str>>) -> Rule<I, V> {
    rule.with_name(name.into())
}

/// Succeeds only at the end of the input.
pub fn end_of_input<I: Input + ?Sized, V>() -> Rule<I, V> {
    named(next_is_not(any_one()), "end of input")
}

/// One entry of a character class.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ClassPart {
    Char(char),
    /// Inclusive range.
    Range(char, char),
}

impl ClassPart {
    #[inline]
    pub fn contains(&self, c: char) -> bool {
        match *self {
            ClassPart::Char(expected) => c == expected,
            ClassPart::Range(start, end) => start <= c && c <= end,
        }
    }
}

struct CharClass {
    parts: Vec<ClassPart>,
    inverted: bool,
    ignore_case: bool,
}

impl CharClass {
    fn accepts(&self, c: char) -> bool {
        let hit = self.parts.iter().any(|part| {
            part.contains(c)
                || (self.ignore_case
                    && (c.to_lowercase().any(|l| part.contains(l))
                        || c.to_uppercase().any(|u| part.contains(u))))
        });

        hit != self.inverted
    }
}

impl<V: MatchValue<str>> Matcher<str, V> for CharClass {
    fn match_at(&self, offset: usize, input: &str) -> Option<(usize, V)> {
        let (c, next) = input.item_at(offset)?;
        self.accepts(c).then(|| (next, V::item(c)))
    }

    fn describe(&self) -> String {
        let mut out = String::from("[");
        if self.inverted {
            out.push('^');
        }
        for part in &self.parts {
            match *part {
                ClassPart::Char(c) => push_class_char(&mut out, c),
                ClassPart::Range(start, end) => {
                    push_class_char(&mut out, start);
                    out.push('-');
                    push_class_char(&mut out, end);
                }
            }
        }
        out.push(']');
        if self.ignore_case {
            out.push('i');
        }
        out
    }
}

fn push_class_char(out: &mut String, c: char) {
    match c {
        '\\' | ']' | '^' | '-' => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() => {
            let _ = write!(out, "{}", c.escape_default());
        }
        c => out.push(c),
    }
}

/// Matches one char accepted by a character class.
///
/// `inverted` accepts the chars the parts do not cover; `ignore_case`
/// compares both case variants of the input char.
pub fn char_class<V: MatchValue<str>>(parts: Vec<ClassPart>, inverted: bool, ignore_case: bool) -> Rule<str, V> {
    custom(CharClass {
        parts,
        inverted,
        ignore_case,
    })
}

struct CaselessLiteral {
    literal: String,
}

impl<V: MatchValue<str>> Matcher<str, V> for CaselessLiteral {
    fn match_at(&self, offset: usize, input: &str) -> Option<(usize, V)> {
        let mut next = offset;
        for expected in self.literal.chars() {
            let (c, after) = input.item_at(next)?;
            if !c.to_lowercase().eq(expected.to_lowercase()) {
                return None;
            }
            next = after;
        }

        Some((next, V::slice(input.get(offset..next)?)))
    }

    fn describe(&self) -> String {
        format!("{:?}i", self.literal)
    }
}

/// Matches `literal` ignoring case, char by char.
pub fn literal_ci<V: MatchValue<str>>(literal: &str) -> Rule<str, V> {
    custom(CaselessLiteral {
        literal: literal.to_owned(),
    })
}

struct RegexMatcher {
    regex: Regex,
    source: String,
}

impl<V: MatchValue<str>> Matcher<str, V> for RegexMatcher {
    fn match_at(&self, offset: usize, input: &str) -> Option<(usize, V)> {
        let found = self.regex.find(input.get(offset..)?)?;
        Some((offset + found.end(), V::slice(found.as_str())))
    }

    fn describe(&self) -> String {
        format!("/{}/", self.source)
    }
}

/// Matches `pattern`, anchored at the current offset.
///
/// ```
/// # use pegloom::{rules, Env, Value};
/// let number = rules::regex::<Value>(r"[0-9]+(\.[0-9]+)?").unwrap();
/// let success = number.matches(2, "x=3.25;", &Env::default()).unwrap().success().unwrap();
///
/// assert_eq!(success.next, 6);
/// assert_eq!(success.value, Value::Str("3.25".to_owned()));
/// ```
pub fn regex<V: MatchValue<str>>(pattern: &str) -> Result<Rule<str, V>, regex::Error> {
    let regex = Regex::new(&format!("^(?:{})", pattern))?;

    Ok(custom(RegexMatcher {
        regex,
        source: pattern.to_owned(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Env, MatchResult, Options, PrevFail, Value};
    use pretty_assertions::assert_eq;

    type R = Rule<str, Value>;

    fn run(rule: &R, offset: usize, input: &str) -> MatchResult<str, Value> {
        rule.matches(offset, input, &Env::default()).unwrap()
    }

    fn s(text: &str) -> Value {
        Value::Str(text.to_owned())
    }

    #[test]
    fn literal() {
        let success = run(&seq_equal("abc"), 0, "abcdef").success().unwrap();

        assert_eq!(success.next, 3);
        assert_eq!(success.value, s("abc"));
    }

    #[test]
    fn literal_fails_at_start() {
        let failure = run(&seq_equal("abd"), 1, "xabc").failure().unwrap();

        assert_eq!(failure.offset, 1);
        assert!(matches!(failure.prev, PrevFail::None));
    }

    #[test]
    fn any_and_one_of() {
        assert_eq!(run(&any_one(), 0, "x").success().unwrap().value, s("x"));
        assert!(!run(&any_one(), 1, "x").is_success());
        assert_eq!(run(&one_of("xyz"), 0, "y").success().unwrap().next, 1);
        assert!(!run(&one_of("xyz"), 0, "a").is_success());
    }

    #[test]
    fn one_match_transforms() {
        let digit: R = one_match(|c: &char| c.to_digit(10).map(|d| Value::Int(d.into())));

        assert_eq!(run(&digit, 0, "7").success().unwrap().value, Value::Int(7));
        assert!(!run(&digit, 0, "a").is_success());
    }

    #[test]
    fn choice_is_ordered() {
        let rule: R = choice([
            action(seq_equal("a"), |_| Ok(Value::Int(1))),
            action(seq_equal("a"), |_| Ok(Value::Int(2))),
        ]);

        assert_eq!(run(&rule, 0, "a").success().unwrap().value, Value::Int(1));
    }

    #[test]
    fn choice_aggregates_failures() {
        let rule: R = choice([seq_equal("def"), seq_equal("abc"), seq_equal("ghi")]);
        let failure = run(&rule, 1, "xbcdefghi").failure().unwrap();

        assert_eq!(failure.offset, 1);
        match &failure.prev {
            PrevFail::Many(failures) => {
                let leaves: Vec<(usize, String)> = failures
                    .iter()
                    .map(|f| {
                        assert!(matches!(f.prev, PrevFail::None));
                        (f.offset, f.expected.to_string())
                    })
                    .collect();
                assert_eq!(
                    leaves,
                    vec![
                        (1, r#""def""#.to_owned()),
                        (1, r#""abc""#.to_owned()),
                        (1, r#""ghi""#.to_owned()),
                    ]
                );
            }
            prev => panic!("expected an aggregated failure, got {} children", prev_len(prev)),
        }
    }

    fn prev_len(prev: &PrevFail<str, Value>) -> usize {
        match prev {
            PrevFail::None => 0,
            PrevFail::Single(_) => 1,
            PrevFail::Many(failures) => failures.len(),
        }
    }

    #[test]
    fn sequence_fails_at_start() {
        let rule: R = seq([
            elem(seq_equal("abc")),
            elem(seq_equal("abc")),
            elem(seq_equal("abc")),
        ]);
        let failure = run(&rule, 0, "abcabc").failure().unwrap();

        assert_eq!(failure.offset, 0);
        assert_eq!(failure.expected.to_string(), r#""abc" "abc" "abc""#);
        match failure.prev {
            PrevFail::Single(child) => {
                assert_eq!(child.offset, 6);
                assert_eq!(child.expected.to_string(), r#""abc""#);
                assert!(matches!(child.prev, PrevFail::None));
            }
            prev => panic!("expected a single child, got {}", prev_len(&prev)),
        }
    }

    #[test]
    fn sequence_values() {
        let empty: R = seq([omit(seq_equal("a"))]);
        let single: R = seq([omit(seq_equal("a")), elem(seq_equal("b"))]);
        let many: R = seq([elem(seq_equal("a")), elem(seq_equal("b"))]);

        assert_eq!(run(&empty, 0, "ab").success().unwrap().value, Value::Absent);
        assert_eq!(run(&single, 0, "ab").success().unwrap().value, s("b"));
        assert_eq!(
            run(&many, 0, "ab").success().unwrap().value,
            Value::List(vec![s("a"), s("b")])
        );
    }

    #[test]
    fn labels_are_visible_to_later_elements() {
        let rule: R = seq([
            label("first", any_one()),
            elem(assert(|ctx| Ok(ctx.capture("first") == Value::Str("a".to_owned())))),
            label("second", any_one()),
        ]);

        let success = run(&rule, 0, "ab").success().unwrap();
        assert_eq!(success.env.get("second"), Some(&s("b")));
        assert!(!run(&rule, 0, "bb").is_success());
    }

    #[test]
    fn failed_sequence_leaves_env_alone() {
        let env: Env<Value> = Env::default();
        let rule: R = choice([
            seq([label("x", seq_equal("a")), elem(seq_equal("b"))]),
            seq_equal("a"),
        ]);

        let success = rule.matches(0, "ac", &env).unwrap().success().unwrap();
        assert!(success.env.get("x").is_none());
        assert!(success.env.extends(&env));
    }

    #[test]
    fn repetition() {
        let a: R = seq_equal("a");

        let none = run(&zero_or_more(a.clone()), 0, "").success().unwrap();
        assert_eq!((none.next, none.value), (0, Value::List(vec![])));

        let some = run(&zero_or_more(a.clone()), 0, "aab").success().unwrap();
        assert_eq!(some.next, 2);

        assert!(run(&zero_or_one(a.clone()), 0, "b").success().unwrap().value.is_absent());

        let failure = run(&one_or_more(a.clone()), 0, "b").failure().unwrap();
        assert_eq!(failure.expected.to_string(), r#""a"+"#);
        assert_eq!(failure.children().len(), 1);

        assert_eq!(run(&one_or_more(a), 0, "aaa").success().unwrap().next, 3);
    }

    #[test]
    fn repetition_stops_without_progress() {
        let rule: R = zero_or_more(zero_or_one(seq_equal("a")));
        let success = run(&rule, 0, "aab").success().unwrap();

        assert_eq!(success.next, 2);
    }

    #[test]
    fn lookahead_never_consumes() {
        let rule: R = next_is(seq_equal("ab"));

        let success = run(&rule, 0, "abc").success().unwrap();
        assert_eq!(success.next, 0);
        assert!(success.value.is_absent());

        assert!(run(&next_is_not(seq_equal("ab")), 0, "ac").is_success());
        assert!(!run(&next_is_not(seq_equal("ab")), 0, "ab").is_success());
    }

    #[test]
    fn peek_keeps_value() {
        let success = run(&peek(seq_equal("ab")), 0, "abc").success().unwrap();

        assert_eq!(success.next, 0);
        assert_eq!(success.value, s("ab"));
    }

    #[test]
    fn slices() {
        let rule: R = as_slice(seq([elem(seq_equal("a")), elem(one_or_more(seq_equal("b")))]));
        let success = run(&rule, 1, "xabbc").success().unwrap();

        assert_eq!(success.value, s("abb"));
        assert_eq!(success.next, 4);
    }

    #[test]
    fn token_inputs() {
        let tokens = [1_u8, 2, 3];
        let rule: Rule<[u8], Value<u8>> = as_slice(seq([elem(seq_equal(&[1, 2][..])), elem(any_one())]));
        let success = rule.matches(0, &tokens[..], &Env::default()).unwrap().success().unwrap();

        assert_eq!(success.value, Value::Items(vec![1, 2, 3]));
    }

    #[test]
    fn mutual_recursion() {
        // a = "(" b ")" / "x"; b = a
        fn a() -> &'static R {
            static RULE: once_cell::sync::OnceCell<R> = once_cell::sync::OnceCell::new();
            RULE.get_or_init(|| {
                choice([
                    seq([
                        elem(seq_equal("(")),
                        elem(reference("b", || b().clone())),
                        elem(seq_equal(")")),
                    ]),
                    seq_equal("x"),
                ])
            })
        }

        fn b() -> &'static R {
            static RULE: once_cell::sync::OnceCell<R> = once_cell::sync::OnceCell::new();
            RULE.get_or_init(|| reference("a", || a().clone()))
        }

        assert_eq!(run(b(), 0, "((x))").success().unwrap().next, 5);
        assert!(!run(a(), 0, "((x)").is_success());
        assert_eq!(a().to_string(), r#""(" b ")" / "x""#);
    }

    #[test]
    fn references_keep_captures_local() {
        let inner: R = seq([label("x", any_one())]);
        let rule: R = seq([elem(reference("inner", move || inner.clone()))]);

        let success = run(&rule, 0, "a").success().unwrap();
        assert!(success.env.get("x").is_none());
        assert!(lazy(move || rule.clone()).matches(0, "a", &Env::default()).unwrap().is_success());
    }

    #[test]
    fn lazy_resolves_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let rule: R = lazy(|| {
            CALLS.fetch_add(1, Ordering::SeqCst);
            seq_equal("a")
        });

        run(&rule, 0, "a");
        run(&rule.clone(), 0, "b");
        assert_eq!(CALLS.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn dynamic_references_resolve_every_time() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        static CALLS: AtomicUsize = AtomicUsize::new(0);
        let rule: R = dynamic_reference("a", || {
            CALLS.fetch_add(1, Ordering::SeqCst);
            seq_equal("a")
        });

        run(&rule, 0, "a");
        run(&rule, 0, "a");
        assert_eq!(CALLS.load(Ordering::SeqCst), 2);
        assert_eq!(rule.to_string(), "a");
        assert_eq!(rule.reference_name(), Some("a"));
    }

    #[test]
    fn actions() {
        let rule: R = action(as_slice(one_or_more(any_one())), |ctx| {
            assert_eq!(ctx.text(), "bc");
            assert_eq!(ctx.range(), 1..3);
            Ok(Value::Int(ctx.value().as_str().map_or(0, |t| t.len() as i64)))
        });

        assert_eq!(run(&rule, 1, "abc").success().unwrap().value, Value::Int(2));
    }

    #[test]
    fn action_failure_is_wrapped() {
        let rule: R = named(action(seq_equal("a"), |ctx| Ok(ctx.value())), "thing");
        let failure = run(&rule, 0, "b").failure().unwrap();

        assert_eq!(failure.expected.to_string(), "thing");
        assert_eq!(failure.children()[0].expected.to_string(), r#""a""#);
    }

    #[test]
    fn aborts_pass_through_choice() {
        let rule: R = choice([
            action(seq_equal("a"), |ctx| Err(ctx.expected("something else"))),
            seq_equal("a"),
        ]);
        let abort = rule.matches(0, "a", &Env::default()).unwrap_err();

        assert_eq!(abort.message, r#"expected something else but found "a""#);
        assert_eq!(abort.location.start.offset, 0);
    }

    #[test]
    fn recovery() {
        let statement: R = action_with_recovery(
            seq([elem(seq_equal("ok")), elem(seq_equal(";"))]),
            |ctx| Ok(ctx.value()),
            |recover| Ok(recover.recover_with(Value::Null)),
        );
        let success = run(&statement, 0, "ok!").success().unwrap();

        assert_eq!(success.next, 2);
        assert_eq!(success.value, Value::Null);
    }

    #[test]
    fn predicates() {
        let strict: R = assert(|ctx| Ok(ctx.options().get("strict").is_some()));
        let env = Env::new(Options::default().with("strict", true));

        assert!(strict.matches(0, "", &env).unwrap().is_success());
        assert!(!run(&strict, 0, "").is_success());
        assert!(run(&assert_not(|_| Ok(false)), 0, "").is_success());
    }

    #[test]
    fn classes() {
        let class: R = char_class(vec![ClassPart::Range('a', 'c'), ClassPart::Char('_')], false, true);

        assert!(run(&class, 0, "B").is_success());
        assert!(run(&class, 0, "_").is_success());
        assert!(!run(&class, 0, "d").is_success());
        assert_eq!(class.to_string(), "[a-c_]i");

        let inverted: R = char_class(vec![ClassPart::Char(']')], true, false);
        assert!(run(&inverted, 0, "x").is_success());
        assert!(!run(&inverted, 0, "]").is_success());
        assert!(!run(&inverted, 0, "").is_success());
        assert_eq!(inverted.to_string(), r"[^\]]");
    }

    #[test]
    fn caseless_literals() {
        let rule: R = literal_ci("select");

        assert_eq!(run(&rule, 0, "SeLeCt *").success().unwrap().value, s("SeLeCt"));
        assert!(!run(&rule, 0, "selec").is_success());
    }

    #[test]
    fn rendering() {
        let rule: R = seq([
            elem(as_slice(seq_equal("a"))),
            elem(zero_or_more(choice([seq_equal("b"), any_one()]))),
            elem(next_is_not(seq_equal("c"))),
        ]);

        assert_eq!(rule.to_string(), r#"$"a" ("b" / .)* !"c""#);
        assert_eq!(end_of_input::<str, Value>().to_string(), "end of input");
    }

    #[test]
    fn peek_renders_apart_from_lookahead() {
        let ab: R = seq([elem(seq_equal("a")), elem(seq_equal("b"))]);

        assert_eq!(peek(ab.clone()).to_string(), r#"peek("a" "b")"#);
        assert_eq!(next_is(ab).to_string(), r#"&("a" "b")"#);
    }

    struct Halfway;

    impl Matcher<str, Value> for Halfway {
        fn match_at(&self, offset: usize, _: &str) -> Option<(usize, Value)> {
            Some((offset + 1, Value::Absent))
        }

        fn describe(&self) -> String {
            "halfway".to_owned()
        }
    }

    #[test]
    fn matchers_ending_inside_a_char_fail() {
        let rule: R = as_slice(custom(Halfway));

        let failure = run(&rule, 0, "ș").failure().unwrap();
        assert_eq!(failure.expectations(), (0, vec!["halfway".to_owned()]));
        assert_eq!(run(&rule, 0, "ab").success().unwrap().value, s("a"));

        let text: R = action(custom(Halfway), |ctx| Ok(Value::Str(ctx.text().to_owned())));
        assert!(!run(&text, 0, "ș").is_success());
    }

    #[test]
    fn repetitions_carry_the_failure_that_stopped_them() {
        let pair: R = seq([elem(seq_equal("a")), elem(seq_equal("b"))]);
        let success = run(&zero_or_more(pair.clone()), 0, "abac").success().unwrap();

        assert_eq!(success.next, 2);
        assert_eq!(success.prev.map(|prev| prev.deepest_offset()), Some(3));

        let success = run(&zero_or_more(pair.clone()), 0, "abx").success().unwrap();
        assert_eq!(success.prev.map(|prev| prev.deepest_offset()), Some(2));

        let success = run(&seq([elem(zero_or_one(pair.clone())), elem(seq_equal("a"))]), 0, "ac")
            .success()
            .unwrap();
        assert_eq!(success.prev.map(|prev| prev.expectations()), Some((1, vec![r#""b""#.to_owned()])));

        let success = run(&named(zero_or_more(pair), "pairs"), 0, "abac").success().unwrap();
        assert!(success.prev.is_none());
    }

    #[test]
    fn sequence_failure_keeps_a_deeper_swallowed_failure() {
        let rule: R = seq([
            elem(zero_or_more(seq([elem(seq_equal("a")), elem(seq_equal("b"))]))),
            elem(seq_equal(";")),
        ]);
        let failure = run(&rule, 0, "abac").failure().unwrap();

        assert_eq!(failure.expectations(), (3, vec![r#""b""#.to_owned()]));
    }

    #[test]
    fn rendering_terminates_on_cycles() {
        fn looping() -> &'static R {
            static RULE: once_cell::sync::OnceCell<R> = once_cell::sync::OnceCell::new();
            RULE.get_or_init(|| zero_or_one(seq([elem(seq_equal("a")), elem(lazy(|| looping().clone()))])))
        }

        assert!(looping().render(6).contains('…'));
    }
}
