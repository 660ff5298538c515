// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Types for the grammar AST.
//!
//! Every node records the [`Location`] of the source it was parsed from.
//! Rules refer to each other by name only, so the tree has no cycles.

use std::collections::BTreeMap;

use pegloom::Location;
use serde::Serialize;

pub use pegloom::rules::ClassPart;

/// A parsed grammar.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Grammar {
    /// Code placed before the first rule, e.g. `{ use std::mem; }`
    pub initializer: Option<CodeBlock>,
    pub rules: Vec<Rule>,
    /// Comments keyed by the offset they start at, when collected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<BTreeMap<usize, Comment>>,
    pub location: Location,
}

impl Grammar {
    /// Looks a rule up by name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// A grammar rule, e.g. `number "number" = [0-9]+`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Rule {
    pub name: String,
    /// Name used in error messages instead of the rule's expectations.
    pub display_name: Option<String>,
    pub expr: Expr,
    pub name_location: Location,
    pub location: Location,
}

/// A block of host-language code, without its braces.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct CodeBlock {
    pub code: String,
    pub location: Location,
}

/// A comment, without its delimiters.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Comment {
    pub text: String,
    pub multiline: bool,
    pub location: Location,
}

/// A label attached to a sequence element.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Label {
    pub name: String,
    pub location: Location,
}

/// A grammar expression.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Expr {
    #[serde(flatten)]
    pub kind: ExprKind,
    pub location: Location,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExprKind {
    /// Tries alternatives in order, e.g. `a / b`
    Choice { alternatives: Vec<Expr> },
    /// Replaces the value of an expression by the result of code, e.g. `a { ... }`
    Action { expr: Box<Expr>, code: CodeBlock },
    /// Matches expressions one after the other, e.g. `a b`
    Sequence { elements: Vec<Expr> },
    /// A labeled or picked sequence element, e.g. `x:a`, `@a` or `@x:a`
    Labeled {
        label: Option<Label>,
        pick: bool,
        expr: Box<Expr>,
    },
    /// Returns the matched text instead of the value, e.g. `$a`
    Text { expr: Box<Expr> },
    /// Positive lookahead, e.g. `&a`
    SimpleAnd { expr: Box<Expr> },
    /// Negative lookahead, e.g. `!a`
    SimpleNot { expr: Box<Expr> },
    /// Optionally matches an expression, e.g. `a?`
    Optional { expr: Box<Expr> },
    /// Matches an expression zero or more times, e.g. `a*`
    ZeroOrMore { expr: Box<Expr> },
    /// Matches an expression one or more times, e.g. `a+`
    OneOrMore { expr: Box<Expr> },
    /// A parenthesized expression that opens a new label scope, e.g. `(x:a b)`
    Group { expr: Box<Expr> },
    /// Succeeds if code returns true, e.g. `&{ ... }`
    SemanticAnd { code: CodeBlock },
    /// Succeeds if code returns false, e.g. `!{ ... }`
    SemanticNot { code: CodeBlock },
    /// Matches the rule with the given name, e.g. `a`
    RuleRef { name: String },
    /// Matches an exact string, e.g. `"a"` or `"a"i`
    Literal { value: String, ignore_case: bool },
    /// Matches one character of a class, e.g. `[a-z_]` or `[^"]i`
    Class {
        parts: Vec<ClassPart>,
        inverted: bool,
        ignore_case: bool,
    },
    /// Matches any character, e.g. `.`
    Any,
}

impl Expr {
    pub fn new(kind: ExprKind, location: Location) -> Expr {
        Expr { kind, location }
    }

    /// Direct subexpressions, in source order.
    pub fn children(&self) -> Vec<&Expr> {
        match &self.kind {
            ExprKind::Choice { alternatives } => alternatives.iter().collect(),
            ExprKind::Sequence { elements } => elements.iter().collect(),
            ExprKind::Action { expr, .. }
            | ExprKind::Labeled { expr, .. }
            | ExprKind::Text { expr }
            | ExprKind::SimpleAnd { expr }
            | ExprKind::SimpleNot { expr }
            | ExprKind::Optional { expr }
            | ExprKind::ZeroOrMore { expr }
            | ExprKind::OneOrMore { expr }
            | ExprKind::Group { expr } => vec![&**expr],
            ExprKind::SemanticAnd { .. }
            | ExprKind::SemanticNot { .. }
            | ExprKind::RuleRef { .. }
            | ExprKind::Literal { .. }
            | ExprKind::Class { .. }
            | ExprKind::Any => Vec::new(),
        }
    }

    /// Visits `self` and every subexpression, parents first.
    pub fn walk<'a, F>(&'a self, f: &mut F)
    where
        F: FnMut(&'a Expr),
    {
        f(self);
        for child in self.children() {
            child.walk(f);
        }
    }

    /// Names of the rules referenced anywhere in the expression.
    pub fn rule_refs(&self) -> Vec<(&str, Location)> {
        let mut refs = Vec::new();
        self.walk(&mut |expr| {
            if let ExprKind::RuleRef { name } = &expr.kind {
                refs.push((name.as_str(), expr.location));
            }
        });
        refs
    }
}
