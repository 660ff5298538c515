// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Checks run on a parsed grammar before it is turned into rules.

use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use pegloom::Location;

use crate::ast::{Expr, ExprKind, Grammar};
use crate::GrammarError;

pub static RUST_KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "abstract", "alignof", "as", "become", "box", "break", "const", "continue", "crate", "do",
        "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in", "let", "loop",
        "macro", "match", "mod", "move", "mut", "offsetof", "override", "priv", "proc", "pure",
        "pub", "ref", "return", "Self", "self", "sizeof", "static", "struct", "super", "trait",
        "true", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
    ]
    .iter()
    .cloned()
    .collect()
});

/// Runs every check, reporting all errors found.
pub fn validate(grammar: &Grammar) -> Result<(), Vec<GrammarError>> {
    let mut errors = vec![];

    errors.extend(validate_already_defined(grammar));
    errors.extend(validate_undefined(grammar));
    errors.extend(validate_labels(grammar));

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(())
}

pub fn validate_already_defined(grammar: &Grammar) -> Vec<GrammarError> {
    let mut errors = vec![];
    let mut defined = HashSet::new();

    for rule in &grammar.rules {
        let name = rule.name.as_str();

        if defined.contains(&name) {
            errors.push(GrammarError::AlreadyDefined {
                name: name.to_owned(),
                location: rule.name_location,
            })
        } else {
            defined.insert(name);
        }
    }

    errors
}

pub fn validate_undefined(grammar: &Grammar) -> Vec<GrammarError> {
    let mut errors = vec![];
    let definitions: HashSet<_> = grammar.rules.iter().map(|rule| rule.name.as_str()).collect();

    for rule in &grammar.rules {
        for (name, location) in rule.expr.rule_refs() {
            if !definitions.contains(name) {
                errors.push(GrammarError::Undefined {
                    name: name.to_owned(),
                    location,
                })
            }
        }
    }

    errors
}

/// Labels are visible to the rest of their sequence and to everything
/// nested in it, so no label may reuse a name already in scope.
pub fn validate_labels(grammar: &Grammar) -> Vec<GrammarError> {
    let mut errors = vec![];

    for rule in &grammar.rules {
        check_labels(&rule.expr, &mut HashMap::new(), &mut errors);
    }

    errors
}

fn check_labels(expr: &Expr, scope: &mut HashMap<String, Location>, errors: &mut Vec<GrammarError>) {
    match &expr.kind {
        ExprKind::Choice { alternatives } => {
            for alternative in alternatives {
                check_labels(alternative, &mut scope.clone(), errors);
            }
        }
        ExprKind::Sequence { elements } => {
            for element in elements {
                check_labels(element, scope, errors);
            }
        }
        ExprKind::Labeled { label, expr, .. } => {
            if let Some(label) = label {
                if let Some(original) = scope.get(&label.name) {
                    errors.push(GrammarError::DuplicateLabel {
                        name: label.name.clone(),
                        location: label.location,
                        original: *original,
                    });
                }
            }

            check_labels(expr, scope, errors);

            if let Some(label) = label {
                scope.insert(label.name.clone(), label.location);
            }
        }
        ExprKind::Action { expr, .. }
        | ExprKind::Text { expr }
        | ExprKind::SimpleAnd { expr }
        | ExprKind::SimpleNot { expr }
        | ExprKind::Optional { expr }
        | ExprKind::ZeroOrMore { expr }
        | ExprKind::OneOrMore { expr }
        | ExprKind::Group { expr } => check_labels(expr, &mut scope.clone(), errors),
        ExprKind::SemanticAnd { .. }
        | ExprKind::SemanticNot { .. }
        | ExprKind::RuleRef { .. }
        | ExprKind::Literal { .. }
        | ExprKind::Class { .. }
        | ExprKind::Any => {}
    }
}
