// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Capture environments threaded through a match.

use std::any::Any;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use once_cell::unsync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::input::Input;
use crate::line_index::LineIndex;
use crate::position::Position;

/// Free-form options passed to a parse.
///
/// `start_rule` selects the rule a generated parser starts from; every other
/// key is kept verbatim for grammar code to read.
///
/// ```
/// # use pegloom::Options;
/// let options: Options = serde_json::from_str(r#"{"startRule": "sum", "strict": true}"#).unwrap();
/// assert_eq!(options.start_rule.as_deref(), Some("sum"));
/// assert_eq!(options.get("strict"), Some(&serde_json::Value::Bool(true)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_rule: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Options {
    pub fn new() -> Options {
        Options::default()
    }

    pub fn with_start_rule(mut self, rule: impl Into<String>) -> Options {
        self.start_rule = Some(rule.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Options {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.extra.get(key)
    }
}

struct Binding<V> {
    name: Arc<str>,
    value: V,
    next: Option<Rc<Binding<V>>>,
}

struct Shared {
    options: Options,
    state: Option<Rc<dyn Any>>,
    lines: OnceCell<LineIndex>,
}

/// The environment a rule is matched in.
///
/// Holds the captures bound so far, newest first, plus state shared by the
/// whole parse: the options, an optional user state and the line table used
/// to resolve positions. Binding never mutates an environment; it returns a
/// new one sharing its tail with the old, so a backtracking branch can never
/// observe captures made by another.
pub struct Env<V> {
    captures: Option<Rc<Binding<V>>>,
    shared: Rc<Shared>,
}

impl<V> Env<V> {
    /// Creates an empty environment.
    pub fn new(options: Options) -> Env<V> {
        Env::with_state(options, None)
    }

    /// Creates an empty environment carrying a user state that grammar code
    /// can retrieve through [`Env::state`].
    pub fn with_state(options: Options, state: Option<Rc<dyn Any>>) -> Env<V> {
        Env {
            captures: None,
            shared: Rc::new(Shared {
                options,
                state,
                lines: OnceCell::new(),
            }),
        }
    }

    /// Returns a new environment with `name` bound to `value`.
    ///
    /// ```
    /// # use pegloom::{Env, Options, Value};
    /// let env: Env<Value> = Env::new(Options::default());
    /// let bound = env.bind("x", Value::Int(1));
    ///
    /// assert!(env.get("x").is_none());
    /// assert_eq!(bound.get("x"), Some(&Value::Int(1)));
    /// ```
    #[must_use]
    pub fn bind(&self, name: impl Into<Arc<str>>, value: V) -> Env<V> {
        Env {
            captures: Some(Rc::new(Binding {
                name: name.into(),
                value,
                next: self.captures.clone(),
            })),
            shared: Rc::clone(&self.shared),
        }
    }

    /// Most recent value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&V> {
        self.captures().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    /// Captures from newest to oldest; a name bound twice appears twice.
    pub fn captures(&self) -> Captures<'_, V> {
        Captures {
            next: self.captures.as_deref(),
        }
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.captures().count()
    }

    pub fn is_empty(&self) -> bool {
        self.captures.is_none()
    }

    /// Whether `self` was obtained from `base` by binding zero or more names.
    pub fn extends(&self, base: &Env<V>) -> bool {
        if !Rc::ptr_eq(&self.shared, &base.shared) {
            return false;
        }

        let target = match &base.captures {
            Some(binding) => binding,
            None => return true,
        };

        let mut current = self.captures.as_ref();
        while let Some(binding) = current {
            if Rc::ptr_eq(binding, target) {
                return true;
            }
            current = binding.next.as_ref();
        }

        false
    }

    pub fn options(&self) -> &Options {
        &self.shared.options
    }

    /// The user state, if one of type `S` was installed.
    pub fn state<S: Any>(&self) -> Option<&S> {
        self.shared.state.as_ref()?.downcast_ref()
    }

    /// Resolves `offset` in `input` to a line and column.
    ///
    /// The line table is built on first use and reused for the rest of the
    /// parse, so `input` must be the input this environment is matching.
    pub fn position<I: Input + ?Sized>(&self, input: &I, offset: usize) -> Position {
        self.line_index(input).position(input, offset)
    }

    pub(crate) fn line_index<I: Input + ?Sized>(&self, input: &I) -> &LineIndex {
        self.shared.lines.get_or_init(|| LineIndex::new(input))
    }
}

impl<V> Clone for Env<V> {
    fn clone(&self) -> Self {
        Env {
            captures: self.captures.clone(),
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<V> Default for Env<V> {
    fn default() -> Self {
        Env::new(Options::default())
    }
}

impl<V: fmt::Debug> fmt::Debug for Env<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.captures()).finish()
    }
}

/// Iterator over an [`Env`]'s captures.
pub struct Captures<'a, V> {
    next: Option<&'a Binding<V>>,
}

impl<'a, V> Iterator for Captures<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let binding = self.next?;
        self.next = binding.next.as_deref();
        Some((&binding.name, &binding.value))
    }
}
