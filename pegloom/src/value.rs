// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Values produced by successful matches.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::input::Input;

/// A type rules can produce as their match value.
///
/// Leaf rules only need to build values out of input items and slices;
/// sequences and repetitions need lists; optional rules need a marker for
/// "nothing matched".
pub trait MatchValue<I: Input + ?Sized>: Clone + fmt::Debug + 'static {
    /// The marker produced by a non-matching optional or a zero-width rule.
    fn absent() -> Self;

    /// An ordered list of values.
    fn list(values: Vec<Self>) -> Self;

    /// A single input item.
    fn item(item: I::Item) -> Self;

    /// A copy of a slice of the input.
    fn slice(slice: &I) -> Self;
}

/// A dynamically typed match value.
///
/// String inputs produce `Str` for both single characters and slices; token
/// inputs produce `Item` and `Items`. Serializes to plain JSON with `Absent`
/// and `Null` both becoming `null`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value<T = char> {
    /// Nothing matched.
    Absent,
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A single token.
    Item(T),
    /// A slice of tokens.
    Items(Vec<T>),
    List(Vec<Value<T>>),
    Map(BTreeMap<String, Value<T>>),
}

impl<T> Value<T> {
    #[inline]
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Integer view of the value; strings holding a decimal integer are parsed.
    ///
    /// ```
    /// # use pegloom::Value;
    /// assert_eq!(Value::<char>::Str("42".to_owned()).as_int(), Some(42));
    /// assert_eq!(Value::<char>::Int(7).as_int(), Some(7));
    /// assert_eq!(Value::<char>::Absent.as_int(), None);
    /// ```
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            Value::Str(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value<T>]> {
        match self {
            Value::List(values) => Some(values),
            _ => None,
        }
    }

    /// Consumes a list value; non-lists become a one-element list and
    /// `Absent` an empty one.
    pub fn into_list(self) -> Vec<Value<T>> {
        match self {
            Value::List(values) => values,
            Value::Absent => Vec::new(),
            other => vec![other],
        }
    }

    /// Looks `key` up in a map value.
    pub fn get(&self, key: &str) -> Option<&Value<T>> {
        match self {
            Value::Map(map) => map.get(key),
            _ => None,
        }
    }
}

impl MatchValue<str> for Value<char> {
    #[inline]
    fn absent() -> Self {
        Value::Absent
    }

    #[inline]
    fn list(values: Vec<Self>) -> Self {
        Value::List(values)
    }

    #[inline]
    fn item(item: char) -> Self {
        Value::Str(item.to_string())
    }

    #[inline]
    fn slice(slice: &str) -> Self {
        Value::Str(slice.to_owned())
    }
}

impl<T> MatchValue<[T]> for Value<T>
where
    T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    #[inline]
    fn absent() -> Self {
        Value::Absent
    }

    #[inline]
    fn list(values: Vec<Self>) -> Self {
        Value::List(values)
    }

    #[inline]
    fn item(item: T) -> Self {
        Value::Item(item)
    }

    #[inline]
    fn slice(slice: &[T]) -> Self {
        Value::Items(slice.to_vec())
    }
}

impl<T> Default for Value<T> {
    fn default() -> Self {
        Value::Absent
    }
}

impl<T> From<bool> for Value<T> {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T> From<i64> for Value<T> {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl<T> From<f64> for Value<T> {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl<T> From<&str> for Value<T> {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl<T> From<String> for Value<T> {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl<T> From<Vec<Value<T>>> for Value<T> {
    fn from(values: Vec<Value<T>>) -> Self {
        Value::List(values)
    }
}

impl<T> From<Option<Value<T>>> for Value<T> {
    fn from(value: Option<Value<T>>) -> Self {
        value.unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_input_values() {
        assert_eq!(<Value as MatchValue<str>>::item('a'), Value::Str("a".to_owned()));
        assert_eq!(<Value as MatchValue<str>>::slice("ab"), Value::Str("ab".to_owned()));
    }

    #[test]
    fn token_input_values() {
        assert_eq!(<Value<u8> as MatchValue<[u8]>>::item(3), Value::Item(3));
        assert_eq!(
            <Value<u8> as MatchValue<[u8]>>::slice(&[1, 2]),
            Value::Items(vec![1, 2])
        );
    }

    #[test]
    fn json() {
        let value: Value = Value::List(vec![
            Value::Absent,
            Value::Int(1),
            Value::from("x"),
            Value::Bool(true),
        ]);

        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            r#"[null,1,"x",true]"#
        );
    }

    #[test]
    fn into_list() {
        assert_eq!(Value::<char>::Absent.into_list(), vec![]);
        assert_eq!(Value::<char>::Int(1).into_list(), vec![Value::Int(1)]);
    }
}
