// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Inputs rules can match against.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// An indexable, sliceable sequence of items.
///
/// Implemented for `str`, whose items are `char`s addressed by byte offsets,
/// and for `[T]`, whose items are `T`s addressed by index. Matching never
/// mutates an input.
pub trait Input: fmt::Debug + Send + Sync + 'static {
    /// A single element of the input.
    type Item: Clone + PartialEq + fmt::Debug + Send + Sync + 'static;

    /// Length in offset units.
    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the item at `offset` and the offset right after it.
    fn item_at(&self, offset: usize) -> Option<(Self::Item, usize)>;

    /// Sub-input between two offsets, or `None` when either offset is out
    /// of bounds or does not fall between two items.
    fn slice(&self, range: Range<usize>) -> Option<&Self>;

    /// Whether `pattern` occurs at `offset`.
    fn starts_with_at(&self, offset: usize, pattern: &Self) -> bool;

    /// Whether `item` is one of the items of `self`.
    fn contains_item(&self, item: &Self::Item) -> bool;

    /// Copies the input into a reference-counted allocation.
    fn to_shared(&self) -> Arc<Self>;

    /// Offsets at which lines start; always begins with `0`.
    fn line_starts(&self) -> Vec<usize> {
        vec![0]
    }

    /// 1-based column of `offset` on the line starting at `line_start`.
    fn column(&self, line_start: usize, offset: usize) -> usize {
        offset - line_start + 1
    }

    /// Text of the line starting at `line_start`, for error excerpts.
    fn line_text(&self, _line_start: usize) -> Option<String> {
        None
    }

    /// Renders `self` as a literal pattern, e.g. `"abc"`.
    fn fmt_literal(&self) -> String;

    /// Renders `self` as a set of acceptable items, e.g. `[abc]`.
    fn fmt_set(&self) -> String;

    /// Describes what sits at `offset` for "but found ..." messages.
    fn describe_at(&self, offset: usize) -> String {
        match self.item_at(offset) {
            Some((item, _)) => format!("{:?}", item),
            None => "end of input".to_owned(),
        }
    }
}

impl Input for str {
    type Item = char;

    #[inline]
    fn len(&self) -> usize {
        str::len(self)
    }

    #[inline]
    fn item_at(&self, offset: usize) -> Option<(char, usize)> {
        let c = self.get(offset..)?.chars().next()?;
        Some((c, offset + c.len_utf8()))
    }

    #[inline]
    fn slice(&self, range: Range<usize>) -> Option<&str> {
        self.get(range)
    }

    #[inline]
    fn starts_with_at(&self, offset: usize, pattern: &str) -> bool {
        self.as_bytes()
            .get(offset..)
            .map_or(false, |rest| rest.starts_with(pattern.as_bytes()))
    }

    #[inline]
    fn contains_item(&self, item: &char) -> bool {
        self.contains(*item)
    }

    fn to_shared(&self) -> Arc<str> {
        Arc::from(self)
    }

    fn line_starts(&self) -> Vec<usize> {
        let mut line_starts = vec![0];
        let bytes = self.as_bytes();

        for (i, &b) in bytes.iter().enumerate() {
            match b {
                b'\n' => line_starts.push(i + 1),
                b'\r' if bytes.get(i + 1) != Some(&b'\n') => line_starts.push(i + 1),
                _ => {}
            }
        }

        line_starts
    }

    fn column(&self, line_start: usize, offset: usize) -> usize {
        self.get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count())
            + 1
    }

    fn line_text(&self, line_start: usize) -> Option<String> {
        let rest = self.get(line_start..)?;
        let end = rest.find(&['\n', '\r'][..]).unwrap_or(rest.len());
        Some(rest[..end].to_owned())
    }

    fn fmt_literal(&self) -> String {
        format!("{:?}", self)
    }

    fn fmt_set(&self) -> String {
        format!("[{}]", self.escape_debug())
    }

    fn describe_at(&self, offset: usize) -> String {
        match self.item_at(offset) {
            Some((c, _)) => format!("{:?}", c.to_string()),
            None => "end of input".to_owned(),
        }
    }
}

impl<T> Input for [T]
where
    T: Clone + PartialEq + fmt::Debug + Send + Sync + 'static,
{
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn item_at(&self, offset: usize) -> Option<(T, usize)> {
        self.get(offset).map(|item| (item.clone(), offset + 1))
    }

    #[inline]
    fn slice(&self, range: Range<usize>) -> Option<&[T]> {
        self.get(range)
    }

    #[inline]
    fn starts_with_at(&self, offset: usize, pattern: &[T]) -> bool {
        self.get(offset..)
            .map_or(false, |rest| rest.starts_with(pattern))
    }

    #[inline]
    fn contains_item(&self, item: &T) -> bool {
        self.contains(item)
    }

    fn to_shared(&self) -> Arc<[T]> {
        Arc::from(self)
    }

    fn fmt_literal(&self) -> String {
        format!("{:?}", self)
    }

    fn fmt_set(&self) -> String {
        let items: Vec<String> = self.iter().map(|item| format!("{:?}", item)).collect();
        format!("[{}]", items.join(" | "))
    }
}
