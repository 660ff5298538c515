// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

/// Asserts that a rule matches an input, optionally checking where the match
/// ends and what it produces.
///
/// ```
/// # #[macro_use] extern crate pegloom;
/// # use pegloom::{rules, Rule, Value};
/// # fn main() {
/// let rule: Rule<str, Value> = rules::seq_equal("ab");
///
/// matches_to! {
///     rule: rule,
///     input: "abc",
///     next: 2,
///     value: Value::Str("ab".to_owned())
/// };
/// # }
/// ```
#[macro_export]
macro_rules! matches_to {
    ( rule: $rule:expr, input: $input:expr, offset: $offset:expr, next: $next:expr,
      value: $value:expr ) => {
        match $rule.matches($offset, $input, &$crate::Env::default()) {
            Ok($crate::MatchResult::Success(success)) => {
                assert_eq!(success.next, $next, "match ended at the wrong offset");
                assert_eq!(success.value, $value);
            }
            Ok($crate::MatchResult::Failure(failure)) => {
                panic!("expected a match but got {:?}", failure)
            }
            Err(abort) => panic!("expected a match but got aborted: {}", abort),
        }
    };
    ( rule: $rule:expr, input: $input:expr, next: $next:expr, value: $value:expr ) => {
        $crate::matches_to!(rule: $rule, input: $input, offset: 0, next: $next, value: $value)
    };
    ( rule: $rule:expr, input: $input:expr, value: $value:expr ) => {
        let input = $input;
        $crate::matches_to!(rule: $rule, input: input, offset: 0, next: input.len(), value: $value)
    };
}

/// Asserts that a rule fails on an input and that its failure expectations
/// sit at the given offset.
///
/// ```
/// # #[macro_use] extern crate pegloom;
/// # use pegloom::{rules, Rule, Value};
/// # fn main() {
/// let rule: Rule<str, Value> = rules::seq([
///     rules::elem(rules::seq_equal("a")),
///     rules::elem(rules::seq_equal("b")),
/// ]);
///
/// fails_at! {
///     rule: rule,
///     input: "ac",
///     offset: 1,
///     expected: [r#""b""#]
/// };
/// # }
/// ```
#[macro_export]
macro_rules! fails_at {
    ( rule: $rule:expr, input: $input:expr, offset: $offset:expr,
      expected: [ $( $expected:expr ),* ] ) => {
        match $rule.matches(0, $input, &$crate::Env::default()) {
            Ok($crate::MatchResult::Failure(failure)) => {
                let (offset, expected) = failure.expectations();
                assert_eq!(offset, $offset, "failure reported at the wrong offset");
                let wanted: Vec<String> = vec![ $( String::from($expected) ),* ];
                assert_eq!(expected, wanted);
            }
            Ok($crate::MatchResult::Success(success)) => {
                panic!("expected a failure but matched up to {}", success.next)
            }
            Err(abort) => panic!("expected a failure but got aborted: {}", abort),
        }
    };
}
