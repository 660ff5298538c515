// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use pegloom::{Options, ParseError, Parser, Value};
use pegloom_derive::Parser;
use pretty_assertions::assert_eq;

#[derive(Parser)]
#[grammar_inline = r#"sum = left:$[0-9]+ "+" right:$[0-9]+ { Value::Int(left.as_int().unwrap_or_default() + right.as_int().unwrap_or_default()) }"#]
struct SumParser;

#[test]
fn sum() {
    assert_eq!(SumParser::parse("1+1", &Options::default()), Ok(Value::Int(2)));
    assert_eq!(SumParser::parse("20+22", &Options::default()), Ok(Value::Int(42)));
    assert!(SumParser::parse("1+", &Options::default()).is_err());
}

mod recursion {
    use super::*;
    use pretty_assertions::assert_eq;

    // `a` refers to `b` before `b` exists.
    #[derive(Parser)]
    #[grammar_inline = r#"
        a = "a" @b / "."
        b = "b" @a
    "#]
    pub struct PingPong;

    #[test]
    fn mutual_recursion() {
        assert_eq!(
            PingPong::parse("abab.", &Options::default()),
            Ok(Value::Str(".".to_owned()))
        );
        assert!(PingPong::parse("aba.", &Options::default()).is_err());
        assert_eq!(
            PingPong::parse_rule(Rule::b, "ba.", &Options::default()),
            Ok(Value::Str(".".to_owned()))
        );
    }
}

mod values {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    #[grammar_inline = r#"
        list = "[" @items:(head:item tail:("," @item)* { let mut all = vec![head]; all.extend(tail.into_list()); Value::List(all) })? "]"
        item = $[a-z]+ / "null" { Value::Null }
        keyword = "select"i
    "#]
    struct ListParser;

    #[test]
    fn picks_and_lists() {
        assert_eq!(
            ListParser::parse("[a,bc,d]", &Options::default()),
            Ok(Value::List(vec![
                Value::Str("a".to_owned()),
                Value::Str("bc".to_owned()),
                Value::Str("d".to_owned()),
            ]))
        );
        assert_eq!(ListParser::parse("[]", &Options::default()), Ok(Value::Absent));
    }

    #[test]
    fn case_insensitive_literals() {
        let options = Options::new().with_start_rule("keyword");

        assert!(ListParser::parse("SeLeCt", &options).is_ok());
        assert!(ListParser::parse("selekt", &options).is_err());
    }
}

mod predicates {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    #[grammar_inline = r#"
        even = @n:$[0-9]+ &{ n.as_int().map_or(false, |n| n % 2 == 0) }
        odd = @n:$[0-9]+ !{ n.as_int().map_or(false, |n| n % 2 == 0) }
        first = &{ ctx.offset() == 0 } "x"
    "#]
    struct NumberParser;

    #[test]
    fn semantic_predicates() {
        assert_eq!(
            NumberParser::parse("12", &Options::default()),
            Ok(Value::Str("12".to_owned()))
        );
        assert!(NumberParser::parse("13", &Options::default()).is_err());
        assert!(NumberParser::parse("13", &Options::new().with_start_rule("odd")).is_ok());
        assert!(NumberParser::parse("x", &Options::new().with_start_rule("first")).is_ok());
    }
}

mod aborts {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    #[grammar_inline = r#"
        bytes = @byte ("." @byte)*
        byte = digits:$[0-9]+ {
            match digits.as_int() {
                Some(n) if n < 256 => Value::Int(n),
                _ => return Err(ctx.error("byte out of range")),
            }
        }
    "#]
    struct BytesParser;

    #[test]
    fn actions_abort() {
        assert!(BytesParser::parse("1.2.255", &Options::default()).is_ok());

        match BytesParser::parse("1.300", &Options::default()) {
            Err(ParseError::Aborted(abort)) => {
                assert_eq!(abort.message, "byte out of range");
                assert_eq!(abort.location.start.column, 3);
                assert_eq!(abort.location.end.column, 6);
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

mod initializer {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Parser)]
    #[grammar_inline = r#"
        {
            const LIMIT: usize = 3;

            fn shout(text: &str) -> Value {
                Value::Str(text.to_uppercase())
            }
        }

        word = [a-z]+ &{ ctx.offset() == 0 } {
            if ctx.text().len() > LIMIT {
                return Err(ctx.error("too long"));
            }
            shout(ctx.text())
        }
    "#]
    struct ShoutParser;

    #[test]
    fn initializer_items_are_in_scope() {
        assert_eq!(
            ShoutParser::parse("hey", &Options::default()),
            Ok(Value::Str("HEY".to_owned()))
        );
        assert!(matches!(
            ShoutParser::parse("hello", &Options::default()),
            Err(ParseError::Aborted(_))
        ));
    }
}
