// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use criterion::{criterion_group, criterion_main, Criterion};
use pegloom_meta::{parse_grammar, validator};

const JSON: &str = r#"
// JSON, after RFC 8259.
json = ws @value ws

value
  = object
  / array
  / string
  / number
  / "true" { Value::Bool(true) }
  / "false" { Value::Bool(false) }
  / "null" { Value::Null }

object = "{" ws members:(member (ws "," ws @member)*)? ws "}"
member = key:string ws ":" ws value:value
array = "[" ws items:(value (ws "," ws @value)*)? ws "]"

string "string" = '"' chars:$char* '"' { Value::Str(chars.as_str().unwrap_or_default().to_owned()) }
char
  = [^"\\\u0000-\u001F]
  / "\\" ["\\/bfnrt]
  / "\\u" [0-9a-f]i [0-9a-f]i [0-9a-f]i [0-9a-f]i

number "number" = $("-"? int frac? exp?)
int = "0" / [1-9] [0-9]*
frac = "." [0-9]+
exp = "e"i [+-]? [0-9]+

ws "whitespace" = [ \t\n\r]*
"#;

fn parse(c: &mut Criterion) {
    c.bench_function("parse json grammar", |b| {
        b.iter(|| parse_grammar(JSON).unwrap())
    });
}

fn validate(c: &mut Criterion) {
    let grammar = parse_grammar(JSON).unwrap();

    c.bench_function("validate json grammar", |b| {
        b.iter(|| validator::validate(&grammar).unwrap())
    });
}

criterion_group!(benches, parse, validate);
criterion_main!(benches);
