// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

mod parser {
    use pegloom::Value;
    use pegloom_derive::Parser;

    #[derive(Parser)]
    #[grammar = "tests/grammars/calc.peg"]
    pub struct CalcParser;
}

use parser::CalcParser;
use pegloom::{Options, Parser};
use std::io::{stdin, stdout, Write};

fn main() {
    let options = Options::default();

    loop {
        let mut source = String::new();

        print!("> ");
        let _ = stdout().flush();
        match stdin().read_line(&mut source) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let source = source.trim_end_matches(['\r', '\n']);
        if source.is_empty() {
            continue;
        }

        match CalcParser::parse(source, &options) {
            Ok(value) => println!("{:?}", value),
            Err(error) => println!("{}", error),
        }
    }
}
