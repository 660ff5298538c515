// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

#![doc(html_root_url = "https://docs.rs/pegloom_generator")]
#![warn(missing_docs, rust_2018_idioms, unused_qualifications)]
#![recursion_limit = "256"]
//! # pegloom generator
//!
//! This crate turns grammar ASTs into Rust rule graphs (which is used in the
//! `pegloom_derive` crate).

use std::env;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use log::debug;
use proc_macro2::TokenStream;
use syn::DeriveInput;

use pegloom_meta::{compile_with, unwrap_or_report, MetaOptions};

mod docs;
mod generator;
mod parse_derive;

pub use crate::generator::GenerateError;
use crate::parse_derive::{parse_derive, GrammarSource};

/// Processes the derive/proc macro input and generates the corresponding parser based
/// on the parsed grammar. If `include_grammar` is set to true, it'll generate an explicit
/// "include_str" statement so Cargo rebuilds when a grammar file changes.
pub fn derive_parser(input: TokenStream, include_grammar: bool) -> TokenStream {
    let ast: DeriveInput = match syn::parse2(input) {
        Ok(ast) => ast,
        Err(error) => return error.to_compile_error(),
    };
    let (parsed_derive, contents) = parse_derive(ast);

    let mut data = String::new();
    let mut paths = vec![];

    for content in contents {
        let (_data, _path) = match content {
            GrammarSource::File(ref path) => {
                let root = env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".into());

                // Relative to CARGO_MANIFEST_DIR first, then to its `src/`.
                let path = if Path::new(&root).join(path).exists() {
                    Path::new(&root).join(path)
                } else {
                    Path::new(&root).join("src/").join(path)
                };

                let file_name = match path.file_name() {
                    Some(file_name) => file_name,
                    None => panic!("grammar attribute should point to a file"),
                };

                let data = match read_file(&path) {
                    Ok(data) => data,
                    Err(error) => panic!("error opening {:?}: {}", file_name, error),
                };
                (data, Some(path.clone()))
            }
            GrammarSource::Inline(content) => (content, None),
        };

        data.push_str(&_data);
        if !data.ends_with('\n') {
            data.push('\n');
        }
        if let Some(path) = _path {
            paths.push(path);
        }
    }

    let options = MetaOptions {
        collect_comments: true,
        ..MetaOptions::default()
    };
    let grammar = unwrap_or_report(compile_with(&data, &options));
    let doc_comment = docs::consume(&grammar);

    debug!(
        "generating {} with {} rules",
        parsed_derive.name,
        grammar.rules.len()
    );

    unwrap_or_report(generator::generate(
        parsed_derive.name,
        &parsed_derive.generics,
        paths,
        &grammar,
        parsed_derive.value,
        &doc_comment,
        include_grammar,
    ))
}

fn read_file<P: AsRef<Path>>(path: P) -> io::Result<String> {
    let mut file = File::open(path.as_ref())?;
    let mut string = String::new();
    file.read_to_string(&mut string)?;
    Ok(string)
}

#[cfg(test)]
mod tests {
    use quote::quote;

    #[test]
    fn generate_doc() {
        let input = quote! {
            #[derive(Parser)]
            #[grammar_inline = "//! Sums.\n\n/// A sum.\nsum = n \"+\" n\n/// A digit.\nn = [0-9]"]
            pub struct SumParser;
        };

        let token = super::derive_parser(input, true);

        let expected = quote! {
            #[doc = "Sums."]
            #[allow(dead_code, non_camel_case_types, clippy::upper_case_acronyms)]
            #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
            pub enum Rule {
                #[doc = "A sum."]
                r#sum,
                #[doc = "A digit."]
                r#n
            }
        };

        assert!(
            token.to_string().contains(expected.to_string().as_str()),
            "{}\n\nExpected to contains:\n{}",
            token,
            expected
        );
    }

    #[test]
    fn grammars_are_concatenated() {
        let input = quote! {
            #[grammar_inline = "a = b"]
            #[grammar_inline = "b = 'b'"]
            struct Parser;
        };

        let token = super::derive_parser(input, false).to_string();

        assert!(token.contains(&quote! { Rule::r#b => "b" }.to_string()));
    }

    #[test]
    #[should_panic(expected = "grammar error\n\nrule c is undefined (at 1:5)")]
    fn grammar_errors_are_reported() {
        let input = quote! {
            #[grammar_inline = "a = c"]
            struct Parser;
        };

        super::derive_parser(input, false);
    }

    #[test]
    #[should_panic(expected = "grammar error\n\nrule crate cannot be used as a Rust identifier (at 1:1)")]
    fn generate_errors_are_reported() {
        let input = quote! {
            #[grammar_inline = "crate = 'a'"]
            struct Parser;
        };

        super::derive_parser(input, false);
    }
}
