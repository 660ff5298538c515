// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! Types and helpers to parse the input of the derive macro.

use syn::{Attribute, DeriveInput, Expr, ExprLit, Generics, Ident, Lit, Meta, Type};

#[derive(Debug, PartialEq)]
pub(crate) enum GrammarSource {
    File(String),
    Inline(String),
}

/// Parsed information of the derive and the attributes.
pub struct ParsedDerive {
    /// The identifier of the deriving struct, union, or enum.
    pub name: Ident,
    /// The generics of the deriving struct, union, or enum.
    pub generics: Generics,
    /// The value type given with `#[value = "..."]`.
    pub value: Option<Type>,
}

pub(crate) fn parse_derive(ast: DeriveInput) -> (ParsedDerive, Vec<GrammarSource>) {
    let name = ast.ident;
    let generics = ast.generics;

    let grammar: Vec<&Attribute> = ast
        .attrs
        .iter()
        .filter(|attr| {
            let path = attr.meta.path();
            path.is_ident("grammar") || path.is_ident("grammar_inline")
        })
        .collect();

    if grammar.is_empty() {
        panic!("a grammar file needs to be provided with the #[grammar = \"PATH\"] or #[grammar_inline = \"GRAMMAR CONTENTS\"] attribute");
    }

    let mut grammar_sources = Vec::with_capacity(grammar.len());
    for attr in grammar {
        grammar_sources.push(attr_to_grammar_source(attr))
    }

    let value = ast
        .attrs
        .iter()
        .filter(|attr| attr.meta.path().is_ident("value"))
        .last()
        .map(attr_to_value_type);

    (
        ParsedDerive {
            name,
            generics,
            value,
        },
        grammar_sources,
    )
}

fn string_value(attr: &Attribute, what: &str) -> String {
    match &attr.meta {
        Meta::NameValue(name_value) => match &name_value.value {
            Expr::Lit(ExprLit {
                lit: Lit::Str(string),
                ..
            }) => string.value(),
            _ => panic!("{} attribute must be a string", what),
        },
        _ => panic!("{} attribute must be of the form `{} = \"...\"`", what, what),
    }
}

fn attr_to_grammar_source(attr: &Attribute) -> GrammarSource {
    let value = string_value(attr, "grammar");

    if attr.meta.path().is_ident("grammar") {
        GrammarSource::File(value)
    } else {
        GrammarSource::Inline(value)
    }
}

fn attr_to_value_type(attr: &Attribute) -> Type {
    let value = string_value(attr, "value");

    match syn::parse_str(&value) {
        Ok(ty) => ty,
        Err(error) => panic!("value attribute must name a type: {}", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::ToTokens;

    #[test]
    fn derive_inline_file() {
        let definition = "
            #[other_attr]
            #[grammar_inline = \"GRAMMAR\"]
            pub struct MyParser<'a, T>;
        ";
        let ast = syn::parse_str(definition).unwrap();
        let (_, filenames) = parse_derive(ast);
        assert_eq!(filenames, [GrammarSource::Inline("GRAMMAR".to_string())]);
    }

    #[test]
    fn derive_ok() {
        let definition = "
            #[other_attr]
            #[grammar = \"myfile.peg\"]
            pub struct MyParser<'a, T>;
        ";
        let ast = syn::parse_str(definition).unwrap();
        let (parsed, filenames) = parse_derive(ast);
        assert_eq!(filenames, [GrammarSource::File("myfile.peg".to_string())]);
        assert_eq!(parsed.name, "MyParser");
        assert!(parsed.value.is_none());
    }

    #[test]
    fn derive_multiple_grammars() {
        let definition = "
            #[other_attr]
            #[grammar = \"myfile1.peg\"]
            #[grammar = \"myfile2.peg\"]
            pub struct MyParser<'a, T>;
        ";
        let ast = syn::parse_str(definition).unwrap();
        let (_, filenames) = parse_derive(ast);
        assert_eq!(
            filenames,
            [
                GrammarSource::File("myfile1.peg".to_string()),
                GrammarSource::File("myfile2.peg".to_string())
            ]
        );
    }

    #[test]
    fn derive_value_type() {
        let definition = "
            #[grammar_inline = \"a = 'a'\"]
            #[value = \"crate::ast::Node\"]
            pub struct MyParser;
        ";
        let ast = syn::parse_str(definition).unwrap();
        let (parsed, _) = parse_derive(ast);
        assert_eq!(
            parsed.value.unwrap().to_token_stream().to_string(),
            "crate :: ast :: Node"
        );
    }

    #[test]
    #[should_panic(expected = "grammar attribute must be a string")]
    fn derive_wrong_arg() {
        let definition = "
            #[other_attr]
            #[grammar = 1]
            pub struct MyParser<'a, T>;
        ";
        let ast = syn::parse_str(definition).unwrap();
        parse_derive(ast);
    }

    #[test]
    #[should_panic(expected = "value attribute must name a type")]
    fn derive_wrong_value() {
        let definition = "
            #[grammar_inline = \"a = 'a'\"]
            #[value = \"not a type\"]
            pub struct MyParser;
        ";
        let ast = syn::parse_str(definition).unwrap();
        parse_derive(ast);
    }

    #[test]
    #[should_panic(
        expected = "a grammar file needs to be provided with the #[grammar = \"PATH\"] or #[grammar_inline = \"GRAMMAR CONTENTS\"] attribute"
    )]
    fn derive_no_grammar() {
        let definition = "
            #[other_attr]
            pub struct MyParser<'a, T>;
        ";
        let ast = syn::parse_str(definition).unwrap();
        parse_derive(ast);
    }
}
