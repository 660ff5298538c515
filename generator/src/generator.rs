// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

use std::collections::HashSet;
use std::path::PathBuf;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Generics, Ident, Item, Type};
use thiserror::Error;

use pegloom::Location;
use pegloom_meta::ast::{ClassPart, CodeBlock, Expr, ExprKind, Grammar, Rule};

use crate::docs::DocComment;

/// Name of the action parameter in generated code.
const CONTEXT: &str = "ctx";

/// Reasons a valid grammar cannot be turned into Rust.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum GenerateError {
    /// A rule name that is not a Rust identifier, even a raw one.
    #[error("rule {name} cannot be used as a Rust identifier (at {})", location.start)]
    InvalidRuleName { name: String, location: Location },
    /// A label name that is not a Rust identifier, even a raw one.
    #[error("label {name} cannot be used as a Rust identifier (at {})", location.start)]
    InvalidLabel { name: String, location: Location },
    /// A label named like the action parameter.
    #[error("label {name} shadows the action context `ctx` (at {})", location.start)]
    ReservedLabel { name: String, location: Location },
    /// A rule named like an item of the initializer.
    #[error("rule {name} collides with an item of the initializer (at {})", location.start)]
    NameCollision { name: String, location: Location },
    /// Action or predicate code that does not lex as Rust.
    #[error("code block is not valid Rust: {message} (at {})", location.start)]
    InvalidCode { message: String, location: Location },
    /// An initializer that does not parse as a Rust file.
    #[error("initializer is not a list of Rust items: {message} (at {})", location.start)]
    InvalidInitializer { message: String, location: Location },
}

pub(crate) fn generate(
    name: Ident,
    generics: &Generics,
    paths: Vec<PathBuf>,
    grammar: &Grammar,
    value: Option<Type>,
    doc_comment: &DocComment,
    include_grammar: bool,
) -> Result<TokenStream, Vec<GenerateError>> {
    let mut errors = vec![];

    let items = match &grammar.initializer {
        Some(initializer) => generate_initializer(initializer).map_err(|error| vec![error])?,
        None => vec![],
    };
    let item_names: HashSet<String> = items.iter().filter_map(item_name).collect();

    let mut idents = Vec::with_capacity(grammar.rules.len());
    let mut rules = Vec::with_capacity(grammar.rules.len());
    for rule in &grammar.rules {
        if item_names.contains(&rule.name) {
            errors.push(GenerateError::NameCollision {
                name: rule.name.clone(),
                location: rule.name_location,
            });
        }

        let generated = rule_ident(&rule.name, rule.name_location)
            .and_then(|ident| Ok((generate_rule(rule, &ident)?, ident)));

        match generated {
            Ok((tokens, ident)) => {
                rules.push(tokens);
                idents.push(ident);
            }
            Err(error) => errors.push(error),
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let value = match value {
        Some(ty) => quote! { #ty },
        None => quote! { ::pegloom::Value },
    };
    let module = format_ident!("__pegloom_{}", name);

    let include_fix = if include_grammar {
        generate_include(&name, paths)
    } else {
        quote!()
    };
    let rule_enum = generate_enum(&grammar.rules, &idents, doc_comment);
    let rule_type = generate_rule_type(&grammar.rules, &idents);

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let parser_impl = quote! {
        #[allow(clippy::all)]
        impl #impl_generics ::pegloom::Parser<Rule> for #name #ty_generics #where_clause {
            type Value = #value;

            fn parse_rule(
                rule: Rule,
                input: &str,
                options: &::pegloom::Options
            ) -> ::std::result::Result<#value, ::pegloom::ParseError> {
                let start = match rule {
                    #( Rule::#idents => #module::#idents() ),*
                };

                ::pegloom::parse(start, input, options.clone())
            }
        }
    };

    Ok(quote! {
        #include_fix
        #rule_enum
        #rule_type

        #[doc(hidden)]
        #[allow(dead_code, non_snake_case, unused_braces, unused_imports, unused_variables, clippy::all)]
        mod #module {
            use super::*;

            pub(super) type __Value = #value;

            #( #items )*

            #( #rules )*
        }

        #parser_impl
    })
}

/// Generate Rust `include_str!` for grammar files, then Cargo will watch changes in grammars.
fn generate_include(name: &Ident, paths: Vec<PathBuf>) -> TokenStream {
    let const_name = format_ident!("_PEGLOOM_GRAMMAR_{}", name);
    // Relative to the current directory, since paths are resolved against
    // CARGO_MANIFEST_DIR.
    let current_dir = std::env::current_dir().unwrap_or_default();

    let include_tokens = paths.iter().map(|path| {
        let path = current_dir.join(path).to_string_lossy().into_owned();

        quote! {
            include_str!(#path)
        }
    });

    let len = include_tokens.len();
    quote! {
        #[allow(non_upper_case_globals)]
        const #const_name: [&'static str; #len] = [
            #(#include_tokens),*
        ];
    }
}

fn generate_enum(rules: &[Rule], idents: &[Ident], doc_comment: &DocComment) -> TokenStream {
    let variants = rules.iter().zip(idents).map(|(rule, ident)| {
        match doc_comment.line_docs.get(&rule.name) {
            Some(doc) => quote! {
                #[doc = #doc]
                #ident
            },
            None => quote! {
                #ident
            },
        }
    });

    let grammar_doc = &doc_comment.grammar_doc;
    quote! {
        #[doc = #grammar_doc]
        #[allow(dead_code, non_camel_case_types, clippy::upper_case_acronyms)]
        #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub enum Rule {
            #( #variants ),*
        }
    }
}

fn generate_rule_type(rules: &[Rule], idents: &[Ident]) -> TokenStream {
    let names: Vec<&str> = rules.iter().map(|rule| rule.name.as_str()).collect();
    let first = &idents[0];

    quote! {
        impl ::pegloom::RuleType for Rule {
            fn name(&self) -> &'static str {
                match self {
                    #( Rule::#idents => #names ),*
                }
            }

            fn from_name(name: &str) -> ::std::option::Option<Self> {
                match name {
                    #( #names => ::std::option::Option::Some(Rule::#idents), )*
                    _ => ::std::option::Option::None
                }
            }

            fn default_start() -> Self {
                Rule::#first
            }
        }
    }
}

/// Reads the initializer as the items of a Rust file.
fn generate_initializer(initializer: &CodeBlock) -> Result<Vec<Item>, GenerateError> {
    syn::parse_file(&initializer.code)
        .map(|file| file.items)
        .map_err(|error| GenerateError::InvalidInitializer {
            message: error.to_string(),
            location: initializer.location,
        })
}

fn item_name(item: &Item) -> Option<String> {
    let ident = match item {
        Item::Const(item) => &item.ident,
        Item::Enum(item) => &item.ident,
        Item::Fn(item) => &item.sig.ident,
        Item::Macro(item) => item.ident.as_ref()?,
        Item::Mod(item) => &item.ident,
        Item::Static(item) => &item.ident,
        Item::Struct(item) => &item.ident,
        Item::Trait(item) => &item.ident,
        Item::Type(item) => &item.ident,
        Item::Union(item) => &item.ident,
        _ => return None,
    };

    Some(ident.to_string().trim_start_matches("r#").to_owned())
}

fn raw_ident(name: &str) -> Option<Ident> {
    if matches!(name, "_" | "self" | "Self" | "super" | "crate") {
        return None;
    }

    syn::parse_str(&format!("r#{}", name)).ok()
}

fn rule_ident(name: &str, location: Location) -> Result<Ident, GenerateError> {
    raw_ident(name).ok_or_else(|| GenerateError::InvalidRuleName {
        name: name.to_owned(),
        location,
    })
}

fn generate_rule(rule: &Rule, ident: &Ident) -> Result<TokenStream, GenerateError> {
    let (expr, _) = generate_expr(&rule.expr, &[])?;

    let expr = match &rule.display_name {
        Some(display_name) => quote! {
            ::pegloom::rules::named(#expr, #display_name)
        },
        None => expr,
    };

    Ok(quote! {
        pub(super) fn #ident() -> &'static ::pegloom::Rule<str, __Value> {
            static RULE: ::pegloom::once_cell::sync::OnceCell<::pegloom::Rule<str, __Value>> =
                ::pegloom::once_cell::sync::OnceCell::new();

            RULE.get_or_init(|| #expr)
        }
    })
}

/// Generates `expr`, with `scope` the labels visible to it.
///
/// Also returns the labels `expr` makes visible to what follows it in an
/// enclosing sequence.
fn generate_expr(expr: &Expr, scope: &[String]) -> Result<(TokenStream, Vec<String>), GenerateError> {
    let tokens = match &expr.kind {
        ExprKind::Choice { alternatives } => {
            let alternatives = alternatives
                .iter()
                .map(|alternative| generate_expr(alternative, scope).map(|(tokens, _)| tokens))
                .collect::<Result<Vec<_>, _>>()?;

            quote! {
                ::pegloom::rules::choice([#( #alternatives ),*])
            }
        }
        ExprKind::Action { expr, code } => {
            let (inner, labels) = generate_expr(expr, scope)?;
            let bindings = generate_bindings(scope.iter().chain(&labels), expr.location)?;
            let code = generate_code(code)?;

            quote! {
                ::pegloom::rules::action(
                    #inner,
                    |ctx: &::pegloom::ActionContext<'_, str, __Value>| -> ::std::result::Result<__Value, ::pegloom::Abort> {
                        #bindings
                        ::std::result::Result::Ok({ #code })
                    }
                )
            }
        }
        ExprKind::Sequence { elements } => return generate_sequence(elements, scope),
        ExprKind::Labeled { .. } => return generate_sequence(std::slice::from_ref(expr), scope),
        ExprKind::Text { expr } => {
            let (inner, _) = generate_expr(expr, scope)?;
            quote! { ::pegloom::rules::as_slice(#inner) }
        }
        ExprKind::SimpleAnd { expr } => {
            let (inner, _) = generate_expr(expr, scope)?;
            quote! { ::pegloom::rules::next_is(#inner) }
        }
        ExprKind::SimpleNot { expr } => {
            let (inner, _) = generate_expr(expr, scope)?;
            quote! { ::pegloom::rules::next_is_not(#inner) }
        }
        ExprKind::Optional { expr } => {
            let (inner, _) = generate_expr(expr, scope)?;
            quote! { ::pegloom::rules::zero_or_one(#inner) }
        }
        ExprKind::ZeroOrMore { expr } => {
            let (inner, _) = generate_expr(expr, scope)?;
            quote! { ::pegloom::rules::zero_or_more(#inner) }
        }
        ExprKind::OneOrMore { expr } => {
            let (inner, _) = generate_expr(expr, scope)?;
            quote! { ::pegloom::rules::one_or_more(#inner) }
        }
        ExprKind::Group { expr } => generate_expr(expr, scope)?.0,
        ExprKind::SemanticAnd { code } => {
            let predicate = generate_predicate(code, scope, expr.location)?;
            quote! { ::pegloom::rules::assert(#predicate) }
        }
        ExprKind::SemanticNot { code } => {
            let predicate = generate_predicate(code, scope, expr.location)?;
            quote! { ::pegloom::rules::assert_not(#predicate) }
        }
        ExprKind::RuleRef { name } => {
            let ident = rule_ident(name, expr.location)?;
            quote! { ::pegloom::rules::reference(#name, || #ident().clone()) }
        }
        ExprKind::Literal { value, ignore_case } => {
            if *ignore_case {
                quote! { ::pegloom::rules::literal_ci(#value) }
            } else {
                quote! { ::pegloom::rules::seq_equal(#value) }
            }
        }
        ExprKind::Class {
            parts,
            inverted,
            ignore_case,
        } => {
            let parts = parts.iter().map(|part| match *part {
                ClassPart::Char(c) => quote! { ::pegloom::rules::ClassPart::Char(#c) },
                ClassPart::Range(start, end) => {
                    quote! { ::pegloom::rules::ClassPart::Range(#start, #end) }
                }
            });

            quote! {
                ::pegloom::rules::char_class(::std::vec![#( #parts ),*], #inverted, #ignore_case)
            }
        }
        ExprKind::Any => quote! { ::pegloom::rules::any_one() },
    };

    Ok((tokens, vec![]))
}

/// A sequence binds its labels in order; once any element is picked with
/// `@`, only picked elements make up its value.
fn generate_sequence(
    elements: &[Expr],
    scope: &[String],
) -> Result<(TokenStream, Vec<String>), GenerateError> {
    let picks = elements
        .iter()
        .any(|element| matches!(element.kind, ExprKind::Labeled { pick: true, .. }));

    let mut visible = scope.to_vec();
    let mut labels = vec![];
    let mut tokens = Vec::with_capacity(elements.len());

    for element in elements {
        match &element.kind {
            ExprKind::Labeled { label, pick, expr } => {
                let (inner, _) = generate_expr(expr, &visible)?;

                let mut element = match label {
                    Some(label) => {
                        let name = &label.name;
                        quote! { ::pegloom::rules::label(#name, #inner) }
                    }
                    None => quote! { ::pegloom::rules::elem(#inner) },
                };
                if picks && !pick {
                    element = quote! { #element.omitted() };
                }
                tokens.push(element);

                if let Some(label) = label {
                    visible.push(label.name.clone());
                    labels.push(label.name.clone());
                }
            }
            _ => {
                let (inner, introduced) = generate_expr(element, &visible)?;
                visible.extend(introduced);

                tokens.push(if picks {
                    quote! { ::pegloom::rules::omit(#inner) }
                } else {
                    quote! { ::pegloom::rules::elem(#inner) }
                });
            }
        }
    }

    Ok((
        quote! {
            ::pegloom::rules::seq([#( #tokens ),*])
        },
        labels,
    ))
}

fn generate_predicate(
    code: &CodeBlock,
    scope: &[String],
    location: Location,
) -> Result<TokenStream, GenerateError> {
    let bindings = generate_bindings(scope.iter(), location)?;
    let code = generate_code(code)?;

    Ok(quote! {
        |ctx: &::pegloom::ActionContext<'_, str, __Value>| -> ::std::result::Result<bool, ::pegloom::Abort> {
            #bindings
            ::std::result::Result::Ok({ #code })
        }
    })
}

/// Binds every label in scope to a local of the same name.
fn generate_bindings<'a>(
    labels: impl Iterator<Item = &'a String>,
    location: Location,
) -> Result<TokenStream, GenerateError> {
    let mut seen = HashSet::new();
    let mut bindings = vec![];

    for label in labels {
        if !seen.insert(label) {
            continue;
        }

        if label == CONTEXT {
            return Err(GenerateError::ReservedLabel {
                name: label.clone(),
                location,
            });
        }

        let ident = raw_ident(label).ok_or_else(|| GenerateError::InvalidLabel {
            name: label.clone(),
            location,
        })?;

        bindings.push(quote! {
            let #ident = ctx.capture(#label);
        });
    }

    Ok(quote! { #( #bindings )* })
}

fn generate_code(code: &CodeBlock) -> Result<TokenStream, GenerateError> {
    code.code
        .parse()
        .map_err(|error: proc_macro2::LexError| GenerateError::InvalidCode {
            message: error.to_string(),
            location: code.location,
        })
}

#[cfg(test)]
mod tests {
    use proc_macro2::Span;

    use super::*;
    use pegloom_meta::parse_grammar;
    use pretty_assertions::assert_eq;

    fn expr(source: &str) -> String {
        let grammar = parse_grammar(&format!("a = {}", source)).unwrap();
        generate_expr(&grammar.rules[0].expr, &[]).unwrap().0.to_string()
    }

    fn errors(source: &str) -> Vec<String> {
        let grammar = parse_grammar(source).unwrap();
        let name = Ident::new("MyParser", Span::call_site());

        match generate(name, &Generics::default(), vec![], &grammar, None, &DocComment::default(), false) {
            Ok(_) => vec![],
            Err(errors) => errors.iter().map(|error| error.to_string()).collect(),
        }
    }

    #[test]
    fn literals() {
        assert_eq!(expr("'a'"), quote! { ::pegloom::rules::seq_equal("a") }.to_string());
        assert_eq!(expr("\"a\"i"), quote! { ::pegloom::rules::literal_ci("a") }.to_string());
        assert_eq!(expr("."), quote! { ::pegloom::rules::any_one() }.to_string());
    }

    #[test]
    fn classes() {
        assert_eq!(
            expr("[^a-z_]i"),
            quote! {
                ::pegloom::rules::char_class(
                    ::std::vec![
                        ::pegloom::rules::ClassPart::Range('a', 'z'),
                        ::pegloom::rules::ClassPart::Char('_')
                    ],
                    true,
                    true
                )
            }
            .to_string()
        );
    }

    #[test]
    fn choice_and_suffixes() {
        assert_eq!(
            expr("'a'? / 'b'* / 'c'+"),
            quote! {
                ::pegloom::rules::choice([
                    ::pegloom::rules::zero_or_one(::pegloom::rules::seq_equal("a")),
                    ::pegloom::rules::zero_or_more(::pegloom::rules::seq_equal("b")),
                    ::pegloom::rules::one_or_more(::pegloom::rules::seq_equal("c"))
                ])
            }
            .to_string()
        );
    }

    #[test]
    fn prefixes() {
        assert_eq!(
            expr("$'a' &'b' !'c'"),
            quote! {
                ::pegloom::rules::seq([
                    ::pegloom::rules::elem(::pegloom::rules::as_slice(::pegloom::rules::seq_equal("a"))),
                    ::pegloom::rules::elem(::pegloom::rules::next_is(::pegloom::rules::seq_equal("b"))),
                    ::pegloom::rules::elem(::pegloom::rules::next_is_not(::pegloom::rules::seq_equal("c")))
                ])
            }
            .to_string()
        );
    }

    #[test]
    fn references() {
        assert_eq!(
            expr("b"),
            quote! { ::pegloom::rules::reference("b", || r#b().clone()) }.to_string()
        );
    }

    #[test]
    fn picks_omit_the_rest() {
        assert_eq!(
            expr("x:'a' @'b' 'c'"),
            quote! {
                ::pegloom::rules::seq([
                    ::pegloom::rules::label("x", ::pegloom::rules::seq_equal("a")).omitted(),
                    ::pegloom::rules::elem(::pegloom::rules::seq_equal("b")),
                    ::pegloom::rules::omit(::pegloom::rules::seq_equal("c"))
                ])
            }
            .to_string()
        );
    }

    #[test]
    fn actions_bind_labels_in_scope() {
        assert_eq!(
            expr("x:'a' (y:'b' { y }) { x }"),
            quote! {
                ::pegloom::rules::action(
                    ::pegloom::rules::seq([
                        ::pegloom::rules::label("x", ::pegloom::rules::seq_equal("a")),
                        ::pegloom::rules::elem(::pegloom::rules::action(
                            ::pegloom::rules::seq([
                                ::pegloom::rules::label("y", ::pegloom::rules::seq_equal("b"))
                            ]),
                            |ctx: &::pegloom::ActionContext<'_, str, __Value>| -> ::std::result::Result<__Value, ::pegloom::Abort> {
                                let r#x = ctx.capture("x");
                                let r#y = ctx.capture("y");
                                ::std::result::Result::Ok({ y })
                            }
                        ))
                    ]),
                    |ctx: &::pegloom::ActionContext<'_, str, __Value>| -> ::std::result::Result<__Value, ::pegloom::Abort> {
                        let r#x = ctx.capture("x");
                        ::std::result::Result::Ok({ x })
                    }
                )
            }
            .to_string()
        );
    }

    #[test]
    fn predicates_see_earlier_labels() {
        assert_eq!(
            expr("x:'a' &{ x.is_absent() }"),
            quote! {
                ::pegloom::rules::seq([
                    ::pegloom::rules::label("x", ::pegloom::rules::seq_equal("a")),
                    ::pegloom::rules::elem(::pegloom::rules::assert(
                        |ctx: &::pegloom::ActionContext<'_, str, __Value>| -> ::std::result::Result<bool, ::pegloom::Abort> {
                            let r#x = ctx.capture("x");
                            ::std::result::Result::Ok({ x.is_absent() })
                        }
                    ))
                ])
            }
            .to_string()
        );
    }

    #[test]
    fn complete() {
        let grammar = parse_grammar("{ fn two() -> i64 { 2 } }\na \"letter a\" = if\nif = 'b'").unwrap();
        let name = Ident::new("MyParser", Span::call_site());

        let mut line_docs = std::collections::HashMap::new();
        line_docs.insert("if".to_owned(), "If statement".to_owned());
        let doc_comment = DocComment {
            grammar_doc: "Letters".to_owned(),
            line_docs,
        };

        assert_eq!(
            generate(name, &Generics::default(), vec![], &grammar, None, &doc_comment, false)
                .unwrap()
                .to_string(),
            quote! {
                #[doc = "Letters"]
                #[allow(dead_code, non_camel_case_types, clippy::upper_case_acronyms)]
                #[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
                pub enum Rule {
                    r#a,
                    #[doc = "If statement"]
                    r#if
                }

                impl ::pegloom::RuleType for Rule {
                    fn name(&self) -> &'static str {
                        match self {
                            Rule::r#a => "a",
                            Rule::r#if => "if"
                        }
                    }

                    fn from_name(name: &str) -> ::std::option::Option<Self> {
                        match name {
                            "a" => ::std::option::Option::Some(Rule::r#a),
                            "if" => ::std::option::Option::Some(Rule::r#if),
                            _ => ::std::option::Option::None
                        }
                    }

                    fn default_start() -> Self {
                        Rule::r#a
                    }
                }

                #[doc(hidden)]
                #[allow(dead_code, non_snake_case, unused_braces, unused_imports, unused_variables, clippy::all)]
                mod __pegloom_MyParser {
                    use super::*;

                    pub(super) type __Value = ::pegloom::Value;

                    fn two() -> i64 { 2 }

                    pub(super) fn r#a() -> &'static ::pegloom::Rule<str, __Value> {
                        static RULE: ::pegloom::once_cell::sync::OnceCell<::pegloom::Rule<str, __Value>> =
                            ::pegloom::once_cell::sync::OnceCell::new();

                        RULE.get_or_init(|| ::pegloom::rules::named(
                            ::pegloom::rules::reference("if", || r#if().clone()),
                            "letter a"
                        ))
                    }

                    pub(super) fn r#if() -> &'static ::pegloom::Rule<str, __Value> {
                        static RULE: ::pegloom::once_cell::sync::OnceCell<::pegloom::Rule<str, __Value>> =
                            ::pegloom::once_cell::sync::OnceCell::new();

                        RULE.get_or_init(|| ::pegloom::rules::seq_equal("b"))
                    }
                }

                #[allow(clippy::all)]
                impl ::pegloom::Parser<Rule> for MyParser {
                    type Value = ::pegloom::Value;

                    fn parse_rule(
                        rule: Rule,
                        input: &str,
                        options: &::pegloom::Options
                    ) -> ::std::result::Result<::pegloom::Value, ::pegloom::ParseError> {
                        let start = match rule {
                            Rule::r#a => __pegloom_MyParser::r#a(),
                            Rule::r#if => __pegloom_MyParser::r#if()
                        };

                        ::pegloom::parse(start, input, options.clone())
                    }
                }
            }
            .to_string()
        );
    }

    #[test]
    fn invalid_names() {
        insta::assert_snapshot!(
            errors("self = 'a'\nb = x:'b' { ctx }\nc = '(' { ( }").join("\n"),
            @r###"
        rule self cannot be used as a Rust identifier (at 1:1)
        label ctx shadows the action context `ctx` (at 2:5)
        code block is not valid Rust: cannot parse string into token stream (at 3:10)
        "###
        );
    }

    #[test]
    fn rules_collide_with_initializer_items() {
        assert_eq!(
            errors("{ const a: i64 = 1; }\na = 'a'"),
            vec!["rule a collides with an item of the initializer (at 2:1)"]
        );
    }

    #[test]
    fn invalid_initializer() {
        let errors = errors("{ let x = 1; }\na = 'a'");

        assert_eq!(errors.len(), 1);
        assert!(errors[0].starts_with("initializer is not a list of Rust items: "));
        assert!(errors[0].ends_with("(at 1:2)"));
    }
}
