// pegloom. PEG rule combinators
// Copyright (c) 2018 Dragoș Tiselice
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! The grammar language parser.
//!
//! Each production is a `pegloom` rule built once into a static. Productions
//! call each other through named references, so the grammar can be as
//! recursive as it needs and labels stay local to the production that binds
//! them.

use std::any::Any;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::rc::Rc;

use log::debug;
use once_cell::sync::OnceCell;
use pegloom::rules::*;
use pegloom::{Abort, ActionContext, Location, MatchValue, Options, ParseError, Rule};
use serde::Deserialize;

use crate::ast::{self, ClassPart, CodeBlock, Comment, Expr, ExprKind, Grammar, Label};
use crate::validator::RUST_KEYWORDS;

/// Options of the grammar parser.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetaOptions {
    /// Words that cannot be used as labels. Labels become Rust bindings in
    /// generated parsers, so this defaults to Rust's keywords.
    pub reserved_words: HashSet<String>,
    /// Whether to fill [`Grammar::comments`].
    pub collect_comments: bool,
}

impl Default for MetaOptions {
    fn default() -> MetaOptions {
        MetaOptions {
            reserved_words: RUST_KEYWORDS.iter().map(|word| word.to_string()).collect(),
            collect_comments: false,
        }
    }
}

/// Parses grammar source into its AST.
///
/// ```
/// use pegloom_meta::ast::ExprKind;
///
/// let grammar = pegloom_meta::parse_grammar(r#"start = "a"i"#).unwrap();
///
/// assert_eq!(grammar.rules[0].name, "start");
/// assert_eq!(
///     grammar.rules[0].expr.kind,
///     ExprKind::Literal { value: "a".to_owned(), ignore_case: true }
/// );
/// ```
pub fn parse_grammar(source: &str) -> Result<Grammar, ParseError> {
    parse_grammar_with(source, &MetaOptions::default())
}

/// Parses grammar source with explicit options.
pub fn parse_grammar_with(source: &str, options: &MetaOptions) -> Result<Grammar, ParseError> {
    let state = Rc::new(MetaState {
        reserved: options.reserved_words.clone(),
        comments: options
            .collect_comments
            .then(|| RefCell::new(BTreeMap::new())),
    });
    let shared: Rc<dyn Any> = state.clone();

    let mut grammar =
        pegloom::parse_with_state(grammar(), source, Options::default(), Some(shared))?
            .into_grammar();
    grammar.comments = state.comments.as_ref().map(RefCell::take);

    debug!(
        "parsed grammar with {} rules{}",
        grammar.rules.len(),
        if grammar.initializer.is_some() {
            " and an initializer"
        } else {
            ""
        }
    );

    Ok(grammar)
}

/// Shared by every action of one parse.
struct MetaState {
    reserved: HashSet<String>,
    comments: Option<RefCell<BTreeMap<usize, Comment>>>,
}

/// Values flowing through the grammar parser.
#[derive(Clone, Debug)]
enum Node {
    Absent,
    Text(String),
    List(Vec<Node>),
    Ident(String, Location),
    Label(Label),
    Part(ClassPart),
    Code(CodeBlock),
    Expr(Box<Expr>),
    Rule(Box<ast::Rule>),
    Grammar(Box<Grammar>),
}

impl MatchValue<str> for Node {
    fn absent() -> Node {
        Node::Absent
    }

    fn list(values: Vec<Node>) -> Node {
        Node::List(values)
    }

    fn item(item: char) -> Node {
        Node::Text(item.to_string())
    }

    fn slice(slice: &str) -> Node {
        Node::Text(slice.to_owned())
    }
}

impl Node {
    fn is_absent(&self) -> bool {
        matches!(self, Node::Absent)
    }

    /// Concatenated text; lists of text pieces are joined.
    fn into_text(self) -> String {
        match self {
            Node::Absent => String::new(),
            Node::Text(text) => text,
            Node::List(nodes) => nodes.into_iter().map(Node::into_text).collect(),
            node => unreachable!("expected text, found {:?}", node),
        }
    }

    fn into_char(self) -> char {
        self.into_text().chars().next().unwrap_or('\0')
    }

    fn into_list(self) -> Vec<Node> {
        match self {
            Node::Absent => Vec::new(),
            Node::List(nodes) => nodes,
            node => vec![node],
        }
    }

    fn into_ident(self) -> (String, Location) {
        match self {
            Node::Ident(name, location) => (name, location),
            node => unreachable!("expected an identifier, found {:?}", node),
        }
    }

    fn into_label(self) -> Option<Label> {
        match self {
            Node::Label(label) => Some(label),
            _ => None,
        }
    }

    fn into_part(self) -> Option<ClassPart> {
        match self {
            Node::Part(part) => Some(part),
            _ => None,
        }
    }

    fn into_code(self) -> Option<CodeBlock> {
        match self {
            Node::Code(code) => Some(code),
            _ => None,
        }
    }

    fn into_expr(self) -> Expr {
        match self {
            Node::Expr(expr) => *expr,
            node => unreachable!("expected an expression, found {:?}", node),
        }
    }

    fn into_rule(self) -> ast::Rule {
        match self {
            Node::Rule(rule) => *rule,
            node => unreachable!("expected a rule, found {:?}", node),
        }
    }

    fn into_grammar(self) -> Grammar {
        match self {
            Node::Grammar(grammar) => *grammar,
            node => unreachable!("expected a grammar, found {:?}", node),
        }
    }
}

type R = Rule<str, Node>;
type Ctx<'a> = ActionContext<'a, str, Node>;

macro_rules! production {
    ($name:ident, $body:expr) => {
        fn $name() -> &'static R {
            static RULE: OnceCell<R> = OnceCell::new();
            RULE.get_or_init(|| $body)
        }
    };
}

/// A reference to another production, rendered as `name`.
fn call(name: &'static str, production: fn() -> &'static R) -> R {
    reference(name, move || production().clone())
}

fn lit(literal: &str) -> R {
    seq_equal(literal)
}

/// `from`, producing `to` as its value.
fn escape(from: &str, to: char) -> R {
    action(lit(from), move |_| Ok(Node::Text(to.to_string())))
}

fn node(kind: ExprKind, ctx: &Ctx<'_>) -> Node {
    Node::Expr(Box::new(Expr::new(kind, ctx.location())))
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

fn record_comment(ctx: &Ctx<'_>, multiline: bool) -> Result<Node, Abort> {
    let comments = ctx
        .state::<MetaState>()
        .and_then(|state| state.comments.as_ref());

    if let Some(comments) = comments {
        let location = ctx.location();
        comments.borrow_mut().insert(
            location.start.offset,
            Comment {
                text: ctx.value().into_text(),
                multiline,
                location,
            },
        );
    }

    Ok(Node::Absent)
}

fn code_point(ctx: &Ctx<'_>) -> Result<Node, Abort> {
    u32::from_str_radix(&ctx.value().into_text(), 16)
        .ok()
        .and_then(char::from_u32)
        .map(|c| Node::Text(c.to_string()))
        .ok_or_else(|| ctx.error("Invalid escape sequence."))
}

/// `head (separator head)*` folded into `wrap(all)` when the tail is not
/// empty, or `head` alone.
fn fold_list(ctx: &Ctx<'_>, wrap: fn(Vec<Expr>) -> ExprKind) -> Result<Node, Abort> {
    let tail = ctx.capture("tail").into_list();
    let head = ctx.capture("head");

    if tail.is_empty() {
        return Ok(head);
    }

    let exprs = std::iter::once(head)
        .chain(tail)
        .map(Node::into_expr)
        .collect();

    Ok(node(wrap(exprs), ctx))
}

production!(
    grammar,
    action(
        seq([
            omit(ws().clone()),
            label(
                "initializer",
                zero_or_one(seq([
                    elem(call("Initializer", initializer)),
                    omit(ws().clone()),
                ])),
            ),
            label("rules", call("Rules", rule_list)),
        ]),
        |ctx| {
            Ok(Node::Grammar(Box::new(Grammar {
                initializer: ctx.capture("initializer").into_code(),
                rules: ctx
                    .capture("rules")
                    .into_list()
                    .into_iter()
                    .map(Node::into_rule)
                    .collect(),
                comments: None,
                location: ctx.location(),
            })))
        },
    )
);

production!(
    initializer,
    seq([elem(code_block().clone()), omit(eos().clone())])
);

production!(
    rule_list,
    seq([
        elem(one_or_more(seq([
            elem(call("Rule", rule)),
            omit(ws().clone()),
        ]))),
        omit(eof()),
    ])
);

production!(
    rule,
    action(
        seq([
            label("name", identifier_name().clone()),
            omit(ws().clone()),
            label(
                "display_name",
                zero_or_one(seq([elem(string_literal().clone()), omit(ws().clone())])),
            ),
            omit(lit("=")),
            omit(ws().clone()),
            label("expression", call("ChoiceExpression", choice_expression)),
            omit(eos().clone()),
        ]),
        |ctx| {
            let (name, name_location) = ctx.capture("name").into_ident();
            let display_name = match ctx.capture("display_name") {
                Node::Absent => None,
                display_name => Some(display_name.into_text()),
            };

            Ok(Node::Rule(Box::new(ast::Rule {
                name,
                display_name,
                expr: ctx.capture("expression").into_expr(),
                name_location,
                location: ctx.location(),
            })))
        },
    )
);

production!(
    choice_expression,
    action(
        seq([
            label("head", call("ActionExpression", action_expression)),
            label(
                "tail",
                zero_or_more(seq([
                    omit(ws().clone()),
                    omit(lit("/")),
                    omit(ws().clone()),
                    elem(call("ActionExpression", action_expression)),
                ])),
            ),
        ]),
        |ctx| fold_list(ctx, |alternatives| ExprKind::Choice { alternatives }),
    )
);

production!(
    action_expression,
    action(
        seq([
            label("expression", call("SequenceExpression", sequence_expression)),
            label(
                "code",
                zero_or_one(seq([omit(ws().clone()), elem(code_block().clone())])),
            ),
        ]),
        |ctx| {
            let expression = ctx.capture("expression");

            Ok(match ctx.capture("code").into_code() {
                Some(code) => node(
                    ExprKind::Action {
                        expr: Box::new(expression.into_expr()),
                        code,
                    },
                    ctx,
                ),
                None => expression,
            })
        },
    )
);

production!(
    sequence_expression,
    action(
        seq([
            label("head", call("LabeledExpression", labeled_expression)),
            label(
                "tail",
                zero_or_more(seq([
                    omit(ws().clone()),
                    elem(call("LabeledExpression", labeled_expression)),
                ])),
            ),
        ]),
        |ctx| fold_list(ctx, |elements| ExprKind::Sequence { elements }),
    )
);

fn labeled(ctx: &Ctx<'_>, pick: bool) -> Result<Node, Abort> {
    Ok(node(
        ExprKind::Labeled {
            label: ctx.capture("label").into_label(),
            pick,
            expr: Box::new(ctx.capture("expression").into_expr()),
        },
        ctx,
    ))
}

production!(
    labeled_expression,
    choice([
        action(
            seq([
                omit(lit("@")),
                omit(ws().clone()),
                label(
                    "label",
                    zero_or_one(seq([
                        elem(call("LabelColon", label_colon)),
                        omit(ws().clone()),
                    ])),
                ),
                label("expression", call("PrefixedExpression", prefixed_expression)),
            ]),
            |ctx| labeled(ctx, true),
        ),
        action(
            seq([
                label("label", call("LabelColon", label_colon)),
                omit(ws().clone()),
                label("expression", call("PrefixedExpression", prefixed_expression)),
            ]),
            |ctx| labeled(ctx, false),
        ),
        call("PrefixedExpression", prefixed_expression),
    ])
);

production!(
    label_colon,
    action(
        seq([
            label("name", identifier_name().clone()),
            omit(ws().clone()),
            omit(lit(":")),
        ]),
        |ctx| {
            let (name, location) = ctx.capture("name").into_ident();
            let reserved = ctx
                .state::<MetaState>()
                .map_or(false, |state| state.reserved.contains(&name));

            if reserved {
                return Err(Abort::new(
                    format!("Label can't be a reserved word \"{}\".", name),
                    location,
                ));
            }

            Ok(Node::Label(Label { name, location }))
        },
    )
);

production!(
    prefixed_expression,
    choice([
        action(
            seq([
                label("operator", one_of("$&!")),
                omit(ws().clone()),
                label("expression", call("SuffixedExpression", suffixed_expression)),
            ]),
            |ctx| {
                let expr = Box::new(ctx.capture("expression").into_expr());
                let kind = match ctx.capture("operator").into_text().as_str() {
                    "$" => ExprKind::Text { expr },
                    "&" => ExprKind::SimpleAnd { expr },
                    _ => ExprKind::SimpleNot { expr },
                };

                Ok(node(kind, ctx))
            },
        ),
        call("SuffixedExpression", suffixed_expression),
    ])
);

production!(
    suffixed_expression,
    choice([
        action(
            seq([
                label("expression", call("PrimaryExpression", primary_expression)),
                omit(ws().clone()),
                label("operator", one_of("?*+")),
            ]),
            |ctx| {
                let expr = Box::new(ctx.capture("expression").into_expr());
                let kind = match ctx.capture("operator").into_text().as_str() {
                    "?" => ExprKind::Optional { expr },
                    "*" => ExprKind::ZeroOrMore { expr },
                    _ => ExprKind::OneOrMore { expr },
                };

                Ok(node(kind, ctx))
            },
        ),
        call("PrimaryExpression", primary_expression),
    ])
);

production!(
    primary_expression,
    choice([
        call("LiteralMatcher", literal_matcher),
        call("CharacterClassMatcher", character_class_matcher),
        action(lit("."), |ctx| Ok(node(ExprKind::Any, ctx))),
        call("RuleReferenceExpression", rule_reference_expression),
        call("SemanticPredicateExpression", semantic_predicate_expression),
        action(
            seq([
                omit(lit("(")),
                omit(ws().clone()),
                label("expression", call("ChoiceExpression", choice_expression)),
                omit(ws().clone()),
                omit(lit(")")),
            ]),
            |ctx| {
                let expr = ctx.capture("expression").into_expr();

                // Only labels and sequences can bind names; other groups
                // need no scope of their own.
                if matches!(
                    expr.kind,
                    ExprKind::Labeled { .. } | ExprKind::Sequence { .. }
                ) {
                    Ok(node(
                        ExprKind::Group {
                            expr: Box::new(expr),
                        },
                        ctx,
                    ))
                } else {
                    Ok(Node::Expr(Box::new(expr)))
                }
            },
        ),
    ])
);

production!(
    rule_reference_expression,
    action(
        seq([
            label("name", identifier_name().clone()),
            omit(next_is_not(seq([
                elem(ws().clone()),
                elem(zero_or_one(seq([
                    elem(string_literal().clone()),
                    elem(ws().clone()),
                ]))),
                elem(lit("=")),
            ]))),
        ]),
        |ctx| {
            let (name, _) = ctx.capture("name").into_ident();
            Ok(node(ExprKind::RuleRef { name }, ctx))
        },
    )
);

production!(
    semantic_predicate_expression,
    action(
        seq([
            label("operator", one_of("&!")),
            omit(ws().clone()),
            label("code", code_block().clone()),
        ]),
        |ctx| {
            let code = match ctx.capture("code") {
                Node::Code(code) => code,
                node => unreachable!("expected code, found {:?}", node),
            };
            let kind = match ctx.capture("operator").into_text().as_str() {
                "&" => ExprKind::SemanticAnd { code },
                _ => ExprKind::SemanticNot { code },
            };

            Ok(node(kind, ctx))
        },
    )
);

production!(
    literal_matcher,
    named(
        action(
            seq([
                label("value", string_literal().clone()),
                label("ignore_case", zero_or_one(lit("i"))),
            ]),
            |ctx| {
                Ok(node(
                    ExprKind::Literal {
                        value: ctx.capture("value").into_text(),
                        ignore_case: !ctx.capture("ignore_case").is_absent(),
                    },
                    ctx,
                ))
            },
        ),
        "literal",
    )
);

production!(
    character_class_matcher,
    named(
        action(
            seq([
                omit(lit("[")),
                label("inverted", zero_or_one(lit("^"))),
                label(
                    "parts",
                    zero_or_more(choice([
                        call("ClassCharacterRange", class_character_range),
                        class_character().clone(),
                    ])),
                ),
                omit(lit("]")),
                label("ignore_case", zero_or_one(lit("i"))),
            ]),
            |ctx| {
                let parts = ctx
                    .capture("parts")
                    .into_list()
                    .into_iter()
                    .filter_map(Node::into_part)
                    .collect();

                Ok(node(
                    ExprKind::Class {
                        parts,
                        inverted: !ctx.capture("inverted").is_absent(),
                        ignore_case: !ctx.capture("ignore_case").is_absent(),
                    },
                    ctx,
                ))
            },
        ),
        "character class",
    )
);

production!(
    class_character_range,
    action(
        seq([
            label("begin", class_char().clone()),
            omit(lit("-")),
            label("end", class_char().clone()),
        ]),
        |ctx| {
            let begin = ctx.capture("begin").into_char();
            let end = ctx.capture("end").into_char();

            if begin > end {
                return Err(ctx.error(format!("Invalid character range: {}.", ctx.text())));
            }

            Ok(Node::Part(ClassPart::Range(begin, end)))
        },
    )
);

production!(
    class_character,
    choice([
        action(class_char().clone(), |ctx| {
            Ok(Node::Part(ClassPart::Char(ctx.value().into_char())))
        }),
        line_continuation().clone(),
    ])
);

production!(
    class_char,
    choice([
        seq([
            omit(next_is_not(choice([
                lit("]"),
                lit("\\"),
                line_terminator().clone(),
            ]))),
            elem(any_one()),
        ]),
        seq([omit(lit("\\")), elem(escape_sequence().clone())]),
    ])
);

production!(
    string_literal,
    named(
        choice([
            seq([
                omit(lit("\"")),
                elem(zero_or_more(string_character("\""))),
                omit(lit("\"")),
            ]),
            seq([
                omit(lit("'")),
                elem(zero_or_more(string_character("'"))),
                omit(lit("'")),
            ]),
        ]),
        "string",
    )
);

fn string_character(quote: &str) -> R {
    choice([
        seq([
            omit(next_is_not(choice([
                lit(quote),
                lit("\\"),
                line_terminator().clone(),
            ]))),
            elem(any_one()),
        ]),
        seq([omit(lit("\\")), elem(escape_sequence().clone())]),
        line_continuation().clone(),
    ])
}

production!(
    line_continuation,
    action(
        seq([elem(lit("\\")), elem(line_terminator_sequence().clone())]),
        |_| Ok(Node::Text(String::new())),
    )
);

production!(
    escape_sequence,
    choice([
        character_escape_sequence().clone(),
        action(
            seq([elem(lit("0")), elem(next_is_not(decimal_digit()))]),
            |_| Ok(Node::Text("\0".to_owned())),
        ),
        hex_escape_sequence().clone(),
        unicode_escape_sequence().clone(),
    ])
);

production!(
    character_escape_sequence,
    choice([
        single_escape_character().clone(),
        seq([
            omit(next_is_not(choice([
                single_escape_character().clone(),
                decimal_digit(),
                lit("x"),
                lit("u"),
                line_terminator().clone(),
            ]))),
            elem(any_one()),
        ]),
    ])
);

production!(
    single_escape_character,
    choice([
        lit("'"),
        lit("\""),
        lit("\\"),
        escape("b", '\u{8}'),
        escape("f", '\u{c}'),
        escape("n", '\n'),
        escape("r", '\r'),
        escape("t", '\t'),
        escape("v", '\u{b}'),
    ])
);

production!(
    hex_escape_sequence,
    action(
        seq([
            omit(lit("x")),
            elem(as_slice(seq([elem(hex_digit()), elem(hex_digit())]))),
        ]),
        code_point,
    )
);

production!(
    unicode_escape_sequence,
    choice([
        action(
            seq([
                omit(lit("u{")),
                elem(as_slice(one_or_more(hex_digit()))),
                omit(lit("}")),
            ]),
            code_point,
        ),
        action(
            seq([
                omit(lit("u")),
                elem(as_slice(seq([
                    elem(hex_digit()),
                    elem(hex_digit()),
                    elem(hex_digit()),
                    elem(hex_digit()),
                ]))),
            ]),
            code_point,
        ),
    ])
);

fn decimal_digit() -> R {
    char_class(vec![ClassPart::Range('0', '9')], false, false)
}

fn hex_digit() -> R {
    char_class(
        vec![
            ClassPart::Range('0', '9'),
            ClassPart::Range('a', 'f'),
            ClassPart::Range('A', 'F'),
        ],
        false,
        false,
    )
}

production!(
    code_block,
    named(
        choice([
            seq([
                omit(lit("{")),
                elem(call("BareCodeBlock", bare_code_block)),
                omit(lit("}")),
            ]),
            action(lit("{"), |ctx| Err(ctx.error("Unbalanced brace."))),
        ]),
        "code block",
    )
);

production!(
    bare_code_block,
    action(call("Code", code), |ctx| {
        Ok(Node::Code(CodeBlock {
            code: ctx.value().into_text(),
            location: ctx.location(),
        }))
    })
);

production!(
    code,
    as_slice(zero_or_more(choice([
        one_or_more(seq([omit(next_is_not(one_of("{}\"'"))), elem(any_one())])),
        seq([elem(lit("{")), elem(call("Code", code)), elem(lit("}"))]),
        call("QuotedCode", quoted_code),
        one_of("\"'"),
    ])))
);

// Braces inside Rust string and char literals are not counted. A quote that
// opens no literal, like a lifetime's, is plain code.
production!(
    quoted_code,
    choice([
        seq([
            elem(lit("\"")),
            elem(zero_or_more(choice([
                seq([elem(lit("\\")), elem(any_one())]),
                seq([omit(next_is_not(one_of("\"\\"))), elem(any_one())]),
            ]))),
            elem(lit("\"")),
        ]),
        seq([
            elem(lit("'")),
            elem(choice([
                seq([
                    elem(lit("\\")),
                    elem(any_one()),
                    elem(zero_or_more(seq([omit(next_is_not(lit("'"))), elem(any_one())]))),
                ]),
                seq([omit(next_is_not(one_of("'\\"))), elem(any_one())]),
            ])),
            elem(lit("'")),
        ]),
    ])
);

production!(
    identifier_name,
    named(
        action(
            as_slice(seq([
                elem(one_match::<str, Node, _>(|c| {
                    (c.is_alphabetic() || *c == '_').then_some(Node::Absent)
                })),
                elem(zero_or_more(one_match::<str, Node, _>(|c| {
                    (c.is_alphanumeric() || matches!(*c, '_' | '\u{200c}' | '\u{200d}'))
                        .then_some(Node::Absent)
                }))),
            ])),
            |ctx| Ok(Node::Ident(ctx.value().into_text(), ctx.location())),
        ),
        "identifier",
    )
);

production!(
    white_space,
    named(
        one_match::<str, Node, _>(|c| {
            ((c.is_whitespace() && !is_line_terminator(*c)) || *c == '\u{feff}')
                .then_some(Node::Absent)
        }),
        "whitespace",
    )
);

production!(line_terminator, one_of("\n\r\u{2028}\u{2029}"));

production!(
    line_terminator_sequence,
    named(
        choice([
            lit("\n"),
            lit("\r\n"),
            lit("\r"),
            lit("\u{2028}"),
            lit("\u{2029}"),
        ]),
        "end of line",
    )
);

production!(
    comment,
    named(
        choice([
            call("MultiLineComment", multi_line_comment),
            call("SingleLineComment", single_line_comment),
        ]),
        "comment",
    )
);

production!(
    multi_line_comment,
    action(
        seq([
            omit(lit("/*")),
            elem(as_slice(zero_or_more(seq([
                elem(next_is_not(lit("*/"))),
                elem(any_one()),
            ])))),
            omit(lit("*/")),
        ]),
        |ctx| record_comment(ctx, true),
    )
);

production!(
    multi_line_comment_no_line_terminator,
    action(
        seq([
            omit(lit("/*")),
            elem(as_slice(zero_or_more(seq([
                elem(next_is_not(choice([
                    lit("*/"),
                    line_terminator().clone(),
                ]))),
                elem(any_one()),
            ])))),
            omit(lit("*/")),
        ]),
        |ctx| record_comment(ctx, true),
    )
);

production!(
    single_line_comment,
    action(
        seq([
            omit(lit("//")),
            elem(as_slice(zero_or_more(seq([
                elem(next_is_not(line_terminator().clone())),
                elem(any_one()),
            ])))),
        ]),
        |ctx| record_comment(ctx, false),
    )
);

// Whitespace, line breaks and comments.
production!(
    ws,
    zero_or_more(choice([
        white_space().clone(),
        line_terminator_sequence().clone(),
        comment().clone(),
    ]))
);

// Whitespace and comments without line breaks.
production!(
    inline_ws,
    zero_or_more(choice([
        white_space().clone(),
        call(
            "MultiLineCommentNoLineTerminator",
            multi_line_comment_no_line_terminator,
        ),
    ]))
);

// Rules end at a semicolon, a line break or the end of the grammar.
production!(
    eos,
    choice([
        seq([elem(ws().clone()), elem(lit(";"))]),
        seq([
            elem(inline_ws().clone()),
            elem(zero_or_one(call("SingleLineComment", single_line_comment))),
            elem(line_terminator_sequence().clone()),
        ]),
        seq([elem(ws().clone()), elem(eof())]),
    ])
);

fn eof() -> R {
    end_of_input()
}
