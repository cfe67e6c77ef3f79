//! Template parser: chumsky for start-tag attributes, a stack for nesting

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;
use logos::Logos;

use crate::error::ParseError;
use crate::parser::ast::*;
use crate::parser::lexer::{lex_attributes, AttrToken, Token};

/// Parse a template into an element tree
///
/// Parsing never fails. Markup that cannot be understood is kept as text, end
/// tags without a matching open element are dropped, and elements still open
/// at the end of input are closed there.
pub fn parse(input: &str) -> Fragment {
    let mut builder = TreeBuilder::default();
    let mut lex = Token::lexer(input);
    let mut offset = 0;

    while let Some(result) = lex.next() {
        match result {
            Ok(Token::Text(text)) => builder.text(&text),
            Ok(Token::Comment(raw)) | Ok(Token::Declaration(raw)) => builder.raw(raw),
            Ok(Token::EndTag(name)) => builder.close(&name),
            Ok(Token::StartTag(raw)) => {
                let (name, attrs, self_closing) = split_start_tag(&raw);
                match parse_attributes(attrs) {
                    Ok(attributes) => {
                        let element = Element::new(name, attributes);
                        if is_raw_text_element(name) && !self_closing {
                            let rest = lex.remainder();
                            let len = find_end_tag(rest, name).unwrap_or(rest.len());
                            let content = &rest[..len];
                            lex.bump(len);
                            builder.open(element, false);
                            builder.text(content);
                        } else {
                            builder.open(element, self_closing);
                        }
                    }
                    Err(errors) => {
                        tracing::debug!(
                            tag = %raw,
                            errors = %errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "),
                            "unparseable start tag kept as text"
                        );
                        builder.text(&raw);
                    }
                }
            }
            Ok(Token::Lt) => builder.text(lex.slice()),
            Err(()) => {
                let bad = lex.slice();
                if bad.len() > 1 && bad.starts_with('<') {
                    // A tag that never terminates only degrades its own `<`
                    tracing::debug!(at = offset + lex.span().start, "unterminated tag kept as text");
                    builder.text("<");
                    offset += lex.span().start + 1;
                    lex = Token::lexer(&input[offset..]);
                } else {
                    builder.text(bad);
                }
            }
        }
    }

    builder.finish()
}

/// Parse the attribute list of a start tag (the text after the tag name)
pub fn parse_attributes(input: &str) -> Result<Vec<Attribute>, Vec<ParseError>> {
    let len = input.len();

    let token_iter = lex_attributes(input).map(|(tok, span)| (tok, span.into()));

    let token_stream = Stream::from_iter(token_iter)
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    attributes_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn attributes_parser<'a, I>(
) -> impl Parser<'a, I, Vec<Attribute>, extra::Err<Rich<'a, AttrToken>>> + Clone
where
    I: ValueInput<'a, Token = AttrToken, Span = SimpleSpan>,
{
    let name = select! {
        AttrToken::Word(w) => w,
    };

    let value = select! {
        AttrToken::Word(w) => w,
        AttrToken::DoubleQuoted(v) => v,
        AttrToken::SingleQuoted(v) => v,
    };

    let attribute = name
        .then(just(AttrToken::Equals).ignore_then(value).or_not())
        .map(|(name, value)| Attribute { name, value });

    attribute
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
}

/// Split `<name attrs>` / `<name attrs/>` into name, attribute text and the
/// self-closing flag
fn split_start_tag(raw: &str) -> (&str, &str, bool) {
    let body = &raw[1..raw.len() - 1];
    let (body, self_closing) = match body.strip_suffix('/') {
        Some(b) => (b, true),
        None => (body, false),
    };
    let name_end = body
        .find(|c: char| c.is_whitespace() || c == '/')
        .unwrap_or(body.len());
    (&body[..name_end], &body[name_end..], self_closing)
}

/// Byte offset of `</name` in `rest`, ignoring ASCII case
fn find_end_tag(rest: &str, name: &str) -> Option<usize> {
    let needle = format!("</{}", name.to_ascii_lowercase());
    rest.to_ascii_lowercase().find(&needle)
}

#[derive(Default)]
struct TreeBuilder {
    root: Vec<Node>,
    open: Vec<Element>,
}

impl TreeBuilder {
    fn current(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(el) => &mut el.children,
            None => &mut self.root,
        }
    }

    fn push(&mut self, node: Node) {
        self.current().push(node);
    }

    /// Append text, merging with a preceding text node
    fn text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let nodes = self.current();
        match nodes.last_mut() {
            Some(Node::Text(prev)) => prev.push_str(text),
            _ => nodes.push(Node::Text(text.to_string())),
        }
    }

    fn raw(&mut self, raw: String) {
        self.push(Node::Raw(raw));
    }

    fn open(&mut self, element: Element, self_closing: bool) {
        if self_closing || element.is_void() {
            self.push(Node::Element(element));
        } else {
            self.open.push(element);
        }
    }

    /// Close the nearest open element named `name` and everything inside it
    fn close(&mut self, name: &str) {
        let Some(depth) = self
            .open
            .iter()
            .rposition(|el| el.name.eq_ignore_ascii_case(name))
        else {
            return;
        };
        while self.open.len() > depth {
            self.pop();
        }
    }

    fn pop(&mut self) {
        if let Some(el) = self.open.pop() {
            self.push(Node::Element(el));
        }
    }

    fn finish(mut self) -> Fragment {
        while !self.open.is_empty() {
            self.pop();
        }
        Fragment { nodes: self.root }
    }
}
