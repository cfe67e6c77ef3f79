//! Error types for template parsing and data selection

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

use crate::parser::lexer::AttrToken;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

/// A start tag whose attribute list could not be parsed
///
/// Spans are relative to the attribute text after the tag name.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },
}

/// Override data that is not valid JSON
#[derive(Error, Debug)]
pub enum DataError {
    #[error("invalid override data at line {}, column {}: {source}", .source.line(), .source.column())]
    InvalidOverride {
        #[source]
        source: serde_json::Error,
        /// Byte offset of the failure within the override string
        offset: usize,
    },
}

impl DataError {
    pub(crate) fn invalid_override(json: &str, source: serde_json::Error) -> Self {
        let offset = line_column_offset(json, source.line(), source.column());
        DataError::InvalidOverride { source, offset }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            DataError::InvalidOverride { source: err, offset } => {
                let start = (*offset).min(source.len());
                let end = (start + 1).min(source.len()).max(start);
                render_report(
                    source,
                    filename,
                    start..end,
                    "invalid override data",
                    &err.to_string(),
                )
            }
        }
    }
}

impl ParseError {
    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        match self {
            ParseError::Syntax {
                span,
                message,
                expected,
            } => {
                let expected_str = if expected.is_empty() {
                    String::new()
                } else {
                    format!("\nExpected: {}", expected.join(", "))
                };
                render_report(
                    source,
                    filename,
                    span.clone(),
                    message,
                    &format!("{}{}", message, expected_str),
                )
            }
        }
    }
}

fn render_report(source: &str, filename: &str, span: Span, message: &str, label: &str) -> String {
    let mut buf = Vec::new();
    let written = Report::build(ReportKind::Error, filename, span.start)
        .with_message(message)
        .with_label(
            Label::new((filename, span))
                .with_message(label)
                .with_color(Color::Red),
        )
        .finish()
        .write((filename, Source::from(source)), &mut buf);
    if written.is_err() {
        return format!("{}: {}", message, label);
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Convert serde_json's 1-based line/column into a byte offset
fn line_column_offset(text: &str, line: usize, column: usize) -> usize {
    let line_start: usize = text
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(text.len())
}

impl<'a> From<chumsky::error::Rich<'a, AttrToken>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, AttrToken>) -> Self {
        let message = match err.found() {
            Some(tok) => format!("Unexpected {}", format_token(tok)),
            None => "Unexpected end of tag".to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of tag".to_string()),
                _ => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &AttrToken) -> String {
    match tok {
        AttrToken::Equals => "'='".to_string(),
        AttrToken::Word(w) => format!("name '{}'", w),
        AttrToken::DoubleQuoted(v) | AttrToken::SingleQuoted(v) => format!("value \"{}\"", v),
    }
}
