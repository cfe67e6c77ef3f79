//! Lexers for template markup using logos
//!
//! Markup is lexed in two layers: [`Token`] splits a template into tags, text
//! and verbatim markup, and [`AttrToken`] splits the inside of a start tag
//! into attribute names, `=` and values.

use logos::Logos;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token {
    /// `<!-- ... -->`, unterminated comments run to end of input
    #[token("<!--", comment)]
    Comment(String),

    /// `<!DOCTYPE ...>`, `<![CDATA[...>` or `<?...>`
    #[regex(r"<![a-zA-Z\[][^>]*>", |lex| lex.slice().to_string())]
    #[regex(r"<\?[^>]*>", |lex| lex.slice().to_string())]
    Declaration(String),

    /// Whole start tag including attributes, quoted values may contain `>`
    #[regex(r#"<[a-zA-Z][^\s/>]*([^>"']|"[^"]*"|'[^']*')*>"#, |lex| lex.slice().to_string())]
    StartTag(String),

    /// End tag, carries the tag name only
    #[regex(r"</[a-zA-Z][^>]*>", end_tag_name)]
    EndTag(String),

    #[regex(r"[^<]+", |lex| lex.slice().to_string())]
    Text(String),

    /// A `<` that does not open any markup
    #[token("<")]
    Lt,
}

fn comment(lex: &mut logos::Lexer<Token>) -> String {
    let rest = lex.remainder();
    let len = rest.find("-->").map(|i| i + 3).unwrap_or(rest.len());
    lex.bump(len);
    lex.slice().to_string()
}

fn end_tag_name(lex: &mut logos::Lexer<Token>) -> String {
    let inner = &lex.slice()[2..lex.slice().len() - 1];
    inner
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Tokens inside a start tag, after the tag name
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"\s+")]
pub enum AttrToken {
    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#, |lex| {
        let s = lex.slice();
        s[1..s.len()-1].to_string()
    })]
    DoubleQuoted(String),

    /// Single-quoted values are re-emitted double-quoted, so inner `"` is escaped here
    #[regex(r"'[^']*'", |lex| {
        let s = lex.slice();
        s[1..s.len()-1].replace('"', "&quot;")
    })]
    SingleQuoted(String),

    #[regex(r#"[^\s"'=]+"#, |lex| lex.slice().to_string())]
    Word(String),
}

/// Lex the attribute part of a start tag into tokens with spans
///
/// Stray `/` separators (`<img / src="a">`) carry no meaning and are dropped.
pub fn lex_attributes(input: &str) -> impl Iterator<Item = (AttrToken, Span)> + '_ {
    AttrToken::lexer(input)
        .spanned()
        .filter_map(|(tok, span)| tok.ok().map(|t| (t, span)))
        .filter(|(tok, _)| !matches!(tok, AttrToken::Word(w) if w == "/"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(input: &str) -> Vec<Token> {
        Token::lexer(input).filter_map(|t| t.ok()).collect()
    }

    #[test]
    fn test_start_text_end() {
        assert_eq!(
            lex(r#"<h1 data-path="foo">Hi</h1>"#),
            vec![
                Token::StartTag(r#"<h1 data-path="foo">"#.to_string()),
                Token::Text("Hi".to_string()),
                Token::EndTag("h1".to_string()),
            ]
        );
    }

    #[test]
    fn test_quoted_gt_stays_in_tag() {
        assert_eq!(
            lex(r#"<a title="a > b">x</a>"#)[0],
            Token::StartTag(r#"<a title="a > b">"#.to_string())
        );
    }

    #[test]
    fn test_self_closing_tag() {
        assert_eq!(lex("<br/>"), vec![Token::StartTag("<br/>".to_string())]);
    }

    #[test]
    fn test_comment_and_doctype() {
        assert_eq!(
            lex("<!DOCTYPE html><!-- a <b> -->"),
            vec![
                Token::Declaration("<!DOCTYPE html>".to_string()),
                Token::Comment("<!-- a <b> -->".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        assert_eq!(
            lex("<!-- open"),
            vec![Token::Comment("<!-- open".to_string())]
        );
    }

    #[test]
    fn test_stray_lt_is_not_a_tag() {
        assert_eq!(
            lex("1 < 2"),
            vec![
                Token::Text("1 ".to_string()),
                Token::Lt,
                Token::Text(" 2".to_string()),
            ]
        );
    }

    #[test]
    fn test_end_tag_name_ignores_whitespace() {
        assert_eq!(lex("</div >"), vec![Token::EndTag("div".to_string())]);
    }

    #[test]
    fn test_attribute_tokens() {
        let tokens: Vec<_> = lex_attributes(r#" data-path-src="img.src" alt='a "b"' hidden"#)
            .map(|(t, _)| t)
            .collect();
        assert_eq!(
            tokens,
            vec![
                AttrToken::Word("data-path-src".to_string()),
                AttrToken::Equals,
                AttrToken::DoubleQuoted("img.src".to_string()),
                AttrToken::Word("alt".to_string()),
                AttrToken::Equals,
                AttrToken::SingleQuoted("a &quot;b&quot;".to_string()),
                AttrToken::Word("hidden".to_string()),
            ]
        );
    }

    #[test]
    fn test_unquoted_value_with_slashes() {
        let tokens: Vec<_> = lex_attributes(" href=/a/b").map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                AttrToken::Word("href".to_string()),
                AttrToken::Equals,
                AttrToken::Word("/a/b".to_string()),
            ]
        );
    }

    #[test]
    fn test_stray_slash_dropped() {
        let tokens: Vec<_> = lex_attributes(r#" / src="a""#).map(|(t, _)| t).collect();
        assert_eq!(
            tokens,
            vec![
                AttrToken::Word("src".to_string()),
                AttrToken::Equals,
                AttrToken::DoubleQuoted("a".to_string()),
            ]
        );
    }
}
