//! CSS mode: tokenizer, parse state, and newline rule.
//!
//! The css grammar here is deliberately shallow. The reformatter only needs
//! token boundaries, brace depth for indentation, and comment tracking
//! across lines; selectors and property values are not distinguished beyond
//! their token class.

use logos::Logos;

use super::stream::StringStream;
use super::TokenKind;

/// Parse state for css: open-brace depth plus block-comment carry-over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CssState {
    pub depth: usize,
    pub in_comment: bool,
}

/// Core css tokens produced by the logos lexer. Block comments are handled
/// before logos runs because they can span lines.
#[derive(Logos, Debug, PartialEq, Clone)]
enum CssTok {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"@[a-zA-Z-]+")]
    AtKeyword,

    #[regex(r"#[0-9a-fA-F]+")]
    HexColor,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_-]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?[a-zA-Z%]*")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,

    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,

    #[regex(r"[:,.>+~*=()\[\]%!&|/#-]")]
    Punct,
}

/// Read one css token from the stream.
pub fn token(stream: &mut StringStream<'_>, state: &mut CssState) -> TokenKind {
    if state.in_comment {
        if stream.skip_past("*/") {
            state.in_comment = false;
        }
        return TokenKind::Comment;
    }
    if stream.remainder().starts_with("/*") {
        stream.advance(2);
        state.in_comment = !stream.skip_past("*/");
        return TokenKind::Comment;
    }

    let mut lexer = CssTok::lexer(stream.remainder());
    match lexer.next() {
        Some(Ok(tok)) => {
            stream.advance(lexer.span().end);
            match tok {
                CssTok::Whitespace => TokenKind::Whitespace,
                CssTok::AtKeyword => TokenKind::Keyword,
                CssTok::HexColor => TokenKind::Atom,
                CssTok::Ident => TokenKind::Text,
                CssTok::Number => TokenKind::Number,
                CssTok::DoubleQuoted | CssTok::SingleQuoted => TokenKind::String,
                CssTok::LBrace => {
                    state.depth += 1;
                    TokenKind::Punctuation
                }
                CssTok::RBrace => {
                    state.depth = state.depth.saturating_sub(1);
                    TokenKind::Punctuation
                }
                CssTok::Semi | CssTok::Punct => TokenKind::Punctuation,
            }
        }
        Some(Err(_)) => {
            stream.advance(lexer.span().end.max(1));
            TokenKind::Error
        }
        None => {
            stream.skip_to_end();
            TokenKind::Error
        }
    }
}

/// Break after a token whose full text is exactly `;`, `{`, or `}`.
pub fn newline_after_token(text: &str) -> bool {
    matches!(text, ";" | "{" | "}")
}
