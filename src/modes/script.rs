//! Script mode: tokenizer, bracket-context state, and newline rule.
//!
//! The parse state keeps an explicit stack of open bracket contexts. That
//! stack is what the newline rule consults to suppress breaks after the
//! semicolons of a parenthesized construct (a `for` header): "inside
//! parens" means the top of the stack is a paren entry.
//!
//! The same mode serves the data-literal sub-mode (json): the tokenizer is
//! shared and only the newline rule changes.

use std::collections::HashSet;

use logos::Logos;
use once_cell::sync::Lazy;

use super::stream::StringStream;
use super::TokenKind;

/// One open bracket on the context stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    Paren,
    Square,
    Brace,
}

/// Parse state for script: bracket contexts plus block-comment carry-over.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptState {
    pub context: Vec<Bracket>,
    pub in_comment: bool,
}

impl ScriptState {
    /// Whether the innermost open bracket is a paren.
    pub fn inside_parens(&self) -> bool {
        self.context.last() == Some(&Bracket::Paren)
    }
}

static KEYWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "async", "await", "break", "case", "catch", "class", "const", "continue", "default",
        "delete", "do", "else", "finally", "for", "function", "if", "in", "instanceof", "let",
        "new", "of", "return", "switch", "throw", "try", "typeof", "var", "void", "while",
        "yield",
    ]
    .into_iter()
    .collect()
});

static ATOMS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["true", "false", "null", "undefined", "NaN", "Infinity"]
        .into_iter()
        .collect()
});

#[derive(Logos, Debug, PartialEq, Clone)]
enum ScriptTok {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[regex(r"//[^\n]*", priority = 10)]
    LineComment,

    #[regex(r"[A-Za-z_$][A-Za-z0-9_$]*")]
    Ident,

    #[regex(r"0[xX][0-9a-fA-F]+")]
    HexNumber,
    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,
    #[regex(r"'([^'\\]|\\.)*'")]
    SingleQuoted,
    #[regex(r"`([^`\\]|\\.)*`")]
    Template,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LSquare,
    #[token("]")]
    RSquare,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token(";")]
    Semi,
    #[token(",")]
    Comma,

    #[regex(r"[+\-*/%=<>!&|^~?:.]+")]
    Operator,
}

/// Read one script token from the stream.
pub fn token(stream: &mut StringStream<'_>, state: &mut ScriptState) -> TokenKind {
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

    let mut lexer = ScriptTok::lexer(stream.remainder());
    match lexer.next() {
        Some(Ok(tok)) => {
            stream.advance(lexer.span().end);
            match tok {
                ScriptTok::Whitespace => TokenKind::Whitespace,
                ScriptTok::LineComment => TokenKind::Comment,
                ScriptTok::Ident => {
                    let text = stream.current();
                    if KEYWORDS.contains(text) {
                        TokenKind::Keyword
                    } else if ATOMS.contains(text) {
                        TokenKind::Atom
                    } else {
                        TokenKind::Text
                    }
                }
                ScriptTok::Number | ScriptTok::HexNumber => TokenKind::Number,
                ScriptTok::DoubleQuoted | ScriptTok::SingleQuoted | ScriptTok::Template => {
                    TokenKind::String
                }
                ScriptTok::LParen => {
                    state.context.push(Bracket::Paren);
                    TokenKind::Punctuation
                }
                ScriptTok::LSquare => {
                    state.context.push(Bracket::Square);
                    TokenKind::Punctuation
                }
                ScriptTok::LBrace => {
                    state.context.push(Bracket::Brace);
                    TokenKind::Punctuation
                }
                ScriptTok::RParen | ScriptTok::RSquare | ScriptTok::RBrace => {
                    state.context.pop();
                    TokenKind::Punctuation
                }
                ScriptTok::Semi | ScriptTok::Comma => TokenKind::Punctuation,
                ScriptTok::Operator => TokenKind::Operator,
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

/// Newline decision for script and its json sub-mode.
///
/// json: break after bare `[`, `{` or `,`, or before remaining text starting
/// with `}`. Script: break after bare `;`/`{`/`}` unless the `;` sits inside a
/// parenthesized construct or the remaining text already starts with `;`.
pub fn newline_after_token(json: bool, text: &str, text_after: &str, state: &ScriptState) -> bool {
    if json {
        matches!(text, "[" | "{" | ",") || text_after.starts_with('}')
    } else {
        if text == ";" && state.inside_parens() {
            return false;
        }
        matches!(text, ";" | "{" | "}") && !text_after.starts_with(';')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str, state: &mut ScriptState) -> Vec<String> {
        let mut stream = StringStream::new(line, 4);
        let mut out = Vec::new();
        while !stream.eol() {
            stream.begin_token();
            token(&mut stream, state);
            out.push(stream.current().to_string());
        }
        out
    }

    #[test]
    fn test_semicolon_suppressed_inside_parens() {
        let mut state = ScriptState::default();
        run("for(var i=0", &mut state);
        assert!(state.inside_parens());
        assert!(!newline_after_token(false, ";", "", &state));

        let top_level = ScriptState::default();
        assert!(newline_after_token(false, ";", "", &top_level));
    }

    #[test]
    fn test_no_break_when_text_after_starts_with_semicolon() {
        let state = ScriptState::default();
        assert!(!newline_after_token(false, ";", ";next", &state));
        assert!(newline_after_token(false, "}", "", &state));
    }

    #[test]
    fn test_json_rule() {
        let state = ScriptState::default();
        assert!(newline_after_token(true, "{", "", &state));
        assert!(newline_after_token(true, "[", "", &state));
        assert!(newline_after_token(true, ",", "", &state));
        assert!(newline_after_token(true, "x", "}rest", &state));
        assert!(!newline_after_token(true, ";", "", &state));
    }

    #[test]
    fn test_context_stack_tracking() {
        let mut state = ScriptState::default();
        run("f(a[0],{", &mut state);
        assert_eq!(
            state.context,
            vec![Bracket::Paren, Bracket::Brace]
        );
        run("})", &mut state);
        assert!(state.context.is_empty());
    }

    #[test]
    fn test_keyword_and_atom_classification() {
        let mut state = ScriptState::default();
        let mut stream = StringStream::new("var", 4);
        stream.begin_token();
        assert_eq!(token(&mut stream, &mut state), TokenKind::Keyword);

        let mut stream = StringStream::new("true", 4);
        stream.begin_token();
        assert_eq!(token(&mut stream, &mut state), TokenKind::Atom);
    }

    #[test]
    fn test_line_comment_consumes_rest_of_line() {
        let mut state = ScriptState::default();
        let tokens = run("a; // trailing", &mut state);
        assert_eq!(tokens.last().unwrap(), "// trailing");
    }

    #[test]
    fn test_block_comment_spans_lines() {
        let mut state = ScriptState::default();
        run("x = /* open", &mut state);
        assert!(state.in_comment);
        run("close */ y", &mut state);
        assert!(!state.in_comment);
    }
}
