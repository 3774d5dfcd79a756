//! Markup mode: xml/html tokenizer, tag-context stack, and newline rule.
//!
//! The parse state keeps the stack of currently open element names; the
//! newline rule reads the top of that stack to suppress breaks inside
//! inline-level elements under the HTML configuration.
//!
//! Under HTML, `<script>` and `<style>` elements activate a nested script
//! or css mode. While the nested pair is active every token read is
//! delegated to it, until the matching close tag shows up at the stream
//! position; the nested pair is then dropped and the close tag is
//! tokenized as markup again.

use std::collections::HashSet;

use logos::Logos;
use once_cell::sync::Lazy;
use regex::Regex;

use super::stream::StringStream;
use super::{css, script, MarkupConfig, Mode, ParseState, TokenKind};

/// Inline-level element names: breaks are never inserted while one of these is
/// the innermost open context (HTML configuration only).
static INLINE_ELEMENTS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        "^(a|abbr|acronym|area|base|bdo|big|br|button|caption|cite|code|col|colgroup|dd|del|\
         dfn|em|frame|hr|iframe|img|input|ins|kbd|label|legend|link|map|object|optgroup|option|\
         param|q|samp|script|select|small|span|strong|sub|sup|textarea|tt|var)$",
    )
    .expect("inline element pattern is valid")
});

/// Elements that never take a closing tag in html and are not pushed onto the
/// context stack.
static VOID_ELEMENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
        "source", "track", "wbr",
    ]
    .into_iter()
    .collect()
});

/// A nested mode active inside a `<script>` or `<style>` element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InnerMode {
    pub mode: Mode,
    pub state: ParseState,
    host_tag: &'static str,
}

/// The tag currently being scanned, between `<name` and its closing `>`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TagScan {
    name: String,
    closing: bool,
}

/// Parse state for markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupState {
    /// Names of the currently open elements, outermost first.
    pub context: Vec<String>,
    pub in_comment: bool,
    tag: Option<TagScan>,
    pub inner: Option<Box<InnerMode>>,
}

/// Tokens inside a tag, between `<name` and `>`.
#[derive(Logos, Debug, PartialEq, Clone)]
enum TagTok {
    #[regex(r"[ \t]+")]
    Whitespace,

    #[token("/>")]
    SelfCloseEnd,
    #[token(">")]
    TagEnd,
    #[token("=")]
    Eq,

    #[regex(r#""[^"]*""#)]
    DoubleQuoted,
    #[regex(r"'[^']*'")]
    SingleQuoted,

    #[regex(r"[A-Za-z_:][A-Za-z0-9_:.-]*")]
    AttrName,
}

/// Tokens outside tags.
#[derive(Logos, Debug, PartialEq, Clone)]
enum TextTok {
    #[regex(r"</?[A-Za-z][A-Za-z0-9_:.-]*")]
    TagStart,

    #[regex(r"&[a-zA-Z#0-9]+;")]
    Entity,

    #[regex(r"[^<&\n]+")]
    Text,
}

/// Read one markup token from the stream.
pub fn token(stream: &mut StringStream<'_>, state: &mut MarkupState, config: MarkupConfig) -> TokenKind {
    // A live nested script/css region swallows everything until its close tag.
    if let Some(inner) = &mut state.inner {
        let close = match inner.host_tag {
            "style" => "</style",
            _ => "</script",
        };
        if !stream.looking_at_ignore_case(close) {
            let kind = match (&inner.mode, &mut inner.state) {
                (Mode::Css, ParseState::Css(s)) => css::token(stream, s),
                (Mode::Script { .. }, ParseState::Script(s)) => script::token(stream, s),
                _ => unreachable!("nested modes are always css or script"),
            };
            return kind;
        }
        state.inner = None;
    }

    if state.in_comment {
        if stream.skip_past("-->") {
            state.in_comment = false;
        }
        return TokenKind::Comment;
    }
    if stream.remainder().starts_with("<!--") {
        stream.advance(4);
        state.in_comment = !stream.skip_past("-->");
        return TokenKind::Comment;
    }

    if state.tag.is_some() {
        return tag_token(stream, state, config);
    }

    let mut lexer = TextTok::lexer(stream.remainder());
    match lexer.next() {
        Some(Ok(tok)) => {
            stream.advance(lexer.span().end);
            match tok {
                TextTok::TagStart => {
                    let text = stream.current();
                    let closing = text.starts_with("</");
                    let name = text.trim_start_matches(['<', '/']).to_string();
                    state.tag = Some(TagScan { name, closing });
                    TokenKind::Tag
                }
                TextTok::Entity => TokenKind::Atom,
                TextTok::Text => TokenKind::Text,
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

fn tag_token(stream: &mut StringStream<'_>, state: &mut MarkupState, config: MarkupConfig) -> TokenKind {
    let mut lexer = TagTok::lexer(stream.remainder());
    match lexer.next() {
        Some(Ok(tok)) => {
            stream.advance(lexer.span().end);
            match tok {
                TagTok::Whitespace => TokenKind::Whitespace,
                TagTok::Eq => TokenKind::Operator,
                TagTok::DoubleQuoted | TagTok::SingleQuoted => TokenKind::AttrValue,
                TagTok::AttrName => TokenKind::AttrName,
                TagTok::SelfCloseEnd => {
                    state.tag = None;
                    TokenKind::Tag
                }
                TagTok::TagEnd => {
                    if let Some(scan) = state.tag.take() {
                        finish_tag(state, config, scan);
                    }
                    TokenKind::Tag
                }
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

/// Apply the context effects of a completed `<name ...>` or `</name>` tag.
fn finish_tag(state: &mut MarkupState, config: MarkupConfig, scan: TagScan) {
    let lower = scan.name.to_ascii_lowercase();
    if scan.closing {
        if let Some(pos) = state
            .context
            .iter()
            .rposition(|open| open.eq_ignore_ascii_case(&scan.name))
        {
            state.context.truncate(pos);
        }
        return;
    }

    let void = config == MarkupConfig::Html && VOID_ELEMENTS.contains(lower.as_str());
    if !void {
        state.context.push(scan.name);
    }
    if config == MarkupConfig::Html {
        match lower.as_str() {
            "script" => {
                let mode = Mode::Script { json: false };
                let inner_state = mode.start_state();
                state.inner = Some(Box::new(InnerMode {
                    mode,
                    state: inner_state,
                    host_tag: "script",
                }));
            }
            "style" => {
                let mode = Mode::Css;
                let inner_state = mode.start_state();
                state.inner = Some(Box::new(InnerMode {
                    mode,
                    state: inner_state,
                    host_tag: "style",
                }));
            }
            _ => {}
        }
    }
}

/// Newline decision for markup: no breaks inside inline element contexts
/// (HTML); otherwise break after a tag token's closing `>` while an element is
/// open, or before remaining text starting with `<`.
pub fn newline_after_token(
    config: MarkupConfig,
    kind: TokenKind,
    text: &str,
    text_after: &str,
    state: &MarkupState,
) -> bool {
    let inline = config == MarkupConfig::Html
        && state
            .context
            .last()
            .map(|open| INLINE_ELEMENTS.is_match(&open.to_ascii_lowercase()))
            .unwrap_or(false);
    !inline
        && ((kind == TokenKind::Tag && text.ends_with('>') && !state.context.is_empty())
            || text_after.starts_with('<'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(line: &str, state: &mut MarkupState, config: MarkupConfig) -> Vec<(TokenKind, String)> {
        let mut stream = StringStream::new(line, 4);
        let mut out = Vec::new();
        while !stream.eol() {
            stream.begin_token();
            let kind = token(&mut stream, state, config);
            out.push((kind, stream.current().to_string()));
        }
        out
    }

    #[test]
    fn test_context_push_and_pop() {
        let mut state = MarkupState::default();
        run("<div><p>", &mut state, MarkupConfig::Xml);
        assert_eq!(state.context, vec!["div", "p"]);
        run("</p>", &mut state, MarkupConfig::Xml);
        assert_eq!(state.context, vec!["div"]);
    }

    #[test]
    fn test_void_elements_not_pushed_in_html() {
        let mut state = MarkupState::default();
        run("<div><br>", &mut state, MarkupConfig::Html);
        assert_eq!(state.context, vec!["div"]);

        let mut state = MarkupState::default();
        run("<div><br>", &mut state, MarkupConfig::Xml);
        assert_eq!(state.context, vec!["div", "br"]);
    }

    #[test]
    fn test_inline_element_suppresses_break_in_html() {
        let mut state = MarkupState::default();
        run("<span>", &mut state, MarkupConfig::Html);
        assert!(!newline_after_token(
            MarkupConfig::Html,
            TokenKind::Tag,
            ">",
            "text",
            &state
        ));
    }

    #[test]
    fn test_same_tag_breaks_under_xml() {
        let mut state = MarkupState::default();
        run("<span>", &mut state, MarkupConfig::Xml);
        assert!(newline_after_token(
            MarkupConfig::Xml,
            TokenKind::Tag,
            ">",
            "text",
            &state
        ));
    }

    #[test]
    fn test_break_before_open_angle() {
        let mut state = MarkupState::default();
        run("<div>", &mut state, MarkupConfig::Xml);
        assert!(newline_after_token(
            MarkupConfig::Xml,
            TokenKind::Text,
            "text",
            "<p>",
            &state
        ));
    }

    #[test]
    fn test_no_break_after_tag_without_open_context() {
        let mut state = MarkupState::default();
        run("<div></div>", &mut state, MarkupConfig::Xml);
        assert!(state.context.is_empty());
        assert!(!newline_after_token(
            MarkupConfig::Xml,
            TokenKind::Tag,
            ">",
            "",
            &state
        ));
    }

    #[test]
    fn test_script_element_activates_inner_mode() {
        let mut state = MarkupState::default();
        run("<script>", &mut state, MarkupConfig::Html);
        assert!(state.inner.is_some());

        let tokens = run("var x = 1;", &mut state, MarkupConfig::Html);
        assert_eq!(tokens[0], (TokenKind::Keyword, "var".to_string()));

        run("</script>", &mut state, MarkupConfig::Html);
        assert!(state.inner.is_none());
        assert!(state.context.is_empty());
    }

    #[test]
    fn test_script_element_stays_markup_under_xml() {
        let mut state = MarkupState::default();
        run("<script>", &mut state, MarkupConfig::Xml);
        assert!(state.inner.is_none());
    }

    #[test]
    fn test_comment_spans_lines() {
        let mut state = MarkupState::default();
        run("<!-- open", &mut state, MarkupConfig::Xml);
        assert!(state.in_comment);
        run("still --> <div>", &mut state, MarkupConfig::Xml);
        assert!(!state.in_comment);
    }

    #[test]
    fn test_attribute_tokens() {
        let mut state = MarkupState::default();
        let tokens = run("<a href=\"x\">", &mut state, MarkupConfig::Html);
        assert!(tokens.contains(&(TokenKind::AttrName, "href".to_string())));
        assert!(tokens.contains(&(TokenKind::AttrValue, "\"x\"".to_string())));
    }
}
