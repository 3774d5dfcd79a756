//! Comment toggling through the editor widget
//!
//! Exercises delimiter selection by innermost mode, the caret placement on
//! empty ranges, and the inclusive splice on uncomment.

use modefmt::{CodeEditor, EditorOptions, Pos};

fn make_editor(mode: &str, value: &str) -> CodeEditor {
    let options = EditorOptions {
        mode: mode.to_string(),
        ..Default::default()
    };
    CodeEditor::with_value(options, value).expect("mode is registered")
}

#[test]
fn test_script_comment_wraps_with_block_delimiters() {
    let mut editor = make_editor("script", "var x = 1;");
    let range = editor.whole_range();
    editor.comment_range(true, range.from, range.to).unwrap();
    assert_eq!(editor.get_value(), "/*var x = 1;*/");
}

#[test]
fn test_html_comment_uses_markup_delimiters() {
    let mut editor = make_editor("html", "<div>hi</div>");
    let range = editor.whole_range();
    editor.comment_range(true, range.from, range.to).unwrap();
    assert_eq!(editor.get_value(), "<!--<div>hi</div>-->");
}

#[test]
fn test_style_element_content_gets_css_delimiters() {
    // Range sits inside the <style> region, so the innermost mode is css.
    let mut editor = make_editor("html", "<style>a{}</style>");
    editor
        .comment_range(true, Pos::new(0, 7), Pos::new(0, 10))
        .unwrap();
    assert_eq!(editor.get_value(), "<style>/*a{}*/</style>");
}

#[test]
fn test_empty_range_leaves_caret_between_delimiters() {
    let mut editor = make_editor("script", "asdf");
    editor
        .comment_range(true, Pos::new(0, 4), Pos::new(0, 4))
        .unwrap();
    assert_eq!(editor.get_value(), "asdf/**/");
    assert_eq!(editor.buffer().cursor(), Pos::new(0, 6));
}

#[test]
fn test_uncomment_splices_delimited_span() {
    let mut editor = make_editor("script", "a /* b */ c");
    let range = editor.whole_range();
    editor.comment_range(false, range.from, range.to).unwrap();
    assert_eq!(editor.get_value(), "a  c");
}

#[test]
fn test_uncomment_spans_lines() {
    let mut editor = make_editor("script", "a /* b\nc */ d");
    let range = editor.whole_range();
    editor.comment_range(false, range.from, range.to).unwrap();
    assert_eq!(editor.get_value(), "a  d");
}

#[test]
fn test_uncomment_is_noop_without_an_ordered_pair() {
    let mut editor = make_editor("script", "no comment here");
    let range = editor.whole_range();
    editor.comment_range(false, range.from, range.to).unwrap();
    assert_eq!(editor.get_value(), "no comment here");

    let mut editor = make_editor("script", "*/ backwards /*");
    let range = editor.whole_range();
    editor.comment_range(false, range.from, range.to).unwrap();
    assert_eq!(editor.get_value(), "*/ backwards /*");
}

#[test]
fn test_toggle_undoes_as_one_step() {
    let mut editor = make_editor("css", "body{}");
    let range = editor.whole_range();
    editor.comment_range(true, range.from, range.to).unwrap();
    assert_eq!(editor.get_value(), "/*body{}*/");

    assert!(editor.buffer_mut().undo());
    assert_eq!(editor.get_value(), "body{}");
}
