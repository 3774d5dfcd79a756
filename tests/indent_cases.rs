//! Smart indentation across modes, table-driven.

use modefmt::{CodeEditor, EditorOptions, Pos};
use rstest::rstest;

fn reindent(mode: &str, value: &str) -> String {
    let options = EditorOptions {
        mode: mode.to_string(),
        ..Default::default()
    };
    let mut editor = CodeEditor::with_value(options, value).expect("mode is registered");
    let last = editor.buffer().line_count() - 1;
    editor
        .auto_indent_range(Pos::new(0, 0), Pos::new(last, 0))
        .expect("range is in bounds");
    editor.get_value()
}

#[rstest]
#[case::css_block("css", "a{\ncolor:red;\n}", "a{\n    color:red;\n}")]
#[case::css_nested("css", "@media x{\na{\nb:c;\n}\n}", "@media x{\n    a{\n        b:c;\n    }\n}")]
#[case::css_removes_over_indent("css", "a{\n        color:red;\n}", "a{\n    color:red;\n}")]
#[case::script_block("script", "if(x){\ny();\n}", "if(x){\n    y();\n}")]
#[case::script_array("script", "var a=[\n1,\n2\n];", "var a=[\n    1,\n    2\n];")]
#[case::script_tabs_become_spaces("script", "if(x){\n\ty();\n}", "if(x){\n    y();\n}")]
#[case::xml_elements("xml", "<a>\n<b>\nt\n</b>\n</a>", "<a>\n    <b>\n        t\n    </b>\n</a>")]
#[case::html_script_content(
    "html",
    "<body>\n<script>\nif(x){\ny();\n}\n</script>\n</body>",
    "<body>\n    <script>\n        if(x){\n            y();\n        }\n    </script>\n</body>"
)]
#[case::blank_lines_stay_empty("css", "a{\n\nb:c;\n}", "a{\n\n    b:c;\n}")]
fn test_reindent(#[case] mode: &str, #[case] input: &str, #[case] expected: &str) {
    assert_eq!(reindent(mode, input), expected);
}
