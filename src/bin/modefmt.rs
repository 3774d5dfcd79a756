//! Command-line interface for modefmt
//! Reformats, reindents, and comment-toggles source files using the built-in
//! language modes.
//!
//! Usage:
//!   modefmt fmt `<path>` [--mode `<mode>`] [--from `<line>` --to `<line>`]
//!   modefmt indent `<path>` [--mode `<mode>`] [--from `<line>` --to `<line>`]
//!   modefmt comment `<path>` --from `<line>` --to `<line>` [--mode `<mode>`]
//!   modefmt uncomment `<path>` --from `<line>` --to `<line>` [--mode `<mode>`]
//!   modefmt list-modes

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use modefmt::{CodeEditor, EditorOptions, ModeRegistry, Pos, Range};

#[derive(Parser)]
#[command(name = "modefmt")]
#[command(version, about = "A tool for reformatting code with mode-aware rules")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Reformat a file (or a line range of it) and print the result
    Fmt {
        /// Path to the source file
        path: PathBuf,
        /// Mode name; inferred from the file extension when omitted
        #[arg(long)]
        mode: Option<String>,
        /// First line of the range (zero-based, inclusive)
        #[arg(long)]
        from: Option<usize>,
        /// Last line of the range (zero-based, inclusive)
        #[arg(long)]
        to: Option<usize>,
    },
    /// Reindent a file (or a line range of it) and print the result
    Indent {
        path: PathBuf,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        from: Option<usize>,
        #[arg(long)]
        to: Option<usize>,
    },
    /// Wrap a line range in the mode's comment delimiters
    Comment {
        path: PathBuf,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// Remove the comment delimiters found in a line range
    Uncomment {
        path: PathBuf,
        #[arg(long)]
        mode: Option<String>,
        #[arg(long)]
        from: usize,
        #[arg(long)]
        to: usize,
    },
    /// List available mode names
    ListModes,
}

fn main() {
    let args = Args::parse();
    match args.command {
        Command::Fmt {
            path,
            mode,
            from,
            to,
        } => {
            let mut editor = open_editor(&path, mode);
            let range = line_range(&editor, from, to);
            editor.reformat_range(range).unwrap_or_else(|e| {
                eprintln!("Reformat error: {}", e);
                std::process::exit(1);
            });
            print!("{}", editor.get_value());
        }
        Command::Indent {
            path,
            mode,
            from,
            to,
        } => {
            let mut editor = open_editor(&path, mode);
            let range = line_range(&editor, from, to);
            editor
                .auto_indent_range(range.from, range.to)
                .unwrap_or_else(|e| {
                    eprintln!("Indent error: {}", e);
                    std::process::exit(1);
                });
            print!("{}", editor.get_value());
        }
        Command::Comment {
            path,
            mode,
            from,
            to,
        } => toggle_comment(&path, mode, from, to, true),
        Command::Uncomment {
            path,
            mode,
            from,
            to,
        } => toggle_comment(&path, mode, from, to, false),
        Command::ListModes => {
            ModeRegistry::init_defaults();
            println!("Available modes:\n");
            for name in ModeRegistry::global().lock().unwrap().available() {
                println!("  {}", name);
            }
        }
    }
}

fn toggle_comment(path: &Path, mode: Option<String>, from: usize, to: usize, is_comment: bool) {
    let mut editor = open_editor(path, mode);
    let range = line_range(&editor, Some(from), Some(to));
    editor
        .comment_range(is_comment, range.from, range.to)
        .unwrap_or_else(|e| {
            eprintln!("Comment error: {}", e);
            std::process::exit(1);
        });
    print!("{}", editor.get_value());
}

fn open_editor(path: &Path, mode: Option<String>) -> CodeEditor {
    let source = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file: {}", e);
        std::process::exit(1);
    });
    let mode = mode.unwrap_or_else(|| mode_for_path(path).to_string());
    let options = EditorOptions {
        mode,
        ..Default::default()
    };
    CodeEditor::with_value(options, &source).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

/// Pick a mode from the file extension; script is the fallback.
fn mode_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("css") => "css",
        Some("json") => "json",
        Some("xml") | Some("svg") => "xml",
        Some("html") | Some("htm") => "html",
        _ => "script",
    }
}

/// Convert inclusive line bounds into a buffer range; defaults cover the
/// whole buffer.
fn line_range(editor: &CodeEditor, from: Option<usize>, to: Option<usize>) -> Range {
    let last_line = editor.buffer().line_count() - 1;
    let from_line = from.unwrap_or(0).min(last_line);
    let to_line = to.unwrap_or(last_line).min(last_line);
    let to_ch = editor.buffer().line(to_line).map(|l| l.len()).unwrap_or(0);
    Range::new(Pos::new(from_line, 0), Pos::new(to_line, to_ch))
}
