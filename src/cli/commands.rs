//! Command implementations for the `mathlingua` CLI.
//!
//! Every command reads one TexTalk statement, prints its result on stdout and hands any diagnostics back to
//! [`run`](super::run) as a [`CliError`] so the process exits with status 1.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use textalk_core::lang::{keywords, markers, punctuation};
use textalk_syntax::lexer::{self, Token, TokenKind};
use textalk_syntax::{ParseConfig, ParseError, ParseResult};

use super::{CliError, CliResult, ExitCode};

/// Maximum input size (1 MB). A TexTalk statement is a single line of math; anything larger is a mistake.
const MAX_SOURCE_SIZE: u64 = 1024 * 1024;

/// How far `parse`/`code` resolve the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResolveOptions {
    /// Stop after parsing; no relation or operator resolution.
    pub raw: bool,
    /// Resolve relations but leave operators flat.
    pub no_operators: bool,
}

impl ResolveOptions {
    pub fn to_config(self) -> ParseConfig {
        if self.raw {
            ParseConfig::raw()
        } else if self.no_operators {
            ParseConfig::default().with_operators(false)
        } else {
            ParseConfig::default()
        }
    }
}

// ============================================================================
// Input
// ============================================================================

/// Read the statement text from `--file` or the positional argument.
pub fn read_input(text: Option<String>, file: Option<&Path>) -> CliResult<String> {
    match (text, file) {
        (_, Some(path)) => read_source(path),
        (Some(text), None) => Ok(text),
        (None, None) => Err(CliError::failure("Error: expected TEXT or --file <PATH>")),
    }
}

/// Read a statement file, rejecting oversized inputs before loading them.
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata = fs::metadata(path)
        .map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    let source = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))?;
    // Editors leave a trailing newline; it is not part of the statement.
    Ok(source.trim_end_matches(['\n', '\r']).to_string())
}

// ============================================================================
// Commands
// ============================================================================

/// Lex and display tokens.
pub fn lex_source(source: &str) -> CliResult<ExitCode> {
    let result = lexer::lex(source);
    print!("{}", format_tokens(&result.tokens));
    finish(source, &result.errors)
}

/// Parse and display the debug tree.
pub fn parse_source(source: &str, options: ResolveOptions) -> CliResult<ExitCode> {
    let result = run_parse(source, options);
    println!("{:#?}", result.root);
    finish(source, &result.errors)
}

/// Parse and display canonical code.
pub fn code_source(source: &str, options: ResolveOptions) -> CliResult<ExitCode> {
    let result = run_parse(source, options);
    println!("{}", result.root.to_code());
    finish(source, &result.errors)
}

fn run_parse(source: &str, options: ResolveOptions) -> ParseResult {
    let result = textalk_syntax::parse_with_config(source, &options.to_config());
    tracing::debug!(errors = result.errors.len(), ?options, "parsed statement");
    result
}

fn finish(source: &str, errors: &[ParseError]) -> CliResult<ExitCode> {
    if errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Err(CliError::failure(render_diagnostics(source, errors).trim_end()))
    }
}

// ============================================================================
// Formatting
// ============================================================================

/// One token per line: `row:col kind text`. The trailing `Eof` is omitted.
pub fn format_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    for token in tokens.iter().filter(|t| t.kind != TokenKind::Eof) {
        let _ = writeln!(out, "{} {} {}", token.location, kind_name(token.kind), token.text);
    }
    out
}

fn kind_name(kind: TokenKind) -> String {
    match kind {
        TokenKind::Keyword(id) => format!("keyword({})", keywords::as_str(id)),
        TokenKind::Punctuation(id) => format!("punctuation({})", punctuation::as_str(id)),
        TokenKind::Marker(id) => format!("marker({})", markers::as_str(id)),
        TokenKind::Identifier => "identifier".to_string(),
        TokenKind::Number => "number".to_string(),
        TokenKind::Operator => "operator".to_string(),
        TokenKind::Eof => "eof".to_string(),
    }
}

/// Render every diagnostic with miette against the statement text.
pub fn render_diagnostics(source: &str, errors: &[ParseError]) -> String {
    let mut out = String::new();
    for err in errors {
        let report = miette::Report::new(err.clone()).with_source_code(source.to_string());
        let _ = writeln!(out, "{report:?}");
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_tokens_lists_location_kind_and_text() {
        let result = lexer::lex(r"x \in/ A");
        let out = format_tokens(&result.tokens);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec![
                "0:0 identifier x",
                r"0:2 punctuation(\) \",
                "0:3 keyword(in) in",
                "0:5 operator /",
                "0:7 identifier A",
            ]
        );
    }

    #[test]
    fn test_format_tokens_skips_eof() {
        let result = lexer::lex("");
        assert_eq!(format_tokens(&result.tokens), "");
    }

    #[test]
    fn test_resolve_options_to_config() {
        let raw = ResolveOptions { raw: true, no_operators: false }.to_config();
        assert!(!raw.resolve_relations && !raw.resolve_operators);

        let relations_only = ResolveOptions { raw: false, no_operators: true }.to_config();
        assert!(relations_only.resolve_relations);
        assert!(!relations_only.resolve_operators);

        assert_eq!(ResolveOptions::default().to_config(), ParseConfig::default());
    }

    #[test]
    fn test_render_diagnostics_mentions_message() {
        let result = textalk_syntax::parse("a is b is c");
        let rendered = render_diagnostics("a is b is c", &result.errors);
        assert!(rendered.contains("can only contain one 'is' statement"), "{rendered}");
    }

    #[test]
    fn test_finish_fails_on_any_diagnostic() {
        assert_eq!(finish("a", &[]).unwrap(), ExitCode::SUCCESS);
        let err = finish("#", &lexer::lex("#").errors).unwrap_err();
        assert_eq!(err.exit_code, ExitCode::FAILURE);
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_read_input_prefers_text_when_no_file() {
        assert_eq!(read_input(Some("a + b".into()), None).unwrap(), "a + b");
        assert!(read_input(None, None).is_err());
    }

    #[test]
    fn test_read_source_missing_file() {
        let err = read_source(Path::new("/definitely/not/here.tex")).unwrap_err();
        assert!(err.message.contains("Cannot access file"));
    }

    #[test]
    fn test_read_source_strips_trailing_newline() {
        let path = std::env::temp_dir().join(format!("mathlingua_cli_{}.txt", std::process::id()));
        fs::write(&path, "x := 1\n").unwrap();
        let source = read_source(&path).unwrap();
        let _ = fs::remove_file(&path);
        assert_eq!(source, "x := 1");
    }
}
