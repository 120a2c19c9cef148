/// Parse a token stream into an unresolved expression.
///
/// The tree is the flat output of the recursive-descent parser: relation markers and operator symbols are still plain
/// leaves. Use [`parse`] or [`parse_with_config`] for a resolved tree.
///
/// ## Parameters
/// - `tokens`: Token stream produced by `textalk_syntax::lexer`.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse_tokens(tokens: Vec<Token>) -> ParseResult {
    let (root, errors) = Parser::new(TokenStream::new(tokens)).parse();
    ParseResult { root, errors }
}

/// Lex, parse and resolve a TexTalk statement with the default configuration.
///
/// ## Examples
/// ```rust
/// use textalk_syntax::ast::{NodeKind, TexTalkNode};
///
/// let result = textalk_syntax::parse("a + b * c");
/// assert!(result.is_ok());
/// assert_eq!(result.root.children.len(), 1);
/// assert_eq!(result.root.children[0].kind(), NodeKind::Operator);
/// assert_eq!(result.root.to_code(), "a + b * c");
/// ```
pub fn parse(text: &str) -> ParseResult {
    parse_with_config(text, &ParseConfig::default())
}

/// Lex, parse and resolve a TexTalk statement.
///
/// Lexical and syntax diagnostics are accumulated. Resolution is fail-fast: if a resolver pass rejects the tree, the
/// returned root is an empty expression and the resolver's diagnostic is appended to the earlier ones.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn parse_with_config(text: &str, config: &ParseConfig) -> ParseResult {
    let lexed = lexer::lex(text);
    let mut errors = lexed.errors;

    let raw = parse_tokens(lexed.tokens);
    errors.extend(raw.errors);

    let root = match resolver::resolve(&raw.root, config) {
        Ok(root) => root,
        Err(err) => {
            tracing::debug!(error = %err, "resolution aborted");
            errors.push(err);
            ExpressionNode::default()
        }
    };

    ParseResult { root, errors }
}
