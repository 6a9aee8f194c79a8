//! DOT parser for building transition graphs
//!
//! Only edge statements contribute to the result. Each `a -> b` pair becomes one edge whose
//! label is the statement's first `label` attribute, or the destination id when the
//! statement has none. Node statements, attribute statements and `id = id` assignments are
//! parsed and ignored; subgraph bodies are parsed and their edges kept.

use crate::graph::DirectedGraph;
use crate::{Result, TraceGenError};

/// Parsed DOT document
#[derive(Clone, Debug, PartialEq)]
pub struct DotGraph {
    /// Graph id, if any
    pub name: Option<String>,
    /// `strict` keyword present
    pub strict: bool,
    /// `digraph` rather than `graph`
    pub directed: bool,
    /// Edges found in the document
    pub graph: DirectedGraph<String, String>,
}

/// Lexical token kinds
#[derive(Clone, Debug, PartialEq)]
enum TokenKind {
    /// Identifier, numeral, quoted or HTML string
    Id { text: String, quoted: bool },
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Semicolon,
    Comma,
    Colon,
    Equals,
    /// `->` or `--`
    EdgeOp,
    Eof,
}

#[derive(Clone, Debug)]
struct Token {
    kind: TokenKind,
    line: usize,
    column: usize,
}

fn error_at(line: usize, column: usize, message: impl Into<String>) -> TraceGenError {
    TraceGenError::Parse {
        line,
        column,
        message: message.into(),
    }
}

/// Character-level tokenizer
struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    fn new(input: &str) -> Self {
        Lexer {
            chars: input.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        loop {
            self.skip_trivia()?;
            let (line, column) = (self.line, self.column);

            let Some(ch) = self.peek_char() else {
                tokens.push(Token { kind: TokenKind::Eof, line, column });
                return Ok(tokens);
            };

            let kind = match ch {
                '{' => self.single(TokenKind::LBrace),
                '}' => self.single(TokenKind::RBrace),
                '[' => self.single(TokenKind::LBracket),
                ']' => self.single(TokenKind::RBracket),
                ';' => self.single(TokenKind::Semicolon),
                ',' => self.single(TokenKind::Comma),
                ':' => self.single(TokenKind::Colon),
                '=' => self.single(TokenKind::Equals),
                '-' if matches!(self.peek_at(1), Some('>') | Some('-')) => {
                    self.consume_char();
                    self.consume_char();
                    TokenKind::EdgeOp
                }
                '"' => self.quoted_string()?,
                '<' => self.html_string()?,
                c if c.is_ascii_digit() || c == '.' || c == '-' => self.numeral()?,
                c if c.is_alphabetic() || c == '_' || !c.is_ascii() => self.identifier(),
                other => {
                    return Err(error_at(line, column, format!("Unexpected character '{}'", other)));
                }
            };

            tokens.push(Token { kind, line, column });
        }
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.consume_char();
        kind
    }

    /// Skip whitespace and comments
    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match self.peek_char() {
                Some(c) if c.is_whitespace() => {
                    self.consume_char();
                }
                Some('#') => self.skip_line(),
                Some('/') if self.peek_at(1) == Some('/') => self.skip_line(),
                Some('/') if self.peek_at(1) == Some('*') => {
                    let (line, column) = (self.line, self.column);
                    self.consume_char();
                    self.consume_char();
                    loop {
                        match self.peek_char() {
                            None => return Err(error_at(line, column, "Unterminated block comment")),
                            Some('*') if self.peek_at(1) == Some('/') => {
                                self.consume_char();
                                self.consume_char();
                                break;
                            }
                            Some(_) => {
                                self.consume_char();
                            }
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    fn skip_line(&mut self) {
        while let Some(c) = self.peek_char() {
            if c == '\n' {
                break;
            }
            self.consume_char();
        }
    }

    /// Quoted string, with `"a" + "b"` concatenation
    fn quoted_string(&mut self) -> Result<TokenKind> {
        let mut text = self.quoted_part()?;

        loop {
            let saved = (self.pos, self.line, self.column);
            self.skip_trivia()?;
            if self.peek_char() == Some('+') {
                self.consume_char();
                self.skip_trivia()?;
                if self.peek_char() == Some('"') {
                    text.push_str(&self.quoted_part()?);
                    continue;
                }
                return Err(error_at(self.line, self.column, "Expected string after '+'"));
            }
            (self.pos, self.line, self.column) = saved;
            break;
        }

        Ok(TokenKind::Id { text, quoted: true })
    }

    fn quoted_part(&mut self) -> Result<String> {
        let (line, column) = (self.line, self.column);
        self.consume_char(); // opening quote
        let mut text = String::new();

        loop {
            match self.peek_char() {
                None => return Err(error_at(line, column, "Unterminated string")),
                Some('"') => {
                    self.consume_char();
                    return Ok(text);
                }
                Some('\\') if self.peek_at(1) == Some('"') => {
                    self.consume_char();
                    text.push(self.consume_char());
                }
                Some('\\') if self.peek_at(1) == Some('\n') => {
                    // Line continuation
                    self.consume_char();
                    self.consume_char();
                }
                Some(_) => text.push(self.consume_char()),
            }
        }
    }

    /// `<...>` string with balanced angle brackets; the outer pair is dropped
    fn html_string(&mut self) -> Result<TokenKind> {
        let (line, column) = (self.line, self.column);
        self.consume_char();
        let mut depth = 1usize;
        let mut text = String::new();

        while depth > 0 {
            match self.peek_char() {
                None => return Err(error_at(line, column, "Unterminated HTML string")),
                Some('<') => depth += 1,
                Some('>') => depth -= 1,
                Some(_) => {}
            }
            let ch = self.consume_char();
            if depth > 0 {
                text.push(ch);
            }
        }

        Ok(TokenKind::Id { text, quoted: true })
    }

    fn numeral(&mut self) -> Result<TokenKind> {
        let (line, column) = (self.line, self.column);
        let mut text = String::new();

        if self.peek_char() == Some('-') {
            text.push(self.consume_char());
        }

        let mut seen_digit = false;
        let mut seen_dot = false;
        while let Some(c) = self.peek_char() {
            if c.is_ascii_digit() {
                seen_digit = true;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
            text.push(self.consume_char());
        }

        if !seen_digit {
            return Err(error_at(line, column, format!("Malformed numeral '{}'", text)));
        }

        Ok(TokenKind::Id { text, quoted: false })
    }

    fn identifier(&mut self) -> TokenKind {
        let mut text = String::new();
        while let Some(c) = self.peek_char() {
            if c.is_alphanumeric() || c == '_' || !c.is_ascii() {
                text.push(self.consume_char());
            } else {
                break;
            }
        }
        TokenKind::Id { text, quoted: false }
    }

    // Helper methods

    fn peek_char(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn consume_char(&mut self) -> char {
        let ch = self.chars[self.pos];
        self.pos += 1;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }
}

/// Recursive-descent parser over DOT tokens
pub struct DotParser {
    tokens: Vec<Token>,
    pos: usize,
    graph: DirectedGraph<String, String>,
}

impl DotParser {
    /// Tokenize the input and prepare a parser
    pub fn new(input: &str) -> Result<Self> {
        Ok(DotParser {
            tokens: Lexer::new(input).tokenize()?,
            pos: 0,
            graph: DirectedGraph::new(),
        })
    }

    /// Parse a whole document
    pub fn parse(mut self) -> Result<DotGraph> {
        let strict = self.eat_keyword("strict");

        let directed = if self.eat_keyword("digraph") {
            true
        } else if self.eat_keyword("graph") {
            false
        } else {
            return Err(self.error("Expected 'graph' or 'digraph'"));
        };

        let name = match &self.peek().kind {
            TokenKind::Id { text, .. } => {
                let name = text.clone();
                self.advance();
                Some(name)
            }
            _ => None,
        };

        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_statement_list()?;
        self.expect(TokenKind::RBrace, "'}'")?;

        if self.peek().kind != TokenKind::Eof {
            return Err(self.error("Unexpected content after graph body"));
        }

        Ok(DotGraph {
            name,
            strict,
            directed,
            graph: self.graph,
        })
    }

    /// Parse statements until the closing brace
    fn parse_statement_list(&mut self) -> Result<()> {
        while !matches!(self.peek().kind, TokenKind::RBrace | TokenKind::Eof) {
            self.parse_statement()?;
            self.eat(&TokenKind::Semicolon);
        }
        Ok(())
    }

    fn parse_statement(&mut self) -> Result<()> {
        if self.eat_keyword("subgraph") {
            if matches!(self.peek().kind, TokenKind::Id { .. }) {
                self.advance();
            }
            return self.parse_block();
        }
        if self.peek().kind == TokenKind::LBrace {
            return self.parse_block();
        }
        if self.eat_keyword("graph") || self.eat_keyword("node") || self.eat_keyword("edge") {
            self.parse_attribute_lists()?;
            return Ok(());
        }

        let first = self.expect_id()?;

        if self.eat(&TokenKind::Equals) {
            self.expect_id()?;
            return Ok(());
        }

        self.skip_port()?;

        let mut vertices = vec![first];
        while self.eat(&TokenKind::EdgeOp) {
            if self.peek().kind == TokenKind::LBrace || self.peek_keyword("subgraph") {
                return Err(self.error("Subgraph edge endpoints are not supported"));
            }
            vertices.push(self.expect_id()?);
            self.skip_port()?;
        }

        let attributes = self.parse_attribute_lists()?;

        if vertices.len() > 1 {
            let label = attributes
                .iter()
                .find(|(key, _)| key == "label")
                .map(|(_, value)| value.clone());

            for pair in vertices.windows(2) {
                let from = pair[0].clone();
                let to = pair[1].clone();
                let label = label.clone().unwrap_or_else(|| to.clone());
                self.graph.add_edge(from, to, label);
            }
        }

        Ok(())
    }

    /// `{ stmt_list }`
    fn parse_block(&mut self) -> Result<()> {
        self.expect(TokenKind::LBrace, "'{'")?;
        self.parse_statement_list()?;
        self.expect(TokenKind::RBrace, "'}'")
    }

    /// Zero or more `[ key = value, ... ]` lists, flattened in order
    fn parse_attribute_lists(&mut self) -> Result<Vec<(String, String)>> {
        let mut attributes = Vec::new();

        while self.eat(&TokenKind::LBracket) {
            while self.peek().kind != TokenKind::RBracket {
                let key = self.expect_id()?;
                let value = if self.eat(&TokenKind::Equals) {
                    self.expect_id()?
                } else {
                    "true".to_string()
                };
                attributes.push((key, value));

                if !self.eat(&TokenKind::Comma) {
                    self.eat(&TokenKind::Semicolon);
                }
            }
            self.expect(TokenKind::RBracket, "']'")?;
        }

        Ok(attributes)
    }

    /// `:port[:compass]`
    fn skip_port(&mut self) -> Result<()> {
        if self.eat(&TokenKind::Colon) {
            self.expect_id()?;
            if self.eat(&TokenKind::Colon) {
                self.expect_id()?;
            }
        }
        Ok(())
    }

    // Helper methods

    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn advance(&mut self) {
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if &self.peek().kind == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn peek_keyword(&self, keyword: &str) -> bool {
        matches!(
            &self.peek().kind,
            TokenKind::Id { text, quoted: false } if text.eq_ignore_ascii_case(keyword)
        )
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.peek_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<()> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(self.error(format!("Expected {}", what)))
        }
    }

    fn expect_id(&mut self) -> Result<String> {
        match &self.peek().kind {
            TokenKind::Id { text, .. } => {
                let text = text.clone();
                self.advance();
                Ok(text)
            }
            _ => Err(self.error("Expected identifier")),
        }
    }

    fn error(&self, message: impl Into<String>) -> TraceGenError {
        let token = self.peek();
        error_at(token.line, token.column, message)
    }
}

/// Parse DOT text into its edge graph
pub fn parse_dot(input: &str) -> Result<DirectedGraph<String, String>> {
    Ok(DotParser::new(input)?.parse()?.graph)
}

/// Parse DOT text, keeping the document header
pub fn parse_dot_document(input: &str) -> Result<DotGraph> {
    DotParser::new(input)?.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(graph: &DirectedGraph<String, String>) -> Vec<(String, String, String)> {
        graph
            .edges()
            .map(|(f, t, l)| (f.clone(), t.clone(), l.clone()))
            .collect()
    }

    fn edge(from: &str, to: &str, label: &str) -> (String, String, String) {
        (from.to_string(), to.to_string(), label.to_string())
    }

    #[test]
    fn test_simple_edges() {
        let graph = parse_dot("digraph G { A -> B [label=\"x\"]; A -> C [label=y] B -> C }").unwrap();

        assert_eq!(
            edges(&graph),
            vec![edge("A", "B", "x"), edge("A", "C", "y"), edge("B", "C", "C")]
        );
    }

    #[test]
    fn test_chain_and_first_label() {
        let graph = parse_dot("digraph { a -> b -> c [label=go, label=stop] }").unwrap();
        assert_eq!(edges(&graph), vec![edge("a", "b", "go"), edge("b", "c", "go")]);
    }

    #[test]
    fn test_header() {
        let doc = parse_dot_document("strict digraph \"my graph\" { x -> y }").unwrap();
        assert!(doc.strict);
        assert!(doc.directed);
        assert_eq!(doc.name.as_deref(), Some("my graph"));
        assert_eq!(doc.graph.edge_count(), 1);
    }

    #[test]
    fn test_ignored_statements_and_comments() {
        let input = r#"
            // transitions
            digraph states {
                rankdir = LR;
                node [shape=circle];
                idle [label="Idle"];  # a node statement
                /* block
                   comment */
                idle -> running [label="start" color=red];
                subgraph cluster_0 { running -> idle [label="stop"] }
            }
        "#;
        let graph = parse_dot(input).unwrap();

        assert_eq!(
            edges(&graph),
            vec![edge("idle", "running", "start"), edge("running", "idle", "stop")]
        );
    }

    #[test]
    fn test_quoted_ids_and_concatenation() {
        let graph = parse_dot(r#"digraph { "a b" -> "c\"d" [label="x" + "y"] }"#).unwrap();
        assert_eq!(edges(&graph), vec![edge("a b", "c\"d", "xy")]);
    }

    #[test]
    fn test_ports_and_numerals() {
        let graph = parse_dot("graph { 1:n -- 2.5:s:e; -3 -- 1 }").unwrap();
        assert_eq!(edges(&graph), vec![edge("1", "2.5", "2.5"), edge("-3", "1", "1")]);
    }

    #[test]
    fn test_empty_graph() {
        let graph = parse_dot("digraph {}").unwrap();
        assert!(graph.is_empty());
    }

    #[test]
    fn test_syntax_error_position() {
        let err = parse_dot("digraph {\n  A -> ;\n}").unwrap_err();
        match err {
            TraceGenError::Parse { line, column, .. } => {
                assert_eq!(line, 2);
                assert_eq!(column, 8);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_header() {
        assert!(parse_dot("A -> B").is_err());
        assert!(parse_dot("digraph { A -> B").is_err());
        assert!(parse_dot("digraph { \"open }").is_err());
    }
}
