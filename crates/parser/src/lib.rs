mod errors;
pub mod first;

pub use crate::errors::{Expected, ParseError, ParseErrorKind};
pub use crate::first::TokenSet;

use crate::first::{
    ADDITIVE, FACTOR, LOGICAL_OPERATOR, MULTIPLICATIVE, PRINT_ARGUMENT, RELATIONAL_OPERATOR,
    RELATIONAL_TERM, STATEMENT, STEP, TYPE,
};

use lex::{LexError, Scanner, Token, TokenKind};

use std::path::{Path, PathBuf};

pub struct SourceFile {
    path: Option<PathBuf>,
    content: String,
}

impl SourceFile {
    pub fn new(content: String) -> Self {
        Self {
            path: None,
            content,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;

        let source_file = Self {
            path: Some(path.as_ref().into()),
            content,
        };

        Ok(source_file)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

/// How deeply blocks, conditionals, loops and parenthesised expressions may nest before the
/// parser gives up with [`ParseErrorKind::NestingTooDeep`].
pub const MAX_NESTING: usize = 256;

/// Recursive-descent recognizer for MC programs.
///
/// Each grammar rule is one `parse_*` method that consumes exactly the tokens its production
/// needs. The parser holds a single token of lookahead, never rewinds, and stops at the first
/// syntax error.
pub struct Parser<'a> {
    scanner: Scanner<'a>,
    next_token: Option<Token<'a>>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source_file: &'a SourceFile) -> Self {
        Self::with_scanner(Scanner::new(source_file.content()))
    }

    pub fn with_scanner(mut scanner: Scanner<'a>) -> Self {
        let next_token = scanner.next_token();

        Self {
            scanner,
            next_token,
            depth: 0,
        }
    }

    /// Recognizes one complete program. Anything left over after the closing brace of `main`
    /// is an error.
    pub fn parse(&mut self) -> Result<(), ParseError> {
        self.parse_program()?;

        match self.next_token {
            Some(token) => Err(self.unexpected_token_error(Expected::EndOfInput, &token)),
            None => Ok(()),
        }
    }

    /// Lexical diagnostics recorded by the underlying scanner so far.
    pub fn lex_errors(&self) -> &[LexError] {
        self.scanner.errors()
    }

    fn parse_program(&mut self) -> Result<(), ParseError> {
        tracing::trace!("program");
        self.expect(TokenKind::Main)?;
        self.expect(TokenKind::LeftBrace)?;
        self.parse_body()?;
        self.expect(TokenKind::RightBrace)?;
        Ok(())
    }

    fn parse_body(&mut self) -> Result<(), ParseError> {
        tracing::trace!("body");
        self.parse_decl_section()?;
        self.parse_stmt_list()
    }

    fn parse_decl_section(&mut self) -> Result<(), ParseError> {
        tracing::trace!("decl_section");
        self.expect(TokenKind::Var)?;
        self.expect(TokenKind::LeftBrace)?;
        self.parse_decl_list()?;
        self.expect(TokenKind::RightBrace)?;
        Ok(())
    }

    fn parse_decl_list(&mut self) -> Result<(), ParseError> {
        tracing::trace!("decl_list");
        self.parse_decl()?;

        while self.check(TokenKind::Identifier) {
            self.parse_decl()?;
        }

        Ok(())
    }

    fn parse_decl(&mut self) -> Result<(), ParseError> {
        tracing::trace!("decl");
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Colon)?;
        self.parse_type()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_type(&mut self) -> Result<Token<'a>, ParseError> {
        tracing::trace!("type");
        self.expect_one_of(TYPE)
    }

    fn parse_stmt_list(&mut self) -> Result<(), ParseError> {
        tracing::trace!("stmt_list");
        self.parse_stmt()?;

        while self.check_any(STATEMENT) {
            self.parse_stmt()?;
        }

        Ok(())
    }

    fn parse_stmt(&mut self) -> Result<(), ParseError> {
        tracing::trace!("stmt");
        let Some(token) = self.next_token else {
            return Err(self.end_of_input_error(Expected::OneOf(STATEMENT)));
        };

        match token.kind {
            TokenKind::Identifier => self.parse_assign(),
            TokenKind::Input => self.parse_read(),
            TokenKind::Print => self.parse_write(),
            TokenKind::If => self.parse_cond(),
            TokenKind::While => self.parse_loop(),
            TokenKind::LeftBrace => self.parse_block(),
            _ => Err(self.unexpected_token_error(Expected::OneOf(STATEMENT), &token)),
        }
    }

    fn parse_assign(&mut self) -> Result<(), ParseError> {
        tracing::trace!("assign");
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Assign)?;
        self.parse_arith_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_read(&mut self) -> Result<(), ParseError> {
        tracing::trace!("read");
        self.expect(TokenKind::Input)?;
        self.expect(TokenKind::LeftParen)?;
        self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_write(&mut self) -> Result<(), ParseError> {
        tracing::trace!("write");
        self.expect(TokenKind::Print)?;
        self.expect(TokenKind::LeftParen)?;
        self.expect_one_of(PRINT_ARGUMENT)?;
        self.expect(TokenKind::RightParen)?;
        self.expect(TokenKind::Semicolon)?;
        Ok(())
    }

    fn parse_cond(&mut self) -> Result<(), ParseError> {
        tracing::trace!("cond");
        self.nested(|parser| {
            parser.expect(TokenKind::If)?;
            parser.parse_rel_expr()?;
            parser.expect(TokenKind::Then)?;
            parser.parse_stmt()?;

            // A dangling `else` binds to the innermost `if`.
            if parser.matches(TokenKind::Else).is_some() {
                parser.parse_stmt()?;
            }

            Ok(())
        })
    }

    fn parse_loop(&mut self) -> Result<(), ParseError> {
        tracing::trace!("loop");
        self.nested(|parser| {
            parser.expect(TokenKind::While)?;
            parser.parse_rel_expr()?;
            parser.parse_stmt()
        })
    }

    fn parse_block(&mut self) -> Result<(), ParseError> {
        tracing::trace!("block");
        self.nested(|parser| {
            parser.expect(TokenKind::LeftBrace)?;
            parser.parse_stmt_list()?;
            parser.expect(TokenKind::RightBrace)?;
            Ok(())
        })
    }

    fn parse_arith_expr(&mut self) -> Result<(), ParseError> {
        tracing::trace!("arith_expr");
        self.parse_term()?;

        while self.matches_any(ADDITIVE).is_some() {
            self.parse_term()?;
        }

        Ok(())
    }

    fn parse_term(&mut self) -> Result<(), ParseError> {
        tracing::trace!("term");
        self.parse_factor()?;

        while self.matches_any(MULTIPLICATIVE).is_some() {
            self.parse_factor()?;
        }

        Ok(())
    }

    fn parse_factor(&mut self) -> Result<(), ParseError> {
        tracing::trace!("factor");
        let Some(token) = self.next_token else {
            return Err(self.end_of_input_error(Expected::OneOf(FACTOR)));
        };

        match token.kind {
            TokenKind::NumInt | TokenKind::NumReal => {
                self.consume();
            }
            TokenKind::Identifier => {
                self.consume();
                // `x++` and `x--` are factors in their own right.
                self.skip_any(STEP);
            }
            TokenKind::LeftParen => {
                self.nested(|parser| {
                    parser.consume();
                    parser.parse_arith_expr()?;
                    parser.expect(TokenKind::RightParen)?;
                    Ok(())
                })?;
            }
            _ => return Err(self.unexpected_token_error(Expected::OneOf(FACTOR), &token)),
        }

        Ok(())
    }

    fn parse_rel_expr(&mut self) -> Result<(), ParseError> {
        tracing::trace!("rel_expr");
        self.parse_rel_term()?;

        while self.check_any(LOGICAL_OPERATOR) {
            self.parse_logical_op()?;
            self.parse_rel_term()?;
        }

        Ok(())
    }

    fn parse_rel_term(&mut self) -> Result<(), ParseError> {
        tracing::trace!("rel_term");

        // In this position a leading '(' always opens a relational expression, never an
        // arithmetic grouping.
        if self.check(TokenKind::LeftParen) {
            return self.nested(|parser| {
                parser.consume();
                parser.parse_rel_expr()?;
                parser.expect(TokenKind::RightParen)?;
                Ok(())
            });
        }

        if !self.check_any(RELATIONAL_TERM) {
            return Err(self.error_at_next_token(Expected::OneOf(RELATIONAL_TERM)));
        }

        self.parse_arith_expr()?;
        self.parse_rel_op()?;
        self.parse_arith_expr()
    }

    fn parse_rel_op(&mut self) -> Result<Token<'a>, ParseError> {
        tracing::trace!("rel_op");
        self.expect_one_of(RELATIONAL_OPERATOR)
    }

    // `NAO` is accepted as an infix operator alongside `E` and `OU`.
    fn parse_logical_op(&mut self) -> Result<Token<'a>, ParseError> {
        tracing::trace!("logical_op");
        self.expect_one_of(LOGICAL_OPERATOR)
    }

    // Runs a rule that opens one more level of nesting. The check happens before anything is
    // consumed, so the error points at the token that would have gone too deep.
    fn nested<F>(&mut self, rule: F) -> Result<(), ParseError>
    where F: FnOnce(&mut Self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.nesting_error());
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;
        result
    }

    fn consume(&mut self) -> Option<Token<'a>> {
        let token = self.next_token;
        self.next_token = self.scanner.next_token();
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.next_token.is_some_and(|token| token.kind == kind)
    }

    fn check_any(&self, set: TokenSet) -> bool {
        self.next_token.is_some_and(|token| set.contains(token.kind))
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token<'a>, ParseError> {
        self.expect_if(Expected::Token(kind), |k| k == kind)
    }

    fn expect_one_of(&mut self, set: TokenSet) -> Result<Token<'a>, ParseError> {
        self.expect_if(Expected::OneOf(set), |k| set.contains(k))
    }

    fn expect_if<F>(&mut self, expected: Expected, f: F) -> Result<Token<'a>, ParseError>
    where F: Fn(TokenKind) -> bool {
        match self.next_token {
            Some(token) if f(token.kind) => {
                self.consume();
                Ok(token)
            }
            Some(token) => Err(self.unexpected_token_error(expected, &token)),
            None => Err(self.end_of_input_error(expected)),
        }
    }

    fn matches(&mut self, kind: TokenKind) -> Option<Token<'a>> {
        if self.check(kind) {
            self.consume()
        } else {
            None
        }
    }

    fn matches_any(&mut self, set: TokenSet) -> Option<Token<'a>> {
        if self.check_any(set) {
            self.consume()
        } else {
            None
        }
    }

    // Consumes the lookahead if it belongs to `set`; absence is not an error.
    fn skip_any(&mut self, set: TokenSet) {
        if self.check_any(set) {
            self.consume();
        }
    }

    fn error_at_next_token(&self, expected: Expected) -> ParseError {
        match &self.next_token {
            Some(token) => self.unexpected_token_error(expected, token),
            None => self.end_of_input_error(expected),
        }
    }

    fn unexpected_token_error(&self, expected: Expected, token: &Token<'a>) -> ParseError {
        ParseError {
            line: token.line,
            col: token.col,
            kind: ParseErrorKind::UnexpectedToken {
                expected,
                found: token.text.to_string(),
            },
        }
    }

    fn end_of_input_error(&self, expected: Expected) -> ParseError {
        let (line, col) = self.scanner.position();
        ParseError {
            line,
            col,
            kind: ParseErrorKind::UnexpectedEndOfInput { expected },
        }
    }

    fn nesting_error(&self) -> ParseError {
        let (line, col) = match &self.next_token {
            Some(token) => (token.line, token.col),
            None => self.scanner.position(),
        };
        ParseError {
            line,
            col,
            kind: ParseErrorKind::NestingTooDeep { limit: MAX_NESTING },
        }
    }
}
