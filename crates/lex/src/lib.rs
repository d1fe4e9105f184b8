mod errors;
mod token;

pub use crate::errors::{LexError, LexErrorKind};
pub use crate::token::{Token, TokenKind};

#[derive(Clone, Copy, Debug)]
struct Cursor {
    pos: usize,
    line: usize,
    col: usize,
}

impl Cursor {
    fn new(pos: usize, line: usize, col: usize) -> Self {
        Self {
            pos,
            line,
            col,
        }
    }

    fn start() -> Self {
        Self::new(0, 1, 1)
    }
}

/// Turns MC source text into tokens, one per call to [`Scanner::next_token`].
///
/// Lexical problems never abort a call by themselves. Recoverable ones (a stray character,
/// a lone `=` or `!`) are recorded and the offending character is skipped. Fatal ones (an
/// unclosed block comment or string) are recorded and halt the scanner, after which every
/// call yields `None`.
pub struct Scanner<'a> {
    input: &'a str,
    cursor: Cursor,
    token: Cursor,
    errors: Vec<LexError>,
    halted: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::start(),
            token: Cursor::start(),
            errors: Vec::new(),
            halted: false,
        }
    }

    pub fn next_token(&mut self) -> Option<Token<'a>> {
        if self.halted {
            return None;
        }

        while let Some(c) = self.peek() {
            self.token = self.cursor;

            self.consume();

            let kind = match c {
                _ if c.is_whitespace() => continue,
                '#' => {
                    self.consume_while(|c| c != '\n' && c != '\r');
                    continue;
                }
                '/' if self.matches('*') => {
                    if self.skip_block_comment() {
                        continue;
                    }
                    return self.halt(LexErrorKind::UnterminatedComment);
                }
                '=' => {
                    if self.matches('=') {
                        TokenKind::EqEq
                    } else {
                        self.report(LexErrorKind::BareEquals);
                        continue;
                    }
                }
                '!' => {
                    if self.matches('=') {
                        TokenKind::BangEq
                    } else {
                        self.report(LexErrorKind::BareBang);
                        continue;
                    }
                }
                '>' => {
                    if self.matches('=') {
                        TokenKind::GreaterThanEq
                    } else {
                        TokenKind::GreaterThan
                    }
                }
                '<' => {
                    if self.matches('=') {
                        TokenKind::LessThanEq
                    } else if self.matches('-') {
                        TokenKind::Assign
                    } else {
                        TokenKind::LessThan
                    }
                }
                '+' => {
                    if self.matches('+') {
                        TokenKind::Increment
                    } else {
                        TokenKind::Plus
                    }
                }
                '-' => {
                    if self.matches('-') {
                        TokenKind::Decrement
                    } else {
                        TokenKind::Minus
                    }
                }
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '{' => TokenKind::LeftBrace,
                '}' => TokenKind::RightBrace,
                ':' => TokenKind::Colon,
                ';' => TokenKind::Semicolon,
                '"' => return self.read_string(),
                '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                    self.consume_while(|c| c.is_ascii_digit());
                    TokenKind::NumReal
                }
                '0'..='9' => self.read_number(),
                c if is_identifier_start(c) => self.read_identifier(),
                _ => {
                    self.report(LexErrorKind::InvalidCharacter(c));
                    continue;
                }
            };

            let token = self.create_token(kind);
            tracing::trace!(%token, "scanned");
            return Some(token);
        }

        None
    }

    /// Diagnostics recorded so far, in source order.
    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Line and column of the next unconsumed character.
    pub fn position(&self) -> (usize, usize) {
        (self.cursor.line, self.cursor.col)
    }

    fn create_token(&self, kind: TokenKind) -> Token<'a> {
        Token::new(kind, self.current_lexeme(), self.token.line, self.token.col)
    }

    fn report(&mut self, kind: LexErrorKind) {
        let error = LexError::new(kind, self.token.line, self.token.col);
        tracing::debug!(%error, "lexical error");
        self.errors.push(error);
    }

    fn halt(&mut self, kind: LexErrorKind) -> Option<Token<'a>> {
        self.report(kind);
        self.halted = true;
        tracing::debug!(line = self.cursor.line, col = self.cursor.col, "scanner halted");
        None
    }

    fn peek(&self) -> Option<char> {
        self.input[self.cursor.pos..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.input[self.cursor.pos..].chars().nth(1)
    }

    fn consume(&mut self) {
        if let Some(c) = self.peek() {
            if c == '\n' {
                self.cursor.line += 1;
                self.cursor.col = 1;
            } else {
                self.cursor.col += 1;
            }
            self.cursor.pos += c.len_utf8();
        }
    }

    fn consume_while<F>(&mut self, func: F) where F: Fn(char) -> bool {
        while let Some(c) = self.peek() {
            if func(c) {
                self.consume()
            } else {
                break
            }
        }
    }

    fn matches(&mut self, c: char) -> bool {
        match self.peek() {
            Some(p) if p == c => {
                self.consume();
                true
            }
            _ => false,
        }
    }

    fn current_lexeme(&self) -> &'a str {
        &self.input[self.token.pos..self.cursor.pos]
    }

    // Called with the opening `/*` already consumed. Returns false if the input ran out first.
    fn skip_block_comment(&mut self) -> bool {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some('*'), Some('/')) => {
                    self.consume();
                    self.consume();
                    return true;
                }
                (Some(_), _) => self.consume(),
                (None, _) => return false,
            }
        }
    }

    fn read_number(&mut self) -> TokenKind {
        self.consume_while(|c| c.is_ascii_digit());

        // A dot only belongs to the literal when a digit follows it. `123.` leaves the dot
        // behind to be reported as an invalid character by the next call.
        let fraction = self.peek() == Some('.')
            && self.peek_second().is_some_and(|c| c.is_ascii_digit());
        if !fraction {
            return TokenKind::NumInt;
        }

        self.consume();
        self.consume_while(|c| c.is_ascii_digit());
        TokenKind::NumReal
    }

    fn read_string(&mut self) -> Option<Token<'a>> {
        loop {
            match self.peek() {
                Some('"') => break,
                Some('\n') => return self.halt(LexErrorKind::NewlineInString),
                Some(_) => self.consume(),
                None => return self.halt(LexErrorKind::UnterminatedString),
            }
        }

        // The lexeme is the contents between the quotes.
        let text = &self.input[self.token.pos + 1..self.cursor.pos];
        self.consume();

        let token = Token::new(TokenKind::String, text, self.token.line, self.token.col);
        tracing::trace!(%token, "scanned");
        Some(token)
    }

    fn read_identifier(&mut self) -> TokenKind {
        self.consume_while(is_identifier_char);
        TokenKind::keyword(self.current_lexeme()).unwrap_or(TokenKind::Identifier)
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_identifier_char(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}
