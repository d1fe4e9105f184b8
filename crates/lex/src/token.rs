use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    Main,
    Var,
    Int,
    Real,
    Print,
    Input,
    If,
    Then,
    Else,
    While,

    // Logical keywords
    And,
    Or,
    Not,

    // Literals
    Identifier,
    NumInt,
    NumReal,
    String,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Increment,
    Decrement,

    // Comparisons
    EqEq,
    BangEq,
    GreaterThan,
    GreaterThanEq,
    LessThan,
    LessThanEq,

    // Assignment
    Assign,

    // Groupings
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,

    // Punctuation
    Colon,
    Semicolon,
}

impl TokenKind {
    /// Looks up a reserved word. Matching is exact, so `e` or `Main` are plain identifiers.
    pub fn keyword(text: &str) -> Option<TokenKind> {
        let kind = match text {
            "main" => TokenKind::Main,
            "var" => TokenKind::Var,
            "int" => TokenKind::Int,
            "real" => TokenKind::Real,
            "print" => TokenKind::Print,
            "input" => TokenKind::Input,
            "if" => TokenKind::If,
            "then" => TokenKind::Then,
            "else" => TokenKind::Else,
            "while" => TokenKind::While,
            "E" => TokenKind::And,
            "OU" => TokenKind::Or,
            "NAO" => TokenKind::Not,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Main => "MAIN",
            TokenKind::Var => "VAR",
            TokenKind::Int => "INT",
            TokenKind::Real => "REAL",
            TokenKind::Print => "PRINT",
            TokenKind::Input => "INPUT",
            TokenKind::If => "IF",
            TokenKind::Then => "THEN",
            TokenKind::Else => "ELSE",
            TokenKind::While => "WHILE",
            TokenKind::And => "E",
            TokenKind::Or => "OU",
            TokenKind::Not => "NAO",
            TokenKind::Identifier => "ID",
            TokenKind::NumInt => "NUMINT",
            TokenKind::NumReal => "NUMREAL",
            TokenKind::String => "CADEIA",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::Increment => "INC",
            TokenKind::Decrement => "DEC",
            TokenKind::EqEq => "EQ",
            TokenKind::BangEq => "NEQ",
            TokenKind::GreaterThan => "GT",
            TokenKind::GreaterThanEq => "GTE",
            TokenKind::LessThan => "LT",
            TokenKind::LessThanEq => "LTE",
            TokenKind::Assign => "ASSIGN_OP",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::LeftBrace => "LBRACE",
            TokenKind::RightBrace => "RBRACE",
            TokenKind::Colon => "COLON",
            TokenKind::Semicolon => "SEMICOLON",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub line: usize,
    pub col: usize,
}

impl<'a> Token<'a> {
    pub fn new(kind: TokenKind, text: &'a str, line: usize, col: usize) -> Self {
        Self {
            kind,
            text,
            line,
            col,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Token [type={}, text='{}', line={}, col={}]",
            self.kind, self.text, self.line, self.col
        )
    }
}
