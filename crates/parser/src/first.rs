use lex::TokenKind;

/// A named group of token kinds, used both to branch on the lookahead and to describe what a
/// rule would have accepted when it fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TokenSet {
    pub name: &'static str,
    pub kinds: &'static [TokenKind],
}

impl TokenSet {
    pub const fn new(name: &'static str, kinds: &'static [TokenKind]) -> Self {
        Self { name, kinds }
    }

    pub fn contains(&self, kind: TokenKind) -> bool {
        self.kinds.contains(&kind)
    }
}

pub const TYPE: TokenSet = TokenSet::new("a type", &[TokenKind::Int, TokenKind::Real]);

pub const STATEMENT: TokenSet = TokenSet::new("a statement", &[
    TokenKind::Identifier,
    TokenKind::Input,
    TokenKind::Print,
    TokenKind::If,
    TokenKind::While,
    TokenKind::LeftBrace,
]);

pub const PRINT_ARGUMENT: TokenSet = TokenSet::new(
    "an identifier or string",
    &[TokenKind::Identifier, TokenKind::String],
);

pub const FACTOR: TokenSet = TokenSet::new("a factor", &[
    TokenKind::NumInt,
    TokenKind::NumReal,
    TokenKind::Identifier,
    TokenKind::LeftParen,
]);

// Same kinds as a factor; a relational term either opens a parenthesised relational
// expression or starts with an arithmetic one.
pub const RELATIONAL_TERM: TokenSet = TokenSet::new("a relational expression", FACTOR.kinds);

pub const ADDITIVE: TokenSet = TokenSet::new("'+' or '-'", &[TokenKind::Plus, TokenKind::Minus]);

pub const MULTIPLICATIVE: TokenSet = TokenSet::new(
    "'*' or '/'",
    &[TokenKind::Star, TokenKind::Slash],
);

pub const STEP: TokenSet = TokenSet::new(
    "'++' or '--'",
    &[TokenKind::Increment, TokenKind::Decrement],
);

pub const RELATIONAL_OPERATOR: TokenSet = TokenSet::new("a relational operator", &[
    TokenKind::EqEq,
    TokenKind::BangEq,
    TokenKind::GreaterThan,
    TokenKind::GreaterThanEq,
    TokenKind::LessThan,
    TokenKind::LessThanEq,
]);

pub const LOGICAL_OPERATOR: TokenSet = TokenSet::new(
    "a logical operator",
    &[TokenKind::And, TokenKind::Or, TokenKind::Not],
);
