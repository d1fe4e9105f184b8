use lex::{LexError, LexErrorKind, Scanner, TokenKind};
use parser::{Expected, ParseError, ParseErrorKind, Parser, SourceFile, MAX_NESTING};

use std::path::PathBuf;

fn parse(input: &str) -> (Result<(), ParseError>, Vec<LexError>) {
    let mut parser = Parser::with_scanner(Scanner::new(input));
    let result = parser.parse();
    (result, parser.lex_errors().to_vec())
}

#[test]
fn sample_program_from_disk() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/sample.mc");
    let source_file = SourceFile::load(&path).expect("sample program should be readable");
    assert_eq!(source_file.path(), Some(path.as_path()));

    let mut parser = Parser::new(&source_file);
    assert_eq!(parser.parse(), Ok(()));
    assert!(parser.lex_errors().is_empty());
}

#[test]
fn missing_file() {
    assert!(SourceFile::load("tests/data/does-not-exist.mc").is_err());
}

#[test]
fn compact_program() {
    let (result, lex_errors) = parse("main{var{x:int;}x<-5;}");
    assert_eq!(result, Ok(()));
    assert!(lex_errors.is_empty());
}

#[test]
fn bare_equals_is_reported_and_parse_fails_at_the_value() {
    let source = "main {\n  var { x: int; }\n  x = 5;\n}";
    let (result, lex_errors) = parse(source);

    assert_eq!(lex_errors, vec![LexError::new(LexErrorKind::BareEquals, 3, 5)]);
    assert_eq!(result, Err(ParseError {
        line: 3,
        col: 7,
        kind: ParseErrorKind::UnexpectedToken {
            expected: Expected::Token(TokenKind::Assign),
            found: "5".to_string(),
        },
    }));
}

#[test]
fn unterminated_comment_ends_input() {
    let (result, lex_errors) = parse("/* unterminated");

    assert_eq!(lex_errors, vec![LexError::new(LexErrorKind::UnterminatedComment, 1, 1)]);
    let err = result.unwrap_err();
    assert!(err.is_end_of_input());
    assert_eq!(err.expected(), Some(Expected::Token(TokenKind::Main)));
    assert_eq!((err.line, err.col), (1, 16));
}

#[test]
fn fatal_error_is_reported_after_the_truncation_point() {
    let source = "main {\n  var { x: int; }\n  print(\"oops);\n  x <- 1;\n}";
    let (result, lex_errors) = parse(source);

    assert_eq!(lex_errors, vec![LexError::new(LexErrorKind::NewlineInString, 3, 9)]);
    let err = result.unwrap_err();
    assert!(err.is_end_of_input());
    assert_eq!(err.expected(), Some(Expected::OneOf(parser::first::PRINT_ARGUMENT)));
    assert!((err.line, err.col) >= (3, 9));
}

#[test]
fn unterminated_string_produces_no_token() {
    let (result, lex_errors) = parse("\"abc");

    assert_eq!(lex_errors, vec![LexError::new(LexErrorKind::UnterminatedString, 1, 1)]);
    assert!(result.unwrap_err().is_end_of_input());
}

#[test]
fn conditional_with_else() {
    let source = "main { var { x: int; y: int; }\n  if (x==1) then print(x); else print(y);\n}";
    let (result, _) = parse(source);
    assert_eq!(result, Ok(()));
}

#[test]
fn recoverable_lexical_errors_do_not_stop_the_parse() {
    let source = "main { var { x: int; } @ x <- 1; $ }";
    let (result, lex_errors) = parse(source);

    assert_eq!(result, Ok(()));
    assert_eq!(lex_errors, vec![
        LexError::new(LexErrorKind::InvalidCharacter('@'), 1, 24),
        LexError::new(LexErrorKind::InvalidCharacter('$'), 1, 34),
    ]);
}

#[test]
fn trailing_program_is_rejected() {
    let source = "main { var { x: int; } x <- 1; }\nmain { var { x: int; } x <- 1; }";
    let (result, _) = parse(source);

    assert_eq!(result, Err(ParseError {
        line: 2,
        col: 1,
        kind: ParseErrorKind::UnexpectedToken {
            expected: Expected::EndOfInput,
            found: "main".to_string(),
        },
    }));
}

#[test]
fn integer_with_trailing_dot() {
    let source = "main { var { x: int; } x <- 123.; }";
    let (result, lex_errors) = parse(source);

    assert_eq!(result, Ok(()));
    assert_eq!(lex_errors, vec![LexError::new(LexErrorKind::InvalidCharacter('.'), 1, 32)]);
}

#[test]
fn only_the_first_syntax_error_is_reported() {
    let source = "main { var { x int; } x <- ; }";
    let (result, _) = parse(source);

    assert_eq!(result, Err(ParseError {
        line: 1,
        col: 16,
        kind: ParseErrorKind::UnexpectedToken {
            expected: Expected::Token(TokenKind::Colon),
            found: "int".to_string(),
        },
    }));
}

#[test]
fn deeply_nested_parentheses_are_rejected() {
    let depth = 10_000;
    let source = format!(
        "main {{ var {{ x: int; }} x <- {}1{}; }}",
        "(".repeat(depth),
        ")".repeat(depth),
    );
    let (result, _) = parse(&source);

    // The first '(' sits at column 29; the one past the limit is rejected.
    assert_eq!(result, Err(ParseError {
        line: 1,
        col: 29 + MAX_NESTING,
        kind: ParseErrorKind::NestingTooDeep { limit: MAX_NESTING },
    }));
}
