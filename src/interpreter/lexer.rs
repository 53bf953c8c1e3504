use std::fmt;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in a submitted expression.
///
/// The alphabet is deliberately tiny: the digits `1` to `6`, six operators
/// and parentheses. Whitespace is skipped; everything else is a lexing
/// error.
#[derive(Logos, Debug, PartialEq, Eq, Clone, Copy)]
pub enum Token {
    /// A digit from `1` to `6`.
    #[regex(r"[1-6]", parse_digit)]
    Digit(u8),
    /// One of `+ - * / ^ !`.
    #[token("+", |_| Operator::Plus)]
    #[token("-", |_| Operator::Minus)]
    #[token("*", |_| Operator::Star)]
    #[token("/", |_| Operator::Slash)]
    #[token("^", |_| Operator::Caret)]
    #[token("!", |_| Operator::Bang)]
    Operator(Operator),
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// Whitespace between tokens.
    #[regex(r"\s+", logos::skip)]
    Ignored,
}

/// The operator characters a [`Token::Operator`] can carry.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Operator {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `^`
    Caret,
    /// `!`
    Bang,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),
            Self::Ignored => Ok(()),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Star => '*',
            Self::Slash => '/',
            Self::Caret => '^',
            Self::Bang => '!',
        };
        write!(f, "{symbol}")
    }
}

/// Parses a digit literal from the current token slice.
fn parse_digit(lex: &logos::Lexer<Token>) -> Option<u8> {
    lex.slice().parse().ok()
}

/// Converts raw message text into positioned tokens.
///
/// The text may be wrapped in one matching pair of backticks, which is
/// stripped first (surrounding whitespace allowed). Any other backtick,
/// including a lone opening or closing one, is reported as an invalid
/// character.
///
/// # Parameters
/// - `source`: The raw submitted text.
///
/// # Returns
/// `(Token, position)` pairs in source order, where `position` is the
/// 0-based character index into `source`.
///
/// # Errors
/// - [`ParseError::InvalidCharacter`] for the first character outside the
///   alphabet.
/// - [`ParseError::Empty`] if nothing but whitespace and the backtick pair
///   remains.
///
/// # Example
/// ```
/// use sixcount::{
///     error::ParseError,
///     interpreter::lexer::{Operator, Token, tokenize},
/// };
///
/// let tokens = tokenize("`3 + 4`").unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Digit(3), 1),
///                 (Token::Operator(Operator::Plus), 3),
///                 (Token::Digit(4), 5)]);
///
/// assert_eq!(tokenize("3 + 7"),
///            Err(ParseError::InvalidCharacter { character: '7',
///                                               position:  4, }));
/// assert_eq!(tokenize(" `` "), Err(ParseError::Empty));
/// ```
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let (body, offset) = strip_backticks(source);
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(body);

    while let Some(token) = lexer.next() {
        let start = offset + lexer.span().start;
        let position = source[..start].chars().count();
        match token {
            Ok(tok) => tokens.push((tok, position)),
            Err(()) => {
                let character = source[start..].chars()
                                               .next()
                                               .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseError::InvalidCharacter { character,
                                                          position });
            },
        }
    }

    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    Ok(tokens)
}

/// Rejects a token sequence in which any digit occurs twice.
///
/// # Errors
/// Returns [`ParseError::RepeatedDigit`] at the second occurrence of the
/// first repeated digit.
pub fn ensure_unique_digits(tokens: &[(Token, usize)]) -> Result<(), ParseError> {
    let mut seen = [false; 7];
    for (token, position) in tokens {
        if let Token::Digit(digit) = token {
            let slot = &mut seen[usize::from(*digit)];
            if *slot {
                return Err(ParseError::RepeatedDigit { digit:    *digit,
                                                       position: *position, });
            }
            *slot = true;
        }
    }
    Ok(())
}

/// Splits off one wrapping pair of backticks.
///
/// Returns the text to tokenize and its byte offset within `source`.
fn strip_backticks(source: &str) -> (&str, usize) {
    let trimmed = source.trim();
    if trimmed.len() >= 2 && trimmed.starts_with('`') && trimmed.ends_with('`') {
        let leading = source.len() - source.trim_start().len();
        (&trimmed[1..trimmed.len() - 1], leading + 1)
    } else {
        (source, 0)
    }
}
