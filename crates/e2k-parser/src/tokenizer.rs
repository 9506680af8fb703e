// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! E2K statement tokenizer using nom combinators
//!
//! A statement is a space separated run of quoted strings, numbers and bare
//! words: `LINEASSIGN "B12" "Story3" SECTION "W18X35" ANG 0`.

use nom::{
    branch::alt,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, digit0, digit1, one_of, space0},
    combinator::{opt, recognize},
    error::{Error, ErrorKind},
    IResult, Parser,
};

/// Lexical token of a statement
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Token<'a> {
    /// `"text"` (quotes stripped)
    Quoted(&'a str),
    /// Numeric literal
    Number(f64),
    /// Keyword or bare value
    Word(&'a str),
}

impl<'a> Token<'a> {
    /// Text of a quoted string or bare word
    pub fn text(&self) -> Option<&'a str> {
        match self {
            Token::Quoted(s) | Token::Word(s) => Some(s),
            Token::Number(_) => None,
        }
    }

    pub fn number(&self) -> Option<f64> {
        match self {
            Token::Number(n) => Some(*n),
            _ => None,
        }
    }
}

// ============================================================================
// Parsing Primitives
// ============================================================================

/// Parse a quoted string (`"` cannot be escaped in E2K)
fn quoted(input: &str) -> IResult<&str, Token<'_>> {
    let (input, _) = char('"')(input)?;
    let (input, text) = take_while(|c: char| c != '"')(input)?;
    let (input, _) = char('"')(input)?;
    Ok((input, Token::Quoted(text)))
}

/// Parse a number; it must end at whitespace or end of line
fn number(input: &str) -> IResult<&str, Token<'_>> {
    let (rest, num_str) = recognize((
        opt(one_of("+-")),
        alt((
            recognize((digit1, opt((char('.'), digit0)))),
            recognize((char('.'), digit1)),
        )),
        opt((one_of("eE"), opt(one_of("+-")), digit1)),
    ))
    .parse(input)?;

    if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
        return Err(nom::Err::Error(Error::new(input, ErrorKind::Float)));
    }

    // Use lexical-core for fast parsing
    let value: f64 = lexical_core::parse(num_str.as_bytes())
        .map_err(|_| nom::Err::Error(Error::new(input, ErrorKind::Float)))?;
    Ok((rest, Token::Number(value)))
}

/// Parse a bare word
fn word(input: &str) -> IResult<&str, Token<'_>> {
    let (input, text) = take_while1(|c: char| !c.is_whitespace() && c != '"')(input)?;
    Ok((input, Token::Word(text)))
}

/// Parse any token
fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((quoted, number, word)).parse(input)
}

// ============================================================================
// Statement Tokenizing
// ============================================================================

/// Split a statement line into tokens
pub fn tokenize(line: &str) -> Result<Vec<Token<'_>>, String> {
    let mut tokens = Vec::new();
    let mut input = line;
    loop {
        let (rest, _) = space0::<&str, Error<&str>>(input).map_err(|e| e.to_string())?;
        if rest.is_empty() {
            break;
        }
        match token(rest) {
            Ok((rest, tok)) => {
                tokens.push(tok);
                input = rest;
            }
            Err(_) if rest.starts_with('"') => {
                return Err("unterminated quoted string".to_string());
            }
            Err(_) => return Err(format!("unexpected input '{}'", rest)),
        }
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted() {
        let (remaining, token) = quoted("\"W14X22\" rest").unwrap();
        assert_eq!(remaining, " rest");
        assert_eq!(token, Token::Quoted("W14X22"));

        let (_, token) = quoted("\"\"").unwrap();
        assert_eq!(token, Token::Quoted(""));
    }

    #[test]
    fn test_parse_number() {
        let (remaining, token) = number("42").unwrap();
        assert_eq!(remaining, "");
        assert_eq!(token, Token::Number(42.0));

        let (_, token) = number("-1.5E-3 ").unwrap();
        if let Token::Number(f) = token {
            assert!((f + 0.0015).abs() < 1e-12);
        } else {
            panic!("Expected number");
        }
    }

    #[test]
    fn test_number_must_end_at_whitespace() {
        assert!(number("1.2.3").is_err());
        assert!(number("3X").is_err());
        assert_eq!(token("1.2.3").unwrap().1, Token::Word("1.2.3"));
    }

    #[test]
    fn test_tokenize_statement() {
        let tokens = tokenize("  LINE  \"C1\"  COLUMN  \"1\"  \"1\"  1").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Word("LINE"),
                Token::Quoted("C1"),
                Token::Word("COLUMN"),
                Token::Quoted("1"),
                Token::Quoted("1"),
                Token::Number(1.0),
            ]
        );
    }

    #[test]
    fn test_tokenize_quoted_with_spaces() {
        let tokens = tokenize("LINEASSIGN \"B1\" \"Story1\" RELEASE \"M2I M3I\"").unwrap();
        assert_eq!(tokens[4], Token::Quoted("M2I M3I"));
        assert_eq!(tokens[3].text(), Some("RELEASE"));
        assert_eq!(tokens[3].number(), None);
    }

    #[test]
    fn test_tokenize_errors() {
        assert_eq!(
            tokenize("STORY \"Base").unwrap_err(),
            "unterminated quoted string"
        );
        assert!(tokenize("").unwrap().is_empty());
    }
}
