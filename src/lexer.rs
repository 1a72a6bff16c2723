use crate::error::ParserError;
use logos::{Logos, SpannedIter};
use rust_decimal::Decimal;
use std::{fmt, str::FromStr};

pub type Spanned<Tok, Loc, Error> = Result<(Loc, Tok, Loc), Error>;

#[derive(Logos, Clone, PartialEq, Debug)]
#[logos(skip r"[ \t\r\n\f]+")]
#[logos(error = ParserError)]
pub enum Token<'a> {
    #[token("(")]
    LeftParenthesis,
    #[token(")")]
    RightParenthesis,
    #[token("[")]
    LeftSquareBracket,
    #[token("]")]
    RightSquareBracket,
    #[token(",")]
    Comma,
    #[token("<")]
    LessThan,
    #[token("<=")]
    LessThanEqual,
    #[token(">")]
    GreaterThan,
    #[token(">=")]
    GreaterThanEqual,
    #[token("=")]
    Equal,
    #[token("<>")]
    #[token("!=")]
    NotEqual,
    #[token("and", ignore(case))]
    #[token("&&")]
    And,
    #[token("or", ignore(case))]
    #[token("||")]
    Or,
    #[token("not", ignore(case))]
    #[token("!")]
    Not,
    #[token("in", ignore(case))]
    In,
    #[regex("one[ \t]+of", ignore(case))]
    OneOf,
    #[regex("none[ \t]+of", ignore(case))]
    NoneOf,
    #[regex("all[ \t]+of", ignore(case))]
    AllOf,
    #[regex("is[ \t]+null", ignore(case))]
    IsNull,
    #[regex("is[ \t]+not[ \t]+null", ignore(case))]
    IsNotNull,
    #[regex("is[ \t]+empty", ignore(case))]
    IsEmpty,
    #[token("segment_within")]
    SegmentWithin,
    #[token("segment_before")]
    SegmentBefore,
    #[token("within_frequency_cap")]
    WithinFrequencyCap,
    #[token("geo_within_radius")]
    GeoWithinRadius,
    #[token("contains")]
    Contains,
    #[token("starts_with")]
    StartsWith,
    #[token("ends_with")]
    EndsWith,
    #[regex("[a-zA-Z_][a-zA-Z0-9_.]*", |lex| lex.slice())]
    Identifier(&'a str),
    #[regex("-?[0-9]+", parse_integer)]
    IntegerLiteral(i64),
    #[regex(r"-?[0-9]+\.[0-9]+", parse_float)]
    FloatLiteral(Decimal),
    #[regex(r#""[^"]*""#, unquote)]
    #[regex("'[^']*'", unquote)]
    StringLiteral(&'a str),
}

fn parse_integer<'a>(lex: &mut logos::Lexer<'a, Token<'a>>) -> Result<i64, ParserError> {
    i64::from_str(lex.slice()).map_err(|_| ParserError::InvalidInteger(lex.slice().to_string()))
}

fn parse_float<'a>(lex: &mut logos::Lexer<'a, Token<'a>>) -> Result<Decimal, ParserError> {
    Decimal::from_str(lex.slice()).map_err(|_| ParserError::InvalidFloat(lex.slice().to_string()))
}

fn unquote<'a>(lex: &mut logos::Lexer<'a, Token<'a>>) -> &'a str {
    let slice = lex.slice();
    &slice[1..slice.len() - 1]
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identifier(name) => write!(f, "{name}"),
            Self::IntegerLiteral(value) => write!(f, "{value}"),
            Self::FloatLiteral(value) => write!(f, "{value}"),
            Self::StringLiteral(value) => write!(f, "'{value}'"),
            token => write!(f, "{token:?}"),
        }
    }
}

pub struct Lexer<'a> {
    tokens: SpannedIter<'a, Token<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            tokens: Token::lexer(input).spanned(),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Spanned<Token<'a>, usize, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens
            .next()
            .map(|(token, span)| Ok((span.start, token?, span.end)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token<'_>> {
        Lexer::new(input)
            .map(|token| token.map(|(_, token, _)| token))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn can_tokenize_keywords_regardless_of_case() {
        let tokens = tokens("NOT a And b OR c");

        assert_eq!(
            vec![
                Token::Not,
                Token::Identifier("a"),
                Token::And,
                Token::Identifier("b"),
                Token::Or,
                Token::Identifier("c"),
            ],
            tokens
        );
    }

    #[test]
    fn can_tokenize_symbolic_operators() {
        let tokens = tokens("!a && b || c != 1");

        assert_eq!(
            vec![
                Token::Not,
                Token::Identifier("a"),
                Token::And,
                Token::Identifier("b"),
                Token::Or,
                Token::Identifier("c"),
                Token::NotEqual,
                Token::IntegerLiteral(1),
            ],
            tokens
        );
    }

    #[test]
    fn can_tokenize_multi_word_operators() {
        let tokens = tokens("ids none of [1] and s is  not null and l is empty");

        assert_eq!(
            vec![
                Token::Identifier("ids"),
                Token::NoneOf,
                Token::LeftSquareBracket,
                Token::IntegerLiteral(1),
                Token::RightSquareBracket,
                Token::And,
                Token::Identifier("s"),
                Token::IsNotNull,
                Token::And,
                Token::Identifier("l"),
                Token::IsEmpty,
            ],
            tokens
        );
    }

    #[test]
    fn can_tokenize_literals() {
        let tokens = tokens(r#"-12 3.25 'single' "double""#);

        assert_eq!(
            vec![
                Token::IntegerLiteral(-12),
                Token::FloatLiteral(Decimal::new(325, 2)),
                Token::StringLiteral("single"),
                Token::StringLiteral("double"),
            ],
            tokens
        );
    }

    #[test]
    fn can_tokenize_function_names() {
        let tokens = tokens("contains starts_with ends_with geo_within_radius within_frequency_cap");

        assert_eq!(
            vec![
                Token::Contains,
                Token::StartsWith,
                Token::EndsWith,
                Token::GeoWithinRadius,
                Token::WithinFrequencyCap,
            ],
            tokens
        );
    }

    #[test]
    fn prefer_identifiers_over_keywords_they_start_with() {
        let tokens = tokens("android inside contains_ads");

        assert_eq!(
            vec![
                Token::Identifier("android"),
                Token::Identifier("inside"),
                Token::Identifier("contains_ads"),
            ],
            tokens
        );
    }

    #[test]
    fn return_an_error_on_integer_overflow() {
        let result: Result<Vec<_>, _> = Lexer::new("99999999999999999999").collect();

        assert_eq!(
            Err(ParserError::InvalidInteger("99999999999999999999".to_string())),
            result
        );
    }

    #[test]
    fn return_an_error_on_unknown_characters() {
        let result: Result<Vec<_>, _> = Lexer::new("a = #").collect();

        assert_eq!(Err(ParserError::InvalidToken), result);
    }
}
