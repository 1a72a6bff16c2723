use crate::{
    ast::Node,
    error::ParserError,
    events::AttributeTable,
    lexer::{Lexer, Token},
    strings::StringTable,
};
use lalrpop_util::{lalrpop_mod, ParseError};

lalrpop_mod!(grammar);

use self::grammar::TreeParser;

pub type BETreeParseError<'a> = ParseError<usize, Token<'a>, ParserError>;

/// Parse a boolean expression.
///
/// `not` binds tighter than `and`, which binds tighter than `or`. String literals are interned
/// in `strings` as they are encountered.
#[inline]
pub fn parse<'a>(
    input: &'a str,
    attributes: &AttributeTable,
    strings: &mut StringTable,
) -> Result<Node, BETreeParseError<'a>> {
    let lexer = Lexer::new(input);
    TreeParser::new().parse(attributes, strings, lexer)
}
