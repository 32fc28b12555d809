use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Node},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{core::ParseResult, unary::parse_unary},
    },
};

/// Parses one left-associative precedence level.
///
/// Parses an operand with `operand`, then folds every following
/// `op operand` pair whose operator is in `operators` into a left-leaning
/// `Node::BinOp` chain.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 operand: fn(&mut Peekable<I>) -> ParseResult<Node>,
                                 operators: &[BinaryOperator])
                                 -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let mut left = operand(tokens)?;
    loop {
        if let Some((token, _)) = tokens.peek()
           && let Some(op) = token_to_binary_operator(token)
           && operators.contains(&op)
        {
            tokens.next();
            let right = operand(tokens)?;
            left = Node::BinOp { left: Box::new(left),
                                 op,
                                 right: Box::new(right) };
            continue;
        }
        break;
    }
    Ok(left)
}

/// Parses logical OR expressions.
///
/// The loosest operator level. Both operands are always evaluated; `or`
/// does not short-circuit.
///
/// Grammar: `or := and ("or" and)*`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, offset)` pairs.
///
/// # Returns
/// A binary expression tree with `BinaryOperator::Or` nodes.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_left_associative(tokens, parse_logical_and, &[BinaryOperator::Or])
}

/// Parses logical AND expressions.
///
/// Grammar: `and := equality ("and" equality)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_left_associative(tokens, parse_equality, &[BinaryOperator::And])
}

/// Parses equality expressions.
///
/// Equality binds looser than the relational operators, so `a < b == c < d`
/// compares two comparisons.
///
/// Grammar: `equality := comparison ("==" comparison)*`
pub fn parse_equality<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_left_associative(tokens, parse_relational, &[BinaryOperator::Equal])
}

/// Parses relational operators.
///
/// Chains are left-associative: `a < b < c` is `(a < b) < c`.
///
/// Grammar: `comparison := additive (("<" | ">" | "<=" | ">=") additive)*`
pub fn parse_relational<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    use BinaryOperator::{Greater, GreaterEqual, Less, LessEqual};

    parse_left_associative(tokens, parse_additive, &[Less, Greater, LessEqual, GreaterEqual])
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
///
/// # Parameters
/// - `tokens`: Token stream with offset information.
///
/// # Returns
/// A `Node::BinOp` tree representing the parsed expression.
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    parse_left_associative(tokens,
                           parse_multiplicative,
                           &[BinaryOperator::Add, BinaryOperator::Sub])
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators `*`, `/` and `%`.
///
/// The rule is: `multiplicative := exponent (("*" | "/" | "%") exponent)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    use BinaryOperator::{Div, Mod, Mul};

    parse_left_associative(tokens, parse_exponent, &[Mul, Div, Mod])
}

/// Parses exponentiation expressions.
///
/// Handles repeated exponentiation with right-associativity:
/// `a ^ b ^ c` parses as `a ^ (b ^ c)`. Postfix indexing and prefix `-`/`not`
/// bind tighter, so `a[0] ^ 2` squares the element and `-2 ^ 2` is `4`.
///
/// The rule is: `exponent := unary ["^" exponent]`
///
/// # Parameters
/// - `tokens`: Token stream.
///
/// # Returns
/// An exponentiation expression tree.
pub fn parse_exponent<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let base = parse_unary(tokens)?;
    if tokens.next_if(|(token, _)| *token == Token::Caret).is_some() {
        let exponent = parse_exponent(tokens)?;
        return Ok(Node::BinOp { left:  Box::new(base),
                                op:    BinaryOperator::Pow,
                                right: Box::new(exponent), });
    }
    Ok(base)
}

/// Maps a token to the binary operator it denotes, if any.
///
/// # Example
/// ```
/// use gambl::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::Plus),
///            Some(BinaryOperator::Add));
/// assert_eq!(token_to_binary_operator(&Token::Or), Some(BinaryOperator::Or));
/// assert_eq!(token_to_binary_operator(&Token::Assign), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::Caret => Some(BinaryOperator::Pow),
        Token::Less => Some(BinaryOperator::Less),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}
