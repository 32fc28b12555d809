use std::iter::Peekable;

use crate::{
    ast::{Node, UnaryOperator},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression},
            utils::{expect, parse_comma_separated, parse_identifier, peek_nth, unexpected},
        },
    },
};

/// Parses a unary expression.
///
/// Supports prefix operators:
/// - `-`   (numeric negation)
/// - `not` (logical not)
///
/// Unary operators are right-associative, so an input like `not -x` is
/// parsed as `not (-x)`. Their operand includes any postfix indexing:
/// `-a[0]` negates the element.
///
/// Grammar:
/// ```text
///     unary := ("-" | "not") unary
///            | primary postfix*
/// ```
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// A [`Node::UnaryOp`] or a primary expression possibly followed by
/// postfixes.
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, _)) => UnaryOperator::Negate,
        Some((Token::Not, _)) => UnaryOperator::Not,
        _ => {
            let primary = parse_primary(tokens)?;
            return parse_postfix(tokens, primary);
        },
    };
    tokens.next();
    let operand = parse_unary(tokens)?;
    Ok(Node::UnaryOp { op,
                       operand: Box::new(operand) })
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - integer and string literals
/// - array literals (`[ ... ]`)
/// - function calls
/// - identifiers
/// - parenthesized expressions
///
/// This function does not handle unary or postfix operators.
///
/// Grammar (simplified):
/// ```text
///     primary := NUMBER
///              | STRING
///              | "[" elements "]"
///              | identifier_or_call
///              | "(" expression ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary
///   expression.
///
/// # Returns
/// The parsed primary [`Node`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.peek().copied() {
        Some((Token::Number(n), _)) => {
            tokens.next();
            Ok(Node::Number(*n))
        },
        Some((Token::Str(s), _)) => {
            tokens.next();
            Ok(Node::Str(s.clone()))
        },
        Some((Token::LBracket, _)) => parse_array_literal(tokens),
        Some((Token::LParen, _)) => parse_grouping(tokens),
        Some((Token::Identifier(_), _)) => parse_identifier_or_call(tokens),
        _ => Err(unexpected("expression", tokens.next())),
    }
}

/// Parses postfix index operators applied to an expression.
///
/// Multiple chained indices are allowed and fold left to right, so
/// `a[0][1]` is `Index(Index(a, 0), 1)`.
///
/// Grammar:
/// ```text
///     postfix := primary
///              | postfix "[" expression "]"
/// ```
/// # Parameters
/// - `tokens`: Token iterator after a primary expression.
/// - `node`: The expression being indexed.
///
/// # Returns
/// An updated [`Node`] with all postfix operators folded in.
///
/// # Errors
/// Returns a `ParseError` if an `[` is not properly closed with `]` or the
/// index expression fails to parse.
pub(crate) fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, mut node: Node) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    while tokens.next_if(|(token, _)| *token == Token::LBracket)
                .is_some()
    {
        let index = parse_expression(tokens)?;
        expect(tokens, &Token::RBracket)?;
        node = Node::Index { base:  Box::new(node),
                             index: Box::new(index), };
    }
    Ok(node)
}

/// Parses a parenthesized expression.
///
/// Grammar: `grouping := "(" expression ")"`
///
/// The parentheses leave no trace in the tree.
fn parse_grouping<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::LParen)?;
    let expr = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    Ok(expr)
}

/// Parses an array literal of the form `[ expr1, expr2, ..., exprN ]`.
///
/// Grammar: `array := "[" (expression ("," expression)*)? "]"`
///
/// An empty array `[]` is accepted.
fn parse_array_literal<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::LBracket)?;
    let items = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;
    Ok(Node::ArrayLiteral(items))
}

/// Parses either a function call or a variable reference.
///
/// An identifier immediately followed by `(` starts a call; any other
/// identifier is a plain variable.
///
/// Grammar:
/// ```text
///     identifier_or_call := IDENT "(" arguments ")"
///                         | IDENT
/// ```
fn parse_identifier_or_call<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let is_call = matches!(peek_nth(tokens, 1), Some(Token::LParen));

    let name = parse_identifier(tokens)?;

    if !is_call {
        return Ok(Node::Variable(name));
    }

    expect(tokens, &Token::LParen)?;
    let args = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
    Ok(Node::Call { name, args })
}
