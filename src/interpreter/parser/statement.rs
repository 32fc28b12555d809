use std::iter::Peekable;

use crate::{
    ast::{Node, Param},
    interpreter::{
        lexer::{Spanned, Token},
        parser::{
            core::{ParseResult, parse_expression, parse_if},
            unary::parse_postfix,
            utils::{eat, expect, parse_comma_separated, parse_identifier, peek_nth},
        },
    },
};

/// Parses a single statement.
///
/// A statement may be one of:
/// - a function definition (`def ...`),
/// - a `return`,
/// - a `while` loop,
/// - an assignment, an `if`, or a plain expression.
///
/// The leading keyword decides; everything without one goes through
/// [`parse_assignment`].
///
/// Grammar:
/// ```text
///     statement := function_def | return | while | assignment
/// ```
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, offset)` pairs.
///
/// # Returns
/// The parsed statement [`Node`].
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match tokens.peek() {
        Some((Token::Def, _)) => parse_function_def(tokens),
        Some((Token::Return, _)) => parse_return(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        _ => parse_assignment(tokens),
    }
}

/// Parses `return <expression>`, or falls through to [`parse_while`].
///
/// Grammar: `return := "return" expression | while`
pub fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if !eat(tokens, &Token::Return) {
        return parse_while(tokens);
    }
    let value = parse_expression(tokens)?;
    Ok(Node::ReturnValue(Box::new(value)))
}

/// Parses a `while` loop, or falls through to [`parse_assignment`].
///
/// Both the condition and the body are full statements. The body is a
/// single statement; `;` after it ends the loop.
///
/// Grammar: `while := "while" statement ":" statement | assignment`
///
/// # Example
/// ```
/// use gambl::{ast::Node, parse};
///
/// let ast = parse("while i < 3 : i = i + 1").unwrap();
/// assert!(matches!(ast, Node::While { .. }));
/// ```
pub fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if !eat(tokens, &Token::While) {
        return parse_assignment(tokens);
    }
    let condition = parse_statement(tokens)?;
    expect(tokens, &Token::Colon)?;
    let body = parse_statement(tokens)?;
    Ok(Node::While { condition: Box::new(condition),
                     body:      Box::new(body), })
}

/// Parses an assignment, or falls through to [`parse_if`].
///
/// Two targets are accepted:
/// - `name = value` rebinds a variable,
/// - `name[i]...[j] = value` stores into an array element.
///
/// The indexed form is detected by parsing the index chain on a copy of the
/// token stream; the copy is only committed when an `=` follows, so
/// `a[0] + 1` still parses as an expression.
///
/// Grammar:
/// ```text
///     assignment := IDENT "=" while
///                 | IDENT ("[" expression "]")+ "=" while
///                 | if
/// ```
pub fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if !matches!(tokens.peek(), Some((Token::Identifier(_), _))) {
        return parse_if(tokens);
    }

    match peek_nth(tokens, 1) {
        Some(Token::Assign) => {
            let name = parse_identifier(tokens)?;
            tokens.next();
            let value = parse_while(tokens)?;
            Ok(Node::Assignment { name,
                                  value: Box::new(value) })
        },
        Some(Token::LBracket) => {
            let mut lookahead = tokens.clone();
            if let Some(Node::Index { base, index }) = parse_index_target(&mut lookahead)
               && eat(&mut lookahead, &Token::Assign)
            {
                *tokens = lookahead;
                let expr = parse_while(tokens)?;
                return Ok(Node::AssignIndex { base,
                                              index,
                                              expr: Box::new(expr) });
            }
            parse_if(tokens)
        },
        _ => parse_if(tokens),
    }
}

/// Parses `name[i]...[j]` for a possible indexed assignment.
///
/// Returns `None` when the tokens do not form such a chain; the caller then
/// reparses them as an expression, which reports the actual error.
fn parse_index_target<'a, I>(tokens: &mut Peekable<I>) -> Option<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    let name = parse_identifier(tokens).ok()?;
    parse_postfix(tokens, Node::Variable(name)).ok()
}

/// Parses a function definition.
///
/// Syntax:
/// ```text
///     def name(param, ref param, ...) : statement ; statement ; ...
/// ```
///
/// The body has no closing delimiter. After each body statement a `;`
/// continues the body, except when the statement after it starts with
/// `def` or is a call `name(`; in that case the `;` is left in place and
/// ends the definition. A `;` at the end of input also ends it.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at `def`.
///
/// # Returns
/// A `Node::FunctionDef`.
///
/// # Errors
/// Returns a `ParseError` if:
/// - the name or a parameter is not an identifier,
/// - the parameter list is not closed,
/// - the `:` is missing,
/// - a body statement fails to parse.
///
/// # Example
/// ```
/// use gambl::{ast::Node, parse};
///
/// let ast = parse("def add(a, b) : return a + b; add(1, 2)").unwrap();
/// let Node::Block(statements) = ast else { panic!("expected a block") };
///
/// assert!(matches!(&statements[0], Node::FunctionDef { name, statements, .. }
///                  if name == "add" && statements.len() == 1));
/// assert!(matches!(&statements[1], Node::Call { .. }));
/// ```
pub fn parse_function_def<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Node>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    expect(tokens, &Token::Def)?;
    let name = parse_identifier(tokens)?;

    expect(tokens, &Token::LParen)?;
    let params = parse_comma_separated(tokens, parse_param, &Token::RParen)?;
    expect(tokens, &Token::Colon)?;

    let mut statements = vec![parse_return(tokens)?];
    while matches!(tokens.peek(), Some((Token::Semicolon, _))) {
        if ends_function_body(tokens) {
            break;
        }
        tokens.next();
        if tokens.peek().is_none() {
            break;
        }
        statements.push(parse_return(tokens)?);
    }

    Ok(Node::FunctionDef { name,
                           params,
                           statements })
}

/// Whether the `;` at the front of `tokens` closes a function body.
fn ends_function_body<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a Spanned> + Clone
{
    match peek_nth(tokens, 1) {
        Some(Token::Def) => true,
        Some(Token::Identifier(_)) => matches!(peek_nth(tokens, 2), Some(Token::LParen)),
        _ => false,
    }
}

/// Parses one parameter: `name` or `ref name`.
fn parse_param<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Param>
    where I: Iterator<Item = &'a Spanned> + Clone
{
    if eat(tokens, &Token::Ref) {
        Ok(Param::reference(parse_identifier(tokens)?))
    } else {
        Ok(Param::value(parse_identifier(tokens)?))
    }
}
