use std::{collections::HashMap, iter::Peekable, rc::Rc};

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::utils::{expect_char, parse_comma_separated, parse_identifier},
        value::class::Class,
    },
};

/// Result type used by the parser.
pub type ParseResult<T> = Result<T, ParseError>;

/// The program-level class table.
///
/// Class definitions register themselves here as they are parsed, and
/// `Name(...)` expressions resolve against it, so a class can only be
/// instantiated or inherited from below its definition.
pub type ClassTable = HashMap<String, Rc<Class>>;

/// The name of the builtin that renders a value into a string.
const STRINGIFY: &str = "str";

/// Parses a complete expression.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// expr       := and_test ("or" and_test)*
/// and_test   := not_test ("and" not_test)*
/// not_test   := "not" not_test | comparison
/// comparison := additive [("=="|"!="|"<"|">"|"<="|">=") additive]
/// additive   := term (("+"|"-") term)*
/// term       := unary (("*"|"/") unary)*
/// unary      := "-" unary | postfix
/// postfix    := primary ("." Id ["(" args ")"])*
/// ```
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut left = parse_and_test(tokens, classes)?;

    while let Some((Token::Or, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_and_test(tokens, classes)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op: BinaryOperator::Or,
                                right: Box::new(right),
                                line };
    }
    Ok(left)
}

/// Parses a chain of `and` operands.
fn parse_and_test<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut left = parse_not_test(tokens, classes)?;

    while let Some((Token::And, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let right = parse_not_test(tokens, classes)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op: BinaryOperator::And,
                                right: Box::new(right),
                                line };
    }
    Ok(left)
}

/// Parses an optional prefix chain of `not` operators.
fn parse_not_test<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((Token::Not, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_not_test(tokens, classes)?;
        return Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                                  expr: Box::new(expr),
                                  line });
    }
    parse_comparison(tokens, classes)
}

/// Parses an additive expression optionally followed by one comparison.
///
/// Comparisons do not chain: `a < b < c` is a parse error, because the
/// second `<` is left for the enclosing construct to reject.
fn parse_comparison<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let left = parse_additive(tokens, classes)?;

    let op = match tokens.peek() {
        Some((Token::Eq, _)) => BinaryOperator::Equal,
        Some((Token::NotEq, _)) => BinaryOperator::NotEqual,
        Some((Token::LessOrEq, _)) => BinaryOperator::LessEqual,
        Some((Token::GreaterOrEq, _)) => BinaryOperator::GreaterEqual,
        Some((Token::Char('<'), _)) => BinaryOperator::Less,
        Some((Token::Char('>'), _)) => BinaryOperator::Greater,
        _ => return Ok(left),
    };
    let Some((_, line)) = tokens.next() else {
        unreachable!("the operator token was just peeked")
    };

    let right = parse_additive(tokens, classes)?;
    Ok(Expr::BinaryOp { left: Box::new(left),
                        op,
                        right: Box::new(right),
                        line: *line })
}

/// Parses a chain of `+`/`-` operands.
fn parse_additive<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut left = parse_term(tokens, classes)?;

    loop {
        let op = match tokens.peek() {
            Some((Token::Char('+'), _)) => BinaryOperator::Add,
            Some((Token::Char('-'), _)) => BinaryOperator::Sub,
            _ => return Ok(left),
        };
        let line = tokens.next().map_or(0, |(_, l)| *l);
        let right = parse_term(tokens, classes)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }
}

/// Parses a chain of `*`/`/` operands.
fn parse_term<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut left = parse_unary(tokens, classes)?;

    loop {
        let op = match tokens.peek() {
            Some((Token::Char('*'), _)) => BinaryOperator::Mul,
            Some((Token::Char('/'), _)) => BinaryOperator::Div,
            _ => return Ok(left),
        };
        let line = tokens.next().map_or(0, |(_, l)| *l);
        let right = parse_unary(tokens, classes)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }
}

/// Parses an optional prefix chain of unary minus operators.
fn parse_unary<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if let Some((Token::Char('-'), line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_unary(tokens, classes)?;
        return Ok(Expr::UnaryOp { op: UnaryOperator::Negate,
                                  expr: Box::new(expr),
                                  line });
    }
    parse_postfix(tokens, classes)
}

/// Parses a primary expression followed by any number of `.field` and
/// `.method(...)` suffixes.
///
/// A chain like `a.b.c` decomposes into nested field accesses.
fn parse_postfix<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut expr = parse_primary(tokens, classes)?;

    while let Some((Token::Char('.'), line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let name = parse_identifier(tokens)?;

        if let Some((Token::Char('('), _)) = tokens.peek() {
            tokens.next();
            let arguments = parse_arguments(tokens, classes)?;
            expr = Expr::MethodCall { object: Box::new(expr),
                                      method: name,
                                      arguments,
                                      line };
        } else {
            expr = Expr::FieldAccess { object: Box::new(expr),
                                       field: name,
                                       line };
        }
    }
    Ok(expr)
}

/// Parses a primary expression: a literal, a parenthesized expression, a
/// variable, a class instantiation, or the `str(...)` builtin.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>, classes: &ClassTable) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.next() {
        Some((Token::Number(value), line)) => Ok(Expr::Literal { value: (*value).into(),
                                                                 line:  *line, }),
        Some((Token::Str(text), line)) => Ok(Expr::Literal { value: text.as_str().into(),
                                                             line:  *line, }),
        Some((Token::True, line)) => Ok(Expr::Literal { value: true.into(),
                                                        line:  *line, }),
        Some((Token::False, line)) => Ok(Expr::Literal { value: false.into(),
                                                         line:  *line, }),
        Some((Token::None, line)) => Ok(Expr::Literal { value: LiteralValue::None,
                                                        line:  *line, }),
        Some((Token::Char('('), _)) => {
            let expr = parse_expression(tokens, classes)?;
            expect_char(tokens, ')')?;
            Ok(expr)
        },
        Some((Token::Id(name), line)) => {
            if let Some((Token::Char('('), _)) = tokens.peek() {
                tokens.next();
                return parse_call(name, *line, tokens, classes);
            }
            Ok(Expr::Variable { name: name.clone(),
                                line: *line, })
        },
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { token: format!("Expected expression, found {token:?}"),
                                              line:  *line, })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Parses the argument list of a `Name(...)` call whose opening parenthesis
/// is already consumed.
///
/// `str(...)` lowers to the rendering builtin; every other name must be a
/// class in the class table and produces an instantiation.
fn parse_call<'a, I>(name: &str,
                     line: usize,
                     tokens: &mut Peekable<I>,
                     classes: &ClassTable)
                     -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)>
{
    if name == STRINGIFY {
        let expr = parse_expression(tokens, classes)?;
        expect_char(tokens, ')')?;
        return Ok(Expr::Stringify { expr: Box::new(expr),
                                    line });
    }

    let Some(class) = classes.get(name) else {
        return Err(ParseError::UnknownClass { name: name.to_string(),
                                              line });
    };
    let arguments = parse_arguments(tokens, classes)?;
    Ok(Expr::NewInstance { class: class.clone(),
                           arguments,
                           line })
}

/// Parses a comma-separated argument list up to the closing parenthesis.
fn parse_arguments<'a, I>(tokens: &mut Peekable<I>,
                          classes: &ClassTable)
                          -> ParseResult<Vec<Expr>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    parse_comma_separated(tokens,
                          |tokens| parse_expression(tokens, classes),
                          &Token::Char(')'))
}
