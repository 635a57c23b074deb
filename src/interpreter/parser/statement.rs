use std::{iter::Peekable, rc::Rc};

use crate::{
    ast::{Expr, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ClassTable, ParseResult, parse_expression},
            utils::{expect_char, expect_token, parse_identifier},
        },
        value::class::{Class, Method},
    },
};

/// Parses a complete program: statements separated by logical lines, up to
/// the end of input.
///
/// Class definitions are registered in `classes` as they are encountered,
/// so later statements can instantiate and inherit from them.
///
/// # Errors
/// Returns the first `ParseError` encountered.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>,
                            classes: &mut ClassTable)
                            -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            None | Some((Token::Eof, _)) => break,
            Some((Token::Newline, _)) => {
                tokens.next();
            },
            _ => statements.push(parse_statement(tokens, classes)?),
        }
    }

    Ok(statements)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - a class definition,
/// - an `if`/`else` conditional,
/// - a `print` statement,
/// - a `return` statement,
/// - an assignment, a field assignment, or an expression statement.
///
/// The first token decides the statement kind; the last three share a
/// grammar and are told apart after parsing the leading expression.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>,
                              classes: &mut ClassTable)
                              -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    match tokens.peek() {
        Some((Token::Class, _)) => parse_class_definition(tokens, classes),
        Some((Token::If, _)) => parse_if_else(tokens, classes),
        Some((Token::Print, _)) => parse_print(tokens, classes),
        Some((Token::Return, _)) => parse_return(tokens, classes),
        _ => parse_simple_statement(tokens, classes),
    }
}

/// Parses an assignment, a field assignment, or an expression statement.
///
/// The line starts with an expression either way. If `=` follows, the
/// expression is reinterpreted as the assignment target: a variable targets
/// the scope, a field access targets the instance it reads from, and
/// anything else is rejected.
fn parse_simple_statement<'a, I>(tokens: &mut Peekable<I>,
                                 classes: &mut ClassTable)
                                 -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = tokens.peek().map_or(0, |(_, l)| *l);
    let expr = parse_expression(tokens, classes)?;

    if let Some((Token::Char('='), _)) = tokens.peek() {
        tokens.next();
        let value = parse_expression(tokens, classes)?;
        expect_token(tokens, &Token::Newline)?;

        return match expr {
            Expr::Variable { name, line } => Ok(Statement::Assignment { name, value, line }),
            Expr::FieldAccess { object, field, line } => {
                Ok(Statement::FieldAssignment { object: *object,
                                                field,
                                                value,
                                                line })
            },
            other => Err(ParseError::InvalidAssignmentTarget { line: other.line_number() }),
        };
    }

    expect_token(tokens, &Token::Newline)?;
    Ok(Statement::Expression { expr, line })
}

/// Parses a `print` statement with zero or more comma-separated arguments.
fn parse_print<'a, I>(tokens: &mut Peekable<I>, classes: &mut ClassTable) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = expect_token(tokens, &Token::Print)?;

    let mut arguments = Vec::new();
    if !matches!(tokens.peek(), Some((Token::Newline, _))) {
        loop {
            arguments.push(parse_expression(tokens, classes)?);
            match tokens.peek() {
                Some((Token::Char(','), _)) => {
                    tokens.next();
                },
                _ => break,
            }
        }
    }
    expect_token(tokens, &Token::Newline)?;

    Ok(Statement::Print { arguments, line })
}

/// Parses a `return` statement with an optional returned expression.
fn parse_return<'a, I>(tokens: &mut Peekable<I>, classes: &mut ClassTable) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = expect_token(tokens, &Token::Return)?;

    let value = if matches!(tokens.peek(), Some((Token::Newline, _))) {
        None
    } else {
        Some(parse_expression(tokens, classes)?)
    };
    expect_token(tokens, &Token::Newline)?;

    Ok(Statement::Return { value, line })
}

/// Parses an `if` statement with an optional `else` branch.
///
/// Grammar: `"if" expr ":" suite ["else" ":" suite]`
fn parse_if_else<'a, I>(tokens: &mut Peekable<I>,
                        classes: &mut ClassTable)
                        -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = expect_token(tokens, &Token::If)?;
    let condition = parse_expression(tokens, classes)?;
    expect_char(tokens, ':')?;
    let then_branch = Box::new(parse_suite(tokens, classes)?);

    let else_branch = if matches!(tokens.peek(), Some((Token::Else, _))) {
        tokens.next();
        expect_char(tokens, ':')?;
        Some(Box::new(parse_suite(tokens, classes)?))
    } else {
        None
    };

    Ok(Statement::IfElse { condition,
                           then_branch,
                           else_branch,
                           line })
}

/// Parses an indented suite of statements.
///
/// Grammar: `NEWLINE INDENT statement+ DEDENT`
fn parse_suite<'a, I>(tokens: &mut Peekable<I>, classes: &mut ClassTable) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    expect_token(tokens, &Token::Newline)?;
    let line = expect_token(tokens, &Token::Indent)?;

    let mut statements = vec![parse_statement(tokens, classes)?];
    loop {
        match tokens.peek() {
            Some((Token::Dedent, _)) => {
                tokens.next();
                break;
            },
            None | Some((Token::Eof, _)) => {
                return Err(ParseError::UnexpectedEndOfInput { line });
            },
            _ => statements.push(parse_statement(tokens, classes)?),
        }
    }

    Ok(Statement::Compound { statements, line })
}

/// Parses a class definition and registers the class.
///
/// Grammar: `"class" Id ["(" Id ")"] ":" NEWLINE INDENT method+ DEDENT`
///
/// The base class, when present, must already be in the class table. Method
/// names must be unique within the definition.
fn parse_class_definition<'a, I>(tokens: &mut Peekable<I>,
                                 classes: &mut ClassTable)
                                 -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = expect_token(tokens, &Token::Class)?;
    let name = parse_identifier(tokens)?;

    let parent = if matches!(tokens.peek(), Some((Token::Char('('), _))) {
        tokens.next();
        let parent_name = parse_identifier(tokens)?;
        let parent = classes.get(&parent_name)
                            .cloned()
                            .ok_or(ParseError::UnknownClass { name: parent_name,
                                                              line })?;
        expect_char(tokens, ')')?;
        Some(parent)
    } else {
        None
    };

    expect_char(tokens, ':')?;
    expect_token(tokens, &Token::Newline)?;
    expect_token(tokens, &Token::Indent)?;

    // Registered before the body parses, so methods can instantiate the
    // class they belong to; the method list is attached afterwards.
    let class = Rc::new(Class::new(name.clone(), parent));
    classes.insert(name, class.clone());

    let mut methods: Vec<Method> = Vec::new();
    loop {
        match tokens.peek() {
            Some((Token::Def, line)) => {
                let line = *line;
                let method = parse_method(tokens, classes)?;
                if methods.iter().any(|m| m.name == method.name) {
                    return Err(ParseError::DuplicateMethod { name: method.name,
                                                             line });
                }
                methods.push(method);
            },
            Some((Token::Dedent, _)) => {
                tokens.next();
                break;
            },
            Some((token, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected 'def', found {token:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    class.define_methods(methods);

    Ok(Statement::ClassDefinition { class, line })
}

/// Parses a method definition inside a class body.
///
/// Grammar: `"def" Id "(" "self" ("," Id)* ")" ":" suite`
///
/// The receiver parameter must be spelled `self` and is not part of the
/// method's formal parameter list.
fn parse_method<'a, I>(tokens: &mut Peekable<I>, classes: &mut ClassTable) -> ParseResult<Method>
    where I: Iterator<Item = &'a (Token, usize)>
{
    let line = expect_token(tokens, &Token::Def)?;
    let name = parse_identifier(tokens)?;
    expect_char(tokens, '(')?;

    let receiver = parse_identifier(tokens)?;
    if receiver != "self" {
        return Err(ParseError::UnexpectedToken { token: format!("Expected 'self' as the first parameter, found '{receiver}'"),
                                                 line });
    }

    let mut formal_params = Vec::new();
    loop {
        match tokens.next() {
            Some((Token::Char(')'), _)) => break,
            Some((Token::Char(','), _)) => formal_params.push(parse_identifier(tokens)?),
            Some((token, line)) => {
                return Err(ParseError::UnexpectedToken { token: format!("Expected ',' or ')', found {token:?}"),
                                                         line:  *line, });
            },
            None => return Err(ParseError::UnexpectedEndOfInput { line }),
        }
    }

    expect_char(tokens, ':')?;
    let body = parse_suite(tokens, classes)?;

    Ok(Method { name,
                formal_params,
                body })
}
