use std::collections::VecDeque;

use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// Besides the tokens that correspond to spans of source text, the stream
/// contains three synthetic structural tokens: [`Token::Indent`] and
/// [`Token::Dedent`], emitted when the indentation depth of a line changes,
/// and [`Token::Eof`], emitted forever once the input is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Integer literal tokens, such as `42`.
    Number(i32),
    /// Identifier tokens; variable, field, class or method names.
    Id(String),
    /// String literal tokens with their escape sequences already resolved.
    Str(String),
    /// A single punctuation character, such as `=`, `(` or `.`.
    Char(char),
    /// `class`
    Class,
    /// `return`
    Return,
    /// `if`
    If,
    /// `else`
    Else,
    /// `def`
    Def,
    /// `print`
    Print,
    /// `and`
    And,
    /// `or`
    Or,
    /// `not`
    Not,
    /// `None`
    None,
    /// `True`
    True,
    /// `False`
    False,
    /// `==`
    Eq,
    /// `!=`
    NotEq,
    /// `<=`
    LessOrEq,
    /// `>=`
    GreaterOrEq,
    /// End of a logical line.
    Newline,
    /// The indentation depth increased by one level.
    Indent,
    /// The indentation depth decreased by one level.
    Dedent,
    /// End of input.
    Eof,
}

/// The raw token layer produced directly by the generated scanner.
///
/// Indentation is not resolved here: a raw `Newline` carries the number of
/// leading spaces of the following line, and [`Lexer`] turns those widths
/// into `Indent`/`Dedent` tokens. Comments and horizontal whitespace never
/// leave this layer.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
enum RawToken {
    #[regex(r"[0-9]+", parse_number)]
    Number(i32),
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Id(String),
    #[regex(r#""([^"\\\n]|\\.)*""#, parse_string)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#, parse_string)]
    Str(String),
    #[token("class")]
    Class,
    #[token("return")]
    Return,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("def")]
    Def,
    #[token("print")]
    Print,
    #[token("and")]
    And,
    #[token("or")]
    Or,
    #[token("not")]
    Not,
    #[token("None")]
    None,
    #[token("True")]
    True,
    #[token("False")]
    False,
    #[token("==")]
    Eq,
    #[token("!=")]
    NotEq,
    #[token("<=")]
    LessOrEq,
    #[token(">=")]
    GreaterOrEq,
    #[regex(r"[-+*/=<>(),.:;{}\[\]]", |lex| lex.slice().chars().next())]
    Char(char),
    /// A physical line break followed by the indentation of the next line.
    #[regex(r"\n[ ]*", parse_newline)]
    Newline(usize),
    /// `# Comments.`
    #[regex(r"#[^\n]*", logos::skip)]
    Comment,
    /// Spaces between tokens within a line.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Whitespace,
}

/// Additional information carried by the scanner during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
struct LexerExtras {
    /// The current line number in the source being tokenized.
    line: usize,
}

/// Parses an integer literal from the current token slice.
///
/// Returns `None` if the digit run does not fit into an `i32`, which the
/// lexer reports as [`ParseError::LiteralTooLarge`].
fn parse_number(lex: &logos::Lexer<RawToken>) -> Option<i32> {
    lex.slice().parse().ok()
}

/// Resolves the escape sequences of a string literal.
///
/// `\n`, `\t`, `\r`, `\"`, `\'` and `\\` have their usual meaning; a
/// backslash before any other character yields that character unchanged.
fn parse_string(lex: &logos::Lexer<RawToken>) -> String {
    let slice = lex.slice();
    let mut chars = slice[1..slice.len() - 1].chars();
    let mut unescaped = String::with_capacity(slice.len());

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('t') => unescaped.push('\t'),
            Some('r') => unescaped.push('\r'),
            Some(other) => unescaped.push(other),
            Option::None => {},
        }
    }

    unescaped
}

/// Consumes a line break plus the indentation of the next line and returns
/// that indentation width in spaces.
fn parse_newline(lex: &mut logos::Lexer<RawToken>) -> usize {
    lex.extras.line += 1;
    lex.slice().len() - 1
}

/// Produces the token stream of a source text, one token per `advance`.
///
/// The raw scan runs eagerly when the lexer is constructed, so every lexical
/// error (an unrecognized character, a bare `!`, an unterminated string, an
/// oversized integer literal, inconsistent indentation) surfaces from
/// [`Lexer::new`]. Indentation resolution is incremental: a line that closes
/// several blocks at once emits its `Dedent` tokens over successive calls to
/// [`Lexer::advance`], drained from an internal queue.
///
/// The produced stream ends with exactly one [`Token::Newline`] after the
/// last real token (synthesized if the input does not end with a line
/// break), one [`Token::Dedent`] per block still open, and [`Token::Eof`],
/// which repeats forever.
///
/// # Example
/// ```
/// use minipy::interpreter::lexer::{Lexer, Token};
///
/// let mut lexer = Lexer::new("a = 1").unwrap();
///
/// assert_eq!(*lexer.current(), Token::Id("a".to_string()));
/// assert_eq!(*lexer.advance(), Token::Char('='));
/// assert_eq!(*lexer.advance(), Token::Number(1));
/// assert_eq!(*lexer.advance(), Token::Newline);
/// assert_eq!(*lexer.advance(), Token::Eof);
/// assert_eq!(*lexer.advance(), Token::Eof);
/// ```
pub struct Lexer {
    /// The raw tokens with their line numbers, in source order.
    raw:     Vec<(RawToken, usize)>,
    /// Index of the next unconsumed raw token.
    pos:     usize,
    /// Structural tokens waiting to be emitted before scanning resumes.
    queue:   VecDeque<Token>,
    /// The most recently produced token.
    current: Token,
    /// Line number of the most recently produced token.
    line:    usize,
    /// Current indentation depth, in spaces (always even).
    indent:  usize,
    /// Whether any non-structural token has been produced yet; leading
    /// blank lines are dropped while this is still false.
    started: bool,
    /// Whether the closing `Newline`/`Dedent`/`Eof` sequence was emitted.
    closed:  bool,
    /// Whether the iterator has yielded the final `Eof`.
    done:    bool,
}

impl Lexer {
    /// Scans a complete source text and positions the lexer on its first
    /// token.
    ///
    /// # Errors
    /// Returns a [`ParseError`] if the text contains a malformed token or
    /// inconsistent indentation.
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut scanner = RawToken::lexer_with_extras(source, LexerExtras { line: 1 });
        let mut raw = Vec::new();

        while let Some(result) = scanner.next() {
            match result {
                Ok(token) => raw.push((token, scanner.extras.line)),
                Err(()) => {
                    let lexeme = scanner.slice();
                    let line = scanner.extras.line;
                    if !lexeme.is_empty() && lexeme.bytes().all(|b| b.is_ascii_digit()) {
                        return Err(ParseError::LiteralTooLarge { line });
                    }
                    return Err(ParseError::UnrecognizedToken { lexeme: lexeme.to_string(),
                                                               line });
                },
            }
        }

        validate_indentation(&raw)?;

        let mut lexer = Self { raw,
                               pos: 0,
                               queue: VecDeque::new(),
                               current: Token::Newline,
                               line: 1,
                               indent: 0,
                               started: false,
                               closed: false,
                               done: false, };
        lexer.advance();
        Ok(lexer)
    }

    /// Returns the most recently produced token.
    #[must_use]
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Returns the source line of the most recently produced token.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Produces the next token and returns it.
    ///
    /// Once the input is exhausted every further call returns
    /// [`Token::Eof`].
    pub fn advance(&mut self) -> &Token {
        let token = self.next_token();
        self.current = token;
        &self.current
    }

    /// Computes the next token of the stream.
    fn next_token(&mut self) -> Token {
        if let Some(token) = self.queue.pop_front() {
            return token;
        }

        loop {
            if self.pos >= self.raw.len() {
                return self.close_stream();
            }
            let (raw, line) = &self.raw[self.pos];
            let line = *line;

            let RawToken::Newline(width) = raw else {
                let token = plain_token(raw);
                self.line = line;
                self.pos += 1;
                self.started = true;
                return token;
            };

            // Blank-line collapsing: only the indentation in front of the
            // next real token counts.
            let mut width = *width;
            self.pos += 1;
            while let Some((RawToken::Newline(next_width), _)) = self.raw.get(self.pos) {
                width = *next_width;
                self.pos += 1;
            }

            // Leading blank lines produce nothing at all.
            if !self.started {
                continue;
            }

            self.line = line;

            // Trailing whitespace before the end of input never opens a
            // block; the remaining open blocks close instead.
            if self.raw.get(self.pos).is_none() {
                width = 0;
            }

            if width > self.indent {
                self.indent += 2;
                self.queue.push_back(Token::Indent);
            } else {
                while self.indent > width {
                    self.indent -= 2;
                    self.queue.push_back(Token::Dedent);
                }
            }

            return Token::Newline;
        }
    }

    /// Emits the closing `Newline`/`Dedent`/`Eof` sequence for the end of
    /// input.
    fn close_stream(&mut self) -> Token {
        if self.closed {
            return Token::Eof;
        }
        self.closed = true;

        let needs_newline = self.started && !matches!(self.current, Token::Newline | Token::Dedent);
        while self.indent > 0 {
            self.indent -= 2;
            self.queue.push_back(Token::Dedent);
        }
        self.queue.push_back(Token::Eof);

        if needs_newline {
            return Token::Newline;
        }
        self.queue.pop_front().unwrap_or(Token::Eof)
    }
}

impl Iterator for Lexer {
    type Item = (Token, usize);

    /// Yields `(token, line)` pairs up to and including the first
    /// [`Token::Eof`].
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = (self.current.clone(), self.line);
        if item.0 == Token::Eof {
            self.done = true;
        } else {
            self.advance();
        }
        Some(item)
    }
}

/// Converts a raw token into its public counterpart.
fn plain_token(raw: &RawToken) -> Token {
    match raw {
        RawToken::Number(value) => Token::Number(*value),
        RawToken::Id(name) => Token::Id(name.clone()),
        RawToken::Str(text) => Token::Str(text.clone()),
        RawToken::Char(ch) => Token::Char(*ch),
        RawToken::Class => Token::Class,
        RawToken::Return => Token::Return,
        RawToken::If => Token::If,
        RawToken::Else => Token::Else,
        RawToken::Def => Token::Def,
        RawToken::Print => Token::Print,
        RawToken::And => Token::And,
        RawToken::Or => Token::Or,
        RawToken::Not => Token::Not,
        RawToken::None => Token::None,
        RawToken::True => Token::True,
        RawToken::False => Token::False,
        RawToken::Eq => Token::Eq,
        RawToken::NotEq => Token::NotEq,
        RawToken::LessOrEq => Token::LessOrEq,
        RawToken::GreaterOrEq => Token::GreaterOrEq,
        RawToken::Newline(_) | RawToken::Comment | RawToken::Whitespace => {
            unreachable!("structural raw tokens are handled by the lexer itself")
        },
    }
}

/// Checks that every line's indentation is reachable from its predecessor
/// under the two-spaces-per-level scheme.
///
/// Runs over the raw token list with the same blank-line collapsing rules
/// the lexer itself applies, so the incremental token machinery can assume
/// well-formed indentation afterwards.
fn validate_indentation(raw: &[(RawToken, usize)]) -> Result<(), ParseError> {
    let mut indent = 0usize;
    let mut started = false;
    let mut pos = 0;

    while let Some((token, line)) = raw.get(pos) {
        let RawToken::Newline(width) = token else {
            started = true;
            pos += 1;
            continue;
        };

        let mut width = *width;
        let line = *line;
        pos += 1;
        while let Some((RawToken::Newline(next_width), _)) = raw.get(pos) {
            width = *next_width;
            pos += 1;
        }
        if !started || raw.get(pos).is_none() {
            continue;
        }

        if width == indent + 2 || (width <= indent && (indent - width) % 2 == 0) {
            indent = width;
        } else {
            return Err(ParseError::BadIndent { line });
        }
    }

    Ok(())
}
