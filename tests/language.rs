use std::fs;

use minipy::{
    interpreter::lexer::{Lexer, Token},
    run_program,
};
use walkdir::WalkDir;

fn run(src: &str) -> String {
    let mut output = Vec::new();
    run_program(src, &mut output).unwrap_or_else(|e| panic!("Script failed: {e}\n{src}"));
    String::from_utf8(output).expect("program output is valid UTF-8")
}

fn assert_output(src: &str, expected: &str) {
    assert_eq!(run(src), expected, "for script:\n{src}");
}

fn assert_error(src: &str, message_part: &str) {
    let mut output = Vec::new();
    match run_program(src, &mut output) {
        Ok(()) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(e) => {
            let message = e.to_string();
            assert!(message.contains(message_part),
                    "expected error containing {message_part:?}, got {message:?}");
        },
    }
}

fn tokens(src: &str) -> Vec<Token> {
    Lexer::new(src).unwrap_or_else(|e| panic!("Lexing failed: {e}\n{src}"))
                   .map(|(token, _)| token)
                   .collect()
}

#[test]
fn sample_scripts_produce_expected_output() {
    let mut count = 0;

    for entry in
        WalkDir::new("scripts").into_iter()
                               .filter_map(Result::ok)
                               .filter(|e| e.path().extension().is_some_and(|ext| ext == "mpy"))
    {
        let path = entry.path();
        let source =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let expected_path = path.with_extension("out");
        let expected = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
                           panic!("Failed to read {expected_path:?}: {e}")
                       });

        let mut output = Vec::new();
        run_program(&source, &mut output).unwrap_or_else(|e| panic!("Script {path:?} failed: {e}"));
        assert_eq!(String::from_utf8(output).unwrap(), expected, "output mismatch for {path:?}");
        count += 1;
    }

    assert!(count > 0, "No sample scripts found in scripts/");
}

#[test]
fn arithmetic_and_assignment() {
    assert_output("print 1 + 2", "3\n");
    assert_output("x = 5\nprint x * x", "25\n");
    assert_output("print 8 - 5", "3\n");
    assert_output("print 10 / 2", "5\n");
    assert_output("print 7 / 2", "3\n");
    assert_output("x = 1\nx = x + 1\nprint x", "2\n");
}

#[test]
fn unary_operators() {
    assert_output("print -5", "-5\n");
    assert_output("print 3 - -2", "5\n");
    assert_output("print -(2 + 3)", "-5\n");
    assert_output("print not 0, not 1, not ''", "True False True\n");
}

#[test]
fn string_concatenation() {
    assert_output("s = \"a\" + \"b\"\nprint s", "ab\n");
    assert_output("print 'con' + 'cat' + 'enation'", "concatenation\n");
}

#[test]
fn string_escapes() {
    assert_output("print 'a\\tb'", "a\tb\n");
    assert_output("print 'x\\ny'", "x\ny\n");
    assert_output("print \"he said \\\"hi\\\"\"", "he said \"hi\"\n");
    assert_output("print 'don\\'t'", "don't\n");
    assert_output("print '\\q'", "q\n");
}

#[test]
fn comparisons() {
    assert_output("print 2 < 3, 3 > 2, 2 <= 2, 3 >= 4, 1 == 1, 1 != 1",
                  "True True True False True False\n");
    assert_output("print 'a' < 'b', 'b' < 'a', 'ab' == 'ab'", "True False True\n");
    assert_output("print False < True", "True\n");
    assert_output("print None == None", "True\n");
}

#[test]
fn logic_returns_the_deciding_operand() {
    assert_output("print 0 and 1", "0\n");
    assert_output("print 5 and 7", "7\n");
    assert_output("print '' or 'x'", "x\n");
    assert_output("print 'a' or 'b'", "a\n");
    assert_output("flag = 1 and 'yes' or 'no'\nprint flag", "yes\n");
}

#[test]
fn logic_short_circuits() {
    let src = "class S:\n  def yes(self):\n    print 'yes'\n    return True\n  def no(self):\n    print 'no'\n    return False\n\ns = S()\nprint s.no() and s.yes()";
    assert_output(src, "no\nFalse\n");

    let src = "class S:\n  def yes(self):\n    print 'yes'\n    return True\n  def no(self):\n    print 'no'\n    return False\n\ns = S()\nprint s.yes() or s.no()";
    assert_output(src, "yes\nTrue\n");
}

#[test]
fn if_else_branches() {
    assert_output("if 0:\n  print 1\nelse:\n  print 2", "2\n");
    assert_output("if 1:\n  print 1\nelse:\n  print 2", "1\n");
    assert_output("if 0:\n  print 1\nprint 2", "2\n");
    assert_output("if 'nonempty':\n  print 'taken'", "taken\n");
}

#[test]
fn print_statement_forms() {
    assert_output("print 1, 'two', True, None", "1 two True None\n");
    assert_output("print\nprint 2", "\n2\n");
    assert_output("x = None\nprint x", "None\n");
}

#[test]
fn method_calls_and_fields() {
    assert_output("class A:\n  def f(self, n):\n    return n + 1\n\na = A()\nprint a.f(10)",
                  "11\n");
    assert_output("class A:\n  def set(self, v):\n    self.v = v\n\na = A()\na.set(7)\nprint a.v",
                  "7\n");
}

#[test]
fn constructor_initializes_fields() {
    let src = "class Point:\n  def __init__(self, x, y):\n    self.x = x\n    self.y = y\n\np = Point(3, 4)\nprint p.x, p.y";
    assert_output(src, "3 4\n");
}

#[test]
fn constructor_is_optional() {
    let src = "class A:\n  def __init__(self, x):\n    self.x = x\n\na = A()\nprint a";
    // No matching `__init__`, so the instance is built with no fields and
    // prints as its identity.
    assert!(run(src).starts_with("<A object at "));
}

#[test]
fn str_method_drives_printing() {
    assert_output("class A:\n  def __str__(self):\n    return \"hi\"\n\nprint A()", "hi\n");
    let out = run("class A:\n  def f(self):\n    return 1\n\nprint A()");
    assert!(out.starts_with("<A object at "), "got {out:?}");
}

#[test]
fn classes_render_by_name() {
    assert_output("class A:\n  def f(self):\n    return 1\n\nprint A", "Class A\n");
}

#[test]
fn stringify_builtin() {
    assert_output("print str(42) + '!'", "42!\n");
    assert_output("print str(None), str(True)", "None True\n");
    assert_output("class A:\n  def __str__(self):\n    return 'ok'\n\nprint str(A()) + '!'",
                  "ok!\n");
}

#[test]
fn methods_without_return_yield_none() {
    assert_output("class A:\n  def f(self):\n    x = 1\n\na = A()\nprint a.f()", "None\n");
    assert_output("class A:\n  def f(self):\n    return\n\na = A()\nprint a.f()", "None\n");
}

#[test]
fn return_unwinds_nested_suites() {
    let src = "class A:\n  def sign(self, n):\n    if n < 0:\n      return -1\n    else:\n      if n == 0:\n        return 0\n    return 1\n\na = A()\nprint a.sign(-5), a.sign(0), a.sign(3)";
    assert_output(src, "-1 0 1\n");
}

#[test]
fn method_scopes_are_isolated() {
    let src = "class A:\n  def f(self):\n    x = 99\n    return x\n\nx = 1\na = A()\na.f()\nprint x";
    assert_output(src, "1\n");
}

#[test]
fn self_dispatch_uses_the_instance_class() {
    let src = "class A:\n  def who(self):\n    return 'A'\n  def greet(self):\n    return 'hi ' + self.who()\n\nclass B(A):\n  def who(self):\n    return 'B'\n\nb = B()\nprint b.greet()";
    assert_output(src, "hi B\n");
}

#[test]
fn inheritance_walks_the_whole_chain() {
    let src = "class A:\n  def base(self):\n    return 1\n\nclass B(A):\n  def mid(self):\n    return 2\n\nclass C(B):\n  def top(self):\n    return 3\n\nc = C()\nprint c.base() + c.mid() + c.top()";
    assert_output(src, "6\n");
}

#[test]
fn field_assignment_through_a_chain() {
    let src = "class Inner:\n  def __init__(self):\n    self.v = 10\n\nclass Outer:\n  def __init__(self):\n    self.inner = Inner()\n\no = Outer()\no.inner.v = 42\nprint o.inner.v";
    assert_output(src, "42\n");
}

#[test]
fn operator_methods_dispatch_on_instances() {
    let src = "class Vec:\n  def __init__(self, x):\n    self.x = x\n  def __add__(self, other):\n    return Vec(self.x + other.x)\n  def __mult__(self, other):\n    return Vec(self.x * other.x)\n  def __str__(self):\n    return str(self.x)\n\nprint Vec(2) + Vec(3)\nprint Vec(2) * Vec(3)";
    assert_output(src, "5\n6\n");
}

#[test]
fn comparison_methods_dispatch_on_instances() {
    let src = "class N:\n  def __init__(self, v):\n    self.v = v\n  def __eq__(self, other):\n    return self.v == other.v\n  def __lt__(self, other):\n    return self.v < other.v\n\nprint N(2) == N(2), N(2) != N(3), N(1) < N(2), N(1) >= N(2)";
    assert_output(src, "True True True False\n");
}

#[test]
fn greater_needs_equality() {
    // `>` is derived as "neither less nor equal", so an instance providing
    // only `__lt__` cannot answer it.
    let src = "class N:\n  def __init__(self, v):\n    self.v = v\n  def __lt__(self, other):\n    return self.v < other.v\n\nprint N(2) > N(1)";
    assert_error(src, "Cannot compare objects for equality");
}

#[test]
fn runtime_errors() {
    assert_error("print x", "Unknown variable 'x'");
    assert_error("class A:\n  def f(self):\n    return 1\n\na = A()\nprint a.g()",
                 "There is no method g in the class A");
    assert_error("class A:\n  def f(self):\n    return 1\n\na = A()\nprint a.f(1)",
                 "There is no method f in the class A");
    assert_error("class A:\n  def f(self):\n    return 1\n\na = A()\nprint a.x", "Unknown field 'x'");
    assert_error("x = 1\nx.f = 2", "Only class instances");
    assert_error("print 1 / 0", "Division by zero");
    assert_error("print 2147483647 + 1", "overflow");
    assert_error("print 1 + 'a'", "Type error");
    assert_error("print 1 == 'a'", "Cannot compare objects for equality");
    assert_error("print None < 1", "Cannot compare objects for less");
    assert_error("print -'a'", "Type error");
}

#[test]
fn parse_errors() {
    assert_error("a = A()", "Unknown class 'A'");
    assert_error("class B(Missing):\n  def f(self):\n    return 1", "Unknown class 'Missing'");
    assert_error("class A:\n  def f(self):\n    return 1\n  def f(self):\n    return 2",
                 "defined twice");
    assert_error("1 = 2", "Only variables and fields");
    assert_error("class A:\n  def f(this):\n    return 1", "Expected 'self'");
}

#[test]
fn lex_errors() {
    assert_error("x = 1 ! 2", "Unrecognized token");
    assert_error("s = 'abc", "Unrecognized token");
    assert_error("x = 9999999999", "Literal is too large");
    assert_error("if 1:\n   print 1", "Indentation");
    assert_error("if 1:\n    print 1", "Indentation");
}

#[test]
fn lexer_token_stream() {
    assert_eq!(tokens("a = 1"),
               vec![Token::Id("a".to_string()),
                    Token::Char('='),
                    Token::Number(1),
                    Token::Newline,
                    Token::Eof]);

    assert_eq!(tokens("a <= b"),
               vec![Token::Id("a".to_string()),
                    Token::LessOrEq,
                    Token::Id("b".to_string()),
                    Token::Newline,
                    Token::Eof]);

    assert_eq!(tokens("x == y != z >= w"),
               vec![Token::Id("x".to_string()),
                    Token::Eq,
                    Token::Id("y".to_string()),
                    Token::NotEq,
                    Token::Id("z".to_string()),
                    Token::GreaterOrEq,
                    Token::Id("w".to_string()),
                    Token::Newline,
                    Token::Eof]);
}

#[test]
fn lexer_indentation_tokens() {
    assert_eq!(tokens("if 1:\n  print 1\n"),
               vec![Token::If,
                    Token::Number(1),
                    Token::Char(':'),
                    Token::Newline,
                    Token::Indent,
                    Token::Print,
                    Token::Number(1),
                    Token::Newline,
                    Token::Dedent,
                    Token::Eof]);
}

#[test]
fn lexer_closes_every_open_block_at_eof() {
    let stream = tokens("if 1:\n  if 2:\n    print 3");
    let tail = &stream[stream.len() - 4..];
    assert_eq!(tail,
               &[Token::Newline, Token::Dedent, Token::Dedent, Token::Eof]);
}

#[test]
fn lexer_collapses_blank_lines() {
    assert_eq!(tokens("x = 1\n\n\nprint x\n"), tokens("x = 1\nprint x\n"));

    let stream = tokens("x = 1\n\nprint x\n");
    for pair in stream.windows(2) {
        assert_ne!(pair, &[Token::Newline, Token::Newline]);
    }
}

#[test]
fn lexer_skips_leading_blank_lines() {
    assert_eq!(tokens("\n\nx = 1\n"), tokens("x = 1\n"));
}

#[test]
fn lexer_treats_comments_as_whitespace() {
    assert_eq!(tokens("x = 1\n# note\nprint x\n"), tokens("x = 1\nprint x\n"));
    assert_eq!(tokens("x = 1 # note\nprint x\n"), tokens("x = 1\nprint x\n"));
    assert_eq!(tokens("# leading\nx = 1\n"), tokens("x = 1\n"));
}

#[test]
fn lexer_synthesizes_the_final_newline() {
    assert_eq!(tokens("x = 1"), tokens("x = 1\n"));
}

#[test]
fn comments_inside_blocks() {
    let src = "if 1:\n  # only a comment here\n  print 'ok'";
    assert_output(src, "ok\n");
}
