use std::thread;

use gambl::{
    Environment,
    error::{Error, LexError, ParseError, RuntimeError, SyntaxError},
    interpreter::{
        environment::DEFAULT_CALL_LIMIT,
        evaluator::function::{core::BUILTIN_FUNCTIONS, print::format_arguments},
        value::core::Value,
    },
    run, run_script,
};
use pretty_assertions::assert_eq;

fn eval(src: &str) -> Result<Option<Value>, Error> {
    run(src, &Environment::with_builtins())
}

fn assert_value(src: &str, expected: impl Into<Value>) {
    match eval(src) {
        Ok(value) => assert_eq!(value, Some(expected.into()), "script: {src}"),
        Err(e) => panic!("Script failed: {src}\nError: {e}"),
    }
}

fn assert_int(src: &str, expected: i64) {
    assert_value(src, Value::Integer(expected));
}

fn assert_no_value(src: &str) {
    match eval(src) {
        Ok(value) => assert_eq!(value, None, "script: {src}"),
        Err(e) => panic!("Script failed: {src}\nError: {e}"),
    }
}

fn runtime_error(src: &str) -> RuntimeError {
    match eval(src) {
        Err(Error::Runtime(e)) => e,
        other => panic!("Script {src:?} was expected to fail at runtime, got {other:?}"),
    }
}

fn assert_type_error(src: &str) {
    let error = runtime_error(src);
    assert!(matches!(error, RuntimeError::TypeError { .. }),
            "script {src:?} raised {error:?}");
}

fn ints(values: &[i64]) -> Value {
    Value::from(values.iter().copied().map(Value::Integer).collect::<Vec<_>>())
}

#[test]
fn precedence() {
    assert_int("1 + 2 * 3", 7);
    assert_int("(1 + 2) + (3 + 4)", 10);
    assert_int("2 ^ 3 ^ 2", 512);
    assert_int("10 - 4 - 3", 3);
    assert_int("2 * 3 ^ 2", 18);
    assert_value("1 + 1 == 2", true);
    assert_value("1 < 2 and 3 < 2", false);
}

#[test]
fn unary_operators() {
    assert_int("-3 + 5", 2);
    assert_int("-2 ^ 2", 4);
    assert_int("a = [4, 5]; -a[1]", -5);
    assert_value("not 0", true);
    assert_value("not not 7", true);
    assert_value("not [1]", false);
}

#[test]
fn assignment_and_reuse() {
    assert_int("x = 4; x + 5", 9);
    assert_int("a = 2; b = a * 5; b", 10);
    assert_int("x = 1; x = x + 1; x = x * 10; x", 20);
    assert_no_value("x = 4");
}

#[test]
fn undefined_variable() {
    assert_eq!(runtime_error("y + 2"),
               RuntimeError::UndefinedVariable { name: "y".to_string() });
}

#[test]
fn conditionals() {
    assert_int("if 1 < 2 then 3 else 4", 3);
    assert_int("if 2 < 1 then 3 else 4", 4);
    assert_int("x = 0; if x then 1 else 2", 2);
    assert_int("if \"\" then 1 else 2", 2);
    assert_int("if [] then 1 else 2", 2);
    assert_int("if [0] then 1 else 2", 1);
    assert_no_value("if 0 then 3");
    assert_int("if 1 then x = 5 else x = 6; x", 5);
}

#[test]
fn loops() {
    assert_int("i = 0; while i < 3 : i = i + 1; i", 3);
    assert_int("i = 5; while i < 0 : i = i + 1; i", 5);
    assert_int("i = 0; s = 0; def step(ref i, ref s) : i = i + 1; s = s + i; len([]); \
                while i < 5 : step(i, s); s",
               15);
}

#[test]
fn functions_and_recursion() {
    assert_int("def factorial(n) : if n <= 1 then return 1 else return n * \
                factorial(n - 1); factorial(4)",
               24);
    assert_int("def fib(n) : if n < 2 then return n else return fib(n - 1) + fib(n - 2); \
                fib(15)",
               610);
    assert_int("def add(a, b) : return a + b; add(1, 2)", 3);
    assert_int("def f() : x = 1; x = x + 1; return x * 10; f()", 20);
}

#[test]
fn function_without_return_yields_last_statement() {
    assert_int("def f(n) : n * 2; f(21)", 42);
    assert_no_value("def f(n) : m = n; f(1)");
}

#[test]
fn return_ends_the_call() {
    assert_int("def f() : return 1; return 2; f()", 1);
}

#[test]
fn value_and_reference_parameters() {
    assert_int("x = 10; def f(y) : y = y + 5; f(x); x", 10);
    assert_int("x = 10; def f(ref y) : y = y + 5; f(x); x", 15);
    assert_value("a = 1; b = 2; def swap(ref p, ref q) : t = p; p = q; q = t; swap(a, b); \
                  [a, b]",
                 ints(&[2, 1]));
}

#[test]
fn reference_chains_write_through() {
    assert_int("x = 1; def inner(ref b) : b = b + 1; def outer(ref a) : inner(a); outer(x); x",
               2);
}

#[test]
fn ref_parameter_needs_a_variable() {
    assert_eq!(runtime_error("def f(ref a) : a = 1; f(2)"),
               RuntimeError::RefArgument { function: "f".to_string(),
                                           param:    "a".to_string(), });
}

#[test]
fn array_aliasing() {
    assert_value("arr = [1,2,3]; def set0(a) : a[0] = 99; set0(arr); arr",
                 ints(&[99, 2, 3]));
    assert_value("a = [1, 2]; b = a; b[1] = 5; a", ints(&[1, 5]));
    assert_value("m = [[1, 2], [3, 4]]; m[1][0] = 7; m[1]", ints(&[7, 4]));
}

#[test]
fn indexing() {
    assert_int("a = [10, 20, 30]; a[0] + a[2]", 40);
    assert_int("a = [10, 20, 30]; a[-1]", 30);
    assert_int("a = [10, 20, 30]; a[1 + 1]", 30);
    assert_eq!(runtime_error("a = [1, 2, 3]; a[3]"),
               RuntimeError::IndexOutOfRange { index: 3, len: 3 });
    assert_eq!(runtime_error("a = [1, 2, 3]; a[-4]"),
               RuntimeError::IndexOutOfRange { index: -4, len: 3 });
    assert_type_error("a = [1]; a[\"0\"]");
    assert_type_error("x = 5; x[0]");
}

#[test]
fn strings_are_immutable() {
    assert_value("s = \"cat\"; s[1]", "a");
    assert_value("s = \"cat\"; s[-1]", "t");
    assert_type_error("s = \"cat\"; s[1] = \"o\"");
}

#[test]
fn string_and_array_operators() {
    assert_value("\"ab\" + \"cd\"", "abcd");
    assert_value("\"ab\" * 3", "ababab");
    assert_value("2 * \"xy\"", "xyxy");
    assert_value("[1] + [2, 3]", ints(&[1, 2, 3]));
    assert_value("[0] * 3", ints(&[0, 0, 0]));
    assert_value("\"abc\" < \"abd\"", true);
    assert_value("[1, 2] < [1, 3]", true);
    assert_type_error("1 + \"a\"");
    assert_type_error("\"a\" - \"b\"");
    assert_type_error("1 < \"a\"");
}

#[test]
fn repetition_too_large_to_allocate() {
    assert!(matches!(runtime_error("\"ab\" * 9223372036854775807"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("9223372036854775807 * [1, 2]"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("\"ab\" * 4611686018427387904"),
                     RuntimeError::Overflow { .. }));
    assert_value("\"\" * 9223372036854775807", "");
    assert_value("[] * 9223372036854775807", ints(&[]));
    assert_value("\"ab\" * -2", "");
}

#[test]
fn self_containing_arrays() {
    let cyclic = "a = [1]; a[0] = a; b = [1]; b[0] = b; ";

    assert_value(&format!("{cyclic}a == b"), true);
    assert_value(&format!("{cyclic}a == a"), true);
    assert_value(&format!("{cyclic}a < b"), false);
    assert_value(&format!("{cyclic}a <= b"), true);
    assert_value(&format!("{cyclic}a == [1]"), false);

    let uneven = "a = [0, 1]; a[0] = a; b = [0, 2]; b[0] = b; ";
    assert_value(&format!("{uneven}a == b"), false);
    assert_value(&format!("{uneven}a < b"), true);
    assert_value(&format!("{uneven}b > a"), true);

    let a = eval("a = [1]; a[0] = a; a").unwrap().unwrap();
    let b = eval("b = [1]; b[0] = b; b").unwrap().unwrap();
    assert_eq!(a, b);
    assert_eq!(a.to_string(), "[[...]]");
    assert_eq!(format!("{a:?}"), "Array([Array([...])])");
}

#[test]
fn equality_is_structural() {
    assert_value("[1, [2, \"x\"]] == [1, [2, \"x\"]]", true);
    assert_value("\"a\" == 1", false);
    assert_value("(1 < 2) == 1", true);
    assert_value("[1] == [2]", false);
}

#[test]
fn booleans_count_as_integers() {
    assert_value("1 < 2", true);
    assert_int("(1 < 2) + 1", 2);
    assert_int("(2 < 1) * 5", 0);
}

#[test]
fn and_or_return_an_operand() {
    assert_int("0 or 5", 5);
    assert_int("3 or 5", 3);
    assert_int("3 and 4", 4);
    assert_int("0 and 4", 0);
    assert_value("\"\" or \"fallback\"", "fallback");
}

#[test]
fn integer_arithmetic() {
    assert_int("7 / 2", 3);
    assert_int("-7 / 2", -4);
    assert_int("-7 % 3", 2);
    assert_int("7 % -3", -2);
    assert_int("2 ^ 0", 1);
    assert_eq!(runtime_error("1 / 0"), RuntimeError::DivisionByZero);
    assert_eq!(runtime_error("1 % 0"), RuntimeError::DivisionByZero);
    assert!(matches!(runtime_error("9223372036854775807 + 1"),
                     RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("2 ^ 64"), RuntimeError::Overflow { .. }));
    assert!(matches!(runtime_error("2 ^ -1"), RuntimeError::InvalidArgument { .. }));
}

#[test]
fn len_builtin() {
    assert_int("len([1,2,3])", 3);
    assert_int("len(\"cat\")", 3);
    assert_int("len([])", 0);
    assert_int("a = [1, 2]; len(a + a)", 4);
    assert_type_error("len(42)");
    assert_eq!(runtime_error("len(1, 2)"),
               RuntimeError::ArityMismatch { name:     "len".to_string(),
                                             expected: 1,
                                             found:    2, });
}

#[test]
fn base_environment_holds_every_builtin() {
    let env = Environment::with_builtins();
    for name in BUILTIN_FUNCTIONS {
        assert!(env.contains(name), "missing builtin {name}");
    }
    assert_int("len = 3; len", 3);
}

#[test]
fn print_returns_no_value() {
    assert_no_value("print(1, \"two\", [3])");
    assert!(matches!(runtime_error("x = print(1)"), RuntimeError::MissingValue { .. }));
}

#[test]
fn print_formatting() {
    let args = [Value::from("a"),
                Value::from(vec![Value::from("b"), Value::Integer(1)]),
                Value::Bool(true),
                Value::Integer(-3)];

    assert_eq!(format_arguments(&args), "a [\"b\", 1] true -3");
    assert_eq!(format_arguments(&[]), "");
}

#[test]
fn arity_checking() {
    let error = runtime_error("def f(a, b) : return a + b; f(1)");
    assert_eq!(error,
               RuntimeError::ArityMismatch { name:     "f".to_string(),
                                             expected: 2,
                                             found:    1, });

    let error = runtime_error("def f(a, b) : return a + b; f(1, 2, 3)");
    assert_eq!(error,
               RuntimeError::ArityMismatch { name:     "f".to_string(),
                                             expected: 2,
                                             found:    3, });
    assert!(error.to_string().contains('2'));
    assert!(error.to_string().contains('3'));
}

#[test]
fn calling_a_non_function() {
    assert_eq!(runtime_error("x = 1; x(2)"),
               RuntimeError::NotAFunction { name: "x".to_string() });
}

#[test]
fn missing_values() {
    assert!(matches!(runtime_error("def f() : y = 1; f() + 1"),
                     RuntimeError::MissingValue { .. }));
    assert_int("def f() : y = 1; f(); if f() then 1 else 2", 2);
}

#[test]
fn closures_see_the_defining_environment() {
    assert_int("x = 1; def f() : return x; f()", 1);
    assert_eq!(runtime_error("def f() : return x; f()"),
               RuntimeError::UndefinedVariable { name: "x".to_string() });
    // h reads x from where it was defined, not from f's frame.
    assert_int("x = 1; def h() : return x; def f() : x = 2; return h(); f()", 1);
    assert_int("def h() : return x; len([]); x = 3; def f() : x = 2; return h(); f()", 3);
}

#[test]
fn function_frames_do_not_leak() {
    assert_int("x = 1; def f() : x = 5; f(); x", 1);
    assert_eq!(runtime_error("def f(n) : return n; f(3); n"),
               RuntimeError::UndefinedVariable { name: "n".to_string() });
}

#[test]
fn functions_are_values() {
    assert_int("def f() : return 7; f(); g = f; g()", 7);
    assert_value("def f() : return 7; len([]); f == f", true);
}

#[test]
fn failed_programs_keep_earlier_effects() {
    let env = Environment::with_builtins();

    assert!(run("x = 1; y + 1; x = 2", &env).is_err());
    assert_eq!(env.get("x").unwrap(), Value::Integer(1));
    assert!(!env.contains("y"));
}

#[test]
fn environment_persists_between_runs() {
    let env = Environment::with_builtins();

    assert_eq!(run("def sq(n) : return n * n", &env).unwrap(), None);
    assert_eq!(run("sq(9)", &env).unwrap(), Some(Value::Integer(81)));
}

#[test]
fn recursion_limit() {
    let handle = thread::Builder::new().stack_size(256 * 1024 * 1024)
                                       .spawn(|| {
                                           let env = Environment::with_call_limit(64);
                                           env.install_builtins();
                                           let result = run("def f(n) : return f(n + 1); f(0)",
                                                            &env).map(|_| ());
                                           (result, env.call_depth())
                                       })
                                       .unwrap();
    let (result, depth) = handle.join().unwrap();

    assert_eq!(result, Err(Error::Runtime(RuntimeError::RecursionLimit { limit: 64 })));
    assert_eq!(depth, 0);
}

#[test]
fn default_recursion_limit_allows_deep_recursion() {
    let handle = thread::Builder::new().stack_size(256 * 1024 * 1024)
                                       .spawn(|| {
                                           eval("def count(n) : if n == 0 then return 0 else \
                                                 return 1 + count(n - 1); count(500)")
                                           .map(|value| value.map(|v| v.to_string()))
                                       })
                                       .unwrap();

    assert_eq!(handle.join().unwrap(), Ok(Some("500".to_string())));
}

#[test]
fn default_recursion_limit_is_enforced() {
    let handle = thread::Builder::new().stack_size(256 * 1024 * 1024)
                                       .spawn(|| {
                                           eval("def f(n) : return f(n + 1); f(0)").map(|_| ())
                                       })
                                       .unwrap();

    assert_eq!(handle.join().unwrap(),
               Err(Error::Runtime(RuntimeError::RecursionLimit { limit: DEFAULT_CALL_LIMIT })));
}

#[test]
fn run_script_uses_the_given_environment() {
    let env = Environment::with_builtins();

    assert_eq!(run_script("x = 2; x * 21", &env, false).unwrap(),
               Some(Value::Integer(42)));
    assert_eq!(env.get("x").unwrap(), Value::Integer(2));
    assert!(run_script("y + 1", &env, true).is_err());
}

#[test]
fn parse_errors_are_reported() {
    assert!(matches!(eval("1 2"),
                     Err(Error::Parse(ParseError::Syntax(SyntaxError::TrailingInput { .. })))));
    assert!(matches!(eval("x = 1.5"),
                     Err(Error::Parse(ParseError::Lex(LexError::FractionalLiteral { .. })))));
    assert!(matches!(eval("(1 + 2"),
                     Err(Error::Parse(ParseError::Syntax(SyntaxError::UnexpectedEndOfInput { .. })))));
}

#[test]
fn empty_program() {
    assert_no_value("");
    assert_no_value("# only a comment");
}
