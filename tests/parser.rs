use gambl::{
    ast::{BinaryOperator, Node, Param, UnaryOperator},
    error::{ParseError, SyntaxError},
    parse,
};
use pretty_assertions::assert_eq;

fn num(n: i64) -> Box<Node> {
    Box::new(Node::Number(n))
}

fn var(name: &str) -> Box<Node> {
    Box::new(Node::Variable(name.to_string()))
}

fn bin(left: Box<Node>, op: BinaryOperator, right: Box<Node>) -> Box<Node> {
    Box::new(Node::BinOp { left, op, right })
}

fn syntax_error(src: &str) -> SyntaxError {
    match parse(src) {
        Err(ParseError::Syntax(e)) => e,
        other => panic!("{src:?} was expected to be a syntax error, got {other:?}"),
    }
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    assert_eq!(parse("1 + 2 * 3").unwrap(),
               *bin(num(1), BinaryOperator::Add, bin(num(2), BinaryOperator::Mul, num(3))));
}

#[test]
fn power_is_right_associative() {
    assert_eq!(parse("2 ^ 3 ^ 2").unwrap(),
               *bin(num(2), BinaryOperator::Pow, bin(num(3), BinaryOperator::Pow, num(2))));
}

#[test]
fn subtraction_is_left_associative() {
    assert_eq!(parse("a - b - c").unwrap(),
               *bin(bin(var("a"), BinaryOperator::Sub, var("b")),
                    BinaryOperator::Sub,
                    var("c")));
}

#[test]
fn precedence_ladder() {
    // or < and < == < relational < additive
    let expected = bin(var("a"),
                       BinaryOperator::Or,
                       bin(var("b"),
                           BinaryOperator::And,
                           bin(var("c"),
                               BinaryOperator::Equal,
                               bin(var("d"),
                                   BinaryOperator::Less,
                                   bin(var("e"), BinaryOperator::Add, num(1))))));

    assert_eq!(parse("a or b and c == d < e + 1").unwrap(), *expected);
}

#[test]
fn unary_minus_takes_an_indexed_factor() {
    let indexed = Box::new(Node::Index { base:  var("a"),
                                         index: num(0), });
    assert_eq!(parse("-a[0]").unwrap(),
               Node::UnaryOp { op:      UnaryOperator::Negate,
                               operand: indexed, });

    let negated = Box::new(Node::UnaryOp { op:      UnaryOperator::Negate,
                                           operand: num(2), });
    assert_eq!(parse("-2 ^ 2").unwrap(),
               *bin(negated, BinaryOperator::Pow, num(2)));
}

#[test]
fn chained_indices_fold_left() {
    let inner = Box::new(Node::Index { base:  var("m"),
                                       index: num(1), });
    assert_eq!(parse("m[1][2]").unwrap(),
               Node::Index { base:  inner,
                             index: num(2), });
}

#[test]
fn brackets_accept_full_expressions() {
    assert_eq!(parse("a[i == 0]").unwrap(),
               Node::Index { base:  var("a"),
                             index: bin(var("i"), BinaryOperator::Equal, num(0)), });
    assert_eq!(parse("f(x or y)").unwrap(),
               Node::Call { name: "f".to_string(),
                            args: vec![*bin(var("x"), BinaryOperator::Or, var("y"))], });
}

#[test]
fn assignments() {
    assert_eq!(parse("x = 1").unwrap(),
               Node::Assignment { name:  "x".to_string(),
                                  value: num(1), });

    let base = Box::new(Node::Index { base:  var("m"),
                                      index: num(0), });
    assert_eq!(parse("m[0][1] = 5").unwrap(),
               Node::AssignIndex { base,
                                   index: num(1),
                                   expr: num(5) });
}

#[test]
fn indexed_expression_is_not_an_assignment() {
    assert_eq!(parse("a[0] + 1").unwrap(),
               *bin(Box::new(Node::Index { base:  var("a"),
                                           index: num(0), }),
                    BinaryOperator::Add,
                    num(1)));
}

#[test]
fn if_branches_are_optional() {
    assert_eq!(parse("if x then 1").unwrap(),
               Node::If { condition:   var("x"),
                          then_branch: Some(num(1)),
                          else_branch: None, });
    assert_eq!(parse("if x else 2").unwrap(),
               Node::If { condition:   var("x"),
                          then_branch: None,
                          else_branch: Some(num(2)), });
}

#[test]
fn while_loop() {
    let body = Box::new(Node::Assignment { name:  "i".to_string(),
                                           value: bin(var("i"), BinaryOperator::Add, num(1)), });
    assert_eq!(parse("while i < 3 : i = i + 1").unwrap(),
               Node::While { condition: bin(var("i"), BinaryOperator::Less, num(3)),
                             body });
}

#[test]
fn function_definition() {
    let ast = parse("def f(a, ref b) : b = a; return b").unwrap();
    let expected =
        Node::FunctionDef { name:       "f".to_string(),
                            params:     vec![Param::value("a"), Param::reference("b")],
                            statements: vec![Node::Assignment { name:  "b".to_string(),
                                                                value: var("a"), },
                                             Node::ReturnValue(var("b"))], };

    assert_eq!(ast, expected);
}

#[test]
fn function_body_ends_before_a_call_or_def() {
    let Node::Block(statements) = parse("def f() : x = 1; y = 2; f(); def g() : 3; g()").unwrap()
    else {
        panic!("expected a block");
    };

    assert_eq!(statements.len(), 4);
    assert!(matches!(&statements[0], Node::FunctionDef { statements, .. } if statements.len() == 2));
    assert!(matches!(&statements[1], Node::Call { name, .. } if name == "f"));
    assert!(matches!(&statements[2], Node::FunctionDef { name, .. } if name == "g"));
    assert!(matches!(&statements[3], Node::Call { name, .. } if name == "g"));
}

#[test]
fn function_body_absorbs_trailing_semicolon() {
    let ast = parse("def f() : return 1;").unwrap();
    assert!(matches!(ast, Node::FunctionDef { statements, .. } if statements.len() == 1));
}

#[test]
fn program_shapes() {
    assert_eq!(parse("").unwrap(), Node::Block(vec![]));
    assert_eq!(parse("7;").unwrap(), Node::Number(7));
    assert_eq!(parse("1; 2").unwrap(),
               Node::Block(vec![Node::Number(1), Node::Number(2)]));
}

#[test]
fn syntax_errors() {
    assert_eq!(syntax_error("1 2"),
               SyntaxError::TrailingInput { found:  "number 2".to_string(),
                                            offset: 2, });
    assert!(matches!(syntax_error("(1"), SyntaxError::UnexpectedEndOfInput { .. }));
    assert!(matches!(syntax_error("1 + )"), SyntaxError::UnexpectedToken { offset: 4, .. }));
    assert!(matches!(syntax_error("def (x) : x"), SyntaxError::UnexpectedToken { .. }));
    assert!(matches!(syntax_error("while x  x"), SyntaxError::UnexpectedToken { .. }));
    assert!(matches!(syntax_error("[1, 2"), SyntaxError::UnexpectedEndOfInput { .. }));
}

#[test]
fn printed_programs_parse_back() {
    let programs = ["1 + 2 * 3",
                    "x = 4; x + 5",
                    "2 ^ 3 ^ 2",
                    "-a[0] + not b",
                    "s = \"a \\\"quoted\\\" \\n line\"; s[1]",
                    "if 1 < 2 then 3 else 4",
                    "if a then if b then 1 else 2",
                    "i = 0; while i < 3 : i = i + 1; i",
                    "def factorial(n) : if n <= 1 then return 1 else return n * \
                     factorial(n - 1); factorial(4)",
                    "x = 10; def f(ref y) : y = y + 5; f(x); x",
                    "arr = [1, [2, 3], []]; arr[1][0] = 99; len(arr)"];

    for program in programs {
        let ast = parse(program).unwrap();
        let printed = ast.to_string();
        assert_eq!(parse(&printed).unwrap(), ast, "{program} printed as {printed}");
    }
}
