use astfrom::{parse_fragment, promote, reduce, source, Category};
use rstest::rstest;
use syntax::{parse_expr, parse_file, Block, Decl, Node, Parse, Stmt};

#[rstest]
#[case("foo", "Ident")]
#[case("myIdent", "Ident")]
#[case("int64", "Ident")]
#[case("42", "BasicLit")]
#[case("myIdent()", "CallExpr")]
#[case("foo := 42", "AssignStmt")]
#[case("{ foo := 42 }", "AssignStmt")]
#[case("type foo string", "GenDecl")]
#[case("const int = 5", "GenDecl")]
#[case("if true {}", "IfStmt")]
#[case("if true {};", "IfStmt")]
#[case("{ var i int64 = 10; s := i+1 }", "BlockStmt")]
#[case("{ var i int64 = 10; s := i+1 };", "BlockStmt")]
#[case("package main", "File")]
#[case("package main;", "File")]
#[case("package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n", "File")]
#[case("func f() {}\nfunc g() {}", "FuncDecl")]
#[case("x++", "IncDecStmt")]
#[case("for {}", "ForStmt")]
fn fragments(#[case] input: &str, #[case] kind: &str) {
    let node = parse_fragment(input);
    assert_eq!(node.kind(), kind, "{:?} gave {:#?}", input, node);
}

#[test]
fn empty_fragment_is_blank() {
    let text = promote("", Category::Expr, Category::Pkg);
    let node = reduce(Node::File(parse_file(&text).unwrap()));

    let Node::Expr(syntax::Expr::Ident(ident)) = node else {
        panic!("expected an identifier, got {:?}", node);
    };
    assert!(ident.is_blank());
}

#[test]
fn top_level_functions_keep_the_first() {
    let node = parse_fragment("func f() {}\nfunc g() {}");

    let Node::Decl(Decl::Func(func)) = node else {
        panic!("expected a function, got {:?}", node);
    };
    assert_eq!(func.name.as_str(), "f");
}

#[test]
fn deep_fragments_are_errors() {
    let chain = format!("if x {{}}{}", " else if x {}".repeat(3000));
    assert!(source(&chain).is_err());

    let blocks = format!("{}{}", "{".repeat(10_000), "}".repeat(10_000));
    assert!(source(&blocks).is_err());

    let sum = format!("1{}", "+1".repeat(20_000));
    assert!(matches!(parse_fragment(&sum), Node::Expr(syntax::Expr::Ident(_))));
}

#[test]
fn package_files_are_not_reduced() {
    let parsed = source("package main").unwrap();
    assert_eq!(reduce(parsed.node.clone()), parsed.node);
}

#[rstest]
#[case("myIdent", "myIdent")]
#[case("1+2", "1 + 2")]
#[case("func(){}", "func() {\n}")]
#[case("var foo = \"str\"", "var foo = \"str\"")]
#[case("{ var foo = \"str\"; i := 0 }", "{\n\tvar foo = \"str\"\n\ti := 0\n}")]
fn printed(#[case] input: &str, #[case] expected: &str) {
    assert_eq!(parse_fragment(input).to_string(), expected);
}

#[test]
fn promotion_order() {
    let text = promote("x", Category::Expr, Category::Pkg);

    let package = text.find("package astfrom").unwrap();
    let function = text.find("func astfromFunc() ").unwrap();
    let brace = text.find('{').unwrap();
    let assign = text.find("_ = x").unwrap();
    assert!(package < function && function < brace && brace < assign);

    assert_eq!(text.matches("package").count(), 1);
    assert_eq!(text.matches("func").count(), 1);
    assert_eq!(text.matches('{').count(), 1);
    assert_eq!(text.matches("_ =").count(), 1);
}

/// Does `text` parse as a whole `category`?
fn parses_at(text: &str, category: Category) -> bool {
    match category {
        Category::Node => false,
        Category::Expr => parse_expr(text).is_ok(),
        Category::Decl | Category::Stmt => Stmt::parse(text).is_ok(),
        Category::Block => Block::parse(text).is_ok(),
        Category::File => Decl::parse(text).is_ok(),
        Category::Pkg => parse_file(text).is_ok(),
    }
}

#[rstest]
#[case(Category::Expr, "x + 1")]
#[case(Category::Decl, "var x = 1")]
#[case(Category::Stmt, "x++")]
#[case(Category::Block, "{\n\tx++\n}")]
#[case(Category::File, "func f() {}")]
#[case(Category::Pkg, "package p")]
fn promotion_preserves_validity(#[case] from: Category, #[case] text: &str) {
    assert!(parses_at(text, from), "{:?} isn't a valid {}", text, from);

    for to in Category::LADDER.into_iter().filter(|to| *to >= from) {
        let promoted = promote(text, from, to);
        assert!(
            parses_at(&promoted, to),
            "{:?} promoted from {} to {} gave {:?}",
            text,
            from,
            to,
            promoted
        );
    }
}

mod properties {
    use proptest::prelude::*;

    use super::*;

    /// Small Go expressions, always valid.
    fn expression() -> impl Strategy<Value = String> {
        let leaf = prop_oneof![
            "[a-z][a-zA-Z0-9_]{0,8}".prop_filter("not a keyword", |s| {
                !matches!(
                    s.as_str(),
                    "break" | "case" | "chan" | "const" | "continue" | "default"
                        | "defer" | "else" | "for" | "func" | "go" | "goto"
                        | "if" | "import" | "interface" | "map" | "package"
                        | "range" | "return" | "select" | "struct" | "switch"
                        | "type" | "var"
                )
            }),
            "[1-9][0-9]{0,6}",
            "\"[a-z ]{0,10}\"",
        ];

        leaf.prop_recursive(4, 32, 3, |inner| {
            prop_oneof![
                (inner.clone(), "[-+*/%<>]|==|!=|&&|\\|\\|", inner.clone())
                    .prop_map(|(a, op, b)| format!("{} {} {}", a, op, b)),
                inner.clone().prop_map(|e| format!("({})", e)),
                inner.clone().prop_map(|e| format!("!{}", e)),
                prop::collection::vec(inner, 0..3)
                    .prop_map(|args| format!("f({})", args.join(", "))),
            ]
        })
    }

    proptest! {
        #[test]
        fn expressions_stay_expressions(text in expression()) {
            let node = parse_fragment(&text);
            prop_assert!(matches!(node, Node::Expr(_)), "{:?} gave {:?}", text, node);
        }

        #[test]
        fn reduce_is_idempotent(text in expression()) {
            let parsed = source(&text).unwrap();
            let once = reduce(parsed.node);
            prop_assert_eq!(reduce(once.clone()), once);
        }
    }
}
