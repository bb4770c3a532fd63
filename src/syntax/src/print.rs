//! Printing trees back out as Go source.
//!
//! The output follows `gofmt`'s layout for the common cases: tabs for
//! indentation, one statement per line, spaces around binary operators, and
//! `{` on the same line as whatever it belongs to. It doesn't try to line up
//! columns or keep comments, since the tree doesn't have any.

use std::fmt;

use crate::{
    control::{CaseClause, CommClause},
    Block, ChanDir, Decl, Expr, Field, File, FuncDecl, FuncType, GenDecl,
    Node, Spec, Stmt,
};

/// Render a node as Go source.
///
/// # Example
///
/// ```
/// let expr = syntax::parse_expr("1+2").unwrap();
/// assert_eq!(syntax::print::print(&expr.into()), "1 + 2");
/// ```
pub fn print(node: &Node) -> String {
    let mut printer = Printer::new();
    printer.node(node);
    printer.finish()
}

/// Writes syntax into a `String`, keeping track of indentation.
#[derive(Debug, Default)]
pub struct Printer {
    out: String,
    indent: usize,
}

impl Printer {
    pub fn new() -> Printer {
        Printer::default()
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn write(&mut self, s: &str) {
        self.out.push_str(s);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push('\t');
        }
    }

    fn indented(&mut self, inner: impl FnOnce(&mut Self)) {
        self.indent += 1;
        inner(self);
        self.indent -= 1;
    }

    fn separated<T>(
        &mut self,
        items: &[T],
        sep: &str,
        mut each: impl FnMut(&mut Self, &T),
    ) {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.write(sep);
            }
            each(self, item);
        }
    }

    pub fn node(&mut self, node: &Node) {
        match node {
            Node::File(f) => self.file(f),
            Node::Decl(d) => self.decl(d),
            Node::Stmt(s) => self.stmt(s),
            Node::Expr(e) => self.expr(e),
        }
    }

    pub fn file(&mut self, file: &File) {
        self.write("package ");
        self.write(file.name.as_str());

        for decl in &file.decls {
            self.write("\n");
            self.newline();
            self.decl(decl);
        }

        self.write("\n");
    }

    pub fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Gen(g) => self.gen_decl(g),
            Decl::Func(f) => self.func_decl(f),
        }
    }

    fn gen_decl(&mut self, decl: &GenDecl) {
        self.write(decl.keyword.as_str());

        if decl.parens.is_none() && decl.specs.len() == 1 {
            self.write(" ");
            self.spec(&decl.specs[0]);
            return;
        }

        self.write(" (");
        self.indented(|p| {
            for spec in &decl.specs {
                p.newline();
                p.spec(spec);
            }
        });
        self.newline();
        self.write(")");
    }

    fn spec(&mut self, spec: &Spec) {
        match spec {
            Spec::Import(i) => {
                if let Some(name) = &i.name {
                    self.write(name.as_str());
                    self.write(" ");
                }
                self.write(i.path.value());
            }
            Spec::Value(v) => {
                self.separated(&v.names, ", ", |p, n| p.write(n.as_str()));
                if let Some(ty) = &v.ty {
                    self.write(" ");
                    self.expr(ty);
                }
                if !v.values.is_empty() {
                    self.write(" = ");
                    self.exprs(&v.values);
                }
            }
            Spec::Type(t) => {
                self.write(t.name.as_str());
                self.write(if t.alias { " = " } else { " " });
                self.expr(&t.ty);
            }
        }
    }

    fn func_decl(&mut self, decl: &FuncDecl) {
        self.write("func ");

        if let Some(recv) = &decl.recv {
            self.write("(");
            self.fields(recv);
            self.write(") ");
        }

        self.write(decl.name.as_str());
        self.signature(&decl.ty);

        if let Some(body) = &decl.body {
            self.write(" ");
            self.block(body);
        }
    }

    pub fn block(&mut self, block: &Block) {
        self.write("{");
        self.statements(&block.statements);
        self.newline();
        self.write("}");
    }

    /// Each statement on its own line, one level in.
    fn statements(&mut self, statements: &[Stmt]) {
        self.indented(|p| {
            for stmt in statements {
                if matches!(stmt, Stmt::Empty(_)) {
                    continue;
                }
                p.newline();
                p.stmt(stmt);
            }
        });
    }

    pub fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Decl(d) => self.gen_decl(d),
            Stmt::Empty(_) => {}
            Stmt::Labeled(l) => {
                // Labels sit one level left of the statement they label.
                if self.out.ends_with('\t') {
                    self.out.pop();
                }

                self.write(l.label.as_str());
                self.write(":");

                if matches!(*l.stmt, Stmt::Empty(_)) {
                    return;
                }

                if self.indent == 0 {
                    self.indented(|p| {
                        p.newline();
                        p.stmt(&l.stmt);
                    });
                } else {
                    self.newline();
                    self.stmt(&l.stmt);
                }
            }
            Stmt::Expr(e) => self.expr(e),
            Stmt::Send(s) => {
                self.expr(&s.channel);
                self.write(" <- ");
                self.expr(&s.value);
            }
            Stmt::IncDec(i) => {
                self.expr(&i.target);
                self.write(i.op.as_str());
            }
            Stmt::Assign(a) => {
                self.exprs(&a.lhs);
                self.write(" ");
                self.write(a.op.as_str());
                self.write(" ");
                self.exprs(&a.rhs);
            }
            Stmt::Go(g) => {
                self.write("go ");
                self.expr(&g.call);
            }
            Stmt::Defer(d) => {
                self.write("defer ");
                self.expr(&d.call);
            }
            Stmt::Return(r) => {
                self.write("return");
                if !r.results.is_empty() {
                    self.write(" ");
                    self.exprs(&r.results);
                }
            }
            Stmt::Branch(b) => {
                self.write(b.keyword.as_str());
                if let Some(label) = &b.label {
                    self.write(" ");
                    self.write(label.as_str());
                }
            }
            Stmt::Block(b) => self.block(b),
            Stmt::If(i) => {
                self.write("if ");
                if let Some(init) = &i.init {
                    self.stmt(init);
                    self.write("; ");
                }
                self.expr(&i.cond);
                self.write(" ");
                self.block(&i.body);
                if let Some(branch) = &i.else_branch {
                    self.write(" else ");
                    self.stmt(branch);
                }
            }
            Stmt::Switch(s) => {
                self.write("switch ");
                if let Some(init) = &s.init {
                    self.stmt(init);
                    self.write("; ");
                }
                if let Some(tag) = &s.tag {
                    self.expr(tag);
                    self.write(" ");
                }
                self.case_clauses(&s.clauses);
            }
            Stmt::TypeSwitch(s) => {
                self.write("switch ");
                if let Some(init) = &s.init {
                    self.stmt(init);
                    self.write("; ");
                }
                self.stmt(&s.guard);
                self.write(" ");
                self.case_clauses(&s.clauses);
            }
            Stmt::Select(s) => {
                self.write("select {");
                for clause in &s.clauses {
                    self.comm_clause(clause);
                }
                self.newline();
                self.write("}");
            }
            Stmt::For(f) => {
                self.write("for ");
                match (&f.init, &f.cond, &f.post) {
                    (None, None, None) => {}
                    (None, Some(cond), None) => {
                        self.expr(cond);
                        self.write(" ");
                    }
                    (init, cond, post) => {
                        if let Some(init) = init {
                            self.stmt(init);
                        }
                        self.write("; ");
                        if let Some(cond) = cond {
                            self.expr(cond);
                        }
                        self.write("; ");
                        if let Some(post) = post {
                            self.stmt(post);
                            self.write(" ");
                        }
                    }
                }
                self.block(&f.body);
            }
            Stmt::Range(r) => {
                self.write("for ");
                if let Some(key) = &r.key {
                    self.expr(key);
                    if let Some(value) = &r.value {
                        self.write(", ");
                        self.expr(value);
                    }
                    self.write(if r.define { " := " } else { " = " });
                }
                self.write("range ");
                self.expr(&r.expr);
                self.write(" ");
                self.block(&r.body);
            }
        }
    }

    fn case_clauses(&mut self, clauses: &[CaseClause]) {
        self.write("{");
        for clause in clauses {
            self.newline();
            if clause.is_default() {
                self.write("default:");
            } else {
                self.write("case ");
                self.exprs(&clause.list);
                self.write(":");
            }
            self.statements(&clause.body);
        }
        self.newline();
        self.write("}");
    }

    fn comm_clause(&mut self, clause: &CommClause) {
        self.newline();
        match &clause.comm {
            Some(comm) => {
                self.write("case ");
                self.stmt(comm);
                self.write(":");
            }
            None => self.write("default:"),
        }
        self.statements(&clause.body);
    }

    fn exprs(&mut self, exprs: &[Expr]) {
        self.separated(exprs, ", ", |p, e| p.expr(e));
    }

    pub fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::Ident(i) => self.write(i.as_str()),
            Expr::BasicLit(l) => self.write(l.value()),
            Expr::CompositeLit(c) => {
                if let Some(ty) = &c.ty {
                    self.expr(ty);
                }
                self.write("{");
                self.exprs(&c.elements);
                self.write("}");
            }
            Expr::FuncLit(f) => {
                self.write("func");
                self.signature(&f.ty);
                self.write(" ");
                self.block(&f.body);
            }
            Expr::Paren(p) => {
                self.write("(");
                self.expr(&p.inner);
                self.write(")");
            }
            Expr::Selector(s) => {
                self.expr(&s.target);
                self.write(".");
                self.write(s.name.as_str());
            }
            Expr::Index(i) => {
                self.expr(&i.target);
                self.write("[");
                self.expr(&i.index);
                self.write("]");
            }
            Expr::Slice(s) => {
                self.expr(&s.target);
                self.write("[");
                if let Some(low) = &s.low {
                    self.expr(low);
                }
                self.write(":");
                if let Some(high) = &s.high {
                    self.expr(high);
                }
                if let Some(max) = &s.max {
                    self.write(":");
                    self.expr(max);
                }
                self.write("]");
            }
            Expr::TypeAssert(t) => {
                self.expr(&t.target);
                self.write(".(");
                match &t.ty {
                    Some(ty) => self.expr(ty),
                    None => self.write("type"),
                }
                self.write(")");
            }
            Expr::Call(c) => {
                self.expr(&c.target);
                self.write("(");
                self.exprs(&c.arguments);
                if c.ellipsis.is_some() {
                    self.write("...");
                }
                self.write(")");
            }
            Expr::Star(s) => {
                self.write("*");
                self.expr(&s.inner);
            }
            Expr::Unary(u) => {
                self.write(u.op.as_str());
                self.expr(&u.operand);
            }
            Expr::Binary(b) => {
                self.expr(&b.lhs);
                self.write(" ");
                self.write(b.op.as_str());
                self.write(" ");
                self.expr(&b.rhs);
            }
            Expr::KeyValue(kv) => {
                self.expr(&kv.key);
                self.write(": ");
                self.expr(&kv.value);
            }
            Expr::Ellipsis(e) => {
                self.write("...");
                if let Some(element) = &e.element {
                    self.expr(element);
                }
            }
            Expr::ArrayType(a) => {
                self.write("[");
                if let Some(len) = &a.len {
                    self.expr(len);
                }
                self.write("]");
                self.expr(&a.element);
            }
            Expr::StructType(s) => {
                self.write("struct");
                self.field_lines(&s.fields);
            }
            Expr::FuncType(f) => {
                self.write("func");
                self.signature(f);
            }
            Expr::InterfaceType(i) => {
                self.write("interface");
                self.field_lines(&i.methods);
            }
            Expr::MapType(m) => {
                self.write("map[");
                self.expr(&m.key);
                self.write("]");
                self.expr(&m.value);
            }
            Expr::ChanType(c) => {
                self.write(match c.dir {
                    ChanDir::Both => "chan ",
                    ChanDir::Send => "chan<- ",
                    ChanDir::Recv => "<-chan ",
                });
                self.expr(&c.value);
            }
        }
    }

    /// The parameters and results of a function, without the `func`.
    fn signature(&mut self, ty: &FuncType) {
        self.write("(");
        self.fields(&ty.params);
        self.write(")");

        match ty.results.as_slice() {
            [] => {}
            [single] if single.names.is_empty() => {
                self.write(" ");
                self.expr(&single.ty);
            }
            results => {
                self.write(" (");
                self.fields(results);
                self.write(")");
            }
        }
    }

    /// Parameter style fields, like `a, b int, s string`.
    fn fields(&mut self, fields: &[Field]) {
        self.separated(fields, ", ", |p, field| p.field(field));
    }

    fn field(&mut self, field: &Field) {
        if !field.names.is_empty() {
            self.separated(&field.names, ", ", |p, n| p.write(n.as_str()));

            // Interface methods are a name and a signature.
            if let Expr::FuncType(ty) = &field.ty {
                if ty.func.is_none() {
                    self.signature(ty);
                    return;
                }
            }

            self.write(" ");
        }

        self.expr(&field.ty);

        if let Some(tag) = &field.tag {
            self.write(" ");
            self.write(tag.value());
        }
    }

    /// Struct fields and interface methods go one per line.
    fn field_lines(&mut self, fields: &[Field]) {
        if fields.is_empty() {
            self.write("{}");
            return;
        }

        self.write(" {");
        self.indented(|p| {
            for field in fields {
                p.newline();
                p.field(field);
            }
        });
        self.newline();
        self.write("}");
    }
}

macro_rules! display_with {
    ($ty:ty, $method:ident) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                let mut printer = Printer::new();
                printer.$method(self);
                f.write_str(&printer.finish())
            }
        }
    };
}

display_with!(Node, node);
display_with!(File, file);
display_with!(Decl, decl);
display_with!(Stmt, stmt);
display_with!(Expr, expr);
display_with!(Block, block);

#[cfg(test)]
mod tests {
    use parser::Parse;

    use super::*;

    fn expr(input: &str) -> String {
        crate::parse_expr(input).unwrap().to_string()
    }

    fn stmt(input: &str) -> String {
        Stmt::parse(input).unwrap().to_string()
    }

    #[test]
    fn expressions() {
        assert_eq!(expr("myIdent"), "myIdent");
        assert_eq!(expr("1+2"), "1 + 2");
        assert_eq!(expr("f( a,b... )"), "f(a, b...)");
        assert_eq!(expr("x.(type)"), "x.(type)");
        assert_eq!(expr("s[1:2:3]"), "s[1:2:3]");
        assert_eq!(expr("s[:]"), "s[:]");
        assert_eq!(expr("-x"), "-x");
        assert_eq!(expr("<-ch"), "<-ch");
        assert_eq!(expr("[]int{1,2}"), "[]int{1, 2}");
        assert_eq!(expr("map[string]int{\"a\":1}"), "map[string]int{\"a\": 1}");
    }

    #[test]
    fn types() {
        assert_eq!(expr("[...]string{}"), "[...]string{}");
        assert_eq!(expr("struct{}{}"), "struct{}{}");
        assert_eq!(expr("(<-chan int)(nil)"), "(<-chan int)(nil)");
        assert_eq!(expr("(chan<- int)(nil)"), "(chan<- int)(nil)");
        assert_eq!(
            expr("func(a, b int, c ...string) (n int, err error) {}"),
            "func(a, b int, c ...string) (n int, err error) {\n}"
        );
        assert_eq!(
            expr("(interface{ Close() error })(nil)"),
            "(interface {\n\tClose() error\n})(nil)"
        );
    }

    #[test]
    fn function_literals() {
        assert_eq!(expr("func(){}"), "func() {\n}");
        assert_eq!(
            expr("func() int { return 1 }"),
            "func() int {\n\treturn 1\n}"
        );
    }

    #[test]
    fn statements() {
        assert_eq!(stmt("var foo = \"str\""), "var foo = \"str\"");
        assert_eq!(
            stmt("{ var foo = \"str\"; i := 0 }"),
            "{\n\tvar foo = \"str\"\n\ti := 0\n}"
        );
        assert_eq!(stmt("x+=1"), "x += 1");
        assert_eq!(stmt("i++"), "i++");
        assert_eq!(stmt("if x{a()}else{b()}"), "if x {\n\ta()\n} else {\n\tb()\n}");
        assert_eq!(stmt("for i:=0;i<3;i++{}"), "for i := 0; i < 3; i++ {\n}");
        assert_eq!(stmt("for k,v:=range m{}"), "for k, v := range m {\n}");
        assert_eq!(stmt("for {}"), "for {\n}");
    }

    #[test]
    fn labels() {
        assert_eq!(stmt("L: for {}"), "L:\n\tfor {\n\t}");
        assert_eq!(
            stmt("{ L: for { break L } }"),
            "{\nL:\n\tfor {\n\t\tbreak L\n\t}\n}"
        );
    }

    #[test]
    fn switches() {
        assert_eq!(
            stmt("switch x {\ncase 1:\n\tf()\ndefault:\n}"),
            "switch x {\ncase 1:\n\tf()\ndefault:\n}"
        );
    }

    #[test]
    fn grouped_declarations() {
        assert_eq!(
            stmt("const (\n\tA = iota\n\tB\n)"),
            "const (\n\tA = iota\n\tB\n)"
        );
    }

    #[test]
    fn files() {
        let file = crate::parse_file(
            "package main\nimport \"fmt\"\nfunc main() { fmt.Println(\"hi\") }",
        )
        .unwrap();

        assert_eq!(
            file.to_string(),
            "package main\n\nimport \"fmt\"\n\nfunc main() {\n\tfmt.Println(\"hi\")\n}\n"
        );
    }
}
