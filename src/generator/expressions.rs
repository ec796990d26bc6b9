//! Literals, math, logic and vector expressions.

use super::literal::{bool_literal, number_literal, quote_literal};
use super::{CodeGen, Expr, Precedence, choose};
use crate::block_types::{BlockKind, BlockRegistry, Shape};
use crate::color;
use crate::error::Result;
use crate::model::Block;

const CATEGORY: &str = "Math";

const ZERO_VECTOR: &str = "vector(0, 0, 0)";

/// Dropdown value to operator text and the level its operands bind at.
type Operator = (&'static str, Precedence);

const ARITHMETIC: &[(&str, Operator)] = &[
    ("ADD", ("+", Precedence::Additive)),
    ("MINUS", ("-", Precedence::Additive)),
    ("MULTIPLY", ("*", Precedence::Multiplicative)),
    ("DIVIDE", ("/", Precedence::Multiplicative)),
    ("POWER", ("**", Precedence::Exponent)),
    ("MODULO", ("%", Precedence::Multiplicative)),
];

const COMPARE: &[(&str, Operator)] = &[
    ("EQ", ("==", Precedence::Relational)),
    ("NEQ", ("!=", Precedence::Relational)),
    ("LT", ("<", Precedence::Relational)),
    ("LTE", ("<=", Precedence::Relational)),
    ("GT", (">", Precedence::Relational)),
    ("GTE", (">=", Precedence::Relational)),
];

const LOGIC: &[(&str, Operator)] = &[
    ("AND", ("and", Precedence::LogicalAnd)),
    ("OR", ("or", Precedence::LogicalOr)),
];

const MATH_FUNCTIONS: &[(&str, &str)] = &[
    ("sqrt", "sqrt"),
    ("abs", "abs"),
    ("sin", "sin"),
    ("cos", "cos"),
    ("tan", "tan"),
    ("asin", "asin"),
    ("acos", "acos"),
    ("atan", "atan"),
    ("exp", "exp"),
    ("log", "log"),
];

const VECTOR_FUNCTIONS: &[(&str, &str)] = &[
    ("mag", "mag"),
    ("mag2", "mag2"),
    ("norm", "norm"),
    ("hat", "hat"),
];

const VECTOR_PRODUCTS: &[(&str, &str)] = &[("dot", "dot"), ("cross", "cross")];

const COMPONENTS: &[(&str, &str)] = &[("x", "x"), ("y", "y"), ("z", "z")];

pub fn register(r: &mut BlockRegistry) {
    let s = Shape::EMPTY;
    let binary = s.fields(&["OP"]).values(&["A", "B"]);
    r.register(BlockKind::expression("number", CATEGORY, s.fields(&["NUM"]), number));
    r.register(BlockKind::expression("text", CATEGORY, s.fields(&["TEXT"]), text));
    r.register(BlockKind::expression("boolean", CATEGORY, s.fields(&["BOOL"]), boolean));
    r.register(BlockKind::expression("vector", CATEGORY, s.fields(&["X", "Y", "Z"]), vector));
    r.register(BlockKind::expression(
        "make_vector",
        CATEGORY,
        s.values(&["X", "Y", "Z"]),
        make_vector,
    ));
    r.register(BlockKind::expression("arithmetic", CATEGORY, binary, arithmetic));
    r.register(BlockKind::expression("compare", CATEGORY, binary, compare));
    r.register(BlockKind::expression("logic_operation", CATEGORY, binary, logic_operation));
    r.register(BlockKind::expression("logic_not", CATEGORY, s.values(&["BOOL"]), logic_not));
    r.register(BlockKind::expression(
        "math_function",
        CATEGORY,
        s.fields(&["FUNC"]).values(&["NUM"]),
        math_function,
    ));
    r.register(BlockKind::expression(
        "vector_function",
        CATEGORY,
        s.fields(&["FUNC"]).values(&["VEC"]),
        vector_function,
    ));
    r.register(BlockKind::expression("vector_product", CATEGORY, binary, vector_product));
    r.register(BlockKind::expression(
        "vector_component",
        CATEGORY,
        s.fields(&["COMPONENT"]).values(&["VEC"]),
        vector_component,
    ));
    r.register(BlockKind::expression("color", CATEGORY, s.fields(&["COLOR", "HEX"]), color));
    r.register(BlockKind::expression(
        "raw_expression",
        CATEGORY,
        s.fields(&["EXPR"]),
        raw_expression,
    ));
}

fn number(block: &Block, _cg: &mut CodeGen<'_>) -> Result<Expr> {
    let lit = number_literal(block.field("NUM"), "0");
    if lit.starts_with('-') {
        Ok(Expr::new(lit, Precedence::Unary))
    } else {
        Ok(Expr::atomic(lit))
    }
}

fn text(block: &Block, _cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(Expr::atomic(quote_literal(block.field("TEXT"))))
}

fn boolean(block: &Block, _cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(Expr::atomic(bool_literal(block.field("BOOL"))))
}

fn vector(block: &Block, _cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(Expr::postfix(format!(
        "vector({}, {}, {})",
        number_literal(block.field("X"), "0"),
        number_literal(block.field("Y"), "0"),
        number_literal(block.field("Z"), "0")
    )))
}

fn make_vector(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let x = cg.value(block, "X", "0")?;
    let y = cg.value(block, "Y", "0")?;
    let z = cg.value(block, "Z", "0")?;
    Ok(Expr::postfix(format!("vector({}, {}, {})", x, y, z)))
}

/// Self-parenthesized, so it splices into any context.
fn arithmetic(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    binary(block, cg, choose(block, "OP", ARITHMETIC), "0")
}

fn compare(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    binary(block, cg, choose(block, "OP", COMPARE), "0")
}

fn logic_operation(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    binary(block, cg, choose(block, "OP", LOGIC), "False")
}

/// Operands are wrapped when they bind more loosely than `op`, so
/// `-2 ** 2` becomes `((-2) ** 2)`.
fn binary(block: &Block, cg: &mut CodeGen<'_>, op: Operator, fallback: &str) -> Result<Expr> {
    let (op, level) = op;
    let a = cg.value_in(block, "A", fallback, level)?;
    let b = cg.value_in(block, "B", fallback, level)?;
    Ok(Expr::atomic(format!("({} {} {})", a, op, b)))
}

fn logic_not(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let operand = cg.value_in(block, "BOOL", "True", Precedence::LogicalNot)?;
    Ok(Expr::new(format!("not {}", operand), Precedence::LogicalNot))
}

fn math_function(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let func = choose(block, "FUNC", MATH_FUNCTIONS);
    let arg = cg.value(block, "NUM", "0")?;
    Ok(Expr::postfix(format!("{}({})", func, arg)))
}

fn vector_function(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let func = choose(block, "FUNC", VECTOR_FUNCTIONS);
    let arg = cg.value(block, "VEC", ZERO_VECTOR)?;
    Ok(Expr::postfix(format!("{}({})", func, arg)))
}

fn vector_product(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let func = choose(block, "OP", VECTOR_PRODUCTS);
    let a = cg.value(block, "A", ZERO_VECTOR)?;
    let b = cg.value(block, "B", ZERO_VECTOR)?;
    Ok(Expr::postfix(format!("{}({}, {})", func, a, b)))
}

fn vector_component(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let component = choose(block, "COMPONENT", COMPONENTS);
    let vec = cg.value_in(block, "VEC", ZERO_VECTOR, Precedence::Postfix)?;
    Ok(Expr::postfix(format!("{}.{}", vec, component)))
}

fn color(block: &Block, _cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(Expr::postfix(color::color_to_literal(
        block.field("COLOR"),
        block.field("HEX"),
    )))
}

/// Free text of unknown shape; callers parenthesize it where it matters.
fn raw_expression(block: &Block, _cg: &mut CodeGen<'_>) -> Result<Expr> {
    let expr = block.field("EXPR").trim();
    if expr.is_empty() {
        Ok(Expr::atomic("0"))
    } else {
        Ok(Expr::new(expr, Precedence::Unknown))
    }
}
