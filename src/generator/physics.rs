//! Motion updates, object properties and constants.

use super::literal::number_literal;
use super::{CodeGen, Expr, Precedence, choose};
use crate::block_types::{BlockKind, BlockRegistry, Shape};
use crate::error::Result;
use crate::model::Block;
use crate::symbols;

const CATEGORY: &str = "Physics";

/// Object attributes offered by the property dropdowns.
const PROPERTIES: &[(&str, &str)] = &[
    ("pos", "pos"),
    ("velocity", "velocity"),
    ("color", "color"),
    ("radius", "radius"),
    ("size", "size"),
    ("axis", "axis"),
    ("mass", "mass"),
    ("opacity", "opacity"),
    ("visible", "visible"),
    ("text", "text"),
    ("length", "length"),
    ("make_trail", "make_trail"),
];

const ZERO_VECTOR: &str = "vector(0, 0, 0)";

pub fn register(r: &mut BlockRegistry) {
    let obj = Shape::EMPTY.fields(&["OBJ"]);
    r.register(BlockKind::statement(
        "update_position",
        CATEGORY,
        obj.values(&["DT"]),
        update_position,
    ));
    r.register(BlockKind::statement(
        "update_velocity",
        CATEGORY,
        obj.values(&["ACCEL", "DT"]),
        update_velocity,
    ));
    r.register(BlockKind::statement(
        "apply_force",
        CATEGORY,
        obj.values(&["FORCE", "DT"]),
        apply_force,
    ));
    r.register(BlockKind::statement(
        "set_property",
        CATEGORY,
        Shape::EMPTY.fields(&["OBJ", "PROP"]).values(&["VALUE"]),
        set_property,
    ));
    r.register(BlockKind::expression(
        "get_property",
        CATEGORY,
        Shape::EMPTY.fields(&["OBJ", "PROP"]),
        get_property,
    ));
    r.register(BlockKind::statement(
        "attach_trail",
        CATEGORY,
        obj.values(&["COLOR"]),
        attach_trail,
    ));
    r.register(BlockKind::statement(
        "define_constant",
        CATEGORY,
        Shape::EMPTY.fields(&["NAME", "VALUE"]),
        define_constant,
    ));
    r.register(BlockKind::expression(
        "physics_constant",
        CATEGORY,
        Shape::EMPTY.fields(&["CONST"]),
        physics_constant,
    ));
}

/// Euler step: `obj.pos = obj.pos + obj.velocity * dt`.
fn update_position(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let obj = cg.variable(block, "OBJ", "obj");
    let dt = cg.value_in(block, "DT", "dt", Precedence::Multiplicative)?;
    cg.line(
        out,
        level,
        &format!("{0}.pos = {0}.pos + {0}.velocity * {1}", obj, dt),
    );
    Ok(())
}

fn update_velocity(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let obj = cg.variable(block, "OBJ", "obj");
    let accel = cg.value_in(block, "ACCEL", ZERO_VECTOR, Precedence::Multiplicative)?;
    let dt = cg.value_in(block, "DT", "dt", Precedence::Multiplicative)?;
    cg.line(
        out,
        level,
        &format!("{0}.velocity = {0}.velocity + {1} * {2}", obj, accel, dt),
    );
    Ok(())
}

/// `a = F / m`, integrated over one step.
fn apply_force(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let obj = cg.variable(block, "OBJ", "obj");
    let force = cg.value_in(block, "FORCE", ZERO_VECTOR, Precedence::Multiplicative)?;
    let dt = cg.value_in(block, "DT", "dt", Precedence::Multiplicative)?;
    cg.line(
        out,
        level,
        &format!("{0}.velocity = {0}.velocity + {1} / {0}.mass * {2}", obj, force, dt),
    );
    Ok(())
}

fn set_property(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let obj = cg.variable(block, "OBJ", "obj");
    let prop = choose(block, "PROP", PROPERTIES);
    let value = cg.value(block, "VALUE", "0")?;
    cg.line(out, level, &format!("{}.{} = {}", obj, prop, value));
    Ok(())
}

fn get_property(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let obj = cg.variable(block, "OBJ", "obj");
    let prop = choose(block, "PROP", PROPERTIES);
    Ok(Expr::postfix(format!("{}.{}", obj, prop)))
}

fn attach_trail(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let obj = cg.variable(block, "OBJ", "obj");
    let color = cg.value(block, "COLOR", "color.white")?;
    cg.line(out, level, &format!("attach_trail({}, color={})", obj, color));
    Ok(())
}

/// Emits the one definition of a custom constant; later references use
/// the bare name (see [`physics_constant`]).
fn define_constant(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let name = match block.field("NAME").trim() {
        n if symbols::is_identifier(n) => n,
        "" => "k",
        n => {
            log::warn!("define_constant: `{}` is not an identifier, using `k`", n);
            "k"
        }
    };
    let value = number_literal(block.field("VALUE"), "0");
    cg.line(out, level, &format!("{} = {}", name, value));
    Ok(())
}

fn physics_constant(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(Expr::atomic(cg.constant(block.field("CONST"))))
}
