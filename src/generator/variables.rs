//! Variables and simulation time.

use super::literal::number_literal;
use super::{CodeGen, Expr, Precedence};
use crate::block_types::{BlockKind, BlockRegistry, Shape};
use crate::error::Result;
use crate::model::Block;

const CATEGORY: &str = "Variables";

pub fn register(r: &mut BlockRegistry) {
    r.register(BlockKind::statement(
        "set_variable",
        CATEGORY,
        Shape::EMPTY.fields(&["VAR"]).values(&["VALUE"]),
        set_variable,
    ));
    r.register(BlockKind::statement(
        "change_variable",
        CATEGORY,
        Shape::EMPTY.fields(&["VAR"]).values(&["DELTA"]),
        change_variable,
    ));
    r.register(BlockKind::expression(
        "get_variable",
        CATEGORY,
        Shape::EMPTY.fields(&["VAR"]),
        get_variable,
    ));
    r.register(BlockKind::statement(
        "time_step",
        CATEGORY,
        Shape::EMPTY.fields(&["DT"]),
        time_step,
    ));
    r.register(BlockKind::statement(
        "advance_time",
        CATEGORY,
        Shape::EMPTY.fields(&["VAR"]).values(&["DT"]),
        advance_time,
    ));
    r.register(BlockKind::statement("rate", CATEGORY, Shape::EMPTY.fields(&["RATE"]), rate));
}

fn set_variable(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let var = cg.variable(block, "VAR", "x");
    let value = cg.value(block, "VALUE", "0")?;
    cg.line(out, level, &format!("{} = {}", var, value));
    Ok(())
}

fn change_variable(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let var = cg.variable(block, "VAR", "x");
    let delta = cg.value(block, "DELTA", "1")?;
    cg.line(out, level, &format!("{} += {}", var, delta));
    Ok(())
}

fn get_variable(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(Expr::atomic(cg.variable(block, "VAR", "x")))
}

/// Declares the `dt` every physics block defaults to.
fn time_step(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let dt = number_literal(block.field("DT"), "0.01");
    cg.line(out, level, &format!("dt = {}", dt));
    Ok(())
}

fn advance_time(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let var = cg.variable(block, "VAR", "t");
    let dt = cg.value_in(block, "DT", "dt", Precedence::Additive)?;
    cg.line(out, level, &format!("{0} = {0} + {1}", var, dt));
    Ok(())
}

fn rate(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let hz = number_literal(block.field("RATE"), "100");
    cg.line(out, level, &format!("rate({})", hz));
    Ok(())
}
