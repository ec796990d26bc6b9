//! Loops and conditionals.

use super::CodeGen;
use super::literal::integer_literal;
use crate::block_types::{BlockKind, BlockRegistry, Shape};
use crate::error::Result;
use crate::model::Block;

const CATEGORY: &str = "Control";

pub fn register(r: &mut BlockRegistry) {
    let body = Shape::EMPTY.statements(&["DO"]);
    r.register(BlockKind::statement("forever", CATEGORY, body, forever));
    r.register(BlockKind::statement(
        "for_range",
        CATEGORY,
        body.fields(&["VAR", "START", "STOP", "STEP"]),
        for_range,
    ));
    r.register(BlockKind::statement("repeat", CATEGORY, body.values(&["TIMES"]), repeat));
    r.register(BlockKind::statement("while_loop", CATEGORY, body.values(&["COND"]), while_loop));
    r.register(BlockKind::statement("if", CATEGORY, body.values(&["COND"]), if_then));
    r.register(BlockKind::statement(
        "if_else",
        CATEGORY,
        Shape::EMPTY.values(&["COND"]).statements(&["DO", "ELSE"]),
        if_else,
    ));
    r.register(BlockKind::statement("break", CATEGORY, Shape::EMPTY, break_loop));
}

fn forever(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    cg.line(out, level, "while True:");
    cg.statement_slot(out, block, "DO", level + 1)
}

/// `range(start, stop, step)` over integer fields. A zero step would raise
/// at runtime, so it is emitted as 1.
fn for_range(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let var = cg.variable(block, "VAR", "i");
    let start = integer_literal(block.field("START"), 0);
    let stop = integer_literal(block.field("STOP"), 10);
    let step = match integer_literal(block.field("STEP"), 1) {
        0 => 1,
        s => s,
    };
    cg.line(
        out,
        level,
        &format!("for {} in range({}, {}, {}):", var, start, stop, step),
    );
    cg.statement_slot(out, block, "DO", level + 1)
}

fn repeat(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let times = cg.value(block, "TIMES", "10")?;
    cg.line(out, level, &format!("for _ in range({}):", times));
    cg.statement_slot(out, block, "DO", level + 1)
}

fn while_loop(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let cond = cg.value(block, "COND", "False")?;
    cg.line(out, level, &format!("while {}:", cond));
    cg.statement_slot(out, block, "DO", level + 1)
}

fn if_then(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let cond = cg.value(block, "COND", "False")?;
    cg.line(out, level, &format!("if {}:", cond));
    cg.statement_slot(out, block, "DO", level + 1)
}

fn if_else(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    if_then(out, block, cg, level)?;
    cg.line(out, level, "else:");
    cg.statement_slot(out, block, "ELSE", level + 1)
}

fn break_loop(out: &mut String, _block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    cg.line(out, level, "break");
    Ok(())
}
