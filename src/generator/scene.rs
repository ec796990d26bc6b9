//! Scene settings, console output, comments, graph plotting and raw code.

use super::CodeGen;
use super::literal::quote_literal;
use crate::block_types::{BlockKind, BlockRegistry, Shape};
use crate::error::Result;
use crate::model::Block;

const CATEGORY: &str = "Scene";

pub fn register(r: &mut BlockRegistry) {
    let text = Shape::EMPTY.fields(&["TEXT"]);
    r.register(BlockKind::statement("scene_title", CATEGORY, text, scene_title));
    r.register(BlockKind::statement("scene_caption", CATEGORY, text, scene_caption));
    r.register(BlockKind::statement(
        "scene_background",
        CATEGORY,
        Shape::EMPTY.values(&["COLOR"]),
        scene_background,
    ));
    r.register(BlockKind::statement(
        "print",
        CATEGORY,
        Shape::EMPTY.values(&["VALUE"]),
        print,
    ));
    r.register(BlockKind::statement("comment", CATEGORY, text, comment));
    r.register(BlockKind::statement(
        "raw_statement",
        CATEGORY,
        Shape::EMPTY.fields(&["CODE"]),
        raw_statement,
    ));
    r.register(BlockKind::statement(
        "plot_point",
        CATEGORY,
        Shape::EMPTY.fields(&["CURVE"]).values(&["X", "Y"]),
        plot_point,
    ));
}

fn scene_title(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let text = quote_literal(block.field("TEXT"));
    cg.line(out, level, &format!("scene.title = {}", text));
    Ok(())
}

fn scene_caption(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let text = quote_literal(block.field("TEXT"));
    cg.line(out, level, &format!("scene.caption = {}", text));
    Ok(())
}

fn scene_background(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let color = cg.value(block, "COLOR", "color.black")?;
    cg.line(out, level, &format!("scene.background = {}", color));
    Ok(())
}

fn print(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let value = cg.value(block, "VALUE", "\"\"")?;
    cg.line(out, level, &format!("print({})", value));
    Ok(())
}

/// One `#` line per line of text; carriage returns are dropped so the
/// comment cannot spill into code.
fn comment(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let text = block.field("TEXT").replace('\r', "");
    for line in text.split('\n') {
        if line.is_empty() {
            cg.line(out, level, "#");
        } else {
            cg.line(out, level, &format!("# {}", line));
        }
    }
    Ok(())
}

/// User-typed code, re-indented to the block's nesting level. Blank lines
/// are dropped; an empty block is `pass`.
fn raw_statement(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let code = block.field("CODE").replace('\r', "");
    let mut wrote = false;
    for line in code.lines().filter(|l| !l.trim().is_empty()) {
        cg.line(out, level, line.trim_end());
        wrote = true;
    }
    if !wrote {
        cg.line(out, level, "pass");
    }
    Ok(())
}

fn plot_point(out: &mut String, block: &Block, cg: &mut CodeGen<'_>, level: usize) -> Result<()> {
    let curve = cg.variable(block, "CURVE", "curve");
    let x = cg.value(block, "X", "t")?;
    let y = cg.value(block, "Y", "0")?;
    cg.line(out, level, &format!("{}.plot({}, {})", curve, x, y));
    Ok(())
}
