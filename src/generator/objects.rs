//! 3D object and graph constructors.
//!
//! Each constructor is a fixed keyword-argument call. Slot arguments come
//! from per-kind tables so the fallback for every slot is listed in one
//! place.

use super::literal::{bool_literal, integer_literal, number_literal, quote_literal};
use super::{CodeGen, Expr};
use crate::block_types::{BlockKind, BlockRegistry, Shape};
use crate::error::Result;
use crate::model::Block;

const CATEGORY: &str = "Objects";

const ORIGIN: &str = "vector(0, 0, 0)";
const X_AXIS: &str = "vector(1, 0, 0)";
const WHITE: &str = "color.white";

/// One keyword argument filled from a value slot.
struct Arg {
    keyword: &'static str,
    slot: &'static str,
    fallback: &'static str,
}

const fn arg(keyword: &'static str, slot: &'static str, fallback: &'static str) -> Arg {
    Arg {
        keyword,
        slot,
        fallback,
    }
}

const SPHERE: &[Arg] = &[
    arg("pos", "POS", ORIGIN),
    arg("radius", "RADIUS", "1"),
    arg("color", "COLOR", WHITE),
    arg("velocity", "VELOCITY", ORIGIN),
    arg("mass", "MASS", "1"),
];
const BOX: &[Arg] = &[
    arg("pos", "POS", ORIGIN),
    arg("size", "SIZE", "vector(1, 1, 1)"),
    arg("color", "COLOR", WHITE),
    arg("velocity", "VELOCITY", ORIGIN),
    arg("mass", "MASS", "1"),
];
const CYLINDER: &[Arg] = &[
    arg("pos", "POS", ORIGIN),
    arg("axis", "AXIS", X_AXIS),
    arg("radius", "RADIUS", "1"),
    arg("color", "COLOR", WHITE),
];
const ARROW: &[Arg] = &[
    arg("pos", "POS", ORIGIN),
    arg("axis", "AXIS", X_AXIS),
    arg("color", "COLOR", "color.yellow"),
];
const CONE: &[Arg] = CYLINDER;
const HELIX: &[Arg] = CYLINDER;
const RING: &[Arg] = &[
    arg("pos", "POS", ORIGIN),
    arg("axis", "AXIS", "vector(0, 0, 1)"),
    arg("radius", "RADIUS", "1"),
    arg("thickness", "THICKNESS", "0.1"),
    arg("color", "COLOR", WHITE),
];
const LABEL: &[Arg] = &[arg("pos", "POS", ORIGIN), arg("color", "COLOR", WHITE)];
const GCURVE: &[Arg] = &[arg("color", "COLOR", "color.blue")];

const SPHERE_SLOTS: &[&str] = &["POS", "RADIUS", "COLOR", "VELOCITY", "MASS"];
const BOX_SLOTS: &[&str] = &["POS", "SIZE", "COLOR", "VELOCITY", "MASS"];
const AXIAL_SLOTS: &[&str] = &["POS", "AXIS", "RADIUS", "COLOR"];
const ARROW_SLOTS: &[&str] = &["POS", "AXIS", "COLOR"];
const RING_SLOTS: &[&str] = &["POS", "AXIS", "RADIUS", "THICKNESS", "COLOR"];
const LABEL_SLOTS: &[&str] = &["POS", "COLOR"];

pub fn register(r: &mut BlockRegistry) {
    let s = Shape::EMPTY;
    r.register(BlockKind::expression(
        "sphere",
        CATEGORY,
        s.values(SPHERE_SLOTS).fields(&["MAKE_TRAIL"]),
        sphere,
    ));
    r.register(BlockKind::expression("box", CATEGORY, s.values(BOX_SLOTS), make_box));
    r.register(BlockKind::expression("cylinder", CATEGORY, s.values(AXIAL_SLOTS), cylinder));
    r.register(BlockKind::expression("arrow", CATEGORY, s.values(ARROW_SLOTS), arrow));
    r.register(BlockKind::expression("cone", CATEGORY, s.values(AXIAL_SLOTS), cone));
    r.register(BlockKind::expression(
        "helix",
        CATEGORY,
        s.values(AXIAL_SLOTS).fields(&["COILS"]),
        helix,
    ));
    r.register(BlockKind::expression("ring", CATEGORY, s.values(RING_SLOTS), ring));
    r.register(BlockKind::expression(
        "label",
        CATEGORY,
        s.values(LABEL_SLOTS).fields(&["TEXT", "HEIGHT"]),
        label,
    ));
    r.register(BlockKind::expression(
        "graph",
        CATEGORY,
        s.fields(&["TITLE", "XTITLE", "YTITLE"]),
        graph,
    ));
    r.register(BlockKind::expression(
        "gcurve",
        CATEGORY,
        s.values(&["COLOR"]).fields(&["LABEL"]),
        gcurve,
    ));
}

/// Render the slot arguments of `args` as `keyword=value` pairs.
fn slot_args(cg: &mut CodeGen<'_>, block: &Block, args: &[Arg]) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(args.len());
    for a in args {
        let value = cg.value(block, a.slot, a.fallback)?;
        out.push(format!("{}={}", a.keyword, value));
    }
    Ok(out)
}

fn call(name: &str, args: &[String]) -> Expr {
    Expr::postfix(format!("{}({})", name, args.join(", ")))
}

fn sphere(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let mut args = slot_args(cg, block, SPHERE)?;
    if bool_literal(block.field("MAKE_TRAIL")) == "True" {
        args.push("make_trail=True".to_string());
    }
    Ok(call("sphere", &args))
}

fn make_box(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(call("box", &slot_args(cg, block, BOX)?))
}

fn cylinder(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(call("cylinder", &slot_args(cg, block, CYLINDER)?))
}

fn arrow(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(call("arrow", &slot_args(cg, block, ARROW)?))
}

fn cone(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(call("cone", &slot_args(cg, block, CONE)?))
}

fn helix(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let mut args = slot_args(cg, block, HELIX)?;
    let coils = match integer_literal(block.field("COILS"), 5) {
        n if n > 0 => n,
        _ => 5,
    };
    args.push(format!("coils={}", coils));
    Ok(call("helix", &args))
}

fn ring(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    Ok(call("ring", &slot_args(cg, block, RING)?))
}

fn label(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let mut args = slot_args(cg, block, LABEL)?;
    args.insert(1, format!("text={}", quote_literal(block.field("TEXT"))));
    args.insert(2, format!("height={}", number_literal(block.field("HEIGHT"), "16")));
    Ok(call("label", &args))
}

fn graph(block: &Block, _cg: &mut CodeGen<'_>) -> Result<Expr> {
    let args: Vec<String> = [("title", "TITLE"), ("xtitle", "XTITLE"), ("ytitle", "YTITLE")]
        .into_iter()
        .filter(|(_, field)| !block.field(field).is_empty())
        .map(|(kw, field)| format!("{}={}", kw, quote_literal(block.field(field))))
        .collect();
    Ok(call("graph", &args))
}

fn gcurve(block: &Block, cg: &mut CodeGen<'_>) -> Result<Expr> {
    let mut args = slot_args(cg, block, GCURVE)?;
    let text = block.field("LABEL");
    if !text.is_empty() {
        args.push(format!("label={}", quote_literal(text)));
    }
    Ok(call("gcurve", &args))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block_types::BlockRegistry;
    use crate::generator::compile;
    use crate::model::Workspace;

    fn assign(value: Block) -> String {
        let mut ws = Workspace::new();
        ws.push(Block::new("set_variable").with_field("VAR", "o").with_value("VALUE", value));
        compile(&ws)
    }

    #[test]
    fn tables_match_registered_shapes() {
        let r = BlockRegistry::standard();
        for (kind, args) in [
            ("sphere", SPHERE),
            ("box", BOX),
            ("cylinder", CYLINDER),
            ("arrow", ARROW),
            ("cone", CONE),
            ("helix", HELIX),
            ("ring", RING),
            ("label", LABEL),
            ("gcurve", GCURVE),
        ] {
            let slots: Vec<&str> = args.iter().map(|a| a.slot).collect();
            assert_eq!(r.get(kind).unwrap().shape.values, slots.as_slice(), "{kind}");
        }
    }

    #[test]
    fn each_disconnected_slot_shows_its_fallback() {
        let marker = || Block::new("raw_expression").with_field("EXPR", "MARK");
        for (kind, args) in [
            ("sphere", SPHERE),
            ("box", BOX),
            ("cylinder", CYLINDER),
            ("arrow", ARROW),
            ("ring", RING),
            ("label", LABEL),
            ("gcurve", GCURVE),
        ] {
            for missing in args {
                let mut blk = Block::new(kind);
                for a in args.iter().filter(|a| a.slot != missing.slot) {
                    blk = blk.with_value(a.slot, marker());
                }
                let out = assign(blk);
                let expected = format!("{}={}", missing.keyword, missing.fallback);
                assert!(out.contains(&expected), "{kind}.{}: {out}", missing.slot);
                assert_eq!(out.matches("MARK").count(), args.len() - 1, "{kind}");
            }
        }
    }

    #[test]
    fn empty_sphere_uses_every_fallback() {
        assert_eq!(
            assign(Block::new("sphere")),
            "o = sphere(pos=vector(0, 0, 0), radius=1, color=color.white, \
             velocity=vector(0, 0, 0), mass=1)\n"
        );
    }

    #[test]
    fn sphere_with_trail_and_color() {
        let blk = Block::new("sphere")
            .with_field("MAKE_TRAIL", "TRUE")
            .with_value("COLOR", Block::new("color").with_field("COLOR", "red"))
            .with_value("RADIUS", Block::new("number").with_field("NUM", "0.2"));
        assert_eq!(
            assign(blk),
            "o = sphere(pos=vector(0, 0, 0), radius=0.2, color=color.red, \
             velocity=vector(0, 0, 0), mass=1, make_trail=True)\n"
        );
    }

    #[test]
    fn label_escapes_text() {
        let blk = Block::new("label").with_field("TEXT", "v = \"fast\"\nnext");
        assert_eq!(
            assign(blk),
            "o = label(pos=vector(0, 0, 0), text=\"v = \\\"fast\\\"\\nnext\", height=16, \
             color=color.white)\n"
        );
    }

    #[test]
    fn helix_coils() {
        let blk = Block::new("helix").with_field("COILS", "-3");
        assert!(assign(blk).ends_with("color=color.white, coils=5)\n"));
    }

    #[test]
    fn graph_and_curve() {
        let g = Block::new("graph").with_field("TITLE", "Height").with_field("XTITLE", "t");
        assert_eq!(assign(g), "o = graph(title=\"Height\", xtitle=\"t\")\n");
        let c = Block::new("gcurve").with_field("LABEL", "y");
        assert_eq!(assign(c), "o = gcurve(color=color.blue, label=\"y\")\n");
    }
}
