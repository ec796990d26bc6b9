use glowblocks::block_types::BlockRegistry;
use glowblocks::{
    Block, CompilerConfig, EMPTY_WORKSPACE_PLACEHOLDER, GENERATION_FAILED_PLACEHOLDER, Workspace,
    compile, try_compile,
};

fn single(block: Block) -> Workspace {
    let mut ws = Workspace::new();
    ws.push(block);
    ws
}

#[test]
fn minimal_simulation_loop() {
    let mut ws = Workspace::new();
    ws.variables.insert("id-ball", "ball");
    ws.push(
        Block::new("time_step").with_field("DT", "0.01").then(
            Block::new("forever").with_statement(
                "DO",
                Block::new("rate")
                    .with_field("RATE", "100")
                    .then(Block::new("update_position").with_field("OBJ", "id-ball")),
            ),
        ),
    );
    assert_eq!(
        compile(&ws),
        "dt = 0.01\nwhile True:\n    rate(100)\n    ball.pos = ball.pos + ball.velocity * dt\n"
    );
}

#[test]
fn compile_is_deterministic() {
    for name in glowblocks::demos::DEMOS {
        let ws = glowblocks::demos::demo(name).unwrap();
        assert_eq!(compile(&ws), compile(&ws.clone()), "{name}");
    }
}

#[test]
fn every_kind_compiles_with_nothing_connected() {
    let registry = BlockRegistry::standard();
    assert!(registry.len() > 40);
    for kind in registry.iter() {
        let ws = single(Block::new(kind.name));
        let out = compile(&ws);
        assert_ne!(out, GENERATION_FAILED_PLACEHOLDER, "{}", kind.name);
        assert_ne!(out, EMPTY_WORKSPACE_PLACEHOLDER, "{}", kind.name);
        assert!(out.ends_with('\n'), "{}", kind.name);
        for line in out.lines() {
            assert!(!line.trim().is_empty(), "{}: blank line", kind.name);
            assert!(!line.ends_with("= "), "{}: `{}`", kind.name, line);
            assert!(!line.contains("(, ") && !line.contains(", ,"), "{}: `{}`", kind.name, line);
        }
    }
}

#[test]
fn statement_kinds_nest_under_a_loop() {
    for kind in BlockRegistry::standard().iter().filter(|k| !k.produces_value()) {
        let ws = single(Block::new("forever").with_statement("DO", Block::new(kind.name)));
        let out = compile(&ws);
        let mut lines = out.lines();
        assert_eq!(lines.next(), Some("while True:"), "{}", kind.name);
        for line in lines {
            assert!(line.starts_with("    "), "{}: `{}`", kind.name, line);
        }
    }
}

#[test]
fn disabled_inputs_behave_like_empty_slots() {
    for kind in BlockRegistry::standard().iter() {
        let empty = Block::new(kind.name);
        let mut filled = Block::new(kind.name);
        for slot in kind.shape.values {
            filled = filled.with_value(*slot, Block::new("number").with_field("NUM", "7").disable());
        }
        assert_eq!(compile(&single(empty)), compile(&single(filled)), "{}", kind.name);
    }
}

const ORIGIN: &str = "vector(0, 0, 0)";
const X_AXIS: &str = "vector(1, 0, 0)";
const WHITE: &str = "color.white";

/// Every value slot with the literal written when nothing is connected.
const FALLBACKS: &[(&str, &str, &str)] = &[
    ("repeat", "TIMES", "10"),
    ("while_loop", "COND", "False"),
    ("if", "COND", "False"),
    ("if_else", "COND", "False"),
    ("set_variable", "VALUE", "0"),
    ("change_variable", "DELTA", "1"),
    ("advance_time", "DT", "dt"),
    ("update_position", "DT", "dt"),
    ("update_velocity", "ACCEL", ORIGIN),
    ("update_velocity", "DT", "dt"),
    ("apply_force", "FORCE", ORIGIN),
    ("apply_force", "DT", "dt"),
    ("set_property", "VALUE", "0"),
    ("attach_trail", "COLOR", WHITE),
    ("scene_background", "COLOR", "color.black"),
    ("print", "VALUE", "\"\""),
    ("plot_point", "X", "t"),
    ("plot_point", "Y", "0"),
    ("sphere", "POS", ORIGIN),
    ("sphere", "RADIUS", "1"),
    ("sphere", "COLOR", WHITE),
    ("sphere", "VELOCITY", ORIGIN),
    ("sphere", "MASS", "1"),
    ("box", "POS", ORIGIN),
    ("box", "SIZE", "vector(1, 1, 1)"),
    ("box", "COLOR", WHITE),
    ("box", "VELOCITY", ORIGIN),
    ("box", "MASS", "1"),
    ("cylinder", "POS", ORIGIN),
    ("cylinder", "AXIS", X_AXIS),
    ("cylinder", "RADIUS", "1"),
    ("cylinder", "COLOR", WHITE),
    ("arrow", "POS", ORIGIN),
    ("arrow", "AXIS", X_AXIS),
    ("arrow", "COLOR", "color.yellow"),
    ("cone", "POS", ORIGIN),
    ("cone", "AXIS", X_AXIS),
    ("cone", "RADIUS", "1"),
    ("cone", "COLOR", WHITE),
    ("helix", "POS", ORIGIN),
    ("helix", "AXIS", X_AXIS),
    ("helix", "RADIUS", "1"),
    ("helix", "COLOR", WHITE),
    ("ring", "POS", ORIGIN),
    ("ring", "AXIS", "vector(0, 0, 1)"),
    ("ring", "RADIUS", "1"),
    ("ring", "THICKNESS", "0.1"),
    ("ring", "COLOR", WHITE),
    ("label", "POS", ORIGIN),
    ("label", "COLOR", WHITE),
    ("gcurve", "COLOR", "color.blue"),
    ("make_vector", "X", "0"),
    ("make_vector", "Y", "0"),
    ("make_vector", "Z", "0"),
    ("arithmetic", "A", "0"),
    ("arithmetic", "B", "0"),
    ("compare", "A", "0"),
    ("compare", "B", "0"),
    ("logic_operation", "A", "False"),
    ("logic_operation", "B", "False"),
    ("logic_not", "BOOL", "True"),
    ("math_function", "NUM", "0"),
    ("vector_function", "VEC", ORIGIN),
    ("vector_product", "A", ORIGIN),
    ("vector_product", "B", ORIGIN),
    ("vector_component", "VEC", ORIGIN),
];

/// Telemetry rows are dropped, not filled, when their value is missing.
const ROW_SLOTS: &[&str] = &["telemetry_update"];

fn marker(slot: &str) -> String {
    format!("m_{}_", slot)
}

/// `kind` with every value slot except `skip` holding a distinct variable.
fn filled_except(kind: &str, slots: &[&str], skip: Option<&str>) -> Block {
    let mut blk = Block::new(kind);
    for slot in slots.iter().filter(|s| Some(**s) != skip) {
        blk = blk.with_value(*slot, Block::new("get_variable").with_field("VAR", marker(slot)));
    }
    blk
}

#[test]
fn fallback_table_covers_every_value_slot() {
    let registry = BlockRegistry::standard();
    for kind in registry.iter().filter(|k| !ROW_SLOTS.contains(&k.name)) {
        for slot in kind.shape.values {
            assert!(
                FALLBACKS.iter().any(|(k, s, _)| *k == kind.name && s == slot),
                "{}.{} has no fallback entry",
                kind.name,
                slot
            );
        }
    }
    for (kind, slot, _) in FALLBACKS {
        let registered = registry.get(kind).unwrap_or_else(|| panic!("{kind} not registered"));
        assert!(registered.shape.values.contains(slot), "{kind}.{slot}");
    }
}

#[test]
fn each_disconnected_slot_writes_its_fallback() {
    let registry = BlockRegistry::standard();
    for (kind, slot, fallback) in FALLBACKS {
        let slots = registry.get(kind).unwrap().shape.values;
        let full = compile(&single(filled_except(kind, slots, None)));
        let mark = marker(slot);
        assert!(full.contains(&mark), "{kind}.{slot}: {full}");

        let missing = compile(&single(filled_except(kind, slots, Some(*slot))));
        assert_eq!(missing, full.replace(&mark, fallback), "{kind}.{slot}");
    }
}

#[test]
fn rename_changes_every_reference() {
    let mut ws = Workspace::new();
    ws.variables.insert("v1", "ball");
    ws.push(Block::chain([
        Block::new("set_variable").with_field("VAR", "v1").with_value("VALUE", Block::new("sphere")),
        Block::new("update_position").with_field("OBJ", "v1"),
        Block::new("set_property")
            .with_field("OBJ", "v1")
            .with_field("PROP", "color")
            .with_value(
                "VALUE",
                Block::new("get_property").with_field("OBJ", "v1").with_field("PROP", "color"),
            ),
    ])
    .unwrap());
    let before = compile(&ws);
    assert_eq!(before.matches("ball").count(), 6);

    assert_eq!(ws.variables.rename("v1", "orb").as_deref(), Some("ball"));
    let after = compile(&ws);
    assert_eq!(after, before.replace("ball", "orb"));
}

#[test]
fn unknown_variable_id_uses_field_text() {
    let ws = single(Block::new("update_position").with_field("OBJ", "rocket"));
    assert_eq!(compile(&ws), "rocket.pos = rocket.pos + rocket.velocity * dt\n");
}

#[test]
fn telemetry_keeps_only_complete_rows() {
    let v = |name: &str| Block::new("get_variable").with_field("VAR", name);
    let blk = Block::new("telemetry_update")
        .with_field("LABEL", "hud")
        .with_field("METRIC1", "a")
        .with_value("VALUE1", v("a"))
        .with_value("VALUE2", v("b"))
        .with_value("VALUE4", v("d"))
        .with_field("METRIC3", "c")
        .with_field("UNIT3", "m")
        .with_value("VALUE3", v("c"))
        .with_field("METRIC5", "e")
        .with_field("DECIMALS5", "0")
        .with_value("VALUE5", v("e"));
    assert_eq!(
        compile(&single(blk)),
        r#"hud.text = "a = " + str(round(a, 2)) + "\n" + "c = " + str(round(c, 2)) + " m" + "\n" + "e = " + str(round(e, 0))
"#
    );
}

#[test]
fn top_level_chains_keep_document_order() {
    let mut ws = Workspace::new();
    ws.push(Block::new("rate").with_field("RATE", "1"));
    ws.push(Block::new("rate").with_field("RATE", "2").disable());
    ws.push(Block::new("rate").with_field("RATE", "3"));
    assert_eq!(compile(&ws), "rate(1)\nrate(3)\n");
}

#[test]
fn strict_compile_reports_the_error() {
    let ws = single(Block::new("forever").with_statement("DO", Block::new("warp")));
    let err = try_compile(&ws, &CompilerConfig::default()).unwrap_err();
    assert_eq!(err.to_string(), "unknown block kind `warp`");
    assert_eq!(compile(&ws), GENERATION_FAILED_PLACEHOLDER);
}
