//! Built-in worked examples.
//!
//! Each demo is a complete [`Workspace`] assembled from blocks the way the
//! editor would save it, with variables referenced by id.

use crate::model::{Block, Workspace};

/// Names accepted by [`demo`], in display order.
pub const DEMOS: &[&str] = &["projectile", "bouncing_ball", "orbit"];

/// Build the named demo workspace.
pub fn demo(name: &str) -> Option<Workspace> {
    match name {
        "projectile" => Some(projectile()),
        "bouncing_ball" => Some(bouncing_ball()),
        "orbit" => Some(orbit()),
        _ => None,
    }
}

fn num(v: &str) -> Block {
    Block::new("number").with_field("NUM", v)
}

fn text(v: &str) -> Block {
    Block::new("text").with_field("TEXT", v)
}

fn vec3(x: &str, y: &str, z: &str) -> Block {
    Block::new("vector")
        .with_field("X", x)
        .with_field("Y", y)
        .with_field("Z", z)
}

fn color(name: &str) -> Block {
    Block::new("color").with_field("COLOR", name)
}

fn get(var: &str) -> Block {
    Block::new("get_variable").with_field("VAR", var)
}

fn set(var: &str, value: Block) -> Block {
    Block::new("set_variable")
        .with_field("VAR", var)
        .with_value("VALUE", value)
}

fn prop(obj: &str, prop: &str) -> Block {
    Block::new("get_property")
        .with_field("OBJ", obj)
        .with_field("PROP", prop)
}

fn component(axis: &str, vec: Block) -> Block {
    Block::new("vector_component")
        .with_field("COMPONENT", axis)
        .with_value("VEC", vec)
}

fn op(kind: &str, op: &str, a: Block, b: Block) -> Block {
    Block::new(kind)
        .with_field("OP", op)
        .with_value("A", a)
        .with_value("B", b)
}

fn vec_fn(func: &str, arg: Block) -> Block {
    Block::new("vector_function")
        .with_field("FUNC", func)
        .with_value("VEC", arg)
}

fn body(blocks: Vec<Block>) -> Block {
    Block::chain(blocks).unwrap_or_else(|| Block::new("comment"))
}

fn with_program(vars: &[(&str, &str)], blocks: Vec<Block>) -> Workspace {
    let mut ws = Workspace::new();
    for (id, name) in vars {
        ws.variables.insert(*id, *name);
    }
    ws.push(body(blocks));
    ws
}

/// A ball launched at 45 degrees, with its height plotted against time.
fn projectile() -> Workspace {
    let gravity = vec3("0", "-9.81", "0");
    let ball = Block::new("sphere")
        .with_field("MAKE_TRAIL", "TRUE")
        .with_value("RADIUS", num("0.2"))
        .with_value("COLOR", color("red"))
        .with_value("VELOCITY", vec3("10", "10", "0"));
    let graph = Block::new("graph")
        .with_field("TITLE", "Height")
        .with_field("XTITLE", "t (s)")
        .with_field("YTITLE", "y (m)");
    let curve = Block::new("gcurve")
        .with_field("LABEL", "y")
        .with_value("COLOR", color("blue"));
    let airborne = op("compare", "GTE", component("y", prop("v-ball", "pos")), num("0"));
    let step = body(vec![
        Block::new("rate").with_field("RATE", "100"),
        Block::new("update_velocity")
            .with_field("OBJ", "v-ball")
            .with_value("ACCEL", gravity),
        Block::new("update_position").with_field("OBJ", "v-ball"),
        Block::new("advance_time").with_field("VAR", "v-t"),
        Block::new("plot_point")
            .with_field("CURVE", "v-height")
            .with_value("X", get("v-t"))
            .with_value("Y", component("y", prop("v-ball", "pos"))),
    ]);
    with_program(
        &[("v-ball", "ball"), ("v-t", "t"), ("v-plot", "plot"), ("v-height", "height")],
        vec![
            Block::new("scene_title").with_field("TEXT", "Projectile"),
            Block::new("time_step").with_field("DT", "0.01"),
            set("v-t", num("0")),
            set("v-ball", ball),
            set("v-plot", graph),
            set("v-height", curve),
            Block::new("while_loop")
                .with_value("COND", airborne)
                .with_statement("DO", step),
            Block::new("print").with_value("VALUE", text("Flight time:")),
            Block::new("print").with_value("VALUE", get("v-t")),
        ],
    )
}

/// A ball dropped onto a floor, reversing its vertical velocity on contact.
fn bouncing_ball() -> Workspace {
    let floor = Block::new("box")
        .with_value("POS", vec3("0", "-5", "0"))
        .with_value("SIZE", vec3("10", "0.5", "10"))
        .with_value("COLOR", color("green"));
    let ball = Block::new("sphere")
        .with_value("POS", vec3("0", "4", "0"))
        .with_value("COLOR", color("blue"));
    let hit = op("compare", "LT", component("y", prop("v-ball", "pos")), num("-4"));
    let bounce = Block::new("if").with_value("COND", hit).with_statement(
        "DO",
        Block::new("raw_statement").with_field("CODE", "ball.velocity.y = -ball.velocity.y"),
    );
    let step = body(vec![
        Block::new("rate").with_field("RATE", "100"),
        Block::new("update_velocity")
            .with_field("OBJ", "v-ball")
            .with_value("ACCEL", vec3("0", "-9.81", "0")),
        Block::new("update_position").with_field("OBJ", "v-ball"),
        bounce,
    ]);
    with_program(
        &[("v-floor", "floor"), ("v-ball", "ball")],
        vec![
            Block::new("scene_title").with_field("TEXT", "Bouncing ball"),
            Block::new("comment").with_field("TEXT", "Elastic bounce, no air drag"),
            set("v-floor", floor),
            set("v-ball", ball),
            Block::new("time_step").with_field("DT", "0.01"),
            Block::new("forever").with_statement("DO", step),
        ],
    )
}

/// A planet on a circular-ish orbit around a fixed sun, with a live readout.
fn orbit() -> Workspace {
    let sun = Block::new("sphere")
        .with_value("RADIUS", num("2"))
        .with_value("COLOR", color("yellow"));
    let planet = Block::new("sphere")
        .with_field("MAKE_TRAIL", "TRUE")
        .with_value("POS", vec3("20", "0", "0"))
        .with_value("RADIUS", num("0.5"))
        .with_value("COLOR", color("blue"))
        .with_value("VELOCITY", vec3("0", "7", "0"));
    let hud = Block::new("label").with_value("POS", vec3("0", "25", "0"));
    let separation = op(
        "arithmetic",
        "MINUS",
        prop("v-planet", "pos"),
        prop("v-sun", "pos"),
    );
    let pull = op(
        "arithmetic",
        "MULTIPLY",
        num("-1"),
        op(
            "arithmetic",
            "DIVIDE",
            op(
                "arithmetic",
                "MULTIPLY",
                Block::new("physics_constant").with_field("CONST", "GM"),
                vec_fn("norm", get("v-r")),
            ),
            vec_fn("mag2", get("v-r")),
        ),
    );
    let readout = Block::new("telemetry_update")
        .with_field("LABEL", "v-hud")
        .with_field("METRIC1", "t")
        .with_field("DECIMALS1", "1")
        .with_field("UNIT1", "s")
        .with_value("VALUE1", get("v-t"))
        .with_field("METRIC2", "speed")
        .with_field("UNIT2", "m/s")
        .with_value("VALUE2", vec_fn("mag", prop("v-planet", "velocity")));
    let step = body(vec![
        Block::new("rate").with_field("RATE", "100"),
        set("v-r", separation),
        set("v-a", pull),
        Block::new("update_velocity")
            .with_field("OBJ", "v-planet")
            .with_value("ACCEL", get("v-a")),
        Block::new("update_position").with_field("OBJ", "v-planet"),
        Block::new("advance_time").with_field("VAR", "v-t"),
        readout,
    ]);
    let mut ws = with_program(
        &[
            ("v-sun", "sun"),
            ("v-planet", "planet"),
            ("v-hud", "hud"),
            ("v-t", "t"),
            ("v-r", "r"),
            ("v-a", "a"),
        ],
        vec![
            Block::new("scene_title").with_field("TEXT", "Orbit"),
            Block::new("scene_background").with_value("COLOR", color("black")),
            Block::new("define_constant")
                .with_field("NAME", "GM")
                .with_field("VALUE", "1000"),
            Block::new("time_step").with_field("DT", "0.01"),
            set("v-t", num("0")),
            set("v-sun", sun),
            set("v-planet", planet),
            set("v-hud", hud),
            Block::new("forever").with_statement("DO", step),
        ],
    );
    ws.constants.push_static("GM", "1000");
    ws
}
