//! The telemetry block: up to five rounded, unit-suffixed measurements
//! assigned to a label's text.

use super::literal::{integer_literal, quote_literal};
use super::{CodeGen, Precedence};
use crate::block_types::{BlockKind, BlockRegistry, Shape};
use crate::error::Result;
use crate::model::Block;

const CATEGORY: &str = "Output";

pub const ROWS: usize = 5;

const DEFAULT_DECIMALS: i64 = 2;
const MAX_DECIMALS: i64 = 10;

const FIELDS: &[&str] = &[
    "LABEL", "METRIC1", "DECIMALS1", "UNIT1", "METRIC2", "DECIMALS2", "UNIT2", "METRIC3",
    "DECIMALS3", "UNIT3", "METRIC4", "DECIMALS4", "UNIT4", "METRIC5", "DECIMALS5", "UNIT5",
];
const VALUES: &[&str] = &["VALUE1", "VALUE2", "VALUE3", "VALUE4", "VALUE5"];

pub fn register(r: &mut BlockRegistry) {
    r.register(BlockKind::statement(
        "telemetry_update",
        CATEGORY,
        Shape::EMPTY.fields(FIELDS).values(VALUES),
        telemetry_update,
    ));
}

/// `label.text = "v = " + str(round(v, 2)) + " m/s" + "\n" + ...`
///
/// A row renders only when it has both a metric name and a connected value.
fn telemetry_update(
    out: &mut String,
    block: &Block,
    cg: &mut CodeGen<'_>,
    level: usize,
) -> Result<()> {
    let label = cg.variable(block, "LABEL", "label");
    let mut rows = Vec::with_capacity(ROWS);
    for i in 1..=ROWS {
        let metric = block.field(&format!("METRIC{}", i));
        let slot = format!("VALUE{}", i);
        if metric.trim().is_empty() || block.value_input(&slot).is_none() {
            continue;
        }
        let value = cg.value_in(block, &slot, "0", Precedence::Unknown)?;
        let decimals = match integer_literal(block.field(&format!("DECIMALS{}", i)), DEFAULT_DECIMALS)
        {
            d @ 0..=MAX_DECIMALS => d,
            _ => DEFAULT_DECIMALS,
        };
        let mut row = format!(
            "{} + str(round({}, {}))",
            quote_literal(&format!("{} = ", metric)),
            value,
            decimals
        );
        let unit = block.field(&format!("UNIT{}", i));
        if !unit.is_empty() {
            row.push_str(&format!(" + {}", quote_literal(&format!(" {}", unit))));
        }
        rows.push(row);
    }
    let text = if rows.is_empty() {
        "\"\"".to_string()
    } else {
        rows.join(" + \"\\n\" + ")
    };
    cg.line(out, level, &format!("{}.text = {}", label, text));
    Ok(())
}
