//! Block-editor XML workspaces.
//!
//! ```xml
//! <xml>
//!   <variables><variable id="v1">ball</variable></variables>
//!   <block type="forever" id="a">
//!     <statement name="DO">
//!       <block type="update_position">
//!         <field name="OBJ" id="v1">ball</field>
//!         <value name="DT"><shadow type="number"><field name="NUM">0.01</field></shadow></value>
//!       </block>
//!     </statement>
//!   </block>
//! </xml>
//! ```

use crate::model::{Block, Workspace};
use crate::symbols::VariableTable;
use anyhow::{Context, Result, anyhow, bail};
use roxmltree::{Document, Node};

/// Parse a whole XML workspace document.
pub fn parse_workspace_xml(text: &str) -> Result<Workspace> {
    let doc = Document::parse(text).context("Failed to parse workspace XML")?;
    let root = doc.root_element();
    if root.tag_name().name() != "xml" {
        bail!("Expected <xml> root, found <{}>", root.tag_name().name());
    }
    let mut ws = Workspace::new();
    for child in root.children().filter(|c| c.is_element()) {
        match child.tag_name().name() {
            "variables" => parse_variables(child, &mut ws.variables),
            "block" => {
                let blk = parse_block(child, &mut ws.variables)?;
                ws.top_blocks.push(blk);
            }
            other => log::debug!("ignoring top-level <{}>", other),
        }
    }
    Ok(ws)
}

fn parse_variables(node: Node, table: &mut VariableTable) {
    for var in node
        .children()
        .filter(|c| c.is_element() && c.has_tag_name("variable"))
    {
        let name = var.text().unwrap_or("").trim();
        let id = var.attribute("id").unwrap_or(name);
        if id.is_empty() {
            log::debug!("skipping <variable> without id or name");
            continue;
        }
        table.insert(id, name);
    }
}

/// Parse a `<block>` (or `<shadow>`) element with its slots and `next` chain.
fn parse_block(node: Node, vars: &mut VariableTable) -> Result<Block> {
    let kind = node
        .attribute("type")
        .ok_or_else(|| anyhow!("<{}> without type attribute", node.tag_name().name()))?;
    let mut blk = Block::new(kind);
    blk.id = node.attribute("id").map(|s| s.to_string());
    blk.disabled = node.attribute("disabled").is_some_and(is_true)
        || node.attribute("enabled").is_some_and(|v| !is_true(v));

    for child in node.children().filter(|c| c.is_element()) {
        match child.tag_name().name() {
            "field" => {
                let Some(name) = child.attribute("name") else {
                    log::debug!("skipping <field> without name in {}", kind);
                    continue;
                };
                let text = child.text().unwrap_or("");
                // Variable fields carry the id; the text is its name at save time.
                let value = match child.attribute("id") {
                    Some(id) => {
                        if !vars.contains(id) {
                            vars.insert(id, text);
                        }
                        id
                    }
                    None => text,
                };
                blk.fields.insert(name.to_string(), value.to_string());
            }
            "value" => {
                let name = slot_name(child, kind)?;
                if let Some(inner) = slot_block(child) {
                    let value = parse_block(inner, vars)
                        .with_context(|| format!("In value {} of {}", name, kind))?;
                    blk.values.insert(name.to_string(), value);
                }
            }
            "statement" => {
                let name = slot_name(child, kind)?;
                if let Some(inner) = slot_block(child) {
                    let head = parse_block(inner, vars)
                        .with_context(|| format!("In statement {} of {}", name, kind))?;
                    blk.statements.insert(name.to_string(), head);
                }
            }
            "next" => {
                if let Some(inner) = slot_block(child) {
                    blk.next = Some(Box::new(parse_block(inner, vars)?));
                }
            }
            unknown => log::debug!("ignoring <{}> in {}", unknown, kind),
        }
    }
    Ok(blk)
}

fn slot_name<'a>(node: Node<'a, '_>, kind: &str) -> Result<&'a str> {
    node.attribute("name")
        .ok_or_else(|| anyhow!("<{}> without name in {}", node.tag_name().name(), kind))
}

/// The block plugged into a slot: a real `<block>` wins over its `<shadow>`.
fn slot_block<'a, 'i>(node: Node<'a, 'i>) -> Option<Node<'a, 'i>> {
    let mut shadow = None;
    for child in node.children().filter(|c| c.is_element()) {
        match child.tag_name().name() {
            "block" => return Some(child),
            "shadow" if shadow.is_none() => shadow = Some(child),
            _ => {}
        }
    }
    shadow
}

fn is_true(v: &str) -> bool {
    v.trim().eq_ignore_ascii_case("true")
}
