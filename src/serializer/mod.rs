//! Workspace serialization into editor-compatible XML.
//!
//! Block ids and variable ids are sequential and iteration follows creation
//! order, so the same workspace always serializes to the same bytes.

use std::fmt::Write;

use crate::workspace::{Block, BlockId, InputKind, Workspace};

const XMLNS: &str = "https://developers.google.com/blockly/xml";

/// Serializes the whole workspace: the variable table first, then every
/// top-level chain in creation order.
pub fn workspace_to_xml(workspace: &Workspace) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<xml xmlns=\"{XMLNS}\">");

    if !workspace.variables().is_empty() {
        out.push_str("  <variables>\n");
        for variable in workspace.variables() {
            let _ = writeln!(
                out,
                "    <variable id=\"{}\">{}</variable>",
                variable.id,
                escape(&variable.name)
            );
        }
        out.push_str("  </variables>\n");
    }

    for id in workspace.top_blocks() {
        write_block(&mut out, workspace, id, 1);
    }

    out.push_str("</xml>\n");
    out
}

fn write_block(out: &mut String, workspace: &Workspace, id: BlockId, depth: usize) {
    let block = workspace.block(id);
    let tag = if block.shadow { "shadow" } else { "block" };
    let pad = "  ".repeat(depth);

    let _ = write!(
        out,
        "{pad}<{tag} type=\"{}\" id=\"{}\"",
        escape(block.block_type.name()),
        block.id
    );
    if is_leaf(block) {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");

    // A mutation with neither attribute carries no information and is omitted.
    if let Some(mutation) = block.mutation.filter(|m| m.else_if_count > 0 || m.has_else) {
        let _ = write!(out, "{pad}  <mutation");
        if mutation.else_if_count > 0 {
            let _ = write!(out, " elseif=\"{}\"", mutation.else_if_count);
        }
        if mutation.has_else {
            out.push_str(" else=\"1\"");
        }
        out.push_str("/>\n");
    }

    for field in &block.fields {
        let _ = write!(out, "{pad}  <field name=\"{}\"", escape(&field.name));
        if let Some(variable) = field.variable {
            let _ = write!(out, " id=\"{variable}\"");
        }
        let _ = writeln!(out, ">{}</field>", escape(&field.value));
    }

    for input in &block.inputs {
        let Some(child) = input.child else {
            continue;
        };
        let wrapper = match input.kind {
            InputKind::Value(_) => "value",
            InputKind::Statement => "statement",
        };
        let _ = writeln!(out, "{pad}  <{wrapper} name=\"{}\">", escape(&input.name));
        write_block(out, workspace, child, depth + 2);
        let _ = writeln!(out, "{pad}  </{wrapper}>");
    }

    if let Some(next) = block.next {
        let _ = writeln!(out, "{pad}  <next>");
        write_block(out, workspace, next, depth + 2);
        let _ = writeln!(out, "{pad}  </next>");
    }

    let _ = writeln!(out, "{pad}</{tag}>");
}

/// A block with nothing but its type serializes self-closed.
fn is_leaf(block: &Block) -> bool {
    block
        .mutation
        .is_none_or(|m| m.else_if_count == 0 && !m.has_else)
        && block.fields.is_empty()
        && block.inputs.iter().all(|i| i.child.is_none())
        && block.next.is_none()
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape("a < b && c > 'd'"), "a &lt; b &amp;&amp; c &gt; &apos;d&apos;");
    }

    #[test]
    fn empty_workspace_is_bare_envelope() {
        let workspace = Workspace::new();
        assert_eq!(
            workspace_to_xml(&workspace),
            "<xml xmlns=\"https://developers.google.com/blockly/xml\">\n</xml>\n"
        );
    }
}
