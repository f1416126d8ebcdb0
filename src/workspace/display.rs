use itertools::Itertools;
use std::fmt;

use super::{BlockId, Workspace};

/// Renders a block (and everything attached to it) as an indented tree, for
/// debugging decompiler output from the CLI.
pub struct DisplayBlock<'a> {
    pub workspace: &'a Workspace,
    pub id: BlockId,
}

impl<'a> fmt::Display for DisplayBlock<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_as_tree(self.id, f, "", true)
    }
}

impl<'a> DisplayBlock<'a> {
    fn fmt_as_tree(
        &self,
        id: BlockId,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let node_marker = if prefix.is_empty() {
            ""
        } else if is_last {
            "└── "
        } else {
            "├── "
        };
        write!(f, "{}{}", prefix, node_marker)?;

        let block = self.workspace.block(id);
        write!(f, "{} ({})", block.block_type, block.id)?;
        if block.shadow {
            write!(f, " [shadow]")?;
        }
        if !block.fields.is_empty() {
            let fields = block
                .fields
                .iter()
                .map(|field| format!("{}={}", field.name, field.value))
                .join(", ");
            write!(f, " {{{fields}}}")?;
        }
        writeln!(f)?;

        let child_prefix = if prefix.is_empty() {
            String::new()
        } else {
            format!("{}{}", prefix, if is_last { "    " } else { "│   " })
        };

        let children: Vec<(String, BlockId)> = block
            .inputs
            .iter()
            .filter_map(|input| input.child.map(|c| (input.name.clone(), c)))
            .chain(block.next.map(|n| ("next".to_string(), n)))
            .collect();

        for (i, (label, child)) in children.iter().enumerate() {
            let last = i == children.len() - 1;
            let marker = if last { "└── " } else { "├── " };
            writeln!(f, "{}{}{}:", child_prefix, marker, label)?;
            let nested = format!("{}{}", child_prefix, if last { "    " } else { "│   " });
            self.fmt_as_tree(*child, f, &nested, true)?;
        }
        Ok(())
    }
}
