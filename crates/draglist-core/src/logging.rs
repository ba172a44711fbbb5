//! Logging and debugging facilities for Draglist.
//!
//! This module provides:
//! - `tracing` target names for filtering per subsystem
//! - A debug formatter for element trees
//!
//! # Tracing Integration
//!
//! Draglist instruments its internals with the `tracing` crate. To see the
//! output, install a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! # Debug Visualization
//!
//! Use [`format_node_tree`] to inspect the element hierarchy of a list:
//!
//! ```ignore
//! use draglist_core::logging::{format_node_tree, TreeFormatOptions};
//!
//! let dump = format_node_tree(list_id, &TreeFormatOptions::default())?;
//! println!("{dump}");
//! ```

use std::fmt::Write as FmtWrite;

use crate::node::{NodeId, NodeResult, node_tree};

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "draglist_core";
    /// Element tree target.
    pub const NODE: &str = "draglist_core::node";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "draglist_core::signal";
    /// Widget crate target.
    pub const LIST: &str = "draglist::list";
    /// Drag coordinator target.
    pub const DRAG: &str = "draglist::drag";
}

/// Configuration for element tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// Whether to show node ids.
    pub show_ids: bool,
    /// Maximum depth to traverse (`None` for unlimited).
    pub max_depth: Option<usize>,
    /// Indent size for each level.
    pub indent_size: usize,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            show_ids: true,
            max_depth: None,
            indent_size: 2,
        }
    }
}

/// Format the subtree rooted at `id` as an indented listing.
pub fn format_node_tree(id: NodeId, options: &TreeFormatOptions) -> NodeResult<String> {
    let mut output = String::new();
    format_recursive(id, 0, options, &mut output)?;
    Ok(output)
}

fn format_recursive(
    id: NodeId,
    depth: usize,
    options: &TreeFormatOptions,
    output: &mut String,
) -> NodeResult<()> {
    if let Some(max) = options.max_depth
        && depth > max
    {
        return Ok(());
    }

    let tree = node_tree()?;
    let name = tree.node_name(id)?;
    let indent = " ".repeat(depth * options.indent_size);
    let display = if name.is_empty() { "(unnamed)" } else { &name };
    if options.show_ids {
        let _ = writeln!(output, "{indent}{display} [{id:?}]");
    } else {
        let _ = writeln!(output, "{indent}{display}");
    }

    for child in tree.children(id)? {
        format_recursive(child, depth + 1, options, output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{init_node_tree, node_tree};

    #[test]
    fn test_format_tree() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
        init_node_tree();
        let tree = node_tree().unwrap();
        let root = tree.register();
        let child = tree.register();
        tree.set_node_name(root, "list".to_string()).unwrap();
        tree.set_node_name(child, "item".to_string()).unwrap();
        tree.append_child(root, child).unwrap();

        let dump = format_node_tree(root, &TreeFormatOptions::default()).unwrap();
        assert!(dump.contains("list"));
        assert!(dump.contains("  item"));

        let _ = tree.destroy(root);
    }

    #[test]
    fn test_unnamed_nodes() {
        init_node_tree();
        let tree = node_tree().unwrap();
        let root = tree.register();

        let dump = format_node_tree(
            root,
            &TreeFormatOptions {
                show_ids: false,
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(dump, "(unnamed)\n");

        let _ = tree.destroy(root);
    }
}
