//! Display strings for nodes and edges

use std::path::Path;

use crate::canvas::{Edge, Node};

/// A node field that can stand in for the node in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplaySource {
    Text,
    Label,
    File,
    Url,
    Id,
}

/// Fields are tried in this order; the first non-empty one wins.
pub const DISPLAY_PRECEDENCE: [DisplaySource; 5] = [
    DisplaySource::Text,
    DisplaySource::Label,
    DisplaySource::File,
    DisplaySource::Url,
    DisplaySource::Id,
];

impl DisplaySource {
    /// The value this field contributes, empty when unset
    pub fn select(self, node: &Node, keep_path: bool) -> &str {
        match self {
            DisplaySource::Text => &node.text,
            DisplaySource::Label => &node.label,
            DisplaySource::File if keep_path => &node.file,
            DisplaySource::File => base_name(&node.file),
            DisplaySource::Url => &node.url,
            DisplaySource::Id => &node.id,
        }
    }
}

/// Pick the field that represents `node`, along with its value
pub fn resolve(node: &Node, keep_path: bool) -> Option<(DisplaySource, &str)> {
    if node.is_empty() {
        return None;
    }
    DISPLAY_PRECEDENCE
        .iter()
        .map(|source| (*source, source.select(node, keep_path)))
        .find(|(_, value)| !value.is_empty())
}

pub fn node_display(node: &Node, keep_path: bool) -> &str {
    resolve(node, keep_path).map_or("", |(_, value)| value)
}

pub fn edge_label(edge: &Edge) -> &str {
    if edge.label.is_empty() {
        &edge.text
    } else {
        &edge.label
    }
}

/// Collapse every line break (CRLF, CR or LF) to a space and trim the ends
pub fn single_line(s: &str) -> String {
    s.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', " ")
        .trim()
        .to_string()
}

// Paths without a final component ("/", "..") are shown verbatim
fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}
