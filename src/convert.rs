//! Canvas to edge-list conversion
//!
//! Turns every edge of a canvas into a `(from, label, to)` row, where the
//! endpoints are replaced by their display strings. Rows keep edge order.

use std::collections::HashMap;

use serde::Serialize;
use tracing::{debug, warn};

use crate::canvas::{parse_canvas, Canvas, Node, ParseStrategy};
use crate::config::Config;
use crate::display::{edge_label, node_display, single_line};
use crate::errors::CanvasResult;
use crate::loader::read_source;
use crate::sink::write_to;

/// One output line: `from;label;to`
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Row {
    pub from: String,
    pub label: String,
    pub to: String,
}

/// Node lookup by id. A repeated id maps to the last node carrying it.
#[derive(Debug, Default)]
pub struct NodeIndex<'a> {
    nodes: HashMap<&'a str, &'a Node>,
    duplicates: usize,
}

impl<'a> NodeIndex<'a> {
    pub fn build(nodes: &'a [Node]) -> Self {
        let mut index = NodeIndex {
            nodes: HashMap::with_capacity(nodes.len()),
            duplicates: 0,
        };
        for node in nodes {
            if index.nodes.insert(node.id.as_str(), node).is_some() {
                warn!("Duplicate node id '{}', keeping the last one", node.id);
                index.duplicates += 1;
            }
        }
        index
    }

    pub fn get(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// How many nodes were shadowed by a later node with the same id
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}

#[derive(Debug, Clone, Default)]
pub struct Conversion {
    pub rows: Vec<Row>,
    pub dangling_endpoints: usize,
    pub duplicate_ids: usize,
}

/// Build one row per edge, in edge order
pub fn convert(canvas: &Canvas, keep_path: bool) -> Conversion {
    let index = NodeIndex::build(&canvas.nodes);
    let mut dangling_endpoints = 0;

    let mut endpoint = |id: &str| match index.get(id) {
        Some(node) => single_line(node_display(node, keep_path)),
        None => {
            debug!("Edge endpoint '{}' matches no node", id);
            dangling_endpoints += 1;
            String::new()
        }
    };

    let rows = canvas
        .edges
        .iter()
        .map(|edge| Row {
            from: endpoint(&edge.from_node),
            label: single_line(edge_label(edge)),
            to: endpoint(&edge.to_node),
        })
        .collect();

    Conversion {
        rows,
        dangling_endpoints,
        duplicate_ids: index.duplicates(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionSummary {
    pub rows: usize,
    pub dangling_endpoints: usize,
    pub duplicate_ids: usize,
    pub strategy: ParseStrategy,
}

/// Load, convert and write in one pass
pub fn run(config: &Config) -> CanvasResult<ConversionSummary> {
    let data = read_source(&config.input)?;
    let parsed = parse_canvas(&data)?;
    debug!(
        "Parsed {} nodes and {} edges ({:?} decode)",
        parsed.canvas.nodes.len(),
        parsed.canvas.edges.len(),
        parsed.strategy
    );

    let conversion = convert(&parsed.canvas, config.keep_path);
    let rows = write_to(&conversion.rows, &config.output)?;

    Ok(ConversionSummary {
        rows,
        dangling_endpoints: conversion.dangling_endpoints,
        duplicate_ids: conversion.duplicate_ids,
        strategy: parsed.strategy,
    })
}
