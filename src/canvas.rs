//! Canvas document model and decoding
//!
//! A canvas is a JSON document with a `nodes` array and an `edges` array.
//! Decoding first tries a strict schema that rejects unknown fields, then
//! falls back to a lenient one that ignores them.

use serde::{Deserialize, Deserializer};
use tracing::debug;

use crate::errors::{CanvasError, CanvasResult};

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Canvas {
    #[serde(default, deserialize_with = "nullable")]
    pub nodes: Vec<Node>,
    #[serde(default, deserialize_with = "nullable")]
    pub edges: Vec<Edge>,
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    #[serde(default, deserialize_with = "nullable")]
    pub id: String,
    #[serde(rename = "type", default, deserialize_with = "nullable")]
    pub node_type: String,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub file: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
}

impl Node {
    /// True when no field carries a value, i.e. the node is absent
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
            && self.node_type.is_empty()
            && self.text.is_empty()
            && self.file.is_empty()
            && self.url.is_empty()
            && self.label.is_empty()
    }
}

#[derive(Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Edge {
    #[serde(rename = "fromNode", default, deserialize_with = "nullable")]
    pub from_node: String,
    #[serde(rename = "toNode", default, deserialize_with = "nullable")]
    pub to_node: String,
    #[serde(default, deserialize_with = "nullable")]
    pub label: String,
    // some exports put the edge caption under "text"
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
}

/// Which decoder accepted the document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseStrategy {
    Strict,
    Lenient,
}

#[derive(Debug, Clone)]
pub struct ParsedCanvas {
    pub canvas: Canvas,
    pub strategy: ParseStrategy,
}

/// Decode a canvas, retrying leniently when the strict schema rejects it.
///
/// When both attempts fail the strict decoder's error is returned, since it
/// points at the offending field rather than a generic type mismatch.
pub fn parse_canvas(data: &[u8]) -> CanvasResult<ParsedCanvas> {
    let strict_err = match serde_json::from_slice::<Option<strict::Canvas>>(data) {
        Ok(canvas) => {
            return Ok(ParsedCanvas {
                canvas: canvas.map(Canvas::from).unwrap_or_default(),
                strategy: ParseStrategy::Strict,
            })
        }
        Err(e) => e,
    };

    debug!("Strict decode failed ({}), retrying leniently", strict_err);

    match serde_json::from_slice::<Option<Canvas>>(data) {
        Ok(canvas) => Ok(ParsedCanvas {
            canvas: canvas.unwrap_or_default(),
            strategy: ParseStrategy::Lenient,
        }),
        Err(lenient_err) => {
            debug!("Lenient decode failed too: {}", lenient_err);
            Err(CanvasError::Parse(strict_err))
        }
    }
}

/// Treat an explicit JSON `null` the same as a missing field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Same shape as the public model, but unknown fields are rejected
mod strict {
    use serde::Deserialize;

    use super::nullable;

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    pub(super) struct Canvas {
        #[serde(default, deserialize_with = "nullable")]
        nodes: Vec<Node>,
        #[serde(default, deserialize_with = "nullable")]
        edges: Vec<Edge>,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Node {
        #[serde(default, deserialize_with = "nullable")]
        id: String,
        #[serde(rename = "type", default, deserialize_with = "nullable")]
        node_type: String,
        #[serde(default, deserialize_with = "nullable")]
        text: String,
        #[serde(default, deserialize_with = "nullable")]
        file: String,
        #[serde(default, deserialize_with = "nullable")]
        url: String,
        #[serde(default, deserialize_with = "nullable")]
        label: String,
    }

    #[derive(Deserialize)]
    #[serde(deny_unknown_fields)]
    struct Edge {
        #[serde(rename = "fromNode", default, deserialize_with = "nullable")]
        from_node: String,
        #[serde(rename = "toNode", default, deserialize_with = "nullable")]
        to_node: String,
        #[serde(default, deserialize_with = "nullable")]
        label: String,
        #[serde(default, deserialize_with = "nullable")]
        text: String,
    }

    impl From<Canvas> for super::Canvas {
        fn from(c: Canvas) -> Self {
            super::Canvas {
                nodes: c
                    .nodes
                    .into_iter()
                    .map(|n| super::Node {
                        id: n.id,
                        node_type: n.node_type,
                        text: n.text,
                        file: n.file,
                        url: n.url,
                        label: n.label,
                    })
                    .collect(),
                edges: c
                    .edges
                    .into_iter()
                    .map(|e| super::Edge {
                        from_node: e.from_node,
                        to_node: e.to_node,
                        label: e.label,
                        text: e.text,
                    })
                    .collect(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_decode_accepts_known_schema() {
        let data = br#"{
            "nodes": [
                {"id": "A", "type": "text", "text": "Start"},
                {"id": "B", "type": "file", "file": "/x/y/End.md"}
            ],
            "edges": [{"fromNode": "A", "toNode": "B", "label": "leads to"}]
        }"#;

        let parsed = parse_canvas(data).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Strict);
        assert_eq!(parsed.canvas.nodes.len(), 2);
        assert_eq!(parsed.canvas.nodes[0].node_type, "text");
        assert_eq!(parsed.canvas.nodes[1].file, "/x/y/End.md");
        assert_eq!(parsed.canvas.edges[0].from_node, "A");
        assert_eq!(parsed.canvas.edges[0].to_node, "B");
        assert_eq!(parsed.canvas.edges[0].label, "leads to");
    }

    #[test]
    fn unknown_fields_fall_back_to_lenient() {
        let data = br#"{
            "nodes": [{"id": "A", "text": "Start", "x": 10, "y": -20, "width": 250, "color": "4"}],
            "edges": [{"id": "e1", "fromNode": "A", "fromSide": "right", "toNode": "A"}],
            "metadata": {"version": "1.0"}
        }"#;

        let parsed = parse_canvas(data).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Lenient);
        assert_eq!(parsed.canvas.nodes[0].text, "Start");
        assert_eq!(parsed.canvas.edges[0].from_node, "A");
    }

    #[test]
    fn failure_reports_the_strict_error() {
        // strict trips over the unknown field first, lenient over the number
        let data = br#"{"nodes": [{"extra": true, "id": 7}], "edges": []}"#;

        let err = parse_canvas(data).unwrap_err();
        assert!(err.is_parse_error());
        let message = err.to_string();
        assert!(message.contains("extra"), "unexpected message: {}", message);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = parse_canvas(b"{\"nodes\": [").unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn missing_and_null_fields_become_empty() {
        let data = br#"{"nodes": [{"id": "A", "text": null}], "edges": null}"#;

        let parsed = parse_canvas(data).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Strict);
        assert_eq!(parsed.canvas.nodes[0].text, "");
        assert_eq!(parsed.canvas.nodes[0].label, "");
        assert!(parsed.canvas.edges.is_empty());
    }

    #[test]
    fn trailing_data_is_rejected() {
        let err = parse_canvas(br#"{"nodes": []} {"edges": []}"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn keys_are_case_sensitive() {
        let parsed = parse_canvas(br#"{"nodes": [{"ID": "A", "Text": "Hi"}]}"#).unwrap();
        assert_eq!(parsed.strategy, ParseStrategy::Lenient);
        assert!(parsed.canvas.nodes[0].is_empty());
    }

    #[test]
    fn empty_document_decodes() {
        assert_eq!(parse_canvas(b"{}").unwrap().canvas, Canvas::default());
        assert_eq!(parse_canvas(b"null").unwrap().canvas, Canvas::default());
    }

    #[test]
    fn node_emptiness() {
        assert!(Node::default().is_empty());
        let typed = Node {
            node_type: "group".to_string(),
            ..Default::default()
        };
        assert!(!typed.is_empty());
    }
}
