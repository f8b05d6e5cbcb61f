use std::collections::HashSet;
use std::str::{self, FromStr};

use thiserror::Error;

use super::graph::{Edge, EdgeId, Node, NodeId};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("expected {expected} fields, found {found}")]
    FieldCount { expected: usize, found: usize },
    #[error("field `{field}` has unparsable value `{value}`")]
    InvalidField { field: &'static str, value: String },
    #[error("field `{field}` is not a finite number")]
    NonFinite { field: &'static str },
    #[error("edge weight must not be negative")]
    NegativeWeight,
    #[error("node id {0} was already declared")]
    DuplicateNode(NodeId),
    #[error("line is not valid UTF-8")]
    InvalidEncoding,
}

/// Where and why a file stopped being read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseStop {
    pub line: usize,
    pub error: RecordError,
}

#[derive(Clone, Debug)]
pub(super) struct ParsedRecords<T> {
    pub(super) records: Vec<T>,
    pub(super) stopped_at: Option<ParseStop>,
}

pub(super) fn parse_node_records(raw: &[u8]) -> ParsedRecords<Node> {
    let mut seen = HashSet::new();
    parse_records(raw, |line| {
        let node = parse_node_line(line)?;
        if !seen.insert(node.id) {
            return Err(RecordError::DuplicateNode(node.id));
        }
        Ok(node)
    })
}

pub(super) fn parse_edge_records(raw: &[u8]) -> ParsedRecords<Edge> {
    parse_records(raw, parse_edge_line)
}

/// Lines are decoded one at a time so a bad byte only ends the file at that line.
fn parse_records<T>(
    raw: &[u8],
    mut parse_line: impl FnMut(&str) -> Result<T, RecordError>,
) -> ParsedRecords<T> {
    let mut records = Vec::new();

    for (index, bytes) in raw.split(|byte| *byte == b'\n').enumerate() {
        let outcome = match str::from_utf8(bytes) {
            Ok(line) if line.trim().is_empty() => continue,
            Ok(line) => parse_line(line),
            Err(_) => Err(RecordError::InvalidEncoding),
        };

        match outcome {
            Ok(record) => records.push(record),
            Err(error) => {
                return ParsedRecords {
                    records,
                    stopped_at: Some(ParseStop {
                        line: index + 1,
                        error,
                    }),
                };
            }
        }
    }

    ParsedRecords {
        records,
        stopped_at: None,
    }
}

fn parse_node_line(line: &str) -> Result<Node, RecordError> {
    let mut fields = Fields::new(line, 3)?;
    let id = fields.next::<i64>("id")?;
    let latitude = fields.next_finite("latitude")?;
    let longitude = fields.next_finite("longitude")?;

    Ok(Node {
        id: NodeId(id),
        latitude,
        longitude,
        label: None,
    })
}

fn parse_edge_line(line: &str) -> Result<Edge, RecordError> {
    let mut fields = Fields::new(line, 4)?;
    let id = fields.next::<i64>("id")?;
    let node1 = fields.next::<i64>("node1")?;
    let node2 = fields.next::<i64>("node2")?;
    let weight = fields.next_finite("weight")?;
    if weight < 0.0 {
        return Err(RecordError::NegativeWeight);
    }

    Ok(Edge {
        id: EdgeId(id),
        node1: NodeId(node1),
        node2: NodeId(node2),
        weight,
    })
}

struct Fields<'a> {
    tokens: std::vec::IntoIter<&'a str>,
}

impl<'a> Fields<'a> {
    fn new(line: &'a str, expected: usize) -> Result<Self, RecordError> {
        let tokens = line.split_whitespace().collect::<Vec<_>>();
        if tokens.len() != expected {
            return Err(RecordError::FieldCount {
                expected,
                found: tokens.len(),
            });
        }

        Ok(Self {
            tokens: tokens.into_iter(),
        })
    }

    fn next<T: FromStr>(&mut self, field: &'static str) -> Result<T, RecordError> {
        let token = self.tokens.next().unwrap_or_default();
        token.parse::<T>().map_err(|_| RecordError::InvalidField {
            field,
            value: token.to_string(),
        })
    }

    fn next_finite(&mut self, field: &'static str) -> Result<f64, RecordError> {
        let value = self.next::<f64>(field)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(RecordError::NonFinite { field })
        }
    }
}
