//! Reading instances from `x;y;cost` text rows.

use std::io::BufRead;

use super::types::{Instance, Node};

/// Errors raised while reading an instance.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: cannot parse '{field}' as an integer")]
    Parse { line: usize, field: String },

    #[error("line {line}: expected 3 fields (x;y;cost), found {found}")]
    Arity { line: usize, found: usize },

    #[error("instance has no nodes")]
    Empty,
}

impl Instance {
    /// Parses one node per non-blank line, fields separated by `;`.
    ///
    /// Line numbers in errors are 1-based.
    pub fn parse(text: &str) -> Result<Self, InstanceError> {
        Self::from_reader(text.as_bytes())
    }

    /// Reads and parses an instance from any buffered reader.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, InstanceError> {
        let mut nodes = Vec::new();
        for (idx, line) in reader.lines().enumerate() {
            if let Some(node) = parse_line(idx + 1, &line?)? {
                nodes.push(node);
            }
        }
        if nodes.is_empty() {
            return Err(InstanceError::Empty);
        }
        Ok(Self::new(nodes))
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<Option<Node>, InstanceError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let fields: Vec<&str> = line.split(';').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(InstanceError::Arity {
            line: line_no,
            found: fields.len(),
        });
    }
    let mut values = [0i64; 3];
    for (slot, field) in values.iter_mut().zip(&fields) {
        *slot = field.parse().map_err(|_| InstanceError::Parse {
            line: line_no,
            field: (*field).to_string(),
        })?;
    }
    Ok(Some(Node::new(values[0], values[1], values[2])))
}
