//! Vertex list import.
//!
//! Accepts plain text with one `x,y,z` vertex per line. Blank lines and lines
//! starting with `#` are skipped, and a non-numeric first line is treated as a
//! header.

use std::fs;
use std::path::Path;

use log::debug;

use crate::error::{Result, RippleError};

/// Load rest positions from a vertex list file
pub fn load_vertex_list(path: &Path) -> Result<Vec<[f32; 3]>> {
    let text = fs::read_to_string(path)?;
    let vertices = parse_vertex_list(&text)?;
    debug!("Imported {} vertices from {}", vertices.len(), path.display());
    Ok(vertices)
}

/// Parse `x,y,z` lines into rest positions
pub fn parse_vertex_list(text: &str) -> Result<Vec<[f32; 3]>> {
    let mut vertices = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_vertex(line) {
            Ok(vertex) => vertices.push(vertex),
            Err(_) if line_no == 1 && !starts_numeric(line) => continue, // header
            Err(message) => {
                return Err(RippleError::Import {
                    line: line_no,
                    message,
                })
            }
        }
    }

    Ok(vertices)
}

fn parse_vertex(line: &str) -> std::result::Result<[f32; 3], String> {
    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    if fields.len() != 3 {
        return Err(format!("expected 3 fields, got {}", fields.len()));
    }

    let mut vertex = [0.0_f32; 3];
    for (slot, field) in vertex.iter_mut().zip(&fields) {
        let value: f32 = field
            .parse()
            .map_err(|_| format!("'{}' is not a number", field))?;
        if !value.is_finite() {
            return Err(format!("'{}' is not finite", field));
        }
        *slot = value;
    }
    Ok(vertex)
}

fn starts_numeric(line: &str) -> bool {
    line.chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
}
