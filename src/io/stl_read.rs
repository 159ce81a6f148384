//! ASCII STL reader.
//!
//! Strict parser for the grammar written by `stl_ascii`: one keyword group
//! per line, keywords in order. Surrounding whitespace on a line is ignored.
//! Stored normals are kept as read, not recomputed.

use std::fs;
use std::path::Path;

use crate::error::{HeightmapError, HeightmapResult};
use crate::geometry::{Facet, Vertex};

/// A parsed ASCII STL solid.
#[derive(Debug, Clone, Default)]
pub struct StlSolid {
    pub name: String,
    pub facets: Vec<Facet>,
}

struct LineCursor<'a> {
    lines: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> LineCursor<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate(),
            last: 0,
        }
    }

    /// Next non-empty trimmed line with its 1-based number.
    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        for (idx, raw) in self.lines.by_ref() {
            self.last = idx + 1;
            let line = raw.trim();
            if !line.is_empty() {
                return Some((idx + 1, line));
            }
        }
        None
    }

    fn expect_line(&mut self, what: &str) -> HeightmapResult<(usize, &'a str)> {
        self.next_line().ok_or_else(|| {
            HeightmapError::stl_parse(self.last + 1, format!("unexpected end of input, expected {what}"))
        })
    }

    fn expect_exact(&mut self, keyword: &str) -> HeightmapResult<()> {
        let (line_no, line) = self.expect_line(keyword)?;
        if line != keyword {
            return Err(HeightmapError::stl_parse(
                line_no,
                format!("expected '{keyword}', found '{line}'"),
            ));
        }
        Ok(())
    }
}

fn parse_triple(line_no: usize, rest: &str) -> HeightmapResult<Vertex> {
    let mut out = [0.0f64; 3];
    let mut tokens = rest.split_whitespace();
    for slot in out.iter_mut() {
        let tok = tokens
            .next()
            .ok_or_else(|| HeightmapError::stl_parse(line_no, "expected three numbers"))?;
        *slot = tok
            .parse::<f64>()
            .map_err(|_| HeightmapError::stl_parse(line_no, format!("invalid number '{tok}'")))?;
    }
    if let Some(extra) = tokens.next() {
        return Err(HeightmapError::stl_parse(
            line_no,
            format!("unexpected trailing token '{extra}'"),
        ));
    }
    Ok(Vertex::from_array(out))
}

fn parse_vertex_line(cursor: &mut LineCursor<'_>) -> HeightmapResult<Vertex> {
    let (line_no, line) = cursor.expect_line("vertex")?;
    let rest = line
        .strip_prefix("vertex ")
        .ok_or_else(|| HeightmapError::stl_parse(line_no, format!("expected 'vertex', found '{line}'")))?;
    parse_triple(line_no, rest)
}

/// Parse ASCII STL text into a solid.
pub fn read_ascii_stl(text: &str) -> HeightmapResult<StlSolid> {
    let mut cursor = LineCursor::new(text);

    let (line_no, header) = cursor.expect_line("solid header")?;
    let name = match header.strip_prefix("solid") {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => {
            return Err(HeightmapError::stl_parse(
                line_no,
                format!("expected 'solid', found '{header}'"),
            ))
        }
    };

    let mut facets = Vec::new();
    loop {
        let (line_no, line) = cursor.expect_line("'facet' or 'endsolid'")?;
        if let Some(rest) = line.strip_prefix("endsolid") {
            let end_name = rest.trim();
            if !end_name.is_empty() && end_name != name {
                return Err(HeightmapError::stl_parse(
                    line_no,
                    format!("endsolid name '{end_name}' does not match solid '{name}'"),
                ));
            }
            break;
        }
        let normal_text = line.strip_prefix("facet normal ").ok_or_else(|| {
            HeightmapError::stl_parse(line_no, format!("expected 'facet normal', found '{line}'"))
        })?;
        let normal = parse_triple(line_no, normal_text)?;

        cursor.expect_exact("outer loop")?;
        let a = parse_vertex_line(&mut cursor)?;
        let b = parse_vertex_line(&mut cursor)?;
        let c = parse_vertex_line(&mut cursor)?;
        cursor.expect_exact("endloop")?;
        cursor.expect_exact("endfacet")?;

        facets.push(Facet {
            normal,
            vertices: [a, b, c],
        });
    }

    if let Some((line_no, line)) = cursor.next_line() {
        return Err(HeightmapError::stl_parse(
            line_no,
            format!("unexpected content after endsolid: '{line}'"),
        ));
    }

    Ok(StlSolid {
        name: name.to_string(),
        facets,
    })
}

/// Read and parse an ASCII STL file.
pub fn import_ascii_stl<P: AsRef<Path>>(path: P) -> HeightmapResult<StlSolid> {
    let text = fs::read_to_string(path.as_ref())?;
    read_ascii_stl(&text)
}
