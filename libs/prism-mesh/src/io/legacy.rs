//! # Legacy Text Format
//!
//! Whitespace-delimited interchange of an [`IndexedMesh`]:
//!
//! ```text
//! <vertex count>
//! <id> <x> <y> <z>          one line per vertex
//! <edge count>
//! <id> <a> <b>              one line per edge
//! <quad count>
//! <id> <v0> <v1> <v2> <v3>  one line per quad
//! ```
//!
//! Ids and vertex references are 1-based on disk and 0-based in memory.
//! Triangles have no section and are not written. Blank lines are ignored.
//!
//! # Example
//!
//! ```rust
//! use prism_mesh::indexed::IndexedMesh;
//! use prism_mesh::io::{read_legacy, write_legacy};
//! use glam::DVec3;
//!
//! let mesh = IndexedMesh::from_parts(
//!     vec![DVec3::ZERO, DVec3::X, DVec3::new(1.0, 1.0, 0.0), DVec3::Y],
//!     vec![[0, 1], [1, 2], [2, 3], [0, 3]],
//!     vec![[0, 1, 2, 3]],
//!     vec![],
//! );
//! let mut buffer = Vec::new();
//! write_legacy(&mesh, &mut buffer).unwrap();
//! let back = read_legacy(buffer.as_slice()).unwrap();
//! assert_eq!(back, mesh);
//! ```

use crate::error::{MeshError, MeshResult};
use crate::indexed::IndexedMesh;
use glam::DVec3;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing::debug;

// =============================================================================
// WRITING
// =============================================================================

/// Writes the vertices, edges and quads of `mesh`.
///
/// # Errors
///
/// Propagates I/O failures of `writer`.
pub fn write_legacy<W: Write>(mesh: &IndexedMesh, mut writer: W) -> MeshResult<()> {
    writeln!(writer, "{}", mesh.vertices().len())?;
    for (i, v) in mesh.vertices().iter().enumerate() {
        writeln!(writer, "{} {} {} {}", i + 1, v.x, v.y, v.z)?;
    }

    writeln!(writer, "{}", mesh.edges().len())?;
    for (i, [a, b]) in mesh.edges().iter().enumerate() {
        writeln!(writer, "{} {} {}", i + 1, a + 1, b + 1)?;
    }

    writeln!(writer, "{}", mesh.quads().len())?;
    for (i, q) in mesh.quads().iter().enumerate() {
        writeln!(
            writer,
            "{} {} {} {} {}",
            i + 1,
            q[0] + 1,
            q[1] + 1,
            q[2] + 1,
            q[3] + 1
        )?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes `mesh` to a file at `path`.
pub fn save_legacy<P: AsRef<Path>>(mesh: &IndexedMesh, path: P) -> MeshResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_legacy(mesh, BufWriter::new(file))?;
    debug!(
        path = %path.display(),
        vertices = mesh.vertex_count(),
        quads = mesh.quads().len(),
        "saved legacy mesh"
    );
    Ok(())
}

// =============================================================================
// READING
// =============================================================================

/// Reads a mesh; the result has no triangles.
///
/// # Errors
///
/// `Parse` with the 1-based line number on malformed input, `Io` when the
/// reader fails.
pub fn read_legacy<R: BufRead>(reader: R) -> MeshResult<IndexedMesh> {
    let mut lines = Lines::new(reader);

    // Counts come from the input, so nothing is preallocated from them.
    let vertex_count = lines.count("vertex")?;
    let mut vertices = Vec::new();
    for expected in 1..=vertex_count {
        let (line, fields) = lines.record("vertex", expected, 3)?;
        let coords = parse_fields::<f64>(line, &fields)?;
        vertices.push(DVec3::new(coords[0], coords[1], coords[2]));
    }

    let edge_count = lines.count("edge")?;
    let mut edges = Vec::new();
    for expected in 1..=edge_count {
        let (line, fields) = lines.record("edge", expected, 2)?;
        let [a, b] = vertex_refs::<2>(line, &fields, vertex_count)?;
        edges.push([a, b]);
    }

    let quad_count = lines.count("quad")?;
    let mut quads = Vec::new();
    for expected in 1..=quad_count {
        let (line, fields) = lines.record("quad", expected, 4)?;
        quads.push(vertex_refs::<4>(line, &fields, vertex_count)?);
    }

    Ok(IndexedMesh::from_parts(vertices, edges, quads, Vec::new()))
}

/// Reads a mesh from a file at `path`.
pub fn load_legacy<P: AsRef<Path>>(path: P) -> MeshResult<IndexedMesh> {
    let file = File::open(path.as_ref())?;
    read_legacy(BufReader::new(file))
}

/// Line cursor that skips blank lines and tracks 1-based line numbers.
struct Lines<R> {
    inner: std::io::Lines<R>,
    line: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(reader: R) -> Self {
        Self {
            inner: reader.lines(),
            line: 0,
        }
    }

    /// Next non-blank line as whitespace-separated fields.
    fn next_fields(&mut self, what: &str) -> MeshResult<(usize, Vec<String>)> {
        loop {
            self.line += 1;
            let Some(text) = self.inner.next().transpose()? else {
                return Err(MeshError::parse(
                    self.line,
                    format!("unexpected end of input, expected {what}"),
                ));
            };
            let fields: Vec<String> = text.split_whitespace().map(str::to_owned).collect();
            if !fields.is_empty() {
                return Ok((self.line, fields));
            }
        }
    }

    /// A section header holding a single count.
    fn count(&mut self, section: &str) -> MeshResult<usize> {
        let (line, fields) = self.next_fields(&format!("{section} count"))?;
        match fields.as_slice() {
            [count] => count
                .parse()
                .map_err(|_| MeshError::parse(line, format!("invalid {section} count `{count}`"))),
            _ => Err(MeshError::parse(line, format!("expected a single {section} count"))),
        }
    }

    /// A record line: its id must equal `expected`, followed by `arity` values.
    fn record(
        &mut self,
        kind: &str,
        expected: usize,
        arity: usize,
    ) -> MeshResult<(usize, Vec<String>)> {
        let (line, mut fields) = self.next_fields(kind)?;
        if fields.len() != arity + 1 {
            return Err(MeshError::parse(
                line,
                format!("{kind} record needs {} fields, found {}", arity + 1, fields.len()),
            ));
        }
        let id = &fields[0];
        if id.parse::<usize>().ok() != Some(expected) {
            return Err(MeshError::parse(
                line,
                format!("expected {kind} id {expected}, found `{id}`"),
            ));
        }
        fields.remove(0);
        Ok((line, fields))
    }
}

fn parse_fields<T: std::str::FromStr>(line: usize, fields: &[String]) -> MeshResult<Vec<T>> {
    fields
        .iter()
        .map(|f| {
            f.parse()
                .map_err(|_| MeshError::parse(line, format!("invalid number `{f}`")))
        })
        .collect()
}

/// Converts 1-based vertex references to 0-based indices.
fn vertex_refs<const N: usize>(
    line: usize,
    fields: &[String],
    vertex_count: usize,
) -> MeshResult<[u32; N]> {
    let values = parse_fields::<usize>(line, fields)?;
    let mut refs = [0u32; N];
    for (slot, &value) in refs.iter_mut().zip(&values) {
        if value == 0 || value > vertex_count {
            return Err(MeshError::parse(
                line,
                format!("vertex reference {value} outside 1..={vertex_count}"),
            ));
        }
        *slot = (value - 1) as u32;
    }
    Ok(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IndexedMesh {
        IndexedMesh::from_parts(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.5, 0.0, -2.0),
                DVec3::new(1.5, 0.1, 0.3),
                DVec3::new(0.0, 1.0 / 3.0, 1e-9),
            ],
            vec![[0, 1], [1, 2], [2, 3], [0, 3]],
            vec![[0, 1, 2, 3]],
            vec![[0, 1, 2]],
        )
    }

    fn read_str(text: &str) -> MeshResult<IndexedMesh> {
        read_legacy(text.as_bytes())
    }

    #[test]
    fn test_written_layout_is_one_based() {
        let mut buffer = Vec::new();
        write_legacy(&sample(), &mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "4");
        assert_eq!(lines[1], "1 0 0 0");
        assert_eq!(lines[5], "4");
        assert_eq!(lines[6], "1 1 2");
        assert_eq!(lines[10], "1");
        assert_eq!(lines[11], "1 1 2 3 4");
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_round_trip_drops_triangles_only() {
        let mesh = sample();
        let mut buffer = Vec::new();
        write_legacy(&mesh, &mut buffer).unwrap();
        let back = read_legacy(buffer.as_slice()).unwrap();
        assert_eq!(back.vertices(), mesh.vertices());
        assert_eq!(back.edges(), mesh.edges());
        assert_eq!(back.quads(), mesh.quads());
        assert!(back.triangles().is_empty());
    }

    #[test]
    fn test_blank_lines_skipped() {
        let mesh = read_str("\n1\n1 0 0 0\n\n0\n0\n").unwrap();
        assert_eq!(mesh.vertex_count(), 1);
    }

    #[test]
    fn test_bad_number_reports_line() {
        let err = read_str("2\n1 0 0 0\n2 0 x 0\n0\n0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 3, .. }), "{err}");
    }

    #[test]
    fn test_reference_out_of_range() {
        let err = read_str("1\n1 0 0 0\n1\n1 1 2\n0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 4, .. }), "{err}");
    }

    #[test]
    fn test_zero_reference_rejected() {
        let err = read_str("2\n1 0 0 0\n2 1 1 1\n1\n1 0 1\n0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 5, .. }));
    }

    #[test]
    fn test_wrong_id_rejected() {
        let err = read_str("1\n7 0 0 0\n0\n0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_truncated_input() {
        let err = read_str("2\n1 0 0 0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 3, .. }));
    }

    #[test]
    fn test_huge_counts_are_parse_errors() {
        let err = read_str(&format!("{}\n", usize::MAX)).unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));

        let err = read_str(&format!("0\n{}\n", usize::MAX)).unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 3, .. }));

        let err = read_str("99999999999999999999999\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_wrong_arity() {
        let err = read_str("1\n1 0 0\n0\n0\n").unwrap_err();
        assert!(matches!(err, MeshError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_legacy("/nonexistent/dir/mesh.txt").unwrap_err();
        assert!(matches!(err, MeshError::Io(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("prism-mesh-legacy-{}.txt", std::process::id()));
        save_legacy(&sample(), &path).unwrap();
        let back = load_legacy(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(back.quads(), sample().quads());
    }
}
