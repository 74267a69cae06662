//! Mesh file loaders (ASCII PLY and OBJ)

use super::mesh::TriangleMesh;
use crate::foundation::math::Vec3;
use std::path::Path;
use thiserror::Error;

/// Mesh loading errors
///
/// A missing file and a file that exists but cannot be understood are kept
/// apart so startup can report which one happened.
#[derive(Error, Debug)]
pub enum AssetError {
    /// The file does not exist
    #[error("Asset missing: {0}")]
    Missing(String),

    /// The file exists but could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The file was read but its contents are malformed
    #[error("Corrupt asset: {0}")]
    Corrupt(String),

    /// The extension or encoding is not one we parse
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Load a mesh from disk, choosing the parser by file extension
pub fn load_mesh<P: AsRef<Path>>(path: P) -> Result<TriangleMesh, AssetError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AssetError::Missing(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> Result<TriangleMesh, AssetError> = match extension.as_deref() {
        Some("ply") => parse_ply,
        Some("obj") => parse_obj,
        _ => return Err(AssetError::UnsupportedFormat(path.display().to_string())),
    };

    let contents = std::fs::read_to_string(path)?;
    let mesh = parse(&contents).map_err(|err| match err {
        AssetError::Corrupt(reason) => {
            AssetError::Corrupt(format!("{}: {reason}", path.display()))
        }
        other => other,
    })?;

    log::info!(
        "Loaded mesh {} ({} vertices, {} triangles)",
        path.display(),
        mesh.positions().len(),
        mesh.triangles().len()
    );
    Ok(mesh)
}

fn corrupt(line: usize, what: &str) -> AssetError {
    AssetError::Corrupt(format!("line {line}: {what}"))
}

fn parse_f32(token: Option<&str>, line: usize, what: &str) -> Result<f32, AssetError> {
    token
        .and_then(|t| t.parse::<f32>().ok())
        .filter(|v| v.is_finite())
        .ok_or_else(|| corrupt(line, what))
}

/// Fan-triangulate a polygon and append it to `triangles`
fn push_polygon(
    polygon: &[u32],
    vertex_count: usize,
    triangles: &mut Vec<[u32; 3]>,
    line: usize,
) -> Result<(), AssetError> {
    if polygon.len() < 3 {
        return Err(corrupt(line, "face with fewer than 3 vertices"));
    }
    if polygon.iter().any(|&i| i as usize >= vertex_count) {
        return Err(corrupt(line, "face index out of bounds"));
    }
    for i in 1..polygon.len() - 1 {
        triangles.push([polygon[0], polygon[i], polygon[i + 1]]);
    }
    Ok(())
}

/// Parse an ASCII PLY document
///
/// Reads the `vertex` and `face` elements; the `x`, `y`, `z` properties are
/// located by name so extra per-vertex properties (normals, colors) are
/// skipped. Other elements are skipped line by line.
pub fn parse_ply(contents: &str) -> Result<TriangleMesh, AssetError> {
    struct Element {
        name: String,
        count: usize,
        properties: Vec<String>,
    }

    let mut lines = contents.lines().enumerate().map(|(i, l)| (i + 1, l.trim()));

    match lines.next() {
        Some((_, "ply")) => {}
        _ => return Err(corrupt(1, "missing 'ply' magic")),
    }

    let mut elements: Vec<Element> = Vec::new();
    let mut saw_end = false;
    for (number, line) in lines.by_ref() {
        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("format") => match parts.next() {
                Some("ascii") => {}
                Some(other) => {
                    return Err(AssetError::UnsupportedFormat(format!("PLY {other}")));
                }
                None => return Err(corrupt(number, "format line without encoding")),
            },
            Some("element") => {
                let name = parts
                    .next()
                    .ok_or_else(|| corrupt(number, "element without name"))?;
                let count = parts
                    .next()
                    .and_then(|c| c.parse::<usize>().ok())
                    .ok_or_else(|| corrupt(number, "element without count"))?;
                elements.push(Element {
                    name: name.to_string(),
                    count,
                    properties: Vec::new(),
                });
            }
            Some("property") => {
                let element = elements
                    .last_mut()
                    .ok_or_else(|| corrupt(number, "property before element"))?;
                let name = parts
                    .last()
                    .ok_or_else(|| corrupt(number, "property without name"))?;
                element.properties.push(name.to_string());
            }
            Some("end_header") => {
                saw_end = true;
                break;
            }
            // comment, obj_info and blank lines
            _ => {}
        }
    }
    if !saw_end {
        return Err(corrupt(0, "missing end_header"));
    }

    let mut positions = Vec::new();
    let mut triangles = Vec::new();

    for element in &elements {
        match element.name.as_str() {
            "vertex" => {
                let axis = |name: &str| element.properties.iter().position(|p| p == name);
                let (x, y, z) = match (axis("x"), axis("y"), axis("z")) {
                    (Some(x), Some(y), Some(z)) => (x, y, z),
                    _ => return Err(corrupt(0, "vertex element lacks x/y/z")),
                };
                positions.reserve(element.count);
                for _ in 0..element.count {
                    let (number, line) = lines
                        .next()
                        .ok_or_else(|| corrupt(0, "unexpected end of vertex data"))?;
                    let values: Vec<&str> = line.split_whitespace().collect();
                    positions.push(Vec3::new(
                        parse_f32(values.get(x).copied(), number, "invalid vertex x")?,
                        parse_f32(values.get(y).copied(), number, "invalid vertex y")?,
                        parse_f32(values.get(z).copied(), number, "invalid vertex z")?,
                    ));
                }
            }
            "face" => {
                for _ in 0..element.count {
                    let (number, line) = lines
                        .next()
                        .ok_or_else(|| corrupt(0, "unexpected end of face data"))?;
                    let values = line
                        .split_whitespace()
                        .map(|v| v.parse::<u32>())
                        .collect::<Result<Vec<_>, _>>()
                        .map_err(|_| corrupt(number, "invalid face index"))?;
                    let (&count, indices) = values
                        .split_first()
                        .ok_or_else(|| corrupt(number, "empty face"))?;
                    if indices.len() != count as usize {
                        return Err(corrupt(number, "face length mismatch"));
                    }
                    push_polygon(indices, positions.len(), &mut triangles, number)?;
                }
            }
            _ => {
                for _ in 0..element.count {
                    lines
                        .next()
                        .ok_or_else(|| corrupt(0, "unexpected end of element data"))?;
                }
            }
        }
    }

    if positions.is_empty() {
        return Err(AssetError::Corrupt("no vertices found".to_string()));
    }

    Ok(TriangleMesh::new(positions, triangles))
}

/// Parse a Wavefront OBJ document
///
/// Only positions and faces are read. Face entries may use the `v/vt/vn`
/// forms and negative (relative) indices; polygons are fan-triangulated.
pub fn parse_obj(contents: &str) -> Result<TriangleMesh, AssetError> {
    let mut positions = Vec::new();
    let mut triangles = Vec::new();

    for (index, line) in contents.lines().enumerate() {
        let number = index + 1;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut parts = line.split_whitespace();
        match parts.next() {
            Some("v") => {
                positions.push(Vec3::new(
                    parse_f32(parts.next(), number, "invalid vertex x")?,
                    parse_f32(parts.next(), number, "invalid vertex y")?,
                    parse_f32(parts.next(), number, "invalid vertex z")?,
                ));
            }
            Some("f") => {
                let mut polygon = Vec::new();
                for vertex in parts {
                    let position = vertex.split('/').next().unwrap_or_default();
                    let raw: i64 = position
                        .parse()
                        .map_err(|_| corrupt(number, "invalid position index"))?;
                    // OBJ indices are 1-based; negatives count back from the end
                    let resolved = match raw {
                        0 => return Err(corrupt(number, "zero position index")),
                        i if i > 0 => i - 1,
                        i => positions.len() as i64 + i,
                    };
                    let resolved = u32::try_from(resolved)
                        .map_err(|_| corrupt(number, "position index out of bounds"))?;
                    polygon.push(resolved);
                }
                push_polygon(&polygon, positions.len(), &mut triangles, number)?;
            }
            // normals, texture coordinates, groups and materials
            _ => {}
        }
    }

    if positions.is_empty() {
        return Err(AssetError::Corrupt("no vertices found".to_string()));
    }

    Ok(TriangleMesh::new(positions, triangles))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Mesh;
    use approx::assert_relative_eq;

    const TRIANGLE_PLY: &str = "ply
format ascii 1.0
comment single triangle
element vertex 3
property float x
property float y
property float z
property float nx
element face 1
property list uchar int vertex_indices
end_header
-1 0 0 0
1 0 0 0
0 1 0 0
3 0 1 2
";

    #[test]
    fn test_parse_ply_triangle() {
        let mesh = parse_ply(TRIANGLE_PLY).unwrap();
        assert_eq!(mesh.vertex_count(), 3);
        assert_eq!(mesh.triangles(), &[[0, 1, 2]]);
        assert_relative_eq!(mesh.positions()[2], Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_parse_ply_quad_is_triangulated() {
        let ply = "ply\nformat ascii 1.0\nelement vertex 4\nproperty float x\nproperty float y\n\
property float z\nelement face 1\nproperty list uchar int vertex_indices\nend_header\n\
0 0 0\n1 0 0\n1 1 0\n0 1 0\n4 0 1 2 3\n";
        let mesh = parse_ply(ply).unwrap();
        assert_eq!(mesh.triangles(), &[[0, 1, 2], [0, 2, 3]]);
    }

    #[test]
    fn test_parse_ply_rejects_binary() {
        let ply = "ply\nformat binary_little_endian 1.0\nend_header\n";
        assert!(matches!(parse_ply(ply), Err(AssetError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_parse_ply_truncated_is_corrupt() {
        let truncated = TRIANGLE_PLY.replace("0 1 0 0\n3 0 1 2\n", "");
        assert!(matches!(parse_ply(&truncated), Err(AssetError::Corrupt(_))));
    }

    #[test]
    fn test_parse_ply_bad_index_is_corrupt() {
        let bad = TRIANGLE_PLY.replace("3 0 1 2", "3 0 1 7");
        assert!(matches!(parse_ply(&bad), Err(AssetError::Corrupt(_))));
    }

    #[test]
    fn test_parse_obj() {
        let obj = "# comment\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//1 4//1\nf -4 -3 -2\n";
        let mesh = parse_obj(obj).unwrap();
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangles(), &[[0, 1, 2], [0, 2, 3], [0, 1, 2]]);
    }

    #[test]
    fn test_parse_obj_rejects_garbage() {
        assert!(matches!(parse_obj("v 1 two 3\n"), Err(AssetError::Corrupt(_))));
        assert!(matches!(parse_obj("# nothing\n"), Err(AssetError::Corrupt(_))));
        assert!(matches!(parse_obj("v 0 0 0\nf 1 2 3\n"), Err(AssetError::Corrupt(_))));
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_mesh("definitely/not/here.ply");
        assert!(matches!(result, Err(AssetError::Missing(_))));
    }

    #[test]
    fn test_load_from_disk_and_unsupported_extension() {
        let dir = std::env::temp_dir().join(format!("scene_viewer_mesh_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let ply_path = dir.join("triangle.ply");
        std::fs::write(&ply_path, TRIANGLE_PLY).unwrap();
        let mesh = load_mesh(&ply_path).unwrap();
        assert_eq!(mesh.vertex_count(), 3);

        let stl_path = dir.join("triangle.stl");
        std::fs::write(&stl_path, "solid").unwrap();
        assert!(matches!(load_mesh(&stl_path), Err(AssetError::UnsupportedFormat(_))));

        let corrupt_path = dir.join("broken.obj");
        std::fs::write(&corrupt_path, "v 1 2\n").unwrap();
        match load_mesh(&corrupt_path) {
            Err(AssetError::Corrupt(reason)) => assert!(reason.contains("broken.obj")),
            other => panic!("expected corrupt error, got {other:?}"),
        }

        std::fs::remove_dir_all(&dir).ok();
    }
}
