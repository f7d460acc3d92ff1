//! OBJ file loader for analysis meshes

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

use crate::foundation::math::Vec3;
use super::mesh::MeshGeometry;

/// Mesh loading errors
#[derive(Error, Debug)]
pub enum MeshLoadError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A number or index could not be parsed
    #[error("Parse error on line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What failed
        message: String,
    },
    /// The file parsed but holds no usable geometry
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

/// Loads Wavefront OBJ files into [`MeshGeometry`]
pub struct ObjLoader;

impl ObjLoader {
    /// Load an OBJ file
    pub fn load_obj<P: AsRef<Path>>(path: P) -> Result<MeshGeometry, MeshLoadError> {
        let path = path.as_ref();
        let mesh = Self::parse(BufReader::new(File::open(path)?))?;
        log::info!(
            "Loaded {} ({} vertices, {} triangles)",
            path.display(),
            mesh.positions.len(),
            mesh.triangle_count()
        );
        Ok(mesh)
    }

    /// Parse OBJ text. Faces are fan-triangulated; every face corner becomes
    /// its own vertex.
    pub fn parse<R: BufRead>(reader: R) -> Result<MeshGeometry, MeshLoadError> {
        let mut file_positions: Vec<Vec3> = Vec::new();
        let mut file_normals: Vec<Vec3> = Vec::new();

        let mut positions = Vec::new();
        let mut normals = Vec::new();
        let mut indices = Vec::new();
        let mut all_corners_have_normals = true;

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            let number = number + 1;
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            match parts.next() {
                Some("v") => file_positions.push(parse_vec3(parts, number)?),
                Some("vn") => file_normals.push(parse_vec3(parts, number)?),
                Some("f") => {
                    let mut corners = Vec::new();
                    for vertex_data in parts {
                        let mut fields = vertex_data.split('/');
                        let position_index = fields
                            .next()
                            .ok_or_else(|| parse_error(number, "empty face corner"))
                            .and_then(|field| resolve_index(field, file_positions.len(), number))?;
                        let normal_index = match fields.nth(1) {
                            Some(field) if !field.is_empty() => Some(resolve_index(field, file_normals.len(), number)?),
                            _ => None,
                        };

                        positions.push(file_positions[position_index]);
                        match normal_index {
                            Some(index) => normals.push(file_normals[index]),
                            None => all_corners_have_normals = false,
                        }
                        corners.push((positions.len() - 1) as u32);
                    }

                    if corners.len() < 3 {
                        return Err(parse_error(number, "face needs at least three corners"));
                    }
                    for i in 1..corners.len() - 1 {
                        indices.extend_from_slice(&[corners[0], corners[i], corners[i + 1]]);
                    }
                }
                _ => {}
            }
        }

        if indices.is_empty() {
            return Err(MeshLoadError::InvalidFormat("No faces found in OBJ file".to_string()));
        }
        if !all_corners_have_normals {
            normals.clear();
        }
        Ok(MeshGeometry::new(positions, normals, indices))
    }
}

fn parse_error(line: usize, message: impl Into<String>) -> MeshLoadError {
    MeshLoadError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_vec3<'a>(mut parts: impl Iterator<Item = &'a str>, line: usize) -> Result<Vec3, MeshLoadError> {
    let mut component = |axis: &str| -> Result<f32, MeshLoadError> {
        parts
            .next()
            .ok_or_else(|| parse_error(line, format!("missing {axis} component")))?
            .parse()
            .map_err(|_| parse_error(line, format!("invalid {axis} component")))
    };
    Ok(Vec3::new(component("x")?, component("y")?, component("z")?))
}

/// OBJ indices are 1-based; negative indices count back from the end
fn resolve_index(field: &str, count: usize, line: usize) -> Result<usize, MeshLoadError> {
    let raw: i64 = field
        .parse()
        .map_err(|_| parse_error(line, format!("invalid index '{field}'")))?;
    let resolved = if raw > 0 { raw - 1 } else { count as i64 + raw };
    if raw == 0 || resolved < 0 || resolved >= count as i64 {
        return Err(parse_error(line, format!("index {raw} out of bounds")));
    }
    Ok(resolved as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quad_with_normals() {
        let text = "\
# ground
v 0 0 0
v 2 0 0
v 2 0 2
v 0 0 2
vn 0 1 0
f 1//1 2//1 3//1 4//1
";
        let mesh = ObjLoader::parse(text.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.normals.len(), mesh.positions.len());
        assert_eq!(mesh.bounds.max, Vec3::new(2.0, 0.0, 2.0));
    }

    #[test]
    fn test_negative_indices_and_missing_normals() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n";
        let mesh = ObjLoader::parse(text.as_bytes()).unwrap();
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.normals.is_empty());
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        let text = "v 0 0 0\nv 1 0 0\nf 1 2 7\n";
        match ObjLoader::parse(text.as_bytes()) {
            Err(MeshLoadError::Parse { line: 3, .. }) => {}
            other => panic!("expected parse error on line 3, got {other:?}"),
        }
        assert!(matches!(
            ObjLoader::parse("v 0 0 0\n".as_bytes()),
            Err(MeshLoadError::InvalidFormat(_))
        ));
    }
}
