//! OBJ parsing
//!
//! Only the subset written by the Autodesk ATF exporter is understood:
//! `v`, `vn` and triangular `f` records. Faces either carry no normals
//! (`f 1 2 3`) or carry one per corner (`f 1/1/1 2/2/1 3/3/1`, texcoord
//! ignored, may be empty as in `1//1`).

use glam::Vec3;

use crate::accumulator::{ShadingPolicy, VertexSlot};
use crate::error::{IndexKind, ObjError, ObjResult};
use crate::math::parse_vec3;

/// Required first line of every input file
pub const OBJ_HEADER: &str = "# WaveFront *.obj file (generated by Autodesk ATF)";

/// Corners read per face
pub const FACE_CORNERS: usize = 3;

/// A triangle. Indices are 1-based, as written in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub positions: [u32; FACE_CORNERS],
    pub normals: Option<[u32; FACE_CORNERS]>,
}

/// Everything read from one OBJ file
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<VertexSlot>,
    pub normals: Vec<Vec3>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }
}

/// Parse OBJ text into a mesh, resolving face normals into their vertices
/// with `policy` as faces are read.
pub fn parse_obj(text: &str, policy: ShadingPolicy) -> ObjResult<Mesh> {
    let text = text.trim();
    if text.is_empty() {
        return Err(ObjError::EmptyFile);
    }

    let (header, body) = text.split_once('\n').unwrap_or((text, ""));
    if header.trim() != OBJ_HEADER {
        return Err(ObjError::HeaderMismatch {
            expected: OBJ_HEADER,
            found: header.trim().to_string(),
        });
    }
    if body.trim().is_empty() {
        return Err(ObjError::EmptyContent);
    }

    let mut mesh = Mesh::default();

    // Header is line 1
    for (line_no, line) in (2..).zip(body.lines()) {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&record, args)) = parts.split_first() else {
            continue;
        };

        match record {
            "v" => {
                let position = parse_vec3(args, line_no)?;
                mesh.vertices.push(VertexSlot::Position(position));
            }
            "vn" => mesh.normals.push(parse_vec3(args, line_no)?),
            "f" => {
                let face = parse_face(args, line_no)?;
                apply_face(&mut mesh, &face, policy, line_no)?;
                mesh.faces.push(face);
            }
            _ => {}
        }
    }

    if mesh.vertices.is_empty() || mesh.faces.is_empty() {
        return Err(ObjError::NoParseableData {
            vertices: mesh.vertices.len(),
            faces: mesh.faces.len(),
        });
    }

    tracing::debug!(
        "Parsed OBJ: {} vertices, {} normals, {} faces",
        mesh.vertices.len(),
        mesh.normals.len(),
        mesh.faces.len()
    );

    Ok(mesh)
}

/// Range-check a face against what has been declared so far and feed its
/// normals into the referenced vertices.
fn apply_face(mesh: &mut Mesh, face: &Face, policy: ShadingPolicy, line: usize) -> ObjResult<()> {
    let mut slots = [0usize; FACE_CORNERS];
    for (slot, &index) in slots.iter_mut().zip(&face.positions) {
        *slot = resolve_index(IndexKind::Position, index, mesh.vertices.len(), line)?;
    }

    let Some(normals) = face.normals else {
        return Ok(());
    };

    for (&slot, &index) in slots.iter().zip(&normals) {
        let normal = mesh.normals[resolve_index(IndexKind::Normal, index, mesh.normals.len(), line)?];
        mesh.vertices[slot].accumulate(normal, policy);
    }

    Ok(())
}

/// 1-based file index to 0-based slot
fn resolve_index(kind: IndexKind, index: u32, len: usize, line: usize) -> ObjResult<usize> {
    match (index as usize).checked_sub(1) {
        Some(slot) if slot < len => Ok(slot),
        _ => Err(ObjError::IndexOutOfRange {
            kind,
            index,
            len,
            line,
        }),
    }
}

/// Parse the corners of an `f` record. The form of the first corner decides
/// whether the face carries normals.
fn parse_face(corners: &[&str], line: usize) -> ObjResult<Face> {
    if corners.len() < FACE_CORNERS {
        return Err(ObjError::malformed_face(
            line,
            format!("expected {} corners, found {}", FACE_CORNERS, corners.len()),
        ));
    }
    if corners.len() > FACE_CORNERS {
        tracing::warn!(
            "line {}: face has {} corners, only the first {} are used",
            line,
            corners.len(),
            FACE_CORNERS
        );
    }

    let with_normals = corners[0].contains('/');
    let mut positions = [0u32; FACE_CORNERS];
    let mut normals = [0u32; FACE_CORNERS];

    for (i, corner) in corners[..FACE_CORNERS].iter().enumerate() {
        let fields: Vec<&str> = corner.split('/').collect();
        match (with_normals, fields.as_slice()) {
            (false, [v]) => {
                positions[i] = parse_index(v, line)?;
            }
            (true, [v, _texcoord, n]) => {
                positions[i] = parse_index(v, line)?;
                normals[i] = parse_index(n, line)?;
            }
            (false, _) | (true, [_]) => {
                return Err(ObjError::malformed_face(
                    line,
                    format!("corner {:?} mixes index forms", corner),
                ));
            }
            (true, _) => {
                return Err(ObjError::malformed_face(
                    line,
                    format!("corner {:?} is not v/vt/vn", corner),
                ));
            }
        }
    }

    Ok(Face {
        positions,
        normals: with_normals.then_some(normals),
    })
}

fn parse_index(token: &str, line: usize) -> ObjResult<u32> {
    token.parse().map_err(|_| ObjError::NumericParseFailure {
        token: token.to_string(),
        line,
    })
}
