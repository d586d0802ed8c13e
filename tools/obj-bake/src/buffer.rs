//! Interleaved vertex buffer and element list assembly

use crate::error::{ObjError, ObjResult};
use crate::obj::{Mesh, FACE_CORNERS};

/// GPU-ready data for one mesh
#[derive(Debug, Clone, PartialEq)]
pub struct VertexBuffer {
    /// Scalars of every vertex, `stride` per vertex
    pub data: Vec<f32>,
    /// Scalars per vertex: 3, 4 (simple shading) or 6 (averaged normals)
    pub stride: usize,
    /// 1-based position indices, three per face
    pub indices: Vec<u32>,
}

impl VertexBuffer {
    /// Resolve every vertex of `mesh` into a flat buffer.
    ///
    /// The stride is taken from the first vertex. Any vertex with a different
    /// width (e.g. never referenced by a face with normals while others were)
    /// is rejected rather than producing a misaligned buffer.
    pub fn from_mesh(mesh: &Mesh) -> ObjResult<Self> {
        let stride = mesh.vertices.first().map_or(0, |v| v.width());

        let mut data = Vec::with_capacity(mesh.vertex_count() * stride);
        for (vertex, slot) in mesh.vertices.iter().enumerate() {
            let attributes = slot.attributes();
            if attributes.len() != stride {
                return Err(ObjError::InconsistentStride {
                    vertex,
                    expected: stride,
                    found: attributes.len(),
                });
            }
            data.extend(attributes);
        }

        let indices = mesh.faces.iter().flat_map(|f| f.positions).collect();

        Ok(Self {
            data,
            stride,
            indices,
        })
    }

    pub fn vertex_count(&self) -> usize {
        if self.stride == 0 {
            0
        } else {
            self.data.len() / self.stride
        }
    }

    pub fn face_count(&self) -> usize {
        self.indices.len() / FACE_CORNERS
    }

    /// Iterate the buffer one vertex at a time
    pub fn vertices(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks(self.stride.max(1))
    }

    /// Iterate the element list one triangle at a time
    pub fn triangles(&self) -> impl Iterator<Item = &[u32]> {
        self.indices.chunks(FACE_CORNERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulator::ShadingPolicy;
    use crate::obj::{parse_obj, OBJ_HEADER};

    fn buffer(body: &str, policy: ShadingPolicy) -> ObjResult<VertexBuffer> {
        let mesh = parse_obj(&format!("{}\n{}", OBJ_HEADER, body), policy)?;
        VertexBuffer::from_mesh(&mesh)
    }

    const QUAD: &str = "v 0 0 0\nv 1 0 0\nv 1 0 1\nv 0 0 1\n\
                        vn 0 -1 0\nvn 0 1 0\n\
                        f 1/1/1 2/1/1 3/1/1\nf 1/1/2 3/1/2 4/1/2\n";

    #[test]
    fn test_position_only_stride() {
        let vb = buffer("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n", ShadingPolicy::Averaged).unwrap();
        assert_eq!(vb.stride, 3);
        assert_eq!(vb.data.len(), 9);
        assert_eq!(vb.indices, vec![1, 2, 3]);
    }

    #[test]
    fn test_averaged_stride_and_mean() {
        let vb = buffer(QUAD, ShadingPolicy::Averaged).unwrap();
        assert_eq!(vb.stride, 6);
        assert_eq!(vb.vertex_count(), 4);
        assert_eq!(vb.data.len(), vb.vertex_count() * vb.stride);

        let vertices: Vec<&[f32]> = vb.vertices().collect();
        // Shared by both faces: down and up cancel out
        assert_eq!(vertices[0], &[0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(vertices[1], &[1.0, 0.0, 0.0, 0.0, -1.0, 0.0]);
        assert_eq!(vertices[3], &[0.0, 0.0, 1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_simple_stride_uses_first_normal() {
        let vb = buffer(QUAD, ShadingPolicy::Simple).unwrap();
        assert_eq!(vb.stride, 4);

        let shades: Vec<f32> = vb.vertices().map(|v| v[3]).collect();
        assert_eq!(shades, vec![0.8, 0.8, 0.8, 1.0]);
    }

    #[test]
    fn test_elements_keep_file_order() {
        let vb = buffer(QUAD, ShadingPolicy::Simple).unwrap();
        let triangles: Vec<&[u32]> = vb.triangles().collect();
        assert_eq!(triangles, vec![&[1, 2, 3][..], &[1, 3, 4][..]]);
        assert_eq!(vb.face_count(), 2);
    }

    #[test]
    fn test_unreferenced_vertex_breaks_stride() {
        let err = buffer(
            "v 0 0 0\nv 1 0 0\nv 0 1 0\nv 5 5 5\nvn 0 0 1\nf 1/1/1 2/1/1 3/1/1\n",
            ShadingPolicy::Averaged,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ObjError::InconsistentStride {
                vertex: 3,
                expected: 6,
                found: 3,
            }
        );
    }
}
