use crate::error::{MusyncError, Result};
use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Latitude/longitude sphere with immutable rest positions.
///
/// Current positions and normals are rewritten wholesale every frame by the
/// compositor; rest positions never change for the life of the mesh.
#[derive(Clone, Debug)]
pub struct SphereMesh {
    radius: f32,
    rest: Vec<Vec3>,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    indices: Vec<u32>,
}

impl SphereMesh {
    /// `(w+1) * (h+1)` vertices, `phi` around Y and `theta` from +Y to -Y.
    pub fn new(radius: f32, width_segments: u32, height_segments: u32) -> Result<Self> {
        if !radius.is_finite() || radius <= 0.0 || width_segments < 3 || height_segments < 2 {
            return Err(MusyncError::DegenerateMesh {
                radius,
                width: width_segments,
                height: height_segments,
            });
        }
        let (w, h) = (width_segments as usize, height_segments as usize);
        let mut rest = Vec::with_capacity((w + 1) * (h + 1));
        for iy in 0..=h {
            let theta = iy as f32 / h as f32 * PI;
            for ix in 0..=w {
                let phi = ix as f32 / w as f32 * TAU;
                rest.push(Vec3::new(
                    -radius * phi.cos() * theta.sin(),
                    radius * theta.cos(),
                    radius * phi.sin() * theta.sin(),
                ));
            }
        }

        let row = w + 1;
        let mut indices = Vec::with_capacity(w * h * 6);
        for iy in 0..h {
            for ix in 0..w {
                let a = (iy * row + ix + 1) as u32;
                let b = (iy * row + ix) as u32;
                let c = ((iy + 1) * row + ix) as u32;
                let d = ((iy + 1) * row + ix + 1) as u32;
                // Skip the zero-area triangles that touch the poles.
                if iy != 0 {
                    indices.extend_from_slice(&[a, b, d]);
                }
                if iy != h - 1 {
                    indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        let mut mesh = Self {
            radius,
            positions: rest.clone(),
            normals: vec![Vec3::ZERO; rest.len()],
            rest,
            indices,
        };
        mesh.recompute_normals();
        log::debug!(
            "[mesh] sphere r={} verts={} tris={}",
            radius,
            mesh.rest.len(),
            mesh.indices.len() / 3
        );
        Ok(mesh)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn rest_positions(&self) -> &[Vec3] {
        &self.rest
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn vertex_count(&self) -> usize {
        self.rest.len()
    }

    /// Replace the current positions. The length must match the rest buffer.
    pub fn set_positions(&mut self, positions: Vec<Vec3>) -> Result<()> {
        if positions.len() != self.rest.len() {
            return Err(MusyncError::VertexCountMismatch {
                expected: self.rest.len(),
                actual: positions.len(),
            });
        }
        self.positions = positions;
        self.recompute_normals();
        Ok(())
    }

    pub(crate) fn positions_mut(&mut self) -> &mut [Vec3] {
        &mut self.positions
    }

    /// Area-weighted vertex normals, recomputed from scratch.
    pub fn recompute_normals(&mut self) {
        self.normals.iter_mut().for_each(|n| *n = Vec3::ZERO);
        for tri in self.indices.chunks_exact(3) {
            let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let (a, b, c) = (self.positions[ia], self.positions[ib], self.positions[ic]);
            let face = (c - b).cross(a - b);
            self.normals[ia] += face;
            self.normals[ib] += face;
            self.normals[ic] += face;
        }
        // The last seam vertex of each pole row is in no triangle; give it
        // the radial direction.
        for (n, p) in self.normals.iter_mut().zip(self.positions.iter()) {
            *n = n.try_normalize().unwrap_or_else(|| p.normalize_or_zero());
        }
    }

    /// Raw position bytes for a GPU vertex-buffer upload.
    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn normal_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.normals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_and_triangle_counts() {
        let m = SphereMesh::new(1.0, 8, 6).unwrap();
        assert_eq!(m.vertex_count(), 9 * 7);
        // Two triangles per quad minus one per quad on each polar row.
        assert_eq!(m.indices().len() / 3, 8 * 6 * 2 - 2 * 8);
    }

    #[test]
    fn normals_point_outward() {
        let m = SphereMesh::new(2.0, 16, 12).unwrap();
        for (p, n) in m.positions().iter().zip(m.normals()) {
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(p.normalize().dot(*n) > 0.9);
        }
    }

    #[test]
    fn rejects_degenerate_requests() {
        assert!(SphereMesh::new(0.0, 8, 8).is_err());
        assert!(SphereMesh::new(1.0, 2, 8).is_err());
        assert!(SphereMesh::new(f32::NAN, 8, 8).is_err());
    }

    #[test]
    fn position_bytes_cover_all_vertices() {
        let m = SphereMesh::new(1.0, 4, 3).unwrap();
        assert_eq!(m.position_bytes().len(), m.vertex_count() * 12);
    }
}
