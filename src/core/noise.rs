use glam::Vec3;
use rand::prelude::*;

// Skew / unskew factors for the 3D simplex grid.
const F3: f32 = 1.0 / 3.0;
const G3: f32 = 1.0 / 6.0;

// Squared kernel radius of a simplex corner.
const CORNER_RADIUS_SQ: f32 = 0.6;

// Brings the summed corner contributions to roughly [-1, 1].
const OUTPUT_SCALE: f32 = 32.0;

/// Deterministic 3D simplex-style gradient noise.
///
/// The permutation table is a seeded Fisher-Yates shuffle of `0..=255`,
/// doubled to 512 entries so corner hashing never has to wrap indices.
#[derive(Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    pub fn new(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut p: [u8; 256] = [0; 256];
        for (i, v) in p.iter_mut().enumerate() {
            *v = i as u8;
        }
        p.shuffle(&mut rng);
        let mut perm = [0u8; 512];
        for (i, v) in perm.iter_mut().enumerate() {
            *v = p[i & 255];
        }
        Self { perm }
    }

    #[inline]
    fn hash(&self, i: usize, j: usize, k: usize) -> u8 {
        let pk = self.perm[k] as usize;
        let pj = self.perm[j + pk] as usize;
        self.perm[i + pj]
    }

    /// Sample the field at `(x, y, z)`. Output is approximately in `[-1, 1]`.
    pub fn noise3d(&self, x: f32, y: f32, z: f32) -> f32 {
        let s = (x + y + z) * F3;
        let i = (x + s).floor();
        let j = (y + s).floor();
        let k = (z + s).floor();
        let t = (i + j + k) * G3;
        let x0 = x - (i - t);
        let y0 = y - (j - t);
        let z0 = z - (k - t);

        // Corner ordering of the simplex containing the point.
        let (o1, o2) = if x0 >= y0 {
            if y0 >= z0 {
                ([1, 0, 0], [1, 1, 0])
            } else if x0 >= z0 {
                ([1, 0, 0], [1, 0, 1])
            } else {
                ([0, 0, 1], [1, 0, 1])
            }
        } else if y0 < z0 {
            ([0, 0, 1], [0, 1, 1])
        } else if x0 < z0 {
            ([0, 1, 0], [0, 1, 1])
        } else {
            ([0, 1, 0], [1, 1, 0])
        };

        let x1 = x0 - o1[0] as f32 + G3;
        let y1 = y0 - o1[1] as f32 + G3;
        let z1 = z0 - o1[2] as f32 + G3;
        let x2 = x0 - o2[0] as f32 + 2.0 * G3;
        let y2 = y0 - o2[1] as f32 + 2.0 * G3;
        let z2 = z0 - o2[2] as f32 + 2.0 * G3;
        let x3 = x0 - 1.0 + 3.0 * G3;
        let y3 = y0 - 1.0 + 3.0 * G3;
        let z3 = z0 - 1.0 + 3.0 * G3;

        // rem_euclid keeps negative lattice coordinates inside the table.
        let ii = (i as i64).rem_euclid(256) as usize;
        let jj = (j as i64).rem_euclid(256) as usize;
        let kk = (k as i64).rem_euclid(256) as usize;

        let n0 = corner(self.hash(ii, jj, kk), x0, y0, z0);
        let n1 = corner(self.hash(ii + o1[0], jj + o1[1], kk + o1[2]), x1, y1, z1);
        let n2 = corner(self.hash(ii + o2[0], jj + o2[1], kk + o2[2]), x2, y2, z2);
        let n3 = corner(self.hash(ii + 1, jj + 1, kk + 1), x3, y3, z3);

        OUTPUT_SCALE * (n0 + n1 + n2 + n3)
    }

    #[inline]
    pub fn sample(&self, p: Vec3) -> f32 {
        self.noise3d(p.x, p.y, p.z)
    }
}

impl Default for SimplexNoise {
    fn default() -> Self {
        Self::new(crate::core::DEFAULT_SEED)
    }
}

#[inline]
fn corner(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let t = CORNER_RADIUS_SQ - x * x - y * y - z * z;
    if t <= 0.0 {
        return 0.0;
    }
    let t2 = t * t;
    t2 * t2 * grad(hash, x, y, z)
}

// Dot product with one of 12 edge gradients picked by the low hash bits.
#[inline]
fn grad(hash: u8, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 != 0 { -u } else { u };
    let v = if h & 2 != 0 { -v } else { v };
    u + v
}
