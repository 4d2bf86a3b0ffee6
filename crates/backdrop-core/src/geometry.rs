use std::f32::consts::PI;

/// Indexed triangle mesh with position-only vertices.
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub positions: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl Mesh {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// UV sphere of the given radius; pole rows emit a single triangle per segment.
pub fn uv_sphere(radius: f32, width_segments: u32, height_segments: u32) -> Mesh {
    let ws = width_segments.max(3);
    let hs = height_segments.max(2);
    let row = ws + 1;

    let mut positions = Vec::with_capacity((row * (hs + 1)) as usize);
    for iy in 0..=hs {
        let theta = iy as f32 / hs as f32 * PI;
        for ix in 0..=ws {
            let phi = ix as f32 / ws as f32 * 2.0 * PI;
            positions.push([
                -radius * phi.cos() * theta.sin(),
                radius * theta.cos(),
                radius * phi.sin() * theta.sin(),
            ]);
        }
    }

    let mut indices = Vec::with_capacity((ws * (hs - 1) * 6) as usize);
    for iy in 0..hs {
        for ix in 0..ws {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                indices.extend_from_slice(&[a, b, d]);
            }
            if iy != hs - 1 {
                indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    Mesh { positions, indices }
}
