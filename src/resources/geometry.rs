use glam::Vec2;

/// Options for [`Geometry::plane`].
pub struct PlaneOptions {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for PlaneOptions {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            width_segments: 1,
            height_segments: 1,
        }
    }
}

/// Plain CPU-side vertex data; uploading is the compositor's concern.
///
/// Image meshes all share a single unit-quad geometry and carry their pixel
/// size in the mesh scale, so element resizes never touch vertex data.
#[derive(Debug, Clone, Default)]
pub struct Geometry {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u16>,
}

impl Geometry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an XY plane centered on the origin, facing +Z.
    #[must_use]
    pub fn plane(options: &PlaneOptions) -> Self {
        let width_half = options.width / 2.0;
        let height_half = options.height / 2.0;

        let grid_x = options.width_segments.max(1);
        let grid_y = options.height_segments.max(1);

        let grid_x1 = grid_x + 1;
        let grid_y1 = grid_y + 1;

        let segment_width = options.width / grid_x as f32;
        let segment_height = options.height / grid_y as f32;

        let mut geo = Self::new();

        for iy in 0..grid_y1 {
            let y = iy as f32 * segment_height - height_half;
            for ix in 0..grid_x1 {
                let x = ix as f32 * segment_width - width_half;

                // -y matches the UV direction
                geo.positions.push([x, -y, 0.0]);
                geo.normals.push([0.0, 0.0, 1.0]);
                geo.uvs.push([ix as f32 / grid_x as f32, 1.0 - (iy as f32 / grid_y as f32)]);
            }
        }

        for iy in 0..grid_y {
            for ix in 0..grid_x {
                let a = ix + grid_x1 * iy;
                let b = ix + grid_x1 * (iy + 1);
                let c = (ix + 1) + grid_x1 * (iy + 1);
                let d = (ix + 1) + grid_x1 * iy;

                geo.indices.push(a as u16);
                geo.indices.push(b as u16);
                geo.indices.push(d as u16);

                geo.indices.push(b as u16);
                geo.indices.push(c as u16);
                geo.indices.push(d as u16);
            }
        }

        geo
    }

    /// The shared 1×1 quad every image mesh reuses.
    #[must_use]
    pub fn unit_quad() -> Self {
        Self::plane(&PlaneOptions::default())
    }

    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    #[must_use]
    pub fn index_count(&self) -> usize {
        self.indices.len()
    }

    /// Half extents on the XY plane, for coarse culling by the compositor.
    #[must_use]
    pub fn half_extents(&self) -> Vec2 {
        let mut max = Vec2::ZERO;
        for p in &self.positions {
            max = max.max(Vec2::new(p[0].abs(), p[1].abs()));
        }
        max
    }
}
