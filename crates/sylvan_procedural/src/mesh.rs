//! # Renderer Hand-off
//!
//! Read-only vertex streams and object instances derived from a chunk.
//! Nothing here touches a graphics API; a renderer uploads
//! [`TerrainMesh::vertex_bytes`] and [`TerrainMesh::indices`] as they are.
//!
//! ## Vertex Layout
//!
//! ```text
//! offset 0   position [f32; 3]   (col, height, row)
//! offset 12  normal   [f32; 3]   always (0, 1, 0)
//! offset 24  uv       [f32; 2]   (row % 2, col % 2)
//! stride 32
//! ```
//!
//! Indices describe one triangle strip per pair of adjacent rows, walking
//! from the last row back to the first.

use bytemuck::{Pod, Zeroable};
use sylvan_shared::Vec3;

use crate::chunk::{Chunk, ChunkGenerator};
use crate::noise::NoiseField;

/// Yaw applied to small objects per unit of stored noise value.
pub const SMALL_OBJECT_YAW_FACTOR: f32 = 7.0;

/// One terrain vertex.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct TerrainVertex {
    /// Chunk-local position.
    pub position: [f32; 3],
    /// Surface normal.
    pub normal: [f32; 3],
    /// Texture coordinate, alternating 0/1 across the grid.
    pub uv: [f32; 2],
}

/// Vertex and index streams for one chunk's terrain surface.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TerrainMesh {
    vertices: Vec<TerrainVertex>,
    indices: Vec<u32>,
    width: usize,
    height: usize,
}

impl TerrainMesh {
    /// Builds the mesh from a chunk's cached heightmap.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn from_chunk(chunk: &Chunk) -> Self {
        let heightmap = chunk.heightmap();
        let width = heightmap.width();
        let height = heightmap.height();

        let mut vertices = Vec::with_capacity(width * height);
        for (row, samples) in heightmap.rows().enumerate() {
            for (col, sample) in samples.iter().enumerate() {
                vertices.push(TerrainVertex {
                    position: [col as f32, *sample as f32, row as f32],
                    normal: Vec3::Y.to_array(),
                    uv: [(row % 2) as f32, (col % 2) as f32],
                });
            }
        }

        let mut indices = Vec::with_capacity(width * height.saturating_sub(1) * 2);
        for row in (1..height).rev() {
            for col in 0..width {
                indices.push((col + width * row) as u32);
                indices.push((col + width * (row - 1)) as u32);
            }
        }

        Self {
            vertices,
            indices,
            width,
            height,
        }
    }

    /// Vertices in row-major order.
    #[must_use]
    pub fn vertices(&self) -> &[TerrainVertex] {
        &self.vertices
    }

    /// Triangle-strip indices, strips laid out back to back.
    #[must_use]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Raw vertex bytes for upload.
    #[must_use]
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Number of strips (one per pair of adjacent rows).
    #[must_use]
    pub fn strip_count(&self) -> usize {
        self.height.saturating_sub(1)
    }

    /// Indices per strip.
    #[must_use]
    pub fn indices_per_strip(&self) -> usize {
        self.width * 2
    }

    /// Index range of strip `strip` within [`TerrainMesh::indices`].
    #[must_use]
    pub fn strip(&self, strip: usize) -> Option<&[u32]> {
        let per = self.indices_per_strip();
        self.indices.get(strip * per..(strip + 1) * per)
    }
}

/// Where and how to draw one placed object.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObjectInstance {
    /// Chunk-local position, standing on the terrain surface.
    pub position: Vec3,
    /// Rotation about the up axis, in radians.
    pub yaw: f32,
    /// Which model variant to draw.
    pub variant: usize,
}

/// Instances for a chunk's large and small objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectInstances {
    /// Large objects, upright.
    pub large: Vec<ObjectInstance>,
    /// Small objects, rotated by their stored noise value.
    pub small: Vec<ObjectInstance>,
}

impl ObjectInstances {
    /// Derives instances for `chunk`.
    ///
    /// Each object stands at the interpolated terrain height under it. Large
    /// objects cycle through `large_variants` models and keep their default
    /// orientation; small objects cycle through `small_variants` and turn by
    /// [`SMALL_OBJECT_YAW_FACTOR`] times their stored value.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn for_chunk<N: NoiseField>(
        generator: &ChunkGenerator<N>,
        chunk: &Chunk,
        large_variants: usize,
        small_variants: usize,
    ) -> Self {
        let ground = |object: &Vec3| {
            let y = generator.interpolate_height(chunk, f64::from(object.x), f64::from(object.z));
            object.with_y(y as f32)
        };

        let large = chunk
            .large_objects()
            .iter()
            .enumerate()
            .map(|(i, object)| ObjectInstance {
                position: ground(object),
                yaw: 0.0,
                variant: i % large_variants.max(1),
            })
            .collect();

        let small = chunk
            .small_objects()
            .iter()
            .enumerate()
            .map(|(i, object)| ObjectInstance {
                position: ground(object),
                yaw: SMALL_OBJECT_YAW_FACTOR * object.y,
                variant: i % small_variants.max(1),
            })
            .collect();

        Self { large, small }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::ChunkCoord;
    use crate::heightmap::Heightmap;
    use crate::noise::WorldSeed;
    use crate::placement::PlacedObjects;

    fn ramp_chunk() -> Chunk {
        // 3 wide, 2 tall; height = 10 * row + col
        let heightmap = Heightmap::from_fn(3, 2, |col, row| (row * 10 + col) as f64);
        Chunk::from_parts(ChunkCoord::new(0, 0), heightmap, PlacedObjects::default())
    }

    #[test]
    fn test_vertex_layout() {
        let mesh = TerrainMesh::from_chunk(&ramp_chunk());
        assert_eq!(mesh.vertices().len(), 6);
        assert_eq!(std::mem::size_of::<TerrainVertex>(), 32);
        assert_eq!(mesh.vertex_bytes().len(), 6 * 32);

        let v = mesh.vertices()[4]; // row 1, col 1
        assert_eq!(v.position, [1.0, 11.0, 1.0]);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
        assert_eq!(v.uv, [1.0, 1.0]);
        assert_eq!(mesh.vertices()[2].uv, [0.0, 0.0]);
    }

    #[test]
    fn test_strip_indices() {
        let mesh = TerrainMesh::from_chunk(&ramp_chunk());
        assert_eq!(mesh.strip_count(), 1);
        assert_eq!(mesh.indices_per_strip(), 6);
        assert_eq!(mesh.indices(), &[3, 0, 4, 1, 5, 2]);
        assert_eq!(mesh.strip(0), Some(mesh.indices()));
        assert_eq!(mesh.strip(1), None);
    }

    #[test]
    fn test_generated_chunk_mesh_sizes() {
        let gen = ChunkGenerator::from_seed(WorldSeed::new(3), 16);
        let mesh = TerrainMesh::from_chunk(&gen.generate(ChunkCoord::new(0, 0)));
        assert_eq!(mesh.vertices().len(), 17 * 17);
        assert_eq!(mesh.indices().len(), 16 * 17 * 2);
        assert_eq!(mesh.strip_count(), 16);
    }

    #[test]
    fn test_instances_stand_on_terrain() {
        let gen = ChunkGenerator::from_seed(WorldSeed::new(11), 16);
        let objects = PlacedObjects {
            large: vec![Vec3::new(2.0, -0.7, 3.0), Vec3::new(4.0, -0.9, 4.0)],
            small: vec![Vec3::new(5.5, -0.6, 1.25)],
        };
        let coord = ChunkCoord::new(1, 2);
        let chunk = Chunk::from_parts(coord, gen.heights().generate(coord, gen.dims()), objects);

        let instances = ObjectInstances::for_chunk(&gen, &chunk, 6, 2);

        let tree = instances.large[1];
        assert_eq!(tree.variant, 1);
        assert_eq!(tree.yaw, 0.0);
        assert_eq!(tree.position.y, gen.interpolate_height(&chunk, 4.0, 4.0) as f32);

        let rock = instances.small[0];
        assert_eq!(rock.variant, 0);
        assert!((rock.yaw - 7.0 * -0.6).abs() < 1e-6);
        assert_eq!((rock.position.x, rock.position.z), (5.5, 1.25));
    }

    #[test]
    fn test_zero_variants_do_not_divide_by_zero() {
        let objects = PlacedObjects {
            large: vec![Vec3::new(1.0, -0.9, 1.0)],
            small: Vec::new(),
        };
        let gen = ChunkGenerator::from_seed(WorldSeed::new(1), 4);
        let coord = ChunkCoord::new(0, 0);
        let chunk = Chunk::from_parts(coord, gen.heights().generate(coord, gen.dims()), objects);
        let instances = ObjectInstances::for_chunk(&gen, &chunk, 0, 0);
        assert_eq!(instances.large[0].variant, 0);
    }
}
