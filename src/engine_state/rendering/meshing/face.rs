use cgmath::Point3;

use crate::engine_state::{
    rendering::Vertex,
    voxels::{
        block::{block_side::BlockSide, block_type::BlockType, uv_rect},
        coordinates::BlockSubPos,
    },
};

/// Represents a single quad face of a voxel in the mesh.
///
/// A face is defined by four corner points (lower-left, upper-left, upper-right,
/// lower-right). Each triangle follows that clockwise corner order
/// (`ll, ul, ur` then `ur, lr, ll`). In right-handed world coordinates this
/// makes `(ul - ll) x (ur - ll)` point along the outward normal, i.e.
/// counter-clockwise around the normal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Lower-left corner of the face in chunk coordinates
    pub ll: Point3<i16>,
    /// Upper-left corner of the face in chunk coordinates
    pub ul: Point3<i16>,
    /// Upper-right corner of the face in chunk coordinates
    pub ur: Point3<i16>,
    /// Lower-right corner of the face in chunk coordinates
    pub lr: Point3<i16>,
    /// The block type, used for texture mapping
    pub block_type: BlockType,
    /// Which side of the block this face represents
    pub block_side: BlockSide,
}

impl Face {
    /// Creates the face on `block_side` of the block at `position`.
    pub fn new(position: BlockSubPos, block_type: BlockType, block_side: BlockSide) -> Self {
        let (i, j, k) = (position.x, position.y, position.z);
        let corner = |dx: i16, dy: i16, dz: i16| Point3::new(i + dx, j + dy, k + dz);

        let (ll, ul, ur, lr) = match block_side {
            BlockSide::LEFT => (corner(0, 0, 1), corner(0, 1, 1), corner(0, 1, 0), corner(0, 0, 0)),
            BlockSide::RIGHT => (corner(1, 0, 0), corner(1, 1, 0), corner(1, 1, 1), corner(1, 0, 1)),
            BlockSide::TOP => (corner(0, 1, 0), corner(0, 1, 1), corner(1, 1, 1), corner(1, 1, 0)),
            BlockSide::BOTTOM => (corner(0, 0, 1), corner(0, 0, 0), corner(1, 0, 0), corner(1, 0, 1)),
            BlockSide::FRONT => (corner(0, 0, 0), corner(0, 1, 0), corner(1, 1, 0), corner(1, 0, 0)),
            BlockSide::BACK => (corner(1, 0, 1), corner(1, 1, 1), corner(0, 1, 1), corner(0, 0, 1)),
        };

        Face {
            ll,
            ul,
            ur,
            lr,
            block_type,
            block_side,
        }
    }

    /// The two triangles of this face as six vertices: `ll, ul, ur, ur, lr, ll`.
    pub fn vertices(&self) -> [Vertex; 6] {
        let normal: [f32; 3] = self.block_side.normal().into();
        let uv = uv_rect(self.block_type);
        let vertex = |corner: Point3<i16>, tex_coords: [f32; 2]| {
            Vertex::new(
                [corner.x as f32, corner.y as f32, corner.z as f32],
                normal,
                tex_coords,
                self.block_type,
            )
        };

        let ll = vertex(self.ll, [uv.min[0], uv.min[1]]);
        let ul = vertex(self.ul, [uv.min[0], uv.max[1]]);
        let ur = vertex(self.ur, [uv.max[0], uv.max[1]]);
        let lr = vertex(self.lr, [uv.max[0], uv.min[1]]);

        [ll, ul, ur, ur, lr, ll]
    }
}
