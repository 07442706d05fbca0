//! Bounding faces of the image volume.
//!
//! A volume has exactly six faces, so a set of faces is a bitset rather than
//! an open-ended collection.

use std::fmt;

use glam::UVec3;

/// One of the six bounding faces of the image volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Face {
    /// First z slice.
    Top,
    /// Last z slice.
    Bottom,
    /// First y row.
    North,
    /// Last y row.
    South,
    /// Last x column.
    East,
    /// First x column.
    West,
}

impl Face {
    /// All faces in declaration order.
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::North,
        Face::South,
        Face::East,
        Face::West,
    ];

    const fn bit(self) -> u8 {
        1 << self as u8
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Face::Top => "top",
            Face::Bottom => "bottom",
            Face::North => "north",
            Face::South => "south",
            Face::East => "east",
            Face::West => "west",
        };
        f.write_str(name)
    }
}

/// A set of volume faces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceSet(u8);

impl FaceSet {
    /// The empty set.
    pub const EMPTY: FaceSet = FaceSet(0);

    /// Creates an empty set.
    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Adds a face. Returns true if it was not already present.
    pub fn insert(&mut self, face: Face) -> bool {
        let added = !self.contains(face);
        self.0 |= face.bit();
        added
    }

    /// Removes a face. Returns true if it was present.
    pub fn remove(&mut self, face: Face) -> bool {
        let present = self.contains(face);
        self.0 &= !face.bit();
        present
    }

    /// Returns true if the set contains `face`.
    pub fn contains(self, face: Face) -> bool {
        self.0 & face.bit() != 0
    }

    /// Returns true if the two sets share at least one face.
    pub fn intersects(self, other: FaceSet) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true if no face is in the set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of faces in the set.
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterates the faces in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Face> {
        Face::ALL.into_iter().filter(move |face| self.contains(*face))
    }

    /// Classifies an inclusive voxel bounding box against the image dimensions.
    ///
    /// A box touches a face when it reaches the first or last voxel along the
    /// corresponding axis. Degenerate dimensions yield the empty set.
    pub fn touched_by(min: UVec3, max: UVec3, dimensions: UVec3) -> Self {
        let mut faces = Self::new();
        if dimensions.cmpeq(UVec3::ZERO).any() {
            return faces;
        }
        let last = dimensions - UVec3::ONE;

        if min.z == 0 {
            faces.insert(Face::Top);
        }
        if max.z >= last.z {
            faces.insert(Face::Bottom);
        }
        if min.y == 0 {
            faces.insert(Face::North);
        }
        if max.y >= last.y {
            faces.insert(Face::South);
        }
        if max.x >= last.x {
            faces.insert(Face::East);
        }
        if min.x == 0 {
            faces.insert(Face::West);
        }
        faces
    }
}

impl FromIterator<Face> for FaceSet {
    fn from_iter<I: IntoIterator<Item = Face>>(iter: I) -> Self {
        let mut set = Self::new();
        for face in iter {
            set.insert(face);
        }
        set
    }
}

impl From<Face> for FaceSet {
    fn from(face: Face) -> Self {
        FaceSet(face.bit())
    }
}
