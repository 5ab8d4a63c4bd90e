use std::fmt;

use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Sphere,
    Cylinder,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeKind::Sphere => f.write_str("Sphere"),
            ShapeKind::Cylinder => f.write_str("Cylinder"),
        }
    }
}

/// A geometric object declared in a scene file.
///
/// `params` is `cx cy cz r` for spheres and `cx cy cz r ax ay az` for
/// cylinders. `raw_line` keeps the declaring line for later diagnostics.
#[derive(Clone, Debug, PartialEq)]
pub struct Object {
    pub kind: ShapeKind,
    pub params: Vec<f64>,
    pub material: String,
    pub raw_line: String,
}

impl Object {
    pub fn center(&self) -> Option<Vector3<f64>> {
        match self.params.as_slice() {
            [x, y, z, ..] => Some(Vector3::new(*x, *y, *z)),
            _ => None,
        }
    }

    pub fn radius(&self) -> Option<f64> {
        self.params.get(3).copied()
    }

    /// Axis direction of a cylinder; not normalized.
    pub fn axis(&self) -> Option<Vector3<f64>> {
        match (self.kind, self.params.as_slice()) {
            (ShapeKind::Cylinder, [_, _, _, _, x, y, z]) => Some(Vector3::new(*x, *y, *z)),
            _ => None,
        }
    }
}
