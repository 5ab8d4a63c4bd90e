use std::fmt;

use nalgebra::Vector3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaterialKind {
    Matte,
    Metal,
    Refractive,
}

impl fmt::Display for MaterialKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MaterialKind::Matte => "matte",
            MaterialKind::Metal => "metal",
            MaterialKind::Refractive => "refractive",
        };
        f.write_str(name)
    }
}

/// A named material declared in a scene file.
///
/// `params` holds the values in file order:
/// * matte: reflectance `r g b`, each in [0, 1]
/// * metal: reflectance `r g b` followed by the diffusion angle
/// * refractive: the refraction index
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    pub name: String,
    pub kind: MaterialKind,
    pub params: Vec<f64>,
}

impl Material {
    pub fn new(name: impl Into<String>, kind: MaterialKind, params: Vec<f64>) -> Self {
        Material {
            name: name.into(),
            kind,
            params,
        }
    }

    /// Reflectance of matte and metal materials.
    pub fn reflectance(&self) -> Option<Vector3<f64>> {
        match (self.kind, self.params.as_slice()) {
            (MaterialKind::Matte | MaterialKind::Metal, [r, g, b, ..]) => {
                Some(Vector3::new(*r, *g, *b))
            }
            _ => None,
        }
    }

    pub fn diffusion(&self) -> Option<f64> {
        match (self.kind, self.params.as_slice()) {
            (MaterialKind::Metal, [_, _, _, phi]) => Some(*phi),
            _ => None,
        }
    }

    pub fn refraction_index(&self) -> Option<f64> {
        match (self.kind, self.params.as_slice()) {
            (MaterialKind::Refractive, [index]) => Some(*index),
            _ => None,
        }
    }
}
