use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use super::error::{ParseError, Result};
use super::lines::{split_arguments, Line, LineReader};
use super::material::{Material, MaterialKind};
use super::scalar::{is_unit_color, parse_float_strict, parse_vector, InvalidNumber};
use super::shape::{Object, ShapeKind};

/// Materials and objects declared in a scene file, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    materials: Vec<Material>,
    objects: Vec<Object>,
}

impl Scene {
    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn find_material(&self, name: &str) -> Option<&Material> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn into_parts(self) -> (Vec<Material>, Vec<Object>) {
        (self.materials, self.objects)
    }

    fn has_material(&self, name: &str) -> bool {
        self.find_material(name).is_some()
    }

    fn parse_line(&mut self, line: &Line) -> Result<()> {
        let tokens = line.tokens();
        let Some(&first) = tokens.first() else {
            return Ok(());
        };
        match first {
            "matte:" => self.parse_material(MaterialKind::Matte, &tokens, line),
            "metal:" => self.parse_material(MaterialKind::Metal, &tokens, line),
            "refractive:" => self.parse_material(MaterialKind::Refractive, &tokens, line),
            "sphere:" => self.parse_object(ShapeKind::Sphere, &tokens, line),
            "cylinder:" => self.parse_object(ShapeKind::Cylinder, &tokens, line),
            _ => Err(ParseError::UnknownEntity {
                name: first.strip_suffix(':').unwrap_or(first).to_string(),
            }),
        }
    }

    /// `<kind>: <name> <params...>`
    ///
    /// Any malformed or out-of-range parameter yields the same
    /// per-kind message.
    fn parse_material(&mut self, kind: MaterialKind, tokens: &[&str], line: &Line) -> Result<()> {
        let invalid = || ParseError::InvalidMaterialParams {
            kind,
            line: line.raw.clone(),
        };
        let count = match kind {
            MaterialKind::Matte => 4,
            MaterialKind::Metal => 5,
            MaterialKind::Refractive => 2,
        };
        let arguments = split_arguments(tokens, count, &line.raw, invalid)?;
        let (name, values) = (arguments[0], &arguments[1..]);
        if self.has_material(name) {
            return Err(ParseError::DuplicateMaterial {
                name: name.to_string(),
                line: line.raw.clone(),
            });
        }
        let params = material_params(kind, values).ok_or_else(invalid)?;
        log::debug!("declared {kind} material {name}");
        self.materials.push(Material::new(name, kind, params));
        Ok(())
    }

    /// `sphere: cx cy cz r <material>` or
    /// `cylinder: cx cy cz r ax ay az <material>`
    fn parse_object(&mut self, kind: ShapeKind, tokens: &[&str], line: &Line) -> Result<()> {
        let invalid = || match kind {
            ShapeKind::Sphere => ParseError::InvalidSphereParams {
                line: line.raw.clone(),
            },
            ShapeKind::Cylinder => ParseError::InvalidCylinderParams {
                line: line.raw.clone(),
            },
        };
        let count = match kind {
            ShapeKind::Sphere => 5,
            ShapeKind::Cylinder => 8,
        };
        let arguments = split_arguments(tokens, count, &line.raw, invalid)?;
        let (values, material) = arguments.split_at(count - 1);
        let material = material[0];

        let params = values
            .iter()
            .map(|token| parse_float_strict(token))
            .collect::<std::result::Result<Vec<f64>, InvalidNumber>>()
            .map_err(|_| invalid())?;
        if !(params[3] > 0.0) {
            return Err(invalid());
        }
        // Checked last, and reported on its own rather than as bad params.
        if !self.has_material(material) {
            return Err(ParseError::MaterialNotFound {
                name: material.to_string(),
                line: line.raw.clone(),
            });
        }

        log::debug!("declared {kind} using material {material}");
        self.objects.push(Object {
            kind,
            params,
            material: material.to_string(),
            raw_line: line.raw.clone(),
        });
        Ok(())
    }
}

fn material_params(kind: MaterialKind, values: &[&str]) -> Option<Vec<f64>> {
    match kind {
        MaterialKind::Matte => {
            let reflectance = parse_vector(values).ok()?;
            is_unit_color(&reflectance).then(|| reflectance.iter().copied().collect())
        }
        MaterialKind::Metal | MaterialKind::Refractive => values
            .iter()
            .map(|token| parse_float_strict(token).ok())
            .collect(),
    }
}

/// Loads and parses a scene file.
///
/// Objects may only reference materials declared on an earlier line. The
/// first invalid line aborts the parse and nothing is returned.
pub fn parse_scene(path: impl AsRef<Path>) -> Result<Scene> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ParseError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let scene = parse_scene_from(BufReader::new(file))?;
    log::info!(
        "loaded {} materials and {} objects from {}",
        scene.materials.len(),
        scene.objects.len(),
        path.display()
    );
    Ok(scene)
}

/// Parses scene directives from any buffered reader.
pub fn parse_scene_from<R: BufRead>(reader: R) -> Result<Scene> {
    let mut scene = Scene::default();
    for line in LineReader::new(reader) {
        scene.parse_line(&line?)?;
    }
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use rstest::rstest;

    fn parse(input: &str) -> Result<Scene> {
        parse_scene_from(input.as_bytes())
    }

    fn message(input: &str) -> String {
        parse(input).unwrap_err().to_string()
    }

    #[test]
    fn test_parse_full_scene() {
        let input = "\
matte: red 1 0 0
metal: steel 0.8 0.8 0.9 0.05
refractive: glass 1.5

sphere: 0 0 -5 1 red
  cylinder: 1 2 3 0.5 0 1 0 glass
";
        let scene = parse(input).unwrap();
        assert_eq!(scene.materials().len(), 3);
        assert_eq!(scene.materials()[0], Material::new("red", MaterialKind::Matte, vec![1.0, 0.0, 0.0]));
        assert_eq!(scene.materials()[1].params, vec![0.8, 0.8, 0.9, 0.05]);
        assert_eq!(scene.find_material("glass").unwrap().refraction_index(), Some(1.5));

        let objects = scene.objects();
        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].kind, ShapeKind::Sphere);
        assert_eq!(objects[0].params, vec![0.0, 0.0, -5.0, 1.0]);
        assert_eq!(objects[0].material, "red");
        assert_eq!(objects[1].kind, ShapeKind::Cylinder);
        assert_eq!(objects[1].axis(), Some(Vector3::new(0.0, 1.0, 0.0)));
        assert_eq!(objects[1].raw_line, "  cylinder: 1 2 3 0.5 0 1 0 glass");
    }

    #[test]
    fn test_forward_reference_is_rejected() {
        assert_eq!(
            message("sphere: 0 0 0 1 glass\nrefractive: glass 1.5\n"),
            "Error: Material not found: [glass]\nLine: \"sphere: 0 0 0 1 glass\""
        );
        let scene = parse("refractive: glass 1.5\nsphere: 0 0 0 1 glass\n").unwrap();
        assert_eq!(scene.objects().len(), 1);
    }

    #[test]
    fn test_duplicate_material() {
        assert_eq!(
            message("matte: red 1 0 0\nmatte: red 1 0 0\n"),
            "Error: Material with name [red] already exists\nLine: \"matte: red 1 0 0\""
        );
        // Names are shared across material kinds.
        assert_eq!(
            message("matte: m 1 0 0\nrefractive: m 1.3"),
            "Error: Material with name [m] already exists\nLine: \"refractive: m 1.3\""
        );
    }

    #[test]
    fn test_duplicate_is_reported_before_bad_params() {
        assert_eq!(
            message("matte: red 1 0 0\nmatte: red 2 0 0"),
            "Error: Material with name [red] already exists\nLine: \"matte: red 2 0 0\""
        );
    }

    #[rstest]
    #[case("matte: red 1 0", "matte")]
    #[case("matte: red 1 0 x", "matte")]
    #[case("matte: red 1.0001 0 0", "matte")]
    #[case("matte: red -0.1 0 0", "matte")]
    #[case("metal: steel 1 1 1", "metal")]
    #[case("metal: steel 1 1 1 fuzzy", "metal")]
    #[case("refractive: glass", "refractive")]
    #[case("refractive: glass 1.5x", "refractive")]
    #[case("metal: steel 1 1 1 1e999", "metal")]
    fn test_invalid_material_params(#[case] input: &str, #[case] kind: &str) {
        assert_eq!(
            message(input),
            format!("Error: Invalid {kind} material parameters\nLine: \"{input}\"")
        );
    }

    #[test]
    fn test_unchecked_material_ranges() {
        let scene = parse("metal: m 2 -1 5 720\nrefractive: g -3").unwrap();
        assert_eq!(scene.materials()[0].reflectance(), Some(Vector3::new(2.0, -1.0, 5.0)));
        assert_eq!(scene.materials()[1].refraction_index(), Some(-3.0));
    }

    #[rstest]
    #[case("matte: red 1 0 0 0", "matte:", "0")]
    #[case("metal: s 1 1 1 0 a b", "metal:", "a b")]
    #[case("refractive: g 1.5 x", "refractive:", "x")]
    #[case("sphere: 0 0 0 1 red blue", "sphere:", "blue")]
    #[case("cylinder: 0 0 0 1 0 1 0 red 9", "cylinder:", "9")]
    fn test_extra_data(#[case] input: &str, #[case] key: &str, #[case] extra: &str) {
        let input_with_material = format!("matte: red 1 0 0\n{input}");
        let input = if input.starts_with("matte:") { input.to_string() } else { input_with_material };
        let raw = input.lines().last().unwrap();
        assert_eq!(
            message(&input),
            format!(
                "Error: Extra data after configuration value for key: [{key}]\nExtra: \"{extra}\"\nLine: \"{raw}\""
            )
        );
    }

    #[rstest]
    #[case("sphere: 0 0 0 red", "sphere")]
    #[case("sphere: 0 0 0 0 red", "sphere")]
    #[case("sphere: 0 0 0 -1 red", "sphere")]
    #[case("sphere: 0 0 z 1 red", "sphere")]
    #[case("cylinder: 0 0 0 1 0 1 red", "cylinder")]
    #[case("cylinder: 0 0 0 0 0 1 0 red", "cylinder")]
    #[case("cylinder: 0 0 0 1 0 1 0.0.0 red", "cylinder")]
    #[case("sphere: 0 0 0 1e999 red", "sphere")]
    #[case("sphere: 1e-400 0 0 1 red", "sphere")]
    #[case("cylinder: 0 0 0 1 0 -1e999 0 red", "cylinder")]
    fn test_invalid_object_params(#[case] line: &str, #[case] kind: &str) {
        let input = format!("matte: red 1 0 0\n{line}");
        assert_eq!(
            message(&input),
            format!("Error: Invalid {kind} parameters\nLine: \"{line}\"")
        );
    }

    #[test]
    fn test_bad_params_take_precedence_over_missing_material() {
        assert_eq!(
            message("sphere: 0 0 0 -1 ghost"),
            "Error: Invalid sphere parameters\nLine: \"sphere: 0 0 0 -1 ghost\""
        );
        assert_eq!(
            message("cylinder: 0 0 0 1 0 0 0 ghost"),
            "Error: Material not found: [ghost]\nLine: \"cylinder: 0 0 0 1 0 0 0 ghost\""
        );
    }

    #[test]
    fn test_unknown_entity_strips_colon() {
        assert_eq!(message("cube: 0 0 0 1 red"), "Error: Unknown scene entity: cube");
        assert_eq!(message("plane 0 1 0"), "Error: Unknown scene entity: plane");
    }

    #[test]
    fn test_into_parts_keeps_order() {
        let scene = parse("matte: b 0 0 1\nmatte: a 1 0 0\nsphere: 0 0 0 1 a\nsphere: 1 1 1 2 b").unwrap();
        let (materials, objects) = scene.into_parts();
        let names: Vec<_> = materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["b", "a"]);
        assert_eq!(objects[0].material, "a");
        assert_eq!(objects[1].radius(), Some(2.0));
    }
}
