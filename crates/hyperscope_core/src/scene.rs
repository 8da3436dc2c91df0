//! Scenes
//!
//! [`SceneTemplate`] is the serializable description loaded from and saved
//! to RON files. [`Scene`] is the runtime aggregate the caller owns and
//! passes to the positioning pipeline every frame: shapes keyed by id, the
//! active camera, the 4D color range and the lighting.

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::fs;
use std::io;

use hyperscope_math::Vec5;

use crate::camera::Camera;
use crate::error::ShapeError;
use crate::generators::make_skybox;
use crate::lighting::Lighting;
use crate::shape::Shape;
use crate::shapes::ShapeInstance;
use crate::terrain::make_cube_hypergrid;

fn default_color_max() -> f32 {
    15.0
}

/// Parameters for a lattice of cubes, see [`make_cube_hypergrid`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HypergridTemplate {
    pub dims: [f32; 3],
    pub res: usize,
    /// `res x res x res` fourth-axis offsets
    pub spissitudes: Vec<Vec<Vec<f32>>>,
    #[serde(default)]
    pub position: [f32; 4],
}

/// A serializable scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneTemplate {
    /// Scene name (for display/debugging)
    pub name: String,
    #[serde(default)]
    pub camera: Camera,
    /// 4D distance at which the depth color saturates
    #[serde(default = "default_color_max")]
    pub color_max: f32,
    #[serde(default)]
    pub lighting: Lighting,
    #[serde(default)]
    pub shapes: Vec<ShapeInstance>,
    #[serde(default)]
    pub hypergrid: Option<HypergridTemplate>,
    /// Side length of a skybox cube centred on the camera
    #[serde(default)]
    pub skybox: Option<f32>,
}

impl SceneTemplate {
    /// Create an empty scene template with the default camera
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            camera: Camera::default(),
            color_max: default_color_max(),
            lighting: Lighting::default(),
            shapes: Vec::new(),
            hypergrid: None,
            skybox: None,
        }
    }

    /// Load a scene template from a RON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let contents = fs::read_to_string(path)?;
        let template = ron::from_str(&contents)?;
        Ok(template)
    }

    /// Save a scene template to a RON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SceneSaveError> {
        let pretty = ron::ser::PrettyConfig::new()
            .struct_names(true)
            .enumerate_arrays(false);
        let contents = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn with_camera(mut self, camera: Camera) -> Self {
        self.camera = camera;
        self
    }

    pub fn with_color_max(mut self, color_max: f32) -> Self {
        self.color_max = color_max;
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn with_skybox(mut self, len: f32) -> Self {
        self.skybox = Some(len);
        self
    }

    pub fn with_hypergrid(mut self, grid: HypergridTemplate) -> Self {
        self.hypergrid = Some(grid);
        self
    }

    pub fn add_shape(&mut self, shape: ShapeInstance) {
        self.shapes.push(shape);
    }
}

/// Runtime scene owned by the caller
#[derive(Clone, Debug)]
pub struct Scene {
    pub name: String,
    pub shapes: BTreeMap<usize, Shape>,
    pub camera: Camera,
    pub color_max: f32,
    pub lighting: Lighting,
    /// Id of the shape that follows the camera, if any
    pub skybox: Option<usize>,
    next_id: usize,
}

impl Scene {
    /// Create an empty scene
    pub fn new(name: impl Into<String>, camera: Camera, color_max: f32) -> Self {
        Self {
            name: name.into(),
            shapes: BTreeMap::new(),
            camera,
            color_max,
            lighting: Lighting::default(),
            skybox: None,
            next_id: 0,
        }
    }

    /// Instantiate every shape of a template
    ///
    /// Shapes get ids in template order, then the hypergrid cubes in key
    /// order, then the skybox.
    pub fn from_template(template: &SceneTemplate) -> Result<Self, ShapeError> {
        let mut scene = Self::new(template.name.clone(), template.camera, template.color_max);
        scene.lighting = template.lighting;

        for instance in &template.shapes {
            scene.add_shape(instance.create_shape()?);
        }

        if let Some(grid) = &template.hypergrid {
            let [x, y, z, w] = grid.position;
            let cubes = make_cube_hypergrid(grid.dims, grid.res, &grid.spissitudes, Vec5::point(x, y, z, w))?;
            for cube in cubes.into_values() {
                scene.add_shape(cube);
            }
        }

        if let Some(len) = template.skybox {
            scene.set_skybox(make_skybox(len, Vec5::ORIGIN)?);
        }

        log::debug!("Instantiated scene '{}' with {} shapes", scene.name, scene.shapes.len());
        Ok(scene)
    }

    /// Load a RON template and instantiate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SceneLoadError> {
        let template = SceneTemplate::load(path)?;
        Ok(Self::from_template(&template)?)
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    /// Add a shape under the next free id
    pub fn add_shape(&mut self, shape: Shape) -> usize {
        let id = self.next_id;
        self.shapes.insert(id, shape);
        self.next_id += 1;
        id
    }

    /// Insert a shape under a chosen id, replacing any shape already there
    pub fn insert_shape(&mut self, id: usize, shape: Shape) -> Option<Shape> {
        self.next_id = self.next_id.max(id + 1);
        self.shapes.insert(id, shape)
    }

    /// Remove a shape, clearing the skybox if it was the one removed
    pub fn remove_shape(&mut self, id: usize) -> Option<Shape> {
        if self.skybox == Some(id) {
            self.skybox = None;
        }
        self.shapes.remove(&id)
    }

    /// Add a shape and mark it as the skybox
    pub fn set_skybox(&mut self, shape: Shape) -> usize {
        if let Some(old) = self.skybox.take() {
            self.shapes.remove(&old);
        }
        let id = self.add_shape(shape);
        self.skybox = Some(id);
        id
    }

    pub fn shape(&self, id: usize) -> Option<&Shape> {
        self.shapes.get(&id)
    }

    pub fn shape_mut(&mut self, id: usize) -> Option<&mut Shape> {
        self.shapes.get_mut(&id)
    }

    #[inline]
    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    /// Advance every shape's orientation by its rotation speed
    pub fn tick(&mut self) {
        for shape in self.shapes.values_mut() {
            shape.tick();
        }
    }
}

/// Error loading a scene
#[derive(Debug)]
pub enum SceneLoadError {
    /// IO error (file not found, permission denied, etc.)
    Io(io::Error),
    /// Parse error (invalid RON syntax)
    Parse(ron::error::SpannedError),
    /// The template parsed but a shape could not be built
    Shape(ShapeError),
}

impl From<io::Error> for SceneLoadError {
    fn from(e: io::Error) -> Self {
        SceneLoadError::Io(e)
    }
}

impl From<ron::error::SpannedError> for SceneLoadError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneLoadError::Parse(e)
    }
}

impl From<ShapeError> for SceneLoadError {
    fn from(e: ShapeError) -> Self {
        SceneLoadError::Shape(e)
    }
}

impl std::fmt::Display for SceneLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneLoadError::Io(e) => write!(f, "IO error: {}", e),
            SceneLoadError::Parse(e) => write!(f, "Parse error: {}", e),
            SceneLoadError::Shape(e) => write!(f, "Shape error: {}", e),
        }
    }
}

impl std::error::Error for SceneLoadError {}

/// Error saving a scene
#[derive(Debug)]
pub enum SceneSaveError {
    /// IO error (permission denied, disk full, etc.)
    Io(io::Error),
    /// Serialization error
    Serialize(ron::Error),
}

impl From<io::Error> for SceneSaveError {
    fn from(e: io::Error) -> Self {
        SceneSaveError::Io(e)
    }
}

impl From<ron::Error> for SceneSaveError {
    fn from(e: ron::Error) -> Self {
        SceneSaveError::Serialize(e)
    }
}

impl std::fmt::Display for SceneSaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneSaveError::Io(e) => write!(f, "IO error: {}", e),
            SceneSaveError::Serialize(e) => write!(f, "Serialize error: {}", e),
        }
    }
}

impl std::error::Error for SceneSaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::ShapeTemplate;
    use crate::generators::make_cube;
    use hyperscope_math::Orientation;

    fn cube() -> Shape {
        make_cube(1.0, Vec5::ORIGIN, Orientation::ZERO, Orientation::ZERO).unwrap()
    }

    #[test]
    fn test_add_shape_assigns_dense_ids() {
        let mut scene = Scene::new("Test", Camera::default(), 1.0);
        assert_eq!(scene.add_shape(cube()), 0);
        assert_eq!(scene.add_shape(cube()), 1);
        scene.insert_shape(10, cube());
        assert_eq!(scene.add_shape(cube()), 11);
        assert_eq!(scene.shape_count(), 4);
    }

    #[test]
    fn test_set_skybox_replaces_previous() {
        let mut scene = Scene::new("Test", Camera::default(), 1.0);
        scene.add_shape(cube());
        let first = scene.set_skybox(cube());
        let second = scene.set_skybox(cube());
        assert_ne!(first, second);
        assert!(scene.shape(first).is_none());
        assert_eq!(scene.skybox, Some(second));
        assert_eq!(scene.shape_count(), 2);

        scene.remove_shape(second);
        assert_eq!(scene.skybox, None);
    }

    #[test]
    fn test_tick_advances_all_shapes() {
        let mut scene = Scene::new("Test", Camera::default(), 1.0);
        let speed = Orientation { zw: 0.25, ..Orientation::ZERO };
        let id = scene.add_shape(make_cube(1.0, Vec5::ORIGIN, Orientation::ZERO, speed).unwrap());
        scene.tick();
        scene.tick();
        assert_eq!(scene.shape(id).unwrap().orientation.zw, 0.5);
    }

    #[test]
    fn test_from_template_orders_ids() {
        let mut template = SceneTemplate::new("Grid")
            .with_color_max(30.0)
            .with_skybox(100.0)
            .with_hypergrid(HypergridTemplate {
                dims: [2.0, 2.0, 2.0],
                res: 2,
                spissitudes: vec![vec![vec![0.0; 2]; 2]; 2],
                position: [0.0; 4],
            });
        template.add_shape(ShapeInstance::new(ShapeTemplate::hypercube(1.0), [0.0, 0.0, 5.0, 0.0]));

        let scene = Scene::from_template(&template).unwrap();
        assert_eq!(scene.shape_count(), 1 + 8 + 1);
        assert_eq!(scene.shape(0).unwrap().mesh.node_count(), 16);
        assert_eq!(scene.skybox, Some(9));
        assert_eq!(scene.color_max, 30.0);
    }

    #[test]
    fn test_from_template_fails_on_bad_shape() {
        let mut template = SceneTemplate::new("Bad");
        template.add_shape(ShapeInstance::new(
            ShapeTemplate::Terrain {
                dims: [1.0, 1.0],
                res: 2,
                heights: vec![vec![0.0, f32::NAN], vec![0.0, 0.0]],
                spissitudes: vec![vec![0.0; 2]; 2],
            },
            [0.0; 4],
        ));
        let err = Scene::from_template(&template).unwrap_err();
        assert_eq!(err, ShapeError::MissingValue { grid: "height", index: vec![0, 1] });
    }

    #[test]
    fn test_template_serialization() {
        let mut template = SceneTemplate::new("Test Scene").with_color_max(10.0).with_skybox(50.0);
        template.add_shape(
            ShapeInstance::new(ShapeTemplate::cube(1.0), [2.0, 0.0, 5.0, 2.0])
                .with_rotation_speed([0.002, 0.0, 0.0, 0.0, 0.0, 0.0]),
        );

        let pretty = ron::ser::PrettyConfig::new().struct_names(true);
        let serialized = ron::ser::to_string_pretty(&template, pretty).unwrap();
        assert!(serialized.contains("Test Scene"));
        assert!(serialized.contains("Cube"));

        let deserialized: SceneTemplate = ron::from_str(&serialized).unwrap();
        assert_eq!(deserialized.name, "Test Scene");
        assert_eq!(deserialized.color_max, 10.0);
        assert_eq!(deserialized.skybox, Some(50.0));
        assert_eq!(deserialized.shapes, template.shapes);
        assert_eq!(deserialized.camera, template.camera);
    }

    #[test]
    fn test_parse_minimal_scene() {
        let scene_ron = r#"
SceneTemplate(
    name: "Minimal",
    shapes: [
        (
            template: (type: "FiveCell", radius: 1.5),
            position: (0.0, 0.0, 3.0, 0.0),
            rotation_speed: (xy: 0.0, yz: 0.0, xz: 0.0, xw: 0.001, yw: 0.0, zw: 0.0),
        ),
    ],
)
"#;
        let template: SceneTemplate = ron::from_str(scene_ron).unwrap();
        assert_eq!(template.color_max, 15.0);
        assert_eq!(template.camera, Camera::default());
        assert_eq!(template.shapes[0].template, ShapeTemplate::FiveCell { radius: 1.5 });
        assert_eq!(template.shapes[0].rotation_speed.xw, 0.001);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scene::load("/nonexistent/scene.ron").unwrap_err();
        assert!(matches!(err, SceneLoadError::Io(_)));
    }
}
