//! Built-in scene presets
//!
//! Each preset is a [`SceneTemplate`], so it can be saved to RON and edited
//! like any other scene file.

use std::f32::consts::TAU;

use rand::{rngs::StdRng, SeedableRng};

use hyperscope_core::{
    fractal_heightmap, Camera, HypergridTemplate, Lighting, SceneTemplate, ShapeInstance,
    ShapeTemplate, Vec5,
};

/// Names accepted by [`preset`]
pub const NAMES: &[&str] = &[
    "hypercube",
    "five_cell",
    "cube",
    "world",
    "fractal",
    "town",
    "hypergrid",
    "hypergrid_warped",
];

const HEIGHT_MAP: [[f32; 10]; 10] = [
    [1.3, 1.3, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.2, 1.2],
    [1.3, 1.2, 0.0, 0.0, 0.0, 0.0, 0.0, 1.1, 1.2, 1.2],
    [0.0, 1.2, 1.2, 0.0, 0.0, 0.0, 0.0, 1.1, 1.2, 0.0],
    [0.0, 1.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.1, 1.2],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.2],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.2],
    [0.0, 0.0, 0.0, 1.1, 0.0, 0.0, 0.0, 0.0, 1.1, 1.2],
    [0.0, 1.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 1.2, 1.2],
    [0.0, 1.1, 1.1, 1.1, 1.1, 0.0, 1.3, 1.3, 2.4, 2.2],
    [0.0, 1.1, 1.1, 1.1, 1.2, 1.3, 1.3, 1.4, 2.4, 2.8],
];

const SPISSITUDE_MAP: [[f32; 10]; 10] = [
    [5.0, 4.0, 2.0, 1.2, 0.0, 0.0, 1.0, 1.0, 2.0, 2.5],
    [5.0, 3.0, 2.5, 1.2, 0.0, 0.0, 0.0, 0.0, 2.0, 2.5],
    [5.0, 4.0, 2.0, 1.0, 2.0, 0.0, 0.0, 0.0, 2.0, 2.5],
    [4.0, 3.0, 2.0, 1.0, 0.0, 0.0, 0.0, 0.0, 2.0, 2.5],
    [4.0, 4.0, 3.0, 1.0, 0.0, 1.0, 0.0, 0.0, 2.0, 2.5],
    [6.0, 4.0, 3.0, 3.5, 1.0, 0.0, 0.0, 0.0, 2.0, 2.5],
    [6.0, 5.5, 5.0, 3.5, 2.0, 0.0, 1.5, 0.0, 2.0, 2.5],
    [6.0, 5.5, 5.5, 4.0, 2.0, 0.0, 0.0, 1.0, 2.0, 2.5],
    [6.0, 6.0, 6.0, 3.5, 2.0, 0.0, 0.0, 0.0, 2.0, 1.5],
    [7.0, 7.0, 7.0, 3.5, 2.0, 0.0, 0.0, 0.0, 2.0, 2.5],
];

/// Warped slice of the hypergrid spissitude volume
const GRID_WARP: [[f32; 8]; 8] = [
    [1.0, 1.5, 1.5, 1.5, 1.5, 0.0, 0.0, 0.0],
    [1.5, 2.0, 2.5, 2.0, 1.0, 1.0, 0.0, 0.0],
    [1.0, 2.5, 3.0, 2.5, 2.0, 1.0, 0.0, 0.0],
    [1.5, 2.0, 2.5, 2.0, 1.5, 0.0, 0.0, 0.0],
    [1.0, 1.5, 1.5, 1.5, 1.0, 0.0, 0.0, 0.0],
    [1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
    [0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
];

/// Which slices of the 8-deep grid use [`GRID_WARP`]
const WARPED_SLICES: [bool; 8] = [false, true, true, false, false, true, true, false];

const GRID_RES: usize = 8;
const GRID_DIMS: [f32; 3] = [20.0, 20.0, 20.0];

/// Build a preset by name
///
/// `seed` drives the random terrain of the `fractal` preset and is ignored
/// by the others. Returns `None` for unknown names.
pub fn preset(name: &str, seed: u64) -> Option<SceneTemplate> {
    let template = match name {
        "hypercube" => single("Hypercube", ShapeTemplate::hypercube(1.0), Lighting::default()),
        "five_cell" => single("Five-cell", ShapeTemplate::FiveCell { radius: 2.0 }, Lighting::five_cell()),
        "cube" => single("Cube", ShapeTemplate::cube(1.0), cube_lighting()),
        "world" => world(grid_to_vecs(&HEIGHT_MAP), grid_to_vecs(&SPISSITUDE_MAP)),
        "fractal" => fractal(seed),
        "town" => town(),
        "hypergrid" => hypergrid("Hypergrid", false),
        "hypergrid_warped" => hypergrid("Warped hypergrid", true),
        _ => return None,
    };
    Some(template)
}

fn grid_to_vecs<const N: usize>(grid: &[[f32; N]; N]) -> Vec<Vec<f32>> {
    grid.iter().map(|row| row.to_vec()).collect()
}

fn flat_grid(res: usize) -> Vec<Vec<f32>> {
    vec![vec![0.0; res]; res]
}

/// Skybox sized to stay inside the far plane
fn skybox_len(camera: &Camera) -> f32 {
    camera.far / 2.0
}

fn cube_lighting() -> Lighting {
    Lighting {
        diffuse_color: [0.0, 1.0, 0.0, 0.5],
        ..Lighting::default()
    }
}

/// One shape at the origin, viewed from just in front
fn single(name: &str, shape: ShapeTemplate, lighting: Lighting) -> SceneTemplate {
    let camera = Camera::at(Vec5::point(0.0, 0.0, -2.0, 0.0));
    let mut scene = SceneTemplate::new(name)
        .with_camera(camera)
        .with_color_max(1.5)
        .with_lighting(lighting)
        .with_skybox(skybox_len(&camera));
    scene.add_shape(ShapeInstance::new(shape, [0.0; 4]));
    scene
}

fn world(heights: Vec<Vec<f32>>, spissitudes: Vec<Vec<f32>>) -> SceneTemplate {
    world_with_terrain("World", ShapeTemplate::terrain([20.0, 20.0], heights, spissitudes))
}

/// The world scene over random hills
fn fractal(seed: u64) -> SceneTemplate {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut heights = flat_grid(10);
    let mut spissitudes = flat_grid(10);
    fractal_heightmap(&mut heights, 4.0, 30, &mut rng);
    fractal_heightmap(&mut spissitudes, 4.0, 30, &mut rng);
    world_with_terrain(
        "Fractal world",
        ShapeTemplate::terrain([200.0, 200.0], heights, spissitudes),
    )
}

/// Terrain with a handful of shapes scattered across the fourth axis
fn world_with_terrain(name: &str, terrain: ShapeTemplate) -> SceneTemplate {
    let camera = Camera {
        position: Vec5::point(0.0, 2.0, -3.0, 0.0),
        fov: TAU / 4.0,
        ..Camera::default()
    };
    let mut scene = SceneTemplate::new(name)
        .with_camera(camera)
        .with_color_max(10.0)
        .with_skybox(skybox_len(&camera));

    scene.add_shape(ShapeInstance::new(terrain, [0.0; 4]));
    scene.add_shape(ShapeInstance::new(ShapeTemplate::Box { lens: [1.0, 2.0, 1.0] }, [-1.0, 3.0, 4.0, 1.0]));
    scene.add_shape(
        ShapeInstance::new(ShapeTemplate::Pyramid { lens: [2.0, 1.0, 2.0] }, [-2.0, 3.0, 3.0, -1.0])
            .with_orientation([TAU / 6.0, TAU / 3.0, 0.0, 0.0, 0.0, 0.0]),
    );
    scene.add_shape(
        ShapeInstance::new(ShapeTemplate::cube(1.0), [2.0, 0.0, 5.0, 2.0])
            .with_rotation_speed([0.002, 0.0, 0.0, 0.0, 0.0, 0.0]),
    );
    // Same cube further along w
    scene.add_shape(
        ShapeInstance::new(ShapeTemplate::cube(1.0), [2.0, 0.0, 5.0, 10.0])
            .with_rotation_speed([0.002, 0.0, 0.0, 0.0, 0.0, 0.0]),
    );
    scene.add_shape(
        ShapeInstance::new(ShapeTemplate::hypercube(1.0), [3.0, 3.0, 3.0, 0.0])
            .with_rotation_speed([0.0, 0.0, 0.0, 0.002, 0.0005, 0.001]),
    );
    scene.add_shape(ShapeInstance::new(ShapeTemplate::hypercube(1.0), [-3.0, 1.0, 0.0, 1.5]));
    scene
}

/// Flat ground with two streets of houses, one on each side of w = 0
fn town() -> SceneTemplate {
    let camera = Camera {
        position: Vec5::point(0.0, 3.0, -3.0, 0.0),
        fov: TAU / 4.0,
        far: 1000.0,
        ..Camera::default()
    };
    let mut scene = SceneTemplate::new("Town")
        .with_camera(camera)
        .with_color_max(30.0)
        .with_skybox(skybox_len(&camera));

    scene.add_shape(ShapeInstance::new(
        ShapeTemplate::terrain([1000.0, 1000.0], flat_grid(10), flat_grid(10)),
        [0.0; 4],
    ));
    for w in [-2.0, 2.0] {
        for x in [-8.0, 8.0] {
            for z in [0.0, 12.0, 24.0, 36.0] {
                scene.add_shape(ShapeInstance::new(ShapeTemplate::house([4.0, 4.0, 4.0]), [x, 2.0, z, w]));
            }
        }
    }
    scene
}

/// 8x8x8 lattice of cubes centred on the camera
fn hypergrid(name: &str, warped: bool) -> SceneTemplate {
    let camera = Camera {
        position: Vec5::ORIGIN,
        fov: TAU / 4.0,
        far: 1000.0,
        ..Camera::default()
    };

    let flat = flat_grid(GRID_RES);
    let warp = grid_to_vecs(&GRID_WARP);
    let spissitudes = WARPED_SLICES
        .iter()
        .map(|&slice_warped| if warped && slice_warped { warp.clone() } else { flat.clone() })
        .collect();

    SceneTemplate::new(name)
        .with_camera(camera)
        .with_color_max(30.0)
        .with_skybox(skybox_len(&camera))
        .with_hypergrid(HypergridTemplate {
            dims: GRID_DIMS,
            res: GRID_RES,
            spissitudes,
            position: [0.0; 4],
        })
}
