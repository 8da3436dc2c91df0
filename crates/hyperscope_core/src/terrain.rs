//! Grid-driven generators: heightmap terrain and the cube hypergrid
//!
//! Both take scalar grids that must match the requested resolution exactly.
//! A grid is checked in full before any node is built, so a bad value never
//! reaches a shape.

use std::collections::BTreeMap;

use rand::Rng;
use hyperscope_math::{Orientation, Vec5};

use crate::error::ShapeError;
use crate::generators::make_cube;
use crate::mesh::{Edge, Mesh};
use crate::shape::Shape;

/// Map a grid index onto a value range centred on zero
///
/// `i / res` of the way across a span of `range.1 - range.0`, shifted so the
/// span is centred. Only the width of the range matters.
pub fn value_from_grid(i: usize, res: usize, range: (f32, f32)) -> f32 {
    let span = range.1 - range.0;
    (i as f32 / res as f32) * span - span / 2.0
}

/// Coordinate of grid line `i` of `res` lines spread evenly over `len`, centred
fn grid_line(i: usize, res: usize, len: f32) -> f32 {
    if res < 2 {
        0.0
    } else {
        -len / 2.0 + i as f32 * len / (res - 1) as f32
    }
}

fn check_len(grid: &'static str, expected: usize, found: usize) -> Result<(), ShapeError> {
    if expected == found {
        Ok(())
    } else {
        Err(ShapeError::GridDimensions { grid, expected, found })
    }
}

fn check_grid_2d(grid: &'static str, values: &[Vec<f32>], res: usize) -> Result<(), ShapeError> {
    check_len(grid, res, values.len())?;
    for (i, row) in values.iter().enumerate() {
        check_len(grid, res, row.len())?;
        if let Some(j) = row.iter().position(|v| !v.is_finite()) {
            return Err(ShapeError::MissingValue { grid, index: vec![i, j] });
        }
    }
    Ok(())
}

fn check_grid_3d(grid: &'static str, values: &[Vec<Vec<f32>>], res: usize) -> Result<(), ShapeError> {
    check_len(grid, res, values.len())?;
    for (i, plane) in values.iter().enumerate() {
        check_grid_2d(grid, plane, res).map_err(|e| match e {
            ShapeError::MissingValue { grid, index } => {
                let mut full = vec![i];
                full.extend(index);
                ShapeError::MissingValue { grid, index: full }
            }
            other => other,
        })?;
    }
    Ok(())
}

/// Roughen a square grid with random rectangular bumps
///
/// Each of `depth` passes picks a random square region anchored inside a
/// random working size and offsets every cell in it by a value in
/// `[-roughness, roughness]`. Overlapping passes build up hills and valleys.
pub fn fractal_heightmap<R: Rng>(
    map: &mut [Vec<f32>],
    roughness: f32,
    depth: usize,
    rng: &mut R,
) {
    let size = map.len() as f32;
    for _ in 0..depth {
        let working = size * rng.gen::<f32>();
        let lower_x = working * rng.gen::<f32>();
        let lower_z = working * rng.gen::<f32>();

        for (i, row) in map.iter_mut().enumerate() {
            if (i as f32) < lower_x || (i as f32) > working {
                continue;
            }
            for (j, value) in row.iter_mut().enumerate() {
                if (j as f32) >= lower_z && (j as f32) <= working {
                    *value += rng.gen_range(-1.0f32..=1.0) * roughness;
                }
            }
        }
    }
}

/// Square heightmap terrain
///
/// `dims` is the `[x, z]` extent, centred on the local origin. Node
/// `i * res + j` sits on grid line `i` along x and `j` along z, with its
/// height from `heights[i][j]` and its fourth coordinate from
/// `spissitudes[i][j]`. Each cell between four neighbouring nodes becomes a
/// quad face, so `res = 10` gives 100 nodes and 81 faces. Normals face +y.
pub fn make_terrain(
    dims: [f32; 2],
    res: usize,
    heights: &[Vec<f32>],
    spissitudes: &[Vec<f32>],
    position: Vec5,
) -> Result<Shape, ShapeError> {
    check_grid_2d("height", heights, res)?;
    check_grid_2d("spissitude", spissitudes, res)?;

    let mut nodes = Vec::with_capacity(res * res);
    for i in 0..res {
        let x = grid_line(i, res, dims[0]);
        for j in 0..res {
            let z = grid_line(j, res, dims[1]);
            nodes.push(Vec5::direction(x, heights[i][j], z, spissitudes[i][j]));
        }
    }

    let cells = res.saturating_sub(1);
    let mut edges = Vec::with_capacity(2 * res * cells);
    let mut faces = Vec::with_capacity(cells * cells);
    for i in 0..res {
        for j in 0..res {
            let id = i * res + j;
            if j + 1 < res {
                edges.push(Edge::new(id, id + 1));
            }
            if i + 1 < res {
                edges.push(Edge::new(id, id + res));
            }
            if i + 1 < res && j + 1 < res {
                faces.push(vec![id, id + 1, id + res + 1, id + res]);
            }
        }
    }

    let mut mesh = Mesh::new(nodes, edges, faces)?;
    mesh.orient_normals_towards(Vec5::Y);

    log::debug!("Built terrain {}x{} over {:?}", res, res, dims);
    Ok(Shape::new(mesh, position, Orientation::ZERO, Orientation::ZERO))
}

/// 3D lattice of small cubes, one per grid cell
///
/// Cube `(i, j, k)` is keyed `res² * i + res * j + k` and sits at the centre
/// of its cell within the `dims` volume. Its fourth coordinate is
/// `spissitudes[i][j][k]`. Cube sides are half the smallest cell pitch so
/// neighbours never touch. Everything is offset by `position`.
pub fn make_cube_hypergrid(
    dims: [f32; 3],
    res: usize,
    spissitudes: &[Vec<Vec<f32>>],
    position: Vec5,
) -> Result<BTreeMap<usize, Shape>, ShapeError> {
    check_grid_3d("spissitude", spissitudes, res)?;

    let mut shapes = BTreeMap::new();
    if res == 0 {
        return Ok(shapes);
    }

    let pitch = dims.map(|d| d / res as f32);
    let side = 0.5 * pitch.iter().fold(f32::INFINITY, |a, &b| a.min(b.abs()));
    let cell_centre = |axis: usize, i: usize| {
        value_from_grid(i, res, (0.0, dims[axis])) + pitch[axis] / 2.0
    };

    for i in 0..res {
        for j in 0..res {
            for k in 0..res {
                let offset = Vec5::direction(
                    cell_centre(0, i),
                    cell_centre(1, j),
                    cell_centre(2, k),
                    spissitudes[i][j][k],
                );
                let cube = make_cube(side, position + offset, Orientation::ZERO, Orientation::ZERO)?;
                shapes.insert(res * res * i + res * j + k, cube);
            }
        }
    }

    log::debug!("Built hypergrid of {} cubes", shapes.len());
    Ok(shapes)
}
