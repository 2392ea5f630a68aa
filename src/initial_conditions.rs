//! Host-side builders for initial fields.

use std::f32::consts::PI;

use crate::kernels::exchange_field_halo;
use crate::{Field2D, Grid, InitialBump, WorkingPrecision};

pub fn constant_depth(grid: &Grid, depth: WorkingPrecision) -> Field2D<WorkingPrecision> {
    let (rows, cols) = grid.eta_shape();
    let mut h = Field2D::zeros(rows, cols);
    h.set_all(depth);
    h
}

pub fn zero_u(grid: &Grid) -> Field2D<WorkingPrecision> {
    let (rows, cols) = grid.u_shape();
    Field2D::zeros(rows, cols)
}

pub fn zero_v(grid: &Grid) -> Field2D<WorkingPrecision> {
    let (rows, cols) = grid.v_shape();
    Field2D::zeros(rows, cols)
}

pub fn bump(
    grid: &Grid,
    kind: InitialBump,
    amplitude: WorkingPrecision,
    radius_cells: WorkingPrecision,
) -> Field2D<WorkingPrecision> {
    match kind {
        InitialBump::Central => central_bump(grid, amplitude, radius_cells),
        InitialBump::Corner => corner_bump(grid, amplitude, radius_cells),
    }
}

/// Cosine bell centred on the middle of the domain. The field is mirror
/// symmetric in both index directions.
pub fn central_bump(
    grid: &Grid,
    amplitude: WorkingPrecision,
    radius_cells: WorkingPrecision,
) -> Field2D<WorkingPrecision> {
    let x_centre = 0.5 * grid.dx * grid.nx as WorkingPrecision;
    let y_centre = 0.5 * grid.dy * grid.ny as WorkingPrecision;

    cosine_bell(grid, amplitude, radius_cells, |ji, jj| {
        (grid.x_centre(ji) - x_centre, grid.y_centre(jj) - y_centre)
    })
}

/// Cosine bell centred on the south-west corner. On periodic axes the
/// distance is taken to the nearest periodic image, so the bump wraps.
pub fn corner_bump(
    grid: &Grid,
    amplitude: WorkingPrecision,
    radius_cells: WorkingPrecision,
) -> Field2D<WorkingPrecision> {
    let width = grid.dx * grid.nx as WorkingPrecision;
    let height = grid.dy * grid.ny as WorkingPrecision;
    let periodic_ew = grid.periodic_east_west();
    let periodic_ns = grid.periodic_north_south();

    cosine_bell(grid, amplitude, radius_cells, |ji, jj| {
        let mut x = grid.x_centre(ji);
        let mut y = grid.y_centre(jj);
        if periodic_ew && x > 0.5 * width {
            x -= width;
        }
        if periodic_ns && y > 0.5 * height {
            y -= height;
        }
        (x, y)
    })
}

fn cosine_bell<F>(
    grid: &Grid,
    amplitude: WorkingPrecision,
    radius_cells: WorkingPrecision,
    offset: F,
) -> Field2D<WorkingPrecision>
where
    F: Fn(usize, usize) -> (WorkingPrecision, WorkingPrecision),
{
    let (rows, cols) = grid.eta_shape();
    let radius = radius_cells * grid.dx.min(grid.dy);
    let mut eta = Field2D::zeros(rows, cols);

    let interior = grid.eta_interior();
    for jj in interior.rows {
        for ji in interior.cols.clone() {
            let (x, y) = offset(ji, jj);
            let distance = (x * x + y * y).sqrt();
            if distance < radius {
                eta.set(jj, ji, amplitude * 0.5 * (1.0 + (PI * distance / radius).cos()));
            }
        }
    }

    exchange_field_halo(
        &mut eta,
        grid.periodic_north_south(),
        grid.periodic_east_west(),
    );

    eta
}
