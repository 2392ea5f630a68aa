use std::ops::Range;

use crate::{BoundaryConditions, SimulationError, WorkingPrecision};

/// Ghost rows/columns on each side of the cell-centred fields.
///
/// A periodic axis carries a single wrap row (or column) on its trailing
/// edge, north for y and east for x. South and west are the donor edges
/// and never hold ghosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ghosts {
    pub north: usize,
    pub east: usize,
    pub south: usize,
    pub west: usize,
}

impl Ghosts {
    pub fn from_boundary_conditions(bc: &BoundaryConditions) -> Self {
        Ghosts {
            north: bc.is_periodic_north_south() as usize,
            east: bc.is_periodic_east_west() as usize,
            south: 0,
            west: 0,
        }
    }

    pub fn north_south(&self) -> usize {
        self.north + self.south
    }

    pub fn east_west(&self) -> usize {
        self.east + self.west
    }
}

/// Index ranges of the non-duplicated cells of a field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteriorRange {
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

#[derive(Clone, Debug)]
pub struct Grid {
    pub nx: usize,
    pub ny: usize,

    // Cell size in x direction (in meters)
    pub dx: WorkingPrecision,

    // Cell size in y direction (in meters)
    pub dy: WorkingPrecision,

    boundary_conditions: BoundaryConditions,
    ghosts: Ghosts,
}

impl Grid {
    pub fn new(
        nx: usize,
        ny: usize,
        dx: WorkingPrecision,
        dy: WorkingPrecision,
        boundary_conditions: BoundaryConditions,
    ) -> Result<Self, SimulationError> {
        boundary_conditions.validate()?;

        if nx < 2 || ny < 2 {
            return Err(SimulationError::configuration(format!(
                "grid must be at least 2x2 cells, got {}x{}",
                nx, ny
            )));
        }

        if !(dx > 0.0 && dy > 0.0 && dx.is_finite() && dy.is_finite()) {
            return Err(SimulationError::configuration(format!(
                "cell spacing must be positive, got dx={} dy={}",
                dx, dy
            )));
        }

        Ok(Grid {
            nx,
            ny,
            dx,
            dy,
            boundary_conditions,
            ghosts: Ghosts::from_boundary_conditions(&boundary_conditions),
        })
    }

    pub fn boundary_conditions(&self) -> &BoundaryConditions {
        &self.boundary_conditions
    }

    pub fn ghosts(&self) -> Ghosts {
        self.ghosts
    }

    pub fn periodic_north_south(&self) -> bool {
        self.boundary_conditions.is_periodic_north_south()
    }

    pub fn periodic_east_west(&self) -> bool {
        self.boundary_conditions.is_periodic_east_west()
    }

    /// Shape of `eta` and `h`.
    pub fn eta_shape(&self) -> (usize, usize) {
        (
            self.ny + self.ghosts.north_south(),
            self.nx + self.ghosts.east_west(),
        )
    }

    /// `u` already spans `nx + 1` faces so it never gains ghost columns.
    pub fn u_shape(&self) -> (usize, usize) {
        (self.ny + self.ghosts.north_south(), self.nx + 1)
    }

    /// `v` already spans `ny + 1` faces so it never gains ghost rows.
    pub fn v_shape(&self) -> (usize, usize) {
        (self.ny + 1, self.nx + self.ghosts.east_west())
    }

    pub fn eta_interior(&self) -> InteriorRange {
        InteriorRange {
            rows: 0..self.ny,
            cols: 0..self.nx,
        }
    }

    pub fn u_interior(&self) -> InteriorRange {
        InteriorRange {
            rows: 0..self.ny,
            cols: 0..self.nx + 1,
        }
    }

    pub fn v_interior(&self) -> InteriorRange {
        InteriorRange {
            rows: 0..self.ny + 1,
            cols: 0..self.nx,
        }
    }

    pub fn cell_area(&self) -> WorkingPrecision {
        self.dx * self.dy
    }

    pub fn x_centre(&self, i: usize) -> WorkingPrecision {
        self.dx * (i as WorkingPrecision + 0.5)
    }

    pub fn y_centre(&self, j: usize) -> WorkingPrecision {
        self.dy * (j as WorkingPrecision + 0.5)
    }
}
