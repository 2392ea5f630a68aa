use crate::kernels::exchange_field_halo;
use crate::{Field2D, Grid, SimulationError, WorkingPrecision};

pub struct SimulationState {
    /// Still-water depth, cell centred and time invariant
    pub h: Field2D<WorkingPrecision>,

    // Current values
    pub eta: Field2D<WorkingPrecision>,
    pub u: Field2D<WorkingPrecision>,
    pub v: Field2D<WorkingPrecision>,

    // Next step's values, swapped in once a kernel completes
    pub eta_next: Field2D<WorkingPrecision>,
    pub u_next: Field2D<WorkingPrecision>,
    pub v_next: Field2D<WorkingPrecision>,
}

impl SimulationState {
    /// Takes ownership of the host arrays after checking them against the
    /// shapes implied by `grid`. Nothing is allocated if any check fails.
    pub fn new(
        grid: &Grid,
        h0: Field2D<WorkingPrecision>,
        eta0: Field2D<WorkingPrecision>,
        u0: Field2D<WorkingPrecision>,
        v0: Field2D<WorkingPrecision>,
    ) -> Result<Self, SimulationError> {
        check_shape("h", &h0, grid.eta_shape())?;
        check_shape("eta", &eta0, grid.eta_shape())?;
        check_shape("u", &u0, grid.u_shape())?;
        check_shape("v", &v0, grid.v_shape())?;

        let mut h = h0;
        exchange_field_halo(
            &mut h,
            grid.periodic_north_south(),
            grid.periodic_east_west(),
        );

        Ok(SimulationState {
            eta_next: eta0.clone(),
            u_next: u0.clone(),
            v_next: v0.clone(),
            h,
            eta: eta0,
            u: u0,
            v: v0,
        })
    }

    /// Copies of the current `(eta, u, v)`.
    pub fn download(
        &self,
    ) -> (
        Field2D<WorkingPrecision>,
        Field2D<WorkingPrecision>,
        Field2D<WorkingPrecision>,
    ) {
        (self.eta.clone(), self.u.clone(), self.v.clone())
    }

    pub fn swap_velocities(&mut self) {
        std::mem::swap(&mut self.u, &mut self.u_next);
        std::mem::swap(&mut self.v, &mut self.v_next);
    }

    pub fn swap_elevation(&mut self) {
        std::mem::swap(&mut self.eta, &mut self.eta_next);
    }
}

fn check_shape(
    field: &'static str,
    values: &Field2D<WorkingPrecision>,
    expected: (usize, usize),
) -> Result<(), SimulationError> {
    if values.shape() != expected {
        return Err(SimulationError::shape_mismatch(
            field,
            expected,
            values.shape(),
        ));
    }
    Ok(())
}
