use crate::field_2d::Field2D;
use crate::{Grid, InteriorRange, SimulationError, WorkingPrecision};

pub fn field_checksum(field: &Field2D<WorkingPrecision>) -> WorkingPrecision {
    field.iter().map(|value| value.abs()).sum()
}

/// L2 norm of `a - b`, used to compare fields against a reference.
pub fn l2_difference(
    a: &Field2D<WorkingPrecision>,
    b: &Field2D<WorkingPrecision>,
) -> Result<WorkingPrecision, SimulationError> {
    if a.shape() != b.shape() {
        return Err(SimulationError::shape_mismatch(
            "comparison field",
            a.shape(),
            b.shape(),
        ));
    }

    let sum_sq: f64 = a
        .iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let diff = f64::from(*x - *y);
            diff * diff
        })
        .sum();

    Ok(sum_sq.sqrt() as WorkingPrecision)
}

/// Displaced volume over the interior cells.
pub fn total_volume(grid: &Grid, eta: &Field2D<WorkingPrecision>) -> f64 {
    let InteriorRange { rows, cols } = grid.eta_interior();
    let sum: f64 = rows
        .map(|jj| {
            eta.row(jj)[cols.clone()]
                .iter()
                .map(|value| f64::from(*value))
                .sum::<f64>()
        })
        .sum();

    sum * f64::from(grid.cell_area())
}
