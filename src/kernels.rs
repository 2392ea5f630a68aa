use rayon::prelude::*;

use crate::timer::Timer;
use crate::{
    ExecutionContext, Field2D, Grid, PhysicalParameters, SimulationState, WorkingPrecision,
};

/// Copies the south row into the north ghost row and the west column into
/// the east ghost column of a single field. Interior cells are untouched.
///
/// Columns are wrapped before rows so the north-east corner ends up equal
/// to the south-west cell.
pub fn exchange_field_halo(
    field: &mut Field2D<WorkingPrecision>,
    periodic_north_south: bool,
    periodic_east_west: bool,
) {
    if periodic_east_west {
        let last_column = field.cols() - 1;
        field.copy_column(0, last_column);
    }

    if periodic_north_south {
        let last_row = field.rows() - 1;
        field.copy_row(0, last_row);
    }
}

pub fn halo_exchange_kernel(
    grid: &Grid,
    simulation_state: &mut SimulationState,
    kernel_timer: &mut Timer,
) {
    let periodic_ns = grid.periodic_north_south();
    let periodic_ew = grid.periodic_east_west();

    kernel_timer.start();

    if periodic_ns || periodic_ew {
        exchange_field_halo(&mut simulation_state.eta, periodic_ns, periodic_ew);
        exchange_field_halo(&mut simulation_state.u, periodic_ns, periodic_ew);
        exchange_field_halo(&mut simulation_state.v, periodic_ns, periodic_ew);
    }

    kernel_timer.stop();
}

/// Advances `u` and `v` by one step from the current `eta`, `u` and `v`.
///
/// Faces normal to a wall are written as exactly zero. Ghost rows and
/// columns are left for the halo exchange.
pub fn momentum_kernel(
    grid: &Grid,
    params: &PhysicalParameters,
    context: &ExecutionContext,
    simulation_state: &mut SimulationState,
    kernel_timer: &mut Timer,
) {
    let nx = grid.nx;
    let ny = grid.ny;
    let dx = grid.dx;
    let dy = grid.dy;
    let periodic_ns = grid.periodic_north_south();
    let periodic_ew = grid.periodic_east_west();

    let PhysicalParameters { dt, g, f, r } = *params;

    let eta = &simulation_state.eta;
    let u = &simulation_state.u;
    let v = &simulation_state.v;
    let u_next = &mut simulation_state.u_next;
    let v_next = &mut simulation_state.v_next;

    let u_cols = u.cols();
    let v_cols = v.cols();

    kernel_timer.start();

    context.install(|| {
        u_next
            .as_mut_slice()
            .par_chunks_mut(u_cols)
            .enumerate()
            .for_each(|(jj, u_row)| {
                // North ghost row
                if jj >= ny {
                    return;
                }

                for ji in 0..=nx {
                    if !periodic_ew && (ji == 0 || ji == nx) {
                        u_row[ji] = 0.0;
                        continue;
                    }

                    // East ghost column
                    if ji == nx {
                        continue;
                    }

                    let ji_w = if ji == 0 { nx - 1 } else { ji - 1 };

                    let v_m = 0.25
                        * (v.get(jj, ji_w) + v.get(jj, ji) + v.get(jj + 1, ji_w) + v.get(jj + 1, ji));
                    let deta_dx = (eta.get(jj, ji) - eta.get(jj, ji_w)) / dx;
                    let u_old = u.get(jj, ji);

                    u_row[ji] = u_old + dt * (f * v_m - g * deta_dx - r * u_old);
                }
            });

        v_next
            .as_mut_slice()
            .par_chunks_mut(v_cols)
            .enumerate()
            .for_each(|(jj, v_row)| {
                if !periodic_ns && (jj == 0 || jj == ny) {
                    v_row.iter_mut().for_each(|value| *value = 0.0);
                    return;
                }

                // North ghost row
                if jj == ny {
                    return;
                }

                let jj_s = if jj == 0 { ny - 1 } else { jj - 1 };

                for ji in 0..nx {
                    let u_m = 0.25
                        * (u.get(jj_s, ji) + u.get(jj_s, ji + 1) + u.get(jj, ji) + u.get(jj, ji + 1));
                    let deta_dy = (eta.get(jj, ji) - eta.get(jj_s, ji)) / dy;
                    let v_old = v.get(jj, ji);

                    v_row[ji] = v_old + dt * (-f * u_m - g * deta_dy - r * v_old);
                }
            });
    });

    simulation_state.swap_velocities();

    kernel_timer.stop();
}

/// Advances `eta` from the flux divergence of the freshly updated `u` and
/// `v`. Must only run after `momentum_kernel` and a halo exchange.
///
/// On periodic axes the ghost row/column of the result holds the wrapped
/// interior, so the state is halo-consistent at every step boundary.
pub fn continuity_kernel(
    grid: &Grid,
    params: &PhysicalParameters,
    context: &ExecutionContext,
    simulation_state: &mut SimulationState,
    kernel_timer: &mut Timer,
) {
    let nx = grid.nx;
    let ny = grid.ny;
    let dx = grid.dx;
    let dy = grid.dy;
    let dt = params.dt;
    let periodic_ns = grid.periodic_north_south();
    let periodic_ew = grid.periodic_east_west();

    let h = &simulation_state.h;
    let eta = &simulation_state.eta;
    let u = &simulation_state.u;
    let v = &simulation_state.v;
    let eta_next = &mut simulation_state.eta_next;

    let eta_cols = eta.cols();

    // Volume flux through the u face west of cell (jj, ji)
    let flux_x = |jj: usize, ji: usize| -> WorkingPrecision {
        if !periodic_ew && (ji == 0 || ji == nx) {
            return 0.0;
        }
        let ji_w = if ji == 0 { nx - 1 } else { ji - 1 };
        let depth =
            0.5 * (h.get(jj, ji_w) + eta.get(jj, ji_w) + h.get(jj, ji) + eta.get(jj, ji));
        depth * u.get(jj, ji)
    };

    // Volume flux through the v face south of cell (jj, ji)
    let flux_y = |jj: usize, ji: usize| -> WorkingPrecision {
        if !periodic_ns && (jj == 0 || jj == ny) {
            return 0.0;
        }
        let jj_s = if jj == 0 { ny - 1 } else { jj - 1 };
        let depth =
            0.5 * (h.get(jj_s, ji) + eta.get(jj_s, ji) + h.get(jj, ji) + eta.get(jj, ji));
        depth * v.get(jj, ji)
    };

    kernel_timer.start();

    context.install(|| {
        eta_next
            .as_mut_slice()
            .par_chunks_mut(eta_cols)
            .enumerate()
            .for_each(|(jj, eta_row)| {
                if jj >= ny {
                    return;
                }

                for ji in 0..nx {
                    let dflux_dx = (flux_x(jj, ji + 1) - flux_x(jj, ji)) / dx;
                    let dflux_dy = (flux_y(jj + 1, ji) - flux_y(jj, ji)) / dy;

                    eta_row[ji] = eta.get(jj, ji) - dt * (dflux_dx + dflux_dy);
                }
            });
    });

    // New elevation leaves the step with its ghosts already wrapped
    exchange_field_halo(eta_next, periodic_ns, periodic_ew);

    simulation_state.swap_elevation();

    kernel_timer.stop();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoundaryConditions;
    use approx::assert_relative_eq;

    fn state_for(grid: &Grid, depth: WorkingPrecision) -> SimulationState {
        let (eta_rows, eta_cols) = grid.eta_shape();
        let (u_rows, u_cols) = grid.u_shape();
        let (v_rows, v_cols) = grid.v_shape();

        let mut h = Field2D::zeros(eta_rows, eta_cols);
        h.set_all(depth);

        SimulationState::new(
            grid,
            h,
            Field2D::zeros(eta_rows, eta_cols),
            Field2D::zeros(u_rows, u_cols),
            Field2D::zeros(v_rows, v_cols),
        )
        .unwrap()
    }

    fn params() -> PhysicalParameters {
        PhysicalParameters {
            dt: 1.0,
            g: 10.0,
            f: 0.0,
            r: 0.0,
        }
    }

    #[test]
    fn halo_copies_first_row_and_column() {
        let mut field = Field2D::from_vec(3, 4, (0..12).map(|x| x as f32).collect()).unwrap();
        exchange_field_halo(&mut field, true, true);

        assert_eq!(field.get(0, 3), field.get(0, 0));
        assert_eq!(field.get(1, 3), field.get(1, 0));
        assert_eq!(field.row(2), field.row(0));
        assert_eq!(field.get(2, 3), 0.0);
        // Interior untouched
        assert_eq!(field.get(1, 1), 5.0);
    }

    #[test]
    fn halo_leaves_wall_axes_alone() {
        let original = Field2D::from_vec(3, 4, (0..12).map(|x| x as f32).collect()).unwrap();
        let mut field = original.clone();
        exchange_field_halo(&mut field, false, false);
        assert_eq!(field, original);
    }

    #[test]
    fn momentum_responds_to_elevation_step() {
        let grid = Grid::new(4, 3, 100.0, 100.0, BoundaryConditions::all_wall()).unwrap();
        let context = ExecutionContext::new(1).unwrap();
        let mut timer = Timer::new("Momentum");
        let mut state = state_for(&grid, 50.0);
        state.eta.set(1, 2, 1.0);

        momentum_kernel(&grid, &params(), &context, &mut state, &mut timer);

        // Flow is pushed away from the raised cell
        assert_relative_eq!(state.u.get(1, 2), -0.1);
        assert_relative_eq!(state.u.get(1, 3), 0.1);
        assert_relative_eq!(state.v.get(1, 2), -0.1);
        assert_relative_eq!(state.v.get(2, 2), 0.1);

        for jj in 0..3 {
            assert_eq!(state.u.get(jj, 0), 0.0);
            assert_eq!(state.u.get(jj, 4), 0.0);
        }
        for ji in 0..4 {
            assert_eq!(state.v.get(0, ji), 0.0);
            assert_eq!(state.v.get(3, ji), 0.0);
        }
        assert_eq!(timer.count(), 1);
    }

    #[test]
    fn wall_faces_are_clamped_even_if_initialised_nonzero() {
        let grid = Grid::new(3, 3, 10.0, 10.0, BoundaryConditions::all_wall()).unwrap();
        let context = ExecutionContext::new(1).unwrap();
        let mut timer = Timer::new("Momentum");
        let mut state = state_for(&grid, 10.0);
        state.u.set_all(1.0);
        state.v.set_all(1.0);

        momentum_kernel(&grid, &params(), &context, &mut state, &mut timer);

        assert_eq!(state.u.get(1, 0), 0.0);
        assert_eq!(state.u.get(1, 3), 0.0);
        assert_eq!(state.v.get(0, 1), 0.0);
        assert_eq!(state.v.get(3, 1), 0.0);
        assert_relative_eq!(state.u.get(1, 1), 1.0);
    }

    #[test]
    fn coriolis_rotates_uniform_flow() {
        let grid = Grid::new(4, 4, 10.0, 10.0, BoundaryConditions::all_periodic()).unwrap();
        let context = ExecutionContext::new(1).unwrap();
        let mut timer = Timer::new("Momentum");
        let mut state = state_for(&grid, 10.0);
        state.u.set_all(1.0);

        let params = PhysicalParameters {
            dt: 1.0,
            g: 9.81,
            f: 1.0e-2,
            r: 0.0,
        };
        momentum_kernel(&grid, &params, &context, &mut state, &mut timer);

        // u unchanged, v deflected to -f*u*dt
        assert_relative_eq!(state.u.get(2, 1), 1.0);
        assert_relative_eq!(state.v.get(2, 1), -1.0e-2);
    }

    #[test]
    fn friction_damps_velocity() {
        let grid = Grid::new(4, 4, 10.0, 10.0, BoundaryConditions::all_periodic()).unwrap();
        let context = ExecutionContext::new(1).unwrap();
        let mut timer = Timer::new("Momentum");
        let mut state = state_for(&grid, 10.0);
        state.u.set_all(2.0);

        let params = PhysicalParameters {
            dt: 0.5,
            g: 9.81,
            f: 0.0,
            r: 0.1,
        };
        momentum_kernel(&grid, &params, &context, &mut state, &mut timer);

        assert_relative_eq!(state.u.get(1, 1), 2.0 * (1.0 - 0.05));
    }

    #[test]
    fn continuity_conserves_volume_with_walls() {
        let grid = Grid::new(5, 4, 100.0, 100.0, BoundaryConditions::all_wall()).unwrap();
        let context = ExecutionContext::new(2).unwrap();
        let mut timer = Timer::new("Continuity");
        let mut state = state_for(&grid, 20.0);
        state.u.set(1, 2, 0.3);
        state.v.set(2, 3, -0.2);

        continuity_kernel(&grid, &params(), &context, &mut state, &mut timer);

        let total: f32 = state.eta.iter().sum();
        assert_relative_eq!(total, 0.0, epsilon = 1e-6);

        // Outflow from cell (1, 1) through its east face
        assert_relative_eq!(state.eta.get(1, 1), -20.0 * 0.3 / 100.0);
        assert_relative_eq!(state.eta.get(1, 2), 20.0 * 0.3 / 100.0);
    }

    #[test]
    fn continuity_wraps_flux_across_periodic_edge() {
        let grid = Grid::new(4, 3, 100.0, 100.0, BoundaryConditions::periodic_east_west()).unwrap();
        let context = ExecutionContext::new(1).unwrap();
        let mut timer = Timer::new("Halo");
        let mut continuity_timer = Timer::new("Continuity");
        let mut state = state_for(&grid, 10.0);
        state.u.set(1, 0, 1.0);

        halo_exchange_kernel(&grid, &mut state, &mut timer);
        assert_eq!(state.u.get(1, 4), 1.0);

        continuity_kernel(&grid, &params(), &context, &mut state, &mut continuity_timer);

        // Eastward flow through the west edge empties the last cell into the first
        assert_relative_eq!(state.eta.get(1, 3), -0.1);
        assert_relative_eq!(state.eta.get(1, 0), 0.1);
    }

    #[test]
    fn continuity_result_has_wrapped_ghosts() {
        let grid = Grid::new(4, 3, 100.0, 100.0, BoundaryConditions::all_periodic()).unwrap();
        let context = ExecutionContext::new(2).unwrap();
        let mut halo_timer = Timer::new("Halo");
        let mut continuity_timer = Timer::new("Continuity");
        let mut state = state_for(&grid, 10.0);
        state.u.set(0, 0, 1.0);
        state.v.set(1, 3, -0.5);

        // Two steps, so the scratch buffer's stale ghosts would surface
        for _ in 0..2 {
            halo_exchange_kernel(&grid, &mut state, &mut halo_timer);
            continuity_kernel(&grid, &params(), &context, &mut state, &mut continuity_timer);

            for jj in 0..state.eta.rows() {
                assert_eq!(state.eta.get(jj, 4).to_bits(), state.eta.get(jj, 0).to_bits());
            }
            assert_eq!(state.eta.row(3), state.eta.row(0));
        }
        assert!(state.eta.get(0, 0) != 0.0);
    }
}
