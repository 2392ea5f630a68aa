#![warn(clippy::all)]

mod app_timers;
mod boundary_conditions;
mod checksum;
mod error;
mod execution_context;
mod field_2d;
mod grid;
mod kernels;
mod model_parameters;
mod simulation;
mod simulation_state;
mod timer;

pub mod initial_conditions;
pub mod output;

pub use app_timers::AppTimers;
pub use boundary_conditions::{BoundaryConditions, BoundaryKind};
pub use checksum::{field_checksum, l2_difference, total_volume};
pub use error::SimulationError;
pub use execution_context::ExecutionContext;
pub use field_2d::{Field2D, Scalar};
pub use grid::{Ghosts, Grid, InteriorRange};
pub use kernels::exchange_field_halo;
pub use model_parameters::{InitialBump, ModelParameters, PhysicalParameters};
pub use simulation::FblSimulation;
pub use simulation_state::SimulationState;
pub use timer::Timer;

pub type WorkingPrecision = f32;

/// Runs the configured scenario end to end, writing a CSV snapshot every
/// `output_interval` seconds of simulated time.
pub fn run_simulation(model_params: &ModelParameters) -> Result<(), SimulationError> {
    log::info!("Model params: {:?}", model_params);

    let grid = model_params.grid()?;
    let params = model_params.physical_parameters()?;
    let bump_kind = model_params.initial_bump()?;
    let context = ExecutionContext::new(model_params.num_threads)?;

    let h0 = initial_conditions::constant_depth(&grid, model_params.depth);
    let eta0 = initial_conditions::bump(
        &grid,
        bump_kind,
        model_params.bump_amplitude,
        model_params.bump_radius_cells,
    );
    let u0 = initial_conditions::zero_u(&grid);
    let v0 = initial_conditions::zero_v(&grid);

    let mut simulation = FblSimulation::new(&context, h0, eta0, u0, v0, grid, params)?;

    log::info!(
        "Initialised {:?} bump on {} threads.",
        bump_kind,
        context.num_threads()
    );

    let initial_volume = total_volume(simulation.grid(), &simulation.download().0);
    output::write_snapshot(&simulation, &model_params.output_prefix)?;

    let end_time = f64::from(model_params.end_time);
    let output_interval = if model_params.output_interval > 0.0 {
        model_params.output_interval
    } else {
        model_params.end_time
    };

    while simulation.time() < end_time {
        let remaining = (end_time - simulation.time()) as WorkingPrecision;
        simulation.step(output_interval.min(remaining));
        output::write_snapshot(&simulation, &model_params.output_prefix)?;
    }

    let (eta, u, v) = simulation.download();
    let final_volume = total_volume(simulation.grid(), &eta);

    log::info!("eta checksum = {:.8E}", field_checksum(&eta));
    log::info!("u checksum = {:.8E}", field_checksum(&u));
    log::info!("v checksum = {:.8E}", field_checksum(&v));
    log::info!(
        "Displaced volume: initial = {:.8E}, final = {:.8E}",
        initial_volume,
        final_volume
    );

    log::info!(
        "Kernel timing report:\n{}",
        simulation.timers().generate_report()
    );

    output::write_timings_csv(simulation.timers(), &model_params.output_prefix)?;

    Ok(())
}
