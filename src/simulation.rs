use crate::app_timers::AppTimers;
use crate::kernels::{continuity_kernel, halo_exchange_kernel, momentum_kernel};
use crate::{
    ExecutionContext, Field2D, Grid, PhysicalParameters, SimulationError, SimulationState,
    WorkingPrecision,
};

/// Forward-backward linear shallow-water integrator on a C-grid.
///
/// No stability checks are made: `dt` must satisfy the linear CFL condition
/// `dt * sqrt(g * max(h)) < min(dx, dy)`, otherwise the fields grow without
/// bound and eventually become non-finite.
pub struct FblSimulation {
    grid: Grid,
    params: PhysicalParameters,
    context: ExecutionContext,
    state: SimulationState,
    timers: AppTimers,

    time: f64,
    num_steps: u64,
}

impl FblSimulation {
    pub fn new(
        context: &ExecutionContext,
        h0: Field2D<WorkingPrecision>,
        eta0: Field2D<WorkingPrecision>,
        u0: Field2D<WorkingPrecision>,
        v0: Field2D<WorkingPrecision>,
        grid: Grid,
        params: PhysicalParameters,
    ) -> Result<Self, SimulationError> {
        params.validate()?;
        let state = SimulationState::new(&grid, h0, eta0, u0, v0)?;

        log::debug!(
            "Created FBL simulation: {}x{} cells, dx={} dy={}, {:?}, ghosts {:?}, {:?}",
            grid.nx,
            grid.ny,
            grid.dx,
            grid.dy,
            grid.boundary_conditions(),
            grid.ghosts(),
            params
        );

        Ok(FblSimulation {
            grid,
            params,
            context: context.clone(),
            state,
            timers: AppTimers::new(),
            time: 0.0,
            num_steps: 0,
        })
    }

    /// Advances by whole steps of `dt` until at least `target_duration` of
    /// simulated time has passed, returning the time actually simulated.
    /// The result may overshoot the target by less than one `dt`. A
    /// non-finite target takes no steps and returns 0.
    pub fn step(&mut self, target_duration: WorkingPrecision) -> WorkingPrecision {
        if !target_duration.is_finite() {
            log::warn!(
                "Ignoring non-finite step duration {}; no steps taken",
                target_duration
            );
            return 0.0;
        }

        let dt = self.params.dt;
        let mut elapsed: WorkingPrecision = 0.0;
        let mut steps_taken = 0u64;

        while elapsed < target_duration {
            self.step_once();
            steps_taken += 1;
            elapsed = steps_taken as WorkingPrecision * dt;
        }

        log::debug!(
            "Advanced {} steps ({} s requested, {} s simulated, t = {} s)",
            steps_taken,
            target_duration,
            elapsed,
            self.time
        );

        elapsed
    }

    fn step_once(&mut self) {
        let grid = &self.grid;
        let params = &self.params;
        let context = &self.context;
        let state = &mut self.state;
        let timers = &mut self.timers;

        timers.step.start();

        halo_exchange_kernel(grid, state, &mut timers.halo);
        momentum_kernel(grid, params, context, state, &mut timers.momentum);
        halo_exchange_kernel(grid, state, &mut timers.halo);
        continuity_kernel(grid, params, context, state, &mut timers.continuity);

        timers.step.stop();

        self.num_steps += 1;
        self.time = self.num_steps as f64 * f64::from(self.params.dt);

        log::trace!("Completed step {} (t = {} s)", self.num_steps, self.time);
    }

    /// Copies of the current `(eta, u, v)`, shaped per the grid's ghosts.
    pub fn download(
        &self,
    ) -> (
        Field2D<WorkingPrecision>,
        Field2D<WorkingPrecision>,
        Field2D<WorkingPrecision>,
    ) {
        self.state.download()
    }

    pub fn bathymetry(&self) -> &Field2D<WorkingPrecision> {
        &self.state.h
    }

    /// Total simulated time since construction (in seconds).
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn num_steps(&self) -> u64 {
        self.num_steps
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn params(&self) -> &PhysicalParameters {
        &self.params
    }

    pub fn timers(&self) -> &AppTimers {
        &self.timers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::initial_conditions::{central_bump, constant_depth, zero_u, zero_v};
    use crate::BoundaryConditions;

    fn simulation(bc: BoundaryConditions, dt: WorkingPrecision) -> FblSimulation {
        let grid = Grid::new(12, 10, 200.0, 200.0, bc).unwrap();
        let params = PhysicalParameters {
            dt,
            g: 9.81,
            f: 0.0,
            r: 0.0,
        };
        let context = ExecutionContext::new(2).unwrap();
        FblSimulation::new(
            &context,
            constant_depth(&grid, 60.0),
            central_bump(&grid, 1.0, 3.0),
            zero_u(&grid),
            zero_v(&grid),
            grid,
            params,
        )
        .unwrap()
    }

    #[test]
    fn step_takes_whole_time_steps() {
        let mut sim = simulation(BoundaryConditions::all_wall(), 2.0);

        assert_eq!(sim.step(5.0), 6.0);
        assert_eq!(sim.num_steps(), 3);
        assert_eq!(sim.time(), 6.0);

        assert_eq!(sim.step(4.0), 4.0);
        assert_eq!(sim.num_steps(), 5);
    }

    #[test]
    fn non_positive_duration_does_nothing() {
        let mut sim = simulation(BoundaryConditions::all_periodic(), 1.0);
        let before = sim.download();

        assert_eq!(sim.step(0.0), 0.0);
        assert_eq!(sim.step(-3.0), 0.0);
        assert_eq!(sim.num_steps(), 0);
        assert_eq!(sim.download(), before);
    }

    #[test]
    fn non_finite_duration_does_nothing() {
        let mut sim = simulation(BoundaryConditions::all_wall(), 1.0);
        let before = sim.download();

        assert_eq!(sim.step(WorkingPrecision::INFINITY), 0.0);
        assert_eq!(sim.step(WorkingPrecision::NAN), 0.0);
        assert_eq!(sim.step(WorkingPrecision::NEG_INFINITY), 0.0);
        assert_eq!(sim.num_steps(), 0);
        assert_eq!(sim.download(), before);
    }

    #[test]
    fn kernels_are_timed_once_per_step() {
        let mut sim = simulation(BoundaryConditions::periodic_east_west(), 1.0);
        sim.step(4.0);

        let timers = sim.timers();
        assert_eq!(timers.step.count(), 4);
        assert_eq!(timers.momentum.count(), 4);
        assert_eq!(timers.continuity.count(), 4);
        assert_eq!(timers.halo.count(), 8);
    }

    #[test]
    fn rejects_invalid_physical_parameters() {
        let grid = Grid::new(4, 4, 1.0, 1.0, BoundaryConditions::all_wall()).unwrap();
        let params = PhysicalParameters {
            dt: -1.0,
            g: 9.81,
            f: 0.0,
            r: 0.0,
        };
        let result = FblSimulation::new(
            &ExecutionContext::new(1).unwrap(),
            constant_depth(&grid, 1.0),
            constant_depth(&grid, 0.0),
            zero_u(&grid),
            zero_v(&grid),
            grid,
            params,
        );
        assert!(matches!(result, Err(SimulationError::Configuration(_))));
    }
}
