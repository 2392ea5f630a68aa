use serde_derive::Deserialize;

use crate::{BoundaryConditions, Grid, SimulationError, WorkingPrecision};

/// Physical constants consumed by the update kernels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicalParameters {
    /// Size of time step (in seconds)
    pub dt: WorkingPrecision,

    /// Gravitational acceleration (m/s^2)
    pub g: WorkingPrecision,

    /// Coriolis parameter (1/s)
    pub f: WorkingPrecision,

    /// Linear bottom friction coefficient (1/s)
    pub r: WorkingPrecision,
}

impl PhysicalParameters {
    pub fn validate(&self) -> Result<(), SimulationError> {
        let all_finite = [self.dt, self.g, self.f, self.r]
            .iter()
            .all(|value| value.is_finite());

        if !all_finite {
            return Err(SimulationError::configuration(format!(
                "physical parameters must be finite: {:?}",
                self
            )));
        }

        if self.dt <= 0.0 {
            return Err(SimulationError::configuration(format!(
                "time step must be positive, got {}",
                self.dt
            )));
        }

        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InitialBump {
    Central,
    Corner,
}

#[derive(Debug, Deserialize)]
pub struct ModelParameters {
    /// Number of columns in model grid
    pub nx: usize,

    /// Number of rows in model grid
    pub ny: usize,

    // Grid size in x direction (in meters)
    pub dx: WorkingPrecision,

    // Grid size in y direction (in meters)
    pub dy: WorkingPrecision,

    /// Size of time step (in seconds)
    pub dt: WorkingPrecision,

    pub g: WorkingPrecision,
    pub f: WorkingPrecision,
    pub r: WorkingPrecision,

    /// Constant depth of simulation (in meters)
    pub depth: WorkingPrecision,

    /// Simulated time to run for (in seconds)
    pub end_time: WorkingPrecision,

    /// Simulated time between CSV snapshots (in seconds)
    pub output_interval: WorkingPrecision,

    // "wall" or "periodic"
    pub north: String,
    pub east: String,
    pub south: String,
    pub west: String,

    // "central" or "corner"
    pub initial_bump: String,
    pub bump_amplitude: WorkingPrecision,
    pub bump_radius_cells: WorkingPrecision,

    /// Worker threads, 0 lets rayon decide
    pub num_threads: usize,

    pub output_prefix: String,
}

impl Default for ModelParameters {
    fn default() -> Self {
        ModelParameters {
            nx: 50,
            ny: 70,
            dx: 200.0,
            dy: 200.0,
            dt: 1.0,
            g: 9.81,
            f: 0.0,
            r: 0.0,
            depth: 60.0,
            end_time: 50.0,
            output_interval: 10.0,
            north: "wall".to_owned(),
            east: "wall".to_owned(),
            south: "wall".to_owned(),
            west: "wall".to_owned(),
            initial_bump: "central".to_owned(),
            bump_amplitude: 1.0,
            bump_radius_cells: 5.0,
            num_threads: 0,
            output_prefix: "fbl_output".to_owned(),
        }
    }
}

impl ModelParameters {
    pub fn new(config_fname: &str) -> Result<Self, SimulationError> {
        let mut settings = config::Config::default();
        Self::set_defaults(&mut settings)?;

        settings
            .merge(config::File::with_name(config_fname).required(false))?
            .merge(config::Environment::with_prefix("FBL"))?;

        Ok(settings.try_into()?)
    }

    fn set_defaults(settings: &mut config::Config) -> Result<(), config::ConfigError> {
        let defaults = ModelParameters::default();

        settings
            .set_default("nx", defaults.nx as i64)?
            .set_default("ny", defaults.ny as i64)?
            .set_default("dx", f64::from(defaults.dx))?
            .set_default("dy", f64::from(defaults.dy))?
            .set_default("dt", f64::from(defaults.dt))?
            .set_default("g", f64::from(defaults.g))?
            .set_default("f", f64::from(defaults.f))?
            .set_default("r", f64::from(defaults.r))?
            .set_default("depth", f64::from(defaults.depth))?
            .set_default("end_time", f64::from(defaults.end_time))?
            .set_default("output_interval", f64::from(defaults.output_interval))?
            .set_default("north", defaults.north)?
            .set_default("east", defaults.east)?
            .set_default("south", defaults.south)?
            .set_default("west", defaults.west)?
            .set_default("initial_bump", defaults.initial_bump)?
            .set_default("bump_amplitude", f64::from(defaults.bump_amplitude))?
            .set_default("bump_radius_cells", f64::from(defaults.bump_radius_cells))?
            .set_default("num_threads", defaults.num_threads as i64)?
            .set_default("output_prefix", defaults.output_prefix)?;

        Ok(())
    }

    pub fn boundary_conditions(&self) -> Result<BoundaryConditions, SimulationError> {
        Ok(BoundaryConditions::new(
            self.north.parse()?,
            self.east.parse()?,
            self.south.parse()?,
            self.west.parse()?,
        ))
    }

    pub fn grid(&self) -> Result<Grid, SimulationError> {
        Grid::new(
            self.nx,
            self.ny,
            self.dx,
            self.dy,
            self.boundary_conditions()?,
        )
    }

    pub fn physical_parameters(&self) -> Result<PhysicalParameters, SimulationError> {
        let params = PhysicalParameters {
            dt: self.dt,
            g: self.g,
            f: self.f,
            r: self.r,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn initial_bump(&self) -> Result<InitialBump, SimulationError> {
        match self.initial_bump.trim().to_ascii_lowercase().as_str() {
            "central" => Ok(InitialBump::Central),
            "corner" => Ok(InitialBump::Corner),
            other => Err(SimulationError::configuration(format!(
                "unknown initial bump '{}', expected 'central' or 'corner'",
                other
            ))),
        }
    }
}
