use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::app_timers::AppTimers;
use crate::{FblSimulation, SimulationError};

/// Renders the interior cells as CSV rows of position, depth, elevation and
/// velocities averaged onto the cell centre.
pub fn render_snapshot_csv(simulation: &FblSimulation) -> String {
    let grid = simulation.grid();
    let h = simulation.bathymetry();
    let (eta, u, v) = simulation.download();

    let field_separator = ", ";
    let line_separator = "\n";

    let headers = [
        "x".to_owned(),
        "y".to_owned(),
        "h".to_owned(),
        "eta".to_owned(),
        "u".to_owned(),
        "v".to_owned(),
    ];
    let mut rows = vec![headers];
    for jj in 0..grid.ny {
        for ji in 0..grid.nx {
            let u_centre = 0.5 * (u.get(jj, ji) + u.get(jj, ji + 1));
            let v_centre = 0.5 * (v.get(jj, ji) + v.get(jj + 1, ji));

            rows.push([
                format!("{:6.8E}", grid.x_centre(ji)),
                format!("{:6.8E}", grid.y_centre(jj)),
                format!("{:6.8E}", h.get(jj, ji)),
                format!("{:6.8E}", eta.get(jj, ji)),
                format!("{:6.8E}", u_centre),
                format!("{:6.8E}", v_centre),
            ]);
        }
    }

    rows.iter()
        .map(|row| row.join(field_separator))
        .collect::<Vec<String>>()
        .join(line_separator)
}

pub fn write_snapshot(
    simulation: &FblSimulation,
    output_prefix: &str,
) -> Result<PathBuf, SimulationError> {
    let output_path = PathBuf::from(format!(
        "{}_{:0>5}.csv",
        output_prefix,
        simulation.num_steps()
    ));

    write_file(&output_path, &render_snapshot_csv(simulation))?;
    log::info!(
        "Wrote data for step {} (t = {} s) to file {}.",
        simulation.num_steps(),
        simulation.time(),
        output_path.display()
    );

    Ok(output_path)
}

pub fn write_timings_csv(
    app_timers: &AppTimers,
    output_prefix: &str,
) -> Result<PathBuf, SimulationError> {
    let output_path = PathBuf::from(format!("{}_timings.csv", output_prefix));

    write_file(&output_path, &app_timers.generate_timings_csv())?;
    log::info!("Wrote kernel timings data to file {}.", output_path.display());

    Ok(output_path)
}

fn write_file(path: &Path, contents: &str) -> Result<(), SimulationError> {
    let mut file = File::create(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}
