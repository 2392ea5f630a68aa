use std::process;

use fbl_swe_rs_lib::{run_simulation, ModelParameters};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let model_params = match ModelParameters::new("Config") {
        Ok(model_params) => model_params,
        Err(err) => {
            log::error!("Could not load model parameters: {}", err);
            process::exit(1);
        }
    };

    if let Err(err) = run_simulation(&model_params) {
        log::error!("Simulation failed: {}", err);
        process::exit(1);
    }
}
