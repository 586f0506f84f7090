use false_sharing::CacheGeometry;
use log::error;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    match CacheGeometry::probe() {
        Ok(geometry) => {
            println!("{geometry}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
