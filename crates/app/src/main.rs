use std::process::ExitCode;

use app::Config;

fn main() -> ExitCode {
    let config = Config::from_env();
    app::init_tracing(&config);

    match app::run(&config).and_then(|state| app::render(&state)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(error) => {
            tracing::error!(%error, "order replay failed");
            ExitCode::FAILURE
        }
    }
}
