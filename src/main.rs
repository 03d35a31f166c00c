mod app;
mod args;
mod constants;
mod dashboard;
mod error;
mod probe;
mod report;
mod settings;
mod source;
mod surface;
mod util;
mod writer;

use anyhow::Result;
use app::EspRestMap;
use args::EspRestMapArgs;
use constants::{APP_NAME, APP_VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    let args = EspRestMapArgs::from_env();
    if args.version {
        println!("{} {}", APP_NAME, APP_VERSION);
        return Ok(());
    }

    init_logging();

    let app = EspRestMap::new(&args)?;
    app.run().await
}

fn init_logging() {
    let default_level = if cfg!(debug_assertions) {
        "esphome_rest_map=debug"
    } else {
        "esphome_rest_map=info"
    };
    let env = env_logger::Env::default().filter_or("LOG_LEVEL", default_level);
    env_logger::init_from_env(env);
}
