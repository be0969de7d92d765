pub mod app;
pub mod audio;
pub mod ui;

use jumpdeck::config::Config;
use std::error::Error;

pub fn run(track: Option<&str>) -> Result<(), Box<dyn Error>> {
    let config = Config::load()?;
    let track = config.resolve_track(track)?;
    app::run_with_track(&track, &config)
}
