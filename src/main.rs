use std::io;
use tracing::info;
use nps_explorer::{Config, Gateway, ResponseCache, Shell};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::load()?;
    nps_explorer::logging::init(config.log_level)?;

    // One cache handle for the whole session
    let cache = ResponseCache::open(&config.cache_path);
    info!("Loaded {} cached responses from {}", cache.len(), cache.path().display());

    let mut shell = Shell::new(Gateway::new(cache), &config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    shell.run(&mut stdin.lock(), &mut stdout.lock())?;

    Ok(())
}
