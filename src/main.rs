use netprefix::config::{init_logging, Config};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    // Do as little as possible in main.rs as it can't contain any tests
    dotenv::dotenv().ok();
    let config = Config::from_args();
    init_logging(&config)?;
    //
    log::info!("#Start main()");

    netprefix::run(&config)?;

    Ok(())
}
