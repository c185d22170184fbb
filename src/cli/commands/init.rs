use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::store::log::ttlog;
use crate::store::seed::seed;
use crate::store::snapshot::Snapshot;
use crate::ui::messages::success;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the state snapshot, reset to the seed dataset
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.data.clone(), cli.test)?;

    println!("⚙️  Initializing labtrack…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Data file   : {}", &cfg.data_file);

    let mut state = seed();
    ttlog(
        &mut state,
        "init",
        "seed",
        &format!("Seed dataset written to {}", &cfg.data_file),
    );
    Snapshot::save(&cfg.data_file, &state)?;

    success(format!(
        "Seed dataset written: {} company products, {} employees, {} trip items",
        state.company_products.len(),
        state.employees.len(),
        state.trip_items.len()
    ));
    println!("🎉 labtrack initialization completed!");
    Ok(())
}
