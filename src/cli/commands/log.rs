use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::store::snapshot::Snapshot;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = cmd {
        let state = Snapshot::load(&cfg.data_file)?;
        LogLogic::print_log(&state.log, *limit);
    }

    Ok(())
}
