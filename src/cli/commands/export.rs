use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::store::snapshot::Snapshot;
use crate::ui::messages::info;
use chrono::NaiveDate;

pub fn handle(cmd: &Commands, cfg: &Config, today: NaiveDate) -> AppResult<()> {
    if let Commands::Export {
        report,
        format,
        file,
        range,
        force,
    } = cmd
    {
        let state = Snapshot::load(&cfg.data_file)?;
        let count = ExportLogic::export(
            &state,
            cfg,
            today,
            *report,
            *format,
            file,
            range.as_deref(),
            *force,
        )?;
        info(format!(
            "{} {} record(s) written as {}",
            count,
            report.as_str(),
            format.as_str()
        ));
    }
    Ok(())
}
