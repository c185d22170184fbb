use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::config::ConfigLogic;
use crate::errors::AppResult;
use crate::models::ProductType;
use crate::ui::messages::{header, success};
use crate::utils::table::Table;

/// Handle `cycles`: print the sampling cycles, or update them with `--set`.
pub fn handle(cmd: &Commands, cfg: &Config, is_test: bool) -> AppResult<()> {
    if let Commands::Cycles { set } = cmd {
        let mut cfg = cfg.clone();

        if !set.is_empty() {
            for assignment in set {
                let (pt, months) = ConfigLogic::apply_cycle(&mut cfg, assignment)?;
                success(format!("{} cycle set to {} month(s)", pt.label(), months));
            }
            if !is_test {
                cfg.save()?;
            }
        }

        header("Sampling cycles");
        let mut table = Table::new(&["TYPE", "MONTHS", "INTERMITTENT"]).with_separator(&cfg.separator_char);
        for pt in ProductType::ALL {
            let months = cfg.sampling_cycles.months(pt);
            table.add_row(vec![
                pt.label().to_string(),
                months.to_string(),
                (months * 2).to_string(),
            ]);
        }
        print!("{}", table.render());
        println!(
            "\nInspection every {} month(s), approaching from month {}.",
            cfg.inspection_cycle_months, cfg.inspection_warning_months
        );
    }

    Ok(())
}
