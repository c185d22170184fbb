use crate::config::Config;
use crate::errors::AppResult;
use crate::models::EmployeeStatus;
use crate::store::snapshot::Snapshot;
use crate::ui::messages::header;
use crate::utils::colors::{GREEN, YELLOW, paint};
use crate::utils::formatting::opt_str;
use crate::utils::table::Table;

pub fn handle(cfg: &Config) -> AppResult<()> {
    let state = Snapshot::load(&cfg.data_file)?;

    header("Team");
    let mut table = Table::new(&["ID", "NAME", "CITY", "SKILLS", "STATUS"]).with_separator(&cfg.separator_char);

    for e in &state.employees {
        let skills: Vec<&str> = e.skills.iter().map(|s| s.label()).collect();
        let color = match e.status {
            EmployeeStatus::Available => GREEN,
            EmployeeStatus::Busy => YELLOW,
        };
        table.add_row(vec![
            e.id.to_string(),
            e.name.clone(),
            opt_str(e.city.as_deref()),
            skills.join(", "),
            paint(e.status.label(), color),
        ]);
    }

    print!("{}", table.render());
    Ok(())
}
