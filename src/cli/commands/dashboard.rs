use crate::cli::commands::due::render_due_table;
use crate::config::Config;
use crate::core::dashboard::build_dashboard;
use crate::errors::AppResult;
use crate::store::snapshot::Snapshot;
use crate::ui::messages::{header, info};
use crate::utils::formatting::bold;
use chrono::NaiveDate;

pub fn handle(cfg: &Config, today: NaiveDate) -> AppResult<()> {
    let state = Snapshot::load(&cfg.data_file)?;
    let summary = build_dashboard(
        &state,
        &cfg.sampling_cycles,
        &cfg.inspection_policy(),
        today,
    );

    header(format!("Dashboard at {}", today.format("%d.%m.%Y")));

    println!("{:<28} {}", "Concrete due for sampling", bold(&summary.due_concrete.to_string()));
    println!("{:<28} {}", "Cement due for sampling", bold(&summary.due_cement.to_string()));
    println!("{:<28} {}", "Active trips", bold(&summary.active_trips.to_string()));

    let lab = &summary.lab;
    println!(
        "{:<28} pending {} | draft {} | submitted {} | waiting {} | accepted {}",
        "Lab", lab.pending, lab.draft, lab.submitted, lab.waiting_confirm, lab.accepted
    );

    match summary.avg_turnaround_days {
        Some(days) => println!("{:<28} {:.1} day(s)", "Average lab turnaround", days),
        None => println!("{:<28} -", "Average lab turnaround"),
    }

    println!();
    if summary.top_prioritized.is_empty() {
        info("No company products registered.");
    } else {
        println!("{}", bold("Top prioritized"));
        print!(
            "{}",
            render_due_table(&summary.top_prioritized, &cfg.separator_char)
        );
    }

    Ok(())
}
