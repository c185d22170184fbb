use crate::models::LogEntry;
use crate::utils::formatting::{strip_ansi, truncate};
use ansi_term::Colour;

/// ANSI colour of an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "init" => Colour::RGB(255, 153, 51), // orange
        "trip_create" | "cp_add" => Colour::Green,
        "trip_complete" => Colour::Cyan,
        "trip_status" | "cp_status" | "trip_edit" | "cp_edit" | "cycles" => Colour::Yellow,
        "lab_send" | "sample" => Colour::Blue,
        "lab_form" | "lab_status" => Colour::Purple,
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Render the audit log, one line per entry; `limit` keeps the latest N.
    pub fn render(entries: &[LogEntry], limit: Option<usize>) -> Vec<String> {
        let skip = limit.map(|n| entries.len().saturating_sub(n)).unwrap_or(0);
        let entries = &entries[skip..];

        if entries.is_empty() {
            return Vec::new();
        }

        let rows: Vec<(u32, String, &str, String, &str)> = entries
            .iter()
            .map(|e| {
                let date = chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone());

                // op and target share one column
                let op_target = if e.target.is_empty() {
                    e.operation.clone()
                } else {
                    format!("{} ({})", e.operation, e.target)
                };

                (e.id, date, e.operation.as_str(), op_target, e.message.as_str())
            })
            .collect();

        let op_w = rows
            .iter()
            .map(|(_, _, _, op_target, _)| op_target.chars().count())
            .max()
            .unwrap_or(10)
            .min(40);
        let id_w = rows
            .iter()
            .map(|(id, ..)| id.to_string().len())
            .max()
            .unwrap_or(1);
        let date_w = rows
            .iter()
            .map(|(_, date, ..)| date.len())
            .max()
            .unwrap_or(10);

        rows.into_iter()
            .map(|(id, date, op, op_target, message)| {
                let color = color_for_operation(op);
                let visible = truncate(&op_target, 40);

                // only the operation word is coloured
                let colored = match visible.split_once(' ') {
                    Some((op_word, rest)) => format!("{} {}", color.paint(op_word), rest),
                    None => color.paint(visible.as_str()).to_string(),
                };

                let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

                format!(
                    "{:>id_w$}: {:<date_w$} | {}{} => {}",
                    id,
                    date,
                    colored,
                    padding,
                    message,
                    id_w = id_w,
                    date_w = date_w
                )
            })
            .collect()
    }

    pub fn print_log(entries: &[LogEntry], limit: Option<usize>) {
        let lines = Self::render(entries, limit);
        if lines.is_empty() {
            println!("📜 Internal log is empty.");
            return;
        }

        println!("📜 Internal log:\n");
        for line in lines {
            println!("{line}");
        }
    }
}
