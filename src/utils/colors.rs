/// ANSI color helper utilities for terminal output.
use crate::core::priority::PriorityFlag;
use crate::models::{LabStatus, TripStatus};

pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const MAGENTA: &str = "\x1b[35m";

/// overdue → red, approaching → yellow, ok → green
pub fn color_for_priority(flag: PriorityFlag) -> &'static str {
    match flag {
        PriorityFlag::Overdue => RED,
        PriorityFlag::Approaching => YELLOW,
        PriorityFlag::Ok => GREEN,
    }
}

pub fn color_for_trip_status(status: TripStatus) -> &'static str {
    match status {
        TripStatus::Planned => GREY,
        TripStatus::Active => BLUE,
        TripStatus::Completed => GREEN,
        TripStatus::Cancelled => GREY,
    }
}

pub fn color_for_lab_status(status: Option<LabStatus>) -> &'static str {
    match status {
        None | Some(LabStatus::Pending) => GREY,
        Some(LabStatus::Draft) => YELLOW,
        Some(LabStatus::Submitted) => BLUE,
        Some(LabStatus::WaitingConfirm) => MAGENTA,
        Some(LabStatus::Accepted) => GREEN,
    }
}

/// Paint `value` with `color`, or grey it out when it is a "-" placeholder.
pub fn paint(value: &str, color: &str) -> String {
    if value.trim().is_empty() || value.trim() == "-" {
        format!("{GREY}{value}{RESET}")
    } else {
        format!("{color}{value}{RESET}")
    }
}
