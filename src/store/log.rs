use super::{AppState, next_id};
use crate::models::LogEntry;
use chrono::Local;

/// Append an internal log line to the state's audit log.
pub fn ttlog(state: &mut AppState, operation: &str, target: &str, message: &str) {
    // local time, RFC 3339
    let now = Local::now().to_rfc3339();
    let id = next_id(&state.log, |e| e.id);

    state.log.push(LogEntry {
        id,
        date: now,
        operation: operation.to_string(),
        target: target.to_string(),
        message: message.to_string(),
    });
}
