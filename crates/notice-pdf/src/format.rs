//! Display formatting for notice fields
//!
//! Every function here is pure and total over validated input. Timestamps
//! are epoch milliseconds truncated to whole seconds, then read as wall-clock
//! time in the given [`DisplayZone`].

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use notice_types::EpochMillis;

use crate::zone::DisplayZone;

const MONTHS: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Minutes between the first and second call of a meeting
pub const SECOND_CALL_DELAY_MINUTES: i64 = 30;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

/// Long Spanish date, e.g. `15 de enero de 2024`
pub fn format_date(timestamp: EpochMillis, zone: DisplayZone) -> String {
    let local = zone.to_wall_clock(timestamp.to_utc());
    format!(
        "{:02} de {} de {}",
        local.day(),
        MONTHS[local.month0() as usize],
        local.year()
    )
}

/// 24-hour `HH:MM`
pub fn format_time(timestamp: EpochMillis, zone: DisplayZone) -> String {
    zone.to_wall_clock(timestamp.to_utc())
        .format("%H:%M")
        .to_string()
}

/// First and second call sentence; the second call wraps past midnight
pub fn format_dual_call_time(timestamp: EpochMillis, zone: DisplayZone) -> String {
    let first = zone.to_wall_clock(timestamp.to_utc()).time();
    let (second, _) = first.overflowing_add_signed(TimeDelta::minutes(SECOND_CALL_DELAY_MINUTES));

    format!(
        "{} horas en primera convocatoria, y a las {} horas en segunda convocatoria",
        first.format("%H:%M"),
        second.format("%H:%M")
    )
}

/// Footer stamp, e.g. `31/07/2025 a las 09:30 horas`
pub fn format_generated_at(instant: DateTime<Utc>, zone: DisplayZone) -> String {
    zone.to_wall_clock(instant)
        .format("%d/%m/%Y a las %H:%M horas")
        .to_string()
}

/// Human readable size with B, KB or MB units.
///
/// KB and MB carry one decimal, rounded half up.
pub fn format_file_size(bytes: u64) -> String {
    if bytes < KB {
        format!("{} B", bytes)
    } else if bytes < MB {
        format!("{} KB", one_decimal(bytes, KB))
    } else {
        format!("{} MB", one_decimal(bytes, MB))
    }
}

fn one_decimal(bytes: u64, unit: u64) -> String {
    let unit = u128::from(unit);
    let tenths = (u128::from(bytes) * 10 + unit / 2) / unit;
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Spanish label of a vote type tag; unknown tags are returned unchanged
pub fn vote_type_label(tag: &str) -> &str {
    match tag {
        "approval" => "Aprobación",
        "multiple_choice" => "Opción múltiple",
        "discussion" => "Discusión",
        "simple" => "Simple",
        other => other,
    }
}

/// Spanish label of a meeting type tag; unknown tags are returned unchanged
pub fn meeting_type_label(tag: &str) -> &str {
    match tag {
        "ORDINARY" => "ORDINARIA",
        "EXTRAORDINARY" => "EXTRAORDINARIA",
        other => other,
    }
}

/// File name of a generated notice, `convocatoria_reunion_<id>.pdf`.
///
/// Characters outside `[A-Za-z0-9._-]` become `_` so the name is safe both
/// as a path component and inside a `Content-Disposition` header.
pub fn notice_file_name(meeting_id: &str) -> String {
    let safe: String = meeting_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("convocatoria_reunion_{}.pdf", safe)
}
