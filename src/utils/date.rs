use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};

/// "Hoy 2:30 p.m." for movements made today, "10/11/2024" otherwise.
///
/// Both the movement and "today" are read in `now`'s timezone.
pub fn format_transaction_date<Tz: TimeZone>(created_at: &DateTime<Utc>, now: &DateTime<Tz>) -> String {
    let local = created_at.with_timezone(&now.timezone());

    if local.date_naive() == now.date_naive() {
        let (is_pm, hour) = local.hour12();
        let suffix = if is_pm { "p.m." } else { "a.m." };
        return format!("Hoy {}:{:02} {}", hour, local.minute(), suffix);
    }

    format!("{:02}/{:02}/{}", local.day(), local.month(), local.year())
}
