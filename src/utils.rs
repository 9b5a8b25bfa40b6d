use chrono::NaiveDate;

/// Date stamp used in output names, e.g. `18-10-2026`
pub fn date_stamp(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// `{prefix}_{dd-mm-YYYY}`, the naming convention for export files and tables
pub fn dated_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}", sanitize_filename(prefix), date_stamp(date))
}

/// Convert a string to a sanitized filename
pub fn sanitize_filename(name: &str) -> String {
    let name = name.trim().replace(['/', '\\', ':', '?', '&', '=', '#', '%', '*', '"'], "_");

    // Limit filename length
    if name.chars().count() > 100 {
        name.chars().take(100).collect()
    } else {
        name
    }
}
