// src/common/format.rs

use chrono::{DateTime, Datelike, Timelike, Utc};

const BULAN: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

// "DD MMM YYYY" com os meses abreviados em indonésio
pub fn format_date(date: &DateTime<Utc>) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        BULAN[date.month0() as usize],
        date.year()
    )
}

// "DD MMM YYYY HH:mm"
pub fn format_date_time(date: &DateTime<Utc>) -> String {
    format!(
        "{} {:02}:{:02}",
        format_date(date),
        date.hour(),
        date.minute()
    )
}

pub fn format_optional_date(date: Option<&DateTime<Utc>>) -> String {
    date.map(format_date).unwrap_or_else(|| "-".to_string())
}

// Corta por caracteres (não por bytes) e acrescenta "..."
pub fn truncate(text: &str, length: usize) -> String {
    if text.chars().count() <= length {
        return text.to_string();
    }
    let cut: String = text.chars().take(length).collect();
    format!("{cut}...")
}

// "Budi Santoso Wijaya" -> "BS"
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|part| part.chars().next())
        .flat_map(char::to_uppercase)
        .take(2)
        .collect()
}

pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "-".to_string(),
    }
}
