//! Text rendering for saved-car lists, record detail, and the package
//! summary.

use chrono::{DateTime, Utc};

use crate::domain::{color, CarRecord, ColorSlot, PackageProgress};

const BAR_WIDTH: usize = 20;

pub fn format_timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M").to_string()
}

pub fn progress_bar(checked: usize, total: usize) -> String {
    let filled = if total == 0 {
        0
    } else {
        (checked * BAR_WIDTH + total / 2) / total
    };
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

fn percent(checked: usize, total: usize) -> u32 {
    if total == 0 {
        0
    } else {
        ((checked as f64 / total as f64) * 100.0).round() as u32
    }
}

/// One line per saved car for the `list` view.
pub fn record_row(index: usize, record: &CarRecord) -> String {
    let (checked, total) = record.checked_counts();
    format!(
        "{:>3}. {}  {}/{} features ({}%)  saved {}",
        index + 1,
        record.display_label(),
        checked,
        total,
        percent(checked, total),
        format_timestamp(&record.last_modified)
    )
}

/// Full record detail for the `view` command, checked features included.
pub fn record_detail(record: &CarRecord) -> Vec<String> {
    let mut lines = Vec::new();
    lines.push(format!("Name:          {}", record.name));
    lines.push(format!("License plate: {}", record.license_plate));
    lines.push(format!(
        "VIN:           {}",
        record.vin.as_deref().unwrap_or("-")
    ));
    if let Some(key) = &record.exterior_color {
        lines.push(format!(
            "Exterior:      {}",
            color::display_name(ColorSlot::Exterior, key)
        ));
    }
    if let Some(key) = &record.interior_color {
        lines.push(format!(
            "Interior:      {}",
            color::display_name(ColorSlot::Interior, key)
        ));
    }
    if let Some(price) = &record.price {
        lines.push(format!("Price:         {price}"));
    }
    if let Some(notes) = &record.notes {
        lines.push(format!("Notes:         {notes}"));
    }
    lines.push(format!(
        "Created:       {}",
        format_timestamp(&record.created_at)
    ));
    lines.push(format!(
        "Last modified: {}",
        format_timestamp(&record.last_modified)
    ));

    let (checked, total) = record.checked_counts();
    lines.push(format!(
        "Features:      {checked}/{total} ({}%)",
        percent(checked, total)
    ));
    for item in record.checklist.values().filter(|item| item.checked) {
        lines.push(format!("  - {}", item.label));
    }
    lines
}

/// One progress row per feature package.
pub fn package_lines(summary: &[PackageProgress]) -> Vec<String> {
    summary
        .iter()
        .map(|progress| {
            format!(
                "{:<22} {} {:>2}/{} ({}%)",
                progress.name,
                progress_bar(progress.checked, progress.total),
                progress.checked,
                progress.total,
                progress.percent()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_is_fixed_width() {
        assert_eq!(progress_bar(0, 4).len(), BAR_WIDTH + 2);
        assert_eq!(progress_bar(4, 4), format!("[{}]", "#".repeat(BAR_WIDTH)));
        assert_eq!(progress_bar(2, 4), format!("[{}{}]", "#".repeat(10), "-".repeat(10)));
        assert_eq!(progress_bar(0, 0), format!("[{}]", "-".repeat(BAR_WIDTH)));
    }

    #[test]
    fn record_row_counts_checked_features() {
        let mut record = CarRecord::new("Daily", "AB12 CDE");
        record.checklist.insert(
            "sunroof".into(),
            crate::domain::ChecklistItem {
                checked: true,
                package_key: Some("exterior".into()),
                importance: None,
                label: "Panoramic Sunroof".into(),
            },
        );
        let row = record_row(0, &record);
        assert!(row.contains("Daily [AB12 CDE]"));
        assert!(row.contains("1/1 features (100%)"));
    }
}
