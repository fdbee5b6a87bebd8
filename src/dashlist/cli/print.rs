use chrono::{DateTime, Utc};
use colored::Colorize;
use dashlist::api::{CmdMessage, MessageLevel};
use dashlist::config::DashConfig;
use dashlist::model::{scalar_text, value_to_datetime, Record};
use dashlist::pager::PageResult;
use serde_json::Value;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 10;
const MAX_COLUMN_WIDTH: usize = 28;

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_page(page: &PageResult<Record>, columns: &[String]) {
    if page.items.is_empty() {
        print_footer(page);
        return;
    }

    let column_width = column_width(columns.len());
    let header: String = std::iter::once(pad_to_width("id", ID_WIDTH))
        .chain(columns.iter().map(|c| pad_to_width(c, column_width)))
        .collect::<Vec<_>>()
        .join(" ");
    println!("{}", header.bold());

    for record in &page.items {
        let id = pad_to_width(&truncate_to_width(&record.id, ID_WIDTH), ID_WIDTH);
        let cells: Vec<String> = columns
            .iter()
            .map(|c| {
                let text = truncate_to_width(&cell_text(record, c), column_width);
                pad_to_width(&text, column_width)
            })
            .collect();
        println!("{} {}", id.yellow(), cells.join(" "));
    }
    print_footer(page);
}

fn print_footer(page: &PageResult<Record>) {
    let shown = if page.items.is_empty() {
        "0".to_string()
    } else {
        format!(
            "{}-{}",
            page.start_index() + 1,
            page.start_index() + page.items.len()
        )
    };
    let mut footer = format!(
        "{} of {} · page {}/{}",
        shown,
        page.total_count,
        page.page_index,
        page.total_pages.max(1)
    );
    if page.has_next_page {
        footer.push_str(&format!(" · next: -p {}", page.page_index + 1));
    }
    println!("{}", footer.dimmed());
}

pub(crate) fn print_full_records(records: &[Record]) {
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!("\n================================\n");
        }
        println!("{}", record.id.yellow().bold());
        println!("--------------------------------");
        for (key, value) in &record.fields {
            let rendered = match value {
                Value::Object(_) | Value::Array(_) => value.to_string(),
                other => scalar_text(other).unwrap_or_default(),
            };
            println!("{:<16} {}", key.dimmed(), rendered);
        }
    }
}

pub(crate) fn print_facets(values: &[String]) {
    for value in values {
        println!("{}", value);
    }
}

pub(crate) fn print_config(config: &DashConfig) {
    for key in DashConfig::keys() {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
    for (collection, fields) in &config.search_fields {
        println!("search-fields.{} = {}", collection, fields.join(","));
    }
}

/// Display text of a column. Timestamp-named fields render relative to now.
fn cell_text(record: &Record, column: &str) -> String {
    if column == "id" {
        return record.id.clone();
    }
    let Some(value) = record.get_path(column) else {
        return "-".to_string();
    };
    if looks_like_time_field(column) {
        if let Some(ts) = value_to_datetime(value) {
            return format_time_ago(ts);
        }
    }
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_text)
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(_) => "{…}".to_string(),
        other => scalar_text(other)
            .map(|s| s.replace('\n', " "))
            .unwrap_or_default(),
    }
}

fn looks_like_time_field(column: &str) -> bool {
    column.ends_with("At") || column == "lastLogin"
}

fn column_width(columns: usize) -> usize {
    if columns == 0 {
        return MAX_COLUMN_WIDTH;
    }
    let available = LINE_WIDTH.saturating_sub(ID_WIDTH + columns);
    (available / columns).clamp(8, MAX_COLUMN_WIDTH)
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    match duration.to_std() {
        Ok(elapsed) => Formatter::new().convert(elapsed),
        // Scheduled items sit in the future.
        Err(_) => timestamp.format("%Y-%m-%d").to_string(),
    }
}
