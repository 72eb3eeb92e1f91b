//! Terminal rendering for summaries, series tables, and detail views
//!
//! All formatting of fetched data lives here, away from the session
//! logic. Absent values render as "N/A"; they are never invented.

use crate::catalog::SourceCatalog;
use crate::model::MetadataRecord;
use crate::session::stats::SummaryStats;
use crate::session::SearchSummary;

use chrono::{DateTime, NaiveDate, Utc};
use colored::Colorize;
use prettytable::{row, Table};

/// Render the source catalog as a table
pub fn render_sources_table(catalog: &SourceCatalog) {
    let mut table = Table::new();
    table.add_row(row!["Source ID", "Name"]);
    for source in catalog.sources() {
        table.add_row(row![source.id, source.name]);
    }

    println!("\nAvailable sources ({}):\n", catalog.len());
    table.printstd();
    println!();
}

/// Render the per-source search summary
///
/// Shows the probe-level counts always, and the detailed statistics
/// only once a full load has enriched the summary.
pub fn render_summary(summary: &SearchSummary) {
    println!();
    println!("{}", "Search Summary".bold());
    println!("  Source ID:          {}", summary.source_id);
    println!("  Total Series Found: {}", summary.total_count);

    if let Some(stats) = &summary.stats {
        println!();
        println!("{}", "Detailed Statistics".bold());
        println!("  Oldest Update:      {}", format_datetime(stats.min_update_date));
        println!("  Newest Update:      {}", format_datetime(stats.max_update_date));
        println!("  Active Series:      {}", stats.active_count);
        println!("  Processed Series:   {}", stats.records_processed);
    }
    println!();
}

/// Apply the keyword filter to a record list
pub fn filter_records<'a>(
    records: &'a [MetadataRecord],
    keyword: Option<&str>,
) -> Vec<&'a MetadataRecord> {
    match keyword {
        Some(keyword) if !keyword.is_empty() => records
            .iter()
            .filter(|r| r.matches_keyword(keyword))
            .collect(),
        _ => records.iter().collect(),
    }
}

/// Render one page of the series table
///
/// # Arguments
///
/// * `records` - Filtered records to display
/// * `page` - 1-based page number; out-of-range pages clamp to the last
/// * `page_size` - Rows per page, non-zero
pub fn render_series_table(records: &[&MetadataRecord], page: usize, page_size: usize) {
    if records.is_empty() {
        println!("{}", "No series match your filter criteria.".yellow());
        return;
    }

    let page_count = records.len().div_ceil(page_size);
    let page = page.clamp(1, page_count);
    let start = (page - 1) * page_size;
    let end = (start + page_size).min(records.len());

    let mut table = Table::new();
    table.add_row(row!["Series ID", "Name", "Status", "Frequency", "Last Update"]);
    for record in &records[start..end] {
        table.add_row(row![
            record.id,
            record.name,
            record.status.to_string(),
            record.frequency.to_string(),
            format_datetime(record.last_update_time)
        ]);
    }

    println!(
        "\nSeries Metadata ({} shown, page {} of {}):\n",
        records.len(),
        page,
        page_count
    );
    table.printstd();
    println!();
}

/// Render the full detail view for a single series
pub fn render_series_detail(record: &MetadataRecord) {
    println!();
    println!("{} {}", "Details for:".bold(), record.name);

    println!();
    println!("{}", "Key Metrics".bold());
    println!("  Last Value:   {}", format_optional_f64(record.last_value));
    println!(
        "  Last Update:  {}",
        format_datetime(record.last_update_time)
    );
    println!("  Status:       {}", record.status);

    println!();
    println!("{}", "Core Attributes".bold());
    println!("  Series ID:    {}", record.id);
    println!("  Frequency:    {}", record.frequency);
    println!(
        "  Date Range:   {} to {}",
        format_date(record.start_date),
        format_date(record.end_date)
    );
    println!(
        "  Observations: {}",
        record
            .number_of_observations
            .map(|n| n.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    );

    println!();
    println!("{}", "Classification & Geography".bold());
    if record.indicator_path.is_empty() {
        println!("  Indicator Path: N/A");
    } else {
        println!("  Indicator Path: {}", record.indicator_path_display());
    }
    println!(
        "  Country:        {}",
        record
            .country()
            .map(|c| c.name.as_str())
            .unwrap_or("N/A")
    );
    let regions = record.regions();
    if !regions.is_empty() {
        println!("  Regions:        {}", regions.join(", "));
    }

    println!();
    println!("{}", "Technical Flags".bold());
    println!("  Is Forecast:           {}", yes_no(record.is_forecast));
    println!("  Is Key Series:         {}", yes_no(record.is_key_series));
    println!(
        "  Has Continuous Series: {}",
        yes_no(record.has_continuous_series)
    );
    println!("  Has Vintage Data:      {}", yes_no(record.has_vintage));
    println!("  Is New Series:         {}", yes_no(record.is_new_series));
    println!("  Has Schedule:          {}", yes_no(record.has_schedule));
    println!();
}

/// Format a statistics block for quick inline display
pub fn format_stats_line(stats: &SummaryStats) -> String {
    format!(
        "min={} max={} active={} processed={}",
        format_datetime(stats.min_update_date),
        format_datetime(stats.max_update_date),
        stats.active_count,
        stats.records_processed
    )
}

fn format_datetime(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|v| v.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn format_date(value: Option<NaiveDate>) -> String {
    value
        .map(|v| v.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn format_optional_f64(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| "N/A".to_string())
}

fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}
