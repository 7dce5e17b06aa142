//! Display and export of an item's price history

use crate::error::Result;
use crate::store::{Item, PriceHistory, PricePoint, Timestamp};
use serde::{Serialize, Serializer};
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Zero-padded and year first, so string order is chronological order
const DATE_FORMAT: &str = "%Y/%m/%d, %H:%M:%S";

const NOT_AVAILABLE: &str = "NA";

const CSV_HEADERS: [&str; 5] = [
    "Date",
    "Market Value",
    "Minimum Buyout",
    "Number of Auctions",
    "Quantity",
];

/// A copper amount split into gold, silver and copper.
///
/// Serializes as the plain copper integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u64")]
pub struct Money {
    pub gold: u64,
    pub silver: u64,
    pub copper: u64,
}

impl Money {
    pub fn from_copper(value: u64) -> Self {
        Self {
            gold: value / 10_000,
            silver: (value / 100) % 100,
            copper: value % 100,
        }
    }

    pub fn to_copper(self) -> u64 {
        self.gold * 10_000 + self.silver * 100 + self.copper
    }
}

impl From<Money> for u64 {
    fn from(money: Money) -> Self {
        money.to_copper()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}g {}s {}c", self.gold, self.silver, self.copper)
    }
}

/// Export file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

/// One price point prepared for display and export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Market Value")]
    pub market_value: Money,
    #[serde(rename = "Minimum Buyout")]
    pub min_buyout: Money,
    #[serde(rename = "Number of Auctions", serialize_with = "count_or_na")]
    pub num_auctions: Option<u64>,
    #[serde(rename = "Quantity", serialize_with = "count_or_na")]
    pub quantity: Option<u64>,
}

impl HistoryRow {
    pub fn new(timestamp: Timestamp, point: &PricePoint) -> Self {
        Self {
            date: format_local_date(timestamp),
            market_value: Money::from_copper(point.market_value),
            min_buyout: Money::from_copper(point.min_buyout),
            num_auctions: point.num_auctions,
            quantity: point.quantity,
        }
    }
}

fn count_or_na<S: Serializer>(count: &Option<u64>, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    match count {
        Some(count) => serializer.serialize_u64(*count),
        None => serializer.serialize_str(NOT_AVAILABLE),
    }
}

fn display_count(count: Option<u64>) -> String {
    count.map_or_else(|| NOT_AVAILABLE.to_string(), |c| c.to_string())
}

/// Format a Unix timestamp in the local timezone
pub fn format_local_date(timestamp: Timestamp) -> String {
    match chrono::DateTime::from_timestamp(timestamp, 0) {
        Some(utc) => utc.with_timezone(&chrono::Local).format(DATE_FORMAT).to_string(),
        None => timestamp.to_string(),
    }
}

/// Rows for every point of a history, in timestamp order
pub fn history_rows(history: &PriceHistory) -> Vec<HistoryRow> {
    history
        .iter()
        .map(|(timestamp, point)| HistoryRow::new(*timestamp, point))
        .collect()
}

/// Human-readable price history, one block per point
pub fn format_history(rows: &[HistoryRow]) -> String {
    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "{}\nMarket Value: {}\nMin Buyout: {}\nNumber of Auctions: {}\nQuantity: {}\n\n",
            row.date,
            row.market_value,
            row.min_buyout,
            display_count(row.num_auctions),
            display_count(row.quantity)
        ));
    }
    output
}

/// Item metadata as indented JSON
pub fn format_item_details(item: &Item) -> Result<String> {
    Ok(serde_json::to_string_pretty(item)?)
}

/// Sort rows by date and write them to `destination`
pub fn export_history(rows: &mut [HistoryRow], format: ExportFormat, destination: &Path) -> Result<()> {
    rows.sort_by(|a, b| a.date.cmp(&b.date));

    let file = File::create(destination)?;
    match format {
        ExportFormat::Csv => write_csv(rows, file)?,
        ExportFormat::Json => write_json(rows, file)?,
    }

    log::info!(
        "Exported {} rows to {} ({:?})",
        rows.len(),
        destination.display(),
        format
    );
    Ok(())
}

/// CSV with a header row, written even when there are no rows
pub fn write_csv<W: Write>(rows: &[HistoryRow], writer: W) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    wtr.write_record(CSV_HEADERS)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// JSON array of row objects
pub fn write_json<W: Write>(rows: &[HistoryRow], writer: W) -> Result<()> {
    let mut writer = BufWriter::new(writer);
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.flush()?;
    Ok(())
}
