//! Catalog Processor
//!
//! Turns raw product text into marketplace-ready listing rows:
//! - parse pipe-separated paste data or comma-separated template files
//! - render records against a marketplace profile (title truncation,
//!   description templating, keyword derivation)
//! - serialize rows to CSV for spreadsheet import

pub mod profiles;

#[cfg(test)]
mod tests;

pub use profiles::{MarketplaceKey, MarketplaceProfile};

use thiserror::Error;

/// Catalog parsing errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog input is empty")]
    EmptyInput,

    #[error("no line matched the expected field layout")]
    NoValidRows,
}

/// Canonical field order for both input formats
const FIELD_NAMES: [&str; 7] = [
    "name",
    "sku",
    "price",
    "category",
    "stock",
    "description",
    "tags",
];

/// Fields through `description` are required; `tags` is optional
const MIN_FIELDS: usize = 6;

/// One product entry parsed from raw input, prior to rendering
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub name: String,
    pub sku: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub description: String,
    /// Semicolon-separated in the input, split and trimmed here
    pub tags: Vec<String>,
}

/// A parsed sheet: detected headers plus the records that survived parsing
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<ParsedRecord>,
}

/// One marketplace-rendered listing, ready for preview or export
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogRow {
    pub sku: String,
    pub platform: MarketplaceKey,
    /// Never longer than the profile's title limit
    pub title: String,
    pub description: String,
    /// Deduplicated case-insensitively, first-seen order
    pub keywords: Vec<String>,
    pub price: f64,
    pub stock: u32,
}

/// Parse raw catalog text into headers and records.
///
/// The delimiter is sniffed from the content: any `|` marks the
/// human-friendly paste format (one record per line, canonical field
/// order, no header line); otherwise the text is treated as a
/// comma-separated template whose first line is the header row.
/// Lines with too few fields are skipped; the parse fails only when the
/// input is empty or no line at all is usable.
pub fn parse_catalog_sheet(text: &str) -> Result<ParsedSheet, CatalogError> {
    if text.trim().is_empty() {
        return Err(CatalogError::EmptyInput);
    }

    let lines: Vec<&str> = text.lines().map(str::trim).filter(|l| !l.is_empty()).collect();

    let (headers, data_lines, delimiter): (Vec<String>, Vec<&str>, char) = if text.contains('|') {
        let headers = FIELD_NAMES.iter().map(|s| s.to_string()).collect();
        (headers, lines, '|')
    } else {
        let mut iter = lines.into_iter();
        let headers = match iter.next() {
            Some(line) => line.split(',').map(|h| h.trim().to_string()).collect(),
            None => return Err(CatalogError::EmptyInput),
        };
        (headers, iter.collect(), ',')
    };

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for line in data_lines {
        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        if fields.len() < MIN_FIELDS {
            skipped += 1;
            continue;
        }
        rows.push(record_from_fields(&fields));
    }

    log::debug!("Parsed {} catalog records ({} lines skipped)", rows.len(), skipped);

    if rows.is_empty() {
        return Err(CatalogError::NoValidRows);
    }

    Ok(ParsedSheet { headers, rows })
}

/// Build a record from trimmed fields in canonical order.
/// Numeric fields that fail to parse default to 0.
fn record_from_fields(fields: &[&str]) -> ParsedRecord {
    ParsedRecord {
        name: fields[0].to_string(),
        sku: fields[1].to_string(),
        price: fields[2].parse().unwrap_or(0.0),
        category: fields[3].to_string(),
        stock: fields[4].parse().unwrap_or(0),
        description: fields[5].to_string(),
        tags: fields
            .get(6)
            .map(|t| {
                t.split(';')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default(),
    }
}

/// Render records into listing rows for one marketplace.
///
/// Pure function of (records, profile): identical inputs yield
/// byte-identical rows.
pub fn render_for_marketplace(records: &[ParsedRecord], marketplace: MarketplaceKey) -> Vec<CatalogRow> {
    let profile = marketplace.profile();

    records
        .iter()
        .map(|record| CatalogRow {
            sku: record.sku.clone(),
            platform: marketplace,
            title: truncate_title(&record.name, profile.title_max_length),
            description: fill_template(profile.description_template, record),
            keywords: derive_keywords(record, profile),
            price: record.price,
            stock: record.stock,
        })
        .collect()
}

/// Hard cutoff at the profile limit, counted in characters, no ellipsis
fn truncate_title(name: &str, max_length: usize) -> String {
    name.chars().take(max_length).collect()
}

fn fill_template(template: &str, record: &ParsedRecord) -> String {
    template
        .replace("{description}", &record.description)
        .replace("{category}", &record.category)
        .replace("{price}", &record.price.to_string())
}

/// Union of record tags, lowercase category tokens, and profile hint
/// tokens; deduplicated case-insensitively in first-seen order.
fn derive_keywords(record: &ParsedRecord, profile: &MarketplaceProfile) -> Vec<String> {
    let category_tokens = record.category.split_whitespace().map(str::to_lowercase);
    let hint_tokens = profile
        .keyword_hint
        .split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from);

    let mut seen = Vec::new();
    let mut keywords = Vec::new();
    for candidate in record.tags.iter().cloned().chain(category_tokens).chain(hint_tokens) {
        let folded = candidate.to_lowercase();
        if seen.contains(&folded) {
            continue;
        }
        seen.push(folded);
        keywords.push(candidate);
    }
    keywords
}

/// Serialize rows to CSV with standard quoting.
///
/// Header line `sku,platform,title,description,keywords,price,stock`,
/// keywords joined with `;`. Downstream spreadsheet import consumes this
/// verbatim, so the format is exact.
pub fn export_to_csv(rows: &[CatalogRow]) -> String {
    let mut lines = vec!["sku,platform,title,description,keywords,price,stock".to_string()];

    for row in rows {
        let fields = [
            row.sku.clone(),
            row.platform.key().to_string(),
            row.title.clone(),
            row.description.clone(),
            row.keywords.join(";"),
            row.price.to_string(),
            row.stock.to_string(),
        ];
        let line: Vec<String> = fields.iter().map(|f| csv_escape(f)).collect();
        lines.push(line.join(","));
    }

    lines.join("\n")
}

/// Double-quote wrap fields containing the delimiter, quotes, or
/// newlines; internal quotes are doubled
fn csv_escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
