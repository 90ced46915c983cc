//! CSV persistence for listings.
//!
//! The column order is fixed so exported files stay diffable and re-importable
//! across versions. Guessed emails are suffixed with ` (guessed)` in the
//! `emails` cell so low-confidence guesses stay distinguishable from scraped
//! addresses in the exported file.

use std::io;
use std::path::Path;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::listing::{DiscoveredEmail, EmailSource, Listing};

const HEADER: [&str; 12] = [
    "name",
    "address",
    "phone",
    "website",
    "rating",
    "total_reviews",
    "place_id",
    "search_term",
    "emails",
    "business_status",
    "types",
    "scraped_at",
];

const GUESSED_SUFFIX: &str = " (guessed)";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },
}

/// Writes listings as CSV to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`ExportError`] on I/O or CSV serialization failure.
pub fn write_listings_csv(path: &Path, listings: &[Listing]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(path)?;
    write_listings(file, listings)
}

/// Writes listings as CSV to any writer. Split out from the file path variant
/// so tests can write into a `Vec<u8>`.
///
/// # Errors
///
/// Returns [`ExportError`] on CSV serialization failure.
pub fn write_listings<W: io::Write>(writer: W, listings: &[Listing]) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(HEADER)?;

    for listing in listings {
        out.write_record([
            listing.name.as_str(),
            listing.address.as_str(),
            listing.phone.as_str(),
            listing.website.as_str(),
            &listing.rating.map(|r| r.to_string()).unwrap_or_default(),
            &listing.total_reviews.to_string(),
            listing.place_id.as_str(),
            listing.search_term.as_str(),
            &format_emails(&listing.emails),
            listing.business_status.as_str(),
            listing.types.as_str(),
            &listing.scraped_at.to_rfc3339(),
        ])?;
    }

    out.flush()?;
    Ok(())
}

/// Reads listings back from a CSV file written by [`write_listings_csv`].
///
/// # Errors
///
/// Returns [`ExportError`] on I/O failure, CSV parse failure, or a row whose
/// numeric/timestamp cells cannot be parsed.
pub fn read_listings_csv(path: &Path) -> Result<Vec<Listing>, ExportError> {
    let file = std::fs::File::open(path)?;
    read_listings(file)
}

/// Reads listings from any reader producing CSV in the export column order.
///
/// # Errors
///
/// Returns [`ExportError`] on CSV parse failure or malformed cells.
pub fn read_listings<R: io::Read>(reader: R) -> Result<Vec<Listing>, ExportError> {
    let mut input = csv::Reader::from_reader(reader);
    let mut listings = Vec::new();

    for (idx, record) in input.records().enumerate() {
        let record = record?;
        let row = idx + 2; // 1-based, after the header line

        let cell = |i: usize| record.get(i).unwrap_or("").to_string();

        let rating = {
            let raw = cell(4);
            if raw.is_empty() {
                None
            } else {
                Some(
                    raw.parse::<f64>()
                        .map_err(|e| ExportError::MalformedRow {
                            row,
                            reason: format!("rating \"{raw}\": {e}"),
                        })?,
                )
            }
        };

        let total_reviews = {
            let raw = cell(5);
            if raw.is_empty() {
                0
            } else {
                raw.parse::<u32>().map_err(|e| ExportError::MalformedRow {
                    row,
                    reason: format!("total_reviews \"{raw}\": {e}"),
                })?
            }
        };

        let scraped_at = {
            let raw = cell(11);
            if raw.is_empty() {
                Utc::now()
            } else {
                DateTime::parse_from_rfc3339(&raw)
                    .map_err(|e| ExportError::MalformedRow {
                        row,
                        reason: format!("scraped_at \"{raw}\": {e}"),
                    })?
                    .with_timezone(&Utc)
            }
        };

        listings.push(Listing {
            name: cell(0),
            address: cell(1),
            phone: cell(2),
            website: cell(3),
            rating,
            total_reviews,
            place_id: cell(6),
            search_term: cell(7),
            emails: parse_emails(&cell(8)),
            business_status: cell(9),
            types: cell(10),
            scraped_at,
        });
    }

    Ok(listings)
}

fn format_emails(emails: &[DiscoveredEmail]) -> String {
    emails
        .iter()
        .map(|e| match e.source {
            EmailSource::Scraped => e.address.clone(),
            EmailSource::Guessed => format!("{}{GUESSED_SUFFIX}", e.address),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn parse_emails(cell: &str) -> Vec<DiscoveredEmail> {
    cell.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.strip_suffix(GUESSED_SUFFIX.trim_start()).map_or_else(
                || DiscoveredEmail::scraped(s.trim()),
                |addr| DiscoveredEmail::guessed(addr.trim()),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_listing() -> Listing {
        Listing {
            name: "Acme Cafe".to_string(),
            address: "12 High Street, London".to_string(),
            phone: "+44 20 7946 0000".to_string(),
            website: "https://acme.example.com".to_string(),
            rating: Some(4.2),
            total_reviews: 37,
            place_id: "place-acme".to_string(),
            search_term: "coffee shops".to_string(),
            business_status: "OPERATIONAL".to_string(),
            types: "cafe, food".to_string(),
            scraped_at: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            emails: vec![
                DiscoveredEmail::scraped("hello@acme.example.com"),
                DiscoveredEmail::guessed("info@acme.example.com"),
            ],
        }
    }

    #[test]
    fn writes_fixed_header_order() {
        let mut buf = Vec::new();
        write_listings(&mut buf, &[]).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(
            text.lines().next(),
            Some(
                "name,address,phone,website,rating,total_reviews,place_id,search_term,\
                 emails,business_status,types,scraped_at"
            )
        );
    }

    #[test]
    fn guessed_emails_are_labelled_in_the_cell() {
        let mut buf = Vec::new();
        write_listings(&mut buf, &[sample_listing()]).expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("hello@acme.example.com, info@acme.example.com (guessed)"));
    }

    #[test]
    fn round_trips_through_read() {
        let mut buf = Vec::new();
        write_listings(&mut buf, &[sample_listing()]).expect("write");
        let back = read_listings(buf.as_slice()).expect("read");
        assert_eq!(back.len(), 1);
        let listing = &back[0];
        assert_eq!(listing.place_id, "place-acme");
        assert_eq!(listing.rating, Some(4.2));
        assert_eq!(listing.total_reviews, 37);
        assert_eq!(listing.emails.len(), 2);
        assert_eq!(listing.emails[0].source, EmailSource::Scraped);
        assert_eq!(listing.emails[1].source, EmailSource::Guessed);
        assert_eq!(listing.emails[1].address, "info@acme.example.com");
    }

    #[test]
    fn empty_rating_reads_as_none() {
        let mut listing = sample_listing();
        listing.rating = None;
        listing.emails.clear();
        let mut buf = Vec::new();
        write_listings(&mut buf, &[listing]).expect("write");
        let back = read_listings(buf.as_slice()).expect("read");
        assert_eq!(back[0].rating, None);
        assert!(back[0].emails.is_empty());
    }

    #[test]
    fn malformed_rating_is_reported_with_row_number() {
        let csv = "name,address,phone,website,rating,total_reviews,place_id,search_term,\
                   emails,business_status,types,scraped_at\n\
                   A,,,,not-a-number,0,p1,q,,,,\n";
        let result = read_listings(csv.as_bytes());
        assert!(
            matches!(result, Err(ExportError::MalformedRow { row: 2, .. })),
            "expected MalformedRow at row 2, got: {result:?}"
        );
    }
}
