//! Comma-separated export of a filtered subset.

use super::{CandidateRecord, FormUpload};
use chrono::{DateTime, TimeZone};
use std::fmt::Display;

/// Header row of the export, in column order.
pub const EXPORT_HEADERS: [&str; 16] = [
    "Client Name",
    "First Name",
    "Last Name",
    "Initiated",
    "Notes",
    "G",
    "M",
    "RWP",
    "Order Status",
    "Updated",
    "Profile Status",
    "Background-ID",
    "Background-Status",
    "Drug-ID",
    "Drug-Status",
    "Phone",
];

/// Serialises `records` as CSV with a header row.
///
/// Form bits render as `Yes`/`No`. Fields containing a comma, quote, or line
/// break are quoted with embedded quotes doubled.
#[must_use]
pub fn export_csv(records: &[CandidateRecord]) -> String {
    let mut output = String::new();
    push_row(&mut output, EXPORT_HEADERS.iter().copied());
    for record in records {
        let profile = record.profile();
        let statuses = record.statuses();
        let updated = record.updated_at().format("%Y-%m-%d %H:%M:%S").to_string();
        let score = record.assessment().score.to_string();
        push_row(
            &mut output,
            [
                record.client_id().as_str(),
                profile.first_name.as_str(),
                profile.last_name.as_str(),
                record.application_date(),
                record.recruiter_notes(),
                yes_no(record.forms().gcic),
                yes_no(record.forms().mec),
                score.as_str(),
                statuses.order.as_str(),
                updated.as_str(),
                statuses.profile.as_str(),
                statuses.background_id.as_str(),
                statuses.background.as_str(),
                statuses.drug_test_id.as_str(),
                statuses.drug_test.as_str(),
                profile.phone.as_str(),
            ],
        );
    }
    output
}

/// Returns the download file name for an export taken at `now`.
#[must_use]
pub fn export_file_name<Tz>(now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("PEAKATS_Export_{}.csv", now.format("%Y%m%d_%H%M"))
}

const fn yes_no(form: FormUpload) -> &'static str {
    if form.is_uploaded() { "Yes" } else { "No" }
}

fn push_row<'a>(output: &mut String, fields: impl IntoIterator<Item = &'a str>) {
    for (index, field) in fields.into_iter().enumerate() {
        if index > 0 {
            output.push(',');
        }
        push_field(output, field);
    }
    output.push('\n');
}

fn push_field(output: &mut String, field: &str) {
    let needs_quoting = field.contains([',', '"', '\n', '\r']);
    if !needs_quoting {
        output.push_str(field);
        return;
    }
    output.push('"');
    for ch in field.chars() {
        if ch == '"' {
            output.push_str("\"\"");
        } else {
            output.push(ch);
        }
    }
    output.push('"');
}
