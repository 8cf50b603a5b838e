//! Reporting utilities: mapping run records to report rows.

use serde_json::Value;

use crate::domain::{AccountDonation, DonationRecord, DonationRow, UnmatchedAccount, UnmatchedRow, scalar_text};
use crate::error::AppError;

pub mod format;

pub use format::*;

/// Map a matched donation to its report row.
pub fn donation_row(record: &DonationRecord) -> DonationRow {
    DonationRow {
        donor_name: scalar_text(&record.bb_donor_name),
        blackbaud_id: scalar_text(&record.bb_donor_id),
        raise_donors_id: scalar_text(&record.rd_donor_id),
        donation_amount: scalar_text(&record.donation.amount),
        status: scalar_text(&record.rd_donation_status.name),
    }
}

/// Map an unmatched donor to its report row.
///
/// Fails only when a donation amount is not numeric.
pub fn unmatched_row(account: &UnmatchedAccount) -> Result<UnmatchedRow, AppError> {
    let total = total_donations(&account.donations)?;
    Ok(UnmatchedRow {
        donor_name: format!("{} {}", scalar_text(&account.first_name), scalar_text(&account.last_name)),
        raise_donors_id: scalar_text(&account.id),
        address: derive_address(&account.addresses),
        donation_amount: format_total(total, account.donations.len()),
    })
}

/// Format the first address as `"{address1}, {city}, {state} {zip}"`.
///
/// Any missing piece (not an array, no entries, non-object entry, absent or
/// null key) yields `None`.
pub fn derive_address(addresses: &Value) -> Option<String> {
    let first = addresses.as_array()?.first()?;
    let address1 = address_field(first, "address1")?;
    let city = address_field(first, "city")?;
    let state = address_field(first, "state")?;
    let zip = address_field(first, "zip")?;
    Some(format!("{address1}, {city}, {state} {zip}"))
}

fn address_field(entry: &Value, key: &str) -> Option<String> {
    match entry.get(key)? {
        Value::Null => None,
        value => Some(scalar_text(value)),
    }
}

/// Sum every donation amount as a float. An empty list sums to zero.
pub fn total_donations(donations: &[AccountDonation]) -> Result<f64, AppError> {
    donations.iter().try_fold(0.0, |acc, d| Ok(acc + parse_amount(&d.amount)?))
}

fn parse_amount(value: &Value) -> Result<f64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| AppError::schema(format!("Donation amount is not numeric: {value}")))
}

/// Render a donation total for the unmatched report.
///
/// No donations renders as `0`; any sum keeps at least one decimal place
/// (`25.0`, `10.5`). Fractional sums use the shortest round-trip decimal and
/// never switch to exponent notation, so `0.00001` stays `0.00001`.
pub fn format_total(total: f64, donation_count: usize) -> String {
    if donation_count == 0 {
        return "0".to_string();
    }
    if total.is_finite() && total.fract() == 0.0 && total.abs() < 1e16 {
        format!("{total:.1}")
    } else {
        format!("{total}")
    }
}
