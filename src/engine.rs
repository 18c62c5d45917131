use crate::config::{DateRange, LeaseFilter, RentOrder, TenantTable};
use crate::dataset::Record;
use crate::errors::FieldError;
use chrono::NaiveDate;

/// Date format used by the mast CSV, e.g. "31 Jan 2001".
const RECORD_DATE_FORMAT: &str = "%d %b %Y";

/// Date format of range boundaries and of rewritten record dates, e.g.
/// "31/01/2001".
const DAY_MONTH_YEAR_FORMAT: &str = "%d/%m/%Y";

/// Mast counts per canonical tenant, in tenant table order. Every tenant in
/// the table is present, including those with no masts.
#[derive(Clone, Debug, PartialEq)]
pub struct TenantCounts {
    counts: Vec<(String, usize)>,
}

impl TenantCounts {
    pub fn get(&self, tenant: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == tenant)
            .map(|(_, count)| *count)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
    }
}

fn parse_float(record: &Record, field: &str, row: usize) -> Result<f64, FieldError> {
    let value = record.value(field, row)?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| FieldError::NotNumeric {
            field: field.to_string(),
            value: value.to_string(),
            row,
        })
}

fn parse_integer(record: &Record, field: &str, row: usize) -> Result<i64, FieldError> {
    let value = record.value(field, row)?;
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| FieldError::NotInteger {
            field: field.to_string(),
            value: value.to_string(),
            row,
        })
}

/// chrono's `%Y` takes any number of digits, so "31 Jan 01" would parse as
/// the year 1. Both date formats end in the year, which must be four digits.
fn has_four_digit_year(value: &str) -> bool {
    value
        .rsplit(|c: char| c == '/' || c.is_whitespace())
        .next()
        .map_or(false, |year| year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
}

fn parse_date(value: &str, format: &str) -> Option<NaiveDate> {
    if !has_four_digit_year(value) {
        return None;
    }
    NaiveDate::parse_from_str(value, format).ok()
}

fn parse_boundary(value: &str) -> Result<NaiveDate, FieldError> {
    parse_date(value, DAY_MONTH_YEAR_FORMAT).ok_or_else(|| FieldError::InvalidBoundary {
        value: value.to_string(),
    })
}

/// Returns the records ordered by the numeric value of `order.field`,
/// lowest first. Records with equal values keep their relative order.
///
/// Every record is converted before sorting, so a single non-numeric value
/// fails the whole operation.
pub fn current_rent_ascending(
    records: &[Record],
    order: &RentOrder,
) -> Result<Vec<Record>, FieldError> {
    let mut keyed = records
        .iter()
        .enumerate()
        .map(|(row, record)| Ok::<_, FieldError>((parse_float(record, &order.field, row)?, record)))
        .collect::<Result<Vec<_>, _>>()?;

    // sort_by is stable, which keeps ties in file order.
    keyed.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    Ok(keyed.into_iter().map(|(_, record)| record.clone()).collect())
}

/// Returns the records whose `filter.field` is exactly `filter.years`, in
/// their original order.
pub fn lease_years(records: &[Record], filter: &LeaseFilter) -> Result<Vec<Record>, FieldError> {
    Ok(lease_year_rows(records, filter)?
        .into_iter()
        .map(|(_, record)| record.clone())
        .collect())
}

/// Like `lease_years`, but borrows the matches and pairs each with its
/// position in `records`.
pub fn lease_year_rows<'a>(
    records: &'a [Record],
    filter: &LeaseFilter,
) -> Result<Vec<(usize, &'a Record)>, FieldError> {
    let mut matched = Vec::new();
    for (row, record) in records.iter().enumerate() {
        if parse_integer(record, &filter.field, row)? == filter.years {
            matched.push((row, record));
        }
    }

    tracing::debug!(
        field = %filter.field,
        years = filter.years,
        matched = matched.len(),
        "Filtered records by lease length"
    );
    Ok(matched)
}

/// Sums the numeric value of `field` over every record, left to right.
pub fn total_rent(records: &[Record], field: &str) -> Result<f64, FieldError> {
    total_rent_of(records.iter().enumerate(), field)
}

/// Sums `field` over (position, record) pairs. Errors name the given
/// position, so a subset of a dataset still reports its file row.
pub fn total_rent_of<'a>(
    rows: impl IntoIterator<Item = (usize, &'a Record)>,
    field: &str,
) -> Result<f64, FieldError> {
    rows.into_iter()
        .try_fold(0.0, |total: f64, (row, record)| {
            Ok(total + parse_float(record, field, row)?)
        })
}

/// Counts masts per canonical tenant.
///
/// A record counts towards every tenant whose normalised name occurs inside
/// the record's normalised tenant value, so a joint tenancy such as
/// "Vodafone and O2" is counted once for each of them.
pub fn tenant_mast_count(records: &[Record], table: &TenantTable) -> Result<TenantCounts, FieldError> {
    let mut counts: Vec<(String, usize)> = table
        .tenants
        .iter()
        .map(|tenant| (tenant.name.clone(), 0))
        .collect();

    // An empty canonical name would be a substring of every tenant value.
    let canonical: Vec<String> = table
        .tenants
        .iter()
        .map(|tenant| tenant.rule.normalise(&tenant.name))
        .collect();

    for (row, record) in records.iter().enumerate() {
        let tenant_name = record.value(&table.field, row)?;

        let mut matches = 0;
        for ((tenant, name), (_, count)) in table
            .tenants
            .iter()
            .zip(canonical.iter())
            .zip(counts.iter_mut())
        {
            if !name.is_empty() && tenant.rule.normalise(tenant_name).contains(name.as_str()) {
                *count += 1;
                matches += 1;
            }
        }

        if matches > 1 {
            tracing::warn!(
                row = row + 1,
                tenant = %tenant_name,
                matches,
                "Tenant name matches more than one canonical tenant"
            );
        }
    }

    Ok(TenantCounts { counts })
}

/// Returns the records whose `range.field` date lies strictly between
/// `range.start` and `range.end`, with that field rewritten as dd/mm/yyyy.
///
/// The input records are left untouched; the returned records are copies.
pub fn lease_start_date_range(
    records: &[Record],
    range: &DateRange,
) -> Result<Vec<Record>, FieldError> {
    let start = parse_boundary(&range.start)?;
    let end = parse_boundary(&range.end)?;

    let mut matched = Vec::new();
    for (row, record) in records.iter().enumerate() {
        let value = record.value(&range.field, row)?;
        let date =
            parse_date(value, RECORD_DATE_FORMAT).ok_or_else(|| FieldError::InvalidDate {
                field: range.field.clone(),
                value: value.to_string(),
                row,
            })?;

        if start < date && date < end {
            matched.push(record.with_value(
                &range.field,
                date.format(DAY_MONTH_YEAR_FORMAT).to_string(),
            ));
        }
    }

    tracing::debug!(
        field = %range.field,
        start = %start,
        end = %end,
        matched = matched.len(),
        "Filtered records by date range"
    );
    Ok(matched)
}
