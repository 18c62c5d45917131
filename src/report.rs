use crate::config::{Questions, ReportConfig};
use crate::currency::float_to_currency;
use crate::dataset::Record;
use crate::engine::{self, TenantCounts};
use crate::errors::ReportError;
use std::io::Write;

/// Records with the configured lease length and their combined rent.
#[derive(Debug, PartialEq)]
pub struct LeaseAnswer {
    pub records: Vec<Record>,
    pub total_rent: f64,
}

/// The answer to each selected question. Unselected questions stay `None`.
#[derive(Debug, Default, PartialEq)]
pub struct Answers {
    pub lowest_rents: Option<Vec<Record>>,
    pub lease: Option<LeaseAnswer>,
    pub tenant_counts: Option<TenantCounts>,
    pub lease_starts: Option<Vec<Record>>,
}

impl Answers {
    /// Runs the operations behind each selected question.
    ///
    /// Every answer is computed before anything is written, so a bad value
    /// anywhere aborts the report without partial output.
    pub fn compute(
        records: &[Record],
        config: &ReportConfig,
        questions: &Questions,
    ) -> Result<Self, ReportError> {
        let mut answers = Answers::default();

        if questions.q1 {
            let mut sorted = engine::current_rent_ascending(records, &config.rent)?;
            sorted.truncate(config.top);
            answers.lowest_rents = Some(sorted);
        }

        if questions.q2 {
            // Positions are kept so a bad rent is reported by its file row.
            let matched = engine::lease_year_rows(records, &config.lease)?;
            let total_rent = engine::total_rent_of(matched.iter().copied(), &config.rent.field)?;
            answers.lease = Some(LeaseAnswer {
                records: matched.into_iter().map(|(_, record)| record.clone()).collect(),
                total_rent,
            });
        }

        if questions.q3 {
            answers.tenant_counts = Some(engine::tenant_mast_count(records, &config.tenants)?);
        }

        if questions.q4 {
            answers.lease_starts = Some(engine::lease_start_date_range(records, &config.dates)?);
        }

        Ok(answers)
    }

    /// Writes the computed answers in question order.
    pub fn write_to<W: Write>(&self, config: &ReportConfig, mut out: W) -> Result<(), ReportError> {
        if let Some(records) = &self.lowest_rents {
            writeln!(out, "\nOutputting the solution to question 1b...\n")?;
            write_records(&mut out, records)?;
        }

        if let Some(lease) = &self.lease {
            writeln!(out, "\nOutputting the solution to question 2a...\n")?;
            write_records(&mut out, &lease.records)?;

            writeln!(out, "\nOutputting the solution to question 2b...\n")?;
            writeln!(
                out,
                "{}",
                float_to_currency(lease.total_rent, &config.currency.symbol)
            )?;
        }

        if let Some(counts) = &self.tenant_counts {
            writeln!(out, "\nOutputting the solution to question 3...\n")?;
            for (tenant, count) in counts.iter() {
                let noun = if count > 1 { "masts" } else { "mast" };
                writeln!(out, "{}: has {} {}", tenant, count, noun)?;
            }
        }

        if let Some(records) = &self.lease_starts {
            writeln!(out, "\nOutputting the solution to question 4...\n")?;
            write_records(&mut out, records)?;
        }

        out.flush()?;
        Ok(())
    }
}

fn write_records<W: Write>(out: &mut W, records: &[Record]) -> Result<(), ReportError> {
    for record in records {
        writeln!(out, "{}", record)?;
    }
    Ok(())
}
