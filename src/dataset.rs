use crate::errors::{FieldError, LoadError};
use csv::Trim;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// A single CSV data row, kept as (field, value) pairs in header order.
///
/// Values are the raw strings from the file. Operations interpret them
/// lazily, so a record with a malformed rent is only a problem for the
/// operations that read the rent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    /// Returns the raw value of `field`, if the record has one.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Like `get`, but reports a missing field as an error naming the
    /// record's position in the sequence being processed.
    pub fn value(&self, field: &str, row: usize) -> Result<&str, FieldError> {
        self.get(field).ok_or_else(|| FieldError::MissingField {
            field: field.to_string(),
            row,
        })
    }

    /// Returns a copy of this record with `field` set to `value`. The field
    /// keeps its position; a field the record lacks is appended.
    pub fn with_value(&self, field: &str, value: impl Into<String>) -> Record {
        let mut record = self.clone();
        let value = value.into();
        match record.fields.iter_mut().find(|(name, _)| name == field) {
            Some((_, existing)) => *existing = value,
            None => record.fields.push((field.to_string(), value)),
        }
        record
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", name, value)?;
        }
        write!(f, "}}")
    }
}

/// The full contents of a mast CSV file: its header row and every data row,
/// in file order.
#[derive(Debug, Default)]
pub struct Dataset {
    headers: Vec<String>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Checks that the header row names every field in `fields`.
    pub fn require<'a>(&self, fields: impl IntoIterator<Item = &'a str>) -> Result<(), FieldError> {
        for field in fields {
            if !self.headers.iter().any(|header| header == field) {
                return Err(FieldError::MissingColumn {
                    field: field.to_string(),
                });
            }
        }

        Ok(())
    }
}

impl TryFrom<PathBuf> for Dataset {
    type Error = LoadError;

    /// Reads the CSV file at `path`, treating the first row as the header.
    ///
    /// Every data row must have exactly as many fields as the header; a row
    /// that is shorter or longer fails the whole load rather than being
    /// silently truncated. Header names are trimmed, data values are kept
    /// exactly as written.
    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        // Row widths are checked below so that a mismatch is reported with
        // its row number instead of csv's generic UnequalLengths error.
        let mut reader = match csv::ReaderBuilder::new()
            .flexible(true)
            .has_headers(true)
            .trim(Trim::Headers)
            .from_path(&path)
        {
            Ok(reader) => reader,
            Err(err) => {
                let not_found = matches!(
                    err.kind(),
                    csv::ErrorKind::Io(source) if source.kind() == io::ErrorKind::NotFound
                );
                if not_found {
                    return Err(LoadError::NotFound(path));
                }
                return Err(LoadError::Csv(err));
            }
        };

        let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();

        let mut records = Vec::new();
        for (index, row) in reader.records().enumerate() {
            let row = row?;
            if row.len() != headers.len() {
                return Err(LoadError::FieldCountMismatch {
                    row: index + 1,
                    expected: headers.len(),
                    found: row.len(),
                });
            }

            records.push(headers.iter().cloned().zip(row.iter()).collect::<Record>());
        }

        tracing::debug!(
            path = %path.display(),
            columns = headers.len(),
            records = records.len(),
            "Loaded mast dataset"
        );

        Ok(Dataset { headers, records })
    }
}
