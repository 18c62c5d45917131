use std::error::Error;
use std::fmt;
use std::fmt::Formatter;
use std::io;
use std::path::PathBuf;

/// Failures raised while reading a CSV file into a Dataset.
#[derive(Debug)]
pub enum LoadError {
    NotFound(PathBuf),
    Csv(csv::Error),

    /// A data row does not have the same number of columns as the header.
    /// `row` is the 1-based data row number, header excluded.
    FieldCountMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Failures raised by the report operations when a record's field cannot be
/// used the way the operation needs it.
///
/// `row` is the position of the record within the sequence handed to the
/// operation.
#[derive(Debug, PartialEq)]
pub enum FieldError {
    /// The CSV header has no column with this name.
    MissingColumn {
        field: String,
    },
    MissingField {
        field: String,
        row: usize,
    },
    NotNumeric {
        field: String,
        value: String,
        row: usize,
    },
    NotInteger {
        field: String,
        value: String,
        row: usize,
    },
    InvalidDate {
        field: String,
        value: String,
        row: usize,
    },
    InvalidBoundary {
        value: String,
    },
}

#[derive(Debug)]
pub enum ReportError {
    Field(FieldError),
    Output(io::Error),
}

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: io::Error },
    Toml { path: PathBuf, source: toml::de::Error },

    /// A tenant table entry whose name normalises to nothing.
    EmptyTenantName { path: PathBuf, index: usize },
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::NotFound(path) => write!(f, "no such file: {}", path.display()),
            LoadError::Csv(err) => write!(f, "failed to read csv data: {}", err),
            LoadError::FieldCountMismatch {
                row,
                expected,
                found,
            } => write!(
                f,
                "data row {} has {} fields but the header has {}",
                row, found, expected
            ),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::MissingColumn { field } => {
                write!(f, "header has no column named {:?}", field)
            }
            FieldError::MissingField { field, row } => {
                write!(f, "record {} has no field named {:?}", row + 1, field)
            }
            FieldError::NotNumeric { field, value, row } => write!(
                f,
                "record {} field {:?} is not a number: {:?}",
                row + 1,
                field,
                value
            ),
            FieldError::NotInteger { field, value, row } => write!(
                f,
                "record {} field {:?} is not an integer: {:?}",
                row + 1,
                field,
                value
            ),
            FieldError::InvalidDate { field, value, row } => write!(
                f,
                "record {} field {:?} is not a date like \"31 Jan 2001\": {:?}",
                row + 1,
                field,
                value
            ),
            FieldError::InvalidBoundary { value } => write!(
                f,
                "date boundary {:?} is not a date like \"31/01/2001\"",
                value
            ),
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::Field(err) => write!(f, "{}", err),
            ReportError::Output(err) => write!(f, "failed to write report: {}", err),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Toml { path, source } => {
                write!(f, "failed to parse config {}: {}", path.display(), source)
            }
            ConfigError::EmptyTenantName { path, index } => write!(
                f,
                "config {} tenant {} has an empty name",
                path.display(),
                index + 1
            ),
        }
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::Csv(err)
    }
}

impl From<FieldError> for ReportError {
    fn from(err: FieldError) -> Self {
        ReportError::Field(err)
    }
}

impl From<io::Error> for ReportError {
    fn from(err: io::Error) -> Self {
        ReportError::Output(err)
    }
}

impl Error for LoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LoadError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl Error for FieldError {}

impl Error for ReportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ReportError::Field(err) => Some(err),
            ReportError::Output(err) => Some(err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Toml { source, .. } => Some(source),
            ConfigError::EmptyTenantName { .. } => None,
        }
    }
}
