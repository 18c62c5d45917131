use crate::config::{Questions, ReportConfig};
use clap::{value_t_or_exit, App, Arg, ArgMatches};
use std::ffi::OsString;

pub const DEFAULT_CSV_FILE: &str = "Python Developer Test Dataset.csv";

pub struct Args {
    pub csv_file: String,
    pub config_file: Option<String>,
    pub questions: Questions,
    pub debug: bool,
    years: Option<i64>,
    top: Option<usize>,
    start: Option<String>,
    end: Option<String>,
    date_field: Option<String>,
    currency: Option<String>,
}

impl Args {
    pub fn parse() -> Self {
        Self::from_iter(std::env::args_os())
    }

    pub fn from_iter<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = App::new("mast_report")
            .version("0.1.0")
            .about("Answers questions about a CSV dataset of phone mast leases")
            .arg(Arg::with_name("q1").long("q1").help("Return answer to question 1"))
            .arg(Arg::with_name("q2").long("q2").help("Return answer to question 2"))
            .arg(Arg::with_name("q3").long("q3").help("Return answer to question 3"))
            .arg(Arg::with_name("q4").long("q4").help("Return answer to question 4"))
            .arg(Arg::with_name("file")
                .long("file").short("f").takes_value(true).default_value(DEFAULT_CSV_FILE)
                .help("path of CSV file to read from"))
            .arg(Arg::with_name("config")
                .long("config").short("c").takes_value(true)
                .help("path of a TOML file overriding the report defaults"))
            .arg(Arg::with_name("years")
                .long("years").takes_value(true).help("lease length selected by question 2"))
            .arg(Arg::with_name("top")
                .long("top").takes_value(true).help("number of records printed for question 1"))
            .arg(Arg::with_name("start")
                .long("start").takes_value(true).help("exclusive start date (dd/mm/yyyy) for question 4"))
            .arg(Arg::with_name("end")
                .long("end").takes_value(true).help("exclusive end date (dd/mm/yyyy) for question 4"))
            .arg(Arg::with_name("date-field")
                .long("date-field").takes_value(true).help("date column filtered by question 4"))
            .arg(Arg::with_name("currency")
                .long("currency").takes_value(true).help("currency symbol for rent totals"))
            .arg(Arg::with_name("debug").long("debug").help("enable debug logging on stderr"))
            .get_matches_from(args);

        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Self {
        let owned = |name: &str| matches.value_of(name).map(String::from);

        Self {
            csv_file: matches.value_of("file").unwrap_or(DEFAULT_CSV_FILE).to_string(),
            config_file: owned("config"),
            questions: Questions {
                q1: matches.is_present("q1"),
                q2: matches.is_present("q2"),
                q3: matches.is_present("q3"),
                q4: matches.is_present("q4"),
            },
            debug: matches.is_present("debug"),
            years: if matches.is_present("years") {
                Some(value_t_or_exit!(matches, "years", i64))
            } else {
                None
            },
            top: if matches.is_present("top") {
                Some(value_t_or_exit!(matches, "top", usize))
            } else {
                None
            },
            start: owned("start"),
            end: owned("end"),
            date_field: owned("date-field"),
            currency: owned("currency"),
        }
    }

    /// Overrides `config` with any values given on the command line.
    pub fn apply(&self, config: &mut ReportConfig) {
        if let Some(years) = self.years {
            config.lease.years = years;
        }
        if let Some(top) = self.top {
            config.top = top;
        }
        if let Some(start) = &self.start {
            config.dates.start = start.clone();
        }
        if let Some(end) = &self.end {
            config.dates.end = end.clone();
        }
        if let Some(field) = &self.date_field {
            config.dates.field = field.clone();
        }
        if let Some(symbol) = &self.currency {
            config.currency.symbol = symbol.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_no_questions() {
        let args = Args::from_iter(["mast_report"]);

        assert!(!args.questions.any());
        assert_eq!(args.csv_file, DEFAULT_CSV_FILE);
        assert_eq!(args.config_file, None);
        assert!(!args.debug);
    }

    #[test]
    fn should_select_any_subset_of_questions() {
        let args = Args::from_iter(["mast_report", "--q1", "--q3", "--file", "data/masts_basic.csv"]);

        assert_eq!(
            args.questions,
            Questions {
                q1: true,
                q2: false,
                q3: true,
                q4: false
            }
        );
        assert_eq!(args.csv_file, "data/masts_basic.csv");
    }

    #[test]
    fn should_override_config_values() {
        let args = Args::from_iter([
            "mast_report",
            "--years",
            "20",
            "--top",
            "3",
            "--start",
            "01/01/2000",
            "--end",
            "01/01/2010",
            "--date-field",
            "Lease End Date",
            "--currency",
            "$",
        ]);
        let mut config = ReportConfig::default();

        args.apply(&mut config);

        assert_eq!(config.lease.years, 20);
        assert_eq!(config.top, 3);
        assert_eq!(config.dates.start, "01/01/2000");
        assert_eq!(config.dates.end, "01/01/2010");
        assert_eq!(config.dates.field, "Lease End Date");
        assert_eq!(config.currency.symbol, "$");
    }

    #[test]
    fn should_leave_config_alone_without_overrides() {
        let args = Args::from_iter(["mast_report", "--q2"]);
        let mut config = ReportConfig::default();

        args.apply(&mut config);

        assert_eq!(config, ReportConfig::default());
    }
}
