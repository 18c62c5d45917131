use crate::errors::ConfigError;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_RENT_FIELD: &str = "Current Rent";
pub const DEFAULT_LEASE_YEARS_FIELD: &str = "Lease Years";
pub const DEFAULT_TENANT_FIELD: &str = "Tenant Name";
pub const DEFAULT_DATE_FIELD: &str = "Lease Start Date";
pub const DEFAULT_START_DATE: &str = "01/06/1999";
pub const DEFAULT_END_DATE: &str = "31/08/2007";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// Field used to order records for question 1.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct RentOrder {
    pub field: String,
}

impl Default for RentOrder {
    fn default() -> Self {
        Self {
            field: DEFAULT_RENT_FIELD.to_string(),
        }
    }
}

/// Selects records by lease length for question 2.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct LeaseFilter {
    pub field: String,
    pub years: i64,
}

impl Default for LeaseFilter {
    fn default() -> Self {
        Self {
            field: DEFAULT_LEASE_YEARS_FIELD.to_string(),
            years: 25,
        }
    }
}

/// Open date interval for question 4. Both boundaries are written as
/// dd/mm/yyyy and are themselves excluded from the range.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct DateRange {
    pub field: String,
    pub start: String,
    pub end: String,
}

impl Default for DateRange {
    fn default() -> Self {
        Self {
            field: DEFAULT_DATE_FIELD.to_string(),
            start: DEFAULT_START_DATE.to_string(),
            end: DEFAULT_END_DATE.to_string(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Currency {
    pub symbol: String,
}

impl Default for Currency {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

/// How a tenant name is normalised before substring matching. The same rule
/// is applied to the canonical name and to the record's tenant value.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Upper-case and drop every space, so "O2 (UK) ltd." becomes "O2(UK)LTD.".
    #[default]
    UppercaseNoSpaces,

    /// Upper-case only; spaces must line up exactly.
    Uppercase,
}

impl MatchRule {
    pub fn normalise(&self, name: &str) -> String {
        match self {
            MatchRule::UppercaseNoSpaces => name.to_uppercase().replace(' ', ""),
            MatchRule::Uppercase => name.to_uppercase(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CanonicalTenant {
    pub name: String,
    #[serde(default)]
    pub rule: MatchRule,
}

impl CanonicalTenant {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            rule: MatchRule::default(),
        }
    }
}

/// The tenants counted for question 3, in reporting order.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TenantTable {
    pub field: String,
    pub tenants: Vec<CanonicalTenant>,
}

impl Default for TenantTable {
    fn default() -> Self {
        Self {
            field: DEFAULT_TENANT_FIELD.to_string(),
            tenants: [
                "Arqiva",
                "Vodafone",
                "O2",
                "Everything Everywhere",
                "Cornerstone Telecommunications",
            ]
            .into_iter()
            .map(CanonicalTenant::new)
            .collect(),
        }
    }
}

/// Everything the report needs besides the data itself.
///
/// Every section is optional in a config file; missing sections and keys
/// fall back to their defaults.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of records printed for question 1.
    pub top: usize,
    pub rent: RentOrder,
    pub lease: LeaseFilter,
    pub tenants: TenantTable,
    pub dates: DateRange,
    pub currency: Currency,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top: 5,
            rent: RentOrder::default(),
            lease: LeaseFilter::default(),
            tenants: TenantTable::default(),
            dates: DateRange::default(),
            currency: Currency::default(),
        }
    }
}

impl ReportConfig {
    pub fn from_toml(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: PathBuf::from(path),
            source,
        })?;

        let config: ReportConfig = toml::from_str(&text).map_err(|source| ConfigError::Toml {
            path: PathBuf::from(path),
            source,
        })?;

        if let Some(index) = config
            .tenants
            .tenants
            .iter()
            .position(|tenant| tenant.rule.normalise(&tenant.name).is_empty())
        {
            return Err(ConfigError::EmptyTenantName {
                path: PathBuf::from(path),
                index,
            });
        }

        tracing::debug!(path = %path.display(), "Loaded report config");
        Ok(config)
    }

    /// The header fields the given questions read.
    pub fn required_fields(&self, questions: &Questions) -> Vec<&str> {
        let mut fields = Vec::new();
        if questions.q1 || questions.q2 {
            fields.push(self.rent.field.as_str());
        }
        if questions.q2 {
            fields.push(self.lease.field.as_str());
        }
        if questions.q3 {
            fields.push(self.tenants.field.as_str());
        }
        if questions.q4 {
            fields.push(self.dates.field.as_str());
        }
        fields
    }
}

/// Which of the four report questions to answer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Questions {
    pub q1: bool,
    pub q2: bool,
    pub q3: bool,
    pub q4: bool,
}

impl Questions {
    pub fn any(&self) -> bool {
        self.q1 || self.q2 || self.q3 || self.q4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_default_to_the_five_canonical_tenants() {
        let table = TenantTable::default();

        assert_eq!(table.field, "Tenant Name");
        assert_eq!(
            table
                .tenants
                .iter()
                .map(|tenant| tenant.name.as_str())
                .collect::<Vec<_>>(),
            vec![
                "Arqiva",
                "Vodafone",
                "O2",
                "Everything Everywhere",
                "Cornerstone Telecommunications"
            ]
        );
        assert!(table
            .tenants
            .iter()
            .all(|tenant| tenant.rule == MatchRule::UppercaseNoSpaces));
    }

    #[test]
    fn should_normalise_names_by_rule() {
        assert_eq!(
            MatchRule::UppercaseNoSpaces.normalise("Everything Everywhere Ltd"),
            "EVERYTHINGEVERYWHERELTD"
        );
        assert_eq!(
            MatchRule::Uppercase.normalise("Everything Everywhere Ltd"),
            "EVERYTHING EVERYWHERE LTD"
        );
    }

    #[test]
    fn should_fill_missing_config_sections_with_defaults() {
        let config: ReportConfig = toml::from_str(
            r#"
            top = 3

            [lease]
            years = 20

            [dates]
            field = "Lease End Date"
            "#,
        )
        .unwrap();

        assert_eq!(config.top, 3);
        assert_eq!(config.lease.years, 20);
        assert_eq!(config.lease.field, "Lease Years");
        assert_eq!(config.dates.field, "Lease End Date");
        assert_eq!(config.dates.start, "01/06/1999");
        assert_eq!(config.currency.symbol, "£");
        assert_eq!(config.tenants, TenantTable::default());
    }

    #[test]
    fn should_read_a_custom_tenant_table() {
        let config: ReportConfig = toml::from_str(
            r#"
            [[tenants.tenants]]
            name = "Three"

            [[tenants.tenants]]
            name = "EE Ltd"
            rule = "uppercase"
            "#,
        )
        .unwrap();

        assert_eq!(
            config.tenants.tenants,
            vec![
                CanonicalTenant::new("Three"),
                CanonicalTenant {
                    name: "EE Ltd".to_string(),
                    rule: MatchRule::Uppercase
                }
            ]
        );
    }

    #[test]
    fn should_read_a_config_file() {
        let config = ReportConfig::from_toml(Path::new("data/report.toml")).unwrap();

        assert_eq!(config.top, 3);
        assert_eq!(config.lease.years, 20);
        assert_eq!(
            config.dates,
            DateRange {
                field: "Lease End Date".to_string(),
                start: "01/01/2015".to_string(),
                end: "01/01/2030".to_string()
            }
        );
        assert_eq!(config.currency.symbol, "$");
        assert_eq!(config.rent, RentOrder::default());
    }

    #[test]
    fn should_reject_a_tenant_with_an_empty_name() {
        let err = ReportConfig::from_toml(Path::new("data/empty_tenant.toml")).unwrap_err();

        match err {
            ConfigError::EmptyTenantName { index, .. } => assert_eq!(index, 1),
            other => panic!("expected EmptyTenantName, got {:?}", other),
        }
    }

    #[test]
    fn should_fail_to_read_a_missing_config_file() {
        let err = ReportConfig::from_toml(Path::new("data/missing.toml")).unwrap_err();

        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn should_list_fields_for_selected_questions() {
        let config = ReportConfig::default();
        let questions = Questions {
            q2: true,
            q4: true,
            ..Questions::default()
        };

        assert_eq!(
            config.required_fields(&questions),
            vec!["Current Rent", "Lease Years", "Lease Start Date"]
        );
        assert!(config.required_fields(&Questions::default()).is_empty());
    }
}
