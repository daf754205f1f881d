use super::domain::RemoteOption;
use serde::Serialize;

/// Current value of every filter control. `None` (or an empty search string)
/// means the control is unset and its pass is skipped; `Some(0)` is a real
/// threshold.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub search_text: String,
    pub min_experience: Option<u32>,
    pub min_base_pay: Option<f64>,
    pub remote_option: Option<RemoteOption>,
    pub role: Option<String>,
}

impl FilterCriteria {
    pub fn apply(&mut self, update: CriterionUpdate) {
        match update {
            CriterionUpdate::SearchText(value) => self.search_text = value,
            CriterionUpdate::MinExperience(value) => self.min_experience = value,
            CriterionUpdate::MinBasePay(value) => self.min_base_pay = value,
            CriterionUpdate::RemoteOption(value) => self.remote_option = value,
            CriterionUpdate::Role(value) => self.role = value,
        }
    }

    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty()
            && self.min_experience.is_none()
            && self.min_base_pay.is_none()
            && self.remote_option.is_none()
            && self.role.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionName {
    SearchText,
    MinExperience,
    MinBasePay,
    RemoteOption,
    Role,
}

impl CriterionName {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::SearchText,
            Self::MinExperience,
            Self::MinBasePay,
            Self::RemoteOption,
            Self::Role,
        ]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::SearchText => "searchText",
            Self::MinExperience => "minExperience",
            Self::MinBasePay => "minBasePay",
            Self::RemoteOption => "remoteOption",
            Self::Role => "role",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CriteriaError> {
        match raw.trim() {
            "searchText" | "search_text" | "search" => Ok(Self::SearchText),
            "minExperience" | "min_experience" => Ok(Self::MinExperience),
            "minBasePay" | "min_base_pay" => Ok(Self::MinBasePay),
            "remoteOption" | "remote_option" | "remote" => Ok(Self::RemoteOption),
            "role" => Ok(Self::Role),
            other => Err(CriteriaError::UnknownCriterion(other.to_string())),
        }
    }
}

/// A new value for exactly one criterion, as emitted by its control.
#[derive(Debug, Clone, PartialEq)]
pub enum CriterionUpdate {
    SearchText(String),
    MinExperience(Option<u32>),
    MinBasePay(Option<f64>),
    RemoteOption(Option<RemoteOption>),
    Role(Option<String>),
}

impl CriterionUpdate {
    pub fn name(&self) -> CriterionName {
        match self {
            Self::SearchText(_) => CriterionName::SearchText,
            Self::MinExperience(_) => CriterionName::MinExperience,
            Self::MinBasePay(_) => CriterionName::MinBasePay,
            Self::RemoteOption(_) => CriterionName::RemoteOption,
            Self::Role(_) => CriterionName::Role,
        }
    }

    /// Parses a `(name, value)` pair coming from a control. The empty string
    /// unsets the criterion, whatever its type.
    pub fn parse(name: &str, raw: &str) -> Result<Self, CriteriaError> {
        Self::from_raw(CriterionName::parse(name)?, raw)
    }

    pub fn from_raw(name: CriterionName, raw: &str) -> Result<Self, CriteriaError> {
        if raw.is_empty() {
            return Ok(Self::unset(name));
        }

        match name {
            CriterionName::SearchText => Ok(Self::SearchText(raw.to_string())),
            CriterionName::MinExperience => raw
                .trim()
                .parse::<u32>()
                .map(|years| Self::MinExperience(Some(years)))
                .map_err(|_| invalid(name, "a whole number of years", raw)),
            CriterionName::MinBasePay => match raw.trim().parse::<f64>() {
                Ok(amount) if amount.is_finite() && amount >= 0.0 => {
                    Ok(Self::MinBasePay(Some(amount)))
                }
                _ => Err(invalid(name, "a non-negative amount", raw)),
            },
            CriterionName::RemoteOption => RemoteOption::from_token(raw)
                .map(|option| Self::RemoteOption(Some(option)))
                .ok_or_else(|| invalid(name, "'remote' or 'onsite'", raw)),
            CriterionName::Role => Ok(Self::Role(Some(raw.to_string()))),
        }
    }

    pub fn unset(name: CriterionName) -> Self {
        match name {
            CriterionName::SearchText => Self::SearchText(String::new()),
            CriterionName::MinExperience => Self::MinExperience(None),
            CriterionName::MinBasePay => Self::MinBasePay(None),
            CriterionName::RemoteOption => Self::RemoteOption(None),
            CriterionName::Role => Self::Role(None),
        }
    }
}

fn invalid(name: CriterionName, expected: &'static str, raw: &str) -> CriteriaError {
    CriteriaError::InvalidValue {
        criterion: name.key(),
        expected,
        value: raw.to_string(),
    }
}

/// Rejected control input. Raised while parsing, never by the engine itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriteriaError {
    #[error("unknown filter criterion '{0}'")]
    UnknownCriterion(String),
    #[error("{criterion} expects {expected}, got '{value}'")]
    InvalidValue {
        criterion: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_unsets_every_criterion() {
        for name in CriterionName::ordered() {
            let update = CriterionUpdate::from_raw(name, "").expect("empty is always valid");
            assert_eq!(update, CriterionUpdate::unset(name));
        }
    }

    #[test]
    fn zero_threshold_is_distinct_from_unset() {
        let update = CriterionUpdate::parse("minExperience", "0").expect("zero parses");
        assert_eq!(update, CriterionUpdate::MinExperience(Some(0)));

        let mut criteria = FilterCriteria::default();
        criteria.apply(update);
        assert!(!criteria.is_unconstrained());
    }

    #[test]
    fn accepts_snake_case_aliases() {
        let update = CriterionUpdate::parse("min_base_pay", "50000").expect("alias parses");
        assert_eq!(update, CriterionUpdate::MinBasePay(Some(50000.0)));
        assert_eq!(update.name(), CriterionName::MinBasePay);
    }

    #[test]
    fn rejects_malformed_values() {
        assert!(matches!(
            CriterionUpdate::parse("minExperience", "abc"),
            Err(CriteriaError::InvalidValue {
                criterion: "minExperience",
                ..
            })
        ));
        assert!(CriterionUpdate::parse("minBasePay", "-10").is_err());
        assert!(CriterionUpdate::parse("minBasePay", "NaN").is_err());
        assert!(CriterionUpdate::parse("remoteOption", "hybrid").is_err());
        assert_eq!(
            CriterionUpdate::parse("salary", "1"),
            Err(CriteriaError::UnknownCriterion("salary".to_string()))
        );
    }

    #[test]
    fn text_values_are_kept_verbatim() {
        let update = CriterionUpdate::parse("searchText", "  Acme ").expect("text parses");
        assert_eq!(update, CriterionUpdate::SearchText("  Acme ".to_string()));

        let update = CriterionUpdate::parse("role", "Full Stack").expect("role parses");
        assert_eq!(update, CriterionUpdate::Role(Some("Full Stack".to_string())));
    }
}
