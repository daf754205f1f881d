use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId(pub String);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One posting as delivered by the job feed.
///
/// Everything except the identifier is optional: the feed is not trusted to
/// populate every field, and a field that arrives with the wrong JSON type is
/// treated as absent. Predicates that need an absent field exclude the record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    #[serde(rename = "jdUid")]
    pub id: JobId,
    #[serde(default, deserialize_with = "lenient")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_role: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub location: Option<String>,
    #[serde(rename = "minExp", default, deserialize_with = "lenient")]
    pub min_experience_years: Option<u32>,
    #[serde(rename = "maxExp", default, deserialize_with = "lenient")]
    pub max_experience_years: Option<u32>,
    #[serde(rename = "minJdSalary", default, deserialize_with = "non_negative")]
    pub min_base_salary: Option<f64>,
    #[serde(rename = "maxJdSalary", default, deserialize_with = "non_negative")]
    pub max_base_salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub salary_currency_code: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub logo_url: Option<String>,
    #[serde(rename = "jobDetailsFromCompany", default, deserialize_with = "lenient")]
    pub description: Option<String>,
    #[serde(rename = "jdLink", default, deserialize_with = "lenient")]
    pub job_link: Option<String>,
}

impl JobRecord {
    /// Bare record with only an identifier; handy for building fixtures.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: JobId(id.into()),
            company_name: None,
            job_role: None,
            location: None,
            min_experience_years: None,
            max_experience_years: None,
            min_base_salary: None,
            max_base_salary: None,
            salary_currency_code: None,
            logo_url: None,
            description: None,
            job_link: None,
        }
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Salaries are non-negative amounts; anything else decodes as absent.
fn non_negative<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let amount = lenient::<D, f64>(deserializer)?;
    Ok(amount.filter(|amount| amount.is_finite() && *amount >= 0.0))
}

/// Work arrangement accepted by the remote/on-site control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteOption {
    Remote,
    Onsite,
}

impl RemoteOption {
    pub const fn ordered() -> [Self; 2] {
        [Self::Remote, Self::Onsite]
    }

    /// Literal value compared against a record's `location`.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Onsite => "onsite",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Onsite => "On-site",
        }
    }

    pub fn from_token(value: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|option| option.token() == value)
    }
}

impl fmt::Display for RemoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_feed_entry() {
        let raw = r#"{
            "jdUid": "cfff35ac-01",
            "jdLink": "https://weekday.works",
            "jobDetailsFromCompany": "We build things.",
            "maxJdSalary": 61,
            "minJdSalary": null,
            "salaryCurrencyCode": "USD",
            "location": "delhi ncr",
            "minExp": 3,
            "maxExp": 6,
            "jobRole": "frontend",
            "companyName": "Dropbox",
            "logoUrl": "https://logo.clearbit.com/dropbox.com"
        }"#;

        let record: JobRecord = serde_json::from_str(raw).expect("record decodes");
        assert_eq!(record.id, JobId("cfff35ac-01".to_string()));
        assert_eq!(record.company_name.as_deref(), Some("Dropbox"));
        assert_eq!(record.min_experience_years, Some(3));
        assert_eq!(record.min_base_salary, None);
        assert_eq!(record.max_base_salary, Some(61.0));
    }

    #[test]
    fn mistyped_fields_become_absent() {
        let raw = r#"{ "jdUid": "x", "minExp": "three", "minJdSalary": -5, "location": 42 }"#;

        let record: JobRecord = serde_json::from_str(raw).expect("record decodes");
        assert_eq!(record.min_experience_years, None);
        assert_eq!(record.location, None);
        assert_eq!(record.min_base_salary, None);
    }

    #[test]
    fn negative_salaries_become_absent() {
        let raw = r#"{ "jdUid": "x", "minJdSalary": -5, "maxJdSalary": 0 }"#;

        let record: JobRecord = serde_json::from_str(raw).expect("record decodes");
        assert_eq!(record.min_base_salary, None);
        assert_eq!(record.max_base_salary, Some(0.0));
    }

    #[test]
    fn missing_identifier_is_rejected() {
        let raw = r#"{ "companyName": "Acme" }"#;
        assert!(serde_json::from_str::<JobRecord>(raw).is_err());
    }

    #[test]
    fn remote_tokens_round_through_lookup() {
        assert_eq!(RemoteOption::from_token("onsite"), Some(RemoteOption::Onsite));
        assert_eq!(RemoteOption::from_token("Remote"), None);
        assert_eq!(RemoteOption::Onsite.label(), "On-site");
    }
}
