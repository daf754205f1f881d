use super::domain::RemoteOption;
use serde::Serialize;

pub const ROLE_CATEGORIES: [&str; 11] = [
    "Frontend",
    "Backend",
    "Full Stack",
    "DevOps",
    "Data",
    "Design",
    "Quality Assurance",
    "Management",
    "Marketing",
    "Sales",
    "Customer Support",
];

pub const MAX_EXPERIENCE_CHOICE: u32 = 10;
pub const BASE_PAY_STEP: u32 = 10_000;
pub const MAX_BASE_PAY_CHOICE: u32 = 100_000;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Choice<T> {
    pub value: T,
    pub label: String,
}

/// What each filter control offers. Every list implicitly starts with "None",
/// which maps to the unset value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlOptions {
    pub min_experience: Vec<Choice<u32>>,
    pub min_base_pay: Vec<Choice<u32>>,
    pub remote_option: Vec<Choice<&'static str>>,
    pub role: Vec<Choice<String>>,
}

pub fn control_options() -> ControlOptions {
    let min_experience = (0..=MAX_EXPERIENCE_CHOICE)
        .map(|years| Choice {
            value: years,
            label: experience_label(years),
        })
        .collect();

    let min_base_pay = (0..=MAX_BASE_PAY_CHOICE)
        .step_by(BASE_PAY_STEP as usize)
        .map(|amount| Choice {
            value: amount,
            label: format!("${}", group_thousands(amount)),
        })
        .collect();

    let remote_option = RemoteOption::ordered()
        .into_iter()
        .map(|option| Choice {
            value: option.token(),
            label: option.label().to_string(),
        })
        .collect();

    // Controls emit the lowercased label; records must match it literally.
    let role = ROLE_CATEGORIES
        .iter()
        .map(|label| Choice {
            value: label.to_lowercase(),
            label: label.to_string(),
        })
        .collect();

    ControlOptions {
        min_experience,
        min_base_pay,
        remote_option,
        role,
    }
}

fn experience_label(years: u32) -> String {
    match years {
        MAX_EXPERIENCE_CHOICE => format!("{years}+ years"),
        1 => "1 year".to_string(),
        _ => format!("{years} years"),
    }
}

fn group_thousands(amount: u32) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
