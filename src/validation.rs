//! Form validation: per-field sanitize/check chains whose failures are
//! collected into a [`Report`] and surfaced as [`Validated::Invalid`].

use catalog_http::html;
use serde::Serialize;
use time::{macros::format_description, Date};

/// One failed check, shown next to the re-rendered form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Outcome of validating a submission.
#[derive(Debug, Clone, PartialEq)]
pub enum Validated<T> {
    Valid(T),
    /// `attempt` holds the sanitized submission so the form can be
    /// re-rendered with the user's input preserved
    Invalid { attempt: T, errors: Vec<FieldError> },
}

#[derive(Debug, Clone)]
enum Check {
    MinChars(usize, String),
    MaxChars(usize, String),
}

/// Ordered sanitize/validate chain for one text field.
///
/// Steps run in declaration order, so `trim()` before `min_chars()` measures
/// the trimmed value and `escape()` after the length checks does not inflate
/// the measured length.
#[derive(Debug, Clone)]
pub struct FieldRules {
    field: &'static str,
    steps: Vec<Step>,
}

#[derive(Debug, Clone)]
enum Step {
    Trim,
    Escape,
    Check(Check),
}

impl FieldRules {
    pub fn new(field: &'static str) -> Self {
        Self {
            field,
            steps: Vec::new(),
        }
    }

    pub fn trim(mut self) -> Self {
        self.steps.push(Step::Trim);
        self
    }

    pub fn min_chars(mut self, min: usize, message: impl Into<String>) -> Self {
        self.steps
            .push(Step::Check(Check::MinChars(min, message.into())));
        self
    }

    pub fn max_chars(mut self, max: usize, message: impl Into<String>) -> Self {
        self.steps
            .push(Step::Check(Check::MaxChars(max, message.into())));
        self
    }

    /// Replace markup characters with HTML entities
    pub fn escape(mut self) -> Self {
        self.steps.push(Step::Escape);
        self
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Run the chain, returning the sanitized value and the failed checks.
    pub fn apply(&self, raw: &str) -> (String, Vec<FieldError>) {
        let mut value = raw.to_string();
        let mut errors = Vec::new();

        for step in &self.steps {
            match step {
                Step::Trim => value = value.trim().to_string(),
                Step::Escape => value = html::escape(&value),
                Step::Check(check) => {
                    let chars = value.chars().count();
                    let failed = match check {
                        Check::MinChars(min, message) => (chars < *min).then_some(message),
                        Check::MaxChars(max, message) => (chars > *max).then_some(message),
                    };
                    if let Some(message) = failed {
                        errors.push(FieldError {
                            field: self.field,
                            message: message.clone(),
                        });
                    }
                }
            }
        }

        (value, errors)
    }
}

/// Accumulates field errors across a whole submission.
#[derive(Debug, Default)]
pub struct Report {
    errors: Vec<FieldError>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `rules` to `raw`, keep any errors and return the sanitized value
    pub fn field(&mut self, rules: &FieldRules, raw: &str) -> String {
        let (value, errors) = rules.apply(raw);
        self.errors.extend(errors);
        value
    }

    /// Parse an optional ISO-8601 calendar date (`YYYY-MM-DD`). Blank input
    /// is `None`; anything else that does not parse records `message`.
    pub fn optional_date(&mut self, field: &'static str, raw: &str, message: &str) -> Option<Date> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }
        match parse_iso_date(raw) {
            Some(date) => Some(date),
            None => {
                self.errors.push(FieldError {
                    field,
                    message: message.to_string(),
                });
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish<T>(self, value: T) -> Validated<T> {
        if self.errors.is_empty() {
            Validated::Valid(value)
        } else {
            Validated::Invalid {
                attempt: value,
                errors: self.errors,
            }
        }
    }
}

pub fn parse_iso_date(raw: &str) -> Option<Date> {
    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genre_rules() -> FieldRules {
        FieldRules::new("name")
            .trim()
            .min_chars(3, "too short")
            .max_chars(10, "too long")
            .escape()
    }

    #[test]
    fn trims_before_measuring() {
        let (value, errors) = genre_rules().apply("   ab   ");
        assert_eq!(value, "ab");
        assert_eq!(
            errors,
            vec![FieldError {
                field: "name",
                message: "too short".to_string()
            }]
        );

        let (value, errors) = genre_rules().apply("  abc ");
        assert_eq!(value, "abc");
        assert!(errors.is_empty());
    }

    #[test]
    fn counts_characters_not_bytes() {
        let (_, errors) = genre_rules().apply("Éé");
        assert_eq!(errors.len(), 1);
        let (_, errors) = genre_rules().apply("Ééé");
        assert!(errors.is_empty());
    }

    #[test]
    fn escapes_after_length_checks() {
        let (value, errors) = genre_rules().apply("<b>");
        assert!(errors.is_empty());
        assert_eq!(value, "&lt;b&gt;");
    }

    #[test]
    fn upper_bound_is_enforced() {
        let (_, errors) = genre_rules().apply("abcdefghijk");
        assert_eq!(errors[0].message, "too long");
    }

    #[test]
    fn report_collects_errors_from_all_fields() {
        let first = FieldRules::new("first_name").trim().min_chars(1, "first missing");
        let family = FieldRules::new("family_name").trim().min_chars(1, "family missing");

        let mut report = Report::new();
        let a = report.field(&first, " ");
        let b = report.field(&family, "");
        let dob = report.optional_date("date_of_birth", "1944-13-45", "bad date");

        assert_eq!(dob, None);
        match report.finish((a, b)) {
            Validated::Invalid { attempt, errors } => {
                assert_eq!(attempt, (String::new(), String::new()));
                let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
                assert_eq!(fields, ["first_name", "family_name", "date_of_birth"]);
            }
            Validated::Valid(_) => panic!("expected invalid submission"),
        }
    }

    #[test]
    fn blank_optional_date_is_absent_not_invalid() {
        let mut report = Report::new();
        assert_eq!(report.optional_date("date_of_death", "  ", "bad date"), None);
        assert!(report.is_empty());

        let date = report.optional_date("date_of_birth", "1944-06-06", "bad date");
        assert_eq!(date, Some(time::macros::date!(1944 - 06 - 06)));
        assert!(matches!(report.finish(()), Validated::Valid(())));
    }
}
