//! Client-side form validation
//!
//! Forms are checked before any request is sent. Every failing field is
//! reported at once rather than stopping at the first.

use nyaya_common::models::{DocType, Language, NewCase, NewDocument, NewQuery, NewStudent};
use nyaya_common::validation::{is_valid_email, is_valid_mobile};
use std::collections::BTreeMap;
use std::fmt;

const FIR_REQUIRED: [&str; 5] = [
    "name",
    "address",
    "incident_date",
    "incident_place",
    "incident_description",
];
const RTI_REQUIRED: [&str; 4] = ["name", "address", "question_1", "department_name"];

/// Field-level validation failures, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(Vec<(String, String)>);

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push((field.to_string(), message.into()));
    }

    fn require(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when `field` has at least one error
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|(f, _)| f == field)
    }

    fn into_result<T>(self, value: T) -> Result<T, FormErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{} {}", field, message))
            .collect();
        write!(f, "{}", joined.join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Free-text legal question
#[derive(Debug, Clone, Default)]
pub struct QueryForm {
    pub text: String,
    pub language: Language,
}

impl QueryForm {
    pub fn validate(&self) -> Result<NewQuery, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("query", &self.text);
        errors.into_result(NewQuery {
            query_text: self.text.trim().to_string(),
            language: self.language,
        })
    }
}

/// Student volunteer registration
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    pub name: String,
    pub email: String,
    pub college: String,
    /// Comma-separated list as typed
    pub skills: String,
}

impl StudentForm {
    pub fn validate(&self) -> Result<NewStudent, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("name", &self.name);
        errors.require("email", &self.email);
        errors.require("college", &self.college);
        if !self.email.trim().is_empty() && !is_valid_email(&self.email) {
            errors.push("email", "is not a valid email address");
        }

        errors.into_result(NewStudent {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            college: self.college.trim().to_string(),
            skills: parse_skills(&self.skills),
        })
    }
}

/// Split a comma list, dropping blanks
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct CaseForm {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl CaseForm {
    pub fn validate(&self) -> Result<NewCase, FormErrors> {
        let mut errors = FormErrors::new();
        errors.require("title", &self.title);
        errors.require("description", &self.description);
        errors.require("category", &self.category);
        errors.into_result(NewCase {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
        })
    }
}

/// FIR or RTI generator input
#[derive(Debug, Clone)]
pub struct DocumentForm {
    pub doc_type: DocType,
    pub language: Language,
    pub details: BTreeMap<String, String>,
}

impl DocumentForm {
    pub fn new(doc_type: DocType) -> Self {
        Self {
            doc_type,
            language: Language::En,
            details: BTreeMap::new(),
        }
    }

    pub fn required_fields(doc_type: DocType) -> &'static [&'static str] {
        match doc_type {
            DocType::Fir => &FIR_REQUIRED,
            DocType::Rti => &RTI_REQUIRED,
        }
    }

    fn field(&self, key: &str) -> &str {
        self.details.get(key).map(|v| v.trim()).unwrap_or("")
    }

    pub fn validate(&self) -> Result<NewDocument, FormErrors> {
        let mut errors = FormErrors::new();
        for field in Self::required_fields(self.doc_type) {
            errors.require(field, self.field(field));
        }

        let mobile = self.field("mobile");
        if !mobile.is_empty() && !is_valid_mobile(mobile) {
            errors.push("mobile", "must be 10 digits");
        }
        let email = self.field("email");
        if !email.is_empty() && !is_valid_email(email) {
            errors.push("email", "is not a valid email address");
        }

        let mut details: BTreeMap<String, String> = self
            .details
            .iter()
            .map(|(k, v)| (k.clone(), v.trim().to_string()))
            .collect();
        details
            .entry("current_date".to_string())
            .or_insert_with(|| chrono::Local::now().format("%Y-%m-%d").to_string());

        errors.into_result(NewDocument {
            doc_type: self.doc_type.as_str().to_string(),
            language: self.language,
            details,
        })
    }
}

/// Parse `key=value` pairs; the value may itself contain `=`
pub fn parse_detail_pairs<S: AsRef<str>>(pairs: &[S]) -> Result<BTreeMap<String, String>, FormErrors> {
    let mut errors = FormErrors::new();
    let mut details = BTreeMap::new();

    for pair in pairs {
        let pair = pair.as_ref();
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                details.insert(key.trim().to_string(), value.to_string());
            }
            _ => errors.push("field", format!("'{}' is not key=value", pair)),
        }
    }

    errors.into_result(details)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fir_with(pairs: &[(&str, &str)]) -> DocumentForm {
        let mut form = DocumentForm::new(DocType::Fir);
        for (k, v) in pairs {
            form.details.insert(k.to_string(), v.to_string());
        }
        form
    }

    #[test]
    fn test_query_requires_text() {
        let form = QueryForm {
            text: "   ".to_string(),
            language: Language::En,
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.has("query"));

        let form = QueryForm {
            text: " how to file rti ".to_string(),
            language: Language::Hi,
        };
        let query = form.validate().unwrap();
        assert_eq!(query.query_text, "how to file rti");
        assert_eq!(query.language, Language::Hi);
    }

    #[test]
    fn test_student_collects_all_errors() {
        let form = StudentForm {
            email: "nope".to_string(),
            ..StudentForm::default()
        };
        let errors = form.validate().unwrap_err();

        assert!(errors.has("name"));
        assert!(errors.has("college"));
        assert!(errors.has("email"));
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_student_skills_split() {
        let form = StudentForm {
            name: "Asha".to_string(),
            email: "asha@nls.ac.in".to_string(),
            college: "NLSIU".to_string(),
            skills: "Labour Law, , Tax ,".to_string(),
        };
        let student = form.validate().unwrap();
        assert_eq!(student.skills, vec!["Labour Law", "Tax"]);
    }

    #[test]
    fn test_case_form() {
        let errors = CaseForm::default().validate().unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(
            errors.to_string(),
            "title is required; description is required; category is required"
        );
    }

    #[test]
    fn test_fir_required_fields() {
        let errors = fir_with(&[("name", "Ravi")]).validate().unwrap_err();
        assert!(!errors.has("name"));
        for field in ["address", "incident_date", "incident_place", "incident_description"] {
            assert!(errors.has(field), "missing error for {}", field);
        }
    }

    #[test]
    fn test_rti_required_fields() {
        let mut form = DocumentForm::new(DocType::Rti);
        form.details.insert("name".into(), "Ravi".into());
        form.details.insert("address".into(), "Pune".into());
        form.details.insert("question_1".into(), "Budget?".into());
        form.details.insert("department_name".into(), "PWD".into());

        let doc = form.validate().unwrap();
        assert_eq!(doc.doc_type, "RTI");
    }

    #[test]
    fn test_mobile_and_email_checked_when_present() {
        let complete = [
            ("name", "Ravi"),
            ("address", "Pune"),
            ("incident_date", "2026-10-01"),
            ("incident_place", "Station Road"),
            ("incident_description", "Bag snatched"),
        ];

        let mut pairs = complete.to_vec();
        pairs.push(("mobile", "98765"));
        pairs.push(("email", "ravi@"));
        let errors = fir_with(&pairs).validate().unwrap_err();
        assert!(errors.has("mobile"));
        assert!(errors.has("email"));

        let mut pairs = complete.to_vec();
        pairs.push(("mobile", "9876543210"));
        assert!(fir_with(&pairs).validate().is_ok());
    }

    #[test]
    fn test_current_date_filled() {
        let form = fir_with(&[
            ("name", "Ravi"),
            ("address", "Pune"),
            ("incident_date", "2026-10-01"),
            ("incident_place", "Station Road"),
            ("incident_description", "Bag snatched"),
        ]);
        let doc = form.validate().unwrap();
        let today = chrono::Local::now().format("%Y-%m-%d").to_string();
        assert_eq!(doc.details["current_date"], today);

        let mut form = form;
        form.details.insert("current_date".into(), "2026-01-26".into());
        assert_eq!(form.validate().unwrap().details["current_date"], "2026-01-26");
    }

    #[test]
    fn test_parse_detail_pairs() {
        let details =
            parse_detail_pairs(&["name=Ravi Kumar", "incident_description=a=b", " age =34"]).unwrap();
        assert_eq!(details["name"], "Ravi Kumar");
        assert_eq!(details["incident_description"], "a=b");
        assert_eq!(details["age"], "34");

        let errors = parse_detail_pairs(&["novalue", "=x"]).unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
