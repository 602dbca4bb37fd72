//! Wire types shared by the REST backend and its clients
//!
//! Field names are snake_case on the wire. Timestamps are RFC 3339 UTC strings.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Current time as an RFC 3339 UTC string
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ========================================
// Enumerations
// ========================================

/// Guidance language. Unknown codes fall back to English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum Language {
    #[default]
    En,
    Hi,
    Te,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Te => "te",
        }
    }

    /// Parse a language code, mapping anything unsupported to English
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hi" => Language::Hi,
            "te" => Language::Te,
            _ => Language::En,
        }
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl FromStr for Language {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Language::from_code(s))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Legal category a query is classified into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fir,
    Rti,
    Consumer,
    Property,
    Marriage,
    Employment,
    General,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fir => "fir",
            Category::Rti => "rti",
            Category::Consumer => "consumer",
            Category::Property => "property",
            Category::Marriage => "marriage",
            Category::Employment => "employment",
            Category::General => "general",
        }
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fir" => Ok(Category::Fir),
            "rti" => Ok(Category::Rti),
            "consumer" => Ok(Category::Consumer),
            "property" => Ok(Category::Property),
            "marriage" => Ok(Category::Marriage),
            "employment" => Ok(Category::Employment),
            "general" => Ok(Category::General),
            other => Err(format!("Unknown category '{}'", other)),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Templated legal document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DocType {
    #[serde(rename = "FIR")]
    Fir,
    #[serde(rename = "RTI")]
    Rti,
}

impl DocType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocType::Fir => "FIR",
            DocType::Rti => "RTI",
        }
    }
}

impl FromStr for DocType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FIR" => Ok(DocType::Fir),
            "RTI" => Ok(DocType::Rti),
            _ => Err("Invalid document type. Use 'FIR' or 'RTI'".to_string()),
        }
    }
}

impl TryFrom<String> for DocType {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for DocType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a case handled by student volunteers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    #[default]
    Open,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl CaseStatus {
    pub const ALL: [CaseStatus; 5] = [
        CaseStatus::Open,
        CaseStatus::Assigned,
        CaseStatus::InProgress,
        CaseStatus::Resolved,
        CaseStatus::Closed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStatus::Open => "open",
            CaseStatus::Assigned => "assigned",
            CaseStatus::InProgress => "in_progress",
            CaseStatus::Resolved => "resolved",
            CaseStatus::Closed => "closed",
        }
    }
}

impl FromStr for CaseStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        CaseStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| format!("Unknown case status '{}'", s))
    }
}

impl fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================================
// Students
// ========================================

/// Student volunteer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub college: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: String,
    pub college: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl NewStudent {
    pub fn into_student(self) -> Student {
        Student {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            college: self.college,
            skills: self.skills,
            created_at: now_timestamp(),
        }
    }
}

// ========================================
// Cases
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub status: CaseStatus,
    pub created_at: String,
    #[serde(default)]
    pub assigned_student_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewCase {
    pub title: String,
    pub description: String,
    pub category: String,
}

impl NewCase {
    pub fn into_case(self) -> Case {
        Case {
            id: Uuid::new_v4(),
            title: self.title,
            description: self.description,
            category: self.category,
            status: CaseStatus::Open,
            created_at: now_timestamp(),
            assigned_student_id: None,
        }
    }
}

/// Partial case update.
///
/// `assigned_student_id` is tri-state: absent leaves the assignment alone,
/// `null` clears it, a UUID assigns the case.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CaseUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<CaseStatus>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub assigned_student_id: Option<Option<Uuid>>,
}

impl CaseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.status.is_none()
            && self.assigned_student_id.is_none()
    }

    pub fn assign(student_id: Uuid) -> Self {
        Self {
            assigned_student_id: Some(Some(student_id)),
            ..Self::default()
        }
    }

    pub fn unassign() -> Self {
        Self {
            assigned_student_id: Some(None),
            ..Self::default()
        }
    }

    pub fn status(status: CaseStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ========================================
// Queries
// ========================================

/// A persisted legal query with its generated guidance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalQuery {
    pub id: Uuid,
    pub query_text: String,
    pub detected_language: Language,
    pub category: Category,
    pub response_text: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewQuery {
    pub query_text: String,
    #[serde(default, deserialize_with = "language_or_english")]
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextQueryRequest {
    pub query: String,
    #[serde(default, deserialize_with = "language_or_english")]
    pub language: Language,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextQueryResponse {
    pub answer: String,
}

// ========================================
// Documents
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegalDocument {
    pub id: Uuid,
    pub doc_type: DocType,
    pub language: Language,
    pub content: String,
    pub created_at: String,
}

/// Document generation request; `details` keys are template fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDocument {
    pub doc_type: String,
    #[serde(default, deserialize_with = "language_or_english")]
    pub language: Language,
    #[serde(default, deserialize_with = "scalar_details")]
    pub details: BTreeMap<String, String>,
}

/// `null` means the default language
fn language_or_english<'de, D>(deserializer: D) -> Result<Language, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Language>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Template fields as text. Numbers and booleans are rendered, `null` drops the
/// field, nested values are rejected.
fn scalar_details<'de, D>(deserializer: D) -> Result<BTreeMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(deserializer)?;
    let mut details = BTreeMap::new();

    for (key, value) in raw.unwrap_or_default() {
        let text = match value {
            serde_json::Value::Null => continue,
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            serde_json::Value::Array(_) | serde_json::Value::Object(_) => {
                return Err(serde::de::Error::custom(format!(
                    "details.{} must be a string, number or boolean",
                    key
                )))
            }
        };
        details.insert(key, text);
    }

    Ok(details)
}

// ========================================
// Voice
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceQueryResponse {
    pub query_text: String,
    pub language: Language,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptionResponse {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TtsRequest {
    pub text: String,
    #[serde(default, deserialize_with = "language_or_english")]
    pub language: Language,
}

// ========================================
// Misc responses
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedSummary {
    pub message: String,
    pub students: usize,
    pub cases: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
}

/// Body of every non-2xx JSON response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}
