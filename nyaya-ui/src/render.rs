//! Terminal rendering for API responses
//!
//! Renderers return strings so commands decide where output goes. Colour is
//! applied with crossterm and switched off by `NO_COLOR` or `--no-color`.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use crossterm::style::{Color, Stylize};
use nyaya_common::models::{
    Case, CaseStatus, LegalDocument, LegalQuery, Student, VoiceQueryResponse,
};
use std::fmt::Write as _;

/// Display format for timestamps, e.g. `19 Oct 2026, 10:05`
const TIMESTAMP_FORMAT: &str = "%-d %b %Y, %H:%M";

/// Label plus colour for a status or category chip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Badge {
    pub label: &'static str,
    pub color: Color,
}

/// Badge for a case status
pub fn status_badge(status: CaseStatus) -> Badge {
    let (label, color) = match status {
        CaseStatus::Open => ("Open", Color::Yellow),
        CaseStatus::Assigned => ("Assigned", Color::Blue),
        CaseStatus::InProgress => ("In Progress", Color::Magenta),
        CaseStatus::Resolved => ("Resolved", Color::Green),
        CaseStatus::Closed => ("Closed", Color::DarkGrey),
    };
    Badge { label, color }
}

/// Badge for a query or case category.
///
/// Case categories are free text, so anything unrecognised gets a neutral
/// badge labelled "Other".
pub fn category_badge(category: &str) -> Badge {
    let (label, color) = match category.trim().to_ascii_lowercase().as_str() {
        "fir" | "criminal" => ("FIR", Color::Red),
        "rti" => ("RTI", Color::Cyan),
        "consumer" => ("Consumer", Color::Green),
        "property" => ("Property", Color::DarkYellow),
        "marriage" | "family" => ("Family", Color::Magenta),
        "employment" | "labour" | "labor" => ("Employment", Color::Blue),
        "general" => ("General", Color::Grey),
        _ => ("Other", Color::Grey),
    };
    Badge { label, color }
}

/// Render an RFC 3339 timestamp in local time; unparsable input is returned as is
pub fn format_timestamp(raw: &str) -> String {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return parsed.with_timezone(&Local).format(TIMESTAMP_FORMAT).to_string();
    }
    // sqlite CURRENT_TIMESTAMP style, stored as UTC
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
            .with_timezone(&Local)
            .format(TIMESTAMP_FORMAT)
            .to_string();
    }
    raw.to_string()
}

/// Whether the environment asks for plain output (`NO_COLOR` set and non-empty)
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(no_color_flag: bool) -> Self {
        Self {
            color: !no_color_flag && !no_color_requested(),
        }
    }

    pub fn plain() -> Self {
        Self { color: false }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.color {
            text.with(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn heading(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        self.paint(text, Color::DarkGrey)
    }

    pub fn badge(&self, badge: Badge) -> String {
        self.paint(&format!("[{}]", badge.label), badge.color)
    }

    pub fn error(&self, message: &str) -> String {
        self.paint(&format!("✗ {}", message), Color::Red)
    }

    pub fn success(&self, message: &str) -> String {
        self.paint(&format!("✓ {}", message), Color::Green)
    }

    /// Guidance answer with each numbered step on its own indented line
    pub fn answer(&self, answer: &str) -> String {
        let mut lines = answer.lines();
        let mut out = String::new();

        if let Some(first) = lines.next() {
            let _ = writeln!(out, "{}", self.heading(first));
        }
        for line in lines.filter(|l| !l.trim().is_empty()) {
            let _ = writeln!(out, "  {}", line.trim());
        }
        out
    }

    pub fn guidance(&self, query: &LegalQuery) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} {}  {}",
            self.badge(category_badge(query.category.as_str())),
            self.dim(&format!("language: {}", query.detected_language)),
            self.dim(&format_timestamp(&query.created_at)),
        );
        let _ = writeln!(out, "Q: {}", query.query_text);
        let _ = writeln!(out);
        out.push_str(&self.answer(&query.response_text));
        let _ = writeln!(out, "{}", self.dim(&format!("query id: {}", query.id)));
        out
    }

    pub fn voice_answer(&self, response: &VoiceQueryResponse) -> String {
        let mut out = String::new();
        if response.query_text.is_empty() {
            let _ = writeln!(out, "{}", self.paint(&response.answer, Color::Yellow));
            return out;
        }

        let _ = writeln!(
            out,
            "{} {}",
            self.heading("You said:"),
            response.query_text
        );
        let _ = writeln!(out, "{}", self.dim(&format!("language: {}", response.language)));
        let _ = writeln!(out);
        out.push_str(&self.answer(&response.answer));
        out
    }

    pub fn transcript(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return format!("{}\n", self.paint("No speech detected.", Color::Yellow));
        }
        format!("{} {}\n", self.heading("You said:"), text.trim())
    }

    /// One line per query, newest first as returned by the server
    pub fn history(&self, queries: &[LegalQuery]) -> String {
        if queries.is_empty() {
            return self.dim("No questions asked yet.\n");
        }

        let mut out = String::new();
        for query in queries {
            let _ = writeln!(
                out,
                "{} {} {}",
                self.dim(&format_timestamp(&query.created_at)),
                self.badge(category_badge(query.category.as_str())),
                query.query_text
            );
        }
        out
    }

    pub fn students(&self, students: &[Student]) -> String {
        if students.is_empty() {
            return self.dim("No students registered.\n");
        }

        let mut out = String::new();
        for student in students {
            let _ = writeln!(
                out,
                "{}  {} <{}>",
                self.heading(&student.name),
                student.college,
                student.email
            );
            if !student.skills.is_empty() {
                let _ = writeln!(out, "    skills: {}", student.skills.join(", "));
            }
            let _ = writeln!(
                out,
                "    {}",
                self.dim(&format!(
                    "{} · joined {}",
                    student.id,
                    format_timestamp(&student.created_at)
                ))
            );
        }
        out
    }

    /// Case list; assigned students are shown by name when known
    pub fn cases(&self, cases: &[Case], students: &[Student]) -> String {
        if cases.is_empty() {
            return self.dim("No cases.\n");
        }

        let mut out = String::new();
        for case in cases {
            let _ = writeln!(
                out,
                "{} {} {}",
                self.badge(status_badge(case.status)),
                self.badge(category_badge(&case.category)),
                self.heading(&case.title)
            );
            let _ = writeln!(out, "    {}", case.description);

            let assignee = match case.assigned_student_id {
                Some(id) => students
                    .iter()
                    .find(|s| s.id == id)
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| id.to_string()),
                None => "unassigned".to_string(),
            };
            let _ = writeln!(
                out,
                "    {}",
                self.dim(&format!(
                    "{} · {} · created {}",
                    case.id,
                    assignee,
                    format_timestamp(&case.created_at)
                ))
            );
        }
        out
    }

    pub fn document(&self, document: &LegalDocument) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "{}",
            self.dim(&format!(
                "{} draft ({}) · {} · {}",
                document.doc_type,
                document.language,
                document.id,
                format_timestamp(&document.created_at)
            ))
        );
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", document.content);
        out
    }
}
