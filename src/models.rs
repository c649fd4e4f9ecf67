//! Domain models that mirror the SQLite schema and get passed throughout the
//! TUI. The intent is that these types stay light-weight data holders so other
//! layers can focus on presentation and persistence logic.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};

/// The two roles a person can hold. Stored as lowercase text in the `kind`
/// column so the database stays readable with any SQLite browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonKind {
    Student,
    Teacher,
}

impl PersonKind {
    /// Canonical storage form of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonKind::Student => "student",
            PersonKind::Teacher => "teacher",
        }
    }

    /// Capitalized form used in headers and status messages.
    pub fn label(&self) -> &'static str {
        match self {
            PersonKind::Student => "Student",
            PersonKind::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for PersonKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PersonKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(PersonKind::Student),
            "teacher" => Ok(PersonKind::Teacher),
            other => Err(format!("unknown person kind '{other}'")),
        }
    }
}

impl ToSql for PersonKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for PersonKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|message: String| FromSqlError::Other(message.into()))
    }
}

#[derive(Debug, Clone)]
/// A student or teacher row. Contact fields are stored as plain text because
/// the application never interprets them beyond display.
pub struct Person {
    /// Primary key from the database. Edit, delete, and enrollment flows
    /// bubble this id back to the persistence layer.
    pub id: i64,
    /// Whether this row is a student or a teacher.
    pub kind: PersonKind,
    /// Display name. Required; the form layer rejects blank input.
    pub name: String,
    /// Contact email, possibly empty.
    pub email: String,
    /// Contact phone, possibly empty.
    pub phone: String,
    /// Free-text notes, possibly empty.
    pub notes: String,
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone)]
/// A course offering. `code` is `None` for courses that were entered without
/// one; non-empty codes are unique across the whole table.
pub struct Course {
    /// Primary key from the SQLite store.
    pub id: i64,
    /// Optional short code such as "CS101". Unique when present.
    pub code: Option<String>,
    /// Course title shown in lists and reports. Required.
    pub title: String,
    /// Free-text duration such as "6 weeks".
    pub duration: String,
    /// Delivery mode. The form suggests Online, Physical, and Hybrid but any
    /// text is accepted and stored verbatim.
    pub mode: String,
    /// Optional reference to the assigned teacher's person id.
    pub teacher_id: Option<i64>,
}

impl Course {
    /// Compose a `Title (CODE)` string that gracefully omits the parentheses
    /// when no code was assigned. Pickers and the dashboard rely on this
    /// ready-to-use formatting.
    pub fn display_label(&self) -> String {
        match &self.code {
            Some(code) => format!("{} ({code})", self.title),
            None => self.title.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_storage_form() {
        for kind in [PersonKind::Student, PersonKind::Teacher] {
            assert_eq!(kind.as_str().parse::<PersonKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        assert!("admin".parse::<PersonKind>().is_err());
    }

    #[test]
    fn course_label_includes_code_only_when_present() {
        let mut course = Course {
            id: 1,
            code: Some("CS101".to_string()),
            title: "Intro".to_string(),
            duration: String::new(),
            mode: String::new(),
            teacher_id: None,
        };
        assert_eq!(course.display_label(), "Intro (CS101)");
        course.code = None;
        assert_eq!(course.display_label(), "Intro");
    }
}
