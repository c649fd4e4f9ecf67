use anyhow::{anyhow, Result};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

use crate::models::{Course, Person, PersonKind};

/// Delivery modes the course form suggests. Storage accepts any text; these
/// only seed the cycling shortcut on the Mode field.
pub(crate) const MODE_SUGGESTIONS: [&str; 3] = ["Online", "Physical", "Hybrid"];

/// Internal representation of the student/teacher form fields.
#[derive(Default, Clone)]
pub(crate) struct PersonForm {
    pub(crate) name: String,
    pub(crate) email: String,
    pub(crate) phone: String,
    pub(crate) notes: String,
    pub(crate) active: PersonField,
    pub(crate) error: Option<String>,
}

/// Fields available within the person form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum PersonField {
    #[default]
    Name,
    Email,
    Phone,
    Notes,
}

impl PersonForm {
    /// Populate the form from an existing person when editing.
    pub(crate) fn from_person(person: &Person) -> Self {
        Self {
            name: person.name.clone(),
            email: person.email.clone(),
            phone: person.phone.clone(),
            notes: person.notes.clone(),
            active: PersonField::Name,
            error: None,
        }
    }

    /// Cycle focus across the four fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            PersonField::Name => PersonField::Email,
            PersonField::Email => PersonField::Phone,
            PersonField::Phone => PersonField::Notes,
            PersonField::Notes => PersonField::Name,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            PersonField::Name => self.name.push(ch),
            PersonField::Email => self.email.push(ch),
            PersonField::Phone => self.phone.push(ch),
            PersonField::Notes => self.notes.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            PersonField::Name => {
                self.name.pop();
            }
            PersonField::Email => {
                self.email.pop();
            }
            PersonField::Phone => {
                self.phone.pop();
            }
            PersonField::Notes => {
                self.notes.pop();
            }
        }
    }

    /// Validate and normalize form inputs before they are written to the
    /// database. Only the name is required.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, String, String)> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(anyhow!("Name is required."));
        }
        Ok((
            name.to_string(),
            self.email.trim().to_string(),
            self.phone.trim().to_string(),
            self.notes.trim().to_string(),
        ))
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: PersonField) -> Line<'static> {
        let (value, is_active) = match field {
            PersonField::Name => (&self.name, self.active == PersonField::Name),
            PersonField::Email => (&self.email, self.active == PersonField::Email),
            PersonField::Phone => (&self.phone, self.active == PersonField::Phone),
            PersonField::Notes => (&self.notes, self.active == PersonField::Notes),
        };

        let placeholder = match field {
            PersonField::Name => "<required>",
            _ => "<optional>",
        };

        styled_field_line(field_name, value, placeholder, is_active)
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: PersonField) -> usize {
        match field {
            PersonField::Name => self.name.chars().count(),
            PersonField::Email => self.email.chars().count(),
            PersonField::Phone => self.phone.chars().count(),
            PersonField::Notes => self.notes.chars().count(),
        }
    }
}

/// Form state for course creation/editing.
#[derive(Default, Clone)]
pub(crate) struct CourseForm {
    pub(crate) code: String,
    pub(crate) title: String,
    pub(crate) duration: String,
    pub(crate) mode: String,
    pub(crate) active: CourseField,
    pub(crate) error: Option<String>,
}

/// Fields available within the course form.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub(crate) enum CourseField {
    #[default]
    Code,
    Title,
    Duration,
    Mode,
}

impl CourseForm {
    /// Populate the form from an existing course when editing.
    pub(crate) fn from_course(course: &Course) -> Self {
        Self {
            code: course.code.clone().unwrap_or_default(),
            title: course.title.clone(),
            duration: course.duration.clone(),
            mode: course.mode.clone(),
            active: CourseField::Code,
            error: None,
        }
    }

    /// Cycle focus across the four fields.
    pub(crate) fn toggle_field(&mut self) {
        self.active = match self.active {
            CourseField::Code => CourseField::Title,
            CourseField::Title => CourseField::Duration,
            CourseField::Duration => CourseField::Mode,
            CourseField::Mode => CourseField::Code,
        };
    }

    /// Insert a character into the active field.
    pub(crate) fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.active {
            CourseField::Code => self.code.push(ch),
            CourseField::Title => self.title.push(ch),
            CourseField::Duration => self.duration.push(ch),
            CourseField::Mode => self.mode.push(ch),
        }
        true
    }

    /// Remove the last character from the active field.
    pub(crate) fn backspace(&mut self) {
        match self.active {
            CourseField::Code => {
                self.code.pop();
            }
            CourseField::Title => {
                self.title.pop();
            }
            CourseField::Duration => {
                self.duration.pop();
            }
            CourseField::Mode => {
                self.mode.pop();
            }
        }
    }

    /// Step the mode field through the suggested values. Free text remains
    /// allowed; cycling from an unrecognized value starts at the first
    /// suggestion.
    pub(crate) fn cycle_mode(&mut self, step: isize) {
        let len = MODE_SUGGESTIONS.len() as isize;
        let next = match MODE_SUGGESTIONS
            .iter()
            .position(|m| m.eq_ignore_ascii_case(self.mode.trim()))
        {
            Some(idx) => (idx as isize + step).rem_euclid(len),
            None if step < 0 => len - 1,
            None => 0,
        };
        self.mode = MODE_SUGGESTIONS[next as usize].to_string();
    }

    /// Validate and normalize form inputs. Only the title is required; a
    /// blank code is handed to the persistence layer as-is, which stores it
    /// as NULL.
    pub(crate) fn parse_inputs(&self) -> Result<(String, String, String, String)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(anyhow!("Title is required."));
        }
        Ok((
            self.code.trim().to_string(),
            title.to_string(),
            self.duration.trim().to_string(),
            self.mode.trim().to_string(),
        ))
    }

    /// Render a styled line for the modal form.
    pub(crate) fn build_line(&self, field_name: &str, field: CourseField) -> Line<'static> {
        let (value, is_active) = match field {
            CourseField::Code => (&self.code, self.active == CourseField::Code),
            CourseField::Title => (&self.title, self.active == CourseField::Title),
            CourseField::Duration => (&self.duration, self.active == CourseField::Duration),
            CourseField::Mode => (&self.mode, self.active == CourseField::Mode),
        };

        let placeholder = match field {
            CourseField::Title => "<required>",
            _ => "<optional>",
        };

        styled_field_line(field_name, value, placeholder, is_active)
    }

    /// Return the character count for the requested field.
    pub(crate) fn value_len(&self, field: CourseField) -> usize {
        match field {
            CourseField::Code => self.code.chars().count(),
            CourseField::Title => self.title.chars().count(),
            CourseField::Duration => self.duration.chars().count(),
            CourseField::Mode => self.mode.chars().count(),
        }
    }
}

fn styled_field_line(
    field_name: &str,
    value: &str,
    placeholder: &str,
    is_active: bool,
) -> Line<'static> {
    let display = if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    };

    let style = if is_active {
        Style::default().fg(Color::Yellow)
    } else if value.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(format!("{field_name}: ")),
        Span::styled(display, style),
    ])
}

#[derive(Clone)]
pub(crate) struct ConfirmPersonDelete {
    pub(crate) id: i64,
    pub(crate) kind: PersonKind,
    pub(crate) name: String,
}

impl ConfirmPersonDelete {
    /// Build the confirmation state from the person being considered.
    pub(crate) fn from(person: &Person) -> Self {
        Self {
            id: person.id,
            kind: person.kind,
            name: person.name.clone(),
        }
    }
}

#[derive(Clone)]
pub(crate) struct ConfirmCourseDelete {
    pub(crate) id: i64,
    pub(crate) title: String,
}

impl ConfirmCourseDelete {
    pub(crate) fn from(course: &Course) -> Self {
        Self {
            id: course.id,
            title: course.title.clone(),
        }
    }
}

/// State for confirming the removal of a student from a course roster.
#[derive(Clone)]
pub(crate) struct ConfirmUnenroll {
    pub(crate) course_id: i64,
    pub(crate) course_title: String,
    pub(crate) student_id: i64,
    pub(crate) student_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn person_form_requires_a_name() {
        let mut form = PersonForm::default();
        form.email = "a@b".to_string();
        assert!(form.parse_inputs().is_err());

        form.name = "  Alice  ".to_string();
        let (name, email, _, _) = form.parse_inputs().unwrap();
        assert_eq!(name, "Alice");
        assert_eq!(email, "a@b");
    }

    #[test]
    fn course_form_requires_a_title() {
        let mut form = CourseForm::default();
        form.code = "CS101".to_string();
        assert!(form.parse_inputs().is_err());

        form.title = "Intro".to_string();
        let (code, title, _, _) = form.parse_inputs().unwrap();
        assert_eq!(code, "CS101");
        assert_eq!(title, "Intro");
    }

    #[test]
    fn mode_cycling_wraps_and_ignores_case() {
        let mut form = CourseForm::default();
        form.cycle_mode(1);
        assert_eq!(form.mode, "Online");
        form.cycle_mode(1);
        assert_eq!(form.mode, "Physical");

        form.mode = "hybrid".to_string();
        form.cycle_mode(1);
        assert_eq!(form.mode, "Online");

        form.mode = "self-paced".to_string();
        form.cycle_mode(-1);
        assert_eq!(form.mode, "Hybrid");
    }

    #[test]
    fn control_characters_are_rejected() {
        let mut form = PersonForm::default();
        assert!(!form.push_char('\n'));
        assert!(form.push_char('A'));
        assert_eq!(form.name, "A");
    }
}
