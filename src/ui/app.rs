use std::mem;

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{
    Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs,
    Wrap,
};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{
    assign_teacher, create_course, create_person, delete_course, delete_person, enroll,
    fetch_courses, fetch_people, unenroll, update_course, update_person,
};
use crate::models::{Course, Person, PersonKind};

use super::forms::{
    ConfirmCourseDelete, ConfirmPersonDelete, ConfirmUnenroll, CourseField, CourseForm,
    PersonField, PersonForm, MODE_SUGGESTIONS,
};
use super::helpers::{cell_or_dash, centered_rect, surface_error};
use super::screens::{
    CoursesScreen, DashboardScreen, PeopleScreen, PickerItem, PickerState, ReportTab,
    ReportsScreen, RosterView,
};

/// Width reserved for the page switcher on the left.
const SIDEBAR_WIDTH: u16 = 20;
/// Header bar height including its border.
const HEADER_HEIGHT: u16 = 3;
/// Footer space reserved for the status message and key hints.
const FOOTER_HEIGHT: u16 = 4;

/// The five pages reachable from the sidebar. A closed enum keeps every
/// navigation target visible in one place and lets the router be a plain
/// `match`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Page {
    Dashboard,
    Students,
    Teachers,
    Courses,
    Reports,
}

impl Page {
    pub(crate) const ALL: [Page; 5] = [
        Page::Dashboard,
        Page::Students,
        Page::Teachers,
        Page::Courses,
        Page::Reports,
    ];

    fn title(self) -> &'static str {
        match self {
            Page::Dashboard => "Dashboard",
            Page::Students => "Students",
            Page::Teachers => "Teachers",
            Page::Courses => "Courses",
            Page::Reports => "Reports",
        }
    }

    fn index(self) -> usize {
        Self::ALL.iter().position(|p| *p == self).unwrap_or(0)
    }

    fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Fine-grained modes layered over the current page. Exactly one modal can
/// be open at a time.
enum Mode {
    Normal,
    PersonForm {
        kind: PersonKind,
        editing: Option<i64>,
        form: PersonForm,
    },
    ConfirmPersonDelete(ConfirmPersonDelete),
    CourseForm {
        editing: Option<i64>,
        /// Existing assignment carried through an edit so saving the form
        /// does not silently clear the teacher.
        teacher_id: Option<i64>,
        form: CourseForm,
    },
    ConfirmCourseDelete(ConfirmCourseDelete),
    PickingCourse {
        student_id: i64,
        student_name: String,
        picker: PickerState,
    },
    PickingTeacher {
        course_id: i64,
        course_title: String,
        picker: PickerState,
    },
    Roster(RosterView),
    ConfirmUnenroll(ConfirmUnenroll),
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the database
/// connection; every persistence call borrows it from here.
pub struct App {
    conn: Connection,
    page: Page,
    mode: Mode,
    dashboard: DashboardScreen,
    students: PeopleScreen,
    teachers: PeopleScreen,
    courses: CoursesScreen,
    reports: ReportsScreen,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Result<Self> {
        let mut app = Self {
            conn,
            page: Page::Dashboard,
            mode: Mode::Normal,
            dashboard: DashboardScreen::new(),
            students: PeopleScreen::new(PersonKind::Student),
            teachers: PeopleScreen::new(PersonKind::Teacher),
            courses: CoursesScreen::new(),
            reports: ReportsScreen::new(),
            status: None,
        };
        app.refresh_page()?;
        Ok(app)
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        let mut exit = false;
        let mut mode = mem::replace(&mut self.mode, Mode::Normal);

        mode = match mode {
            Mode::Normal => self.handle_normal_key(code, &mut exit)?,
            Mode::PersonForm {
                kind,
                editing,
                form,
            } => self.handle_person_form(code, kind, editing, form)?,
            Mode::ConfirmPersonDelete(confirm) => {
                self.handle_confirm_person_delete(code, confirm)?
            }
            Mode::CourseForm {
                editing,
                teacher_id,
                form,
            } => self.handle_course_form(code, editing, teacher_id, form)?,
            Mode::ConfirmCourseDelete(confirm) => {
                self.handle_confirm_course_delete(code, confirm)?
            }
            Mode::PickingCourse {
                student_id,
                student_name,
                picker,
            } => self.handle_pick_course(code, student_id, student_name, picker)?,
            Mode::PickingTeacher {
                course_id,
                course_title,
                picker,
            } => self.handle_pick_teacher(code, course_id, course_title, picker)?,
            Mode::Roster(view) => self.handle_roster(code, view)?,
            Mode::ConfirmUnenroll(confirm) => self.handle_confirm_unenroll(code, confirm)?,
        };

        self.mode = mode;
        Ok(exit)
    }

    fn handle_normal_key(&mut self, code: KeyCode, exit: &mut bool) -> Result<Mode> {
        // Page switching works the same from every page.
        match code {
            KeyCode::Char('q') | KeyCode::Esc => {
                *exit = true;
                return Ok(Mode::Normal);
            }
            KeyCode::Tab => {
                self.switch_page(self.page.next())?;
                return Ok(Mode::Normal);
            }
            KeyCode::BackTab => {
                self.switch_page(self.page.previous())?;
                return Ok(Mode::Normal);
            }
            KeyCode::Char(ch @ '1'..='5') => {
                let index = ch as usize - '1' as usize;
                self.switch_page(Page::ALL[index])?;
                return Ok(Mode::Normal);
            }
            _ => {}
        }

        match self.page {
            Page::Dashboard => Ok(Mode::Normal),
            Page::Students => self.handle_people_key(code, PersonKind::Student),
            Page::Teachers => self.handle_people_key(code, PersonKind::Teacher),
            Page::Courses => self.handle_courses_key(code),
            Page::Reports => {
                match code {
                    KeyCode::Left => self.reports.tab = self.reports.tab.previous(),
                    KeyCode::Right => self.reports.tab = self.reports.tab.next(),
                    _ => {}
                }
                Ok(Mode::Normal)
            }
        }
    }

    fn handle_people_key(&mut self, code: KeyCode, kind: PersonKind) -> Result<Mode> {
        match code {
            KeyCode::Up => self.people_screen_mut(kind).move_selection(-1),
            KeyCode::Down => self.people_screen_mut(kind).move_selection(1),
            KeyCode::PageUp => self.people_screen_mut(kind).move_selection(-5),
            KeyCode::PageDown => self.people_screen_mut(kind).move_selection(5),
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::PersonForm {
                    kind,
                    editing: None,
                    form: PersonForm::default(),
                });
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let selected = self.people_screen(kind).current().cloned();
                match selected {
                    Some(person) => {
                        self.clear_status();
                        return Ok(Mode::PersonForm {
                            kind,
                            editing: Some(person.id),
                            form: PersonForm::from_person(&person),
                        });
                    }
                    None => self.set_status(
                        format!("No {} selected to edit.", kind.as_str()),
                        StatusKind::Error,
                    ),
                }
            }
            KeyCode::Char('-') => {
                let selected = self.people_screen(kind).current().cloned();
                match selected {
                    Some(person) => {
                        self.clear_status();
                        return Ok(Mode::ConfirmPersonDelete(ConfirmPersonDelete::from(&person)));
                    }
                    None => self.set_status(
                        format!("No {} selected to remove.", kind.as_str()),
                        StatusKind::Error,
                    ),
                }
            }
            KeyCode::Char('n') | KeyCode::Char('N') if kind == PersonKind::Student => {
                let selected = self.students.current().cloned();
                match selected {
                    Some(student) => return self.open_course_picker(student),
                    None => {
                        self.set_status("No student selected to enroll.", StatusKind::Error)
                    }
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_courses_key(&mut self, code: KeyCode) -> Result<Mode> {
        match code {
            KeyCode::Up => self.courses.move_selection(-1),
            KeyCode::Down => self.courses.move_selection(1),
            KeyCode::PageUp => self.courses.move_selection(-5),
            KeyCode::PageDown => self.courses.move_selection(5),
            KeyCode::Char('+') => {
                self.clear_status();
                return Ok(Mode::CourseForm {
                    editing: None,
                    teacher_id: None,
                    form: CourseForm::default(),
                });
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                let selected = self.courses.current().cloned();
                match selected {
                    Some(course) => {
                        self.clear_status();
                        return Ok(Mode::CourseForm {
                            editing: Some(course.id),
                            teacher_id: course.teacher_id,
                            form: CourseForm::from_course(&course),
                        });
                    }
                    None => self.set_status("No course selected to edit.", StatusKind::Error),
                }
            }
            KeyCode::Char('-') => {
                let selected = self.courses.current().cloned();
                match selected {
                    Some(course) => {
                        self.clear_status();
                        return Ok(Mode::ConfirmCourseDelete(ConfirmCourseDelete::from(&course)));
                    }
                    None => self.set_status("No course selected to remove.", StatusKind::Error),
                }
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                let selected = self.courses.current().cloned();
                match selected {
                    Some(course) => return self.open_teacher_picker(course),
                    None => self.set_status("No course selected.", StatusKind::Error),
                }
            }
            KeyCode::Enter => {
                let selected = self.courses.current().cloned();
                match selected {
                    Some(course) => {
                        self.clear_status();
                        let view =
                            RosterView::load(&self.conn, course.id, course.display_label())?;
                        return Ok(Mode::Roster(view));
                    }
                    None => self.set_status("No course selected.", StatusKind::Error),
                }
            }
            _ => {}
        }
        Ok(Mode::Normal)
    }

    fn handle_person_form(
        &mut self,
        code: KeyCode,
        kind: PersonKind,
        editing: Option<i64>,
        mut form: PersonForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((name, email, phone, notes)) => {
                    let result = match editing {
                        Some(id) => {
                            update_person(&self.conn, id, &name, &email, &phone, &notes)
                                .map(|_| format!("{} '{name}' updated.", kind.label()))
                        }
                        None => create_person(&self.conn, kind, &name, &email, &phone, &notes)
                            .map(|person| format!("{} '{}' added.", kind.label(), person.name)),
                    };
                    match result {
                        Ok(message) => {
                            self.refresh_page()?;
                            self.set_status(message, StatusKind::Info);
                            return Ok(Mode::Normal);
                        }
                        Err(err) => form.error = Some(surface_error(&err)),
                    }
                }
                Err(err) => form.error = Some(err.to_string()),
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::PersonForm {
            kind,
            editing,
            form,
        })
    }

    fn handle_course_form(
        &mut self,
        code: KeyCode,
        editing: Option<i64>,
        teacher_id: Option<i64>,
        mut form: CourseForm,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Tab => form.toggle_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Down if form.active == CourseField::Mode => form.cycle_mode(1),
            KeyCode::Up if form.active == CourseField::Mode => form.cycle_mode(-1),
            KeyCode::Enter => match form.parse_inputs() {
                Ok((code_text, title, duration, mode)) => {
                    let result = match editing {
                        Some(id) => update_course(
                            &self.conn,
                            id,
                            &code_text,
                            &title,
                            &duration,
                            &mode,
                            teacher_id,
                        )
                        .map(|_| format!("Course '{title}' updated.")),
                        None => create_course(&self.conn, &code_text, &title, &duration, &mode)
                            .map(|course| format!("Course '{}' added.", course.title)),
                    };
                    match result {
                        Ok(message) => {
                            self.refresh_page()?;
                            self.set_status(message, StatusKind::Info);
                            return Ok(Mode::Normal);
                        }
                        Err(err) => form.error = Some(surface_error(&err)),
                    }
                }
                Err(err) => form.error = Some(err.to_string()),
            },
            KeyCode::Char(ch) => {
                form.push_char(ch);
            }
            _ => {}
        }
        Ok(Mode::CourseForm {
            editing,
            teacher_id,
            form,
        })
    }

    fn handle_confirm_person_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmPersonDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                delete_person(&self.conn, confirm.id)?;
                self.refresh_page()?;
                self.set_status(
                    format!("{} '{}' deleted.", confirm.kind.label(), confirm.name),
                    StatusKind::Info,
                );
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmPersonDelete(confirm)),
        }
    }

    fn handle_confirm_course_delete(
        &mut self,
        code: KeyCode,
        confirm: ConfirmCourseDelete,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                delete_course(&self.conn, confirm.id)?;
                self.refresh_page()?;
                self.set_status(
                    format!("Course '{}' deleted.", confirm.title),
                    StatusKind::Info,
                );
                Ok(Mode::Normal)
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Ok(Mode::Normal),
            _ => Ok(Mode::ConfirmCourseDelete(confirm)),
        }
    }

    fn handle_pick_course(
        &mut self,
        code: KeyCode,
        student_id: i64,
        student_name: String,
        mut picker: PickerState,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Up => picker.move_selection(-1),
            KeyCode::Down => picker.move_selection(1),
            KeyCode::PageUp => picker.move_selection(-5),
            KeyCode::PageDown => picker.move_selection(5),
            KeyCode::Enter => {
                if let Some(item) = picker.current() {
                    let message = if enroll(&self.conn, student_id, item.id)? {
                        format!("Enrolled {student_name} in {}.", item.label)
                    } else {
                        format!("{student_name} is already enrolled in {}.", item.label)
                    };
                    self.refresh_page()?;
                    self.set_status(message, StatusKind::Info);
                    return Ok(Mode::Normal);
                }
            }
            _ => {}
        }
        Ok(Mode::PickingCourse {
            student_id,
            student_name,
            picker,
        })
    }

    fn handle_pick_teacher(
        &mut self,
        code: KeyCode,
        course_id: i64,
        course_title: String,
        mut picker: PickerState,
    ) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Up => picker.move_selection(-1),
            KeyCode::Down => picker.move_selection(1),
            KeyCode::PageUp => picker.move_selection(-5),
            KeyCode::PageDown => picker.move_selection(5),
            KeyCode::Enter => {
                if let Some(item) = picker.current() {
                    assign_teacher(&self.conn, course_id, item.id)?;
                    self.refresh_page()?;
                    self.set_status(
                        format!("Assigned {} to {course_title}.", item.label),
                        StatusKind::Info,
                    );
                    return Ok(Mode::Normal);
                }
            }
            _ => {}
        }
        Ok(Mode::PickingTeacher {
            course_id,
            course_title,
            picker,
        })
    }

    fn handle_roster(&mut self, code: KeyCode, mut view: RosterView) -> Result<Mode> {
        match code {
            KeyCode::Esc => return Ok(Mode::Normal),
            KeyCode::Up => view.move_selection(-1),
            KeyCode::Down => view.move_selection(1),
            KeyCode::Char('-') => {
                let selected = view.current().cloned();
                match selected {
                    Some(entry) => {
                        return Ok(Mode::ConfirmUnenroll(ConfirmUnenroll {
                            course_id: view.course_id,
                            course_title: view.course_title.clone(),
                            student_id: entry.student_id,
                            student_name: entry.name,
                        }));
                    }
                    None => self.set_status("No student selected.", StatusKind::Error),
                }
            }
            _ => {}
        }
        Ok(Mode::Roster(view))
    }

    fn handle_confirm_unenroll(
        &mut self,
        code: KeyCode,
        confirm: ConfirmUnenroll,
    ) -> Result<Mode> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => {
                unenroll(&self.conn, confirm.student_id, confirm.course_id)?;
                self.set_status(
                    format!(
                        "Removed {} from {}.",
                        confirm.student_name, confirm.course_title
                    ),
                    StatusKind::Info,
                );
                let view = RosterView::load(&self.conn, confirm.course_id, confirm.course_title)?;
                Ok(Mode::Roster(view))
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                let view = RosterView::load(&self.conn, confirm.course_id, confirm.course_title)?;
                Ok(Mode::Roster(view))
            }
            _ => Ok(Mode::ConfirmUnenroll(confirm)),
        }
    }

    fn open_course_picker(&mut self, student: Person) -> Result<Mode> {
        let courses = fetch_courses(&self.conn)?;
        if courses.is_empty() {
            self.set_status("No courses exist. Add a course first.", StatusKind::Error);
            return Ok(Mode::Normal);
        }
        self.clear_status();
        let items = courses
            .iter()
            .map(|course| PickerItem {
                id: course.id,
                label: course.display_label(),
            })
            .collect();
        Ok(Mode::PickingCourse {
            student_id: student.id,
            student_name: student.name,
            picker: PickerState::new(items),
        })
    }

    fn open_teacher_picker(&mut self, course: Course) -> Result<Mode> {
        let teachers = fetch_people(&self.conn, Some(PersonKind::Teacher))?;
        if teachers.is_empty() {
            self.set_status("No teachers exist. Add a teacher first.", StatusKind::Error);
            return Ok(Mode::Normal);
        }
        self.clear_status();
        let items = teachers
            .into_iter()
            .map(|teacher| PickerItem {
                id: teacher.id,
                label: teacher.name,
            })
            .collect();
        Ok(Mode::PickingTeacher {
            course_id: course.id,
            course_title: course.display_label(),
            picker: PickerState::new(items),
        })
    }

    fn people_screen(&self, kind: PersonKind) -> &PeopleScreen {
        match kind {
            PersonKind::Student => &self.students,
            PersonKind::Teacher => &self.teachers,
        }
    }

    fn people_screen_mut(&mut self, kind: PersonKind) -> &mut PeopleScreen {
        match kind {
            PersonKind::Student => &mut self.students,
            PersonKind::Teacher => &mut self.teachers,
        }
    }

    fn switch_page(&mut self, page: Page) -> Result<()> {
        self.page = page;
        self.clear_status();
        self.refresh_page()
    }

    /// Re-query whatever the active page shows. There is no cache beyond the
    /// page state itself, so this is the single refresh point after every
    /// mutation and navigation.
    fn refresh_page(&mut self) -> Result<()> {
        match self.page {
            Page::Dashboard => self.dashboard.refresh(&self.conn),
            Page::Students => self.students.refresh(&self.conn),
            Page::Teachers => self.teachers.refresh(&self.conn),
            Page::Courses => self.courses.refresh(&self.conn),
            Page::Reports => self.reports.refresh(&self.conn),
        }
    }

    fn set_status<S: Into<String>>(&mut self, text: S, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(HEADER_HEIGHT),
                Constraint::Min(1),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_header(frame, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(1)])
            .split(chunks[1]);
        self.draw_sidebar(frame, body[0]);

        match self.page {
            Page::Dashboard => self.draw_dashboard(frame, body[1]),
            Page::Students => self.draw_people(frame, body[1], &self.students),
            Page::Teachers => self.draw_people(frame, body[1], &self.teachers),
            Page::Courses => self.draw_courses(frame, body[1]),
            Page::Reports => self.draw_reports(frame, body[1]),
        }

        self.draw_footer(frame, chunks[2]);

        match &self.mode {
            Mode::Normal => {}
            Mode::PersonForm {
                kind,
                editing,
                form,
            } => self.draw_person_form(frame, area, *kind, editing.is_some(), form),
            Mode::ConfirmPersonDelete(confirm) => self.draw_confirm(
                frame,
                area,
                "Confirm Removal",
                vec![
                    Line::from(format!(
                        "Delete {} '{}'?",
                        confirm.kind.as_str(),
                        confirm.name
                    )),
                    Line::from("Their enrollments will be removed as well."),
                ],
            ),
            Mode::CourseForm { editing, form, .. } => {
                self.draw_course_form(frame, area, editing.is_some(), form)
            }
            Mode::ConfirmCourseDelete(confirm) => self.draw_confirm(
                frame,
                area,
                "Confirm Removal",
                vec![
                    Line::from(format!("Delete course '{}'?", confirm.title)),
                    Line::from("All enrollments in this course will be removed."),
                ],
            ),
            Mode::PickingCourse {
                student_name,
                picker,
                ..
            } => self.draw_picker(
                frame,
                area,
                &format!("Enroll {student_name}"),
                picker,
            ),
            Mode::PickingTeacher {
                course_title,
                picker,
                ..
            } => self.draw_picker(
                frame,
                area,
                &format!("Assign Teacher to {course_title}"),
                picker,
            ),
            Mode::Roster(view) => self.draw_roster(frame, area, view),
            Mode::ConfirmUnenroll(confirm) => self.draw_confirm(
                frame,
                area,
                "Remove Enrollment",
                vec![Line::from(format!(
                    "Remove {} from {}?",
                    confirm.student_name, confirm.course_title
                ))],
            ),
        }
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                "Institute Manager",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(self.page.title(), Style::default().fg(Color::Gray)),
        ]);
        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }

    fn draw_sidebar(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = Page::ALL
            .iter()
            .enumerate()
            .map(|(index, page)| {
                let label = format!("{} {}", index + 1, page.title());
                if *page == self.page {
                    ListItem::new(label).style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ListItem::new(label)
                }
            })
            .collect();

        let list =
            List::new(items).block(Block::default().borders(Borders::ALL).title("Pages"));
        frame.render_widget(list, area);
    }

    fn draw_dashboard(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Dashboard");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let counts = self.dashboard.summary;
        let mut lines = vec![
            Line::from(format!("Total Students: {}", counts.students)),
            Line::from(format!("Total Teachers: {}", counts.teachers)),
            Line::from(format!("Total Courses: {}", counts.courses)),
            Line::from(""),
            Line::from(Span::styled(
                "Courses at a glance:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        if self.dashboard.sample_courses.is_empty() {
            lines.push(Line::from(Span::styled(
                "  none yet",
                Style::default().fg(Color::DarkGray),
            )));
        } else {
            for course in &self.dashboard.sample_courses {
                lines.push(Line::from(format!("  - {}", course.display_label())));
            }
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
    }

    fn draw_people(&self, frame: &mut Frame, area: Rect, screen: &PeopleScreen) {
        let title = format!("{}s", screen.kind.label());
        let block = Block::default().borders(Borders::ALL).title(title);

        if screen.people.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new(format!(
                    "No {}s yet. Press + to add one.",
                    screen.kind.as_str()
                ))
                .style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let header = Row::new(["ID", "Name", "Email", "Phone", "Notes"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = screen
            .people
            .iter()
            .map(|person| {
                Row::new([
                    person.id.to_string(),
                    person.name.clone(),
                    person.email.clone(),
                    person.phone.clone(),
                    person.notes.clone(),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Length(14),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(screen.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_courses(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL).title("Courses");

        if self.courses.courses.is_empty() {
            let inner = block.inner(area);
            frame.render_widget(block, area);
            frame.render_widget(
                Paragraph::new("No courses yet. Press + to add one.")
                    .style(Style::default().fg(Color::DarkGray)),
                inner,
            );
            return;
        }

        let header = Row::new(["ID", "Code", "Title", "Duration", "Mode", "Teacher"])
            .style(Style::default().add_modifier(Modifier::BOLD));
        let rows: Vec<Row> = self
            .courses
            .courses
            .iter()
            .map(|course| {
                Row::new([
                    course.id.to_string(),
                    cell_or_dash(course.code.as_deref()),
                    course.title.clone(),
                    course.duration.clone(),
                    course.mode.clone(),
                    cell_or_dash(self.courses.teacher_name(course)),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(5),
                Constraint::Length(10),
                Constraint::Percentage(35),
                Constraint::Length(12),
                Constraint::Length(10),
                Constraint::Min(10),
            ],
        )
        .header(header)
        .block(block)
        .row_highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

        let mut state = TableState::default();
        state.select(Some(self.courses.selected));
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_reports(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let titles: Vec<&str> = ReportTab::ALL.iter().map(|tab| tab.title()).collect();
        let tabs = Tabs::new(titles)
            .select(self.reports.tab.index())
            .block(Block::default().borders(Borders::ALL).title("Reports"))
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, chunks[0]);

        let (headers, rows): ([&str; 2], Vec<Row>) = match self.reports.tab {
            ReportTab::Students => (
                ["Student", "Course"],
                self.reports
                    .student_rows
                    .iter()
                    .map(|row| Row::new([row.student.clone(), row.course.clone()]))
                    .collect(),
            ),
            ReportTab::Teachers => (
                ["Teacher", "Course"],
                self.reports
                    .teacher_rows
                    .iter()
                    .map(|row| {
                        Row::new([row.teacher.clone(), cell_or_dash(row.course.as_deref())])
                    })
                    .collect(),
            ),
            ReportTab::Courses => (
                ["Course", "Student"],
                self.reports
                    .course_rows
                    .iter()
                    .map(|row| {
                        Row::new([row.course.clone(), cell_or_dash(row.student.as_deref())])
                    })
                    .collect(),
            ),
        };

        let table = Table::new(
            rows,
            [Constraint::Percentage(50), Constraint::Percentage(50)],
        )
        .header(Row::new(headers).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(self.reports.tab.title()),
        );
        frame.render_widget(table, chunks[1]);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::ALL);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let status_line = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.kind.style())),
            None => Line::from(""),
        };
        let hint_line = Line::from(Span::styled(
            self.footer_hint(),
            Style::default().fg(Color::Gray),
        ));
        frame.render_widget(Paragraph::new(vec![status_line, hint_line]), inner);
    }

    fn footer_hint(&self) -> &'static str {
        match &self.mode {
            Mode::Normal => match self.page {
                Page::Dashboard => "Tab / 1-5 switch page • q quit",
                Page::Students => {
                    "↑/↓ select • + add • e edit • - delete • n enroll • Tab page • q quit"
                }
                Page::Teachers => "↑/↓ select • + add • e edit • - delete • Tab page • q quit",
                Page::Courses => {
                    "↑/↓ select • + add • e edit • - delete • t teacher • Enter roster • q quit"
                }
                Page::Reports => "←/→ switch report • Tab page • q quit",
            },
            Mode::PersonForm { .. } | Mode::CourseForm { .. } => {
                "Tab next field • Enter save • Esc cancel"
            }
            Mode::ConfirmPersonDelete(_)
            | Mode::ConfirmCourseDelete(_)
            | Mode::ConfirmUnenroll(_) => "Y confirm • N / Esc cancel",
            Mode::PickingCourse { .. } | Mode::PickingTeacher { .. } => {
                "↑/↓ select • Enter choose • Esc cancel"
            }
            Mode::Roster(_) => "↑/↓ select • - unenroll • Esc close",
        }
    }

    fn draw_person_form(
        &self,
        frame: &mut Frame,
        area: Rect,
        kind: PersonKind,
        editing: bool,
        form: &PersonForm,
    ) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let title = format!("{} {}", if editing { "Edit" } else { "Add" }, kind.label());
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Name", PersonField::Name),
            form.build_line("Email", PersonField::Email),
            form.build_line("Phone", PersonField::Phone),
            form.build_line("Notes", PersonField::Notes),
            Line::from(""),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (row, prefix) = match form.active {
            PersonField::Name => (0, "Name: ".len()),
            PersonField::Email => (1, "Email: ".len()),
            PersonField::Phone => (2, "Phone: ".len()),
            PersonField::Notes => (3, "Notes: ".len()),
        };
        frame.set_cursor_position((
            inner.x + prefix as u16 + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_course_form(&self, frame: &mut Frame, area: Rect, editing: bool, form: &CourseForm) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let title = if editing { "Edit Course" } else { "Add Course" };
        let block = Block::default().title(title).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = vec![
            form.build_line("Code", CourseField::Code),
            form.build_line("Title", CourseField::Title),
            form.build_line("Duration", CourseField::Duration),
            form.build_line("Mode", CourseField::Mode),
            Line::from(""),
            Line::from(Span::styled(
                format!("Mode cycles {} with Up/Down.", MODE_SUGGESTIONS.join(" / ")),
                Style::default().fg(Color::Gray),
            )),
        ];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);

        let (row, prefix) = match form.active {
            CourseField::Code => (0, "Code: ".len()),
            CourseField::Title => (1, "Title: ".len()),
            CourseField::Duration => (2, "Duration: ".len()),
            CourseField::Mode => (3, "Mode: ".len()),
        };
        frame.set_cursor_position((
            inner.x + prefix as u16 + form.value_len(form.active) as u16,
            inner.y + row,
        ));
    }

    fn draw_confirm(
        &self,
        frame: &mut Frame,
        area: Rect,
        title: &str,
        message: Vec<Line<'static>>,
    ) {
        let popup_area = centered_rect(60, 30, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let mut lines = message;
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press Y to confirm or N / Esc to cancel.",
            Style::default().fg(Color::Gray),
        )));

        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn draw_picker(&self, frame: &mut Frame, area: Rect, title: &str, picker: &PickerState) {
        let popup_area = centered_rect(60, 50, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default().title(title.to_string()).borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        let items: Vec<ListItem> = picker
            .items
            .iter()
            .map(|item| ListItem::new(item.label.clone()))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(picker.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }

    fn draw_roster(&self, frame: &mut Frame, area: Rect, view: &RosterView) {
        let popup_area = centered_rect(60, 60, area);
        frame.render_widget(Clear, popup_area);

        let block = Block::default()
            .title(format!("Roster: {}", view.course_title))
            .borders(Borders::ALL);
        frame.render_widget(block.clone(), popup_area);
        let inner = block.inner(popup_area);

        if view.entries.is_empty() {
            frame.render_widget(
                Paragraph::new("No students enrolled in this course yet.")
                    .style(Style::default().fg(Color::DarkGray))
                    .wrap(Wrap { trim: true }),
                inner,
            );
            return;
        }

        let items: Vec<ListItem> = view
            .entries
            .iter()
            .map(|entry| ListItem::new(entry.name.clone()))
            .collect();

        let list = List::new(items)
            .highlight_style(Style::default().fg(Color::Yellow))
            .highlight_symbol("▶ ");

        let mut list_state = ListState::default();
        list_state.select(Some(view.selected));
        frame.render_stateful_widget(list, inner, &mut list_state);
    }
}
