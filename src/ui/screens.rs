use std::collections::HashMap;

use anyhow::Result;
use rusqlite::Connection;

use crate::db::{
    course_student_rows, fetch_courses, fetch_people, fetch_roster, student_course_rows, summary,
    teacher_course_rows, CourseStudentRow, RosterEntry, StudentCourseRow, Summary, TeacherCourseRow,
};
use crate::models::{Course, Person, PersonKind};

/// Number of courses shown in the dashboard quick list.
const DASHBOARD_COURSE_SAMPLE: usize = 10;

fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else {
        selected.min(len - 1)
    }
}

fn step_selection(selected: usize, len: usize, offset: isize) -> usize {
    if len == 0 {
        return 0;
    }
    let max = (len - 1) as isize;
    (selected as isize + offset).clamp(0, max) as usize
}

/// Table state for the Students and Teachers pages. Both pages are the same
/// widget over a different kind filter.
pub(crate) struct PeopleScreen {
    pub(crate) kind: PersonKind,
    pub(crate) people: Vec<Person>,
    pub(crate) selected: usize,
}

impl PeopleScreen {
    pub(crate) fn new(kind: PersonKind) -> Self {
        Self {
            kind,
            people: Vec::new(),
            selected: 0,
        }
    }

    /// Re-query the person list. Called on every navigation to this page and
    /// after every mutation, so the table always reflects the store.
    pub(crate) fn refresh(&mut self, conn: &Connection) -> Result<()> {
        self.people = fetch_people(conn, Some(self.kind))?;
        self.selected = clamp_selection(self.selected, self.people.len());
        Ok(())
    }

    pub(crate) fn current(&self) -> Option<&Person> {
        self.people.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, self.people.len(), offset);
    }
}

/// Table state for the Courses page. Teacher names are resolved up front so
/// each row can show an assignment without a per-row query.
pub(crate) struct CoursesScreen {
    pub(crate) courses: Vec<Course>,
    pub(crate) selected: usize,
    teacher_names: HashMap<i64, String>,
}

impl CoursesScreen {
    pub(crate) fn new() -> Self {
        Self {
            courses: Vec::new(),
            selected: 0,
            teacher_names: HashMap::new(),
        }
    }

    pub(crate) fn refresh(&mut self, conn: &Connection) -> Result<()> {
        self.courses = fetch_courses(conn)?;
        self.teacher_names = fetch_people(conn, Some(PersonKind::Teacher))?
            .into_iter()
            .map(|t| (t.id, t.name))
            .collect();
        self.selected = clamp_selection(self.selected, self.courses.len());
        Ok(())
    }

    pub(crate) fn current(&self) -> Option<&Course> {
        self.courses.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, self.courses.len(), offset);
    }

    /// Teacher name for a course, if one is assigned and still exists.
    pub(crate) fn teacher_name(&self, course: &Course) -> Option<&str> {
        course
            .teacher_id
            .and_then(|id| self.teacher_names.get(&id))
            .map(String::as_str)
    }
}

/// The three report views, switched with the arrow keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ReportTab {
    Students,
    Teachers,
    Courses,
}

impl ReportTab {
    pub(crate) const ALL: [ReportTab; 3] = [ReportTab::Students, ReportTab::Teachers, ReportTab::Courses];

    pub(crate) fn title(self) -> &'static str {
        match self {
            ReportTab::Students => "Students & Enrollments",
            ReportTab::Teachers => "Teachers & Courses",
            ReportTab::Courses => "Courses & Students",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            ReportTab::Students => 0,
            ReportTab::Teachers => 1,
            ReportTab::Courses => 2,
        }
    }

    pub(crate) fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub(crate) fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Cached rows for the Reports page. All three views are loaded together on
/// navigation; the tabs just switch which cache is rendered.
pub(crate) struct ReportsScreen {
    pub(crate) tab: ReportTab,
    pub(crate) student_rows: Vec<StudentCourseRow>,
    pub(crate) teacher_rows: Vec<TeacherCourseRow>,
    pub(crate) course_rows: Vec<CourseStudentRow>,
}

impl ReportsScreen {
    pub(crate) fn new() -> Self {
        Self {
            tab: ReportTab::Students,
            student_rows: Vec::new(),
            teacher_rows: Vec::new(),
            course_rows: Vec::new(),
        }
    }

    pub(crate) fn refresh(&mut self, conn: &Connection) -> Result<()> {
        self.student_rows = student_course_rows(conn)?;
        self.teacher_rows = teacher_course_rows(conn)?;
        self.course_rows = course_student_rows(conn)?;
        Ok(())
    }
}

/// Counts and a short course list for the Dashboard page.
pub(crate) struct DashboardScreen {
    pub(crate) summary: Summary,
    pub(crate) sample_courses: Vec<Course>,
}

impl DashboardScreen {
    pub(crate) fn new() -> Self {
        Self {
            summary: Summary::default(),
            sample_courses: Vec::new(),
        }
    }

    pub(crate) fn refresh(&mut self, conn: &Connection) -> Result<()> {
        self.summary = summary(conn)?;
        let mut courses = fetch_courses(conn)?;
        courses.truncate(DASHBOARD_COURSE_SAMPLE);
        self.sample_courses = courses;
        Ok(())
    }
}

/// Modal listing the students enrolled in one course.
pub(crate) struct RosterView {
    pub(crate) course_id: i64,
    pub(crate) course_title: String,
    pub(crate) entries: Vec<RosterEntry>,
    pub(crate) selected: usize,
}

impl RosterView {
    pub(crate) fn load(conn: &Connection, course_id: i64, course_title: String) -> Result<Self> {
        let entries = fetch_roster(conn, course_id)?;
        Ok(Self {
            course_id,
            course_title,
            entries,
            selected: 0,
        })
    }

    pub(crate) fn current(&self) -> Option<&RosterEntry> {
        self.entries.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, self.entries.len(), offset);
    }
}

/// One selectable row in a picker modal.
pub(crate) struct PickerItem {
    pub(crate) id: i64,
    pub(crate) label: String,
}

/// Selection state for the course and teacher picker modals.
pub(crate) struct PickerState {
    pub(crate) items: Vec<PickerItem>,
    pub(crate) selected: usize,
}

impl PickerState {
    pub(crate) fn new(items: Vec<PickerItem>) -> Self {
        Self { items, selected: 0 }
    }

    pub(crate) fn current(&self) -> Option<&PickerItem> {
        self.items.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        self.selected = step_selection(self.selected, self.items.len(), offset);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_stepping_stays_in_bounds() {
        assert_eq!(step_selection(0, 0, 1), 0);
        assert_eq!(step_selection(0, 3, -1), 0);
        assert_eq!(step_selection(2, 3, 5), 2);
        assert_eq!(step_selection(2, 3, -2), 0);
    }

    #[test]
    fn report_tabs_cycle_in_both_directions() {
        assert_eq!(ReportTab::Students.next(), ReportTab::Teachers);
        assert_eq!(ReportTab::Courses.next(), ReportTab::Students);
        assert_eq!(ReportTab::Students.previous(), ReportTab::Courses);
    }
}
