//! Read-only join queries behind the Reports page and the dashboard. Each
//! function is a pure view over current state; nothing here mutates rows.

use anyhow::{Context, Result};
use rusqlite::Connection;

/// One enrollment, resolved to display names.
#[derive(Debug, Clone)]
pub struct StudentCourseRow {
    pub student: String,
    pub course: String,
}

/// A teacher and one of their assigned courses. `course` is `None` for
/// teachers with no assignment, so they still show up in the report.
#[derive(Debug, Clone)]
pub struct TeacherCourseRow {
    pub teacher: String,
    pub course: Option<String>,
}

/// A course and one of its enrolled students. `student` is `None` for
/// courses nobody has enrolled in yet.
#[derive(Debug, Clone)]
pub struct CourseStudentRow {
    pub course: String,
    pub student: Option<String>,
}

/// Row counts shown on the dashboard.
#[derive(Debug, Clone, Copy, Default)]
pub struct Summary {
    pub students: i64,
    pub teachers: i64,
    pub courses: i64,
}

/// Every enrollment joined to its student name and course title, ordered by
/// student name.
pub fn student_course_rows(conn: &Connection) -> Result<Vec<StudentCourseRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT p.name, c.title
             FROM enrollment e
             INNER JOIN person p ON e.student_id = p.id
             INNER JOIN course c ON e.course_id = c.id
             ORDER BY p.name COLLATE NOCASE",
        )
        .context("failed to prepare student report query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(StudentCourseRow {
                student: row.get(0)?,
                course: row.get(1)?,
            })
        })
        .context("failed to load student report")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect student report")?;

    Ok(rows)
}

/// Every teacher left-joined to the courses assigned to them, ordered by
/// teacher name. Unassigned teachers yield a single row with no course.
pub fn teacher_course_rows(conn: &Connection) -> Result<Vec<TeacherCourseRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT t.name, c.title
             FROM person t
             LEFT JOIN course c ON c.teacher_id = t.id
             WHERE t.kind = 'teacher'
             ORDER BY t.name COLLATE NOCASE",
        )
        .context("failed to prepare teacher report query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(TeacherCourseRow {
                teacher: row.get(0)?,
                course: row.get(1)?,
            })
        })
        .context("failed to load teacher report")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect teacher report")?;

    Ok(rows)
}

/// Every course left-joined to its enrolled students, ordered by course
/// title. Courses without enrollments yield a single row with no student.
pub fn course_student_rows(conn: &Connection) -> Result<Vec<CourseStudentRow>> {
    let mut stmt = conn
        .prepare(
            "SELECT c.title, p.name
             FROM course c
             LEFT JOIN enrollment e ON c.id = e.course_id
             LEFT JOIN person p ON e.student_id = p.id
             ORDER BY c.title COLLATE NOCASE, p.name COLLATE NOCASE",
        )
        .context("failed to prepare course report query")?;

    let rows = stmt
        .query_map([], |row| {
            Ok(CourseStudentRow {
                course: row.get(0)?,
                student: row.get(1)?,
            })
        })
        .context("failed to load course report")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect course report")?;

    Ok(rows)
}

/// Count students, teachers, and courses in one round trip.
pub fn summary(conn: &Connection) -> Result<Summary> {
    conn.query_row(
        "SELECT
            (SELECT COUNT(*) FROM person WHERE kind = 'student'),
            (SELECT COUNT(*) FROM person WHERE kind = 'teacher'),
            (SELECT COUNT(*) FROM course)",
        [],
        |row| {
            Ok(Summary {
                students: row.get(0)?,
                teachers: row.get(1)?,
                courses: row.get(2)?,
            })
        },
    )
    .context("failed to compute summary")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{assign_teacher, create_course, create_person, enroll, initialize};
    use crate::models::PersonKind;

    fn memory_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn student_report_lists_enrollments_by_student_name() {
        let conn = memory_store();
        let zoe = create_person(&conn, PersonKind::Student, "Zoe", "", "", "").unwrap();
        let amy = create_person(&conn, PersonKind::Student, "Amy", "", "", "").unwrap();
        let intro = create_course(&conn, "CS101", "Intro", "", "").unwrap();
        enroll(&conn, zoe.id, intro.id).unwrap();
        enroll(&conn, amy.id, intro.id).unwrap();

        let rows = student_course_rows(&conn).unwrap();
        let summary: Vec<_> = rows
            .iter()
            .map(|r| (r.student.as_str(), r.course.as_str()))
            .collect();
        assert_eq!(summary, vec![("Amy", "Intro"), ("Zoe", "Intro")]);
    }

    #[test]
    fn unassigned_teacher_still_appears_without_a_course() {
        let conn = memory_store();
        let ada = create_person(&conn, PersonKind::Teacher, "Ada", "", "", "").unwrap();
        create_person(&conn, PersonKind::Teacher, "Babbage", "", "", "").unwrap();
        let intro = create_course(&conn, "CS101", "Intro", "", "").unwrap();
        assign_teacher(&conn, intro.id, ada.id).unwrap();

        let rows = teacher_course_rows(&conn).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].teacher, "Ada");
        assert_eq!(rows[0].course.as_deref(), Some("Intro"));
        assert_eq!(rows[1].teacher, "Babbage");
        assert_eq!(rows[1].course, None);
    }

    #[test]
    fn empty_course_still_appears_without_a_student() {
        let conn = memory_store();
        let alice = create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();
        let algebra = create_course(&conn, "", "Algebra", "", "").unwrap();
        create_course(&conn, "", "Biology", "", "").unwrap();
        enroll(&conn, alice.id, algebra.id).unwrap();

        let rows = course_student_rows(&conn).unwrap();
        let summary: Vec<_> = rows
            .iter()
            .map(|r| (r.course.as_str(), r.student.as_deref()))
            .collect();
        assert_eq!(
            summary,
            vec![("Algebra", Some("Alice")), ("Biology", None)]
        );
    }

    #[test]
    fn summary_counts_each_table() {
        let conn = memory_store();
        create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();
        create_person(&conn, PersonKind::Student, "Bob", "", "", "").unwrap();
        create_person(&conn, PersonKind::Teacher, "Ada", "", "", "").unwrap();
        create_course(&conn, "", "Intro", "", "").unwrap();

        let counts = summary(&conn).unwrap();
        assert_eq!(counts.students, 2);
        assert_eq!(counts.teachers, 1);
        assert_eq!(counts.courses, 1);
    }
}
