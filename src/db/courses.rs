use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use super::error::code_conflict;
use crate::models::Course;

fn course_from_row(row: &Row<'_>) -> rusqlite::Result<Course> {
    Ok(Course {
        id: row.get(0)?,
        code: row.get(1)?,
        title: row.get(2)?,
        duration: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        mode: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        teacher_id: row.get(5)?,
    })
}

/// Blank codes are stored as NULL so the UNIQUE constraint never fires for
/// courses entered without one.
fn normalized_code(code: &str) -> Option<&str> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Insert a new course row, returning the hydrated struct. A code already
/// used by another course fails with `StoreError::DuplicateCode` so the form
/// can show a friendly message instead of a raw constraint error.
pub fn create_course(
    conn: &Connection,
    code: &str,
    title: &str,
    duration: &str,
    mode: &str,
) -> Result<Course> {
    let code = normalized_code(code);
    conn.execute(
        "INSERT INTO course (code, title, duration, mode) VALUES (?1, ?2, ?3, ?4)",
        params![code, title, duration, mode],
    )
    .map_err(|err| code_conflict(err, code))
    .context("failed to insert course")?;

    let id = conn.last_insert_rowid();
    Ok(Course {
        id,
        code: code.map(str::to_string),
        title: title.to_string(),
        duration: duration.to_string(),
        mode: mode.to_string(),
        teacher_id: None,
    })
}

/// Overwrite every field of an existing course, including the teacher
/// assignment. The same code-uniqueness rule applies as on insert. An
/// unknown id affects zero rows and is not an error.
pub fn update_course(
    conn: &Connection,
    id: i64,
    code: &str,
    title: &str,
    duration: &str,
    mode: &str,
    teacher_id: Option<i64>,
) -> Result<()> {
    let code = normalized_code(code);
    conn.execute(
        "UPDATE course SET code = ?1, title = ?2, duration = ?3, mode = ?4, teacher_id = ?5
         WHERE id = ?6",
        params![code, title, duration, mode, teacher_id, id],
    )
    .map_err(|err| code_conflict(err, code))
    .context("failed to update course")?;
    Ok(())
}

/// Remove a course row. Enrollments referencing it cascade away. An unknown
/// id is a no-op.
pub fn delete_course(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM course WHERE id = ?1", params![id])
        .context("failed to delete course")?;
    Ok(())
}

/// Retrieve every course sorted by title. The query doubles as the single
/// source of truth for how we order courses in the UI.
pub fn fetch_courses(conn: &Connection) -> Result<Vec<Course>> {
    let mut stmt = conn
        .prepare(
            "SELECT id, code, title, duration, mode, teacher_id FROM course
             ORDER BY title COLLATE NOCASE",
        )
        .context("failed to prepare course query")?;

    let courses = stmt
        .query_map([], course_from_row)
        .context("failed to load courses")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect courses")?;

    Ok(courses)
}

/// Point a course at a teacher. The id must exist in the person table but
/// is deliberately not checked to be teacher-kind; the picker in the UI only
/// offers teachers.
pub fn assign_teacher(conn: &Connection, course_id: i64, teacher_id: i64) -> Result<()> {
    conn.execute(
        "UPDATE course SET teacher_id = ?1 WHERE id = ?2",
        params![teacher_id, course_id],
    )
    .context("failed to assign teacher")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_person, initialize, StoreError};
    use crate::models::PersonKind;

    fn memory_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn duplicate_code_fails_with_typed_error() {
        let conn = memory_store();
        create_course(&conn, "CS101", "Intro", "", "").unwrap();

        let err = create_course(&conn, "CS101", "Other", "", "").unwrap_err();
        match err.downcast_ref::<StoreError>() {
            Some(StoreError::DuplicateCode(code)) => assert_eq!(code, "CS101"),
            other => panic!("expected duplicate code error, got {other:?}"),
        }
    }

    #[test]
    fn blank_codes_never_conflict() {
        let conn = memory_store();
        create_course(&conn, "", "First", "", "").unwrap();
        create_course(&conn, "  ", "Second", "", "").unwrap();

        let courses = fetch_courses(&conn).unwrap();
        assert_eq!(courses.len(), 2);
        assert!(courses.iter().all(|c| c.code.is_none()));
    }

    #[test]
    fn update_rejects_a_taken_code() {
        let conn = memory_store();
        create_course(&conn, "CS101", "Intro", "", "").unwrap();
        let other = create_course(&conn, "CS202", "Advanced", "", "").unwrap();

        let err = update_course(&conn, other.id, "CS101", "Advanced", "", "", None).unwrap_err();
        assert!(err.downcast_ref::<StoreError>().is_some());
    }

    #[test]
    fn update_overwrites_all_fields_including_teacher() {
        let conn = memory_store();
        let teacher = create_person(&conn, PersonKind::Teacher, "Ada", "", "", "").unwrap();
        let course = create_course(&conn, "CS101", "Intro", "4 weeks", "Online").unwrap();

        update_course(
            &conn,
            course.id,
            "CS102",
            "Intro II",
            "6 weeks",
            "Hybrid",
            Some(teacher.id),
        )
        .unwrap();

        let stored = &fetch_courses(&conn).unwrap()[0];
        assert_eq!(stored.code.as_deref(), Some("CS102"));
        assert_eq!(stored.title, "Intro II");
        assert_eq!(stored.duration, "6 weeks");
        assert_eq!(stored.mode, "Hybrid");
        assert_eq!(stored.teacher_id, Some(teacher.id));
    }

    #[test]
    fn update_of_unknown_id_is_a_silent_noop() {
        let conn = memory_store();
        update_course(&conn, 42, "X", "Ghost", "", "", None).unwrap();
        assert!(fetch_courses(&conn).unwrap().is_empty());
    }

    #[test]
    fn courses_are_ordered_by_title() {
        let conn = memory_store();
        create_course(&conn, "", "networks", "", "").unwrap();
        create_course(&conn, "", "Algebra", "", "").unwrap();

        let titles: Vec<_> = fetch_courses(&conn)
            .unwrap()
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, vec!["Algebra", "networks"]);
    }

    #[test]
    fn assign_teacher_sets_the_reference() {
        let conn = memory_store();
        let teacher = create_person(&conn, PersonKind::Teacher, "Ada", "", "", "").unwrap();
        let course = create_course(&conn, "CS101", "Intro", "", "").unwrap();

        assign_teacher(&conn, course.id, teacher.id).unwrap();

        let stored = &fetch_courses(&conn).unwrap()[0];
        assert_eq!(stored.teacher_id, Some(teacher.id));
    }

    #[test]
    fn deleting_a_teacher_clears_the_assignment() {
        let conn = memory_store();
        let teacher = create_person(&conn, PersonKind::Teacher, "Ada", "", "", "").unwrap();
        let course = create_course(&conn, "CS101", "Intro", "", "").unwrap();
        assign_teacher(&conn, course.id, teacher.id).unwrap();

        crate::db::delete_person(&conn, teacher.id).unwrap();

        let stored = &fetch_courses(&conn).unwrap()[0];
        assert_eq!(stored.teacher_id, None);
    }
}
