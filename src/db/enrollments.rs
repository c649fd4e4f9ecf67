use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::error::is_unique_violation;

/// One student on a course roster, as returned by `fetch_roster`.
#[derive(Debug, Clone)]
pub struct RosterEntry {
    pub student_id: i64,
    pub name: String,
}

/// Link a student to a course. Returns `Ok(false)` when the pair already
/// exists; being enrolled twice is a normal outcome for the caller, not an
/// error. Foreign-key failures (an id that does not exist) still propagate.
pub fn enroll(conn: &Connection, student_id: i64, course_id: i64) -> Result<bool> {
    let inserted = conn.execute(
        "INSERT INTO enrollment (student_id, course_id) VALUES (?1, ?2)",
        params![student_id, course_id],
    );

    match inserted {
        Ok(_) => Ok(true),
        Err(err) if is_unique_violation(&err) => Ok(false),
        Err(err) => Err(err).context("failed to record enrollment"),
    }
}

/// Remove the enrollment linking a student to a course. A pair that was
/// never enrolled is a no-op.
pub fn unenroll(conn: &Connection, student_id: i64, course_id: i64) -> Result<()> {
    conn.execute(
        "DELETE FROM enrollment WHERE student_id = ?1 AND course_id = ?2",
        params![student_id, course_id],
    )
    .context("failed to remove enrollment")?;
    Ok(())
}

/// Get every student enrolled in a specific course, ordered by name. Used by
/// the roster view when the user drills into a course.
pub fn fetch_roster(conn: &Connection, course_id: i64) -> Result<Vec<RosterEntry>> {
    let mut stmt = conn
        .prepare(
            "SELECT p.id, p.name
             FROM enrollment e
             INNER JOIN person p ON e.student_id = p.id
             WHERE e.course_id = ?1
             ORDER BY p.name COLLATE NOCASE",
        )
        .context("failed to prepare roster query")?;

    let entries = stmt
        .query_map([course_id], |row| {
            Ok(RosterEntry {
                student_id: row.get(0)?,
                name: row.get(1)?,
            })
        })
        .context("failed to load roster")?
        .collect::<Result<Vec<_>, _>>()
        .context("failed to collect roster")?;

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_course, create_person, delete_course, delete_person, initialize};
    use crate::models::PersonKind;

    fn memory_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    fn enrollment_count(conn: &Connection) -> i64 {
        conn.query_row("SELECT COUNT(*) FROM enrollment", [], |row| row.get(0))
            .unwrap()
    }

    #[test]
    fn second_enroll_reports_false_and_adds_no_row() {
        let conn = memory_store();
        let alice = create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();
        let course = create_course(&conn, "CS101", "Intro", "", "").unwrap();

        assert!(enroll(&conn, alice.id, course.id).unwrap());
        assert!(!enroll(&conn, alice.id, course.id).unwrap());
        assert_eq!(enrollment_count(&conn), 1);
    }

    #[test]
    fn enrolling_an_unknown_student_is_an_error_not_false() {
        let conn = memory_store();
        let course = create_course(&conn, "CS101", "Intro", "", "").unwrap();
        assert!(enroll(&conn, 999, course.id).is_err());
    }

    #[test]
    fn unenroll_removes_the_student_from_the_roster() {
        let conn = memory_store();
        let alice = create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();
        let bob = create_person(&conn, PersonKind::Student, "Bob", "", "", "").unwrap();
        let course = create_course(&conn, "CS101", "Intro", "", "").unwrap();
        enroll(&conn, alice.id, course.id).unwrap();
        enroll(&conn, bob.id, course.id).unwrap();

        unenroll(&conn, alice.id, course.id).unwrap();

        let names: Vec<_> = fetch_roster(&conn, course.id)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Bob"]);

        // Removing an absent pair stays silent.
        unenroll(&conn, alice.id, course.id).unwrap();
    }

    #[test]
    fn roster_is_ordered_by_student_name() {
        let conn = memory_store();
        let zoe = create_person(&conn, PersonKind::Student, "zoe", "", "", "").unwrap();
        let amy = create_person(&conn, PersonKind::Student, "Amy", "", "", "").unwrap();
        let course = create_course(&conn, "", "Intro", "", "").unwrap();
        enroll(&conn, zoe.id, course.id).unwrap();
        enroll(&conn, amy.id, course.id).unwrap();

        let names: Vec<_> = fetch_roster(&conn, course.id)
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        assert_eq!(names, vec!["Amy", "zoe"]);
    }

    #[test]
    fn deleting_a_course_cascades_its_enrollments() {
        let conn = memory_store();
        let alice = create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();
        let course = create_course(&conn, "CS101", "Intro", "", "").unwrap();
        assert!(enroll(&conn, alice.id, course.id).unwrap());
        assert_eq!(
            fetch_roster(&conn, course.id).unwrap()[0].name,
            "Alice".to_string()
        );
        assert!(!enroll(&conn, alice.id, course.id).unwrap());

        delete_course(&conn, course.id).unwrap();

        assert_eq!(enrollment_count(&conn), 0);
    }

    #[test]
    fn deleting_a_student_cascades_their_enrollments() {
        let conn = memory_store();
        let alice = create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();
        let course = create_course(&conn, "CS101", "Intro", "", "").unwrap();
        enroll(&conn, alice.id, course.id).unwrap();

        delete_person(&conn, alice.id).unwrap();

        assert_eq!(enrollment_count(&conn), 0);
        assert!(fetch_roster(&conn, course.id).unwrap().is_empty());
    }
}
