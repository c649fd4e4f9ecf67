use anyhow::{Context, Result};
use rusqlite::{params, Connection, Row};

use crate::models::{Person, PersonKind};

fn person_from_row(row: &Row<'_>) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        kind: row.get(1)?,
        name: row.get(2)?,
        email: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        phone: row.get::<_, Option<String>>(4)?.unwrap_or_default(),
        notes: row.get::<_, Option<String>>(5)?.unwrap_or_default(),
    })
}

/// Insert a new person row, returning the hydrated struct so the caller can
/// push it straight into the in-memory list. Blank-name validation belongs to
/// the form layer; this function stores whatever it is given.
pub fn create_person(
    conn: &Connection,
    kind: PersonKind,
    name: &str,
    email: &str,
    phone: &str,
    notes: &str,
) -> Result<Person> {
    conn.execute(
        "INSERT INTO person (kind, name, email, phone, notes) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![kind, name, email, phone, notes],
    )
    .context("failed to insert person")?;

    let id = conn.last_insert_rowid();
    Ok(Person {
        id,
        kind,
        name: name.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        notes: notes.to_string(),
    })
}

/// Overwrite the mutable fields of an existing person. The kind never
/// changes after creation. An unknown id affects zero rows and is not an
/// error; callers only issue updates for rows they just selected.
pub fn update_person(
    conn: &Connection,
    id: i64,
    name: &str,
    email: &str,
    phone: &str,
    notes: &str,
) -> Result<()> {
    conn.execute(
        "UPDATE person SET name = ?1, email = ?2, phone = ?3, notes = ?4 WHERE id = ?5",
        params![name, email, phone, notes, id],
    )
    .context("failed to update person")?;
    Ok(())
}

/// Remove a person row. Enrollments cascade and any course that pointed at
/// this person as a teacher has its assignment cleared. An unknown id is a
/// no-op.
pub fn delete_person(conn: &Connection, id: i64) -> Result<()> {
    conn.execute("DELETE FROM person WHERE id = ?1", params![id])
        .context("failed to delete person")?;
    Ok(())
}

/// Retrieve people, optionally restricted to one kind. The filtered form
/// sorts by name; the unfiltered form groups students and teachers together
/// before sorting by name. These queries double as the single source of
/// truth for how the lists are ordered in the UI.
pub fn fetch_people(conn: &Connection, kind: Option<PersonKind>) -> Result<Vec<Person>> {
    let mut stmt = match kind {
        Some(_) => conn.prepare(
            "SELECT id, kind, name, email, phone, notes FROM person
             WHERE kind = ?1
             ORDER BY name COLLATE NOCASE",
        ),
        None => conn.prepare(
            "SELECT id, kind, name, email, phone, notes FROM person
             ORDER BY kind, name COLLATE NOCASE",
        ),
    }
    .context("failed to prepare person query")?;

    let rows = match kind {
        Some(kind) => stmt.query_map(params![kind], person_from_row),
        None => stmt.query_map([], person_from_row),
    }
    .context("failed to load people")?;

    rows.collect::<Result<Vec<_>, _>>()
        .context("failed to collect people")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize;

    fn memory_store() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn).unwrap();
        conn
    }

    #[test]
    fn created_person_appears_exactly_once_in_kind_listing() {
        let conn = memory_store();
        let alice = create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();

        let students = fetch_people(&conn, Some(PersonKind::Student)).unwrap();
        let matches: Vec<_> = students.iter().filter(|p| p.id == alice.id).collect();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Alice");

        let teachers = fetch_people(&conn, Some(PersonKind::Teacher)).unwrap();
        assert!(teachers.is_empty());
    }

    #[test]
    fn kind_listing_sorts_by_name() {
        let conn = memory_store();
        create_person(&conn, PersonKind::Student, "zoe", "", "", "").unwrap();
        create_person(&conn, PersonKind::Student, "Bob", "", "", "").unwrap();

        let names: Vec<_> = fetch_people(&conn, Some(PersonKind::Student))
            .unwrap()
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Bob", "zoe"]);
    }

    #[test]
    fn unfiltered_listing_groups_by_kind_then_name() {
        let conn = memory_store();
        create_person(&conn, PersonKind::Teacher, "Ada", "", "", "").unwrap();
        create_person(&conn, PersonKind::Student, "Carl", "", "", "").unwrap();
        create_person(&conn, PersonKind::Student, "Beth", "", "", "").unwrap();

        let people = fetch_people(&conn, None).unwrap();
        let summary: Vec<_> = people.iter().map(|p| (p.kind, p.name.as_str())).collect();
        assert_eq!(
            summary,
            vec![
                (PersonKind::Student, "Beth"),
                (PersonKind::Student, "Carl"),
                (PersonKind::Teacher, "Ada"),
            ]
        );
    }

    #[test]
    fn update_overwrites_all_mutable_fields() {
        let conn = memory_store();
        let row = create_person(&conn, PersonKind::Teacher, "Ada", "old@x", "1", "old").unwrap();

        update_person(&conn, row.id, "Ada Lovelace", "ada@x", "2", "notes").unwrap();

        let people = fetch_people(&conn, Some(PersonKind::Teacher)).unwrap();
        assert_eq!(people[0].name, "Ada Lovelace");
        assert_eq!(people[0].email, "ada@x");
        assert_eq!(people[0].phone, "2");
        assert_eq!(people[0].notes, "notes");
    }

    #[test]
    fn update_of_unknown_id_is_a_silent_noop() {
        let conn = memory_store();
        update_person(&conn, 999, "Ghost", "", "", "").unwrap();
        assert!(fetch_people(&conn, None).unwrap().is_empty());
    }

    #[test]
    fn deleted_person_disappears_from_every_listing() {
        let conn = memory_store();
        let alice = create_person(&conn, PersonKind::Student, "Alice", "", "", "").unwrap();

        delete_person(&conn, alice.id).unwrap();

        assert!(fetch_people(&conn, None).unwrap().is_empty());
        assert!(fetch_people(&conn, Some(PersonKind::Student))
            .unwrap()
            .is_empty());
        // A second delete of the same id is equally silent.
        delete_person(&conn, alice.id).unwrap();
    }
}
