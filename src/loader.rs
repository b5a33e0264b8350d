use crate::model::{Class, Score, Student};
use crate::store::SnapshotDelivery;
use anyhow::{anyhow, Context};
use rusqlite::types::Value;
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

/// Reads a JSON document shaped `{ "students": [...], "classes": [...], "scores": [...] }`.
/// Missing keys leave the matching set untouched when the delivery is applied.
pub fn read_json_file(path: &Path) -> anyhow::Result<SnapshotDelivery> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read {}", path.to_string_lossy()))?;
    let delivery: SnapshotDelivery = serde_json::from_slice(&bytes)
        .with_context(|| format!("invalid records file {}", path.to_string_lossy()))?;
    if delivery.is_empty() {
        return Err(anyhow!("no students, classes or scores in {}", path.to_string_lossy()));
    }
    Ok(delivery)
}

pub fn from_params(params: &serde_json::Value) -> anyhow::Result<SnapshotDelivery> {
    if !params.is_object() {
        return Err(anyhow!("params must be an object"));
    }
    let delivery: SnapshotDelivery = serde_json::from_value(params.clone())?;
    Ok(delivery)
}

/// Opens a SQLite file read-only and pulls whichever of the `students`,
/// `classes` and `scores` tables it has.
pub fn read_sqlite(path: &Path) -> anyhow::Result<SnapshotDelivery> {
    if !path.is_file() {
        return Err(anyhow!("database not found: {}", path.to_string_lossy()));
    }
    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )
    .with_context(|| format!("failed to open {}", path.to_string_lossy()))?;

    let students = if table_exists(&conn, "students")? {
        Some(load_students(&conn).context("students")?)
    } else {
        None
    };
    let classes = if table_exists(&conn, "classes")? {
        Some(load_classes(&conn).context("classes")?)
    } else {
        None
    };
    let scores = if table_exists(&conn, "scores")? {
        Some(load_scores(&conn).context("scores")?)
    } else {
        None
    };

    let delivery = SnapshotDelivery {
        students,
        classes,
        scores,
    };
    if delivery.is_empty() {
        return Err(anyhow!("no students, classes or scores table in {}", path.to_string_lossy()));
    }
    Ok(delivery)
}

fn table_exists(conn: &Connection, name: &str) -> anyhow::Result<bool> {
    let found: Option<i64> = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?",
            [name],
            |r| r.get(0),
        )
        .optional()?;
    Ok(found.is_some())
}

/// Id columns may be declared TEXT or INTEGER.
fn id_text(v: Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => s,
        Value::Blob(b) => String::from_utf8_lossy(&b).to_string(),
    }
}

fn load_students(conn: &Connection) -> anyhow::Result<Vec<Student>> {
    let mut stmt = conn.prepare(
        "SELECT id, first_name, last_name, birth_date
         FROM students
         ORDER BY rowid",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let id: Value = row.get(0)?;
            let first_name: Option<String> = row.get(1)?;
            let last_name: Option<String> = row.get(2)?;
            let birth_date: Option<String> = row.get(3)?;
            Ok(Student {
                id: id_text(id),
                first_name: first_name.unwrap_or_default(),
                last_name: last_name.unwrap_or_default(),
                date_of_birth: birth_date.unwrap_or_default(),
            })
        })
        .and_then(|it| it.collect::<Result<Vec<_>, _>>())?;
    Ok(rows)
}

fn load_classes(conn: &Connection) -> anyhow::Result<Vec<Class>> {
    let mut stmt = conn.prepare("SELECT id, name FROM classes ORDER BY rowid")?;
    let rows = stmt
        .query_map([], |row| {
            let id: Value = row.get(0)?;
            let name: Option<String> = row.get(1)?;
            Ok(Class {
                id: id_text(id),
                name: name.unwrap_or_default(),
            })
        })
        .and_then(|it| it.collect::<Result<Vec<_>, _>>())?;
    Ok(rows)
}

fn load_scores(conn: &Connection) -> anyhow::Result<Vec<Score>> {
    let mut stmt = conn.prepare(
        "SELECT id, student_id, class_id, value
         FROM scores
         ORDER BY rowid",
    )?;
    let rows = stmt
        .query_map([], |row| {
            let id: Value = row.get(0)?;
            let student_id: Value = row.get(1)?;
            let class_id: Value = row.get(2)?;
            let value: i64 = row.get(3)?;
            Ok(Score {
                id: id_text(id),
                student_id: id_text(student_id),
                class_id: id_text(class_id),
                value,
            })
        })
        .and_then(|it| it.collect::<Result<Vec<_>, _>>())?;
    Ok(rows)
}
