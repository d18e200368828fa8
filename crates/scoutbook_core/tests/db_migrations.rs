use rusqlite::Connection;
use scoutbook_core::db::migrations::{apply_migrations, latest_version};
use scoutbook_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "profiles");
    assert_table_exists(&conn, "companies");
}

#[test]
fn profiles_table_carries_additive_columns() {
    let conn = open_db_in_memory().unwrap();
    let columns = table_columns(&conn, "profiles");

    for expected in [
        "id",
        "name",
        "headline",
        "url",
        "current_title",
        "location",
        "profile_pic",
        "about",
        "notes",
    ] {
        assert!(columns.contains(&expected.to_string()), "missing {expected}");
    }
}

#[test]
fn upgrading_from_first_version_keeps_existing_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("v1.db");

    let mut conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            headline TEXT NOT NULL,
            url TEXT NOT NULL UNIQUE,
            current_title TEXT NOT NULL,
            location TEXT NOT NULL,
            profile_pic TEXT
        );
        INSERT INTO profiles (name, headline, url, current_title, location)
        VALUES ('Jane Doe', 'PM', 'https://x/in/jane', 'PM', 'SF');
        PRAGMA user_version = 1;",
    )
    .unwrap();
    apply_migrations(&mut conn).unwrap();
    drop(conn);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let (name, notes): (String, Option<String>) = conn
        .query_row(
            "SELECT name, notes FROM profiles WHERE url = 'https://x/in/jane';",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(name, "Jane Doe");
    assert_eq!(notes, None);
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scoutbook.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "companies");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_columns(conn: &Connection, table_name: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table_name});"))
        .unwrap();
    let mut rows = stmt.query([]).unwrap();
    let mut columns = Vec::new();
    while let Some(row) = rows.next().unwrap() {
        columns.push(row.get::<_, String>(1).unwrap());
    }
    columns
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
