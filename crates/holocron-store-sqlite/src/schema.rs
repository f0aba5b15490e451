//! SQL schema for the Holocron SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- AUTOINCREMENT keeps identifiers from ever being reused.
CREATE TABLE IF NOT EXISTS characters (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    height      TEXT NOT NULL,
    mass        TEXT NOT NULL,
    hair_color  TEXT NOT NULL,
    skin_color  TEXT NOT NULL,
    eye_color   TEXT NOT NULL,
    birth_year  TEXT NOT NULL,
    gender      TEXT NOT NULL,
    homeworld   TEXT NOT NULL,
    created     TEXT NOT NULL,
    edited      TEXT NOT NULL,
    url         TEXT NOT NULL
);

PRAGMA user_version = 1;
";

/// Column list shared by the INSERT and SELECT statements, in
/// [`Character`](holocron_core::character::Character) field order.
pub const COLUMNS: &str = "name, height, mass, hair_color, skin_color, eye_color, \
                           birth_year, gender, homeworld, created, edited, url";
