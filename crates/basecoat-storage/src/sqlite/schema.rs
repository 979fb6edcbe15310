//! DDL statements for the SQLite schema.
//!
//! Timestamps are stored as TEXT in ISO 8601 format (SQLite has no native
//! datetime type). Colorant amounts are TEXT because they are recorded as
//! entered.

/// Current schema version. Bumped whenever the DDL changes.
pub const CURRENT_SCHEMA_VERSION: i32 = 1;

/// Core DDL statements executed during `init_schema`.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    // -- Formulas table ------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS formulas (
        id             INTEGER PRIMARY KEY AUTOINCREMENT,
        formula_name   TEXT NOT NULL,
        formula_number TEXT NOT NULL DEFAULT '',
        customer_name  TEXT NOT NULL DEFAULT '',
        summary        TEXT NOT NULL DEFAULT '',
        notes          TEXT NOT NULL DEFAULT '',
        created_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now')),
        updated_at     TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_formulas_customer ON formulas(customer_name)",
    "CREATE INDEX IF NOT EXISTS idx_formulas_number ON formulas(formula_number)",
    // -- Colorants table -----------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS colorants (
        id            INTEGER PRIMARY KEY AUTOINCREMENT,
        formula_id    INTEGER NOT NULL,
        colorant_name TEXT NOT NULL,
        amount        TEXT NOT NULL DEFAULT '',
        FOREIGN KEY (formula_id) REFERENCES formulas(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_colorants_formula ON colorants(formula_id)",
    // -- Bases table ---------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS bases (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        formula_id   INTEGER NOT NULL,
        base_name    TEXT NOT NULL,
        product_name TEXT NOT NULL DEFAULT '',
        FOREIGN KEY (formula_id) REFERENCES formulas(id) ON DELETE CASCADE
    )
    "#,
    "CREATE INDEX IF NOT EXISTS idx_bases_formula ON bases(formula_id)",
    // -- Config table --------------------------------------------------------
    r#"
    CREATE TABLE IF NOT EXISTS config (
        key   TEXT PRIMARY KEY,
        value TEXT NOT NULL
    )
    "#,
];
