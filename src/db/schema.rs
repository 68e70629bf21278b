//! Database schema and migrations for Chirpy.
//!
//! Migrations are applied in order; `schema_version` records which ones ran.
//! IDs are UUIDs stored as 16-byte blobs, timestamps as RFC 3339 text.

/// Database migrations.
pub const MIGRATIONS: &[&str] = &[
    // v1: users
    r#"
CREATE TABLE users (
    id              BLOB PRIMARY KEY,
    email           TEXT NOT NULL UNIQUE COLLATE NOCASE,
    hashed_password TEXT NOT NULL,           -- Argon2id PHC string
    created_at      TEXT NOT NULL,
    updated_at      TEXT NOT NULL
);
"#,
    // v2: chirps
    r#"
CREATE TABLE chirps (
    id          BLOB PRIMARY KEY,
    body        TEXT NOT NULL,
    user_id     BLOB NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE INDEX idx_chirps_user_id ON chirps(user_id);
CREATE INDEX idx_chirps_created_at ON chirps(created_at);
"#,
];
