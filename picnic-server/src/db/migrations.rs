//! Schema migrations for the picnic tables
//!
//! Every statement is idempotent so this runs on each startup.

use sqlx::SqlitePool;

/// Run all migrations
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    tracing::info!("Running picnic migrations...");

    // Teddy bears
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS teddy_bear (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE CHECK (length(name) <= 50),
            primary_color TEXT NOT NULL CHECK (length(primary_color) <= 20),
            accent_color TEXT CHECK (length(accent_color) <= 20),
            is_dressed BOOLEAN DEFAULT 1,
            owner_name TEXT NOT NULL CHECK (length(owner_name) <= 50),
            characteristic TEXT CHECK (length(characteristic) <= 50)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Locations
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS picnic_location (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            location_name TEXT NOT NULL UNIQUE CHECK (length(location_name) <= 50),
            capacity INTEGER NOT NULL DEFAULT 25,
            municipality TEXT NOT NULL CHECK (length(municipality) <= 50)
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Picnics; a picnic may exist without a location
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS picnic (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            picnic_name TEXT NOT NULL UNIQUE CHECK (length(picnic_name) <= 50),
            location_id INTEGER REFERENCES picnic_location(id) ON DELETE RESTRICT,
            start_time DATETIME NOT NULL,
            has_music BOOLEAN DEFAULT 1,
            has_food BOOLEAN DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Participation join table
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS picnic_participant (
            picnic_id INTEGER NOT NULL REFERENCES picnic(id) ON DELETE RESTRICT,
            teddy_bear_id INTEGER NOT NULL REFERENCES teddy_bear(id) ON DELETE RESTRICT,
            PRIMARY KEY (picnic_id, teddy_bear_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Picnic migrations complete");
    Ok(())
}

async fn create_indexes(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_picnic_location ON picnic(location_id)")
        .execute(pool)
        .await?;
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_picnic_participant_bear ON picnic_participant(teddy_bear_id)",
    )
    .execute(pool)
    .await?;

    Ok(())
}
