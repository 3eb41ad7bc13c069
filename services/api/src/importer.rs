//! Bulk import of episodes and characters from JSON arrays

use anyhow::Context;
use common::error::{DatabaseError, DatabaseResult};
use serde::{Deserialize, de::DeserializeOwned};
use sqlx::{PgConnection, PgPool, types::Json};
use std::{fs, path::Path};
use tracing::info;

/// Episode as found in the source data
///
/// Missing text fields import as `""` and a missing list as `[]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EpisodeRecord {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub air_date: Option<String>,
    pub episode: Option<String>,
    pub characters: Option<Vec<i32>>,
}

/// Character as found in the source data
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CharacterRecord {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub status: Option<String>,
    pub species: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub gender: Option<String>,
    pub episode: Option<Vec<i32>>,
}

/// Rows written by one import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub episodes: usize,
    pub characters: usize,
}

/// Read a JSON array of records from a file
pub fn read_records<T: DeserializeOwned>(path: &Path) -> anyhow::Result<Vec<T>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let records = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(records)
}

/// Insert every record in a single transaction
///
/// Records carrying an id are written first and the sequences are then moved
/// past the highest id, so records without an id draw fresh values that
/// cannot collide with imported ones.
pub async fn import(
    pool: &PgPool,
    episodes: &[EpisodeRecord],
    characters: &[CharacterRecord],
) -> DatabaseResult<ImportSummary> {
    let mut tx = pool.begin().await.map_err(DatabaseError::Query)?;

    for record in episodes.iter().filter(|r| r.id.is_some()) {
        insert_episode(&mut *tx, record).await?;
    }
    for record in characters.iter().filter(|r| r.id.is_some()) {
        insert_character(&mut *tx, record).await?;
    }

    sync_sequence(&mut *tx, "episodes").await?;
    sync_sequence(&mut *tx, "characters").await?;

    for record in episodes.iter().filter(|r| r.id.is_none()) {
        insert_episode(&mut *tx, record).await?;
    }
    for record in characters.iter().filter(|r| r.id.is_none()) {
        insert_character(&mut *tx, record).await?;
    }

    tx.commit().await.map_err(DatabaseError::Query)?;

    let summary = ImportSummary {
        episodes: episodes.len(),
        characters: characters.len(),
    };
    info!(
        "Imported {} episodes and {} characters",
        summary.episodes, summary.characters
    );
    Ok(summary)
}

async fn insert_episode(conn: &mut PgConnection, record: &EpisodeRecord) -> DatabaseResult<()> {
    sqlx::query(
        r#"
        INSERT INTO episodes (id, name, air_date, episode, characters)
        VALUES (COALESCE($1, nextval(pg_get_serial_sequence('episodes', 'id'))::int), $2, $3, $4, $5)
        "#,
    )
    .bind(record.id)
    .bind(record.name.clone().unwrap_or_default())
    .bind(record.air_date.clone().unwrap_or_default())
    .bind(record.episode.clone().unwrap_or_default())
    .bind(Json(record.characters.clone().unwrap_or_default()))
    .execute(&mut *conn)
    .await
    .map_err(DatabaseError::Query)?;

    Ok(())
}

async fn insert_character(
    conn: &mut PgConnection,
    record: &CharacterRecord,
) -> DatabaseResult<()> {
    sqlx::query(
        r#"
        INSERT INTO characters (id, name, status, species, "type", gender, episode)
        VALUES (COALESCE($1, nextval(pg_get_serial_sequence('characters', 'id'))::int), $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(record.id)
    .bind(record.name.clone().unwrap_or_default())
    .bind(record.status.clone().unwrap_or_default())
    .bind(record.species.clone().unwrap_or_default())
    .bind(record.kind.clone().unwrap_or_default())
    .bind(record.gender.clone().unwrap_or_default())
    .bind(Json(record.episode.clone().unwrap_or_default()))
    .execute(&mut *conn)
    .await
    .map_err(DatabaseError::Query)?;

    Ok(())
}

/// Point the table's id sequence at its current maximum id
async fn sync_sequence(conn: &mut PgConnection, table: &'static str) -> DatabaseResult<()> {
    let sql = format!(
        "SELECT setval(pg_get_serial_sequence('{table}', 'id'), \
         COALESCE((SELECT MAX(id) FROM {table}), 0) + 1, false)"
    );

    sqlx::query(&sql)
        .execute(&mut *conn)
        .await
        .map_err(DatabaseError::Query)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_deserialize_as_none() {
        let records: Vec<CharacterRecord> =
            serde_json::from_str(r#"[{"name": "Rick Sanchez", "type": ""}]"#).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, None);
        assert_eq!(records[0].kind.as_deref(), Some(""));
        assert!(records[0].episode.is_none());
    }

    #[test]
    fn read_records_reports_the_failing_file() {
        let err = read_records::<EpisodeRecord>(Path::new("/nonexistent/episodes.json"))
            .unwrap_err()
            .to_string();
        assert!(err.contains("/nonexistent/episodes.json"));
    }
}
