//! # rt-db-sqlite Implementation
//!
//! SQLite-backed `TripRepo` and `UserRepo`. A trip, activities included, is
//! one JSON document in the `trips` table; `guide` is duplicated into its own
//! indexed column so owner listings don't have to parse every row.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rt_core::models::{Trip, User};
use rt_core::traits::{TripRepo, UserRepo};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id BLOB PRIMARY KEY,
        email TEXT NOT NULL UNIQUE COLLATE NOCASE,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        role TEXT NOT NULL,
        token_digest TEXT NOT NULL UNIQUE,
        created_at TEXT NOT NULL,
        updated_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS trips (
        id BLOB PRIMARY KEY,
        guide BLOB NOT NULL,
        document TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS trips_guide_idx ON trips (guide, id)",
];

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `url` and applies the schema.
    pub async fn new(url: &str) -> anyhow::Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        // Every connection to `:memory:` is a separate database.
        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .with_context(|| format!("cannot open {url}"))?;

        for statement in SCHEMA {
            sqlx::query(statement).execute(&pool).await?;
        }
        log::info!("sqlite store ready at {url}");
        Ok(Self { pool })
    }
}

// Helper for UUID conversion
fn uuid_to_blob(id: Uuid) -> Vec<u8> {
    id.as_bytes().to_vec()
}

fn blob_to_uuid(blob: &[u8]) -> anyhow::Result<Uuid> {
    Ok(Uuid::from_slice(blob)?)
}

fn row_to_trip(row: &SqliteRow) -> anyhow::Result<Trip> {
    let document: String = row.try_get("document")?;
    serde_json::from_str(&document).context("corrupt trip document")
}

fn row_to_user(row: &SqliteRow) -> anyhow::Result<User> {
    Ok(User {
        id: blob_to_uuid(row.try_get::<Vec<u8>, _>("id")?.as_slice())?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        role: row.try_get("role")?,
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
        updated_at: row.try_get::<DateTime<Utc>, _>("updated_at")?,
    })
}

#[async_trait]
impl TripRepo for SqliteStore {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Trip>> {
        let row = sqlx::query("SELECT document FROM trips WHERE id = ?")
            .bind(uuid_to_blob(id))
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_trip).transpose()
    }

    async fn find_by_guide(&self, guide: Uuid) -> anyhow::Result<Vec<Trip>> {
        sqlx::query("SELECT document FROM trips WHERE guide = ? ORDER BY id ASC")
            .bind(uuid_to_blob(guide))
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_trip)
            .collect()
    }

    async fn list_all(&self) -> anyhow::Result<Vec<Trip>> {
        sqlx::query("SELECT document FROM trips ORDER BY id ASC")
            .fetch_all(&self.pool)
            .await?
            .iter()
            .map(row_to_trip)
            .collect()
    }

    async fn create(&self, mut trip: Trip) -> anyhow::Result<Trip> {
        let now = Utc::now();
        trip.created_at = now;
        trip.updated_at = now;

        sqlx::query("INSERT INTO trips (id, guide, document, created_at) VALUES (?, ?, ?, ?)")
            .bind(uuid_to_blob(trip.id))
            .bind(uuid_to_blob(trip.guide))
            .bind(serde_json::to_string(&trip)?)
            .bind(trip.created_at)
            .execute(&self.pool)
            .await?;
        Ok(trip)
    }

    /// Whole-document overwrite in a single statement, so concurrent saves
    /// queue on SQLite's write lock and the last one wins. `guide` and
    /// `created_at` columns keep their inserted values.
    async fn save(&self, mut trip: Trip) -> anyhow::Result<Trip> {
        trip.updated_at = Utc::now();

        let result = sqlx::query("UPDATE trips SET document = ? WHERE id = ?")
            .bind(serde_json::to_string(&trip)?)
            .bind(uuid_to_blob(trip.id))
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            anyhow::bail!("trip {} no longer exists", trip.id);
        }
        Ok(trip)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<()> {
        sqlx::query("DELETE FROM trips WHERE id = ?")
            .bind(uuid_to_blob(id))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[async_trait]
impl UserRepo for SqliteStore {
    async fn create(&self, user: User, token_digest: &str) -> anyhow::Result<User> {
        sqlx::query(
            "INSERT INTO users (id, email, first_name, last_name, role, token_digest, created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(uuid_to_blob(user.id))
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.role)
        .bind(token_digest)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .with_context(|| format!("cannot register {}", user.email))?;
        Ok(user)
    }

    async fn find_by_token_digest(&self, digest: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query("SELECT * FROM users WHERE token_digest = ?")
            .bind(digest)
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_user).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rt_core::models::{Activity, Category};
    use std::sync::Arc;

    fn trip(guide: Uuid) -> Trip {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d).unwrap();
        Trip {
            id: Uuid::now_v7(),
            title: "Andes Trek".into(),
            description: "High passes".into(),
            image: None,
            start_date: day(1),
            end_date: day(6),
            recommendation: Some("Bring layers".into()),
            city: Some("Cusco".into()),
            guide,
            activities: vec![Activity {
                id: Uuid::now_v7(),
                title: "Hike".into(),
                category: Category::Adventure,
                description: "...".into(),
                image: "hike.jpg".into(),
                price: 0.0,
                start_date: day(1),
                end_date: day(2),
                address: None,
            }],
            included_in_trip: vec!["Guide".into()],
            what_to_bring: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_create_and_find_trip() {
        let repo = SqliteStore::new("sqlite::memory:").await.unwrap();
        let guide = Uuid::now_v7();

        let created = TripRepo::create(&repo, trip(guide)).await.unwrap();
        let found = repo.find_by_id(created.id).await.unwrap();

        assert_eq!(found, Some(created));
        assert!(repo.find_by_id(Uuid::now_v7()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_overwrites_document() {
        let repo = SqliteStore::new("sqlite::memory:").await.unwrap();
        let created = TripRepo::create(&repo, trip(Uuid::now_v7())).await.unwrap();

        let mut changed = created.clone();
        changed.activities.clear();
        changed.title = "Patagonia".into();
        let saved = repo.save(changed).await.unwrap();

        assert_eq!(saved.created_at, created.created_at);
        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found.title, "Patagonia");
        assert!(found.activities.is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_save_fails() {
        let repo = SqliteStore::new("sqlite::memory:").await.unwrap();
        let created = TripRepo::create(&repo, trip(Uuid::now_v7())).await.unwrap();

        repo.delete(created.id).await.unwrap();

        assert!(repo.find_by_id(created.id).await.unwrap().is_none());
        assert!(repo.save(created).await.is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_saves_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite:{}", dir.path().join("trips.db").display());
        let repo = Arc::new(SqliteStore::new(&url).await.unwrap());
        let created = TripRepo::create(repo.as_ref(), trip(Uuid::now_v7())).await.unwrap();

        let writers: Vec<_> = (0..200)
            .map(|n| {
                let repo = repo.clone();
                let mut changed = created.clone();
                changed.title = format!("Andes Trek #{n}");
                tokio::spawn(async move { repo.save(changed).await })
            })
            .collect();

        let mut titles = Vec::new();
        for writer in writers {
            titles.push(writer.await.unwrap().unwrap().title);
        }

        let found = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert!(titles.contains(&found.title));
        assert_eq!(found.created_at, created.created_at);
    }

    #[tokio::test]
    async fn test_find_by_guide() {
        let repo = SqliteStore::new("sqlite::memory:").await.unwrap();
        let alice = Uuid::now_v7();
        TripRepo::create(&repo, trip(alice)).await.unwrap();
        TripRepo::create(&repo, trip(Uuid::now_v7())).await.unwrap();
        TripRepo::create(&repo, trip(alice)).await.unwrap();

        let owned = repo.find_by_guide(alice).await.unwrap();
        assert_eq!(owned.len(), 2);
        assert!(owned.iter().all(|t| t.guide == alice));
        assert_eq!(repo.list_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_users_by_token_digest_and_unique_email() {
        let repo = SqliteStore::new("sqlite::memory:").await.unwrap();
        let user = User::new("ana@example.com", "Ana", "Quispe");

        let created = UserRepo::create(&repo, user.clone(), "digest-1").await.unwrap();
        assert_eq!(
            repo.find_by_token_digest("digest-1").await.unwrap().map(|u| u.id),
            Some(created.id)
        );
        assert!(repo.find_by_token_digest("other").await.unwrap().is_none());

        let duplicate = User::new("ANA@example.com", "Ana", "Other");
        assert!(UserRepo::create(&repo, duplicate, "digest-2").await.is_err());
    }
}
