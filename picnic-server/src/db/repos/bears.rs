//! Teddy bear repository
//!
//! - insert: relies on the UNIQUE name constraint, no check-then-insert
//! - find_by_names: one `IN (...)` query for a whole participant list

use sqlx::{FromRow, QueryBuilder, Sqlite, SqlitePool};

use crate::models::{NewTeddyBear, TeddyBear};
use super::DbError;

/// Teddy bear record from database
#[derive(Debug, Clone, FromRow)]
pub(crate) struct TeddyBearRow {
    pub id: i64,
    pub name: String,
    pub primary_color: String,
    pub accent_color: Option<String>,
    pub is_dressed: Option<bool>,
    pub owner_name: String,
    pub characteristic: Option<String>,
}

impl From<TeddyBearRow> for TeddyBear {
    fn from(row: TeddyBearRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            primary_color: row.primary_color,
            accent_color: row.accent_color,
            // NULL means the column default was bypassed; the default is dressed
            is_dressed: row.is_dressed.unwrap_or(true),
            owner_name: row.owner_name,
            characteristic: row.characteristic,
        }
    }
}

/// Teddy bear repository
pub struct BearRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BearRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a bear. A taken name yields [`DbError::Conflict`].
    pub async fn insert(&self, bear: NewTeddyBear) -> Result<TeddyBear, DbError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO teddy_bear (name, primary_color, accent_color, is_dressed, owner_name, characteristic)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(bear.name.as_str())
        .bind(&bear.primary_color)
        .bind(bear.accent_color.as_deref())
        .bind(bear.is_dressed)
        .bind(&bear.owner_name)
        .bind(bear.characteristic.as_deref())
        .fetch_one(self.pool)
        .await
        .map_err(DbError::on_write("teddy bear", bear.name.as_str()))?;

        Ok(bear.into_bear(id))
    }

    /// Get a single bear by id.
    pub async fn get(&self, id: i64) -> Result<TeddyBear, DbError> {
        let row: TeddyBearRow = sqlx::query_as(
            r#"
            SELECT id, name, primary_color, accent_color, is_dressed, owner_name, characteristic
            FROM teddy_bear
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("teddy bear", id))?;

        Ok(row.into())
    }

    /// Find a bear by its exact name.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<TeddyBear>, DbError> {
        let row: Option<TeddyBearRow> = sqlx::query_as(
            r#"
            SELECT id, name, primary_color, accent_color, is_dressed, owner_name, characteristic
            FROM teddy_bear
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(TeddyBear::from))
    }

    /// Every bear whose name is in `names`, ordered by name.
    ///
    /// Names without a matching bear are simply absent from the result.
    pub async fn find_by_names(&self, names: &[String]) -> Result<Vec<TeddyBear>, DbError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = QueryBuilder::<Sqlite>::new(
            "SELECT id, name, primary_color, accent_color, is_dressed, owner_name, characteristic \
             FROM teddy_bear WHERE name IN (",
        );
        let mut separated = query.separated(", ");
        for name in names {
            separated.push_bind(name.as_str());
        }
        separated.push_unseparated(") ORDER BY name");

        let rows: Vec<TeddyBearRow> = query.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(TeddyBear::from).collect())
    }

    /// List all bears in insertion order.
    pub async fn list(&self) -> Result<Vec<TeddyBear>, DbError> {
        let rows: Vec<TeddyBearRow> = sqlx::query_as(
            r#"
            SELECT id, name, primary_color, accent_color, is_dressed, owner_name, characteristic
            FROM teddy_bear
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(TeddyBear::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::migrated_pool;
    use crate::models::BearName;

    fn new_bear(name: &str) -> NewTeddyBear {
        NewTeddyBear {
            name: BearName::new(name).unwrap(),
            primary_color: "brown".into(),
            accent_color: None,
            is_dressed: true,
            owner_name: "Christopher Robin".into(),
            characteristic: Some("fluffy".into()),
        }
    }

    #[tokio::test]
    async fn insert_then_find_by_name() {
        let pool = migrated_pool().await;
        let repo = BearRepo::new(&pool);

        let created = repo.insert(new_bear("Pooh")).await.unwrap();
        let found = repo.find_by_name("Pooh").await.unwrap();

        assert_eq!(found, Some(created.clone()));
        assert_eq!(repo.get(created.id).await.unwrap(), created);
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_name_is_conflict() {
        let pool = migrated_pool().await;
        let repo = BearRepo::new(&pool);

        repo.insert(new_bear("Pooh")).await.unwrap();
        let err = repo.insert(new_bear("Pooh")).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Conflict { resource: "teddy bear", ref key } if key == "Pooh"
        ));
        assert_eq!(repo.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn find_by_names_drops_unknown() {
        let pool = migrated_pool().await;
        let repo = BearRepo::new(&pool);
        repo.insert(new_bear("Tigger")).await.unwrap();
        repo.insert(new_bear("Alice")).await.unwrap();

        let names = vec!["Tigger".to_owned(), "Ghost".to_owned(), "Alice".to_owned()];
        let found: Vec<String> = repo
            .find_by_names(&names)
            .await
            .unwrap()
            .into_iter()
            .map(|b| b.name)
            .collect();

        assert_eq!(found, vec!["Alice", "Tigger"]);
        assert!(repo.find_by_names(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_id_is_not_found() {
        let pool = migrated_pool().await;
        let err = BearRepo::new(&pool).get(42).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { resource: "teddy bear", .. }));
    }

    #[tokio::test]
    async fn null_is_dressed_reads_as_dressed() {
        let pool = migrated_pool().await;
        sqlx::query(
            "INSERT INTO teddy_bear (name, primary_color, is_dressed, owner_name) VALUES ('Old', 'grey', NULL, 'Nan')",
        )
        .execute(&pool)
        .await
        .unwrap();

        let bear = BearRepo::new(&pool).find_by_name("Old").await.unwrap().unwrap();
        assert!(bear.is_dressed);
    }
}
