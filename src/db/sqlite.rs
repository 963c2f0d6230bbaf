use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use std::{str::FromStr, time::Duration};
use tracing::{debug, info};

use crate::db::dao::MoleculeDao;
use crate::db::models::DbMolecule;
use crate::db::schema::SQLITE_INIT;
use crate::error::ChemdexError;

/// Opens the pool and applies the schema.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<SqlitePool, ChemdexError> {
    let connect_opts = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5))
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal);

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(connect_opts)
        .await?;

    apply_schema(&pool).await?;

    info!(max_connections, "database pool initialized");
    Ok(pool)
}

async fn apply_schema(pool: &SqlitePool) -> Result<(), ChemdexError> {
    for stmt in SQLITE_INIT.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s).execute(pool).await?;
    }
    Ok(())
}

#[derive(Clone)]
pub struct SqliteMoleculeDao {
    pool: SqlitePool,
}

impl SqliteMoleculeDao {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MoleculeDao for SqliteMoleculeDao {
    async fn find_all(&self) -> Result<Vec<DbMolecule>, ChemdexError> {
        let rows = sqlx::query_as::<_, DbMolecule>(
            r#"
        SELECT id, smile
        FROM molecules
        ORDER BY id
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<DbMolecule>, ChemdexError> {
        let row = sqlx::query_as::<_, DbMolecule>(
            r#"
        SELECT id, smile
        FROM molecules
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_substructure(
        &self,
        fragment: &str,
    ) -> Result<Vec<DbMolecule>, ChemdexError> {
        // instr() is byte-wise and case-sensitive; LIKE would treat % and _ as wildcards.
        let rows = sqlx::query_as::<_, DbMolecule>(
            r#"
        SELECT id, smile
        FROM molecules
        WHERE instr(smile, ?) > 0
        ORDER BY id
        "#,
        )
        .bind(fragment)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, smile: &str) -> Result<i64, ChemdexError> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO molecules (smile)
        VALUES (?)
        RETURNING id
        "#,
        )
        .bind(smile)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        debug!(id, smile, "molecule created");
        Ok(id)
    }

    async fn update(&self, id: i64, smile: &str) -> Result<Option<DbMolecule>, ChemdexError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query_as::<_, DbMolecule>(
            r#"
        UPDATE molecules
        SET smile = ?
        WHERE id = ?
        RETURNING id, smile
        "#,
        )
        .bind(smile)
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        // An absent id touched nothing; dropping the transaction rolls it back.
        let Some(row) = row else {
            debug!(id, "update skipped: molecule not found");
            return Ok(None);
        };

        tx.commit().await?;

        debug!(molecule = %row, "molecule updated");
        Ok(Some(row))
    }

    async fn delete(&self, id: i64) -> Result<Option<i64>, ChemdexError> {
        let mut tx = self.pool.begin().await?;

        let deleted: Option<i64> = sqlx::query_scalar(
            r#"
        DELETE FROM molecules
        WHERE id = ?
        RETURNING id
        "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        if deleted.is_some() {
            tx.commit().await?;
        }

        debug!(id, deleted = deleted.is_some(), "molecule delete processed");
        Ok(deleted)
    }
}
