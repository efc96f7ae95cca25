use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::DbError;
use crate::models::Transmisi;

/// Acceso a la tabla `transmisi`
#[async_trait]
pub trait TransmisiRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Transmisi>, DbError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Transmisi>, DbError>;

    async fn create(&self, nama_transmisi: &str) -> Result<Transmisi, DbError>;

    /// Devuelve el número de filas afectadas
    async fn update(&self, id: i32, nama_transmisi: &str) -> Result<u64, DbError>;

    /// Devuelve el número de filas afectadas
    async fn delete(&self, id: i32) -> Result<u64, DbError>;
}

pub struct PgTransmisiRepository {
    pool: PgPool,
}

impl PgTransmisiRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TransmisiRepository for PgTransmisiRepository {
    async fn find_all(&self) -> Result<Vec<Transmisi>, DbError> {
        let rows = sqlx::query_as::<_, Transmisi>(
            "SELECT id_transmisi, nama_transmisi FROM transmisi ORDER BY id_transmisi",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Transmisi>, DbError> {
        let row = sqlx::query_as::<_, Transmisi>(
            "SELECT id_transmisi, nama_transmisi FROM transmisi WHERE id_transmisi = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, nama_transmisi: &str) -> Result<Transmisi, DbError> {
        let row = sqlx::query_as::<_, Transmisi>(
            r#"
            INSERT INTO transmisi (nama_transmisi)
            VALUES ($1)
            RETURNING id_transmisi, nama_transmisi
            "#,
        )
        .bind(nama_transmisi)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update(&self, id: i32, nama_transmisi: &str) -> Result<u64, DbError> {
        let result = sqlx::query("UPDATE transmisi SET nama_transmisi = $1 WHERE id_transmisi = $2")
            .bind(nama_transmisi)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM transmisi WHERE id_transmisi = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
