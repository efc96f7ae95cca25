use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::DbError;
use crate::models::{Kendaraan, NewKendaraan};

/// Acceso a la tabla `kendaraan`. Update y delete usan `no_pol` como clave.
#[async_trait]
pub trait KendaraanRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Kendaraan>, DbError>;

    async fn exists(&self, no_pol: &str) -> Result<bool, DbError>;

    /// Insertar y devolver el id generado
    async fn create(&self, kendaraan: &NewKendaraan) -> Result<i32, DbError>;

    async fn update(
        &self,
        no_pol: &str,
        nama_kendaraan: Option<&str>,
        id_transmisi: Option<i32>,
    ) -> Result<u64, DbError>;

    async fn delete(&self, no_pol: &str) -> Result<u64, DbError>;
}

pub struct PgKendaraanRepository {
    pool: PgPool,
}

impl PgKendaraanRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KendaraanRepository for PgKendaraanRepository {
    async fn find_all(&self) -> Result<Vec<Kendaraan>, DbError> {
        let rows = sqlx::query_as::<_, Kendaraan>(
            r#"
            SELECT id_kendaraan, no_pol, nama_kendaraan, id_transmisi, gambar_kendaraan
            FROM kendaraan
            ORDER BY id_kendaraan
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn exists(&self, no_pol: &str) -> Result<bool, DbError> {
        let (found,): (bool,) =
            sqlx::query_as("SELECT EXISTS (SELECT 1 FROM kendaraan WHERE no_pol = $1)")
                .bind(no_pol)
                .fetch_one(&self.pool)
                .await?;

        Ok(found)
    }

    async fn create(&self, kendaraan: &NewKendaraan) -> Result<i32, DbError> {
        let (id,): (i32,) = sqlx::query_as(
            r#"
            INSERT INTO kendaraan (no_pol, nama_kendaraan, id_transmisi, gambar_kendaraan)
            VALUES ($1, $2, $3, $4)
            RETURNING id_kendaraan
            "#,
        )
        .bind(&kendaraan.no_pol)
        .bind(&kendaraan.nama_kendaraan)
        .bind(kendaraan.id_transmisi)
        .bind(&kendaraan.gambar_kendaraan)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn update(
        &self,
        no_pol: &str,
        nama_kendaraan: Option<&str>,
        id_transmisi: Option<i32>,
    ) -> Result<u64, DbError> {
        let result = sqlx::query(
            "UPDATE kendaraan SET nama_kendaraan = $1, id_transmisi = $2 WHERE no_pol = $3",
        )
        .bind(nama_kendaraan)
        .bind(id_transmisi)
        .bind(no_pol)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, no_pol: &str) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM kendaraan WHERE no_pol = $1")
            .bind(no_pol)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
