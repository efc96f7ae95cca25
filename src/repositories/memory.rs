//! Repositorios en memoria
//!
//! Implementan los mismos traits que los de PostgreSQL para levantar el router
//! completo sin base de datos (tests y desarrollo local). `set_unavailable`
//! simula una caída del servidor de base de datos.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::DbError;
use crate::models::{Kendaraan, NewKendaraan, Transmisi};

use super::kendaraan_repository::KendaraanRepository;
use super::transmisi_repository::TransmisiRepository;

struct Table<T> {
    rows: Vec<T>,
    next_id: i32,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn allocate_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

#[derive(Default)]
pub struct InMemoryTransmisiRepository {
    table: RwLock<Table<Transmisi>>,
    unavailable: AtomicBool,
}

impl InMemoryTransmisiRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    fn check(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl TransmisiRepository for InMemoryTransmisiRepository {
    async fn find_all(&self) -> Result<Vec<Transmisi>, DbError> {
        self.check()?;
        Ok(self.table.read().await.rows.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Transmisi>, DbError> {
        self.check()?;
        let table = self.table.read().await;
        Ok(table.rows.iter().find(|t| t.id_transmisi == id).cloned())
    }

    async fn create(&self, nama_transmisi: &str) -> Result<Transmisi, DbError> {
        self.check()?;
        let mut table = self.table.write().await;
        let row = Transmisi {
            id_transmisi: table.allocate_id(),
            nama_transmisi: nama_transmisi.to_string(),
        };
        table.rows.push(row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, nama_transmisi: &str) -> Result<u64, DbError> {
        self.check()?;
        let mut table = self.table.write().await;
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|t| t.id_transmisi == id) {
            row.nama_transmisi = nama_transmisi.to_string();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, id: i32) -> Result<u64, DbError> {
        self.check()?;
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|t| t.id_transmisi != id);
        Ok((before - table.rows.len()) as u64)
    }
}

#[derive(Default)]
pub struct InMemoryKendaraanRepository {
    table: RwLock<Table<Kendaraan>>,
    unavailable: AtomicBool,
}

impl InMemoryKendaraanRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn find_by_no_pol(&self, no_pol: &str) -> Option<Kendaraan> {
        let table = self.table.read().await;
        table.rows.iter().find(|k| k.no_pol == no_pol).cloned()
    }

    fn check(&self) -> Result<(), DbError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DbError::Unavailable("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KendaraanRepository for InMemoryKendaraanRepository {
    async fn find_all(&self) -> Result<Vec<Kendaraan>, DbError> {
        self.check()?;
        Ok(self.table.read().await.rows.clone())
    }

    async fn exists(&self, no_pol: &str) -> Result<bool, DbError> {
        self.check()?;
        let table = self.table.read().await;
        Ok(table.rows.iter().any(|k| k.no_pol == no_pol))
    }

    async fn create(&self, kendaraan: &NewKendaraan) -> Result<i32, DbError> {
        self.check()?;
        let mut table = self.table.write().await;
        let id = table.allocate_id();
        table.rows.push(kendaraan.clone().into_kendaraan(id));
        Ok(id)
    }

    async fn update(
        &self,
        no_pol: &str,
        nama_kendaraan: Option<&str>,
        id_transmisi: Option<i32>,
    ) -> Result<u64, DbError> {
        self.check()?;
        let mut table = self.table.write().await;
        let mut affected = 0;
        for row in table.rows.iter_mut().filter(|k| k.no_pol == no_pol) {
            // Columnas NOT NULL: como en PostgreSQL, solo falla si alguna fila coincide
            let (Some(nama), Some(id_transmisi)) = (nama_kendaraan, id_transmisi) else {
                return Err(DbError::InvalidInput(
                    "nama_kendaraan and id_transmisi cannot be null".to_string(),
                ));
            };
            row.nama_kendaraan = nama.to_string();
            row.id_transmisi = id_transmisi;
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, no_pol: &str) -> Result<u64, DbError> {
        self.check()?;
        let mut table = self.table.write().await;
        let before = table.rows.len();
        table.rows.retain(|k| k.no_pol != no_pol);
        Ok((before - table.rows.len()) as u64)
    }
}
