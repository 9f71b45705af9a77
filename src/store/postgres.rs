use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{info, warn};

use super::{Store, StoreError};
use crate::domain::Product;

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS productos (
    id BIGSERIAL PRIMARY KEY,
    nombre VARCHAR(250) NOT NULL,
    precio NUMERIC(6, 2) NOT NULL,
    stock INTEGER NOT NULL
)";

const SELECT_COLUMNS: &str = "SELECT id, nombre, precio, stock FROM productos";

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    nombre: String,
    precio: Decimal,
    stock: i32,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product::new(row.id, row.nombre, row.precio, row.stock)
    }
}

/// The `productos` table in PostgreSQL.
///
/// Ids come from the table's `BIGSERIAL` sequence, so an id handed out by
/// [`Store::next_id`] is never issued again even if the insert does not happen.
pub struct SqlStore {
    pool: PgPool,
}

impl SqlStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a pool on `database_url` and creates the table when missing.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .inspect_err(|e| warn!("Failed to connect to database: {}", e))?;

        let store = Self::new(pool);
        store.migrate().await?;
        info!("Database connection pool created successfully");
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TABLE).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl Store<Product> for SqlStore {
    async fn next_id(&mut self) -> Result<i64, StoreError> {
        let id = sqlx::query_scalar::<_, i64>("SELECT nextval(pg_get_serial_sequence('productos', 'id'))")
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    async fn insert(&mut self, item: Product) -> Result<(), StoreError> {
        sqlx::query("INSERT INTO productos (id, nombre, precio, stock) VALUES ($1, $2, $3, $4)")
            .bind(item.id)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.stock)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.as_database_error().is_some_and(|db| db.is_unique_violation()) {
                    StoreError::Duplicate(item.id.to_string())
                } else {
                    StoreError::Database(e)
                }
            })?;
        Ok(())
    }

    async fn get(&self, id: &i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!("{SELECT_COLUMNS} ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn update(&mut self, item: Product) -> Result<(), StoreError> {
        let result = sqlx::query("UPDATE productos SET nombre = $2, precio = $3, stock = $4 WHERE id = $1")
            .bind(item.id)
            .bind(&item.name)
            .bind(item.price)
            .bind(item.stock)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::Missing(item.id.to_string()));
        }
        Ok(())
    }

    async fn remove(&mut self, id: &i64) -> Result<Option<Product>, StoreError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "DELETE FROM productos WHERE id = $1 RETURNING id, nombre, precio, stock",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Into::into))
    }
}
