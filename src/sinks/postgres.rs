use crate::config::{DatabaseConfig, TableMode};
use crate::error::PersistError;
use crate::results::{Dataset, ListingRecord};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, QueryBuilder};

/// Rows per INSERT statement; keeps bind parameters well under the protocol limit
const INSERT_CHUNK: usize = 1000;

/// Writes datasets into PostgreSQL tables
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    mode: TableMode,
}

impl PostgresStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, PersistError> {
        ::log::info!("Connecting to database...");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;
        ::log::info!("Database connected");

        Ok(Self::with_pool(pool, config.if_exists))
    }

    pub fn with_pool(pool: PgPool, mode: TableMode) -> Self {
        Self { pool, mode }
    }

    /// Creates `table_name` if needed (dropping it first in replace mode) and
    /// inserts every record in dataset order. Returns the number of rows written.
    pub async fn write_table_to_db(
        &self,
        dataset: &Dataset,
        table_name: &str,
    ) -> Result<u64, PersistError> {
        if dataset.is_empty() {
            return Err(PersistError::EmptyDataset);
        }
        if table_name.trim().is_empty() {
            return Err(PersistError::EmptyTableName);
        }

        let table = quote_identifier(table_name);
        let mut tx = self.pool.begin().await?;

        if self.mode == TableMode::Replace {
            sqlx::query(&format!("DROP TABLE IF EXISTS {}", table))
                .execute(&mut *tx)
                .await?;
        }
        sqlx::query(&create_table_sql(&table))
            .execute(&mut *tx)
            .await?;

        let offset = match self.mode {
            TableMode::Replace => 0,
            TableMode::Append => {
                sqlx::query_scalar::<_, i64>(&format!(
                    "SELECT COALESCE(MAX(position) + 1, 0) FROM {}",
                    table
                ))
                .fetch_one(&mut *tx)
                .await?
            }
        };

        let mut inserted = 0;
        let records = dataset.records();
        for (chunk_index, chunk) in records.chunks(INSERT_CHUNK).enumerate() {
            let first_position = offset + (chunk_index * INSERT_CHUNK) as i64;
            inserted += insert_chunk(&mut tx, &table, first_position, chunk).await?;
        }

        tx.commit().await?;

        ::log::info!("Table {} written with {} rows", table, inserted);
        Ok(inserted)
    }
}

async fn insert_chunk(
    tx: &mut sqlx::Transaction<'_, Postgres>,
    table: &str,
    first_position: i64,
    records: &[ListingRecord],
) -> Result<u64, PersistError> {
    let mut builder: QueryBuilder<Postgres> = QueryBuilder::new(insert_prefix_sql(table));
    builder.push_values(records.iter().enumerate(), |mut row, (i, record)| {
        row.push_bind(first_position + i as i64)
            .push_bind(record.link.clone())
            .push_bind(record.title.clone())
            .push_bind(record.description.clone())
            .push_bind(record.price.clone())
            .push_bind(record.location.clone());
    });

    let result = builder.build().execute(&mut **tx).await?;
    Ok(result.rows_affected())
}

/// Double-quotes an identifier, doubling embedded quotes, so date-stamped
/// names such as `bazos_prodam_byt_07-03-2026` are usable as table names
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.trim().replace('"', "\"\""))
}

/// `table` must already be quoted
pub fn create_table_sql(table: &str) -> String {
    format!(
        "CREATE TABLE IF NOT EXISTS {} (\
         position BIGINT NOT NULL, \
         link TEXT, \
         title TEXT, \
         description TEXT, \
         price TEXT, \
         location TEXT)",
        table
    )
}

fn insert_prefix_sql(table: &str) -> String {
    format!(
        "INSERT INTO {} (position, {}) ",
        table,
        ListingRecord::COLUMNS.join(", ")
    )
}
