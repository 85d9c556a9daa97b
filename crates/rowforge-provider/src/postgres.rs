use std::path::Path;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::debug;

use rowforge_core::{Describe, Error, Provider, Result};

use crate::config::ProviderConfig;

const DESCRIBE_QUERY: &str = r#"
select
  c.column_name::text as column_name,
  c.data_type::text as column_type,
  coalesce(c.character_maximum_length, c.numeric_precision, 0)::int as column_length,
  coalesce(c.numeric_scale, 0)::int as column_precision,
  (c.is_nullable = 'YES') as nullable
from information_schema.columns c
where c.table_name = $1
order by c.ordinal_position
"#;

/// Provider for PostgreSQL databases.
#[derive(Debug, Clone)]
pub struct PostgresProvider {
    config: ProviderConfig,
    pool: PgPool,
}

#[derive(sqlx::FromRow)]
struct RawDescribe {
    column_name: String,
    column_type: String,
    column_length: i32,
    column_precision: i32,
    nullable: bool,
}

impl PostgresProvider {
    /// Read the TOML config at `path` and connect.
    pub async fn new(path: &Path) -> Result<Self> {
        let config = ProviderConfig::read(path)?;
        Self::connect(config).await
    }

    /// Connect with an already-loaded config.
    pub async fn connect(config: ProviderConfig) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(4)
            .connect(&config.connection_url())
            .await
            .map_err(|err| Error::Db(err.to_string()))?;
        debug!(provider = %config.provider_name, "provider connected");
        Ok(Self { config, pool })
    }
}

#[async_trait::async_trait]
impl Provider for PostgresProvider {
    fn name(&self) -> &str {
        &self.config.provider_name
    }

    fn date_format(&self) -> &str {
        &self.config.formats.date_format
    }

    fn date_time_format(&self) -> &str {
        &self.config.formats.date_time_format
    }

    async fn describe(&self, table: &str) -> Result<Vec<Describe>> {
        let rows: Vec<RawDescribe> = sqlx::query_as(DESCRIBE_QUERY)
            .bind(table)
            .fetch_all(&self.pool)
            .await
            .map_err(|err| Error::Db(err.to_string()))?;

        if rows.is_empty() {
            return Err(Error::NoResult(table.to_string()));
        }

        Ok(rows
            .into_iter()
            .map(|row| Describe {
                column_name: row.column_name,
                column_type: row.column_type,
                column_length: row.column_length,
                column_precision: row.column_precision,
                nullable: row.nullable,
            })
            .collect())
    }
}
