//! Key/value persistence layer for the NACTAX site.
//!
//! The site keeps all of its durable state in a flat, string-keyed store:
//! captured contact-form inquiries and the support chat configuration. This
//! crate provides:
//!
//! - [`KeyValueStore`] - the raw store interface, backed by SQLite
//!   ([`Database`]) or memory ([`MemoryStore`])
//! - [`StoreKey`] - typed keys with their wire names and encodings
//! - [`Persistence`] - the handle components receive, with typed access,
//!   inquiry list operations and change notifications
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use database::{Database, NewInquiry, Persistence};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:nactax.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     let persistence = Persistence::new(Arc::new(db));
//!     persistence
//!         .append_inquiry(NewInquiry {
//!             name: "Ann".to_string(),
//!             email: "ann@example.com".to_string(),
//!             message: "Do you file state returns?".to_string(),
//!         })
//!         .await?;
//!
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod keys;
pub mod kv;
pub mod memory;
pub mod models;
pub mod persistence;

pub use error::{DatabaseError, Result};
pub use keys::{ChatEnabled, ChatPrompt, Inquiries, StoreKey};
pub use kv::KeyValueStore;
pub use memory::MemoryStore;
pub use models::{ChatSettings, Inquiry, NewInquiry, DEFAULT_SYSTEM_PROMPT};
pub use persistence::{Persistence, StoreEvent, StoreEventKind};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 5;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// // File database
    /// let db = database::Database::connect("sqlite:data/nactax.db?mode=rwc").await?;
    ///
    /// // In-memory database (for testing)
    /// let db = database::Database::connect("sqlite::memory:").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        // An in-memory database exists per connection, so keep exactly one.
        let pool_size = if url.contains(":memory:") { 1 } else { pool_size };

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!("Connected to database: {} (pool size: {})", url, pool_size);

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
