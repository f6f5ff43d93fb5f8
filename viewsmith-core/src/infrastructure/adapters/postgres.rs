// viewsmith-core/src/infrastructure/adapters/postgres.rs

use async_trait::async_trait;
use sqlx::Connection as _;
use sqlx::{Executor, Row};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::domain::graph::DependencyEdge;
use crate::error::ViewsmithError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{Connector, dependency_query, edges_from_rows};

/// Credentials for a single PostgreSQL session.
#[derive(Clone)]
pub struct PostgresSettings {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: Option<String>,
    pub database: String,
}

// Keep the password out of logs
impl std::fmt::Debug for PostgresSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("database", &self.database)
            .finish()
    }
}

impl PostgresSettings {
    fn connect_options(&self) -> PgConnectOptions {
        let options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);

        match &self.password {
            Some(password) => options.password(password),
            None => options,
        }
    }
}

struct PgSession {
    conn: PgConnection,
    in_transaction: bool,
}

/// One connection, used exclusively for the whole run. Like a DB-API cursor,
/// the first statement after a commit/rollback implicitly opens a transaction.
pub struct PostgresConnector {
    session: Mutex<Option<PgSession>>,
}

impl PostgresConnector {
    #[instrument(skip_all, fields(host = %settings.host, port = settings.port, database = %settings.database))]
    pub async fn connect(settings: &PostgresSettings) -> Result<Self, InfrastructureError> {
        let conn = PgConnection::connect_with(&settings.connect_options()).await?;
        debug!("PostgreSQL session opened");

        Ok(Self {
            session: Mutex::new(Some(PgSession {
                conn,
                in_transaction: false,
            })),
        })
    }
}

#[async_trait]
impl Connector for PostgresConnector {
    async fn execute(&self, sql: &str) -> Result<(), ViewsmithError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(ViewsmithError::SessionClosed)?;

        if !session.in_transaction {
            Executor::execute(&mut session.conn, sqlx::raw_sql("BEGIN")).await?;
            session.in_transaction = true;
        }
        // raw_sql: view scripts may hold several statements
        Executor::execute(&mut session.conn, sqlx::raw_sql(sql)).await?;
        Ok(())
    }

    async fn commit(&self) -> Result<(), ViewsmithError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(ViewsmithError::SessionClosed)?;

        if session.in_transaction {
            Executor::execute(&mut session.conn, sqlx::raw_sql("COMMIT")).await?;
            session.in_transaction = false;
        }
        Ok(())
    }

    async fn rollback(&self) -> Result<(), ViewsmithError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(ViewsmithError::SessionClosed)?;

        if session.in_transaction {
            session.in_transaction = false;
            Executor::execute(&mut session.conn, sqlx::raw_sql("ROLLBACK")).await?;
        }
        Ok(())
    }

    async fn fetch_dependencies(
        &self,
        metadata_table: &str,
    ) -> Result<Vec<DependencyEdge>, ViewsmithError> {
        let mut guard = self.session.lock().await;
        let session = guard.as_mut().ok_or(ViewsmithError::SessionClosed)?;

        let query = dependency_query(metadata_table);
        let rows = Executor::fetch_all(&mut session.conn, sqlx::raw_sql(&query)).await?;
        let rows = rows
            .iter()
            .map(|row| Ok((row.try_get(0)?, row.try_get(1)?)))
            .collect::<Result<Vec<(Option<String>, Option<String>)>, sqlx::Error>>()?;

        Ok(edges_from_rows(rows))
    }

    async fn close(&self) -> Result<(), ViewsmithError> {
        let mut guard = self.session.lock().await;
        if let Some(session) = guard.take() {
            session.conn.close().await?;
            debug!("PostgreSQL session closed");
        }
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "postgres"
    }
}
