// viewsmith-core/src/infrastructure/adapters/duckdb.rs

use async_trait::async_trait;
use duckdb::{Config, Connection};
use std::sync::{Mutex, MutexGuard};

use crate::domain::graph::DependencyEdge;
use crate::error::ViewsmithError;
use crate::infrastructure::error::InfrastructureError;
use crate::ports::connector::{Connector, dependency_query, edges_from_rows};

struct DuckDBSession {
    conn: Connection,
    in_transaction: bool,
}

/// Single DuckDB session. Transactions are opened lazily by `execute`.
pub struct DuckDBConnector {
    session: Mutex<Option<DuckDBSession>>,
}

impl DuckDBConnector {
    pub fn new(db_path: &str) -> Result<Self, InfrastructureError> {
        let config = Config::default();

        let conn = if db_path == ":memory:" {
            Connection::open_in_memory_with_flags(config)?
        } else {
            Connection::open_with_flags(db_path, config)?
        };

        Ok(Self {
            session: Mutex::new(Some(DuckDBSession {
                conn,
                in_transaction: false,
            })),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<DuckDBSession>>, ViewsmithError> {
        self.session.lock().map_err(|_| {
            ViewsmithError::Infrastructure(InfrastructureError::Io(std::io::Error::other(
                "DuckDB Mutex Poisoned",
            )))
        })
    }

    fn with_session<T>(
        &self,
        f: impl FnOnce(&mut DuckDBSession) -> Result<T, ViewsmithError>,
    ) -> Result<T, ViewsmithError> {
        let mut guard = self.lock()?;
        let session = guard.as_mut().ok_or(ViewsmithError::SessionClosed)?;
        f(session)
    }
}

#[async_trait]
impl Connector for DuckDBConnector {
    async fn execute(&self, sql: &str) -> Result<(), ViewsmithError> {
        self.with_session(|session| {
            if !session.in_transaction {
                session.conn.execute_batch("BEGIN TRANSACTION")?;
                session.in_transaction = true;
            }
            session.conn.execute_batch(sql)?;
            Ok(())
        })
    }

    async fn commit(&self) -> Result<(), ViewsmithError> {
        self.with_session(|session| {
            if session.in_transaction {
                session.conn.execute_batch("COMMIT")?;
                session.in_transaction = false;
            }
            Ok(())
        })
    }

    async fn rollback(&self) -> Result<(), ViewsmithError> {
        self.with_session(|session| {
            if session.in_transaction {
                session.in_transaction = false;
                session.conn.execute_batch("ROLLBACK")?;
            }
            Ok(())
        })
    }

    async fn fetch_dependencies(
        &self,
        metadata_table: &str,
    ) -> Result<Vec<DependencyEdge>, ViewsmithError> {
        self.with_session(|session| {
            let mut stmt = session.conn.prepare(&dependency_query(metadata_table))?;
            let rows = stmt.query_map([], |row| {
                Ok((
                    row.get::<_, Option<String>>(0)?,
                    row.get::<_, Option<String>>(1)?,
                ))
            })?;
            let rows = rows.collect::<Result<Vec<_>, _>>()?;
            Ok(edges_from_rows(rows))
        })
    }

    async fn close(&self) -> Result<(), ViewsmithError> {
        let mut guard = self.lock()?;
        if let Some(session) = guard.take() {
            session.conn.close().map_err(|(_conn, e)| ViewsmithError::from(e))?;
        }
        Ok(())
    }

    fn engine_name(&self) -> &str {
        "duckdb"
    }
}
