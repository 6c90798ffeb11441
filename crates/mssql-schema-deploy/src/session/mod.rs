//! Database session abstraction.
//!
//! The whole run executes on exactly one logical session, owned by the
//! orchestrator and threaded through every component. DDL statements in one
//! file depend on earlier ones being visible, so there is deliberately no
//! pooling and no parallelism here.

#[cfg(test)]
pub(crate) mod testing;

use crate::config::DeployConfig;
use crate::error::{DeployError, Result};
use async_trait::async_trait;
use tiberius::{AuthMethod, Client, Config, EncryptionLevel};
use tokio::net::TcpStream;
use tokio_util::compat::{Compat, TokioAsyncWriteCompatExt};
use tracing::{debug, info};

/// A single database session capable of running statements and catalog
/// queries. The catalog queries issued by this crate only produce string
/// columns, so rows are surfaced as `Vec<String>` and decoded into typed
/// structs by the caller.
#[async_trait]
pub trait SqlSession: Send {
    /// Execute a statement, discarding any result sets.
    async fn execute(&mut self, sql: &str) -> Result<()>;

    /// Run a query and return the rows of the first result set as strings.
    async fn query_rows(&mut self, sql: &str) -> Result<Vec<Vec<String>>>;
}

/// Tiberius-backed session over a plain TCP stream.
pub struct TiberiusSession {
    client: Client<Compat<TcpStream>>,
}

impl TiberiusSession {
    /// Establish a session using the deploy configuration.
    pub async fn connect(config: &DeployConfig) -> Result<Self> {
        let mut tib = Config::new();
        tib.host(&config.server);
        tib.port(config.port);
        tib.database(&config.database);
        tib.authentication(AuthMethod::sql_server(&config.user, &config.password));

        if config.encrypt {
            if config.trust_server_cert {
                tib.trust_cert();
            }
            tib.encryption(EncryptionLevel::Required);
        } else {
            tib.encryption(EncryptionLevel::NotSupported);
        }

        let tcp = TcpStream::connect(tib.get_addr())
            .await
            .map_err(|e| DeployError::Connection(e.to_string()))?;
        tcp.set_nodelay(true).ok();

        let client = Client::connect(tib, tcp.compat_write())
            .await
            .map_err(|e| DeployError::Connection(e.to_string()))?;

        info!(
            "Connected to MSSQL: {}:{}/{}",
            config.server, config.port, config.database
        );

        Ok(Self { client })
    }

    /// Release the session. Errors during close are logged, not surfaced.
    pub async fn close(self) {
        if let Err(e) = self.client.close().await {
            debug!("Error closing session: {}", e);
        } else {
            debug!("Database session closed");
        }
    }
}

#[async_trait]
impl SqlSession for TiberiusSession {
    async fn execute(&mut self, sql: &str) -> Result<()> {
        self.client
            .simple_query(sql)
            .await
            .map_err(DeployError::db)?
            .into_results()
            .await
            .map_err(DeployError::db)?;
        Ok(())
    }

    async fn query_rows(&mut self, sql: &str) -> Result<Vec<Vec<String>>> {
        let stream = self.client.simple_query(sql).await.map_err(DeployError::db)?;
        let rows = stream.into_first_result().await.map_err(DeployError::db)?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let width = row.columns().len();
            let mut values = Vec::with_capacity(width);
            for idx in 0..width {
                values.push(row.get::<&str, _>(idx).unwrap_or_default().to_string());
            }
            out.push(values);
        }
        Ok(out)
    }
}
