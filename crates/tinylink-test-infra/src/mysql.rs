//! A throwaway MySQL 8 server for the link store's integration tests.

use std::time::Duration;

use crate::{Result, TestInfraError};
use sqlx::mysql::{MySqlPool, MySqlPoolOptions};
use testcontainers::core::{IntoContainerPort, WaitFor};
use testcontainers::runners::AsyncRunner;
use testcontainers::ImageExt;
use testcontainers::{ContainerAsync, GenericImage};
use typed_builder::TypedBuilder;

const MYSQL_IMAGE: &str = "mysql";
const MYSQL_PORT: u16 = 3306;

#[derive(Debug, Clone, TypedBuilder)]
pub struct MysqlConfig {
    #[builder(default = "8.4".to_string(), setter(into))]
    image_tag: String,
    #[builder(default = "tinylink".to_string(), setter(into))]
    database: String,
    #[builder(default = "tinylink".to_string(), setter(into))]
    username: String,
    #[builder(default = "tinylink".to_string(), setter(into))]
    password: String,
    /// How many times `connect` retries while the server finishes booting.
    #[builder(default = 20)]
    connect_attempts: u32,
    #[builder(default = Duration::from_millis(500))]
    connect_backoff: Duration,
}

impl Default for MysqlConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A running MySQL container. Dropping it removes the container.
pub struct MySqlServer {
    container: ContainerAsync<GenericImage>,
    config: MysqlConfig,
}

impl MySqlServer {
    pub async fn start(config: MysqlConfig) -> Result<Self> {
        let container = GenericImage::new(MYSQL_IMAGE, config.image_tag.as_str())
            .with_exposed_port(MYSQL_PORT.tcp())
            .with_wait_for(WaitFor::message_on_stderr("ready for connections"))
            .with_env_var("MYSQL_DATABASE", config.database.as_str())
            .with_env_var("MYSQL_USER", config.username.as_str())
            .with_env_var("MYSQL_PASSWORD", config.password.as_str())
            .with_env_var("MYSQL_ROOT_PASSWORD", "root")
            .start()
            .await?;

        Ok(Self { container, config })
    }

    /// `mysql://` URL for the application user, as the gateway's
    /// `--database-url` flag expects it.
    pub async fn database_url(&self) -> Result<String> {
        let host = self.container.get_host().await?;
        let port = self.container.get_host_port_ipv4(MYSQL_PORT).await?;
        Ok(format!(
            "mysql://{}:{}@{}:{}/{}",
            self.config.username, self.config.password, host, port, self.config.database
        ))
    }

    /// Opens a pool, retrying while the server is still initialising.
    ///
    /// The image logs "ready for connections" once for its bootstrap server
    /// and again for the real one, so the first attempts may be refused.
    pub async fn connect(&self, max_connections: u32) -> Result<MySqlPool> {
        let url = self.database_url().await?;
        let attempts = self.config.connect_attempts.max(1);

        let mut attempt = 1;
        loop {
            match MySqlPoolOptions::new()
                .max_connections(max_connections)
                .connect(&url)
                .await
            {
                Ok(pool) => return Ok(pool),
                Err(source) if attempt >= attempts => {
                    return Err(TestInfraError::NotReady { attempts, source });
                }
                Err(_) => {
                    attempt += 1;
                    tokio::time::sleep(self.config.connect_backoff).await;
                }
            }
        }
    }
}
