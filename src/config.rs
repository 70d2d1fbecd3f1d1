use std::net::SocketAddr;

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about = "JSON API serving articles, comments, topics and users")]
pub struct Config {
    /// Postgres connection string
    #[clap(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Address to bind to
    #[clap(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[clap(long, env = "PORT", default_value_t = 9090)]
    pub port: u16,

    /// Upper bound on pooled database connections
    #[clap(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Do not run the schema bootstrap on startup
    #[clap(long, env = "SKIP_SCHEMA", default_value_t = false)]
    pub skip_schema: bool,
}

impl Config {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}
