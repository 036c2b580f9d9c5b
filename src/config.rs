//! Command-line and environment configuration.

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, env = "BLOG_API_ADDR", default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Log filter, e.g. `info` or `blog_api=debug`
    #[arg(short, long, env = "BLOG_API_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// The tracing filter for `log_level`, falling back to `info` when the
    /// directive does not parse.
    pub fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_new(&self.log_level).unwrap_or_else(|_| EnvFilter::new("info"))
    }
}
