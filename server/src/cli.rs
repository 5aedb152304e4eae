use std::net::SocketAddr;

use clap::Parser;

/// Server CLI.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "poker-server",
    version,
    about = "Multi-room No-Limit Hold'em server with LLM-driven seats"
)]
pub struct ServerCli {
    /// Address to listen on
    #[arg(long, default_value = "0.0.0.0:8000")]
    pub addr: SocketAddr,

    /// Enable verbose debug logging
    #[arg(long, short, default_value_t = false)]
    pub debug: bool,
}
