use clap::Parser;
use log::error;
use server::server::{ChatServer, ServerConfig};

/// Command line arguments for the chat server binary.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind the listening socket to
    #[arg(short = 'H', long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = shared::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let addr = format!("{}:{}", args.host, args.port);
    let mut server = match ChatServer::bind(&addr, ServerConfig::default()).await {
        Ok(server) => server,
        Err(e) => {
            error!("Bind failed. Error: {}", e);
            return Err(e);
        }
    };

    server.run().await
}
