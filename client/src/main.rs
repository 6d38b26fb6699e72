use clap::Parser;
use client::ChatClient;

/// Command line arguments for the terminal chat client.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Server host to connect to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Server port to connect to
    #[arg(short, long, default_value_t = shared::DEFAULT_PORT)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let addr = format!("{}:{}", args.host, args.port);
    let mut client = ChatClient::connect(&addr).await?;
    client.run().await?;
    Ok(())
}
