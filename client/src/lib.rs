//! Thin terminal front-end for the chat server.
//!
//! Connects, prints every chunk the server sends and forwards each
//! stdin line. All chat features (registration, commands, games) live
//! on the server; the client is deliberately dumb.

use log::debug;
use shared::BUFFER_SIZE;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

pub struct ChatClient {
    stream: TcpStream,
}

impl ChatClient {
    pub async fn connect(addr: &str) -> std::io::Result<Self> {
        let stream = TcpStream::connect(addr).await?;
        println!("Connected to {}", addr);
        Ok(Self { stream })
    }

    /// Pumps stdin lines to the server and server bytes to stdout until
    /// either side closes.
    pub async fn run(&mut self) -> std::io::Result<()> {
        let (mut read_half, mut write_half) = self.stream.split();
        let mut stdin = BufReader::new(tokio::io::stdin()).lines();
        let mut buffer = [0u8; BUFFER_SIZE];

        loop {
            tokio::select! {
                read = read_half.read(&mut buffer) => match read {
                    Ok(0) | Err(_) => {
                        println!("You were disconnected.");
                        break;
                    }
                    Ok(n) => {
                        let text = String::from_utf8_lossy(&buffer[..n]);
                        println!("{}", text.trim_end_matches('\n'));
                    }
                },
                line = stdin.next_line() => match line {
                    Ok(Some(line)) => {
                        let line = line.trim();
                        if !line.is_empty() {
                            write_half.write_all(format!("{}\n", line).as_bytes()).await?;
                        }
                    }
                    Ok(None) => {
                        debug!("stdin closed");
                        break;
                    }
                    Err(e) => return Err(e),
                },
            }
        }
        Ok(())
    }
}
