//! Send command: one message out, one echo back.

use echoframe_core::Message;

use crate::config::ClientConfig;
use crate::error::ClientResult;
use crate::socket::EchoClient;

/// Sends a message built from the arguments and prints both sides.
pub async fn run(config: &ClientConfig, text: String, number: i32) -> ClientResult<()> {
    let client = EchoClient::new(config.server.address, config.server.timeout());
    let message = Message::new(text, number);

    println!("Sending");
    println!("  {}", message);

    let echoed = client.echo(&message).await?;

    println!("Received");
    println!("  {}", echoed);

    Ok(())
}
