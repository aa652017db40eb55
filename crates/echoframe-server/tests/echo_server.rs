//! End-to-end tests against a running echo server on loopback.

use std::net::SocketAddr;
use std::time::Duration;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;

use echoframe_core::Message;
use echoframe_protocol::{ProtocolError, receive_message, send_message};
use echoframe_server::{EchoServer, ServerConfig};

async fn spawn_server(config: ServerConfig) -> SocketAddr {
    let server = EchoServer::bind(config).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = server.run().await;
    });
    addr
}

fn loopback() -> ServerConfig {
    ServerConfig::new(([127, 0, 0, 1], 0))
}

async fn echo_once(addr: SocketAddr, msg: &Message) -> Message {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    send_message(&mut stream, msg).await.unwrap();
    receive_message(&mut stream).await.unwrap()
}

#[tokio::test]
async fn echo_fidelity() {
    let addr = spawn_server(loopback()).await;

    let echoed = echo_once(addr, &Message::new("I'm here", 404)).await;
    assert_eq!(echoed.string_field, "I'm here");
    assert_eq!(echoed.int_field, 404);
}

#[tokio::test]
async fn many_messages_on_one_connection() {
    let addr = spawn_server(loopback()).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();

    for i in -5..5 {
        let msg = Message::new(format!("n={}", i), i);
        send_message(&mut stream, &msg).await.unwrap();
        assert_eq!(receive_message(&mut stream).await.unwrap(), msg);
    }
}

#[tokio::test]
async fn frame_written_byte_by_byte() {
    let addr = spawn_server(loopback()).await;
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.set_nodelay(true).unwrap();

    let msg = Message::new("dribbled", 7);
    let bytes = echoframe_protocol::encode_message(&msg).unwrap();
    for byte in bytes {
        stream.write_all(&[byte]).await.unwrap();
        stream.flush().await.unwrap();
    }

    assert_eq!(receive_message(&mut stream).await.unwrap(), msg);
}

#[tokio::test]
async fn concurrent_sessions_are_isolated() {
    let addr = spawn_server(loopback()).await;

    let mut a = TcpStream::connect(addr).await.unwrap();
    let mut b = TcpStream::connect(addr).await.unwrap();

    let msg_a = Message::new("from a", 1);
    let msg_b = Message::new("from b", 2);

    send_message(&mut a, &msg_a).await.unwrap();
    send_message(&mut b, &msg_b).await.unwrap();

    assert_eq!(receive_message(&mut b).await.unwrap(), msg_b);
    assert_eq!(receive_message(&mut a).await.unwrap(), msg_a);
}

#[tokio::test]
async fn many_parallel_clients_get_their_own_echo() {
    let addr = spawn_server(loopback()).await;

    let tasks: Vec<_> = (0..16)
        .map(|i| {
            tokio::spawn(async move {
                let msg = Message::new(format!("client {}", i), i);
                let echoed = echo_once(addr, &msg).await;
                assert_eq!(echoed, msg);
            })
        })
        .collect();

    for task in tasks {
        task.await.unwrap();
    }
}

#[tokio::test]
async fn stalled_client_does_not_block_accept() {
    let addr = spawn_server(loopback()).await;

    // Half a header, then nothing.
    let mut stalled = TcpStream::connect(addr).await.unwrap();
    stalled.write_all(&[0, 0]).await.unwrap();

    let echoed = tokio::time::timeout(
        Duration::from_secs(5),
        echo_once(addr, &Message::new("still served", 3)),
    )
    .await
    .expect("second client should not wait on the stalled one");
    assert_eq!(echoed.int_field, 3);
}

#[tokio::test]
async fn malformed_body_closes_only_that_connection() {
    let addr = spawn_server(loopback()).await;

    let mut healthy = TcpStream::connect(addr).await.unwrap();
    let mut broken = TcpStream::connect(addr).await.unwrap();

    let body = b"<MyMessage><IntProperty>404</IntProperty></MyMessage>";
    broken
        .write_all(&(body.len() as u32).to_be_bytes())
        .await
        .unwrap();
    broken.write_all(body).await.unwrap();

    let reply = receive_message(&mut broken).await;
    assert!(matches!(reply, Err(ProtocolError::ConnectionClosed)));

    let msg = Message::new("unaffected", 5);
    send_message(&mut healthy, &msg).await.unwrap();
    assert_eq!(receive_message(&mut healthy).await.unwrap(), msg);

    let fresh = echo_once(addr, &Message::new("new client", 6)).await;
    assert_eq!(fresh.string_field, "new client");
}

#[tokio::test]
async fn idle_timeout_closes_silent_connection() {
    let addr = spawn_server(loopback().with_idle_timeout(Duration::from_millis(200))).await;

    let mut silent = TcpStream::connect(addr).await.unwrap();
    let result = tokio::time::timeout(Duration::from_secs(5), receive_message(&mut silent))
        .await
        .expect("server should drop the idle connection");
    assert!(matches!(result, Err(ProtocolError::ConnectionClosed)));
}
