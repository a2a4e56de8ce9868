//! Shared helpers for integration tests: endpoints that time out or refuse
//! connections, and scripted mockito replies.

#![allow(dead_code)]

use std::net::SocketAddr;

use tokio::net::TcpListener;

/// An address that accepts connections and never answers.
pub async fn silent_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    addr
}

/// An address nobody listens on.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// What the order endpoint does with one request.
#[derive(Debug, Clone)]
pub enum Reply {
    /// Answer with this status and body.
    Respond(u16, String),
    /// Send the head, then drop the connection before the body completes.
    Hangup,
}

/// Registers one single-use mock per reply on `GET path`. mockito serves the
/// first matching mock that still expects hits, so replies play back in order.
/// Keep the returned mocks alive for the duration of the test.
pub async fn script(
    server: &mut mockito::ServerGuard,
    path: &str,
    replies: Vec<Reply>,
) -> Vec<mockito::Mock> {
    let mut mocks = Vec::with_capacity(replies.len());
    for reply in replies {
        let mock = server.mock("GET", path).expect(1);
        let mock = match reply {
            Reply::Respond(status, body) => mock
                .with_status(status as usize)
                .with_header("content-type", "application/json")
                .with_body(body),
            Reply::Hangup => mock.with_chunked_body(|_| {
                Err(std::io::Error::new(std::io::ErrorKind::ConnectionReset, "hung up"))
            }),
        };
        mocks.push(mock.create_async().await);
    }
    mocks
}

/// JSON for a single order with the given id.
pub fn order_json(id: i64, customer: &str, status: &str) -> String {
    format!(
        r#"{{"id":{id},"customerId":"{customer}","status":"{status}","totalAmount":{amount},"createdAt":"2024-05-01T09:00:00Z","updatedAt":"2024-05-01T09:05:00Z"}}"#,
        amount = id as f64 * 10.0
    )
}

pub fn orders_json(orders: &[String]) -> String {
    format!("[{}]", orders.join(","))
}
