#![allow(dead_code)]

use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// In-process HTTP endpoint standing in for a policy-protected pod.
pub struct TargetServer {
    addr: SocketAddr,
    task: JoinHandle<()>,
}

impl TargetServer {
    /// Answers `GET /` with `status`.
    pub async fn start(status: StatusCode) -> std::io::Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
        let addr = listener.local_addr()?;
        let app = Router::new().route("/", get(move || async move { (status, "netpol-target") }));

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self { addr, task })
    }

    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    pub fn address(&self) -> String {
        self.addr.ip().to_string()
    }
}

impl Drop for TargetServer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// A localhost port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).unwrap();
    listener.local_addr().unwrap().port()
}

pub async fn start_server_or_skip(test_name: &str, status: StatusCode) -> Option<TargetServer> {
    match TargetServer::start(status).await {
        Ok(server) => Some(server),
        Err(err) => {
            eprintln!("Skipping {test_name}: unable to start target server: {err}");
            None
        }
    }
}
