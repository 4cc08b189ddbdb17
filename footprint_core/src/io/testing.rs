//! A throwaway HTTP server for tests, bound to a random localhost port.
//!
//! Every path listed at start-up answers with its canned status and body; all
//! other paths answer `404`. Requests are recorded (path and query) so tests can
//! assert what a client asked for.

use anyhow::Result;
use axum::{
	Router,
	extract::State,
	http::{StatusCode, Uri},
};
use parking_lot::Mutex;
use std::{collections::HashMap, net::SocketAddr, sync::Arc};
use tokio::{net::TcpListener, task::JoinHandle};

struct ServerState {
	routes: HashMap<String, (u16, String)>,
	requests: Mutex<Vec<String>>,
}

pub struct TestServer {
	addr: SocketAddr,
	state: Arc<ServerState>,
	handle: JoinHandle<()>,
}

impl TestServer {
	/// Starts serving `(path, status, body)` responses.
	pub async fn start(routes: Vec<(&str, u16, &str)>) -> Result<TestServer> {
		let state = Arc::new(ServerState {
			routes: routes
				.into_iter()
				.map(|(path, status, body)| (path.to_string(), (status, body.to_string())))
				.collect(),
			requests: Mutex::new(Vec::new()),
		});

		let router = Router::new().fallback(respond).with_state(state.clone());
		let listener = TcpListener::bind("127.0.0.1:0").await?;
		let addr = listener.local_addr()?;

		let handle = tokio::spawn(async move {
			if let Err(err) = axum::serve(listener, router).await {
				log::error!("test server exited with error: {err}");
			}
		});

		Ok(TestServer { addr, state, handle })
	}

	/// Base URL without trailing slash, e.g. `http://127.0.0.1:41234`.
	pub fn base_url(&self) -> String {
		format!("http://{}", self.addr)
	}

	pub fn url(&self, path: &str) -> String {
		format!("{}{path}", self.base_url())
	}

	/// Paths (with query) requested so far, in arrival order.
	pub fn requests(&self) -> Vec<String> {
		self.state.requests.lock().clone()
	}
}

impl Drop for TestServer {
	fn drop(&mut self) {
		self.handle.abort();
	}
}

async fn respond(State(state): State<Arc<ServerState>>, uri: Uri) -> (StatusCode, String) {
	state
		.requests
		.lock()
		.push(uri.path_and_query().map_or_else(|| uri.path().to_string(), ToString::to_string));

	match state.routes.get(uri.path()) {
		Some((status, body)) => (
			StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
			body.clone(),
		),
		None => (StatusCode::NOT_FOUND, String::from("not found")),
	}
}
