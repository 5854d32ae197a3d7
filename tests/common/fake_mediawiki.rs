//! Fake MediaWiki Action API for integration tests.
//!
//! Binds an `axum` server to a random port on 127.0.0.1 and answers
//! `GET /w/api.php` for the four request shapes the searcher sends:
//! category listings, plain-text extracts, title search and section parse.
//! Category listings are paged; page `n` is returned for the continuation
//! token `page{n}`.

use axum::{
    Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

#[derive(Default)]
struct WikiState {
    category_pages: Vec<Vec<String>>,
    extracts: HashMap<String, String>,
    search_results: Vec<String>,
    sections: HashMap<String, String>,
    requests: usize,
}

/// Handle to the running fake server.
pub struct FakeMediaWiki {
    addr: SocketAddr,
    state: Arc<Mutex<WikiState>>,
}

impl FakeMediaWiki {
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(WikiState::default()));

        let app = Router::new()
            .route("/w/api.php", get(api))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Full endpoint URL, e.g. `http://127.0.0.1:PORT/w/api.php`.
    pub fn endpoint(&self) -> String {
        format!("http://{}/w/api.php", self.addr)
    }

    /// Appends one page of category members.
    pub async fn add_category_page(&self, titles: &[&str]) {
        let mut state = self.state.lock().await;
        state
            .category_pages
            .push(titles.iter().map(|t| t.to_string()).collect());
    }

    pub async fn set_extract(&self, title: &str, extract: &str) {
        let mut state = self.state.lock().await;
        state.extracts.insert(title.to_string(), extract.to_string());
    }

    pub async fn set_search_results(&self, titles: &[&str]) {
        let mut state = self.state.lock().await;
        state.search_results = titles.iter().map(|t| t.to_string()).collect();
    }

    pub async fn set_section(&self, page: &str, html: &str) {
        let mut state = self.state.lock().await;
        state.sections.insert(page.to_string(), html.to_string());
    }

    /// Number of requests served so far.
    pub async fn requests(&self) -> usize {
        self.state.lock().await.requests
    }
}

async fn api(
    Query(params): Query<HashMap<String, String>>,
    State(state): State<Arc<Mutex<WikiState>>>,
) -> impl IntoResponse {
    let mut state = state.lock().await;
    state.requests += 1;
    let param = |name: &str| params.get(name).map(String::as_str).unwrap_or("");

    let body: Value = match (param("action"), param("list"), param("prop")) {
        ("parse", _, _) => match state.sections.get(param("page")) {
            Some(html) => json!({ "parse": { "title": param("page"), "text": { "*": html } } }),
            None => json!({ "error": { "code": "missingtitle" } }),
        },
        ("query", "categorymembers", _) => {
            let index = param("cmcontinue")
                .strip_prefix("page")
                .and_then(|n| n.parse::<usize>().ok())
                .unwrap_or(0);
            let members: Vec<Value> = state
                .category_pages
                .get(index)
                .map(|titles| titles.iter().map(|t| json!({ "ns": 0, "title": t })).collect())
                .unwrap_or_default();
            let mut body = json!({ "query": { "categorymembers": members } });
            if index + 1 < state.category_pages.len() {
                body["continue"] = json!({ "cmcontinue": format!("page{}", index + 1) });
            }
            body
        }
        ("query", "search", _) => {
            let hits: Vec<Value> = state
                .search_results
                .iter()
                .map(|t| json!({ "ns": 0, "title": t }))
                .collect();
            json!({ "query": { "search": hits } })
        }
        ("query", _, "extracts") => {
            let title = param("titles");
            let page = match state.extracts.get(title) {
                Some(text) => json!({ "title": title, "extract": text }),
                None => json!({ "title": title, "missing": "" }),
            };
            json!({ "query": { "pages": { "1": page } } })
        }
        _ => return (StatusCode::BAD_REQUEST, axum::Json(json!({}))),
    };

    (StatusCode::OK, axum::Json(body))
}
