use serde_json::json;

use crate::config::StoreConfig;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::store::{HttpStore, MemStore};

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "backend": state.backend,
        }),
    )
}

/// Wire the remote store. `http` is the hosted backend (params override the
/// environment); `memory` is the in-process backend the integration tests
/// run against.
fn handle_store_connect(state: &mut AppState, req: &Request) -> serde_json::Value {
    let backend = req
        .params
        .get("backend")
        .and_then(|v| v.as_str())
        .unwrap_or("http");

    match backend {
        "memory" => {
            state.store = Some(Box::new(MemStore::new()));
            state.backend = Some("memory".to_string());
            ok(&req.id, json!({ "backend": "memory" }))
        }
        "http" => {
            let url = req
                .params
                .get("url")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let key = req
                .params
                .get("key")
                .and_then(|v| v.as_str())
                .map(str::to_string);
            let config = match (url, key) {
                (Some(url), Some(api_key)) => StoreConfig { url, api_key },
                _ => match StoreConfig::from_env() {
                    Ok(c) => c,
                    Err(e) => return err(&req.id, "bad_params", e.to_string(), None),
                },
            };

            let store = HttpStore::new(&config);
            let base_url = store.base_url().to_string();
            state.store = Some(Box::new(store));
            state.backend = Some("http".to_string());
            ok(&req.id, json!({ "backend": "http", "url": base_url }))
        }
        other => err(
            &req.id,
            "bad_params",
            format!("unknown backend: {other}"),
            None,
        ),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "store.connect" => Some(handle_store_connect(state, req)),
        _ => None,
    }
}
