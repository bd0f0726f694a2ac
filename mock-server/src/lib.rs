use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use uuid::Uuid;

pub const LIST_PIPELINES_PATH: &str = "/apis/v1beta1/pipelines";

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pipeline {
    pub id: Uuid,
    pub name: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListPipelinesResponse {
    pub pipelines: Vec<Pipeline>,
    pub total_size: i32,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub next_page_token: String,
}

/// Read-only pipeline store shared by handlers.
pub type Db = Arc<Vec<Pipeline>>;

/// Pipelines the default app starts with, deliberately out of order.
pub fn seed() -> Vec<Pipeline> {
    [
        ("charlie", 300),
        ("alpha", 500),
        ("echo", 100),
        ("bravo", 400),
        ("delta", 200),
    ]
    .into_iter()
    .map(|(name, created_at)| Pipeline {
        id: Uuid::new_v4(),
        name: name.to_string(),
        created_at,
    })
    .collect()
}

pub fn app() -> Router {
    app_with(seed())
}

pub fn app_with(pipelines: Vec<Pipeline>) -> Router {
    let db: Db = Arc::new(pipelines);
    Router::new()
        .route(LIST_PIPELINES_PATH, get(list_pipelines))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

type ApiResult<T> = Result<T, (StatusCode, String)>;

fn bad_request(msg: impl Into<String>) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, msg.into())
}

async fn list_pipelines(
    State(db): State<Db>,
    Query(query): Query<HashMap<String, String>>,
) -> ApiResult<Json<ListPipelinesResponse>> {
    let page_size = match query.get("page_size") {
        None => DEFAULT_PAGE_SIZE,
        Some(raw) => match raw.parse::<i32>() {
            Ok(0) => DEFAULT_PAGE_SIZE,
            Ok(n) if n > 0 => n as usize,
            _ => return Err(bad_request(format!("invalid page_size `{raw}`"))),
        },
    };
    // Clients must omit an empty token rather than send it.
    let offset = match query.get("page_token") {
        None => 0,
        Some(raw) if raw.is_empty() => return Err(bad_request("empty page_token")),
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|_| bad_request(format!("invalid page_token `{raw}`")))?,
    };

    let mut pipelines: Vec<Pipeline> = db
        .iter()
        .filter(|p| query.get("filter").map_or(true, |f| p.name.contains(f.as_str())))
        .cloned()
        .collect();

    if let Some(sort_by) = query.get("sort_by") {
        sort_pipelines(&mut pipelines, sort_by)?;
    }

    tracing::debug!(?query, matched = pipelines.len(), "list pipelines");

    let total_size = pipelines.len();
    let page: Vec<Pipeline> = pipelines.into_iter().skip(offset).take(page_size).collect();
    let next = offset + page.len();
    let next_page_token = if next < total_size {
        next.to_string()
    } else {
        String::new()
    };

    Ok(Json(ListPipelinesResponse {
        pipelines: page,
        total_size: total_size as i32,
        next_page_token,
    }))
}

fn sort_pipelines(pipelines: &mut [Pipeline], sort_by: &str) -> ApiResult<()> {
    let mut parts = sort_by.split_whitespace();
    let field = parts.next().unwrap_or_default();
    let descending = match parts.next() {
        None | Some("asc") => false,
        Some("desc") => true,
        Some(other) => return Err(bad_request(format!("invalid sort order `{other}`"))),
    };
    if parts.next().is_some() {
        return Err(bad_request(format!("invalid sort_by `{sort_by}`")));
    }
    match field {
        "name" => pipelines.sort_by(|a, b| a.name.cmp(&b.name)),
        "created_at" => pipelines.sort_by_key(|p| p.created_at),
        other => return Err(bad_request(format!("cannot sort by `{other}`"))),
    }
    if descending {
        pipelines.reverse();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pipelines: &[Pipeline]) -> Vec<&str> {
        pipelines.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn pipeline_serializes_to_json() {
        let pipeline = Pipeline {
            id: Uuid::nil(),
            name: "Test".to_string(),
            created_at: 42,
        };
        let json = serde_json::to_value(&pipeline).unwrap();
        assert_eq!(json["id"], "00000000-0000-0000-0000-000000000000");
        assert_eq!(json["name"], "Test");
        assert_eq!(json["created_at"], 42);
    }

    #[test]
    fn empty_next_page_token_is_omitted() {
        let resp = ListPipelinesResponse {
            pipelines: Vec::new(),
            total_size: 0,
            next_page_token: String::new(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("next_page_token").is_none());
    }

    #[test]
    fn sort_by_name_ascending_by_default() {
        let mut pipelines = seed();
        sort_pipelines(&mut pipelines, "name").unwrap();
        assert_eq!(names(&pipelines), ["alpha", "bravo", "charlie", "delta", "echo"]);
    }

    #[test]
    fn sort_by_created_at_desc() {
        let mut pipelines = seed();
        sort_pipelines(&mut pipelines, "created_at desc").unwrap();
        assert_eq!(names(&pipelines), ["alpha", "bravo", "charlie", "delta", "echo"]);
    }

    #[test]
    fn sort_rejects_unknown_field_and_order() {
        let mut pipelines = seed();
        assert!(sort_pipelines(&mut pipelines, "owner").is_err());
        assert!(sort_pipelines(&mut pipelines, "name sideways").is_err());
        assert!(sort_pipelines(&mut pipelines, "name asc extra").is_err());
    }
}
