use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{de::DeserializeOwned, Deserialize};

use service::person::{NewPerson, Person, PersonId, PersonPatch};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub name: Option<String>,
}

/// GET /api/persons[?name=..]. An empty `name` means no filter.
pub async fn list_persons(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Person>>, ApiError> {
    let filter = query.name.as_deref().filter(|n| !n.is_empty());
    Ok(Json(state.persons.list(filter).await?))
}

/// GET /api/persons/:id
pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    let id: PersonId = id.parse()?;
    Ok(Json(state.persons.get(id).await?))
}

/// Parse an optional JSON body. Empty or whitespace-only bodies are `None`
/// whatever the content type says.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> Result<Option<T>, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    Json::<T>::from_bytes(body)
        .map(|Json(v)| Some(v))
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// POST /api/persons
pub async fn create_person(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Person>, ApiError> {
    let input: NewPerson =
        parse_body(&body)?.ok_or_else(|| ApiError::bad_request("no content specified"))?;
    Ok(Json(state.persons.create(input).await?))
}

/// PUT /api/persons/:id. Unknown id answers 200 with `[]`.
pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id: PersonId = id.parse()?;
    // 没有请求体时不修改任何字段
    let patch: PersonPatch = parse_body(&body)?.unwrap_or_default();
    let resp = match state.persons.update(id, patch).await? {
        Some(person) => Json(person).into_response(),
        None => Json(serde_json::json!([])).into_response(),
    };
    Ok(resp)
}

/// DELETE /api/persons/:id. Always 204 for a well-formed id.
pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id: PersonId = id.parse()?;
    state.persons.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
