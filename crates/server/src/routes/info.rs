use axum::{extract::State, response::Html};
use chrono::{DateTime, Local, TimeZone};

use crate::errors::ApiError;
use crate::state::AppState;

/// GET /info: person count plus the server's current time.
pub async fn info(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let count = state.persons.count().await?;
    Ok(Html(render_info(count, &Local::now())))
}

pub fn render_info<Tz: TimeZone>(count: u64, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "<p>Phonebook has info for {count} people</p>\n<p>{}</p>",
        now.format("%a %b %d %Y %H:%M:%S GMT%z")
    )
}
