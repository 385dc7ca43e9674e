//! Server-Sent Events (SSE) for catalog changes

use crate::AppState;
use axum::{
    extract::State,
    response::sse::{Event, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;

/// GET /api/events - SSE event stream
///
/// Streams a ConnectionStatus event, then one event per session change
/// (load outcome, criteria, expansion, dropdown).
pub async fn event_stream(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    wcs_common::sse::create_catalog_sse_stream("wcs-ui", &state.events)
}
