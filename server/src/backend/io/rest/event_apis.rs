//! # REST API for Change Notifications
//!
//! The live-subscription surface: an SSE stream that emits one event per
//! store mutation affecting the caller. Events carry no payload - clients
//! re-fetch the collection named in the event and treat the fresh snapshot
//! as the new ground truth.

use axum::{
    extract::State,
    response::sse::{Event, KeepAlive, Sse},
};
use futures::stream::Stream;
use std::convert::Infallible;
use tokio::sync::broadcast;
use tracing::info;

use super::UserId;
use crate::backend::storage::traits::Connection;
use crate::backend::AppState;

/// Stream store-change events for the caller
pub async fn stream_events(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    info!("GET /api/events - subscriber: {}", user_id);

    let receiver = state.connection.subscribe();
    let stream = futures::stream::unfold((receiver, user_id), |(mut receiver, user_id)| async move {
        loop {
            match receiver.recv().await {
                Ok(event) if event.user_id == user_id => {
                    let sse_event = Event::default().event(event.collection).data("changed");
                    return Some((Ok(sse_event), (receiver, user_id)));
                }
                // Another user's change - not ours to report
                Ok(_) => continue,
                // Dropped behind the buffer; clients resync on the next event
                Err(broadcast::error::RecvError::Lagged(_)) => continue,
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
