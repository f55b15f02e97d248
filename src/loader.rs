//! Runs screen requests off the UI loop
//!
//! Each request becomes one tokio task. Its result is sent back over an
//! unbounded channel as an `AppEvent`; the app decides whether the screen
//! that asked is still there to receive it.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::api::TmdbClient;
use crate::app::{AppEvent, Request};

#[derive(Debug, Clone)]
pub struct Loader {
    client: Arc<TmdbClient>,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl Loader {
    pub fn new(client: Arc<TmdbClient>, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self { client, events }
    }

    /// Spawn a task for `request`
    pub fn dispatch(&self, request: Request) -> JoinHandle<()> {
        let client = self.client.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let screen = request.screen();
            let event = run(&client, request).await;
            if events.send(event).is_err() {
                tracing::debug!(screen, "Event loop gone, result discarded");
            }
        })
    }
}

/// Perform one request and produce its event
pub async fn run(client: &TmdbClient, request: Request) -> AppEvent {
    match request {
        Request::Trending { screen } => AppEvent::Trending {
            screen,
            items: client.fetch_trending().await,
        },
        Request::TopRated { screen } => AppEvent::TopRated {
            screen,
            items: client.fetch_top_rated().await,
        },
        Request::Search { screen, query } => {
            let items = client.search_movies(&query).await;
            AppEvent::SearchResults {
                screen,
                query,
                items,
            }
        }
        Request::Details { screen, id, kind } => AppEvent::Details {
            screen,
            detail: client.fetch_details(&id, kind).await,
        },
        Request::LaunchTimer { screen, after } => {
            tokio::time::sleep(after).await;
            AppEvent::LaunchFinished { screen }
        }
    }
}
