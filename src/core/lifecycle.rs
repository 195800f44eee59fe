use std::{
    cell::{Cell, RefCell},
    fmt,
    str::FromStr,
};

use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::{core::data::ProjectQuery, types::ProjectRecord};

/// What the page can currently show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageState {
    Loading,
    Ready(ProjectRecord),
    Failed(String),
}

impl PageState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, PageState::Loading)
    }
}

/// How overlapping loads on one controller settle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoadOrdering {
    /// Every completed load writes the slot; the last response to arrive wins.
    #[default]
    LastArrival,
    /// Responses to anything but the newest request are dropped.
    LatestRequest,
}

impl fmt::Display for LoadOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadOrdering::LastArrival => f.write_str("last-arrival"),
            LoadOrdering::LatestRequest => f.write_str("latest-request"),
        }
    }
}

impl FromStr for LoadOrdering {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_ascii_lowercase().as_str() {
            "last-arrival" => Ok(LoadOrdering::LastArrival),
            "latest-request" => Ok(LoadOrdering::LatestRequest),
            _ => Err(format!(
                "unsupported ordering `{raw}`. expected `last-arrival` or `latest-request`"
            )),
        }
    }
}

/// Drives one profile page: fetches a record by identifier and holds the
/// resulting [`PageState`].
///
/// The controller is single-threaded. Several `load` futures may be in flight
/// at once (e.g. joined on one task); the slot is only touched between awaits
/// and is read through [`PageController::snapshot`], so no borrow outlives a
/// call.
pub struct PageController {
    query: ProjectQuery,
    ordering: LoadOrdering,
    state: RefCell<PageState>,
    generation: Cell<u64>,
}

impl PageController {
    pub fn new(query: ProjectQuery) -> Self {
        PageController::with_ordering(query, LoadOrdering::default())
    }

    pub fn with_ordering(query: ProjectQuery, ordering: LoadOrdering) -> Self {
        PageController {
            query,
            ordering,
            state: RefCell::new(PageState::Loading),
            generation: Cell::new(0),
        }
    }

    pub fn ordering(&self) -> LoadOrdering {
        self.ordering
    }

    pub fn snapshot(&self) -> PageState {
        self.state.borrow().clone()
    }

    /// Resets to `Loading`, reads the record for `identifier` and settles on
    /// `Ready` or `Failed`. Returns the state this call produced, which may
    /// differ from the slot if the response was superseded.
    pub async fn load(&self, identifier: &str) -> PageState {
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        *self.state.borrow_mut() = PageState::Loading;

        let span = info_span!("load", %identifier, request_id = %Uuid::new_v4());
        async move {
            debug!(generation, "Loading project");
            let outcome = match self.query.fetch_project(identifier).await {
                Ok(record) => {
                    info!(support_items = record.support_items.len(), "Project loaded");
                    PageState::Ready(record)
                }
                Err(error) => {
                    warn!(%error, "Project load failed");
                    PageState::Failed(error.user_message())
                }
            };
            self.settle(generation, outcome.clone());
            outcome
        }
        .instrument(span)
        .await
    }

    fn settle(&self, generation: u64, outcome: PageState) {
        let newest = self.generation.get();
        if self.ordering == LoadOrdering::LatestRequest && generation != newest {
            debug!(generation, newest, "Discarding superseded response");
            return;
        }
        *self.state.borrow_mut() = outcome;
    }
}

#[cfg(test)]
mod tests {
    use awc::Client;

    use super::*;

    #[test]
    fn ordering_parses_both_names() {
        assert_eq!("last-arrival".parse::<LoadOrdering>(), Ok(LoadOrdering::LastArrival));
        assert_eq!("Latest-Request".parse::<LoadOrdering>(), Ok(LoadOrdering::LatestRequest));
        assert!("newest".parse::<LoadOrdering>().is_err());
        assert_eq!(LoadOrdering::LatestRequest.to_string(), "latest-request");
    }

    #[test]
    fn only_loading_is_not_terminal() {
        assert!(!PageState::Loading.is_terminal());
        assert!(PageState::Failed("x".to_string()).is_terminal());
    }

    #[actix_web::test]
    async fn starts_in_loading() {
        let controller = PageController::new(ProjectQuery::with_client(
            Client::default(),
            "http://127.0.0.1:9",
        ));
        assert_eq!(controller.snapshot(), PageState::Loading);
        assert_eq!(controller.ordering(), LoadOrdering::LastArrival);
    }

    #[actix_web::test]
    async fn snapshot_is_detached_from_later_loads() {
        let controller = PageController::new(ProjectQuery::new("http://127.0.0.1:9"));
        let before = controller.snapshot();
        let (first, second) = futures::join!(controller.load(""), controller.load(""));
        assert_eq!(before, PageState::Loading);
        assert!(first.is_terminal() && second.is_terminal());
        assert_eq!(controller.snapshot(), second);
    }

    #[actix_web::test]
    async fn empty_identifier_fails_without_request() {
        let controller = PageController::new(ProjectQuery::new("http://127.0.0.1:9"));
        let outcome = controller.load("").await;
        assert_eq!(outcome, PageState::Failed("project identifier is empty".to_string()));
        assert_eq!(controller.snapshot(), outcome);
    }
}
