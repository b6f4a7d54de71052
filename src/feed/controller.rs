//! Feed controller task.
//!
//! One tokio task owns the [`FeedState`] and is its only writer.  It
//! selects over two channels:
//!
//! ```text
//!  FeedEvent (from UI) ──►┐
//!                         ├──► FeedController ──► watch<FeedState> ──► UI
//!  Signal (own tasks) ───►┘        │
//!                                  └── spawns fetch / debounce tasks
//! ```
//!
//! Fetches and debounce timers run as separate tasks so the controller
//! never blocks.  Each one carries a ticket; when it reports back, the
//! report is applied only if its ticket is still current.  Starting a new
//! fetch aborts the old one and disarms the debounce timer, and every
//! keystroke re-arms it, so at most one of each is alive at a time.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

use super::{FeedEvent, FeedState, Query};
use crate::source::{Article, NewsSource, Resource};

/// Reports from tasks the controller spawned.
#[derive(Debug)]
enum Signal {
    Fetched {
        ticket: u64,
        result: Resource<Vec<Article>>,
    },
    QuietPeriodElapsed {
        ticket: u64,
        query: String,
    },
}

/// Cloneable access to a running controller.
#[derive(Clone)]
pub struct FeedHandle {
    events: mpsc::UnboundedSender<FeedEvent>,
    state: watch::Receiver<FeedState>,
}

impl FeedHandle {
    /// Queue an event.  Events are handled in the order they are sent.
    pub fn send(&self, event: FeedEvent) {
        if self.events.send(event).is_err() {
            tracing::warn!("feed controller has stopped; event dropped");
        }
    }

    /// Latest committed state.
    pub fn snapshot(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// A receiver that is notified on every committed change.
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.clone()
    }
}

/// Start a controller on the current tokio runtime.
///
/// The task ends once every [`FeedHandle`] clone has been dropped.
pub fn spawn(source: Arc<dyn NewsSource>, quiet_period: Duration) -> FeedHandle {
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    let controller = FeedController::new(source, quiet_period);
    let state = controller.subscribe();

    tokio::spawn(controller.run(events_rx));

    FeedHandle {
        events: events_tx,
        state,
    }
}

pub struct FeedController {
    source: Arc<dyn NewsSource>,
    state: FeedState,
    publisher: watch::Sender<FeedState>,
    signals_tx: mpsc::UnboundedSender<Signal>,
    signals_rx: mpsc::UnboundedReceiver<Signal>,
    /// How long the search box must stay unchanged before searching.
    quiet_period: Duration,
    fetch_ticket: u64,
    search_ticket: u64,
    in_flight: Option<JoinHandle<()>>,
    pending_search: Option<JoinHandle<()>>,
}

impl FeedController {
    pub fn new(source: Arc<dyn NewsSource>, quiet_period: Duration) -> Self {
        let state = FeedState::default();
        let (publisher, _) = watch::channel(state.clone());
        let (signals_tx, signals_rx) = mpsc::unbounded_channel();

        Self {
            source,
            state,
            publisher,
            signals_tx,
            signals_rx,
            quiet_period,
            fetch_ticket: 0,
            search_ticket: 0,
            in_flight: None,
            pending_search: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.publisher.subscribe()
    }

    /// Process events and task reports until the event channel closes.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<FeedEvent>) {
        loop {
            tokio::select! {
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event),
                    None => break,
                },
                Some(signal) = self.signals_rx.recv() => self.handle_signal(signal),
            }
        }
        tracing::debug!("event channel closed; feed controller stopping");
    }

    /// Apply one user intent and publish the resulting state.
    pub fn handle_event(&mut self, event: FeedEvent) {
        tracing::debug!(event = event.name(), "feed event");

        match event {
            FeedEvent::CategoryChanged(category) => {
                self.state.active_category = category;
                self.dispatch(Query::Category(category));
            }
            FeedEvent::SearchIconClicked => {
                self.state.search_bar_visible = true;
            }
            FeedEvent::CloseIconClicked => {
                self.state.search_bar_visible = false;
                let category = self.state.active_category;
                self.dispatch(Query::Category(category));
            }
            FeedEvent::SearchQueryChanged(query) => {
                self.state.search_query = query.clone();
                self.schedule_search(query);
            }
            FeedEvent::SearchExecute(query) => {
                self.execute_search(query);
            }
            FeedEvent::NewsCardClicked(article) => {
                self.state.selected_article = Some(article);
            }
            FeedEvent::ArticleDismissed => {
                self.state.selected_article = None;
            }
            FeedEvent::Retry => {
                let query = self.state.active_query.clone();
                self.dispatch(query);
            }
        }

        self.publish();
    }

    fn handle_signal(&mut self, signal: Signal) {
        match signal {
            Signal::QuietPeriodElapsed { ticket, query } => {
                if ticket != self.search_ticket {
                    tracing::trace!(ticket, "ignoring superseded search timer");
                    return;
                }
                self.pending_search = None;
                self.execute_search(query);
            }
            Signal::Fetched { ticket, result } => {
                if ticket != self.fetch_ticket {
                    tracing::debug!(ticket, current = self.fetch_ticket, "discarding stale fetch result");
                    return;
                }
                self.in_flight = None;
                match result {
                    Resource::Success(articles) => {
                        tracing::info!(ticket, count = articles.len(), "fetch succeeded");
                        self.state.articles = articles;
                        self.state.loading = false;
                        self.state.error = None;
                    }
                    Resource::Failure { kind, message } => {
                        tracing::warn!(ticket, ?kind, %message, "fetch failed");
                        self.state.error = Some(message);
                        self.state.loading = false;
                    }
                }
            }
        }

        self.publish();
    }

    // -- fetch dispatch ------------------------------------------------------

    /// Start fetching `query`, superseding whatever was in flight.
    ///
    /// Also drops any armed search timer: once a fetch starts, only a
    /// newer keystroke may schedule another one.
    fn dispatch(&mut self, query: Query) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        self.cancel_pending_search();
        self.fetch_ticket += 1;
        let ticket = self.fetch_ticket;

        tracing::info!(ticket, ?query, "dispatching fetch");
        self.state.loading = true;
        self.state.active_query = query.clone();

        let source = Arc::clone(&self.source);
        let signals = self.signals_tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = match &query {
                Query::Category(category) => source.fetch_by_category(*category).await,
                Query::Search(text) => source.search_by_keyword(text).await,
            };
            // The controller may already be gone.
            let _ = signals.send(Signal::Fetched { ticket, result });
        }));
    }

    fn execute_search(&mut self, query: String) {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring empty search");
            return;
        }
        self.dispatch(Query::Search(query.to_string()));
    }

    // -- debounce ------------------------------------------------------------

    fn schedule_search(&mut self, query: String) {
        self.cancel_pending_search();
        let ticket = self.search_ticket;
        let quiet_period = self.quiet_period;
        let signals = self.signals_tx.clone();

        self.pending_search = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            let _ = signals.send(Signal::QuietPeriodElapsed { ticket, query });
        }));
    }

    /// Abort the pending timer.  Bumping the ticket also voids a report the
    /// timer may have queued just before the abort.
    fn cancel_pending_search(&mut self) {
        if let Some(timer) = self.pending_search.take() {
            timer.abort();
        }
        self.search_ticket += 1;
    }

    fn publish(&self) {
        self.publisher.send_replace(self.state.clone());
    }
}

impl Drop for FeedController {
    fn drop(&mut self) {
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
        if let Some(timer) = self.pending_search.take() {
            timer.abort();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tokio::time::Instant;

    use crate::category::Category;
    use crate::source::{ArticleSource, FailureKind};

    const QUIET: Duration = Duration::from_millis(1000);

    type Reply = Box<dyn Fn(&Query) -> (Duration, Resource<Vec<Article>>) + Send + Sync>;

    /// A [`NewsSource`] whose answers (and latency) are decided per query.
    struct ScriptedSource {
        calls: Mutex<Vec<(Query, Instant)>>,
        reply: Reply,
    }

    impl ScriptedSource {
        fn new(
            reply: impl Fn(&Query) -> (Duration, Resource<Vec<Article>>) + Send + Sync + 'static,
        ) -> Arc<Self> {
            Arc::new(Self {
                calls: Mutex::new(Vec::new()),
                reply: Box::new(reply),
            })
        }

        /// Every query answers immediately with one article titled after it.
        fn echo() -> Arc<Self> {
            Self::new(|q| (Duration::ZERO, Resource::Success(vec![article(&label(q))])))
        }

        fn queries(&self) -> Vec<Query> {
            self.calls.lock().unwrap().iter().map(|(q, _)| q.clone()).collect()
        }

        async fn answer(&self, query: Query) -> Resource<Vec<Article>> {
            self.calls.lock().unwrap().push((query.clone(), Instant::now()));
            let (delay, result) = (self.reply)(&query);
            tokio::time::sleep(delay).await;
            result
        }
    }

    #[async_trait]
    impl NewsSource for ScriptedSource {
        async fn fetch_by_category(&self, category: Category) -> Resource<Vec<Article>> {
            self.answer(Query::Category(category)).await
        }

        async fn search_by_keyword(&self, query: &str) -> Resource<Vec<Article>> {
            self.answer(Query::Search(query.to_string())).await
        }
    }

    fn label(q: &Query) -> String {
        match q {
            Query::Category(c) => c.label().to_string(),
            Query::Search(s) => format!("search:{s}"),
        }
    }

    fn article(title: &str) -> Article {
        Article {
            title: title.to_string(),
            author: None,
            description: None,
            content: None,
            published_at: None,
            url_to_image: None,
            source: ArticleSource {
                id: "test".into(),
                name: Some("Test".into()),
            },
            url: format!("https://example.com/{title}"),
        }
    }

    fn titles(state: &FeedState) -> Vec<String> {
        state.articles.iter().map(|a| a.title.clone()).collect()
    }

    /// Handle the next report from a spawned task.
    async fn pump(controller: &mut FeedController) {
        let signal = controller.signals_rx.recv().await.unwrap();
        controller.handle_signal(signal);
    }

    /// Assert that no task reports back within `wait`.
    async fn assert_quiet(controller: &mut FeedController, wait: Duration) {
        let next = tokio::time::timeout(wait, controller.signals_rx.recv()).await;
        assert!(next.is_err(), "unexpected signal: {next:?}");
    }

    // -- construction --------------------------------------------------------

    #[tokio::test]
    async fn new_controller_starts_with_defaults() {
        let controller = FeedController::new(ScriptedSource::echo(), QUIET);
        let state = &controller.state;

        assert!(!state.loading);
        assert!(state.articles.is_empty());
        assert!(state.error.is_none());
        assert!(!state.search_bar_visible);
        assert!(state.selected_article.is_none());
        assert_eq!(state.active_category, Category::General);
        assert_eq!(state.search_query, "");
    }

    // -- category fetches ----------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn category_change_goes_through_loading_to_success() {
        let source = ScriptedSource::new(|_| {
            (Duration::from_millis(50), Resource::Success(vec![article("A")]))
        });
        let mut controller = FeedController::new(source.clone(), QUIET);
        let observer = controller.subscribe();

        controller.handle_event(FeedEvent::CategoryChanged(Category::Business));

        assert!(observer.borrow().loading, "observers see loading immediately");
        assert_eq!(observer.borrow().active_category, Category::Business);

        pump(&mut controller).await;

        let state = observer.borrow().clone();
        assert!(!state.loading);
        assert_eq!(titles(&state), ["A"]);
        assert!(state.error.is_none());
        assert_eq!(state.active_category, Category::Business);
        assert_eq!(source.queries(), [Query::Category(Category::Business)]);
    }

    #[tokio::test]
    async fn success_replaces_articles_and_clears_error() {
        let source = ScriptedSource::new(|q| match q {
            Query::Category(Category::Health) => {
                (Duration::ZERO, Resource::failure(FailureKind::Network, "offline"))
            }
            _ => (
                Duration::ZERO,
                Resource::Success(vec![article("1"), article("2"), article("3")]),
            ),
        });
        let mut controller = FeedController::new(source, QUIET);

        controller.handle_event(FeedEvent::CategoryChanged(Category::Health));
        pump(&mut controller).await;
        assert_eq!(controller.state.error.as_deref(), Some("offline"));

        controller.handle_event(FeedEvent::CategoryChanged(Category::Science));
        pump(&mut controller).await;

        let state = &controller.state;
        assert_eq!(state.articles.len(), 3);
        assert!(state.error.is_none());
        assert!(!state.loading);
    }

    #[tokio::test]
    async fn failure_keeps_previous_articles() {
        let source = ScriptedSource::new(|q| match q {
            Query::Category(Category::General) => {
                (Duration::ZERO, Resource::Success(vec![article("kept")]))
            }
            _ => (Duration::ZERO, Resource::failure(FailureKind::UpstreamHttp(500), "x")),
        });
        let mut controller = FeedController::new(source, QUIET);

        controller.handle_event(FeedEvent::CategoryChanged(Category::General));
        pump(&mut controller).await;
        controller.handle_event(FeedEvent::CategoryChanged(Category::Sports));
        pump(&mut controller).await;

        let state = &controller.state;
        assert_eq!(state.error.as_deref(), Some("x"));
        assert!(!state.loading);
        assert_eq!(titles(state), ["kept"]);
    }

    #[tokio::test]
    async fn reselecting_the_active_category_fetches_again() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::CategoryChanged(Category::General));
        pump(&mut controller).await;
        controller.handle_event(FeedEvent::CategoryChanged(Category::General));
        assert!(controller.state.loading);
        pump(&mut controller).await;

        assert!(!controller.state.loading);
        assert_eq!(
            source.queries(),
            [
                Query::Category(Category::General),
                Query::Category(Category::General)
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn slow_earlier_fetch_cannot_overwrite_later_one() {
        let source = ScriptedSource::new(|q| {
            let delay = match q {
                Query::Category(Category::Business) => Duration::from_millis(500),
                _ => Duration::from_millis(10),
            };
            (delay, Resource::Success(vec![article(&label(q))]))
        });
        let mut controller = FeedController::new(source, QUIET);

        controller.handle_event(FeedEvent::CategoryChanged(Category::Business));
        controller.handle_event(FeedEvent::CategoryChanged(Category::Sports));
        pump(&mut controller).await;

        assert_eq!(titles(&controller.state), ["Sports"]);
        // The Business fetch was aborted and never reports.
        assert_quiet(&mut controller, Duration::from_secs(2)).await;
        assert_eq!(controller.state.active_category, Category::Sports);
        assert_eq!(titles(&controller.state), ["Sports"]);
    }

    #[tokio::test]
    async fn completion_with_stale_ticket_is_discarded() {
        let mut controller = FeedController::new(ScriptedSource::echo(), QUIET);

        controller.handle_event(FeedEvent::CategoryChanged(Category::Business));
        controller.handle_event(FeedEvent::CategoryChanged(Category::Science));
        // A report from the first dispatch that raced the abort.
        controller.handle_signal(Signal::Fetched {
            ticket: 1,
            result: Resource::Success(vec![article("late")]),
        });

        assert!(controller.state.loading);
        assert!(controller.state.articles.is_empty());

        pump(&mut controller).await;
        assert_eq!(titles(&controller.state), ["Science"]);
    }

    // -- search --------------------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn typing_burst_issues_one_search_after_quiet_period() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::SearchQueryChanged("a".into()));
        tokio::time::sleep(Duration::from_millis(200)).await;
        controller.handle_event(FeedEvent::SearchQueryChanged("ab".into()));
        tokio::time::sleep(Duration::from_millis(200)).await;
        controller.handle_event(FeedEvent::SearchQueryChanged("abc".into()));
        let last_keystroke = Instant::now();

        assert!(source.queries().is_empty(), "nothing is sent while typing");
        assert_eq!(controller.state.search_query, "abc");

        pump(&mut controller).await; // quiet period elapsed
        assert!(controller.state.loading);
        pump(&mut controller).await; // search result

        let calls = source.calls.lock().unwrap().clone();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, Query::Search("abc".into()));
        let waited = calls[0].1 - last_keystroke;
        assert!(waited >= QUIET && waited < QUIET + Duration::from_millis(50), "waited {waited:?}");

        assert_eq!(titles(&controller.state), ["search:abc"]);
        assert_quiet(&mut controller, Duration::from_secs(5)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn empty_search_issues_no_call_and_leaves_feed_alone() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);
        controller.handle_event(FeedEvent::CategoryChanged(Category::Health));
        pump(&mut controller).await;
        let before = controller.state.clone();

        controller.handle_event(FeedEvent::SearchQueryChanged(String::new()));
        pump(&mut controller).await;

        let after = &controller.state;
        assert_eq!(source.queries(), [Query::Category(Category::Health)]);
        assert_eq!(after.articles, before.articles);
        assert_eq!(after.error, before.error);
        assert!(!after.loading);
        assert_quiet(&mut controller, Duration::from_secs(5)).await;
    }

    #[tokio::test]
    async fn search_execute_with_blank_query_is_a_noop() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::SearchExecute("   ".into()));

        assert!(!controller.state.loading);
        assert!(source.queries().is_empty());
    }

    #[tokio::test]
    async fn search_execute_fetches_immediately() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::SearchExecute("rust".into()));
        assert!(controller.state.loading);
        pump(&mut controller).await;

        assert_eq!(source.queries(), [Query::Search("rust".into())]);
        assert_eq!(controller.state.active_query, Query::Search("rust".into()));
    }

    // -- search bar ----------------------------------------------------------

    #[tokio::test]
    async fn search_icon_only_shows_the_bar() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::SearchIconClicked);

        assert!(controller.state.search_bar_visible);
        assert!(!controller.state.loading);
        assert!(source.queries().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn close_icon_reloads_category_and_drops_pending_search() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);
        controller.handle_event(FeedEvent::CategoryChanged(Category::Technology));
        pump(&mut controller).await;

        controller.handle_event(FeedEvent::SearchIconClicked);
        controller.handle_event(FeedEvent::SearchQueryChanged("gpu".into()));
        controller.handle_event(FeedEvent::CloseIconClicked);

        assert!(!controller.state.search_bar_visible);
        assert!(controller.state.loading);
        pump(&mut controller).await;
        assert_quiet(&mut controller, Duration::from_secs(5)).await;

        assert_eq!(
            source.queries(),
            [
                Query::Category(Category::Technology),
                Query::Category(Category::Technology)
            ]
        );
        assert_eq!(titles(&controller.state), ["Technology"]);
    }

    #[tokio::test(start_paused = true)]
    async fn category_switch_while_typing_drops_pending_search() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::SearchIconClicked);
        controller.handle_event(FeedEvent::SearchQueryChanged("gpu".into()));
        tokio::time::sleep(Duration::from_millis(300)).await;
        controller.handle_event(FeedEvent::CategoryChanged(Category::Business));

        pump(&mut controller).await;
        assert_quiet(&mut controller, Duration::from_secs(5)).await;

        assert_eq!(source.queries(), [Query::Category(Category::Business)]);
        assert_eq!(controller.state.active_category, Category::Business);
        assert_eq!(controller.state.active_query, Query::Category(Category::Business));
        assert_eq!(titles(&controller.state), ["Business"]);
    }

    #[tokio::test(start_paused = true)]
    async fn enter_after_typing_searches_once() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::SearchQueryChanged("rust".into()));
        controller.handle_event(FeedEvent::SearchExecute("rust".into()));

        pump(&mut controller).await;
        assert!(!controller.state.loading);
        assert_quiet(&mut controller, Duration::from_secs(5)).await;

        assert_eq!(source.queries(), [Query::Search("rust".into())]);
        assert_eq!(titles(&controller.state), ["search:rust"]);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_while_typing_drops_pending_search() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);
        controller.handle_event(FeedEvent::CategoryChanged(Category::Science));
        pump(&mut controller).await;

        controller.handle_event(FeedEvent::SearchQueryChanged("mars".into()));
        controller.handle_event(FeedEvent::Retry);

        pump(&mut controller).await;
        assert_quiet(&mut controller, Duration::from_secs(5)).await;

        assert_eq!(
            source.queries(),
            [
                Query::Category(Category::Science),
                Query::Category(Category::Science)
            ]
        );
        assert_eq!(titles(&controller.state), ["Science"]);
    }

    #[tokio::test(start_paused = true)]
    async fn typing_after_a_dispatch_still_debounces() {
        let source = ScriptedSource::echo();
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::CategoryChanged(Category::Sports));
        controller.handle_event(FeedEvent::SearchQueryChanged("cup".into()));

        pump(&mut controller).await; // category result
        pump(&mut controller).await; // quiet period elapsed
        pump(&mut controller).await; // search result

        assert_eq!(
            source.queries(),
            [Query::Category(Category::Sports), Query::Search("cup".into())]
        );
        assert_eq!(titles(&controller.state), ["search:cup"]);
    }

    // -- selection and retry -------------------------------------------------

    #[tokio::test]
    async fn card_click_selects_without_touching_load_state() {
        let source = ScriptedSource::new(|_| {
            (Duration::ZERO, Resource::failure(FailureKind::Network, "down"))
        });
        let mut controller = FeedController::new(source, QUIET);
        controller.handle_event(FeedEvent::CategoryChanged(Category::General));
        pump(&mut controller).await;

        controller.handle_event(FeedEvent::NewsCardClicked(article("picked")));

        let state = &controller.state;
        assert_eq!(state.selected_article.as_ref().map(|a| a.title.as_str()), Some("picked"));
        assert_eq!(state.error.as_deref(), Some("down"));
        assert!(!state.loading);

        controller.handle_event(FeedEvent::ArticleDismissed);
        assert!(controller.state.selected_article.is_none());
    }

    #[tokio::test]
    async fn retry_reruns_the_active_query() {
        let source = ScriptedSource::new(|_| {
            (Duration::ZERO, Resource::failure(FailureKind::Network, "down"))
        });
        let mut controller = FeedController::new(source.clone(), QUIET);

        controller.handle_event(FeedEvent::SearchExecute("rust".into()));
        pump(&mut controller).await;
        controller.handle_event(FeedEvent::Retry);
        assert!(controller.state.loading);
        pump(&mut controller).await;

        assert_eq!(
            source.queries(),
            [Query::Search("rust".into()), Query::Search("rust".into())]
        );
        assert!(!controller.state.loading);
    }

    // -- spawned controller --------------------------------------------------

    #[tokio::test(start_paused = true)]
    async fn spawned_controller_settles_on_last_category() {
        let source = ScriptedSource::new(|q| {
            let delay = match q {
                Query::Category(Category::Entertainment) => Duration::from_millis(300),
                _ => Duration::from_millis(20),
            };
            (delay, Resource::Success(vec![article(&label(q))]))
        });
        let handle = spawn(source, QUIET);
        let mut observer = handle.subscribe();

        handle.send(FeedEvent::CategoryChanged(Category::Entertainment));
        handle.send(FeedEvent::CategoryChanged(Category::Business));

        observer
            .wait_for(|s| !s.loading && !s.articles.is_empty())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_secs(1)).await;

        let state = handle.snapshot();
        assert_eq!(state.active_category, Category::Business);
        assert_eq!(titles(&state), ["Business"]);
    }
}
