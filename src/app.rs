use ratatui::widgets::ListState;

use crate::category::Category;
use crate::feed::FeedState;
use crate::source::Article;

/// Presentation-side state: the latest feed snapshot plus things only the
/// terminal cares about (highlight position, search box buffer, quit).
pub struct App {
    /// Last snapshot published by the feed controller.
    pub feed: FeedState,
    /// List highlight for scrolling.
    pub list_state: ListState,
    /// Text being typed in the search bar.  Kept locally so fast typing
    /// does not race the controller's snapshot.
    pub search_input: String,
    /// Tab requested by the last arrow press, until a snapshot confirms it.
    /// Key repeats can outrun the controller.
    pub pending_category: Option<Category>,
    /// Whether the user has requested to quit.
    pub quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            feed: FeedState::default(),
            list_state: ListState::default(),
            search_input: String::new(),
            pending_category: None,
            quit: false,
        }
    }

    /// Replace the feed snapshot.  A new article list moves the highlight
    /// back to the top.
    pub fn apply_snapshot(&mut self, feed: FeedState) {
        let articles_changed = feed.articles != self.feed.articles;
        if self.pending_category == Some(feed.active_category) {
            self.pending_category = None;
        }
        self.feed = feed;
        if articles_changed {
            let first = (!self.feed.articles.is_empty()).then_some(0);
            self.list_state.select(first);
        }
    }

    /// The category tab to show and to step from.
    pub fn displayed_category(&self) -> Category {
        self.pending_category.unwrap_or(self.feed.active_category)
    }

    /// Request a tab switch; returns the category to send.
    pub fn switch_category(&mut self, category: Category) -> Category {
        self.pending_category = Some(category);
        category
    }

    /// The highlighted article, if any.
    pub fn highlighted(&self) -> Option<&Article> {
        self.list_state
            .selected()
            .and_then(|i| self.feed.articles.get(i))
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        if self.feed.articles.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(self.feed.articles.len() - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.feed.articles.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.feed.articles.is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        if !self.feed.articles.is_empty() {
            self.list_state.select(Some(self.feed.articles.len() - 1));
        }
    }
}
