use crate::category::Category;
use crate::source::Article;

/// User intents forwarded from the presentation layer to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A category tab was selected.  Always fetches, even when the
    /// category is already active.
    CategoryChanged(Category),
    SearchIconClicked,
    /// Hide the search bar and go back to the active category's headlines.
    CloseIconClicked,
    /// The search box text changed.  Debounced.
    SearchQueryChanged(String),
    /// Run a search right away.  An empty query is ignored.
    SearchExecute(String),
    NewsCardClicked(Article),
    /// Close the detail pane.
    ArticleDismissed,
    /// Re-run the active query after a failure.
    Retry,
}

impl FeedEvent {
    /// Short name for log lines.
    pub fn name(&self) -> &'static str {
        match self {
            FeedEvent::CategoryChanged(_) => "category_changed",
            FeedEvent::SearchIconClicked => "search_icon_clicked",
            FeedEvent::CloseIconClicked => "close_icon_clicked",
            FeedEvent::SearchQueryChanged(_) => "search_query_changed",
            FeedEvent::SearchExecute(_) => "search_execute",
            FeedEvent::NewsCardClicked(_) => "news_card_clicked",
            FeedEvent::ArticleDismissed => "article_dismissed",
            FeedEvent::Retry => "retry",
        }
    }
}
