use crate::category::Category;
use crate::source::Article;

/// The query whose results are (or will be) shown in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Category(Category),
    Search(String),
}

impl Default for Query {
    fn default() -> Self {
        Query::Category(Category::default())
    }
}

/// Everything the presentation layer needs to draw the feed.
///
/// Owned and mutated only by the feed controller; observers receive whole
/// snapshots.  `loading` and `error` are never both set once a fetch has
/// settled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    /// A fetch for `active_query` is in flight.
    pub loading: bool,
    /// Articles from the last successful fetch.  Kept on failure.
    pub articles: Vec<Article>,
    /// Message from the last failed fetch.
    pub error: Option<String>,
    pub search_bar_visible: bool,
    /// Article opened in the detail pane.
    pub selected_article: Option<Article>,
    pub active_category: Category,
    /// Current contents of the search box.
    pub search_query: String,
    /// Last query dispatched; what `Retry` re-runs.
    pub active_query: Query,
}
