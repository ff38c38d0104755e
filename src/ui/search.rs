use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

use crate::app::App;
use crate::ui::timeline::FeedView;

/// All-tweets view with the live substring filter applied.
pub struct AllTweetsView<'a> {
    pub app: &'a App,
}

impl<'a> AllTweetsView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for AllTweetsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let filtered = self.app.filtered_all_tweets();
        let total = self.app.all_tweets.tweets.len();

        let title = if self.app.search_term.is_empty() {
            "All Tweets (press / to filter)".to_string()
        } else {
            format!(
                "All Tweets: \"{}\" ({} of {})",
                self.app.search_term,
                filtered.len(),
                total
            )
        };

        let empty_message = if self.app.search_term.is_empty() {
            "No tweets available"
        } else {
            "No tweets match your search"
        };

        FeedView::new(&title, filtered, self.app.all_tweets.phase, self.app)
            .empty_message(empty_message)
            .render(area, buf);
    }
}
