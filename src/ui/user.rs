use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::app::App;
use crate::avatar::{avatar_url, initials};
use crate::ui::timeline::FeedView;

/// Profile view for the configured profile identity: a header with the
/// identity's avatar fallback and tweet count, then their tweets.
pub struct ProfileView<'a> {
    pub app: &'a App,
}

impl<'a> ProfileView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for ProfileView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [header_area, feed_area] =
            Layout::vertical([Constraint::Length(4), Constraint::Min(1)]).areas(area);

        let profile = &self.app.config.profile;
        let tweets = self.app.profile_tweets();

        let header_lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("[{}] ", initials(&profile.name)),
                    Style::default().fg(Color::Magenta),
                ),
                Span::styled(
                    profile.name.clone(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(" @{}", profile.username),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(Span::styled(
                avatar_url(&profile.id, 120),
                Style::default().fg(Color::DarkGray),
            )),
            Line::from(vec![
                Span::styled(
                    tweets.len().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" Tweets", Style::default().fg(Color::DarkGray)),
            ]),
        ];

        Paragraph::new(header_lines).render(header_area, buf);

        FeedView::new("Tweets", tweets, self.app.profile.phase, self.app)
            .empty_message("No tweets from this user")
            .render(feed_area, buf);
    }
}
