use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Widget};

use crate::app::{App, DetailState, LoadPhase};
use crate::avatar::avatar_url;
use crate::ui::tweet::{avatar_badge, avatar_id, display_name, format_date, wrap_text};

/// Single-tweet detail view.
pub struct TweetDetailView<'a> {
    pub app: &'a App,
}

impl<'a> TweetDetailView<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

/// Placeholder text for the non-renderable phases. The failure message is
/// the same for every error kind; the specifics live in the logs.
fn placeholder(detail: &DetailState) -> Option<(&'static str, Color)> {
    match detail.phase {
        LoadPhase::Loading => Some(("Loading tweet...", Color::DarkGray)),
        LoadPhase::Failed => Some(("Failed to load tweet", Color::Red)),
        LoadPhase::Loaded if detail.tweet.is_none() => Some(("Tweet not found", Color::Red)),
        LoadPhase::Loaded => None,
    }
}

impl Widget for TweetDetailView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Tweet ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(area);
        block.render(area, buf);

        let detail = &self.app.detail;

        if let Some((msg, color)) = placeholder(detail) {
            buf.set_string(inner.x + 1, inner.y, msg, Style::default().fg(color));
            return;
        }

        let Some(tweet) = detail.tweet.as_ref() else {
            return;
        };
        let author = self.app.lookup_user(&tweet.author_id);

        let mut y = inner.y;
        let content_width = inner.width.saturating_sub(2);

        // Header: badge, display name, handle, full date.
        let header = Line::from(vec![
            Span::styled(
                avatar_badge(tweet, author),
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(" "),
            Span::styled(
                display_name(tweet, author).to_owned(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" @{}", tweet.username),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                format!(
                    " \u{b7} {}",
                    format_date(tweet.created_at.as_deref(), "%b %d, %Y")
                ),
                Style::default().fg(Color::DarkGray),
            ),
        ]);
        buf.set_line(inner.x + 1, y, &header, inner.width);
        y += 1;

        // Avatar URL, for terminals where the user wants to open it.
        if y < inner.y + inner.height {
            buf.set_string(
                inner.x + 1,
                y,
                avatar_url(avatar_id(tweet, author), 48),
                Style::default().fg(Color::DarkGray),
            );
            y += 1;
        }

        y += 1; // blank line before the text

        for line_text in wrap_text(&tweet.text, content_width as usize) {
            if y >= inner.y + inner.height {
                break;
            }
            buf.set_string(inner.x + 1, y, &line_text, Style::default().fg(Color::White));
            y += 1;
        }

        // Back hint on the last line.
        let hint_y = inner.y + inner.height;
        if hint_y > y + 1 {
            buf.set_string(
                inner.x + 1,
                hint_y - 1,
                "q/Esc: back",
                Style::default().fg(Color::DarkGray),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_phase_shows_loading_placeholder() {
        let detail = DetailState::default();
        assert_eq!(
            placeholder(&detail),
            Some(("Loading tweet...", Color::DarkGray))
        );
    }

    #[test]
    fn failed_phase_shows_generic_failure_message() {
        // Server errors, rate limits, and not-found all land in the same
        // phase and render the same fixed message.
        let detail = DetailState {
            tweet: None,
            phase: LoadPhase::Failed,
            seq: 1,
        };
        assert_eq!(
            placeholder(&detail),
            Some(("Failed to load tweet", Color::Red))
        );
    }
}
