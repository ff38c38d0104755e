use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::api::types::{Tweet, User};
use crate::avatar::initials;

/// Renders a single tweet as a compact card (2+ lines).
///
/// Layout:
///   [XD] X Developers @XDevelopers · Jan 01
///   Tweet text (may wrap) ...
pub struct TweetCard<'a> {
    pub tweet: &'a Tweet,
    pub author: Option<&'a User>,
    pub selected: bool,
}

impl<'a> TweetCard<'a> {
    pub fn new(tweet: &'a Tweet, author: Option<&'a User>) -> Self {
        Self {
            tweet,
            author,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Display name precedence: resolved author's name, else the tweet's
/// embedded username. Tolerates `includes` omitting the author entirely.
pub fn display_name<'a>(tweet: &'a Tweet, author: Option<&'a User>) -> &'a str {
    author.map(|u| u.name.as_str()).unwrap_or(&tweet.username)
}

/// Avatar identity precedence: resolved author's ID, else the tweet's
/// `author_id`.
pub fn avatar_id<'a>(tweet: &'a Tweet, author: Option<&'a User>) -> &'a str {
    author.map(|u| u.id.as_str()).unwrap_or(&tweet.author_id)
}

/// The initials badge shown in place of an avatar image.
pub fn avatar_badge(tweet: &Tweet, author: Option<&User>) -> String {
    format!("[{}]", initials(display_name(tweet, author)))
}

impl Widget for TweetCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let highlight_style = if self.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        let mut y = area.y;

        // -- Line 1: avatar badge + author info --
        let badge = avatar_badge(self.tweet, self.author);
        let name = display_name(self.tweet, self.author);
        let date = format_date(self.tweet.created_at.as_deref(), "%b %d");

        let header_spans = vec![
            Span::styled(badge, Style::default().fg(Color::Magenta)),
            Span::raw(" "),
            Span::styled(
                name.to_owned(),
                highlight_style.add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" @{}", self.tweet.username),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!(" \u{b7} {date}"), Style::default().fg(Color::DarkGray)),
        ];

        let header_line = Line::from(header_spans);
        buf.set_line(area.x, y, &header_line, area.width);
        y += 1;

        if y >= area.y + area.height {
            return;
        }

        // -- Line 2+: tweet text (wrapped) --
        let width = area.width as usize;
        let max_text_lines = (area.height - (y - area.y)) as usize;

        for (i, line_text) in wrap_text(&self.tweet.text, width).into_iter().enumerate() {
            if i >= max_text_lines || y >= area.y + area.height {
                break;
            }
            let text_style = if self.selected {
                Style::default().fg(Color::White)
            } else {
                Style::default()
            };
            buf.set_string(area.x, y, &line_text, text_style);
            y += 1;
        }
    }
}

/// Height in lines needed for a tweet card.
pub fn tweet_card_height(tweet: &Tweet, width: u16) -> u16 {
    let text_lines = wrap_text(&tweet.text, width as usize).len() as u16;
    // header + text
    1 + text_lines
}

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![];
    }
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current = word.to_string();
            } else if current.len() + 1 + word.len() <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = word.to_string();
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Format an RFC 3339 timestamp with the given chrono format string.
/// Missing or malformed input degrades to a placeholder instead of failing
/// the render.
pub fn format_date(created_at: Option<&str>, fmt: &str) -> String {
    created_at
        .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
        .map(|dt| dt.format(fmt).to_string())
        .unwrap_or_else(|| "Unknown date".to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tweet(author_id: &str, username: &str) -> Tweet {
        Tweet {
            id: "20".into(),
            author_id: author_id.into(),
            username: username.into(),
            text: "just setting up my twttr".into(),
            created_at: Some("2006-03-21T20:50:14.000Z".into()),
        }
    }

    fn user(id: &str, name: &str) -> User {
        User {
            id: id.into(),
            name: name.into(),
            username: "jack".into(),
            profile_image_url: None,
        }
    }

    #[test]
    fn display_name_prefers_resolved_author() {
        let t = tweet("12", "jack");
        let u = user("12", "Jack Dorsey");
        assert_eq!(display_name(&t, Some(&u)), "Jack Dorsey");
    }

    #[test]
    fn display_name_falls_back_to_embedded_username() {
        let t = tweet("12", "jack");
        assert_eq!(display_name(&t, None), "jack");
    }

    #[test]
    fn avatar_id_falls_back_to_author_id() {
        let t = tweet("12", "jack");
        let u = user("99", "Someone Else");
        assert_eq!(avatar_id(&t, Some(&u)), "99");
        assert_eq!(avatar_id(&t, None), "12");
    }

    #[test]
    fn avatar_badge_uses_initials() {
        let t = tweet("12", "jack");
        let u = user("12", "Jack Dorsey");
        assert_eq!(avatar_badge(&t, Some(&u)), "[JD]");
        assert_eq!(avatar_badge(&t, None), "[J]");
    }

    #[test]
    fn format_date_parses_rfc3339() {
        assert_eq!(
            format_date(Some("2006-03-21T20:50:14.000Z"), "%b %d, %Y"),
            "Mar 21, 2006"
        );
    }

    #[test]
    fn format_date_degrades_on_garbage() {
        assert_eq!(format_date(Some("not a date"), "%b %d"), "Unknown date");
        assert_eq!(format_date(None, "%b %d"), "Unknown date");
    }

    #[test]
    fn wrap_text_splits_on_width() {
        let lines = wrap_text("hello brave new world", 11);
        assert_eq!(lines, vec!["hello brave", "new world"]);
    }

    #[test]
    fn wrap_text_empty_input_is_one_blank_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }
}
