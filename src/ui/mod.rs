pub mod command_bar;
pub mod detail;
pub mod help;
pub mod input;
pub mod search;
pub mod status_bar;
pub mod timeline;
pub mod tweet;
pub mod user;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::app::{App, AppMode};
use crate::event::ViewKind;

use command_bar::CommandBar;
use detail::TweetDetailView;
use help::HelpView;
use search::AllTweetsView;
use status_bar::StatusBar;
use timeline::FeedView;
use user::ProfileView;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: main content + status bar + optional command bar
    let bottom_height = if app.mode != AppMode::Normal { 2 } else { 1 };

    let [main_area, bottom_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(bottom_height)]).areas(area);

    // Split bottom into status bar and optional command bar
    if app.mode != AppMode::Normal {
        let [status_area, cmd_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(bottom_area);
        frame.render_widget(StatusBar::new(app), status_area);
        frame.render_widget(CommandBar::new(app), cmd_area);
    } else {
        frame.render_widget(StatusBar::new(app), bottom_area);
    }

    // Render the current view
    match app.current_view() {
        Some(ViewKind::Home) => {
            frame.render_widget(
                FeedView::new(
                    "Latest Tweets",
                    app.home.tweets.iter().collect(),
                    app.home.phase,
                    app,
                ),
                main_area,
            );
        }
        Some(ViewKind::AllTweets) => {
            frame.render_widget(AllTweetsView::new(app), main_area);
        }
        Some(ViewKind::TweetDetail(_)) => {
            frame.render_widget(TweetDetailView::new(app), main_area);
        }
        Some(ViewKind::Profile) => {
            frame.render_widget(ProfileView::new(app), main_area);
        }
        Some(ViewKind::Help) => {
            // Render the view underneath first, then overlay help.
            render_previous_view(frame, app, main_area);
            frame.render_widget(HelpView::new(), main_area);
        }
        None => {
            frame.render_widget(
                FeedView::new("chirptui", Vec::new(), crate::app::LoadPhase::Loaded, app),
                main_area,
            );
        }
    }
}

/// Render the view underneath the current one (for overlay views like Help).
fn render_previous_view(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    if app.view_stack.len() < 2 {
        return;
    }

    let prev_view = &app.view_stack[app.view_stack.len() - 2];
    match &prev_view.kind {
        ViewKind::Home => {
            frame.render_widget(
                FeedView::new(
                    "Latest Tweets",
                    app.home.tweets.iter().collect(),
                    app.home.phase,
                    app,
                ),
                area,
            );
        }
        ViewKind::AllTweets => {
            frame.render_widget(AllTweetsView::new(app), area);
        }
        ViewKind::Profile => {
            frame.render_widget(ProfileView::new(app), area);
        }
        ViewKind::TweetDetail(_) => {
            frame.render_widget(TweetDetailView::new(app), area);
        }
        ViewKind::Help => {}
    }
}
