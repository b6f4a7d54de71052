//! Keyboard input handling.
//!
//! Maps terminal key events to local [`App`] changes and, where the key is
//! a user intent, to a [`FeedEvent`] for the controller.  The mapping
//! depends on what is on screen:
//!
//! | Screen        | Keys |
//! |---------------|------|
//! | feed          | `←/→ h/l` category, `↑/↓ j/k g/G` scroll, `Enter` open, `/` search, `r` retry, `q` quit |
//! | search bar    | type to search, `Enter` search now, `Tab` open, `↑/↓` scroll, `Esc` close |
//! | article popup | `Esc`/`Enter`/`Backspace` close |
//!
//! `Ctrl-C` quits everywhere; `Ctrl-R` retries everywhere.
//!
//! ## For contributors
//!
//! To add a new keybinding, add a match arm in the handler for the screen
//! it belongs to and update the hint text in `crate::ui::draw_status_bar`.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::App;
use crate::feed::FeedEvent;

/// Process a single key event.
///
/// Only key presses are handled (not release / repeat).  Returns the event
/// to forward to the feed controller, if any.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Option<FeedEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => {
                app.quit = true;
                None
            }
            KeyCode::Char('r') => Some(FeedEvent::Retry),
            _ => None,
        };
    }

    if app.feed.selected_article.is_some() {
        handle_detail_key(app, key)
    } else if app.feed.search_bar_visible {
        handle_search_key(app, key)
    } else {
        handle_feed_key(app, key)
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) -> Option<FeedEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace => Some(FeedEvent::ArticleDismissed),
        KeyCode::Char('q') => {
            app.quit = true;
            None
        }
        _ => None,
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) -> Option<FeedEvent> {
    match key.code {
        KeyCode::Esc => Some(FeedEvent::CloseIconClicked),
        KeyCode::Enter => Some(FeedEvent::SearchExecute(app.search_input.clone())),
        KeyCode::Tab => app.highlighted().cloned().map(FeedEvent::NewsCardClicked),
        KeyCode::Down => {
            app.select_next();
            None
        }
        KeyCode::Up => {
            app.select_previous();
            None
        }
        KeyCode::Backspace => {
            app.search_input.pop()?;
            Some(FeedEvent::SearchQueryChanged(app.search_input.clone()))
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            Some(FeedEvent::SearchQueryChanged(app.search_input.clone()))
        }
        _ => None,
    }
}

fn handle_feed_key(app: &mut App, key: KeyEvent) -> Option<FeedEvent> {
    let category = app.displayed_category();

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.quit = true;
            None
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => {
            Some(FeedEvent::CategoryChanged(app.switch_category(category.previous())))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
            Some(FeedEvent::CategoryChanged(app.switch_category(category.next())))
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous();
            None
        }
        KeyCode::Home | KeyCode::Char('g') => {
            app.select_first();
            None
        }
        KeyCode::End | KeyCode::Char('G') => {
            app.select_last();
            None
        }
        KeyCode::Enter => app.highlighted().cloned().map(FeedEvent::NewsCardClicked),
        KeyCode::Char('/') | KeyCode::Char('s') => {
            app.search_input = app.feed.search_query.clone();
            Some(FeedEvent::SearchIconClicked)
        }
        KeyCode::Char('r') => Some(FeedEvent::Retry),
        _ => None,
    }
}
