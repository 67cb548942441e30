use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::{App, View};

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow stepping through issues while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            _ => {}
        }
        return;
    }

    // If chat input is active, handle text input
    if app.composing {
        handle_compose_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // View switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        // Direct view access
        KeyCode::Char('1') => app.set_view(View::Map),
        KeyCode::Char('2') => app.set_view(View::Readings),
        KeyCode::Char('3') => app.set_view(View::Analysis),
        KeyCode::Char('4') => app.set_view(View::Chat),

        // Navigation (up/down for items, left/right for tabs)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Issue detail, or send the highlighted suggestion
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Backend actions
        KeyCode::Char('a') => app.analyze(),
        KeyCode::Char('r') => app.reload_data(),

        // Chat input
        KeyCode::Char('i') => app.start_compose(),

        // Language
        KeyCode::Char('L') => app.cycle_language(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Export
        KeyCode::Char('e') => app.export_with_status(),

        _ => {}
    }
}

/// Handle key input while composing a chat message
fn handle_compose_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Enter => app.submit_chat(),

        // Cancel (keep the draft but exit input mode)
        KeyCode::Esc => app.cancel_compose(),

        // Clear the draft
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.chat_input.clear();
        }

        KeyCode::Backspace => app.input_pop(),

        KeyCode::Char(c) => app.input_push(c),

        _ => {}
    }
}

/// Handle mouse events
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        // Tab clicks (row 1, after header)
        MouseEventKind::Down(MouseButton::Left) if mouse.row == 1 => {
            // Tab positions: Map (0-8), Readings (10-23), Analysis (25-38), Chat (40-49)
            let col = mouse.column;
            if col < 10 {
                app.set_view(View::Map);
            } else if col < 25 {
                app.set_view(View::Readings);
            } else if col < 40 {
                app.set_view(View::Analysis);
            } else if col < 50 {
                app.set_view(View::Chat);
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}
