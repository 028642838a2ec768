use super::app::{App, Mode};
use super::events::Event;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub struct EventHandler;

impl EventHandler {
    /// Apply an event to the app. Returns true when the app should exit.
    pub fn handle(event: &Event, app: &mut App) -> bool {
        match event {
            Event::Key(key) => Self::handle_key(*key, app),
            Event::Resize(w, h) => {
                app.update_terminal_size(*w as usize, *h as usize);
                false
            }
            Event::Tick => {
                app.on_tick();
                false
            }
        }
    }

    fn handle_key(key: KeyEvent, app: &mut App) -> bool {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return true;
        }

        match app.mode {
            Mode::AddParticipant | Mode::ImportFile => Self::handle_input_mode(key, app),
            Mode::ConfirmClear => Self::handle_confirm_clear(key, app),
            // Re-entry stays disabled until the reveal finishes
            Mode::Drawing => false,
            Mode::Normal | Mode::Results => Self::handle_normal_mode(key, app),
        }
    }

    fn handle_normal_mode(key: KeyEvent, app: &mut App) -> bool {
        if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return false;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.select_up(),
            KeyCode::Down | KeyCode::Char('j') => app.select_down(),
            KeyCode::Char('a') => app.start_add(),
            KeyCode::Char('i') => app.start_import(),
            KeyCode::Char('d') | KeyCode::Delete => app.remove_selected(),
            KeyCode::Char('C') => app.request_clear(),
            KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_winners(1),
            KeyCode::Char('-') => app.adjust_winners(-1),
            KeyCode::Char('u') => app.toggle_duplicates(),
            KeyCode::Char('w') => app.toggle_weights(),
            KeyCode::Enter | KeyCode::Char('s') => app.start_draw(),
            KeyCode::Char('r') => app.reset_draw(),
            KeyCode::Char('e') => app.export(),
            KeyCode::Char('q') | KeyCode::Esc => return true,
            _ => {}
        }
        false
    }

    fn handle_input_mode(key: KeyEvent, app: &mut App) -> bool {
        match key.code {
            KeyCode::Esc => app.cancel_input(),
            KeyCode::Enter => app.submit_input(),
            KeyCode::Backspace => app.input_pop(),
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                app.input_push(c)
            }
            _ => {}
        }
        false
    }

    fn handle_confirm_clear(key: KeyEvent, app: &mut App) -> bool {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_clear(true),
            _ => app.confirm_clear(false),
        }
        false
    }
}
