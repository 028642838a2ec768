use super::app::{App, Mode};
use super::components::{
    dim_background, draw_confirm_clear_popup, draw_input_bar, draw_reveal, draw_roster_list,
    draw_settings, draw_status_bar, draw_winners,
};
use ratatui::prelude::*;

pub fn draw(f: &mut Frame, app: &App) {
    let size = f.size();

    if size.height < 8 || size.width < 40 {
        let paragraph = ratatui::widgets::Paragraph::new("Terminal too small");
        f.render_widget(paragraph, size);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(size);

    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    draw_roster_list(
        f,
        body_chunks[0],
        app.get_visible_participants(),
        app.selected_index,
        app.scroll_offset,
        &app.get_roster_count_info(),
    );

    let side_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(3)])
        .split(body_chunks[1]);

    draw_settings(f, side_chunks[0], &app.draw_config);

    match app.animation() {
        Some(animation) if app.mode == Mode::Drawing => {
            draw_reveal(f, side_chunks[1], animation, app.winners().len());
        }
        _ => draw_winners(f, side_chunks[1], app.winners()),
    }

    draw_input_bar(f, chunks[1], app.mode, &app.input, app.message.as_deref());
    draw_status_bar(f, chunks[2], app.mode);

    if app.mode == Mode::ConfirmClear {
        dim_background(f);
        draw_confirm_clear_popup(f, size, app.participants().len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::engine::DrawEngine;
    use ratatui::backend::TestBackend;

    fn render(app: &App) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer.get(x, y).symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_renders_roster_and_settings() {
        let mut app = App::new(DrawEngine::new(), &Config::default(), 80, 20);
        app.add_participant("Ada, 5C, 3");

        let screen = render(&app);
        assert!(screen.contains("Participants"));
        assert!(screen.contains("Ada"));
        assert!(screen.contains("×3"));
        assert!(screen.contains("Winners:"));
    }

    #[test]
    fn test_renders_empty_roster_hint() {
        let app = App::new(DrawEngine::new(), &Config::default(), 80, 20);
        let screen = render(&app);
        assert!(screen.contains("No participants yet"));
    }
}
