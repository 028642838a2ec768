use super::app::Mode;
use crate::draw::{DrawConfig, Winner};
use crate::reveal::RevealAnimation;
use crate::roster::{Participant, DEFAULT_CLASS};
use ratatui::{
    prelude::*,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

fn titled_block(title: &str, subtitle: &str) -> Block<'static> {
    let mut spans = vec![
        Span::styled(" raffle", Style::default().fg(Color::Cyan).bold()),
        Span::raw(" - "),
        Span::styled(title.to_string(), Style::default().bold()),
    ];
    if !subtitle.is_empty() {
        spans.push(Span::raw(" ("));
        spans.push(Span::styled(subtitle.to_string(), Style::default().fg(Color::Gray)));
        spans.push(Span::raw(")"));
    }
    spans.push(Span::raw(" "));

    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Rgb(60, 60, 80)))
        .title(Line::from(spans))
}

/// Roster list with ticket counts
pub fn draw_roster_list(
    f: &mut Frame,
    area: Rect,
    participants: &[Participant],
    selected_index: usize,
    scroll_offset: usize,
    count_info: &str,
) {
    let block = titled_block("Participants", count_info);
    let inner = block.inner(area);
    f.render_widget(block, area);

    if participants.is_empty() {
        let paragraph = Paragraph::new("No participants yet. Press [a] to add or [i] to import.")
            .style(Style::default().fg(Color::Gray))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, inner);
        return;
    }

    let width = inner.width as usize;
    let weight_width = 6;
    let class_width = 10;
    let name_width = width.saturating_sub(2 + class_width + weight_width);

    let lines: Vec<Line> = participants
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let is_selected = scroll_offset + idx == selected_index;
            let selector = if is_selected { ">" } else { " " };
            let weight = if p.weight > 1 {
                format!("×{}", p.weight)
            } else {
                String::new()
            };
            let class_style = if p.class == DEFAULT_CLASS {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(Color::Gray)
            };

            let line = Line::from(vec![
                Span::raw(format!("{} ", selector)),
                Span::raw(pad(&truncate(&p.name, name_width), name_width)),
                Span::styled(pad(&truncate(&p.class, class_width), class_width), class_style),
                Span::styled(format!("{:>6}", weight), Style::default().fg(Color::Yellow)),
            ]);

            if is_selected {
                line.patch_style(Style::default().fg(Color::Cyan))
            } else {
                line
            }
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Draw settings panel
pub fn draw_settings(f: &mut Frame, area: Rect, config: &DrawConfig) {
    let block = titled_block("Draw", "");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let check = |on: bool| if on { "[x]" } else { "[ ]" };
    let lines = vec![
        Line::from(vec![
            Span::raw("Winners:          "),
            Span::styled(config.num_winners.to_string(), Style::default().bold()),
            Span::styled("  [+/-]", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::raw(format!("Allow duplicates: {}", check(config.allow_duplicates))),
            Span::styled("  [u]", Style::default().fg(Color::Gray)),
        ]),
        Line::from(vec![
            Span::raw(format!("Use tickets:      {}", check(config.use_weights))),
            Span::styled("  [w]", Style::default().fg(Color::Gray)),
        ]),
    ];

    f.render_widget(Paragraph::new(lines), inner);
}

/// Spinning wheel for the winner being revealed
pub fn draw_reveal(f: &mut Frame, area: Rect, animation: &RevealAnimation, drawn: usize) {
    let block = titled_block("Drawing", &format!("winner #{}", animation.rank()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let wheel = animation.wheel().join("  ·  ");
    let wheel = Paragraph::new(truncate(&wheel, chunks[0].width as usize))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(wheel, chunks[0]);

    let name_style = if animation.winner_revealed() {
        Style::default().fg(Color::Green).bold()
    } else {
        Style::default().fg(Color::White).bold()
    };
    let current = Paragraph::new(Span::styled(animation.current_name().to_string(), name_style))
        .alignment(Alignment::Center);
    f.render_widget(current, chunks[1]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(animation.progress().clamp(0.0, 1.0))
        .label(format!("{} drawn", drawn));
    f.render_widget(gauge, chunks[2]);
}

/// Winners in draw order
pub fn draw_winners(f: &mut Frame, area: Rect, winners: &[Winner]) {
    let block = titled_block("Winners", &format!("{}", winners.len()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    if winners.is_empty() {
        let paragraph = Paragraph::new("Press [Enter] to start the draw.")
            .style(Style::default().fg(Color::Gray));
        f.render_widget(paragraph, inner);
        return;
    }

    let lines: Vec<Line> = winners
        .iter()
        .map(|w| {
            Line::from(vec![
                Span::styled(format!("#{:<3} ", w.rank), Style::default().fg(Color::Yellow).bold()),
                Span::raw(w.name.clone()),
                Span::styled(format!(" ({})", w.class), Style::default().fg(Color::Gray)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines), inner);
}

/// Prompt line for add/import, or the last message
pub fn draw_input_bar(f: &mut Frame, area: Rect, mode: Mode, input: &str, message: Option<&str>) {
    let content = match mode {
        Mode::AddParticipant => Line::from(vec![
            Span::styled("Add: ", Style::default().fg(Color::Yellow)),
            Span::raw(input.to_string()),
            Span::styled("_", Style::default().fg(Color::Gray)),
            Span::styled("  (name, class, tickets)", Style::default().fg(Color::Gray)),
        ]),
        Mode::ImportFile => Line::from(vec![
            Span::styled("Import file: ", Style::default().fg(Color::Yellow)),
            Span::raw(input.to_string()),
            Span::styled("_", Style::default().fg(Color::Gray)),
        ]),
        _ => match message {
            Some(msg) => Line::from(Span::styled(msg.to_string(), Style::default().fg(Color::Green))),
            None => Line::from(""),
        },
    };

    f.render_widget(Paragraph::new(content), area);
}

/// Status bar component
pub fn draw_status_bar(f: &mut Frame, area: Rect, mode: Mode) {
    let key = |k: &str| Span::styled(format!("[{}]", k), Style::default().bold());
    let content = match mode {
        Mode::AddParticipant | Mode::ImportFile => Line::from(vec![
            key("Enter"),
            Span::raw(" confirm "),
            key("Esc"),
            Span::raw(" cancel"),
        ]),
        Mode::ConfirmClear => Line::from(vec![key("y"), Span::raw(" confirm "), key("n"), Span::raw(" cancel")]),
        Mode::Drawing => Line::from(Span::styled("Drawing...", Style::default().fg(Color::Gray))),
        Mode::Normal | Mode::Results => Line::from(vec![
            key("a"),
            Span::raw(" add "),
            key("i"),
            Span::raw(" import "),
            key("d"),
            Span::raw(" remove "),
            key("C"),
            Span::raw(" clear "),
            key("Enter"),
            Span::raw(" draw "),
            key("r"),
            Span::raw(" reset "),
            key("e"),
            Span::raw(" export "),
            key("q"),
            Span::raw(" quit"),
        ]),
    };

    f.render_widget(Paragraph::new(content), area);
}

/// Darken everything already drawn, for popups
pub fn dim_background(f: &mut Frame) {
    let area = f.size();
    let buf = f.buffer_mut();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            buf.get_mut(x, y).set_fg(Color::DarkGray);
        }
    }
}

pub fn draw_confirm_clear_popup(f: &mut Frame, area: Rect, count: usize) {
    let popup = centered_rect(48, 5, area);
    f.render_widget(Clear, popup);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red))
        .title(Span::styled(" Clear all ", Style::default().fg(Color::Red).bold()));
    let text = vec![
        Line::from(format!("Remove all {} participant(s)?", count)),
        Line::from(vec![
            Span::styled("[y]", Style::default().bold()),
            Span::raw(" yes  "),
            Span::styled("[n]", Style::default().bold()),
            Span::raw(" no"),
        ]),
    ];
    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    f.render_widget(paragraph, popup);
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Cut `text` to `max` display columns, ending with an ellipsis when cut
pub fn truncate(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > max - 1 {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(fill))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("Ada", 10), "Ada");
    }

    #[test]
    fn test_truncate_long_text() {
        let cut = truncate("Margaret Hamilton", 8);
        assert_eq!(cut, "Margare…");
        assert_eq!(cut.width(), 8);
    }

    #[test]
    fn test_truncate_wide_chars() {
        let cut = truncate("山田太郎さん", 7);
        assert!(cut.width() <= 7);
        assert!(cut.ends_with('…'));
    }

    #[test]
    fn test_pad() {
        assert_eq!(pad("ab", 4), "ab  ");
        assert_eq!(pad("abcdef", 4), "abcdef");
    }

    #[test]
    fn test_centered_rect_fits() {
        let area = Rect::new(0, 0, 20, 4);
        let popup = centered_rect(48, 5, area);
        assert_eq!(popup, area);
    }
}
