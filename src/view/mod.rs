use crate::picker::{InputMode, PickMode, Picker};
use crate::theme::ui;
use ratatui::prelude::*;
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};

pub(crate) const SELECTED_PREFIX: &str = " > ";
pub(crate) const UNSELECTED_PREFIX: &str = "   ";

pub fn render(picker: &mut Picker, frame: &mut Frame) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Items
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(picker, frame, chunks[0]);
    render_items(picker, frame, chunks[1]);
    render_footer(picker, frame, chunks[2]);
}

fn render_header(picker: &Picker, frame: &mut Frame, area: Rect) {
    let mut spans = vec![Span::styled(
        picker.title.as_str(),
        Style::default().fg(ui::PRIMARY).bold(),
    )];

    if !picker.search_query.is_empty() || picker.input_mode == InputMode::Search {
        spans.push(Span::raw("  "));
        spans.push(Span::styled("/", Style::default().fg(ui::HIGHLIGHT)));
        spans.push(Span::styled(
            picker.search_query.as_str(),
            Style::default().fg(ui::HIGHLIGHT),
        ));
        if picker.input_mode == InputMode::Search {
            spans.push(Span::styled("_", Style::default().fg(ui::HIGHLIGHT)));
        }
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, area);
}

fn render_items(picker: &mut Picker, frame: &mut Frame, area: Rect) {
    let inner_height = area.height.saturating_sub(2) as usize;
    let inner_width = area.width.saturating_sub(2) as usize;
    picker.scroll_into_view(inner_height);

    let items: Vec<ListItem> = picker
        .visible
        .iter()
        .enumerate()
        .skip(picker.scroll_offset)
        .take(inner_height)
        .map(|(pos, &idx)| {
            let is_cursor = pos == picker.cursor;
            let prefix = if is_cursor {
                SELECTED_PREFIX
            } else {
                UNSELECTED_PREFIX
            };
            let style = if is_cursor {
                Style::default()
                    .fg(ui::PRIMARY)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(ui::TEXT)
            };

            let mut spans = vec![Span::styled(prefix, style)];
            if picker.mode == PickMode::Multiple {
                let checked = picker.is_selected(idx);
                spans.push(Span::styled(
                    if checked { "[x] " } else { "[ ] " },
                    Style::default().fg(if checked { ui::ACTIVE } else { ui::MUTED }),
                ));
            }
            let label_width = inner_width.saturating_sub(prefix.len() + 4);
            spans.push(Span::styled(truncate(&picker.items[idx], label_width), style));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let title = if picker.search_query.is_empty() {
        format!("Items ({})", picker.items.len())
    } else {
        format!("Items ({}/{})", picker.visible.len(), picker.items.len())
    };

    let list = if items.is_empty() {
        List::new(vec![ListItem::new(Span::styled(
            "   No matches",
            Style::default().fg(ui::MUTED),
        ))])
    } else {
        List::new(items)
    };
    frame.render_widget(list.block(Block::default().borders(Borders::ALL).title(title)), area);

    render_scrollbar(
        frame,
        area,
        picker.visible.len(),
        inner_height,
        picker.scroll_offset,
    );
}

fn render_footer(picker: &Picker, frame: &mut Frame, area: Rect) {
    let keys: &[(&str, &str)] = match (picker.input_mode, picker.mode) {
        (InputMode::Search, _) => &[("Enter", "Done"), ("Esc", "Clear")],
        (InputMode::Normal, PickMode::Single) => &[
            ("↑↓/jk", "Move"),
            ("Enter", "Open"),
            ("/", "Filter"),
            ("Esc", "Cancel"),
        ],
        (InputMode::Normal, PickMode::Multiple) => &[
            ("↑↓/jk", "Move"),
            ("Space", "Toggle"),
            ("a", "All"),
            ("Enter", "Open"),
            ("/", "Filter"),
            ("Esc", "Cancel"),
        ],
    };
    render_footer_bar(frame, area, keys);
}

pub(crate) fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

pub(crate) fn render_scrollbar(
    frame: &mut Frame,
    area: Rect,
    total_items: usize,
    visible_items: usize,
    offset: usize,
) {
    if total_items > visible_items && area.width > 0 {
        let scrollbar_area = Rect {
            x: (area.x + area.width).saturating_sub(1),
            y: area.y + 1,
            width: 1,
            height: area.height.saturating_sub(2),
        };

        let mut scrollbar_state =
            ScrollbarState::new(total_items.saturating_sub(visible_items)).position(offset);

        let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("▲"))
            .end_symbol(Some("▼"));

        frame.render_stateful_widget(scrollbar, scrollbar_area, &mut scrollbar_state);
    }
}

pub(crate) fn render_footer_bar(frame: &mut Frame, area: Rect, keys: &[(&str, &str)]) {
    let mut spans = Vec::new();

    for (i, (key, action)) in keys.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", Style::default().fg(ui::MUTED)));
        }
        spans.push(Span::styled(*key, Style::default().fg(ui::HIGHLIGHT)));
        spans.push(Span::styled(
            format!(" {}", action),
            Style::default().fg(ui::MUTED),
        ));
    }

    let footer = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
