use crate::app::{App, InputMode};
use portal_config::ViewMode;
use portal_core::{Collection, DateBucket, Present, Record};
use portal_engine::Level;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap},
};

const CARD_HEIGHT: u16 = 8;
const GRID_COLUMNS: usize = 2;

pub fn draw<R: Present>(f: &mut Frame, app: &App<R>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Records
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    draw_header(f, app, chunks[0]);
    draw_main(f, app, chunks[1]);
    draw_footer(f, app, chunks[2]);

    if app.input_mode == InputMode::ShowingHelp {
        draw_help(f);
    }
}

fn draw_header<R: Present>(f: &mut Frame, app: &App<R>, area: Rect) {
    let view = app.controller.view();
    let derived = view.derived();
    let filters = view.filters();

    let mut spans = vec![
        Span::styled(
            format!("portal - {}s", R::KIND.label()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(
            "  {}page {}/{}{} · {} results",
            if derived.has_previous() { "‹ " } else { "  " },
            derived.current_page,
            derived.total_pages,
            if derived.has_next() { " ›" } else { "  " },
            derived.total_count()
        )),
    ];

    let mut active: Vec<String> = filters
        .active_selections()
        .map(|(field, selection)| format!("{field}={selection}"))
        .collect();
    if filters.date() != DateBucket::All {
        active.push(format!("date={}", filters.date()));
    }
    if !filters.search().is_empty() {
        active.push(format!("search=\"{}\"", filters.search()));
    }
    if !active.is_empty() {
        spans.push(Span::styled(
            format!("  [{}]", active.join(" ")),
            Style::default().fg(Color::Yellow),
        ));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_main<R: Present>(f: &mut Frame, app: &App<R>, area: Rect) {
    let title = format!(" {}s ({}) ", R::KIND.label(), app.view_mode);
    let block = Block::default().borders(Borders::ALL).title(title);

    let notice = match app.controller.view().collection() {
        Collection::Pending => Some(("Loading...".to_string(), Color::DarkGray)),
        Collection::Failed { message } => {
            Some((format!("{message}\n\nPress r to retry"), Color::Red))
        }
        Collection::Unusable { .. } => Some(("No data available".to_string(), Color::DarkGray)),
        Collection::Ready(_) if app.page_len() == 0 => Some((
            "No records match the current filters.\n\nPress c to clear them".to_string(),
            Color::DarkGray,
        )),
        Collection::Ready(_) => None,
    };

    if let Some((text, color)) = notice {
        let paragraph = Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(block)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
        return;
    }

    match app.view_mode {
        ViewMode::List => draw_table(f, app, area, block),
        ViewMode::Grid => draw_grid(f, app, area, block),
    }
}

fn draw_table<R: Present>(f: &mut Frame, app: &App<R>, area: Rect, block: Block) {
    let now = app.now();
    let derived = app.controller.view().derived();

    let rows: Vec<Row> = derived
        .page()
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let style = if i == app.selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Row::new(record.cells(now)).style(style)
        })
        .collect();

    let widths = R::COLUMNS.iter().enumerate().map(|(i, _)| {
        if i == 1 {
            Constraint::Fill(3)
        } else {
            Constraint::Fill(1)
        }
    });

    let header = Row::new(R::COLUMNS.iter().copied())
        .style(Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED));

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

fn draw_grid<R: Present>(f: &mut Frame, app: &App<R>, area: Rect, block: Block) {
    let now = app.now();
    let derived = app.controller.view().derived();
    let inner = block.inner(area);
    f.render_widget(block, area);

    let page = derived.page();
    let row_count = page.len().div_ceil(GRID_COLUMNS);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints((0..row_count).map(|_| Constraint::Length(CARD_HEIGHT)))
        .split(inner);

    for (row_index, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Ratio(1, GRID_COLUMNS as u32); GRID_COLUMNS])
            .split(*row_area);

        for (col_index, card_area) in cols.iter().enumerate() {
            let index = row_index * GRID_COLUMNS + col_index;
            let Some(record) = page.get(index) else {
                continue;
            };
            let cells = record.cells(now);
            let lines: Vec<Line> = R::COLUMNS
                .iter()
                .zip(cells.iter())
                .skip(2)
                .map(|(column, value)| {
                    Line::from(vec![
                        Span::styled(format!("{column}: "), Style::default().fg(Color::DarkGray)),
                        Span::raw(value.clone()),
                    ])
                })
                .collect();

            let border = if index == app.selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };
            let card = Paragraph::new(lines)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(border)
                        .title(format!(" {} · {} ", record.id(), record.headline())),
                )
                .wrap(Wrap { trim: true });
            f.render_widget(card, *card_area);
        }
    }
}

fn draw_footer<R: Present>(f: &mut Frame, app: &App<R>, area: Rect) {
    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Yellow));

    let line = match &app.input_mode {
        InputMode::Searching => Line::from(vec![
            Span::raw(format!("Search: {}_", app.input_buffer)),
            Span::raw("  "),
            key("enter"),
            Span::raw(":done "),
            key("esc"),
            Span::raw(":clear"),
        ]),
        InputMode::GoToPage => Line::from(vec![
            Span::raw(format!("Go to page: {}_", app.input_buffer)),
            Span::raw("  "),
            key("enter"),
            Span::raw(":go "),
            key("esc"),
            Span::raw(":cancel"),
        ]),
        InputMode::ConfirmDelete(id) => Line::from(vec![
            Span::styled(
                format!("Delete {} {id}? ", R::KIND.label()),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ),
            key("y"),
            Span::raw(":yes "),
            key("n"),
            Span::raw(":no"),
        ]),
        InputMode::Normal | InputMode::ShowingHelp => {
            let mut spans = Vec::new();
            if app.is_saving() {
                spans.push(Span::styled("⟳ ", Style::default().fg(Color::Cyan)));
            }
            match (&app.pending_delete, &app.status) {
                (Some(id), _) => {
                    spans.push(Span::raw(format!("Deleting {} {id}…", R::KIND.label())));
                }
                (None, Some(status)) => {
                    let color = match status.level {
                        Level::Success => Color::Green,
                        Level::Error => Color::Red,
                    };
                    spans.push(Span::styled(status.message.clone(), Style::default().fg(color)));
                }
                (None, None) => spans.push(Span::raw("Ready")),
            }
            spans.extend([
                Span::raw(" | "),
                key("q"),
                Span::raw(":quit "),
                key("j/k"),
                Span::raw(":move "),
                key("n/p"),
                Span::raw(":page "),
                key("/"),
                Span::raw(":search "),
                key("s/t"),
                Span::raw(":status/date "),
                key("?"),
                Span::raw(":help"),
            ]);
            Line::from(spans)
        }
    };

    let footer = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, area);
}

fn draw_help(f: &mut Frame) {
    let area = centered(f.area(), 60, 70);
    let lines = [
        ("j/k ↑/↓", "select record"),
        ("n/p ←/→", "next / previous page"),
        ("g", "go to page"),
        ("/", "search"),
        ("s", "cycle status filter"),
        ("t", "cycle date filter"),
        ("c", "clear filters"),
        ("d", "delete selected record"),
        ("r", "refresh (retry after an error)"),
        ("v", "toggle list / grid"),
        ("?", "close help"),
        ("q", "quit"),
    ]
    .into_iter()
    .map(|(keys, what)| {
        Line::from(vec![
            Span::styled(format!("{keys:<10}"), Style::default().fg(Color::Yellow)),
            Span::raw(what),
        ])
    })
    .collect::<Vec<_>>();

    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    f.render_widget(Clear, area);
    f.render_widget(help, area);
}

fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_config::PreferenceStore;
    use portal_core::{EvalContext, Ticket};
    use portal_engine::{CollectionView, ListController, ToastQueue};
    use portal_sources::{FetchQuery, StubSource};
    use ratatui::{Terminal, backend::TestBackend};
    use std::sync::Arc;
    use time::macros::datetime;

    fn screen(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[tokio::test]
    async fn test_footer_shows_delete_in_progress() {
        let dir = tempfile::tempdir().unwrap();
        let prefs = PreferenceStore::open(dir.path().join("prefs.toml")).unwrap();
        let toasts = Arc::new(ToastQueue::default());
        let ctx = EvalContext::new(datetime!(2026-10-21 12:00 UTC));
        let view = CollectionView::new(10, ctx).unwrap();
        let controller = ListController::new(
            view,
            Arc::new(StubSource::new(vec![Ticket::new("T-01", "Sin acceso")])),
            toasts.clone(),
            FetchQuery::default(),
        );
        let mut app = App::new(controller, toasts, prefs).await;
        let mut terminal = Terminal::new(TestBackend::new(120, 20)).unwrap();

        app.start_delete();
        assert!(app.begin_delete());
        terminal.draw(|f| draw(f, &app)).unwrap();
        assert!(screen(&terminal).contains("⟳ Deleting Ticket T-01"));

        app.confirm_delete().await;
        terminal.draw(|f| draw(f, &app)).unwrap();
        let after = screen(&terminal);
        assert!(!after.contains('⟳'));
        assert!(after.contains("Ticket deleted"));
    }
}
