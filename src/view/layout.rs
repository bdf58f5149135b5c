//! Container layout rendering.
//!
//! Header, pull indicator, content (grid, list or split), sidebar, floating
//! action button and status bar. Geometry comes from `view_state`; this
//! module only paints.

use crate::model::FeedItem;
use crate::state::{LayoutContainer, RefreshSettled};
use crate::view::constants::{GRID_CARD_HEIGHT, HEADER_HEIGHT, STATUS_BAR_HEIGHT};
use crate::view::pull_indicator::PullIndicator;
use crate::view::styles::Palette;
use crate::view_state::composition::{
    constrain_width, fab_rect, grid_cells, list_rows, pad, sidebar_split, split_areas,
};
use crate::view_state::{CellMetrics, LayoutParams, ViewKind};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Everything a frame is drawn from.
pub struct Screen<'a> {
    /// Container state: mode, gesture, refresh.
    pub container: &'a LayoutContainer,
    /// Items, newest first.
    pub feed: &'a [FeedItem],
    /// Active sub-view.
    pub view: ViewKind,
    /// Selected item index.
    pub selected: Option<usize>,
    /// First visible item row.
    pub scroll_rows: usize,
    /// Cell to px conversion.
    pub metrics: CellMetrics,
    /// Styles.
    pub palette: &'a Palette,
    /// How the last refresh ended.
    pub last_refresh: Option<&'a RefreshSettled>,
    /// Whether the next refresh is set to fail.
    pub fail_next: bool,
}

/// Areas computed for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameAreas {
    /// Header bar.
    pub header: Rect,
    /// Sidebar, absent on mobile.
    pub sidebar: Option<Rect>,
    /// Pull indicator, absent while hidden.
    pub indicator: Option<Rect>,
    /// Content, below the indicator.
    pub content: Rect,
    /// Floating action button.
    pub fab: Rect,
    /// Status bar.
    pub status: Rect,
}

/// Compute the frame areas for `screen` within `area`.
pub fn calculate_areas(area: Rect, screen: &Screen<'_>) -> FrameAreas {
    let params = screen.container.params();

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(0),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    let (header, body, status) = (vertical[0], vertical[1], vertical[2]);

    let (sidebar, main) = sidebar_split(body, screen.container.sidebar(), &screen.metrics);
    let main = constrain_width(
        pad(main, params.padding, &screen.metrics),
        params.grid.max_width,
        &screen.metrics,
    );

    let indicator_rows = PullIndicator::from_tracker(screen.container.gesture(), &screen.metrics)
        .map_or(0, |indicator| indicator.rows().min(main.height));
    let (indicator, content) = if indicator_rows == 0 {
        (None, main)
    } else {
        (
            Some(Rect::new(main.x, main.y, main.width, indicator_rows)),
            Rect::new(
                main.x,
                main.y + indicator_rows,
                main.width,
                main.height - indicator_rows,
            ),
        )
    };

    FrameAreas {
        header,
        sidebar,
        indicator,
        content,
        fab: fab_rect(body, params.fab, &screen.metrics),
        status,
    }
}

/// Render the whole container.
pub fn render_layout(frame: &mut Frame, screen: &Screen<'_>) {
    let areas = calculate_areas(frame.area(), screen);
    let params = screen.container.params();

    render_header(frame, areas.header, screen);

    if let Some(sidebar) = areas.sidebar {
        render_sidebar(frame, sidebar, screen);
    }

    if let (Some(area), Some(indicator)) = (
        areas.indicator,
        PullIndicator::from_tracker(screen.container.gesture(), &screen.metrics),
    ) {
        indicator.render(area, frame.buffer_mut(), screen.palette);
    }

    match screen.view {
        ViewKind::Grid => render_grid(frame, areas.content, screen, &params),
        ViewKind::List => render_list(frame, areas.content, screen, &params),
        ViewKind::Split => render_split(frame, areas.content, screen, &params),
    }

    render_fab(frame, areas.fab, screen.palette);
    render_status_bar(frame, areas.status, screen);
}

fn render_header(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let facets = screen.container.facets();
    let text = format!(
        " pullpane │ {} │ {} │ {} ",
        facets.mode,
        facets.orientation.as_str(),
        screen.view
    );
    frame.render_widget(
        Paragraph::new(text).style(screen.palette.header),
        area,
    );
}

fn render_sidebar(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let lines: Vec<Line> = ViewKind::NAMES
        .iter()
        .map(|name| {
            if *name == screen.view.as_str() {
                Line::from(Span::styled(format!("▸ {name}"), screen.palette.selected))
            } else {
                Line::from(format!("  {name}"))
            }
        })
        .collect();

    let block = Block::default()
        .borders(Borders::RIGHT)
        .title("Views")
        .border_style(screen.palette.sidebar);
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn item_style(screen: &Screen<'_>, index: usize) -> Style {
    if screen.selected == Some(index) {
        screen.palette.selected
    } else {
        Style::default()
    }
}

fn render_grid(frame: &mut Frame, area: Rect, screen: &Screen<'_>, params: &LayoutParams) {
    let cells = grid_cells(
        area,
        params.grid.columns,
        GRID_CARD_HEIGHT,
        screen.feed.len(),
        screen.scroll_rows,
    );
    for (index, cell) in cells {
        let item = &screen.feed[index];
        let block = Block::default()
            .borders(Borders::ALL)
            .title(item.title.as_str())
            .border_style(item_style(screen, index));
        frame.render_widget(
            Paragraph::new(Span::styled(item.detail.as_str(), screen.palette.muted)).block(block),
            cell,
        );
    }
}

fn render_list(frame: &mut Frame, area: Rect, screen: &Screen<'_>, params: &LayoutParams) {
    let row_height = params.list.row_height();
    for (index, row) in list_rows(area, row_height, screen.feed.len(), screen.scroll_rows) {
        let item = &screen.feed[index];
        let mut lines = vec![Line::from(Span::styled(
            item.title.as_str(),
            item_style(screen, index),
        ))];
        if row_height > 1 {
            lines.push(Line::from(Span::styled(
                format!("  {}", item.detail),
                screen.palette.muted,
            )));
        }
        frame.render_widget(Paragraph::new(lines), row);
    }
}

fn render_split(frame: &mut Frame, area: Rect, screen: &Screen<'_>, params: &LayoutParams) {
    let areas = split_areas(area, params.split, screen.selected.is_some());

    if let Some(master) = areas.master {
        for (index, row) in list_rows(master, 1, screen.feed.len(), screen.scroll_rows) {
            let item = &screen.feed[index];
            frame.render_widget(
                Paragraph::new(Span::styled(item.title.as_str(), item_style(screen, index))),
                row,
            );
        }
    }

    if let Some(detail) = areas.detail {
        let selected = screen.selected.and_then(|index| screen.feed.get(index));
        let block = Block::default().borders(Borders::LEFT).title(
            selected.map_or("Detail", |item| item.title.as_str()),
        );
        let body = match selected {
            Some(item) => Paragraph::new(item.detail.as_str()),
            None => Paragraph::new(Span::styled("Nothing selected", screen.palette.muted)),
        };
        frame.render_widget(body.block(block), detail);
    }
}

fn render_fab(frame: &mut Frame, area: Rect, palette: &Palette) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    frame.render_widget(Clear, area);
    let label_row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
    frame.render_widget(Block::default().style(palette.fab), area);
    frame.render_widget(
        Paragraph::new("+")
            .alignment(Alignment::Center)
            .style(palette.fab),
        label_row,
    );
}

fn render_status_bar(frame: &mut Frame, area: Rect, screen: &Screen<'_>) {
    let container = screen.container;
    let mut spans = vec![Span::raw(format!(" {} items", screen.feed.len()))];

    let refresh = if container.is_refreshing() {
        Span::styled(" │ refreshing", screen.palette.refreshing)
    } else {
        // Failures are swallowed: the indicator just disappears.
        match screen.last_refresh {
            Some(RefreshSettled::Succeeded) => Span::raw(" │ refreshed"),
            Some(RefreshSettled::Failed(_)) | None => Span::raw(""),
        }
    };
    spans.push(refresh);

    let pull = if container.pull_to_refresh_enabled() {
        "on"
    } else {
        "off"
    };
    spans.push(Span::raw(format!(" │ pull:{pull}")));
    if screen.fail_next {
        spans.push(Span::styled(" │ next refresh fails", screen.palette.error));
    }
    spans.push(Span::styled(
        " │ j/k scroll v view p pull r refresh x fail q quit",
        screen.palette.muted,
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
