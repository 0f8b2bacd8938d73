use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;

use crate::models::BudgetHealth;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_budget, format_inr, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(8),    // Category chart
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_category_chart(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let summary = &app.summary;
    let health = summary.budget_health();

    render_card(
        f,
        cards[0],
        "Total Expenses",
        format_inr(summary.total),
        theme::RED,
        format!("{} recorded", summary.count),
    );
    render_card(
        f,
        cards[1],
        "This Month",
        format_inr(summary.monthly_total),
        theme::YELLOW,
        format!("Budget: {}", format_budget(summary.budget)),
    );

    let (remaining, note) = match health {
        BudgetHealth::NotSet => ("Not Set".to_string(), "use :budget <amount>".to_string()),
        BudgetHealth::Over => (
            format_inr(summary.remaining),
            format!("over by {}", format_inr(summary.overspend())),
        ),
        BudgetHealth::Low => (format_inr(summary.remaining), "running low".to_string()),
        BudgetHealth::Healthy => (format_inr(summary.remaining), "on track".to_string()),
    };
    render_card(
        f,
        cards[2],
        "Budget Remaining",
        remaining,
        theme::health_color(health),
        note,
    );

    let top = summary.top_category.clone().unwrap_or_else(|| "N/A".into());
    let top_amount = summary
        .by_category
        .iter()
        .find(|(name, _)| Some(name) == summary.top_category.as_ref())
        .map(|(_, amt)| format_inr(*amt))
        .unwrap_or_default();
    render_card(f, cards[3], "Top Category", top, theme::ACCENT, top_amount);
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    value: String,
    color: Color,
    subtitle: String,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::section_title_style()));

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_category_chart(f: &mut Frame, area: Rect, app: &App) {
    let title = match app.filter {
        Some(_) => " Spending by Category (filtered) ",
        None => " Spending by Category ",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::section_title_style()));

    if app.summary.by_category.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
            Line::from(Span::styled(
                "Press a to add one, or :add <amount> <description>",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .summary
        .by_category
        .iter()
        .map(|(name, amt)| {
            let val = amt.round().to_u64().unwrap_or(0);
            Bar::default()
                .value(val)
                .label(Line::from(truncate(name, 10)))
                .style(Style::default().fg(theme::ACCENT))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(theme::ACCENT)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(1)
        .bar_style(Style::default().fg(theme::ACCENT))
        .value_style(Style::default().fg(theme::TEXT));

    f.render_widget(chart, area);
}
