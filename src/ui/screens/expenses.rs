use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::DATE_FORMAT;
use crate::ui::app::{App, InputMode};
use crate::ui::form::{FormField, FORM_HEIGHT};
use crate::ui::theme;
use crate::ui::util::{format_inr, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(FORM_HEIGHT), Constraint::Min(4)])
        .split(area);

    render_form(f, chunks[0], app);
    render_table(f, chunks[1], app);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let editing = app.input_mode == InputMode::Form;

    let lines: Vec<Line> = FormField::all()
        .iter()
        .map(|&field| {
            let focused = editing && app.form.focus == field;
            let value = match field {
                FormField::Category => format!("< {} >", app.form.value(field)),
                _ => app.form.value(field),
            };
            let marker = if focused { "> " } else { "  " };
            let value_style = if focused {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::normal_style()
            };
            Line::from(vec![
                Span::styled(marker, Style::default().fg(theme::ACCENT)),
                Span::styled(format!("{:<14}", field.label()), theme::dim_style()),
                Span::styled(value, value_style),
            ])
        })
        .collect();

    let border = if editing { theme::ACCENT } else { theme::OVERLAY };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(Span::styled(" Add Expense ", theme::section_title_style()));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let filter_label = app
        .filter
        .map(|(from, to)| {
            format!(
                "{} to {} ",
                from.format(DATE_FORMAT),
                to.format(DATE_FORMAT)
            )
        })
        .unwrap_or_default();
    let title = format!(
        " Expenses ({}) {}| {} ",
        app.expenses.len(),
        filter_label,
        format_inr(app.summary.total)
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(title, theme::section_title_style()));

    if app.expenses.is_empty() {
        let hint = if app.filter.is_some() {
            "No expenses in this date range. :reset shows everything"
        } else {
            "No expenses found. Press a to add one"
        };
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Date", "Amount", "Category", "Description"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .expenses
        .iter()
        .enumerate()
        .skip(app.expense_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, expense)| {
            let style = if i == app.expense_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            let amount = Cell::from(Span::styled(
                format_inr(expense.amount),
                if i == app.expense_index {
                    style
                } else {
                    theme::amount_style()
                },
            ));
            Row::new(vec![
                Cell::from(expense.timestamp_str()),
                amount,
                Cell::from(truncate(&expense.category, 18)),
                Cell::from(truncate(&expense.description, 40)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Length(18),
        Constraint::Min(20),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}
