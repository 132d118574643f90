use ratatui::{
    layout::{Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::format::{format_amount, truncate};
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let expenses = app.budget.expenses();

    if expenses.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No expenses recorded yet", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :add <category> <amount> <description> (or press a)",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(" Expenses (0) ", theme::title_style()));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Category", "Description", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = expenses
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

            Row::new(vec![
                Cell::from(format!("  {}", expense.date_label())),
                Cell::from(expense.category.as_str()),
                Cell::from(truncate(&expense.description, 40)),
                Cell::from(Span::styled(
                    format_amount(expense.amount),
                    theme::expense_style(),
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Length(15),
        Constraint::Min(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Expenses ({}) | total {} ",
                    expenses.len(),
                    format_amount(app.budget.total_spent())
                ),
                theme::title_style(),
            )),
    );

    f.render_widget(table, area);
}
