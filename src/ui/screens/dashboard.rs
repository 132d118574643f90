use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::budget::Suggestion;
use crate::format::{format_amount, format_percent};
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Length(3), // Utilization gauge
            Constraint::Min(8),    // Chart + suggestions
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_utilization(f, chunks[1], app);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    render_distribution_chart(f, bottom[0], app);
    render_suggestions(f, bottom[1], app);
}

fn titled_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let remaining = app.budget.remaining();
    let count = app.budget.expenses().len();

    render_card(
        f,
        cards[0],
        "Total Budget",
        app.budget.total_budget(),
        theme::ACCENT,
        None,
    );
    render_card(
        f,
        cards[1],
        "Total Expenses",
        app.budget.total_spent(),
        theme::RED,
        Some(format!("{count} expense{}", if count == 1 { "" } else { "s" })),
    );
    render_card(
        f,
        cards[2],
        "Remaining",
        remaining,
        if remaining >= Decimal::ZERO {
            theme::GREEN
        } else {
            theme::RED
        },
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let text = Paragraph::new(vec![
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle.unwrap_or_default(), theme::dim_style())),
    ])
    .centered()
    .block(titled_block(title));

    f.render_widget(text, area);
}

fn render_utilization(f: &mut Frame, area: Rect, app: &App) {
    let percent = app.budget.utilization_percent();
    let percent_f = percent.to_f64().unwrap_or(0.0);
    let color = theme::gauge_color(percent_f);

    let gauge = Gauge::default()
        .block(titled_block("Budget Used"))
        .gauge_style(Style::default().fg(color).bg(theme::SURFACE))
        .ratio((percent_f / 100.0).clamp(0.0, 1.0))
        .label(Span::styled(
            format_percent(percent),
            Style::default()
                .fg(theme::TEXT)
                .add_modifier(Modifier::BOLD),
        ))
        .use_unicode(true);

    f.render_widget(gauge, area);
}

fn render_distribution_chart(f: &mut Frame, area: Rect, app: &App) {
    let breakdown = app.budget.category_breakdown();
    if breakdown.is_empty() {
        let msg = Paragraph::new(Line::from(Span::styled(
            "No expenses yet. Add one with :add <category> <amount> <description>",
            theme::dim_style(),
        )))
        .centered()
        .wrap(Wrap { trim: true })
        .block(titled_block("Expense Distribution"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = breakdown
        .iter()
        .enumerate()
        .map(|(i, (category, amount))| {
            let color = theme::chart_color(i);
            // Heights in cents so sub-dollar expenses still show
            let cents = amount
                .checked_mul(Decimal::ONE_HUNDRED)
                .and_then(|c| c.to_u64())
                .unwrap_or(u64::MAX);
            Bar::default()
                .value(cents)
                .text_value(format_amount(*amount))
                .label(Line::from(category.as_str()))
                .style(Style::default().fg(color))
                .value_style(Style::default().fg(theme::HEADER_BG).bg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(titled_block("Expense Distribution"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(13)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_suggestions(f: &mut Frame, area: Rect, app: &App) {
    let suggestion = app.budget.suggestion();
    let headline_color = match suggestion {
        Suggestion::SetBudget => theme::TEXT_DIM,
        Suggestion::Overspent { .. } => theme::RED,
        Suggestion::NearLimit { .. } => theme::YELLOW,
        Suggestion::Healthy { .. } => theme::GREEN,
    };

    let mut lines = vec![Line::from(Span::styled(
        suggestion.headline(),
        Style::default()
            .fg(headline_color)
            .add_modifier(Modifier::BOLD),
    ))];
    lines.push(Line::from(""));
    lines.extend(
        suggestion
            .details()
            .into_iter()
            .map(|d| Line::from(Span::styled(d, theme::normal_style()))),
    );

    let border = if suggestion.is_warning() {
        headline_color
    } else {
        theme::OVERLAY
    };
    let para = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(titled_block("Suggestions").border_style(Style::default().fg(border)));
    f.render_widget(para, area);
}
