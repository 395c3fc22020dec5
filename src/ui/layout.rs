use {
    super::app::App,
    super::renderer::{format_bytes, format_progress, format_z},
    crate::sink::format_alert_line,
    crate::stream_core::StreamStatus,
    ratatui::{
        layout::{Constraint, Direction, Layout as RatLayout, Rect},
        style::{Color, Modifier, Style},
        symbols::Marker,
        text::{Line, Span},
        widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph, Row, Table},
        Frame,
    },
};

/// Render the dashboard layout
pub fn render_layout(f: &mut Frame, area: Rect, app: &App) {
    let chunks = RatLayout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),  // Header
            Constraint::Min(10),    // Traffic chart
            Constraint::Length(10), // Alert feed
            Constraint::Length(3),  // Footer/Status
        ])
        .split(area);

    render_header(f, chunks[0]);
    render_traffic_chart(f, chunks[1], app);
    render_alert_feed(f, chunks[2], app);
    render_footer(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Block::default()
        .borders(Borders::ALL)
        .title("Anomaly Sentinel");

    let text = vec![
        Line::from(vec![
            Span::styled("Anomaly Sentinel", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(" - Real-Time Threat Detection"),
        ]),
        Line::from(vec![Span::raw(
            "[space] Pause/Resume  [+/-] Threshold  [[/]] Chunk size  [r] Restart  [q] Quit",
        )]),
    ];

    f.render_widget(Paragraph::new(text).block(header), area);
}

fn render_traffic_chart(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Network Traffic (bytes sent)");

    let window = match &app.last_output {
        Some(output) if !output.visible_window.is_empty() => &output.visible_window,
        _ => {
            let placeholder = Paragraph::new("Waiting for traffic...")
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            f.render_widget(placeholder, area);
            return;
        }
    };

    let traffic: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, o)| (i as f64, o.value()))
        .collect();
    let anomalies: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .filter(|(_, o)| o.is_anomaly)
        .map(|(i, o)| (i as f64, o.value()))
        .collect();

    let (y_min, y_max) = value_bounds(&traffic);
    let x_max = (traffic.len().saturating_sub(1) as f64).max(1.0);

    let datasets = vec![
        Dataset::default()
            .name("Traffic")
            .marker(Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&traffic),
        Dataset::default()
            .name("Anomaly")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
            .data(&anomalies),
    ];

    let first = window.first().map(|o| o.timestamp().format("%H:%M:%S").to_string());
    let last = window.last().map(|o| o.timestamp().format("%H:%M:%S").to_string());

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title("Time")
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(vec![
                    Span::raw(first.unwrap_or_default()),
                    Span::raw(last.unwrap_or_default()),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("Bytes")
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format!("{:.0}", y_min)),
                    Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
                    Span::raw(format!("{:.0}", y_max)),
                ]),
        );

    f.render_widget(chart, area);
}

/// Min/max of the plotted values with 5% padding
fn value_bounds(points: &[(f64, f64)]) -> (f64, f64) {
    let min = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let max = points.iter().map(|p| p.1).fold(f64::NEG_INFINITY, f64::max);

    if !min.is_finite() || !max.is_finite() {
        return (0.0, 1.0);
    }

    let pad = ((max - min) * 0.05).max(1.0);
    (min - pad, max + pad)
}

fn render_alert_feed(f: &mut Frame, area: Rect, app: &App) {
    let header = Row::new(vec!["Alert", "z-score"])
        .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .alert_feed
        .iter()
        .take(area.height.saturating_sub(3) as usize)
        .map(|alert| {
            Row::new(vec![format_alert_line(alert), format_z(alert.z_score)])
                .style(Style::default().fg(Color::Red))
        })
        .collect();

    let widths = [Constraint::Min(40), Constraint::Length(10)];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Detected Anomalies"));

    f.render_widget(table, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controller = app.controller();
    let (status_text, status_color) = match controller.status() {
        StreamStatus::Running if controller.is_exhausted() => ("EXHAUSTED", Color::Gray),
        StreamStatus::Running => (StreamStatus::Running.as_str(), Color::Green),
        StreamStatus::Paused => (StreamStatus::Paused.as_str(), Color::Yellow),
    };

    let stats = app
        .last_output
        .as_ref()
        .and_then(|o| o.stats)
        .map(|s| format!("μ={} σ={}", format_bytes(s.mean), format_bytes(s.std_dev)))
        .unwrap_or_else(|| "μ=- σ=-".to_string());

    let text = vec![Line::from(vec![
        Span::styled("Status: ", Style::default().fg(Color::Cyan)),
        Span::styled(status_text, Style::default().fg(status_color)),
        Span::raw(" | "),
        Span::styled("Revealed: ", Style::default().fg(Color::Cyan)),
        Span::raw(format_progress(controller.revealed_count(), controller.series().len())),
        Span::raw(" | "),
        Span::styled("Threshold: ", Style::default().fg(Color::Cyan)),
        Span::raw(format!("{:.1}", controller.threshold())),
        Span::raw(" | "),
        Span::styled("Chunk: ", Style::default().fg(Color::Cyan)),
        Span::raw(controller.chunk_size().to_string()),
        Span::raw(" | "),
        Span::raw(stats),
        Span::raw(" | "),
        Span::styled("Alerts: ", Style::default().fg(Color::Cyan)),
        Span::raw(app.total_alerts.to_string()),
    ])];

    let footer = Block::default().borders(Borders::ALL).title("Status");

    f.render_widget(Paragraph::new(text).block(footer), area);
}
