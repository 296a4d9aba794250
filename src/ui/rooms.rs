use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Margin, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use typetrial::{
    leaderboard::{
        accuracy_bar_percent, leaderboard_rows, max_average_accuracy, rank_label, rank_players,
        Player, RankedPlayer,
    },
    passage::ROUND_COUNT,
    roster::{avatar_for, Lobby, Monitor, MonitoredPlayer, PingTier, RoundTier},
};

/// Rows the player leaderboard always shows, placeholders included
const LEADERBOARD_ROWS: usize = 5;
const LEADERBOARD_TOP: usize = 3;
const BAR_WIDTH: usize = 20;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn ping_color(tier: PingTier) -> Color {
    match tier {
        PingTier::Unknown => Color::DarkGray,
        PingTier::Low => Color::Green,
        PingTier::Medium => Color::Yellow,
        PingTier::High => Color::Red,
    }
}

fn round_color(tier: RoundTier) -> Color {
    match tier {
        RoundTier::Completed => Color::Green,
        RoundTier::FinalStretch => Color::LightGreen,
        RoundTier::Late => Color::Yellow,
        RoundTier::Early => Color::Cyan,
    }
}

/// Text bar filled to `percent` of `width` cells
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

pub fn render_lobby(lobby: &Lobby, host: bool, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(5)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(if host { 2 } else { 0 }),
            Constraint::Min(1),
        ])
        .split(area);

    let headline = if !host {
        "Waiting for host to start..."
    } else if lobby.is_started() {
        "Game running"
    } else {
        "Press enter to start the game"
    };
    Paragraph::new(Span::styled(headline, bold().fg(Color::Green)))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

    if host {
        let teams: Vec<Span> = lobby
            .team_counts()
            .into_iter()
            .map(|(team, count)| Span::styled(format!(" {team}: {count} "), bold()))
            .collect();
        Paragraph::new(Line::from(teams))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }

    if lobby.players().is_empty() {
        Paragraph::new(Span::styled("No players connected", dim()))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);
        return;
    }

    let rows = lobby.players().iter().map(|p| {
        Row::new(vec![
            Cell::from(p.id.to_string()),
            Cell::from(avatar_for(p.id)),
            Cell::from(Span::styled(p.name.clone(), bold())),
            Cell::from(p.team.clone()),
            Cell::from(Line::from(vec![
                Span::styled("● ", Style::default().fg(ping_color(p.ping_tier()))),
                Span::raw(format!("{} ms", p.ping_label())),
            ])),
        ])
    });

    Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
            Constraint::Length(10),
        ],
    )
    .header(Row::new(vec!["#", "", "Player", "Team", "Ping"]).style(dim()))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Players ({}) ", lobby.players().len())),
    )
    .render(chunks[2], buf);
}

fn monitored_row(player: &MonitoredPlayer) -> Row<'static> {
    Row::new(vec![
        Cell::from(avatar_for(player.id)),
        Cell::from(Span::styled(player.name.clone(), bold())),
        Cell::from(player.team.clone()),
        Cell::from(Span::styled(
            format!("Round {}/{}", player.current_round, ROUND_COUNT),
            Style::default().fg(round_color(player.round_tier())),
        )),
        Cell::from(format!("{} wpm", player.wpm)),
        Cell::from(format!("{}%", player.accuracy)),
        Cell::from(bar(player.progress_percent(), 14)),
    ])
}

pub fn render_monitor(monitor: &Monitor, area: Rect, buf: &mut Buffer) {
    let (completed, active) = monitor.split();
    let teams = monitor.team_progress();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(teams.len() as u16 + 2),
            Constraint::Min(3),
            Constraint::Length(completed.len().min(6) as u16 + 3),
        ])
        .split(area);

    Paragraph::new(Line::from(vec![
        Span::styled(format!("Total {}   ", monitor.players().len()), bold()),
        Span::styled(format!("In Progress {}   ", active.len()), bold().fg(Color::Yellow)),
        Span::styled(format!("Completed {}", completed.len()), bold().fg(Color::Green)),
    ]))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    let team_rows = teams.iter().map(|t| {
        Row::new(vec![
            Cell::from(Span::styled(t.team.clone(), bold())),
            Cell::from(format!("{}/{} completed", t.completed, t.total)),
            Cell::from(format!("Rd {}", t.avg_round_label())),
            Cell::from(bar(t.completed_percent(), BAR_WIDTH)),
        ])
    });
    Table::new(
        team_rows,
        [
            Constraint::Percentage(25),
            Constraint::Length(14),
            Constraint::Length(8),
            Constraint::Length(BAR_WIDTH as u16),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(" Team Progress "))
    .render(chunks[1], buf);

    let widths = [
        Constraint::Length(3),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Length(10),
        Constraint::Length(8),
        Constraint::Length(5),
        Constraint::Length(14),
    ];

    Table::new(active.iter().map(|p| monitored_row(p)), widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Active Players ({}) ", active.len())),
        )
        .render(chunks[2], buf);

    Table::new(completed.iter().map(|p| monitored_row(p)), widths)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Completed ({}) ", completed.len())),
        )
        .render(chunks[3], buf);
}

fn ranked_row(index: usize, row: &RankedPlayer, max_avg_accuracy: u32) -> Row<'static> {
    if row.is_placeholder {
        return Row::new(vec![
            Cell::from(rank_label(index)),
            Cell::from(""),
            Cell::from(row.name.clone()),
            Cell::from(row.team.clone()),
            Cell::from("--"),
            Cell::from("--"),
        ])
        .style(dim());
    }

    let percent = accuracy_bar_percent(row.avg_accuracy, max_avg_accuracy);
    let rank_style = if index < LEADERBOARD_TOP {
        bold().fg(Color::Yellow)
    } else {
        bold()
    };

    Row::new(vec![
        Cell::from(Span::styled(rank_label(index), rank_style)),
        Cell::from(avatar_for(row.id)),
        Cell::from(Span::styled(row.name.clone(), bold())),
        Cell::from(row.team.clone()),
        Cell::from(format!("{} wpm", row.avg_wpm)),
        Cell::from(Line::from(vec![
            Span::styled(
                bar(percent as f64, BAR_WIDTH),
                Style::default().fg(Color::Green),
            ),
            Span::raw(format!(" {}%", row.avg_accuracy)),
        ])),
    ])
}

fn render_ranked(
    rows: &[RankedPlayer],
    max_avg_accuracy: u32,
    title: &str,
    area: Rect,
    buf: &mut Buffer,
) {
    let table_rows = rows
        .iter()
        .enumerate()
        .map(|(i, row)| ranked_row(i, row, max_avg_accuracy));

    Table::new(
        table_rows,
        [
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Percentage(25),
            Constraint::Percentage(20),
            Constraint::Length(9),
            Constraint::Length(BAR_WIDTH as u16 + 6),
        ],
    )
    .header(Row::new(vec!["Rank", "", "Player", "Team", "Avg WPM", "Avg Accuracy"]).style(dim()))
    .block(Block::default().borders(Borders::ALL).title(title.to_string()))
    .render(area.inner(Margin::new(2, 1)), buf);
}

/// Top three plus placeholders up to five rows
pub fn render_leaderboard(players: &[Player], area: Rect, buf: &mut Buffer) {
    let prepared = leaderboard_rows(players, LEADERBOARD_TOP, LEADERBOARD_ROWS);
    render_ranked(
        &prepared.rows,
        prepared.max_avg_accuracy,
        " Leaderboard ",
        area,
        buf,
    );
}

/// Every player, ranked
pub fn render_host_leaderboard(players: &[Player], area: Rect, buf: &mut Buffer) {
    let rows = rank_players(players);
    let max_avg_accuracy = max_average_accuracy(&rows);
    render_ranked(&rows, max_avg_accuracy, " Final Results ", area, buf);
}
