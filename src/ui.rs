pub mod charting;
pub mod rooms;
pub mod screen;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use typetrial::{
    clock::Clock,
    competition::Competition,
    events::StatusPills,
    practice::PracticeRoom,
    scoring::RoundResult,
    sequencer::OverlayPhase,
    session::Stage,
    time_series::ProgressSeries,
    typing::{active_progress_dot, TypingBuffer},
};

use crate::app::{App, View};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;
const PROGRESS_DOTS: usize = 7;

fn bold_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim_bold_style() -> Style {
    bold_style().add_modifier(Modifier::DIM)
}

fn italic_style() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // header
                Constraint::Min(1),    // body
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_header(&self.status, self.view, chunks[0], buf);
        screen::current_screen(self.view).render(self, chunks[1], buf);
        render_legend(self, chunks[2], buf);

        if let Some(selected) = self.dev_menu {
            render_dev_menu(selected, area, buf);
        }
    }
}

fn render_header(status: &StatusPills, view: View, area: Rect, buf: &mut Buffer) {
    let title = Span::styled(
        " TYPINGTEST.EXE ",
        bold_style().fg(Color::Black).bg(Color::Green),
    );
    Paragraph::new(Line::from(title)).render(area, buf);

    // the briefing has nothing running yet
    if view == View::Briefing {
        return;
    }

    let pill = |text: &str| Span::styled(format!(" {text} "), bold_style().fg(Color::Green));
    let pills = Line::from(vec![
        pill(&status.mode),
        Span::raw(" "),
        pill(&status.timer),
    ]);
    Paragraph::new(pills)
        .alignment(Alignment::Right)
        .render(area, buf);
}

fn render_legend(app: &App, area: Rect, buf: &mut Buffer) {
    let text = match app.view {
        View::Briefing => "(enter) begin practice / (f2) dev menu / (esc)ape",
        View::Practice => match &app.practice {
            Some(p) if p.is_complete() => "(enter) proceed / (r) practice more / (esc) back",
            _ => "(esc) back / (f2) dev menu",
        },
        View::MainTyping => match &app.competition {
            Some(c) if c.stage() == Stage::Summary => {
                "(enter) wait for results / (r)estart / (esc) back"
            }
            Some(c) if c.phase() == OverlayPhase::RoundResult && c.is_final_round() => {
                "(space) view summary"
            }
            Some(c) if c.phase() == OverlayPhase::RoundResult => "(space) next round",
            _ => "(esc) back / (f2) dev menu",
        },
        View::HostWaiting => "(enter) start game / (esc) back",
        View::HostMonitoring => "(esc) back to lobby",
        View::Waiting | View::Leaderboard | View::HostLeaderboard => "(esc) back / (f2) dev menu",
    };

    Paragraph::new(Span::styled(text, italic_style())).render(area, buf);
}

fn render_dev_menu(selected: usize, area: Rect, buf: &mut Buffer) {
    let lines: Vec<Line> = View::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| {
            let style = if i == selected {
                bold_style().fg(Color::Black).bg(Color::Green)
            } else {
                Style::default().fg(Color::Green)
            };
            Line::from(Span::styled(format!("{} {}", i + 1, view.label()), style))
        })
        .collect();

    let popup = centered_rect(40, lines.len() as u16 + 2, area);
    Clear.render(popup, buf);
    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Navigation "))
        .render(popup, buf);
}

/// Rectangle of `percent_x` width and fixed `height`, centered in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height.min(area.height)),
            Constraint::Fill(1),
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

pub(crate) fn render_briefing(area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let sections = [
        ("Rounds", "The competition consists of 7 timed rounds."),
        ("Test Cases", "Each round will feature a unique passage of text to type."),
        ("Time Limit", "Each round lasts for 60 seconds."),
        (
            "Evaluation",
            "Scores for accuracy and words per minute (WPM) will be automatically calculated and recorded after each round.",
        ),
        (
            "Scoring",
            "A participant's final score is the average of their scores across all 7 rounds.",
        ),
    ];

    let mut lines = vec![
        Line::from(Span::styled(
            "C:\\Users\\Welcome to Typing_Test",
            dim_bold_style(),
        )),
        Line::default(),
    ];
    for (heading, body) in sections {
        lines.push(Line::from(Span::styled(heading, bold_style().fg(Color::Green))));
        lines.push(Line::from(format!(">> {body}")));
        lines.push(Line::default());
    }

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" System Briefing "))
        .wrap(Wrap { trim: true })
        .render(chunks[0], buf);

    let podium = [
        ("Champion", "1st Place"),
        ("1st-Runner Up", "2nd Place"),
        ("2nd-Runner Up", "3rd Place"),
    ];
    let mut ranking = vec![Line::default()];
    for (badge, rank) in podium {
        ranking.push(Line::from(Span::styled(badge, bold_style().fg(Color::Yellow))));
        ranking.push(Line::from(Span::styled(rank, dim_bold_style())));
        ranking.push(Line::default());
    }

    Paragraph::new(ranking)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" RANKING "))
        .render(chunks[1], buf);
}

/// Styled spans for a passage and what has been typed over it
pub fn passage_spans(buffer: &TypingBuffer) -> Vec<Span<'static>> {
    let green_bold_style = bold_style().fg(Color::Green);
    let red_bold_style = bold_style().fg(Color::Red);
    let underlined_dim_bold_style = dim_bold_style().add_modifier(Modifier::UNDERLINED);

    let entries = buffer.entries();
    let cursor = buffer.cursor();

    let mut spans: Vec<Span> = buffer
        .passage()
        .iter()
        .take(entries.len())
        .zip(entries)
        .map(|(&expected, entry)| {
            let style = if entry.correct {
                green_bold_style
            } else {
                red_bold_style
            };
            Span::styled(entry.display_char(expected).to_string(), style)
        })
        .collect();

    if let Some(idx) = cursor {
        if let Some(c) = buffer.get_expected_char(idx) {
            spans.push(Span::styled(c.to_string(), underlined_dim_bold_style));
        }
        let rest: String = buffer.passage().iter().skip(idx + 1).collect();
        if !rest.is_empty() {
            spans.push(Span::styled(rest, dim_bold_style()));
        }
    }

    spans
}

/// Dots lit up to the current completion, joined by lines
pub fn progress_line(buffer: &TypingBuffer) -> Line<'static> {
    let active = active_progress_dot(buffer.completion_percentage(), PROGRESS_DOTS);
    let mut spans = Vec::with_capacity(PROGRESS_DOTS * 2);
    for i in 0..PROGRESS_DOTS {
        let lit = (i as i64) <= active;
        spans.push(Span::styled(
            if lit { "●" } else { "○" },
            if lit {
                bold_style().fg(Color::Green)
            } else {
                dim_bold_style()
            },
        ));
        if i + 1 < PROGRESS_DOTS {
            spans.push(Span::styled("───", dim_bold_style()));
        }
    }
    Line::from(spans)
}

/// Passage block with word count above and progress dots below
fn render_typing_area(buffer: &TypingBuffer, area: Rect, buf: &mut Buffer) {
    let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
    let passage: String = buffer.passage().iter().collect();
    let prompt_occupied_lines =
        ((passage.width() as f64 / max_chars_per_line as f64).ceil() as u16).max(1) + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(2), // word count
            Constraint::Length(prompt_occupied_lines),
            Constraint::Length(2), // progress dots
            Constraint::Fill(1),
        ])
        .split(area);

    Paragraph::new(Span::styled(
        buffer.word_count().to_string(),
        dim_bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[1], buf);

    Paragraph::new(Line::from(passage_spans(buffer)))
        .wrap(Wrap { trim: false })
        .render(chunks[2], buf);

    Paragraph::new(progress_line(buffer))
        .alignment(Alignment::Center)
        .render(chunks[3], buf);
}

pub(crate) fn render_practice(practice: &PracticeRoom, area: Rect, buf: &mut Buffer) {
    render_typing_area(practice.buffer(), area, buf);

    if practice.is_complete() {
        let card = centered_rect(50, 5, area);
        Clear.render(card, buf);
        Paragraph::new(vec![
            Line::from(Span::styled("Practice complete", bold_style().fg(Color::Green))),
            Line::default(),
            Line::from(Span::styled("Practice More  /  Proceed", italic_style())),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .render(card, buf);
    }
}

pub(crate) fn render_competition<C: Clock>(
    competition: &Competition<C>,
    area: Rect,
    buf: &mut Buffer,
) {
    if competition.stage() == Stage::Summary {
        render_summary(competition, area, buf);
        return;
    }

    render_typing_area(competition.buffer(), area, buf);

    let phase = competition.phase();
    if phase == OverlayPhase::RoundResult {
        if let Some(result) = competition.last_result() {
            render_round_result(
                competition.round_index(),
                result,
                competition.progress(),
                area,
                buf,
            );
        }
    } else if let Some(text) = phase.overlay_text(competition.round_index()) {
        let style = match phase {
            OverlayPhase::Countdown(_) => bold_style().fg(Color::Yellow),
            _ => bold_style().fg(Color::Green),
        };
        let card = centered_rect(40, 3, area);
        Clear.render(card, buf);
        Paragraph::new(Span::styled(text, style))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL))
            .render(card, buf);
    }
}

fn score_label(value: Option<u32>, has_data: bool, suffix: &str) -> String {
    match value {
        Some(v) if has_data => format!("{v}{suffix}"),
        _ => "--".to_string(),
    }
}

fn render_round_result(
    round_index: usize,
    result: &RoundResult,
    progress: &ProgressSeries,
    area: Rect,
    buf: &mut Buffer,
) {
    let card = centered_rect(80, area.height.saturating_sub(2).max(8), area);
    Clear.render(card, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" ROUND {} ", round_index + 1));
    let inner = block.inner(card);
    block.render(card, buf);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // metrics
            Constraint::Min(1),    // chart
            Constraint::Length(1), // footer
        ])
        .split(inner);

    Paragraph::new(Span::styled(
        format!(
            "wpm {}   accuracy {}",
            score_label(result.wpm, result.has_data, ""),
            score_label(result.accuracy, result.has_data, " %"),
        ),
        bold_style(),
    ))
    .alignment(Alignment::Center)
    .render(chunks[0], buf);

    if result.has_data {
        render_progress_chart(progress, chunks[1], buf);
    } else {
        Paragraph::new(Span::styled("No data to display", dim_bold_style()))
            .alignment(Alignment::Center)
            .render(chunks[1], buf);
    }

    Paragraph::new(Span::styled("Press Space to Proceed", italic_style()))
        .alignment(Alignment::Center)
        .render(chunks[2], buf);
}

fn render_progress_chart(progress: &ProgressSeries, area: Rect, buf: &mut Buffer) {
    let (last_round, ceiling) = charting::compute_chart_params(progress);
    let wpm = progress.wpm_coords();
    let accuracy = progress.accuracy_coords();

    let datasets = vec![
        Dataset::default()
            .name("WPM")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::Magenta))
            .graph_type(GraphType::Line)
            .data(&wpm),
        Dataset::default()
            .name("Accuracy %")
            .marker(symbols::Marker::Braille)
            .style(Style::default().fg(Color::Green))
            .graph_type(GraphType::Line)
            .data(&accuracy),
    ];

    Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("round")
                .bounds([1.0, last_round])
                .labels(vec![
                    Span::styled("1", bold_style()),
                    Span::styled(charting::format_label(last_round), bold_style()),
                ]),
        )
        .y_axis(
            Axis::default()
                .bounds([0.0, ceiling])
                .labels(vec![
                    Span::styled("0", bold_style()),
                    Span::styled(charting::format_label(ceiling), bold_style()),
                ]),
        )
        .render(area, buf);
}

fn render_summary<C: Clock>(competition: &Competition<C>, area: Rect, buf: &mut Buffer) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Length(28), Constraint::Min(1)])
        .split(area);

    let mut lines: Vec<Line> = competition
        .results()
        .iter()
        .enumerate()
        .map(|(i, result)| {
            Line::from(vec![
                Span::raw(format!("Round {:<10}", i + 1)),
                Span::styled(score_label(result.accuracy, true, "%"), bold_style()),
            ])
        })
        .collect();
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(format!("{:<16}", "Average"), bold_style()),
        Span::styled(
            format!("{}%", competition.average_accuracy()),
            bold_style().fg(Color::Green),
        ),
    ]));

    Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Round Summary "))
        .render(chunks[0], buf);

    render_progress_chart(competition.progress(), chunks[1], buf);
}
