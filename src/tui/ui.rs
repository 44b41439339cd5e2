//! Ratatui rendering of the board, dialogs and statistics.

use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table},
};
use tracing::{instrument, trace};

use super::{BoardView, CellView, DialogView, Renderer};
use crate::error::{GameError, GameErrorKind, GameResult};
use crate::stats::StatsReport;

const PLAYER_PANEL_WIDTH: u16 = 28;

/// Renderer drawing to a ratatui terminal.
pub struct TerminalRenderer<B: Backend> {
    terminal: Terminal<B>,
    last_board: Option<BoardView>,
}

impl<B: Backend> TerminalRenderer<B> {
    /// Wraps an initialised terminal.
    pub fn new(terminal: Terminal<B>) -> Self {
        Self {
            terminal,
            last_board: None,
        }
    }

    /// Gives the terminal back, e.g. to restore the screen on exit.
    pub fn terminal_mut(&mut self) -> &mut Terminal<B> {
        &mut self.terminal
    }

    /// Borrows the terminal.
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

fn render_error(e: impl std::fmt::Display) -> GameError {
    GameError::new(GameErrorKind::Render(e.to_string()))
}

impl<B> Renderer for TerminalRenderer<B>
where
    B: Backend,
    B::Error: std::fmt::Display,
{
    #[instrument(skip(self, view), fields(size = view.size, turn = view.turn))]
    fn draw_board(&mut self, view: &BoardView) -> GameResult<()> {
        self.terminal
            .draw(|frame| draw_game(frame, view))
            .map_err(render_error)?;
        self.last_board = Some(view.clone());
        Ok(())
    }

    #[instrument(skip(self, view), fields(highlighted = view.highlighted))]
    fn draw_dialog(&mut self, view: &DialogView<'_>) -> GameResult<()> {
        let board = self.last_board.as_ref();
        self.terminal
            .draw(|frame| {
                if let Some(board) = board {
                    draw_game(frame, board);
                }
                draw_dialog_overlay(frame, view);
            })
            .map_err(render_error)?;
        Ok(())
    }

    #[instrument(skip(self, report))]
    fn draw_statistics(&mut self, report: &StatsReport) -> GameResult<()> {
        self.terminal
            .draw(|frame| draw_stats(frame, report))
            .map_err(render_error)?;
        Ok(())
    }
}

fn draw_game(frame: &mut Frame, view: &BoardView) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Board and players
            Constraint::Length(3), // Help
        ])
        .split(area);

    let title = Paragraph::new(view.title.as_str())
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(PLAYER_PANEL_WIDTH)])
        .split(chunks[1]);

    let lines = board_lines(view);
    let board_height = lines.len() as u16;
    let board_width = (view.size * 4 + 1) as u16;
    let board = Paragraph::new(lines);
    frame.render_widget(board, center_rect(body[0], board_width, board_height));

    let players = Paragraph::new(player_lines(view))
        .block(Block::default().borders(Borders::ALL).title("Players"));
    frame.render_widget(players, body[1]);

    let help = if view.shows_cursor() {
        "←↑↓→: Move | Enter: Place | Esc: Pause"
    } else {
        "Press any key"
    };
    let help = Paragraph::new(help)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[2]);
}

/// Box-drawn grid, one text row per board row plus separators.
fn board_lines(view: &BoardView) -> Vec<Line<'static>> {
    let border_style = Style::default().fg(Color::DarkGray);
    let border = |left: &str, joint: &str, right: &str| {
        let mut text = String::from(left);
        for y in 0..view.size {
            if y > 0 {
                text.push_str(joint);
            }
            text.push_str("───");
        }
        text.push_str(right);
        Line::from(Span::styled(text, border_style))
    };

    let mut lines = Vec::with_capacity(view.size * 2 + 1);
    for x in 0..view.size {
        lines.push(if x == 0 {
            border("┌", "┬", "┐")
        } else {
            border("├", "┼", "┤")
        });

        let mut spans = vec![Span::styled("│", border_style)];
        for y in 0..view.size {
            let cell = view.cell(x, y).copied().unwrap_or(CellView {
                symbol: None,
                cursor: false,
            });
            spans.push(cell_span(cell));
            spans.push(Span::styled("│", border_style));
        }
        lines.push(Line::from(spans));
    }
    lines.push(border("└", "┴", "┘"));
    lines
}

fn cell_span(cell: CellView) -> Span<'static> {
    let symbol = cell.symbol.unwrap_or(' ');
    let base = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let style = if cell.cursor {
        base.bg(Color::White).fg(Color::Black)
    } else {
        base
    };
    Span::styled(format!(" {symbol} "), style)
}

fn player_lines(view: &BoardView) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (seat, info) in view.players.iter().enumerate() {
        let current = seat == view.turn;
        let marker = if current { "▶" } else { " " };
        let style = if current {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        lines.push(Line::from(Span::styled(
            format!("{marker} {} {}", info.symbol(), info.name()),
            style,
        )));
        if current {
            let hint = if *info.is_human() {
                "Your turn"
            } else {
                "AI thinking..."
            };
            lines.push(Line::from(Span::styled(
                format!("    {hint}"),
                Style::default().fg(Color::DarkGray),
            )));
        }
    }
    lines
}

fn draw_dialog_overlay(frame: &mut Frame, view: &DialogView<'_>) {
    let mut lines: Vec<Line> = view
        .messages
        .iter()
        .map(|message| Line::from(message.as_str()))
        .collect();
    lines.push(Line::from(""));

    let mut buttons = Vec::new();
    for (index, button) in view.buttons.iter().enumerate() {
        if index > 0 {
            buttons.push(Span::raw("   "));
        }
        let style = if index == view.highlighted {
            Style::default().fg(Color::Black).bg(Color::Yellow)
        } else {
            Style::default().fg(Color::Yellow)
        };
        buttons.push(Span::styled(
            format!("[{}] {}", button.shortcut(), button.label()),
            style,
        ));
    }
    let buttons_width: usize = buttons.iter().map(|span| span.width()).sum();
    lines.push(Line::from(buttons));

    let text_width = view
        .messages
        .iter()
        .map(|message| message.chars().count())
        .chain(std::iter::once(buttons_width))
        .max()
        .unwrap_or(0);
    let width = (text_width + 4) as u16;
    let height = (lines.len() + 2) as u16;
    trace!(width, height, "Dialog size");

    let area = center_rect(frame.area(), width, height);
    let dialog = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(Clear, area);
    frame.render_widget(dialog, area);
}

fn draw_stats(frame: &mut Frame, report: &StatsReport) {
    let area = frame.area();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(area);

    let title = Paragraph::new("Game Statistics")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    let header = Row::new(vec![Cell::from(""), Cell::from("Player"), Cell::from("Wins")])
        .style(Style::default().add_modifier(Modifier::BOLD));
    let rows: Vec<Row> = report
        .scores()
        .iter()
        .map(|score| {
            Row::new(vec![
                Cell::from(score.symbol().to_string()),
                Cell::from(score.name().clone()),
                Cell::from(score.wins().to_string()),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [Constraint::Length(3), Constraint::Min(12), Constraint::Length(6)],
    )
    .header(header)
    .block(Block::default().borders(Borders::ALL).title("Scores"));
    frame.render_widget(table, chunks[1]);

    let summary = Paragraph::new(format!(
        "Rounds: {}   Draws: {}",
        report.rounds(),
        report.draws()
    ))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(summary, chunks[2]);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
