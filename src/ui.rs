use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};
use rps_duel::{
    choice::{Choice, Player},
    keymap,
    view::{Border, CardView, RoundStatus},
};

use crate::App;

const CARD_WIDTH: u16 = 21;
const CARD_HEIGHT: u16 = 10;

fn art(choice: Choice) -> &'static [&'static str] {
    match choice {
        Choice::Rock => &[
            "    _______      ",
            "---'   ____)     ",
            "      (_____)    ",
            "      (_____)    ",
            "      (____)     ",
            "---.__(___)      ",
        ],
        Choice::Paper => &[
            "     _______     ",
            "---'    ____)____",
            "           ______)",
            "          _______)",
            "         _______)",
            "---.__________)  ",
        ],
        Choice::Scissors => &[
            "    _______      ",
            "---'   ____)____ ",
            "          ______)",
            "       __________)",
            "      (____)     ",
            "---.__(___)      ",
        ],
    }
}

fn key_legend(player: Player) -> String {
    Choice::ALL
        .iter()
        .map(|&choice| format!("{}={}", keymap::key_for(player, choice), choice))
        .join("  ")
}

impl App {
    fn border_color(&self, card: &CardView) -> Color {
        match card.border {
            Border::Highlight => self.palette.highlight,
            Border::Neutral => self.palette.neutral,
        }
    }

    fn render_player(&self, player: Player, area: Rect, buf: &mut Buffer) {
        let panel = Block::default()
            .borders(Borders::ALL)
            .title(format!(" {player} "))
            .title_alignment(Alignment::Center)
            .style(Style::default().fg(Color::Gray));
        let inner = panel.inner(area);
        panel.render(area, buf);

        let [card_area] = Layout::horizontal([Constraint::Length(CARD_WIDTH)])
            .flex(Flex::Center)
            .areas(inner);
        let [card_area] = Layout::vertical([Constraint::Length(CARD_HEIGHT)])
            .flex(Flex::Center)
            .areas(card_area);

        match self.round.card(player) {
            Some(card) => {
                let color = self.border_color(&card);
                let mut border_style = Style::default().fg(color);
                if card.is_highlighted() {
                    border_style = border_style.add_modifier(Modifier::BOLD);
                }

                let block = Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(border_style)
                    .title(Line::from(card.choice.to_string()).centered());

                let lines = art(card.choice)
                    .iter()
                    .map(|l| Line::from(Span::raw(*l)))
                    .collect::<Vec<Line>>();

                Paragraph::new(lines)
                    .style(Style::default().fg(Color::White))
                    .block(block)
                    .render(card_area, buf);
            }
            None => {
                Paragraph::new(Span::styled(
                    "no card",
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center)
                .render(card_area, buf);
            }
        }
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(2)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Min(CARD_HEIGHT + 2),
                Constraint::Length(1), // score
                Constraint::Length(1), // status
                Constraint::Length(1), // padding
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Line::from(vec![
            Span::styled("ROCK  PAPER  SCISSORS", bold_style.fg(Color::Cyan)),
            Span::styled(
                format!("   {}ms window", self.game.tolerance_ms()),
                italic_style.fg(Color::Gray),
            ),
        ]))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        let halves = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[1]);
        self.render_player(Player::P1, halves[0], buf);
        self.render_player(Player::P2, halves[1], buf);

        Paragraph::new(Span::styled(self.score.to_string(), bold_style))
            .alignment(Alignment::Center)
            .render(chunks[2], buf);

        let status_style = match self.round.status {
            RoundStatus::Decided(outcome) if outcome.winner().is_some() => {
                Style::default().fg(self.palette.highlight)
            }
            _ => Style::default().fg(Color::Gray),
        };
        Paragraph::new(Span::styled(self.round.status.to_string(), status_style))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);

        let legend = format!(
            "P1 {}   |   P2 {}   |   (esc)ape",
            key_legend(Player::P1),
            key_legend(Player::P2)
        );
        Paragraph::new(Span::styled(legend, italic_style))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
    }
}
