use inarow::{BoardEngine, Clock, MenuAction, Player, Screen, ScreenController};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw<C: Clock>(frame: &mut Frame, controller: &ScreenController<C>) {
    let area = frame.size();
    match controller.screen() {
        Screen::Menu => frame.render_widget(
            MenuWidget {
                layout: &controller.config().layout,
                selected: controller.selected_index(),
                win_length: controller.config().win_length,
            },
            area,
        ),
        Screen::About => frame.render_widget(about(controller), area),
        Screen::Game => {
            let status = Rect { height: 1, ..area };
            frame.render_widget(Paragraph::new(status_line(controller)), status);
            frame.render_widget(
                BoardWidget {
                    engine: controller.engine(),
                    layout: &controller.config().layout,
                },
                area,
            );
        }
        Screen::Exit => {}
    }
}

fn player_style(player: Player) -> Style {
    match player {
        Player::PlayerA => Style::new().fg(Color::Red),
        Player::PlayerB => Style::new().fg(Color::Blue),
    }
}

// Writes `text` at absolute position (x, y), clipped to `area`.
fn put(buf: &mut Buffer, area: Rect, x: i64, y: i64, text: &str, style: Style) {
    let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y)) else {
        return;
    };
    if x < area.left() || x >= area.right() || y < area.top() || y >= area.bottom() {
        return;
    }
    buf.set_stringn(x, y, text, usize::from(area.right() - x), style);
}

struct MenuWidget<'a> {
    layout: &'a inarow::Layout,
    selected: usize,
    win_length: usize,
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title_x, title_y) = self.layout.menu_origin;
        put(
            buf,
            area,
            i64::from(title_x),
            i64::from(title_y) - 2,
            &format!("{} IN A ROW", self.win_length),
            Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        );

        let width = self.layout.menu_item_width as usize;
        for (idx, action) in MenuAction::ALL.into_iter().enumerate() {
            let (x, y) = self.layout.menu_item_origin(idx);
            let style = if idx == self.selected {
                Style::new()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::new()
            };
            let label = format!("{:^width$}", action.label(), width = width);
            put(buf, area, i64::from(x), i64::from(y), &label, style);
        }

        if area.height > 0 {
            put(
                buf,
                area,
                i64::from(area.left()),
                i64::from(area.bottom() - 1),
                "[↑/↓] Navigate  [Enter] Select  [Q] Quit  (or click an item)",
                Style::new().fg(Color::Gray),
            );
        }
    }
}

fn about<C: Clock>(controller: &ScreenController<C>) -> Paragraph<'static> {
    let config = controller.config();
    let text = vec![
        Line::from(format!(
            "A game for two players on a {} x {} board.",
            config.width, config.height
        )),
        Line::from(format!(
            "Take turns placing marks. The first to get {} in a row, \
             horizontally, vertically or diagonally, wins.",
            config.win_length
        )),
        Line::from(format!(
            "Click a cell to place your mark. A won game starts over after {} seconds.",
            config.auto_reset_delay.as_secs_f64()
        )),
        Line::from(""),
        Line::from("Press ESC to go back to the menu."),
    ];
    Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(" ABOUT ").borders(Borders::ALL))
}

fn status_line<C: Clock>(controller: &ScreenController<C>) -> Line<'static> {
    let engine = controller.engine();
    if let Some(winner) = engine.winner() {
        let remaining = controller
            .elapsed_since_win()
            .map(|elapsed| controller.config().auto_reset_delay.saturating_sub(elapsed))
            .unwrap_or_default();
        Line::from(vec![
            Span::styled(
                format!("Player {} won!", winner),
                player_style(winner).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                " New game in {}s",
                remaining.as_secs_f64().ceil() as u64
            )),
        ])
    } else if engine.board().is_full() {
        Line::from("Board full. Press ESC for the menu.")
    } else {
        let player = engine.current_player();
        Line::from(vec![
            Span::styled(format!("Player {}'s turn", player), player_style(player)),
            Span::styled("   [ESC] Menu", Style::new().fg(Color::Gray)),
        ])
    }
}

struct BoardWidget<'a> {
    engine: &'a BoardEngine,
    layout: &'a inarow::Layout,
}

impl Widget for BoardWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let board = self.engine.board();
        let winning_line = self.engine.winning_line();
        let last_move = self.engine.last_move();
        let cell_width = self.layout.cell_width as usize;

        for (row, cells) in board.rows().enumerate() {
            for (col, owner) in cells.iter().enumerate() {
                let (symbol, mut style) = match owner {
                    Some(player) => (player.symbol(), player_style(*player)),
                    None => ('·', Style::new().fg(Color::DarkGray)),
                };
                if winning_line.map_or(false, |line| line.contains(row, col)) {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                if last_move == Some((row, col)) {
                    style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
                }
                let text = format!("{:<width$}", symbol, width = cell_width);
                let (x, y) = self.layout.cell_origin(row, col);
                put(buf, area, x, y, &text, style);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use inarow::{Event, GameConfig, Key};
    use ratatui::backend::TestBackend;

    use super::*;

    fn render<C: Clock>(controller: &ScreenController<C>) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(40, 16)).unwrap();
        terminal.draw(|frame| draw(frame, controller)).unwrap();
        terminal.backend().buffer().clone()
    }

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.get(x, y).symbol().to_string())
            .collect()
    }

    #[test]
    fn menu_highlights_selection() {
        let mut controller = ScreenController::new(GameConfig::terminal());
        controller.dispatch(Event::KeyPressed(Key::Down));
        let buf = render(&controller);
        assert!(row_text(&buf, 1).contains("5 IN A ROW"));
        assert!(row_text(&buf, 3).contains("Start"));
        assert!(row_text(&buf, 5).contains("About"));
        assert!(row_text(&buf, 7).contains("Exit"));
        assert!(buf.get(4, 5).modifier.contains(Modifier::REVERSED));
        assert!(!buf.get(4, 3).modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn game_shows_marks_where_clicks_land() {
        let mut controller = ScreenController::new(GameConfig::terminal());
        controller.dispatch(Event::KeyPressed(Key::Enter));
        // Cell (0, 2) starts at column 4 of the first board row
        controller.dispatch(Event::PointerClicked { x: 5, y: 1 });
        let buf = render(&controller);
        assert!(row_text(&buf, 0).starts_with("Player Blue's turn"));
        assert_eq!(buf.get(4, 1).symbol(), "X");
        assert_eq!(buf.get(0, 1).symbol(), "·");
    }

    #[test]
    fn won_game_shows_winner() {
        let config = GameConfig {
            win_length: 2,
            ..GameConfig::terminal()
        };
        let mut controller = ScreenController::new(config);
        controller.dispatch(Event::KeyPressed(Key::Enter));
        for (x, y) in [(0, 1), (0, 2), (2, 1)] {
            controller.dispatch(Event::PointerClicked { x, y });
        }
        let buf = render(&controller);
        assert!(row_text(&buf, 0).starts_with("Player Red won!"));
        assert!(buf.get(0, 1).modifier.contains(Modifier::REVERSED));
        assert!(buf.get(2, 1).modifier.contains(Modifier::REVERSED));
        assert!(!buf.get(0, 2).modifier.contains(Modifier::REVERSED));
    }
}
