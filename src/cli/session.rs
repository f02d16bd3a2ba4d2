use crate::navigation::NavigationStack;
use crossterm::style::Stylize;
use std::io::{self, Write};
use tic_tac_toe_rust::core::{
    game_state::GameState,
    location,
    move_list::{self, MoveListOrder},
    player::PlayerRotation,
    rule_helper,
};
use tracing::{debug, warn};

pub struct Session {
    players: PlayerRotation,
    game: GameState,
    order: MoveListOrder,
    navigation: NavigationStack,
    should_quit: bool,
}

impl Session {
    /// Starts from `initial_location` when given (falling back to a fresh game with
    /// `players` if it can't be decoded), and records the normalized query as
    /// the first navigation entry.
    pub fn new(
        players: PlayerRotation,
        initial_location: Option<&str>,
        order: MoveListOrder,
    ) -> Self {
        let game = match initial_location {
            Some(query) => location::restore_or_else(query, || GameState::new(players.clone())),
            None => GameState::new(players.clone()),
        };
        let initial_query = location::encode(&game).unwrap_or_else(|err| {
            warn!(%err, "could not encode initial location");
            String::new()
        });

        Self {
            players,
            game,
            order,
            navigation: NavigationStack::new(initial_query),
            should_quit: false,
        }
    }

    pub fn start(&mut self) {
        self.display();
        self.interpretation_loop();
    }

    fn interpretation_loop(&mut self) {
        let stdin = io::stdin();

        loop {
            print!("{}> ", self.game.status());
            let _ = io::stdout().flush();

            let mut line = String::new();
            match stdin.read_line(&mut line) {
                Ok(0) => return,
                Ok(_) => {
                    let line = line.trim_end_matches(['\r', '\n']).to_string();
                    for subline in line.split(';') {
                        self.interpret_directive(subline);
                        if self.should_quit {
                            return;
                        }
                    }
                }
                Err(err) => {
                    warn!(%err, "stdin read failed");
                    return;
                }
            }
        }
    }

    fn without_comments(&self, directive: &str) -> String {
        let mut working = directive.to_string();
        while let Some(start_idx) = working.find('(') {
            if let Some(end_rel) = working[start_idx..].find(')') {
                let end_idx = start_idx + end_rel;
                working.replace_range(start_idx..=end_idx, "");
            } else {
                working.truncate(start_idx);
                break;
            }
        }
        working
    }

    pub fn interpret_directive(&mut self, directive: &str) {
        const TAG_QUIT: &str = "q";
        const TAG_DISPLAY: &str = "d";
        const TAG_RESET: &str = "r";
        const TAG_REPEAT: &str = "x";
        const TAG_UNDO: &str = "u";
        const TAG_JUMP: &str = "j";
        const TAG_CELL: &str = "c";
        const TAG_LIST: &str = "l";
        const TAG_ORDER: &str = "o";
        const TAG_SHARE: &str = "s";
        const TAG_LOAD: &str = "load";
        const TAG_BACK: &str = "b";
        const TAG_FORWARD: &str = "f";

        let directive = self.without_comments(directive);
        let tokens = directive
            .split_whitespace()
            .map(|token| token.to_string())
            .collect::<Vec<_>>();
        let directive_tag = tokens
            .first()
            .map(|token| token.to_lowercase())
            .unwrap_or_default();

        if directive.trim().is_empty() {
            return;
        }

        if directive_tag == TAG_QUIT {
            self.should_quit = true;
        } else if directive_tag == TAG_DISPLAY {
            self.display();
        } else if directive_tag == TAG_RESET {
            println!("(RESET)");
            self.game = GameState::new(self.players.clone());
            self.commit();
            self.display();
        } else if directive_tag == TAG_UNDO {
            let current_move = self.game.current_move();
            if current_move == 0 {
                println!("  already at game start");
            } else {
                println!("(UNDO)");
                self.jump(current_move - 1);
            }
        } else if directive_tag == TAG_JUMP {
            match tokens.get(1).and_then(|token| token.parse::<usize>().ok()) {
                Some(move_index) => self.jump(move_index),
                None => println!("  directive {directive_tag} needs a move number"),
            }
        } else if directive_tag == TAG_CELL {
            let row_col = tokens
                .get(1)
                .zip(tokens.get(2))
                .and_then(|(row, col)| Some((row.parse::<usize>().ok()?, col.parse::<usize>().ok()?)))
                .and_then(|(row, col)| rule_helper::from_display_row_col(row, col));
            match row_col {
                Some(cell) => self.play_cell(cell),
                None => println!("  directive {directive_tag} needs row and col in 1..=3"),
            }
        } else if directive_tag == TAG_LIST {
            self.print_move_list();
        } else if directive_tag == TAG_ORDER {
            self.order = self.order.toggled();
            println!("  {}", self.order.label());
            self.print_move_list();
        } else if directive_tag == TAG_SHARE {
            println!(
                "  (entry {} of {})\n?{}",
                self.navigation.position() + 1,
                self.navigation.len(),
                self.navigation.current()
            );
        } else if directive_tag == TAG_LOAD {
            let query = tokens.iter().skip(1).cloned().collect::<String>();
            self.game = location::restore_or_else(&query, || GameState::new(self.players.clone()));
            self.commit();
            self.display();
        } else if directive_tag == TAG_BACK {
            let query = self.navigation.back().map(str::to_string);
            self.navigate(query);
        } else if directive_tag == TAG_FORWARD {
            let query = self.navigation.forward().map(str::to_string);
            self.navigate(query);
        } else if directive_tag == TAG_REPEAT {
            match tokens.get(1).and_then(|token| token.parse::<usize>().ok()) {
                Some(num_repeats) => {
                    let directive_text = tokens.iter().skip(2).cloned().collect::<Vec<_>>().join(" ");
                    println!("(REPEAT {num_repeats}: {directive_text})");
                    for _ in 0..num_repeats {
                        self.interpret_directive(&directive_text);
                    }
                }
                None => println!(
                    "  directive {directive_tag} needs repetition count and directive to repeat"
                ),
            }
        } else if directive_tag
            .chars()
            .next()
            .map(|ch| ch.is_ascii_digit())
            .unwrap_or(false)
        {
            self.play_tokens(&tokens);
        } else {
            let mut explanations = vec![
                "[1-9] [...]  | mark cells by number, left to right, top to bottom",
                "b       | navigate back",
                "c [row] [col] | mark cell at one-based row and col",
                "d       | display game",
                "f       | navigate forward",
                "j [int] | jump to move number",
                "l       | list moves",
                "load [query] | restore game from a location query",
                "o       | toggle move list order",
                "q       | quit",
                "r       | reset game",
                "s       | share: print location query",
                "u       | step back one move",
                "x [n] [cmd] | repeat [cmd] n times",
            ];
            explanations.sort();
            println!("  unrecognized directive '{directive}'");
            for explanation in explanations {
                println!("  {explanation}");
            }
        }
    }

    fn play_tokens(&mut self, tokens: &[String]) {
        for token in tokens {
            match token.parse::<usize>() {
                Ok(cell_number) if (1..=rule_helper::NUM_CELLS).contains(&cell_number) => {
                    self.play_cell(cell_number - 1);
                }
                _ => {
                    println!("  '{token}' is not a cell number 1-{}", rule_helper::NUM_CELLS);
                    return;
                }
            }
        }
    }

    fn play_cell(&mut self, cell: usize) {
        if self.game.apply_move(cell) {
            self.commit();
            self.display();
        } else {
            debug!(cell, "move ignored");
        }
    }

    fn jump(&mut self, move_index: usize) {
        match self.game.jump_to(move_index) {
            Ok(()) => {
                self.commit();
                self.display();
            }
            Err(err) => println!("  {err}"),
        }
    }

    fn navigate(&mut self, query: Option<String>) {
        let Some(query) = query else {
            println!("  no further navigation entries");
            return;
        };
        self.game = location::restore_or_else(&query, || GameState::new(self.players.clone()));
        self.display();
    }

    /// Records the current game as a new navigation entry. An encode failure
    /// is logged and the game keeps its new state.
    fn commit(&mut self) {
        match location::encode(&self.game) {
            Ok(query) => self.navigation.push(query),
            Err(err) => warn!(%err, "could not encode location"),
        }
    }

    fn display(&self) {
        println!("{}", self.game.status());
        println!("{}", self.render_board());
    }

    fn render_board(&self) -> String {
        let board = self.game.current_board();
        let win = self.game.win();

        (0..rule_helper::BOARD_SIDE)
            .map(|row| {
                (0..rule_helper::BOARD_SIDE)
                    .map(|col| {
                        let cell = row * rule_helper::BOARD_SIDE + col;
                        match board.cell(cell) {
                            Some(symbol) if win.as_ref().is_some_and(|win| win.contains_cell(cell)) => {
                                symbol.as_str().bold().green().to_string()
                            }
                            Some(symbol) => symbol.to_string(),
                            None => (cell + 1).to_string().dark_grey().to_string(),
                        }
                    })
                    .collect::<Vec<_>>()
                    .join("|")
            })
            .collect::<Vec<_>>()
            .join("\n-+-+-\n")
    }

    fn print_move_list(&self) {
        println!("  {}", self.order.label());
        for desc in move_list::describe_moves(self.game.history(), self.game.current_move(), self.order) {
            let marker = if desc.is_current { " *" } else { "" };
            println!("  {:>2}. {desc}{marker}", desc.move_index);
        }
    }
}
