//! Terminal front end for the recommendation API.
//!
//! Mirrors the web page: a mood selector (list or wheel), a movie card with
//! feedback buttons, and a "spin again" loop. All state lives in
//! [`ViewState`]; this module only drives it from user input and API replies.

pub mod api;
pub mod state;
pub mod ui;

pub use api::{ApiClient, ClientError, Mood};
pub use state::{NextAction, ViewMode, ViewState};

use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::db::FeedbackType;
use crate::wheel;

/// One line of user input, interpreted for the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Mode(ViewMode),
    /// 1-based position in the mood list.
    Pick(usize),
    Spin,
    Feedback(FeedbackType),
    Next,
    Back,
    Unknown,
}

impl Command {
    pub fn parse(input: &str, movie_shown: bool) -> Command {
        let input = input.trim().to_ascii_lowercase();
        match input.as_str() {
            "q" | "quit" | "exit" => return Command::Quit,
            _ => {}
        }

        if movie_shown {
            return match input.as_str() {
                "n" | "next" | "again" => Command::Next,
                "b" | "back" => Command::Back,
                other => other
                    .parse::<FeedbackType>()
                    .map(Command::Feedback)
                    .unwrap_or(Command::Unknown),
            };
        }

        match input.as_str() {
            "g" | "grid" => Command::Mode(ViewMode::Grid),
            "w" | "wheel" => Command::Mode(ViewMode::Wheel),
            "s" | "spin" => Command::Spin,
            other => other
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .map(Command::Pick)
                .unwrap_or(Command::Unknown),
        }
    }
}

pub struct App {
    api: ApiClient,
    state: ViewState,
    animate: bool,
}

impl App {
    pub fn new(api: ApiClient, animate: bool) -> Self {
        Self {
            api,
            state: ViewState::new(),
            animate,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.state.set_view_mode(mode);
    }

    pub async fn load_moods(&mut self) {
        match self.api.list_moods().await {
            Ok(moods) => {
                info!("Loaded {} moods", moods.len());
                self.state.set_moods(moods);
            }
            Err(e) => {
                error!("Error loading moods: {}", e);
                println!("Failed to connect to the server.");
            }
        }
    }

    pub async fn select_mood(&mut self, mood_id: i64) {
        self.state.begin_request(mood_id);
        let _ = ui::render_loading(&mut io::stdout());

        let result = self.api.recommend(mood_id).await;
        if let Err(ref e) = result {
            error!("Error fetching recommendation: {}", e);
            println!("Could not find a movie for that mood right now.");
        }
        self.state.finish_request(result);
    }

    /// Spins the wheel and selects the winning mood.
    pub async fn spin(&mut self) {
        self.state.auto_spin = false;
        let count = self.state.moods.len();
        let Some(spin) = wheel::spin(&mut rand::rng(), count) else {
            println!("No moods on the wheel.");
            return;
        };

        if self.animate {
            let ticks = wheel::tick_count();
            for tick in 1..=ticks {
                let progress = f64::from(tick) / f64::from(ticks);
                let eased = 1.0 - (1.0 - progress).powi(3);
                let partial = (f64::from(spin.rotation) * eased).round() as u32;
                if let Some(index) = wheel::segment_index(partial, count) {
                    let _ = ui::render_tick(&mut io::stdout(), &self.state.moods[index]);
                }
                tokio::time::sleep(wheel::TICK_INTERVAL).await;
            }
        }

        let winner = self.state.moods[spin.index].clone();
        let _ = ui::render_winner(&mut io::stdout(), &winner);
        if self.animate {
            tokio::time::sleep(wheel::REVEAL_DELAY).await;
        }
        self.select_mood(winner.id).await;
    }

    pub async fn spin_again(&mut self) {
        match self.state.spin_again() {
            NextAction::Fetch(mood_id) => self.select_mood(mood_id).await,
            NextAction::Spin => self.spin().await,
            NextAction::Nothing => {}
        }
    }

    pub async fn feedback(&mut self, status: FeedbackType) {
        let Some(movie_id) = self.state.selected_movie.as_ref().map(|m| m.id) else {
            return;
        };
        match self.api.send_feedback(movie_id, status).await {
            Ok(_) => {
                println!("Thanks, noted as {}.", status);
                if status == FeedbackType::Bad {
                    self.spin_again().await;
                }
            }
            Err(e) => error!("Feedback failed: {}", e),
        }
    }

    fn render(&self) -> io::Result<()> {
        let mut out = io::stdout();
        ui::render_header(&mut out, &self.state)?;
        match self.state.selected_movie {
            Some(ref movie) => ui::render_movie_card(&mut out, movie)?,
            None => match self.state.view_mode {
                ViewMode::Grid => ui::render_mood_grid(&mut out, &self.state.moods)?,
                ViewMode::Wheel => ui::render_wheel(&mut out, &self.state.moods)?,
            },
        }
        write!(out, "> ")?;
        out.flush()
    }

    /// Reads commands from stdin until EOF or quit.
    pub async fn run_interactive(&mut self) -> Result<(), ClientError> {
        self.load_moods().await;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            if self.state.auto_spin {
                self.spin().await;
                continue;
            }

            let _ = self.render();
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(e) => {
                    error!("Failed to read input: {}", e);
                    break;
                }
            };

            let movie_shown = self.state.selected_movie.is_some();
            match Command::parse(&line, movie_shown) {
                Command::Quit => break,
                Command::Mode(mode) => self.set_view_mode(mode),
                Command::Pick(n) if self.state.view_mode == ViewMode::Grid => {
                    match self.state.moods.get(n - 1).map(|m| m.id) {
                        Some(id) => self.select_mood(id).await,
                        None => println!("No mood number {}.", n),
                    }
                }
                Command::Spin if self.state.view_mode == ViewMode::Wheel => self.spin().await,
                Command::Feedback(status) => self.feedback(status).await,
                Command::Next => self.spin_again().await,
                Command::Back => self.state.reset(),
                _ => println!("Unknown command."),
            }
        }

        Ok(())
    }
}
