use crate::api::MovieDto;

use super::api::Mood;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    /// Pick a mood from the list.
    #[default]
    Grid,
    /// Let the wheel pick one.
    Wheel,
}

/// What the caller should do after `spin_again`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextAction {
    Fetch(i64),
    Spin,
    Nothing,
}

/// Everything the front end shows, in one place.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub moods: Vec<Mood>,
    pub selected_movie: Option<MovieDto>,
    pub loading: bool,
    pub view_mode: ViewMode,
    pub current_mood_id: Option<i64>,
    pub auto_spin: bool,
}

impl ViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_moods(&mut self, moods: Vec<Mood>) {
        self.moods = moods;
    }

    /// The mode switch is only available on the selector screen.
    pub fn can_switch_mode(&self) -> bool {
        self.selected_movie.is_none() && !self.loading
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> bool {
        if !self.can_switch_mode() {
            return false;
        }
        self.view_mode = mode;
        true
    }

    pub fn begin_request(&mut self, mood_id: i64) {
        self.current_mood_id = Some(mood_id);
        self.loading = true;
        self.selected_movie = None;
        self.auto_spin = false;
    }

    pub fn finish_request<E>(&mut self, result: Result<MovieDto, E>) {
        match result {
            Ok(movie) => self.selected_movie = Some(movie),
            Err(_) => {
                self.current_mood_id = None;
                self.selected_movie = None;
            }
        }
        self.loading = false;
    }

    pub fn spin_again(&mut self) -> NextAction {
        self.selected_movie = None;
        match self.view_mode {
            ViewMode::Wheel => {
                self.auto_spin = true;
                NextAction::Spin
            }
            ViewMode::Grid => match self.current_mood_id {
                Some(id) => NextAction::Fetch(id),
                None => NextAction::Nothing,
            },
        }
    }

    pub fn reset(&mut self) {
        self.selected_movie = None;
        self.current_mood_id = None;
        self.auto_spin = false;
    }
}
