use std::io::{self, Write};

use crate::api::MovieDto;
use crate::wheel;

use super::api::Mood;
use super::state::{ViewMode, ViewState};

pub const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w500";
pub const POSTER_PLACEHOLDER: &str = "https://via.placeholder.com/500x750?text=No+Poster";
pub const LOADING_TEXT: &str = "SCANNING THE ARCHIVES...";
pub const DEFAULT_DESCRIPTION: &str = "Discover movies matching this vibe.";

pub fn poster_url(movie: &MovieDto) -> String {
    match movie.poster_path.as_deref() {
        Some(path) if !path.is_empty() => format!("{}{}", POSTER_BASE, path),
        _ => POSTER_PLACEHOLDER.to_string(),
    }
}

pub fn watch_url(movie: &MovieDto) -> String {
    let id = movie.tmdb_movie_id.unwrap_or(movie.id);
    format!("https://www.themoviedb.org/movie/{}/watch", id)
}

pub fn format_rating(rating: f64) -> String {
    format!("★ {:.1}", rating)
}

pub fn render_header<W: Write>(w: &mut W, state: &ViewState) -> io::Result<()> {
    writeln!(w, "MOODMOVIE")?;
    writeln!(w, "Find the perfect watch for your current vibe.")?;
    if state.can_switch_mode() {
        let (grid, wheel) = match state.view_mode {
            ViewMode::Grid => ("[Quick Select]", " Surprise Me "),
            ViewMode::Wheel => (" Quick Select ", "[Surprise Me]"),
        };
        writeln!(w, "  {} {}   (g/w to switch)", grid, wheel)?;
    }
    writeln!(w)
}

pub fn render_mood_grid<W: Write>(w: &mut W, moods: &[Mood]) -> io::Result<()> {
    if moods.is_empty() {
        return writeln!(w, "No moods found. Add some to the server configuration!");
    }
    writeln!(w, "How are you feeling?")?;
    for (i, mood) in moods.iter().enumerate() {
        let description = mood
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or(DEFAULT_DESCRIPTION);
        writeln!(w, "  {:>2}. {:<16} {}", i + 1, mood.name, description)?;
    }
    writeln!(w, "Pick a number, or q to quit.")
}

pub fn render_wheel<W: Write>(w: &mut W, moods: &[Mood]) -> io::Result<()> {
    if moods.is_empty() {
        return writeln!(w, "No moods on the wheel.");
    }
    for (i, mood) in moods.iter().enumerate() {
        let (start, end) = wheel::segment_bounds(i, moods.len());
        writeln!(w, "  {:>6.1}°-{:>6.1}°  {}", start, end, mood.name.to_uppercase())?;
    }
    writeln!(w, "Press s to SPIN THE WHEEL, or q to quit.")
}

pub fn render_tick<W: Write>(w: &mut W, mood: &Mood) -> io::Result<()> {
    write!(w, "\r  ▼ {:<24}", mood.name.to_uppercase())?;
    w.flush()
}

pub fn render_winner<W: Write>(w: &mut W, mood: &Mood) -> io::Result<()> {
    writeln!(w, "\r  ★ {} ★{:<16}", mood.name.to_uppercase(), "")
}

pub fn render_loading<W: Write>(w: &mut W) -> io::Result<()> {
    writeln!(w, "{}", LOADING_TEXT)
}

pub fn render_movie_card<W: Write>(w: &mut W, movie: &MovieDto) -> io::Result<()> {
    writeln!(w, "┌──────────────────────────────────────────")?;
    writeln!(w, "│ {}", movie.title.to_uppercase())?;
    writeln!(w, "│ {}", format_rating(movie.vote_average))?;
    writeln!(w, "│ Poster: {}", poster_url(movie))?;
    if let Some(overview) = movie.overview.as_deref().filter(|o| !o.is_empty()) {
        writeln!(w, "│")?;
        for line in wrap(overview, 60) {
            writeln!(w, "│ {}", line)?;
        }
    }
    writeln!(w, "│")?;
    writeln!(w, "│ Where to watch: {}", watch_url(movie))?;
    writeln!(w, "└──────────────────────────────────────────")?;
    writeln!(w, "bad / meh / good to rate, n to spin again, b for back to moods")
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(poster: Option<&str>) -> MovieDto {
        MovieDto {
            id: 4,
            tmdb_movie_id: Some(550),
            title: "Fight Club".to_string(),
            overview: Some("An insomniac office worker and a soap maker form a club.".to_string()),
            poster_path: poster.map(str::to_string),
            vote_average: 8.43,
        }
    }

    fn render<F: FnOnce(&mut Vec<u8>) -> io::Result<()>>(f: F) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_urls() {
        assert_eq!(poster_url(&movie(Some("/p.jpg"))), "https://image.tmdb.org/t/p/w500/p.jpg");
        assert_eq!(poster_url(&movie(None)), POSTER_PLACEHOLDER);
        assert_eq!(watch_url(&movie(None)), "https://www.themoviedb.org/movie/550/watch");
        assert_eq!(format_rating(8.43), "★ 8.4");
    }

    #[test]
    fn test_mood_grid() {
        let moods = vec![
            Mood { id: 1, name: "Happy".to_string(), description: Some("Fun".to_string()) },
            Mood { id: 2, name: "Sad".to_string(), description: None },
        ];
        let out = render(|w| render_mood_grid(w, &moods));
        assert!(out.contains("1. Happy"));
        assert!(out.contains("Fun"));
        assert!(out.contains(DEFAULT_DESCRIPTION));

        let empty = render(|w| render_mood_grid(w, &[]));
        assert!(empty.starts_with("No moods found"));
    }

    #[test]
    fn test_movie_card() {
        let out = render(|w| render_movie_card(w, &movie(Some("/p.jpg"))));
        assert!(out.contains("FIGHT CLUB"));
        assert!(out.contains("★ 8.4"));
        assert!(out.contains("/movie/550/watch"));
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
        assert!(wrap("", 10).is_empty());
    }
}
