use clap::{Parser, Subcommand};
use std::io;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use moodmovie::client::{self, ui, ApiClient, App, ClientError, ViewMode};
use moodmovie::db::FeedbackType;

#[derive(Parser, Debug)]
#[command(name = "moodmovie")]
#[command(about = "Find the perfect watch for your current vibe", long_about = None)]
struct Args {
    /// Base URL of the recommendation API
    #[arg(long, env = "MOODMOVIE_API_URL", default_value = client::api::DEFAULT_API_URL)]
    api_url: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available moods
    Moods,
    /// Get a recommendation for a mood
    Recommend {
        #[arg(short, long)]
        mood: i64,
    },
    /// Spin the mood wheel and get a recommendation for the winner
    Spin {
        /// Skip the spin animation
        #[arg(long)]
        fast: bool,
    },
    /// Rate a movie
    Feedback {
        #[arg(short, long)]
        movie: i64,
        #[arg(short, long)]
        status: FeedbackType,
    },
    /// Pick moods and rate movies interactively
    Interactive {
        /// Start with the wheel instead of the list
        #[arg(long)]
        wheel: bool,
        /// Skip the spin animation
        #[arg(long)]
        fast: bool,
    },
}

async fn run(args: Args) -> Result<(), ClientError> {
    let api = ApiClient::new(&args.api_url)?;
    let mut out = io::stdout();

    match args.command {
        Some(Command::Moods) => {
            let moods = api.list_moods().await?;
            let _ = ui::render_mood_grid(&mut out, &moods);
        }
        Some(Command::Recommend { mood }) => {
            let movie = api.recommend(mood).await?;
            let _ = ui::render_movie_card(&mut out, &movie);
        }
        Some(Command::Spin { fast }) => {
            let mut app = App::new(api, !fast);
            app.set_view_mode(ViewMode::Wheel);
            app.load_moods().await;
            app.spin().await;
            if let Some(ref movie) = app.state().selected_movie {
                let _ = ui::render_movie_card(&mut out, movie);
            }
        }
        Some(Command::Feedback { movie, status }) => {
            let result = api.send_feedback(movie, status).await?;
            println!("Recorded {} for movie {} (session {})", result.status, result.movie_id, result.session_id);
        }
        Some(Command::Interactive { wheel, fast }) => {
            let mut app = App::new(api, !fast);
            if wheel {
                app.set_view_mode(ViewMode::Wheel);
            }
            app.run_interactive().await?;
        }
        None => {
            let mut app = App::new(api, true);
            app.run_interactive().await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let default_filter = if args.debug { "moodmovie=debug" } else { "moodmovie=warn" };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    if let Err(e) = run(args).await {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
