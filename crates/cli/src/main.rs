use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use classifier::{aggregate_reviews, AggregateLabel, EmotionClassifier, EmotionLexicon};
use colored::Colorize;
use engine::{Recommendation, RecommendationEngine};
use knowledge_store::{EmotionEntry, EmotionQueries, MovieRecord, MovieStore};
use rayon::prelude::*;
use serde::Deserialize;
use state_parser::{acknowledgment, EmotionStateParser, QueryType};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// MoodRecs - emotion-based movie recommendations
#[derive(Parser)]
#[command(name = "mood-recs")]
#[command(about = "Movie recommendations from an emotional query", long_about = None)]
struct Cli {
    /// Path to the knowledge-base snapshot (JSON movie records)
    #[arg(short, long, default_value = "data/movie-emotions.json")]
    knowledge_base: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat: describe your mood, get recommendations
    Chat,

    /// Recommend movies for an emotion you are feeling now
    Recommend {
        /// Emotion category (joy, sadness, fear, anger, disgust, surprise, trust)
        #[arg(long)]
        emotion: String,

        /// How strongly you feel it, 0.0-1.0
        #[arg(long, default_value = "0.5")]
        intensity: f64,

        /// Number of recommendations to return
        #[arg(long, default_value = "10")]
        limit: usize,
    },

    /// Build a mood journey from one emotion to another
    Journey {
        /// Starting emotion
        #[arg(long)]
        from: String,

        /// Target emotion
        #[arg(long)]
        to: String,

        /// Number of movies in the journey
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Show every emotion stored for one movie
    Movie {
        /// Movie id (as stored in the knowledge base)
        #[arg(long)]
        id: String,
    },

    /// List the full movie catalog
    Catalog,

    /// Classify a text span and print its emotion distribution
    Analyze {
        /// Text to classify
        #[arg(long)]
        text: String,
    },

    /// Build the knowledge-base snapshot from a raw review corpus
    BuildKb {
        /// Input JSON: movies with their review texts
        #[arg(long)]
        reviews: PathBuf,

        /// Output snapshot path
        #[arg(long, default_value = "data/movie-emotions.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Chat => handle_chat(&cli.knowledge_base),
        Commands::Recommend {
            emotion,
            intensity,
            limit,
        } => {
            let engine = load_engine(&cli.knowledge_base)?;
            let movies = engine.recommend_current_state(&emotion, intensity, limit)?;
            if movies.is_empty() {
                println!("No movies found for '{emotion}'.");
            } else {
                print_recommendations(&movies);
            }
            Ok(())
        }
        Commands::Journey { from, to, limit } => {
            let engine = load_engine(&cli.knowledge_base)?;
            let movies = engine.recommend_emotion_journey(&from, &to, limit)?;
            if movies.is_empty() {
                println!("No journey possible between those emotions.");
            } else {
                println!(
                    "{}",
                    format!("A journey from {} to {}:", from, to).bold().blue()
                );
                print_recommendations(&movies);
            }
            Ok(())
        }
        Commands::Movie { id } => handle_movie(&cli.knowledge_base, &id),
        Commands::Catalog => handle_catalog(&cli.knowledge_base),
        Commands::Analyze { text } => {
            handle_analyze(&text);
            Ok(())
        }
        Commands::BuildKb { reviews, output } => handle_build_kb(&reviews, &output),
    }
}

fn load_engine(path: &Path) -> Result<RecommendationEngine<MovieStore>> {
    let store = MovieStore::load_json(path)
        .with_context(|| format!("failed to load knowledge base from {}", path.display()))?;
    Ok(RecommendationEngine::new(Arc::new(store)))
}

/// Interactive loop: parse the utterance, dispatch on the detected query
/// type, render the acknowledgment and the top recommendations.
fn handle_chat(knowledge_base: &Path) -> Result<()> {
    let engine = load_engine(knowledge_base)?;
    let parser = EmotionStateParser::default();

    println!(
        "{}",
        "Tell me how you feel (or what you want to feel). Type 'quit' to leave."
            .bold()
            .blue()
    );

    let stdin = std::io::stdin();
    loop {
        print!("{} ", "you>".green());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("Enjoy the movie!");
            break;
        }

        let state = parser.parse(line);
        println!("{}", acknowledgment(&state));

        let movies = match (state.query_type, state.emotion) {
            (QueryType::Neutral, _) | (_, None) => engine.recommend_neutral(5)?,
            (QueryType::CurrentState, Some(emotion)) => {
                engine.recommend_current_state(emotion.as_str(), state.intensity, 5)?
            }
            (QueryType::DesiredState, Some(emotion)) => {
                engine.recommend_desired_state(emotion.as_str(), 5)?
            }
        };

        if movies.is_empty() {
            println!("Sorry, I couldn't find any movies matching that emotion.");
        } else {
            print_recommendations(&movies);
        }
        println!();
    }
    Ok(())
}

fn handle_movie(knowledge_base: &Path, movie_id: &str) -> Result<()> {
    let store = MovieStore::load_json(knowledge_base)
        .with_context(|| format!("failed to load knowledge base from {}", knowledge_base.display()))?;

    let emotions = store.emotions_for_movie(movie_id)?;
    match emotions.title {
        Some(title) => {
            println!("{}", title.bold().blue());
            for record in &emotions.emotions {
                println!(
                    "  {} {}: intensity {:.2}, confidence {:.2}",
                    "•".green(),
                    record.emotion,
                    record.intensity,
                    record.confidence
                );
            }
        }
        None => println!("No movie with id {movie_id} in the knowledge base."),
    }
    Ok(())
}

fn handle_catalog(knowledge_base: &Path) -> Result<()> {
    let store = MovieStore::load_json(knowledge_base)
        .with_context(|| format!("failed to load knowledge base from {}", knowledge_base.display()))?;

    let movies = store.all_movies()?;
    println!("{}", format!("{} movies in the catalog:", movies.len()).bold());
    for movie in &movies {
        println!("  {}: {}", movie.movie_id, movie.title);
    }
    Ok(())
}

fn handle_analyze(text: &str) {
    let classifier = EmotionClassifier::new(EmotionLexicon::new());
    let result = classifier.classify(text);

    println!(
        "{} {} (intensity {:.2}, confidence {:.2})",
        "Dominant:".bold(),
        result.dominant.to_string().green(),
        result.intensity,
        result.confidence
    );
    for (emotion, probability) in result.probabilities.iter() {
        println!("  {emotion:>8}: {probability:.4}");
    }
}

// ============================================================================
// Offline knowledge-base construction
// ============================================================================

/// One movie of the raw review corpus.
#[derive(Debug, Deserialize)]
struct ReviewSource {
    movie_id: String,
    title: String,
    #[serde(default)]
    director: Option<String>,
    #[serde(default)]
    cast: Vec<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    reviews: Vec<String>,
}

/// Classify every review, aggregate per movie, and write the snapshot the
/// store loads at serving time. Movies whose aggregate comes out neutral
/// are kept in the catalog with no emotion entries.
fn handle_build_kb(reviews_path: &Path, output_path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(reviews_path)
        .with_context(|| format!("failed to read review corpus {}", reviews_path.display()))?;
    let sources: Vec<ReviewSource> =
        serde_json::from_str(&raw).context("review corpus is not valid JSON")?;

    println!("Classifying reviews for {} movies...", sources.len());
    let classifier = EmotionClassifier::new(EmotionLexicon::new());

    let records: Vec<MovieRecord> = sources
        .par_iter()
        .filter_map(|source| match build_record(&classifier, source) {
            Ok(record) => Some(record),
            Err(error) => {
                warn!(movie_id = %source.movie_id, %error, "skipping movie");
                None
            }
        })
        .collect();

    let json = serde_json::to_string_pretty(&records)?;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output_path, json)
        .with_context(|| format!("failed to write snapshot {}", output_path.display()))?;

    println!(
        "{} Wrote {} movie records to {}",
        "✓".green(),
        records.len(),
        output_path.display()
    );
    Ok(())
}

fn build_record(classifier: &EmotionClassifier, source: &ReviewSource) -> Result<MovieRecord> {
    // Aggregation over zero reviews is undefined; guard here, as the
    // classifier contract requires of its callers.
    anyhow::ensure!(
        !source.reviews.is_empty(),
        "movie {} has no reviews",
        source.movie_id
    );

    let classifications: Vec<_> = source
        .reviews
        .iter()
        .map(|review| classifier.classify(review))
        .collect();
    let aggregate = aggregate_reviews(&classifications)?;

    let emotions = match aggregate.label {
        AggregateLabel::Emotion(emotion) => vec![EmotionEntry {
            emotion,
            intensity: aggregate.avg_intensity,
            confidence: aggregate.avg_confidence,
        }],
        // Neutral is a sentinel, never stored in the graph.
        AggregateLabel::Neutral => Vec::new(),
    };

    Ok(MovieRecord {
        movie_id: source.movie_id.clone(),
        title: source.title.clone(),
        director: source.director.clone(),
        cast: source.cast.clone(),
        description: source.description.clone(),
        emotions,
    })
}

/// Render a numbered recommendation list.
fn print_recommendations(movies: &[Recommendation]) {
    for (rank, movie) in movies.iter().enumerate() {
        let mut details = Vec::new();
        if let Some(emotion) = movie.emotion {
            details.push(emotion.to_string().to_uppercase());
        }
        if let Some(intensity) = movie.intensity {
            let label = if intensity > 0.7 {
                "strong"
            } else if intensity > 0.4 {
                "moderate"
            } else {
                "subtle"
            };
            details.push(format!("{label} intensity ({intensity:.2})"));
        }
        details.push(format!("confidence {:.0}%", movie.confidence * 100.0));
        if let Some(score) = movie.score {
            details.push(format!("score {score:.2}"));
        }

        println!(
            "{}. {} [{}]",
            (rank + 1).to_string().green(),
            movie.title.bold(),
            details.join(", ")
        );
        if let Some(director) = &movie.director {
            println!("   Director: {director}");
        }
        if !movie.cast.is_empty() {
            println!("   Cast: {}", movie.cast.join(", "));
        }
        if let Some(description) = &movie.description {
            println!("   {description}");
        }
    }
}
