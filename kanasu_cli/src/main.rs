use anyhow::{bail, Context, Result};
/// Kanasu CLI - bilingual career guidance in the terminal
///
/// Provides the interactive TUI plus one-shot voice, recommend, roadmap,
/// scholarships and chat commands.
use clap::{Parser, Subcommand};
use kanasu_cli::api_client::providers_for;
use kanasu_cli::export::export_recommendations;
use kanasu_cli::ui::{self, AppOptions};
use kanasu_core::chat::ChatSession;
use kanasu_core::config::Settings;
use kanasu_core::form::CareerFormSession;
use kanasu_core::notification::Notification;
use kanasu_core::provider::Providers;
use kanasu_core::roadmap::RoadmapRequest;
use kanasu_core::scholarships;
use kanasu_core::session::{select_career, selected_career, LanguageSession};
use kanasu_core::store::KeyValueStore;
use kanasu_core::voice::{apply, Route, VoiceCommandInterpreter, VoiceSink};
use kanasu_core::Locale;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kanasu")]
#[command(about = "Kanasu - bilingual (English/ಕನ್ನಡ) career guidance", long_about = None)]
struct Cli {
    /// Path to the local store (defaults to KANASU_DB or the data dir)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Kanasu API base URL; in-process providers are used when unset
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Treat voice input as unsupported
    #[arg(long, global = true)]
    no_voice: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive TUI
    Tui {
        /// Directory for CSV exports
        #[arg(long, default_value = ".")]
        export_dir: PathBuf,
    },
    /// Interpret a voice command transcript
    Voice {
        /// What was said, in English or Kannada
        transcript: String,
    },
    /// Get career recommendations (non-interactive)
    Recommend {
        /// Interest tags, comma separated (at most 4)
        #[arg(short, long, value_delimiter = ',')]
        interests: Vec<String>,
        /// Skills, comma separated
        #[arg(short, long, default_value = "")]
        skills: String,
        /// Education level code (sslc, puc, diploma, bachelor, master, other)
        #[arg(short, long)]
        education: Option<String>,
        /// Stream code, e.g. pcm
        #[arg(long)]
        stream: Option<String>,
        /// Free-text description of what you enjoy
        #[arg(short, long)]
        text: Option<String>,
        /// Write the results as CSV into this directory
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Show the roadmap for a career
    Roadmap {
        /// Career title code; defaults to the last selected career
        #[arg(short, long)]
        career: Option<String>,
        /// Language code (en or kn); defaults to the stored preference
        #[arg(short, long)]
        lang: Option<String>,
    },
    /// List scholarships
    Scholarships {
        /// Case-insensitive filter on title, category or description
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Send one message to the chat assistant
    Chat {
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = Settings::from_env();
    if let Some(db) = cli.db {
        settings.db_path = db;
    }
    if let Some(url) = cli.api_url {
        settings.api_url = Some(url.trim_end_matches('/').to_string());
    }

    // the TUI owns the terminal, so it never logs
    if !matches!(cli.command, Commands::Tui { .. }) {
        env_logger::init_from_env(env_logger::Env::default().default_filter_or("warn"));
    }

    let store = KeyValueStore::new(Some(settings.db_path.clone()))
        .with_context(|| format!("Failed to open store at {}", settings.db_path.display()))?;
    let providers = providers_for(&settings)?;

    match cli.command {
        Commands::Tui { export_dir } => {
            let options = AppOptions {
                voice_input: !cli.no_voice,
                export_dir,
            };
            ui::run_tui(&store, &providers, options)?;
        }
        Commands::Voice { transcript } => {
            run_voice_cli(&transcript, cli.no_voice)?;
        }
        Commands::Recommend {
            interests,
            skills,
            education,
            stream,
            text,
            csv,
        } => {
            let form = recommend_form(&interests, &skills, education, stream)?;
            run_recommend_cli(&store, &providers, &form, text, csv)?;
        }
        Commands::Roadmap { career, lang } => {
            run_roadmap_cli(&store, &providers, career, lang.as_deref())?;
        }
        Commands::Scholarships { search } => {
            run_scholarships_cli(search.as_deref().unwrap_or(""));
        }
        Commands::Chat { message } => {
            let locale = LanguageSession::restore(&store)?.locale();
            let mut chat = ChatSession::open(&store, providers.chat.as_ref())?;
            match chat.send(&message, locale)? {
                Some(reply) => println!("{}", reply),
                None => bail!("Message is empty"),
            }
        }
    }

    Ok(())
}

/// Prints what a voice command would do.
struct PrintSink;

impl VoiceSink for PrintSink {
    fn navigate(&mut self, route: Route) {
        println!("→ {}", route.path());
    }

    fn speak(&mut self, text: &str, locale: Locale) {
        println!("♪ [{}] {}", locale.speech_tag(), text);
    }

    fn notify(&mut self, notification: Notification) {
        println!("! {}: {}", notification.title, notification.description);
    }
}

fn run_voice_cli(transcript: &str, no_voice: bool) -> Result<()> {
    if no_voice {
        bail!("Voice input is disabled (--no-voice)");
    }
    let interpreter = VoiceCommandInterpreter::default();
    let outcome = interpreter.interpret(transcript);
    apply(&outcome, &mut PrintSink);
    Ok(())
}

/// Builds the form from command-line values. Repeated interest tags count once.
fn recommend_form(
    interests: &[String],
    skills: &str,
    education: Option<String>,
    stream: Option<String>,
) -> Result<CareerFormSession> {
    let mut form = CareerFormSession::new();
    for tag in interests.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        form.select_interest(tag)?;
    }
    form.update_skills(skills);
    if let Some(education) = education {
        form.update_education(&education);
    }
    if let Some(stream) = stream {
        form.update_stream(&stream);
    }
    Ok(form)
}

fn run_recommend_cli(
    store: &KeyValueStore,
    providers: &Providers,
    form: &CareerFormSession,
    text: Option<String>,
    csv: Option<PathBuf>,
) -> Result<()> {
    let mut request = form.to_predict_request(None);
    request.text = text.filter(|t| !t.trim().is_empty());

    println!("Finding career matches...");
    let recommendations = providers.recommender.predict(&request)?;
    if recommendations.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    for (i, rec) in recommendations.iter().enumerate() {
        println!(
            "\n  {}. {} [{}]",
            i + 1,
            rec.title_label,
            rec.title_code
        );
        println!("     Cluster: {}", rec.cluster_label);
        println!("     Confidence: {}%", rec.percent());
    }

    // the top match becomes the roadmap default
    select_career(store, &recommendations[0])?;

    if let Some(dir) = csv {
        let path = export_recommendations(&dir, &recommendations)?;
        println!("\nExported to {}", path.display());
    }
    Ok(())
}

fn run_roadmap_cli(
    store: &KeyValueStore,
    providers: &Providers,
    career: Option<String>,
    lang: Option<&str>,
) -> Result<()> {
    let career = match career {
        Some(code) => code,
        None => match selected_career(store)? {
            Some(rec) => rec.title_code,
            None => bail!("No career selected; pass --career or run `kanasu recommend` first"),
        },
    };
    let locale = match lang {
        Some(code) => Locale::from_code(code)
            .ok_or_else(|| anyhow::anyhow!("Unsupported language '{}'", code))?,
        None => LanguageSession::restore(store)?.locale(),
    };

    let roadmap = providers
        .roadmap
        .generate(&RoadmapRequest::for_career(&career, locale))?;

    println!("{}", roadmap.career);
    println!("{}\n", roadmap.roadmap_text);
    for step in &roadmap.steps {
        println!("{}", step.term_label);
        for task in &step.tasks {
            println!("  • {}", task);
        }
        if !step.courses.is_empty() {
            println!("  Courses: {}", step.courses.join(", "));
        }
        if !step.colleges.is_empty() {
            println!("  Colleges: {}", step.colleges.join(", "));
        }
    }

    if !roadmap.nearby_institutions.is_empty() {
        println!("\nNearby institutions:");
        for inst in &roadmap.nearby_institutions {
            println!("  {} - {}", inst.name, inst.address);
            println!("    {}", inst.maps_url);
        }
    }
    Ok(())
}

fn run_scholarships_cli(query: &str) {
    let results = scholarships::search(query);
    if results.is_empty() {
        println!("No scholarships match '{}'.", query);
        return;
    }

    for s in results {
        println!("\n  {} [{}]", s.title, s.category);
        println!("  {}", s.description);
        println!("  Eligibility: {}", s.eligibility);
        println!("  Amount: {}", s.amount);
        println!("  {}", s.link);
    }
}
