//! lessonsmith CLI
//!
//! Commands:
//!   serve - Start HTTP server
//!   generate - Generate one lesson and print it
//!   init - Write a default config file
//!   info - Show resolved configuration

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use lessonsmith::config::{mask_secret, Config};
use lessonsmith::{ContentSource, GenerationRequest, LessonPipeline, LessonStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "lessonsmith")]
#[command(about = "Generate educational lessons with an LLM")]
#[command(version)]
struct Cli {
    /// Config file (defaults to ~/.lessonsmith/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start HTTP server
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Generate a single lesson and print it
    Generate {
        /// Lesson topic
        topic: String,

        /// Grade level code (elementary, middle_school, high_school, college, adult, professional)
        #[arg(short, long, default_value = "middle_school")]
        grade_level: String,

        /// Lesson style code (standard, interactive, visual, inquiry, project, discussion, storytelling)
        #[arg(short, long)]
        style: Option<String>,

        /// Extra instructions passed to the model
        #[arg(short, long)]
        instructions: Option<String>,

        /// Ask for a quiz
        #[arg(short, long)]
        quiz: bool,

        /// Print the lesson as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show resolved configuration
    Info,
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "lessonsmith=debug"
    } else {
        "lessonsmith=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };

    match cli.command {
        Commands::Serve { port } => {
            let mut config = Config::resolve(&config_path)?;
            if let Some(port) = port {
                config.server.port = port;
            }
            lessonsmith::server::run_server(&config).await?;
        }

        Commands::Generate {
            topic,
            grade_level,
            style,
            instructions,
            quiz,
            json,
        } => {
            let config = Config::resolve(&config_path)?;
            let llm = config.llm.build_client()?;
            let pipeline = LessonPipeline::new(Arc::new(LessonStore::new()), Arc::new(llm));

            let mut request = GenerationRequest::new(topic, grade_level).with_quiz(quiz);
            if let Some(style) = style {
                request = request.with_style(style);
            }
            if let Some(instructions) = instructions {
                request = request.with_instructions(instructions);
            }

            let outcome = pipeline.generate(&request).await?;

            if json {
                let out = serde_json::to_string_pretty(&outcome.lesson)
                    .context("Failed to serialize lesson")?;
                println!("{}", out);
                return Ok(());
            }

            match &outcome.source {
                ContentSource::Remote => {}
                ContentSource::Offline => {
                    eprintln!("{} no API key configured, showing offline content\n", "!".yellow())
                }
                ContentSource::Fallback { reason } => {
                    eprintln!("{} provider failed ({}), showing offline content\n", "!".yellow(), reason)
                }
            }
            if !outcome.parsed {
                eprintln!("{} model reply was not valid JSON, showing it raw\n", "!".yellow());
            }

            println!("{}\n", outcome.lesson.content);
            println!("{} {} min", "Read time:".bold(), outcome.lesson.read_time);

            if let Some(quiz) = &outcome.lesson.quiz {
                println!("\n{}", "Quiz".bold());
                for (i, q) in quiz.iter().enumerate() {
                    println!("\n{}. {}", i + 1, q.question);
                    for (j, option) in q.options.iter().enumerate() {
                        if j == q.correct_answer {
                            println!("   {} {}", "*".green(), option.green());
                        } else {
                            println!("   - {}", option);
                        }
                    }
                }
            }
        }

        Commands::Init { force } => {
            if config_path.exists() && !force {
                println!(
                    "Config already exists at {} (use --force to overwrite)",
                    config_path.display()
                );
                return Ok(());
            }
            Config::default().save_to(&config_path)?;
            println!("{} Wrote {}", "✓".green(), config_path.display());
            println!("\nSet {} to use a remote model.", "OPENROUTER_API_KEY".cyan());
        }

        Commands::Info => {
            let config = Config::resolve(&config_path)?;
            println!("{}\n", "lessonsmith".bold());
            println!("Config file: {}", config_path.display());
            println!("Port:        {}", config.server.port);
            println!("Seed data:   {}", config.server.seed_examples);
            println!("\n{}", "LLM".bold());
            match config.llm.credential() {
                Some(key) => {
                    println!("  Mode:        {}", "remote".green());
                    println!("  API key:     {}", mask_secret(key));
                }
                None => println!("  Mode:        {}", "offline (no API key)".yellow()),
            }
            println!("  Endpoint:    {}", config.llm.base_url);
            println!("  Model:       {}", config.llm.model);
            println!("  Temperature: {}", config.llm.temperature);
            println!("  Max tokens:  {}", config.llm.max_tokens);
            println!("  Timeout:     {}s", config.llm.timeout_secs);
        }
    }

    Ok(())
}
