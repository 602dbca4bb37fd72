//! `nyaya` command-line interface
//!
//! Each subcommand mirrors one screen: ask (query page), voice, history,
//! speak, document (generator), admin (portal) and health.

mod admin;
mod document;
mod query;

use clap::{Args, Parser, Subcommand};
use nyaya_common::models::{CaseStatus, DocType, Language};
use std::path::PathBuf;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::render::Renderer;

/// Command-line arguments for nyaya
#[derive(Parser, Debug)]
#[command(name = "nyaya")]
#[command(about = "Legal-aid assistant: ask questions, draft FIR/RTI documents, manage volunteers")]
#[command(version)]
pub struct Cli {
    /// Base URL of nyaya-api (defaults to the config file, then http://127.0.0.1:5810)
    #[arg(long, global = true, env = "NYAYA_API_URL")]
    pub api_url: Option<String>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, global = true, env = "NYAYA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Ask a legal question in text
    Ask {
        /// The question
        text: String,

        /// Answer language (en, hi, te)
        #[arg(short, long, default_value = "en", value_parser = parse_language)]
        language: Language,

        /// Read the answer aloud
        #[arg(long)]
        speak: bool,
    },

    /// Ask a legal question by voice
    Voice {
        /// Upload this WAV file instead of recording
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Stop recording after this many seconds
        #[arg(long, default_value_t = 60)]
        max_seconds: u64,

        /// Answer language; detected from the transcript when omitted
        #[arg(short, long, value_parser = parse_language)]
        language: Option<Language>,

        /// Read the answer aloud
        #[arg(long, conflicts_with = "transcribe_only")]
        speak: bool,

        /// Print the transcript without asking for guidance
        #[arg(long)]
        transcribe_only: bool,
    },

    /// Recent questions and their categories
    History {
        /// Number of queries to show
        #[arg(short = 'n', long, default_value_t = 10)]
        limit: i64,
    },

    /// Convert text to speech
    Speak {
        text: String,

        #[arg(short, long, default_value = "en", value_parser = parse_language)]
        language: Language,

        /// Save the audio to this file
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Do not play the audio
        #[arg(long)]
        no_play: bool,
    },

    /// Generate an FIR or RTI draft
    Document {
        /// fir or rti
        #[arg(value_parser = parse_doc_type)]
        doc_type: DocType,

        #[arg(short, long, default_value = "en", value_parser = parse_language)]
        language: Language,

        /// Form field as key=value (repeatable)
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        fields: Vec<String>,

        /// Write the document text to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Administrative portal
    Admin {
        #[command(subcommand)]
        command: AdminCommand,
    },

    /// Check that the backend is reachable
    Health,
}

#[derive(Subcommand, Debug)]
pub enum AdminCommand {
    /// Manage student volunteers
    Students {
        #[command(subcommand)]
        command: StudentCommand,
    },

    /// Manage cases and assignments
    Cases {
        #[command(subcommand)]
        command: CaseCommand,
    },

    /// Replace all students and cases with sample data
    Seed,
}

#[derive(Subcommand, Debug)]
pub enum StudentCommand {
    List,
    Add(StudentArgs),
    Remove { id: Uuid },
    /// Cases assigned to a student
    Cases { id: Uuid },
}

#[derive(Args, Debug)]
pub struct StudentArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "")]
    pub college: String,

    /// Comma-separated skills
    #[arg(long, default_value = "")]
    pub skills: String,
}

#[derive(Subcommand, Debug)]
pub enum CaseCommand {
    List {
        /// Only cases with this status
        #[arg(long, value_parser = parse_status)]
        status: Option<CaseStatus>,
    },
    Add(CaseArgs),
    /// Assign a case to a student
    Assign { case_id: Uuid, student_id: Uuid },
    Unassign { case_id: Uuid },
    /// Set a case status (open, assigned, in_progress, resolved, closed)
    Status {
        case_id: Uuid,
        #[arg(value_parser = parse_status)]
        status: CaseStatus,
    },
    Remove { case_id: Uuid },
}

#[derive(Args, Debug)]
pub struct CaseArgs {
    #[arg(long, default_value = "")]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "")]
    pub category: String,
}

fn parse_language(value: &str) -> Result<Language, String> {
    match value.trim().to_ascii_lowercase().as_str() {
        "en" => Ok(Language::En),
        "hi" => Ok(Language::Hi),
        "te" => Ok(Language::Te),
        other => Err(format!("unsupported language '{}' (use en, hi or te)", other)),
    }
}

fn parse_doc_type(value: &str) -> Result<DocType, String> {
    value.parse::<DocType>()
}

fn parse_status(value: &str) -> Result<CaseStatus, String> {
    value.parse::<CaseStatus>()
}

/// What every command needs
pub struct Context {
    pub client: ApiClient,
    pub renderer: Renderer,
}

/// Run one command to completion
pub async fn run(command: Command, ctx: &Context) -> anyhow::Result<()> {
    match command {
        Command::Ask {
            text,
            language,
            speak,
        } => query::ask(ctx, text, language, speak).await,
        Command::Voice {
            file,
            max_seconds,
            language,
            speak,
            transcribe_only,
        } => {
            let source = query::AudioSource { file, max_seconds };
            if transcribe_only {
                query::transcribe(ctx, source).await
            } else {
                query::voice(ctx, source, language, speak).await
            }
        }
        Command::History { limit } => query::history(ctx, limit).await,
        Command::Speak {
            text,
            language,
            out,
            no_play,
        } => query::speak(ctx, &text, language, out, !no_play).await,
        Command::Document {
            doc_type,
            language,
            fields,
            out,
        } => document::generate(ctx, doc_type, language, &fields, out).await,
        Command::Admin { command } => admin::run(ctx, command).await,
        Command::Health => {
            let health = ctx.client.health().await?;
            println!(
                "{}",
                ctx.renderer.success(&format!(
                    "{} v{} is {} at {}",
                    health.module,
                    health.version,
                    health.status,
                    ctx.client.base_url()
                ))
            );
            Ok(())
        }
    }
}
