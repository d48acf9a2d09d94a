//! Command implementations for the helpdesk CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;

use log::{debug, info};
use uuid::Uuid;

use crate::classifier::{QueryClassifier, ScoredCandidate};
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::HelpdeskConfig;
use crate::dialog::{ChatMessage, SupportDialog};
use crate::error::{HelpdeskError, Result};
use crate::knowledge::{ExtractiveAnswerer, KnowledgeBase};
use crate::session::{ClarificationSessions, SessionSweeper};

const RESET_COMMAND: &str = "/reset";
const QUIT_COMMAND: &str = "/quit";

/// Execute a CLI command.
pub fn execute_command(args: HelpdeskArgs) -> Result<()> {
    let config = load_config(&args)?;

    match &args.command {
        Command::Classify(classify_args) => classify_query(classify_args.clone(), config, &args),
        Command::Chat(chat_args) => run_chat(chat_args.clone(), config, &args),
        Command::Config(config_args) => show_config(config_args.clone(), config, &args),
    }
}

/// Defaults, overridden by `--config` when given.
fn load_config(args: &HelpdeskArgs) -> Result<HelpdeskConfig> {
    match &args.config {
        Some(path) => {
            debug!("loading configuration from {}", path.display());
            HelpdeskConfig::from_file(path)
        }
        None => Ok(HelpdeskConfig::default()),
    }
}

/// Classify one query against a file of candidates.
fn classify_query(args: ClassifyArgs, config: HelpdeskConfig, cli_args: &HelpdeskArgs) -> Result<()> {
    config.classifier.validate()?;

    let candidates = load_candidates(&args.candidates_file)?;
    debug!(
        "loaded {} candidates from {}",
        candidates.len(),
        args.candidates_file.display()
    );

    let classifier = QueryClassifier::new(config.classifier);
    let result = classifier.classify(&args.query, &candidates);

    output_classification(&result, cli_args)
}

fn load_candidates(path: &Path) -> Result<Vec<ScoredCandidate>> {
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

/// Print the effective configuration, optionally validating it first.
fn show_config(args: ConfigArgs, config: HelpdeskConfig, cli_args: &HelpdeskArgs) -> Result<()> {
    if args.validate {
        config.validate()?;
    }
    output_result("Effective configuration", &config, cli_args)
}

/// Line-oriented chat over stdin against a local knowledge base.
fn run_chat(args: ChatArgs, config: HelpdeskConfig, cli_args: &HelpdeskArgs) -> Result<()> {
    config.validate()?;

    let knowledge_base = Arc::new(KnowledgeBase::from_json_file(&args.kb_file)?);
    let sessions = Arc::new(ClarificationSessions::new(&config.session));
    let _sweeper = SessionSweeper::start(sessions.clone(), config.session.sweep_interval())?;

    let dialog = SupportDialog::new(
        QueryClassifier::new(config.classifier),
        sessions,
        knowledge_base,
        Arc::new(ExtractiveAnswerer::new()),
        config.retrieval,
    );

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| HelpdeskError::other(format!("failed to start runtime: {e}")))?;

    let conversation_id = args
        .conversation
        .unwrap_or_else(|| Uuid::new_v4().to_string());
    info!("chat started, conversation {conversation_id}");

    let interactive = cli_args.output_format == OutputFormat::Human && cli_args.verbosity() > 0;
    if interactive {
        println!("Conversation {conversation_id}. Type {RESET_COMMAND} to start over, {QUIT_COMMAND} to exit.");
    }

    let mut history: Vec<ChatMessage> = Vec::new();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        if interactive {
            print!("> ");
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let message = line.trim();

        match message {
            "" => continue,
            QUIT_COMMAND => break,
            RESET_COMMAND => {
                dialog.reset(&conversation_id);
                history.clear();
                if interactive {
                    println!("Conversation reset.");
                }
                continue;
            }
            _ => {}
        }

        let reply = runtime.block_on(dialog.handle_turn(&conversation_id, message, &history))?;
        output_turn(&reply, cli_args)?;

        history.push(ChatMessage::user(message));
        history.push(ChatMessage::assistant(reply.answer));
    }

    info!("chat finished, conversation {conversation_id}");
    Ok(())
}
