//! Output formatting for CLI commands.

use serde::Serialize;

use crate::classifier::ClassificationResult;
use crate::cli::args::{HelpdeskArgs, OutputFormat};
use crate::dialog::{ResponseType, TurnReply};
use crate::error::Result;

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &HelpdeskArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Print a classification outcome.
pub fn output_classification(result: &ClassificationResult, args: &HelpdeskArgs) -> Result<()> {
    if args.output_format == OutputFormat::Json {
        return output_json(result, args);
    }

    if result.is_complete {
        println!("complete: answer directly");
        return Ok(());
    }

    println!("clarification needed");
    for (i, topic) in result.suggested_topics.iter().enumerate() {
        println!("  {}. {} [{}] score={:.3}", i + 1, topic.title, topic.topic_key, topic.score);
        if args.verbosity() > 1 && !topic.snippet.is_empty() {
            println!("     {}", topic.snippet);
        }
    }
    if let Some(message) = &result.clarification_message {
        println!();
        println!("{message}");
    }
    Ok(())
}

/// Print the reply to one chat turn.
pub fn output_turn(reply: &TurnReply, args: &HelpdeskArgs) -> Result<()> {
    if args.output_format == OutputFormat::Json {
        return output_json(reply, args);
    }

    println!("{}", reply.answer);
    if reply.response_type == ResponseType::Answer {
        if !reply.source_articles.is_empty() {
            println!("  sources: {}", reply.source_articles.join(", "));
        }
        for link in &reply.youtube_links {
            println!("  video: {link}");
        }
        for image in &reply.images {
            println!("  image: {}", image.filename);
        }
        if args.verbosity() > 1 {
            println!("  confidence: {:.2}", reply.confidence);
        }
        if reply.needs_escalation {
            println!("  (escalated to a support operator)");
        }
    }
    Ok(())
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &HelpdeskArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    print_value(&value, 0);
    Ok(())
}

fn print_value(value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                if val.is_object() {
                    println!("{pad}{key}:");
                    print_value(val, indent + 1);
                } else {
                    println!("{pad}{key}: {}", format_value(val));
                }
            }
        }
        _ => println!("{pad}{}", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &HelpdeskArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for display.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(", ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "null".to_string(),
    }
}
