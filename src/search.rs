use anyhow::{bail, Result};
use chrono::NaiveDate;

use crate::client::SearchClient;
use crate::config::Config;
use crate::models::{AtomHit, MessageHit, TopicHit};
use crate::render::{render_snippet, RenderMode};

pub async fn run_search(
    config: &Config,
    query: &str,
    scope: Option<String>,
    since: Option<String>,
    limit: Option<i64>,
) -> Result<()> {
    if query.trim().is_empty() {
        println!("No results.");
        return Ok(());
    }

    let scope = scope.unwrap_or_else(|| config.search.scope.clone());
    validate_scope(&scope)?;

    let since_date = match since {
        Some(ref s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d")?),
        None => None,
    };

    let final_limit = limit.unwrap_or(config.search.limit);
    let client = SearchClient::new(&config.api)?;
    let mut response = client.search(query, Some(&scope), Some(final_limit)).await?;

    if let Some(date) = since_date {
        response.messages = filter_messages_since(response.messages, date);
    }

    if response.topics.is_empty() && response.messages.is_empty() && response.atoms.is_empty() {
        println!("No results.");
        return Ok(());
    }

    let color = RenderMode::from_config(&config.output.color).color_enabled();

    println!("{} results for \"{}\"", response.total_results, response.query);
    print_topics(&response.topics, color);
    print_messages(&response.messages, color);
    print_atoms(&response.atoms, color);

    Ok(())
}

pub async fn run_health(config: &Config) -> Result<()> {
    let client = SearchClient::new(&config.api)?;
    let health = client.health().await?;
    println!("status: {}", health.status);
    println!("version: {}", health.version);
    Ok(())
}

/// Valid scopes mirror the backend's result sections.
pub fn validate_scope(scope: &str) -> Result<()> {
    match scope {
        "all" | "topics" | "messages" | "atoms" => Ok(()),
        _ => bail!(
            "Unknown search scope: {}. Use all, topics, messages, or atoms.",
            scope
        ),
    }
}

/// Keep only messages sent on or after midnight UTC of `date`. Messages
/// without a timestamp are dropped by a since-filter.
fn filter_messages_since(messages: Vec<MessageHit>, date: NaiveDate) -> Vec<MessageHit> {
    let cutoff = date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    let cutoff = match cutoff {
        Some(ts) => ts,
        None => return messages,
    };
    messages
        .into_iter()
        .filter(|m| m.sent_at.map(|ts| ts >= cutoff).unwrap_or(false))
        .collect()
}

fn print_topics(topics: &[TopicHit], color: bool) {
    if topics.is_empty() {
        return;
    }
    println!();
    println!("Topics:");
    for (i, topic) in topics.iter().enumerate() {
        println!("  {}. {} ({} messages)", i + 1, topic.name, topic.message_count);
        println!("     match: {}", render_snippet(&topic.match_snippet, color));
        println!("     id: {}", topic.id);
    }
}

fn print_messages(messages: &[MessageHit], color: bool) {
    if messages.is_empty() {
        return;
    }
    println!();
    println!("Messages:");
    for (i, msg) in messages.iter().enumerate() {
        let score = msg
            .signal_score
            .map(|s| format!(" {:.2}", s))
            .unwrap_or_default();
        let author = msg.author.as_deref().unwrap_or("(unknown)");
        let date = msg
            .sent_at
            .map(|ts| ts.format("%Y-%m-%d").to_string())
            .unwrap_or_default();

        println!(
            "  {}. [{}{}] {} {}",
            i + 1,
            msg.classification.label(),
            score,
            author,
            date
        );
        println!("     {}", render_snippet(&msg.content_snippet, color));
        println!("     id: {}", msg.id);
    }
}

fn print_atoms(atoms: &[AtomHit], color: bool) {
    if atoms.is_empty() {
        return;
    }
    println!();
    println!("Atoms:");
    for (i, atom) in atoms.iter().enumerate() {
        let title = atom.title.as_deref().unwrap_or("(untitled)");
        let confidence = atom
            .confidence
            .map(|c| format!(" (confidence {:.2})", c))
            .unwrap_or_default();

        println!(
            "  {}. [{}] {}{}",
            i + 1,
            atom.kind.label(),
            title,
            confidence
        );
        println!("     {}", render_snippet(&atom.match_snippet, color));
        println!("     id: {}", atom.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn message(id: &str, sent_at: Option<chrono::DateTime<Utc>>) -> MessageHit {
        MessageHit {
            id: id.to_string(),
            topic_id: None,
            author: None,
            sent_at,
            classification: Default::default(),
            signal_score: None,
            content_snippet: String::new(),
        }
    }

    #[test]
    fn test_validate_scope_accepts_known() {
        for scope in ["all", "topics", "messages", "atoms"] {
            assert!(validate_scope(scope).is_ok());
        }
    }

    #[test]
    fn test_validate_scope_rejects_unknown() {
        assert!(validate_scope("everything").is_err());
        assert!(validate_scope("").is_err());
    }

    #[test]
    fn test_since_filter_keeps_newer_messages() {
        let cutoff = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let old = message("old", Some(Utc.with_ymd_and_hms(2026, 2, 20, 12, 0, 0).unwrap()));
        let new = message("new", Some(Utc.with_ymd_and_hms(2026, 3, 5, 12, 0, 0).unwrap()));

        let kept = filter_messages_since(vec![old, new], cutoff);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].id, "new");
    }

    #[test]
    fn test_since_filter_boundary_is_inclusive() {
        let cutoff = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let boundary = message("b", Some(Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap()));

        let kept = filter_messages_since(vec![boundary], cutoff);
        assert_eq!(kept.len(), 1);
    }

    #[test]
    fn test_since_filter_drops_undated_messages() {
        let cutoff = NaiveDate::from_ymd_opt(2026, 3, 1).unwrap();
        let undated = message("u", None);

        let kept = filter_messages_since(vec![undated], cutoff);
        assert!(kept.is_empty());
    }
}
