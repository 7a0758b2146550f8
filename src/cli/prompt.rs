//! Console resolution prompt

use crate::core::orchestrator::ResolutionPrompt;
use async_trait::async_trait;
use std::io::{BufRead, Write};
use tracing::debug;

/// Interactive prompt reading a resolution choice from stdin.
///
/// Shared single channel: the orchestrator serializes calls, so prompts
/// never interleave across items.
pub struct ConsolePrompt;

#[async_trait]
impl ResolutionPrompt for ConsolePrompt {
    async fn ask(&self, item_title: &str, available: &[String]) -> Option<String> {
        let title = item_title.to_string();
        let options = available.to_vec();

        // Blocking stdin read, off the async runtime
        let answer = tokio::task::spawn_blocking(move || {
            println!("Available resolutions for '{}':", title);
            for (i, label) in options.iter().enumerate() {
                println!("  {}. {}", i + 1, label);
            }
            print!("Pick a resolution (number or label, empty to skip): ");
            let _ = std::io::stdout().flush();

            let mut line = String::new();
            if std::io::stdin().lock().read_line(&mut line).is_err() {
                return None;
            }
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }

            // Accept an index into the offered list or a literal label
            if let Ok(index) = trimmed.parse::<usize>() {
                if index >= 1 && index <= options.len() {
                    return Some(options[index - 1].clone());
                }
            }
            Some(trimmed.to_string())
        })
        .await
        .ok()
        .flatten();

        debug!("Prompt answer for '{}': {:?}", item_title, answer);
        answer
    }
}

/// Prompt that always declines; used when a run must never block on input
pub struct DeclinePrompt;

#[async_trait]
impl ResolutionPrompt for DeclinePrompt {
    async fn ask(&self, _item_title: &str, _available: &[String]) -> Option<String> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decline_prompt_always_declines() {
        let prompt = DeclinePrompt;
        let answer = prompt.ask("Video", &["720p".to_string()]).await;
        assert_eq!(answer, None);
    }
}
