//! `plansmith ask` command: one coaching question, one answer.

use anyhow::{Context, Result};

use plansmith_core::completion::{
    CompletionClient, CompletionConfig, CompletionRequest, MessagesClient,
};

const COACH_SYSTEM_PROMPT: &str = "You are a pragmatic small-business coach. \
Answer the user's question about starting or running a business in a few \
short paragraphs of plain text. Be concrete; skip the pep talk.";

/// Send one question through the completion endpoint and print the answer.
pub async fn run_ask(completion: &CompletionConfig, question: &str) -> Result<()> {
    let client =
        MessagesClient::from_config(completion).context("failed to configure completion client")?;

    let request = CompletionRequest::new(COACH_SYSTEM_PROMPT, question, completion.max_tokens);
    let answer = client
        .complete(request)
        .await
        .context("completion request failed")?;

    println!("{}", answer.trim());
    Ok(())
}
