//! Session and history command handlers.

use super::commands::{HistoryCommands, SessionCommands};
use super::{Context, print_json};
use reelwriter::{PipelineError, PipelineErrorKind, ReelwriterResult};
use serde_json::json;

/// Handle `sessions` subcommands.
pub async fn sessions(ctx: &Context, cmd: SessionCommands) -> ReelwriterResult<()> {
    let store = ctx.sessions()?;
    match cmd {
        SessionCommands::List => print_json(&store.list().await?),
        SessionCommands::Show { id } => match store.get(&id).await? {
            Some(session) => print_json(&session),
            None => Err(PipelineError::new(PipelineErrorKind::MissingArtifact(format!(
                "session {id}"
            )))
            .into()),
        },
        SessionCommands::Delete { id } => {
            store.delete(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
        SessionCommands::Purge => {
            let purged = store.purge_expired().await?;
            print_json(&json!({ "purged": purged }))
        }
    }
}

/// Handle `history` subcommands.
pub async fn history(ctx: &Context, cmd: HistoryCommands) -> ReelwriterResult<()> {
    let store = ctx.history()?;
    match cmd {
        HistoryCommands::List => print_json(&store.list().await?),
        HistoryCommands::Delete { id } => {
            store.delete(&id).await?;
            print_json(&json!({ "deleted": id }))
        }
        HistoryCommands::Purge { days } => {
            let days = days.unwrap_or(*ctx.config().storage().history_retention_days());
            let purged = store.purge_older_than(days).await?;
            print_json(&json!({ "purged": purged, "days": days }))
        }
    }
}
