//! Line-delimited JSON tool server.
//!
//! Each input line is a request `{"tool": "...", "arguments": {...}}`; each
//! output line is the [`ToolResult`]. Requests are handled one at a time, in
//! order, with the git work on tokio's blocking pool.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::git::GitOperations;
use crate::tools::{GitTools, ToolResult};

/// A single tool call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServeRequest {
    /// Tool name.
    pub tool: String,
    /// Tool arguments; absent means an empty object.
    #[serde(default)]
    pub arguments: Value,
}

/// Serve requests from `reader` until end of input.
///
/// Malformed lines produce an error result and the loop continues. Blank
/// lines are skipped.
///
/// # Errors
///
/// Returns an error if reading input or writing output fails.
pub async fn serve<G, R, W>(tools: Arc<GitTools<G>>, reader: R, mut writer: W) -> Result<()>
where
    G: GitOperations + 'static,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!("Serving tool calls");
    let mut lines = reader.lines();
    let mut handled = 0_usize;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let result = match serde_json::from_str::<ServeRequest>(&line) {
            Ok(request) => {
                let tools = Arc::clone(&tools);
                tokio::task::spawn_blocking(move || tools.call(&request.tool, &request.arguments))
                    .await
                    .map_err(|e| Error::internal(format!("tool task failed: {e}")))?
            }
            Err(err) => ToolResult::error(format!("Failed to parse request: {err}")),
        };

        let mut response = serde_json::to_string(&result)?;
        response.push('\n');
        writer.write_all(response.as_bytes()).await?;
        writer.flush().await?;
        handled += 1;
    }

    debug!(handled, "Input closed");
    Ok(())
}
