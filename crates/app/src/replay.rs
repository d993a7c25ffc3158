//! Replaying recorded surface commands
//!
//! Input is one JSON [`SurfaceCommand`] per line; blank lines are skipped.

use flagdraw_ipc::{CoreToUi, SurfaceCommand, from_json};
use painting::DrawingSurface;
use tracing::warn;

use crate::AppError;

/// Parse a JSON-lines command script
pub fn parse_script(text: &str) -> Result<Vec<SurfaceCommand>, AppError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(number, line)| {
            from_json(line).map_err(|e| AppError::Script {
                line: number + 1,
                source: e,
            })
        })
        .collect()
}

/// Apply commands in order, collecting the replies
///
/// Rejected commands are reported as [`CoreToUi::Error`] and replay
/// continues, matching how a UI would keep running.
pub fn replay(surface: &mut DrawingSurface, commands: Vec<SurfaceCommand>) -> Vec<CoreToUi> {
    let mut replies = Vec::new();
    for command in commands {
        match surface.apply(command) {
            Ok(Some(reply)) => replies.push(reply),
            Ok(None) => {}
            Err(e) => {
                warn!("Command rejected: {}", e);
                replies.push(CoreToUi::Error {
                    code: "invalid_command".into(),
                    message: e.to_string(),
                });
            }
        }
    }
    replies
}
