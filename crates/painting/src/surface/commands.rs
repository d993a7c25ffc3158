//! Dispatch of wire-level surface commands

use flagdraw_ipc::{CoreToUi, SurfaceCommand};
use glam::Vec2;

use crate::types::HexColor;
use crate::validation::ValidationError;

use super::DrawingSurface;

impl DrawingSurface {
    /// Execute a command from the UI
    ///
    /// History-changing commands reply with the new undo/redo state, `Export`
    /// replies with the data URL. Invalid colors, widths or sizes are
    /// returned as errors and leave the surface untouched.
    pub fn apply(&mut self, command: SurfaceCommand) -> Result<Option<CoreToUi>, ValidationError> {
        let reply = match command {
            SurfaceCommand::BeginStroke {
                x,
                y,
                tool,
                color,
                width,
            } => {
                let color: HexColor = color.parse()?;
                self.begin_stroke(Vec2::new(x, y), tool, color, width)?;
                Some(CoreToUi::UndoRedoChanged(self.undo_redo_state()))
            }
            SurfaceCommand::ContinueStroke { x, y } => {
                self.continue_stroke(Vec2::new(x, y));
                None
            }
            SurfaceCommand::EndStroke => {
                self.end_stroke();
                None
            }
            SurfaceCommand::Undo => {
                self.undo();
                Some(CoreToUi::UndoRedoChanged(self.undo_redo_state()))
            }
            SurfaceCommand::Redo => {
                self.redo();
                Some(CoreToUi::UndoRedoChanged(self.undo_redo_state()))
            }
            SurfaceCommand::Reset => {
                self.reset();
                Some(CoreToUi::UndoRedoChanged(self.undo_redo_state()))
            }
            SurfaceCommand::Export => Some(CoreToUi::Exported {
                data_url: self.export_image(),
            }),
            SurfaceCommand::Resize {
                display_width,
                aspect_ratio,
            } => {
                self.resize(display_width, aspect_ratio)?;
                None
            }
        };
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use flagdraw_ipc::{Tool, UndoRedoState};

    use super::*;

    #[test]
    fn test_command_sequence() {
        let mut surface = DrawingSurface::default();
        let commands = [
            SurfaceCommand::Resize {
                display_width: 80,
                aspect_ratio: 2.0,
            },
            SurfaceCommand::BeginStroke {
                x: 10.0,
                y: 10.0,
                tool: Tool::Pen,
                color: "#00ff00".into(),
                width: 4,
            },
            SurfaceCommand::ContinueStroke { x: 60.0, y: 10.0 },
            SurfaceCommand::EndStroke,
        ];
        for command in commands {
            surface.apply(command).unwrap();
        }
        assert_eq!(surface.pixel(40, 10), Some([0, 255, 0, 255]));

        let reply = surface.apply(SurfaceCommand::Undo).unwrap();
        assert_eq!(
            reply,
            Some(CoreToUi::UndoRedoChanged(UndoRedoState {
                undo: false,
                redo: true
            }))
        );

        match surface.apply(SurfaceCommand::Export).unwrap() {
            Some(CoreToUi::Exported { data_url: Some(url) }) => {
                assert!(url.starts_with("data:image/png;base64,"))
            }
            other => panic!("unexpected reply {other:?}"),
        }
    }

    #[test]
    fn test_bad_color_rejected() {
        let mut surface = DrawingSurface::default();
        surface.resize(40, 2.0).unwrap();
        let err = surface
            .apply(SurfaceCommand::BeginStroke {
                x: 1.0,
                y: 1.0,
                tool: Tool::Pen,
                color: "red".into(),
                width: 2,
            })
            .unwrap_err();
        assert_eq!(err, ValidationError::InvalidColor("red".into()));
        assert!(!surface.is_stroking());
    }

    #[test]
    fn test_export_unsized() {
        let mut surface = DrawingSurface::default();
        assert_eq!(
            surface.apply(SurfaceCommand::Export).unwrap(),
            Some(CoreToUi::Exported { data_url: None })
        );
    }
}
