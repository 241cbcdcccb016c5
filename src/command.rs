use std::path::PathBuf;

/// The operations a thin UI layer feeds into the editor, independent of any
/// UI harness. Serializable so sequences can be scripted (see the `script`
/// CLI subcommand) and replayed in tests.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    /// Load a photo from disk, replacing the current one.
    LoadPhoto { path: PathBuf },
    /// Start a drag at an on-screen pointer position.
    BeginDrag { x: f64, y: f64 },
    /// Continue a drag. `display_scale` converts pointer distance to
    /// canvas-space pixels; 1.0 when the surface is shown at native size.
    UpdateDrag {
        x: f64,
        y: f64,
        #[serde(default = "default_display_scale")]
        display_scale: f64,
    },
    /// Finish the drag.
    EndDrag,
    /// Set the zoom control value in percent (control range 50..=200).
    SetZoom { percent: f64 },
    /// Restore default scale and centered position.
    Reset,
}

fn default_display_scale() -> f64 {
    1.0
}
