use std::path::PathBuf;

use crate::host::HostConfig;

/// Behavior of the dropdown picker and the creation form. The four policy
/// flags consolidate what used to be separate near-duplicate controller
/// variants into one implementation.
#[derive(Clone, Debug)]
pub struct PickerConfig {
    /// Character that activates the dropdown when it prefixes the input.
    pub trigger: char,
    /// Width of the dropdown overlay, in columns.
    pub overlay_width: u16,
    /// Height reserved for the dropdown overlay, in rows. The overlay is
    /// positioned by this fixed height regardless of how many options it
    /// currently shows.
    pub overlay_height: u16,
    /// Vertical gap between the overlay and the input, in rows.
    pub overlay_gap: u16,
    /// Lowercase the command text and collapse whitespace runs to hyphens
    /// when a command is created.
    pub normalize_command_text: bool,
    /// Reject new commands whose name already exists (case-insensitive).
    pub enforce_unique_name: bool,
    /// Reject new commands whose command text already exists.
    pub enforce_unique_command: bool,
    /// Dim the screen behind the creation form.
    pub use_backdrop: bool,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            trigger: '$',
            overlay_width: 44,
            overlay_height: 12,
            overlay_gap: 1,
            normalize_command_text: true,
            enforce_unique_name: true,
            enforce_unique_command: true,
            use_backdrop: true,
        }
    }
}

/// Everything assembled from the command line at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub picker: PickerConfig,
    pub host: HostConfig,
    pub store_path: PathBuf,
    pub prompt_path: PathBuf,
}
