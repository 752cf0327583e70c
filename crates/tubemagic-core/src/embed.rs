//! Descriptions of how the dashboard is framed inside the hosting page.

use serde::{Deserialize, Serialize};

use crate::page::INDEX_FILE;

/// Name the content root is registered under in component mode.
pub const COMPONENT_NAME: &str = "tubemagic_hub";

/// URL prefix the content root is served from in component mode.
#[must_use]
pub fn component_mount_path() -> String {
    format!("/component/{COMPONENT_NAME}")
}

/// Fixed-size frame settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameOptions {
    /// Frame height in CSS pixels.
    pub height: u32,
    /// Whether the frame scrolls its content.
    pub scrolling: bool,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            height: 1200,
            scrolling: true,
        }
    }
}

/// Named arguments delivered to the component.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentArgs {
    pub api_key: String,
}

impl std::fmt::Debug for ComponentArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComponentArgs")
            .field("api_key", &"[redacted]")
            .finish()
    }
}

/// What the hosting page frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Embed {
    /// Page text rendered through `srcdoc`.
    Inline { html: String, frame: FrameOptions },
    /// Static component served from the content root, invoked with `args`.
    Component {
        name: &'static str,
        src: String,
        args: ComponentArgs,
        frame: FrameOptions,
    },
}

impl Embed {
    /// Component embed for the dashboard entry page.
    #[must_use]
    pub fn component(args: ComponentArgs, frame: FrameOptions) -> Self {
        Self::Component {
            name: COMPONENT_NAME,
            src: format!("{}/{INDEX_FILE}", component_mount_path()),
            args,
            frame,
        }
    }
}
