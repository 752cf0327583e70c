//! Hosting page rendering.
//!
//! [`HostPage`] is the chrome around the dashboard: title and icon, an
//! optional side panel for notices, and a main area holding either the
//! error banner of a failed run or the dashboard frame.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::embed::{ComponentArgs, Embed, FrameOptions};
use crate::error::LaunchError;
use crate::inject::script_safe_json;
use crate::launcher::{Launch, Notice, NoticeLevel};

/// Page width behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// Main area spans the full viewport width.
    #[default]
    Wide,
    /// Main area is constrained to a centered column.
    Centered,
}

/// Page-level settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageConfig {
    pub title: String,
    pub icon: String,
    pub layout: Layout,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "TubeMagic Hub".to_owned(),
            icon: "🚀".to_owned(),
            layout: Layout::Wide,
        }
    }
}

/// Message type posted to the component frame with its arguments.
pub const RENDER_EVENT: &str = "tubemagic:render";

/// Renders the hosting page for one run.
#[derive(Debug, Clone, Default)]
pub struct HostPage {
    config: PageConfig,
}

impl HostPage {
    #[must_use]
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }

    /// Render the outcome of a run. Failures become a banner in the main
    /// area; they never propagate.
    #[must_use]
    pub fn render(&self, outcome: &Result<Launch, LaunchError>) -> String {
        match outcome {
            Ok(launch) => self.render_launch(launch),
            Err(err) => self.render_error(&err.user_message()),
        }
    }

    /// Page showing the framed dashboard plus any side-panel notices.
    #[must_use]
    pub fn render_launch(&self, launch: &Launch) -> String {
        let main = match &launch.embed {
            Embed::Inline { html, frame } => inline_frame(html, *frame),
            Embed::Component {
                src, args, frame, ..
            } => component_frame(src, args, *frame),
        };
        self.document(&launch.sidebar, &main)
    }

    /// Page showing only an error banner.
    #[must_use]
    pub fn render_error(&self, message: &str) -> String {
        let banner = format!(
            "<div class=\"banner banner-error\" role=\"alert\">{}</div>",
            escape_html(message)
        );
        self.document(&[], &banner)
    }

    fn document(&self, sidebar: &[Notice], main: &str) -> String {
        let layout = match self.config.layout {
            Layout::Wide => "layout-wide",
            Layout::Centered => "layout-centered",
        };

        let mut html = String::with_capacity(HOST_CSS.len() + main.len() + 512);
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\"><head><meta charset=\"utf-8\"/>");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width,initial-scale=1\"/>");
        let _ = write!(html, "<title>{}</title>", escape_html(&self.config.title));
        let _ = write!(
            html,
            "<link rel=\"icon\" href=\"data:image/svg+xml,<svg xmlns=%22http://www.w3.org/2000/svg%22 viewBox=%220 0 100 100%22><text y=%22.9em%22 font-size=%2290%22>{}</text></svg>\"/>",
            escape_html(&self.config.icon)
        );
        html.push_str(HOST_CSS);
        html.push_str("</head>");
        let _ = write!(html, "<body class=\"{layout}\">");

        if !sidebar.is_empty() {
            html.push_str("<aside class=\"sidebar\">");
            for notice in sidebar {
                let class = match notice.level {
                    NoticeLevel::Warning => "notice notice-warning",
                };
                let _ = write!(
                    html,
                    "<div class=\"{class}\">{}</div>",
                    escape_html(&notice.message)
                );
            }
            html.push_str("</aside>");
        }

        html.push_str("<main class=\"main\">");
        html.push_str(main);
        html.push_str("</main></body></html>\n");
        html
    }
}

fn frame_attrs(frame: FrameOptions) -> String {
    format!(
        "height=\"{}\" style=\"height:{}px\" scrolling=\"{}\"",
        frame.height,
        frame.height,
        if frame.scrolling { "yes" } else { "no" }
    )
}

fn inline_frame(html: &str, frame: FrameOptions) -> String {
    format!(
        "<iframe class=\"hub-frame\" title=\"dashboard\" {} srcdoc=\"{}\"></iframe>",
        frame_attrs(frame),
        escape_html(html)
    )
}

fn component_frame(src: &str, args: &ComponentArgs, frame: FrameOptions) -> String {
    let payload = serde_json::json!({
        "type": RENDER_EVENT,
        "args": args,
    });
    format!(
        concat!(
            "<iframe id=\"hub-frame\" class=\"hub-frame\" title=\"dashboard\" {} src=\"{}\"></iframe>",
            "<script>(function(){{",
            "var f=document.getElementById(\"hub-frame\");",
            "var m={};",
            "f.addEventListener(\"load\",function(){{f.contentWindow.postMessage(m,window.location.origin);}});",
            "}})();</script>"
        ),
        frame_attrs(frame),
        escape_html(src),
        script_safe_json(&payload)
    )
}

/// Escape text for use in HTML content and double- or single-quoted
/// attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const HOST_CSS: &str = r"<style>
*,*::before,*::after{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,'Source Sans Pro',sans-serif;background:#0e1117;color:#fafafa;display:flex;min-height:100vh}
.sidebar{width:280px;flex-shrink:0;background:#262730;padding:24px 16px}
.main{flex:1;padding:32px 48px}
.layout-centered .main{max-width:760px;margin:0 auto}
.hub-frame{width:100%;border:none;display:block}
.banner,.notice{border-radius:8px;padding:14px 16px;font-size:15px;line-height:1.5}
.banner-error{background:rgba(255,43,43,.09);color:#ffdede;border:1px solid rgba(255,43,43,.3)}
.notice-warning{background:rgba(255,227,18,.1);color:#ffffc2;border:1px solid rgba(255,227,18,.3)}
</style>";
