// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Bounded response body assembly: the `Read,<from>,<to>,<count>` envelope
//! and its `format=html`/`format=txt` wrapping.

use vlcb_core::QueryResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Txt,
}

impl Format {
    pub fn parse(value: Option<&str>) -> Format {
        match value {
            Some("txt") => Format::Txt,
            _ => Format::Html,
        }
    }
}

/// Render a completed `query` result into the `Read,...` header plus one
/// body line per frame.
pub fn render_query(result: &QueryResult) -> String {
    let mut out = format!(
        "Read,{},{},{}\n",
        result.echoed_from, result.echoed_to, result.produced_count
    );
    for frame in &result.frames {
        out.push_str(&frame.to_line());
        out.push('\n');
    }
    out
}

/// Wrap `content` per the requested format. `text/html` is always the
/// response content-type regardless of which wrapping is chosen.
pub fn wrap(content: &str, format: Format) -> String {
    match format {
        Format::Html => format!("<html><body>{content}</body></html>"),
        Format::Txt => content.to_string(),
    }
}
