//! Response headers that let the viewer be embedded in an iframe.
//!
//! The same set of headers is added to every response, whatever the path.
//! They are rendered in the `_headers` format understood by static hosts
//! such as Cloudflare Pages.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use crate::{Error, Result};

/// Origins allowed to frame the viewer, besides the viewer's own.
pub const FRAME_ANCESTORS: &[&str] = &[
    "https://*.pages.dev",
    "https://eve-star-ship-web.pages.dev",
    "http://localhost:*",
    "http://127.0.0.1:*",
];

/// Path pattern matching every response.
pub const ALL_PATHS: &str = "/*";

/// The headers to set, as `(name, value)` pairs.
#[must_use]
pub fn embed_headers() -> Vec<(&'static str, String)> {
    let mut ancestors = String::from("frame-ancestors 'self'");
    for origin in FRAME_ANCESTORS {
        ancestors.push(' ');
        ancestors.push_str(origin);
    }

    vec![
        ("X-Frame-Options", "ALLOWALL".to_string()),
        ("Content-Security-Policy", ancestors),
        ("Access-Control-Allow-Origin", "*".to_string()),
    ]
}

/// Render a `_headers` file applying the embed headers to `path_pattern`.
#[must_use]
pub fn render_headers_file(path_pattern: &str) -> String {
    let mut out = format!("{path_pattern}\n");
    for (name, value) in embed_headers() {
        let _ = writeln!(out, "  {name}: {value}");
    }
    out
}

/// Write the `_headers` file for every path to `path`.
pub fn write_headers_file(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io("create directory", parent, e))?;
    }
    fs::write(path, render_headers_file(ALL_PATHS)).map_err(|e| Error::io("write", path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embed_headers() {
        let headers = embed_headers();
        assert_eq!(headers.len(), 3);
        assert_eq!(headers[0], ("X-Frame-Options", "ALLOWALL".to_string()));
        assert_eq!(
            headers[1].1,
            "frame-ancestors 'self' https://*.pages.dev https://eve-star-ship-web.pages.dev http://localhost:* http://127.0.0.1:*"
        );
        assert_eq!(headers[2], ("Access-Control-Allow-Origin", "*".to_string()));
    }

    #[test]
    fn test_render_headers_file() {
        let rendered = render_headers_file(ALL_PATHS);
        let mut lines = rendered.lines();
        assert_eq!(lines.next(), Some("/*"));
        assert_eq!(lines.next(), Some("  X-Frame-Options: ALLOWALL"));
        assert!(lines.next().unwrap().starts_with("  Content-Security-Policy: frame-ancestors 'self'"));
        assert_eq!(lines.next(), Some("  Access-Control-Allow-Origin: *"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_write_headers_file() {
        let dir = std::env::temp_dir().join(format!("hangar-headers-{}", std::process::id()));
        let path = dir.join("dist").join("_headers");
        write_headers_file(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), render_headers_file("/*"));
        fs::remove_dir_all(&dir).unwrap();
    }
}
