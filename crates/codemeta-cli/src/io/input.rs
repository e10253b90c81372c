use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use url::Url;

/// Raw text of a local file or an http(s) URL.
///
/// Text is returned unparsed so JSON syntax errors are reported by the engine.
pub async fn resolve_to_text(input: &str) -> Result<String> {
    if looks_like_url(input) {
        return fetch_url_text(input).await;
    }
    read_text_file(input)
}

pub fn read_text_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

async fn fetch_url_text(url: &str) -> Result<String> {
    let resp = reqwest::get(url).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(anyhow!("http error: {status}"));
    }
    Ok(resp.text().await?)
}

fn looks_like_url(s: &str) -> bool {
    Url::parse(s)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}
