//! Extraction of the template body from a model answer.

use std::sync::LazyLock;

use regex::Regex;

/// First fenced block: opening fence with an optional info string, body, and
/// a closing fence alone on its own line.
static FENCED_BLOCK: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r"(?sm)```[ \t]*[A-Za-z0-9_+.-]*[ \t]*\r?\n(.*?)^```[ \t]*\r?$").ok()
});

/// Returns the template contained in a model answer.
///
/// Uses the body of the first fenced block when one is closed. Otherwise
/// strips backticks from both ends and a leading `yaml` info line. The result
/// has no leading or trailing whitespace; `yaml` lines inside the body are
/// kept.
pub fn clean_template(raw: &str) -> String {
    let fenced = FENCED_BLOCK
        .as_ref()
        .and_then(|re| re.captures(raw))
        .and_then(|c| c.get(1));

    if let Some(body) = fenced {
        return body.as_str().trim().to_owned();
    }

    let unfenced = raw.trim().trim_matches('`');
    let body = unfenced
        .strip_prefix("yaml\r\n")
        .or_else(|| unfenced.strip_prefix("yaml\n"))
        .unwrap_or(unfenced);

    body.trim().to_owned()
}
