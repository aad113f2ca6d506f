//! Removal of plotting code from responses that were turned into charts.
//!
//! Every step only deletes text, and the passes repeat until nothing
//! changes, so stripping already-stripped text returns it unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

use super::extract::strip_fenced_blocks;

/// Spans from a lead-in or code start through the plotting terminal call.
static CODE_SPANS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)\b(?:agora\s+)?vou\s+criar.*?(?:plt|fig)\.show\(\)",
        r"(?is)\b(?:i\s+will|i'll|let\s+me)\s+create.*?(?:plt|fig)\.show\(\)",
        r"(?is)\bimport\s+\w+.*?(?:plt|fig)\.show\(\)",
        r"(?is)\b\w+\s*=\s*\[[^\]]+\].*?(?:plt|fig)\.show\(\)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Sentences announcing that a chart is about to be produced.
static INTRO_PHRASES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)vou criar.*?gráfico.*?para você\.",
        r"(?i)agora vou criar.*?visualização\.",
        r"(?i)(?:agora\s+)?vou\s+(?:criar|gerar|montar).*?gráfico\.",
        r"(?i)(?:i\s+will|i'll|let\s+me)\s+(?:create|plot|draw).*?(?:chart|graph|plot)\.",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect()
});

/// Lines that read as source code.
static CODE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:import\s|from\s+\S+\s+import\b|(?:plt|fig|ax)\.\w|\w+\s*=\s*\[|[\w, ]+=\s*plt\.)",
    )
    .unwrap()
});

static TRAILING_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)[ \t]+$").unwrap());
static BLANK_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").unwrap());

/// Strips fenced code, plotting code and chart lead-ins from a response.
pub fn strip_code_residue(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = strip_pass(&current);
        if next == current {
            return next;
        }
        current = next;
    }
}

fn strip_pass(text: &str) -> String {
    let mut cleaned = strip_fenced_blocks(text);

    for pattern in CODE_SPANS.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }
    for pattern in INTRO_PHRASES.iter() {
        cleaned = pattern.replace_all(&cleaned, "").into_owned();
    }

    cleaned = cleaned
        .split('\n')
        .filter(|line| !CODE_LINE.is_match(line.trim()))
        .collect::<Vec<_>>()
        .join("\n");

    cleaned = TRAILING_SPACE.replace_all(&cleaned, "").into_owned();
    cleaned = BLANK_RUN.replace_all(&cleaned, "\n\n").into_owned();
    cleaned.trim().to_string()
}
