//! Post-processing of generated text.
//!
//! Extracts catalog mentions, rewrites them into links, and derives
//! follow-up questions from the caller's context.

use std::sync::LazyLock;

use regex::Regex;

use hale_core::types::{CatalogProduct, HealthData, UserProfile};

/// Matches existing markdown link spans so rewriting can skip them.
static LINK_SPAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[[^\]]*\]\([^)]*\)").expect("Invalid link span regex"));

/// Fixed pool of generic follow-up prompts, consumed in order.
const GENERIC_FOLLOW_UPS: [&str; 3] = [
    "Is there anything else about your health you'd like to look into?",
    "Would you like suggestions for supporting this naturally?",
    "Do you want tips on sleep, energy, or stress management?",
];

/// Follow-up questions returned per response, at most.
const MAX_FOLLOW_UPS: usize = 3;

/// Catalog names contained in `text`, case-insensitively, in catalog order.
///
/// Containment is a plain substring check: a product counts as mentioned
/// whether or not its occurrence was rewritten into a link.
pub fn extract_mentioned_products(text: &str, products: &[CatalogProduct]) -> Vec<String> {
    let haystack = text.to_lowercase();
    products
        .iter()
        .filter(|p| !p.name.is_empty() && haystack.contains(&p.name.to_lowercase()))
        .map(|p| p.name.clone())
        .collect()
}

/// Rewrite every word-boundary occurrence of every catalog product name in
/// `text` into the form produced by `format`.
///
/// Longest names are rewritten first, so a product whose name contains
/// another's is linked as itself. Occurrences inside existing markdown link
/// markup are left alone, which makes the rewrite idempotent.
pub fn link_product_mentions(
    text: &str,
    products: &[CatalogProduct],
    format: &dyn Fn(&str) -> String,
) -> String {
    let mut names: Vec<&str> = products
        .iter()
        .map(|p| p.name.as_str())
        .filter(|n| !n.is_empty())
        .collect();
    names.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));

    let mut out = text.to_string();
    for name in names {
        out = link_single_product(&out, name, format);
    }
    out
}

fn link_single_product(text: &str, name: &str, format: &dyn Fn(&str) -> String) -> String {
    // `\b` is undefined next to punctuation, so anchor only the alphanumeric
    // edges of the name.
    let start = if name.starts_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    let end = if name.ends_with(|c: char| c.is_alphanumeric()) {
        r"\b"
    } else {
        ""
    };
    let pattern = format!("(?i){}{}{}", start, regex::escape(name), end);
    let re = match Regex::new(&pattern) {
        Ok(re) => re,
        Err(_) => return text.to_string(),
    };

    let protected: Vec<(usize, usize)> = LINK_SPAN_RE
        .find_iter(text)
        .map(|m| (m.start(), m.end()))
        .collect();

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in re.find_iter(text) {
        // Inside an existing [label](target) span.
        if protected.iter().any(|&(s, e)| m.start() >= s && m.end() <= e) {
            continue;
        }
        // A bare name directly followed by a link target, or directly
        // preceded by an opening bracket: linking it again would nest.
        if text[m.end()..].starts_with("](") || text[..m.start()].ends_with('[') {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(&format(m.as_str()));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

/// Derive up to three follow-up prompts from the caller's context.
///
/// Priority order: the user's first goal, then an offer to explain lab
/// results, then the generic pool in order.
pub fn follow_up_questions(
    profile: Option<&UserProfile>,
    health: Option<&HealthData>,
) -> Vec<String> {
    let mut questions = Vec::new();

    if let Some(goal) = profile.and_then(|p| p.goals.first()) {
        questions.push(format!("How is your progress toward \"{}\" going?", goal));
    }
    if health.is_some_and(|h| !h.lab_results.is_empty()) {
        questions
            .push("Would you like me to explain any of your recent lab results?".to_string());
    }
    for generic in GENERIC_FOLLOW_UPS {
        if questions.len() >= MAX_FOLLOW_UPS {
            break;
        }
        questions.push(generic.to_string());
    }
    questions
}

// =============================================================================
// Tests
// =============================================================================
