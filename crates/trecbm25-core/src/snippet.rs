//! Query-biased snippet generation for displayed search results.

use regex::Regex;

use crate::sgml::{extract_graphic_tag, extract_text_tag};

const TOP_N_SENTENCES: usize = 3;

/// Splits `text` into sentences on `.`, `!`, `?`, dropping any with fewer
/// than five whitespace-separated words.
///
/// The word count is taken on the raw, untrimmed match (a plain `split(' ')`
/// that keeps empty tokens), not the trimmed one: every non-first match
/// carries the space that preceded it from the prior sentence's terminator,
/// so a genuinely 4-word sentence counts as 5 there. This mirrors the source
/// system's `len(sentence.split(" ")) >= 5` over `re.findall(r".*?[.!?]", text)`,
/// which has the same leading-space artifact.
fn split_sentences(text: &str) -> Vec<String> {
    let sentence_re = Regex::new(r"[^.!?]*[.!?]").expect("sentence regex is valid");
    sentence_re
        .find_iter(text)
        .filter(|m| m.as_str().split(' ').count() >= 5)
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

fn words_of(sentence: &str) -> Vec<String> {
    let word_re = Regex::new(r"\W+").expect("word regex is valid");
    word_re
        .split(sentence)
        .map(|w| w.to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Ranks `sentences` by relevance to `query_tokens` and returns the top
/// [`TOP_N_SENTENCES`], in descending score order with ties broken by
/// first-occurrence position.
///
/// Sentences are scored by distinct text, not by position: a sentence
/// repeated verbatim elsewhere in the document keeps a single slot in the
/// result, and every occurrence's score accumulates onto that slot (mirrors
/// scoring into a dict keyed by sentence text, a known quirk of the source
/// system).
///
/// Scoring, per occurrence of a sentence:
/// - `+2` if it is the first sentence of the document
/// - `+1` for each of its words that appears in `query_tokens`
/// - `+1` for each query token that appears among its words
/// - `+1` for each adjacent pair of its words that are both query tokens
fn rank_sentences(sentences: &[String], query_tokens: &[String]) -> Vec<String> {
    let mut order: Vec<&String> = Vec::new();
    let mut scores: std::collections::HashMap<&String, i64> = std::collections::HashMap::new();

    for (i, sentence) in sentences.iter().enumerate() {
        let entry = scores.entry(sentence).or_insert_with(|| {
            order.push(sentence);
            0
        });
        if i == 0 {
            *entry += 2;
        }
        let words = words_of(sentence);

        for word in &words {
            if query_tokens.iter().any(|t| t == word) {
                *entry += 1;
            }
        }
        for token in query_tokens {
            if words.iter().any(|w| w == token) {
                *entry += 1;
            }
        }
        for pair in words.windows(2) {
            if query_tokens.iter().any(|t| t == &pair[0])
                && query_tokens.iter().any(|t| t == &pair[1])
            {
                *entry += 1;
            }
        }
    }

    let mut scored: Vec<(usize, &String, i64)> = order
        .into_iter()
        .enumerate()
        .map(|(pos, sentence)| (pos, sentence, scores[sentence]))
        .collect();

    scored.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(&b.0)));
    scored
        .into_iter()
        .take(TOP_N_SENTENCES)
        .map(|(_, sentence, _)| sentence.clone())
        .collect()
}

/// Takes the first 50 *characters* (not bytes) of `s`, so multi-byte UTF-8
/// text never gets sliced mid-codepoint.
fn first_50_chars(s: &str) -> &str {
    match s.char_indices().nth(50) {
        Some((byte_idx, _)) => &s[..byte_idx],
        None => s,
    }
}

/// Cleans and truncates the `<GRAPHIC>` tag of a raw document to a
/// caption-style fragment, always ellipsis-terminated.
fn graphic_caption(raw_document: &str) -> String {
    let graphic = extract_graphic_tag(raw_document);
    let trimmed = graphic.trim();
    format!("{}...", first_50_chars(trimmed).trim())
}

/// A result ready for display: the headline to show (falling back to a
/// text or graphic excerpt when the document has none) and a query-biased
/// snippet built from its most relevant sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    /// Headline, or a derived excerpt if the document has none.
    pub headline: String,
    /// Up to three sentences joined by a single space, most relevant first.
    pub text: String,
}

/// Builds a [`Snippet`] for one result.
///
/// `headline` is the document's stored headline (possibly empty).
/// `raw_document` is the untouched SGML this document was parsed from, used
/// to recover its `<TEXT>`/`<GRAPHIC>` content. `query_tokens` should be the
/// same tokens used to retrieve this document (not stemmed).
pub fn build_snippet(headline: &str, raw_document: &str, query_tokens: &[String]) -> Snippet {
    let text = extract_text_tag(raw_document);

    let headline = if headline.trim().is_empty() {
        if text.trim().is_empty() {
            graphic_caption(raw_document)
        } else {
            format!("{}...", first_50_chars(text.trim()).trim())
        }
    } else {
        headline.to_string()
    };

    let sentences = split_sentences(&text);
    let top = rank_sentences(&sentences, query_tokens);

    Snippet {
        headline,
        text: top.join(" "),
    }
}
