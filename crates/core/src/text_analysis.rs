//! Term-frequency analysis of free-text answers.
//!
//! Answers are Turkish-first: lowercasing follows Turkish dotted/dotless
//! rules, and a fixed Turkish stopword set is removed before counting.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::Serialize;

/// Tokens shorter than this (in characters) are dropped.
pub const MIN_TOKEN_CHARS: usize = 3;

/// Number of terms reported per text question.
pub const TOP_TERMS: usize = 20;

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "acaba", "ama", "ancak", "artık", "aslında", "az", "bana", "bazı", "belki", "ben",
        "beni", "benim", "bile", "bir", "biraz", "birçok", "biri", "birkaç", "bu", "buna",
        "bunu", "bunun", "burada", "bütün", "çok", "çünkü", "da", "daha", "de", "değil",
        "diye", "en", "fakat", "gibi", "göre", "hem", "hep", "hepsi", "her", "hiç", "için",
        "ile", "ise", "kadar", "ki", "kim", "mı", "mi", "mu", "mü", "nasıl", "ne", "neden",
        "nerede", "niye", "o", "olan", "olarak", "oldu", "olduğu", "olsun", "onlar", "onu",
        "onun", "öyle", "sadece", "sana", "sen", "siz", "sonra", "şey", "şu", "şunu",
        "tüm", "ve", "veya", "ya", "yani", "yine", "zaten", "önce", "böyle", "şöyle",
        "var", "yok", "biz", "bizim", "sizin",
    ]
    .into_iter()
    .collect()
});

/// One row of the frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermCount {
    pub term: String,
    pub count: usize,
}

/// Lowercase with Turkish casing rules (`I` → `ı`, `İ` → `i`).
pub(crate) fn turkish_lowercase(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            other => out.extend(other.to_lowercase()),
        }
    }
    out
}

pub fn is_stopword(token: &str) -> bool {
    STOPWORDS.contains(token)
}

/// Split a text into normalized, stopword-filtered tokens.
///
/// Punctuation is replaced by whitespace; letters (including the extended
/// alphabet) and digits are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = turkish_lowercase(text)
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|t| t.chars().count() >= MIN_TOKEN_CHARS && !is_stopword(t))
        .map(str::to_string)
        .collect()
}

/// Count tokens across all texts and return the `limit` most frequent.
///
/// Ties keep first-seen order.
pub fn top_terms<'a, I>(texts: I, limit: usize) -> Vec<TermCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<TermCount> = Vec::new();

    for text in texts {
        for token in tokenize(text) {
            match index.get(&token) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(token.clone(), counts.len());
                    counts.push(TermCount {
                        term: token,
                        count: 1,
                    });
                }
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts.truncate(limit);
    counts
}
