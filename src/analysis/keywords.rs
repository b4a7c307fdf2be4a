use crate::analysis::config::{AnalysisConfig, Lexicon};
use crate::models::KeywordSet;
use crate::utils::OrderedMap;

/// Extract the most frequent content words of `text`.
///
/// Characters other than `[A-Za-z0-9_]` and whitespace are removed before
/// splitting. Tokens no longer than `config.max_ignored_token_len` and stop
/// words are dropped. Ties keep first-occurrence order.
pub fn extract(text: &str, lexicon: &Lexicon, config: &AnalysisConfig) -> KeywordSet {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    let mut counts: OrderedMap<&str, u32> = OrderedMap::new();
    for token in cleaned.split_whitespace() {
        if token.chars().count() <= config.max_ignored_token_len || lexicon.is_stop_word(token) {
            continue;
        }
        counts.increment(token);
    }

    let mut ranked = counts.into_vec();
    // stable: equal counts stay in first-occurrence order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    KeywordSet::from_ranked(
        ranked
            .into_iter()
            .take(config.keyword_limit)
            .map(|(word, _)| word.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> Vec<String> {
        extract(text, &Lexicon::default(), &AnalysisConfig::default())
            .as_slice()
            .to_vec()
    }

    #[test]
    fn empty_text_has_no_keywords() {
        assert!(run("").is_empty());
        assert!(run("   ").is_empty());
    }

    #[test]
    fn ranks_by_frequency_then_first_occurrence() {
        let words = run("Work was busy. Sleep, then work; sleep again? WORK!");
        assert_eq!(words, vec!["work", "sleep", "busy", "then", "again"]);
    }

    #[test]
    fn drops_short_tokens_and_stop_words() {
        let words = run("I was not sad but they should have known those days");
        for word in &words {
            assert!(word.len() > 3, "{word} is too short");
            assert!(!Lexicon::default().is_stop_word(word), "{word} is a stop word");
        }
        assert_eq!(words, vec!["known", "days"]);
    }

    #[test]
    fn punctuation_is_stripped_inside_tokens() {
        assert_eq!(run("can't won't over-thinking"), vec!["cant", "wont", "overthinking"]);
    }

    #[test]
    fn never_more_than_limit() {
        let text = (0..25)
            .map(|i| format!("word{i:02}"))
            .collect::<Vec<_>>()
            .join(" ");
        let words = run(&text);
        assert_eq!(words.len(), 10);
        assert_eq!(words[0], "word00");
        assert_eq!(words[9], "word09");
    }
}
