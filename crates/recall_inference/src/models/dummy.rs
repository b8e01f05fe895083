use async_trait::async_trait;
use recall_core::{ArticleAnalysisResult, FiveW1H, KeyVocabulary, PodcastCorrectionResult, Result, TutorModel};
use std::collections::HashSet;
use std::fmt;

const SUMMARY_WORDS: usize = 20;
const MAX_VOCABULARY: usize = 8;

/// Offline tutor: deterministic answers without any network access.
#[derive(Default)]
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

fn clean_word(raw: &str) -> String {
    raw.trim_matches(|c: char| !c.is_alphabetic()).to_lowercase()
}

fn guess_part_of_speech(word: &str) -> &'static str {
    if word.ends_with("ly") {
        "Adverb"
    } else if word.ends_with("tion") || word.ends_with("ness") || word.ends_with("ment") || word.ends_with("ity") {
        "Noun"
    } else if word.ends_with("ous") || word.ends_with("ive") || word.ends_with("able") || word.ends_with("ful") {
        "Adjective"
    } else if word.ends_with("ing") || word.ends_with("ed") || word.ends_with("ise") || word.ends_with("ize") {
        "Verb"
    } else {
        "Word"
    }
}

fn example_for<'a>(text: &'a str, word: &str) -> &'a str {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .find(|sentence| sentence.split_whitespace().any(|w| clean_word(w) == word))
        .unwrap_or("")
}

fn sentence(answer: &str) -> String {
    let answer = answer.trim();
    let mut chars = answer.chars();
    let mut out = match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => return String::new(),
    };
    if !out.ends_with(['.', '!', '?']) {
        out.push('.');
    }
    out
}

#[async_trait]
impl TutorModel for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn analyze_article(&self, text: &str) -> Result<ArticleAnalysisResult> {
        // Take first 20 words as the summary
        let summary = text.split_whitespace().take(SUMMARY_WORDS).collect::<Vec<_>>().join(" ");

        // Longest distinct words stand in for advanced vocabulary
        let mut seen = HashSet::new();
        let mut words: Vec<String> = text
            .split_whitespace()
            .map(clean_word)
            .filter(|w| w.chars().count() > 3 && seen.insert(w.clone()))
            .collect();
        words.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then_with(|| a.cmp(b)));

        let key_vocabulary = words
            .into_iter()
            .take(MAX_VOCABULARY)
            .map(|word| KeyVocabulary {
                part_of_speech: guess_part_of_speech(&word).to_string(),
                definition: format!("No offline definition for \"{}\".", word),
                example: example_for(text, &word).to_string(),
                word,
            })
            .collect();

        Ok(ArticleAnalysisResult { summary, key_vocabulary })
    }

    async fn review_summary(&self, topic: &str, inputs: &FiveW1H) -> Result<PodcastCorrectionResult> {
        let fields = inputs.fields();

        let corrected_text = fields
            .iter()
            .map(|(_, answer)| sentence(answer))
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(" ");

        let mut grammar_feedback = Vec::new();
        for (label, answer) in fields.iter().filter(|(_, a)| !a.trim().is_empty()) {
            let answer = answer.trim();
            if answer.chars().next().is_some_and(|c| c.is_lowercase()) {
                grammar_feedback.push(format!("{}: start the sentence with a capital letter.", label));
            }
            if !answer.ends_with(['.', '!', '?']) {
                grammar_feedback.push(format!("{}: end the sentence with a full stop.", label));
            }
        }

        let missing: Vec<&str> = fields
            .iter()
            .filter(|(_, a)| a.trim().is_empty())
            .map(|(label, _)| *label)
            .collect();
        let content_feedback = if missing.is_empty() {
            format!("All six 5W1H questions are covered for \"{}\".", topic)
        } else {
            format!("Your summary of \"{}\" is missing: {}.", topic, missing.join(", "))
        };

        let coverage = (inputs.answered() * 100 / 6) as i64;
        let overall_score = (coverage - 5 * grammar_feedback.len() as i64).clamp(1, 100) as f64;

        Ok(PodcastCorrectionResult {
            corrected_text,
            grammar_feedback,
            content_feedback,
            overall_score,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE: &str = "The committee reached a unanimous decision. Critics were immediately skeptical. \
        Nevertheless, the implementation proceeded gradually.";

    #[tokio::test]
    async fn test_dummy_analysis() {
        let model = DummyModel::new();
        let result = model.analyze_article(ARTICLE).await.unwrap();

        assert!(result.summary.starts_with("The committee reached"));
        assert!(!result.key_vocabulary.is_empty());
        assert!(result.key_vocabulary.len() <= MAX_VOCABULARY);

        let first = &result.key_vocabulary[0];
        assert_eq!(first.word, "implementation");
        assert_eq!(first.part_of_speech, "Noun");
        assert_eq!(first.example, "Nevertheless, the implementation proceeded gradually.");
    }

    #[tokio::test]
    async fn test_dummy_analysis_is_deterministic() {
        let model = DummyModel::new();
        let a = model.analyze_article(ARTICLE).await.unwrap();
        let b = model.analyze_article(ARTICLE).await.unwrap();
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_dummy_review_complete_answers() {
        let model = DummyModel::new();
        let inputs = FiveW1H {
            who: "A neuroscientist.".to_string(),
            what: "Explains why sleep matters.".to_string(),
            where_: "On a TED stage.".to_string(),
            when: "In 2019.".to_string(),
            why: "To change habits.".to_string(),
            how: "With research examples.".to_string(),
        };

        let result = model.review_summary("Sleep is your superpower", &inputs).await.unwrap();
        assert!(result.has_perfect_grammar());
        assert_eq!(result.overall_score, 100.0);
        assert!(result.content_feedback.contains("All six"));
    }

    #[tokio::test]
    async fn test_dummy_review_partial_answers() {
        let model = DummyModel::new();
        let inputs = FiveW1H {
            who: "a neuroscientist".to_string(),
            ..Default::default()
        };

        let result = model.review_summary("Sleep", &inputs).await.unwrap();
        assert_eq!(result.corrected_text, "A neuroscientist.");
        assert_eq!(result.grammar_feedback.len(), 2);
        assert!(result.content_feedback.contains("What, Where, When, Why, How"));
        assert_eq!(result.overall_score, 6.0);
    }

    #[tokio::test]
    async fn test_dummy_review_empty_answers() {
        let model = DummyModel::new();
        let result = model.review_summary("Anything", &FiveW1H::default()).await.unwrap();
        assert!(result.corrected_text.is_empty());
        assert_eq!(result.overall_score, 1.0);
    }
}
