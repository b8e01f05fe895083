//! Prompt text and structured-output schemas for the tutor model.

use recall_core::FiveW1H;
use serde_json::{json, Value};

const ANALYSIS_INSTRUCTIONS: &str = "\
You are an expert English tutor for a C1-level student.
Analyze the following English text.

1. Write a concise summary of the core content (keep it engaging).
2. Extract 5-8 advanced (C1/C2) vocabulary words or idioms found in the text.
3. For each word, provide:
   - The Part of Speech (e.g., Noun, Verb, Adjective, Phrasal Verb).
   - A simple English definition.
   - The example sentence from the text (or a generated one if context is weak).

Return the response in JSON format.";

pub fn analysis_prompt(text: &str) -> String {
    format!("TEXT TO ANALYZE:\n{}\n\n{}", text, ANALYSIS_INSTRUCTIONS)
}

pub fn review_prompt(topic: &str, inputs: &FiveW1H) -> String {
    format!(
        "STUDENT INPUT:\n{draft}\n\n\
You are an English tutor correcting a student's summary of a podcast/video about: \"{topic}\".
The student used the 5W1H method.

1. Re-write the student's input into a cohesive, grammatically correct paragraph (C1 level).
2. List specific grammar or vocabulary mistakes the student made.
3. Give specific feedback on whether they covered the 5W1H aspects logically (based on the topic provided, infer what a good summary would look like).
4. Give a score from 1-100 based on clarity and grammar.

Return JSON.",
        draft = inputs.draft(),
        topic = topic,
    )
}

/// Response schema matching `ArticleAnalysisResult`.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "keyVocabulary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "word": { "type": "STRING" },
                        "partOfSpeech": { "type": "STRING" },
                        "definition": { "type": "STRING" },
                        "example": { "type": "STRING" }
                    },
                    "required": ["word", "partOfSpeech", "definition", "example"]
                }
            }
        },
        "required": ["summary", "keyVocabulary"]
    })
}

/// Response schema matching `PodcastCorrectionResult`.
pub fn review_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "correctedText": { "type": "STRING" },
            "grammarFeedback": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "contentFeedback": { "type": "STRING" },
            "overallScore": { "type": "NUMBER" }
        },
        "required": ["correctedText", "grammarFeedback", "contentFeedback", "overallScore"]
    })
}
