use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DecodeError;
use crate::task::Task;

/// Decoded pipeline result, one variant per task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(tag = "task", rename_all = "camelCase")]
pub enum PipelineOutput {
    Sentiment { label: String, score: f64 },
    Summary { text: String },
    Answer { answer: String, score: f64 },
    Translation { text: String },
    Generation { text: String },
}

#[derive(Deserialize)]
struct Classification {
    label: String,
    score: f64,
}

#[derive(Deserialize)]
struct Summary {
    summary_text: String,
}

#[derive(Deserialize)]
struct Answer {
    answer: String,
    score: f64,
}

#[derive(Deserialize)]
struct Translation {
    translation_text: String,
}

#[derive(Deserialize)]
struct Generation {
    generated_text: String,
}

/// Backends return a bare object, a list, or a list per input.
#[derive(Deserialize)]
#[serde(untagged)]
enum Batch<T> {
    Nested(Vec<Vec<T>>),
    Many(Vec<T>),
    One(T),
}

impl<T> Batch<T> {
    fn into_first(self) -> Option<T> {
        match self {
            Batch::Nested(outer) => outer.into_iter().next()?.into_iter().next(),
            Batch::Many(items) => items.into_iter().next(),
            Batch::One(item) => Some(item),
        }
    }
}

fn first<T: DeserializeOwned>(task: Task, value: Value) -> Result<T, DecodeError> {
    let batch: Batch<T> =
        serde_json::from_value(value).map_err(|source| DecodeError::Shape { task, source })?;
    batch.into_first().ok_or(DecodeError::Empty { task })
}

impl PipelineOutput {
    /// Validate a raw backend result against the shape `task` produces.
    pub fn decode(task: Task, value: Value) -> Result<Self, DecodeError> {
        let output = match task {
            Task::SentimentAnalysis => {
                let Classification { label, score } = first(task, value)?;
                Self::Sentiment { label, score }
            }
            Task::Summarization => Self::Summary {
                text: first::<Summary>(task, value)?.summary_text,
            },
            Task::QuestionAnswering => {
                let Answer { answer, score } = first(task, value)?;
                Self::Answer { answer, score }
            }
            Task::Translation => Self::Translation {
                text: first::<Translation>(task, value)?.translation_text,
            },
            Task::TextGeneration => Self::Generation {
                text: first::<Generation>(task, value)?.generated_text,
            },
        };
        Ok(output)
    }
}

/// Score as a percentage rounded to two decimals, ties away from zero.
fn confidence(score: f64) -> f64 {
    (score * 100.0 * 100.0).round() / 100.0
}

impl fmt::Display for PipelineOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sentiment { label, score } => {
                write!(f, "Sentiment: {}\nConfidence: {:.2}%", label, confidence(*score))
            }
            Self::Answer { answer, score } => {
                write!(f, "Answer: {}\nConfidence: {:.2}%", answer, confidence(*score))
            }
            Self::Summary { text } | Self::Translation { text } | Self::Generation { text } => {
                f.write_str(text)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sentiment_formatting() {
        let output = PipelineOutput::decode(
            Task::SentimentAnalysis,
            json!([{"label": "POSITIVE", "score": 0.9987}]),
        )
        .unwrap();
        assert_eq!(output.to_string(), "Sentiment: POSITIVE\nConfidence: 99.87%");
    }

    #[test]
    fn test_confidence_ties_round_up() {
        let cases = [
            (0.00125, "0.13"),
            (0.9987, "99.87"),
            (0.123449, "12.34"),
            (1.0, "100.00"),
        ];
        for (score, expected) in cases {
            let output = PipelineOutput::Answer {
                answer: "x".into(),
                score,
            };
            assert_eq!(
                output.to_string(),
                format!("Answer: x\nConfidence: {}%", expected),
                "score {}",
                score
            );
        }
    }

    #[test]
    fn test_sentiment_accepts_nested_batches() {
        let output = PipelineOutput::decode(
            Task::SentimentAnalysis,
            json!([[{"label": "NEGATIVE", "score": 0.75}, {"label": "POSITIVE", "score": 0.25}]]),
        )
        .unwrap();
        assert_eq!(
            output,
            PipelineOutput::Sentiment {
                label: "NEGATIVE".into(),
                score: 0.75
            }
        );
    }

    #[test]
    fn test_answer_formatting() {
        let output = PipelineOutput::decode(
            Task::QuestionAnswering,
            json!({"answer": "a field of computer science", "score": 0.5, "start": 6, "end": 33}),
        )
        .unwrap();
        assert_eq!(
            output.to_string(),
            "Answer: a field of computer science\nConfidence: 50.00%"
        );
    }

    #[test]
    fn test_text_results_are_shown_verbatim() {
        let cases = [
            (Task::Summarization, json!([{"summary_text": "Short."}]), "Short."),
            (Task::Translation, json!([{"translation_text": "Bonjour"}]), "Bonjour"),
            (
                Task::TextGeneration,
                json!([{"generated_text": "Once upon a time"}]),
                "Once upon a time",
            ),
        ];
        for (task, value, expected) in cases {
            let output = PipelineOutput::decode(task, value).unwrap();
            assert_eq!(output.to_string(), expected, "task: {}", task);
        }
    }

    #[test]
    fn test_wrong_shape_is_a_decode_error() {
        let err = PipelineOutput::decode(
            Task::Summarization,
            json!([{"label": "POSITIVE", "score": 0.9}]),
        )
        .unwrap_err();
        assert!(matches!(err, DecodeError::Shape { task: Task::Summarization, .. }));
        assert!(err.to_string().starts_with("Unexpected summarization result"));
    }

    #[test]
    fn test_empty_result_is_a_decode_error() {
        let err = PipelineOutput::decode(Task::Translation, json!([])).unwrap_err();
        assert!(matches!(err, DecodeError::Empty { task: Task::Translation }));
    }
}
