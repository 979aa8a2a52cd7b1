use serde::Serialize;
use serde_json::{json, Value};

use crate::error::InputError;
use crate::task::Task;

/// Line separating the question from its context in question answering input.
pub const QUESTION_DELIMITER: &str = "\n---\n";

pub const SUMMARY_MAX_LENGTH: u32 = 100;
pub const SUMMARY_MIN_LENGTH: u32 = 30;
pub const SOURCE_LANGUAGE: &str = "eng_Latn";
pub const TARGET_LANGUAGE: &str = "fra_Latn";
pub const GENERATION_MAX_NEW_TOKENS: u32 = 50;
pub const GENERATION_TEMPERATURE: f64 = 0.9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummarizationParams {
    pub max_length: u32,
    pub min_length: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranslationParams {
    pub src_lang: String,
    pub tgt_lang: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f64,
}

/// Arguments for one pipeline call, one variant per task.
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineRequest {
    Sentiment {
        text: String,
    },
    Summarization {
        text: String,
        params: SummarizationParams,
    },
    QuestionAnswering {
        question: String,
        context: String,
    },
    Translation {
        text: String,
        params: TranslationParams,
    },
    TextGeneration {
        text: String,
        params: GenerationParams,
    },
}

impl PipelineRequest {
    /// Build the call for `task` from raw user input.
    pub fn from_input(task: Task, input: &str) -> Result<Self, InputError> {
        let text = input.to_string();
        let request = match task {
            Task::SentimentAnalysis => Self::Sentiment { text },
            Task::Summarization => Self::Summarization {
                text,
                params: SummarizationParams {
                    max_length: SUMMARY_MAX_LENGTH,
                    min_length: SUMMARY_MIN_LENGTH,
                },
            },
            Task::QuestionAnswering => {
                let (question, context) = split_question(input)?;
                Self::QuestionAnswering { question, context }
            }
            Task::Translation => Self::Translation {
                text,
                params: TranslationParams {
                    src_lang: SOURCE_LANGUAGE.into(),
                    tgt_lang: TARGET_LANGUAGE.into(),
                },
            },
            Task::TextGeneration => Self::TextGeneration {
                text,
                params: GenerationParams {
                    max_new_tokens: GENERATION_MAX_NEW_TOKENS,
                    temperature: GENERATION_TEMPERATURE,
                },
            },
        };
        Ok(request)
    }

    pub fn task(&self) -> Task {
        match self {
            Self::Sentiment { .. } => Task::SentimentAnalysis,
            Self::Summarization { .. } => Task::Summarization,
            Self::QuestionAnswering { .. } => Task::QuestionAnswering,
            Self::Translation { .. } => Task::Translation,
            Self::TextGeneration { .. } => Task::TextGeneration,
        }
    }

    /// Request body in the Hugging Face Inference API format.
    pub fn to_payload(&self) -> Value {
        match self {
            Self::Sentiment { text } => json!({ "inputs": text }),
            Self::Summarization { text, params } => json!({ "inputs": text, "parameters": params }),
            Self::QuestionAnswering { question, context } => json!({
                "inputs": { "question": question, "context": context }
            }),
            Self::Translation { text, params } => json!({ "inputs": text, "parameters": params }),
            // Generated text includes the prompt
            Self::TextGeneration { text, params } => json!({
                "inputs": text,
                "parameters": {
                    "max_new_tokens": params.max_new_tokens,
                    "temperature": params.temperature,
                    "return_full_text": true,
                }
            }),
        }
    }
}

/// Split `question\n---\ncontext` into its two trimmed halves.
pub fn split_question(input: &str) -> Result<(String, String), InputError> {
    let normalized = input.replace("\r\n", "\n");
    let segments: Vec<&str> = normalized.split(QUESTION_DELIMITER).map(str::trim).collect();

    match segments.as_slice() {
        [question, context] if !question.is_empty() && !context.is_empty() => {
            Ok((question.to_string(), context.to_string()))
        }
        _ => Err(InputError::QuestionFormat),
    }
}
