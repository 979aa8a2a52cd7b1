use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five NLP tasks the playground can run.
///
/// The serialized name is the task kind the inference backend expects
/// (e.g. `"question-answering"`).
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Task {
    #[default]
    SentimentAnalysis,
    Summarization,
    QuestionAnswering,
    Translation,
    TextGeneration,
}

impl Task {
    pub const ALL: [Task; 5] = [
        Task::SentimentAnalysis,
        Task::Summarization,
        Task::QuestionAnswering,
        Task::Translation,
        Task::TextGeneration,
    ];

    /// Task kind string passed to the inference backend.
    pub fn kind(self) -> &'static str {
        self.into()
    }

    /// Model identifier requested for this task.
    pub fn model_id(self) -> &'static str {
        match self {
            Task::SentimentAnalysis => "distilbert/distilbert-base-uncased-finetuned-sst-2-english",
            Task::Summarization => "sshleifer/distilbart-cnn-6-6",
            Task::QuestionAnswering => "distilbert/distilbert-base-cased-distilled-squad",
            Task::Translation => "facebook/nllb-200-distilled-600M",
            Task::TextGeneration => "openai-community/gpt2",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Task::SentimentAnalysis => "Sentiment Analysis",
            Task::Summarization => "Summarization",
            Task::QuestionAnswering => "Question Answering",
            Task::Translation => "Translation (EN → FR)",
            Task::TextGeneration => "Text Generation",
        }
    }

    /// Placeholder shown in the empty input area.
    pub fn placeholder(self) -> &'static str {
        match self {
            Task::SentimentAnalysis => "Enter text to analyze its sentiment...",
            Task::Summarization => "Paste a long passage to summarize...",
            Task::QuestionAnswering => {
                "Enter your question, then a line with ---, then the context.\n\nExample:\nWhat is AI?\n---\nAI is a field of computer science."
            }
            Task::Translation => "Enter English text to translate to French...",
            Task::TextGeneration => "Enter a prompt and the model will continue it...",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Task::SentimentAnalysis => "Classify text as positive or negative.",
            Task::Summarization => "Condense a passage into a short summary.",
            Task::QuestionAnswering => "Extract an answer to a question from a context passage.",
            Task::Translation => "Translate English text into French.",
            Task::TextGeneration => "Continue a prompt with generated text.",
        }
    }
}

/// Returned when a task kind string is not one of the five supported tasks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown task '{0}'")]
pub struct TaskParseError(pub String);

impl FromStr for Task {
    type Err = TaskParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Task::ALL
            .into_iter()
            .find(|task| task.kind() == s)
            .ok_or_else(|| TaskParseError(s.to_string()))
    }
}

/// Static information about a task, sent to the task selector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "specta", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct TaskCatalogEntry {
    pub task: Task,
    pub display_name: String,
    pub description: String,
    /// Model requested from the backend (e.g. "openai-community/gpt2")
    pub model_id: String,
    pub placeholder: String,
}

impl From<Task> for TaskCatalogEntry {
    fn from(task: Task) -> Self {
        Self {
            task,
            display_name: task.display_name().into(),
            description: task.description().into(),
            model_id: task.model_id().into(),
            placeholder: task.placeholder().into(),
        }
    }
}

/// Hardcoded catalog of the tasks the playground offers, in selector order.
pub fn task_catalog() -> Vec<TaskCatalogEntry> {
    Task::ALL.into_iter().map(TaskCatalogEntry::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_from_str() {
        for task in Task::ALL {
            assert_eq!(task.kind().parse::<Task>(), Ok(task));
        }
    }

    #[test]
    fn test_serde_name_matches_kind() {
        for task in Task::ALL {
            let json = serde_json::to_value(task).unwrap();
            assert_eq!(json, serde_json::Value::String(task.kind().to_string()));
        }
    }

    #[test]
    fn test_unknown_kind_is_rejected() {
        let err = "fill-mask".parse::<Task>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown task 'fill-mask'");
    }

    #[test]
    fn test_catalog_lists_every_task_once() {
        let catalog = task_catalog();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog[0].task, Task::default());
        assert_eq!(catalog[2].model_id, "distilbert/distilbert-base-cased-distilled-squad");
    }
}
