use serde::{Deserialize, Serialize};
use std::fmt;

/// Display languages supported by the UI and by every generation prompt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    En,
    Zh,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Zh,
            Language::Zh => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
        }
    }

    /// Anything that is not "zh" falls back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "zh" => Language::Zh,
            _ => Language::En,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// The single active step of the workflow.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Step {
    #[default]
    CollectingIdea,
    ReviewingScript,
    PreviewingScore,
    FinalOutput,
}

/// Quality score produced by one evaluation call.
///
/// A zeroed score carrying the evaluation error feedback string is the
/// degraded result of a failed call, not a real judgement.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptScore {
    pub relevance: u8,
    pub creativity: u8,
    pub feedback: String,
}

/// One ~8 second shot of the production breakdown, paired with prompts for
/// downstream image and video generation tools.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScriptSegment {
    pub id: u32,
    pub duration: String,
    pub scene_content: String,
    pub image_prompt: String,
    pub video_prompt: String,
}

/// Which generation call is currently in flight. At most one exists at a
/// time; guarded events are ignored while this is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PendingOp {
    Generate,
    Refine,
    Evaluate,
    Breakdown,
    Translate,
}

/// Single source of truth for the whole workflow. Mutated only by
/// `WorkflowManager`, always as one atomic transition.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WorkflowState {
    pub step: Step,
    pub language: Language,
    pub idea: String,
    pub script: String,
    pub score: Option<ScriptScore>,
    pub segments: Vec<ScriptSegment>,
    pub error: Option<String>,
    pub pending: Option<PendingOp>,
}

impl WorkflowState {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            ..Default::default()
        }
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn has_script(&self) -> bool {
        !self.script.is_empty()
    }
}
