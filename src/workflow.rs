use crate::generation;
use crate::llm::LlmClient;
use crate::locales::translations;
use crate::state::{Language, PendingOp, Step, WorkflowState};

/// Owns the single workflow state and performs every transition. Views never
/// mutate state directly; they raise events and the manager applies them.
///
/// `&mut self` receivers make overlapping transitions unrepresentable; the
/// pending guard additionally rejects events raised while a call is in
/// flight, so a second submission is ignored rather than merged.
pub struct WorkflowManager {
    llm: Box<dyn LlmClient>,
    state: WorkflowState,
}

impl WorkflowManager {
    pub fn new(llm: Box<dyn LlmClient>, language: Language) -> Self {
        Self {
            llm,
            state: WorkflowState::new(language),
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    /// collecting-idea: generate the initial script and advance to review.
    /// On failure the step and idea stay put so the user can retry.
    pub async fn submit_idea(&mut self, idea: &str) {
        if self.state.is_busy() || self.state.step != Step::CollectingIdea {
            return;
        }
        let idea = idea.trim();
        if idea.is_empty() {
            return;
        }

        self.state.error = None;
        self.state.pending = Some(PendingOp::Generate);
        let result = generation::generate(self.llm.as_ref(), idea, self.state.language).await;
        self.state.pending = None;

        match result {
            Ok(script) => {
                self.state.idea = idea.to_string();
                self.state.script = script;
                self.state.step = Step::ReviewingScript;
            }
            Err(e) => {
                log::warn!("script generation failed: {e:#}");
                self.state.error =
                    Some(translations(self.state.language).error_generate.to_string());
            }
        }
    }

    /// reviewing-script: replace the script text in place. Applying the same
    /// text twice is a no-op after the first application.
    pub fn edit_script(&mut self, text: &str) {
        if self.state.step != Step::ReviewingScript {
            return;
        }
        self.state.script = text.to_string();
    }

    /// reviewing-script: rewrite the script through the backend using the
    /// user's feedback. The step does not change.
    pub async fn refine_script(&mut self, feedback: &str) {
        if self.state.is_busy() || self.state.step != Step::ReviewingScript {
            return;
        }
        let feedback = feedback.trim();
        if feedback.is_empty() {
            return;
        }

        self.state.error = None;
        self.state.pending = Some(PendingOp::Refine);
        let result = generation::refine(
            self.llm.as_ref(),
            &self.state.script,
            feedback,
            &self.state.idea,
            self.state.language,
        )
        .await;
        self.state.pending = None;

        match result {
            Ok(script) => self.state.script = script,
            Err(e) => {
                log::warn!("script refinement failed: {e:#}");
                self.state.error =
                    Some(translations(self.state.language).error_refine.to_string());
            }
        }
    }

    /// reviewing-script -> previewing-score. Evaluation never fails upward;
    /// a broken call still advances, carrying the degraded zeroed score.
    pub async fn analyze(&mut self) {
        if self.state.is_busy() || self.state.step != Step::ReviewingScript {
            return;
        }

        self.state.error = None;
        self.state.pending = Some(PendingOp::Evaluate);
        let score = generation::evaluate(
            self.llm.as_ref(),
            &self.state.idea,
            &self.state.script,
            self.state.language,
        )
        .await;
        self.state.pending = None;

        self.state.score = Some(score);
        self.state.step = Step::PreviewingScore;
    }

    /// previewing-score -> reviewing-script. The score is dropped: it only
    /// exists at score-review or later, and re-analyzing recreates it.
    pub fn back_to_edit(&mut self) {
        if self.state.step != Step::PreviewingScore {
            return;
        }
        self.state.score = None;
        self.state.step = Step::ReviewingScript;
    }

    /// previewing-score -> final-output. Breakdown never fails upward; an
    /// empty segment list is the failure signal for this operation.
    pub async fn continue_to_breakdown(&mut self) {
        if self.state.is_busy() || self.state.step != Step::PreviewingScore {
            return;
        }

        self.state.error = None;
        self.state.pending = Some(PendingOp::Breakdown);
        let segments =
            generation::breakdown(self.llm.as_ref(), &self.state.script, self.state.language)
                .await;
        self.state.pending = None;

        self.state.segments = segments;
        self.state.step = Step::FinalOutput;
    }

    /// Clears everything except the language and returns to the initial
    /// step. Allowed from any step.
    pub fn restart(&mut self) {
        if self.state.is_busy() {
            return;
        }
        self.state = WorkflowState::new(self.state.language);
    }

    /// Swaps the display language. Without a script this is a pure local
    /// swap; with one, the script is translated and the score and segments
    /// are invalidated, demoting score-review and final-output back to
    /// script review. Ignored outright while a call is in flight.
    pub async fn toggle_language(&mut self) {
        if self.state.is_busy() {
            return;
        }

        let target = self.state.language.toggled();
        self.state.language = target;

        if !self.state.has_script() {
            return;
        }

        self.state.error = None;
        self.state.pending = Some(PendingOp::Translate);
        let result = generation::translate(self.llm.as_ref(), &self.state.script, target).await;
        self.state.pending = None;

        match result {
            Ok(script) => {
                self.state.script = script;
                self.state.score = None;
                self.state.segments.clear();
                if self.state.step != Step::CollectingIdea {
                    self.state.step = Step::ReviewingScript;
                }
            }
            Err(e) => {
                log::warn!("script translation failed: {e:#}");
                self.state.error = Some(translations(target).error_translate.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::EVALUATION_ERROR_FEEDBACK;
    use crate::llm::{ChatOptions, LlmClient};
    use crate::locales::{EN, ZH};
    use crate::state::{ScriptScore, ScriptSegment};
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    /// Scripted backend: consumes one reply per call, front to back, and
    /// counts calls. An exhausted queue fails the call.
    #[derive(Debug)]
    struct MockLlm {
        replies: Mutex<VecDeque<Result<String, String>>>,
        calls: Arc<Mutex<usize>>,
    }

    impl MockLlm {
        fn new(replies: Vec<Result<String, String>>) -> (Box<Self>, Arc<Mutex<usize>>) {
            let calls = Arc::new(Mutex::new(0));
            let mock = Box::new(Self {
                replies: Mutex::new(replies.into()),
                calls: calls.clone(),
            });
            (mock, calls)
        }

        fn silent() -> Box<Self> {
            Self::new(vec![]).0
        }
    }

    #[async_trait]
    impl LlmClient for MockLlm {
        async fn chat(&self, _system: &str, _user: &str, _opts: &ChatOptions) -> Result<String> {
            *self.calls.lock().unwrap() += 1;
            match self.replies.lock().unwrap().pop_front() {
                Some(Ok(text)) => Ok(text),
                Some(Err(msg)) => Err(anyhow!(msg)),
                None => Err(anyhow!("no scripted reply left")),
            }
        }
    }

    fn ok(text: &str) -> Result<String, String> {
        Ok(text.to_string())
    }

    fn fail() -> Result<String, String> {
        Err("backend unreachable".to_string())
    }

    fn segment(id: u32) -> ScriptSegment {
        ScriptSegment {
            id,
            duration: "0:00-0:08".to_string(),
            scene_content: "scene".to_string(),
            image_prompt: "image".to_string(),
            video_prompt: "video".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_success_advances_to_review() {
        let (llm, _) = MockLlm::new(vec![ok("INT. LAB - DAY...")]);
        let mut manager = WorkflowManager::new(llm, Language::En);

        manager.submit_idea("a robot learns to love").await;

        let state = manager.state();
        assert_eq!(state.step, Step::ReviewingScript);
        assert_eq!(state.idea, "a robot learns to love");
        assert_eq!(state.script, "INT. LAB - DAY...");
        assert!(state.error.is_none());
        assert!(!state.is_busy());
    }

    #[tokio::test]
    async fn test_submit_failure_sets_error_and_stays() {
        let (llm, _) = MockLlm::new(vec![fail(), ok("INT. LAB - DAY...")]);
        let mut manager = WorkflowManager::new(llm, Language::En);

        manager.submit_idea("a robot learns to love").await;

        let state = manager.state();
        assert_eq!(state.step, Step::CollectingIdea);
        assert!(state.idea.is_empty());
        assert!(state.script.is_empty());
        assert_eq!(state.error.as_deref(), Some(EN.error_generate));

        // Same action retried succeeds and clears the error
        manager.submit_idea("a robot learns to love").await;
        let state = manager.state();
        assert_eq!(state.step, Step::ReviewingScript);
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_submit_empty_idea_is_ignored() {
        let (llm, calls) = MockLlm::new(vec![ok("unused")]);
        let mut manager = WorkflowManager::new(llm, Language::En);

        manager.submit_idea("   ").await;

        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(manager.state().step, Step::CollectingIdea);
    }

    #[tokio::test]
    async fn test_manual_edit_is_idempotent() {
        let mut manager = WorkflowManager::new(MockLlm::silent(), Language::En);
        manager.state.step = Step::ReviewingScript;
        manager.state.script = "draft".to_string();

        manager.edit_script("final text");
        let after_first = manager.state().clone();
        manager.edit_script("final text");

        assert_eq!(*manager.state(), after_first);
        assert_eq!(manager.state().script, "final text");
    }

    #[tokio::test]
    async fn test_manual_edit_outside_review_is_ignored() {
        let mut manager = WorkflowManager::new(MockLlm::silent(), Language::En);

        manager.edit_script("sneaky script");

        assert!(manager.state().script.is_empty());
    }

    #[tokio::test]
    async fn test_refine_replaces_script_in_place() {
        let (llm, _) = MockLlm::new(vec![ok("better script")]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::ReviewingScript;
        manager.state.script = "draft".to_string();
        manager.state.idea = "idea".to_string();

        manager.refine_script("punch it up").await;

        assert_eq!(manager.state().step, Step::ReviewingScript);
        assert_eq!(manager.state().script, "better script");
    }

    #[tokio::test]
    async fn test_refine_failure_keeps_script() {
        let (llm, _) = MockLlm::new(vec![fail()]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::ReviewingScript;
        manager.state.script = "draft".to_string();

        manager.refine_script("punch it up").await;

        assert_eq!(manager.state().script, "draft");
        assert_eq!(manager.state().error.as_deref(), Some(EN.error_refine));
    }

    #[tokio::test]
    async fn test_analyze_advances_even_with_malformed_score() {
        let (llm, _) = MockLlm::new(vec![ok("definitely not json")]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::ReviewingScript;
        manager.state.script = "script".to_string();

        manager.analyze().await;

        let state = manager.state();
        assert_eq!(state.step, Step::PreviewingScore);
        assert_eq!(
            state.score,
            Some(ScriptScore {
                relevance: 0,
                creativity: 0,
                feedback: EVALUATION_ERROR_FEEDBACK.to_string(),
            })
        );
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_analyze_stores_real_score() {
        let (llm, _) = MockLlm::new(vec![ok(
            r#"{"relevance": 9, "creativity": 7, "feedback": "Vivid."}"#,
        )]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::ReviewingScript;
        manager.state.script = "script".to_string();

        manager.analyze().await;

        let score = manager.state().score.as_ref().unwrap();
        assert_eq!(score.relevance, 9);
        assert_eq!(score.creativity, 7);
    }

    #[tokio::test]
    async fn test_back_drops_score_and_returns_to_review() {
        let mut manager = WorkflowManager::new(MockLlm::silent(), Language::En);
        manager.state.step = Step::PreviewingScore;
        manager.state.score = Some(ScriptScore::default());

        manager.back_to_edit();

        assert_eq!(manager.state().step, Step::ReviewingScript);
        assert!(manager.state().score.is_none());
    }

    #[tokio::test]
    async fn test_breakdown_failure_still_advances_with_empty_list() {
        let (llm, _) = MockLlm::new(vec![fail()]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::PreviewingScore;
        manager.state.script = "script".to_string();
        manager.state.score = Some(ScriptScore::default());

        manager.continue_to_breakdown().await;

        let state = manager.state();
        assert_eq!(state.step, Step::FinalOutput);
        assert!(state.segments.is_empty());
        assert!(state.error.is_none());
    }

    #[tokio::test]
    async fn test_breakdown_stores_segments() {
        let (llm, _) = MockLlm::new(vec![ok(
            r#"[{"id": 1, "duration": "0:00-0:08", "sceneContent": "Opening", "imagePrompt": "wide", "videoPrompt": "pan"}]"#,
        )]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::PreviewingScore;
        manager.state.script = "script".to_string();
        manager.state.score = Some(ScriptScore::default());

        manager.continue_to_breakdown().await;

        assert_eq!(manager.state().step, Step::FinalOutput);
        assert_eq!(manager.state().segments.len(), 1);
    }

    #[tokio::test]
    async fn test_restart_round_trip() {
        let mut manager = WorkflowManager::new(MockLlm::silent(), Language::Zh);
        manager.state.step = Step::FinalOutput;
        manager.state.idea = "idea".to_string();
        manager.state.script = "script".to_string();
        manager.state.score = Some(ScriptScore::default());
        manager.state.segments = vec![segment(1)];
        manager.state.error = Some("stale error".to_string());

        manager.restart();

        assert_eq!(*manager.state(), WorkflowState::new(Language::Zh));
    }

    #[tokio::test]
    async fn test_toggle_language_without_script_is_local() {
        let (llm, calls) = MockLlm::new(vec![ok("unused")]);
        let mut manager = WorkflowManager::new(llm, Language::En);

        manager.toggle_language().await;

        assert_eq!(*calls.lock().unwrap(), 0);
        assert_eq!(manager.state().language, Language::Zh);
        assert_eq!(manager.state().step, Step::CollectingIdea);
    }

    #[tokio::test]
    async fn test_toggle_language_translates_and_invalidates() {
        let (llm, calls) = MockLlm::new(vec![ok("翻译后的剧本")]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::FinalOutput;
        manager.state.script = "INT. LAB - DAY".to_string();
        manager.state.score = Some(ScriptScore::default());
        manager.state.segments = vec![segment(1), segment(2)];

        manager.toggle_language().await;

        let state = manager.state();
        assert_eq!(*calls.lock().unwrap(), 1);
        assert_eq!(state.language, Language::Zh);
        assert_eq!(state.script, "翻译后的剧本");
        assert!(state.score.is_none());
        assert!(state.segments.is_empty());
        assert_eq!(state.step, Step::ReviewingScript);
    }

    #[tokio::test]
    async fn test_toggle_language_failure_keeps_content() {
        let (llm, _) = MockLlm::new(vec![fail()]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::PreviewingScore;
        manager.state.script = "INT. LAB - DAY".to_string();
        manager.state.score = Some(ScriptScore::default());

        manager.toggle_language().await;

        let state = manager.state();
        assert_eq!(state.language, Language::Zh);
        assert_eq!(state.script, "INT. LAB - DAY");
        assert!(state.score.is_some());
        assert_eq!(state.step, Step::PreviewingScore);
        assert_eq!(state.error.as_deref(), Some(ZH.error_translate));
    }

    #[tokio::test]
    async fn test_events_ignored_while_busy() {
        let (llm, calls) = MockLlm::new(vec![ok("unused")]);
        let mut manager = WorkflowManager::new(llm, Language::En);
        manager.state.step = Step::ReviewingScript;
        manager.state.script = "script".to_string();
        manager.state.pending = Some(PendingOp::Refine);
        let before = manager.state().clone();

        manager.toggle_language().await;
        assert_eq!(*manager.state(), before);

        manager.analyze().await;
        assert_eq!(*manager.state(), before);

        manager.refine_script("feedback").await;
        assert_eq!(*manager.state(), before);

        manager.restart();
        assert_eq!(*manager.state(), before);

        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_full_happy_path() {
        let (llm, calls) = MockLlm::new(vec![
            ok("INT. LAB - DAY..."),
            ok(r#"{"relevance": 8, "creativity": 9, "feedback": "Strong."}"#),
            ok(r#"[{"id": 1, "duration": "0:00-0:08", "sceneContent": "Opening", "imagePrompt": "wide", "videoPrompt": "pan"}]"#),
        ]);
        let mut manager = WorkflowManager::new(llm, Language::En);

        manager.submit_idea("a robot learns to love").await;
        assert_eq!(manager.state().step, Step::ReviewingScript);

        manager.analyze().await;
        assert_eq!(manager.state().step, Step::PreviewingScore);
        assert!(manager.state().score.is_some());

        manager.continue_to_breakdown().await;
        assert_eq!(manager.state().step, Step::FinalOutput);
        assert_eq!(manager.state().segments.len(), 1);
        assert_eq!(*calls.lock().unwrap(), 3);

        manager.restart();
        assert_eq!(*manager.state(), WorkflowState::new(Language::En));
    }
}
