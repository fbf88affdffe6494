use crate::llm::{ChatOptions, LlmClient};
use crate::state::{Language, ScriptScore, ScriptSegment};
use anyhow::{Context, Result};
use serde_json::json;

/// Feedback string of the degraded score returned when evaluation fails.
/// Kept in English regardless of UI language, it marks the result as broken.
pub const EVALUATION_ERROR_FEEDBACK: &str = "Error evaluating script.";

const FALLBACK_SCRIPT: &str = "Failed to generate script.";

const MAX_SCORE: u8 = 10;

/// Generates the initial script from the user's idea. Free-form text; a
/// blank response is replaced with fixed fallback text so the script is
/// never empty.
pub async fn generate(llm: &dyn LlmClient, idea: &str, language: Language) -> Result<String> {
    let lang_instruction = match language {
        Language::Zh => "Output the FINAL SCRIPT content in Simplified Chinese (简体中文).",
        Language::En => "Output the FINAL SCRIPT content in English.",
    };

    let prompt = format!(
        "Based on the following idea, write a compelling, cinematic video script.\n\
         \n\
         User Idea: \"{idea}\"\n\
         \n\
         Requirements:\n\
         - Format it professionally (Scene Headers, Action, Dialogue).\n\
         - Focus on visual storytelling, emotion, and pacing.\n\
         - Keep it concise enough for a short film or video content (approx 1-3 minutes).\n\
         - {lang_instruction}\n\
         - Output ONLY the script text."
    );

    let text = llm
        .chat(
            "You are a world-class creative screenwriter and director.",
            &prompt,
            &ChatOptions::creative(0.8),
        )
        .await?;

    if text.trim().is_empty() {
        Ok(FALLBACK_SCRIPT.to_string())
    } else {
        Ok(text)
    }
}

/// Rewrites the script according to the user's feedback, same contract as
/// [`generate`].
pub async fn refine(
    llm: &dyn LlmClient,
    script: &str,
    feedback: &str,
    idea: &str,
    language: Language,
) -> Result<String> {
    let lang_instruction = match language {
        Language::Zh => "Rewrite the script in Simplified Chinese (简体中文).",
        Language::En => "Rewrite the script in English.",
    };

    let prompt = format!(
        "Original Idea: \"{idea}\"\n\
         Current Script:\n\
         \"\"\"\n\
         {script}\n\
         \"\"\"\n\
         \n\
         User Feedback/Change Request: \"{feedback}\"\n\
         \n\
         Please rewrite the script incorporating the user's feedback while \
         maintaining the high cinematic quality.\n\
         {lang_instruction}\n\
         Output ONLY the new script text."
    );

    let text = llm
        .chat(
            "You are a professional script doctor.",
            &prompt,
            &ChatOptions::creative(0.7),
        )
        .await?;

    if text.trim().is_empty() {
        Ok(FALLBACK_SCRIPT.to_string())
    } else {
        Ok(text)
    }
}

/// Translates the script to the target language, preserving the screenplay
/// format. A blank response yields the original script unchanged; callers
/// must not assume translation always mutates content. Transport errors
/// still propagate.
pub async fn translate(llm: &dyn LlmClient, script: &str, target: Language) -> Result<String> {
    let target_name = match target {
        Language::Zh => "Simplified Chinese (简体中文)",
        Language::En => "English",
    };

    let prompt = format!(
        "Translate the following script to {target_name}.\n\
         \n\
         Rules:\n\
         - Maintain the professional screenplay format strictly (Scene Headers, Action, Dialogue).\n\
         - Keep the original tone, emotion, and creativity.\n\
         - Do not summarize; translate the full content.\n\
         - Output ONLY the translated script text.\n\
         \n\
         Script:\n\
         \"\"\"\n\
         {script}\n\
         \"\"\""
    );

    let text = llm
        .chat(
            "You are a professional translator for screenplays.",
            &prompt,
            &ChatOptions::creative(0.3),
        )
        .await?;

    if text.trim().is_empty() {
        Ok(script.to_string())
    } else {
        Ok(text)
    }
}

/// Scores the script against the original idea. Never fails: any transport,
/// parse, or shape error degrades to a zeroed score with
/// [`EVALUATION_ERROR_FEEDBACK`] so the dashboard can still render.
pub async fn evaluate(
    llm: &dyn LlmClient,
    idea: &str,
    script: &str,
    language: Language,
) -> ScriptScore {
    match try_evaluate(llm, idea, script, language).await {
        Ok(score) => score,
        Err(e) => {
            log::warn!("script evaluation failed: {e:#}");
            ScriptScore {
                relevance: 0,
                creativity: 0,
                feedback: EVALUATION_ERROR_FEEDBACK.to_string(),
            }
        }
    }
}

async fn try_evaluate(
    llm: &dyn LlmClient,
    idea: &str,
    script: &str,
    language: Language,
) -> Result<ScriptScore> {
    let lang_instruction = match language {
        Language::Zh => "Provide the 'feedback' text in Simplified Chinese (简体中文).",
        Language::En => "Provide the 'feedback' text in English.",
    };

    let prompt = format!(
        "Analyze the following script against the original user idea.\n\
         \n\
         Original Idea: \"{idea}\"\n\
         Final Script: \"{script}\"\n\
         \n\
         Provide a score (1-10) for:\n\
         1. Relevance (Is it based on the description?)\n\
         2. Creativity (Is the structure vivid, emotional, and creative?)\n\
         \n\
         {lang_instruction}\n\
         Also provide a brief textual summary of the critique (max 30 words)."
    );

    let schema = json!({
        "type": "OBJECT",
        "properties": {
            "relevance": { "type": "INTEGER", "description": "Score from 1-10" },
            "creativity": { "type": "INTEGER", "description": "Score from 1-10" },
            "feedback": { "type": "STRING", "description": "Brief critique" }
        },
        "required": ["relevance", "creativity", "feedback"]
    });

    let response = llm
        .chat(
            "You are a film critic scoring scripts for production readiness.",
            &prompt,
            &ChatOptions::json(schema),
        )
        .await?;

    let clean = strip_code_blocks(&response);
    let mut score: ScriptScore = serde_json::from_str(&clean)
        .with_context(|| format!("Failed to parse score JSON: {clean}"))?;
    score.relevance = score.relevance.min(MAX_SCORE);
    score.creativity = score.creativity.min(MAX_SCORE);
    Ok(score)
}

/// Breaks the script into ~8 second shots with image/video prompts. Never
/// fails: any error degrades to an empty list, which callers must treat as
/// the failure signal for this operation.
pub async fn breakdown(
    llm: &dyn LlmClient,
    script: &str,
    language: Language,
) -> Vec<ScriptSegment> {
    match try_breakdown(llm, script, language).await {
        Ok(segments) => segments,
        Err(e) => {
            log::warn!("production breakdown failed: {e:#}");
            Vec::new()
        }
    }
}

async fn try_breakdown(
    llm: &dyn LlmClient,
    script: &str,
    language: Language,
) -> Result<Vec<ScriptSegment>> {
    let lang_instruction = match language {
        Language::Zh => {
            "Translate the 'sceneContent' to Simplified Chinese. However, keep \
             'imagePrompt' and 'videoPrompt' strictly in English for better \
             compatibility with AI generation tools."
        }
        Language::En => "Keep all content in English.",
    };

    let prompt = format!(
        "Task 1: Break the following script into logical 8-second visual segments/shots.\n\
         Task 2: For EACH segment, act as a Top-Tier Visual Composition Designer to write \
         an AI Image Generation Prompt.\n\
            - Image Prompt Focus: Lighting, camera angle, color palette, texture, \
         composition, style (e.g., cinematic, photorealistic, 8k).\n\
         Task 3: For EACH segment, act as a Top-Tier Hollywood Director to write an AI \
         Video Generation Prompt.\n\
            - Video Prompt Focus: Camera movement (pan, dolly, tracking), character \
         action, physics, emotion, pacing.\n\
         \n\
         {lang_instruction}\n\
         \n\
         Script:\n\
         \"\"\"\n\
         {script}\n\
         \"\"\"\n\
         \n\
         Return the result as a JSON array."
    );

    let schema = json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "id": { "type": "INTEGER" },
                "duration": { "type": "STRING", "description": "e.g., '0:00-0:08'" },
                "sceneContent": { "type": "STRING", "description": "The content of the script covered in this segment" },
                "imagePrompt": { "type": "STRING", "description": "Detailed MJ/Flux/SD prompt (English)" },
                "videoPrompt": { "type": "STRING", "description": "Detailed Runway/Pika/Sora prompt (English)" }
            },
            "required": ["id", "duration", "sceneContent", "imagePrompt", "videoPrompt"]
        }
    });

    let response = llm
        .chat(
            "You are a technical post-production supervisor and prompt engineer.",
            &prompt,
            &ChatOptions::json(schema),
        )
        .await?;

    let clean = strip_code_blocks(&response);
    let segments: Vec<ScriptSegment> = serde_json::from_str(&clean)
        .with_context(|| format!("Failed to parse breakdown JSON: {clean}"))?;
    Ok(segments)
}

/// LLMs occasionally wrap JSON payloads in markdown fences even in JSON
/// mode.
pub fn strip_code_blocks(s: &str) -> String {
    let s = s.trim();
    if s.starts_with("```json") {
        s.trim_start_matches("```json")
            .trim_end_matches("```")
            .trim()
            .to_string()
    } else if s.starts_with("```") {
        s.trim_start_matches("```")
            .trim_end_matches("```")
            .trim()
            .to_string()
    } else {
        s.to_string()
    }
}
