use crate::locales::UiText;
use crate::state::WorkflowState;
use crate::ui::Action;
use anyhow::Result;
use inquire::{Confirm, Select};

pub fn show(state: &WorkflowState, t: &UiText) -> Result<Action> {
    println!("\n== {} [{}] ==", t.header_dashboard, state.language);
    println!("  {}: {}", t.label_original_idea, state.idea);

    if let Some(score) = &state.score {
        println!(
            "  {} {}/10 · {} {}/10 · {}",
            t.label_relevance, score.relevance, t.label_creativity, score.creativity, score.feedback
        );
    }

    if state.segments.is_empty() {
        println!("\n  {}", t.empty_breakdown_notice);
    }

    for segment in &state.segments {
        println!("\n  #{}  {}", segment.id, segment.duration);
        println!("    {}: {}", t.label_scene, segment.scene_content);
        println!("    {}: {}", t.label_image_prompt, segment.image_prompt);
        println!("    {}: {}", t.label_video_prompt, segment.video_prompt);
    }
    println!();

    loop {
        let options = vec![t.menu_restart, t.menu_toggle_language, t.menu_quit];
        let choice = Select::new(t.prompt_menu, options).prompt()?;

        if choice == t.menu_restart {
            if Confirm::new(t.confirm_restart).with_default(false).prompt()? {
                return Ok(Action::Restart);
            }
            // Declined, offer the menu again
        } else if choice == t.menu_toggle_language {
            return Ok(Action::ToggleLanguage);
        } else {
            return Ok(Action::Quit);
        }
    }
}
