use crate::locales::UiText;
use crate::state::WorkflowState;
use crate::ui::Action;
use anyhow::Result;
use inquire::Select;

pub fn show(state: &WorkflowState, t: &UiText) -> Result<Action> {
    println!("\n== {} [{}] ==", t.header_score, state.language);

    if let Some(score) = &state.score {
        println!("  {:<12} {}", t.label_relevance, bar(score.relevance));
        println!("  {:<12} {}", t.label_creativity, bar(score.creativity));
        println!("  {:<12} {}", t.label_feedback, score.feedback);
    }

    let options = vec![
        t.menu_continue,
        t.menu_back,
        t.menu_toggle_language,
        t.menu_quit,
    ];
    let choice = Select::new(t.prompt_menu, options).prompt()?;

    if choice == t.menu_continue {
        Ok(Action::Continue)
    } else if choice == t.menu_back {
        Ok(Action::Back)
    } else if choice == t.menu_toggle_language {
        Ok(Action::ToggleLanguage)
    } else {
        Ok(Action::Quit)
    }
}

fn bar(value: u8) -> String {
    let filled = usize::from(value.min(10));
    format!("{}{} {}/10", "█".repeat(filled), "░".repeat(10 - filled), value)
}
