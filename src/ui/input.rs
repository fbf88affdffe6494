use crate::locales::UiText;
use crate::state::WorkflowState;
use crate::ui::Action;
use anyhow::Result;
use inquire::{Select, Text};

pub fn show(state: &WorkflowState, t: &UiText) -> Result<Action> {
    println!("\n== {} [{}] ==", t.header_idea, state.language);

    let options = vec![t.menu_submit, t.menu_toggle_language, t.menu_quit];
    let choice = Select::new(t.prompt_menu, options).prompt()?;

    if choice == t.menu_submit {
        let idea = Text::new(t.prompt_idea).prompt()?;
        Ok(Action::SubmitIdea(idea))
    } else if choice == t.menu_toggle_language {
        Ok(Action::ToggleLanguage)
    } else {
        Ok(Action::Quit)
    }
}
