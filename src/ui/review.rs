use crate::locales::UiText;
use crate::state::WorkflowState;
use crate::ui::Action;
use anyhow::Result;
use inquire::{Editor, Select, Text};

pub fn show(state: &WorkflowState, t: &UiText) -> Result<Action> {
    println!("\n== {} [{}] ==", t.header_review, state.language);
    println!("{}", "-".repeat(72));
    println!("{}", state.script);
    println!("{}", "-".repeat(72));

    let options = vec![
        t.menu_analyze,
        t.menu_refine,
        t.menu_edit,
        t.menu_toggle_language,
        t.menu_quit,
    ];
    let choice = Select::new(t.prompt_menu, options).prompt()?;

    if choice == t.menu_analyze {
        Ok(Action::Analyze)
    } else if choice == t.menu_refine {
        let feedback = Text::new(t.prompt_feedback).prompt()?;
        Ok(Action::Refine(feedback))
    } else if choice == t.menu_edit {
        let edited = Editor::new(t.prompt_edit)
            .with_predefined_text(&state.script)
            .prompt()?;
        Ok(Action::EditScript(edited))
    } else if choice == t.menu_toggle_language {
        Ok(Action::ToggleLanguage)
    } else {
        Ok(Action::Quit)
    }
}
