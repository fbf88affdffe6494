mod dashboard;
mod input;
mod review;
mod score;

use crate::locales::translations;
use crate::state::Step;
use crate::workflow::WorkflowManager;
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// User intents raised by the step views. Views never mutate state; every
/// action is dispatched to the workflow manager by the event loop.
pub enum Action {
    SubmitIdea(String),
    EditScript(String),
    Refine(String),
    Analyze,
    Back,
    Continue,
    Restart,
    ToggleLanguage,
    Quit,
}

pub async fn run(manager: &mut WorkflowManager) -> Result<()> {
    let t = translations(manager.state().language);
    println!("\n{} — {}\n", t.app_title, t.tagline);

    loop {
        let t = translations(manager.state().language);

        if let Some(error) = &manager.state().error {
            eprintln!("\n  !! {error}\n");
        }

        let view_result = match manager.state().step {
            Step::CollectingIdea => input::show(manager.state(), t),
            Step::ReviewingScript => review::show(manager.state(), t),
            Step::PreviewingScore => score::show(manager.state(), t),
            Step::FinalOutput => dashboard::show(manager.state(), t),
        };

        let action = match view_result {
            Ok(action) => action,
            Err(e) if is_cancel(&e) => break,
            Err(e) => return Err(e),
        };

        match action {
            Action::SubmitIdea(idea) => {
                with_spinner(t.loading_generate, manager.submit_idea(&idea)).await
            }
            Action::EditScript(text) => manager.edit_script(&text),
            Action::Refine(feedback) => {
                with_spinner(t.loading_refine, manager.refine_script(&feedback)).await
            }
            Action::Analyze => with_spinner(t.loading_evaluate, manager.analyze()).await,
            Action::Back => manager.back_to_edit(),
            Action::Continue => {
                with_spinner(t.loading_breakdown, manager.continue_to_breakdown()).await
            }
            Action::Restart => manager.restart(),
            Action::ToggleLanguage => {
                // Pure language swap when no script exists; the spinner only
                // matters for the translation round trip. The loading text
                // is shown in the language being switched to.
                let next = translations(manager.state().language.toggled());
                if manager.state().has_script() {
                    with_spinner(next.loading_translate, manager.toggle_language()).await
                } else {
                    manager.toggle_language().await
                }
            }
            Action::Quit => break,
        }
    }

    Ok(())
}

/// Shows a ticking spinner with the operation's localized loading message
/// for the duration of one generation call.
async fn with_spinner<F: Future<Output = ()>>(message: &str, fut: F) {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));

    fut.await;

    pb.finish_and_clear();
}

/// Esc / Ctrl-C inside a prompt means "leave", not a hard error.
fn is_cancel(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<inquire::InquireError>(),
        Some(inquire::InquireError::OperationCanceled)
            | Some(inquire::InquireError::OperationInterrupted)
    )
}
