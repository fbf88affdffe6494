mod config;
mod generation;
mod llm;
mod locales;
mod state;
mod ui;
mod workflow;

use anyhow::Result;
use config::Config;
use state::Language;
use workflow::WorkflowManager;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    // 1. Load config (config.yml, or GEMINI_API_KEY from the environment)
    let config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            eprintln!("Fix 'config.yml' or remove it to use GEMINI_API_KEY from the environment.");
            return Err(e);
        }
    };

    // 2. Initialize LLM
    let llm = llm::create_llm(&config)?;

    // 3. Run the workflow
    let language = Language::from_code(&config.default_language);
    let mut manager = WorkflowManager::new(llm, language);
    ui::run(&mut manager).await
}
