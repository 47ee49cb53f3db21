pub mod console;

// Interpreter for `Action`, kept apart so this module only lists the actions.
mod run;

#[derive(Debug)]
pub enum Action {
    Console(console::Args),
}

impl Action {
    /// Execute the action.
    /// # Errors
    /// Returns an error if the action fails.
    pub async fn execute(self) -> anyhow::Result<()> {
        run::execute(self).await
    }
}
