use anyhow::Result;
use inspira_core::ModelConfigInput;

use super::{print_deleted, print_json};
use crate::ModelCommand;
use crate::app::App;

pub(crate) async fn run(app: &App, cmd: ModelCommand) -> Result<()> {
    match cmd {
        ModelCommand::Add { name, purpose, model, api_key, base_url, temperature, is_default } => {
            let config = app
                .models
                .create(ModelConfigInput {
                    name,
                    purpose,
                    model,
                    base_url,
                    api_key,
                    temperature,
                    is_default,
                })
                .await?;
            print_json(&config)
        },
        ModelCommand::List { purpose } => {
            print_json(&app.models.list(purpose).await?)
        },
        ModelCommand::SetDefault { id } => print_json(&app.models.set_default(&id).await?),
        ModelCommand::Delete { id } => {
            print_deleted("model config", &id, app.models.delete(&id).await?)
        },
    }
}
