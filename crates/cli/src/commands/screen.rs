use anyhow::Result;
use inspira_core::{ScreenInput, ScreenPatch};

use super::project::search_query;
use super::{found, print_deleted, print_json};
use crate::ScreenCommand;
use crate::app::App;

pub(crate) async fn run(app: &App, cmd: ScreenCommand) -> Result<()> {
    match cmd {
        ScreenCommand::Add { name, image_url, project, description, tags } => {
            let screen = app
                .screens
                .create(ScreenInput { project_id: project, name, image_url, description, tags })
                .await?;
            print_json(&screen)
        },
        ScreenCommand::Get { id } => {
            let screen = found(app.screens.get(&id).await?, "screen", &id)?;
            print_json(&screen)
        },
        ScreenCommand::List { project, page, page_size } => {
            print_json(&app.screens.list(project.as_deref(), page, page_size).await?)
        },
        ScreenCommand::Update { id, name, image_url, project, description, tags } => {
            let patch = ScreenPatch { project_id: project, name, image_url, description, tags };
            print_json(&app.screens.update(&id, patch).await?)
        },
        ScreenCommand::Delete { id } => {
            print_deleted("screen", &id, app.screens.delete(&id).await?)
        },
        ScreenCommand::Search(args) => print_json(&app.screens.search(&search_query(args)).await?),
    }
}
