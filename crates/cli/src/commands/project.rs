use anyhow::Result;
use inspira_core::{ProjectInput, ProjectPatch, TagQuery};

use super::{found, print_deleted, print_json};
use crate::app::App;
use crate::{ProjectCommand, SearchArgs};

pub(crate) fn search_query(args: SearchArgs) -> TagQuery {
    TagQuery::new(args.tags, args.mode)
        .with_min_percentage(args.min_percentage)
        .with_page(args.page, args.page_size)
}

pub(crate) async fn run(app: &App, cmd: ProjectCommand) -> Result<()> {
    match cmd {
        ProjectCommand::Add { name, description, platform, tags, cover_url } => {
            let project = app
                .projects
                .create(ProjectInput { name, description, platform, tags, cover_url })
                .await?;
            print_json(&project)
        },
        ProjectCommand::Get { id } => {
            let project = found(app.projects.get(&id).await?, "project", &id)?;
            print_json(&project)
        },
        ProjectCommand::List { page, page_size } => {
            print_json(&app.projects.list(page, page_size).await?)
        },
        ProjectCommand::Update { id, name, description, platform, tags, cover_url } => {
            let patch = ProjectPatch { name, description, platform, tags, cover_url };
            print_json(&app.projects.update(&id, patch).await?)
        },
        ProjectCommand::Delete { id } => {
            print_deleted("project", &id, app.projects.delete(&id).await?)
        },
        ProjectCommand::Search(args) => {
            print_json(&app.projects.search(&search_query(args)).await?)
        },
    }
}
