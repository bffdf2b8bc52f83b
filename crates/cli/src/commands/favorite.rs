use anyhow::Result;

use super::print_json;
use crate::FavoriteCommand;
use crate::app::App;

pub(crate) async fn run(app: &App, cmd: FavoriteCommand) -> Result<()> {
    match cmd {
        FavoriteCommand::Add { target, id, user } => {
            print_json(&app.favorites.add(&user, target, &id).await?)
        },
        FavoriteCommand::Remove { target, id, user } => {
            let removed = app.favorites.remove(&user, target, &id).await?;
            print_json(&serde_json::json!({ "removed": removed, "target": target.as_str(), "id": id }))
        },
        FavoriteCommand::List { user, target } => {
            print_json(&app.favorites.list(&user, target).await?)
        },
    }
}
