use std::path::Path;

use log::info;

mod console;
mod controller;
mod errors;
mod settings;
mod store;
mod types;
mod view;

use errors::Result;
use settings::{Settings, SETTINGS_FILE};
use store::LocalStore;

#[actix_rt::main]
async fn main() -> Result<()> {
    env_logger::init();

    let settings = Settings::load(Path::new(SETTINGS_FILE))?;
    info!(
        "local store at {:?}, remote document at {}",
        settings.local_store_path, settings.remote_url
    );

    // first run gets the stock portfolio entries
    LocalStore::new(&settings.local_store_path).ensure_seeded()?;

    console::run(settings).await
}
