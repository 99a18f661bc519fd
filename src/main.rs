use color_eyre::eyre::WrapErr;
use podcastr::{
    player::{PlayerConfig, catalog::load_episodes},
    ui::app::App,
    util::{hook::set_panic_hook, log::initialize_logging},
};
use tracing::warn;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> color_eyre::Result<()> {
    setup()?;

    let mut config = PlayerConfig::from_env()?;
    if let Some(path) = std::env::args_os().nth(1) {
        config = config.with_catalog_path(path);
    }

    let catalog = match &config.catalog_path {
        Some(path) => load_episodes(path).wrap_err("could not load the episode catalog")?,
        None => {
            warn!("no catalog given, starting with an empty episode list");
            Vec::new()
        }
    };

    let mut app = App::new(&config, catalog);
    app.run().await
}

fn setup() -> color_eyre::Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();
    set_panic_hook();
    initialize_logging()
}
