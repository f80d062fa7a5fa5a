use log::{error, info};
use school_listings::config::get_settings;
use school_listings::services::{
    connection_db, database_service, listing_type_service, logger_service,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    logger_service::init()?;
    info!("Starting school listings");

    // must run before the settings are first read
    dotenv::dotenv().ok();

    let config = get_settings().config.clone();
    rust_i18n::set_locale(config.language.as_str());

    let rt = tokio::runtime::Runtime::new()?;

    rt.block_on(async {
        let db = connection_db::get_connection().await?;
        database_service::prepare_database(&db, &config.database_url).await?;

        let types = listing_type_service::find_all(&db).await?;
        info!("{} listing type(s)", types.len());
        for listing_type in &types {
            let count = listing_type.get_nr_listings(&db).await?;
            info!("  {}: {} listing(s)", listing_type, count);
        }

        Ok::<(), Box<dyn Error>>(())
    })
    .map_err(|e| {
        error!("Startup failed: {}", e);
        e
    })
}
