use tracing_subscriber::{fmt, EnvFilter};

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::from_default_env()
        .add_directive("school_listings=debug".parse()?)
        .add_directive("sea_orm=warn".parse()?)
        .add_directive("sqlx=warn".parse()?);

    fmt().with_env_filter(filter).init();

    Ok(())
}
