use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use vna_data::{bootstrap, fetch::HttpSource};

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    // ─── 2) resolve base directory ───────────────────────────────────
    let base = std::env::args().nth(1).unwrap_or_else(|| "data".to_string());
    info!(base = %base, "initializing plate-prefix tables");

    // ─── 3) ensure + load all reference files ────────────────────────
    let source = HttpSource::new()?;
    let tables = bootstrap::initialize(&base, &source)?;

    info!(
        provinces = tables.province_count(),
        cities = tables.city_count(),
        "all data files loaded"
    );
    Ok(())
}
