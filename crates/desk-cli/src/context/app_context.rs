use std::path::Path;

use anyhow::Context;
use desk_config::DeskConfig;
use desk_core::taxonomy::Taxonomy;
use desk_db::integrity::ScanReport;
use desk_db::service::DeskService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: DeskService,
    pub config: DeskConfig,
}

impl AppContext {
    /// Open the store and bring it to a consistent state before any command
    /// runs: reload the taxonomy file if configured, then repair orphans.
    pub async fn init(config: DeskConfig) -> anyhow::Result<Self> {
        let service = DeskService::open(&config)
            .await
            .with_context(|| format!("failed to open document store at {}", config.store.path))?;
        let ctx = Self { service, config };

        if ctx.config.taxonomy.reload_on_start {
            ctx.reload_taxonomy_file().await?;
        }
        if ctx.config.integrity.scan_on_start {
            let report = ctx
                .service
                .scanner()
                .scan()
                .await
                .context("startup integrity scan failed")?;
            log_scan(&report);
        }

        Ok(ctx)
    }

    /// Replace the taxonomy from `taxonomy.path` when the file exists.
    async fn reload_taxonomy_file(&self) -> anyhow::Result<()> {
        let path = Path::new(&self.config.taxonomy.path);
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no taxonomy file, keeping stored categories");
            return Ok(());
        }

        let taxonomy = Taxonomy::load(path)?;
        let categories = self
            .service
            .catalog()
            .replace_all(&taxonomy)
            .await
            .context("failed to load taxonomy")?;
        tracing::info!(
            path = %path.display(),
            categories = categories.len(),
            "loaded taxonomy"
        );
        Ok(())
    }
}

fn log_scan(report: &ScanReport) {
    if report.is_clean() {
        tracing::debug!(scanned = report.scanned, "startup scan found no orphans");
    } else {
        tracing::info!(
            scanned = report.scanned,
            deleted = report.deleted(),
            failures = report.failures.len(),
            "startup scan repaired references"
        );
    }
}
