use sqlx::PgPool;

use crate::content::{
    destination::generate_destination_content, venue::generate_venue_content, ContentReport,
};

fn print_report(entity: &str, report: &ContentReport, dry_run: bool) {
    if dry_run {
        println!(
            "{} {} without content (dry run, nothing written)",
            report.pending, entity
        );
    } else {
        println!(
            "updated {} of {} {} with generated content",
            report.updated, report.pending, entity
        );
    }
}

pub async fn content_venues(pool: &PgPool, dry_run: bool) -> anyhow::Result<()> {
    let report = generate_venue_content(pool, dry_run).await?;
    print_report("venues", &report, dry_run);
    Ok(())
}

pub async fn content_destinations(pool: &PgPool, dry_run: bool) -> anyhow::Result<()> {
    let report = generate_destination_content(pool, dry_run).await?;
    print_report("destinations", &report, dry_run);
    Ok(())
}
