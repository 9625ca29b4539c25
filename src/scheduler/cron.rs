//! Cron scheduler wiring for maintenance jobs.

use sea_orm::DatabaseConnection;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::{error::Error, scheduler::config, scheduler::maintenance};

macro_rules! add_cron_job {
    ($sched:expr, $cron:expr, $db:expr, $fn:expr, $name:expr) => {{
        let db_clone = $db.clone();

        $sched
            .add(Job::new_async($cron, move |_, _| {
                let db = db_clone.clone();

                Box::pin(async move {
                    match $fn(&db).await {
                        Ok(count) => tracing::info!("{} affected {} row(s)", $name, count),
                        Err(e) => tracing::error!("Error running {}: {:?}", $name, e),
                    }
                })
            })?)
            .await?;
    }};
}

/// Registers and starts the maintenance scheduler.
///
/// Jobs registered:
/// - hourly overdue-installment sweep
/// - daily stale-cart cleanup
/// - daily sales rollup for the previous day
pub async fn start_scheduler(db: &DatabaseConnection) -> Result<JobScheduler, Error> {
    let sched = JobScheduler::new().await?;

    add_cron_job!(
        sched,
        config::OVERDUE_INSTALLMENT_SWEEP_CRON,
        db,
        maintenance::sweep_overdue_installments,
        "overdue installment sweep"
    );

    add_cron_job!(
        sched,
        config::STALE_CART_CLEANUP_CRON,
        db,
        maintenance::cleanup_stale_carts,
        "stale cart cleanup"
    );

    {
        let db_clone = db.clone();

        sched
            .add(Job::new_async(config::SALES_ROLLUP_CRON, move |_, _| {
                let db = db_clone.clone();

                Box::pin(async move {
                    match maintenance::rollup_previous_day(&db).await {
                        Ok(row) => tracing::info!(
                            day = %row.day,
                            orders = row.order_count,
                            "Sales rollup complete"
                        ),
                        Err(e) => tracing::error!("Error running sales rollup: {:?}", e),
                    }
                })
            })?)
            .await?;
    }

    sched.start().await?;

    tracing::info!("Maintenance scheduler started");

    Ok(sched)
}
