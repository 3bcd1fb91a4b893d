use sqlx::PgPool;
use tracing::instrument;

use crate::modules::announcements::model::Announcement;
use crate::modules::announcements::service::AnnouncementService;
use crate::modules::dashboard::model::EntityCounts;
use crate::policy::{EntityKind, Predicate};
use crate::repo;
use crate::utils::errors::AppError;

/// How many announcements the overview widget shows.
const LATEST_ANNOUNCEMENTS: i64 = 3;

pub struct DashboardService;

impl DashboardService {
    #[instrument(skip(db))]
    pub async fn counts(db: &PgPool) -> Result<EntityCounts, AppError> {
        Ok(EntityCounts {
            teachers: repo::count(db, EntityKind::Teacher, &Predicate::All).await?,
            students: repo::count(db, EntityKind::Student, &Predicate::All).await?,
            parents: repo::count(db, EntityKind::Parent, &Predicate::All).await?,
            classes: repo::count(db, EntityKind::Class, &Predicate::All).await?,
        })
    }

    /// Newest announcements under the caller's visibility predicate, same
    /// scoping as the full list page.
    #[instrument(skip(db, predicate))]
    pub async fn latest_announcements(
        db: &PgPool,
        predicate: &Predicate,
    ) -> Result<Vec<Announcement>, AppError> {
        let (rows, _) = AnnouncementService::list(db, predicate, LATEST_ANNOUNCEMENTS, 0).await?;
        Ok(rows)
    }
}
