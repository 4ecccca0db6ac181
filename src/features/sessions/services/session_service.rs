use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{Report, SubmitReport};
use crate::features::sessions::dtos::SessionResponseDto;
use crate::features::sessions::models::{Session, SessionState};

/// Registry of live sessions.
///
/// Every session owns its own report store behind its own lock, so work on one
/// session never waits on another. The registry lock is only held long enough
/// to look a session up.
pub struct SessionService {
    sessions: RwLock<HashMap<Uuid, Arc<Session>>>,
    idle_timeout: Option<Duration>,
}

impl SessionService {
    pub fn new(idle_timeout: Option<Duration>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            idle_timeout,
        }
    }

    /// Start a new session with an empty report store
    pub async fn create(&self) -> SessionResponseDto {
        let session = Arc::new(Session::new());
        let dto = SessionResponseDto {
            id: session.id,
            created_at: session.created_at,
            report_count: 0,
        };

        self.sessions
            .write()
            .await
            .insert(session.id, Arc::clone(&session));

        tracing::info!("Session created: id={}", session.id);
        dto
    }

    /// Run `f` against a session's state after marking it active.
    ///
    /// The registry read lock is held until `f` returns, so a sweep cannot
    /// remove the session while an operation is inside its store.
    async fn with_active<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&Session, &mut SessionState) -> Result<T>,
    ) -> Result<T> {
        let sessions = self.sessions.read().await;
        let session = sessions
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

        let mut state = session.state.lock().await;
        state.last_active_at = Instant::now();
        f(session, &mut *state)
    }

    pub async fn info(&self, id: Uuid) -> Result<SessionResponseDto> {
        self.with_active(id, |session, state| {
            Ok(SessionResponseDto {
                id: session.id,
                created_at: session.created_at,
                report_count: state.reports.len() as i64,
            })
        })
        .await
    }

    /// End a session, dropping its reports
    pub async fn end(&self, id: Uuid) -> Result<()> {
        let removed = self.sessions.write().await.remove(&id);

        match removed {
            Some(_) => {
                tracing::info!("Session ended: id={}", id);
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session {} not found", id))),
        }
    }

    pub async fn submit_report(&self, id: Uuid, input: SubmitReport) -> Result<Report> {
        let report = self
            .with_active(id, |_, state| Ok(state.reports.submit(input)?))
            .await?;

        tracing::info!(
            "Report submitted: session={}, line={}, issue_type={}, image={}",
            id,
            report.line,
            report.issue_type,
            report.image.is_some()
        );

        Ok(report)
    }

    /// Reports of a session, newest first
    pub async fn list_reports(&self, id: Uuid) -> Result<Vec<Report>> {
        self.with_active(id, |_, state| Ok(state.reports.list_reports()))
            .await
    }

    /// Report count without touching the session's activity clock
    pub async fn report_count(&self, id: Uuid) -> Result<usize> {
        let session = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {} not found", id)))?;

        let count = session.state.lock().await.reports.len();
        Ok(count)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// End every session idle for longer than the idle timeout as of `now`.
    /// Returns how many sessions were ended.
    ///
    /// A session touched after it was judged idle is kept.
    pub async fn sweep_idle(&self, now: Instant) -> usize {
        let Some(timeout) = self.idle_timeout else {
            return 0;
        };

        let snapshot: Vec<Arc<Session>> = self.sessions.read().await.values().cloned().collect();

        let mut candidates = Vec::new();
        for session in snapshot {
            let last_active_at = session.state.lock().await.last_active_at;
            if now.saturating_duration_since(last_active_at) > timeout {
                candidates.push((session, last_active_at));
            }
        }

        if candidates.is_empty() {
            return 0;
        }

        let mut sessions = self.sessions.write().await;
        let mut ended = 0;
        for (session, seen) in candidates {
            if session.state.lock().await.last_active_at != seen {
                continue;
            }
            if sessions.remove(&session.id).is_some() {
                ended += 1;
            }
        }

        if ended > 0 {
            tracing::info!("Ended {} idle sessions", ended);
        }
        ended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::reports::models::{IssueType, ProductionLine};

    fn input(details: &str) -> SubmitReport {
        SubmitReport {
            line: ProductionLine::Line2,
            issue_type: IssueType::Defect,
            details: details.to_string(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let service = SessionService::new(None);
        let a = service.create().await;
        let b = service.create().await;

        service.submit_report(a.id, input("only in a")).await.unwrap();

        assert_eq!(service.list_reports(a.id).await.unwrap().len(), 1);
        assert!(service.list_reports(b.id).await.unwrap().is_empty());
        assert_eq!(service.info(a.id).await.unwrap().report_count, 1);
        assert_eq!(service.info(b.id).await.unwrap().report_count, 0);
    }

    #[tokio::test]
    async fn test_end_session_drops_reports() {
        let service = SessionService::new(None);
        let session = service.create().await;
        service.submit_report(session.id, input("x")).await.unwrap();

        service.end(session.id).await.unwrap();

        assert!(matches!(
            service.list_reports(session.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            service.end(session.id).await,
            Err(AppError::NotFound(_))
        ));
        assert_eq!(service.session_count().await, 0);
    }

    #[tokio::test]
    async fn test_validation_error_leaves_session_unchanged() {
        let service = SessionService::new(None);
        let session = service.create().await;

        let err = service.submit_report(session.id, input("  ")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(service.report_count(session.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let service = SessionService::new(None);
        let err = service
            .submit_report(Uuid::new_v4(), input("orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sweep_removes_only_idle_sessions() {
        let service = SessionService::new(Some(Duration::from_secs(60)));
        let idle = service.create().await;

        // A freshly created session survives a sweep
        assert_eq!(service.sweep_idle(Instant::now()).await, 0);

        let active = service.create().await;
        let later = Instant::now() + Duration::from_secs(120);

        // Simulate activity on `active` just before the sweep
        {
            let sessions = service.sessions.read().await;
            let session = sessions.get(&active.id).unwrap();
            session.state.lock().await.last_active_at = later - Duration::from_secs(10);
        }

        assert_eq!(service.sweep_idle(later).await, 1);
        assert!(service.info(active.id).await.is_ok());
        assert!(matches!(
            service.info(idle.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sweep_keeps_session_used_after_idle_check() {
        let service = Arc::new(SessionService::new(Some(Duration::from_secs(60))));
        service.create().await;
        service.create().await;

        // Same iteration order the sweep's snapshot will see
        let order: Vec<Arc<Session>> = service.sessions.read().await.values().cloned().collect();
        let (first, second) = (Arc::clone(&order[0]), Arc::clone(&order[1]));

        // Park the sweep on the second session after it has judged the first idle
        let held = second.state.lock().await;
        let later = Instant::now() + Duration::from_secs(120);
        let sweep = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.sweep_idle(later).await }
        });
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        service
            .submit_report(first.id, input("accepted"))
            .await
            .unwrap();
        drop(held);

        assert_eq!(sweep.await.unwrap(), 1);
        let reports = service.list_reports(first.id).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].details, "accepted");
        assert!(matches!(
            service.info(second.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_sweep_disabled_without_timeout() {
        let service = SessionService::new(None);
        service.create().await;

        let far_future = Instant::now() + Duration::from_secs(365 * 24 * 3600);
        assert_eq!(service.sweep_idle(far_future).await, 0);
        assert_eq!(service.session_count().await, 1);
    }
}
