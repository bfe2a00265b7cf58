mod common;

#[cfg(test)]
mod tests {
    use super::common::{session_for, FakeAuth, InMemoryStore, PASSWORD};
    use chrono::Utc;
    use taskbase::api::AuthProvider;
    use taskbase::libs::session::{Session, SessionController};
    use taskbase::libs::task::TaskFilter;
    use taskbase::libs::task_list::TaskList;
    use test_context::{test_context, AsyncTestContext};
    use uuid::Uuid;

    struct SessionTestContext {
        account: Session,
        controller: SessionController<FakeAuth>,
        list: TaskList<InMemoryStore>,
    }

    impl AsyncTestContext for SessionTestContext {
        async fn setup() -> Self {
            let account = session_for(Uuid::new_v4(), Some("Grace Brewster Hopper"));
            SessionTestContext {
                controller: SessionController::new(FakeAuth::new(account.clone())),
                account,
                list: TaskList::new(InMemoryStore::new(), TaskFilter::All),
            }
        }
    }

    fn email(ctx: &SessionTestContext) -> String {
        ctx.account.user.email.clone().unwrap()
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_starts_as_guest(ctx: &mut SessionTestContext) {
        assert!(!ctx.controller.is_authenticated());
        assert!(ctx.controller.session().is_none());
        assert!(!ctx.controller.has_changed());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_login_loads_list_exactly_once(ctx: &mut SessionTestContext) {
        let email = email(ctx);
        ctx.list.store().seed(ctx.account.user_id(), "Waiting", false, false);

        ctx.controller.login(&email, PASSWORD).await.unwrap();

        assert!(ctx.controller.has_changed());
        let session = ctx.controller.mark_seen();
        assert_eq!(session.as_ref(), Some(&ctx.account));
        ctx.list.fetch(session.as_ref()).await.unwrap();

        assert!(!ctx.controller.has_changed());
        assert_eq!(ctx.list.store().selects(), 1);
        assert_eq!(ctx.list.tasks().len(), 1);
        assert_eq!(session.unwrap().user.greeting_name(), "Hopper");
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_failed_login_stays_guest(ctx: &mut SessionTestContext) {
        let email = email(ctx);

        let err = ctx.controller.login(&email, "wrong").await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(!ctx.controller.is_authenticated());
        assert!(!ctx.controller.has_changed());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_logout_empties_list(ctx: &mut SessionTestContext) {
        let email = email(ctx);
        ctx.list.store().seed(ctx.account.user_id(), "Mine", false, false);
        ctx.controller.login(&email, PASSWORD).await.unwrap();
        let session = ctx.controller.mark_seen();
        ctx.list.fetch(session.as_ref()).await.unwrap();

        ctx.controller.logout().await.unwrap();

        assert!(ctx.controller.has_changed());
        let session = ctx.controller.mark_seen();
        assert!(session.is_none());
        ctx.list.fetch(session.as_ref()).await.unwrap();
        assert!(ctx.list.tasks().is_empty());
        assert_eq!(ctx.list.store().selects(), 1);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_sign_up_does_not_sign_in(ctx: &mut SessionTestContext) {
        ctx.controller.sign_up("new@example.com", "hunter22", "Alan Turing").await.unwrap();

        assert!(!ctx.controller.is_authenticated());
        assert!(!ctx.controller.has_changed());
        let sign_ups = ctx.controller.provider().sign_ups.lock().unwrap().clone();
        assert_eq!(sign_ups, vec![("new@example.com".to_string(), "Alan Turing".to_string())]);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_restore_picks_up_existing_session(ctx: &mut SessionTestContext) {
        let mut controller = SessionController::new(FakeAuth::signed_in(ctx.account.clone()));

        // The current value is the initial notification
        assert!(controller.is_authenticated());
        let restored = controller.restore().await.unwrap();

        assert_eq!(restored, Some(ctx.account.clone()));
        assert!(!controller.has_changed());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_changed_waits_for_next_notification(ctx: &mut SessionTestContext) {
        let notifier = ctx.controller.provider().notifier.clone();
        let account = ctx.account.clone();

        let publisher = tokio::spawn(async move {
            notifier.publish(Some(account));
        });
        let next = ctx.controller.changed().await.unwrap();
        publisher.await.unwrap();

        assert_eq!(next, Some(ctx.account.clone()));
        assert!(!ctx.controller.has_changed());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_republishing_same_session_is_not_a_change(ctx: &mut SessionTestContext) {
        let email = email(ctx);
        ctx.controller.login(&email, PASSWORD).await.unwrap();
        ctx.controller.mark_seen();

        ctx.controller.provider().get_session().await.unwrap();

        assert!(!ctx.controller.has_changed());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_blank_display_name_is_rejected_before_sign_up(ctx: &mut SessionTestContext) {
        let err = ctx.controller.sign_up("new@example.com", "hunter22", "   ").await.unwrap_err();

        assert_eq!(err.to_string(), "Display name is required");
        assert!(ctx.controller.provider().sign_ups.lock().unwrap().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_display_name_is_trimmed(ctx: &mut SessionTestContext) {
        ctx.controller.sign_up("new@example.com", "hunter22", "  Alan Turing ").await.unwrap();

        let sign_ups = ctx.controller.provider().sign_ups.lock().unwrap().clone();
        assert_eq!(sign_ups, vec![("new@example.com".to_string(), "Alan Turing".to_string())]);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_expired_token_is_refreshed_before_fetch(ctx: &mut SessionTestContext) {
        let mut expired = ctx.account.clone();
        expired.expires_at = Some(Utc::now().timestamp() - 60);
        let mut controller = SessionController::new(FakeAuth::signed_in(expired.clone()));
        ctx.list.store().seed(expired.user_id(), "Long-running menu", false, false);

        // The token lapsed while the menu was waiting for input
        let stale = controller.session();
        let err = ctx.list.fetch(stale.as_ref()).await.unwrap_err();
        assert_eq!(err.to_string(), "JWT expired");

        let fresh = controller.ensure_fresh().await.unwrap().unwrap();

        assert_ne!(fresh.access_token, expired.access_token);
        assert!(!fresh.is_expired());
        assert!(controller.has_changed());
        let session = controller.mark_seen();
        assert_eq!(session.as_ref(), Some(&fresh));
        ctx.list.fetch(session.as_ref()).await.unwrap();
        assert_eq!(ctx.list.tasks().len(), 1);
    }

    #[test_context(SessionTestContext)]
    #[tokio::test]
    async fn test_ensure_fresh_keeps_valid_session_unchanged(ctx: &mut SessionTestContext) {
        let mut controller = SessionController::new(FakeAuth::signed_in(ctx.account.clone()));
        controller.mark_seen();

        let session = controller.ensure_fresh().await.unwrap();

        assert_eq!(session, Some(ctx.account.clone()));
        assert!(!controller.has_changed());
    }
}
