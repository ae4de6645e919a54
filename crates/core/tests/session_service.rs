//! SessionService bootstrap and state machine tests

mod support;

use std::sync::Arc;

use mediatracker_core::{AuthState, SignUpDetails};
use mediatracker_domain::{
    constants::DEFAULT_ZONE, AuthErrorKind, Language, MediaTrackerError, ProfileUpdate,
    UserProfile, UserRole,
};
use support::{session_for, session_service, MockIdentityProvider, MockProfileRepository};

#[tokio::test]
async fn sign_in_bootstraps_missing_profile_with_defaults() {
    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u1", "a@b.co")));
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity, profiles.clone());

    let user = service.sign_in("a@b.co", "secret123").await.unwrap();

    assert_eq!(user.role, UserRole::Public);
    assert_eq!(user.state, DEFAULT_ZONE);
    // insert fallback succeeded, so the row exists server-side
    assert_eq!(profiles.stored("u1"), Some(user.clone()));
    assert_eq!(service.state(), AuthState::Authenticated(user));
}

#[tokio::test]
async fn sign_in_survives_profile_insert_failure() {
    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u1", "a@b.co")));
    let profiles = Arc::new(MockProfileRepository::default());
    *profiles.fail_create.lock() = true;
    let (service, _) = session_service(identity, profiles.clone());

    // availability over consistency: the sign-in still succeeds with an
    // in-memory profile carrying the same defaults
    let user = service.sign_in("a@b.co", "secret123").await.unwrap();

    assert_eq!(user.role, UserRole::Public);
    assert_eq!(user.state, DEFAULT_ZONE);
    assert_eq!(profiles.stored("u1"), None);
    assert!(service.state().is_authenticated());
}

#[tokio::test]
async fn sign_in_prefers_existing_profile_row() {
    let mut existing = UserProfile::default_for("u1", "a@b.co");
    existing.full_name = Some("Amina Yusuf".into());
    existing.role = UserRole::Staff;
    existing.state = "Kano".into();

    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u1", "a@b.co")));
    let profiles = Arc::new(MockProfileRepository::with_profile(existing.clone()));
    let (service, _) = session_service(identity, profiles);

    let user = service.sign_in("a@b.co", "secret123").await.unwrap();
    assert_eq!(user, existing);
}

#[tokio::test]
async fn sign_in_failure_keeps_state_untouched() {
    let identity = Arc::new(MockIdentityProvider::default());
    *identity.fail_sign_in.lock() = Some(AuthErrorKind::InvalidCredentials);
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity, profiles);

    let err = service.sign_in("a@b.co", "wrong").await.unwrap_err();
    assert!(matches!(err, MediaTrackerError::Auth(AuthErrorKind::InvalidCredentials)));
    assert_eq!(service.state(), AuthState::Unknown);
}

#[tokio::test]
async fn check_session_without_persisted_session_is_unauthenticated() {
    let identity = Arc::new(MockIdentityProvider::default());
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity, profiles);

    // resolves, does not error
    let outcome = service.check_session().await.unwrap();

    assert!(outcome.is_none());
    assert_eq!(service.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn check_session_restores_user() {
    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u1", "a@b.co")));
    let profiles =
        Arc::new(MockProfileRepository::with_profile(UserProfile::default_for("u1", "a@b.co")));
    let (service, _) = session_service(identity, profiles);

    let outcome = service.check_session().await.unwrap();
    assert_eq!(outcome.map(|p| p.id), Some("u1".to_string()));
    assert!(service.state().is_authenticated());
}

#[tokio::test]
async fn sign_out_clears_state_even_when_remote_call_fails() {
    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u1", "a@b.co")));
    *identity.fail_sign_out.lock() = true;
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity, profiles);

    service.sign_in("a@b.co", "secret123").await.unwrap();
    service.sign_out().await.unwrap();

    assert_eq!(service.state(), AuthState::Unauthenticated);
}

#[tokio::test]
async fn set_user_without_login_is_rejected() {
    let identity = Arc::new(MockIdentityProvider::default());
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity, profiles);

    let err = service
        .set_user(ProfileUpdate { notifications_enabled: Some(false), ..Default::default() })
        .await
        .unwrap_err();
    assert!(matches!(err, MediaTrackerError::NotLoggedIn));
}

#[tokio::test]
async fn set_user_merges_and_republishes() {
    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u1", "a@b.co")));
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity, profiles.clone());
    service.sign_in("a@b.co", "secret123").await.unwrap();

    let updated = service
        .set_user(ProfileUpdate {
            language_preference: Some(Language::Ig),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(updated.language_preference, Language::Ig);
    assert_eq!(service.current_user(), Some(updated.clone()));
    assert_eq!(profiles.stored("u1"), Some(updated));
}

#[tokio::test]
async fn sign_up_rejects_malformed_email_before_provider_call() {
    let identity = Arc::new(MockIdentityProvider::default());
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity.clone(), profiles);

    let err = service
        .sign_up(
            "not-an-email",
            "secret123",
            SignUpDetails {
                full_name: "Amina Yusuf".into(),
                role: UserRole::Staff,
                state: "Kano".into(),
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, MediaTrackerError::Auth(AuthErrorKind::MalformedEmail)));
    assert_eq!(identity.call_count(), 0);
}

#[tokio::test]
async fn sign_up_fallback_insert_uses_submitted_attributes() {
    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u2", "n@e.ws")));
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, _) = session_service(identity, profiles.clone());

    let user = service
        .sign_up(
            "n@e.ws",
            "secret123",
            SignUpDetails {
                full_name: "Ngozi Eze".into(),
                role: UserRole::Staff,
                state: "Abuja".into(),
            },
        )
        .await
        .unwrap();

    assert_eq!(user.full_name.as_deref(), Some("Ngozi Eze"));
    assert_eq!(user.role, UserRole::Staff);
    assert_eq!(user.state, "Abuja");
    assert_eq!(profiles.stored("u2"), Some(user));
}

#[tokio::test]
async fn upload_avatar_publishes_url_on_profile() {
    let identity = Arc::new(MockIdentityProvider::with_session(session_for("u1", "a@b.co")));
    let profiles = Arc::new(MockProfileRepository::default());
    let (service, avatars) = session_service(identity, profiles);
    service.sign_in("a@b.co", "secret123").await.unwrap();

    let updated = service.upload_avatar(vec![0xFF, 0xD8, 0xFF]).await.unwrap();

    assert_eq!(updated.avatar_url.as_deref(), Some("https://cdn.example/avatars/u1.jpg"));
    assert_eq!(avatars.uploads.lock().as_slice(), &[("u1".to_string(), 3)]);
}
