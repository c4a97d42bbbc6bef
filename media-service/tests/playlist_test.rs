//! Playlist tests: set-semantics membership, the contents pipeline
//! with its published-only video list, and the per-user summary whose
//! totals count every member video.

mod common;

use media_service::error::AppError;
use media_service::services::PlaylistService;
use media_service::viewer::Viewer;
use serial_test::serial;
use uuid::Uuid;

#[tokio::test]
#[serial]
async fn adding_the_same_video_twice_is_a_no_op() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let playlist = common::create_playlist(&pool, owner, "favorites").await;
    let video = common::create_video(&pool, owner, "repeat", true).await;

    let service = PlaylistService::new(pool.clone());
    let viewer = Viewer::authenticated(owner);

    service
        .add_video_to_playlist(viewer, playlist, video)
        .await
        .unwrap();
    service
        .add_video_to_playlist(viewer, playlist, video)
        .await
        .unwrap();

    let members = common::count_rows(
        &pool,
        "SELECT COUNT(*) FROM playlist_videos WHERE playlist_id = $1",
        playlist,
    )
    .await;
    assert_eq!(members, 1);
}

#[tokio::test]
#[serial]
async fn removing_an_absent_video_succeeds_quietly() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let playlist = common::create_playlist(&pool, owner, "favorites").await;
    let video = common::create_video(&pool, owner, "never added", true).await;

    let service = PlaylistService::new(pool.clone());
    service
        .remove_video_from_playlist(Viewer::authenticated(owner), playlist, video)
        .await
        .unwrap();
}

#[tokio::test]
#[serial]
async fn membership_requires_both_rows_to_resolve() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let playlist = common::create_playlist(&pool, owner, "favorites").await;
    let video = common::create_video(&pool, owner, "real", true).await;

    let service = PlaylistService::new(pool.clone());
    let viewer = Viewer::authenticated(owner);

    let err = service
        .add_video_to_playlist(viewer, playlist, Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));

    let err = service
        .add_video_to_playlist(viewer, Uuid::new_v4(), video)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[serial]
async fn only_the_owner_manages_membership() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let intruder = common::create_user(&pool, "mallory").await;
    let playlist = common::create_playlist(&pool, owner, "favorites").await;
    let video = common::create_video(&pool, owner, "guarded", true).await;

    let service = PlaylistService::new(pool.clone());
    let err = service
        .add_video_to_playlist(Viewer::authenticated(intruder), playlist, video)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
#[serial]
async fn contents_pipeline_lists_published_members_with_totals() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let playlist = common::create_playlist(&pool, owner, "mixed bag").await;
    let published = common::create_video(&pool, owner, "visible", true).await;
    let draft = common::create_video(&pool, owner, "hidden", false).await;
    common::set_views(&pool, published, 40).await;
    common::set_views(&pool, draft, 7).await;

    let service = PlaylistService::new(pool.clone());
    let viewer = Viewer::authenticated(owner);
    service
        .add_video_to_playlist(viewer, playlist, published)
        .await
        .unwrap();
    service
        .add_video_to_playlist(viewer, playlist, draft)
        .await
        .unwrap();

    let view = service.get_playlist_by_id(playlist).await.unwrap();
    assert_eq!(view.data.owner.user_name, "carol");
    assert_eq!(view.data.videos.len(), 1);
    assert_eq!(view.data.videos[0].id, published);
    // Totals are derived over the published members shown.
    assert_eq!(view.data.total_videos, 1);
    assert_eq!(view.data.total_views, 40);
}

#[tokio::test]
#[serial]
async fn user_summary_totals_count_every_member_video() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let playlist = common::create_playlist(&pool, owner, "mixed bag").await;
    let published = common::create_video(&pool, owner, "visible", true).await;
    let draft = common::create_video(&pool, owner, "hidden", false).await;
    common::set_views(&pool, published, 40).await;
    common::set_views(&pool, draft, 7).await;

    let service = PlaylistService::new(pool.clone());
    let viewer = Viewer::authenticated(owner);
    service
        .add_video_to_playlist(viewer, playlist, published)
        .await
        .unwrap();
    service
        .add_video_to_playlist(viewer, playlist, draft)
        .await
        .unwrap();

    let summaries = service.get_user_playlists(owner).await.unwrap();
    assert_eq!(summaries.data.len(), 1);
    assert_eq!(summaries.data[0].total_videos, 2);
    assert_eq!(summaries.data[0].total_views, 47);
}

#[tokio::test]
#[serial]
async fn playlist_metadata_requires_name_and_description() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;

    let service = PlaylistService::new(pool.clone());
    let err = service
        .create_playlist(Viewer::authenticated(owner), "favorites", "  ")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
#[serial]
async fn deleting_a_playlist_drops_its_membership_rows() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let playlist = common::create_playlist(&pool, owner, "favorites").await;
    let video = common::create_video(&pool, owner, "kept", true).await;

    let service = PlaylistService::new(pool.clone());
    let viewer = Viewer::authenticated(owner);
    service
        .add_video_to_playlist(viewer, playlist, video)
        .await
        .unwrap();

    service.delete_playlist(viewer, playlist).await.unwrap();

    assert_eq!(
        common::count_rows(
            &pool,
            "SELECT COUNT(*) FROM playlist_videos WHERE playlist_id = $1",
            playlist,
        )
        .await,
        0
    );
    // The member video itself is untouched.
    assert_eq!(
        common::count_rows(&pool, "SELECT COUNT(*) FROM videos WHERE id = $1", video).await,
        1
    );
}
