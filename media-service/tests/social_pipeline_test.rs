//! Comment, tweet and dashboard pipeline tests: viewer-relative like
//! derivations on the listed documents and the aggregated channel
//! totals.

mod common;

use media_service::error::AppError;
use media_service::models::LikeTarget;
use media_service::pagination::PageParams;
use media_service::services::{
    CommentService, DashboardService, LikeService, TweetService, VideoService,
};
use media_service::viewer::Viewer;
use serial_test::serial;
use std::sync::Arc;
use uuid::Uuid;

use common::MockAssetStore;

#[tokio::test]
#[serial]
async fn comment_list_derives_author_and_like_flags() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let fan = common::create_user(&pool, "dave").await;
    let video = common::create_video(&pool, owner, "discussed", true).await;
    let comment = common::create_comment(&pool, video, fan, "great video").await;

    LikeService::new(pool.clone())
        .toggle_like(Viewer::authenticated(fan), LikeTarget::Comment(comment))
        .await
        .unwrap();

    let service = CommentService::new(pool.clone());

    let as_fan = service
        .get_video_comments(Viewer::authenticated(fan), video, PageParams::default())
        .await
        .unwrap();
    assert_eq!(as_fan.data.total_items, 1);
    let view = &as_fan.data.items[0];
    assert_eq!(view.owner.user_name, "dave");
    assert_eq!(view.likes_count, 1);
    assert!(view.is_liked);

    let as_anon = service
        .get_video_comments(Viewer::anonymous(), video, PageParams::default())
        .await
        .unwrap();
    assert_eq!(as_anon.data.items[0].likes_count, 1);
    assert!(!as_anon.data.items[0].is_liked);
}

#[tokio::test]
#[serial]
async fn comment_list_paginates_and_requires_the_video() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let video = common::create_video(&pool, owner, "busy thread", true).await;
    for i in 0..12 {
        common::create_comment(&pool, video, owner, &format!("comment {i}")).await;
    }

    let service = CommentService::new(pool.clone());
    let page = service
        .get_video_comments(Viewer::anonymous(), video, PageParams::new(2, 5))
        .await
        .unwrap();
    assert_eq!(page.data.items.len(), 5);
    assert_eq!(page.data.total_items, 12);
    assert_eq!(page.data.total_pages, 3);

    let err = service
        .get_video_comments(Viewer::anonymous(), Uuid::new_v4(), PageParams::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[serial]
async fn comment_edits_are_owner_only() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let owner = common::create_user(&pool, "carol").await;
    let intruder = common::create_user(&pool, "mallory").await;
    let video = common::create_video(&pool, owner, "guarded thread", true).await;
    let comment = common::create_comment(&pool, video, owner, "mine").await;

    let service = CommentService::new(pool.clone());
    let err = service
        .update_comment(Viewer::authenticated(intruder), comment, "defaced")
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let err = service
        .delete_comment(Viewer::authenticated(intruder), comment)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}

#[tokio::test]
#[serial]
async fn user_tweets_carry_like_derivations() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let author = common::create_user(&pool, "carol").await;
    let fan = common::create_user(&pool, "dave").await;

    let service = TweetService::new(pool.clone());
    let created = service
        .create_tweet(Viewer::authenticated(author), "shipping today")
        .await
        .unwrap();

    LikeService::new(pool.clone())
        .toggle_like(
            Viewer::authenticated(fan),
            LikeTarget::Tweet(created.data.id),
        )
        .await
        .unwrap();

    let as_fan = service
        .get_user_tweets(Viewer::authenticated(fan), author)
        .await
        .unwrap();
    assert_eq!(as_fan.data.len(), 1);
    assert_eq!(as_fan.data[0].likes_count, 1);
    assert!(as_fan.data[0].is_liked);
    assert_eq!(as_fan.data[0].owner.user_name, "carol");

    let as_author = service
        .get_user_tweets(Viewer::authenticated(author), author)
        .await
        .unwrap();
    assert!(!as_author.data[0].is_liked);

    let err = service
        .get_user_tweets(Viewer::anonymous(), Uuid::new_v4())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
#[serial]
async fn blank_tweet_content_is_rejected() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let author = common::create_user(&pool, "carol").await;

    let err = TweetService::new(pool.clone())
        .create_tweet(Viewer::authenticated(author), "   ")
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Validation(_)));
}

#[tokio::test]
#[serial]
async fn channel_stats_aggregate_uploads_views_subscribers_and_likes() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let channel = common::create_user(&pool, "carol").await;
    let fan = common::create_user(&pool, "dave").await;

    let first = common::create_video(&pool, channel, "first", true).await;
    let second = common::create_video(&pool, channel, "second", false).await;
    common::set_views(&pool, first, 100).await;
    common::set_views(&pool, second, 25).await;

    let fan_viewer = Viewer::authenticated(fan);
    media_service::services::SubscriptionService::new(pool.clone())
        .toggle_subscription(fan_viewer, channel)
        .await
        .unwrap();
    LikeService::new(pool.clone())
        .toggle_like(fan_viewer, LikeTarget::Video(first))
        .await
        .unwrap();

    let service = DashboardService::new(pool.clone());
    let stats = service
        .get_channel_stats(Viewer::authenticated(channel))
        .await
        .unwrap();

    assert_eq!(stats.data.total_videos, 2);
    assert_eq!(stats.data.total_views, 125);
    assert_eq!(stats.data.total_subscribers, 1);
    assert_eq!(stats.data.total_likes, 1);
}

#[tokio::test]
#[serial]
async fn channel_videos_include_drafts_with_like_counts() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let channel = common::create_user(&pool, "carol").await;
    let fan = common::create_user(&pool, "dave").await;
    let published = common::create_video(&pool, channel, "out", true).await;
    common::create_video(&pool, channel, "draft", false).await;

    LikeService::new(pool.clone())
        .toggle_like(Viewer::authenticated(fan), LikeTarget::Video(published))
        .await
        .unwrap();

    let service = DashboardService::new(pool.clone());
    let videos = service
        .get_channel_videos(Viewer::authenticated(channel))
        .await
        .unwrap();

    assert_eq!(videos.data.len(), 2);
    let liked = videos
        .data
        .iter()
        .find(|v| v.id == published)
        .expect("published video missing");
    assert_eq!(liked.likes_count, 1);
    assert!(videos.data.iter().any(|v| !v.is_published));
}

#[tokio::test]
#[serial]
async fn watch_history_is_viewer_scoped_and_newest_first() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let channel = common::create_user(&pool, "carol").await;
    let watcher = common::create_user(&pool, "dave").await;
    let other = common::create_user(&pool, "erin").await;
    let first = common::create_video(&pool, channel, "watched first", true).await;
    let second = common::create_video(&pool, channel, "watched second", true).await;

    let videos = VideoService::new(pool.clone(), Arc::new(MockAssetStore::default()));
    let watcher_viewer = Viewer::authenticated(watcher);
    videos.get_video_by_id(watcher_viewer, first).await.unwrap();
    videos.get_video_by_id(watcher_viewer, second).await.unwrap();
    videos
        .get_video_by_id(Viewer::authenticated(other), first)
        .await
        .unwrap();

    let service = DashboardService::new(pool.clone());
    let history = service.get_watch_history(watcher_viewer).await.unwrap();

    assert_eq!(history.data.len(), 2);
    assert_eq!(history.data[0].video.id, second);
    assert_eq!(history.data[1].video.id, first);

    let dashboard_requires_auth = service.get_watch_history(Viewer::anonymous()).await;
    assert!(matches!(
        dashboard_requires_auth.unwrap_err(),
        AppError::Forbidden(_)
    ));
}
