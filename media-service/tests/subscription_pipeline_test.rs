//! Subscription pipeline tests: the subscriber list with the mutual
//! flag and the subscribed-channels list with each channel's latest
//! upload.

mod common;

use media_service::services::SubscriptionService;
use media_service::viewer::Viewer;
use serial_test::serial;

#[tokio::test]
#[serial]
async fn mutual_flag_follows_the_back_edge() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let channel = common::create_user(&pool, "carol").await;
    let fan = common::create_user(&pool, "dave").await;

    let service = SubscriptionService::new(pool.clone());
    service
        .toggle_subscription(Viewer::authenticated(fan), channel)
        .await
        .unwrap();

    let subscribers = service.get_channel_subscribers(channel).await.unwrap();
    assert_eq!(subscribers.data.len(), 1);
    assert_eq!(subscribers.data[0].id, fan);
    assert!(!subscribers.data[0].subscribed_to_subscriber);

    // Channel subscribes back; the flag flips on the next read.
    service
        .toggle_subscription(Viewer::authenticated(channel), fan)
        .await
        .unwrap();

    let subscribers = service.get_channel_subscribers(channel).await.unwrap();
    assert!(subscribers.data[0].subscribed_to_subscriber);
    assert_eq!(subscribers.data[0].subscriber_count, 1);
}

#[tokio::test]
#[serial]
async fn subscribed_channels_carry_the_newest_upload() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let channel = common::create_user(&pool, "carol").await;
    let quiet_channel = common::create_user(&pool, "erin").await;
    let fan = common::create_user(&pool, "dave").await;

    let older = common::create_video(&pool, channel, "older upload", true).await;
    common::age_video(&pool, older, 3600).await;
    let newest = common::create_video(&pool, channel, "newest upload", true).await;

    let service = SubscriptionService::new(pool.clone());
    let fan_viewer = Viewer::authenticated(fan);
    service.toggle_subscription(fan_viewer, channel).await.unwrap();
    service
        .toggle_subscription(fan_viewer, quiet_channel)
        .await
        .unwrap();

    let channels = service.get_subscribed_channels(fan).await.unwrap();
    assert_eq!(channels.data.len(), 2);

    let carol = channels
        .data
        .iter()
        .find(|c| c.id == channel)
        .expect("subscribed channel missing");
    let latest = carol.latest_video.as_ref().expect("latest video missing");
    assert_eq!(latest.id, newest);

    let erin = channels
        .data
        .iter()
        .find(|c| c.id == quiet_channel)
        .expect("subscribed channel missing");
    assert!(erin.latest_video.is_none());
}

#[tokio::test]
#[serial]
async fn unsubscribing_removes_the_entry_from_both_pipelines() {
    let pool = common::setup_test_db().await.expect("db setup failed");
    let channel = common::create_user(&pool, "carol").await;
    let fan = common::create_user(&pool, "dave").await;

    let service = SubscriptionService::new(pool.clone());
    let fan_viewer = Viewer::authenticated(fan);

    service.toggle_subscription(fan_viewer, channel).await.unwrap();
    service.toggle_subscription(fan_viewer, channel).await.unwrap();

    assert!(service
        .get_channel_subscribers(channel)
        .await
        .unwrap()
        .data
        .is_empty());
    assert!(service
        .get_subscribed_channels(fan)
        .await
        .unwrap()
        .data
        .is_empty());
}
