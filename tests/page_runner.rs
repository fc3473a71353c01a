//! `watch` wiring: subscription states flow through the reducer and view.

mod common;

use automation_dash::api::{endpoints, FetchError};
use automation_dash::poll::{FetchState, PollingClient, SubscribeOptions};
use automation_dash::view::dashboard::{DashboardIntent, DashboardPage};
use automation_dash::view::jobs::{JobsIntent, JobsPage};
use automation_dash::view::watch;
use common::scripted_transport::{Reply, ScriptedTransport};
use common::STATUS_BODY;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::sleep;

/// A visibility channel whose sender is already gone.
fn no_visibility_changes() -> mpsc::UnboundedReceiver<bool> {
    mpsc::unbounded_channel().1
}

fn client(transport: &ScriptedTransport) -> PollingClient {
    PollingClient::new(Arc::new(transport.clone()), Duration::from_secs(30))
}

#[tokio::test(start_paused = true)]
async fn test_watch_renders_every_transition() {
    let transport = ScriptedTransport::new();
    transport.always("/api/status", Reply::json(STATUS_BODY));
    let mut frames: Vec<Vec<String>> = Vec::new();

    let state = watch::<DashboardPage, _, _, _>(
        &client(&transport),
        endpoints::status(),
        SubscribeOptions::polling(Duration::from_millis(1000)),
        DashboardIntent::StatusFetched,
        |lines: &[String]| frames.push(lines.to_vec()),
        no_visibility_changes(),
        sleep(Duration::from_millis(2500)),
    )
    .await;

    // Loading + Success at 0, 1000 and 2000.
    assert_eq!(frames.len(), 6);
    assert!(frames[0].iter().any(|l| l == "Loading..."));
    assert!(frames[1].iter().any(|l| l == "Total records:  42"));
    assert_eq!(state.status.data().map(|s| s.database.total_records), Some(42));
}

#[tokio::test(start_paused = true)]
async fn test_watch_failure_shows_banner_and_toast() {
    let transport = ScriptedTransport::new();
    transport.push("/api/status", Reply::json(STATUS_BODY));
    transport.always("/api/status", Reply::status(503, "unavailable"));
    let mut last_frame = Vec::new();

    let state = watch::<DashboardPage, _, _, _>(
        &client(&transport),
        endpoints::status(),
        SubscribeOptions::polling(Duration::from_millis(1000)),
        DashboardIntent::StatusFetched,
        |lines: &[String]| last_frame = lines.to_vec(),
        no_visibility_changes(),
        sleep(Duration::from_millis(1500)),
    )
    .await;

    // The stale payload stays on screen under the error banner.
    assert_eq!(state.status.data().map(|s| s.database.total_records), Some(42));
    assert_eq!(state.status.error(), Some(&FetchError::Http { status: 503 }));
    assert!(last_frame
        .iter()
        .any(|l| l == "Error: Server returned 503 Service Unavailable"));
    assert_eq!(
        last_frame.last().map(String::as_str),
        Some("[error] Server returned 503 Service Unavailable")
    );
}

#[tokio::test(start_paused = true)]
async fn test_watch_unsubscribes_on_shutdown() {
    let transport = ScriptedTransport::new();
    transport.always("/api/jobs", Reply::json(r#"{"jobs": []}"#));

    watch::<JobsPage, _, _, _>(
        &client(&transport),
        endpoints::jobs(),
        SubscribeOptions::polling(Duration::from_millis(100)),
        JobsIntent::Fetched,
        |_: &[String]| {},
        no_visibility_changes(),
        sleep(Duration::from_millis(250)),
    )
    .await;
    let calls = transport.call_count();
    sleep(Duration::from_millis(1000)).await;

    assert_eq!(calls, 3);
    assert_eq!(transport.call_count(), calls);
}

#[tokio::test(start_paused = true)]
async fn test_watch_maps_payload_before_reducing() {
    use automation_dash::api::models::ProductsPayload;
    use automation_dash::view::products::{ProductsIntent, ProductsPage};

    let transport = ScriptedTransport::new();
    transport.always(
        "/api/products",
        Reply::json(r#"{"products": [{"name": "Widget", "sku": "W-1"}]}"#),
    );

    let state = watch::<ProductsPage, _, _, _>(
        &client(&transport),
        endpoints::products(),
        SubscribeOptions::once(),
        |fetch: FetchState<ProductsPayload>| {
            ProductsIntent::Fetched(fetch.map(ProductsPayload::into_products))
        },
        |_: &[String]| {},
        no_visibility_changes(),
        sleep(Duration::from_millis(100)),
    )
    .await;

    let products = state.products.data().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].sku, "W-1");
}

#[tokio::test(start_paused = true)]
async fn test_watch_forwards_visibility_to_subscription() {
    let transport = ScriptedTransport::new();
    transport.always("/api/status", Reply::json(STATUS_BODY));
    let (visibility_tx, visibility) = mpsc::unbounded_channel();

    let driver = {
        let transport = transport.clone();
        async move {
            sleep(Duration::from_millis(10)).await;
            visibility_tx.send(false).unwrap();
            sleep(Duration::from_millis(3000)).await;
            let while_hidden = transport.call_count();
            visibility_tx.send(true).unwrap();
            sleep(Duration::from_millis(10)).await;
            (while_hidden, transport.call_count())
        }
    };
    let client = client(&transport);
    let (visible_calls, _) = tokio::join!(
        driver,
        watch::<DashboardPage, _, _, _>(
            &client,
            endpoints::status(),
            SubscribeOptions::polling(Duration::from_millis(1000)).pause_when_hidden(true),
            DashboardIntent::StatusFetched,
            |_: &[String]| {},
            visibility,
            sleep(Duration::from_millis(3100)),
        )
    );

    // Paused after the first attempt, refetched as soon as it was shown.
    assert_eq!(visible_calls, (1, 2));
}
