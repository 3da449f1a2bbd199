use std::collections::HashMap;
use std::sync::atomic::Ordering;
use std::time::Duration;

use super::*;
use stockwatch::models::ProductStatus;
use stockwatch::poller::{CycleOutcome, PollLoop};
use stockwatch::scraper::AggregateScraper;
use stockwatch::sites::SiteAdapter;

const SUBJECT: &str = "New products alert";

async fn poller_with(
    responses: Vec<Result<CatalogSnapshot>>,
    notifier: RecordingNotifier,
) -> PollLoop {
    let mut adapters: HashMap<String, Box<dyn SiteAdapter>> = HashMap::new();
    adapters.insert(
        "Store".to_string(),
        ScriptedAdapter::new("Store", Some("https://store.example.com"), responses),
    );
    PollLoop::initialize(
        AggregateScraper::new(adapters),
        Box::new(notifier),
        SUBJECT.to_string(),
        Duration::from_secs(60),
    )
    .await
    .expect("initial fetch should succeed")
}

#[tokio::test]
async fn test_new_product_notifies_and_advances_baseline() {
    let notifier = RecordingNotifier::default();
    let mut poller = poller_with(
        vec![
            Ok(catalog(&[("WidgetA", in_stock(10))])),
            Ok(catalog(&[("WidgetA", in_stock(10)), ("WidgetB", in_stock(5))])),
        ],
        notifier.clone(),
    )
    .await;

    assert_eq!(poller.run_cycle().await, CycleOutcome::Notified);

    let sent = notifier.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, SUBJECT);
    assert_eq!(
        sent[0].1,
        aggregate(
            "Store",
            &[("WidgetA", in_stock(10)), ("WidgetB", in_stock(5))]
        )
    );
    assert_eq!(poller.baseline(), &sent[0].1);
}

#[tokio::test]
async fn test_restock_notifies() {
    let notifier = RecordingNotifier::default();
    let mut poller = poller_with(
        vec![
            Ok(catalog(&[("WidgetA", ProductStatus::OutOfStock)])),
            Ok(catalog(&[("WidgetA", in_stock(12))])),
        ],
        notifier.clone(),
    )
    .await;

    assert_eq!(poller.run_cycle().await, CycleOutcome::Notified);
    assert_eq!(notifier.sent.lock().unwrap().len(), 1);
    assert_eq!(
        poller.baseline(),
        &aggregate("Store", &[("WidgetA", in_stock(12))])
    );
}

#[tokio::test]
async fn test_price_drop_is_silent_and_keeps_baseline() {
    let notifier = RecordingNotifier::default();
    let mut poller = poller_with(
        vec![
            Ok(catalog(&[("WidgetA", in_stock(10))])),
            Ok(catalog(&[("WidgetA", in_stock(8))])),
        ],
        notifier.clone(),
    )
    .await;

    assert_eq!(poller.run_cycle().await, CycleOutcome::NoChange);
    assert!(notifier.sent.lock().unwrap().is_empty());
    // latest was discarded; the old price is still the comparison point
    assert_eq!(
        poller.baseline(),
        &aggregate("Store", &[("WidgetA", in_stock(10))])
    );
}

#[tokio::test]
async fn test_fetch_failure_is_swallowed_and_keeps_baseline() {
    let notifier = RecordingNotifier::default();
    let mut poller = poller_with(
        vec![
            Ok(catalog(&[("WidgetA", in_stock(10))])),
            Err(AppError::fetch("Store", "connection reset")),
            Ok(catalog(&[("WidgetA", in_stock(10)), ("WidgetB", in_stock(5))])),
        ],
        notifier.clone(),
    )
    .await;

    assert_eq!(poller.run_cycle().await, CycleOutcome::FetchFailed);
    assert!(notifier.sent.lock().unwrap().is_empty());
    assert_eq!(
        poller.baseline(),
        &aggregate("Store", &[("WidgetA", in_stock(10))])
    );

    // the loop keeps going: the next cycle works normally
    assert_eq!(poller.run_cycle().await, CycleOutcome::Notified);
}

#[tokio::test]
async fn test_notify_failure_still_advances_baseline() {
    let notifier = RecordingNotifier::default();
    notifier.fail.store(true, Ordering::SeqCst);
    let mut poller = poller_with(
        vec![
            Ok(catalog(&[("WidgetA", in_stock(10))])),
            Ok(catalog(&[("WidgetB", in_stock(5)), ("WidgetA", in_stock(10))])),
            Ok(catalog(&[("WidgetB", in_stock(5)), ("WidgetA", in_stock(10))])),
        ],
        notifier.clone(),
    )
    .await;

    assert_eq!(poller.run_cycle().await, CycleOutcome::NotifyFailed);
    assert!(notifier.sent.lock().unwrap().is_empty());

    // baseline advanced despite the failed delivery, so the same snapshot
    // does not re-alert next cycle
    notifier.fail.store(false, Ordering::SeqCst);
    assert_eq!(poller.run_cycle().await, CycleOutcome::NoChange);
}

#[tokio::test]
async fn test_initialization_failure_propagates() {
    let mut adapters: HashMap<String, Box<dyn SiteAdapter>> = HashMap::new();
    adapters.insert(
        "Store".to_string(),
        ScriptedAdapter::new(
            "Store",
            Some("https://store.example.com"),
            vec![Err(AppError::fetch("Store", "boot failure"))],
        ),
    );

    let result = PollLoop::initialize(
        AggregateScraper::new(adapters),
        Box::new(RecordingNotifier::default()),
        SUBJECT.to_string(),
        Duration::from_secs(60),
    )
    .await;

    assert!(matches!(result, Err(AppError::FetchFailed { .. })));
}
