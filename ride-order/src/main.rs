//! Ride lifecycle demo binary
//!
//! Drives three orders through the lifecycle: a full trip with a rating, an
//! early cancellation, and a confirmed order whose car never shows up. A
//! fourth run shows a watcher losing the race against the car's arrival.

use anyhow::Context;
use ride_order::{RideConfig, RideEnvironment, RideEvent, RideOrder, RideSession};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RideConfig::from_env().context("loading ride configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!(?config, "configuration loaded");

    println!("=== Ride Lifecycle Demo ===");

    println!("\n--- Scenario 1: full trip with rating ---");
    happy_path(&config).await?;

    println!("\n--- Scenario 2: cancellation ---");
    cancellation(&config).await?;

    println!("\n--- Scenario 3: car delayed ---");
    delayed_car(&config).await?;

    println!("\n--- Scenario 4: car arrives before the watcher fires ---");
    watcher_race(&config).await?;

    println!("\n=== Demo complete ===");
    Ok(())
}

fn open(id: &str, car_id: &str, config: &RideConfig) -> RideSession {
    let order = RideOrder::new(id).with_car(car_id, "Alex");
    RideSession::with_config(order, RideEnvironment::production(), config)
}

/// Apply each event without stopping at rejections
///
/// The session's notice sink already reports every rejection.
async fn drive(session: &RideSession, events: &[RideEvent]) {
    for &event in events {
        if let Err(error) = session.transition(event).await {
            tracing::debug!(order_id = %session.order_id(), %error, "continuing after rejection");
        }
    }
}

async fn report(session: &RideSession) -> anyhow::Result<()> {
    let order = session.snapshot().await;
    let history = session.history().await;
    println!(
        "final: {}",
        serde_json::to_string(&order).context("serializing order snapshot")?
    );
    println!("transitions applied: {}", history.len());
    session.close().await.context("closing ride session")?;
    Ok(())
}

async fn happy_path(config: &RideConfig) -> anyhow::Result<()> {
    let session = open("RIDE-001", "CAR-001", config);
    drive(
        &session,
        &[
            RideEvent::SelectCar,
            RideEvent::ConfirmOrder,
            RideEvent::CarArrived,
            RideEvent::StartTrip,
            RideEvent::EndTrip,
            RideEvent::PaymentFailed,
            RideEvent::PaymentSuccess,
        ],
    )
    .await;

    if let Err(error) = session.submit_rating(5).await {
        tracing::debug!(%error, "continuing after rating rejection");
    }

    report(&session).await
}

async fn cancellation(config: &RideConfig) -> anyhow::Result<()> {
    let session = open("RIDE-002", "CAR-002", config);
    drive(
        &session,
        &[RideEvent::SelectCar, RideEvent::CancelOrder, RideEvent::ConfirmOrder],
    )
    .await;

    if let Err(error) = session.submit_rating(4).await {
        tracing::debug!(%error, "continuing after rating rejection");
    }

    report(&session).await
}

async fn delayed_car(config: &RideConfig) -> anyhow::Result<()> {
    let session = open("RIDE-003", "CAR-003", config);
    drive(&session, &[RideEvent::SelectCar, RideEvent::ConfirmOrder]).await;

    if let Some(mut watcher) = session.watch_for_delay(config.delay_watch_after).await? {
        println!(
            "waiting {:?} for the car (watcher fires after {:?})",
            config.demo_grace, config.delay_watch_after
        );
        if watcher.wait_with_timeout(config.demo_grace).await.is_err() {
            tracing::warn!("delay watcher did not finish within the grace period");
        }
    }

    report(&session).await
}

async fn watcher_race(config: &RideConfig) -> anyhow::Result<()> {
    let session = open("RIDE-004", "CAR-004", config);
    drive(&session, &[RideEvent::SelectCar, RideEvent::ConfirmOrder]).await;

    let watcher = session.watch_for_delay(config.delay_watch_after).await?;
    drive(&session, &[RideEvent::CarArrived]).await;

    if let Some(mut watcher) = watcher {
        if watcher.wait_with_timeout(config.demo_grace).await.is_err() {
            tracing::warn!("delay watcher did not finish within the grace period");
        }
    }

    report(&session).await
}
