use anyhow::Context;
use app_provider::bootstrap::Initializer;
use app_provider::di::{self, Container};
use app_provider::host::{Application, LocalHost};
use app_provider::{LifecycleHub, ScreenHandle};
use futures::StreamExt;
use std::time::Duration;

mod screens;

use screens::{DetailScreen, MainScreen, describe};

static INIT_SERVICES: Initializer = Initializer::new("services", |app| {
    let mut container = Container::new();
    di::register_providers(&mut container, app, LifecycleHub::global());
    tracing::info!(
        application = app.name(),
        services = container.len(),
        "Service container ready"
    );
});

fn host() -> LocalHost {
    // Runs ahead of the rest of main, so logging is up before the hook installs.
    tracing_subscriber::fmt::init();
    LocalHost::new("screen-tour")
}

#[app_provider::main(host())]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing::info!("🚀 Starting screen tour...");

    // Registered after the handle was published, so it runs right here.
    INIT_SERVICES.ensure();

    let hub = LifecycleHub::global();

    let first = {
        let hub = hub.clone();
        tokio::spawn(async move { hub.wait_screen_timeout(Duration::from_secs(1)).await })
    };

    let mut in_front = hub.only_resumed_distinct();
    let watcher = tokio::spawn(async move {
        while let Some(event) = in_front.next().await {
            tracing::info!(
                screen = %event.screen_id,
                sequence = event.sequence,
                "Screen moved to the front"
            );
        }
    });

    let mut destroyed = hub.listen_destroyed();

    let host = app_provider::application()
        .and_then(|app| app.downcast::<LocalHost>())
        .context("host hook did not publish a LocalHost")?;

    // 1. Launch
    let main_screen = ScreenHandle::new(MainScreen::new(host.name()));
    host.open(&main_screen);

    let first = first.await??;
    tracing::info!(screen = %describe(&first), "First screen is up");

    // 2. Navigate forward
    let detail = ScreenHandle::new(DetailScreen { title: "Settings" });
    host.pause(&main_screen);
    host.open(&detail);
    host.stop(&main_screen);

    // 3. Navigate back
    host.pause(&detail);
    host.start(&main_screen);
    host.resume(&main_screen);
    host.stop(&detail);
    host.destroy(&detail);

    let gone = destroyed.next().await.context("destroyed stream ended")?;
    tracing::info!(screen = %describe(&gone), "Screen destroyed");
    drop(gone);
    drop(detail);

    if let Some(current) = app_provider::current_screen() {
        tracing::info!(screen = %describe(&current), "Current screen");
    }

    // 4. Shut down
    host.close(&main_screen);
    drop(destroyed);

    tokio::time::sleep(Duration::from_millis(50)).await;
    watcher.abort();

    if let Some(event) = hub.last_event() {
        tracing::info!(snapshot = %serde_json::to_string(&event)?, "Last lifecycle event");
    }
    tracing::info!(faults = hub.listener_faults(), "👋 Screen tour finished");
    Ok(())
}
