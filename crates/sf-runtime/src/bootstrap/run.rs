use anyhow::Context;
use tracing::{info, warn};

use super::wiring::StorefrontDeps;
use crate::shell::{Screen, StorefrontShell};

/// Boot the storefront, open `path` and report where the user ends up.
///
/// A denied route is followed through its countdown to the redirect
/// target.
pub async fn run_shell(deps: StorefrontDeps, path: &str) -> anyhow::Result<Screen> {
    let mut shell = StorefrontShell::new(deps);
    shell.boot();
    if !shell.wait_booted().await {
        anyhow::bail!("bootstrap stopped before every fetch settled");
    }

    if let Some(outcome) = shell.bootstrap_outcome() {
        for (source, reason) in outcome.rejected() {
            warn!(%source, %reason, "catalog slice unavailable");
        }
    }

    shell
        .navigate(path)
        .with_context(|| format!("cannot open {path}"))?;

    let mut screen = shell.settle_route().await;
    info!(?screen, "route resolved");

    if let Screen::AccessDenied { remaining, .. } = &screen {
        info!(remaining, "access denied, waiting for redirect");
        screen = shell.follow_redirect().await;
        info!(?screen, "redirect followed");
    }

    Ok(screen)
}
