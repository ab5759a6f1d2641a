//! Request and content counters exposed on the Prometheus scrape endpoint.

use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::Lazy;

static PROMETHEUS: Lazy<PrometheusHandle> = Lazy::new(|| {
    PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder")
});

/// Install the global recorder and pre-register counters so the scrape
/// endpoint reports zeros instead of omitting series that have not fired.
pub fn init_metrics() -> PrometheusHandle {
    let handle = PROMETHEUS.clone();

    ::metrics::describe_counter!(
        "sitesmith_pages_rendered_total",
        "Public page renders, by outcome"
    );
    ::metrics::describe_counter!(
        "sitesmith_sections_missing_component_total",
        "Section instances whose component name had no dispatch entry"
    );
    ::metrics::describe_counter!(
        "sitesmith_admin_writes_total",
        "Admin mutations accepted (create/update/delete/reorder)"
    );
    ::metrics::describe_counter!(
        "sitesmith_uploads_total",
        "Media files stored through the upload endpoint"
    );
    ::metrics::describe_counter!("sitesmith_logins_total", "Admin login attempts, by outcome");

    handle
}

pub fn record_page_render(found: bool) {
    let outcome = if found { "ok" } else { "not_found" };
    ::metrics::counter!("sitesmith_pages_rendered_total", "outcome" => outcome).increment(1);
}

pub fn record_missing_component() {
    ::metrics::counter!("sitesmith_sections_missing_component_total").increment(1);
}

pub fn record_admin_write(collection: &'static str) {
    ::metrics::counter!("sitesmith_admin_writes_total", "collection" => collection).increment(1);
}

pub fn record_upload() {
    ::metrics::counter!("sitesmith_uploads_total").increment(1);
}

pub fn record_login(success: bool) {
    let outcome = if success { "ok" } else { "rejected" };
    ::metrics::counter!("sitesmith_logins_total", "outcome" => outcome).increment(1);
}
