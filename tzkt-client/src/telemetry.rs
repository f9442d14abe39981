//! Logging and span export for the `tzkt` binary.
//!
//! Logs always go to stderr so stdout carries nothing but JSON results. The
//! filter comes from `RUST_LOG`, else from the `-v` count. Query spans are
//! shipped over OTLP once an `OTEL_EXPORTER_OTLP_*` endpoint is configured.
//! Only available with the `telemetry` feature.

use std::env;

use opentelemetry::KeyValue;
use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::SpanExporter;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::{Sampler, SdkTracerProvider};
use opentelemetry_semantic_conventions::{SCHEMA_URL, attribute::SERVICE_VERSION};
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const ENDPOINT_VARS: [&str; 2] = [
    "OTEL_EXPORTER_OTLP_TRACES_ENDPOINT",
    "OTEL_EXPORTER_OTLP_ENDPOINT",
];
const PROTOCOL_VARS: [&str; 2] = [
    "OTEL_EXPORTER_OTLP_TRACES_PROTOCOL",
    "OTEL_EXPORTER_OTLP_PROTOCOL",
];

/// Wire protocol of the span exporter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpanTransport {
    HttpProtobuf,
    Grpc,
}

impl SpanTransport {
    /// Anything but `grpc` falls back to HTTP, the OTLP default.
    fn from_protocol(protocol: Option<&str>) -> Self {
        match protocol.map(str::trim) {
            Some("grpc") => Self::Grpc,
            _ => Self::HttpProtobuf,
        }
    }
}

fn first_env(keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
}

/// Crate-scoped filter directive for a `-v` count; dependencies stay at `warn`.
fn directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_owned(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    format!("warn,tzkt={level},tzkt_client={level}")
}

#[allow(clippy::print_stderr)]
fn tracer_provider(transport: SpanTransport) -> Option<SdkTracerProvider> {
    let exporter = match transport {
        SpanTransport::HttpProtobuf => SpanExporter::builder().with_http().build(),
        SpanTransport::Grpc => SpanExporter::builder().with_tonic().build(),
    };
    let exporter = match exporter {
        Ok(exporter) => exporter,
        Err(err) => {
            eprintln!("span exporter disabled: {err}");
            return None;
        }
    };

    let mut resource = Resource::builder().with_schema_url(
        [KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION"))],
        SCHEMA_URL,
    );
    if env::var_os("OTEL_SERVICE_NAME").is_none() {
        resource = resource.with_service_name(env!("CARGO_PKG_NAME"));
    }

    Some(
        SdkTracerProvider::builder()
            .with_sampler(Sampler::ParentBased(Box::new(Sampler::AlwaysOn)))
            .with_resource(resource.build())
            .with_batch_exporter(exporter)
            .build(),
    )
}

/// Installs the global subscriber for a run of the CLI.
///
/// Keep the returned guard alive until the command finishes; dropping it
/// flushes spans still queued for export.
pub fn init(verbosity: u8) -> TelemetryGuard {
    let provider = first_env(&ENDPOINT_VARS)
        .and_then(|_| tracer_provider(SpanTransport::from_protocol(first_env(&PROTOCOL_VARS).as_deref())));
    let spans = provider
        .as_ref()
        .map(|provider| OpenTelemetryLayer::new(provider.tracer(env!("CARGO_PKG_NAME"))));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive(verbosity)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(spans)
        .init();

    TelemetryGuard { provider }
}

/// Shuts the span exporter down on drop.
#[derive(Debug)]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take()
            && let Err(err) = provider.shutdown()
        {
            tracing::error!(?err, "span exporter shutdown failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_defaults_to_http() {
        assert_eq!(SpanTransport::from_protocol(None), SpanTransport::HttpProtobuf);
        assert_eq!(
            SpanTransport::from_protocol(Some("http/json")),
            SpanTransport::HttpProtobuf
        );
        assert_eq!(SpanTransport::from_protocol(Some(" grpc ")), SpanTransport::Grpc);
    }

    #[test]
    fn verbosity_raises_crate_level_only() {
        assert_eq!(directive(0), "warn");
        assert_eq!(directive(1), "warn,tzkt=info,tzkt_client=info");
        assert_eq!(directive(2), "warn,tzkt=debug,tzkt_client=debug");
        assert_eq!(directive(7), "warn,tzkt=trace,tzkt_client=trace");
    }

    #[test]
    fn directives_parse() {
        for verbosity in 0..4 {
            assert!(EnvFilter::try_new(directive(verbosity)).is_ok());
        }
    }
}
