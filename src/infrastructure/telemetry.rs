use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global tracing subscriber. Called once by the embedding
/// binary before anything else logs; `RUST_LOG` overrides the default
/// filter.
pub fn init() {
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "billbook=debug".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();
}
