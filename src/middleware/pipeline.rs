//! Ordered request-filter chain.
//!
//! Each filter looks at one request and either hands it (possibly annotated) to the next
//! filter or stops the chain with a response. `apply` mounts a whole chain on a Router as a
//! single route layer, so the order filters run in is exactly the order they were added.
//!
//! ```ignore
//! let gated = Pipeline::new().with(authenticator).with(role_gate);
//! let admin = pipeline::apply(Router::new().route("/admin/status", get(status)), gated);
//! ```

use std::sync::Arc;

use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
};

/// Result of running one filter (or a whole pipeline) over a request.
#[derive(Debug)]
pub enum Outcome {
    Continue(Request),
    Reject(Response),
}

pub trait RequestFilter: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    fn filter(&self, req: Request) -> Outcome;
}

#[derive(Clone, Default)]
pub struct Pipeline {
    filters: Vec<Arc<dyn RequestFilter>>,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.filters.iter().map(|f| f.name()).collect();
        f.debug_struct("Pipeline").field("filters", &names).finish()
    }
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter. It runs after every filter already in the chain.
    pub fn with<F>(mut self, filter: F) -> Self
    where
        F: RequestFilter + 'static,
    {
        self.filters.push(Arc::new(filter));
        self
    }

    pub fn run(&self, mut req: Request) -> Outcome {
        for filter in &self.filters {
            match filter.filter(req) {
                Outcome::Continue(next) => req = next,
                Outcome::Reject(response) => {
                    tracing::debug!(
                        filter = filter.name(),
                        status = %response.status(),
                        "request rejected"
                    );
                    return Outcome::Reject(response);
                }
            }
        }
        Outcome::Continue(req)
    }
}

/// Mount `pipeline` on every route currently registered on `router`.
///
/// Uses `route_layer`, so unmatched paths still fall through to the normal 404.
pub fn apply<S>(router: Router<S>, pipeline: Pipeline) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(pipeline, run_pipeline))
}

async fn run_pipeline(State(pipeline): State<Pipeline>, req: Request, next: Next) -> Response {
    match pipeline.run(req) {
        Outcome::Continue(req) => next.run(req).await,
        Outcome::Reject(response) => response,
    }
}
