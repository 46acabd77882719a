use super::csp::{CspDirective, CspSources, set_csp_directive};
use axum::{
    body::Body,
    extract::Request,
    http::Response,
};
use futures::future::BoxFuture;
use tower::Service;

/// Tower layer that emits a `frame-ancestors` CSP directive on every response
///
/// Accepts a single origin or an ordered list of origins and delegates the
/// header assembly to [`set_csp_directive`]. Purely declarative: no
/// validation, no branching, no state.
///
/// # Example
///
/// ```rust,ignore
/// use breakwater::security::FrameAncestorsLayer;
///
/// // Single origin
/// let layer = FrameAncestorsLayer::new("https://admin.example.com");
///
/// // Multiple origins, emitted space-separated in order
/// let layer = FrameAncestorsLayer::new(vec![
///     "https://admin.example.com",
///     "https://partners.example.com",
/// ]);
/// ```
#[derive(Clone)]
pub struct FrameAncestorsLayer {
    sources: CspSources,
}

impl FrameAncestorsLayer {
    /// Create a layer from a single origin or a list of origins
    pub fn new(sources: impl Into<CspSources>) -> Self {
        Self {
            sources: sources.into(),
        }
    }
}

impl<S> tower::Layer<S> for FrameAncestorsLayer {
    type Service = FrameAncestorsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        FrameAncestorsService {
            inner,
            sources: self.sources.clone(),
        }
    }
}

/// Tower service produced by [`FrameAncestorsLayer`]
#[derive(Clone)]
pub struct FrameAncestorsService<S> {
    inner: S,
    sources: CspSources,
}

impl<S> Service<Request> for FrameAncestorsService<S>
where
    S: Service<Request, Response = Response<Body>> + Send + 'static,
    S::Future: Send,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request) -> Self::Future {
        let sources = self.sources.clone();
        let fut = self.inner.call(req);

        Box::pin(async move {
            let mut response = fut.await?;
            set_csp_directive(
                response.headers_mut(),
                CspDirective::FrameAncestors,
                &sources,
            );
            Ok(response)
        })
    }
}
