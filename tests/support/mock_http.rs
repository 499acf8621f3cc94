use std::{
    collections::HashMap,
    convert::Infallible,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
    time::Duration,
};

use anyhow::{Context, Result};
use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Method, Request, Response, Server, StatusCode};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::sleep;

#[derive(Clone)]
struct Route {
    status: StatusCode,
    body: String,
    delay: Duration,
}

/// Path table served by [`MockHttpServer`]. Each route answers after its delay.
#[derive(Clone, Default)]
pub struct MockRoutes {
    routes: HashMap<String, Route>,
}

impl MockRoutes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(self, path: &str, body: impl Into<String>, delay: Duration) -> Self {
        self.route_with_status(path, StatusCode::OK, body, delay)
    }

    pub fn route_with_status(
        mut self,
        path: &str,
        status: StatusCode,
        body: impl Into<String>,
        delay: Duration,
    ) -> Self {
        self.routes.insert(
            path.to_owned(),
            Route {
                status,
                body: body.into(),
                delay,
            },
        );
        self
    }
}

pub struct MockHttpServer {
    url: String,
    hits: Arc<AtomicUsize>,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl MockHttpServer {
    pub async fn start(routes: MockRoutes) -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind mock HTTP listener")?;
        let addr = listener
            .local_addr()
            .context("failed to read mock listener address")?;
        let std_listener = listener
            .into_std()
            .context("failed to convert mock listener")?;
        std_listener
            .set_nonblocking(true)
            .context("failed to set mock listener non-blocking")?;

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let routes = Arc::new(routes.routes);
        let hits = Arc::new(AtomicUsize::new(0));

        let service_hits = hits.clone();
        let make_service = make_service_fn(move |_| {
            let routes = routes.clone();
            let hits = service_hits.clone();
            async move {
                Ok::<_, Infallible>(service_fn(move |req| {
                    serve_request(routes.clone(), hits.clone(), req)
                }))
            }
        });

        let server = Server::from_tcp(std_listener)
            .context("failed to build mock HTTP server")?
            // Pooled client connections must not hold the graceful shutdown open.
            .http1_keepalive(false)
            .serve(make_service);
        let graceful = server.with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });

        let handle = tokio::spawn(async move {
            if let Err(err) = graceful.await {
                eprintln!("mock HTTP server stopped: {err}");
            }
        });

        Ok(Self {
            url: format!("http://{}", addr),
            hits,
            shutdown: Some(shutdown_tx),
            handle: Some(handle),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    pub async fn shutdown(mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

async fn serve_request(
    routes: Arc<HashMap<String, Route>>,
    hits: Arc<AtomicUsize>,
    req: Request<Body>,
) -> Result<Response<Body>, Infallible> {
    hits.fetch_add(1, Ordering::SeqCst);

    if req.method() != Method::GET {
        let mut response = Response::new(Body::from("Unsupported method"));
        *response.status_mut() = StatusCode::METHOD_NOT_ALLOWED;
        return Ok(response);
    }

    let Some(route) = routes.get(req.uri().path()).cloned() else {
        let mut response = Response::new(Body::from("not found"));
        *response.status_mut() = StatusCode::NOT_FOUND;
        return Ok(response);
    };

    if !route.delay.is_zero() {
        sleep(route.delay).await;
    }

    let mut response = Response::new(Body::from(route.body));
    *response.status_mut() = route.status;
    response.headers_mut().insert(
        hyper::header::CONTENT_TYPE,
        hyper::header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    Ok(response)
}

/// Accepts connections and answers each with bytes that are not HTTP.
pub struct GarbageServer {
    url: String,
    handle: JoinHandle<()>,
}

impl GarbageServer {
    pub async fn start() -> Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("failed to bind garbage listener")?;
        let addr = listener
            .local_addr()
            .context("failed to read garbage listener address")?;

        let handle = tokio::spawn(async move {
            while let Ok((mut stream, _)) = listener.accept().await {
                tokio::spawn(async move {
                    let mut buf = [0u8; 1024];
                    let _ = stream.read(&mut buf).await;
                    let _ = stream.write_all(b"definitely not http\r\n\r\n").await;
                    let _ = stream.shutdown().await;
                });
            }
        });

        Ok(Self {
            url: format!("http://{}/", addr),
            handle,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Drop for GarbageServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A URL on a loopback port that nothing listens on.
pub async fn refused_url() -> Result<String> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .context("failed to reserve a loopback port")?;
    let addr = listener
        .local_addr()
        .context("failed to read reserved port")?;
    drop(listener);
    Ok(format!("http://{}/", addr))
}
