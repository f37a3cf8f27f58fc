//! Local stand-ins for the published sheet.

use std::convert::Infallible;
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;
use warp::http::StatusCode;
use warp::Filter;

fn sheet_url(addr: std::net::SocketAddr) -> Url {
    Url::parse(&format!("http://{}/sheet.csv", addr)).unwrap()
}

/// Serve `body` as CSV on an ephemeral port. Must be called inside a tokio runtime.
pub(crate) fn serve_csv(body: &'static str) -> Url {
    let route = warp::path!("sheet.csv")
        .map(move || warp::reply::with_header(body, "content-type", "text/csv"));
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    sheet_url(addr)
}

/// Serve an empty body with `status`.
pub(crate) fn serve_status(status: StatusCode) -> Url {
    let route = warp::path!("sheet.csv").map(move || warp::reply::with_status("", status));
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    sheet_url(addr)
}

/// First request answers `slow` after `delay`; later requests answer `fast` immediately.
pub(crate) fn serve_slow_then_fast(
    slow: &'static str,
    fast: &'static str,
    delay: Duration,
) -> Url {
    let hits = Arc::new(AtomicUsize::new(0));
    let route = warp::path!("sheet.csv").and_then(move || {
        let hits = hits.clone();
        async move {
            if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                tokio::time::sleep(delay).await;
                Ok::<_, Infallible>(slow)
            } else {
                Ok(fast)
            }
        }
    });
    let (addr, server) = warp::serve(route).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);
    sheet_url(addr)
}

/// A URL on a port nothing listens on.
pub(crate) fn refused_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    sheet_url(addr)
}

/// Two approved projects and some noise, in sheet column order.
pub(crate) const SAMPLE_CSV: &str = "\
Timestamp,Name,Affiliation,Please describe your project,Student Org/Lab,Status
1/10/2025,Solar Tracker,Amherst,Builds a tracker,N/A,Approved
1/11/2025,Secret Idea,Boston,Not yet,,pending
1/12/2025,Robot Arm,Amherst,\"Pick, place & <sort>\",Robotics Club, approved
1/13/2025,,,,,Approved
";
