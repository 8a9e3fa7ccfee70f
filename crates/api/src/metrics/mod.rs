use actix_web::{http::StatusCode, web, HttpResponse};
use std::{
    fmt::Write,
    sync::atomic::{AtomicU64, Ordering},
    time::{Duration, Instant},
};

const STATUS_CLASSES: [&str; 5] = ["1xx", "2xx", "3xx", "4xx", "5xx"];

/// Request counters of the server, exposed in the prometheus text format
#[derive(Debug)]
pub struct HttpMetrics {
    requests: [AtomicU64; 5],
    response_time_micros: AtomicU64,
    started: Instant,
}

impl HttpMetrics {
    pub fn new() -> Self {
        Self {
            requests: Default::default(),
            response_time_micros: AtomicU64::new(0),
            started: Instant::now(),
        }
    }

    pub fn record(&self, status: StatusCode, elapsed: Duration) {
        let class = (status.as_u16() / 100).clamp(1, 5) as usize - 1;
        self.requests[class].fetch_add(1, Ordering::Relaxed);
        self.response_time_micros
            .fetch_add(elapsed.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let total: u64 = self
            .requests
            .iter()
            .map(|count| count.load(Ordering::Relaxed))
            .sum();

        let _ = writeln!(
            out,
            "# HELP docbook_http_requests_total Handled HTTP requests by status class"
        );
        let _ = writeln!(out, "# TYPE docbook_http_requests_total counter");
        for (class, count) in STATUS_CLASSES.iter().zip(self.requests.iter()) {
            let _ = writeln!(
                out,
                "docbook_http_requests_total{{status=\"{}\"}} {}",
                class,
                count.load(Ordering::Relaxed)
            );
        }

        let _ = writeln!(
            out,
            "# HELP docbook_http_request_duration_seconds Time spent handling HTTP requests"
        );
        let _ = writeln!(out, "# TYPE docbook_http_request_duration_seconds summary");
        let _ = writeln!(
            out,
            "docbook_http_request_duration_seconds_sum {}",
            self.response_time_micros.load(Ordering::Relaxed) as f64 / 1_000_000.0
        );
        let _ = writeln!(out, "docbook_http_request_duration_seconds_count {}", total);

        let _ = writeln!(out, "# HELP docbook_uptime_seconds Seconds since the server started");
        let _ = writeln!(out, "# TYPE docbook_uptime_seconds gauge");
        let _ = writeln!(
            out,
            "docbook_uptime_seconds {}",
            self.started.elapsed().as_secs()
        );
        out
    }
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

async fn metrics(metrics: web::Data<HttpMetrics>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(metrics.render())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/metrics", web::get().to(metrics));
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn counts_requests_by_status_class() {
        let metrics = HttpMetrics::new();
        metrics.record(StatusCode::OK, Duration::from_millis(20));
        metrics.record(StatusCode::CREATED, Duration::from_millis(10));
        metrics.record(StatusCode::CONFLICT, Duration::from_millis(5));
        metrics.record(StatusCode::SERVICE_UNAVAILABLE, Duration::from_millis(15));

        let rendered = metrics.render();
        assert!(rendered.contains("docbook_http_requests_total{status=\"2xx\"} 2"));
        assert!(rendered.contains("docbook_http_requests_total{status=\"4xx\"} 1"));
        assert!(rendered.contains("docbook_http_requests_total{status=\"5xx\"} 1"));
        assert!(rendered.contains("docbook_http_requests_total{status=\"3xx\"} 0"));
        assert!(rendered.contains("docbook_http_request_duration_seconds_sum 0.05"));
        assert!(rendered.contains("docbook_http_request_duration_seconds_count 4"));
    }
}
