#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use eps_tracker::config::Config;
use eps_tracker::error::AppError;
use eps_tracker::portal::Portal;

/// In-memory portal double: serves a fixed page and counts upstream calls.
pub struct StubPortal {
    pub logged_in: AtomicBool,
    pub logins: AtomicUsize,
    pub fetches: AtomicUsize,
    pub page: String,
    pub fail_fetch: bool,
}

impl StubPortal {
    pub fn new(page: impl Into<String>) -> Self {
        StubPortal {
            logged_in: AtomicBool::new(true),
            logins: AtomicUsize::new(0),
            fetches: AtomicUsize::new(0),
            page: page.into(),
            fail_fetch: false,
        }
    }

    pub fn logged_out(page: impl Into<String>) -> Self {
        let stub = Self::new(page);
        stub.logged_in.store(false, Ordering::SeqCst);
        stub
    }

    pub fn failing() -> Self {
        let mut stub = Self::new("");
        stub.fail_fetch = true;
        stub
    }

    pub fn login_count(&self) -> usize {
        self.logins.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Portal for StubPortal {
    async fn login(&self) -> Result<(), AppError> {
        self.logins.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn fetch_home(&self) -> Result<String, AppError> {
        if self.fail_fetch {
            return Err(AppError::Upstream("connection refused".into()));
        }
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.page.clone())
    }

    fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }
}

pub fn test_config() -> Config {
    Config {
        username: "user".into(),
        password: "secret".into(),
        cache_minutes: 30,
        skip_malformed_rows: false,
        server_host: "127.0.0.1".into(),
        server_port: 0,
    }
}

/// Wraps package rows in the dashboard container the row selector expects.
pub fn page_with(rows: &str) -> String {
    format!(
        r#"<html><body><div id="fTrackingPaquetes">{}</div></body></html>"#,
        rows
    )
}

pub const FULL_ROW: &str = concat!(
    r#"<div data-groups="all status5 Disponible">"#,
    r#"<span class="packagecondition">Normal</span>"#,
    r#"<span class="trackingnumber">TRK123456</span>"#,
    r#"<span class="packagecontent">Libros</span>"#,
    r#"<span class="packagesender">Amazon</span>"#,
    r#"<span class="packageweight">2.5</span>"#,
    r#"</div>"#
);
