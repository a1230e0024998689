use std::future::Future;

use tracing::debug;

pub mod browser;
pub mod models;
pub mod parser;
pub mod service;

/// Site root prepended to the relative links found in the markup.
pub const BASE_URL: &str = "https://www.superbid.com.pe";

pub fn absolute_url(relative: &str) -> String {
    format!("{}{}", BASE_URL, relative)
}

/// Run `attempt` up to `attempts` times, returning the first non-empty
/// result. Used for detail pages that may not have hydrated yet: each
/// attempt re-renders the page. Exhausting the attempts yields empty.
pub async fn retry_until_nonempty<T, F, Fut>(attempts: usize, mut attempt: F) -> Vec<T>
where
    F: FnMut(usize) -> Fut,
    Fut: Future<Output = Vec<T>>,
{
    for n in 1..=attempts {
        let items = attempt(n).await;
        if !items.is_empty() {
            return items;
        }
        debug!(attempt = n, attempts, "Empty result, retrying");
    }

    Vec::new()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[tokio::test]
    async fn retry_stops_at_first_nonempty_attempt() {
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        let links = retry_until_nonempty(5, move |_| async move {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n == 3 {
                vec!["/oferta/1".to_string()]
            } else {
                Vec::new()
            }
        })
        .await;

        assert_eq!(links, vec!["/oferta/1"]);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retry_exhausts_attempts_and_returns_empty() {
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        let links: Vec<String> = retry_until_nonempty(5, move |_| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Vec::new()
        })
        .await;

        assert!(links.is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn retry_makes_single_attempt_when_first_succeeds() {
        let calls = AtomicUsize::new(0);
        let calls = &calls;

        let links = retry_until_nonempty(5, move |_| async move {
            calls.fetch_add(1, Ordering::SeqCst);
            vec![1, 2]
        })
        .await;

        assert_eq!(links, vec![1, 2]);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn absolute_url_joins_base_and_relative() {
        assert_eq!(
            absolute_url("/evento/123"),
            "https://www.superbid.com.pe/evento/123"
        );
    }
}
