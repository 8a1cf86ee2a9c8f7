//! Pluggable transport.
//!
//! The crate ships no HTTP client. Hosts implement [`DataFetcher`] on top of
//! whatever runtime they already have.

use std::future::Future;
use std::pin::Pin;

use crate::error::Result;

/// Fetch raw bytes from a URL
pub trait DataFetcher: Send + Sync {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>>;
}

impl<T: DataFetcher + ?Sized> DataFetcher for std::sync::Arc<T> {
    fn fetch<'a>(
        &'a self,
        url: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<Vec<u8>>> + Send + 'a>> {
        (**self).fetch(url)
    }
}
