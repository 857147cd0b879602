//! Lookup-and-render pipeline
//!
//! Ties the cache, the dictionary client and the renderer together: one word
//! in, one formatted entry out.

use std::io::{self, Write};

use thiserror::Error;
use tracing::debug;

use crate::cache::{CacheError, CacheStore};
use crate::cli::LookupOptions;
use crate::data::{Dictionary, DictionaryError, Language, LookupResponse};
use crate::ui::Renderer;

/// Errors that can occur during a lookup
#[derive(Debug, Error)]
pub enum LookupError {
    /// Reading or writing the cache failed
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// The dictionary service could not be reached
    #[error(transparent)]
    Dictionary(#[from] DictionaryError),

    /// The response was not valid JSON
    #[error("Failed to parse dictionary response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Writing the rendered entry failed
    #[error("Failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Where a response came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Served from the local cache
    Cache,
    /// Fetched from the dictionary service and cached
    Remote,
}

/// Application state for one invocation
pub struct App<D> {
    /// Cache loaded at startup
    cache: CacheStore,
    /// Dictionary service client
    dictionary: D,
}

impl<D: Dictionary> App<D> {
    /// Creates an App from an already-loaded cache and a dictionary client
    pub fn new(cache: CacheStore, dictionary: D) -> Self {
        Self { cache, dictionary }
    }

    /// Returns the raw response bytes for `word`, fetching and caching on a miss
    ///
    /// The word is lowercased before it is used as a cache key or query.
    pub async fn raw_response(&mut self, word: &str) -> Result<(Vec<u8>, Source), LookupError> {
        let word = word.to_lowercase();

        if let Some(raw) = self.cache.get_raw(&word)? {
            debug!(word = %word, "cache hit");
            return Ok((raw, Source::Cache));
        }

        debug!(word = %word, "cache miss");
        let raw = self.dictionary.fetch(&word).await?;
        self.cache.put(&word, &raw)?;
        Ok((raw, Source::Remote))
    }

    /// Looks up `word` and writes the formatted entry to `out`
    ///
    /// # Arguments
    /// * `word` - The word as typed; its script decides which sample half is highlighted
    /// * `options` - Long form and color settings
    /// * `out` - Destination for the rendered text
    ///
    /// # Returns
    /// * `Ok(Source)` - Where the response came from
    /// * `Err(LookupError)` - If the cache, network, parsing or output fails
    pub async fn lookup<W: Write>(
        &mut self,
        word: &str,
        options: &LookupOptions,
        out: &mut W,
    ) -> Result<Source, LookupError> {
        let (raw, source) = self.raw_response(word).await?;
        let response = LookupResponse::from_slice(&raw)?;

        let renderer = Renderer::new(
            options.color.palette(),
            options.long,
            Language::detect(word),
        );
        renderer.render(&response, &word.to_lowercase(), out)?;
        out.flush()?;

        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ColorMode;
    use crate::data::test_server::serve_once;
    use crate::data::DictionaryClient;
    use std::time::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    const RUN_JSON: &str = r#"{"word":"run","pronunciation":{"UK":"rʌn"},"defs":[{"pos":"v.","def":"跑"}],"sams":[{"eng":"I run fast","chn":"我跑得快"}]}"#;

    /// Dictionary double serving a fixed body and counting requests
    struct FixedDictionary {
        body: &'static str,
        calls: AtomicUsize,
    }

    impl FixedDictionary {
        fn new(body: &'static str) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl Dictionary for FixedDictionary {
        async fn fetch(&self, _word: &str) -> Result<Vec<u8>, DictionaryError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.body.as_bytes().to_vec())
        }
    }

    fn create_test_app(body: &'static str) -> (App<FixedDictionary>, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let cache = CacheStore::load(temp_dir.path().join(".bdcv")).expect("Load should succeed");
        (App::new(cache, FixedDictionary::new(body)), temp_dir)
    }

    fn plain_long() -> LookupOptions {
        LookupOptions {
            long: true,
            color: ColorMode::Off,
        }
    }

    async fn lookup_to_string(
        app: &mut App<FixedDictionary>,
        word: &str,
        options: &LookupOptions,
    ) -> (String, Source) {
        let mut out = Vec::new();
        let source = app
            .lookup(word, options, &mut out)
            .await
            .expect("Lookup should succeed");
        (String::from_utf8(out).unwrap(), source)
    }

    #[tokio::test]
    async fn test_end_to_end_plain_long() {
        let (mut app, _temp_dir) = create_test_app(RUN_JSON);

        let (output, source) = lookup_to_string(&mut app, "run", &plain_long()).await;

        assert_eq!(source, Source::Remote);
        assert_eq!(
            output,
            "* Pronunciation\n    UK. [rʌn]\n* Definition\n    v. 跑\n* Samples\n  - I run fast\n    我跑得快\n"
        );
    }

    #[tokio::test]
    async fn test_second_lookup_hits_cache_with_identical_output() {
        let (mut app, _temp_dir) = create_test_app(RUN_JSON);
        let options = LookupOptions {
            long: true,
            color: ColorMode::On,
        };

        let (first, first_source) = lookup_to_string(&mut app, "run", &options).await;
        let (second, second_source) = lookup_to_string(&mut app, "run", &options).await;

        assert_eq!(first_source, Source::Remote);
        assert_eq!(second_source, Source::Cache);
        assert_eq!(first, second);
        assert_eq!(app.dictionary.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_lookup_is_case_insensitive() {
        let (mut app, _temp_dir) = create_test_app(RUN_JSON);

        lookup_to_string(&mut app, "Run", &plain_long()).await;
        let (_, source) = lookup_to_string(&mut app, "RUN", &plain_long()).await;

        assert_eq!(source, Source::Cache);
        assert_eq!(app.dictionary.calls.load(Ordering::SeqCst), 1);
        assert!(app.cache.get("run").is_some());
    }

    #[tokio::test]
    async fn test_fetched_response_is_persisted() {
        let (mut app, temp_dir) = create_test_app(RUN_JSON);

        lookup_to_string(&mut app, "run", &plain_long()).await;

        let reloaded = CacheStore::load(temp_dir.path().join(".bdcv")).unwrap();
        assert_eq!(
            reloaded.get_raw("run").unwrap().as_deref(),
            Some(RUN_JSON.as_bytes())
        );
    }

    #[tokio::test]
    async fn test_cached_word_skips_dictionary() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".bdcv");
        let mut cache = CacheStore::load(&path).unwrap();
        cache.put("run", RUN_JSON.as_bytes()).unwrap();

        let mut app = App::new(CacheStore::load(&path).unwrap(), FixedDictionary::new("{}"));
        let (output, source) = lookup_to_string(&mut app, "run", &plain_long()).await;

        assert_eq!(source, Source::Cache);
        assert!(output.contains("    v. 跑\n"));
        assert_eq!(app.dictionary.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_server_error_is_fatal_and_not_cached() {
        let (endpoint, server) = serve_once("500 Internal Server Error", b"{}");
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".bdcv");
        let dictionary = DictionaryClient::with_endpoint(endpoint, Some(Duration::from_secs(5))).unwrap();
        let mut app = App::new(CacheStore::load(&path).unwrap(), dictionary);

        let mut out = Vec::new();
        let result = app.lookup("run", &plain_long(), &mut out).await;

        assert!(matches!(
            result,
            Err(LookupError::Dictionary(DictionaryError::RequestFailed(_)))
        ));
        assert!(out.is_empty());
        assert!(!path.exists(), "Failed fetch must not write the cache");
        server.join().unwrap();
    }

    #[tokio::test]
    async fn test_fetched_body_is_cached_verbatim() {
        let (endpoint, server) = serve_once("200 OK", RUN_JSON.as_bytes());
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(".bdcv");
        let dictionary = DictionaryClient::with_endpoint(endpoint, Some(Duration::from_secs(5))).unwrap();
        let mut app = App::new(CacheStore::load(&path).unwrap(), dictionary);

        let mut out = Vec::new();
        let source = app.lookup("Run", &plain_long(), &mut out).await.unwrap();

        assert_eq!(source, Source::Remote);
        assert_eq!(
            server.join().unwrap(),
            "GET /BingDictService.aspx?Word=run HTTP/1.1"
        );
        let reloaded = CacheStore::load(&path).unwrap();
        assert_eq!(
            reloaded.get_raw("run").unwrap().as_deref(),
            Some(RUN_JSON.as_bytes())
        );
    }

    #[tokio::test]
    async fn test_malformed_response_is_parse_error() {
        let (mut app, _temp_dir) = create_test_app("<html>Service Unavailable</html>");

        let mut out = Vec::new();
        let result = app.lookup("run", &plain_long(), &mut out).await;

        assert!(matches!(result, Err(LookupError::ParseError(_))));
        assert!(out.is_empty());
    }
}
