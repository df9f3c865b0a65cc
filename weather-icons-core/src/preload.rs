//! Best-effort cache warming for icon assets.

use async_trait::async_trait;
use futures::future::join_all;
use reqwest::Client;
use std::{collections::HashSet, fmt::Debug, time::Duration};

use crate::{
    assets,
    code::{ConditionCode, TimeOfDay, Variation},
    resolver::{IconRequest, IconResolver},
};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request for {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request for {path} returned status {status}")]
    Status { path: String, status: u16 },
}

/// Something that can load an asset by its resolved path.
#[async_trait]
pub trait AssetFetcher: Send + Sync + Debug {
    async fn fetch(&self, path: &str) -> Result<(), FetchError>;
}

/// Fetches assets over HTTP from the host serving the dashboard.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    base_url: String,
    http: Client,
}

impl HttpFetcher {
    /// `timeout` of `None` lets a hung request wait forever.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(FetchError::Client)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { base_url, http })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<(), FetchError> {
        let url = self.url_for(path);
        let transport = |source| FetchError::Transport { path: path.to_string(), source };

        let res = self.http.get(&url).send().await.map_err(transport)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Status { path: path.to_string(), status: status.as_u16() });
        }

        // Drain the body so the asset actually lands in any intermediate cache.
        res.bytes().await.map_err(transport)?;

        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreloadReport {
    pub attempted: usize,
    pub loaded: Vec<String>,
    /// `(path, error message)` for each attempt that failed.
    pub failed: Vec<(String, String)>,
}

impl PreloadReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Debug)]
pub struct Preloader<'t, F> {
    resolver: IconResolver<'t>,
    fetcher: F,
}

impl<F: AssetFetcher> Preloader<'static, F> {
    pub fn new(fetcher: F) -> Self {
        Self { resolver: IconResolver::builtin(), fetcher }
    }
}

impl<'t, F: AssetFetcher> Preloader<'t, F> {
    pub fn with_resolver(resolver: IconResolver<'t>, fetcher: F) -> Self {
        Self { resolver, fetcher }
    }

    /// Vector paths worth warming for `codes`: day and night variants, plus the
    /// entry's own fallback asset when `include_fallback` is set. Duplicates are
    /// dropped, first occurrence wins.
    pub fn candidates(
        &self,
        codes: &[ConditionCode],
        variation: Variation,
        include_fallback: bool,
    ) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut paths = Vec::new();

        for &code in codes {
            for time_of_day in [TimeOfDay::Day, TimeOfDay::Night] {
                let request = IconRequest::new(code, time_of_day).variation(variation).static_only();
                paths.push(self.resolver.resolve_path(&request));
            }

            if include_fallback {
                if let Some(fallback) = self.resolver.table().mapping(code).and_then(|m| m.fallback()) {
                    paths.push(assets::join(variation.base_dir(), fallback));
                }
            }
        }

        paths.retain(|p| seen.insert(p.clone()));
        paths
    }

    /// Fetch every candidate concurrently and wait for all of them to settle.
    /// Individual failures are logged and reported, never propagated.
    pub async fn preload(
        &self,
        codes: &[ConditionCode],
        variation: Variation,
        include_fallback: bool,
    ) -> PreloadReport {
        let paths = self.candidates(codes, variation, include_fallback);
        tracing::debug!(count = paths.len(), %variation, "preloading icon assets");

        let attempts = paths.iter().map(|path| async move {
            let result = self.fetcher.fetch(path).await;
            (path, result)
        });

        let mut report = PreloadReport { attempted: paths.len(), ..Default::default() };

        for (path, result) in join_all(attempts).await {
            match result {
                Ok(()) => report.loaded.push(path.clone()),
                Err(err) => {
                    tracing::warn!(%path, error = %err, "failed to preload icon");
                    report.failed.push((path.clone(), err.to_string()));
                }
            }
        }

        tracing::info!(
            attempted = report.attempted,
            loaded = report.loaded.len(),
            failed = report.failed.len(),
            "icon preload settled"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assets::FILL_BASE_DIR, table::{IconMapping, IconTable}};
    use std::sync::Mutex;

    #[derive(Debug, Default)]
    struct RecordingFetcher {
        failing: Vec<&'static str>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl AssetFetcher for RecordingFetcher {
        async fn fetch(&self, path: &str) -> Result<(), FetchError> {
            self.seen.lock().unwrap().push(path.to_string());

            if self.failing.iter().any(|f| path.ends_with(f)) {
                return Err(FetchError::Status { path: path.to_string(), status: 404 });
            }
            Ok(())
        }
    }

    #[test]
    fn candidates_cover_day_and_night() {
        let preloader = Preloader::new(RecordingFetcher::default());
        let paths = preloader.candidates(&[ConditionCode(1000)], Variation::Fill, false);

        assert_eq!(
            paths,
            vec![format!("{FILL_BASE_DIR}/clear-day.svg"), format!("{FILL_BASE_DIR}/clear-night.svg")]
        );
    }

    #[test]
    fn candidates_are_deduplicated() {
        let preloader = Preloader::new(RecordingFetcher::default());
        let paths = preloader.candidates(
            &[ConditionCode(1006), ConditionCode(1006), ConditionCode(1183)],
            Variation::Line,
            true,
        );

        // 1006 uses the same icon day and night and has no fallback; 1183 likewise.
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn candidates_include_entry_fallback_on_request() {
        let preloader = Preloader::new(RecordingFetcher::default());

        let without = preloader.candidates(&[ConditionCode(1003)], Variation::Fill, false);
        let with = preloader.candidates(&[ConditionCode(1003)], Variation::Fill, true);

        assert_eq!(without.len(), 2);
        assert_eq!(with.len(), 3);
        assert_eq!(with[2], format!("{FILL_BASE_DIR}/cloudy.svg"));
    }

    #[test]
    fn candidates_never_use_gif_overrides() {
        let preloader = Preloader::new(RecordingFetcher::default());
        let paths = preloader.candidates(&[ConditionCode(1000)], Variation::Fill, true);
        assert!(paths.iter().all(|p| p.ends_with(".svg")));
    }

    #[tokio::test]
    async fn failures_do_not_short_circuit() {
        let fetcher = RecordingFetcher { failing: vec!["clear-day.svg"], ..Default::default() };
        let preloader = Preloader::new(fetcher);

        let codes = [ConditionCode(1000), ConditionCode(1183)];
        let report = preloader.preload(&codes, Variation::Fill, false).await;

        assert_eq!(report.attempted, 3);
        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].0.ends_with("clear-day.svg"));
        assert!(!report.is_complete());
        assert_eq!(preloader.fetcher.seen.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn unknown_codes_warm_the_default_asset() {
        let table = IconTable::builder()
            .mapping(1, IconMapping { night: Some("moon.svg"), ..Default::default() })
            .build();
        let preloader = Preloader::with_resolver(IconResolver::new(&table), RecordingFetcher::default());

        let report = preloader.preload(&[ConditionCode(1), ConditionCode(77)], Variation::Fill, true).await;

        assert!(report.is_complete());
        assert_eq!(
            report.loaded,
            vec![format!("{FILL_BASE_DIR}/moon.svg"), format!("{FILL_BASE_DIR}/not-available.svg")]
        );
    }

    #[test]
    fn url_for_joins_base_and_path() {
        let fetcher = HttpFetcher::new("http://localhost:5173/", None).unwrap();
        assert_eq!(
            fetcher.url_for("/assets/weather-icons/gif/rain.gif"),
            "http://localhost:5173/assets/weather-icons/gif/rain.gif"
        );
    }
}
