use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::cli::config::CrawlerSettings;
use crate::crawler::result::CrawlResult;
use crate::fetch::LinkFetcher;

/// Concurrent breadth-first crawl engine for a single host.
///
/// One gatekeeper task owns the visited set and serializes every admission
/// decision; one worker task per admitted URL performs the fetch. The two
/// sides communicate only over channels, so the set needs no lock.
pub struct Crawler {
    fetcher: Arc<dyn LinkFetcher>,
    settings: CrawlerSettings,
}

impl Crawler {
    /// Create a new crawler around the given fetch capability.
    pub fn new(fetcher: Arc<dyn LinkFetcher>, settings: CrawlerSettings) -> Self {
        Self { fetcher, settings }
    }

    /// Start crawling from `seed_url` and return the stream of results.
    ///
    /// `seed_url` must already be a syntactically valid absolute URL;
    /// callers validate it before handing it over. The crawl runs until
    /// `stop` is cancelled. The returned receiver yields one [`CrawlResult`]
    /// per admitted URL, in fetch-completion order, and then `None` once the
    /// stream has closed. Closure is guaranteed to follow cancellation:
    /// the gatekeeper exits immediately and in-flight workers wind down.
    pub fn start(
        &self,
        seed_url: String,
        stop: CancellationToken,
    ) -> mpsc::UnboundedReceiver<CrawlResult> {
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();

        info!("starting crawl from {}", seed_url);

        let gatekeeper = Gatekeeper {
            fetcher: Arc::clone(&self.fetcher),
            permits: Arc::new(Semaphore::new(self.settings.max_concurrent_fetches)),
            submit_tx: submit_tx.clone(),
            out_tx,
            stop,
        };
        tokio::spawn(gatekeeper.run(submit_rx));

        // Seed the pipeline before returning. The gatekeeper holds the
        // receiver, so this cannot fail while it is running.
        let _ = submit_tx.send(seed_url);

        out_rx
    }
}

/// Start a crawl with default settings.
///
/// Convenience entry point for callers that do not need a configured
/// [`Crawler`].
pub fn start_crawl(
    seed_url: String,
    fetcher: Arc<dyn LinkFetcher>,
    stop: CancellationToken,
) -> mpsc::UnboundedReceiver<CrawlResult> {
    Crawler::new(fetcher, CrawlerSettings::default()).start(seed_url, stop)
}

/// Sole authority over the visited set.
///
/// All discovered URLs funnel through its single sequential loop, which
/// makes the check-then-mark admission step atomic across every concurrent
/// producer without a lock.
struct Gatekeeper {
    fetcher: Arc<dyn LinkFetcher>,
    permits: Arc<Semaphore>,
    submit_tx: mpsc::UnboundedSender<String>,
    out_tx: mpsc::UnboundedSender<CrawlResult>,
    stop: CancellationToken,
}

impl Gatekeeper {
    async fn run(self, mut submissions: mpsc::UnboundedReceiver<String>) {
        let mut visited: HashSet<String> = HashSet::new();

        loop {
            let url = tokio::select! {
                _ = self.stop.cancelled() => {
                    info!("stop signal received after {} admissions", visited.len());
                    break;
                }
                url = submissions.recv() => match url {
                    Some(url) => url,
                    // Unreachable while we hold a submission sender ourselves.
                    None => break,
                },
            };

            if !visited.insert(url.clone()) {
                debug!("skipping already visited URL: {}", url);
                continue;
            }

            debug!("admitted URL: {}", url);
            self.spawn_worker(url);
        }

        // Dropping self releases the gatekeeper's output sender; the stream
        // closes once the last in-flight worker finishes.
    }

    /// Spawn the worker task that processes one admitted URL.
    fn spawn_worker(&self, url: String) {
        let fetcher = Arc::clone(&self.fetcher);
        let permits = Arc::clone(&self.permits);
        let submit_tx = self.submit_tx.clone();
        let out_tx = self.out_tx.clone();
        let stop = self.stop.clone();

        tokio::spawn(async move {
            // Queue behind the fetch pool; cancellation wins over a permit.
            let _permit = tokio::select! {
                _ = stop.cancelled() => return,
                permit = permits.acquire_owned() => match permit {
                    Ok(permit) => permit,
                    Err(_) => return,
                },
            };

            let result = match fetcher.fetch(&url).await {
                Ok(links) => {
                    for link in &links {
                        // The gatekeeper may have exited already; a link
                        // that can no longer be admitted is dropped.
                        let _ = submit_tx.send(link.clone());
                    }
                    CrawlResult::ok(url, links)
                }
                Err(err) => {
                    debug!("fetch failed for {}: {}", url, err);
                    CrawlResult::failed(url, err)
                }
            };

            // Guarded send: once the stop signal has fired the consumer may
            // already be gone, so a late result is dropped, not delivered.
            if !stop.is_cancelled() {
                let _ = out_tx.send(result);
            }
        });
    }
}
