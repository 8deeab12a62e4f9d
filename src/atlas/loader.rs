use std::sync::mpsc;

use image::RgbaImage;
use rustc_hash::FxHashMap;

use super::compose;
use super::layout::AtlasLayout;
use crate::items::MenuItem;

/// Work order for the atlas thread.
pub enum AtlasRequest {
    /// Rebuild both atlases for the given items.
    Build {
        /// Items in carousel order.
        items: Vec<MenuItem>,
        /// Grid placement to compose into.
        layout: AtlasLayout,
    },
    /// Stop the thread.
    Shutdown,
}

/// Finished CPU-side atlases ready for GPU upload.
#[derive(Clone)]
pub struct PreparedAtlas {
    /// Grid the cells were placed on.
    pub layout: AtlasLayout,
    /// Thumbnail atlas pixels.
    pub thumbnails: RgbaImage,
    /// Label atlas pixels.
    pub labels: RgbaImage,
}

/// Background thread that fetches thumbnails and composes atlases.
///
/// Image decode and the per-cell cover cropping are far too slow for
/// the render loop; the main thread only uploads finished pixels.
/// Fetched sources are cached across rebuilds, so editing one item in
/// a live-reload flow refetches nothing else.
pub struct AtlasLoader {
    request_tx: mpsc::Sender<AtlasRequest>,
    result: triple_buffer::Output<Option<PreparedAtlas>>,
    thread: Option<std::thread::JoinHandle<()>>,
}

impl AtlasLoader {
    /// Spawn the background atlas thread.
    ///
    /// # Errors
    ///
    /// Returns [`std::io::Error`] if the background thread fails to
    /// spawn.
    pub fn new() -> Result<Self, std::io::Error> {
        let (request_tx, request_rx) = mpsc::channel::<AtlasRequest>();
        let (result_input, result_output) = triple_buffer::triple_buffer(&None);

        let thread = std::thread::Builder::new()
            .name("atlas-loader".into())
            .spawn(move || {
                Self::thread_loop(request_rx, result_input);
            })?;

        Ok(Self {
            request_tx,
            result: result_output,
            thread: Some(thread),
        })
    }

    /// Submit a build request (non-blocking send).
    pub fn submit(&self, request: AtlasRequest) {
        let _ = self.request_tx.send(request);
    }

    /// Non-blocking check for a completed atlas build.
    pub fn try_recv(&mut self) -> Option<PreparedAtlas> {
        let _ = self.result.update();
        self.result.output_buffer_mut().take()
    }

    /// Shut down the background thread and wait for it to finish.
    pub fn shutdown(&mut self) {
        let _ = self.request_tx.send(AtlasRequest::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }

    fn thread_loop(
        request_rx: mpsc::Receiver<AtlasRequest>,
        mut result_input: triple_buffer::Input<Option<PreparedAtlas>>,
    ) {
        let mut cache: FxHashMap<String, Option<RgbaImage>> =
            FxHashMap::default();

        while let Ok(request) = request_rx.recv() {
            match drain_latest(request, &request_rx) {
                AtlasRequest::Shutdown => break,
                AtlasRequest::Build { items, layout } => {
                    for item in &items {
                        if !cache.contains_key(&item.image) {
                            let fetched = fetch_source(&item.image);
                            let _ = cache.insert(item.image.clone(), fetched);
                        }
                    }
                    let sources: Vec<Option<&RgbaImage>> = items
                        .iter()
                        .map(|item| {
                            cache.get(&item.image).and_then(Option::as_ref)
                        })
                        .collect();

                    let thumbnails =
                        compose::compose_thumbnails(&layout, &sources);
                    let labels = compose::compose_labels(&layout, items.len());
                    result_input.write(Some(PreparedAtlas {
                        layout,
                        thumbnails,
                        labels,
                    }));
                }
            }
        }
    }
}

impl Drop for AtlasLoader {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Drain queued requests, keeping only the latest build. A queued
/// `Shutdown` always wins.
fn drain_latest(
    initial: AtlasRequest,
    rx: &mpsc::Receiver<AtlasRequest>,
) -> AtlasRequest {
    let mut latest = initial;
    while let Ok(newer) = rx.try_recv() {
        match (&latest, &newer) {
            (AtlasRequest::Shutdown, _) => {}
            _ => latest = newer,
        }
    }
    latest
}

/// Fetch and decode one image source. Empty sources and every failure
/// mode fall back to the placeholder by returning `None`.
fn fetch_source(source: &str) -> Option<RgbaImage> {
    if source.is_empty() {
        return None;
    }
    if source.starts_with("http://") || source.starts_with("https://") {
        return fetch_remote(source);
    }
    match std::fs::read(source) {
        Ok(bytes) => decode(source, &bytes),
        Err(e) => {
            log::warn!("failed to read {source}: {e}");
            None
        }
    }
}

#[cfg(feature = "http")]
fn fetch_remote(source: &str) -> Option<RgbaImage> {
    log::info!("fetching {source}");
    let result = ureq::get(source)
        .call()
        .and_then(|resp| resp.into_body().read_to_vec());
    match result {
        Ok(bytes) => decode(source, &bytes),
        Err(e) => {
            log::warn!("failed to fetch {source}: {e}");
            None
        }
    }
}

#[cfg(not(feature = "http"))]
fn fetch_remote(source: &str) -> Option<RgbaImage> {
    log::warn!("http support disabled, skipping {source}");
    None
}

fn decode(source: &str, bytes: &[u8]) -> Option<RgbaImage> {
    match image::load_from_memory(bytes) {
        Ok(img) => Some(img.to_rgba8()),
        Err(e) => {
            log::warn!("failed to decode {source}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::AtlasOptions;

    #[test]
    fn build_delivers_composed_atlases() {
        let mut loader = AtlasLoader::new().unwrap();
        let items = vec![MenuItem::placeholder(), MenuItem::placeholder()];
        let layout = AtlasLayout::for_items(
            items.len(),
            &AtlasOptions {
                cell_size: 64,
                ..AtlasOptions::default()
            },
            2048,
        );
        loader.submit(AtlasRequest::Build { items, layout });

        let mut prepared = None;
        for _ in 0..500 {
            prepared = loader.try_recv();
            if prepared.is_some() {
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(10));
        }
        let prepared = prepared.expect("atlas build timed out");
        assert_eq!(prepared.layout.grid_edge, 2);
        assert_eq!(prepared.thumbnails.dimensions(), (128, 128));
        assert_eq!(prepared.labels.dimensions(), (128, 128));
    }

    #[test]
    fn newest_build_supersedes_queued_ones() {
        let (tx, rx) = mpsc::channel();
        let layout = AtlasLayout {
            grid_edge: 1,
            cell_size: 64,
        };
        tx.send(AtlasRequest::Build {
            items: vec![MenuItem::placeholder()],
            layout,
        })
        .unwrap();
        tx.send(AtlasRequest::Build {
            items: vec![MenuItem::placeholder(), MenuItem::placeholder()],
            layout,
        })
        .unwrap();

        let first = rx.recv().unwrap();
        match drain_latest(first, &rx) {
            AtlasRequest::Build { items, .. } => assert_eq!(items.len(), 2),
            AtlasRequest::Shutdown => panic!("expected a build request"),
        }
    }

    #[test]
    fn queued_shutdown_wins() {
        let (tx, rx) = mpsc::channel();
        tx.send(AtlasRequest::Shutdown).unwrap();
        tx.send(AtlasRequest::Build {
            items: Vec::new(),
            layout: AtlasLayout {
                grid_edge: 1,
                cell_size: 64,
            },
        })
        .unwrap();

        let first = rx.recv().unwrap();
        assert!(matches!(
            drain_latest(first, &rx),
            AtlasRequest::Shutdown
        ));
    }

    #[test]
    fn unreadable_file_falls_back_to_none() {
        assert!(fetch_source("/nonexistent/path/image.png").is_none());
        assert!(fetch_source("").is_none());
    }
}
