//! Batch processing of a folder of screenshots.
//!
//! Images are transcribed and parsed in parallel by worker threads; the
//! calling thread is the only writer to the aggregate totals.

pub mod queue;
pub mod worker;

pub use queue::{collect_images, create_work_queue, ImageWorkItem};

use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::sync::Mutex;
use std::thread;

use crate::analysis::Aggregator;
use crate::extract::RecordParser;
use crate::log;
use crate::ocr::TextRecognizer;
use worker::run_image_worker;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub images_found: usize,
    pub images_processed: usize,
    pub images_skipped: usize,
    pub records: usize,
}

/// Processes every image and returns the merged totals.
///
/// A failing image is logged and skipped; it never aborts the batch.
pub fn run_batch(
    images: &[PathBuf],
    workers: usize,
    recognizer: &dyn TextRecognizer,
    parser: &RecordParser<'_>,
) -> (Aggregator, BatchSummary) {
    let mut aggregator = Aggregator::new();
    let mut summary = BatchSummary {
        images_found: images.len(),
        ..BatchSummary::default()
    };

    if images.is_empty() {
        return (aggregator, summary);
    }

    let (sender, receiver) = create_work_queue();
    for (index, path) in images.iter().enumerate() {
        // Receiver is alive until the end of this function
        let _ = sender.send(ImageWorkItem {
            index,
            path: path.clone(),
        });
    }
    drop(sender);

    let queue = Mutex::new(receiver);
    let (result_tx, result_rx) = channel();
    let workers = workers.max(1);

    thread::scope(|scope| {
        for _ in 0..workers {
            let results = result_tx.clone();
            let queue = &queue;
            scope.spawn(move || run_image_worker(queue, results, recognizer, parser));
        }
        drop(result_tx);

        for outcome in result_rx {
            match outcome.result {
                Ok(results) => {
                    log(&format!(
                        "Image {}/{} ({}): {} records",
                        outcome.index + 1,
                        images.len(),
                        outcome.path.display(),
                        results.len()
                    ));
                    summary.images_processed += 1;
                    summary.records += results.len();
                    aggregator.add_image(&results);
                }
                Err(e) => {
                    log(&format!(
                        "Skipping image {} ({}): {:#}",
                        outcome.index + 1,
                        outcome.path.display(),
                        e
                    ));
                    summary.images_skipped += 1;
                }
            }
        }
    });

    (aggregator, summary)
}
