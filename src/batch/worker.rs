//! Image worker loop.
//!
//! Each worker pulls items from the shared queue, runs recognition and record
//! extraction, and sends the outcome to the collecting thread. Workers never
//! touch the aggregate totals.

use anyhow::{anyhow, Result};
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};
use std::sync::Mutex;

use super::queue::ImageWorkItem;
use crate::extract::{PerImageResultSet, RecordParser};
use crate::ocr::TextRecognizer;

/// Result of processing one image.
#[derive(Debug)]
pub struct ImageOutcome {
    pub index: usize,
    pub path: PathBuf,
    pub result: Result<PerImageResultSet>,
}

/// Transcribes and parses a single image.
pub fn process_image(
    item: &ImageWorkItem,
    recognizer: &dyn TextRecognizer,
    parser: &RecordParser<'_>,
) -> Result<PerImageResultSet> {
    let transcript = recognizer.transcribe(&item.path)?;
    Ok(parser.parse_transcript(&transcript))
}

/// Extracts the message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Runs the worker loop until the queue is empty and closed.
///
/// Stops early if the result channel has been dropped.
pub fn run_image_worker(
    queue: &Mutex<Receiver<ImageWorkItem>>,
    results: Sender<ImageOutcome>,
    recognizer: &dyn TextRecognizer,
    parser: &RecordParser<'_>,
) {
    loop {
        // Hold the lock only while taking the next item
        let next = match queue.lock() {
            Ok(receiver) => receiver.recv(),
            Err(_) => break,
        };

        let item = match next {
            Ok(item) => item,
            Err(_) => break, // Channel drained and closed
        };

        // A panic while decoding or parsing only fails this image
        let result = catch_unwind(AssertUnwindSafe(|| process_image(&item, recognizer, parser)))
            .unwrap_or_else(|payload| {
                Err(anyhow!("Image processing panicked: {}", panic_message(&*payload)))
            });
        let outcome = ImageOutcome {
            index: item.index,
            path: item.path,
            result,
        };

        if results.send(outcome).is_err() {
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::batch::queue::create_work_queue;
    use crate::extract::{IdentityResolver, MatchPolicy, ScoreExtractor, WeightedRatioMatcher};
    use crate::roster::Roster;
    use std::path::Path;
    use std::sync::mpsc::channel;

    struct EchoRecognizer;

    impl TextRecognizer for EchoRecognizer {
        fn transcribe(&self, image_path: &Path) -> Result<String> {
            match image_path.file_stem().and_then(|s| s.to_str()) {
                Some("broken") => Err(anyhow!("corrupt image")),
                Some("crash") => panic!("decoder crashed"),
                Some(stem) => Ok(stem.replace('_', " ")),
                None => Ok(String::new()),
            }
        }
    }

    #[test]
    fn test_worker_processes_queue_then_exits() {
        let roster = Roster::from_names(["Gold Ship"]).unwrap();
        let policy = MatchPolicy::strict();
        let scores = ScoreExtractor::new().unwrap();
        let parser = RecordParser::new(
            &scores,
            IdentityResolver::new(&roster, &WeightedRatioMatcher, &policy),
        );

        let (sender, receiver) = create_work_queue();
        for (index, name) in ["Gold_Ship_500.jpg", "broken.jpg", "crash.jpg", "Gold_Ship_700.jpg"]
            .iter()
            .enumerate()
        {
            sender
                .send(ImageWorkItem {
                    index,
                    path: PathBuf::from(name),
                })
                .unwrap();
        }
        drop(sender);

        let (result_tx, result_rx) = channel();
        run_image_worker(&Mutex::new(receiver), result_tx, &EchoRecognizer, &parser);

        let outcomes: Vec<ImageOutcome> = result_rx.iter().collect();
        assert_eq!(outcomes.len(), 4);
        assert_eq!(outcomes[0].index, 0);
        assert_eq!(
            outcomes[0].result.as_ref().unwrap().get("Gold Ship"),
            Some(500)
        );
        assert!(outcomes[1].result.is_err());

        let crashed = outcomes[2].result.as_ref().unwrap_err().to_string();
        assert!(crashed.contains("decoder crashed"), "error was {}", crashed);
        // The worker keeps going after a panic
        assert_eq!(
            outcomes[3].result.as_ref().unwrap().get("Gold Ship"),
            Some(700)
        );
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new("static message");
        assert_eq!(panic_message(&*payload), "static message");
        let payload: Box<dyn Any + Send> = Box::new(String::from("owned message"));
        assert_eq!(panic_message(&*payload), "owned message");
        let payload: Box<dyn Any + Send> = Box::new(42u8);
        assert_eq!(panic_message(&*payload), "Unknown panic");
    }
}
