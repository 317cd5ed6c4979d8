use std::collections::{HashMap, HashSet};

use crossbeam_channel::unbounded;
use crossbeam_utils::thread::scope;
use tracing::{debug, info, warn};

use crate::{
    captions::Selection,
    client::Client,
    error::{Error, Result},
    outside::Fetch,
    types::{TranscriptEntry, VideoId},
};

/// Outcome of retrieving the transcripts of several videos at once.
///
/// Every requested video appears exactly once, whether it succeeded or not.
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: HashMap<VideoId, Result<Vec<TranscriptEntry>>>,
}

impl BatchReport {
    pub fn get(&self, video_id: &VideoId) -> Option<&Result<Vec<TranscriptEntry>>> {
        self.outcomes.get(video_id)
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn failures(&self) -> impl Iterator<Item = (&VideoId, &Error)> {
        self.outcomes
            .iter()
            .filter_map(|(id, outcome)| outcome.as_ref().err().map(|err| (id, err)))
    }

    /// Keep only the videos whose transcript was retrieved
    pub fn into_successes(self) -> HashMap<VideoId, Vec<TranscriptEntry>> {
        self.outcomes
            .into_iter()
            .filter_map(|(id, outcome)| outcome.ok().map(|entries| (id, entries)))
            .collect()
    }

    pub fn into_outcomes(self) -> HashMap<VideoId, Result<Vec<TranscriptEntry>>> {
        self.outcomes
    }
}

impl<F: Fetch> Client<F> {
    /// Retrieve the transcripts of every video concurrently, using the same
    /// policy as [`Client::transcript`].
    pub fn fetch_all(&self, video_ids: &[VideoId]) -> BatchReport {
        self.fetch_all_with(video_ids, &Selection::PreferEnglish)
    }

    /// Retrieve the transcripts of every video concurrently.
    ///
    /// One thread is started per distinct video. A failing video does not
    /// affect the others: its error is kept in the report. The call returns
    /// once every thread has finished.
    pub fn fetch_all_with(&self, video_ids: &[VideoId], selection: &Selection) -> BatchReport {
        let mut report = BatchReport::default();
        let mut seen = HashSet::new();
        let (send, receive) = unbounded();

        let joined = scope(|scope| {
            for video_id in video_ids {
                if !seen.insert(video_id) {
                    debug!("Video {video_id} requested twice, fetching it once");
                    continue;
                }

                let send = send.clone();
                // Thread names may not hold NUL bytes
                let spawned = scope
                    .builder()
                    .name(format!("video-{}", video_id.escape_default()))
                    .spawn(move |_| {
                        let outcome = self.transcript_with(video_id, selection);
                        // The receiver outlives every worker
                        let _ = send.send((video_id.clone(), outcome));
                    });

                if let Err(err) = spawned {
                    report
                        .outcomes
                        .insert(video_id.clone(), Err(Error::Spawn(err)));
                }
            }

            // Drop the last sender so the loop below ends after the last worker
            drop(send);
            for (video_id, outcome) in receive {
                report.outcomes.insert(video_id, outcome);
            }
        });

        if let Err(panic) = joined {
            std::panic::resume_unwind(panic);
        }

        for (video_id, err) in report.failures() {
            warn!("Could not retrieve the transcript of video {video_id}: {err}");
        }
        info!(
            "{}/{} transcripts retrieved",
            report.len() - report.failures().count(),
            report.len()
        );

        report
    }

    /// Retrieve the transcripts of every video concurrently, silently
    /// leaving out the videos that failed (they are still logged).
    pub fn fetch_many(&self, video_ids: &[VideoId]) -> HashMap<VideoId, Vec<TranscriptEntry>> {
        self.fetch_all(video_ids).into_successes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outside::fake::{document, FakeFetcher};

    fn ids(ids: &[&str]) -> Vec<VideoId> {
        ids.iter().copied().map(VideoId::new).collect()
    }

    fn fetcher() -> FakeFetcher {
        let one = document(&["one"]);
        let two = document(&["two", "deux"]);
        FakeFetcher::default()
            .with_video("valid1", &[("en", one.as_str())])
            .with_video("valid2", &[("fr", two.as_str())])
            .with_video("bad-xml", &[("en", "not a document")])
    }

    #[test]
    fn fetch_many_drops_failures() {
        let client = Client::from_fetcher(fetcher());
        let results = client.fetch_many(&ids(&["valid1", "invalid", "valid2"]));

        assert_eq!(results.len(), 2);
        assert_eq!(results[&VideoId::new("valid1")][0].text, "one");
        assert_eq!(results[&VideoId::new("valid2")].len(), 2);
        assert!(!results.contains_key(&VideoId::new("invalid")));
    }

    #[test]
    fn fetch_all_keeps_every_outcome() {
        let client = Client::from_fetcher(fetcher());
        let report = client.fetch_all(&ids(&["valid1", "invalid", "bad-xml", "valid2"]));

        assert_eq!(report.len(), 4);
        assert!(matches!(
            report.get(&VideoId::new("invalid")),
            Some(Err(Error::VideoUnavailable { .. }))
        ));
        assert!(matches!(
            report.get(&VideoId::new("bad-xml")),
            Some(Err(Error::MalformedTranscriptDocument { .. }))
        ));
        assert!(matches!(
            report.get(&VideoId::new("valid1")),
            Some(Ok(entries)) if entries.len() == 1
        ));

        let mut failed: Vec<&str> = report.failures().map(|(id, _)| id.as_str()).collect();
        failed.sort_unstable();
        assert_eq!(failed, ["bad-xml", "invalid"]);
    }

    #[test]
    fn duplicates_are_fetched_once() {
        let client = Client::from_fetcher(fetcher());
        let results = client.fetch_many(&ids(&["valid1", "valid1"]));

        assert_eq!(results.len(), 1);
        let page_requests = client
            .fetcher()
            .requests()
            .into_iter()
            .filter(|request| request == "valid1")
            .count();
        assert_eq!(page_requests, 1);
    }

    #[test]
    fn explicit_language_applies_to_every_video() {
        let client = Client::from_fetcher(fetcher());
        let report = client.fetch_all_with(
            &ids(&["valid1", "valid2"]),
            &Selection::Language("fr".to_owned()),
        );

        assert!(matches!(
            report.get(&VideoId::new("valid1")),
            Some(Err(Error::RequestedLanguageUnavailable { .. }))
        ));
        assert!(matches!(report.get(&VideoId::new("valid2")), Some(Ok(_))));
    }

    #[test]
    fn empty_batch() {
        let client = Client::from_fetcher(FakeFetcher::default());
        assert!(client.fetch_all(&[]).is_empty());
        assert!(client.fetch_many(&[]).is_empty());
    }

    #[test]
    fn control_characters_in_an_id_do_not_abort_the_batch() {
        let client = Client::from_fetcher(fetcher());
        let video_ids = [VideoId::new("valid1"), VideoId::new("\0abc")];

        let transcripts = client.fetch_many(&video_ids);
        assert_eq!(transcripts.len(), 1);
        assert!(transcripts.contains_key(&VideoId::new("valid1")));

        let report = client.fetch_all(&video_ids);
        assert!(matches!(
            report.get(&VideoId::new("\0abc")),
            Some(Err(Error::VideoUnavailable { .. }))
        ));
    }
}
