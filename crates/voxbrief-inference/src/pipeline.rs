//! Transcribe, then summarize when the transcript is long enough.

use tracing::info;
use voxbrief_core::config::SummaryPolicy;
use voxbrief_core::RelaySummary;

use crate::backend::{BackendError, Summarizer, Transcriber};

pub const NO_SPEECH: &str = "❌ Could not recognize speech in the message";
pub const TRANSCRIPT_HEADING: &str = "**Transcript:**";
pub const SUMMARY_HEADING: &str = "**Summary:**";

/// Run one upload through both models.
pub async fn process_media(
    transcriber: &dyn Transcriber,
    summarizer: &dyn Summarizer,
    policy: &SummaryPolicy,
    audio: Vec<u8>,
    file_name: &str,
    media_type: &str,
) -> Result<RelaySummary, BackendError> {
    info!(media_type, bytes = audio.len(), "processing started");

    let transcript = transcriber.transcribe(audio, file_name).await?;
    let transcript = transcript.trim();
    info!(words = word_count(transcript), "transcription complete");

    if transcript.is_empty() {
        return Ok(RelaySummary {
            summary_text: NO_SPEECH.to_string(),
            transcribed_text: Some(String::new()),
            summary_short: None,
        });
    }

    let short = if word_count(transcript) < policy.min_words {
        transcript.to_string()
    } else {
        summarizer
            .summarize(transcript, policy.max_length, policy.min_length)
            .await?
    };

    info!(media_type, "processing finished");
    Ok(RelaySummary {
        summary_text: compose(transcript, &short),
        transcribed_text: Some(transcript.to_string()),
        summary_short: Some(short),
    })
}

pub fn compose(transcript: &str, summary: &str) -> String {
    format!("{TRANSCRIPT_HEADING} {transcript}\n\n{SUMMARY_HEADING} {summary}")
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    struct FixedTranscriber(String);

    #[async_trait]
    impl Transcriber for FixedTranscriber {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn transcribe(
            &self,
            _audio: Vec<u8>,
            _file_name: &str,
        ) -> Result<String, BackendError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct CountingSummarizer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl Summarizer for CountingSummarizer {
        fn name(&self) -> &str {
            "counting"
        }

        async fn summarize(
            &self,
            _text: &str,
            max_words: u32,
            min_words: u32,
        ) -> Result<String, BackendError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("summary {min_words}-{max_words}"))
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        fn name(&self) -> &str {
            "failing"
        }

        async fn summarize(&self, _: &str, _: u32, _: u32) -> Result<String, BackendError> {
            Err(BackendError::Api {
                status: 500,
                message: "down".into(),
            })
        }
    }

    async fn run(transcript: &str, summarizer: &dyn Summarizer) -> RelaySummary {
        process_media(
            &FixedTranscriber(transcript.to_string()),
            summarizer,
            &SummaryPolicy::default(),
            vec![0],
            "a.ogg",
            "voice",
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn short_transcript_is_its_own_summary() {
        let summarizer = CountingSummarizer::default();
        let out = run("  hi  ", &summarizer).await;
        assert_eq!(out.summary_text, "**Transcript:** hi\n\n**Summary:** hi");
        assert_eq!(out.transcribed_text.as_deref(), Some("hi"));
        assert_eq!(out.summary_short.as_deref(), Some("hi"));
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn twenty_words_trigger_summarizer() {
        let summarizer = CountingSummarizer::default();
        let twenty = "one two three four five six seven eight nine ten \
                      eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen twenty";
        let out = run(twenty, &summarizer).await;
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(out.summary_short.as_deref(), Some("summary 30-150"));
        assert!(out.summary_text.ends_with("**Summary:** summary 30-150"));
    }

    #[tokio::test]
    async fn nineteen_words_skip_summarizer() {
        let summarizer = CountingSummarizer::default();
        let nineteen = "one two three four five six seven eight nine ten \
                        eleven twelve thirteen fourteen fifteen sixteen seventeen eighteen nineteen";
        run(nineteen, &summarizer).await;
        assert_eq!(summarizer.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn silence_reports_no_speech() {
        let out = run("   ", &CountingSummarizer::default()).await;
        assert_eq!(out.summary_text, NO_SPEECH);
        assert_eq!(out.transcribed_text.as_deref(), Some(""));
        assert!(out.summary_short.is_none());
    }

    #[tokio::test]
    async fn summarizer_failure_propagates() {
        let result = process_media(
            &FixedTranscriber("w ".repeat(40)),
            &FailingSummarizer,
            &SummaryPolicy::default(),
            vec![0],
            "a.ogg",
            "audio",
        )
        .await;
        assert!(matches!(result, Err(BackendError::Api { status: 500, .. })));
    }
}
