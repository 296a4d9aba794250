use crate::time_series::ProgressSeries;
use crate::typing::TypedEntry;

/// Average word length used by the words-per-minute formula
pub const CHARS_PER_WORD: f64 = 5.0;

/// Outcome of one finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub accuracy: Option<u32>,
    pub wpm: Option<u32>,
    pub correct_count: usize,
    pub total_count: usize,
    pub has_data: bool,
}

/// Everything needed to score a round at finalize time
#[derive(Debug, Clone, Copy)]
pub struct RoundInput<'a> {
    pub entries: &'a [TypedEntry],
    pub passage_len: usize,
    pub round_secs: u32,
    pub time_left: u32,
    pub round_index: usize,
}

pub fn compute_accuracy(correct_count: usize, total_count: usize) -> u32 {
    if total_count == 0 {
        return 0;
    }
    let pct = (correct_count as f64 / total_count as f64) * 100.0;
    pct.round().clamp(0.0, 100.0) as u32
}

pub fn compute_wpm(typed_count: usize, elapsed_secs: u32) -> u32 {
    let safe_secs = elapsed_secs.max(1) as f64;
    let wpm = (typed_count as f64 / CHARS_PER_WORD) / (safe_secs / 60.0);
    wpm.round().max(0.0) as u32
}

/// Score a round and extend the progress series with its values.
///
/// Missing scores enter the series as 0.
pub fn build_round_result(
    input: RoundInput<'_>,
    progress: &ProgressSeries,
) -> (RoundResult, ProgressSeries) {
    let correct_count = input.entries.iter().filter(|e| e.correct).count();
    let total_count = input.passage_len;
    let has_data = !input.entries.is_empty();

    let elapsed_secs = input.round_secs.saturating_sub(input.time_left).max(1);
    let accuracy = has_data.then(|| compute_accuracy(correct_count, total_count));
    let wpm = has_data.then(|| compute_wpm(input.entries.len(), elapsed_secs));

    let updated = progress.appended(
        input.round_index as u32 + 1,
        wpm.unwrap_or(0),
        accuracy.unwrap_or(0),
    );

    (
        RoundResult {
            accuracy,
            wpm,
            correct_count,
            total_count,
            has_data,
        },
        updated,
    )
}

/// Mean accuracy over the stored rounds; a round without data counts as 0
pub fn average_accuracy(results: &[RoundResult]) -> u32 {
    if results.is_empty() {
        return 0;
    }
    let total: u32 = results.iter().map(|r| r.accuracy.unwrap_or(0)).sum();
    (total as f64 / results.len() as f64).round() as u32
}

/// `m:ss` timer label
pub fn format_time(seconds: i64) -> String {
    let clamped = seconds.max(0);
    format!("{}:{:02}", clamped / 60, clamped % 60)
}
