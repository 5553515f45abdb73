use super::bits::BitArray;
use super::error::{DecodeError, DecodeResult};

// Pattern match variance
//------------------------------------------------------------------------------

/// Scores how well observed run lengths fit a reference bar/space pattern.
/// Returns the average absolute variance per pixel, or `f32::MAX` when the
/// runs cannot fit the pattern at all or any single run deviates by more
/// than `max_individual_variance` of its expected width. Row readers pick
/// the candidate digit with the lowest score and reject ties.
pub fn pattern_match_variance(
    counters: &[u32],
    pattern: &[u32],
    max_individual_variance: f32,
) -> f32 {
    debug_assert_eq!(counters.len(), pattern.len(), "Counter and pattern lengths differ");

    let total: u32 = counters.iter().sum();
    let pattern_length: u32 = pattern.iter().sum();
    if total < pattern_length {
        // Not even one pixel per module; no fit is possible
        return f32::MAX;
    }

    let unit_bar_width = total as f32 / pattern_length as f32;
    let mut total_variance = 0.0f32;
    for (&counter, &scale) in counters.iter().zip(pattern) {
        let expected = scale as f32 * unit_bar_width;
        let variance = (counter as f32 - expected).abs();
        if variance > max_individual_variance * expected {
            return f32::MAX;
        }
        total_variance += variance;
    }
    total_variance / total as f32
}

// Run-length recorder
//------------------------------------------------------------------------------

/// Fills `counters` with the lengths of alternating runs starting at
/// `start`, which should sit on a color transition. Fails when the row ends
/// before all but the last counter are filled.
pub fn record_pattern(row: &BitArray, start: usize, counters: &mut [u32]) -> DecodeResult<()> {
    let num_counters = counters.len();
    let end = row.len();
    if start >= end {
        return Err(DecodeError::SymbolNotFound);
    }
    counters.fill(0);

    let mut counter_position = 0;
    let mut color = row.get(start);
    let mut i = start;
    while i < end {
        if row.get(i) == color {
            counters[counter_position] += 1;
        } else {
            counter_position += 1;
            if counter_position == num_counters {
                break;
            }
            counters[counter_position] = 1;
            color = !color;
        }
        i += 1;
    }

    if counter_position == num_counters || (counter_position == num_counters - 1 && i == end) {
        Ok(())
    } else {
        Err(DecodeError::SymbolNotFound)
    }
}
