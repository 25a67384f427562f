use super::config::StarBoundary;

const LOWEST_STAR: u8 = 1;
const HIGHEST_STAR: u8 = 5;

/// Maps a composite score onto the first boundary interval containing it.
///
/// Values below the table (including NaN) clamp to one star, values at or
/// past the top boundary clamp to five.
pub(crate) fn classify(weighted_avg: f64, boundaries: &[StarBoundary]) -> u8 {
    if let Some(boundary) = boundaries
        .iter()
        .find(|boundary| boundary.contains(weighted_avg))
    {
        return boundary.star;
    }

    let ceiling = boundaries.last().map(|boundary| boundary.max);
    match ceiling {
        Some(max) if weighted_avg >= max => HIGHEST_STAR,
        _ => LOWEST_STAR,
    }
}
