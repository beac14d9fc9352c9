//! Entrance stagger and nav hover values.

/// Class that plays the entrance animation.
pub const APPEAR_CLASS: &str = "appear";

/// Stagger between consecutive `.fade-in` elements, in hundredths of a second.
const STAGGER_CENTISECONDS: usize = 8;

/// `animation-delay` for the `index`-th entrance element: `0.08 * index`
/// seconds, written without trailing zeros (`"0s"`, `"0.08s"`, `"0.4s"`).
pub fn entrance_delay(index: usize) -> String {
    let cs = index.saturating_mul(STAGGER_CENTISECONDS);
    let (whole, frac) = (cs / 100, cs % 100);
    match frac {
        0 => format!("{whole}s"),
        f if f % 10 == 0 => format!("{whole}.{}s", f / 10),
        f => format!("{whole}.{f:02}s"),
    }
}

pub fn entrance_delays(count: usize) -> Vec<String> {
    (0..count).map(entrance_delay).collect()
}

/// Inline `opacity` for a nav link: full while hovered, 0.9 at rest.
pub fn hover_opacity(hovered: bool) -> &'static str {
    if hovered {
        "1"
    } else {
        "0.9"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_step_by_eighty_ms() {
        assert_eq!(
            entrance_delays(8),
            ["0s", "0.08s", "0.16s", "0.24s", "0.32s", "0.4s", "0.48s", "0.56s"]
        );
    }

    #[test]
    fn delays_past_one_second() {
        assert_eq!(entrance_delay(13), "1.04s");
        assert_eq!(entrance_delay(25), "2s");
    }

    #[test]
    fn no_elements_no_delays() {
        assert!(entrance_delays(0).is_empty());
    }

    #[test]
    fn hover_values() {
        assert_eq!(hover_opacity(true), "1");
        assert_eq!(hover_opacity(false), "0.9");
    }
}
