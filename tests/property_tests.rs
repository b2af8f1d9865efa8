//! Property-based tests for the pure pattern state machines.

use proptest::prelude::*;

use shiplights::app::commands::Command;
use shiplights::config::PulseShape;
use shiplights::patterns::pulse::TriangleWave;

fn arb_shape() -> impl Strategy<Value = PulseShape> {
    (
        0.05f32..3.0, // fade_in_secs
        0.05f32..3.0, // fade_out_secs
        0.0f32..0.5,  // lower_limit
        0.1f32..0.5,  // span above lower
    )
        .prop_map(|(fade_in, fade_out, lower, span)| PulseShape {
            fade_in_secs: fade_in,
            fade_out_secs: fade_out,
            lower_limit: lower,
            upper_limit: (lower + span).min(1.0),
        })
}

proptest! {
    /// The wave never escapes [lower, upper], whatever the shape.
    #[test]
    fn wave_stays_within_band(shape in arb_shape()) {
        prop_assume!(shape.validate().is_ok());
        let mut wave = TriangleWave::new(&shape);
        for _ in 0..500 {
            let v = wave.advance();
            prop_assert!(
                v >= shape.lower_limit - 1e-4 && v <= shape.upper_limit + 1e-4,
                "value {v} escaped [{}, {}]",
                shape.lower_limit,
                shape.upper_limit
            );
        }
    }

    /// Every shape eventually touches both limits exactly.
    #[test]
    fn wave_reaches_both_limits(shape in arb_shape()) {
        prop_assume!(shape.validate().is_ok());
        let mut wave = TriangleWave::new(&shape);
        let mut hit_upper = false;
        let mut hit_lower = false;
        // Longest configured cycle is 6s, i.e. 120 ticks; 500 covers it.
        for _ in 0..500 {
            let v = wave.advance();
            if (v - shape.upper_limit).abs() < 1e-6 {
                hit_upper = true;
            }
            if hit_upper && (v - shape.lower_limit).abs() < 1e-6 {
                hit_lower = true;
            }
        }
        prop_assert!(hit_upper, "never clamped at upper_limit");
        prop_assert!(hit_lower, "never returned to lower_limit");
    }

    /// Direction only reverses at a limit, never mid-band.
    #[test]
    fn wave_reverses_only_at_limits(shape in arb_shape()) {
        prop_assume!(shape.validate().is_ok());
        let mut wave = TriangleWave::new(&shape);
        let mut was_rising = wave.rising();
        for _ in 0..500 {
            let v = wave.advance();
            if wave.rising() != was_rising {
                let at_limit = (v - shape.upper_limit).abs() < 1e-6
                    || (v - shape.lower_limit).abs() < 1e-6;
                prop_assert!(at_limit, "reversed mid-band at {v}");
                was_rising = wave.rising();
            }
        }
    }

    /// Arbitrary token garbage parses to None, never panics or errors.
    #[test]
    fn random_tokens_never_panic(tokens in proptest::collection::vec("[a-z_]{0,12}", 0..5)) {
        let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
        // Either a recognised command or a clean None; both are fine.
        let _ = Command::parse_tokens(&refs);
    }
}
