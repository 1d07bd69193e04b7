//! Seeded weighted draws.
use crate::asset::{CompositionAsset, CompositionElement};
use crate::seed::sample01;

/// Draw one element from a superposition asset, or `None` for the empty
/// outcome.
///
/// Each element wins with probability proportional to its weight; the
/// asset's `nothing_weight` competes as an extra outcome that selects
/// nothing. Negative nothing weights are treated as zero. The asset must
/// have at least one element.
pub fn select_random_element(asset: &CompositionAsset, seed: i32) -> Option<&CompositionElement> {
    debug_assert!(!asset.elements.is_empty());

    let nothing = asset.nothing_weight.max(0.0);
    let total: f32 = nothing + asset.elements.iter().map(|element| element.weight).sum::<f32>();
    select_with_cutoff(asset, nothing, sample01(seed) * total)
}

fn select_with_cutoff(
    asset: &CompositionAsset,
    nothing: f32,
    cutoff: f32,
) -> Option<&CompositionElement> {
    if cutoff < nothing {
        return None;
    }
    let mut accumulated = nothing;
    for element in &asset.elements {
        accumulated += element.weight;
        if accumulated >= cutoff {
            return Some(element);
        }
    }
    // Float rounding can leave the cutoff a hair past the accumulated total.
    asset.elements.last()
}

/// Seeded Bernoulli trial: `true` with the given probability.
///
/// Probabilities at or below zero never pass; at or above one they always
/// pass.
pub fn bernoulli(probability: f32, seed: i32) -> bool {
    sample01(seed) < probability
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::EvaluationMode;
    use crate::seed::next_seed;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn weighted_asset(weights: &[f32], nothing_weight: f32) -> CompositionAsset {
        let mut asset =
            CompositionAsset::new("choices", EvaluationMode::Superposition).with_nothing_weight(nothing_weight);
        for (index, weight) in weights.iter().enumerate() {
            asset.add_element(
                CompositionElement::new(format!("option_{index}"), format!("asset_{index}"))
                    .with_weight(*weight),
            );
        }
        asset
    }

    #[test]
    fn cutoff_walk_picks_by_cumulative_weight() {
        let asset = weighted_asset(&[1.0, 1.0, 2.0], 0.0);

        let pick = select_with_cutoff(&asset, 0.0, 0.0).expect("zero cutoff picks first");
        assert_eq!(pick.name, "option_0");

        let pick = select_with_cutoff(&asset, 0.0, 1.0).expect("tie goes to the earlier element");
        assert_eq!(pick.name, "option_0");

        let pick = select_with_cutoff(&asset, 0.0, 1.5).expect("mid-range cutoff");
        assert_eq!(pick.name, "option_1");

        let pick = select_with_cutoff(&asset, 0.0, 4.0).expect("top of range");
        assert_eq!(pick.name, "option_2");
    }

    #[test]
    fn cutoff_below_nothing_selects_nothing() {
        let asset = weighted_asset(&[1.0, 1.0], 2.0);
        assert!(select_with_cutoff(&asset, 2.0, 1.9).is_none());
        let pick = select_with_cutoff(&asset, 2.0, 2.0).expect("nothing band is half-open");
        assert_eq!(pick.name, "option_0");
    }

    #[test]
    fn cutoff_past_total_falls_back_to_last() {
        let asset = weighted_asset(&[1.0, 1.0], 0.0);
        let pick = select_with_cutoff(&asset, 0.0, 2.000001).expect("fallback");
        assert_eq!(pick.name, "option_1");
    }

    #[test]
    fn zero_weight_elements_lose_ties() {
        // A zero-weight element adds nothing to the accumulation, so a
        // cutoff landing on its boundary already belongs to its neighbor.
        let asset = weighted_asset(&[1.0, 0.0, 1.0], 0.0);
        let pick = select_with_cutoff(&asset, 0.0, 1.0).expect("boundary");
        assert_eq!(pick.name, "option_0");
        let pick = select_with_cutoff(&asset, 0.0, 1.5).expect("past the zero element");
        assert_eq!(pick.name, "option_2");
    }

    #[test]
    fn all_zero_weights_pick_the_first_element() {
        let asset = weighted_asset(&[0.0, 0.0], 0.0);
        let mut seed = 11;
        for _ in 0..100 {
            seed = next_seed(seed);
            let pick = select_random_element(&asset, seed).expect("zero total selects first");
            assert_eq!(pick.name, "option_0");
        }
    }

    #[test]
    fn negative_nothing_weight_is_clamped() {
        let asset = weighted_asset(&[1.0], -5.0);
        let mut seed = 3;
        for _ in 0..100 {
            seed = next_seed(seed);
            assert!(select_random_element(&asset, seed).is_some());
        }
    }

    #[test]
    fn selection_is_deterministic() {
        let asset = weighted_asset(&[1.0, 2.0, 3.0], 1.0);
        for seed in [-999, 0, 42, 31337] {
            let a = select_random_element(&asset, seed).map(|element| element.name.clone());
            let b = select_random_element(&asset, seed).map(|element| element.name.clone());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn selection_frequencies_follow_weights() {
        let asset = weighted_asset(&[1.0, 1.0, 2.0], 0.0);
        let mut counts = [0usize; 3];
        let mut rng = StdRng::seed_from_u64(0xC0FFEE);
        let n = 100_000;
        for _ in 0..n {
            let pick = select_random_element(&asset, rng.random()).expect("no nothing weight");
            let index: usize = pick.name.strip_prefix("option_").expect("option name").parse().expect("index");
            counts[index] += 1;
        }
        let freq = |count: usize| count as f64 / n as f64;
        assert!((freq(counts[0]) - 0.25).abs() < 0.01, "counts = {counts:?}");
        assert!((freq(counts[1]) - 0.25).abs() < 0.01, "counts = {counts:?}");
        assert!((freq(counts[2]) - 0.50).abs() < 0.01, "counts = {counts:?}");
    }

    #[test]
    fn nothing_weight_takes_its_share() {
        let asset = weighted_asset(&[1.0, 1.0], 1.0);
        let mut nothing_count = 0usize;
        let mut rng = StdRng::seed_from_u64(0xFACADE);
        let n = 100_000;
        for _ in 0..n {
            if select_random_element(&asset, rng.random()).is_none() {
                nothing_count += 1;
            }
        }
        let freq = nothing_count as f64 / n as f64;
        assert!((freq - 1.0 / 3.0).abs() < 0.01, "nothing freq = {freq}");
    }

    #[test]
    fn bernoulli_extremes_are_exact() {
        let mut seed = 17;
        for _ in 0..1000 {
            seed = next_seed(seed);
            assert!(!bernoulli(0.0, seed));
            assert!(bernoulli(1.0, seed));
        }
    }

    #[test]
    fn bernoulli_rate_tracks_probability() {
        let mut rng = StdRng::seed_from_u64(0xBEEFCAFE);
        let mut hits = 0usize;
        let n = 100_000;
        for _ in 0..n {
            if bernoulli(0.3, rng.random()) {
                hits += 1;
            }
        }
        let rate = hits as f64 / n as f64;
        assert!((rate - 0.3).abs() < 0.01, "rate = {rate}");
    }
}
