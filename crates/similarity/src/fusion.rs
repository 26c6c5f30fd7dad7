//! Rank fusion for hybrid (keyword + vector) search.
//!
//! Both functions return [`SearchHit`]s sorted by fused score. Ties keep
//! the order in which ids were first seen, and `index` records that order.

use std::collections::HashMap;

use crate::error::SimilarityError;
use crate::search::SearchHit;

/// Smoothing constant commonly used for reciprocal rank fusion.
pub const DEFAULT_RRF_K: f64 = 60.0;

/// Reciprocal rank fusion: each id scores `sum(1 / (k_const + rank))` over
/// every ranking it appears in, with 1-based ranks.
///
/// An id repeated within one ranking only counts at its best position.
///
/// ```rust
/// use similarity::{reciprocal_rank_fusion, DEFAULT_RRF_K};
///
/// let keyword = ["doc-b", "doc-a"];
/// let vector = ["doc-b", "doc-c"];
/// let fused = reciprocal_rank_fusion(&[&keyword[..], &vector[..]], DEFAULT_RRF_K).unwrap();
/// assert_eq!(fused[0].id, "doc-b");
/// ```
pub fn reciprocal_rank_fusion<L, S>(
    rankings: &[L],
    k_const: f64,
) -> Result<Vec<SearchHit>, SimilarityError>
where
    L: AsRef<[S]>,
    S: AsRef<str>,
{
    if !k_const.is_finite() || k_const < 0.0 {
        return Err(SimilarityError::InvalidConfig(format!(
            "rrf constant must be finite and >= 0 (got {k_const})"
        )));
    }

    let mut fused = Fused::default();
    for ranking in rankings {
        let mut seen: Vec<&str> = Vec::new();
        for (pos, id) in ranking.as_ref().iter().enumerate() {
            let id = id.as_ref();
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            fused.add(id, 1.0 / (k_const + (pos + 1) as f64));
        }
    }
    Ok(fused.into_hits())
}

/// Blend two score lists as `weight_a * a + (1 - weight_a) * b`.
///
/// Ids missing from one side score 0 there. Only the first score listed for
/// an id on each side is used.
pub fn weighted_fusion<S: AsRef<str>>(
    a: &[(S, f64)],
    b: &[(S, f64)],
    weight_a: f64,
) -> Result<Vec<SearchHit>, SimilarityError> {
    if !(0.0..=1.0).contains(&weight_a) {
        return Err(SimilarityError::InvalidWeight { weight: weight_a });
    }
    check_scores(a, "a")?;
    check_scores(b, "b")?;

    let mut fused = Fused::default();
    for (side, weight) in [(a, weight_a), (b, 1.0 - weight_a)] {
        let mut seen: Vec<&str> = Vec::new();
        for (id, score) in side {
            let id = id.as_ref();
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            fused.add(id, weight * score);
        }
    }
    Ok(fused.into_hits())
}

fn check_scores<S>(scores: &[(S, f64)], operand: &'static str) -> Result<(), SimilarityError> {
    match scores.iter().position(|(_, s)| !s.is_finite()) {
        Some(index) => Err(SimilarityError::NonFinite { operand, index }),
        None => Ok(()),
    }
}

/// Accumulated scores keyed by id, remembering first-seen order.
#[derive(Default)]
struct Fused {
    order: Vec<String>,
    scores: HashMap<String, f64>,
}

impl Fused {
    fn add(&mut self, id: &str, score: f64) {
        match self.scores.get_mut(id) {
            Some(total) => *total += score,
            None => {
                self.order.push(id.to_string());
                self.scores.insert(id.to_string(), score);
            }
        }
    }

    fn into_hits(self) -> Vec<SearchHit> {
        let Fused { order, scores } = self;
        let mut hits: Vec<(usize, String, f64)> = order
            .into_iter()
            .enumerate()
            .map(|(index, id)| {
                let score = scores.get(&id).copied().unwrap_or_default();
                (index, id, score)
            })
            .collect();
        hits.sort_by(|x, y| y.2.total_cmp(&x.2).then(x.0.cmp(&y.0)));
        hits.into_iter()
            .enumerate()
            .map(|(pos, (index, id, score))| SearchHit {
                id,
                rank: pos + 1,
                score,
                index,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rrf_prefers_ids_ranked_high_in_several_lists() {
        let bm25 = vec!["a", "b", "c"];
        let dense = vec!["b", "c", "d"];
        let fused = reciprocal_rank_fusion(&[bm25, dense], DEFAULT_RRF_K).unwrap();
        let ids: Vec<&str> = fused.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a", "d"]);

        let expected_b = 1.0 / 62.0 + 1.0 / 61.0;
        assert!((fused[0].score - expected_b).abs() < 1e-12);
        assert_eq!(fused[0].rank, 1);
    }

    #[test]
    fn rrf_ties_keep_first_seen_order() {
        let fused = reciprocal_rank_fusion(&[vec!["x", "y"], vec!["y", "x"]], 0.0).unwrap();
        assert_eq!(fused[0].id, "x");
        assert_eq!(fused[1].id, "y");
        assert_eq!(fused[0].score, 1.5);
    }

    #[test]
    fn rrf_ignores_duplicates_within_a_list() {
        let fused = reciprocal_rank_fusion(&[vec!["a", "a", "b"]], 0.0).unwrap();
        assert_eq!(fused[0].score, 1.0);
        assert!((fused[1].score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn rrf_rejects_bad_constant() {
        let lists: [Vec<&str>; 0] = [];
        assert!(reciprocal_rank_fusion(&lists, DEFAULT_RRF_K).unwrap().is_empty());
        assert!(matches!(
            reciprocal_rank_fusion(&[vec!["a"]], -1.0),
            Err(SimilarityError::InvalidConfig(_))
        ));
        assert!(reciprocal_rank_fusion(&[vec!["a"]], f64::NAN).is_err());
    }

    #[test]
    fn weighted_blend() {
        let keyword = [("a", 1.0), ("b", 0.5)];
        let vector = [("b", 1.0), ("c", 0.8)];
        let fused = weighted_fusion(&keyword, &vector, 0.3).unwrap();
        let ids: Vec<&str> = fused.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["b", "c", "a"]);
        assert!((fused[0].score - (0.3 * 0.5 + 0.7)).abs() < 1e-12);
        assert!((fused[1].score - 0.56).abs() < 1e-12);
        assert!((fused[2].score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn weight_extremes_select_one_side() {
        let a = [("a", 0.9), ("b", 0.1)];
        let b = [("b", 0.9), ("a", 0.1)];
        assert_eq!(weighted_fusion(&a, &b, 1.0).unwrap()[0].id, "a");
        assert_eq!(weighted_fusion(&a, &b, 0.0).unwrap()[0].id, "b");
    }

    #[test]
    fn weighted_rejects_bad_input() {
        let a = [("a", 1.0)];
        assert_eq!(
            weighted_fusion(&a, &a, 1.5),
            Err(SimilarityError::InvalidWeight { weight: 1.5 })
        );
        assert!(weighted_fusion(&a, &a, f64::NAN).is_err());
        assert_eq!(
            weighted_fusion(&a, &[("b", f64::NAN)], 0.5),
            Err(SimilarityError::NonFinite {
                operand: "b",
                index: 0
            })
        );
    }
}
