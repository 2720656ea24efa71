//! Font-size distribution analysis.
//!
//! Heading detection keys off sizes that stand out from the body text.
//! Sizes are quantized to 0.1 pt for counting and membership so that
//! float jitter from transform matrices does not split a bucket.

use std::collections::BTreeMap;

use crate::model::TextElement;

/// Default body size assumed for documents with no elements.
const DEFAULT_BODY_SIZE: f32 = 12.0;

/// Quantize a font size to a 0.1 pt histogram key.
fn quantize(size: f32) -> i32 {
    (size * 10.0).round() as i32
}

/// Per-document font-size statistics.
///
/// `significant_sizes` holds up to 3 sizes, strictly descending, inferred
/// to correspond to heading levels H1..H3. An empty list means the
/// distribution offers no reliable heading sizes.
#[derive(Debug, Clone)]
pub struct FontStatistics {
    median_size: f32,
    body_size: f32,
    significant: Vec<f32>,
    significant_keys: Vec<i32>,
}

impl FontStatistics {
    /// Analyze the size distribution of a document's elements.
    pub fn from_elements<'a, I>(elements: I) -> Self
    where
        I: IntoIterator<Item = &'a TextElement>,
    {
        let sizes: Vec<f32> = elements.into_iter().map(|e| e.size).collect();
        if sizes.is_empty() {
            return Self {
                median_size: 0.0,
                body_size: DEFAULT_BODY_SIZE,
                significant: Vec::new(),
                significant_keys: Vec::new(),
            };
        }

        let total = sizes.len();

        let mut sorted = sizes.clone();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let median_size = if total % 2 == 1 {
            sorted[total / 2]
        } else {
            (sorted[total / 2 - 1] + sorted[total / 2]) / 2.0
        };

        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for size in &sizes {
            *counts.entry(quantize(*size)).or_insert(0) += 1;
        }

        // Mode; ascending iteration makes ties resolve to the smallest size.
        let mut body_key = quantize(DEFAULT_BODY_SIZE);
        let mut body_count = 0usize;
        for (&key, &count) in &counts {
            if count > body_count {
                body_key = key;
                body_count = count;
            }
        }
        let body_size = body_key as f32 / 10.0;

        // A size is significant iff it is clearly above the median and is
        // neither a one-off nor frequent enough to be body text.
        let upper = 0.1 * total as f32;
        let mut significant_keys: Vec<i32> = counts
            .iter()
            .filter(|(&key, &count)| {
                let size = key as f32 / 10.0;
                size > median_size + 2.0 && count > 1 && (count as f32) < upper
            })
            .map(|(&key, _)| key)
            .collect();
        significant_keys.sort_unstable_by(|a, b| b.cmp(a));
        significant_keys.truncate(3);

        let significant = significant_keys.iter().map(|&k| k as f32 / 10.0).collect();

        Self {
            median_size,
            body_size,
            significant,
            significant_keys,
        }
    }

    /// Median of all observed sizes.
    pub fn median_size(&self) -> f32 {
        self.median_size
    }

    /// Statistical mode of all observed sizes, the assumed body text size.
    pub fn body_size(&self) -> f32 {
        self.body_size
    }

    /// Up to 3 heading-level sizes, largest first.
    pub fn significant_sizes(&self) -> &[f32] {
        &self.significant
    }

    /// Whether a size belongs to the significant set.
    pub fn is_significant(&self, size: f32) -> bool {
        self.significant_keys.contains(&quantize(size))
    }

    /// The significant size nearest to `size`, ties toward the larger one.
    pub fn nearest_significant(&self, size: f32) -> Option<f32> {
        let mut best: Option<f32> = None;
        let mut best_dist = f32::INFINITY;
        for &candidate in &self.significant {
            let dist = (candidate - size).abs();
            if dist < best_dist {
                best = Some(candidate);
                best_dist = dist;
            }
        }
        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BBox;

    fn elements_with_sizes(sizes: &[f32]) -> Vec<TextElement> {
        sizes
            .iter()
            .enumerate()
            .map(|(i, &size)| {
                TextElement::new(
                    format!("span {i}"),
                    "Helvetica",
                    size,
                    0,
                    1,
                    BBox::new(72.0, 72.0 + i as f32 * 14.0, 200.0, 84.0 + i as f32 * 14.0),
                    612.0,
                    792.0,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let stats = FontStatistics::from_elements(&[] as &[TextElement]);
        assert!(stats.significant_sizes().is_empty());
        assert_eq!(stats.body_size(), 12.0);
    }

    #[test]
    fn test_significant_detection() {
        // 40 body spans at 11 pt, 3 headings at 18 pt, 2 at 24 pt.
        let mut sizes = vec![11.0; 40];
        sizes.extend([18.0, 18.0, 18.0, 24.0, 24.0]);
        let elems = elements_with_sizes(&sizes);
        let stats = FontStatistics::from_elements(&elems);

        assert_eq!(stats.body_size(), 11.0);
        assert_eq!(stats.significant_sizes(), &[24.0, 18.0]);
        assert!(stats.is_significant(18.0));
        assert!(!stats.is_significant(11.0));
    }

    #[test]
    fn test_count_upper_bound_is_strict() {
        // 11 spans: two at 24 pt, nine at 11 pt. The 10% upper bound is
        // 1.1, and 2 < 1.1 is false, so 24 must NOT be significant.
        let mut sizes = vec![24.0, 24.0];
        sizes.extend(vec![11.0; 9]);
        let elems = elements_with_sizes(&sizes);
        let stats = FontStatistics::from_elements(&elems);

        assert!(stats.significant_sizes().is_empty());
    }

    #[test]
    fn test_singleton_size_excluded() {
        // A size seen once is noise, not a heading size.
        let mut sizes = vec![11.0; 30];
        sizes.push(28.0);
        sizes.extend([18.0, 18.0]);
        let elems = elements_with_sizes(&sizes);
        let stats = FontStatistics::from_elements(&elems);

        assert_eq!(stats.significant_sizes(), &[18.0]);
    }

    #[test]
    fn test_at_most_three_sizes_descending() {
        let mut sizes = vec![10.0; 100];
        for heading in [14.0, 16.0, 18.0, 20.0, 24.0] {
            sizes.extend([heading, heading]);
        }
        let elems = elements_with_sizes(&sizes);
        let stats = FontStatistics::from_elements(&elems);

        let sig = stats.significant_sizes();
        assert_eq!(sig, &[24.0, 20.0, 18.0]);
        assert!(sig.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_mode_tie_breaks_to_smallest() {
        let elems = elements_with_sizes(&[10.0, 10.0, 12.0, 12.0, 14.0]);
        let stats = FontStatistics::from_elements(&elems);
        assert_eq!(stats.body_size(), 10.0);
    }

    #[test]
    fn test_nearest_significant_ties_toward_larger() {
        let mut sizes = vec![10.0; 100];
        sizes.extend([16.0, 16.0, 20.0, 20.0]);
        let elems = elements_with_sizes(&sizes);
        let stats = FontStatistics::from_elements(&elems);
        assert_eq!(stats.significant_sizes(), &[20.0, 16.0]);

        // 18.0 is equidistant; the larger size wins.
        assert_eq!(stats.nearest_significant(18.0), Some(20.0));
        assert_eq!(stats.nearest_significant(16.4), Some(16.0));
        assert_eq!(FontStatistics::from_elements(&[] as &[TextElement]).nearest_significant(12.0), None);
    }
}
