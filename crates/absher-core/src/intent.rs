//! Keyword-overlap intent router.
//!
//! Scores each service by how many of its keywords occur as substrings of
//! the lower-cased query and picks the highest. Ties go to the service
//! declared first in the keyword table.

use absher_types::service::ServiceType;
use serde::Serialize;

/// Result of classifying one query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntentMatch {
    /// `None` when no keyword matched.
    pub service: Option<ServiceType>,
    /// Number of matching keywords for `service` (0 when unmatched).
    pub score: usize,
}

impl IntentMatch {
    pub const NONE: IntentMatch = IntentMatch {
        service: None,
        score: 0,
    };

    pub fn is_match(&self) -> bool {
        self.service.is_some()
    }
}

/// Maps free-text queries to a service type.
#[derive(Debug, Clone)]
pub struct IntentRouter {
    keywords: Vec<(ServiceType, Vec<String>)>,
}

impl IntentRouter {
    /// Router with the standard bilingual keyword table.
    pub fn standard() -> Self {
        Self::with_keywords(vec![
            (
                ServiceType::Iqama,
                vec!["إقامة", "iqama", "residency", "تجديد الإقامة"],
            ),
            (
                ServiceType::NationalId,
                vec!["هوية", "national id", "الهوية الوطنية", "استخراج هوية"],
            ),
            (
                ServiceType::Vehicle,
                vec!["سيارة", "مركبة", "vehicle", "تسجيل مركبة", "registration"],
            ),
        ])
    }

    /// Router with a custom keyword table. Table order is the tie-break order.
    ///
    /// Keywords are lower-cased on construction so matching against the
    /// lower-cased query is consistent.
    pub fn with_keywords<S: AsRef<str>>(table: Vec<(ServiceType, Vec<S>)>) -> Self {
        let keywords = table
            .into_iter()
            .map(|(service, words)| {
                let words = words.iter().map(|w| w.as_ref().to_lowercase()).collect();
                (service, words)
            })
            .collect();
        Self { keywords }
    }

    /// Keyword table in declaration order.
    pub fn keywords(&self) -> &[(ServiceType, Vec<String>)] {
        &self.keywords
    }

    /// Per-service keyword hit counts, in declaration order.
    pub fn scores(&self, query: &str) -> Vec<(ServiceType, usize)> {
        let query = query.to_lowercase();
        self.keywords
            .iter()
            .map(|(service, words)| {
                let hits = words.iter().filter(|w| query.contains(w.as_str())).count();
                (*service, hits)
            })
            .collect()
    }

    /// Classify a query.
    ///
    /// Returns [`IntentMatch::NONE`] when every score is zero. Otherwise the
    /// highest-scoring service wins; equal scores resolve to the service
    /// declared first.
    pub fn classify(&self, query: &str) -> IntentMatch {
        let mut best = IntentMatch::NONE;
        for (service, score) in self.scores(query) {
            // Strictly greater keeps the earliest service on ties.
            if score > best.score {
                best = IntentMatch {
                    service: Some(service),
                    score,
                };
            }
        }
        tracing::debug!(service = ?best.service, score = best.score, "Classified query");
        best
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_service_keyword_matches() {
        let router = IntentRouter::standard();

        let m = router.classify("I want to renew my Iqama");
        assert_eq!(m.service, Some(ServiceType::Iqama));
        assert!(m.score >= 1);

        let m = router.classify("How do I get a National ID?");
        assert_eq!(m.service, Some(ServiceType::NationalId));

        let m = router.classify("أريد تجديد سيارة");
        assert_eq!(m.service, Some(ServiceType::Vehicle));
    }

    #[test]
    fn arabic_phrase_counts_every_contained_keyword() {
        let router = IntentRouter::standard();
        // "تجديد الإقامة" contains "إقامة" too.
        let m = router.classify("تجديد الإقامة");
        assert_eq!(m.service, Some(ServiceType::Iqama));
        assert_eq!(m.score, 2);
    }

    #[test]
    fn higher_count_wins_across_services() {
        let router = IntentRouter::standard();
        // iqama: 1 ("iqama"); vehicle: 2 ("vehicle", "registration").
        let m = router.classify("iqama holder asking about vehicle registration");
        assert_eq!(m.service, Some(ServiceType::Vehicle));
        assert_eq!(m.score, 2);
    }

    #[test]
    fn ties_resolve_to_first_declared() {
        let router = IntentRouter::standard();
        // iqama: 1, vehicle: 1.
        let m = router.classify("iqama and vehicle");
        assert_eq!(m.service, Some(ServiceType::Iqama));
        assert_eq!(m.score, 1);

        // national_id: 1, vehicle: 1.
        let m = router.classify("vehicle or national id");
        assert_eq!(m.service, Some(ServiceType::NationalId));
    }

    #[test]
    fn no_keyword_returns_none() {
        let router = IntentRouter::standard();
        assert_eq!(router.classify("what are your opening hours"), IntentMatch::NONE);
        assert!(!router.classify("").is_match());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let router = IntentRouter::standard();
        assert_eq!(
            router.classify("IQAMA RENEWAL").service,
            Some(ServiceType::Iqama)
        );
    }

    #[test]
    fn custom_table_order_controls_ties() {
        let router = IntentRouter::with_keywords(vec![
            (ServiceType::Vehicle, vec!["Car"]),
            (ServiceType::Iqama, vec!["permit"]),
        ]);
        let m = router.classify("car permit");
        assert_eq!(m.service, Some(ServiceType::Vehicle));
        assert_eq!(router.keywords()[0].1, vec!["car".to_string()]);
    }

    #[test]
    fn scores_report_every_service() {
        let router = IntentRouter::standard();
        let scores = router.scores("vehicle");
        assert_eq!(
            scores,
            vec![
                (ServiceType::Iqama, 0),
                (ServiceType::NationalId, 0),
                (ServiceType::Vehicle, 1)
            ]
        );
    }
}
