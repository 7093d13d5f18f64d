use std::collections::HashSet;

use crate::dto::scoring_dto::{ComponentScore, ScoreBreakdown};
use crate::models::score::ScoringConfiguration;
use crate::models::snapshot::{ApplicationSnapshot, CandidateSkill};

/// Online tests were retired; the sub-score is pinned to zero but the weight
/// slot stays in every configuration so stored profiles keep their shape.
pub const TEST_SCORE: f64 = 0.0;

pub struct ScoreCalculator;

impl ScoreCalculator {
    /// Skill match, 0-100. Required skills carry 70 points, preferred 30.
    /// A side with no entries grants its full component only when the other
    /// side has entries; a job with no skill requirements at all has nothing
    /// to match against and scores 0, not 100. Keep the branches as they
    /// are: collapsing them changes the outcome for empty-sided jobs.
    pub fn skill_match_score(
        required: &[i64],
        preferred: &[i64],
        candidate: &[CandidateSkill],
    ) -> f64 {
        if required.is_empty() && preferred.is_empty() {
            return 0.0;
        }

        let held: HashSet<i64> = candidate.iter().map(|s| s.skill_id).collect();

        let required_component = if required.is_empty() {
            70.0
        } else {
            let matched = required.iter().filter(|id| held.contains(id)).count();
            matched as f64 / required.len() as f64 * 70.0
        };

        let preferred_component = if preferred.is_empty() {
            30.0
        } else {
            let matched = preferred.iter().filter(|id| held.contains(id)).count();
            matched as f64 / preferred.len() as f64 * 30.0
        };

        (required_component + preferred_component).min(100.0)
    }

    /// Experience, 0-100. Sums years across all candidate skills, matched or
    /// not; missing years count as zero. Ten total years saturate the score.
    pub fn experience_score(candidate: &[CandidateSkill]) -> f64 {
        let total_years: f64 = candidate
            .iter()
            .map(|s| s.years_of_experience.unwrap_or(0.0))
            .sum();
        (total_years / 10.0 * 100.0).min(100.0)
    }

    /// Interview, 0-100. Average of all positive ratings (1-5) across every
    /// interview on the application; no feedback means 0.
    pub fn interview_score(ratings: &[i32]) -> f64 {
        let rated: Vec<i32> = ratings.iter().copied().filter(|r| *r > 0).collect();
        if rated.is_empty() {
            return 0.0;
        }
        let sum: i32 = rated.iter().sum();
        sum as f64 / rated.len() as f64 / 5.0 * 100.0
    }

    /// Education, 0-100. A count-based proxy: 25 points per qualification,
    /// capped at four.
    pub fn education_score(qualification_count: i64) -> f64 {
        (qualification_count as f64 * 25.0).min(100.0)
    }

    /// Full evaluation of one snapshot under one weight profile. Pure: the
    /// same snapshot and configuration always produce the same breakdown.
    pub fn evaluate(
        snapshot: &ApplicationSnapshot,
        config: &ScoringConfiguration,
    ) -> ScoreBreakdown {
        let skill = Self::skill_match_score(
            &snapshot.required_skill_ids,
            &snapshot.preferred_skill_ids,
            &snapshot.candidate_skills,
        );
        let experience = Self::experience_score(&snapshot.candidate_skills);
        let interview = Self::interview_score(&snapshot.feedback_ratings);
        let education = Self::education_score(snapshot.qualification_count);

        let total = skill * config.skill_weight as f64 / 100.0
            + experience * config.experience_weight as f64 / 100.0
            + interview * config.interview_weight as f64 / 100.0
            + TEST_SCORE * config.test_weight as f64 / 100.0
            + education * config.education_weight as f64 / 100.0;

        ScoreBreakdown {
            skill_match: ComponentScore {
                score: skill,
                weight: config.skill_weight,
            },
            experience: ComponentScore {
                score: experience,
                weight: config.experience_weight,
            },
            interview: ComponentScore {
                score: interview,
                weight: config.interview_weight,
            },
            test: ComponentScore {
                score: TEST_SCORE,
                weight: config.test_weight,
            },
            education: ComponentScore {
                score: education,
                weight: config.education_weight,
            },
            total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn skills(entries: &[(i64, Option<f64>)]) -> Vec<CandidateSkill> {
        entries
            .iter()
            .map(|(id, years)| CandidateSkill {
                skill_id: *id,
                years_of_experience: *years,
            })
            .collect()
    }

    fn default_config() -> ScoringConfiguration {
        ScoringConfiguration {
            id: 1,
            position_id: 1,
            skill_weight: 30,
            experience_weight: 20,
            interview_weight: 30,
            test_weight: 15,
            education_weight: 5,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn snapshot() -> ApplicationSnapshot {
        ApplicationSnapshot {
            application_id: Uuid::new_v4(),
            position_id: 1,
            required_skill_ids: vec![1, 2],
            preferred_skill_ids: vec![3],
            candidate_skills: skills(&[(1, Some(2.0)), (3, Some(1.0))]),
            qualification_count: 2,
            feedback_ratings: vec![],
        }
    }

    #[test]
    fn skill_match_partial_required_full_preferred() {
        // 1 of 2 required matched, 1 of 1 preferred matched.
        let score = ScoreCalculator::skill_match_score(
            &[1, 2],
            &[3],
            &skills(&[(1, Some(2.0)), (3, Some(1.0))]),
        );
        assert_eq!(score, 65.0);
    }

    #[test]
    fn skill_match_no_requirements_scores_zero() {
        let score = ScoreCalculator::skill_match_score(&[], &[], &skills(&[(1, Some(5.0))]));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn skill_match_empty_required_defaults_to_full_component() {
        // No required skills but preferred ones exist: required side grants
        // its 70 points, preferred side is evaluated normally.
        let score = ScoreCalculator::skill_match_score(&[], &[3, 4], &skills(&[(3, None)]));
        assert_eq!(score, 70.0 + 15.0);
    }

    #[test]
    fn skill_match_empty_preferred_defaults_to_full_component() {
        let score = ScoreCalculator::skill_match_score(&[1], &[], &skills(&[(1, None)]));
        assert_eq!(score, 100.0);
    }

    #[test]
    fn skill_match_never_exceeds_hundred() {
        let score = ScoreCalculator::skill_match_score(&[1], &[], &skills(&[(1, Some(50.0))]));
        assert!(score <= 100.0);
    }

    #[test]
    fn experience_sums_all_skills_and_caps() {
        assert_eq!(
            ScoreCalculator::experience_score(&skills(&[(1, Some(2.0)), (3, Some(1.0))])),
            30.0
        );
        // 50 years still caps at 100.
        assert_eq!(
            ScoreCalculator::experience_score(&skills(&[(1, Some(50.0))])),
            100.0
        );
    }

    #[test]
    fn experience_treats_missing_years_as_zero() {
        assert_eq!(
            ScoreCalculator::experience_score(&skills(&[(1, None), (2, Some(4.0))])),
            40.0
        );
    }

    #[test]
    fn interview_without_feedback_is_zero() {
        assert_eq!(ScoreCalculator::interview_score(&[]), 0.0);
        // Unrated rows (rating 0) are excluded, not averaged in.
        assert_eq!(ScoreCalculator::interview_score(&[0, 0]), 0.0);
    }

    #[test]
    fn interview_averages_positive_ratings() {
        assert_eq!(ScoreCalculator::interview_score(&[4, 5, 0, 3]), 80.0);
        assert_eq!(ScoreCalculator::interview_score(&[5, 5]), 100.0);
    }

    #[test]
    fn education_caps_at_four_qualifications() {
        assert_eq!(ScoreCalculator::education_score(0), 0.0);
        assert_eq!(ScoreCalculator::education_score(2), 50.0);
        assert_eq!(ScoreCalculator::education_score(10), 100.0);
    }

    #[test]
    fn evaluate_weighted_total_with_default_profile() {
        let breakdown = ScoreCalculator::evaluate(&snapshot(), &default_config());
        assert_eq!(breakdown.skill_match.score, 65.0);
        assert_eq!(breakdown.experience.score, 30.0);
        assert_eq!(breakdown.interview.score, 0.0);
        assert_eq!(breakdown.test.score, 0.0);
        assert_eq!(breakdown.education.score, 50.0);
        // 65*0.30 + 30*0.20 + 0*0.30 + 0*0.15 + 50*0.05
        assert!((breakdown.total - 28.0).abs() < 1e-9);
    }

    #[test]
    fn evaluate_is_deterministic() {
        let snap = snapshot();
        let config = default_config();
        let first = ScoreCalculator::evaluate(&snap, &config);
        let second = ScoreCalculator::evaluate(&snap, &config);
        assert_eq!(first.total, second.total);
        assert_eq!(first.skill_match.score, second.skill_match.score);
        assert_eq!(first.experience.score, second.experience.score);
    }

    #[test]
    fn all_sub_scores_stay_in_range_at_extremes() {
        let snap = ApplicationSnapshot {
            application_id: Uuid::new_v4(),
            position_id: 1,
            required_skill_ids: (1..=20).collect(),
            preferred_skill_ids: (1..=20).collect(),
            candidate_skills: skills(&(1..=20).map(|i| (i, Some(9.5))).collect::<Vec<_>>()),
            qualification_count: 100,
            feedback_ratings: vec![5; 40],
        };
        let breakdown = ScoreCalculator::evaluate(&snap, &default_config());
        for component in [
            &breakdown.skill_match,
            &breakdown.experience,
            &breakdown.interview,
            &breakdown.test,
            &breakdown.education,
        ] {
            assert!(component.score >= 0.0 && component.score <= 100.0);
        }
        assert!(breakdown.total <= 100.0);
    }
}
