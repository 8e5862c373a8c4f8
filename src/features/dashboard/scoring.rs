//! Province satisfaction scoring.
//!
//! Computes one 0-100-ish satisfaction index per province from flat
//! per-respondent rows. Pure functions of their inputs; recomputed on every
//! request, never cached. Degenerate inputs (no respondents, no questions)
//! score 0 rather than erroring.
//!
//! The K1 coefficient mixes a 0-100 raw percentage with the sentinel `1.0`
//! when the participation threshold is met. That is how the scores have
//! always been published, so it is kept bit-for-bit even though the scale
//! jump looks odd next to K2/K3.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use crate::shared::constants::MAX_ANSWER_VALUE;

/// One respondent contributes at most `MAX_ANSWER_VALUE * total_questions`
/// raw points.
const ANSWER_SCALE: f64 = MAX_ANSWER_VALUE as f64;

/// Province under scoring
#[derive(Debug, Clone, FromRow)]
pub struct ProvinceRef {
    pub id: Uuid,
    pub name: String,
    pub region: String,
}

/// One respondent's row for the survey being scored. `survey_time` is the
/// submission timestamp and doubles as the completion flag; respondents who
/// never submitted carry `None` and `point = 0`.
#[derive(Debug, Clone, FromRow)]
pub struct ScoreRow {
    pub province_id: Uuid,
    pub is_member: bool,
    pub survey_time: Option<DateTime<Utc>>,
    pub point: f64,
}

/// Computed satisfaction index for one province. Request-scoped, never
/// persisted.
#[derive(Debug, Clone)]
pub struct ProvincePoint {
    pub id: Uuid,
    pub name: String,
    pub region: String,
    pub point: f64,
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    n: i64,
    sum_point: f64,
    member_count: i64,
    member_finished: i64,
    non_member_finished: i64,
}

/// Participation-rate factor among members.
///
/// Returns the raw 0-100 percentage, or the sentinel `1.0` once the
/// group-size-dependent threshold is reached: 100% under 500 members,
/// 80% under 1000, 70% above.
fn k1(surveyed: i64, total: i64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let raw = (surveyed as f64 / total as f64) * 100.0;
    if total < 500 {
        if raw == 100.0 {
            1.0
        } else {
            raw
        }
    } else if total < 1000 {
        if raw >= 80.0 {
            1.0
        } else {
            raw
        }
    } else if raw >= 70.0 {
        1.0
    } else {
        raw
    }
}

/// Membership-density multiplier. Buckets on the member count alone;
/// `total_active` only gates the all-zero case.
fn k2(member_count: i64, total_active: i64) -> f64 {
    if total_active == 0 {
        return 0.0;
    }
    match member_count {
        m if m < 100 => 0.6,
        m if m < 200 => 0.7,
        m if m < 300 => 0.8,
        m if m < 500 => 1.0,
        m if m < 1000 => 1.2,
        _ => 1.4,
    }
}

/// Non-member outreach bonus, added after the multiplicative part.
fn k3(non_member_finished: i64) -> f64 {
    match non_member_finished {
        0 => 0.0,
        f if f < 100 => 5.0,
        f if f < 200 => 10.0,
        _ => 15.0,
    }
}

/// Score every province in `provinces` from the respondent rows of one
/// survey. Output order follows the input province order; ranking is the
/// caller's concern.
pub fn satisfaction_scores(
    provinces: &[ProvinceRef],
    rows: &[ScoreRow],
    total_questions: i64,
) -> Vec<ProvincePoint> {
    let mut tallies: HashMap<Uuid, Tally> = HashMap::new();

    for row in rows {
        let tally = tallies.entry(row.province_id).or_default();
        tally.n += 1;
        tally.sum_point += row.point;
        if row.is_member {
            tally.member_count += 1;
            if row.survey_time.is_some() {
                tally.member_finished += 1;
            }
        } else if row.survey_time.is_some() {
            tally.non_member_finished += 1;
        }
    }

    provinces
        .iter()
        .map(|province| {
            let tally = tallies.get(&province.id).copied().unwrap_or_default();

            let point = if tally.n == 0 || total_questions == 0 {
                0.0
            } else {
                let base = tally.sum_point
                    / (ANSWER_SCALE * total_questions as f64 * tally.n as f64);
                base * 100.0
                    * k1(tally.member_finished, tally.member_count)
                    * k2(tally.member_count, tally.n)
                    + k3(tally.non_member_finished)
            };

            ProvincePoint {
                id: province.id,
                name: province.name.clone(),
                region: province.region.clone(),
                point,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn province(name: &str) -> ProvinceRef {
        ProvinceRef {
            id: Uuid::new_v4(),
            name: name.to_string(),
            region: "Đồng bằng sông Hồng".to_string(),
        }
    }

    fn row(province_id: Uuid, is_member: bool, finished: bool, point: f64) -> ScoreRow {
        ScoreRow {
            province_id,
            is_member,
            survey_time: finished.then(Utc::now),
            point,
        }
    }

    #[test]
    fn test_worked_example_scores_sixty() {
        // One member, fully surveyed, 25 of 25 possible points over 5 questions:
        // K1 = 1 (100% of a small group), K2 = 0.6, K3 = 0 -> 100 * 0.6 = 60.
        let p = province("Hà Nội");
        let rows = vec![row(p.id, true, true, 25.0)];

        let scores = satisfaction_scores(&[p], &rows, 5);

        assert_eq!(scores.len(), 1);
        assert!((scores[0].point - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_respondents_scores_zero() {
        let p = province("Hà Nội");

        let scores = satisfaction_scores(&[p], &[], 5);

        assert_eq!(scores[0].point, 0.0);
    }

    #[test]
    fn test_zero_questions_scores_zero() {
        let p = province("Hà Nội");
        let rows = vec![row(p.id, true, true, 25.0)];

        let scores = satisfaction_scores(&[p], &rows, 0);

        assert_eq!(scores[0].point, 0.0);
    }

    #[test]
    fn test_k1_small_group_needs_full_participation() {
        assert_eq!(k1(0, 0), 0.0);
        assert_eq!(k1(1, 1), 1.0);
        assert_eq!(k1(499, 499), 1.0);
        // Anything under 100% stays on the raw percentage scale.
        assert_eq!(k1(99, 100), 99.0);
        assert_eq!(k1(0, 10), 0.0);
    }

    #[test]
    fn test_k1_mid_group_threshold_eighty() {
        assert_eq!(k1(400, 500), 1.0);
        assert_eq!(k1(500, 500), 1.0);
        assert!((k1(399, 500) - 79.8).abs() < 1e-9);
    }

    #[test]
    fn test_k1_large_group_threshold_seventy() {
        assert_eq!(k1(700, 1000), 1.0);
        assert!((k1(699, 1000) - 69.9).abs() < 1e-9);
    }

    #[test]
    fn test_k2_buckets_on_member_count() {
        assert_eq!(k2(50, 0), 0.0);
        assert_eq!(k2(0, 1), 0.6);
        assert_eq!(k2(99, 100), 0.6);
        assert_eq!(k2(100, 100), 0.7);
        assert_eq!(k2(199, 200), 0.7);
        assert_eq!(k2(200, 200), 0.8);
        assert_eq!(k2(299, 300), 0.8);
        assert_eq!(k2(300, 300), 1.0);
        assert_eq!(k2(499, 500), 1.0);
        assert_eq!(k2(500, 500), 1.2);
        assert_eq!(k2(999, 1000), 1.2);
        assert_eq!(k2(1000, 1000), 1.4);
    }

    #[test]
    fn test_k3_buckets_on_non_member_finished() {
        assert_eq!(k3(0), 0.0);
        assert_eq!(k3(1), 5.0);
        assert_eq!(k3(99), 5.0);
        assert_eq!(k3(100), 10.0);
        assert_eq!(k3(199), 10.0);
        assert_eq!(k3(200), 15.0);
        assert_eq!(k3(5000), 15.0);
    }

    #[test]
    fn test_non_member_only_province_gets_outreach_bonus() {
        // No members: K1 = 0 zeroes the weighted part, only K3 remains.
        let p = province("Huế");
        let rows = vec![row(p.id, false, true, 20.0)];

        let scores = satisfaction_scores(&[p], &rows, 5);

        assert_eq!(scores[0].point, 5.0);
    }

    #[test]
    fn test_partial_member_participation_uses_raw_percentage() {
        // 1 of 2 members surveyed: K1 stays on the 0-100 raw scale (50), so
        // the index leaves the nominal 0-100 range. Published scores have
        // always behaved this way.
        let p = province("Hà Nội");
        let rows = vec![
            row(p.id, true, true, 25.0),
            row(p.id, true, false, 0.0),
        ];

        let scores = satisfaction_scores(&[p], &rows, 5);

        // (25 / (5*5*2)) * 100 * 50 * 0.6 = 1500
        assert!((scores[0].point - 1500.0).abs() < 1e-9);
    }

    #[test]
    fn test_unsurveyed_respondents_still_dilute_the_average() {
        // Same points, extra silent non-member: n grows, score shrinks.
        let p1 = province("Hà Nội");
        let p2 = province("Huế");
        let one = vec![row(p1.id, true, true, 25.0)];
        let two = vec![row(p2.id, true, true, 25.0), row(p2.id, false, false, 0.0)];

        let lone = satisfaction_scores(std::slice::from_ref(&p1), &one, 5);
        let diluted = satisfaction_scores(std::slice::from_ref(&p2), &two, 5);

        assert!(diluted[0].point < lone[0].point);
    }

    #[test]
    fn test_output_preserves_input_province_order() {
        let first = province("An Giang");
        let second = province("Bắc Ninh");
        let rows = vec![row(second.id, true, true, 25.0)];

        let scores = satisfaction_scores(&[first.clone(), second.clone()], &rows, 5);

        assert_eq!(scores[0].id, first.id);
        assert_eq!(scores[1].id, second.id);
        assert!(scores[1].point > scores[0].point);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let p = province("Hà Nội");
        let rows = vec![
            row(p.id, true, true, 18.0),
            row(p.id, true, false, 0.0),
            row(p.id, false, true, 12.0),
        ];

        let first = satisfaction_scores(std::slice::from_ref(&p), &rows, 5);
        let second = satisfaction_scores(std::slice::from_ref(&p), &rows, 5);

        assert_eq!(first[0].point, second[0].point);
    }
}
