use crate::matching::skills::SkillSet;

/// Share of `required` skills present in `candidate`, as a whole percentage
/// in 0..=100, rounded half-up.
///
/// A job with no required skills scores 0. The ranker additionally excludes
/// such jobs, so the value only matters to direct callers.
pub fn match_percentage(required: &SkillSet, candidate: &SkillSet) -> u8 {
    let required_count = required.len();
    if required_count == 0 {
        return 0;
    }

    let matched = required.iter().filter(|s| candidate.contains(s)).count();

    // round(matched / required * 100) in integer arithmetic: (200m + r) / 2r
    let percentage = (matched * 200 + required_count) / (required_count * 2);
    percentage.min(100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(skills: &[&str]) -> SkillSet {
        skills.iter().collect()
    }

    #[test]
    fn test_two_of_three_rounds_to_67() {
        let required = set(&["Python", "SQL", "Docker"]);
        let candidate = set(&["python", "docker", "Kubernetes"]);
        assert_eq!(match_percentage(&required, &candidate), 67);
    }

    #[test]
    fn test_identical_sets_score_100() {
        let skills = set(&["Rust", "Tokio", "Axum"]);
        assert_eq!(match_percentage(&skills, &skills), 100);
    }

    #[test]
    fn test_case_and_whitespace_insensitive() {
        assert_eq!(match_percentage(&set(&["Java"]), &set(&["JAVA "])), 100);
    }

    #[test]
    fn test_empty_required_scores_zero() {
        assert_eq!(match_percentage(&SkillSet::new(), &set(&["go"])), 0);
    }

    #[test]
    fn test_empty_candidate_scores_zero() {
        assert_eq!(match_percentage(&set(&["go", "sql"]), &SkillSet::new()), 0);
    }

    #[test]
    fn test_half_rounds_up() {
        // 1/8 = 12.5% → 13
        let required = set(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert_eq!(match_percentage(&required, &set(&["a"])), 13);
        // 1/3 = 33.33% → 33
        assert_eq!(match_percentage(&set(&["a", "b", "c"]), &set(&["a"])), 33);
    }

    #[test]
    fn test_duplicate_required_skills_count_once() {
        let required = set(&["SQL", "sql", "Docker"]);
        assert_eq!(required.len(), 2);
        assert_eq!(match_percentage(&required, &set(&["sql"])), 50);
    }

    #[test]
    fn test_always_within_bounds() {
        let cases = [
            (set(&["x"]), set(&[])),
            (set(&["x"]), set(&["x", "y", "z"])),
            (set(&["x", "y"]), set(&["y"])),
            (set(&[]), set(&[])),
        ];
        for (required, candidate) in &cases {
            assert!(match_percentage(required, candidate) <= 100);
        }
    }
}
