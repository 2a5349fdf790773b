use crate::models::resume::EducationEntry;

const FULL: f64 = 100.0;
const PARTIAL: f64 = 50.0;

/// Binary education check: 100 when any required qualification overlaps a
/// candidate degree or appears within an institution name, otherwise 50.
///
/// No requirement scores 100; a resume without education scores 50.
pub fn score_education(education: &[EducationEntry], qualifications: &[String]) -> f64 {
    let qualifications: Vec<String> = qualifications
        .iter()
        .map(|q| q.trim().to_lowercase())
        .filter(|q| !q.is_empty())
        .collect();

    if qualifications.is_empty() {
        return FULL;
    }
    if education.is_empty() {
        return PARTIAL;
    }

    // an entry without a degree is contained in every qualification and matches
    let has_match = education.iter().any(|entry| {
        let degree = entry.degree.to_lowercase();
        let institution = entry.institution.to_lowercase();
        qualifications.iter().any(|qual| {
            degree.contains(qual.as_str())
                || qual.contains(&degree)
                || institution.contains(qual.as_str())
        })
    });

    if has_match {
        FULL
    } else {
        PARTIAL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edu(degree: &str, institution: &str) -> EducationEntry {
        EducationEntry {
            institution: institution.to_string(),
            degree: degree.to_string(),
            ..Default::default()
        }
    }

    fn quals(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_qualifications_is_full_regardless_of_candidate() {
        assert_eq!(score_education(&[], &[]), 100.0);
        assert_eq!(score_education(&[edu("BA History", "Somewhere")], &[]), 100.0);
    }

    #[test]
    fn test_no_education_with_requirement_is_half() {
        assert_eq!(score_education(&[], &quals(&["B.Tech"])), 50.0);
    }

    #[test]
    fn test_degree_contains_qualification() {
        let entries = [edu("B.Tech in Computer Science", "IIT Delhi")];
        assert_eq!(score_education(&entries, &quals(&["b.tech"])), 100.0);
    }

    #[test]
    fn test_qualification_contains_degree() {
        let entries = [edu("MBA", "Some School")];
        assert_eq!(score_education(&entries, &quals(&["MBA or equivalent"])), 100.0);
    }

    #[test]
    fn test_institution_contains_qualification() {
        let entries = [edu("Diploma", "Stanford University")];
        assert_eq!(score_education(&entries, &quals(&["stanford"])), 100.0);
    }

    #[test]
    fn test_no_overlap_is_half() {
        let entries = [edu("BA History", "Local College")];
        assert_eq!(score_education(&entries, &quals(&["PhD Physics"])), 50.0);
    }

    #[test]
    fn test_entry_without_degree_matches_any_qualification() {
        let entries = [edu("", "Local College")];
        assert_eq!(score_education(&entries, &quals(&["PhD"])), 100.0);
    }

    #[test]
    fn test_any_entry_can_satisfy() {
        let entries = [edu("BA History", "Local College"), edu("M.Sc Data Science", "Uni")];
        assert_eq!(score_education(&entries, &quals(&["PhD", "M.Sc"])), 100.0);
    }
}
