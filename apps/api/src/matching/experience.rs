/// Scores experience in [0, 100] from the number of experience entries on a
/// resume and a free-text requirement such as "3+ years".
///
/// Entry count stands in for years of experience.
pub fn score_experience(entry_count: usize, requirement: Option<&str>) -> f64 {
    let requirement = match requirement {
        Some(r) if !r.trim().is_empty() => r,
        _ => return 100.0,
    };
    if requirement.to_lowercase().contains("fresher") {
        return 100.0;
    }

    let required_years = required_years(requirement);
    let count = entry_count as u64;

    if count >= required_years {
        100.0
    } else if count > 0 {
        count as f64 * 100.0 / required_years as f64
    } else {
        0.0
    }
}

/// First run of ASCII digits in the text, 0 when there is none.
fn required_years(requirement: &str) -> u64 {
    let digits: String = requirement
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    if digits.is_empty() {
        return 0;
    }
    // an absurdly long digit run saturates instead of failing
    digits.parse().unwrap_or(u64::MAX)
}
