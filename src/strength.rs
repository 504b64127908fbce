use std::fmt;

pub const SHORT_LENGTH: usize = 8;
pub const GOOD_LENGTH: usize = 12;
const REPEAT_RUN: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StrengthLevel {
    VeryWeak,
    Weak,
    Moderate,
    Strong,
    VeryStrong,
}

impl StrengthLevel {
    fn from_score(score: i32) -> Self {
        match score {
            i32::MIN..=0 => StrengthLevel::VeryWeak,
            1..=2 => StrengthLevel::Weak,
            3..=4 => StrengthLevel::Moderate,
            5..=6 => StrengthLevel::Strong,
            _ => StrengthLevel::VeryStrong,
        }
    }
}

impl fmt::Display for StrengthLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StrengthLevel::VeryWeak => "Very Weak",
            StrengthLevel::Weak => "Weak",
            StrengthLevel::Moderate => "Moderate",
            StrengthLevel::Strong => "Strong",
            StrengthLevel::VeryStrong => "Very Strong",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Fair,
    Poor,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub tone: Tone,
    pub message: &'static str,
}

impl Feedback {
    fn new(tone: Tone, message: &'static str) -> Self {
        Self { tone, message }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StrengthReport {
    pub score: i32,
    pub level: StrengthLevel,
    pub feedback: Vec<Feedback>,
}

pub fn estimate(password: &str) -> StrengthReport {
    let mut score = 0;
    let mut feedback = Vec::new();

    let length = password.chars().count();
    if length < SHORT_LENGTH {
        feedback.push(Feedback::new(Tone::Poor, "Very short password."));
    } else if length < GOOD_LENGTH {
        score += 1;
        feedback.push(Feedback::new(Tone::Fair, "Good length."));
    } else {
        score += 2;
        feedback.push(Feedback::new(Tone::Good, "Excellent length!"));
    }

    let kinds = [
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_lowercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| c.is_ascii_punctuation()),
    ]
    .into_iter()
    .filter(|&present| present)
    .count();

    match kinds {
        0 | 1 => feedback.push(Feedback::new(
            Tone::Poor,
            "Lacks character diversity (try mixing types).",
        )),
        2 => {
            score += 1;
            feedback.push(Feedback::new(Tone::Fair, "Moderate character diversity."));
        }
        3 => {
            score += 2;
            feedback.push(Feedback::new(Tone::Good, "Good character diversity."));
        }
        _ => {
            score += 3;
            feedback.push(Feedback::new(Tone::Good, "Excellent character diversity!"));
        }
    }

    if has_repeat_run(password, REPEAT_RUN) {
        score -= 1;
        feedback.push(Feedback::new(
            Tone::Poor,
            "Avoid repeating characters (e.g., 'aaaa').",
        ));
    }

    StrengthReport {
        score,
        level: StrengthLevel::from_score(score),
        feedback,
    }
}

fn has_repeat_run(password: &str, run: usize) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars
        .windows(run)
        .any(|window| window.iter().all(|&c| c == window[0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_single_kind_is_very_weak() {
        let report = estimate("abc");
        assert_eq!(report.score, 0);
        assert_eq!(report.level, StrengthLevel::VeryWeak);
        assert_eq!(report.feedback[0].message, "Very short password.");
    }

    #[test]
    fn test_medium_two_kinds_is_weak() {
        let report = estimate("abcdef12");
        assert_eq!(report.score, 2);
        assert_eq!(report.level, StrengthLevel::Weak);
    }

    #[test]
    fn test_long_all_kinds_is_strong() {
        let report = estimate("O#4DSk0Bnc!5>5%^");
        assert_eq!(report.score, 5);
        assert_eq!(report.level, StrengthLevel::Strong);
        assert!(report.feedback.iter().all(|f| f.tone == Tone::Good));
    }

    #[test]
    fn test_repeat_run_penalised() {
        let clean = estimate("Abcdefgh1!xy");
        let repeated = estimate("Aaaaafgh1!xy");
        assert_eq!(repeated.score, clean.score - 1);
        assert!(
            repeated
                .feedback
                .iter()
                .any(|f| f.message.contains("repeating"))
        );
    }

    #[test]
    fn test_three_repeats_not_penalised() {
        assert!(!has_repeat_run("aaab", REPEAT_RUN));
        assert!(has_repeat_run("baaaa", REPEAT_RUN));
        assert!(!has_repeat_run("aa", REPEAT_RUN));
    }

    #[test]
    fn test_level_thresholds() {
        assert_eq!(StrengthLevel::from_score(-1), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_score(0), StrengthLevel::VeryWeak);
        assert_eq!(StrengthLevel::from_score(1), StrengthLevel::Weak);
        assert_eq!(StrengthLevel::from_score(3), StrengthLevel::Moderate);
        assert_eq!(StrengthLevel::from_score(5), StrengthLevel::Strong);
        assert_eq!(StrengthLevel::from_score(7), StrengthLevel::VeryStrong);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(StrengthLevel::VeryWeak.to_string(), "Very Weak");
        assert_eq!(StrengthLevel::VeryStrong.to_string(), "Very Strong");
    }

    #[test]
    fn test_length_counts_chars() {
        let report = estimate("€€€€€€€€");
        assert_eq!(report.feedback[0].message, "Good length.");
    }
}
