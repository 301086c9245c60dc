//! Urgency classification for notification text.

use crate::config::NotifyConfig;

/// How urgent a notification is, decided by configured indicator lists.
/// Input requests rank first: a permission prompt often also contains
/// completion words, and being waited on matters more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Urgency {
    Input,
    Problem,
    Completion,
    Other,
}

/// Match the lowercased text against the indicator lists; first match
/// wins in the order input, problem, completion.
pub fn classify(text: &str, indicators: &NotifyConfig) -> Urgency {
    let text = text.to_lowercase();
    let contains_any =
        |words: &[String]| words.iter().any(|word| text.contains(word.as_str()));

    if contains_any(&indicators.input_indicators) {
        Urgency::Input
    } else if contains_any(&indicators.problem_indicators) {
        Urgency::Problem
    } else if contains_any(&indicators.completion_indicators) {
        Urgency::Completion
    } else {
        Urgency::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn classify_default(text: &str) -> Urgency {
        classify(text, &Config::default_config().notify)
    }

    #[test]
    fn permission_prompt_is_input() {
        assert_eq!(
            classify_default("Claude needs your permission to use Bash"),
            Urgency::Input
        );
        assert_eq!(
            classify_default("Would you like to proceed?"),
            Urgency::Input
        );
    }

    #[test]
    fn failure_text_is_problem() {
        assert_eq!(classify_default("Build failed"), Urgency::Problem);
        assert_eq!(classify_default("3 warnings emitted"), Urgency::Problem);
    }

    #[test]
    fn done_text_is_completion() {
        assert_eq!(classify_default("All tasks complete"), Urgency::Completion);
        assert_eq!(classify_default("Refactor finished"), Urgency::Completion);
    }

    #[test]
    fn unmatched_text_is_other() {
        assert_eq!(classify_default("the cat sat on the mat"), Urgency::Other);
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(classify_default("BUILD FAILED"), Urgency::Problem);
    }

    #[test]
    fn input_outranks_completion() {
        // Both indicator sets match; the user being waited on wins.
        assert_eq!(
            classify_default("task complete, waiting for your input"),
            Urgency::Input
        );
    }
}
