use crate::analysis::tokenizer::TokenSet;

pub const DEFAULT_GENERIC_SUGGESTIONS: &[&str] = &[
    "Emphasize quantifiable results from previous projects",
    "Include relevant certifications if available",
];

/// Builds improvement suggestions: at most one data-driven entry listing job
/// keywords the résumé lacks, followed by a constant generic tail.
#[derive(Debug, Clone)]
pub struct SuggestionGenerator {
    /// Missing keywords must be longer than this many characters.
    pub min_keyword_chars: usize,
    pub max_keywords: usize,
    pub generic: Vec<String>,
}

impl Default for SuggestionGenerator {
    fn default() -> Self {
        Self {
            min_keyword_chars: 4,
            max_keywords: 5,
            generic: DEFAULT_GENERIC_SUGGESTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SuggestionGenerator {
    /// Job tokens absent from the résumé, in job order, filtered and capped.
    pub fn missing_keywords<'a>(&self, resume: &'a TokenSet, job: &'a TokenSet) -> Vec<&'a str> {
        job.difference(resume)
            .filter(|t| t.chars().count() > self.min_keyword_chars)
            .take(self.max_keywords)
            .collect()
    }

    pub fn suggest(&self, resume: &TokenSet, job: &TokenSet) -> Vec<String> {
        let missing = self.missing_keywords(resume, job);

        let mut suggestions = Vec::with_capacity(self.generic.len() + 1);
        if !missing.is_empty() {
            suggestions.push(format!(
                "Consider highlighting experience with: {}",
                missing.join(", ")
            ));
        }
        suggestions.extend(self.generic.iter().cloned());
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keywords_listed_first() {
        let resume = TokenSet::from_text("python django");
        let job = TokenSet::from_text("Python Kubernetes Terraform");
        let suggestions = SuggestionGenerator::default().suggest(&resume, &job);

        assert_eq!(suggestions.len(), 3);
        assert_eq!(
            suggestions[0],
            "Consider highlighting experience with: Kubernetes, Terraform"
        );
    }

    #[test]
    fn test_short_missing_words_ignored() {
        let resume = TokenSet::from_text("");
        let job = TokenSet::from_text("a Java team with SQL");
        // every missing word has at most 4 characters
        let suggestions = SuggestionGenerator::default().suggest(&resume, &job);
        assert_eq!(suggestions.len(), 2);
    }

    #[test]
    fn test_at_most_five_missing_keywords() {
        let resume = TokenSet::from_text("");
        let job = TokenSet::from_text("alpha1 bravo2 charlie delta4 echo55 foxtrot golf77");
        let missing = SuggestionGenerator::default().missing_keywords(&resume, &job);
        assert_eq!(missing, vec!["alpha1", "bravo2", "charlie", "delta4", "echo55"]);
    }

    #[test]
    fn test_generic_tail_always_present() {
        let text = TokenSet::from_text("identical requirements everywhere");
        let suggestions = SuggestionGenerator::default().suggest(&text, &text);
        assert_eq!(suggestions, DEFAULT_GENERIC_SUGGESTIONS);
    }

    #[test]
    fn test_never_fewer_than_two_suggestions() {
        let cases = [("", ""), ("rust", ""), ("", "rust"), ("anything", "kubernetes")];
        for (resume, job) in cases {
            let suggestions = SuggestionGenerator::default()
                .suggest(&TokenSet::from_text(resume), &TokenSet::from_text(job));
            assert!(suggestions.len() >= 2, "{resume:?} / {job:?}");
        }
    }
}
