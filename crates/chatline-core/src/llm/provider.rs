/// Identifies one of the supported inference providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// Hosted open-model text-completion endpoint (primary).
    HuggingFace,
    /// Commercial chat-completion API (secondary).
    OpenAI,
}

impl ProviderId {
    /// Parse a configured provider value. Returns `None` for anything
    /// unrecognized so the caller can decide how to report it.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "huggingface" | "hf" | "primary" => Some(Self::HuggingFace),
            "openai" | "secondary" => Some(Self::OpenAI),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::OpenAI => "openai",
        }
    }

    pub fn all() -> [ProviderId; 2] {
        [Self::HuggingFace, Self::OpenAI]
    }
}

impl std::fmt::Display for ProviderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_providers() {
        assert_eq!(ProviderId::parse("huggingface"), Some(ProviderId::HuggingFace));
        assert_eq!(ProviderId::parse(" OpenAI "), Some(ProviderId::OpenAI));
        assert_eq!(ProviderId::parse("primary"), Some(ProviderId::HuggingFace));
        assert_eq!(ProviderId::parse("secondary"), Some(ProviderId::OpenAI));
    }

    #[test]
    fn test_parse_unknown_provider() {
        assert_eq!(ProviderId::parse("anthropic"), None);
        assert_eq!(ProviderId::parse(""), None);
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for id in ProviderId::all() {
            assert_eq!(ProviderId::parse(&id.to_string()), Some(id));
        }
    }
}
