//! Agent card advertised at the well-known path

use quote_a2a::{AgentCapabilities, AgentCard, AgentSkill};

pub const AGENT_NAME: &str = "Quote Generator Agent";
pub const AGENT_VERSION: &str = "1.0.0";

/// Build the agent card for an agent reachable at `public_url`
pub fn agent_card(public_url: &str) -> AgentCard {
    let generate_quote = AgentSkill::new(
        "generate_quote",
        "Generate Quote",
        "Generate a random inspirational quote on a given topic or theme",
    )
    .with_tags(["quotes", "inspiration", "motivation", "wisdom"])
    .with_examples([
        "Generate a quote about success",
        "Give me an inspirational quote about perseverance",
        "Create a motivational quote about teamwork",
    ]);

    let random_quote = AgentSkill::new(
        "random_quote",
        "Random Quote",
        "Generate a completely random inspirational quote on any topic",
    )
    .with_tags(["quotes", "inspiration", "motivation", "random", "surprise"])
    .with_examples([
        "Give me a random quote",
        "Surprise me with a quote",
        "Random inspirational quote",
    ]);

    AgentCard {
        name: AGENT_NAME.to_string(),
        description: "Generates random inspirational quotes on various topics using OpenAI GPT models"
            .to_string(),
        url: public_url.to_string(),
        version: AGENT_VERSION.to_string(),
        default_input_modes: vec!["text".to_string()],
        default_output_modes: vec!["text".to_string()],
        capabilities: AgentCapabilities::default(),
        skills: vec![generate_quote, random_quote],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Classification, classify};

    #[test]
    fn test_card() {
        let card = agent_card("http://localhost:8080/");

        assert_eq!(card.name, "Quote Generator Agent");
        assert_eq!(card.version, "1.0.0");
        assert_eq!(card.url, "http://localhost:8080/");
        let ids: Vec<_> = card.skills.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["generate_quote", "random_quote"]);
    }

    #[test]
    fn test_skill_examples_route_to_their_skill() {
        let card = agent_card("http://localhost:8080/");
        for skill in &card.skills {
            let expected = if skill.id == "random_quote" {
                Classification::Random
            } else {
                Classification::Topic
            };
            for example in &skill.examples {
                assert_eq!(classify(example), expected, "{example}");
            }
        }
    }
}
